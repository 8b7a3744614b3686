//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// PROFSAVE_profile text format constants
pub mod format {
    /// Key prefixes of the three core setting families (render, audio, input).
    /// Finding any one of them anywhere in a file is enough to accept it.
    pub const KNOWN_PREFIXES: [&str; 3] = ["GstRender.", "GstAudio.", "GstInput."];

    /// Separator between key and value on a line
    pub const SEPARATOR: char = ' ';

    /// Old value reported for keys that did not exist in the original file
    pub const NEW_VALUE_SENTINEL: &str = "(new)";
}

/// Exported/backed-up file naming
pub mod export {
    /// Prefix of generated export file names
    pub const FILE_PREFIX: &str = "PROFSAVE_profile_";

    /// chrono format of the export timestamp (YYYYMMDD_HHMM)
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

    /// Prefix of backup file names
    pub const BACKUP_PREFIX: &str = "PROFSAVE_profile_backup_";

    /// chrono format of the backup timestamp (to the second)
    pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Extension of backup files
    pub const BACKUP_EXTENSION: &str = "bak";
}

/// Application config and data locations
pub mod config {
    /// Directory under the platform config/data dirs
    pub const APP_DIR: &str = "fieldtuner";

    /// Application config file name
    pub const FILENAME: &str = "config.json";

    /// Backup directory name under the data dir
    pub const BACKUP_DIR: &str = "backups";
}

/// Game install layout used for auto-detection
pub mod game {
    /// Name of the settings file the game writes
    pub const PROFILE_FILENAME: &str = "PROFSAVE_profile";

    /// Game folder under the user's Documents
    pub const DOCUMENTS_SUBDIR: &str = "Battlefield 6";

    /// Settings folder inside the game folder
    pub const SETTINGS_SUBDIR: &str = "settings";

    /// Storefront-specific settings folder
    pub const STEAM_SUBDIR: &str = "steam";
}

/// Value formatting
pub mod value {
    /// Decimal places the game writes for floats
    pub const FLOAT_WIRE_DECIMALS: usize = 6;

    /// Decimal places used when showing floats to the user
    pub const FLOAT_DISPLAY_DECIMALS: usize = 2;

    /// Display text for a boolean that is on
    pub const BOOL_ON: &str = "ON";

    /// Display text for a boolean that is off
    pub const BOOL_OFF: &str = "OFF";
}
