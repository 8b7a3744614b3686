//! Auto-detection of the game's settings file

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::game::{DOCUMENTS_SUBDIR, PROFILE_FILENAME, SETTINGS_SUBDIR, STEAM_SUBDIR};

/// Known install locations, most specific first
pub fn candidate_paths() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    candidate_paths_under(&home, dirs::document_dir().as_deref())
}

/// Candidates for a given home and (optional) platform Documents directory
pub fn candidate_paths_under(home: &Path, documents: Option<&Path>) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Some(documents) = documents {
        roots.push(documents.to_path_buf());
    }
    for root in [home.join("Documents"), home.join("OneDrive").join("Documents")] {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }

    let mut candidates = Vec::with_capacity(roots.len() * 2);
    for root in roots {
        let settings = root.join(DOCUMENTS_SUBDIR).join(SETTINGS_SUBDIR);
        candidates.push(settings.join(STEAM_SUBDIR).join(PROFILE_FILENAME));
        candidates.push(settings.join(PROFILE_FILENAME));
    }
    candidates
}

/// First candidate that exists as a file
pub fn detect_in(candidates: &[PathBuf]) -> Option<PathBuf> {
    let found = candidates.iter().find(|path| path.is_file()).cloned();
    match &found {
        Some(path) => info!(path = %path.display(), "found game settings file"),
        None => debug!(checked = candidates.len(), "no game settings file found"),
    }
    found
}

pub fn detect() -> Option<PathBuf> {
    detect_in(&candidate_paths())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_candidates_without_documents_dir() {
        let home = Path::new("/home/player");
        let candidates = candidate_paths_under(home, None);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/home/player/Documents/Battlefield 6/settings/steam/PROFSAVE_profile"),
                PathBuf::from("/home/player/Documents/Battlefield 6/settings/PROFSAVE_profile"),
                PathBuf::from("/home/player/OneDrive/Documents/Battlefield 6/settings/steam/PROFSAVE_profile"),
                PathBuf::from("/home/player/OneDrive/Documents/Battlefield 6/settings/PROFSAVE_profile"),
            ]
        );
    }

    #[test]
    fn test_candidates_dedupe_documents_dir() {
        let home = Path::new("/home/player");
        let same = candidate_paths_under(home, Some(Path::new("/home/player/Documents")));
        assert_eq!(same.len(), 4);

        let other = candidate_paths_under(home, Some(Path::new("/data/Docs")));
        assert_eq!(other.len(), 6);
        assert_eq!(
            other[0],
            PathBuf::from("/data/Docs/Battlefield 6/settings/steam/PROFSAVE_profile")
        );
    }

    #[test]
    fn test_detect_in_picks_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = candidate_paths_under(dir.path(), None);
        assert_eq!(detect_in(&candidates), None);

        let plain = &candidates[1];
        fs::create_dir_all(plain.parent().unwrap()).unwrap();
        fs::write(plain, "GstRender.VSyncMode 0\n").unwrap();
        assert_eq!(detect_in(&candidates).as_ref(), Some(plain));

        let steam = &candidates[0];
        fs::create_dir_all(steam.parent().unwrap()).unwrap();
        fs::write(steam, "GstRender.VSyncMode 1\n").unwrap();
        assert_eq!(detect_in(&candidates).as_ref(), Some(steam));
    }
}
