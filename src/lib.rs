//! FieldTuner: reading, editing and writing Battlefield 6 `PROFSAVE_profile`
//! settings files.

#![forbid(unsafe_code)]

pub mod backup;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod locate;
pub mod presets;
pub mod profsave;
pub mod session;
pub mod value;
