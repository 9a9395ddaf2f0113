//! Resolved journal settings.

use crate::domain::trade::TimeZone;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalSettings {
    pub storage_key: String,
    /// Applied by `add` when no time zone is given.
    pub default_time_zone: TimeZone,
    pub output_dir: PathBuf,
    pub confirm_delete: bool,
    pub log_level: String,
}
