//! Configuration validation.
//!
//! Every key is optional; blank values fall back to defaults, so only
//! non-blank values are checked.

use crate::domain::error::JournalError;
use crate::domain::trade::TimeZone;
use crate::ports::config_port::ConfigPort;

pub fn validate_journal_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_storage_key(config)?;
    validate_default_time_zone(config)?;
    validate_log_level(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> JournalError {
    JournalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_storage_key(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let Some(value) = config.get_string("journal", "storage_key") else {
        return Ok(());
    };
    let value = value.trim();
    if value.contains(['/', '\\']) || value.starts_with('.') {
        return Err(invalid(
            "journal",
            "storage_key",
            "storage_key must be a plain name (no path separators or leading dot)",
        ));
    }
    Ok(())
}

fn validate_default_time_zone(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("journal", "default_time_zone") {
        Some(s) if !s.trim().is_empty() => s
            .parse::<TimeZone>()
            .map(|_| ())
            .map_err(|reason| invalid("journal", "default_time_zone", reason)),
        _ => Ok(()),
    }
}

fn validate_log_level(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("logging", "level") {
        Some(s) if !s.trim().is_empty() => {
            match s.trim().to_lowercase().as_str() {
                "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
                _ => Err(invalid(
                    "logging",
                    "level",
                    "level must be one of off, error, warn, info, debug, trace",
                )),
            }
        }
        _ => Ok(()),
    }
}
