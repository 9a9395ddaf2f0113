//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Configuration with every key unset, so all defaults apply.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[journal]
data_dir = /var/lib/ictjournal
storage_key = ictTrades
default_time_zone = CET (Winter)

[export]
output_dir = exports
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("journal", "data_dir"),
            Some("/var/lib/ictjournal".to_string())
        );
        assert_eq!(
            adapter.get_string("journal", "storage_key"),
            Some("ictTrades".to_string())
        );
        assert_eq!(
            adapter.get_string("journal", "default_time_zone"),
            Some("CET (Winter)".to_string())
        );
        assert_eq!(
            adapter.get_string("export", "output_dir"),
            Some("exports".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[journal]\ndata_dir = x\n").unwrap();
        assert_eq!(adapter.get_string("journal", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_string_or_falls_back_on_blank() {
        let adapter = FileConfigAdapter::from_string("[journal]\nstorage_key =\n").unwrap();
        assert_eq!(
            adapter.get_string_or("journal", "storage_key", "ictTrades"),
            "ictTrades"
        );
        assert_eq!(adapter.get_string_or("export", "output_dir", "."), ".");
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[journal]\na = true\nb = yes\nc = 1\n").unwrap();
        assert!(adapter.get_bool("journal", "a", false));
        assert!(adapter.get_bool("journal", "b", false));
        assert!(adapter.get_bool("journal", "c", false));
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[journal]\na = false\nb = no\nc = 0\n").unwrap();
        assert!(!adapter.get_bool("journal", "a", true));
        assert!(!adapter.get_bool("journal", "b", true));
        assert!(!adapter.get_bool("journal", "c", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[journal]\nconfirm_delete = maybe\n").unwrap();
        assert!(adapter.get_bool("journal", "confirm_delete", true));
        assert!(!adapter.get_bool("journal", "missing", false));
    }

    #[test]
    fn empty_config_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("journal", "data_dir"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[export]\noutput_dir = /tmp/out\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("export", "output_dir"),
            Some("/tmp/out".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
