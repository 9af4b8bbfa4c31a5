//! Configuration errors, raised before any dataset is opened.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from flag, environment, or config-file handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required values were not given by any source.
    #[error("required flag(s) not set: {}", .flags.join(", "))]
    MissingFlags { flags: Vec<&'static str> },

    /// Input path has no file extension.
    #[error("{flag} must be file with csv extension: {path}")]
    MissingExtension { flag: &'static str, path: PathBuf },

    /// Input path has an extension other than `.csv`.
    #[error("{flag} is not type csv: {path}")]
    WrongExtension { flag: &'static str, path: PathBuf },

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys.
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_display() {
        let err = ConfigError::MissingFlags {
            flags: vec!["--dump-file", "--output-file"],
        };
        assert_eq!(
            err.to_string(),
            "required flag(s) not set: --dump-file, --output-file"
        );
    }

    #[test]
    fn test_extension_display() {
        let err = ConfigError::WrongExtension {
            flag: "--dump-file",
            path: PathBuf::from("dump.xlsx"),
        };
        assert_eq!(err.to_string(), "--dump-file is not type csv: dump.xlsx");
    }
}
