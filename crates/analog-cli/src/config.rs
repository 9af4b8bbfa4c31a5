//! Config file discovery and merging with command-line flags.
//!
//! Values are taken in order of precedence:
//! 1. Command-line flags
//! 2. `ANALOG_*` environment variables (handled by clap)
//! 3. The config file: `--config PATH`, or `.analog.toml` in the home directory
//!
//! An explicitly named config file must exist. The default file is optional.

use std::fs;
use std::path::{Path, PathBuf};

use analog_xref::{HeaderNames, XrefJob};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::cli::JobArgs;
use crate::error::ConfigError;

/// Config file name looked up in the home directory.
pub const CONFIG_FILENAME: &str = ".analog.toml";

/// Job values read from a TOML config file. Keys mirror the long flag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub dump_file: Option<PathBuf>,
    pub df_dn_header: Option<String>,
    pub df_hp_header: Option<String>,
    pub assessment_file: Option<PathBuf>,
    pub af_dn_header: Option<String>,
    pub af_hp_header: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// A config file together with where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub values: FileConfig,
}

/// Path of the default config file, if the home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Loads the explicit config file, or the default one if it exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<LoadedConfig>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return load_config_from(path).map(Some);
    }

    let Some(path) = default_config_path() else {
        tracing::debug!("could not determine home directory, skipping config file");
        return Ok(None);
    };
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no config file found");
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Reads and parses a config file.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let values = toml::from_str(&content).map_err(|source| ConfigError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "using config file");
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        values,
    })
}

/// Merges flags over config values and validates the result.
///
/// All missing values are reported together.
pub fn resolve_job(args: &JobArgs, file: &FileConfig) -> Result<XrefJob, ConfigError> {
    let mut missing = Vec::new();
    let dump = pick(
        &args.dump_file,
        &file.dump_file,
        "--dump-file",
        &mut missing,
    );
    let df_dn = pick(
        &args.df_dn_header,
        &file.df_dn_header,
        "--df-dn-header",
        &mut missing,
    );
    let df_hp = pick(
        &args.df_hp_header,
        &file.df_hp_header,
        "--df-hp-header",
        &mut missing,
    );
    let assessment = pick(
        &args.assessment_file,
        &file.assessment_file,
        "--assessment-file",
        &mut missing,
    );
    let af_dn = pick(
        &args.af_dn_header,
        &file.af_dn_header,
        "--af-dn-header",
        &mut missing,
    );
    let af_hp = pick(
        &args.af_hp_header,
        &file.af_hp_header,
        "--af-hp-header",
        &mut missing,
    );
    let output = pick(
        &args.output_file,
        &file.output_file,
        "--output-file",
        &mut missing,
    );

    let (
        Some(dump),
        Some(df_dn),
        Some(df_hp),
        Some(assessment),
        Some(af_dn),
        Some(af_hp),
        Some(output),
    ) = (dump, df_dn, df_hp, assessment, af_dn, af_hp, output)
    else {
        return Err(ConfigError::MissingFlags { flags: missing });
    };

    check_csv_extension("--dump-file", &dump)?;
    check_csv_extension("--assessment-file", &assessment)?;

    Ok(XrefJob {
        dump,
        assessment,
        output,
        dump_columns: HeaderNames::new(df_dn, df_hp),
        assessment_columns: HeaderNames::new(af_dn, af_hp),
    })
}

fn pick<T: Clone>(
    flag: &Option<T>,
    file: &Option<T>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<T> {
    let value = flag.as_ref().or(file.as_ref()).cloned();
    if value.is_none() {
        missing.push(name);
    }
    value
}

/// Requires a `.csv` extension (case-insensitive).
///
/// The extension is whatever follows the last dot of the file name, so a file
/// named `.csv` passes. Non-UTF-8 names are compared lossily and fail as a
/// wrong extension.
pub fn check_csv_extension(flag: &'static str, path: &Path) -> Result<(), ConfigError> {
    let file_name = path.file_name().map(|name| name.to_string_lossy());
    match file_name.as_deref().and_then(|name| name.rsplit_once('.')) {
        None => Err(ConfigError::MissingExtension {
            flag,
            path: path.to_path_buf(),
        }),
        Some((_, ext)) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        Some(_) => Err(ConfigError::WrongExtension {
            flag,
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> JobArgs {
        JobArgs {
            dump_file: Some(PathBuf::from("dump.csv")),
            df_dn_header: Some("DN".to_string()),
            df_hp_header: Some("HP".to_string()),
            assessment_file: Some(PathBuf::from("assessment.CSV")),
            af_dn_header: Some("Direct Number".to_string()),
            af_hp_header: Some("House Pair".to_string()),
            output_file: Some(PathBuf::from("out.csv")),
        }
    }

    #[test]
    fn test_resolve_from_flags() {
        let job = resolve_job(&full_args(), &FileConfig::default()).unwrap();
        assert_eq!(job.dump, PathBuf::from("dump.csv"));
        assert_eq!(
            job.assessment_columns,
            HeaderNames::new("Direct Number", "House Pair")
        );
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig {
            df_dn_header: Some("from-file".to_string()),
            ..FileConfig::default()
        };
        let job = resolve_job(&full_args(), &file).unwrap();
        assert_eq!(job.dump_columns.dn, "DN");
    }

    #[test]
    fn test_file_fills_gaps() {
        let args = JobArgs {
            output_file: None,
            ..full_args()
        };
        let file = FileConfig {
            output_file: Some(PathBuf::from("from-file.csv")),
            ..FileConfig::default()
        };
        let job = resolve_job(&args, &file).unwrap();
        assert_eq!(job.output, PathBuf::from("from-file.csv"));
    }

    #[test]
    fn test_missing_flags_reported_together() {
        let args = JobArgs {
            dump_file: None,
            af_hp_header: None,
            ..full_args()
        };
        let err = resolve_job(&args, &FileConfig::default()).unwrap_err();
        match err {
            ConfigError::MissingFlags { flags } => {
                assert_eq!(flags, vec!["--dump-file", "--af-hp-header"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extension_checks() {
        assert!(check_csv_extension("--dump-file", Path::new("dump.csv")).is_ok());
        assert!(check_csv_extension("--dump-file", Path::new("DUMP.Csv")).is_ok());
        assert!(matches!(
            check_csv_extension("--dump-file", Path::new("dump")),
            Err(ConfigError::MissingExtension { .. })
        ));
        assert!(matches!(
            check_csv_extension("--dump-file", Path::new("dump.csv.txt")),
            Err(ConfigError::WrongExtension { .. })
        ));
    }

    #[test]
    fn test_extension_uses_file_name_only() {
        assert!(check_csv_extension("--dump-file", Path::new(".csv")).is_ok());
        assert!(check_csv_extension("--dump-file", Path::new("exports/.csv")).is_ok());
        assert!(matches!(
            check_csv_extension("--dump-file", Path::new("exports.v2/dump")),
            Err(ConfigError::MissingExtension { .. })
        ));
        assert!(matches!(
            check_csv_extension("--dump-file", Path::new("dump.")),
            Err(ConfigError::WrongExtension { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_extension_is_wrong_type() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"dump.\xff"));
        assert!(matches!(
            check_csv_extension("--dump-file", path),
            Err(ConfigError::WrongExtension { .. })
        ));
    }

    #[test]
    fn test_bad_assessment_extension_names_flag() {
        let args = JobArgs {
            assessment_file: Some(PathBuf::from("assessment.xlsx")),
            ..full_args()
        };
        let err = resolve_job(&args, &FileConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--assessment-file is not type csv: assessment.xlsx"
        );
    }

    #[test]
    fn test_parse_kebab_case_keys() {
        let parsed: FileConfig = toml::from_str(
            r#"
            dump-file = "dump.csv"
            df-dn-header = "DN"
            af-hp-header = "House Pair"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.dump_file, Some(PathBuf::from("dump.csv")));
        assert_eq!(parsed.df_dn_header.as_deref(), Some("DN"));
        assert_eq!(parsed.af_hp_header.as_deref(), Some("House Pair"));
        assert!(parsed.output_file.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let parsed = toml::from_str::<FileConfig>("dump_file = \"x.csv\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_round_trip() {
        let config = FileConfig {
            dump_file: Some(PathBuf::from("dump.csv")),
            af_dn_header: Some("DN".to_string()),
            ..FileConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
