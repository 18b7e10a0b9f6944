use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PostshiftError, Result};
use crate::model::SlugMode;

pub const DEFAULT_EXTENSION: &str = "md";
pub const DEFAULT_DATE_KEY: &str = "date";
pub const INDEX_FILE_NAME: &str = "index.md";

/// Everything a migration run needs. Build one with [`MigrationConfig::new`]
/// or from [`ConfigFile`] + [`ConfigOverrides`], then call [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub extension: String,
    pub date_key: String,
    pub slug_mode: SlugMode,
    pub fail_fast: bool,
}

/// On-disk YAML form; every field optional so CLI flags can fill the gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub source_root: Option<PathBuf>,
    #[serde(default)]
    pub destination_root: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub date_key: Option<String>,
    #[serde(default)]
    pub slug_mode: Option<SlugMode>,
    #[serde(default)]
    pub fail_fast: Option<bool>,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub source_root: Option<PathBuf>,
    pub destination_root: Option<PathBuf>,
    pub extension: Option<String>,
    pub date_key: Option<String>,
    pub slug_mode: Option<SlugMode>,
    pub fail_fast: bool,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            PostshiftError::InvalidConfig(format!(
                "cannot read config '{}': {err}",
                path.display()
            ))
        })?;
        Self::parse(&path.display().to_string(), &raw)
    }

    pub fn parse(origin: &str, raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|yaml_err| {
            PostshiftError::InvalidConfig(format!("failed to parse '{origin}': {yaml_err}"))
        })
    }
}

impl MigrationConfig {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            date_key: DEFAULT_DATE_KEY.to_string(),
            slug_mode: SlugMode::default(),
            fail_fast: false,
        }
    }

    pub fn with_slug_mode(mut self, mode: SlugMode) -> Self {
        self.slug_mode = mode;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Merge an optional file layer with CLI overrides.
    pub fn resolve(file: Option<ConfigFile>, overrides: ConfigOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let source_root = overrides
            .source_root
            .or(file.source_root)
            .ok_or_else(|| PostshiftError::InvalidConfig("source root is required".into()))?;
        let destination_root = overrides
            .destination_root
            .or(file.destination_root)
            .ok_or_else(|| {
                PostshiftError::InvalidConfig("destination root is required".into())
            })?;

        let mut config = Self::new(source_root, destination_root);
        if let Some(extension) = overrides.extension.or(file.extension) {
            config.extension = extension;
        }
        if let Some(date_key) = overrides.date_key.or(file.date_key) {
            config.date_key = date_key;
        }
        if let Some(mode) = overrides.slug_mode.or(file.slug_mode) {
            config.slug_mode = mode;
        }
        config.fail_fast = overrides.fail_fast || file.fail_fast.unwrap_or(false);
        Ok(config)
    }

    /// Check field shapes and that both roots are existing directories.
    pub fn validate(&self) -> Result<()> {
        self.validate_fields()?;
        self.validate_roots()
    }

    fn validate_fields(&self) -> Result<()> {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(PostshiftError::InvalidConfig(format!(
                "extension '{}' is not a plain file extension",
                self.extension
            )));
        }

        let key = self.date_key.trim();
        if key.is_empty() || key.contains([':', '\n', '\r']) {
            return Err(PostshiftError::InvalidConfig(format!(
                "metadata key '{}' must be non-empty and contain no ':' or line breaks",
                self.date_key
            )));
        }
        Ok(())
    }

    fn validate_roots(&self) -> Result<()> {
        let source = fs::metadata(&self.source_root)
            .map_err(|err| PostshiftError::source_unreadable(&self.source_root, err))?;
        if !source.is_dir() {
            return Err(PostshiftError::source_unreadable(
                &self.source_root,
                std::io::Error::other("not a directory"),
            ));
        }

        let destination = fs::metadata(&self.destination_root)
            .map_err(|err| PostshiftError::destination_unwritable(&self.destination_root, err))?;
        if !destination.is_dir() {
            return Err(PostshiftError::destination_unwritable(
                &self.destination_root,
                std::io::Error::other("not a directory"),
            ));
        }
        Ok(())
    }

    /// Extension without a leading dot, as matched against `Path::extension`.
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn date_key(&self) -> &str {
        self.date_key.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn overrides_win_over_file_values() {
        let file = ConfigFile::parse(
            "postshift.yaml",
            r#"
source_root: /from/file/posts
destination_root: /from/file/out
extension: markdown
slug_mode: extension
fail_fast: true
"#,
        )
        .unwrap();

        let config = MigrationConfig::resolve(
            Some(file),
            ConfigOverrides {
                source_root: Some("cli/posts".into()),
                extension: Some("md".into()),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();

        assert_eq!(config.source_root, PathBuf::from("cli/posts"));
        assert_eq!(config.destination_root, PathBuf::from("/from/file/out"));
        assert_eq!(config.extension, "md");
        assert_eq!(config.slug_mode, SlugMode::Extension);
        assert!(config.fail_fast);
        assert_eq!(config.date_key, DEFAULT_DATE_KEY);
    }

    #[test]
    fn missing_roots_are_invalid_config() {
        let err = MigrationConfig::resolve(None, ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
        assert!(err.to_string().contains("source root"));
    }

    #[test]
    fn unknown_yaml_fields_are_rejected() {
        let err = ConfigFile::parse("bad.yaml", "source_root: a\ntemplate: '{slug}'\n").unwrap_err();
        let PostshiftError::InvalidConfig(message) = err else {
            panic!("expected invalid config error");
        };
        assert!(message.contains("unknown field"));
    }

    #[test]
    fn validate_reports_missing_source_as_unreadable() {
        let dir = tempdir().unwrap();
        let config = MigrationConfig::new(dir.path().join("missing"), dir.path());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PostshiftError::SourceUnreadable { .. }));
    }

    #[test]
    fn validate_reports_missing_destination_as_unwritable() {
        let dir = tempdir().unwrap();
        let config = MigrationConfig::new(dir.path(), dir.path().join("missing"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PostshiftError::DestinationUnwritable { .. }));
    }

    #[test]
    fn validate_rejects_bad_metadata_key_and_extension() {
        let dir = tempdir().unwrap();
        let mut config = MigrationConfig::new(dir.path(), dir.path());
        config.date_key = "pub:date".into();
        assert_eq!(config.validate().unwrap_err().code(), "invalid_config");

        let config = MigrationConfig::new(dir.path(), dir.path()).with_extension(".");
        assert_eq!(config.validate().unwrap_err().code(), "invalid_config");
    }

    #[cfg(unix)]
    #[test]
    fn validate_leaves_write_permission_to_the_filesystem() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::set_permissions(&out, fs::Permissions::from_mode(0o555)).unwrap();

        let result = MigrationConfig::new(dir.path(), &out).validate();
        fs::set_permissions(&out, fs::Permissions::from_mode(0o755)).unwrap();
        result.unwrap();
    }

    #[test]
    fn malformed_yaml_is_invalid_config() {
        let err = ConfigFile::parse("broken.yaml", "source_root: [unclosed\n").unwrap_err();
        assert_eq!(err.code(), "invalid_config");
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn leading_dot_extension_is_normalized() {
        let dir = tempdir().unwrap();
        let config = MigrationConfig::new(dir.path(), dir.path()).with_extension(".md");
        config.validate().unwrap();
        assert_eq!(config.normalized_extension(), "md");
    }
}
