use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::MigrationConfig;
use crate::error::{PostshiftError, Result};
use crate::model::{SlugMode, SourceItem};
use crate::tokens;

/// Regular files directly under the source root whose extension matches,
/// sorted by filename so runs are deterministic.
pub fn discover(config: &MigrationConfig) -> Result<Vec<PathBuf>> {
    let root = &config.source_root;
    let wanted = config.normalized_extension();
    let mut paths = Vec::new();

    let entries =
        fs::read_dir(root).map_err(|err| PostshiftError::source_unreadable(root, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| PostshiftError::source_unreadable(root, err))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|ext| ext.to_str()) == Some(wanted) {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping file with non-matching extension");
        }
    }

    paths.sort();
    debug!(root = %root.display(), count = paths.len(), "discovered source posts");
    Ok(paths)
}

/// Derive tokens for a discovered path.
pub fn load_item(path: &Path, mode: SlugMode) -> Result<SourceItem> {
    let file_name = file_name_of(path)?;
    let date_token = tokens::date_token(&file_name)?;
    let slug_token = tokens::slug_token(&file_name, mode)?;

    if mode == SlugMode::FirstDot && tokens::is_truncated(&file_name) {
        warn!(
            file = %file_name,
            slug = %slug_token,
            "slug cut at first '.'; use slug mode 'extension' to keep the full name"
        );
    }
    if !tokens::is_calendar_date(&date_token) {
        warn!(file = %file_name, date = %date_token, "date token is not a YYYY-MM-DD date");
    }

    Ok(SourceItem {
        path: path.to_path_buf(),
        file_name,
        date_token,
        slug_token,
    })
}

pub fn read_content(item: &SourceItem) -> Result<Vec<u8>> {
    fs::read(&item.path).map_err(|err| PostshiftError::source_unreadable(&item.path, err))
}

fn file_name_of(path: &Path) -> Result<String> {
    let Some(name) = path.file_name() else {
        return Err(PostshiftError::InvalidFileName(path.display().to_string()));
    };
    name.to_str()
        .map(str::to_string)
        .ok_or_else(|| PostshiftError::InvalidFileName(name.to_string_lossy().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_filters_extension_and_sorts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("2021-05-02-second.md"), "---\n").unwrap();
        fs::write(root.join("2021-05-01-first.md"), "---\n").unwrap();
        fs::write(root.join("2021-05-03-notes.txt"), "ignored").unwrap();
        fs::write(root.join("README"), "ignored").unwrap();
        fs::create_dir(root.join("2021-05-04-dir.md")).unwrap();

        let config = MigrationConfig::new(root, root);
        let names: Vec<String> = discover(&config)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["2021-05-01-first.md", "2021-05-02-second.md"]);
    }

    #[test]
    fn discover_does_not_recurse() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("drafts");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("2021-05-01-nested.md"), "---\n").unwrap();

        let config = MigrationConfig::new(dir.path(), dir.path());
        assert!(discover(&config).unwrap().is_empty());
    }

    #[test]
    fn discover_honors_custom_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2021-05-01-a.markdown"), "---\n").unwrap();
        fs::write(dir.path().join("2021-05-01-b.md"), "---\n").unwrap();

        let config = MigrationConfig::new(dir.path(), dir.path()).with_extension(".markdown");
        let found = discover(&config).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("2021-05-01-a.markdown"));
    }

    #[test]
    fn discover_missing_root_is_source_unreadable() {
        let dir = tempdir().unwrap();
        let config = MigrationConfig::new(dir.path().join("nope"), dir.path());
        let err = discover(&config).unwrap_err();
        assert_eq!(err.code(), "source_unreadable");
    }

    #[test]
    fn load_item_derives_tokens_from_name_only() {
        let item = load_item(
            Path::new("/posts/2021-05-01-Hello-World.md"),
            SlugMode::FirstDot,
        )
        .unwrap();
        assert_eq!(item.file_name, "2021-05-01-Hello-World.md");
        assert_eq!(item.date_token, "2021-05-01");
        assert_eq!(item.slug_token, "hello-world");
    }
}
