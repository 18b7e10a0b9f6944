use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PostshiftError;

/// How the slug token is cut out of the filename remainder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum SlugMode {
    /// Cut at the first `.`, so `v1.0-release.md` becomes `v1`.
    #[default]
    FirstDot,
    /// Strip only the final extension, so `v1.0-release.md` becomes `v1.0-release`.
    Extension,
}

impl std::fmt::Display for SlugMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstDot => write!(f, "first_dot"),
            Self::Extension => write!(f, "extension"),
        }
    }
}

/// One post discovered in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceItem {
    pub path: PathBuf,
    pub file_name: String,
    pub date_token: String,
    pub slug_token: String,
}

/// Directory and `index.md` written for one source item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationItem {
    pub directory: PathBuf,
    pub index_path: PathBuf,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Migrated,
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Migrated => write!(f, "migrated"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of attempting one file of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn migrated(item: &SourceItem, destination: &DestinationItem) -> Self {
        Self {
            source: item.path.clone(),
            date: Some(item.date_token.clone()),
            slug: Some(item.slug_token.clone()),
            status: OutcomeStatus::Migrated,
            destination: Some(destination.index_path.clone()),
            error_code: None,
            error: None,
        }
    }

    /// `item` is `None` when the tokens could not be derived from the filename.
    pub fn failed(source: PathBuf, item: Option<&SourceItem>, err: &PostshiftError) -> Self {
        Self {
            source,
            date: item.map(|i| i.date_token.clone()),
            slug: item.map(|i| i.slug_token.clone()),
            status: OutcomeStatus::Failed,
            destination: None,
            error_code: Some(err.code().to_string()),
            error: Some(err.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

/// Aggregate outcome of one `migrate` run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when fail-fast stopped the batch at a failing item.
    pub aborted: bool,
    pub migrated: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl MigrationReport {
    pub fn new(source_root: PathBuf, destination_root: PathBuf) -> Self {
        let now = Utc::now();
        Self {
            source_root,
            destination_root,
            started_at: now,
            finished_at: now,
            aborted: false,
            migrated: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome.status {
            OutcomeStatus::Migrated => self.migrated += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.aborted
    }
}

/// Dry-run preview of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedItem {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    /// Destination directory already exists or an earlier item claims the same slug.
    pub conflict: bool,
    /// First-dot slug cut dropped part of the name.
    pub truncated: bool,
    /// Date token does not parse as `YYYY-MM-DD`.
    pub date_suspect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationPlan {
    pub dry_run: bool,
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub item_count: usize,
    pub conflicts: usize,
    pub items: Vec<PlannedItem>,
}
