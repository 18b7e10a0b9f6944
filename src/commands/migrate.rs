use tracing::{info, warn};

use crate::config::MigrationConfig;
use crate::error::{PostshiftError, Result};
use crate::frontmatter;
use crate::model::{DestinationItem, ItemOutcome, MigrationReport, SourceItem};
use crate::output::{self, Format};
use crate::store::{destination, source};

/// Migrate every matching post and print the report. Fails with
/// `ItemsFailed` after printing when any post could not be migrated.
pub fn run(config: &MigrationConfig, format: Format) -> Result<()> {
    let report = run_batch(config)?;
    output::print_report(&report, format)?;

    if report.is_success() {
        Ok(())
    } else {
        Err(PostshiftError::ItemsFailed {
            failed: report.failed,
            attempted: report.outcomes.len(),
        })
    }
}

/// Validate `config`, then attempt each discovered post in filename order.
///
/// Batch-level problems (bad config, unreadable source root) are returned as
/// `Err` before anything is written. Per-post failures land in the report; with
/// `fail_fast` the batch stops at the first one.
pub fn run_batch(config: &MigrationConfig) -> Result<MigrationReport> {
    config.validate()?;
    let paths = source::discover(config)?;

    let mut report = MigrationReport::new(
        config.source_root.clone(),
        config.destination_root.clone(),
    );

    for path in paths {
        let item = match source::load_item(&path, config.slug_mode) {
            Ok(item) => item,
            Err(err) => {
                warn!(source = %path.display(), code = err.code(), "{err}");
                report.record(ItemOutcome::failed(path, None, &err));
                if config.fail_fast {
                    report.aborted = true;
                    break;
                }
                continue;
            }
        };

        match migrate_item(&item, config) {
            Ok(dest) => {
                info!(
                    source = %item.file_name,
                    destination = %dest.index_path.display(),
                    "migrated post"
                );
                report.record(ItemOutcome::migrated(&item, &dest));
            }
            Err(err) => {
                warn!(source = %item.file_name, code = err.code(), "{err}");
                report.record(ItemOutcome::failed(path, Some(&item), &err));
                if config.fail_fast {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    report.finish();
    Ok(report)
}

/// Create `destination/<slug>/index.md` holding the source bytes with the
/// date metadata line inserted as the second line.
pub fn migrate_item(item: &SourceItem, config: &MigrationConfig) -> Result<DestinationItem> {
    let directory = destination::create_item_dir(&config.destination_root, &item.slug_token)?;

    let content = source::read_content(item)?;
    let line = frontmatter::metadata_line(config.date_key(), &item.date_token);
    let rewritten = frontmatter::insert_line(&content, &line);

    let index_path = destination::write_index(&directory, &rewritten)?;
    Ok(DestinationItem {
        directory,
        index_path,
        bytes_written: rewritten.len() as u64,
    })
}
