use std::collections::HashSet;

use crate::config::{INDEX_FILE_NAME, MigrationConfig};
use crate::error::Result;
use crate::model::{MigrationPlan, PlannedItem, SlugMode};
use crate::output::{self, Format};
use crate::store::{destination, source};
use crate::tokens;

pub fn run(config: &MigrationConfig, format: Format) -> Result<()> {
    let plan = build_plan(config)?;
    output::print_plan(&plan, format)
}

/// Preview a migration without touching the destination.
pub fn build_plan(config: &MigrationConfig) -> Result<MigrationPlan> {
    config.validate()?;
    let paths = source::discover(config)?;

    let mut claimed = HashSet::new();
    let mut items = Vec::with_capacity(paths.len());

    for path in paths {
        let planned = match source::load_item(&path, config.slug_mode) {
            Ok(item) => {
                let dir = destination::item_dir(&config.destination_root, &item.slug_token);
                let conflict = dir.exists() || !claimed.insert(item.slug_token.clone());
                PlannedItem {
                    truncated: config.slug_mode == SlugMode::FirstDot
                        && tokens::is_truncated(&item.file_name),
                    date_suspect: !tokens::is_calendar_date(&item.date_token),
                    source: item.path,
                    date: Some(item.date_token),
                    slug: Some(item.slug_token),
                    destination: Some(dir.join(INDEX_FILE_NAME)),
                    conflict,
                    error: None,
                }
            }
            Err(err) => PlannedItem {
                source: path,
                date: None,
                slug: None,
                destination: None,
                conflict: false,
                truncated: false,
                date_suspect: false,
                error: Some(err.to_string()),
            },
        };
        items.push(planned);
    }

    Ok(MigrationPlan {
        dry_run: true,
        source_root: config.source_root.clone(),
        destination_root: config.destination_root.clone(),
        item_count: items.len(),
        conflicts: items.iter().filter(|item| item.conflict).count(),
        items,
    })
}
