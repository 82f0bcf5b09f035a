use crate::cli::CommonArgs;
use crate::error::{PulseError, Result};
use crate::model::{IndexArtifact, Template};
use crate::store::SnapshotStore;
use crate::template;
use anyhow::Context;
use std::collections::BTreeMap;

/// Regenerate `index.json` in the data directory: the week dates and
/// template ids the site uses for routing. Newest week first, matching
/// what the dashboard expects.
pub fn publish(
    store: &SnapshotStore,
    templates: &BTreeMap<String, Template>,
) -> Result<IndexArtifact> {
    let mut dates = store.list_dates()?;
    dates.reverse();

    let artifact = IndexArtifact {
        latest: dates.first().copied(),
        count: dates.len(),
        dates,
        templates: templates.keys().cloned().collect(),
    };

    let path = store.data_dir().join("index.json");
    let body = serde_json::to_string_pretty(&artifact)?;
    std::fs::write(&path, body)
        .map_err(|e| PulseError::StoreWrite(format!("{}: {e}", path.display())))?;
    Ok(artifact)
}

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&common.data).context("Failed to open snapshot store")?;
    let templates =
        template::load_templates(&common.templates).context("Failed to load templates")?;
    let artifact = publish(&store, &templates).context("Failed to publish index")?;
    log::info!(
        "published index: {} weeks, {} templates",
        artifact.count,
        artifact.templates.len()
    );
    println!("Indexed {} weeks", artifact.count);
    Ok(())
}
