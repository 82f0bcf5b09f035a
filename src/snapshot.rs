use crate::builder::build;
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::fetch::{collect_activity, RawResultsFile};
use crate::index;
use crate::store::SnapshotStore;
use crate::template;
use crate::week::{parse_week_date, week_start, WeekWindow};
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::path::PathBuf;

/// One scheduled collection run: read the raw fetch results, build the
/// canonical snapshot for the week, store it, republish the index. Any
/// failure before `put` leaves the store untouched; the next run retries
/// the same week.
pub fn exec(common: CommonArgs, week: Option<String>, raw: PathBuf) -> anyhow::Result<()> {
    let config = Config::load(&common.config).context("Failed to load configuration")?;
    let source = RawResultsFile::load(&raw)
        .with_context(|| format!("Failed to load raw fetch results from {}", raw.display()))?;

    // The scheduled caller runs inside the week being collected; an
    // explicit --week must already be a Monday and fails loudly otherwise.
    let week_date = match week {
        Some(input) => parse_week_date(&input)?,
        None => week_start(Utc::now().date_naive()),
    };
    let window = WeekWindow::for_week(week_date)?;

    let configured = config
        .resolve_repos(source.discovered())
        .context("Failed to resolve configured repositories")?;
    log::info!(
        "collecting week {week_date}: {} configured repos, raw data fetched at {}",
        configured.len(),
        source.fetched_at()
    );

    let collected = collect_activity(
        &source,
        configured.iter().map(String::as_str),
        &window,
        true,
    );
    if collected.len() < configured.len() {
        log::warn!(
            "{} of {} repos had no raw data and will be zero-filled",
            configured.len() - collected.len(),
            configured.len()
        );
    }

    let snapshot = build(week_date, collected, &configured, &config)
        .context("Failed to build week snapshot")?;

    let store = SnapshotStore::new(&common.data).context("Failed to open snapshot store")?;
    store
        .put(&snapshot)
        .context("Failed to store week snapshot")?;
    log::info!("stored snapshot for week {week_date}");

    let templates =
        template::load_templates(&common.templates).context("Failed to load templates")?;
    index::publish(&store, &templates).context("Failed to publish index")?;

    println!(
        "{} week {} ({} repos) → {}",
        style("Stored").bold().green(),
        snapshot.week_date,
        snapshot.repos.len(),
        store.data_dir().display()
    );
    Ok(())
}
