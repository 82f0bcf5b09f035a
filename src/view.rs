use crate::aggregate::aggregate;
use crate::cli::CommonArgs;
use crate::error::{PulseError, Result};
use crate::model::{AggregatedView, Template, WeekSnapshot};
use crate::store::SnapshotStore;
use crate::template;
use crate::week::{parse_week_date, week_start};
use anyhow::Context;
use chrono::NaiveDate;
use console::style;

pub fn exec(
    common: CommonArgs,
    week: String,
    template_id: Option<String>,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&common.data).context("Failed to open snapshot store")?;
    let templates =
        template::load_templates(&common.templates).context("Failed to load templates")?;
    let selected = template_id
        .as_deref()
        .map(|id| template::find(&templates, id))
        .transpose()?;

    let week_date = resolve_week(&store, &week)?;
    let snapshot = store.get(week_date)?;
    let view = aggregate(&snapshot, selected);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if ndjson {
        output_ndjson(&snapshot, &view)?;
    } else {
        output_table(&view, selected)?;
    }
    Ok(())
}

fn resolve_week(store: &SnapshotStore, week: &str) -> Result<NaiveDate> {
    if week == "latest" {
        store
            .latest()?
            .ok_or_else(|| PulseError::NotFound("no snapshots stored yet".to_string()))
    } else {
        Ok(week_start(parse_week_date(week)?))
    }
}

fn output_ndjson(snapshot: &WeekSnapshot, view: &AggregatedView) -> anyhow::Result<()> {
    for repo in &view.repos {
        if let Some(activity) = snapshot.repos.get(repo) {
            println!("{}", serde_json::to_string(activity)?);
        }
    }
    Ok(())
}

fn output_table(view: &AggregatedView, template: Option<&Template>) -> anyhow::Result<()> {
    let scope = view.template.as_deref().unwrap_or("all repos");
    println!("{} {} ({})", style("Week").bold(), view.week_date, scope);
    println!("{}", "─".repeat(50));

    for (metric, total) in &view.totals {
        let name = metric.as_str();
        let hints = template.map(|t| &t.metrics);
        if hints.is_some_and(|m| m.hide.contains(name)) {
            continue;
        }
        let label = if hints.is_some_and(|m| m.highlight.contains(name)) {
            style(name).bold().cyan()
        } else {
            style(name)
        };
        println!("{:<16} {:>8}", label, total);
    }

    println!(
        "\nRepos: {} ({} active)",
        style(view.repo_count).cyan(),
        view.active_repos.len()
    );
    println!("Contributors: {}", style(view.contributors.len()).cyan());
    if !view.active_repos.is_empty() {
        println!(
            "Active: {}",
            view.active_repos.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}
