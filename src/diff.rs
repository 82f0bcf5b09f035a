use crate::aggregate::aggregate;
use crate::cli::CommonArgs;
use crate::error::{PulseError, Result};
use crate::model::{
    AggregatedView, ContributorDeltas, DiffResult, Metric, RepoDeltas,
};
use crate::store::SnapshotStore;
use crate::template;
use crate::week::{parse_week_date, week_start};
use anyhow::Context;
use console::style;

/// Signed comparison of two aggregated views built from the same template.
pub fn compute_diff(from: &AggregatedView, to: &AggregatedView) -> Result<DiffResult> {
    if from.template != to.template {
        let name = |t: &Option<String>| t.clone().unwrap_or_else(|| "(all repos)".to_string());
        return Err(PulseError::TemplateMismatch {
            left: name(&from.template),
            right: name(&to.template),
        });
    }

    let metric_deltas = Metric::ALL
        .iter()
        .map(|metric| {
            let from_value = from.totals.get(metric).copied().unwrap_or(0) as i64;
            let to_value = to.totals.get(metric).copied().unwrap_or(0) as i64;
            (*metric, to_value - from_value)
        })
        .collect();

    let contributors = ContributorDeltas {
        new: to.contributors.difference(&from.contributors).cloned().collect(),
        departed: from.contributors.difference(&to.contributors).cloned().collect(),
    };

    // Compare the selected repo id sets, not totals: a repo added to the
    // configuration must surface even if the totals happen to match.
    let repos = RepoDeltas {
        added: to.repos.difference(&from.repos).cloned().collect(),
        removed: from.repos.difference(&to.repos).cloned().collect(),
    };

    Ok(DiffResult {
        from_week: from.week_date,
        to_week: to.week_date,
        template: to.template.clone(),
        metric_deltas,
        contributors,
        repos,
    })
}

pub fn exec(
    common: CommonArgs,
    from: String,
    to: String,
    template_id: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&common.data).context("Failed to open snapshot store")?;
    let templates =
        template::load_templates(&common.templates).context("Failed to load templates")?;
    let selected = template_id
        .as_deref()
        .map(|id| template::find(&templates, id))
        .transpose()?;

    let from_date = week_start(parse_week_date(&from)?);
    let to_date = week_start(parse_week_date(&to)?);

    let from_view = aggregate(&store.get(from_date)?, selected);
    let to_view = aggregate(&store.get(to_date)?, selected);
    let diff = compute_diff(&from_view, &to_view)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        output_table(&diff)?;
    }
    Ok(())
}

fn styled_delta(delta: i64) -> console::StyledObject<String> {
    let text = format!("{delta:+}");
    match delta.signum() {
        1 => style(text).green(),
        -1 => style(text).red(),
        _ => style("0".to_string()).dim(),
    }
}

fn output_table(diff: &DiffResult) -> anyhow::Result<()> {
    let scope = diff.template.as_deref().unwrap_or("all repos");
    println!(
        "{} {} → {} ({})",
        style("Week diff").bold(),
        diff.from_week,
        diff.to_week,
        scope
    );
    println!("{}", "─".repeat(50));

    for (metric, delta) in &diff.metric_deltas {
        println!("{:<16} {:>8}", metric.as_str(), styled_delta(*delta));
    }

    if !diff.contributors.new.is_empty() {
        println!(
            "\n{} {}",
            style("New contributors:").bold(),
            diff.contributors.new.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if !diff.contributors.departed.is_empty() {
        println!(
            "{} {}",
            style("Departed contributors:").bold(),
            diff.contributors.departed.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if !diff.repos.added.is_empty() {
        println!(
            "{} {}",
            style("Repos added:").bold(),
            diff.repos.added.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if !diff.repos.removed.is_empty() {
        println!(
            "{} {}",
            style("Repos removed:").bold(),
            diff.repos.removed.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if diff.is_empty() {
        println!("\nNo changes between the two weeks.");
    }
    Ok(())
}
