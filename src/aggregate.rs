use crate::model::{AggregatedView, Metric, Template, WeekSnapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Roll one stored week up into totals for the whole collection or for a
/// template's repo selection. Pure function of its inputs: same snapshot
/// and template always produce an identical view, which is what the diff
/// engine relies on.
pub fn aggregate(snapshot: &WeekSnapshot, template: Option<&Template>) -> AggregatedView {
    let selection: Vec<_> = snapshot
        .repos
        .values()
        .filter(|activity| match template {
            Some(t) => t.repos.contains(&activity.repo),
            None => true,
        })
        .collect();

    let mut totals = BTreeMap::new();
    for metric in Metric::ALL {
        totals.insert(
            metric,
            selection.iter().map(|a| a.metric(metric)).sum::<u64>(),
        );
    }

    let contributors: BTreeSet<String> = selection
        .iter()
        .flat_map(|a| a.contributors.iter().cloned())
        .collect();

    let repos: BTreeSet<String> = selection.iter().map(|a| a.repo.clone()).collect();
    let active_repos: BTreeSet<String> = selection
        .iter()
        .filter(|a| a.has_weekly_activity())
        .map(|a| a.repo.clone())
        .collect();

    AggregatedView {
        week_date: snapshot.week_date,
        template: template.map(|t| t.id.clone()),
        repo_count: repos.len(),
        totals,
        contributors,
        repos,
        active_repos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RepoActivity, SCHEMA_VERSION};
    use chrono::{NaiveDate, Utc};

    fn activity(repo: &str, commits: u64, contributors: &[&str]) -> RepoActivity {
        let mut activity = RepoActivity::zeroed(repo.to_string());
        activity.commits = commits;
        activity.prs_merged = commits / 2;
        activity.stars = 100;
        activity.contributors = contributors.iter().map(|c| c.to_string()).collect();
        activity
    }

    fn snapshot(entries: Vec<RepoActivity>) -> WeekSnapshot {
        WeekSnapshot {
            version: SCHEMA_VERSION,
            week_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            generated_at: Utc::now(),
            repos: entries.into_iter().map(|a| (a.repo.clone(), a)).collect(),
        }
    }

    fn team(id: &str, repos: &[&str]) -> Template {
        Template {
            id: id.to_string(),
            repos: repos.iter().map(|r| r.to_string()).collect(),
            metrics: Default::default(),
        }
    }

    #[test]
    fn totals_sum_over_the_whole_snapshot_without_a_template() {
        let view = aggregate(
            &snapshot(vec![
                activity("acme/api", 10, &["alice"]),
                activity("acme/web", 4, &["bob"]),
            ]),
            None,
        );
        assert_eq!(view.totals[&Metric::Commits], 14);
        assert_eq!(view.totals[&Metric::Stars], 200);
        assert_eq!(view.repo_count, 2);
        assert_eq!(view.template, None);
    }

    #[test]
    fn template_selection_is_the_intersection() {
        let snap = snapshot(vec![
            activity("acme/api", 10, &["alice"]),
            activity("acme/web", 4, &["bob"]),
        ]);
        // acme/ops is named by the template but absent from the week.
        let template = team("platform", &["acme/api", "acme/ops"]);
        let view = aggregate(&snap, Some(&template));

        assert_eq!(view.totals[&Metric::Commits], 10);
        assert_eq!(view.repo_count, 1);
        assert_eq!(view.template.as_deref(), Some("platform"));
        assert!(view.repos.contains("acme/api"));
        assert!(!view.repos.contains("acme/ops"));
    }

    #[test]
    fn contributors_are_deduplicated_across_repos() {
        let view = aggregate(
            &snapshot(vec![
                activity("acme/api", 1, &["alice", "bob"]),
                activity("acme/web", 1, &["bob", "carol"]),
            ]),
            None,
        );
        assert_eq!(view.contributors.len(), 3);
    }

    #[test]
    fn contributor_logins_are_case_sensitive() {
        let view = aggregate(
            &snapshot(vec![
                activity("acme/api", 1, &["Alice"]),
                activity("acme/web", 1, &["alice"]),
            ]),
            None,
        );
        assert_eq!(view.contributors.len(), 2);
    }

    #[test]
    fn active_repos_require_weekly_activity() {
        let mut idle = activity("acme/idle", 0, &[]);
        idle.stars = 5000; // cumulative state is not weekly activity
        let view = aggregate(
            &snapshot(vec![activity("acme/api", 3, &["alice"]), idle]),
            None,
        );
        assert_eq!(view.repo_count, 2);
        assert!(view.active_repos.contains("acme/api"));
        assert!(!view.active_repos.contains("acme/idle"));
    }

    #[test]
    fn aggregation_is_deterministic() {
        let snap = snapshot(vec![
            activity("acme/api", 10, &["alice"]),
            activity("acme/web", 4, &["bob"]),
        ]);
        let template = team("platform", &["acme/api", "acme/web"]);
        assert_eq!(
            aggregate(&snap, Some(&template)),
            aggregate(&snap, Some(&template))
        );
    }
}
