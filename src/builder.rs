use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::fetch::RawRepoActivity;
use crate::model::{RepoActivity, WeekSnapshot, SCHEMA_VERSION};
use crate::week::{is_week_start, week_start};
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Normalize raw fetch output into the canonical snapshot for one week.
///
/// Every configured, non-excluded repo appears in the result: repos the
/// fetch step missed are zero-filled, never omitted. Excluded repos are
/// dropped outright, even when raw data for them exists.
pub fn build(
    week_date: NaiveDate,
    mut raw: BTreeMap<String, RawRepoActivity>,
    configured: &BTreeSet<String>,
    config: &Config,
) -> Result<WeekSnapshot> {
    if !is_week_start(week_date) {
        return Err(PulseError::InvalidDate(format!(
            "{week_date} is not a week start (expected the Monday {})",
            week_start(week_date)
        )));
    }

    let exclusions = config.exclusions()?;
    let mut repos = BTreeMap::new();
    for repo in configured {
        if exclusions.iter().any(|p| p.matches(repo)) {
            log::debug!("dropping excluded repo {repo}");
            continue;
        }
        let activity = match raw.remove(repo) {
            Some(entry) => {
                let mut activity = entry.into_activity();
                // The configured identifier is authoritative for keying.
                activity.repo = repo.clone();
                activity
            }
            None => RepoActivity::zeroed(repo.clone()),
        };
        repos.insert(repo.clone(), activity);
    }

    Ok(WeekSnapshot {
        version: SCHEMA_VERSION,
        week_date,
        generated_at: Utc::now(),
        repos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
    }

    fn raw_entry(name: &str, commits: u64) -> RawRepoActivity {
        RawRepoActivity {
            name: name.to_string(),
            commits_this_week: commits,
            commit_authors: vec!["alice".to_string()],
            ..RawRepoActivity::default()
        }
    }

    fn configured(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_repos_are_zero_filled() {
        let mut raw = BTreeMap::new();
        raw.insert("acme/api".to_string(), raw_entry("acme/api", 10));

        let snapshot = build(
            monday(),
            raw,
            &configured(&["acme/api", "acme/web"]),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(snapshot.repos.len(), 2);
        assert_eq!(snapshot.repos["acme/api"].commits, 10);
        let web = &snapshot.repos["acme/web"];
        assert_eq!(web.commits, 0);
        assert!(web.contributors.is_empty());
    }

    #[test]
    fn excluded_repos_are_dropped_not_zeroed() {
        let config = Config {
            blacklist: vec!["acme/tmp-*".to_string()],
            ..Config::default()
        };
        let mut raw = BTreeMap::new();
        raw.insert("acme/tmp-spike".to_string(), raw_entry("acme/tmp-spike", 7));

        let snapshot = build(
            monday(),
            raw,
            &configured(&["acme/api", "acme/tmp-spike"]),
            &config,
        )
        .unwrap();

        assert!(!snapshot.repos.contains_key("acme/tmp-spike"));
        assert!(snapshot.repos.contains_key("acme/api"));
    }

    #[test]
    fn unconfigured_raw_entries_are_ignored() {
        let mut raw = BTreeMap::new();
        raw.insert("stranger/repo".to_string(), raw_entry("stranger/repo", 3));

        let snapshot = build(monday(), raw, &configured(&["acme/api"]), &Config::default())
            .unwrap();

        assert_eq!(snapshot.repos.len(), 1);
        assert!(!snapshot.repos.contains_key("stranger/repo"));
    }

    #[test]
    fn non_monday_is_a_build_error() {
        let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        let result = build(
            tuesday,
            BTreeMap::new(),
            &configured(&["acme/api"]),
            &Config::default(),
        );
        assert!(matches!(result, Err(PulseError::InvalidDate(_))));
    }
}
