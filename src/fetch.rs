use crate::error::Result;
use crate::model::RepoActivity;
use crate::week::WeekWindow;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Per-repo fetch failure. Absorbed by `collect_activity`, never
/// propagated past it; the repo degrades to zero activity downstream.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no raw data for {0}")]
    Missing(String),
    #[error("upstream error for {repo}: {message}")]
    Upstream { repo: String, message: String },
}

/// One repository's raw activity as the external fetch step reports it.
/// Field names follow the raw artifact; anything the fetch step skipped
/// (disabled metric sections, failed sub-requests) defaults to zero here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepoActivity {
    pub name: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub commits_this_week: u64,
    #[serde(default)]
    pub commit_authors: Vec<String>,
    #[serde(default)]
    pub prs_opened_this_week: u64,
    #[serde(default)]
    pub prs_merged_this_week: u64,
    #[serde(default)]
    pub issues_opened_this_week: u64,
    #[serde(default)]
    pub issues_closed_this_week: u64,
}

impl RawRepoActivity {
    pub fn into_activity(self) -> RepoActivity {
        RepoActivity {
            repo: self.name,
            commits: self.commits_this_week,
            prs_opened: self.prs_opened_this_week,
            prs_merged: self.prs_merged_this_week,
            issues_opened: self.issues_opened_this_week,
            issues_closed: self.issues_closed_this_week,
            contributors: self.commit_authors.into_iter().collect(),
            stars: self.stars,
            forks: self.forks,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFetchResults {
    pub fetched_at: DateTime<Utc>,
    pub repositories: Vec<RawRepoActivity>,
}

pub trait Fetcher {
    fn fetch(
        &self,
        repo: &str,
        window: &WeekWindow,
    ) -> std::result::Result<RawRepoActivity, FetchError>;
}

/// Fetcher over an already-materialized raw results file, the artifact the
/// external fetch step writes (`data_raw/raw.json`). The window is already
/// baked into the data, so lookups are by repo name only.
pub struct RawResultsFile {
    fetched_at: DateTime<Utc>,
    by_repo: BTreeMap<String, RawRepoActivity>,
}

impl RawResultsFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_results(serde_json::from_str(&raw)?))
    }

    pub fn from_results(results: RawFetchResults) -> Self {
        let by_repo = results
            .repositories
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();
        Self {
            fetched_at: results.fetched_at,
            by_repo,
        }
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Repo names present in the raw artifact, for configured-set resolution.
    pub fn discovered(&self) -> impl Iterator<Item = &str> {
        self.by_repo.keys().map(String::as_str)
    }
}

impl Fetcher for RawResultsFile {
    fn fetch(
        &self,
        repo: &str,
        _window: &WeekWindow,
    ) -> std::result::Result<RawRepoActivity, FetchError> {
        self.by_repo
            .get(repo)
            .cloned()
            .ok_or_else(|| FetchError::Missing(repo.to_string()))
    }
}

/// Fetch raw activity for every configured repo. Per-repo failures are
/// logged and absorbed so one bad repo never aborts the run; the builder
/// zero-fills whatever is missing from the returned map.
pub fn collect_activity<'a>(
    fetcher: &dyn Fetcher,
    repos: impl IntoIterator<Item = &'a str>,
    window: &WeekWindow,
    show_progress: bool,
) -> BTreeMap<String, RawRepoActivity> {
    let repos: Vec<&str> = repos.into_iter().collect();
    let bar = if show_progress {
        let bar = ProgressBar::new(repos.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Some(bar)
    } else {
        None
    };

    let mut collected = BTreeMap::new();
    for repo in repos {
        if let Some(bar) = &bar {
            bar.set_message(repo.to_string());
        }
        match fetcher.fetch(repo, window) {
            Ok(raw) => {
                collected.insert(repo.to_string(), raw);
            }
            Err(err) => {
                log::warn!("fetch failed, degrading {repo} to zero activity: {err}");
            }
        }
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    collected
}
