use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Commits,
    PrsOpened,
    PrsMerged,
    IssuesOpened,
    IssuesClosed,
    Stars,
    Forks,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Commits,
        Metric::PrsOpened,
        Metric::PrsMerged,
        Metric::IssuesOpened,
        Metric::IssuesClosed,
        Metric::Stars,
        Metric::Forks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Commits => "commits",
            Metric::PrsOpened => "prs_opened",
            Metric::PrsMerged => "prs_merged",
            Metric::IssuesOpened => "issues_opened",
            Metric::IssuesClosed => "issues_closed",
            Metric::Stars => "stars",
            Metric::Forks => "forks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoActivity {
    pub repo: String,
    pub commits: u64,
    pub prs_opened: u64,
    pub prs_merged: u64,
    pub issues_opened: u64,
    pub issues_closed: u64,
    pub contributors: BTreeSet<String>,
    // Cumulative point-in-time counts, unlike the window-scoped fields above.
    pub stars: u64,
    pub forks: u64,
}

impl RepoActivity {
    pub fn zeroed(repo: String) -> Self {
        Self {
            repo,
            commits: 0,
            prs_opened: 0,
            prs_merged: 0,
            issues_opened: 0,
            issues_closed: 0,
            contributors: BTreeSet::new(),
            stars: 0,
            forks: 0,
        }
    }

    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Commits => self.commits,
            Metric::PrsOpened => self.prs_opened,
            Metric::PrsMerged => self.prs_merged,
            Metric::IssuesOpened => self.issues_opened,
            Metric::IssuesClosed => self.issues_closed,
            Metric::Stars => self.stars,
            Metric::Forks => self.forks,
        }
    }

    pub fn has_weekly_activity(&self) -> bool {
        self.commits > 0 || self.prs_opened > 0 || self.issues_opened > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSnapshot {
    pub version: u32,
    pub week_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub repos: BTreeMap<String, RepoActivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetrics {
    #[serde(default)]
    pub highlight: BTreeSet<String>,
    #[serde(default)]
    pub hide: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub repos: BTreeSet<String>,
    // Presentation hints passed through to the site; never consulted by
    // aggregation or diff math.
    #[serde(default)]
    pub metrics: TemplateMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedView {
    pub week_date: NaiveDate,
    pub template: Option<String>,
    pub totals: BTreeMap<Metric, u64>,
    pub contributors: BTreeSet<String>,
    pub repos: BTreeSet<String>,
    pub active_repos: BTreeSet<String>,
    pub repo_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorDeltas {
    pub new: BTreeSet<String>,
    pub departed: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDeltas {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub from_week: NaiveDate,
    pub to_week: NaiveDate,
    pub template: Option<String>,
    pub metric_deltas: BTreeMap<Metric, i64>,
    pub contributors: ContributorDeltas,
    pub repos: RepoDeltas,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.metric_deltas.values().all(|d| *d == 0)
            && self.contributors.new.is_empty()
            && self.contributors.departed.is_empty()
            && self.repos.added.is_empty()
            && self.repos.removed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexArtifact {
    pub dates: Vec<NaiveDate>,
    pub latest: Option<NaiveDate>,
    pub count: usize,
    pub templates: Vec<String>,
}
