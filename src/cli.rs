use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orgpulse")]
#[command(about = "Weekly GitHub activity snapshots, team rollups, and week-over-week diffs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "docs/data", help = "Snapshot data directory")]
    pub data: PathBuf,

    #[arg(long, default_value = "config.yaml", help = "Tracking configuration file")]
    pub config: PathBuf,

    #[arg(long, default_value = "templates", help = "Team template directory")]
    pub templates: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and store this week's snapshot from raw fetch results
    Snapshot {
        #[arg(long, help = "Week start date (Monday, YYYY-MM-DD); defaults to the current week")]
        week: Option<String>,

        #[arg(long, default_value = "data_raw/raw.json", help = "Raw fetch results file")]
        raw: PathBuf,
    },
    /// Render the aggregated view for one stored week
    View {
        #[arg(long, default_value = "latest", help = "Week date (YYYY-MM-DD) or 'latest'")]
        week: String,

        #[arg(long, help = "Team template id")]
        template: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output per-repo activity as NDJSON")]
        ndjson: bool,
    },
    /// Diff two stored weeks
    Diff {
        #[arg(long, help = "Earlier week date (YYYY-MM-DD)")]
        from: String,

        #[arg(long, help = "Later week date (YYYY-MM-DD)")]
        to: String,

        #[arg(long, help = "Team template id")]
        template: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Regenerate the index of available weeks and templates
    Index,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Snapshot { week, raw } => {
                crate::snapshot::exec(self.common, week, raw)
            }
            Commands::View { week, template, json, ndjson } => {
                crate::view::exec(self.common, week, template, json, ndjson)
            }
            Commands::Diff { from, to, template, json } => {
                crate::diff::exec(self.common, from, to, template, json)
            }
            Commands::Index => crate::index::exec(self.common),
        }
    }
}
