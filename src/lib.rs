pub mod aggregate;
pub mod builder;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod index;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod template;
pub mod view;
pub mod week;

pub use aggregate::aggregate;
pub use builder::build;
pub use diff::compute_diff;
pub use error::{PulseError, Result};
pub use model::{AggregatedView, DiffResult, RepoActivity, Template, WeekSnapshot};
pub use store::SnapshotStore;
