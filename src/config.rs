use crate::error::{PulseError, Result};
use glob::Pattern;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Tracking configuration, read from `config.yaml`.
///
/// `organizations` and `users` are expanded into concrete repositories by
/// the external fetch step; `whitelist` names repositories tracked
/// unconditionally; `blacklist` holds glob patterns for repositories to
/// drop before storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default)]
    pub blacklist: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PulseError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn exclusions(&self) -> Result<Vec<Pattern>> {
        self.blacklist.iter().map(|p| Ok(Pattern::new(p)?)).collect()
    }

    pub fn is_excluded(&self, repo: &str) -> Result<bool> {
        Ok(self.exclusions()?.iter().any(|p| p.matches(repo)))
    }

    /// Resolve the concrete configured repo set: the whitelist plus every
    /// discovered repo owned by a tracked organization or user, minus
    /// blacklist matches. `discovered` is whatever the fetch step saw.
    pub fn resolve_repos<'a>(
        &self,
        discovered: impl IntoIterator<Item = &'a str>,
    ) -> Result<BTreeSet<String>> {
        let owners: BTreeSet<&str> = self
            .organizations
            .iter()
            .chain(self.users.iter())
            .map(String::as_str)
            .collect();

        let mut repos: BTreeSet<String> = self.whitelist.iter().cloned().collect();
        for repo in discovered {
            if let Some((owner, _)) = repo.split_once('/') {
                if owners.contains(owner) {
                    repos.insert(repo.to_string());
                }
            }
        }

        let exclusions = self.exclusions()?;
        repos.retain(|repo| !exclusions.iter().any(|p| p.matches(repo)));
        Ok(repos)
    }
}
