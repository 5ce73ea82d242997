//! Per-invocation context: the opened store, loaded state and config.

use anyhow::{Context as _, Result};
use homebuy_core::session;
use homebuy_core::AppState;
use homebuy_store::Store;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, DB_FILE};

pub struct AppContext {
    pub data_dir: PathBuf,
    pub store: Store,
    pub state: AppState,
    pub config: Config,
    /// State as loaded; `save` writes only what differs from it.
    loaded: AppState,
}

impl AppContext {
    /// Open the store in `data_dir` and load the saved state.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let db_path = data_dir.join(DB_FILE);
        let store = Store::open(&db_path)
            .with_context(|| format!("Failed to open {}", db_path.display()))?;
        let config = Config::load(data_dir)?;
        let state = session::load_state(&store)?;
        debug!(data_dir = %data_dir.display(), "Opened data directory");

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            store,
            loaded: state.clone(),
            state,
            config,
        })
    }

    /// Persist the collections changed since the state was loaded.
    pub fn save(&mut self) -> Result<()> {
        session::save_changes(&self.store, &self.loaded, &self.state)?;
        self.loaded = self.state.clone();
        Ok(())
    }

    /// Today's local date, used as the deadline anchor.
    pub fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Resolve a full id or a unique prefix of one.
pub fn resolve_id<'a, I>(ids: I, input: &str, what: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(input)).collect();
    if candidates.iter().any(|c| *c == input) {
        return Ok(input.to_string());
    }
    match candidates.as_slice() {
        [] => anyhow::bail!("{} not found: {}", what, input),
        [only] => Ok(only.to_string()),
        _ => anyhow::bail!("Ambiguous {} id prefix: {}", what.to_lowercase(), input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id() {
        let ids = ["abc123", "abd456", "xyz"];
        assert_eq!(resolve_id(ids, "abc", "Snippet").unwrap(), "abc123");
        assert_eq!(resolve_id(ids, "xyz", "Snippet").unwrap(), "xyz");
        assert!(resolve_id(ids, "ab", "Snippet").is_err());
        assert!(resolve_id(ids, "q", "Snippet").is_err());
    }
}
