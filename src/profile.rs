//! Per-user display counters.
//!
//! The "my questions" count shown in the profile screen is a client-side
//! convenience: incremented when a post is created, decremented when one is
//! deleted, floored at zero. The server is never asked for an authoritative
//! count, so the value may drift - callers must treat it as advisory.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Profile file name in the data directory
const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileData {
    /// "my questions" count keyed by email
    #[serde(default)]
    question_counts: HashMap<String, u32>,
}

/// File-backed store for the per-email question counters
pub struct ProfileStore {
    data_dir: PathBuf,
}

impl ProfileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Current question count for an email (zero when never recorded)
    pub fn questions(&self, email: &str) -> u32 {
        self.load()
            .question_counts
            .get(email)
            .copied()
            .unwrap_or(0)
    }

    pub fn increment_questions(&self, email: &str) -> Result<u32> {
        let mut data = self.load();
        let count = data.question_counts.entry(email.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        self.save(&data)?;
        Ok(count)
    }

    /// Decrement the count, flooring at zero
    pub fn decrement_questions(&self, email: &str) -> Result<u32> {
        let mut data = self.load();
        let count = data.question_counts.entry(email.to_string()).or_insert(0);
        *count = count.saturating_sub(1);
        let count = *count;
        self.save(&data)?;
        Ok(count)
    }

    fn load(&self) -> ProfileData {
        let path = self.profile_path();
        if !path.exists() {
            return ProfileData::default();
        }
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    fn save(&self, data: &ProfileData) -> Result<()> {
        let path = self.profile_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create profile directory")?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, contents).context("Failed to write profile file")?;
        Ok(())
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_start_at_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProfileStore::new(dir.path().to_path_buf());
        assert_eq!(store.questions("a@example.com"), 0);
    }

    #[test]
    fn test_increment_and_decrement_per_email() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProfileStore::new(dir.path().to_path_buf());

        store.increment_questions("a@example.com").expect("inc");
        store.increment_questions("a@example.com").expect("inc");
        store.increment_questions("b@example.com").expect("inc");

        assert_eq!(store.questions("a@example.com"), 2);
        assert_eq!(store.questions("b@example.com"), 1);

        assert_eq!(store.decrement_questions("a@example.com").expect("dec"), 1);
        assert_eq!(store.questions("b@example.com"), 1);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProfileStore::new(dir.path().to_path_buf());

        assert_eq!(store.decrement_questions("a@example.com").expect("dec"), 0);
        assert_eq!(store.questions("a@example.com"), 0);
    }

    #[test]
    fn test_counts_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = ProfileStore::new(dir.path().to_path_buf());
            store.increment_questions("a@example.com").expect("inc");
        }
        let store = ProfileStore::new(dir.path().to_path_buf());
        assert_eq!(store.questions("a@example.com"), 1);
    }
}
