use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use crate::progress::{JobRating, UserProgress};
use crate::reflection::{ReflectionAnswers, ReflectionField};

/// The single document that gets persisted: reflection answers plus
/// progress, always written as a whole.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct JourneyState {
    #[serde(default)]
    pub reflection: ReflectionAnswers,
    #[serde(default)]
    pub progress: UserProgress,
}

/// Owns the journey state and its file on disk. Every mutation saves
/// immediately; storage problems are reported but never interrupt the
/// session.
pub struct JourneyStore {
    path: PathBuf,
    pub state: JourneyState,
}

impl JourneyStore {
    pub fn open(config: &Config) -> Self {
        let path = config.journey_file();
        let state = match Self::load(&path) {
            Ok(Some(state)) => state,
            Ok(None) => JourneyState::default(),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Could not read saved journey, starting fresh: {}", e).dimmed()
                );
                JourneyState::default()
            }
        };
        JourneyStore { path, state }
    }

    fn load(path: &PathBuf) -> Result<Option<JourneyState>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journey file: {}", path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse journey file: {}", path.display()))?;
        Ok(Some(state))
    }

    /// Write the whole document. Failures are logged and swallowed so
    /// the in-memory session keeps working.
    pub fn save(&self) {
        if let Err(e) = self.persist() {
            eprintln!("{}", format!("Could not save journey: {}", e).dimmed());
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.state)
            .context("Failed to serialize journey state")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write journey file: {}", self.path.display()))?;
        Ok(())
    }

    /// Wipe everything: in-memory state back to defaults and the file
    /// removed from disk.
    pub fn reset(&mut self) {
        self.state = JourneyState::default();
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                eprintln!("{}", format!("Could not remove journey file: {}", e).dimmed());
            }
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    // Mutation wrappers; each one persists the whole document.

    pub fn toggle_option(&mut self, field: ReflectionField, option: &str) {
        self.state.reflection.toggle_option(field, option);
        self.save();
    }

    pub fn set_custom_answer(&mut self, field: ReflectionField, text: &str) {
        self.state.reflection.set_custom_answer(field, text);
        self.save();
    }

    pub fn rate_job(&mut self, job_id: &str, rating: JobRating) {
        self.state.progress.rate_job(job_id, rating);
        self.save();
    }

    pub fn set_route_score(&mut self, route_id: &str, score: u8) -> Result<()> {
        self.state.progress.set_route_score(route_id, score)?;
        self.save();
        Ok(())
    }

    pub fn toggle_experiment(&mut self, title: &str) -> bool {
        let planned = self.state.progress.toggle_experiment(title);
        self.save();
        planned
    }

    pub fn complete_experiment(&mut self, title: &str) -> Result<()> {
        self.state.progress.complete_experiment(title)?;
        self.save();
        Ok(())
    }
}
