use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the student feels about one example job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobRating {
    Fun,
    NotFun,
    Unknown,
}

impl fmt::Display for JobRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobRating::Fun => "fun",
            JobRating::NotFun => "not fun",
            JobRating::Unknown => "don't know yet",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for JobRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fun" | "f" => Ok(JobRating::Fun),
            "not_fun" | "not-fun" | "n" => Ok(JobRating::NotFun),
            "unknown" | "u" => Ok(JobRating::Unknown),
            _ => Err(format!("Unknown rating: {} (use fun, not_fun or unknown)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Planned,
    Completed,
}

/// A small real-world try-out the student plans to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    pub title: String,
    pub status: ExperimentStatus,
}

impl Experiment {
    pub fn new(title: &str) -> Self {
        Experiment {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            status: ExperimentStatus::Planned,
        }
    }
}

/// Suggested try-outs shown on the experiments screen.
pub const EXPERIMENT_TASKS: [&str; 4] = [
    "Interview someone who has a job you find interesting",
    "Make a poster about your favourite route",
    "Watch a video about a job you want to know more about",
    "Help out somewhere for an afternoon",
];

/// Everything the student has done in the app: job ratings, route
/// scores and planned experiments. The liked/disliked lists are kept
/// in sync with the ratings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub job_ratings: HashMap<String, JobRating>,
    #[serde(default)]
    pub route_scores: HashMap<String, u8>,
    #[serde(default)]
    pub liked_jobs: Vec<String>,
    #[serde(default)]
    pub disliked_jobs: Vec<String>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl UserProgress {
    /// Record a rating for a job. Re-rating replaces the previous
    /// rating, so a job is never in both lists at once.
    pub fn rate_job(&mut self, job_id: &str, rating: JobRating) {
        self.job_ratings.insert(job_id.to_string(), rating);
        self.liked_jobs.retain(|id| id != job_id);
        self.disliked_jobs.retain(|id| id != job_id);
        match rating {
            JobRating::Fun => self.liked_jobs.push(job_id.to_string()),
            JobRating::NotFun => self.disliked_jobs.push(job_id.to_string()),
            JobRating::Unknown => {}
        }
    }

    pub fn job_rating(&self, job_id: &str) -> Option<JobRating> {
        self.job_ratings.get(job_id).copied()
    }

    /// Score a route from 1 (not for me) to 4 (love it).
    pub fn set_route_score(&mut self, route_id: &str, score: u8) -> Result<()> {
        if !(1..=4).contains(&score) {
            anyhow::bail!("Score must be between 1 and 4, got {}", score);
        }
        self.route_scores.insert(route_id.to_string(), score);
        Ok(())
    }

    pub fn route_score(&self, route_id: &str) -> Option<u8> {
        self.route_scores.get(route_id).copied()
    }

    /// Routes the student scored 3 or higher, in no particular order.
    pub fn favourite_route_ids(&self) -> Vec<&str> {
        self.route_scores
            .iter()
            .filter(|(_, score)| **score >= 3)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Plan an experiment, or take the entry with that title out
    /// again, completed or not. Returns true when the experiment is
    /// now planned.
    pub fn toggle_experiment(&mut self, title: &str) -> bool {
        if self.experiments.iter().any(|e| e.title == title) {
            self.experiments.retain(|e| e.title != title);
            false
        } else {
            self.experiments.push(Experiment::new(title));
            true
        }
    }

    pub fn complete_experiment(&mut self, title: &str) -> Result<()> {
        let experiment = self
            .experiments
            .iter_mut()
            .find(|e| e.title == title)
            .ok_or_else(|| anyhow::anyhow!("Experiment is not planned: {}", title))?;
        experiment.status = ExperimentStatus::Completed;
        Ok(())
    }

    pub fn experiment_for(&self, title: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.title == title)
    }

    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            rated_jobs: self.job_ratings.len(),
            liked_jobs: self.liked_jobs.len(),
            scored_routes: self.route_scores.len(),
            planned_experiments: self
                .experiments
                .iter()
                .filter(|e| e.status == ExperimentStatus::Planned)
                .count(),
            completed_experiments: self
                .experiments
                .iter()
                .filter(|e| e.status == ExperimentStatus::Completed)
                .count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressStats {
    pub rated_jobs: usize,
    pub liked_jobs: usize,
    pub scored_routes: usize,
    pub planned_experiments: usize,
    pub completed_experiments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_job_fun_lands_in_liked() {
        let mut progress = UserProgress::default();
        progress.rate_job("nurse", JobRating::Fun);
        assert_eq!(progress.job_rating("nurse"), Some(JobRating::Fun));
        assert_eq!(progress.liked_jobs, vec!["nurse".to_string()]);
        assert!(progress.disliked_jobs.is_empty());
    }

    #[test]
    fn test_rerating_moves_between_lists() {
        let mut progress = UserProgress::default();
        progress.rate_job("nurse", JobRating::Fun);
        progress.rate_job("nurse", JobRating::NotFun);
        assert!(progress.liked_jobs.is_empty());
        assert_eq!(progress.disliked_jobs, vec!["nurse".to_string()]);

        progress.rate_job("nurse", JobRating::Unknown);
        assert!(progress.liked_jobs.is_empty());
        assert!(progress.disliked_jobs.is_empty());
        assert_eq!(progress.job_rating("nurse"), Some(JobRating::Unknown));
    }

    #[test]
    fn test_job_never_in_both_lists() {
        let mut progress = UserProgress::default();
        for rating in [JobRating::Fun, JobRating::NotFun, JobRating::Fun] {
            progress.rate_job("vet", rating);
            let in_liked = progress.liked_jobs.iter().filter(|id| *id == "vet").count();
            let in_disliked = progress.disliked_jobs.iter().filter(|id| *id == "vet").count();
            assert!(in_liked + in_disliked <= 1);
        }
    }

    #[test]
    fn test_route_score_bounds() {
        let mut progress = UserProgress::default();
        assert!(progress.set_route_score("tech", 0).is_err());
        assert!(progress.set_route_score("tech", 5).is_err());
        for score in 1..=4 {
            assert!(progress.set_route_score("tech", score).is_ok());
        }
        assert_eq!(progress.route_score("tech"), Some(4));
    }

    #[test]
    fn test_favourite_routes_need_score_three_or_more() {
        let mut progress = UserProgress::default();
        progress.set_route_score("care", 4).unwrap();
        progress.set_route_score("tech", 3).unwrap();
        progress.set_route_score("art", 2).unwrap();

        let mut favourites = progress.favourite_route_ids();
        favourites.sort();
        assert_eq!(favourites, vec!["care", "tech"]);
    }

    #[test]
    fn test_toggle_experiment() {
        let mut progress = UserProgress::default();
        let title = EXPERIMENT_TASKS[0];

        assert!(progress.toggle_experiment(title));
        assert_eq!(progress.experiments.len(), 1);
        assert_eq!(progress.experiments[0].status, ExperimentStatus::Planned);

        assert!(!progress.toggle_experiment(title));
        assert!(progress.experiments.is_empty());
    }

    #[test]
    fn test_complete_experiment() {
        let mut progress = UserProgress::default();
        let title = EXPERIMENT_TASKS[1];

        assert!(progress.complete_experiment(title).is_err());

        progress.toggle_experiment(title);
        progress.complete_experiment(title).unwrap();
        assert_eq!(
            progress.experiment_for(title).unwrap().status,
            ExperimentStatus::Completed
        );
    }

    #[test]
    fn test_toggle_removes_completed_experiment() {
        let mut progress = UserProgress::default();
        let title = EXPERIMENT_TASKS[2];
        progress.toggle_experiment(title);
        progress.complete_experiment(title).unwrap();

        // Toggling matches on the title alone, so it also clears a
        // completed entry.
        assert!(!progress.toggle_experiment(title));
        assert!(progress.experiments.is_empty());
        assert!(progress.experiment_for(title).is_none());

        assert!(progress.toggle_experiment(title));
        assert_eq!(
            progress.experiment_for(title).unwrap().status,
            ExperimentStatus::Planned
        );
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("fun".parse::<JobRating>().unwrap(), JobRating::Fun);
        assert_eq!("not_fun".parse::<JobRating>().unwrap(), JobRating::NotFun);
        assert_eq!("not-fun".parse::<JobRating>().unwrap(), JobRating::NotFun);
        assert_eq!("U".parse::<JobRating>().unwrap(), JobRating::Unknown);
        assert!("meh".parse::<JobRating>().is_err());
    }

    #[test]
    fn test_stats() {
        let mut progress = UserProgress::default();
        progress.rate_job("nurse", JobRating::Fun);
        progress.rate_job("farmer", JobRating::NotFun);
        progress.set_route_score("care", 4).unwrap();
        progress.toggle_experiment(EXPERIMENT_TASKS[0]);
        progress.toggle_experiment(EXPERIMENT_TASKS[1]);
        progress.complete_experiment(EXPERIMENT_TASKS[1]).unwrap();

        let stats = progress.stats();
        assert_eq!(stats.rated_jobs, 2);
        assert_eq!(stats.liked_jobs, 1);
        assert_eq!(stats.scored_routes, 1);
        assert_eq!(stats.planned_experiments, 1);
        assert_eq!(stats.completed_experiments, 1);
    }
}
