use colored::*;

use crate::ai_provider::AIProviderClient;
use crate::catalog::{job_title, route_titles, Route};
use crate::config::Config;
use crate::progress::UserProgress;
use crate::prompts;
use crate::reflection::{ReflectionAnswers, QUESTIONS};

// One canned message per situation; the journey never shows a raw
// error to the student.
pub const MENTOR_UNAVAILABLE: &str = "The AI mentor is not available (no API key configured).";
pub const MENTOR_EMPTY: &str = "Could not generate a talent profile.";
pub const MENTOR_FAILED: &str = "Something went wrong while fetching your talent profile.";
pub const STUDY_UNAVAILABLE: &str = "The AI study coach is not available (no API key configured).";
pub const STUDY_EMPTY: &str = "Could not generate study advice.";
pub const STUDY_FAILED: &str = "Something went wrong while fetching your study advice.";

/// Wraps the provider client behind the two advice operations. Both
/// always return presentable text: real advice when the call works, a
/// fixed fallback message when it cannot.
pub struct Mentor {
    client: AIProviderClient,
}

impl Mentor {
    pub fn new(client: AIProviderClient) -> Self {
        Mentor { client }
    }

    pub fn from_config(config: &Config) -> Self {
        Mentor::new(AIProviderClient::new(config.ai_config()))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// A personal talent profile based on the reflection answers.
    /// Personality only; study advice is its own operation.
    pub async fn talent_profile(
        &self,
        reflection: &ReflectionAnswers,
        progress: &UserProgress,
        routes: &[Route],
    ) -> String {
        if !self.client.is_configured() {
            return MENTOR_UNAVAILABLE.to_string();
        }
        let context = build_context(reflection, progress, routes);
        let prompt = prompts::build_mentor_prompt(&context);
        match self.client.generate(prompts::MENTOR_SYSTEM, &prompt).await {
            Ok(text) if text.trim().is_empty() => MENTOR_EMPTY.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                eprintln!("{}", format!("Mentor call failed: {}", e).dimmed());
                MENTOR_FAILED.to_string()
            }
        }
    }

    /// Study advice in three fixed sections, building on the same
    /// answers as the talent profile.
    pub async fn study_advice(
        &self,
        reflection: &ReflectionAnswers,
        progress: &UserProgress,
        routes: &[Route],
    ) -> String {
        if !self.client.is_configured() {
            return STUDY_UNAVAILABLE.to_string();
        }
        let context = build_context(reflection, progress, routes);
        let prompt = prompts::build_study_prompt(&context);
        match self.client.generate(prompts::STUDY_SYSTEM, &prompt).await {
            Ok(text) if text.trim().is_empty() => STUDY_EMPTY.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                eprintln!("{}", format!("Study advice call failed: {}", e).dimmed());
                STUDY_FAILED.to_string()
            }
        }
    }
}

/// Serialize the journey into the context block both prompts share:
/// the six numbered answers, favourite routes (scored 3+) and liked
/// jobs, with route and job ids resolved to their titles.
fn build_context(
    reflection: &ReflectionAnswers,
    progress: &UserProgress,
    routes: &[Route],
) -> String {
    let mut context = String::from("What the student filled in:\n");
    for (i, question) in QUESTIONS.iter().enumerate() {
        let answer = reflection.answer_summary(question.field);
        let answer = if answer.is_empty() {
            "No answer yet".to_string()
        } else {
            answer
        };
        context.push_str(&format!("{}. {} {}\n", i + 1, question.text, answer));
    }

    let favourites = route_titles(routes, &progress.favourite_route_ids());
    let favourites = if favourites.is_empty() {
        "No clear preference yet".to_string()
    } else {
        favourites.join(", ")
    };
    context.push_str(&format!("\nFavourite routes in the app: {}\n", favourites));

    let liked: Vec<String> = progress
        .liked_jobs
        .iter()
        .map(|id| job_title(routes, id))
        .collect();
    let liked = if liked.is_empty() {
        "No specific jobs yet".to_string()
    } else {
        liked.join(", ")
    };
    context.push_str(&format!("Jobs the student liked: {}", liked));

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_provider::AIConfig;
    use crate::catalog::catalog;
    use crate::progress::JobRating;
    use crate::reflection::ReflectionField;

    fn unconfigured_mentor() -> Mentor {
        // Default config has no API key, so no request is attempted.
        Mentor::new(AIProviderClient::new(AIConfig::default()))
    }

    #[tokio::test]
    async fn test_unconfigured_mentor_returns_fixed_fallback() {
        let mentor = unconfigured_mentor();
        let reflection = ReflectionAnswers::default();
        let progress = UserProgress::default();
        let routes = catalog();

        let text = mentor.talent_profile(&reflection, &progress, &routes).await;
        assert_eq!(text, MENTOR_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unconfigured_study_advice_returns_fixed_fallback() {
        let mentor = unconfigured_mentor();
        let reflection = ReflectionAnswers::default();
        let progress = UserProgress::default();
        let routes = catalog();

        let text = mentor.study_advice(&reflection, &progress, &routes).await;
        assert_eq!(text, STUDY_UNAVAILABLE);
    }

    #[test]
    fn test_context_numbers_all_six_questions() {
        let reflection = ReflectionAnswers::default();
        let progress = UserProgress::default();
        let context = build_context(&reflection, &progress, &catalog());

        for i in 1..=6 {
            assert!(context.contains(&format!("{}. ", i)));
        }
        assert!(context.contains("No answer yet"));
        assert!(context.contains("No clear preference yet"));
        assert!(context.contains("No specific jobs yet"));
    }

    #[test]
    fn test_context_resolves_titles() {
        let mut reflection = ReflectionAnswers::default();
        reflection.toggle_option(ReflectionField::Likes, "Working with my hands");

        let mut progress = UserProgress::default();
        progress.set_route_score("tech", 4).unwrap();
        progress.set_route_score("care", 2).unwrap();
        progress.rate_job("mechanic", JobRating::Fun);

        let context = build_context(&reflection, &progress, &catalog());
        assert!(context.contains("Working with my hands"));
        // Routes and jobs appear under their display titles.
        assert!(context.contains("Technology & Making Things"));
        assert!(context.contains("Car Mechanic"));
        // A score of 2 is not a favourite.
        assert!(!context.contains("Care & Helping People"));
    }
}
