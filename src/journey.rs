use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Local;
use colored::*;

use crate::catalog::{catalog, route_by_id, Job, Route};
use crate::config::Config;
use crate::mentor::Mentor;
use crate::progress::{ExperimentStatus, JobRating, EXPERIMENT_TASKS};
use crate::reflection::{ReflectionField, QUESTIONS};
use crate::store::{JourneyState, JourneyStore};
use crate::suggest;

/// The screens of the journey. Each handler returns the next view;
/// `Done` ends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Intro,
    Reflection,
    Dashboard,
    RouteDetail(String),
    Summary,
    Experiments,
    Done,
}

/// One interactive sitting: the catalog, the student's stored state
/// and the mentor. Advice already fetched is kept for the rest of the
/// sitting so flipping between screens does not re-ask the model.
pub struct JourneySession {
    routes: Vec<Route>,
    store: JourneyStore,
    mentor: Mentor,
    mentor_text: Option<String>,
    study_text: Option<String>,
}

impl JourneySession {
    pub fn new(config: &Config) -> Self {
        JourneySession {
            routes: catalog(),
            store: JourneyStore::open(config),
            mentor: Mentor::from_config(config),
            mentor_text: None,
            study_text: None,
        }
    }

    /// Run the journey from the natural starting point: the intro for
    /// a fresh journey, the dashboard when answers already exist.
    pub async fn run(&mut self) -> Result<()> {
        let start = initial_view(&self.store.state);
        self.run_from(start).await
    }

    pub async fn run_from(&mut self, start: View) -> Result<()> {
        let mut view = start;
        loop {
            view = match view {
                View::Intro => self.intro()?,
                View::Reflection => self.reflection()?,
                View::Dashboard => self.dashboard()?,
                View::RouteDetail(route_id) => self.route_detail(&route_id)?,
                View::Summary => self.summary().await?,
                View::Experiments => self.experiments()?,
                View::Done => break,
            };
        }
        println!();
        println!("{}", "👋 See you next time!".bright_yellow());
        Ok(())
    }

    fn intro(&self) -> Result<View> {
        println!();
        println!("{}", "🎒 Welcome to TalentTrek!".bright_yellow().bold());
        println!("{}", "A journey to discover what suits you.".dimmed());
        println!();
        println!("We start with six short questions about you.");
        println!("There are no wrong answers, and you can change yours anytime.");
        println!();
        let input = match read_input("Press Enter to start (or q to quit):")? {
            Some(input) => input,
            None => return Ok(View::Done),
        };
        if input == "q" {
            Ok(View::Done)
        } else {
            Ok(View::Reflection)
        }
    }

    fn reflection(&mut self) -> Result<View> {
        let mut index = 0usize;
        loop {
            let question = &QUESTIONS[index];
            println!();
            println!(
                "{}",
                format!("Question {} of {}", index + 1, QUESTIONS.len()).dimmed()
            );
            println!("{}", question.text.bright_yellow().bold());
            for (i, option) in question.options.iter().enumerate() {
                let mark = if self.store.state.reflection.is_selected(question.field, option) {
                    "✅"
                } else {
                    "  "
                };
                println!("  {} {}. {}", mark, i + 1, option);
            }
            if let Some(custom) = self.store.state.reflection.custom_answer(question.field) {
                println!("  ✏️  {}", format!("Your own answer: {}", custom).italic());
            }
            println!(
                "{}",
                "number = toggle, t = own answer, n = next, b = back, d = to the map".dimmed()
            );

            let input = match read_input(">")? {
                Some(input) => input,
                None => return Ok(View::Done),
            };
            match input.as_str() {
                "" | "n" => {
                    if index + 1 < QUESTIONS.len() {
                        index += 1;
                    } else {
                        println!();
                        println!("{}", "🎉 All questions done! On to the route map.".green());
                        return Ok(View::Dashboard);
                    }
                }
                "b" => {
                    if index > 0 {
                        index -= 1;
                    }
                }
                "d" => return Ok(View::Dashboard),
                "t" => {
                    let prompt =
                        format!("✏️  {} (your own words, empty to clear):", question.placeholder);
                    match read_input(&prompt)? {
                        Some(text) => self.store.set_custom_answer(question.field, &text),
                        None => return Ok(View::Done),
                    }
                }
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= question.options.len() => {
                        self.store.toggle_option(question.field, question.options[n - 1]);
                    }
                    _ => println!("{}", "Pick a number from the list.".red()),
                },
            }
        }
    }

    fn dashboard(&mut self) -> Result<View> {
        let suggested =
            suggest::suggested_route_ids(&self.routes, &self.store.state.reflection);

        println!();
        println!("{}", "🗺️  Your route map".bright_yellow().bold());
        println!();
        for (i, route) in self.routes.iter().enumerate() {
            let mut line = format!(
                "  {}. {} {}",
                i + 1,
                route.icon.glyph(),
                route.title.color(route.terminal_color()).bold()
            );
            if let Some(score) = self.store.state.progress.route_score(&route.id) {
                line.push(' ');
                line.push_str(&"🌟".repeat(score as usize));
            }
            if suggested.contains(&route.id) {
                line.push_str(&format!(" {}", "⭐ Tip for you!".bright_yellow()));
            }
            println!("{}", line);
            println!("     {}", route.metaphor.dimmed());
        }
        println!();
        println!(
            "{}",
            "number = open route, r = my answers, p = passport, x = experiments, reset = start over, q = quit"
                .dimmed()
        );

        let input = match read_input(">")? {
            Some(input) => input,
            None => return Ok(View::Done),
        };
        match input.as_str() {
            "q" => Ok(View::Done),
            "p" => Ok(View::Summary),
            "x" => Ok(View::Experiments),
            "r" => Ok(View::Reflection),
            "reset" => self.confirm_reset(),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 && n <= self.routes.len() => {
                    Ok(View::RouteDetail(self.routes[n - 1].id.clone()))
                }
                _ => {
                    println!("{}", "Unknown command.".red());
                    Ok(View::Dashboard)
                }
            },
        }
    }

    fn route_detail(&mut self, route_id: &str) -> Result<View> {
        let route = match route_by_id(&self.routes, route_id).cloned() {
            Some(route) => route,
            None => return Ok(View::Dashboard),
        };

        loop {
            let mut ordered: Vec<&Job> = Vec::new();

            println!();
            println!(
                "{} {}",
                route.icon.glyph(),
                route.title.color(route.terminal_color()).bold()
            );
            println!("{}", format!("   {}", route.metaphor).dimmed());
            println!("   {}", route.description);
            match self.store.state.progress.route_score(&route.id) {
                Some(score) => println!("   Your score: {}", "🌟".repeat(score as usize)),
                None => println!("   {}", "Not scored yet.".dimmed()),
            }
            println!();
            for zone in route.zones() {
                println!("  {}", format!("📍 {}", zone).bold());
                for job in route.jobs_in_zone(zone) {
                    ordered.push(job);
                    let mark = match self.store.state.progress.job_rating(&job.id) {
                        Some(JobRating::Fun) => "😊",
                        Some(JobRating::NotFun) => "😕",
                        Some(JobRating::Unknown) => "🤔",
                        None => "  ",
                    };
                    println!("     {}. {} {}", ordered.len(), job.title, mark);
                }
            }
            println!();
            println!(
                "{}",
                "number = look at a job, s <1-4> = score this route, b = back".dimmed()
            );

            let input = match read_input(">")? {
                Some(input) => input,
                None => return Ok(View::Done),
            };
            if input == "b" {
                return Ok(View::Dashboard);
            }
            if let Some(rest) = input.strip_prefix("s ") {
                match rest.trim().parse::<u8>() {
                    Ok(score) => match self.store.set_route_score(&route.id, score) {
                        Ok(()) => println!("{}", "Score saved!".green()),
                        Err(e) => println!("{}", e.to_string().red()),
                    },
                    Err(_) => println!("{}", "Score must be a number from 1 to 4.".red()),
                }
                continue;
            }
            match input.parse::<usize>() {
                Ok(n) if n >= 1 && n <= ordered.len() => {
                    let job = ordered[n - 1];
                    self.job_card(job)?;
                }
                _ => println!("{}", "Unknown command.".red()),
            }
        }
    }

    fn job_card(&mut self, job: &Job) -> Result<()> {
        println!();
        println!("  💼 {}", job.title.bold());
        println!("  {}", format!("📍 {}", job.zone).dimmed());
        println!("  {}", job.description);
        if let Some(rating) = self.store.state.progress.job_rating(&job.id) {
            println!("  {}", format!("Your rating: {}", rating).dimmed());
        }
        let input = match read_input(
            "How does this job sound? (f = fun, n = not fun, u = don't know, Enter = skip):",
        )? {
            Some(input) => input,
            // A closed stdin counts as skip; the route view exits next.
            None => return Ok(()),
        };
        if input.is_empty() {
            return Ok(());
        }
        match input.parse::<JobRating>() {
            Ok(rating) => {
                self.store.rate_job(&job.id, rating);
                println!("{}", "Saved!".green());
            }
            Err(e) => println!("{}", e.red()),
        }
        Ok(())
    }

    async fn summary(&mut self) -> Result<View> {
        loop {
            println!();
            print_passport(&self.routes, &self.store.state);

            if let Some(text) = &self.mentor_text {
                println!();
                println!("{}", "🤖 Your talent profile".bright_magenta().bold());
                println!("{}", text);
            }
            if let Some(text) = &self.study_text {
                println!();
                println!("{}", "🎓 Study advice".bright_magenta().bold());
                println!("{}", text);
            }

            println!();
            if self.mentor_text.is_none() && !self.mentor.is_configured() {
                println!(
                    "{}",
                    "Tip: set GEMINI_API_KEY to unlock the AI mentor.".dimmed()
                );
            }
            let hint = if self.mentor_text.is_none() {
                "m = ask the mentor for your talent profile, x = experiments, b = back, q = quit"
            } else if self.study_text.is_none() {
                "s = ask for study advice, m = ask again, x = experiments, b = back, q = quit"
            } else {
                "m = profile again, s = advice again, x = experiments, b = back, q = quit"
            };
            println!("{}", hint.dimmed());

            let input = match read_input(">")? {
                Some(input) => input,
                None => return Ok(View::Done),
            };
            match input.as_str() {
                "m" => {
                    println!("{}", "The mentor is thinking...".dimmed());
                    let text = self
                        .mentor
                        .talent_profile(
                            &self.store.state.reflection,
                            &self.store.state.progress,
                            &self.routes,
                        )
                        .await;
                    self.mentor_text = Some(text);
                }
                // Study advice unlocks only after a profile exists.
                "s" if self.mentor_text.is_some() => {
                    println!("{}", "Looking at study options...".dimmed());
                    let text = self
                        .mentor
                        .study_advice(
                            &self.store.state.reflection,
                            &self.store.state.progress,
                            &self.routes,
                        )
                        .await;
                    self.study_text = Some(text);
                }
                "x" => return Ok(View::Experiments),
                "b" => return Ok(View::Dashboard),
                "q" => return Ok(View::Done),
                _ => println!("{}", "Unknown command.".red()),
            }
        }
    }

    fn experiments(&mut self) -> Result<View> {
        loop {
            println!();
            println!("{}", "🧪 Experiments".bright_yellow().bold());
            println!("{}", "Try something out in the real world!".dimmed());
            println!();
            for (i, task) in EXPERIMENT_TASKS.iter().enumerate() {
                let mark = match self.store.state.progress.experiment_for(task) {
                    Some(e) if e.status == ExperimentStatus::Completed => "✅",
                    Some(_) => "📌",
                    None => "  ",
                };
                println!("  {} {}. {}", mark, i + 1, task);
            }
            println!();
            println!(
                "{}",
                "number = plan / unplan, c <number> = mark completed, b = back".dimmed()
            );

            let input = match read_input(">")? {
                Some(input) => input,
                None => return Ok(View::Done),
            };
            if input == "b" {
                return Ok(View::Dashboard);
            }
            if let Some(rest) = input.strip_prefix("c ") {
                match rest.trim().parse::<usize>() {
                    Ok(n) if n >= 1 && n <= EXPERIMENT_TASKS.len() => {
                        match self.store.complete_experiment(EXPERIMENT_TASKS[n - 1]) {
                            Ok(()) => println!("{}", "Nice work! 🎉".green()),
                            Err(e) => println!("{}", e.to_string().red()),
                        }
                    }
                    _ => println!("{}", "Pick a number from the list.".red()),
                }
                continue;
            }
            match input.parse::<usize>() {
                Ok(n) if n >= 1 && n <= EXPERIMENT_TASKS.len() => {
                    if self.store.toggle_experiment(EXPERIMENT_TASKS[n - 1]) {
                        println!("{}", "Planned! Good luck.".green());
                    } else {
                        println!("{}", "Removed from your plan.".dimmed());
                    }
                }
                _ => println!("{}", "Unknown command.".red()),
            }
        }
    }

    fn confirm_reset(&mut self) -> Result<View> {
        let input = match read_input("Really start over? All your answers will be gone. (y/N):")? {
            Some(input) => input,
            None => return Ok(View::Done),
        };
        if input.eq_ignore_ascii_case("y") {
            self.store.reset();
            self.mentor_text = None;
            self.study_text = None;
            println!("{}", "Everything cleared. A fresh start!".green());
            Ok(View::Intro)
        } else {
            println!("{}", "Phew, nothing changed.".dimmed());
            Ok(View::Dashboard)
        }
    }
}

fn initial_view(state: &JourneyState) -> View {
    if state.reflection.is_empty() {
        View::Intro
    } else {
        View::Dashboard
    }
}

/// The talent passport: profile card, route scores and liked jobs.
/// Shared between the interactive summary screen and the `passport`
/// subcommand.
pub fn print_passport(routes: &[Route], state: &JourneyState) {
    let reflection = &state.reflection;
    let progress = &state.progress;

    println!("{}", "🛂 Talent Passport".bright_yellow().bold());
    println!("{}", format!("   {}", Local::now().format("%-d %B %Y")).dimmed());
    println!();
    println!("  {} {}", "Who I am:".bold(), or_placeholder(reflection.answer_summary(ReflectionField::WhoAmI)));
    println!("  {} {}", "Good at:".bold(), or_placeholder(reflection.answer_summary(ReflectionField::GoodAt)));
    println!("  {} {}", "Gets energy from:".bold(), or_placeholder(reflection.answer_summary(ReflectionField::Energy)));
    println!();
    println!("  {}", "Routes".bold());
    for route in routes {
        let score = progress.route_score(&route.id).unwrap_or(0);
        println!(
            "  {} {} {}",
            route.icon.glyph(),
            score_bar(score),
            route.title.color(route.terminal_color())
        );
    }
    println!();
    let liked: Vec<String> = progress
        .liked_jobs
        .iter()
        .map(|id| crate::catalog::job_title(routes, id))
        .collect();
    if liked.is_empty() {
        println!("  {}", "No favourite jobs yet.".dimmed());
    } else {
        println!("  {} {}", "😊 Jobs I like:".bold(), liked.join(", "));
    }

    let stats = progress.stats();
    if stats.planned_experiments + stats.completed_experiments > 0 {
        println!(
            "  {} {} planned, {} completed",
            "🧪 Experiments:".bold(),
            stats.planned_experiments,
            stats.completed_experiments
        );
    }
}

/// Four-slot bar for a route score, empty slots included.
fn score_bar(score: u8) -> String {
    let filled = score.min(4) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(4 - filled))
}

fn or_placeholder(answer: String) -> String {
    if answer.is_empty() {
        "Not filled in yet".dimmed().to_string()
    } else {
        answer
    }
}

fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{} ", prompt.bright_cyan());
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

/// `None` means stdin is closed (Ctrl+D or an exhausted pipe); the
/// views end the session instead of treating it as an empty command.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut input = String::new();
    match reader.read_line(&mut input)? {
        0 => Ok(None),
        _ => Ok(Some(input.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::ReflectionAnswers;

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0), "░░░░");
        assert_eq!(score_bar(2), "██░░");
        assert_eq!(score_bar(4), "████");
        // Out-of-range scores from an edited file are clamped.
        assert_eq!(score_bar(9), "████");
    }

    #[test]
    fn test_initial_view() {
        let mut state = JourneyState::default();
        assert_eq!(initial_view(&state), View::Intro);

        state.reflection.toggle_option(ReflectionField::Likes, "Sports");
        assert_eq!(initial_view(&state), View::Dashboard);
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("Listening".to_string()), "Listening");
        assert!(or_placeholder(String::new()).contains("Not filled in yet"));
    }

    #[test]
    fn test_read_trimmed_line_distinguishes_eof_from_empty() {
        // Ctrl+D or a drained pipe must not look like an empty command,
        // or the views would redraw forever.
        let mut closed = io::Cursor::new("");
        assert_eq!(read_trimmed_line(&mut closed).unwrap(), None);

        let mut blank = io::Cursor::new("\n");
        assert_eq!(read_trimmed_line(&mut blank).unwrap(), Some(String::new()));

        let mut line = io::Cursor::new("  p  \n");
        assert_eq!(read_trimmed_line(&mut line).unwrap(), Some("p".to_string()));

        // Reading past the last line reports the close.
        assert_eq!(read_trimmed_line(&mut line).unwrap(), None);
    }

    #[test]
    fn test_empty_reflection_counts_custom_answers() {
        let mut answers = ReflectionAnswers::default();
        answers.set_custom_answer(ReflectionField::WhoAmI, "a dancer");
        let state = JourneyState {
            reflection: answers,
            ..JourneyState::default()
        };
        assert_eq!(initial_view(&state), View::Dashboard);
    }
}
