use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use colored::*;

use crate::catalog::{catalog, find_job, route_by_id, route_titles};
use crate::config::Config;
use crate::journey::{print_passport, JourneySession, View};
use crate::mentor::Mentor;
use crate::progress::{ExperimentStatus, JobRating, EXPERIMENT_TASKS};
use crate::store::JourneyStore;
use crate::suggest;

pub mod commands;

use commands::ExperimentCommands;

pub async fn handle_journey(
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let config = Config::new(data_dir)?.with_provider(provider.as_deref(), model.as_deref())?;
    let mut session = JourneySession::new(&config);
    session.run().await
}

pub async fn handle_reflect(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut session = JourneySession::new(&config);
    session.run_from(View::Reflection).await
}

pub fn handle_routes(format: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = JourneyStore::open(&config);
    let routes = catalog();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    let suggested = suggest::suggested_route_ids(&routes, &store.state.reflection);

    println!("{}", "🗺️  Routes".bright_yellow().bold());
    for route in &routes {
        let mut line = format!(
            "  {} {} [{}]",
            route.icon.glyph(),
            route.title.color(route.terminal_color()).bold(),
            route.id
        );
        if let Some(score) = store.state.progress.route_score(&route.id) {
            line.push(' ');
            line.push_str(&"🌟".repeat(score as usize));
        }
        if suggested.contains(&route.id) {
            line.push_str(&format!(" {}", "⭐ Tip for you!".bright_yellow()));
        }
        println!("{}", line);
        println!("      {}", route.description.dimmed());
    }
    Ok(())
}

pub fn handle_route(route_id: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = JourneyStore::open(&config);
    let routes = catalog();
    let route = route_by_id(&routes, &route_id).ok_or_else(|| {
        anyhow!(
            "Unknown route: {} (try care, tech, art, business, nature or society)",
            route_id
        )
    })?;

    println!(
        "{} {}",
        route.icon.glyph(),
        route.title.color(route.terminal_color()).bold()
    );
    println!("   {}", route.metaphor.dimmed());
    println!("   {}", route.description);
    if let Some(score) = store.state.progress.route_score(&route.id) {
        println!("   Your score: {}", "🌟".repeat(score as usize));
    }
    println!();
    for zone in route.zones() {
        println!("  {}", format!("📍 {}", zone).bold());
        for job in route.jobs_in_zone(zone) {
            let mark = match store.state.progress.job_rating(&job.id) {
                Some(JobRating::Fun) => " 😊",
                Some(JobRating::NotFun) => " 😕",
                Some(JobRating::Unknown) => " 🤔",
                None => "",
            };
            println!("     {} [{}]{}", job.title.bold(), job.id, mark);
            println!("        {}", job.description.dimmed());
        }
    }
    Ok(())
}

pub fn handle_rate(job_id: String, rating: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = JourneyStore::open(&config);
    let routes = catalog();

    let (route, job) =
        find_job(&routes, &job_id).ok_or_else(|| anyhow!("Unknown job: {}", job_id))?;
    let rating: JobRating = rating.parse().map_err(|e: String| anyhow!(e))?;

    store.rate_job(&job.id, rating);
    println!("✅ {} ({}): {}", job.title.bold(), route.title, rating);
    Ok(())
}

pub fn handle_score(route_id: String, score: u8, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = JourneyStore::open(&config);
    let routes = catalog();
    let route =
        route_by_id(&routes, &route_id).ok_or_else(|| anyhow!("Unknown route: {}", route_id))?;

    store.set_route_score(&route.id, score)?;
    println!(
        "✅ {} scored {}",
        route.title.bold(),
        "🌟".repeat(score as usize)
    );
    Ok(())
}

pub fn handle_passport(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = JourneyStore::open(&config);
    let routes = catalog();
    println!();
    print_passport(&routes, &store.state);
    Ok(())
}

pub async fn handle_mentor(
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let config = Config::new(data_dir)?.with_provider(provider.as_deref(), model.as_deref())?;
    let store = JourneyStore::open(&config);
    let routes = catalog();
    let mentor = Mentor::from_config(&config);

    println!("{}", "The mentor is thinking...".dimmed());
    let text = mentor
        .talent_profile(&store.state.reflection, &store.state.progress, &routes)
        .await;
    println!();
    println!("{}", "🤖 Your talent profile".bright_magenta().bold());
    println!("{}", text);
    Ok(())
}

pub async fn handle_study(
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let config = Config::new(data_dir)?.with_provider(provider.as_deref(), model.as_deref())?;
    let store = JourneyStore::open(&config);
    let routes = catalog();
    let mentor = Mentor::from_config(&config);

    println!("{}", "Looking at study options...".dimmed());
    let text = mentor
        .study_advice(&store.state.reflection, &store.state.progress, &routes)
        .await;
    println!();
    println!("{}", "🎓 Study advice".bright_magenta().bold());
    println!("{}", text);
    Ok(())
}

pub fn handle_experiments(
    command: Option<ExperimentCommands>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = JourneyStore::open(&config);

    match command {
        Some(ExperimentCommands::Toggle { number }) => {
            let title = task_by_number(number)?;
            if store.toggle_experiment(title) {
                println!("📌 Planned: {}", title);
            } else {
                println!("Removed from your plan: {}", title);
            }
        }
        Some(ExperimentCommands::Complete { number }) => {
            let title = task_by_number(number)?;
            store.complete_experiment(title)?;
            println!("✅ Completed: {}", title);
        }
        None => {
            println!("{}", "🧪 Experiments".bright_yellow().bold());
            for (i, task) in EXPERIMENT_TASKS.iter().enumerate() {
                let mark = match store.state.progress.experiment_for(task) {
                    Some(e) if e.status == ExperimentStatus::Completed => "✅",
                    Some(_) => "📌",
                    None => "  ",
                };
                println!("  {} {}. {}", mark, i + 1, task);
            }
        }
    }
    Ok(())
}

fn task_by_number(number: usize) -> Result<&'static str> {
    if (1..=EXPERIMENT_TASKS.len()).contains(&number) {
        Ok(EXPERIMENT_TASKS[number - 1])
    } else {
        Err(anyhow!(
            "Task number must be between 1 and {}",
            EXPERIMENT_TASKS.len()
        ))
    }
}

pub fn handle_status(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = JourneyStore::open(&config);
    let routes = catalog();
    let stats = store.state.progress.stats();

    println!("{}", "🎒 Journey status".bright_yellow().bold());
    println!(
        "  Questions answered: {}/6",
        store.state.reflection.answered_count()
    );
    println!("  Jobs rated: {}", stats.rated_jobs);
    println!("  Routes scored: {}", stats.scored_routes);
    let favourites = route_titles(&routes, &store.state.progress.favourite_route_ids());
    if !favourites.is_empty() {
        println!("  Favourite routes: {}", favourites.join(", "));
    }
    println!(
        "  Experiments: {} planned, {} completed",
        stats.planned_experiments, stats.completed_experiments
    );
    println!("  AI provider: {} ({})", config.provider, config.model);
    println!("  Data file: {}", store.path().display());
    if !store.path().exists() {
        println!("  {}", "(nothing saved yet)".dimmed());
    }
    Ok(())
}

pub fn handle_reset(force: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = JourneyStore::open(&config);

    if !force {
        print!(
            "{} ",
            "Really delete all journey data? (y/N):".bright_cyan()
        );
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Nothing deleted.".dimmed());
            return Ok(());
        }
    }

    store.reset();
    println!("{}", "🗑️  All journey data deleted.".green());
    Ok(())
}
