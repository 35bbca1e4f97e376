use clap::Parser;
use colored::*;

mod ai_provider;
mod catalog;
mod cli;
mod config;
mod journey;
mod mentor;
mod progress;
mod prompts;
mod reflection;
mod store;
mod suggest;

use cli::commands::{Args, Commands};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Journey {
            data_dir,
            provider,
            model,
        } => cli::handle_journey(data_dir, provider, model).await,
        Commands::Reflect { data_dir } => cli::handle_reflect(data_dir).await,
        Commands::Routes { format, data_dir } => cli::handle_routes(format, data_dir),
        Commands::Route { route_id, data_dir } => cli::handle_route(route_id, data_dir),
        Commands::Rate {
            job_id,
            rating,
            data_dir,
        } => cli::handle_rate(job_id, rating, data_dir),
        Commands::Score {
            route_id,
            score,
            data_dir,
        } => cli::handle_score(route_id, score, data_dir),
        Commands::Passport { data_dir } => cli::handle_passport(data_dir),
        Commands::Mentor {
            data_dir,
            provider,
            model,
        } => cli::handle_mentor(data_dir, provider, model).await,
        Commands::Study {
            data_dir,
            provider,
            model,
        } => cli::handle_study(data_dir, provider, model).await,
        Commands::Experiments { command, data_dir } => cli::handle_experiments(command, data_dir),
        Commands::Status { data_dir } => cli::handle_status(data_dir),
        Commands::Reset { force, data_dir } => cli::handle_reset(force, data_dir),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
