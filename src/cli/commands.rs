use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "talenttrek")]
#[command(about = "TalentTrek - a career exploration journey with an AI mentor")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start or continue the interactive journey
    Journey {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// AI provider (gemini, ollama)
        #[arg(long)]
        provider: Option<String>,
        /// Model name for the chosen provider
        #[arg(long)]
        model: Option<String>,
    },
    /// Answer the six reflection questions
    Reflect {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// List all routes with suggestions and scores
    Routes {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Show one route and its jobs
    Route {
        /// Route id (care, tech, art, business, nature, society)
        route_id: String,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Rate a job
    Rate {
        /// Job id, for example "nurse"
        job_id: String,
        /// One of: fun, not_fun, unknown
        rating: String,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Score a route from 1 (not for me) to 4 (love it)
    Score {
        /// Route id
        route_id: String,
        /// Score from 1 to 4
        score: u8,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Show the talent passport
    Passport {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Ask the mentor for a personal talent profile
    Mentor {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// AI provider (gemini, ollama)
        #[arg(long)]
        provider: Option<String>,
        /// Model name for the chosen provider
        #[arg(long)]
        model: Option<String>,
    },
    /// Ask the mentor for study advice
    Study {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// AI provider (gemini, ollama)
        #[arg(long)]
        provider: Option<String>,
        /// Model name for the chosen provider
        #[arg(long)]
        model: Option<String>,
    },
    /// Plan and track real-world experiments
    Experiments {
        #[command(subcommand)]
        command: Option<ExperimentCommands>,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Show journey progress
    Status {
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Delete all saved journey data
    Reset {
        /// Skip the confirmation question
        #[arg(long)]
        force: bool,
        /// Data directory
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ExperimentCommands {
    /// Plan a task, or unplan it when already planned
    Toggle {
        /// Task number from the experiments list
        number: usize,
    },
    /// Mark a planned task as completed
    Complete {
        /// Task number from the experiments list
        number: usize,
    },
}
