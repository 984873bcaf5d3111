// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fitwise - a fitness tracker with a retrieval-backed assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod session;

use clap::{Args, Parser, Subcommand};

/// Fitwise - log workouts and meals, then ask about them.
#[derive(Parser, Debug)]
#[command(name = "fitwise", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage users.
    #[command(subcommand)]
    User(UserCommand),
    /// Log a record for a user.
    #[command(subcommand)]
    Log(LogCommand),
    /// Manage the food catalog.
    #[command(subcommand)]
    Food(FoodCommand),
    /// Rebuild and print a user's knowledge corpus.
    Corpus(UserArg),
    /// Ask the assistant a question.
    Ask {
        #[command(flatten)]
        user: UserArg,
        /// Number of passages to retrieve. Values below 1 retrieve nothing.
        #[arg(long, allow_negative_numbers = true)]
        top_k: Option<i64>,
        /// The question.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// List the assistant's tools.
    Tools,
    /// Show an activity reminder.
    Remind(UserArg),
    /// Show the reminder with the latest workouts and food logs.
    Dashboard(UserArg),
    /// Update notification and unit preferences.
    Settings {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long, value_parser = ["metric", "imperial"])]
        units: Option<String>,
    },
    /// Update weight and daily calorie goals.
    Goals {
        #[command(flatten)]
        user: UserArg,
        /// Target weight in kilograms.
        #[arg(long)]
        weight_goal: Option<f64>,
        #[arg(long)]
        calorie_goal: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct UserArg {
    /// Username.
    #[arg(long, short)]
    user: String,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user.
    Add {
        username: String,
        #[arg(long)]
        age: Option<i64>,
        /// Height in centimetres.
        #[arg(long)]
        height: Option<f64>,
        /// Target weight in kilograms.
        #[arg(long)]
        weight_goal: Option<f64>,
    },
    /// Print a user's profile, settings and goals.
    Show { username: String },
}

#[derive(Subcommand, Debug)]
enum LogCommand {
    /// Log a workout dated today.
    Workout {
        #[command(flatten)]
        user: UserArg,
        exercise: String,
        #[arg(long)]
        sets: Option<i64>,
        #[arg(long)]
        reps: Option<i64>,
        /// Weight lifted in kilograms.
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Log servings of a catalog food.
    Food {
        #[command(flatten)]
        user: UserArg,
        food: String,
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
    },
    /// Log body weight in kilograms.
    Weight {
        #[command(flatten)]
        user: UserArg,
        weight: f64,
    },
    /// Compute and log BMI. Height defaults to the profile height.
    Bmi {
        #[command(flatten)]
        user: UserArg,
        /// Body weight in kilograms.
        #[arg(long)]
        weight: f64,
        /// Height in centimetres.
        #[arg(long)]
        height: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum FoodCommand {
    /// Add a catalog food.
    Add { name: String, calories: f64 },
    /// List the catalog.
    List,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fitwise={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match fitwise_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            fitwise_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.app.log_level);

    if let Err(e) = commands::run(cli.command, &config).await {
        eprintln!("fitwise: {e}");
        std::process::exit(1);
    }
}
