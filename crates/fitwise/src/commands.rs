// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand handlers.

use fitwise_assistant::AssistantTool;
use fitwise_config::FitwiseConfig;
use fitwise_core::{FitwiseError, FoodLogEntry, RecordSource, UserId, WorkoutEntry};
use fitwise_knowledge::corpus::format_number;
use fitwise_storage::{NewWorkout, ProfileUpdate, RecordStore};
use strum::IntoEnumIterator;

use crate::session;
use crate::{Commands, FoodCommand, LogCommand, UserCommand};

pub async fn run(command: Commands, config: &FitwiseConfig) -> Result<(), FitwiseError> {
    if let Commands::Tools = command {
        for tool in AssistantTool::iter() {
            println!("{:<18} {}", tool.name(), tool.description());
        }
        return Ok(());
    }

    let store = session::open_store(config).await?;
    dispatch(&store, config, command).await
}

async fn dispatch(
    store: &RecordStore,
    config: &FitwiseConfig,
    command: Commands,
) -> Result<(), FitwiseError> {
    match command {
        Commands::User(cmd) => user(store, cmd).await,
        Commands::Log(cmd) => log(store, cmd).await,
        Commands::Food(cmd) => food(store, cmd).await,
        Commands::Corpus(arg) => {
            let assistant = session::assistant_for(config, store, &arg.user).await?;
            let state = assistant.start_session().await;
            if let Some(corpus) = assistant.corpus() {
                println!("{}", corpus.to_text());
            }
            if let Some(file) = assistant.corpus_file() {
                eprintln!("corpus file: {}", file.path().display());
            }
            eprintln!("assistant: {state}");
            Ok(())
        }
        Commands::Ask {
            user,
            top_k,
            question,
        } => {
            let assistant = session::assistant_for(config, store, &user.user).await?;
            assistant.start_session().await;
            let question = question.join(" ");
            let top_k = top_k
                .map(clamp_top_k)
                .unwrap_or(config.knowledge.default_top_k);
            let reply = assistant.ask_with_top_k(&question, top_k).await;
            println!("{}", reply.text);
            if let Some(reason) = reply.error {
                eprintln!("note: answered without semantic retrieval ({reason})");
            }
            Ok(())
        }
        Commands::Remind(arg) => {
            let assistant = session::assistant_for(config, store, &arg.user).await?;
            println!("{}", assistant.reminder().await.text);
            Ok(())
        }
        Commands::Dashboard(arg) => {
            let assistant = session::assistant_for(config, store, &arg.user).await?;
            let reminder = assistant.reminder().await.text;
            let workouts = store.workouts(assistant.user()).await?;
            let food_logs = store.food_logs(assistant.user()).await?;
            print!("{}", dashboard_text(&reminder, &workouts, &food_logs));
            Ok(())
        }
        Commands::Settings {
            user,
            notifications,
            units,
        } => {
            let id = store.require_user(&user.user).await?;
            let settings = store.update_settings(id, notifications, units).await?;
            println!(
                "notifications: {} | units: {}",
                settings.notifications.map_or("N/A", |on| if on { "on" } else { "off" }),
                settings.units.as_deref().unwrap_or("N/A")
            );
            Ok(())
        }
        Commands::Goals {
            user,
            weight_goal,
            calorie_goal,
        } => {
            let id = store.require_user(&user.user).await?;
            let goals = store.update_goals(id, weight_goal, calorie_goal).await?;
            println!(
                "weight goal: {} | calorie goal: {}",
                goals.weight_goal.map_or_else(|| "N/A".to_string(), format_number),
                goals.calorie_goal.map_or_else(|| "N/A".to_string(), |c| c.to_string())
            );
            Ok(())
        }
        Commands::Tools => Ok(()),
    }
}

/// Entries shown per section of the dashboard.
const DASHBOARD_ENTRIES: usize = 5;

/// Reminder followed by the newest workouts and food logs.
fn dashboard_text(reminder: &str, workouts: &[WorkoutEntry], food_logs: &[FoodLogEntry]) -> String {
    let mut out = format!("{reminder}\n\nRecent Workouts\n");
    if workouts.is_empty() {
        out.push_str("No recent workouts logged.\n");
    }
    for w in workouts.iter().take(DASHBOARD_ENTRIES) {
        out.push_str(&format!(
            "{}: {} - {} sets, {} reps\n",
            w.date.as_deref().unwrap_or("N/A"),
            w.exercise.as_deref().unwrap_or("N/A"),
            w.sets.map_or_else(|| "N/A".to_string(), |n| n.to_string()),
            w.reps.map_or_else(|| "N/A".to_string(), |n| n.to_string()),
        ));
    }

    out.push_str("\nRecent Food Logs\n");
    if food_logs.is_empty() {
        out.push_str("No recent food logs.\n");
    }
    for f in food_logs.iter().take(DASHBOARD_ENTRIES) {
        let quantity = f.quantity.unwrap_or(1.0);
        let calories = match f.calories {
            Some(c) => format!("{} cal", format_number(c * quantity)),
            None => "calories unknown".to_string(),
        };
        out.push_str(&format!(
            "{}: {} x{} - {calories}\n",
            f.date.as_deref().unwrap_or("N/A"),
            f.name.as_deref().unwrap_or("Unknown Food"),
            format_number(quantity),
        ));
    }
    out
}

/// Negative counts retrieve nothing rather than failing.
fn clamp_top_k(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

async fn user(store: &RecordStore, cmd: UserCommand) -> Result<(), FitwiseError> {
    match cmd {
        UserCommand::Add {
            username,
            age,
            height,
            weight_goal,
        } => {
            let Some(profile) = store.create_user(&username).await? else {
                eprintln!("username '{username}' is already taken");
                return Ok(());
            };
            let update = ProfileUpdate {
                age,
                height,
                weight_goal,
                ..Default::default()
            };
            store.update_profile(UserId(profile.id), &update).await?;
            println!("created user {username} (id {})", profile.id);
            Ok(())
        }
        UserCommand::Show { username } => {
            let user = store.require_user(&username).await?;
            let profile = store.profile(user).await?;
            let settings = store.settings(user).await?;
            let goals = store.goals(user).await?;
            println!("{profile:#?}\n{settings:#?}\n{goals:#?}");
            Ok(())
        }
    }
}

async fn log(store: &RecordStore, cmd: LogCommand) -> Result<(), FitwiseError> {
    match cmd {
        LogCommand::Workout {
            user,
            exercise,
            sets,
            reps,
            weight,
        } => {
            let id = store.require_user(&user.user).await?;
            let workout = NewWorkout {
                exercise,
                sets,
                reps,
                weight,
            };
            store.log_workout(id, &workout).await?;
            println!("workout logged");
        }
        LogCommand::Food {
            user,
            food,
            quantity,
        } => {
            let id = store.require_user(&user.user).await?;
            store.log_food(id, &food, quantity).await?;
            println!("food logged");
        }
        LogCommand::Weight { user, weight } => {
            let id = store.require_user(&user.user).await?;
            store.log_weight(id, weight).await?;
            println!("weight logged");
        }
        LogCommand::Bmi {
            user,
            weight,
            height,
        } => {
            let id = store.require_user(&user.user).await?;
            let height = match height {
                Some(h) => h,
                None => store
                    .profile(id)
                    .await?
                    .and_then(|p| p.height)
                    .unwrap_or(0.0),
            };
            let bmi = store.log_bmi(id, weight, height).await?;
            println!("BMI logged: {}", format_number((bmi * 100.0).round() / 100.0));
        }
    }
    Ok(())
}

async fn food(store: &RecordStore, cmd: FoodCommand) -> Result<(), FitwiseError> {
    match cmd {
        FoodCommand::Add { name, calories } => {
            if store.add_food(&name, calories).await? {
                println!("added {name}");
            } else {
                eprintln!("'{name}' is already in the catalog");
            }
        }
        FoodCommand::List => {
            for food in store.list_foods().await? {
                println!("{:<24} {} cal", food.name, format_number(food.calories));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_top_k_clamps_to_zero() {
        assert_eq!(clamp_top_k(-5), 0);
        assert_eq!(clamp_top_k(0), 0);
        assert_eq!(clamp_top_k(4), 4);
    }

    fn workout(day: u32, exercise: &str) -> WorkoutEntry {
        WorkoutEntry {
            id: i64::from(day),
            date: Some(format!("2026-06-{day:02}")),
            exercise: Some(exercise.into()),
            sets: Some(3),
            reps: Some(10),
            weight: None,
        }
    }

    #[test]
    fn dashboard_shows_five_newest_entries() {
        let workouts: Vec<_> = (1..=7).rev().map(|d| workout(d, &format!("Lift {d}"))).collect();
        let food = vec![FoodLogEntry {
            id: 1,
            date: Some("2026-06-07".into()),
            food_id: Some(1),
            name: Some("Egg".into()),
            calories: Some(78.0),
            quantity: Some(2.0),
        }];
        let text = dashboard_text("Great job staying active recently!", &workouts, &food);

        assert!(text.starts_with("Great job staying active recently!\n\nRecent Workouts\n"));
        assert!(text.contains("2026-06-07: Lift 7 - 3 sets, 10 reps"));
        assert!(text.contains("2026-06-03: Lift 3"));
        assert!(!text.contains("Lift 2"));
        assert!(text.contains("2026-06-07: Egg x2 - 156 cal"));
    }

    #[test]
    fn dashboard_reports_empty_history() {
        let text = dashboard_text("reminder", &[], &[]);
        assert!(text.contains("No recent workouts logged."));
        assert!(text.contains("No recent food logs."));
    }

    #[tokio::test]
    async fn settings_and_goals_update_partially() {
        let store = RecordStore::open_in_memory().await.unwrap();
        let config = FitwiseConfig::default();
        store.create_user("ana").await.unwrap().unwrap();
        let ana = || crate::UserArg { user: "ana".into() };

        let commands = [
            Commands::Settings {
                user: ana(),
                notifications: Some(true),
                units: Some("metric".into()),
            },
            Commands::Settings {
                user: ana(),
                notifications: Some(false),
                units: None,
            },
            Commands::Goals {
                user: ana(),
                weight_goal: None,
                calorie_goal: Some(2000),
            },
        ];
        for command in commands {
            dispatch(&store, &config, command).await.unwrap();
        }

        let id = store.require_user("ana").await.unwrap();
        let settings = store.settings(id).await.unwrap();
        assert_eq!(settings.notifications, Some(false));
        assert_eq!(settings.units.as_deref(), Some("metric"));
        let goals = store.goals(id).await.unwrap();
        assert_eq!(goals.calorie_goal, Some(2000));
        assert_eq!(goals.weight_goal, None);
    }

    #[tokio::test]
    async fn settings_for_unknown_user_fails() {
        let store = RecordStore::open_in_memory().await.unwrap();
        let command = Commands::Settings {
            user: crate::UserArg { user: "nobody".into() },
            notifications: Some(true),
            units: None,
        };
        let err = dispatch(&store, &FitwiseConfig::default(), command).await.unwrap_err();
        assert!(matches!(err, FitwiseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn user_add_sets_profile_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("fitwise.db")).await.unwrap();
        user(
            &store,
            UserCommand::Add {
                username: "ana".into(),
                age: Some(30),
                height: Some(165.0),
                weight_goal: None,
            },
        )
        .await
        .unwrap();
        let profile = store.find_user("ana").await.unwrap().unwrap();
        assert_eq!(profile.height, Some(165.0));
        assert_eq!(profile.weight_goal, None);
    }

    #[tokio::test]
    async fn bmi_uses_profile_height() {
        let store = RecordStore::open_in_memory().await.unwrap();
        let profile = store.create_user("ana").await.unwrap().unwrap();
        store
            .update_profile(
                UserId(profile.id),
                &ProfileUpdate {
                    height: Some(180.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        log(
            &store,
            LogCommand::Bmi {
                user: crate::UserArg { user: "ana".into() },
                weight: 81.0,
                height: None,
            },
        )
        .await
        .unwrap();
        let records = store.bmi_records(UserId(profile.id)).await.unwrap();
        assert!((records[0].bmi.unwrap() - 25.0).abs() < 1e-9);
    }
}
