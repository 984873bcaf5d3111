// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store behavior through the public API.

use fitwise_core::{FitwiseError, RecordSource, UserId};
use fitwise_storage::{NewWorkout, ProfileUpdate, RecordStore};

async fn store_with_user(name: &str) -> (RecordStore, UserId) {
    let store = RecordStore::open_in_memory().await.unwrap();
    let profile = store.create_user(name).await.unwrap().unwrap();
    (store, UserId(profile.id))
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (store, _) = store_with_user("alice").await;
    assert!(store.create_user("alice").await.unwrap().is_none());
    assert!(store.create_user("bob").await.unwrap().is_some());
}

#[tokio::test]
async fn profile_update_keeps_unset_fields() {
    let (store, user) = store_with_user("alice").await;
    store
        .update_profile(
            user,
            &ProfileUpdate {
                age: Some(30),
                height: Some(165.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let profile = store
        .update_profile(
            user,
            &ProfileUpdate {
                weight_goal: Some(60.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.age, Some(30));
    assert_eq!(profile.height, Some(165.0));
    assert_eq!(profile.weight_goal, Some(60.0));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let store = RecordStore::open_in_memory().await.unwrap();
    let err = store.require_user("ghost").await.unwrap_err();
    assert!(matches!(err, FitwiseError::NotFound { .. }));
}

#[tokio::test]
async fn workouts_come_back_newest_first() {
    let (store, user) = store_with_user("alice").await;
    let run = NewWorkout {
        exercise: "Running".into(),
        ..Default::default()
    };
    let squat = NewWorkout {
        exercise: "Squat".into(),
        sets: Some(3),
        reps: Some(10),
        weight: Some(60.0),
    };
    store.log_workout_on(user, &run, "2026-03-01").await.unwrap();
    store.log_workout_on(user, &squat, "2026-03-05").await.unwrap();

    let workouts = store.workouts(user).await.unwrap();
    let names: Vec<_> = workouts.iter().map(|w| w.exercise.clone().unwrap()).collect();
    assert_eq!(names, ["Squat", "Running"]);
    assert_eq!(workouts[0].sets, Some(3));
}

#[tokio::test]
async fn food_logs_join_the_catalog() {
    let (store, user) = store_with_user("alice").await;
    assert!(store.add_food("Lentil Soup", 230.0).await.unwrap());
    assert!(!store.add_food("Lentil Soup", 230.0).await.unwrap());

    store.log_food(user, "lentil soup", 2.0).await.unwrap();
    let logs = store.food_logs(user).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].name.as_deref(), Some("Lentil Soup"));
    assert_eq!(logs[0].calories, Some(230.0));
    assert_eq!(logs[0].quantity, Some(2.0));

    let err = store.log_food(user, "Pizza", 1.0).await.unwrap_err();
    assert!(matches!(err, FitwiseError::NotFound { .. }));
}

#[tokio::test]
async fn bmi_is_computed_and_stored() {
    let (store, user) = store_with_user("alice").await;
    let bmi = store.log_bmi(user, 81.0, 180.0).await.unwrap();
    assert!((bmi - 25.0).abs() < 1e-9);
    let records = store.bmi_records(user).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].bmi.unwrap() - 25.0).abs() < 1e-9);
}

#[tokio::test]
async fn record_set_is_empty_for_new_user() {
    let (store, user) = store_with_user("alice").await;
    let set = store.record_set(user).await.unwrap();
    assert!(set.profile.is_some());
    assert!(set.workouts.is_empty());
    assert!(set.food_logs.is_empty());

    let missing = store.record_set(UserId(999)).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn settings_and_goals_upsert() {
    let (store, user) = store_with_user("alice").await;
    assert_eq!(store.settings(user).await.unwrap(), Default::default());

    store
        .update_settings(user, Some(true), Some("metric".into()))
        .await
        .unwrap();
    let settings = store.update_settings(user, None, Some("imperial".into())).await.unwrap();
    assert_eq!(settings.notifications, Some(true));
    assert_eq!(settings.units.as_deref(), Some("imperial"));

    let goals = store.update_goals(user, Some(65.0), Some(2000)).await.unwrap();
    assert_eq!(goals.calorie_goal, Some(2000));
}
