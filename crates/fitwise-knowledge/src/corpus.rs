// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converts a user's logged records into the plain-text knowledge corpus.
//!
//! Each non-empty category becomes one passage: a `=== ... ===` header line
//! followed by one fixed-format line per entry. Missing fields render as a
//! placeholder so every line keeps all of its labels.

use fitwise_core::{BmiEntry, FoodLogEntry, Profile, UserRecordSet, WeightEntry, WorkoutEntry};

/// The single passage of a corpus built from no data at all.
pub const SENTINEL: &str = "No user data logged yet.";

const HEADER_PREFIX: &str = "=== ";

const PROFILE_HEADER: &str = "=== User's Profile ===";
const WORKOUTS_HEADER: &str = "=== User's Workouts ===";
const FOOD_HEADER: &str = "=== User's Food Logs ===";
const WEIGHTS_HEADER: &str = "=== User's Weight Logs ===";
const BMI_HEADER: &str = "=== User's BMI Records ===";

const NOT_AVAILABLE: &str = "N/A";

/// Ordered passages derived from one user's records. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    passages: Vec<String>,
}

impl CorpusDocument {
    /// The corpus of a user with nothing logged.
    pub fn sentinel() -> Self {
        Self {
            passages: vec![SENTINEL.to_string()],
        }
    }

    /// Builds a document from raw passages. Blank passages are dropped and
    /// an empty result becomes the sentinel corpus.
    pub fn from_passages<I, S>(passages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let passages: Vec<String> = passages
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.trim().is_empty())
            .collect();
        if passages.is_empty() {
            Self::sentinel()
        } else {
            Self { passages }
        }
    }

    /// Reconstructs passages from corpus file text.
    ///
    /// A line starting with `=== ` opens a new passage and the lines after it
    /// belong to that passage. Lines before the first header stand alone.
    pub fn parse(text: &str) -> Self {
        let mut passages: Vec<String> = Vec::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(HEADER_PREFIX) {
                passages.extend(current.take());
                current = Some(line.to_string());
            } else if let Some(section) = current.as_mut() {
                section.push('\n');
                section.push_str(line);
            } else {
                passages.push(line.to_string());
            }
        }
        passages.extend(current);

        Self::from_passages(passages)
    }

    /// Appends extra passages, such as static facts, after the user's own.
    pub fn with_facts(mut self, facts: &[String]) -> Self {
        self.passages.extend(
            facts
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// True when the document holds no passages, which a built or parsed
    /// document never does.
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// True when the document is exactly the sentinel corpus.
    pub fn is_sentinel(&self) -> bool {
        self.passages.len() == 1 && self.passages[0] == SENTINEL
    }

    /// The corpus file form: passages joined by newlines.
    pub fn to_text(&self) -> String {
        self.passages.join("\n")
    }
}

/// Renders [`UserRecordSet`]s into [`CorpusDocument`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusBuilder;

impl CorpusBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Regenerates the whole corpus from the current records.
    pub fn build(&self, records: &UserRecordSet) -> CorpusDocument {
        let mut passages = Vec::with_capacity(5);

        if let Some(profile) = &records.profile {
            passages.push(section(PROFILE_HEADER, std::iter::once(profile_line(profile))));
        }
        if !records.workouts.is_empty() {
            passages.push(section(
                WORKOUTS_HEADER,
                records.workouts.iter().map(workout_line),
            ));
        }
        if !records.food_logs.is_empty() {
            passages.push(section(FOOD_HEADER, records.food_logs.iter().map(food_line)));
        }
        if !records.weights.is_empty() {
            passages.push(section(WEIGHTS_HEADER, records.weights.iter().map(weight_line)));
        }
        if !records.bmi_records.is_empty() {
            passages.push(section(BMI_HEADER, records.bmi_records.iter().map(bmi_line)));
        }

        CorpusDocument::from_passages(passages)
    }
}

fn section(header: &str, lines: impl Iterator<Item = String>) -> String {
    let mut block = header.to_string();
    for line in lines {
        block.push('\n');
        block.push_str(&line);
    }
    block
}

fn profile_line(p: &Profile) -> String {
    format!(
        "Username: {} | Age: {} | Height: {} | Weight Goal: {}",
        text_or(p.username.as_deref(), NOT_AVAILABLE),
        int_or(p.age, NOT_AVAILABLE),
        number_or(p.height, NOT_AVAILABLE),
        number_or(p.weight_goal, NOT_AVAILABLE),
    )
}

fn workout_line(w: &WorkoutEntry) -> String {
    format!(
        "Date: {} | Exercise: {} | Sets: {} | Reps: {} | Weight: {}",
        text_or(w.date.as_deref(), NOT_AVAILABLE),
        text_or(w.exercise.as_deref(), NOT_AVAILABLE),
        int_or(w.sets, NOT_AVAILABLE),
        int_or(w.reps, NOT_AVAILABLE),
        number_or(w.weight, NOT_AVAILABLE),
    )
}

fn food_line(f: &FoodLogEntry) -> String {
    format!(
        "Date: {} | Food: {} | Calories: {} | Quantity: {}",
        text_or(f.date.as_deref(), NOT_AVAILABLE),
        text_or(f.name.as_deref(), "Unknown Food"),
        number_or(f.calories, "Unknown Calories"),
        number_or(f.quantity, "Unknown Quantity"),
    )
}

fn weight_line(w: &WeightEntry) -> String {
    format!(
        "Date: {} | Weight: {}",
        text_or(w.date.as_deref(), NOT_AVAILABLE),
        number_or(w.weight, NOT_AVAILABLE),
    )
}

fn bmi_line(b: &BmiEntry) -> String {
    format!(
        "Date: {} | BMI: {}",
        text_or(b.date.as_deref(), NOT_AVAILABLE),
        number_or(b.bmi, NOT_AVAILABLE),
    )
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn int_or(value: Option<i64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| v.to_string())
}

fn number_or(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), format_number)
}

/// Formats a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ana() -> Profile {
        Profile {
            id: 1,
            username: Some("ana".into()),
            age: Some(30),
            height: Some(165.0),
            weight_goal: Some(60.0),
            ..Default::default()
        }
    }

    #[test]
    fn profile_only_is_one_passage() {
        let records = UserRecordSet {
            profile: Some(ana()),
            ..Default::default()
        };
        let doc = CorpusBuilder::new().build(&records);
        assert_eq!(doc.len(), 1);
        let passage = &doc.passages()[0];
        assert!(passage.starts_with("=== User's Profile ==="));
        let second = passage.lines().nth(1).unwrap();
        assert!(second.contains("Username: ana | Age: 30 | Height: 165 | Weight Goal: 60"));
    }

    #[test]
    fn no_records_yields_sentinel() {
        let doc = CorpusBuilder::new().build(&UserRecordSet::default());
        assert_eq!(doc.passages(), [SENTINEL.to_string()]);
        assert!(doc.is_sentinel());
        assert!(!doc.is_empty());
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let records = UserRecordSet {
            workouts: vec![WorkoutEntry {
                id: 1,
                date: Some("2026-04-02".into()),
                exercise: Some("   ".into()),
                ..Default::default()
            }],
            food_logs: vec![FoodLogEntry {
                id: 1,
                date: Some("2026-04-02".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = CorpusBuilder::new().build(&records);
        assert_eq!(
            doc.passages()[0],
            "=== User's Workouts ===\n\
             Date: 2026-04-02 | Exercise: N/A | Sets: N/A | Reps: N/A | Weight: N/A"
        );
        assert_eq!(
            doc.passages()[1],
            "=== User's Food Logs ===\n\
             Date: 2026-04-02 | Food: Unknown Food | Calories: Unknown Calories | Quantity: Unknown Quantity"
        );
    }

    #[test]
    fn sections_keep_category_order() {
        let records = UserRecordSet {
            bmi_records: vec![BmiEntry {
                id: 1,
                date: Some("2026-04-01".into()),
                bmi: Some(22.5),
            }],
            weights: vec![WeightEntry {
                id: 1,
                date: Some("2026-04-01".into()),
                weight: Some(70.0),
            }],
            profile: Some(ana()),
            ..Default::default()
        };
        let doc = CorpusBuilder::new().build(&records);
        let headers: Vec<&str> = doc
            .passages()
            .iter()
            .map(|p| p.lines().next().unwrap())
            .collect();
        assert_eq!(
            headers,
            [PROFILE_HEADER, WEIGHTS_HEADER, BMI_HEADER]
        );
        assert!(doc.passages()[2].ends_with("Date: 2026-04-01 | BMI: 22.5"));
    }

    #[test]
    fn parse_reverses_to_text() {
        let records = UserRecordSet {
            profile: Some(ana()),
            weights: vec![
                WeightEntry {
                    id: 2,
                    date: Some("2026-04-02".into()),
                    weight: Some(69.4),
                },
                WeightEntry {
                    id: 1,
                    date: Some("2026-04-01".into()),
                    weight: Some(70.0),
                },
            ],
            ..Default::default()
        };
        let doc = CorpusBuilder::new().build(&records);
        assert_eq!(CorpusDocument::parse(&doc.to_text()), doc);
    }

    #[test]
    fn parse_of_blank_text_is_sentinel() {
        assert!(CorpusDocument::parse("").is_sentinel());
        assert!(CorpusDocument::parse("\n  \n").is_sentinel());
        assert!(CorpusDocument::parse(SENTINEL).is_sentinel());
    }

    #[test]
    fn facts_follow_user_passages() {
        let doc = CorpusDocument::sentinel()
            .with_facts(&["Protein supports recovery.".into(), "  ".into()]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.passages()[1], "Protein supports recovery.");
    }

    #[test]
    fn integral_numbers_drop_fraction() {
        assert_eq!(format_number(165.0), "165");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(22.857), "22.857");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    fn arb_workout() -> impl Strategy<Value = WorkoutEntry> {
        (
            proptest::option::of("[0-9-]{0,10}"),
            proptest::option::of("[a-zA-Z ]{0,12}"),
            proptest::option::of(0i64..20),
        )
            .prop_map(|(date, exercise, sets)| WorkoutEntry {
                id: 0,
                date,
                exercise,
                sets,
                reps: None,
                weight: None,
            })
    }

    fn arb_weight() -> impl Strategy<Value = WeightEntry> {
        proptest::option::of(-500.0f64..500.0).prop_map(|weight| WeightEntry {
            id: 0,
            date: None,
            weight,
        })
    }

    proptest! {
        #[test]
        fn corpus_is_never_empty(
            has_profile in any::<bool>(),
            workouts in proptest::collection::vec(arb_workout(), 0..4),
            weights in proptest::collection::vec(arb_weight(), 0..4),
        ) {
            let records = UserRecordSet {
                profile: has_profile.then(Profile::default),
                workouts,
                weights,
                ..Default::default()
            };
            let doc = CorpusBuilder::new().build(&records);
            prop_assert!(doc.len() >= 1);
            prop_assert!(!doc.is_empty());
            prop_assert_eq!(doc.is_sentinel(), records.is_empty());
        }
    }
}
