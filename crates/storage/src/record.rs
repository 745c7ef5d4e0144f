//! Serialized form of the stored collections.

use chrono::DateTime;
use liftlog_domain as domain;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: u64,
    pub name: String,
    pub primary_muscle_group_id: String,
    pub secondary_muscle_group_id: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            primary_muscle_group_id: String::from(&value.primary_muscle_group),
            secondary_muscle_group_id: value.secondary_muscle_group.as_ref().map(String::from),
        }
    }
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        Self {
            id: value.id.into(),
            name: domain::Name::from_stored(value.name),
            primary_muscle_group: value.primary_muscle_group_id.into(),
            secondary_muscle_group: value.secondary_muscle_group_id.map(Into::into),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: u64,
    pub created_date: i64,
    pub exercises: Vec<WorkoutExercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            created_date: value.created_date.timestamp_millis(),
            exercises: value.exercises.iter().map(WorkoutExercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = RecordError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            created_date: DateTime::from_timestamp_millis(value.created_date)
                .ok_or(RecordError::InvalidTimestamp(value.created_date))?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::WorkoutExercise::from)
                .collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: u64,
    pub name: String,
    pub primary_muscle_group_id: String,
    pub secondary_muscle_group_id: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

impl From<&domain::WorkoutExercise> for WorkoutExercise {
    fn from(value: &domain::WorkoutExercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.clone(),
            primary_muscle_group_id: String::from(&value.primary_muscle_group),
            secondary_muscle_group_id: value.secondary_muscle_group.as_ref().map(String::from),
            notes: value.notes.clone(),
            sets: value.sets.iter().map(WorkoutSet::from).collect(),
        }
    }
}

impl From<WorkoutExercise> for domain::WorkoutExercise {
    fn from(value: WorkoutExercise) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            primary_muscle_group: value.primary_muscle_group_id.into(),
            secondary_muscle_group: value.secondary_muscle_group_id.map(Into::into),
            notes: value.notes,
            sets: value.sets.into_iter().map(domain::WorkoutSet::from).collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub id: u64,
    pub weight: f64,
    pub reps: u32,
}

impl From<&domain::WorkoutSet> for WorkoutSet {
    fn from(value: &domain::WorkoutSet) -> Self {
        Self {
            id: *value.id,
            weight: value.weight,
            reps: value.reps,
        }
    }
}

impl From<WorkoutSet> for domain::WorkoutSet {
    fn from(value: WorkoutSet) -> Self {
        Self {
            id: value.id.into(),
            weight: value.weight,
            reps: value.reps,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}
