//! Editing of a workout before it is saved.

use chrono::{DateTime, Utc};
use liftlog_domain::{Exercise, ExerciseID, SetID, Workout, WorkoutExercise, WorkoutSet};

pub const DEFAULT_WEIGHT: f64 = 40.0;
pub const DEFAULT_REPS: u32 = 10;

/// Workout being edited.
///
/// A new draft has a provisional id and is only stored when saved. Exercises are addressed by
/// their position, as the same exercise may be added more than once.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    workout: Workout,
    persisted: bool,
}

impl WorkoutDraft {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            workout: Workout::new(now),
            persisted: false,
        }
    }

    /// Draft of a stored workout, keeping its id and creation date.
    #[must_use]
    pub fn edit(workout: Workout) -> Self {
        Self {
            workout,
            persisted: true,
        }
    }

    #[must_use]
    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        !self.persisted
    }

    pub(crate) fn saved(&mut self, workout: Workout) {
        self.workout = workout;
        self.persisted = true;
    }

    pub(crate) fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    /// Append a snapshot of the exercise and return its position.
    pub fn add_exercise(&mut self, exercise: &Exercise) -> usize {
        self.workout
            .exercises
            .push(WorkoutExercise::snapshot(exercise));
        self.workout.exercises.len() - 1
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<WorkoutExercise> {
        (index < self.workout.exercises.len()).then(|| self.workout.exercises.remove(index))
    }

    pub fn set_notes(&mut self, index: usize, notes: impl Into<String>) -> bool {
        let Some(exercise) = self.workout.exercises.get_mut(index) else {
            return false;
        };
        exercise.notes = notes.into();
        true
    }

    /// Append a set to an exercise. The id of the set is derived from the current time.
    pub fn add_set(
        &mut self,
        index: usize,
        weight: f64,
        reps: u32,
        now: DateTime<Utc>,
    ) -> Option<SetID> {
        let exercise = self.workout.exercises.get_mut(index)?;
        let id = SetID::at(now);
        exercise.sets.push(WorkoutSet { id, weight, reps });
        Some(id)
    }

    pub fn update_set(&mut self, index: usize, set_id: SetID, weight: f64, reps: u32) -> bool {
        let Some(set) = self
            .workout
            .exercises
            .get_mut(index)
            .and_then(|e| e.sets.iter_mut().find(|s| s.id == set_id))
        else {
            return false;
        };
        set.weight = weight;
        set.reps = reps;
        true
    }

    pub fn remove_set(&mut self, index: usize, set_id: SetID) -> bool {
        let Some(exercise) = self.workout.exercises.get_mut(index) else {
            return false;
        };
        let len = exercise.sets.len();
        exercise.sets.retain(|s| s.id != set_id);
        exercise.sets.len() != len
    }
}

/// Action triggered from outside of the workout editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutCommand {
    Save,
    Delete,
    AddExercise(ExerciseID),
}
