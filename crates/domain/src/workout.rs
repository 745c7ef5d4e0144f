use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};

use crate::{
    CreateError, DeleteError, Exercise, ExerciseHistory, ExerciseID, MuscleGroup, ReadError,
    UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn get_exercise_history(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseHistory, ReadError> {
        Ok(ExerciseHistory::new(&self.get_workouts().await?, exercise_id))
    }
}

/// Persistence of the workout collection.
///
/// `create_workout` replaces the provisional id of the given workout by `max(existing) + 1`.
/// `replace_workout` appends the workout unchanged if no workout with its id exists.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn exercise_history(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseHistory, ReadError> {
        Ok(ExerciseHistory::new(&self.read_workouts().await?, exercise_id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub created_date: DateTime<Utc>,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    /// Empty workout with a provisional id derived from the creation time.
    #[must_use]
    pub fn new(created_date: DateTime<Utc>) -> Self {
        Self {
            id: WorkoutID::provisional(created_date),
            created_date,
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn contains(&self, exercise_id: ExerciseID) -> bool {
        self.exercises.iter().any(|e| e.id == exercise_id)
    }

    /// First instance of the exercise in this workout.
    #[must_use]
    pub fn exercise(&self, exercise_id: ExerciseID) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    /// A workout is complete if it has at least one exercise and every exercise has a set.
    pub fn check_complete(&self) -> Result<(), Incomplete> {
        if self.exercises.is_empty() {
            return Err(Incomplete::NoExercises);
        }
        let without_sets = self.exercises.iter().filter(|e| e.sets.is_empty()).count();
        if without_sets > 0 {
            return Err(Incomplete::ExercisesWithoutSets(without_sets));
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Incomplete {
    #[error("Add at least one exercise to save this workout")]
    NoExercises,
    #[error(
        "{0} exercise(s) have no sets, add at least one set to each exercise or remove them"
    )]
    ExercisesWithoutSets(usize),
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(u64);

impl WorkoutID {
    pub fn next(ids: impl Iterator<Item = WorkoutID>) -> Option<Self> {
        ids.map(|id| id.0).max().unwrap_or(0).checked_add(1).map(Self)
    }

    /// Placeholder id of a workout that has not been stored yet.
    #[must_use]
    pub fn provisional(time: DateTime<Utc>) -> Self {
        Self(u64::try_from(time.timestamp_millis()).unwrap_or_default())
    }
}

impl From<u64> for WorkoutID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Copy of an exercise taken when it was added to a workout.
///
/// Later changes of the exercise itself are not reflected here.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: ExerciseID,
    pub name: String,
    pub primary_muscle_group: MuscleGroup,
    pub secondary_muscle_group: Option<MuscleGroup>,
    pub notes: String,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutExercise {
    #[must_use]
    pub fn snapshot(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.to_string(),
            primary_muscle_group: exercise.primary_muscle_group.clone(),
            secondary_muscle_group: exercise.secondary_muscle_group.clone(),
            notes: String::new(),
            sets: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub id: SetID,
    pub weight: f64,
    pub reps: u32,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(u64);

impl SetID {
    /// Time-based id, unique as long as at most one set per millisecond is added.
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self(u64::try_from(time.timestamp_millis()).unwrap_or_default())
    }
}

impl From<u64> for SetID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::Name;

    fn time(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn workout_exercise(id: u64, weights: &[f64]) -> WorkoutExercise {
        WorkoutExercise {
            id: id.into(),
            name: format!("Exercise {id}"),
            primary_muscle_group: MuscleGroup::Chest,
            secondary_muscle_group: None,
            notes: String::new(),
            sets: weights
                .iter()
                .enumerate()
                .map(|(i, w)| WorkoutSet {
                    id: (i as u64 + 1).into(),
                    weight: *w,
                    reps: 5,
                })
                .collect(),
        }
    }

    #[test]
    fn test_workout_new() {
        let workout = Workout::new(time(1_700_000_000_123));
        assert_eq!(workout.id, WorkoutID::from(1_700_000_000_123));
        assert_eq!(workout.created_date, time(1_700_000_000_123));
        assert!(workout.exercises.is_empty());
    }

    #[rstest]
    #[case(&[], 1)]
    #[case(&[1, 3], 4)]
    #[case(&[1_700_000_000_000, 2], 1_700_000_000_001)]
    #[case(&[u64::MAX - 1], u64::MAX)]
    fn test_workout_id_next(#[case] ids: &[u64], #[case] expected: u64) {
        assert_eq!(
            WorkoutID::next(ids.iter().copied().map(WorkoutID::from)),
            Some(WorkoutID::from(expected))
        );
    }

    #[test]
    fn test_workout_id_next_exhausted() {
        assert_eq!(
            WorkoutID::next([1, u64::MAX].into_iter().map(WorkoutID::from)),
            None
        );
    }

    #[test]
    fn test_workout_id_provisional_before_epoch() {
        assert_eq!(WorkoutID::provisional(time(-1)), WorkoutID::default());
    }

    #[rstest]
    #[case::no_exercises(vec![], Err(Incomplete::NoExercises))]
    #[case::without_sets(
        vec![workout_exercise(1, &[50.0]), workout_exercise(2, &[]), workout_exercise(3, &[])],
        Err(Incomplete::ExercisesWithoutSets(2))
    )]
    #[case::complete(vec![workout_exercise(1, &[50.0])], Ok(()))]
    fn test_workout_check_complete(
        #[case] exercises: Vec<WorkoutExercise>,
        #[case] expected: Result<(), Incomplete>,
    ) {
        let workout = Workout {
            exercises,
            ..Workout::new(time(0))
        };
        assert_eq!(workout.check_complete(), expected);
    }

    #[test]
    fn test_workout_exercise_lookup() {
        let workout = Workout {
            exercises: vec![
                workout_exercise(1, &[10.0]),
                workout_exercise(2, &[20.0]),
                workout_exercise(1, &[30.0]),
            ],
            ..Workout::new(time(0))
        };
        assert!(workout.contains(1.into()));
        assert!(!workout.contains(3.into()));
        assert_eq!(workout.exercise(1.into()).unwrap().sets[0].weight, 10.0);
    }

    #[test]
    fn test_workout_exercise_snapshot() {
        let exercise = Exercise {
            id: 7.into(),
            name: Name::new("Face Pull").unwrap(),
            primary_muscle_group: MuscleGroup::RearDelts,
            secondary_muscle_group: Some(MuscleGroup::Traps),
        };
        assert_eq!(
            WorkoutExercise::snapshot(&exercise),
            WorkoutExercise {
                id: 7.into(),
                name: "Face Pull".to_string(),
                primary_muscle_group: MuscleGroup::RearDelts,
                secondary_muscle_group: Some(MuscleGroup::Traps),
                notes: String::new(),
                sets: vec![],
            }
        );
    }

    #[test]
    fn test_set_id_at() {
        assert_eq!(SetID::at(time(5)), SetID::from(5));
    }
}
