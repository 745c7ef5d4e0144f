use derive_more::{Deref, Display};

use crate::{
    CreateError, DeleteError, MuscleGroup, Name, ReadError, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn update_exercise(
        &self,
        id: ExerciseID,
        exercise: NewExercise,
    ) -> Result<(), UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    fn validate_exercise_name(&self, name: &str) -> Result<Name, ValidationError> {
        Name::new(name).map_err(|err| ValidationError::Other(err.into()))
    }
}

/// Persistence of the exercise collection.
///
/// Implementations assign ids on creation (`max(existing) + 1`, starting at 1). Updating or
/// deleting an unknown id is not an error and leaves the collection unchanged.
#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn update_exercise(
        &self,
        id: ExerciseID,
        exercise: NewExercise,
    ) -> Result<(), UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub primary_muscle_group: MuscleGroup,
    pub secondary_muscle_group: Option<MuscleGroup>,
}

impl Exercise {
    #[must_use]
    pub fn with_id(id: ExerciseID, exercise: NewExercise) -> Self {
        Self {
            id,
            name: exercise.name,
            primary_muscle_group: exercise.primary_muscle_group,
            secondary_muscle_group: exercise.secondary_muscle_group,
        }
    }

    #[must_use]
    pub fn trains(&self, muscle_group: &MuscleGroup) -> bool {
        self.primary_muscle_group == *muscle_group
            || self.secondary_muscle_group.as_ref() == Some(muscle_group)
    }
}

/// Exercise data before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub name: Name,
    pub primary_muscle_group: MuscleGroup,
    pub secondary_muscle_group: Option<MuscleGroup>,
}

impl From<Exercise> for NewExercise {
    fn from(value: Exercise) -> Self {
        Self {
            name: value.name,
            primary_muscle_group: value.primary_muscle_group,
            secondary_muscle_group: value.secondary_muscle_group,
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u64);

impl ExerciseID {
    /// Id following the greatest of the given ids, 1 if there are none. `None` if the greatest id
    /// is `u64::MAX`.
    pub fn next(ids: impl Iterator<Item = ExerciseID>) -> Option<Self> {
        ids.map(|id| id.0).max().unwrap_or(0).checked_add(1).map(Self)
    }
}

impl From<u64> for ExerciseID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub name: String,
    pub muscle_group: Option<MuscleGroup>,
}

impl ExerciseFilter {
    pub fn exercises<'a>(&self, exercises: impl Iterator<Item = &'a Exercise>) -> Vec<&'a Exercise> {
        let name = self.name.trim().to_lowercase();
        exercises
            .filter(|e| name.is_empty() || e.name.as_str().to_lowercase().contains(&name))
            .filter(|e| self.muscle_group.as_ref().is_none_or(|m| e.trains(m)))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.muscle_group.is_none()
    }

    pub fn toggle_muscle_group(&mut self, muscle_group: MuscleGroup) {
        if self.muscle_group.as_ref() == Some(&muscle_group) {
            self.muscle_group = None;
        } else {
            self.muscle_group = Some(muscle_group);
        }
    }
}
