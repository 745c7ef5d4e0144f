use log::error;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseHistory, ExerciseID, ExerciseRepository,
    ExerciseService, NewExercise, ReadError, UpdateError, Workout, WorkoutID, WorkoutRepository,
    WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(self.repository.read_exercises(), "get", "exercises")
    }

    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            "create",
            "exercise"
        )
    }

    async fn update_exercise(
        &self,
        id: ExerciseID,
        exercise: NewExercise,
    ) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.update_exercise(id, exercise),
            "update",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(self.repository.delete_exercise(id), "delete", "exercise")
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_workouts(), "get", "workouts")
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(self.repository.delete_workout(id), "delete", "workout")
    }

    async fn get_exercise_history(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseHistory, ReadError> {
        log_on_error!(
            self.repository.exercise_history(exercise_id),
            "get",
            "exercise history"
        )
    }
}
