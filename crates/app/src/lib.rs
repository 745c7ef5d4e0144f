#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Entry point for user interfaces: all operations on exercises, workouts, backups and settings.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
use chrono::Utc;
use liftlog_domain::{
    CreateError, DeleteError, Exercise, ExerciseHistory, ExerciseID, ExerciseService,
    Incomplete, Name, NewExercise, ReadError, Service, UpdateError, ValidationError, Workout,
    WorkoutID, WorkoutService,
};
#[cfg(not(target_arch = "wasm32"))]
use liftlog_storage::fs::FileStore;
#[cfg(target_arch = "wasm32")]
use liftlog_storage::local_storage::LocalStorage;
use liftlog_storage::{
    KeyValueRepository, KeyValueStore,
    backup::{BackupError, BackupService, DocumentPicker, Imported, ShareTarget},
    migration::{Migration, migrate_muscle_groups},
};
use ::log::{error, info};

mod draft;
pub mod log;
mod service;
mod settings;

pub use draft::*;
pub use settings::*;

pub struct App<S> {
    service: Service<KeyValueRepository<S>>,
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Incomplete(#[from] Incomplete),
    #[error("exercise {0} not found")]
    UnknownExercise(ExerciseID),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Saved(Workout),
    /// Id of the deleted workout, `None` if the draft had not been stored.
    Deleted(Option<WorkoutID>),
    ExerciseAdded(usize),
}

#[cfg(not(target_arch = "wasm32"))]
impl App<FileStore> {
    /// Application storing its data in the given directory.
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self::new(FileStore::new(dir)))
    }
}

#[cfg(target_arch = "wasm32")]
impl App<LocalStorage> {
    #[must_use]
    pub fn local() -> Self {
        Self::new(LocalStorage)
    }
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: S) -> Self {
        Self {
            service: Service::new(KeyValueRepository::new(store)),
        }
    }

    pub fn repository(&self) -> &KeyValueRepository<S> {
        self.service.repository()
    }

    /// Prepare the stored data for use. Must be called before any other operation.
    ///
    /// Failures are logged and otherwise ignored, so that the app stays usable with whatever
    /// data is available.
    pub async fn start(&self) {
        match migrate_muscle_groups(self.repository()).await {
            Ok(Migration::AlreadyDone) => {}
            Ok(Migration::Applied {
                exercises,
                workouts,
            }) => info!("migration applied ({exercises} exercises, {workouts} workouts)"),
            Err(err) => error!("failed to migrate muscle groups: {err}"),
        }
        if let Err(err) = self.seed_exercises_if_empty().await {
            error!("failed to seed exercises: {err}");
        }
    }

    pub async fn load_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        self.service.get_exercises().await
    }

    pub async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError> {
        self.service.create_exercise(exercise).await
    }

    pub async fn update_exercise(
        &self,
        id: ExerciseID,
        exercise: NewExercise,
    ) -> Result<(), UpdateError> {
        self.service.update_exercise(id, exercise).await
    }

    pub async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        self.service.delete_exercise(id).await
    }

    pub fn validate_exercise_name(&self, name: &str) -> Result<Name, ValidationError> {
        self.service.validate_exercise_name(name)
    }

    pub async fn load_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        self.service.get_workouts().await
    }

    /// Store a new workout. The provisional id of the workout is replaced by the next free id.
    pub async fn save_new_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        self.service.create_workout(workout).await
    }

    pub async fn update_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        self.service.replace_workout(workout).await
    }

    pub async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        self.service.delete_workout(id).await
    }

    pub async fn get_exercise_history(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseHistory, ReadError> {
        self.service.get_exercise_history(exercise_id).await
    }

    pub async fn export_data(&self, target: &impl ShareTarget) -> Result<(), BackupError> {
        BackupService::new(self.repository())
            .export_data(target)
            .await
            .inspect_err(|err| error!("failed to export data: {err}"))
    }

    pub async fn import_data(&self, picker: &impl DocumentPicker) -> Result<Imported, BackupError> {
        BackupService::new(self.repository())
            .import_data(picker)
            .await
            .inspect_err(|err| match err {
                BackupError::Cancelled => info!("import cancelled"),
                err => error!("failed to import data: {err}"),
            })
    }

    pub async fn seed_exercises_if_empty(&self) -> Result<bool, CreateError> {
        self.repository().seed_exercises_if_empty().await
    }

    pub async fn clear_all_data(&self) -> Result<(), DeleteError> {
        self.repository()
            .clear_all_data()
            .await
            .inspect_err(|err| error!("failed to clear data: {err}"))
    }

    pub async fn get_settings(&self) -> Result<Settings, ReadError> {
        self.service.get_settings().await
    }

    pub async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        self.service.set_settings(settings).await
    }

    /// Execute a command on a workout draft.
    ///
    /// Saving requires a complete workout and stores a new draft as a new workout. Deleting
    /// removes the workout if it has been stored and starts a new draft in any case.
    pub async fn apply(
        &self,
        draft: &mut WorkoutDraft,
        command: WorkoutCommand,
    ) -> Result<CommandOutcome, CommandError> {
        match command {
            WorkoutCommand::Save => {
                draft.workout().check_complete()?;
                let workout = if draft.is_new() {
                    self.save_new_workout(draft.workout().clone()).await?
                } else {
                    self.update_workout(draft.workout().clone()).await?
                };
                draft.saved(workout.clone());
                Ok(CommandOutcome::Saved(workout))
            }
            WorkoutCommand::Delete => {
                let id = if draft.is_new() {
                    None
                } else {
                    Some(self.delete_workout(draft.workout().id).await?)
                };
                draft.reset(Utc::now());
                Ok(CommandOutcome::Deleted(id))
            }
            WorkoutCommand::AddExercise(exercise_id) => {
                let exercises = self.load_exercises().await?;
                let exercise = exercises
                    .iter()
                    .find(|e| e.id == exercise_id)
                    .ok_or(CommandError::UnknownExercise(exercise_id))?;
                Ok(CommandOutcome::ExerciseAdded(draft.add_exercise(exercise)))
            }
        }
    }
}
