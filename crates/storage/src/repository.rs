use futures_util::lock::{Mutex, MutexGuard};
use liftlog_domain::{self as domain, CreateError, DeleteError, ReadError, StorageError, UpdateError};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};

use crate::{Key, KeyValueStore, record};

/// Exercise and workout repository on top of a key-value store.
///
/// Each collection is guarded by its own lock, which is held from loading the collection until
/// the modified collection has been stored. Operations on one collection are therefore applied
/// one after another. Other processes writing to the same store are not detected.
pub struct KeyValueRepository<S> {
    store: S,
    exercises: Mutex<()>,
    workouts: Mutex<()>,
}

pub(crate) struct Locks<'a> {
    _exercises: MutexGuard<'a, ()>,
    _workouts: MutexGuard<'a, ()>,
}

impl<S: KeyValueStore> KeyValueRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            exercises: Mutex::new(()),
            workouts: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Acquire the locks of both collections, always in the same order.
    pub(crate) async fn lock_all(&self) -> Locks<'_> {
        let exercises = self.exercises.lock().await;
        let workouts = self.workouts.lock().await;
        Locks {
            _exercises: exercises,
            _workouts: workouts,
        }
    }

    /// Load a collection. A missing or empty value is an empty collection.
    pub(crate) async fn read_records<T: DeserializeOwned>(
        &self,
        key: Key,
    ) -> Result<Vec<T>, ReadError> {
        match self.store.get(key.as_ref()).await? {
            Some(json) if !json.is_empty() => Ok(serde_json::from_str(&json)
                .map_err(|err| ReadError::Other(Box::new(err)))?),
            _ => Ok(vec![]),
        }
    }

    pub(crate) async fn write_records<T: Serialize>(
        &self,
        key: Key,
        records: &[T],
    ) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(records).map_err(|err| StorageError::Other(Box::new(err)))?;
        self.store.set(key.as_ref(), &json).await
    }

    /// Store the built-in exercises if no exercise collection has been stored yet.
    ///
    /// An existing collection is never touched, even if it is empty. Returns whether the
    /// catalog has been stored.
    pub async fn seed_exercises_if_empty(&self) -> Result<bool, CreateError> {
        let _lock = self.exercises.lock().await;
        if let Some(json) = self.store.get(Key::Exercises.as_ref()).await? {
            if !json.is_empty() {
                debug!("exercises already present, skipping seed");
                return Ok(false);
            }
        }
        let exercises = domain::catalog::new_exercises()
            .zip(1_u64..)
            .map(|(exercise, id)| {
                record::Exercise::from(&domain::Exercise::with_id(
                    domain::ExerciseID::from(id),
                    exercise,
                ))
            })
            .collect::<Vec<_>>();
        self.write_records(Key::Exercises, &exercises).await?;
        debug!("seeded {} exercises", exercises.len());
        Ok(true)
    }

    /// Remove all stored values, including settings and the migration state.
    pub async fn clear_all_data(&self) -> Result<(), DeleteError> {
        let _locks = self.lock_all().await;
        self.store.clear().await?;
        Ok(())
    }
}

impl<S: KeyValueStore> domain::ExerciseRepository for KeyValueRepository<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, ReadError> {
        Ok(self
            .read_records::<record::Exercise>(Key::Exercises)
            .await?
            .into_iter()
            .map(domain::Exercise::from)
            .collect())
    }

    async fn create_exercise(
        &self,
        exercise: domain::NewExercise,
    ) -> Result<domain::Exercise, CreateError> {
        let _lock = self.exercises.lock().await;
        let mut records = self.read_records::<record::Exercise>(Key::Exercises).await?;
        let id = domain::ExerciseID::next(records.iter().map(|e| e.id.into()))
            .ok_or(CreateError::IdsExhausted)?;
        let exercise = domain::Exercise::with_id(id, exercise);
        records.push(record::Exercise::from(&exercise));
        self.write_records(Key::Exercises, &records).await?;
        Ok(exercise)
    }

    async fn update_exercise(
        &self,
        id: domain::ExerciseID,
        exercise: domain::NewExercise,
    ) -> Result<(), UpdateError> {
        let _lock = self.exercises.lock().await;
        let mut records = self.read_records::<record::Exercise>(Key::Exercises).await?;
        let Some(record) = records.iter_mut().find(|e| e.id == *id) else {
            debug!("exercise {id} not found, nothing to update");
            return Ok(());
        };
        *record = record::Exercise::from(&domain::Exercise::with_id(id, exercise));
        self.write_records(Key::Exercises, &records).await?;
        Ok(())
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, DeleteError> {
        let _lock = self.exercises.lock().await;
        let mut records = self.read_records::<record::Exercise>(Key::Exercises).await?;
        let len = records.len();
        records.retain(|e| e.id != *id);
        if records.len() == len {
            debug!("exercise {id} not found, nothing to delete");
            return Ok(id);
        }
        self.write_records(Key::Exercises, &records).await?;
        Ok(id)
    }
}

impl<S: KeyValueStore> domain::WorkoutRepository for KeyValueRepository<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, ReadError> {
        self.read_records::<record::Workout>(Key::Workouts)
            .await?
            .into_iter()
            .map(|w| domain::Workout::try_from(w).map_err(|err| ReadError::Other(Box::new(err))))
            .collect()
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, CreateError> {
        let _lock = self.workouts.lock().await;
        let mut records = self.read_records::<record::Workout>(Key::Workouts).await?;
        let workout = domain::Workout {
            id: domain::WorkoutID::next(records.iter().map(|w| w.id.into()))
                .ok_or(CreateError::IdsExhausted)?,
            ..workout
        };
        records.push(record::Workout::from(&workout));
        self.write_records(Key::Workouts, &records).await?;
        Ok(workout)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, UpdateError> {
        let _lock = self.workouts.lock().await;
        let mut records = self.read_records::<record::Workout>(Key::Workouts).await?;
        let replacement = record::Workout::from(&workout);
        if let Some(record) = records.iter_mut().find(|w| w.id == *workout.id) {
            *record = replacement;
        } else {
            debug!("workout {} not found, adding it", workout.id);
            records.push(replacement);
        }
        self.write_records(Key::Workouts, &records).await?;
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, DeleteError> {
        let _lock = self.workouts.lock().await;
        let mut records = self.read_records::<record::Workout>(Key::Workouts).await?;
        let len = records.len();
        records.retain(|w| w.id != *id);
        if records.len() == len {
            debug!("workout {id} not found, nothing to delete");
            return Ok(id);
        }
        self.write_records(Key::Workouts, &records).await?;
        Ok(id)
    }
}
