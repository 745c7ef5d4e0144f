//! One-shot rewrite of stored muscle group tags into the current vocabulary.

use liftlog_domain::{ReadError, StorageError};
use log::{debug, info};
use serde_json::Value;

use crate::{Key, KeyValueRepository, KeyValueStore};

/// Muscle group tags of the previous app version and their replacements.
///
/// No replacement is itself a legacy tag, so remapping an already remapped tag is a no-op.
pub const LEGACY_MUSCLE_GROUPS: [(&str, &str); 6] = [
    ("rear_delts", "rear delts"),
    ("full_body", "full body"),
    ("obliques", "abs"),
    ("core", "abs"),
    ("hip_flexors", "quads"),
    ("posterior_chain", "hamstrings"),
];

const MUSCLE_GROUP_FIELDS: [&str; 2] = ["primary_muscle_group_id", "secondary_muscle_group_id"];

#[must_use]
pub fn remap_muscle_group(tag: &str) -> Option<&'static str> {
    LEGACY_MUSCLE_GROUPS
        .iter()
        .find(|(legacy, _)| *legacy == tag)
        .map(|(_, current)| *current)
}

/// Replace legacy tags in the muscle group fields of an exercise or workout exercise record.
///
/// Returns whether the record has been changed. Fields that are missing, null or not a legacy
/// tag stay as they are.
pub(crate) fn remap_exercise(record: &mut Value) -> bool {
    let mut changed = false;
    for field in MUSCLE_GROUP_FIELDS {
        if let Some(value) = record.get_mut(field) {
            if let Some(current) = value.as_str().and_then(remap_muscle_group) {
                *value = Value::from(current);
                changed = true;
            }
        }
    }
    changed
}

/// Replace legacy tags in all exercises embedded in a workout record.
pub(crate) fn remap_workout(record: &mut Value) -> bool {
    let Some(exercises) = record.get_mut("exercises").and_then(Value::as_array_mut) else {
        return false;
    };
    exercises
        .iter_mut()
        .map(remap_exercise)
        .fold(false, |changed, c| changed | c)
}

/// Remap all records of an array, returning the number of changed records.
pub(crate) fn remap_all(records: &mut [Value], remap: fn(&mut Value) -> bool) -> usize {
    records.iter_mut().map(remap).filter(|changed| *changed).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    AlreadyDone,
    Applied { exercises: usize, workouts: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rewrite legacy muscle group tags of all stored exercises and workouts.
///
/// The migration is marked as done only after both collections have been stored. If any step
/// fails, the next run starts over, which is safe as the remapping is idempotent. Collections
/// without legacy tags are not written, so an empty store stays empty.
pub async fn migrate_muscle_groups<S: KeyValueStore>(
    repository: &KeyValueRepository<S>,
) -> Result<Migration, MigrationError> {
    let _locks = repository.lock_all().await;
    let store = repository.store();

    if store.get(Key::MigrationV1Done.as_ref()).await?.is_some() {
        debug!("muscle group migration already done");
        return Ok(Migration::AlreadyDone);
    }

    let mut exercises = repository.read_records::<Value>(Key::Exercises).await?;
    let changed_exercises = remap_all(&mut exercises, remap_exercise);
    if changed_exercises > 0 {
        repository
            .write_records(Key::Exercises, &exercises)
            .await?;
    }

    let mut workouts = repository.read_records::<Value>(Key::Workouts).await?;
    let changed_workouts = remap_all(&mut workouts, remap_workout);
    if changed_workouts > 0 {
        repository.write_records(Key::Workouts, &workouts).await?;
    }

    store.set(Key::MigrationV1Done.as_ref(), "true").await?;

    info!(
        "migrated muscle groups of {changed_exercises} exercises and {changed_workouts} workouts"
    );

    Ok(Migration::Applied {
        exercises: changed_exercises,
        workouts: changed_workouts,
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use liftlog_domain::{ExerciseRepository, MuscleGroup, WorkoutRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::{
        memory::MemoryStore,
        tests::{
            FaultyStore,
            data::{LEGACY_EXERCISES, LEGACY_WORKOUTS},
        },
    };

    async fn legacy_repository<S: KeyValueStore>(store: S) -> KeyValueRepository<S> {
        store.set("exercises", LEGACY_EXERCISES).await.unwrap();
        store.set("workouts", LEGACY_WORKOUTS).await.unwrap();
        KeyValueRepository::new(store)
    }

    #[rstest]
    #[case("obliques", Some("abs"))]
    #[case("core", Some("abs"))]
    #[case("rear_delts", Some("rear delts"))]
    #[case("full_body", Some("full body"))]
    #[case("hip_flexors", Some("quads"))]
    #[case("posterior_chain", Some("hamstrings"))]
    #[case("chest", None)]
    #[case("abs", None)]
    #[case("rear delts", None)]
    #[case("cardio", None)]
    fn test_remap_muscle_group(#[case] tag: &str, #[case] expected: Option<&str>) {
        assert_eq!(remap_muscle_group(tag), expected);
    }

    #[test]
    fn test_legacy_table_is_idempotent() {
        for (_, current) in LEGACY_MUSCLE_GROUPS {
            assert_eq!(remap_muscle_group(current), None);
        }
    }

    #[test]
    fn test_remap_exercise() {
        let mut record = json!({
            "id": 1,
            "name": "Side Plank",
            "primary_muscle_group_id": "obliques",
            "secondary_muscle_group_id": null
        });

        assert!(remap_exercise(&mut record));
        assert_eq!(record["primary_muscle_group_id"], json!("abs"));
        assert_eq!(record["secondary_muscle_group_id"], json!(null));
        assert!(!remap_exercise(&mut record));
    }

    #[test]
    fn test_remap_workout_without_exercises() {
        let mut record = json!({ "id": 1, "created_date": 0 });

        assert!(!remap_workout(&mut record));
        assert_eq!(record, json!({ "id": 1, "created_date": 0 }));
    }

    #[test]
    fn test_migrate_legacy_data() {
        block_on(async {
            let repository = legacy_repository(MemoryStore::new()).await;

            assert_eq!(
                migrate_muscle_groups(&repository).await.unwrap(),
                Migration::Applied {
                    exercises: 3,
                    workouts: 1
                }
            );

            let exercises = repository.read_exercises().await.unwrap();
            assert_eq!(
                exercises
                    .iter()
                    .map(|e| (
                        e.primary_muscle_group.clone(),
                        e.secondary_muscle_group.clone()
                    ))
                    .collect::<Vec<_>>(),
                vec![
                    (MuscleGroup::Chest, Some(MuscleGroup::Triceps)),
                    (MuscleGroup::Abs, Some(MuscleGroup::Abs)),
                    (MuscleGroup::RearDelts, None),
                    (
                        MuscleGroup::FullBody,
                        Some(MuscleGroup::Other("cardio".to_string()))
                    ),
                ]
            );

            let workouts = repository.read_workouts().await.unwrap();
            let exercises = &workouts[0].exercises;
            assert_eq!(exercises[0].primary_muscle_group, MuscleGroup::Abs);
            assert_eq!(exercises[0].secondary_muscle_group, Some(MuscleGroup::Abs));
            assert_eq!(exercises[0].sets.len(), 1);
            assert_eq!(exercises[0].sets[0].reps, 12);
            assert_eq!(exercises[1].primary_muscle_group, MuscleGroup::RearDelts);
            assert_eq!(exercises[1].notes, "slow");

            assert_eq!(
                repository
                    .store()
                    .get("migration_v1_done")
                    .await
                    .unwrap()
                    .as_deref(),
                Some("true")
            );
        });
    }

    #[test]
    fn test_migrate_twice() {
        block_on(async {
            let repository = legacy_repository(MemoryStore::new()).await;

            migrate_muscle_groups(&repository).await.unwrap();
            let exercises = repository.store().get("exercises").await.unwrap();
            let workouts = repository.store().get("workouts").await.unwrap();

            assert_eq!(
                migrate_muscle_groups(&repository).await.unwrap(),
                Migration::AlreadyDone
            );

            repository
                .store()
                .remove(&["migration_v1_done"])
                .await
                .unwrap();

            assert_eq!(
                migrate_muscle_groups(&repository).await.unwrap(),
                Migration::Applied {
                    exercises: 0,
                    workouts: 0
                }
            );
            assert_eq!(repository.store().get("exercises").await.unwrap(), exercises);
            assert_eq!(repository.store().get("workouts").await.unwrap(), workouts);
        });
    }

    #[test]
    fn test_migrate_empty_store() {
        let repository = KeyValueRepository::new(MemoryStore::new());

        block_on(async {
            assert_eq!(
                migrate_muscle_groups(&repository).await.unwrap(),
                Migration::Applied {
                    exercises: 0,
                    workouts: 0
                }
            );
            assert_eq!(
                repository.store().list_keys().await.unwrap(),
                vec!["migration_v1_done"]
            );
            assert!(repository.seed_exercises_if_empty().await.unwrap());
        });
    }

    #[test]
    fn test_migrate_interrupted() {
        block_on(async {
            let repository = legacy_repository(FaultyStore::default()).await;
            repository.store().fail_writes_of(Some("workouts"));

            assert!(matches!(
                migrate_muscle_groups(&repository).await,
                Err(MigrationError::Storage(StorageError::QuotaExceeded))
            ));
            assert_eq!(
                repository.store().get("migration_v1_done").await.unwrap(),
                None
            );
            assert_eq!(
                repository.store().get("workouts").await.unwrap().as_deref(),
                Some(LEGACY_WORKOUTS)
            );

            repository.store().fail_writes_of(None);

            assert_eq!(
                migrate_muscle_groups(&repository).await.unwrap(),
                Migration::Applied {
                    exercises: 0,
                    workouts: 1
                }
            );
            assert_eq!(
                repository.read_workouts().await.unwrap()[0].exercises[0].primary_muscle_group,
                MuscleGroup::Abs
            );
        });
    }

    #[test]
    fn test_migrate_unavailable_store() {
        block_on(async {
            let repository = legacy_repository(FaultyStore::default()).await;
            repository.store().set_unavailable(true);

            assert!(matches!(
                migrate_muscle_groups(&repository).await,
                Err(MigrationError::Storage(StorageError::Unavailable(_)))
            ));
        });
    }
}
