use crate::{MuscleGroup, Name, NewExercise};

/// Built-in exercise used to populate an empty exercise collection.
pub struct Exercise {
    pub name: &'static str,
    pub primary_muscle_group: MuscleGroup,
    pub secondary_muscle_group: Option<MuscleGroup>,
}

const fn exercise(
    name: &'static str,
    primary_muscle_group: MuscleGroup,
    secondary_muscle_group: Option<MuscleGroup>,
) -> Exercise {
    Exercise {
        name,
        primary_muscle_group,
        secondary_muscle_group,
    }
}

pub static EXERCISES: [Exercise; 24] = [
    exercise("Bench Press", MuscleGroup::Chest, Some(MuscleGroup::Triceps)),
    exercise("Incline Dumbbell Press", MuscleGroup::Chest, Some(MuscleGroup::Shoulders)),
    exercise("Cable Fly", MuscleGroup::Chest, None),
    exercise("Dip", MuscleGroup::Triceps, Some(MuscleGroup::Chest)),
    exercise("Pull Up", MuscleGroup::Back, Some(MuscleGroup::Biceps)),
    exercise("Barbell Row", MuscleGroup::Back, Some(MuscleGroup::RearDelts)),
    exercise("Lat Pulldown", MuscleGroup::Back, Some(MuscleGroup::Biceps)),
    exercise("Deadlift", MuscleGroup::Back, Some(MuscleGroup::Hamstrings)),
    exercise("Overhead Press", MuscleGroup::Shoulders, Some(MuscleGroup::Triceps)),
    exercise("Lateral Raise", MuscleGroup::Shoulders, None),
    exercise("Face Pull", MuscleGroup::RearDelts, Some(MuscleGroup::Traps)),
    exercise("Shrug", MuscleGroup::Traps, Some(MuscleGroup::Forearms)),
    exercise("Barbell Curl", MuscleGroup::Biceps, Some(MuscleGroup::Forearms)),
    exercise("Hammer Curl", MuscleGroup::Biceps, Some(MuscleGroup::Forearms)),
    exercise("Triceps Pushdown", MuscleGroup::Triceps, None),
    exercise("Wrist Curl", MuscleGroup::Forearms, None),
    exercise("Squat", MuscleGroup::Quads, Some(MuscleGroup::Glutes)),
    exercise("Leg Press", MuscleGroup::Quads, Some(MuscleGroup::Glutes)),
    exercise("Romanian Deadlift", MuscleGroup::Hamstrings, Some(MuscleGroup::Glutes)),
    exercise("Leg Curl", MuscleGroup::Hamstrings, None),
    exercise("Hip Thrust", MuscleGroup::Glutes, Some(MuscleGroup::Hamstrings)),
    exercise("Standing Calf Raise", MuscleGroup::Calves, None),
    exercise("Hanging Leg Raise", MuscleGroup::Abs, None),
    exercise("Burpee", MuscleGroup::FullBody, None),
];

/// Catalog entries in catalog order, ready to be stored with ids `1..=N`.
pub fn new_exercises() -> impl Iterator<Item = NewExercise> {
    EXERCISES.iter().filter_map(|e| {
        Some(NewExercise {
            name: Name::new(e.name).ok()?,
            primary_muscle_group: e.primary_muscle_group.clone(),
            secondary_muscle_group: e.secondary_muscle_group.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_exercises() {
        assert_eq!(new_exercises().count(), EXERCISES.len());
    }

    #[test]
    fn test_exercise_names_unique() {
        assert_eq!(
            EXERCISES.iter().map(|e| e.name).collect::<BTreeSet<_>>().len(),
            EXERCISES.len()
        );
    }

    #[test]
    fn test_exercises_use_current_vocabulary() {
        assert!(EXERCISES.iter().all(|e| {
            e.primary_muscle_group.is_known()
                && e.secondary_muscle_group.as_ref().is_none_or(MuscleGroup::is_known)
        }));
    }

    #[test]
    fn test_every_muscle_group_has_exercise() {
        for muscle_group in MuscleGroup::iter() {
            assert!(
                EXERCISES.iter().any(|e| e.primary_muscle_group == *muscle_group),
                "{muscle_group}"
            );
        }
    }
}
