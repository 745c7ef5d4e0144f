use crate::{ExerciseID, Workout, WorkoutSet};

/// Number of most recent workouts shown in an exercise history.
pub const RECENT_WORKOUTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseHistory {
    pub pr_set: Option<WorkoutSet>,
    pub recent_workouts: Vec<Workout>,
}

impl ExerciseHistory {
    /// Derive the history of an exercise from all workouts.
    ///
    /// The recent workouts are limited to the latest [`RECENT_WORKOUTS`], while the personal
    /// record is searched in all workouts containing the exercise. Workouts with equal creation
    /// dates keep their stored order. Of several sets with the same weight, the first one seen
    /// (newest workout first) is the record.
    #[must_use]
    pub fn new(workouts: &[Workout], exercise_id: ExerciseID) -> Self {
        let mut relevant_workouts = workouts
            .iter()
            .filter(|w| w.contains(exercise_id))
            .collect::<Vec<_>>();
        relevant_workouts.sort_by(|a, b| b.created_date.cmp(&a.created_date));

        let mut pr_set: Option<WorkoutSet> = None;
        for set in relevant_workouts
            .iter()
            .filter_map(|w| w.exercise(exercise_id))
            .flat_map(|e| e.sets.iter())
        {
            if pr_set.is_none_or(|pr| set.weight > pr.weight) {
                pr_set = Some(*set);
            }
        }

        Self {
            pr_set,
            recent_workouts: relevant_workouts
                .into_iter()
                .take(RECENT_WORKOUTS)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent_workouts.is_empty()
    }
}
