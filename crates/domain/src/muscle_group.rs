use std::slice::Iter;

use strum::{AsRefStr, Display, EnumString};

/// Muscle group tag of an exercise.
///
/// Stored records may carry tags outside of the current vocabulary (e.g., written by a newer or
/// an older version of the app). Those are kept verbatim in `Other` so that they survive a
/// load-modify-store cycle unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumString)]
pub enum MuscleGroup {
    #[strum(serialize = "chest")]
    Chest,
    #[strum(serialize = "back")]
    Back,
    #[strum(serialize = "shoulders")]
    Shoulders,
    #[strum(serialize = "rear delts")]
    RearDelts,
    #[strum(serialize = "traps")]
    Traps,
    #[strum(serialize = "biceps")]
    Biceps,
    #[strum(serialize = "triceps")]
    Triceps,
    #[strum(serialize = "forearms")]
    Forearms,
    #[strum(serialize = "quads")]
    Quads,
    #[strum(serialize = "hamstrings")]
    Hamstrings,
    #[strum(serialize = "glutes")]
    Glutes,
    #[strum(serialize = "calves")]
    Calves,
    #[strum(serialize = "abs")]
    Abs,
    #[strum(serialize = "full body")]
    FullBody,
    #[strum(default, transparent)]
    Other(String),
}

impl MuscleGroup {
    /// Current vocabulary in display order.
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 14] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::RearDelts,
            MuscleGroup::Traps,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Forearms,
            MuscleGroup::Quads,
            MuscleGroup::Hamstrings,
            MuscleGroup::Glutes,
            MuscleGroup::Calves,
            MuscleGroup::Abs,
            MuscleGroup::FullBody,
        ];
        MUSCLE_GROUPS.iter()
    }

    /// Human readable label, e.g. `Rear delts`.
    #[must_use]
    pub fn label(&self) -> String {
        let tag = self.as_ref().replace('_', " ");
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, MuscleGroup::Other(_))
    }
}

impl From<String> for MuscleGroup {
    fn from(value: String) -> Self {
        MuscleGroup::from(value.as_str())
    }
}

impl From<&MuscleGroup> for String {
    fn from(value: &MuscleGroup) -> Self {
        value.as_ref().to_string()
    }
}
