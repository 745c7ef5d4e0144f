use derive_more::{AsRef, Display, Into};

const MAX_LEN: usize = 64;

/// Validated exercise name: trimmed, non-empty and at most 64 bytes long.
#[derive(AsRef, Debug, Display, Into, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > MAX_LEN {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Name read back from storage, kept as stored.
    ///
    /// Stored names are not validated again, so names written by older versions or imported from
    /// a backup remain loadable.
    #[must_use]
    pub fn from_stored(name: impl Into<String>) -> Self {
        Name(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Bench Press", Ok(Name("Bench Press".to_string())))]
    #[case("  Deadlift \n", Ok(Name("Deadlift".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    #[case(&"X".repeat(64), Ok(Name("X".repeat(64))))]
    #[case(&"X".repeat(65), Err(NameError::TooLong(65)))]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[rstest]
    #[case(" Squat ")]
    #[case("")]
    #[case("Single Arm Dumbbell Romanian Deadlift on Deficit Platform with Pause")]
    fn test_name_from_stored(#[case] name: &str) {
        assert_eq!(Name::from_stored(name).as_str(), name);
    }

    #[test]
    fn test_name_into_string() {
        let name = Name::new(" Squat ").unwrap();
        assert_eq!(name.as_str(), "Squat");
        assert_eq!(String::from(name), "Squat".to_string());
    }
}
