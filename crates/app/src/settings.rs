use liftlog_domain::{ReadError, UpdateError};
use liftlog_storage::{Key, KeyValueRepository, KeyValueStore};
use log::debug;
use strum::{AsRefStr, EnumString};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
}

#[derive(AsRefStr, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored preference, unknown values fall back to the default theme.
    #[must_use]
    pub fn from_preference(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            debug!("ignoring invalid theme preference {value:?}");
            Theme::default()
        })
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl<S: KeyValueStore> SettingsRepository for KeyValueRepository<S> {
    async fn read_settings(&self) -> Result<Settings, ReadError> {
        let theme = self
            .store()
            .get(Key::ThemePreference.as_ref())
            .await?
            .map(|value| Theme::from_preference(&value))
            .unwrap_or_default();
        Ok(Settings { theme })
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        self.store()
            .set(Key::ThemePreference.as_ref(), settings.theme.as_ref())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use liftlog_storage::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("light", Theme::Light)]
    #[case("dark", Theme::Dark)]
    #[case("Dark", Theme::Light)]
    #[case("system", Theme::Light)]
    #[case("", Theme::Light)]
    fn test_theme_from_preference(#[case] value: &str, #[case] expected: Theme) {
        assert_eq!(Theme::from_preference(value), expected);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_settings_repository() {
        let repository = KeyValueRepository::new(MemoryStore::new());

        block_on(async {
            assert_eq!(repository.read_settings().await.unwrap(), Settings::default());

            repository
                .write_settings(Settings { theme: Theme::Dark })
                .await
                .unwrap();

            assert_eq!(
                repository
                    .store()
                    .get("@theme_preference")
                    .await
                    .unwrap()
                    .as_deref(),
                Some("dark")
            );
            assert_eq!(repository.read_settings().await.unwrap().theme, Theme::Dark);

            repository
                .store()
                .set("@theme_preference", "purple")
                .await
                .unwrap();

            assert_eq!(repository.read_settings().await.unwrap().theme, Theme::Light);
        });
    }
}
