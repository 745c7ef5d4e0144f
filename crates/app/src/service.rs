use liftlog_domain::{ReadError, Service, UpdateError};
use log::error;

use crate::{Settings, SettingsRepository, SettingsService};

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        self.repository()
            .read_settings()
            .await
            .inspect_err(|err| error!("failed to get settings: {err}"))
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        self.repository()
            .write_settings(settings)
            .await
            .inspect_err(|err| error!("failed to set settings: {err}"))
    }
}
