use crate::{
    core::errors::{KakeiboError, Result},
    domain::{Settings, SettingsPatch},
    storage::KeyValueStore,
};

/// Storage key of the persisted settings blob.
pub const SETTINGS_KEY: &str = "settings";

/// Reads and writes the settings blob in a [`KeyValueStore`].
pub struct SettingsManager {
    storage: Box<dyn KeyValueStore>,
}

impl SettingsManager {
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Returns the stored blob as a patch, or `None` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<SettingsPatch>> {
        let Some(data) = self.storage.get_item(SETTINGS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Option<SettingsPatch>>(&data) {
            Ok(patch) => Ok(patch),
            Err(err) => Err(KakeiboError::Parse(format!(
                "stored settings are not valid JSON settings: {}",
                err
            ))),
        }
    }

    /// Serializes the complete settings record under [`SETTINGS_KEY`].
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.storage.set_item(SETTINGS_KEY, &json)?;
        tracing::debug!(bytes = json.len(), "settings persisted");
        Ok(())
    }
}
