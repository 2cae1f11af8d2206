//! Named operations a presentation layer can send as a parameter object.

use serde::{Deserialize, Serialize};

use crate::{
    core::{errors::Result, ledger_store::Mutation},
    domain::{LedgerEntry, Settings, YearMonth},
};

/// One UI-issued operation, tagged by its name under `"action"`.
///
/// ```json
/// {"action": "updateAbData", "beforeYM": "2024-05", "item": { ... }}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    FetchAbData {
        year_month: YearMonth,
    },
    AddAbData {
        item: LedgerEntry,
    },
    UpdateAbData {
        #[serde(rename = "beforeYM")]
        before_ym: String,
        item: LedgerEntry,
    },
    DeleteAbData {
        item: LedgerEntry,
    },
    SaveSettings {
        settings: Settings,
    },
    LoadSettings,
}

impl Action {
    /// Parses an action from its JSON parameter object.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::FetchAbData { .. } => "fetchAbData",
            Action::AddAbData { .. } => "addAbData",
            Action::UpdateAbData { .. } => "updateAbData",
            Action::DeleteAbData { .. } => "deleteAbData",
            Action::SaveSettings { .. } => "saveSettings",
            Action::LoadSettings => "loadSettings",
        }
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Fetched { year_month: YearMonth, count: usize },
    Mutated(Mutation),
    SettingsSaved,
    SettingsLoaded,
}
