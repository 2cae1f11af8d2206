//! The session-wide context object that UI layers talk to.

use crate::{
    config::SettingsManager,
    core::{
        actions::{Action, ActionOutcome},
        errors::{KakeiboError, Result},
        ledger_store::{LedgerStore, Mutation},
        source::{EmptySource, EntrySource},
        title::{DocumentTitle, TitleSink},
    },
    domain::{self, LedgerEntry, Settings, YearMonth},
    storage::KeyValueStore,
};

/// Owns the ledger buckets and the settings record for one application session.
///
/// Actions derive what they need (the month of an entry, the previous bucket)
/// and forward to the primitive mutations on [`LedgerStore`]. Category views
/// are recomputed from the settings on every call.
pub struct Kakeibo {
    store: LedgerStore,
    settings: Settings,
    settings_manager: SettingsManager,
    source: Box<dyn EntrySource>,
    title: DocumentTitle,
    title_sink: Option<Box<dyn TitleSink>>,
}

impl Kakeibo {
    /// Creates a context with default settings, an empty entry source, and
    /// `storage` as the durable settings store. Nothing is loaded yet.
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            store: LedgerStore::new(),
            settings: Settings::default(),
            settings_manager: SettingsManager::new(storage),
            source: Box::new(EmptySource),
            title: DocumentTitle::new(),
            title_sink: None,
        }
    }

    pub fn with_source(mut self, source: impl EntrySource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Forwards every title change to `sink` as well as the built-in record.
    pub fn with_title_sink(mut self, sink: impl TitleSink + 'static) -> Self {
        self.title_sink = Some(Box::new(sink));
        self
    }

    /// Replaces the bucket for `year_month` with whatever the entry source returns.
    pub fn fetch(&mut self, year_month: &str) -> Result<usize> {
        let year_month: YearMonth = year_month.parse()?;
        let entries = self.source.fetch_month(&year_month)?;
        let count = entries.len();
        tracing::debug!(%year_month, count, "month fetched");
        self.store.set_bucket(year_month, entries);
        Ok(count)
    }

    /// Appends `entry` to its month's bucket; skipped when that month was never fetched.
    pub fn add(&mut self, entry: LedgerEntry) -> Mutation {
        self.store.append(entry)
    }

    /// Applies an edit to an entry that previously lived in `previous_year_month`.
    ///
    /// When the edit keeps the month, the entry is replaced in place. When the
    /// date moves to another month, the old copy is removed and the new one is
    /// appended to its new bucket under the same rules as [`Kakeibo::add`].
    /// If only the removal lands, the outcome is [`Mutation::RemovedOnly`].
    pub fn update(&mut self, previous_year_month: &str, entry: LedgerEntry) -> Mutation {
        let same_month = entry
            .year_month()
            .is_some_and(|year_month| year_month.as_str() == previous_year_month);
        if same_month {
            return self.store.replace(previous_year_month, entry);
        }

        let removed = self.store.remove(previous_year_month, &entry.id);
        if !removed.is_applied() {
            tracing::debug!(
                id = %entry.id,
                previous_year_month,
                ?removed,
                "moved entry had no previous copy"
            );
        }
        match self.store.append(entry) {
            Mutation::BucketNotFetched if removed.is_applied() => Mutation::RemovedOnly,
            appended => appended,
        }
    }

    /// Removes `entry` (matched by id) from the bucket of its date.
    pub fn delete(&mut self, entry: &LedgerEntry) -> Mutation {
        match entry.year_month() {
            Some(year_month) => self.store.remove(year_month.as_str(), &entry.id),
            None => Mutation::BucketNotFetched,
        }
    }

    /// Replaces the settings wholesale, retitles, and persists the new record.
    pub fn save_settings(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.refresh_title();
        self.settings_manager.save(&self.settings)?;
        tracing::info!(app_name = %self.settings.app_name, "settings saved");
        Ok(())
    }

    /// Merges the persisted settings blob onto the current settings.
    ///
    /// A malformed blob resets the settings to their defaults and is reported
    /// as [`KakeiboError::Parse`]. The title is refreshed in every case.
    pub fn load_settings(&mut self) -> Result<()> {
        let result = match self.settings_manager.load() {
            Ok(Some(patch)) => {
                patch.apply_to(&mut self.settings);
                tracing::info!(app_name = %self.settings.app_name, "settings loaded");
                Ok(())
            }
            Ok(None) => {
                tracing::debug!("no stored settings; keeping current values");
                Ok(())
            }
            Err(err @ KakeiboError::Parse(_)) => {
                tracing::warn!(error = %err, "stored settings unreadable; falling back to defaults");
                self.settings = Settings::default();
                Err(err)
            }
            Err(err) => Err(err),
        };
        self.refresh_title();
        result
    }

    /// Routes a named action to its operation.
    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        tracing::trace!(action = action.name(), "dispatch");
        let outcome = match action {
            Action::FetchAbData { year_month } => {
                let count = self.fetch(year_month.as_str())?;
                ActionOutcome::Fetched { year_month, count }
            }
            Action::AddAbData { item } => ActionOutcome::Mutated(self.add(item)),
            Action::UpdateAbData { before_ym, item } => {
                ActionOutcome::Mutated(self.update(&before_ym, item))
            }
            Action::DeleteAbData { item } => ActionOutcome::Mutated(self.delete(&item)),
            Action::SaveSettings { settings } => {
                self.save_settings(settings)?;
                ActionOutcome::SettingsSaved
            }
            Action::LoadSettings => {
                self.load_settings()?;
                ActionOutcome::SettingsLoaded
            }
        };
        Ok(outcome)
    }

    pub fn income_items(&self) -> Vec<String> {
        domain::derive_income_items(&self.settings)
    }

    pub fn outgo_items(&self) -> Vec<String> {
        domain::derive_outgo_items(&self.settings)
    }

    pub fn tag_items(&self) -> Vec<String> {
        domain::derive_tag_items(&self.settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn bucket(&self, year_month: &str) -> Option<&[LedgerEntry]> {
        self.store.bucket(year_month)
    }

    pub fn title(&self) -> &str {
        self.title.current()
    }

    fn refresh_title(&mut self) {
        let name = self.settings.app_name.as_str();
        self.title.set_title(name);
        if let Some(sink) = self.title_sink.as_mut() {
            sink.set_title(name);
        }
    }
}
