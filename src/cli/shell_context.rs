//! Shell state and command dispatch.

use std::{env, io, path::PathBuf};

use strsim::levenshtein;

use crate::{
    core::{
        errors::{CliError, KakeiboError},
        utils::{ensure_dir, PathResolver},
        Kakeibo, Mutation, SampleSource,
    },
    domain::Settings,
    storage::JsonFileStorage,
};

use super::{commands, output, registry::CommandRegistry};

const SCRIPT_ENV: &str = "KAKEIBO_CLI_SCRIPT";
const SAMPLE_DATA_ENV: &str = "KAKEIBO_SAMPLE_DATA";
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] KakeiboError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// Everything one shell session owns: the ledger context, the command table,
/// and a settings draft edited with `settings set` until `settings save`.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: Kakeibo,
    pub draft: Settings,
    pub storage_path: PathBuf,
    pub running: bool,
}

impl ShellContext {
    /// Opens the storage file under the data directory and loads saved settings.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        ensure_dir(&base).map_err(KakeiboError::from)?;
        let storage_path = PathResolver::storage_file_in(&base);
        let mut app = Kakeibo::new(JsonFileStorage::new(storage_path.clone()));
        if env::var_os(SAMPLE_DATA_ENV).is_some() {
            app = app.with_source(SampleSource);
        }
        Ok(Self::with_app(mode, app, storage_path))
    }

    pub fn with_app(mode: CliMode, mut app: Kakeibo, storage_path: PathBuf) -> Self {
        if let Err(err) = app.load_settings() {
            output::warning(format!("Could not load saved settings: {err}"));
        }
        let draft = app.settings().clone();

        let mut registry = CommandRegistry::new();
        for entry in commands::all_entries() {
            registry.register(entry);
        }

        Self {
            mode,
            registry,
            app,
            draft,
            storage_path,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.app.title())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(dialoguer::Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other.to_string()),
        }
    }

    /// Prints what a ledger write did, pointing at `fetch` when the month is missing.
    pub(crate) fn report_mutation(&self, outcome: Mutation, verb: &str, year_month: &str) {
        match outcome {
            Mutation::Applied => output::success(format!("Entry {} ({}).", verb, year_month)),
            Mutation::BucketNotFetched => output::warning(format!(
                "Month {} is not fetched; nothing {}. Run `fetch {}` first.",
                year_month, verb, year_month
            )),
            Mutation::EntryNotFound => {
                output::warning(format!("No matching entry in {}; nothing {}.", year_month, verb))
            }
            Mutation::RemovedOnly => output::warning(format!(
                "Entry removed from its old month, but {} is not fetched so it was not re-added. Run `fetch {}` first.",
                year_month, year_month
            )),
        }
    }
}

#[cfg(test)]
pub(crate) fn script_context(storage_path: PathBuf) -> ShellContext {
    let app = Kakeibo::new(JsonFileStorage::new(storage_path.clone()));
    ShellContext::with_app(CliMode::Script, app, storage_path)
}
