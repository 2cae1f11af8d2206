pub mod actions;
pub mod app;
pub mod errors;
pub mod ledger_store;
pub mod source;
pub mod title;
pub mod utils;

pub use actions::{Action, ActionOutcome};
pub use app::Kakeibo;
pub use errors::{KakeiboError, Result};
pub use ledger_store::{LedgerStore, Mutation};
pub use source::{EmptySource, EntrySource, SampleSource};
pub use title::{DocumentTitle, TitleSink};
