//! Core logic for the notebook: a color-grouped note collection persisted to a
//! local blob, a presenter that renders it as HTML, and the coordinator
//! between them.

pub mod app;
pub mod config;
pub mod coordinator;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod storage;
pub mod store;

pub use app::{Notebook, StorageMode};
pub use config::{ConfigError, NotebookConfig};
pub use coordinator::{Coordinator, Intent, IntentOutcome};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{color_display_name, Note, NoteColor, NoteId};
pub use presenter::{
    escape_html, format_local_date, DisplaySurface, FormField, FormInput, HtmlSurface, Presenter,
};
pub use storage::{BlobStorage, MemoryBlobStorage, SqliteBlobStorage, StorageError, StorageResult};
pub use store::{GroupedNotes, LoadOutcome, NoteStore, DEFAULT_STORAGE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
