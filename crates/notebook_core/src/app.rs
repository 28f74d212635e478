//! Composition root.
//!
//! # Responsibility
//! - Build storage, store, presenter and coordinator from one config.
//! - Offer the add/delete/render flows used by front ends.
//!
//! # Invariants
//! - This is the only place the three roles are constructed and wired.
//! - An unreachable database degrades to in-memory storage, never an error.

use crate::config::{ConfigError, NotebookConfig};
use crate::coordinator::{Coordinator, IntentOutcome};
use crate::model::note::{NoteColor, NoteId};
use crate::presenter::{DisplaySurface, FormField, HtmlSurface, Presenter};
use crate::storage::{BlobStorage, MemoryBlobStorage, SqliteBlobStorage};
use crate::store::{GroupedNotes, LoadOutcome, NoteStore};
use log::{error, info};

/// Which backend the notebook ended up persisting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Sqlite,
    /// Database could not be opened; changes last for this process only.
    MemoryFallback,
}

pub type NotebookCoordinator = Coordinator<Box<dyn BlobStorage>, HtmlSurface>;

/// Fully wired notebook over an in-memory HTML surface.
pub struct Notebook {
    coordinator: NotebookCoordinator,
    load_outcome: LoadOutcome,
    storage_mode: StorageMode,
}

impl Notebook {
    /// Validates `config`, opens storage and restores persisted notes.
    pub fn open(config: &NotebookConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let db_path = config.db_path();
        let notebook = match SqliteBlobStorage::open(&db_path) {
            Ok(storage) => {
                Self::with_storage(Box::new(storage), &config.storage_key, StorageMode::Sqlite)
            }
            Err(err) => {
                error!(
                    "event=notebook_open module=app status=degraded path={} error_code=storage_open_failed error={}",
                    db_path.display(),
                    err
                );
                Self::with_storage(
                    Box::new(MemoryBlobStorage::new()),
                    &config.storage_key,
                    StorageMode::MemoryFallback,
                )
            }
        };
        Ok(notebook)
    }

    /// Wires a notebook over an explicit storage backend.
    pub fn with_storage(
        storage: Box<dyn BlobStorage>,
        storage_key: &str,
        storage_mode: StorageMode,
    ) -> Self {
        let mut store = NoteStore::with_key(storage, storage_key);
        let load_outcome = store.load();

        let mut surface = HtmlSurface::new();
        surface.set_field_value(FormField::Color, NoteColor::DEFAULT.tag());
        let coordinator = Coordinator::new(store, Presenter::new(surface));

        info!(
            "event=notebook_open module=app status=ok storage_mode={:?} load={:?}",
            storage_mode, load_outcome
        );
        Self {
            coordinator,
            load_outcome,
            storage_mode,
        }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    pub fn coordinator(&self) -> &NotebookCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut NotebookCoordinator {
        &mut self.coordinator
    }

    /// Fills the form and activates the add affordance.
    pub fn add_note(&mut self, title: &str, text: &str, color: &str) -> Option<IntentOutcome> {
        let presenter = self.coordinator.presenter_mut();
        let surface = presenter.surface_mut();
        surface.set_field_value(FormField::Title, title);
        surface.set_field_value(FormField::Text, text);
        surface.set_field_value(FormField::Color, color);
        presenter.activate_add();
        self.coordinator.run_pending().pop()
    }

    /// Activates the delete affordance of note `id`.
    pub fn delete_note(&mut self, id: NoteId) -> Option<IntentOutcome> {
        self.coordinator.presenter_mut().activate_delete(id);
        self.coordinator.run_pending().pop()
    }

    pub fn grouped(&self) -> GroupedNotes {
        self.coordinator.store().all_grouped_by_color()
    }

    /// Whether the last add left the hint of `field` visible.
    pub fn hint_visible(&self, field: FormField) -> bool {
        self.coordinator.presenter().surface().hint_visible(field)
    }

    /// Current notes view as a standalone HTML page.
    pub fn document(&self) -> String {
        self.coordinator.presenter().surface().document()
    }
}
