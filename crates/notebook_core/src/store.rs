//! Authoritative note collection with best-effort local persistence.
//!
//! # Responsibility
//! - Own the in-memory note list and its identifier sequence.
//! - Mirror the full list into one named blob after every mutation.
//! - Produce the color-grouped view consumed by the presenter.
//!
//! # Invariants
//! - Identifiers are unique within one store and increase until the `u64`
//!   range is exhausted; after that the lowest free id is reused.
//! - Persistence failures are logged and never undo an in-memory mutation.
//! - A blob that cannot be read or parsed yields an empty collection.
//! - A restored blob that repeats an id keeps only the first such note.
//! - Grouped views contain only non-empty groups, newest note first.

use crate::model::note::{Note, NoteId};
use crate::storage::{BlobStorage, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Blob key used when the caller does not pick one.
pub const DEFAULT_STORAGE_KEY: &str = "notebook-notes";

/// Color tag -> notes, keys in lexicographic order.
pub type GroupedNotes = BTreeMap<String, Vec<Note>>;

/// Which branch `NoteStore::load` took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Blob parsed; carries the number of restored notes.
    Restored(usize),
    /// No blob stored under the key yet.
    Missing,
    /// Blob present but not a valid note list.
    Malformed,
    /// Backend failed to read.
    Unavailable,
}

/// Note collection bound to one blob in `S`.
pub struct NoteStore<S: BlobStorage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
    last_issued_id: NoteId,
}

impl<S: BlobStorage> NoteStore<S> {
    /// Creates an empty store persisting under `DEFAULT_STORAGE_KEY`.
    ///
    /// Nothing is read until `load` is called.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Creates an empty store persisting under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            notes: Vec::new(),
            last_issued_id: 0,
        }
    }

    /// Creates a store and immediately restores its persisted notes.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::with_key(storage, key);
        store.load();
        store
    }

    /// Replaces the in-memory collection with the persisted blob.
    ///
    /// Every failure degrades to an empty collection; see `LoadOutcome`.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => {
                self.notes.clear();
                info!(
                    "event=notes_load module=store status=ok key={} count=0 source=empty",
                    self.key
                );
                LoadOutcome::Missing
            }
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Note>>(&blob) {
                Ok(notes) => {
                    let parsed = notes.len();
                    self.notes = dedup_by_id(notes);
                    let dropped = parsed - self.notes.len();
                    if dropped > 0 {
                        warn!(
                            "event=notes_load module=store status=degraded key={} count={} error_code=duplicate_id dropped={}",
                            self.key,
                            self.notes.len(),
                            dropped
                        );
                    } else {
                        info!(
                            "event=notes_load module=store status=ok key={} count={}",
                            self.key,
                            self.notes.len()
                        );
                    }
                    LoadOutcome::Restored(self.notes.len())
                }
                Err(err) => {
                    self.notes.clear();
                    warn!(
                        "event=notes_load module=store status=error key={} error_code=blob_malformed blob_bytes={} error={}",
                        self.key,
                        blob.len(),
                        err
                    );
                    LoadOutcome::Malformed
                }
            },
            Err(err) => {
                self.notes.clear();
                error!(
                    "event=notes_load module=store status=error key={} error_code=storage_read_failed error={}",
                    self.key, err
                );
                LoadOutcome::Unavailable
            }
        };

        let max_id = self.notes.iter().map(|note| note.id).max().unwrap_or(0);
        self.last_issued_id = self.last_issued_id.max(max_id);
        outcome
    }

    /// Writes the full collection to the backing blob.
    pub fn save(&mut self) -> StorageResult<()> {
        let blob = serde_json::to_string(&self.notes).map_err(StorageError::Encode)?;
        self.storage.set(&self.key, &blob)?;
        debug!(
            "event=notes_save module=store status=ok key={} count={} blob_bytes={}",
            self.key,
            self.notes.len(),
            blob.len()
        );
        Ok(())
    }

    /// Appends a note stamped with the current time and persists.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
    ) -> Note {
        self.add_at(title, text, color, Utc::now())
    }

    /// Appends a note with an explicit creation time and persists.
    pub fn add_at(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Note {
        let id = self.next_id(date);
        let note = Note::new(id, title, text, color, date);
        self.notes.push(note.clone());
        info!(
            "event=note_add module=store status=ok id={} color={} count={}",
            note.id,
            note.color,
            self.notes.len()
        );
        self.persist_best_effort("note_add");
        note
    }

    /// Removes the note with `id` and persists.
    ///
    /// Unknown ids leave the collection untouched. Returns whether a note was
    /// removed.
    pub fn remove(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        info!(
            "event=note_remove module=store status=ok id={} removed={} count={}",
            id,
            removed,
            self.notes.len()
        );
        self.persist_best_effort("note_remove");
        removed
    }

    /// Notes in insertion order.
    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Partitions notes by color tag, newest first inside each group.
    ///
    /// Equal timestamps fall back to the larger (later issued) id first.
    pub fn all_grouped_by_color(&self) -> GroupedNotes {
        let mut grouped = GroupedNotes::new();
        for note in &self.notes {
            grouped
                .entry(note.color.clone())
                .or_default()
                .push(note.clone());
        }
        for notes in grouped.values_mut() {
            notes.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        }
        grouped
    }

    fn next_id(&mut self, date: DateTime<Utc>) -> NoteId {
        let millis = NoteId::try_from(date.timestamp_millis()).unwrap_or(0);
        match self.last_issued_id.checked_add(1) {
            Some(next) => {
                let id = millis.max(next);
                self.last_issued_id = id;
                id
            }
            None => {
                let id = self.lowest_unused_id();
                warn!(
                    "event=note_id module=store status=degraded error_code=id_space_exhausted id={}",
                    id
                );
                id
            }
        }
    }

    fn lowest_unused_id(&self) -> NoteId {
        let used: BTreeSet<NoteId> = self.notes.iter().map(|note| note.id).collect();
        (1..=NoteId::MAX)
            .find(|candidate| !used.contains(candidate))
            .unwrap_or(0)
    }

    fn persist_best_effort(&mut self, event: &str) {
        if let Err(err) = self.save() {
            error!(
                "event={event} module=store status=degraded key={} error_code=persist_failed error={}",
                self.key, err
            );
        }
    }
}

/// Keeps the first note for every id; later repeats are dropped.
fn dedup_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes
        .into_iter()
        .filter(|note| seen.insert(note.id))
        .collect()
}
