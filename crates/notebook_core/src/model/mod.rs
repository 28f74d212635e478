//! Domain model for notebook records.
//!
//! # Responsibility
//! - Define the note record persisted by the store and drawn by the presenter.
//! - Own the fixed color palette used for grouping and display names.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` unique within its collection.
//! - Records are immutable once created; removal is a hard delete.

pub mod note;
