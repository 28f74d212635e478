//! Coordinator wiring presenter intents to store mutations.
//!
//! # Responsibility
//! - Bind the presenter's add/delete affordances to an intent queue.
//! - Run each queued intent against the store, then re-render.
//!
//! # Invariants
//! - Holds no note data of its own; every render reads the store afresh.
//! - Intents run one at a time, each to completion, in activation order.
//! - The queue is `Rc`-shared and therefore confined to one thread.

use crate::model::note::{Note, NoteId};
use crate::presenter::{DisplaySurface, Presenter};
use crate::storage::BlobStorage;
use crate::store::NoteStore;
use log::info;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// User intent emitted by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add,
    Delete(NoteId),
}

/// Result of running one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Form was valid and the note was stored.
    Added(Note),
    /// Form failed validation; hints are showing and nothing changed.
    Rejected,
    /// Delete ran; `existed` is false when the id was unknown.
    Removed { id: NoteId, existed: bool },
}

type IntentQueue = Rc<RefCell<VecDeque<Intent>>>;

pub struct Coordinator<S: BlobStorage, D: DisplaySurface> {
    store: NoteStore<S>,
    presenter: Presenter<D>,
    pending: IntentQueue,
}

impl<S: BlobStorage, D: DisplaySurface> Coordinator<S, D> {
    /// Binds presenter intents and draws the initial view.
    pub fn new(store: NoteStore<S>, mut presenter: Presenter<D>) -> Self {
        let pending = IntentQueue::default();

        let queue = Rc::clone(&pending);
        presenter.bind_add_intent(move || queue.borrow_mut().push_back(Intent::Add));
        let queue = Rc::clone(&pending);
        presenter.bind_delete_intent(move |id| queue.borrow_mut().push_back(Intent::Delete(id)));

        let mut coordinator = Self {
            store,
            presenter,
            pending,
        };
        coordinator.render_notes();
        coordinator
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    /// Mutable presenter access, used to fill the form and activate affordances.
    pub fn presenter_mut(&mut self) -> &mut Presenter<D> {
        &mut self.presenter
    }

    /// Number of activated intents not yet run.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Drains the intent queue in order.
    pub fn run_pending(&mut self) -> Vec<IntentOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(intent) = next else {
                break;
            };
            outcomes.push(self.handle(intent));
        }
        outcomes
    }

    pub fn handle(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::Add => self.handle_add(),
            Intent::Delete(id) => self.handle_delete(id),
        }
    }

    /// Validates the form and, when valid, stores a note from it.
    pub fn handle_add(&mut self) -> IntentOutcome {
        if !self.presenter.validate() {
            info!("event=intent_add module=coordinator status=rejected");
            return IntentOutcome::Rejected;
        }

        let input = self.presenter.capture_form_input();
        let note = self.store.add(input.title, input.text, input.color);
        self.presenter.clear_form();
        self.render_notes();
        IntentOutcome::Added(note)
    }

    pub fn handle_delete(&mut self, id: NoteId) -> IntentOutcome {
        let existed = self.store.remove(id);
        self.render_notes();
        IntentOutcome::Removed { id, existed }
    }

    /// Pushes a fresh grouped view from the store to the presenter.
    pub fn render_notes(&mut self) {
        let grouped = self.store.all_grouped_by_color();
        self.presenter.render(&grouped);
    }
}
