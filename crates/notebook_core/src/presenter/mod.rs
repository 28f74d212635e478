//! Presenter between the display surface and grouped note data.
//!
//! # Responsibility
//! - Read, trim and validate form input; toggle per-field error hints.
//! - Rebuild the notes container from a grouped view.
//! - Forward add/delete activations to registered intent handlers.
//!
//! # Invariants
//! - The presenter never mutates note records or the store.
//! - All user-supplied text is HTML-escaped before it is mounted.
//! - Groups render in lexicographic color order; notes keep the order given.

mod markup;
mod surface;

pub use markup::{escape_html, format_local_date, EMPTY_PLACEHOLDER};
pub use surface::{DisplaySurface, FormField, HtmlSurface};

use crate::model::note::{NoteColor, NoteId};
use crate::store::GroupedNotes;
use log::debug;

/// Trimmed snapshot of the note form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub text: String,
    pub color: String,
}

type AddHandler = Box<dyn FnMut()>;
type DeleteHandler = Box<dyn FnMut(NoteId)>;

/// Presenter bound to one display surface.
pub struct Presenter<D: DisplaySurface> {
    surface: D,
    on_add: Option<AddHandler>,
    on_delete: Option<DeleteHandler>,
}

impl<D: DisplaySurface> Presenter<D> {
    pub fn new(surface: D) -> Self {
        Self {
            surface,
            on_add: None,
            on_delete: None,
        }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Reads the form; title and text are trimmed, color is taken verbatim.
    pub fn capture_form_input(&self) -> FormInput {
        FormInput {
            title: self.surface.field_value(FormField::Title).trim().to_string(),
            text: self.surface.field_value(FormField::Text).trim().to_string(),
            color: self.surface.field_value(FormField::Color),
        }
    }

    /// Checks that title and text are non-empty after trimming.
    ///
    /// Hides every hint first, then reveals the hint of each empty field.
    pub fn validate(&mut self) -> bool {
        let input = self.capture_form_input();
        self.hide_all_errors();

        let mut is_valid = true;
        if input.title.is_empty() {
            self.surface.set_hint_visible(FormField::Title, true);
            is_valid = false;
        }
        if input.text.is_empty() {
            self.surface.set_hint_visible(FormField::Text, true);
            is_valid = false;
        }

        debug!(
            "event=form_validate module=presenter status={} title_empty={} text_empty={}",
            if is_valid { "ok" } else { "rejected" },
            input.title.is_empty(),
            input.text.is_empty()
        );
        is_valid
    }

    /// Empties title and text and selects the default color.
    pub fn clear_form(&mut self) {
        self.surface.set_field_value(FormField::Title, "");
        self.surface.set_field_value(FormField::Text, "");
        self.surface
            .set_field_value(FormField::Color, NoteColor::DEFAULT.tag());
    }

    pub fn hide_all_errors(&mut self) {
        self.surface.set_hint_visible(FormField::Title, false);
        self.surface.set_hint_visible(FormField::Text, false);
    }

    /// Rebuilds the notes container from `grouped`.
    pub fn render(&mut self, grouped: &GroupedNotes) {
        if grouped.is_empty() {
            self.surface.mount(EMPTY_PLACEHOLDER.to_string());
            return;
        }

        let mut html = String::new();
        for (color, notes) in grouped {
            html.push_str(&markup::group_open(color));
            for note in notes {
                html.push_str(&markup::note_card(note));
            }
            html.push_str(markup::GROUP_CLOSE);
        }
        self.surface.mount(html);
    }

    /// Registers the callback run when the add affordance is activated.
    pub fn bind_add_intent(&mut self, handler: impl FnMut() + 'static) {
        self.on_add = Some(Box::new(handler));
    }

    /// Registers the callback run when a note's delete affordance is activated.
    pub fn bind_delete_intent(&mut self, handler: impl FnMut(NoteId) + 'static) {
        self.on_delete = Some(Box::new(handler));
    }

    /// Activates the add affordance. Returns `false` when nothing is bound.
    pub fn activate_add(&mut self) -> bool {
        match self.on_add.as_mut() {
            Some(handler) => {
                handler();
                true
            }
            None => {
                debug!("event=intent_add module=presenter status=skipped reason=unbound");
                false
            }
        }
    }

    /// Activates the delete affordance tagged with `id`.
    pub fn activate_delete(&mut self, id: NoteId) -> bool {
        match self.on_delete.as_mut() {
            Some(handler) => {
                handler(id);
                true
            }
            None => {
                debug!("event=intent_delete module=presenter status=skipped reason=unbound id={id}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplaySurface, FormField, HtmlSurface, Presenter};
    use std::cell::Cell;
    use std::rc::Rc;

    fn presenter_with(title: &str, text: &str) -> Presenter<HtmlSurface> {
        let mut surface = HtmlSurface::new();
        surface.set_field_value(FormField::Title, title);
        surface.set_field_value(FormField::Text, text);
        surface.set_field_value(FormField::Color, "is-info");
        Presenter::new(surface)
    }

    #[test]
    fn capture_trims_title_and_text() {
        let presenter = presenter_with("  hello ", "\tbody\n");
        let input = presenter.capture_form_input();
        assert_eq!(input.title, "hello");
        assert_eq!(input.text, "body");
        assert_eq!(input.color, "is-info");
    }

    #[test]
    fn validate_hides_stale_hints_once_fixed() {
        let mut presenter = presenter_with("", "");
        assert!(!presenter.validate());
        assert!(presenter.surface().hint_visible(FormField::Title));
        assert!(presenter.surface().hint_visible(FormField::Text));

        presenter
            .surface_mut()
            .set_field_value(FormField::Title, "fixed");
        assert!(!presenter.validate());
        assert!(!presenter.surface().hint_visible(FormField::Title));
        assert!(presenter.surface().hint_visible(FormField::Text));
    }

    #[test]
    fn activation_without_handlers_is_reported() {
        let mut presenter = presenter_with("a", "b");
        assert!(!presenter.activate_add());
        assert!(!presenter.activate_delete(1));

        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        presenter.bind_delete_intent(move |id| seen.set(id));
        assert!(presenter.activate_delete(42));
        assert_eq!(fired.get(), 42);
    }
}
