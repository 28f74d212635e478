//! Display surface contract and an in-memory HTML implementation.
//!
//! # Responsibility
//! - Name the form fields and hint regions the presenter reads and toggles.
//! - Hold the mounted notes markup produced by `Presenter::render`.
//!
//! # Invariants
//! - `mount` replaces the previous markup entirely.
//! - Only `Title` and `Text` own an error hint; hint calls for `Color` are
//!   ignored and report hidden.

/// Form inputs exposed by the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Text,
    Color,
}

/// Rendering target the presenter writes to and reads from.
pub trait DisplaySurface {
    /// Current raw value of `field`, untrimmed.
    fn field_value(&self, field: FormField) -> String;
    fn set_field_value(&mut self, field: FormField, value: &str);
    fn set_hint_visible(&mut self, field: FormField, visible: bool);
    fn hint_visible(&self, field: FormField) -> bool;
    /// Replaces the notes container content with `markup`.
    fn mount(&mut self, markup: String);
}

/// Surface that keeps form state and mounted markup in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    title: String,
    text: String,
    color: String,
    title_hint_visible: bool,
    text_hint_visible: bool,
    mounted: String,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup most recently mounted into the notes container.
    pub fn mounted(&self) -> &str {
        &self.mounted
    }

    /// Wraps the mounted markup in a standalone HTML page.
    pub fn document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Notebook</title>\n<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css\">\n</head>\n<body>\n<section class=\"section\">\n<div class=\"container\" id=\"notes-container\">\n{}\n</div>\n</section>\n</body>\n</html>\n",
            self.mounted
        )
    }
}

impl DisplaySurface for HtmlSurface {
    fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Text => self.text.clone(),
            FormField::Color => self.color.clone(),
        }
    }

    fn set_field_value(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Text => &mut self.text,
            FormField::Color => &mut self.color,
        };
        *slot = value.to_string();
    }

    fn set_hint_visible(&mut self, field: FormField, visible: bool) {
        match field {
            FormField::Title => self.title_hint_visible = visible,
            FormField::Text => self.text_hint_visible = visible,
            FormField::Color => {}
        }
    }

    fn hint_visible(&self, field: FormField) -> bool {
        match field {
            FormField::Title => self.title_hint_visible,
            FormField::Text => self.text_hint_visible,
            FormField::Color => false,
        }
    }

    fn mount(&mut self, markup: String) {
        self.mounted = markup;
    }
}
