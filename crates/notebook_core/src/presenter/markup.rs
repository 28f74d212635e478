//! HTML fragments for the notes container.
//!
//! # Invariants
//! - Every user-controlled string (title, text, color tag) passes through
//!   `escape_html` before it reaches the output, in text and attribute
//!   positions alike.

use crate::model::note::{color_display_name, Note};
use chrono::{DateTime, Local, Utc};

/// Placeholder shown when no note exists.
pub const EMPTY_PLACEHOLDER: &str =
    "<p class=\"has-text-grey\">There are no notes added yet. Add your first note from above!!</p>";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Escapes `& < > " '` so `value` is inert in text and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats a creation timestamp in the local time zone.
pub fn format_local_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

/// Opening of one color group, including its heading.
pub(crate) fn group_open(color: &str) -> String {
    format!(
        "<div class=\"color-group\">\n<h3 class=\"subtitle is-4\">{}</h3>\n",
        escape_html(color_display_name(color))
    )
}

pub(crate) const GROUP_CLOSE: &str = "</div>\n";

/// One note card with its delete affordance.
pub(crate) fn note_card(note: &Note) -> String {
    let color = escape_html(&note.color);
    format!(
        concat!(
            "<article class=\"message {color} note\" data-note-id=\"{id}\">\n",
            "<div class=\"message-header\">\n",
            "<p>{title}</p>\n",
            "<span class=\"tag note-color\">{label}</span>\n",
            "<div class=\"note-date\">{date}</div>\n",
            "</div>\n",
            "<div class=\"message-body\">\n",
            "<p>{text}</p>\n",
            "<button class=\"button is-small is-light deleteNote\" data-note-id=\"{id}\">Delete</button>\n",
            "</div>\n",
            "</article>\n"
        ),
        color = color,
        id = note.id,
        title = escape_html(&note.title),
        label = escape_html(color_display_name(&note.color)),
        date = format_local_date(&note.date),
        text = escape_html(&note.text),
    )
}
