//! Note record and color palette.
//!
//! # Invariants
//! - `title` and `text` are non-empty when created through the presenter flow;
//!   the record type itself does not re-validate.
//! - `color` is kept as the raw tag string so unknown tags survive a
//!   round-trip and degrade to their raw value on display.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Stable identifier of one note inside a collection.
///
/// Serialized as a plain JSON number.
pub type NoteId = u64;

/// Persisted note record.
///
/// Field names match the blob layout `{id, title, text, color, date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    /// Color tag, also the grouping key.
    pub color: String,
    /// Creation time, serialized as an ISO-8601 string. Used only for ordering.
    ///
    /// Written with a `Z` offset. On read, a timestamp without an offset is
    /// taken as UTC.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = raw.parse::<DateTime<Utc>>() {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| de::Error::custom(format!("invalid note date `{raw}`: {err}")))
}

impl Note {
    /// Builds a record with caller-provided identity and timestamp.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
            color: color.into(),
            date,
        }
    }

    /// Returns the palette entry for this note's tag, if it is a known one.
    pub fn known_color(&self) -> Option<NoteColor> {
        NoteColor::from_tag(&self.color)
    }
}

/// Fixed palette of color tags offered by the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteColor {
    Primary,
    Link,
    Info,
    Success,
    Warning,
    Danger,
}

impl NoteColor {
    /// Every palette entry, in form order.
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Primary,
        NoteColor::Link,
        NoteColor::Info,
        NoteColor::Success,
        NoteColor::Warning,
        NoteColor::Danger,
    ];

    /// Color selected by a freshly cleared form.
    pub const DEFAULT: NoteColor = NoteColor::Primary;

    pub fn tag(self) -> &'static str {
        match self {
            Self::Primary => "is-primary",
            Self::Link => "is-link",
            Self::Info => "is-info",
            Self::Success => "is-success",
            Self::Warning => "is-warning",
            Self::Danger => "is-danger",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Primary => "Primary (Blue)",
            Self::Link => "Link (Purple)",
            Self::Info => "Info (Cyan)",
            Self::Success => "Success (Green)",
            Self::Warning => "Warning (Yellow)",
            Self::Danger => "Danger (Red)",
        }
    }

    /// Exact, case-sensitive tag lookup.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.tag() == tag)
    }
}

impl Default for NoteColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Human-readable label for a color tag; unknown tags pass through verbatim.
pub fn color_display_name(tag: &str) -> &str {
    NoteColor::from_tag(tag).map_or(tag, |color| color.display_name())
}
