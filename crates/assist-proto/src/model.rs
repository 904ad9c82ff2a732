//! Input modes, raw input values, and the organized-result model.
//!
//! The backend answers an organize request with a genre → songs mapping.
//! One reserved genre key carries `(sub-genre, songs)` pairs instead of a
//! flat list; which key that is comes from config, and the entry type is
//! chosen by comparing against it rather than by sniffing the JSON.

use std::fmt;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ResultShapeError;

/// Reserved genre key whose entry is a list of `(sub-genre, songs)` pairs.
pub const DEFAULT_NESTED_GENRE_KEY: &str = "organized songs";

/// Shown in place of sections when the backend found nothing.
pub const NO_SONGS_MESSAGE: &str = "No songs found or could be classified.";

/// Which input the user is currently providing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    None,
    Text,
    File,
    SpotifyLink,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Text => "text",
            Self::File => "txt file",
            Self::SpotifyLink => "spotify link",
        }
    }

    /// Panel title shown above the active input.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Text => "Enter Text:",
            Self::File => "Select a TXT File:",
            Self::SpotifyLink => "Enter Spotify Playlist Link:",
        }
    }
}

/// Raw, unvalidated values for all three modes.
///
/// Values for hidden modes are retained; only `clear` wipes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValues {
    pub text: String,
    pub file_content: String,
    /// Name of the last file whose content was loaded.
    pub file_name: Option<String>,
    pub link: String,
}

impl InputValues {
    /// True when no mode holds a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.file_content.is_empty() && self.link.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Songs filed under one genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreEntry {
    Flat(Vec<String>),
    Nested(Vec<(String, Vec<String>)>),
}

impl GenreEntry {
    pub fn song_count(&self) -> usize {
        match self {
            Self::Flat(songs) => songs.len(),
            Self::Nested(groups) => groups.iter().map(|(_, songs)| songs.len()).sum(),
        }
    }
}

/// Genre → songs, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizedResult {
    genres: Vec<(String, GenreEntry)>,
}

impl OrganizedResult {
    pub fn new(genres: Vec<(String, GenreEntry)>) -> Self {
        Self { genres }
    }

    /// Decode a response body. Accepts a JSON object keyed by genre, or an
    /// array of `[genre, songs]` pairs.
    pub fn from_slice(body: &[u8], nested_key: &str) -> Result<Self, ResultShapeError> {
        let raw: RawResult =
            serde_json::from_slice(body).map_err(|e| ResultShapeError::Malformed(e.to_string()))?;
        Self::from_raw(raw, nested_key)
    }

    pub fn from_json_str(body: &str, nested_key: &str) -> Result<Self, ResultShapeError> {
        Self::from_slice(body.as_bytes(), nested_key)
    }

    fn from_raw(raw: RawResult, nested_key: &str) -> Result<Self, ResultShapeError> {
        let mut genres = Vec::with_capacity(raw.0.len());
        for (genre, value) in raw.0 {
            let entry = if genre == nested_key {
                serde_json::from_value::<Vec<(String, Vec<String>)>>(value).map(GenreEntry::Nested)
            } else {
                serde_json::from_value::<Vec<String>>(value).map(GenreEntry::Flat)
            }
            .map_err(|e| ResultShapeError::BadEntry {
                genre: genre.clone(),
                reason: e.to_string(),
            })?;
            genres.push((genre, entry));
        }
        Ok(Self { genres })
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn genres(&self) -> impl Iterator<Item = (&str, &GenreEntry)> {
        self.genres.iter().map(|(g, e)| (g.as_str(), e))
    }

    pub fn get(&self, genre: &str) -> Option<&GenreEntry> {
        self.genres.iter().find(|(g, _)| g == genre).map(|(_, e)| e)
    }

    pub fn song_count(&self) -> usize {
        self.genres.iter().map(|(_, e)| e.song_count()).sum()
    }

    /// Plain-text rendering used for the clipboard and the one-shot CLI.
    pub fn to_plain_text(&self) -> String {
        ResultView::of(Some(self)).to_plain_text()
    }
}

/// Order-preserving intermediate: `serde_json::Value` would sort object keys.
/// A repeated genre keeps its first position and takes the last value.
struct RawResult(Vec<(String, Value)>);

impl RawResult {
    fn insert(&mut self, genre: String, value: Value) {
        match self.0.iter_mut().find(|(g, _)| *g == genre) {
            Some(slot) => slot.1 = value,
            None => self.0.push((genre, value)),
        }
    }
}

impl<'de> Deserialize<'de> for RawResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a genre mapping or a list of [genre, songs] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawResult, A::Error> {
                let mut raw = RawResult(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((genre, value)) = map.next_entry::<String, Value>()? {
                    raw.insert(genre, value);
                }
                Ok(raw)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawResult, A::Error> {
                let mut raw = RawResult(Vec::with_capacity(seq.size_hint().unwrap_or(0)));
                while let Some((genre, value)) = seq.next_element::<(String, Value)>()? {
                    raw.insert(genre, value);
                }
                Ok(raw)
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

// ── View model ────────────────────────────────────────────────────────────────

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// No submission has succeeded yet (or the result was cleared).
    Absent,
    /// The backend returned an empty mapping.
    Empty,
    Sections(Vec<Section>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Upper-cased genre label.
    pub heading: String,
    pub items: Vec<SectionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionItem {
    Song(String),
    Group { name: String, songs: Vec<String> },
}

impl ResultView {
    pub fn of(result: Option<&OrganizedResult>) -> Self {
        let Some(result) = result else {
            return Self::Absent;
        };
        if result.is_empty() {
            return Self::Empty;
        }
        let sections = result
            .genres()
            .map(|(genre, entry)| Section {
                heading: genre.to_uppercase(),
                items: match entry {
                    GenreEntry::Flat(songs) => {
                        songs.iter().cloned().map(SectionItem::Song).collect()
                    }
                    GenreEntry::Nested(groups) => groups
                        .iter()
                        .map(|(name, songs)| SectionItem::Group {
                            name: name.clone(),
                            songs: songs.clone(),
                        })
                        .collect(),
                },
            })
            .collect();
        Self::Sections(sections)
    }

    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Empty => NO_SONGS_MESSAGE.to_string(),
            Self::Sections(sections) => {
                let mut out = String::new();
                for (i, section) in sections.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&section.heading);
                    out.push('\n');
                    for item in &section.items {
                        match item {
                            SectionItem::Song(song) => {
                                out.push_str("  • ");
                                out.push_str(song);
                                out.push('\n');
                            }
                            SectionItem::Group { name, songs } => {
                                out.push_str("  • ");
                                out.push_str(name);
                                out.push_str(":\n");
                                for song in songs {
                                    out.push_str("      ◦ ");
                                    out.push_str(song);
                                    out.push('\n');
                                }
                            }
                        }
                    }
                }
                out
            }
        }
    }
}
