//! Canonical Project Model
//!
//! Data types for UtaFormatix data (ufdata v1), the intermediate document every
//! supported file format is converted to and from.
//!
//! Field names serialize in camelCase so documents round-trip with other ufdata
//! tooling unchanged.

mod ufdata;

pub use ufdata::{read_ufdata, write_ufdata};

use serde::{Deserialize, Serialize};

/// The ufdata schema version understood by this crate
pub const UFDATA_FORMAT_VERSION: u32 = 1;

/// Versioned ufdata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UfData {
    /// Schema version (always [`UFDATA_FORMAT_VERSION`] for accepted documents)
    pub format_version: u32,
    /// The project payload
    pub project: ProjectData,
}

impl UfData {
    /// Wrap a project in a current-version document
    pub fn new(project: ProjectData) -> Self {
        UfData {
            format_version: UFDATA_FORMAT_VERSION,
            project,
        }
    }
}

/// Canonical project
///
/// Track order is significant: it defines the track index used when a
/// multi-file export is split back into per-track outputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Count of leading measures that cannot contain notes
    pub measure_prefix: u32,
    /// Project name
    pub name: String,
    /// Tempo changes, ordered by position
    pub tempos: Vec<Tempo>,
    /// Time signature changes, ordered by position
    pub time_signatures: Vec<TimeSignature>,
    /// Tracks in source order
    pub tracks: Vec<Track>,
}

impl ProjectData {
    /// Iterate over every note of every track, in track order
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.tracks.iter().flat_map(|track| track.notes.iter())
    }

    /// Return a copy with every track rewritten by `f`
    pub fn map_tracks<F>(&self, f: F) -> ProjectData
    where
        F: FnMut(&Track) -> Track,
    {
        ProjectData {
            tracks: self.tracks.iter().map(f).collect(),
            ..self.clone()
        }
    }
}

/// A single track of notes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track name
    pub name: String,
    /// Notes, assumed non-overlapping and ordered by `tick_on`
    pub notes: Vec<Note>,
    /// Optional pitch curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,
}

/// A sung note
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI key number
    pub key: i32,
    /// Start position in ticks
    pub tick_on: i64,
    /// End position in ticks
    pub tick_off: i64,
    /// Lyric text
    pub lyric: String,
    /// Optional phoneme override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phoneme: Option<String>,
}

impl Note {
    /// Whether `next` starts exactly where this note ends
    pub fn is_followed_by(&self, next: &Note) -> bool {
        self.tick_off == next.tick_on
    }
}

/// Pitch curve data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    /// Tick positions of the curve points
    pub ticks: Vec<i64>,
    /// Values at each point; `None` marks a gap in the curve
    pub values: Vec<Option<f64>>,
    /// Absolute semitone values when true, otherwise relative to the note key
    pub is_absolute: bool,
}

/// Tempo change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tempo {
    /// Position in ticks
    pub tick_position: i64,
    /// Beats per minute
    pub bpm: f64,
}

/// Time signature change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    /// Position in measures
    pub measure_position: i64,
    /// Beats per measure
    pub numerator: u32,
    /// Beat unit
    pub denominator: u32,
}
