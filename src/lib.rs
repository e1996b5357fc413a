//! UtaFormatix format adaptation layer
//!
//! Converts vocal synthesis project files (UTAU, OpenUtau, VOCALOID, CeVIO,
//! Synthesizer V, VoiSona, DeepVocal, Piapro Studio, MIDI and MusicXML) to and
//! from UtaFormatix data, the canonical intermediate project document.
//!
//! Decoding and encoding of each proprietary format is delegated to a
//! [`ConversionEngine`]. This crate owns everything around it: parameter
//! resolution, extension-based dispatch, splitting per-track zip exports,
//! dialect translation of lyrics, and Japanese lyric notation conversion.
//!
//! # Crate feature flags
//! - `archive` (default): per-track splitting of zip exports (`archive`)
//! - `japanese-lyrics` (default): Japanese lyrics analysis and conversion (`lyrics`)
//!
//! # Quick start
//! ```no_run
//! # async fn run() -> utaformatix::Result<()> {
//! use utaformatix::{Converter, Project, SourceFile, UfDataEngine};
//!
//! let converter = Converter::new(UfDataEngine);
//! let file = SourceFile::read("song.ufdata").await?;
//! let project = Project::from_any(&converter, file, None).await?;
//!
//! let cleaned = project.remove_breaths();
//! let bytes = cleaned.to_ufdata(&converter, None).await?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules (feature-gated for modular use)
pub mod model; // Canonical Project Model

#[cfg(feature = "archive")]
pub mod archive; // Per-track Archive Splitting
pub mod converter; // Uniform Parse/Generate Dispatch
pub mod engine; // External Engine Boundary
pub mod format; // Format Table & Extension Dispatch
#[cfg(feature = "japanese-lyrics")]
pub mod lyrics; // Japanese Lyrics Notation
pub mod params; // Parameter Resolution
pub mod project; // Project Facade
pub mod translate; // Dialect Translation

/// Errors surfaced by conversions
///
/// Engine errors are passed through unchanged. This crate raises
/// [`ConvertError::UnsupportedFormat`] for dispatch, the archive entry errors
/// while splitting, and [`ConvertError::CannotReadFile`] for unreadable input.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Input could not be read as the expected container
    #[error("Cannot read file: {0}")]
    CannotReadFile(String),

    /// File content is structurally invalid
    #[error("Illegal file: {0}")]
    IllegalFile(#[from] IllegalFileError),

    /// Parsed result holds no usable track or note data
    #[error("The project is empty")]
    EmptyProject,

    /// Extension was recognized but content does not match the format
    #[error("Unsupported file format: {0}")]
    UnsupportedFileFormat(String),

    /// A legacy, no longer supported variant of a format was detected
    #[error("Unsupported legacy format: {0}")]
    UnsupportedLegacyFormat(String),

    /// No parser or generator is registered for the requested format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Archive entry name does not follow `{project}_{index}_{track}.{ext}`
    #[error("Malformed archive entry name '{name}'")]
    MalformedArchiveEntry {
        /// Entry name as stored in the archive
        name: String,
    },

    /// Two archive entries claim the same track index
    #[error("Duplicate archive entry for track {index}: '{name}'")]
    DuplicateArchiveEntry {
        /// Track index claimed twice
        index: usize,
        /// Name of the second entry
        name: String,
    },

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specializations of [`ConvertError::IllegalFile`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalFileError {
    /// A note lies at a position the target format's grid cannot represent
    #[error("illegal note position (track {track}, note {note})")]
    IllegalNotePosition {
        /// Track index
        track: usize,
        /// Note index within the track
        note: usize,
    },

    /// Two notes in one track overlap
    #[error("notes overlapping (track {track}, notes {first} and {second})")]
    NotesOverlapping {
        /// Track index
        track: usize,
        /// Index of the earlier note
        first: usize,
        /// Index of the overlapping note
        second: usize,
    },

    /// Any other structural problem
    #[error("{0}")]
    Other(String),
}

impl ConvertError {
    /// Whether this error belongs to the `IllegalFile` family
    pub fn is_illegal_file(&self) -> bool {
        matches!(self, ConvertError::IllegalFile(_))
    }
}

impl From<serde_json::Error> for ConvertError {
    /// Malformed JSON is unreadable; well-formed JSON with the wrong shape is
    /// reported as an unsupported file format.
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => ConvertError::UnsupportedFileFormat(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                ConvertError::CannotReadFile(err.to_string())
            }
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

// Public API exports
pub use converter::{Converter, ConverterConfig};
pub use engine::{ConversionEngine, Feature, ImportParams, SourceFile, UfDataEngine};
pub use format::{Format, EXTENSION_TABLE};
pub use model::{Note, ProjectData, Track, UfData};
pub use params::{GenerateParams, ParseParams, PartialGenerateParams, PartialParseParams};
pub use project::Project;
pub use translate::{remove_breaths, replace_vowel_connections, LONG_VOWEL_MARK};

#[cfg(feature = "archive")]
pub use archive::{parse_track_index, split_track_archive};
#[cfg(feature = "japanese-lyrics")]
pub use lyrics::{
    analyze_japanese_lyrics_type, convert_japanese_lyrics, ConvertJapaneseLyricsOptions,
    JapaneseLyricsType, LyricsTypeSelector,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_file_family() {
        let err: ConvertError = IllegalFileError::NotesOverlapping {
            track: 0,
            first: 1,
            second: 2,
        }
        .into();
        assert!(err.is_illegal_file());
        assert!(!ConvertError::EmptyProject.is_illegal_file());
    }

    #[test]
    fn test_json_error_classification() {
        let syntax = serde_json::from_str::<UfData>("{ not json").unwrap_err();
        assert!(matches!(
            ConvertError::from(syntax),
            ConvertError::CannotReadFile(_)
        ));

        let shape = serde_json::from_str::<UfData>(r#"{ "formatVersion": "one" }"#).unwrap_err();
        assert!(matches!(
            ConvertError::from(shape),
            ConvertError::UnsupportedFileFormat(_)
        ));
    }
}
