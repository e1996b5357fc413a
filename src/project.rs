//! Project Facade
//!
//! [`Project`] wraps a parsed ufdata document and exposes the conversions as
//! methods. Every transformation returns a new `Project`; the receiver is
//! never modified.

use crate::converter::Converter;
use crate::engine::{ConversionEngine, SourceFile};
use crate::format::Format;
use crate::model::{ProjectData, Tempo, TimeSignature, Track, UfData};
use crate::params::{PartialGenerateParams, PartialParseParams};
use crate::translate::{self, LONG_VOWEL_MARK};
use crate::Result;

#[cfg(feature = "japanese-lyrics")]
use crate::lyrics::{
    self, ConvertJapaneseLyricsOptions, JapaneseLyricsType, LyricsTypeSelector,
};

/// A canonical project with conversion methods
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    data: UfData,
}

/// `from_*` constructors for single-file formats
macro_rules! single_file_parsers {
    ($($(#[$meta:meta])* $name:ident => $format:expr;)*) => {
        $(
            $(#[$meta])*
            pub async fn $name<E: ConversionEngine>(
                converter: &Converter<E>,
                file: SourceFile,
                params: Option<&PartialParseParams>,
            ) -> Result<Project> {
                Self::parse(converter, $format, file, params).await
            }
        )*
    };
}

/// `to_*` methods for formats generated as a single file
macro_rules! single_file_generators {
    ($($(#[$meta:meta])* $name:ident => $format:expr;)*) => {
        $(
            $(#[$meta])*
            pub async fn $name<E: ConversionEngine>(
                &self,
                converter: &Converter<E>,
                params: Option<&PartialGenerateParams>,
            ) -> Result<Vec<u8>> {
                self.generate(converter, $format, params).await
            }
        )*
    };
}

impl Project {
    /// Wrap a ufdata document
    pub fn new(data: UfData) -> Self {
        Project { data }
    }

    /// The underlying document
    pub fn data(&self) -> &UfData {
        &self.data
    }

    /// A copy of the underlying document
    pub fn to_uf_data(&self) -> UfData {
        self.data.clone()
    }

    /// Unwrap the underlying document
    pub fn into_uf_data(self) -> UfData {
        self.data
    }

    /// Leading measures that cannot hold notes
    pub fn measure_prefix(&self) -> u32 {
        self.data.project.measure_prefix
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.data.project.name
    }

    /// Tempo changes
    pub fn tempos(&self) -> &[Tempo] {
        &self.data.project.tempos
    }

    /// Time signature changes
    pub fn time_signatures(&self) -> &[TimeSignature] {
        &self.data.project.time_signatures
    }

    /// Tracks in source order
    pub fn tracks(&self) -> &[Track] {
        &self.data.project.tracks
    }

    fn with_project(&self, project: ProjectData) -> Project {
        Project {
            data: UfData {
                format_version: self.data.format_version,
                project,
            },
        }
    }

    /// Parse a file of a known format
    pub async fn parse<E: ConversionEngine>(
        converter: &Converter<E>,
        format: Format,
        file: SourceFile,
        params: Option<&PartialParseParams>,
    ) -> Result<Project> {
        converter.parse(format, file, params).await.map(Project::new)
    }

    /// Parse a file, choosing the format from its extension
    pub async fn from_any<E: ConversionEngine>(
        converter: &Converter<E>,
        file: SourceFile,
        params: Option<&PartialParseParams>,
    ) -> Result<Project> {
        converter.parse_any(file, params).await.map(Project::new)
    }

    /// Parse one or more UTAU files, one per track
    pub async fn from_ust<E: ConversionEngine>(
        converter: &Converter<E>,
        files: Vec<SourceFile>,
        params: Option<&PartialParseParams>,
    ) -> Result<Project> {
        converter
            .parse_files(Format::Ust, files, params)
            .await
            .map(Project::new)
    }

    single_file_parsers! {
        /// Parse a CeVIO project
        from_ccs => Format::Ccs;
        /// Parse a DeepVocal project
        from_dv => Format::Dv;
        /// Parse a MusicXML score
        from_music_xml => Format::MusicXml;
        /// Parse a Piapro Studio project
        from_ppsf => Format::Ppsf;
        /// Parse a legacy Synthesizer V project
        from_s5p => Format::S5p;
        /// Parse a Standard MIDI file
        from_standard_mid => Format::StandardMid;
        /// Parse a Synthesizer V Studio project
        from_svp => Format::Svp;
        /// Parse a VoiSona project
        from_tssln => Format::Tssln;
        /// Parse a ufdata document
        from_ufdata => Format::UfData;
        /// Parse an OpenUtau project
        from_ustx => Format::Ustx;
        /// Parse a VOCALOID 1 MIDI file
        from_vocaloid_mid => Format::VocaloidMid;
        /// Parse a VOCALOID 5 project
        from_vpr => Format::Vpr;
        /// Parse a VOCALOID 2 sequence
        from_vsq => Format::Vsq;
        /// Parse a VOCALOID 3/4 project
        from_vsqx => Format::Vsqx;
    }

    /// Generate `format` as a single file
    pub async fn generate<E: ConversionEngine>(
        &self,
        converter: &Converter<E>,
        format: Format,
        params: Option<&PartialGenerateParams>,
    ) -> Result<Vec<u8>> {
        converter.generate(format, &self.data, params).await
    }

    single_file_generators! {
        /// Generate a CeVIO project
        to_ccs => Format::Ccs;
        /// Generate a DeepVocal project
        to_dv => Format::Dv;
        /// Generate a legacy Synthesizer V project
        to_s5p => Format::S5p;
        /// Generate a Standard MIDI file
        to_standard_mid => Format::StandardMid;
        /// Generate a Synthesizer V Studio project
        to_svp => Format::Svp;
        /// Generate a VoiSona project
        to_tssln => Format::Tssln;
        /// Generate a ufdata document
        to_ufdata => Format::UfData;
        /// Generate an OpenUtau project
        to_ustx => Format::Ustx;
        /// Generate a VOCALOID 1 MIDI file
        to_vocaloid_mid => Format::VocaloidMid;
        /// Generate a VOCALOID 5 project
        to_vpr => Format::Vpr;
        /// Generate a VOCALOID 2 sequence
        to_vsq => Format::Vsq;
        /// Generate a VOCALOID 3/4 project
        to_vsqx => Format::Vsqx;
    }

    /// Generate one UTAU file per track, in track order
    #[cfg(feature = "archive")]
    pub async fn to_ust<E: ConversionEngine>(
        &self,
        converter: &Converter<E>,
        params: Option<&PartialGenerateParams>,
    ) -> Result<Vec<Vec<u8>>> {
        converter
            .generate_per_track(Format::Ust, &self.data, params)
            .await
    }

    /// Generate one MusicXML score per track, in track order
    #[cfg(feature = "archive")]
    pub async fn to_music_xml<E: ConversionEngine>(
        &self,
        converter: &Converter<E>,
        params: Option<&PartialGenerateParams>,
    ) -> Result<Vec<Vec<u8>>> {
        converter
            .generate_per_track(Format::MusicXml, &self.data, params)
            .await
    }

    /// Drop breath notes from every track
    pub fn remove_breaths(&self) -> Project {
        self.with_project(self.data.project.map_tracks(translate::remove_breaths))
    }

    /// Replace vowel connection markers in every lyric
    ///
    /// Pass `None` for the prolongation mark `ー`.
    pub fn replace_vowel_connections(&self, replacement: Option<&str>) -> Project {
        let replacement = replacement.unwrap_or(LONG_VOWEL_MARK);
        self.with_project(
            self.data
                .project
                .map_tracks(|track| translate::replace_vowel_connections(track, replacement)),
        )
    }

    /// Detect the Japanese lyric notation
    #[cfg(feature = "japanese-lyrics")]
    pub fn analyze_japanese_lyrics_type(&self) -> JapaneseLyricsType {
        lyrics::analyze_japanese_lyrics_type(&self.data.project)
    }

    /// Rewrite lyrics into another Japanese notation
    ///
    /// With [`LyricsTypeSelector::Auto`] the source notation is detected
    /// first; an undetectable notation leaves the lyrics unchanged.
    #[cfg(feature = "japanese-lyrics")]
    pub fn convert_japanese_lyrics(
        &self,
        from: impl Into<LyricsTypeSelector>,
        to: JapaneseLyricsType,
        options: Option<&ConvertJapaneseLyricsOptions>,
    ) -> Project {
        let from = match from.into() {
            LyricsTypeSelector::Auto => self.analyze_japanese_lyrics_type(),
            LyricsTypeSelector::Known(from) => from,
        };
        self.with_project(lyrics::convert_japanese_lyrics(
            &self.data.project,
            from,
            to,
            options,
        ))
    }
}

impl From<UfData> for Project {
    fn from(data: UfData) -> Self {
        Project::new(data)
    }
}
