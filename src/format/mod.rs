//! Format Table & Extension Dispatch
//!
//! Describes every supported project format and what the conversion engine
//! can do with it, and maps file extensions to formats for auto-detection.

use std::fmt;

/// Supported project file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// CeVIO project (`.ccs`)
    Ccs,
    /// DeepVocal project (`.dv`)
    Dv,
    /// MusicXML score (`.musicxml`, `.xml`)
    MusicXml,
    /// Piapro Studio project (`.ppsf`)
    Ppsf,
    /// Legacy Synthesizer V project (`.s5p`)
    S5p,
    /// Standard MIDI file (`.mid`)
    StandardMid,
    /// Synthesizer V Studio project (`.svp`)
    Svp,
    /// VoiSona project (`.tssln`)
    Tssln,
    /// UtaFormatix data (`.ufdata`)
    UfData,
    /// UTAU sequence (`.ust`), one file per track
    Ust,
    /// OpenUtau project (`.ustx`)
    Ustx,
    /// VOCALOID 1 MIDI file (`.mid`)
    VocaloidMid,
    /// VOCALOID 5 project (`.vpr`)
    Vpr,
    /// VOCALOID 2 project (`.vsq`)
    Vsq,
    /// VOCALOID 3/4 project (`.vsqx`)
    Vsqx,
}

/// Extension to format mapping used by extension-based dispatch
///
/// `mid` resolves to Standard MIDI; VOCALOID MIDI must be requested explicitly.
pub const EXTENSION_TABLE: &[(&str, Format)] = &[
    ("ccs", Format::Ccs),
    ("dv", Format::Dv),
    ("musicxml", Format::MusicXml),
    ("xml", Format::MusicXml),
    ("ppsf", Format::Ppsf),
    ("s5p", Format::S5p),
    ("mid", Format::StandardMid),
    ("svp", Format::Svp),
    ("tssln", Format::Tssln),
    ("ufdata", Format::UfData),
    ("ust", Format::Ust),
    ("ustx", Format::Ustx),
    ("vpr", Format::Vpr),
    ("vsq", Format::Vsq),
    ("vsqx", Format::Vsqx),
];

impl Format {
    /// All formats
    pub const ALL: [Format; 15] = [
        Format::Ccs,
        Format::Dv,
        Format::MusicXml,
        Format::Ppsf,
        Format::S5p,
        Format::StandardMid,
        Format::Svp,
        Format::Tssln,
        Format::UfData,
        Format::Ust,
        Format::Ustx,
        Format::VocaloidMid,
        Format::Vpr,
        Format::Vsq,
        Format::Vsqx,
    ];

    /// Look up a format by extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.to_ascii_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|&(_, format)| format)
    }

    /// Look up a format from a file name's extension
    pub fn from_file_name(name: &str) -> Option<Format> {
        extension_of(name).and_then(|ext| Format::from_extension(&ext))
    }

    /// Primary extension, used to name anonymous inputs
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ccs => "ccs",
            Format::Dv => "dv",
            Format::MusicXml => "musicxml",
            Format::Ppsf => "ppsf",
            Format::S5p => "s5p",
            Format::StandardMid | Format::VocaloidMid => "mid",
            Format::Svp => "svp",
            Format::Tssln => "tssln",
            Format::UfData => "ufdata",
            Format::Ust => "ust",
            Format::Ustx => "ustx",
            Format::Vpr => "vpr",
            Format::Vsq => "vsq",
            Format::Vsqx => "vsqx",
        }
    }

    /// Human-readable format name
    pub fn name(self) -> &'static str {
        match self {
            Format::Ccs => "CeVIO",
            Format::Dv => "DeepVocal",
            Format::MusicXml => "MusicXML",
            Format::Ppsf => "Piapro Studio",
            Format::S5p => "Synthesizer V (legacy)",
            Format::StandardMid => "Standard MIDI",
            Format::Svp => "Synthesizer V Studio",
            Format::Tssln => "VoiSona",
            Format::UfData => "UtaFormatix data",
            Format::Ust => "UTAU",
            Format::Ustx => "OpenUtau",
            Format::VocaloidMid => "VOCALOID 1 MIDI",
            Format::Vpr => "VOCALOID 5",
            Format::Vsq => "VOCALOID 2",
            Format::Vsqx => "VOCALOID 3/4",
        }
    }

    /// Whether the engine can write this format
    pub fn can_generate(self) -> bool {
        !matches!(self, Format::Ppsf)
    }

    /// Whether generation yields a zip holding one file per track
    pub fn exports_track_archive(self) -> bool {
        matches!(self, Format::MusicXml | Format::Ust)
    }

    /// Whether several input files can be merged into one project
    pub fn accepts_multiple_files(self) -> bool {
        matches!(self, Format::Ust)
    }

    /// Whether the format stores pitch curves
    pub fn carries_pitch(self) -> bool {
        !matches!(self, Format::StandardMid | Format::MusicXml | Format::Ppsf)
    }

    /// Whether notes of this format may come without lyric text
    pub fn may_omit_lyrics(self) -> bool {
        matches!(
            self,
            Format::StandardMid | Format::VocaloidMid | Format::MusicXml
        )
    }

    /// Whether lyrics follow UTAU conventions (`R` breaths, `+`/`-` connections)
    pub fn uses_utau_dialect(self) -> bool {
        matches!(self, Format::Ust | Format::Ustx)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of a file name: the text after the last `.`, lowercased
///
/// Returns `None` when the name has no dot or ends with one.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
