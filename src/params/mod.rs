//! Parameter Resolution
//!
//! Callers pass partial option objects; every call resolves them against
//! per-direction defaults with a right-biased shallow merge. Resolved parse
//! parameters are then narrowed to what the engine accepts for the format in
//! question, and generate parameters become an engine feature list.
//!
//! The defaults are constants. [`crate::ConverterConfig`] can substitute other
//! base values per converter, but nothing here is mutable global state.

use serde::{Deserialize, Serialize};

use crate::engine::{Feature, ImportParams};
use crate::format::Format;

/// Fully resolved parse options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseParams {
    /// Import pitch curves
    pub pitch: bool,
    /// Lyric given to notes that have none
    pub default_lyric: String,
    /// Translate UTAU lyric conventions after parsing
    pub translate_dialect: bool,
}

impl ParseParams {
    /// Parse defaults
    pub const DEFAULT: ParseParams = ParseParams {
        pitch: true,
        default_lyric: String::new(),
        translate_dialect: false,
    };

    /// Overlay `partial` on these values; fields absent from `partial` are kept
    pub fn merge(&self, partial: Option<&PartialParseParams>) -> ParseParams {
        let Some(partial) = partial else {
            return self.clone();
        };
        ParseParams {
            pitch: partial.pitch.unwrap_or(self.pitch),
            default_lyric: partial
                .default_lyric
                .clone()
                .unwrap_or_else(|| self.default_lyric.clone()),
            translate_dialect: partial.translate_dialect.unwrap_or(self.translate_dialect),
        }
    }

    /// Narrow to the options the engine accepts for `format`
    ///
    /// `translate_dialect` never crosses the engine boundary.
    pub fn import_params_for(&self, format: Format) -> ImportParams {
        ImportParams {
            pitch: format.carries_pitch().then_some(self.pitch),
            default_lyric: format
                .may_omit_lyrics()
                .then(|| self.default_lyric.clone()),
        }
    }
}

impl Default for ParseParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fully resolved generate options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateParams {
    /// Export pitch curves
    pub pitch: bool,
    /// Translate UTAU lyric conventions before generating
    pub translate_dialect: bool,
}

impl GenerateParams {
    /// Generate defaults
    pub const DEFAULT: GenerateParams = GenerateParams {
        pitch: false,
        translate_dialect: false,
    };

    /// Overlay `partial` on these values; fields absent from `partial` are kept
    pub fn merge(&self, partial: Option<&PartialGenerateParams>) -> GenerateParams {
        let Some(partial) = partial else {
            return *self;
        };
        GenerateParams {
            pitch: partial.pitch.unwrap_or(self.pitch),
            translate_dialect: partial.translate_dialect.unwrap_or(self.translate_dialect),
        }
    }

    /// Engine features enabled by these options
    pub fn features(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        if self.pitch {
            features.push(Feature::ConvertPitch);
        }
        features
    }
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Caller-supplied parse options; `None` fields fall back to defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialParseParams {
    /// See [`ParseParams::pitch`]
    pub pitch: Option<bool>,
    /// See [`ParseParams::default_lyric`]
    pub default_lyric: Option<String>,
    /// See [`ParseParams::translate_dialect`]
    pub translate_dialect: Option<bool>,
}

impl PartialParseParams {
    /// Set `pitch`
    pub fn pitch(mut self, pitch: bool) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Set `default_lyric`
    pub fn default_lyric(mut self, lyric: impl Into<String>) -> Self {
        self.default_lyric = Some(lyric.into());
        self
    }

    /// Set `translate_dialect`
    pub fn translate_dialect(mut self, translate: bool) -> Self {
        self.translate_dialect = Some(translate);
        self
    }
}

/// Caller-supplied generate options; `None` fields fall back to defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialGenerateParams {
    /// See [`GenerateParams::pitch`]
    pub pitch: Option<bool>,
    /// See [`GenerateParams::translate_dialect`]
    pub translate_dialect: Option<bool>,
}

impl PartialGenerateParams {
    /// Set `pitch`
    pub fn pitch(mut self, pitch: bool) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Set `translate_dialect`
    pub fn translate_dialect(mut self, translate: bool) -> Self {
        self.translate_dialect = Some(translate);
        self
    }
}

/// Resolve parse options against [`ParseParams::DEFAULT`]
pub fn resolve_parse(partial: Option<&PartialParseParams>) -> ParseParams {
    ParseParams::DEFAULT.merge(partial)
}

/// Resolve generate options against [`GenerateParams::DEFAULT`]
pub fn resolve_generate(partial: Option<&PartialGenerateParams>) -> GenerateParams {
    GenerateParams::DEFAULT.merge(partial)
}
