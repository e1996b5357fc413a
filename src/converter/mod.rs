//! Uniform Parse/Generate Dispatch
//!
//! [`Converter`] wraps a [`ConversionEngine`] and gives every format the same
//! entry points. It resolves caller options against its configured defaults,
//! narrows them to what the engine accepts for the format, applies dialect
//! translation on the way in or out, and splits per-track exports.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::{ConversionEngine, SourceFile};
use crate::format::Format;
use crate::model::UfData;
use crate::params::{GenerateParams, ParseParams, PartialGenerateParams, PartialParseParams};
use crate::translate::{translate_project, Direction};
use crate::{ConvertError, Result};

/// Base parameter values of a [`Converter`]
///
/// Caller options are merged on top of these. Missing fields deserialize to
/// the built-in defaults, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterConfig {
    /// Defaults for parsing
    pub parse: ParseParams,
    /// Defaults for generating
    pub generate: GenerateParams,
}

impl ConverterConfig {
    /// Load a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Format-independent front end over a conversion engine
#[derive(Debug, Clone)]
pub struct Converter<E> {
    engine: E,
    config: ConverterConfig,
}

impl<E: ConversionEngine> Converter<E> {
    /// Create a converter with the built-in defaults
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, ConverterConfig::default())
    }

    /// Create a converter with custom default parameters
    pub fn with_config(engine: E, config: ConverterConfig) -> Self {
        Converter { engine, config }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The default parameters in use
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parse a single file of `format`
    pub async fn parse(
        &self,
        format: Format,
        file: SourceFile,
        params: Option<&PartialParseParams>,
    ) -> Result<UfData> {
        self.parse_files(format, vec![file], params).await
    }

    /// Parse one or more files of `format` into one project
    ///
    /// Only formats that accept multiple files (UST) take more than one.
    pub async fn parse_files(
        &self,
        format: Format,
        files: Vec<SourceFile>,
        params: Option<&PartialParseParams>,
    ) -> Result<UfData> {
        if files.len() != 1 && !format.accepts_multiple_files() {
            return Err(ConvertError::CannotReadFile(format!(
                "{} takes exactly one file, got {}",
                format,
                files.len()
            )));
        }
        if files.is_empty() {
            return Err(ConvertError::CannotReadFile(format!(
                "No {} file given",
                format
            )));
        }

        let params = self.config.parse.merge(params);
        let multiple = files.len() > 1;
        let files: Vec<SourceFile> = files
            .into_iter()
            .enumerate()
            .map(|(i, file)| file.named_for(format, multiple.then_some(i)))
            .collect();

        debug!(%format, files = files.len(), ?params, "parsing");
        let mut data = self
            .engine
            .parse(format, files, params.import_params_for(format))
            .await?;

        if params.translate_dialect {
            if let Some(project) = translate_project(&data.project, Direction::Imported(format)) {
                debug!(%format, "translated UTAU dialect after parse");
                data.project = project;
            }
        }

        info!(
            %format,
            name = %data.project.name,
            tracks = data.project.tracks.len(),
            "parsed project"
        );
        Ok(data)
    }

    /// Parse a file, choosing the format from its extension
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedFormat`] if the file has no name or its
    /// extension maps to no format.
    pub async fn parse_any(
        &self,
        file: SourceFile,
        params: Option<&PartialParseParams>,
    ) -> Result<UfData> {
        let format = Self::detect_format(&file)?;
        self.parse(format, file, params).await
    }

    fn detect_format(file: &SourceFile) -> Result<Format> {
        let ext = file.extension().ok_or_else(|| {
            ConvertError::UnsupportedFormat(format!(
                "Cannot detect the format of '{}': no file extension",
                file.name().unwrap_or("<unnamed>")
            ))
        })?;
        Format::from_extension(&ext).ok_or_else(|| {
            ConvertError::UnsupportedFormat(format!("Unknown file extension '.{}'", ext))
        })
    }

    /// Generate a single file of `format`
    ///
    /// For formats that export one file per track the engine's ZIP archive is
    /// returned as is; see [`Converter::generate_per_track`].
    pub async fn generate(
        &self,
        format: Format,
        data: &UfData,
        params: Option<&PartialGenerateParams>,
    ) -> Result<Vec<u8>> {
        if !format.can_generate() {
            return Err(ConvertError::UnsupportedFormat(format!(
                "{} can only be imported",
                format
            )));
        }

        let params = self.config.generate.merge(params);
        let translated = if params.translate_dialect {
            translate_project(&data.project, Direction::Exporting(format)).map(UfData::new)
        } else {
            None
        };
        let data = translated.as_ref().unwrap_or(data);

        debug!(%format, ?params, translated = translated.is_some(), "generating");
        let bytes = self
            .engine
            .generate(format, data, &params.features())
            .await?;
        info!(%format, size = bytes.len(), "generated project");
        Ok(bytes)
    }

    /// Generate a per-track format, returning one file per track
    ///
    /// Output `i` belongs to track `i` of `data`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedFormat`] for formats that export a single
    /// file, plus any archive or engine error.
    #[cfg(feature = "archive")]
    pub async fn generate_per_track(
        &self,
        format: Format,
        data: &UfData,
        params: Option<&PartialGenerateParams>,
    ) -> Result<Vec<Vec<u8>>> {
        if !format.exports_track_archive() {
            return Err(ConvertError::UnsupportedFormat(format!(
                "{} does not export one file per track",
                format
            )));
        }
        let archive = self.generate(format, data, params).await?;
        crate::archive::split_track_archive(&archive, &data.project.name)
    }
}
