//! External Engine Boundary
//!
//! The conversion engine decodes and encodes the proprietary formats. This
//! crate only consumes its contract, expressed as [`ConversionEngine`], so the
//! engine can be swapped for another implementation or stubbed in tests.

mod ufdata;

pub use ufdata::UfDataEngine;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::format::Format;
use crate::model::UfData;
use crate::{ConvertError, Result};

/// Options the engine understands when parsing
///
/// A `None` field means the format's native parser takes no such option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportParams {
    /// Import pitch curves
    pub pitch: Option<bool>,
    /// Lyric for notes without one
    pub default_lyric: Option<String>,
}

/// Optional behaviors requested from the engine when generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Write pitch curves to the output
    ConvertPitch,
}

/// Capability interface of the external conversion engine
///
/// Both operations are asynchronous and may fail with any of the engine error
/// cases of [`ConvertError`]; callers propagate those unchanged.
#[async_trait]
pub trait ConversionEngine: Send + Sync {
    /// Parse one or more files of `format` into a canonical project
    async fn parse(
        &self,
        format: Format,
        files: Vec<SourceFile>,
        params: ImportParams,
    ) -> Result<UfData>;

    /// Generate `format` from a canonical project
    ///
    /// Formats that export one file per track return a zip archive whose
    /// entries are named `{project}_{track index}_{track name}.{ext}`.
    async fn generate(
        &self,
        format: Format,
        project: &UfData,
        features: &[Feature],
    ) -> Result<Vec<u8>>;
}

#[async_trait]
impl<E: ConversionEngine + ?Sized> ConversionEngine for Arc<E> {
    async fn parse(
        &self,
        format: Format,
        files: Vec<SourceFile>,
        params: ImportParams,
    ) -> Result<UfData> {
        (**self).parse(format, files, params).await
    }

    async fn generate(
        &self,
        format: Format,
        project: &UfData,
        features: &[Feature],
    ) -> Result<Vec<u8>> {
        (**self).generate(format, project, features).await
    }
}

/// An input file: raw bytes with an optional file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: Option<String>,
    data: Vec<u8>,
}

impl SourceFile {
    /// Create a named file
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            name: Some(name.into()),
            data: data.into(),
        }
    }

    /// Create an anonymous file from bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            name: None,
            data: data.into(),
        }
    }

    /// Read a file from disk, keeping its file name
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            ConvertError::CannotReadFile(format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(SourceFile { name, data })
    }

    /// File name, if known
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// File contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the file, returning its contents
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Lowercased extension of the file name
    pub fn extension(&self) -> Option<String> {
        self.name.as_deref().and_then(crate::format::extension_of)
    }

    /// Name anonymous files after `format`: `data.{ext}`, or `data_{index}.{ext}`
    /// for members of a multi-file input
    pub(crate) fn named_for(self, format: Format, index: Option<usize>) -> Self {
        if self.name.is_some() {
            return self;
        }
        let name = match index {
            Some(index) => format!("data_{}.{}", index, format.extension()),
            None => format!("data.{}", format.extension()),
        };
        SourceFile {
            name: Some(name),
            data: self.data,
        }
    }
}

impl From<Vec<u8>> for SourceFile {
    fn from(data: Vec<u8>) -> Self {
        SourceFile::from_bytes(data)
    }
}

impl From<&[u8]> for SourceFile {
    fn from(data: &[u8]) -> Self {
        SourceFile::from_bytes(data)
    }
}
