//! Built-in engine for UtaFormatix data itself

use async_trait::async_trait;

use super::{ConversionEngine, Feature, ImportParams, SourceFile};
use crate::format::Format;
use crate::model::{read_ufdata, write_ufdata, ProjectData, Track, UfData};
use crate::{ConvertError, Result};

/// Engine handling only [`Format::UfData`]
///
/// Useful on its own for reading and writing canonical documents, and as the
/// fallback engine in tests. Every other format is reported as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct UfDataEngine;

impl UfDataEngine {
    fn ensure_handled(format: Format) -> Result<()> {
        if format == Format::UfData {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedFormat(format!(
                "{} is not handled by the built-in ufdata engine",
                format
            )))
        }
    }
}

fn without_pitch(project: &ProjectData) -> ProjectData {
    project.map_tracks(|track| Track {
        pitch: None,
        ..track.clone()
    })
}

#[async_trait]
impl ConversionEngine for UfDataEngine {
    async fn parse(
        &self,
        format: Format,
        files: Vec<SourceFile>,
        params: ImportParams,
    ) -> Result<UfData> {
        Self::ensure_handled(format)?;

        let [file]: [SourceFile; 1] = files.try_into().map_err(|files: Vec<SourceFile>| {
            ConvertError::CannotReadFile(format!(
                "ufdata expects exactly one file, got {}",
                files.len()
            ))
        })?;

        let mut data = read_ufdata(file.data())?;
        if params.pitch == Some(false) {
            data.project = without_pitch(&data.project);
        }
        Ok(data)
    }

    async fn generate(
        &self,
        format: Format,
        project: &UfData,
        features: &[Feature],
    ) -> Result<Vec<u8>> {
        Self::ensure_handled(format)?;

        if features.contains(&Feature::ConvertPitch) {
            write_ufdata(project)
        } else {
            write_ufdata(&UfData::new(without_pitch(&project.project)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Note, Pitch};

    fn pitched() -> UfData {
        UfData::new(ProjectData {
            name: "p".into(),
            tracks: vec![Track {
                name: "t".into(),
                notes: vec![Note {
                    key: 60,
                    tick_on: 0,
                    tick_off: 480,
                    lyric: "あ".into(),
                    phoneme: None,
                }],
                pitch: Some(Pitch {
                    ticks: vec![0],
                    values: vec![Some(1.0)],
                    is_absolute: false,
                }),
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_generate_strips_pitch_without_feature() {
        let bytes = UfDataEngine
            .generate(Format::UfData, &pitched(), &[])
            .await
            .unwrap();
        let back = read_ufdata(&bytes).unwrap();
        assert!(back.project.tracks[0].pitch.is_none());

        let bytes = UfDataEngine
            .generate(Format::UfData, &pitched(), &[Feature::ConvertPitch])
            .await
            .unwrap();
        assert_eq!(read_ufdata(&bytes).unwrap(), pitched());
    }

    #[tokio::test]
    async fn test_parse_honors_pitch_param() {
        let bytes = write_ufdata(&pitched()).unwrap();
        let params = ImportParams {
            pitch: Some(false),
            default_lyric: None,
        };
        let data = UfDataEngine
            .parse(Format::UfData, vec![SourceFile::from_bytes(bytes)], params)
            .await
            .unwrap();
        assert!(data.project.tracks[0].pitch.is_none());
    }

    #[tokio::test]
    async fn test_other_formats_unsupported() {
        let err = UfDataEngine
            .generate(Format::Svp, &pitched(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
    }
}
