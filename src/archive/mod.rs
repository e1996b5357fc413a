//! Per-track Archive Splitting
//!
//! Formats that store one file per track (UST, MusicXML) are generated by the
//! engine as a single ZIP archive. Entries are named
//! `{project name}_{track index}_{track name}.{ext}`; this module decodes the
//! archive and returns the entries ordered by track index, so output `i`
//! belongs to source track `i` whatever order the archive lists them in.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use tracing::{debug, trace};
use zip::ZipArchive;

use crate::{ConvertError, Result};

/// Extract the track index from an archive entry name
///
/// Strips the literal `{project_name}_` prefix, then parses the text up to the
/// next `_` as a base-10 integer. Any other shape is rejected.
pub fn parse_track_index(entry_name: &str, project_name: &str) -> Result<usize> {
    let prefix = format!("{}_", project_name);
    let rest = entry_name.strip_prefix(&prefix).unwrap_or(entry_name);
    let token = rest.split('_').next().unwrap_or_default();

    token
        .parse::<usize>()
        .map_err(|_| ConvertError::MalformedArchiveEntry {
            name: entry_name.to_string(),
        })
}

/// Split a per-track ZIP export into one buffer per track
///
/// # Arguments
///
/// * `data` - Raw ZIP bytes produced by the engine
/// * `project_name` - Name of the generated project, as used in entry names
///
/// # Errors
///
/// - [`ConvertError::CannotReadFile`] if the bytes are not a readable ZIP or
///   an entry is truncated or fails its checksum
/// - [`ConvertError::MalformedArchiveEntry`] if an entry name carries no index
/// - [`ConvertError::DuplicateArchiveEntry`] if two entries share an index
pub fn split_track_archive(data: &[u8], project_name: &str) -> Result<Vec<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ConvertError::CannotReadFile(format!("Not a valid ZIP archive: {}", e)))?;
    let mut tracks: BTreeMap<usize, Vec<u8>> = BTreeMap::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            ConvertError::CannotReadFile(format!("Cannot read ZIP entry {}: {}", i, e))
        })?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let index = parse_track_index(&name, project_name)?;
        if tracks.contains_key(&index) {
            return Err(ConvertError::DuplicateArchiveEntry { index, name });
        }

        // Declared sizes are untrusted, so the buffer grows as data is read
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(|e| {
            ConvertError::CannotReadFile(format!("Corrupted ZIP entry '{}': {}", name, e))
        })?;
        trace!(entry = %name, index, size = bytes.len(), "decoded archive entry");
        tracks.insert(index, bytes);
    }

    debug!(tracks = tracks.len(), "split track archive");
    Ok(tracks.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        build_zip_with(entries, SimpleFileOptions::default())
    }

    fn build_zip_with(entries: &[(&str, &str)], options: SimpleFileOptions) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_parse_track_index() {
        assert_eq!(parse_track_index("song_3_Lead.ust", "song").unwrap(), 3);
        assert_eq!(parse_track_index("my_song_12_a_b.ust", "my_song").unwrap(), 12);
    }

    #[test]
    fn test_parse_track_index_rejects_non_numeric() {
        let err = parse_track_index("song_lead_3.ust", "song").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedArchiveEntry { name } if name == "song_lead_3.ust"));
        assert!(parse_track_index("other_x.ust", "song").is_err());
    }

    #[test]
    fn test_split_orders_numerically() {
        let zip = build_zip(&[
            ("p_10_k.ust", "ten"),
            ("p_2_c.ust", "two"),
            ("p_0_a.ust", "zero"),
            ("p_1_b.ust", "one"),
        ]);
        let tracks = split_track_archive(&zip, "p").unwrap();
        let decoded: Vec<&str> = tracks
            .iter()
            .map(|t| std::str::from_utf8(t).unwrap())
            .collect();
        assert_eq!(decoded, vec!["zero", "one", "two", "ten"]);
    }

    #[test]
    fn test_split_rejects_duplicate_index() {
        let zip = build_zip(&[("p_0_a.ust", "a"), ("p_0_b.ust", "b")]);
        let err = split_track_archive(&zip, "p").unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateArchiveEntry { index: 0, .. }));
    }

    #[test]
    fn test_split_fails_fast_on_bad_name() {
        let zip = build_zip(&[("p_0_a.ust", "a"), ("readme.txt", "b")]);
        let err = split_track_archive(&zip, "p").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedArchiveEntry { .. }));
    }

    #[test]
    fn test_split_rejects_non_zip() {
        let err = split_track_archive(b"definitely not a zip archive, just some text", "p").unwrap_err();
        assert!(matches!(err, ConvertError::CannotReadFile(_)));
    }

    const PAYLOAD: &str = "NoteNum=60 NoteNum=62 NoteNum=64 NoteNum=65";

    /// Flip bytes inside the stored payload of the single entry
    fn corrupt_payload(mut zip: Vec<u8>) -> Vec<u8> {
        let start = zip
            .windows(PAYLOAD.len())
            .position(|w| w == PAYLOAD.as_bytes())
            .unwrap();
        for byte in &mut zip[start + 4..start + 19] {
            *byte ^= 0xFF;
        }
        zip
    }

    #[test]
    fn test_split_rejects_checksum_mismatch() {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let zip = corrupt_payload(build_zip_with(&[("p_0_a.ust", PAYLOAD)], options));
        let err = split_track_archive(&zip, "p").unwrap_err();
        assert!(matches!(err, ConvertError::CannotReadFile(_)), "{err:?}");
    }

    #[test]
    fn test_split_rejects_truncated_archive() {
        let zip = build_zip(&[("p_0_a.ust", PAYLOAD), ("p_1_b.ust", PAYLOAD)]);
        for cut in [10, 30, zip.len() / 2] {
            let err = split_track_archive(&zip[..zip.len() - cut], "p").unwrap_err();
            assert!(matches!(err, ConvertError::CannotReadFile(_)), "cut {cut}: {err:?}");
        }
    }

    #[test]
    fn test_split_ignores_declared_entry_size() {
        // Uncompressed size in the central directory header, forged to ~4 GiB
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut zip = build_zip_with(&[("p_0_a.ust", "x")], options);
        let central = zip
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        zip[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        let tracks = split_track_archive(&zip, "p").unwrap();
        assert_eq!(tracks, vec![b"x".to_vec()]);
    }

    #[test]
    fn test_split_empty_archive() {
        let zip = build_zip(&[]);
        assert!(split_track_archive(&zip, "p").unwrap().is_empty());
    }
}
