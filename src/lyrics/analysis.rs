//! Notation detection

use tracing::debug;

use super::kana::{is_kana, is_romaji};
use super::JapaneseLyricsType;
use crate::model::{ProjectData, Track};

/// Split a VCV lyric into its vowel prefix and syllable
///
/// Returns `None` for lyrics without a `prefix syllable` shape.
pub(super) fn split_vcv(lyric: &str) -> Option<(&str, &str)> {
    let (prefix, core) = lyric.trim().rsplit_once(' ')?;
    let prefix = prefix.trim();
    (!prefix.is_empty() && !core.is_empty()).then_some((prefix, core))
}

#[derive(Debug, Default)]
struct Tally {
    kana: usize,
    kana_vcv: usize,
    romaji: usize,
    romaji_vcv: usize,
}

fn classify_track(track: &Track) -> JapaneseLyricsType {
    let mut tally = Tally::default();

    for note in &track.notes {
        let (is_vcv, core) = match split_vcv(&note.lyric) {
            Some((_, core)) => (true, core),
            None => (false, note.lyric.trim()),
        };
        if core.chars().any(is_kana) {
            tally.kana += 1;
            tally.kana_vcv += usize::from(is_vcv);
        } else if is_romaji(core) {
            tally.romaji += 1;
            tally.romaji_vcv += usize::from(is_vcv);
        }
    }

    let total = track.notes.len();
    if tally.kana * 2 > total {
        if tally.kana_vcv * 2 > tally.kana {
            JapaneseLyricsType::KanaVcv
        } else {
            JapaneseLyricsType::KanaCv
        }
    } else if tally.romaji * 2 > total {
        if tally.romaji_vcv * 2 > tally.romaji {
            JapaneseLyricsType::RomajiVcv
        } else {
            JapaneseLyricsType::RomajiCv
        }
    } else {
        JapaneseLyricsType::Unknown
    }
}

/// Detect the lyric notation of a project
///
/// Only tracks holding at least half as many notes as the largest track take
/// part, so a sparse harmony or effect track does not outvote the lead. Each
/// of those tracks is classified on its own; the project gets their common
/// notation, or [`JapaneseLyricsType::Unknown`] when they disagree.
pub fn analyze_japanese_lyrics_type(project: &ProjectData) -> JapaneseLyricsType {
    let max_notes = project
        .tracks
        .iter()
        .map(|track| track.notes.len())
        .max()
        .unwrap_or(0);
    if max_notes == 0 {
        return JapaneseLyricsType::Unknown;
    }

    let mut result: Option<JapaneseLyricsType> = None;
    for track in project
        .tracks
        .iter()
        .filter(|track| !track.notes.is_empty() && track.notes.len() * 2 >= max_notes)
    {
        let kind = classify_track(track);
        debug!(track = %track.name, notes = track.notes.len(), %kind, "classified lyrics");
        match result {
            None => result = Some(kind),
            Some(previous) if previous != kind => return JapaneseLyricsType::Unknown,
            Some(_) => {}
        }
    }

    result.unwrap_or_default()
}
