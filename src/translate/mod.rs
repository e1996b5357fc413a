//! Dialect Translation
//!
//! UTAU writes breaths as notes whose lyric ends in `R` and marks vowel
//! connections with `+` or `-`, where most other editors expect a
//! prolongation mark (`ー`). These functions rewrite a track from one
//! convention to the other. They never modify their input.

use tracing::trace;

use crate::format::Format;
use crate::model::{Note, ProjectData, Track};

/// Prolongation mark used as the canonical vowel connection
pub const LONG_VOWEL_MARK: &str = "ー";

/// Characters treated as vowel connection markers
pub const VOWEL_CONNECTION_MARKS: [char; 3] = ['+', '-', 'ー'];

/// Remove breath notes (lyrics ending with `R`)
///
/// The remaining notes keep their relative order. Idempotent.
pub fn remove_breaths(track: &Track) -> Track {
    let notes: Vec<Note> = track
        .notes
        .iter()
        .filter(|note| !note.lyric.ends_with('R'))
        .cloned()
        .collect();
    trace!(
        track = %track.name,
        removed = track.notes.len() - notes.len(),
        "removed breath notes"
    );
    Track {
        notes,
        ..track.clone()
    }
}

/// Replace every `+`, `-` and `ー` in every lyric with `replacement`
///
/// `replacement` must not itself contain `+` or `-`: the result would no
/// longer be a fixed point of this function. [`LONG_VOWEL_MARK`] is the usual
/// choice.
pub fn replace_vowel_connections(track: &Track, replacement: &str) -> Track {
    debug_assert!(
        !replacement.contains(['+', '-']),
        "vowel connection replacement {replacement:?} contains a replaced character"
    );
    Track {
        notes: track
            .notes
            .iter()
            .map(|note| Note {
                lyric: note.lyric.replace(VOWEL_CONNECTION_MARKS, replacement),
                ..note.clone()
            })
            .collect(),
        ..track.clone()
    }
}

/// Which side of the engine a project is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Just parsed from the given format
    Imported(Format),
    /// About to be generated as the given format
    Exporting(Format),
}

/// Apply dialect translation to a whole project, if the direction calls for it
///
/// Imports from UTAU-dialect formats are normalized; exports to any other
/// format get the same normalization so UTAU markers are not taken literally.
/// Returns `None` when no translation applies.
pub fn translate_project(project: &ProjectData, direction: Direction) -> Option<ProjectData> {
    let applies = match direction {
        Direction::Imported(format) => format.uses_utau_dialect(),
        Direction::Exporting(format) => !format.uses_utau_dialect(),
    };
    if !applies {
        return None;
    }
    Some(project.map_tracks(|track| {
        replace_vowel_connections(&remove_breaths(track), LONG_VOWEL_MARK)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(lyric: &str, tick_on: i64) -> Note {
        Note {
            key: 60,
            tick_on,
            tick_off: tick_on + 480,
            lyric: lyric.to_string(),
            phoneme: None,
        }
    }

    fn track(lyrics: &[&str]) -> Track {
        Track {
            name: "vocal".into(),
            notes: lyrics
                .iter()
                .enumerate()
                .map(|(i, lyric)| note(lyric, i as i64 * 480))
                .collect(),
            pitch: None,
        }
    }

    fn lyrics(track: &Track) -> Vec<&str> {
        track.notes.iter().map(|n| n.lyric.as_str()).collect()
    }

    #[test]
    fn test_remove_single_breath() {
        let source = track(&["a", "i", "R", "u"]);
        let result = remove_breaths(&source);
        assert_eq!(result.notes.len(), 3);
        assert_eq!(lyrics(&result), vec!["a", "i", "u"]);
        assert_eq!(result.notes[2].tick_on, 1440);
        assert_eq!(source.notes.len(), 4);
    }

    #[test]
    fn test_remove_breaths_matches_suffix() {
        let result = remove_breaths(&track(&["a R", "br", "Ra", "息R"]));
        assert_eq!(lyrics(&result), vec!["br", "Ra"]);
    }

    #[test]
    fn test_remove_breaths_idempotent() {
        let source = track(&["R", "a", "- R", "ka", "R"]);
        let once = remove_breaths(&source);
        assert_eq!(remove_breaths(&once), once);
    }

    #[test]
    fn test_replace_vowel_connections() {
        let source = track(&["+", "a-", "かー", "x+y", "plain"]);
        let result = replace_vowel_connections(&source, LONG_VOWEL_MARK);
        assert_eq!(lyrics(&result), vec!["ー", "aー", "かー", "xーy", "plain"]);
    }

    #[test]
    fn test_replace_vowel_connections_fixed_point() {
        let source = track(&["+-ー", "a"]);
        let once = replace_vowel_connections(&source, LONG_VOWEL_MARK);
        assert_eq!(replace_vowel_connections(&once, LONG_VOWEL_MARK), once);
    }

    #[test]
    fn test_replace_leaves_other_characters() {
        // Range-like characters between '+' and 'ー' must be untouched
        let source = track(&["abc", "あいう", "*,./"]);
        let result = replace_vowel_connections(&source, "~");
        assert_eq!(lyrics(&result), lyrics(&source));
    }

    #[test]
    fn test_translate_project_direction() {
        let project = ProjectData {
            tracks: vec![track(&["a", "R", "-"])],
            ..Default::default()
        };

        let imported = translate_project(&project, Direction::Imported(Format::Ust)).unwrap();
        assert_eq!(lyrics(&imported.tracks[0]), vec!["a", "ー"]);
        assert!(translate_project(&project, Direction::Imported(Format::Svp)).is_none());

        let exported = translate_project(&project, Direction::Exporting(Format::Vsqx)).unwrap();
        assert_eq!(lyrics(&exported.tracks[0]), vec!["a", "ー"]);
        assert!(translate_project(&project, Direction::Exporting(Format::Ustx)).is_none());
    }
}
