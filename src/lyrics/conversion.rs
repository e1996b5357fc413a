//! Notation rewriting

use tracing::debug;

use super::analysis::split_vcv;
use super::kana::{kana_to_romaji, romaji_to_kana, tail_vowel, to_hiragana, vowel_kana};
use super::{ConvertJapaneseLyricsOptions, JapaneseLyricsType};
use crate::model::{Note, ProjectData, Track};
use crate::translate::VOWEL_CONNECTION_MARKS;

/// Prefix of a VCV lyric that follows a rest
const REST_PREFIX: &str = "-";

struct Rewrite<'a> {
    from: JapaneseLyricsType,
    to: JapaneseLyricsType,
    options: &'a ConvertJapaneseLyricsOptions,
}

impl Rewrite<'_> {
    /// Syllable of a lyric with any VCV prefix removed
    fn core<'l>(&self, lyric: &'l str) -> &'l str {
        if self.from.is_vcv() {
            if let Some((_, core)) = split_vcv(lyric) {
                return core;
            }
        }
        lyric.trim()
    }

    fn rescript(&self, core: &str) -> String {
        match (self.from.is_romaji(), self.to.is_romaji()) {
            (false, true) => kana_to_romaji(&to_hiragana(core)),
            (true, false) => romaji_to_kana(core),
            _ => core.to_string(),
        }
    }

    /// Replace prolongation marks with the vowel they extend
    ///
    /// A mark at the start of the syllable extends the previous note.
    fn expand_connections(&self, core: &str, previous_vowel: Option<char>) -> String {
        let mut out = String::with_capacity(core.len());
        for c in core.chars() {
            if !VOWEL_CONNECTION_MARKS.contains(&c) {
                out.push(c);
                continue;
            }
            let vowel = if out.is_empty() {
                previous_vowel
            } else {
                tail_vowel(&out)
            };
            match vowel {
                Some(v) if self.to.is_romaji() => out.push(v),
                Some(v) => match vowel_kana(v) {
                    Some(kana) => out.push_str(kana),
                    None => out.push(c),
                },
                None => out.push(c),
            }
        }
        out
    }

    fn track(&self, track: &Track) -> Track {
        let mut notes: Vec<Note> = Vec::with_capacity(track.notes.len());
        let mut previous: Option<(&Note, String)> = None;

        for note in &track.notes {
            let previous_core = previous.as_ref().map(|(_, core)| core.as_str());
            let mut core = self.rescript(self.core(&note.lyric));
            if self.options.convert_vowel_connections {
                core = self.expand_connections(&core, previous_core.and_then(tail_vowel));
            }

            let lyric = if self.to.is_vcv() && !core.is_empty() && core != "R" {
                let prefix = match &previous {
                    Some((prev, prev_core)) if prev.is_followed_by(note) => tail_vowel(prev_core)
                        .map(String::from)
                        .unwrap_or_else(|| REST_PREFIX.to_string()),
                    _ => REST_PREFIX.to_string(),
                };
                format!("{} {}", prefix, core)
            } else {
                core.clone()
            };

            notes.push(Note {
                lyric,
                ..note.clone()
            });
            previous = Some((note, core));
        }

        Track {
            notes,
            ..track.clone()
        }
    }
}

/// Rewrite every lyric of `project` from one notation to another
///
/// Identity conversions and conversions from or to
/// [`JapaneseLyricsType::Unknown`] return an unchanged copy.
pub fn convert_japanese_lyrics(
    project: &ProjectData,
    from: JapaneseLyricsType,
    to: JapaneseLyricsType,
    options: Option<&ConvertJapaneseLyricsOptions>,
) -> ProjectData {
    if from == to || from == JapaneseLyricsType::Unknown || to == JapaneseLyricsType::Unknown {
        return project.clone();
    }

    let default_options = ConvertJapaneseLyricsOptions::default();
    let rewrite = Rewrite {
        from,
        to,
        options: options.unwrap_or(&default_options),
    };
    debug!(%from, %to, tracks = project.tracks.len(), "converting lyrics");
    project.map_tracks(|track| rewrite.track(track))
}

#[cfg(test)]
mod tests {
    use super::*;
    use JapaneseLyricsType::*;

    fn project(lyrics: &[&str]) -> ProjectData {
        let notes = lyrics
            .iter()
            .enumerate()
            .map(|(i, lyric)| Note {
                key: 60,
                tick_on: i as i64 * 480,
                tick_off: (i as i64 + 1) * 480,
                lyric: lyric.to_string(),
                phoneme: None,
            })
            .collect();
        ProjectData {
            tracks: vec![Track {
                name: "t".into(),
                notes,
                pitch: None,
            }],
            ..Default::default()
        }
    }

    fn lyrics(project: &ProjectData) -> Vec<String> {
        project.tracks[0]
            .notes
            .iter()
            .map(|n| n.lyric.clone())
            .collect()
    }

    #[test]
    fn test_kana_vcv_to_cv() {
        let source = project(&[
            "- ど", "ど れ", "れ み", "み ふぁ", "ふぁ そ", "そ ら", "ら し", "し ど",
        ]);
        let result = convert_japanese_lyrics(&source, KanaVcv, KanaCv, None);
        assert_eq!(
            lyrics(&result),
            vec!["ど", "れ", "み", "ふぁ", "そ", "ら", "し", "ど"]
        );
        assert_eq!(lyrics(&source)[0], "- ど");
    }

    #[test]
    fn test_identity_and_unknown_pass_through() {
        let source = project(&["a ka", "か", "ー"]);
        for t in JapaneseLyricsType::ALL {
            assert_eq!(convert_japanese_lyrics(&source, t, t, None), source);
        }
        assert_eq!(convert_japanese_lyrics(&source, Unknown, KanaCv, None), source);
        assert_eq!(convert_japanese_lyrics(&source, RomajiCv, Unknown, None), source);
    }

    #[test]
    fn test_kana_to_romaji_vcv() {
        let source = project(&["さ", "く", "ら"]);
        let result = convert_japanese_lyrics(&source, KanaCv, RomajiVcv, None);
        assert_eq!(lyrics(&result), vec!["- sa", "a ku", "u ra"]);
    }

    #[test]
    fn test_rest_resets_vcv_prefix() {
        let mut source = project(&["か", "き"]);
        source.tracks[0].notes[1].tick_on += 240;
        source.tracks[0].notes[1].tick_off += 240;
        let result = convert_japanese_lyrics(&source, KanaCv, KanaVcv, None);
        assert_eq!(lyrics(&result), vec!["- か", "- き"]);
    }

    #[test]
    fn test_romaji_to_kana() {
        let source = project(&["- sa", "a ku", "u ra", "R"]);
        let result = convert_japanese_lyrics(&source, RomajiVcv, KanaCv, None);
        assert_eq!(lyrics(&result), vec!["さ", "く", "ら", "R"]);
    }

    #[test]
    fn test_vowel_connections() {
        let source = project(&["あー", "か", "ー", "+"]);
        let result = convert_japanese_lyrics(&source, KanaCv, RomajiCv, None);
        assert_eq!(lyrics(&result), vec!["aa", "ka", "a", "a"]);

        let options = ConvertJapaneseLyricsOptions {
            convert_vowel_connections: false,
        };
        let result = convert_japanese_lyrics(&source, KanaCv, RomajiCv, Some(&options));
        assert_eq!(lyrics(&result), vec!["aー", "ka", "ー", "+"]);
    }

    #[test]
    fn test_vowel_connection_in_kana() {
        let source = project(&["ka", "-"]);
        let result = convert_japanese_lyrics(&source, RomajiCv, KanaCv, None);
        assert_eq!(lyrics(&result), vec!["か", "あ"]);
    }
}
