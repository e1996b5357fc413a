//! Kana and romaji tables and script conversion
//!
//! Romaji follows the spelling common in UTAU voicebanks (`shi`, `chi`, `tsu`,
//! `fu`, `ji`). Where two kana share a spelling, the first table entry is the
//! one produced when converting back to kana.

/// Hiragana syllables and their romaji spelling
#[rustfmt::skip]
const KANA_ROMAJI: &[(&str, &str)] = &[
    ("あ", "a"), ("い", "i"), ("う", "u"), ("え", "e"), ("お", "o"),
    ("か", "ka"), ("き", "ki"), ("く", "ku"), ("け", "ke"), ("こ", "ko"),
    ("が", "ga"), ("ぎ", "gi"), ("ぐ", "gu"), ("げ", "ge"), ("ご", "go"),
    ("さ", "sa"), ("し", "shi"), ("す", "su"), ("せ", "se"), ("そ", "so"),
    ("ざ", "za"), ("じ", "ji"), ("ず", "zu"), ("ぜ", "ze"), ("ぞ", "zo"),
    ("た", "ta"), ("ち", "chi"), ("つ", "tsu"), ("て", "te"), ("と", "to"),
    ("だ", "da"), ("ぢ", "ji"), ("づ", "zu"), ("で", "de"), ("ど", "do"),
    ("な", "na"), ("に", "ni"), ("ぬ", "nu"), ("ね", "ne"), ("の", "no"),
    ("は", "ha"), ("ひ", "hi"), ("ふ", "fu"), ("へ", "he"), ("ほ", "ho"),
    ("ば", "ba"), ("び", "bi"), ("ぶ", "bu"), ("べ", "be"), ("ぼ", "bo"),
    ("ぱ", "pa"), ("ぴ", "pi"), ("ぷ", "pu"), ("ぺ", "pe"), ("ぽ", "po"),
    ("ま", "ma"), ("み", "mi"), ("む", "mu"), ("め", "me"), ("も", "mo"),
    ("や", "ya"), ("ゆ", "yu"), ("よ", "yo"),
    ("ら", "ra"), ("り", "ri"), ("る", "ru"), ("れ", "re"), ("ろ", "ro"),
    ("わ", "wa"), ("を", "wo"), ("ん", "n"), ("ゔ", "vu"),
    ("きゃ", "kya"), ("きゅ", "kyu"), ("きぇ", "kye"), ("きょ", "kyo"),
    ("ぎゃ", "gya"), ("ぎゅ", "gyu"), ("ぎぇ", "gye"), ("ぎょ", "gyo"),
    ("しゃ", "sha"), ("しゅ", "shu"), ("しぇ", "she"), ("しょ", "sho"),
    ("じゃ", "ja"), ("じゅ", "ju"), ("じぇ", "je"), ("じょ", "jo"),
    ("ちゃ", "cha"), ("ちゅ", "chu"), ("ちぇ", "che"), ("ちょ", "cho"),
    ("にゃ", "nya"), ("にゅ", "nyu"), ("にぇ", "nye"), ("にょ", "nyo"),
    ("ひゃ", "hya"), ("ひゅ", "hyu"), ("ひぇ", "hye"), ("ひょ", "hyo"),
    ("びゃ", "bya"), ("びゅ", "byu"), ("びぇ", "bye"), ("びょ", "byo"),
    ("ぴゃ", "pya"), ("ぴゅ", "pyu"), ("ぴぇ", "pye"), ("ぴょ", "pyo"),
    ("みゃ", "mya"), ("みゅ", "myu"), ("みぇ", "mye"), ("みょ", "myo"),
    ("りゃ", "rya"), ("りゅ", "ryu"), ("りぇ", "rye"), ("りょ", "ryo"),
    ("ふぁ", "fa"), ("ふぃ", "fi"), ("ふぇ", "fe"), ("ふぉ", "fo"), ("ふゅ", "fyu"),
    ("てぃ", "ti"), ("てゅ", "tyu"), ("でぃ", "di"), ("でゅ", "dyu"),
    ("とぅ", "tu"), ("どぅ", "du"),
    ("つぁ", "tsa"), ("つぃ", "tsi"), ("つぇ", "tse"), ("つぉ", "tso"),
    ("すぃ", "si"), ("ずぃ", "zi"),
    ("うぃ", "wi"), ("うぇ", "we"), ("いぇ", "ye"),
    ("ゔぁ", "va"), ("ゔぃ", "vi"), ("ゔぇ", "ve"), ("ゔぉ", "vo"),
    ("ぁ", "a"), ("ぃ", "i"), ("ぅ", "u"), ("ぇ", "e"), ("ぉ", "o"),
    ("ゃ", "ya"), ("ゅ", "yu"), ("ょ", "yo"), ("ゎ", "wa"), ("っ", "cl"),
];

/// Longest romaji spelling in [`KANA_ROMAJI`]
const MAX_ROMAJI_LEN: usize = 3;

/// Whether `c` is a hiragana or katakana letter (the prolongation mark excluded)
pub fn is_kana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c) || ('\u{30A1}'..='\u{30FA}').contains(&c)
}

/// Fold katakana to hiragana, leaving everything else as is
pub fn to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn romaji_of(kana: &str) -> Option<&'static str> {
    KANA_ROMAJI
        .iter()
        .find(|(k, _)| *k == kana)
        .map(|&(_, romaji)| romaji)
}

fn kana_of(romaji: &str) -> Option<&'static str> {
    KANA_ROMAJI
        .iter()
        .find(|(_, r)| *r == romaji)
        .map(|&(kana, _)| kana)
}

/// Convert hiragana to romaji; unknown characters pass through
pub fn kana_to_romaji(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        if i + 1 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if let Some(romaji) = romaji_of(&pair) {
                out.push_str(romaji);
                i += 2;
                continue;
            }
        }
        let single = chars[i].to_string();
        match romaji_of(&single) {
            Some(romaji) => out.push_str(romaji),
            None => out.push(chars[i]),
        }
        i += 1;
    }

    out
}

/// Split romaji into kana, greedily taking the longest known spelling
///
/// Returns the converted text and whether every ASCII letter was consumed.
fn convert_romaji(text: &str) -> (String, bool) {
    let lower = text.to_ascii_lowercase();
    let mut out = String::new();
    let mut complete = true;
    let mut i = 0;

    'outer: while i < lower.len() {
        for len in (1..=MAX_ROMAJI_LEN).rev() {
            if let Some(kana) = lower.get(i..i + len).and_then(kana_of) {
                out.push_str(kana);
                i += len;
                continue 'outer;
            }
        }
        // ASCII lowercasing keeps byte offsets, so `text` can be sliced here
        let Some(c) = text[i..].chars().next() else {
            break;
        };
        if c.is_ascii_alphabetic() {
            complete = false;
        }
        out.push(c);
        i += c.len_utf8();
    }

    (out, complete)
}

/// Convert romaji to hiragana; unknown characters pass through
pub fn romaji_to_kana(text: &str) -> String {
    convert_romaji(text).0
}

/// Whether `text` is made up entirely of romaji syllables
pub fn is_romaji(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| c.is_ascii_alphabetic())
        && convert_romaji(text).1
}

/// Final vowel of a syllable in either script: one of `a i u e o n`
pub fn tail_vowel(syllable: &str) -> Option<char> {
    let romaji = kana_to_romaji(&to_hiragana(syllable));
    let last = romaji.chars().last()?.to_ascii_lowercase();
    matches!(last, 'a' | 'i' | 'u' | 'e' | 'o' | 'n').then_some(last)
}

/// Kana for a vowel returned by [`tail_vowel`]
pub fn vowel_kana(vowel: char) -> Option<&'static str> {
    let kana = match vowel {
        'a' => "あ",
        'i' => "い",
        'u' => "う",
        'e' => "え",
        'o' => "お",
        'n' => "ん",
        _ => return None,
    };
    Some(kana)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kana_to_romaji() {
        assert_eq!(kana_to_romaji("か"), "ka");
        assert_eq!(kana_to_romaji("しゃ"), "sha");
        assert_eq!(kana_to_romaji("ふぁ"), "fa");
        assert_eq!(kana_to_romaji("あー"), "aー");
    }

    #[test]
    fn test_romaji_to_kana() {
        assert_eq!(romaji_to_kana("ka"), "か");
        assert_eq!(romaji_to_kana("tsu"), "つ");
        assert_eq!(romaji_to_kana("Shi"), "し");
        assert_eq!(romaji_to_kana("ji"), "じ");
        assert_eq!(romaji_to_kana("R"), "R");
    }

    #[test]
    fn test_katakana_folding() {
        assert_eq!(to_hiragana("カナー"), "かなー");
        assert_eq!(kana_to_romaji(&to_hiragana("ファ")), "fa");
    }

    #[test]
    fn test_is_romaji() {
        assert!(is_romaji("ka"));
        assert!(is_romaji("kyo"));
        assert!(!is_romaji("love"));
        assert!(!is_romaji(""));
        assert!(!is_romaji("か"));
    }

    #[test]
    fn test_tail_vowel() {
        assert_eq!(tail_vowel("ど"), Some('o'));
        assert_eq!(tail_vowel("ふぁ"), Some('a'));
        assert_eq!(tail_vowel("ン"), Some('n'));
        assert_eq!(tail_vowel("ki"), Some('i'));
        assert_eq!(tail_vowel("R"), None);
        assert_eq!(tail_vowel("っ"), None);
        assert_eq!(tail_vowel(""), None);
    }

    #[test]
    fn test_every_kana_round_trips_to_a_reading() {
        for (kana, romaji) in KANA_ROMAJI {
            assert_eq!(kana_to_romaji(kana), *romaji, "{kana}");
            assert!(romaji.len() <= MAX_ROMAJI_LEN);
        }
    }
}
