//! Character classification for mora formation
//!
//! The kana block (U+3040..U+30FF) is looked up in an array built at compile
//! time; half-width katakana use a short range table. Everything else is
//! [`MoraClass::Other`].

use serde::Serialize;

/// Role of a character in mora formation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MoraClass {
    /// Standalone kana syllable that starts a mora
    FullMora,
    /// Small kana merging into the preceding syllable
    CombiningSmall,
    /// Geminate marker, a mora of its own
    Sokuon,
    /// Syllable-final nasal, a mora of its own
    MoraicNasal,
    /// Long vowel mark extending the preceding syllable
    LengthMark,
    /// Not part of mora formation
    Other,
}

impl MoraClass {
    /// Whether characters of this class can belong to a mora span
    #[inline]
    pub fn is_mora_bearing(self) -> bool {
        !matches!(self, MoraClass::Other)
    }
}

/// Vowel column of a kana
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Vowel {
    /// ア column
    A,
    /// イ column
    I,
    /// ウ column
    U,
    /// エ column
    E,
    /// オ column
    O,
    /// The moraic nasal
    N,
}

const KANA_BLOCK_START: u32 = 0x3040;
const KANA_BLOCK_LEN: usize = 0xC0;

/// Offset between a hiragana and its katakana counterpart
pub(crate) const KATAKANA_SHIFT: u32 = 0x60;

const KANA_CLASSES: [MoraClass; KANA_BLOCK_LEN] = build_kana_classes();

const fn build_kana_classes() -> [MoraClass; KANA_BLOCK_LEN] {
    let mut table = [MoraClass::Other; KANA_BLOCK_LEN];

    // Hiragana ぁ..ゖ and katakana ァ..ヶ share the same layout
    let mut cp = 0x3041;
    while cp <= 0x3096 {
        table[(cp - KANA_BLOCK_START) as usize] = MoraClass::FullMora;
        table[(cp + KATAKANA_SHIFT - KANA_BLOCK_START) as usize] = MoraClass::FullMora;
        cp += 1;
    }
    let mut cp = 0x30F7;
    while cp <= 0x30FA {
        table[(cp - KANA_BLOCK_START) as usize] = MoraClass::FullMora;
        cp += 1;
    }

    // ぁぃぅぇぉ ゃゅょ ゎ
    let small = [
        0x3041, 0x3043, 0x3045, 0x3047, 0x3049, 0x3083, 0x3085, 0x3087, 0x308E,
    ];
    let mut i = 0;
    while i < small.len() {
        table[(small[i] - KANA_BLOCK_START) as usize] = MoraClass::CombiningSmall;
        table[(small[i] + KATAKANA_SHIFT - KANA_BLOCK_START) as usize] = MoraClass::CombiningSmall;
        i += 1;
    }

    table[(0x3063 - KANA_BLOCK_START) as usize] = MoraClass::Sokuon; // っ
    table[(0x30C3 - KANA_BLOCK_START) as usize] = MoraClass::Sokuon; // ッ
    table[(0x3093 - KANA_BLOCK_START) as usize] = MoraClass::MoraicNasal; // ん
    table[(0x30F3 - KANA_BLOCK_START) as usize] = MoraClass::MoraicNasal; // ン
    table[(0x30FC - KANA_BLOCK_START) as usize] = MoraClass::LengthMark; // ー

    // Iteration marks repeat the preceding syllable
    table[(0x309D - KANA_BLOCK_START) as usize] = MoraClass::FullMora; // ゝ
    table[(0x309E - KANA_BLOCK_START) as usize] = MoraClass::FullMora; // ゞ
    table[(0x30FD - KANA_BLOCK_START) as usize] = MoraClass::FullMora; // ヽ
    table[(0x30FE - KANA_BLOCK_START) as usize] = MoraClass::FullMora; // ヾ

    table
}

/// Half-width katakana ranges, inclusive and sorted
const HALFWIDTH_RANGES: [(u32, u32, MoraClass); 6] = [
    (0xFF66, 0xFF66, MoraClass::FullMora),       // ｦ
    (0xFF67, 0xFF6E, MoraClass::CombiningSmall), // ｧ..ｮ
    (0xFF6F, 0xFF6F, MoraClass::Sokuon),         // ｯ
    (0xFF70, 0xFF70, MoraClass::LengthMark),     // ｰ
    (0xFF71, 0xFF9C, MoraClass::FullMora),       // ｱ..ﾜ
    (0xFF9D, 0xFF9D, MoraClass::MoraicNasal),    // ﾝ
];

/// Classify a character
#[inline]
pub fn classify(ch: char) -> MoraClass {
    let cp = u32::from(ch);
    if let Some(idx) = cp.checked_sub(KANA_BLOCK_START) {
        if (idx as usize) < KANA_BLOCK_LEN {
            return KANA_CLASSES[idx as usize];
        }
    }
    if (0xFF66..=0xFF9D).contains(&cp) {
        return classify_halfwidth(cp);
    }
    MoraClass::Other
}

fn classify_halfwidth(cp: u32) -> MoraClass {
    HALFWIDTH_RANGES
        .binary_search_by(|&(lo, hi, _)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .map(|idx| HALFWIDTH_RANGES[idx].2)
        .unwrap_or(MoraClass::Other)
}

/// Full-width hiragana (ぁ..ゖ, ゝ, ゞ)
#[inline]
pub fn is_hiragana(ch: char) -> bool {
    matches!(ch, '\u{3041}'..='\u{3096}' | '\u{309D}' | '\u{309E}')
}

/// Full-width katakana (ァ..ヾ)
#[inline]
pub fn is_katakana(ch: char) -> bool {
    matches!(ch, '\u{30A1}'..='\u{30FE}')
}

/// Full-width kana of either script
#[inline]
pub fn is_kana(ch: char) -> bool {
    is_hiragana(ch) || is_katakana(ch)
}

/// Vowel column of a full-width kana, `None` for anything without one
pub fn vowel_of(ch: char) -> Option<Vowel> {
    let ch = if matches!(ch, '\u{3041}'..='\u{3096}') {
        char::from_u32(u32::from(ch) + KATAKANA_SHIFT)?
    } else {
        ch
    };
    let vowel = match ch {
        'ァ' | 'ア' | 'カ' | 'ガ' | 'サ' | 'ザ' | 'タ' | 'ダ' | 'ナ' | 'ハ' | 'バ' | 'パ' | 'マ'
        | 'ャ' | 'ヤ' | 'ラ' | 'ヮ' | 'ワ' | 'ヵ' | 'ヷ' => Vowel::A,
        'ィ' | 'イ' | 'キ' | 'ギ' | 'シ' | 'ジ' | 'チ' | 'ヂ' | 'ニ' | 'ヒ' | 'ビ' | 'ピ' | 'ミ'
        | 'リ' | 'ヰ' | 'ヸ' => Vowel::I,
        'ゥ' | 'ウ' | 'ク' | 'グ' | 'ス' | 'ズ' | 'ツ' | 'ヅ' | 'ヌ' | 'フ' | 'ブ' | 'プ' | 'ム'
        | 'ュ' | 'ユ' | 'ル' | 'ヴ' => Vowel::U,
        'ェ' | 'エ' | 'ケ' | 'ゲ' | 'セ' | 'ゼ' | 'テ' | 'デ' | 'ネ' | 'ヘ' | 'ベ' | 'ペ' | 'メ'
        | 'レ' | 'ヱ' | 'ヶ' | 'ヹ' => Vowel::E,
        'ォ' | 'オ' | 'コ' | 'ゴ' | 'ソ' | 'ゾ' | 'ト' | 'ド' | 'ノ' | 'ホ' | 'ボ' | 'ポ' | 'モ'
        | 'ョ' | 'ヨ' | 'ロ' | 'ヲ' | 'ヺ' => Vowel::O,
        'ン' => Vowel::N,
        _ => return None,
    };
    Some(vowel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mora() {
        for ch in ['あ', 'か', 'が', 'ぱ', 'ア', 'カ', 'ヴ', 'ゔ', 'ヵ', 'ゖ', 'ヷ', 'ゝ', 'ヾ'] {
            assert_eq!(classify(ch), MoraClass::FullMora, "{ch}");
        }
    }

    #[test]
    fn test_combining_small() {
        for ch in "ぁぃぅぇぉゃゅょゎァィゥェォャュョヮｧｨｩｪｫｬｭｮ".chars() {
            assert_eq!(classify(ch), MoraClass::CombiningSmall, "{ch}");
        }
    }

    #[test]
    fn test_standalone_morae() {
        assert_eq!(classify('っ'), MoraClass::Sokuon);
        assert_eq!(classify('ッ'), MoraClass::Sokuon);
        assert_eq!(classify('ｯ'), MoraClass::Sokuon);
        assert_eq!(classify('ん'), MoraClass::MoraicNasal);
        assert_eq!(classify('ン'), MoraClass::MoraicNasal);
        assert_eq!(classify('ﾝ'), MoraClass::MoraicNasal);
        assert_eq!(classify('ー'), MoraClass::LengthMark);
        assert_eq!(classify('ｰ'), MoraClass::LengthMark);
    }

    #[test]
    fn test_other() {
        for ch in ['a', ' ', '。', '、', '・', '漢', '\u{3099}', '゛', '゠', 'ヿ', 'ﾞ', 'ﾟ', '🎌'] {
            assert_eq!(classify(ch), MoraClass::Other, "{ch}");
        }
        assert!(!classify('x').is_mora_bearing());
        assert!(classify('ン').is_mora_bearing());
    }

    #[test]
    fn test_halfwidth_full() {
        assert_eq!(classify('ｦ'), MoraClass::FullMora);
        assert_eq!(classify('ｱ'), MoraClass::FullMora);
        assert_eq!(classify('ﾜ'), MoraClass::FullMora);
        assert_eq!(classify('･'), MoraClass::Other);
    }

    #[test]
    fn test_kana_predicates() {
        assert!(is_hiragana('ゞ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ヾ'));
        assert!(!is_katakana('ｱ'));
        assert!(is_kana('ん'));
        assert!(is_katakana('ー'));
    }

    #[test]
    fn test_vowel_of() {
        assert_eq!(vowel_of('か'), Some(Vowel::A));
        assert_eq!(vowel_of('キ'), Some(Vowel::I));
        assert_eq!(vowel_of('ゅ'), Some(Vowel::U));
        assert_eq!(vowel_of('ぺ'), Some(Vowel::E));
        assert_eq!(vowel_of('ヲ'), Some(Vowel::O));
        assert_eq!(vowel_of('ん'), Some(Vowel::N));
        assert_eq!(vowel_of('ッ'), None);
        assert_eq!(vowel_of('ー'), None);
        assert_eq!(vowel_of('a'), None);
    }
}
