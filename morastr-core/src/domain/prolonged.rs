//! Conversions between the long vowel mark and explicit vowels
//!
//! `カード` ⇄ `カアド`. Both directions keep the mora count of well-formed
//! text unchanged.

use crate::domain::classifier::{classify, is_hiragana, vowel_of, MoraClass, Vowel, KATAKANA_SHIFT};
use crate::domain::segmenter::retain_morae;
use crate::error::{ValidationError, ValidationKind};

const LENGTH_MARK: char = 'ー';

/// Options for [`vowel_to_choon`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoonOptions {
    /// Most marks written for one run of repeated vowels, `None` for no
    /// limit. `Some(0)` leaves the text unchanged.
    pub maxrep: Option<usize>,
    /// Treat `ウ` after an o-column kana as a long vowel (`コウ` → `コー`)
    pub ou: bool,
    /// Treat `イ` after an e-column kana as a long vowel (`ケイ` → `ケー`)
    pub ei: bool,
    /// Drop every character that is not part of a mora from the output
    pub clean: bool,
}

impl Default for ChoonOptions {
    fn default() -> Self {
        Self {
            maxrep: Some(1),
            ou: false,
            ei: false,
            clean: false,
        }
    }
}

/// Options for [`choon_to_vowel_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VowelOptions {
    /// Reject a mark with no kana to take a vowel from
    pub strict: bool,
    /// Drop every character that is not part of a mora from the output
    pub clean: bool,
}

impl Default for VowelOptions {
    fn default() -> Self {
        Self {
            strict: true,
            clean: false,
        }
    }
}

fn vowel_kana(vowel: Vowel, hiragana: bool) -> char {
    let katakana = match vowel {
        Vowel::A => 'ア',
        Vowel::I => 'イ',
        Vowel::U => 'ウ',
        Vowel::E => 'エ',
        Vowel::O => 'オ',
        Vowel::N => 'ン',
    };
    if hiragana {
        char::from_u32(u32::from(katakana) - KATAKANA_SHIFT).unwrap_or(katakana)
    } else {
        katakana
    }
}

/// Replace every `ー` by the vowel of the kana before it
///
/// A mark with no kana to take a vowel from is an error when `strict`,
/// otherwise it is kept as is.
pub fn choon_to_vowel(text: &str, strict: bool) -> Result<String, ValidationError> {
    choon_to_vowel_with(
        text,
        &VowelOptions {
            strict,
            clean: false,
        },
    )
}

/// [`choon_to_vowel`] with explicit options
///
/// Cleaning runs after the marks are replaced, so it never hides an error.
pub fn choon_to_vowel_with(text: &str, options: &VowelOptions) -> Result<String, ValidationError> {
    let mut out = String::with_capacity(text.len());
    // Vowel and script carried over runs of marks
    let mut carried: Option<(Vowel, bool)> = None;

    for (offset, ch) in text.chars().enumerate() {
        if ch != LENGTH_MARK {
            carried = vowel_of(ch).map(|v| (v, is_hiragana(ch)));
            out.push(ch);
            continue;
        }
        match carried {
            Some((vowel, hiragana)) => out.push(vowel_kana(vowel, hiragana)),
            None if options.strict => {
                return Err(ValidationError {
                    offset,
                    ch,
                    kind: ValidationKind::OrphanLengthMark,
                })
            }
            None => out.push(ch),
        }
    }
    Ok(if options.clean { retain_morae(&out) } else { out })
}

/// How a vowel kana continues the vowel before it
#[derive(Clone, Copy, PartialEq, Eq)]
enum Extension {
    /// Same vowel (`カア`)
    Same,
    /// Diphthong folded by `ou` or `ei`, never repeated
    Folded,
}

/// Replace vowel kana repeating the preceding vowel by `ー`
///
/// Only full-size vowel kana are replaced: a small one belongs to the mora
/// before it. At most `maxrep` marks are written per run, and the character
/// after a full run is kept, so `カアア` becomes `カーア` by default.
pub fn vowel_to_choon(text: &str, options: &ChoonOptions) -> String {
    let limit = options.maxrep.unwrap_or(usize::MAX);
    let mut out = String::with_capacity(text.len());
    // Vowel being extended and marks written for it so far
    let mut base: Option<Vowel> = None;
    let mut run = 0;

    for ch in text.chars() {
        let extension = base
            .filter(|_| run < limit)
            .and_then(|before| extends(before, ch, options));
        match extension {
            Some(Extension::Same) => {
                out.push(LENGTH_MARK);
                run += 1;
            }
            Some(Extension::Folded) => {
                out.push(LENGTH_MARK);
                run = limit;
            }
            None => {
                out.push(ch);
                base = vowel_of(ch);
                run = 0;
            }
        }
    }
    if options.clean {
        retain_morae(&out)
    } else {
        out
    }
}

fn extends(before: Vowel, ch: char, options: &ChoonOptions) -> Option<Extension> {
    if classify(ch) != MoraClass::FullMora {
        return None;
    }
    let (vowel, folds) = match ch {
        'ア' | 'あ' => (Vowel::A, None),
        'イ' | 'い' => (Vowel::I, options.ei.then_some(Vowel::E)),
        'ウ' | 'う' => (Vowel::U, options.ou.then_some(Vowel::O)),
        'エ' | 'え' => (Vowel::E, None),
        'オ' | 'お' => (Vowel::O, None),
        _ => return None,
    };
    if before == vowel {
        Some(Extension::Same)
    } else if folds == Some(before) {
        Some(Extension::Folded)
    } else {
        None
    }
}
