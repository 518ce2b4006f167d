//! Domain layer: classification and segmentation
//!
//! Pure functions over already normalized text. Nothing here touches the
//! pattern tables.

pub mod classifier;
pub mod prolonged;
pub mod segmenter;
pub mod types;

pub use classifier::{classify, is_hiragana, is_kana, is_katakana, vowel_of, MoraClass, Vowel};
pub use prolonged::{choon_to_vowel, choon_to_vowel_with, vowel_to_choon, ChoonOptions, VowelOptions};
pub use segmenter::{count, retain_morae, segment, SegmentConfig, SegmentMode};
pub use types::{Mora, Segmentation};
