//! Mora counting and mora-indexed strings for Japanese text
//!
//! Text goes through three stages:
//! - **Substitution**: variant spellings (half-width katakana, combining
//!   sound marks, caller-registered mappings) are rewritten to canonical
//!   ones, longest match first, in linear time
//! - **Classification**: every character gets a [`MoraClass`]
//! - **Segmentation**: a state machine groups classified characters into
//!   mora spans, in strict or lenient mode
//!
//! # Example
//!
//! ```rust
//! use morastr_core::{count_all, MoraString};
//!
//! assert_eq!(count_all("がっこう", false).unwrap(), 4);
//!
//! let s = MoraString::new("ｷｬｯﾁｰ", true).unwrap();
//! assert_eq!(s.as_str(), "キャッチー");
//! assert_eq!(s.mora_count(), 4);
//! assert_eq!(s.mora_at(0).unwrap(), "キャ");
//!
//! let err = MoraString::new("ゃ", true).unwrap_err();
//! assert_eq!(err.as_validation().unwrap().offset, 0);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod domain;
pub mod error;
pub mod substitution;
pub mod table;

pub use api::{
    count_all, count_all_bytes, count_all_bytes_with, count_all_with, Config, ConfigBuilder,
    MoraString, Needle,
};
pub use domain::{
    choon_to_vowel, choon_to_vowel_with, classify, retain_morae, segment, vowel_of, vowel_to_choon,
    ChoonOptions, Mora, MoraClass, SegmentConfig, SegmentMode, Segmentation, Vowel, VowelOptions,
};
pub use error::{MoraError, Result, TableError, ValidationError, ValidationKind};
pub use substitution::{normalize, normalize_bytes, normalize_bytes_with, normalize_with};
pub use table::loader::{
    active_table, load_mapping_file, register, reset_active_table, set_active_table,
};
pub use table::{PatternEntry, PatternTable, PatternTableBuilder};
