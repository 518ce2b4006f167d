//! Mora-indexed strings

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Add, Bound, ControlFlow, Mul, RangeBounds};
use std::str::FromStr;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::api::config::Config;
use crate::domain::segmenter::{segment, SegmentConfig};
use crate::domain::types::Mora;
use crate::error::{MoraError, Result};
use crate::substitution::normalize_with;
use crate::table::{loader, PatternTable};

/// Normalized text together with its mora spans
///
/// Immutable after construction. Cloning shares the underlying buffers.
/// The table the text was normalized with is kept for normalizing search
/// patterns given as text.
#[derive(Clone)]
pub struct MoraString {
    text: Arc<str>,
    morae: Arc<[Mora]>,
    char_len: usize,
    table: Option<Arc<PatternTable>>,
}

/// A position between morae: mora index, byte offset and char offset
#[derive(Debug, Clone, Copy)]
struct Boundary {
    mora: usize,
    byte: usize,
    ch: usize,
}

/// Accumulates text and spans from several mora strings in one pass
#[derive(Default)]
struct Assembler {
    text: String,
    morae: Vec<Mora>,
    char_len: usize,
}

impl Assembler {
    /// Copy the part of `source` between two boundaries
    fn copy(&mut self, source: &MoraString, from: Boundary, to: Boundary) {
        let (chars, bytes) = (self.char_len, self.text.len());
        self.text.push_str(&source.text[from.byte..to.byte]);
        self.morae.extend(
            source.morae[from.mora..to.mora]
                .iter()
                .map(|m| m.rebased(from.ch, from.byte).shifted(chars, bytes)),
        );
        self.char_len += to.ch - from.ch;
    }

    fn append(&mut self, source: &MoraString) {
        self.copy(source, source.text_start(), source.text_end());
    }

    fn finish(self, table: Option<Arc<PatternTable>>) -> MoraString {
        MoraString {
            text: Arc::from(self.text),
            morae: self.morae.into(),
            char_len: self.char_len,
            table,
        }
    }
}

impl MoraString {
    /// Normalize with the active table and segment
    ///
    /// `validate` selects strict segmentation; otherwise orphan characters
    /// are dropped from the mora sequence.
    pub fn new(text: &str, validate: bool) -> Result<Self> {
        Self::with_config(text, &Config::from_validate(validate))
    }

    /// Normalize and segment under an explicit configuration
    pub fn with_config(text: &str, config: &Config) -> Result<Self> {
        let table = config.table();
        let normalized = normalize_with(text, &table);
        let segmentation = segment(&normalized, config.segment_config())?;
        let char_len = normalized.chars().count();
        Ok(Self {
            text: Arc::from(&*normalized),
            morae: segmentation.morae.into(),
            char_len,
            table: Some(table),
        })
    }

    /// Decode UTF-8, then normalize and segment
    pub fn from_bytes(bytes: &[u8], validate: bool) -> Result<Self> {
        Self::from_bytes_with(bytes, &Config::from_validate(validate))
    }

    /// [`from_bytes`](Self::from_bytes) under an explicit configuration
    pub fn from_bytes_with(bytes: &[u8], config: &Config) -> Result<Self> {
        Self::with_config(std::str::from_utf8(bytes)?, config)
    }

    /// Join several pieces of text and build one mora string
    ///
    /// Pieces are joined before normalization, so a sound mark at the start
    /// of one piece composes with the kana ending the previous piece.
    pub fn from_strs<I, S>(pieces: I, validate: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = pieces.into_iter().map(|p| p.as_ref().to_owned()).collect();
        Self::new(&text, validate)
    }

    fn text_start(&self) -> Boundary {
        Boundary {
            mora: 0,
            byte: 0,
            ch: 0,
        }
    }

    fn text_end(&self) -> Boundary {
        Boundary {
            mora: self.morae.len(),
            byte: self.text.len(),
            ch: self.char_len,
        }
    }

    /// Boundary right before the mora at `index`, or the end of the text
    fn boundary(&self, index: usize) -> Boundary {
        match self.morae.get(index) {
            Some(m) => Boundary {
                mora: index,
                byte: m.byte_start,
                ch: m.start,
            },
            None => self.text_end(),
        }
    }

    /// Boundary right after the mora at `index`
    fn boundary_after(&self, index: usize) -> Boundary {
        let m = self.morae[index];
        Boundary {
            mora: index + 1,
            byte: m.byte_end,
            ch: m.end(),
        }
    }

    /// Resolve a search pattern, normalizing text with this string's table
    fn resolve<'n>(&self, needle: Needle<'n>) -> Option<Cow<'n, MoraString>> {
        match needle.0 {
            Pattern::Morae(morae) => Some(Cow::Borrowed(morae)),
            Pattern::Text(text) => {
                let table = self.table.clone().unwrap_or_else(loader::active_table);
                let normalized = normalize_with(text, &table);
                let segmentation = segment(&normalized, &SegmentConfig::strict()).ok()?;
                Some(Cow::Owned(MoraString {
                    text: Arc::from(&*normalized),
                    morae: segmentation.morae.into(),
                    char_len: normalized.chars().count(),
                    table: Some(table),
                }))
            }
        }
    }

    /// Number of morae
    #[inline]
    pub fn mora_count(&self) -> usize {
        self.morae.len()
    }

    /// Whether there are no morae
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.morae.is_empty()
    }

    /// The normalized text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Mora spans in text order
    #[inline]
    pub fn morae(&self) -> &[Mora] {
        &self.morae
    }

    /// Characters of the normalized text outside every mora
    pub fn skipped(&self) -> usize {
        self.char_len - self.morae.iter().map(|m| m.len).sum::<usize>()
    }

    /// Text of the mora at `index`
    pub fn mora_at(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(MoraError::Index {
            index,
            len: self.mora_count(),
        })
    }

    /// Text of the mora at `index`, if any
    pub fn get(&self, index: usize) -> Option<&str> {
        self.morae.get(index).map(|m| m.as_str(&self.text))
    }

    /// Code-point offset where the mora at `index` starts
    pub fn char_offset(&self, index: usize) -> Option<usize> {
        self.morae.get(index).map(|m| m.start)
    }

    /// Cumulative character counts at the end of each mora
    pub fn char_indices(&self) -> Vec<usize> {
        self.morae.iter().map(Mora::end).collect()
    }

    /// Iterate over the morae as string slices
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            text: &self.text,
            morae: self.morae.iter(),
        }
    }

    /// Sub-string covering a range of morae
    ///
    /// Characters skipped between the selected morae are kept.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self> {
        let len = self.mora_count();
        let start = match range.start_bound() {
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&i) => i.saturating_add(1),
            Bound::Excluded(&i) => i,
            Bound::Unbounded => len,
        };
        if end > len {
            return Err(MoraError::Index { index: end, len });
        }
        if start > end {
            return Err(MoraError::Index { index: start, len });
        }
        if start == end {
            return Ok(Assembler::default().finish(self.table.clone()));
        }

        let mut out = Assembler::default();
        out.copy(self, self.boundary(start), self.boundary_after(end - 1));
        Ok(out.finish(self.table.clone()))
    }

    /// Join two mora sequences without re-segmenting
    ///
    /// The result keeps the table of `self`.
    pub fn concat(&self, other: &MoraString) -> MoraString {
        let mut out = Assembler::default();
        out.append(self);
        out.append(other);
        out.finish(self.table.clone())
    }

    /// This string repeated `n` times
    pub fn repeat(&self, n: usize) -> MoraString {
        let mut out = Assembler::default();
        out.text.reserve(self.text.len().saturating_mul(n));
        for _ in 0..n {
            out.append(self);
        }
        out.finish(self.table.clone())
    }

    fn tokens(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Mora index of the first occurrence of `needle`
    ///
    /// Matching compares morae, so a needle never matches half a mora. A
    /// `&str` needle is normalized with the table this string was built
    /// with and segmented strictly; one that fails validation matches
    /// nothing.
    pub fn find<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        let needle = self.resolve(needle.into())?;
        let mut found = None;
        kmp(&self.tokens(), &needle.tokens(), true, |pos| {
            found = Some(pos);
            ControlFlow::Break(())
        });
        found
    }

    /// Mora index of the last occurrence of `needle`
    pub fn rfind<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        let needle = self.resolve(needle.into())?;
        let mut found = None;
        kmp(&self.tokens(), &needle.tokens(), true, |pos| {
            found = Some(pos);
            ControlFlow::Continue(())
        });
        found
    }

    /// Whether `needle` occurs
    pub fn contains<'n>(&self, needle: impl Into<Needle<'n>>) -> bool {
        self.find(needle).is_some()
    }

    /// Start indices of non-overlapping occurrences, left to right
    pub fn match_indices<'n>(&self, needle: impl Into<Needle<'n>>) -> Vec<usize> {
        match self.resolve(needle.into()) {
            Some(needle) => self.positions(&needle),
            None => Vec::new(),
        }
    }

    fn positions(&self, needle: &MoraString) -> Vec<usize> {
        let mut found = Vec::new();
        kmp(&self.tokens(), &needle.tokens(), false, |pos| {
            found.push(pos);
            ControlFlow::Continue(())
        });
        found
    }

    /// Number of non-overlapping occurrences
    pub fn count_of<'n>(&self, needle: impl Into<Needle<'n>>) -> usize {
        self.match_indices(needle).len()
    }

    /// Whether the mora sequence starts with `prefix`
    pub fn starts_with<'n>(&self, prefix: impl Into<Needle<'n>>) -> bool {
        self.resolve(prefix.into())
            .is_some_and(|prefix| self.has_prefix(&prefix))
    }

    /// Whether the mora sequence ends with `suffix`
    pub fn ends_with<'n>(&self, suffix: impl Into<Needle<'n>>) -> bool {
        self.resolve(suffix.into())
            .is_some_and(|suffix| self.has_suffix(&suffix))
    }

    fn has_prefix(&self, prefix: &MoraString) -> bool {
        prefix.mora_count() <= self.mora_count()
            && self.iter().zip(prefix.iter()).all(|(a, b)| a == b)
    }

    fn has_suffix(&self, suffix: &MoraString) -> bool {
        suffix.mora_count() <= self.mora_count()
            && self.iter().rev().zip(suffix.iter().rev()).all(|(a, b)| a == b)
    }

    /// Without `prefix`, if the sequence starts with it
    pub fn strip_prefix<'n>(&self, prefix: impl Into<Needle<'n>>) -> Option<MoraString> {
        let prefix = self.resolve(prefix.into())?;
        if self.has_prefix(&prefix) {
            self.slice(prefix.mora_count()..).ok()
        } else {
            None
        }
    }

    /// Without `suffix`, if the sequence ends with it
    pub fn strip_suffix<'n>(&self, suffix: impl Into<Needle<'n>>) -> Option<MoraString> {
        let suffix = self.resolve(suffix.into())?;
        if self.has_suffix(&suffix) {
            self.slice(..self.mora_count() - suffix.mora_count()).ok()
        } else {
            None
        }
    }

    /// Replace non-overlapping occurrences of `from`, at most `limit` of them
    ///
    /// Text between the replaced morae, skipped characters included, is
    /// kept. `None` when either pattern fails validation.
    pub fn replace<'a, 'b>(
        &self,
        from: impl Into<Needle<'a>>,
        to: impl Into<Needle<'b>>,
        limit: Option<usize>,
    ) -> Option<MoraString> {
        let from = self.resolve(from.into())?;
        let to = self.resolve(to.into())?;
        let width = from.mora_count();
        let mut positions = self.positions(&from);
        if let Some(limit) = limit {
            positions.truncate(limit);
        }

        let mut out = Assembler::default();
        let mut cursor = self.text_start();
        for pos in positions {
            let start = self.boundary(pos);
            out.copy(self, cursor, start);
            out.append(&to);
            cursor = if width == 0 {
                start
            } else {
                self.boundary_after(pos + width - 1)
            };
        }
        out.copy(self, cursor, self.text_end());
        Some(out.finish(self.table.clone()))
    }
}

/// A search pattern for the mora-aligned search methods
#[derive(Debug, Clone)]
pub struct Needle<'a>(Pattern<'a>);

#[derive(Debug, Clone)]
enum Pattern<'a> {
    Morae(&'a MoraString),
    Text(&'a str),
}

impl<'a> From<&'a MoraString> for Needle<'a> {
    fn from(value: &'a MoraString) -> Self {
        Needle(Pattern::Morae(value))
    }
}

impl<'a> From<&'a str> for Needle<'a> {
    fn from(value: &'a str) -> Self {
        Needle(Pattern::Text(value))
    }
}

impl<'a> From<&'a String> for Needle<'a> {
    fn from(value: &'a String) -> Self {
        Needle(Pattern::Text(value))
    }
}

/// Knuth-Morris-Pratt over mora tokens
///
/// Calls `on_match` with the start of each match. With `overlapping` unset
/// the scan restarts after each match. An empty needle matches at every
/// boundary.
fn kmp<F>(hay: &[&str], needle: &[&str], overlapping: bool, mut on_match: F)
where
    F: FnMut(usize) -> ControlFlow<()>,
{
    if needle.is_empty() {
        for pos in 0..=hay.len() {
            if on_match(pos).is_break() {
                return;
            }
        }
        return;
    }
    if needle.len() > hay.len() {
        return;
    }

    // fail[i]: length of the longest proper border of needle[..=i]
    let mut fail = vec![0usize; needle.len()];
    let mut k = 0;
    for i in 1..needle.len() {
        while k > 0 && needle[i] != needle[k] {
            k = fail[k - 1];
        }
        if needle[i] == needle[k] {
            k += 1;
        }
        fail[i] = k;
    }

    let mut k = 0;
    for (i, token) in hay.iter().enumerate() {
        while k > 0 && *token != needle[k] {
            k = fail[k - 1];
        }
        if *token == needle[k] {
            k += 1;
        }
        if k == needle.len() {
            if on_match(i + 1 - k).is_break() {
                return;
            }
            k = if overlapping { fail[k - 1] } else { 0 };
        }
    }
}

/// Iterator over the morae of a [`MoraString`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    text: &'a str,
    morae: std::slice::Iter<'a, Mora>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.morae.next().map(|m| m.as_str(self.text))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.morae.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.morae.next_back().map(|m| m.as_str(self.text))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a MoraString {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Default for MoraString {
    fn default() -> Self {
        Assembler::default().finish(None)
    }
}

impl fmt::Debug for MoraString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoraString")
            .field("text", &&*self.text)
            .field("morae", &self.tokens())
            .finish()
    }
}

impl fmt::Display for MoraString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for MoraString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.morae == other.morae
    }
}

impl Eq for MoraString {}

impl Hash for MoraString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.morae.hash(state);
    }
}

impl AsRef<str> for MoraString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Add for MoraString {
    type Output = MoraString;

    fn add(self, rhs: MoraString) -> MoraString {
        self.concat(&rhs)
    }
}

impl Add<&MoraString> for &MoraString {
    type Output = MoraString;

    fn add(self, rhs: &MoraString) -> MoraString {
        self.concat(rhs)
    }
}

impl Mul<usize> for &MoraString {
    type Output = MoraString;

    fn mul(self, n: usize) -> MoraString {
        self.repeat(n)
    }
}

impl Mul<usize> for MoraString {
    type Output = MoraString;

    fn mul(self, n: usize) -> MoraString {
        self.repeat(n)
    }
}

/// Concatenation of the collected strings, keeping the first one's table
impl FromIterator<MoraString> for MoraString {
    fn from_iter<I: IntoIterator<Item = MoraString>>(iter: I) -> Self {
        let mut out = Assembler::default();
        let mut table = None;
        for piece in iter {
            if table.is_none() {
                table = piece.table.clone();
            }
            out.append(&piece);
        }
        out.finish(table)
    }
}

impl FromStr for MoraString {
    type Err = MoraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s, true)
    }
}

impl TryFrom<&str> for MoraString {
    type Error = MoraError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value, true)
    }
}

impl TryFrom<String> for MoraString {
    type Error = MoraError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value, true)
    }
}

impl Serialize for MoraString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MoraString", 3)?;
        state.serialize_field("text", &*self.text)?;
        state.serialize_field("mora_count", &self.mora_count())?;
        state.serialize_field("morae", &self.tokens())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PatternTable;

    fn strict(text: &str) -> MoraString {
        MoraString::new(text, true).unwrap()
    }

    /// Config with no substitutions, independent of the active table
    fn plain() -> Config {
        Config::builder()
            .table(PatternTable::empty())
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_access() {
        let s = strict("がっこう");
        assert_eq!(s.mora_count(), 4);
        assert_eq!(s.mora_at(1).unwrap(), "っ");
        assert_eq!(s.get(4), None);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec!["が", "っ", "こ", "う"]);
        assert_eq!(s.to_string(), "がっこう");
    }

    #[test]
    fn test_mora_at_out_of_range() {
        let s = strict("ぱん");
        match s.mora_at(2).unwrap_err() {
            MoraError::Index { index, len } => assert_eq!((index, len), (2, 2)),
            other => panic!("expected index error, got {other:?}"),
        }
    }

    #[test]
    fn test_orphan_rejected_when_validating() {
        let err = MoraString::new("ゃ", true).unwrap_err();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.offset, 0);

        let lenient = MoraString::new("ゃ", false).unwrap();
        assert!(lenient.is_empty());
        assert_eq!(lenient.skipped(), 1);
        assert_eq!(lenient.as_str(), "ゃ");
    }

    #[test]
    fn test_char_offsets() {
        let s = MoraString::with_config("a キャン", &plain()).unwrap();
        assert_eq!(s.char_offset(0), Some(2));
        assert_eq!(s.char_offset(1), Some(4));
        assert_eq!(s.char_indices(), vec![4, 5]);
        assert_eq!(s.skipped(), 2);
    }

    #[test]
    fn test_slice() {
        let s = strict("トウキョウト");
        assert_eq!(s.mora_count(), 5);
        let middle = s.slice(2..5).unwrap();
        assert_eq!(middle.as_str(), "キョウト");
        assert_eq!(middle.mora_count(), 3);
        assert_eq!(middle.mora_at(0).unwrap(), "キョ");
        assert_eq!(middle.morae()[0].start, 0);
        assert_eq!(middle.morae()[0].byte_start, 0);

        assert_eq!(s.slice(..).unwrap(), s);
        assert!(s.slice(3..3).unwrap().is_empty());
        assert!(s.slice(..=5).is_err());
        assert!(s.slice(4..2).is_err());
    }

    #[test]
    fn test_slice_keeps_inner_skipped() {
        let s = MoraString::with_config("か、な!", &plain()).unwrap();
        let both = s.slice(0..2).unwrap();
        assert_eq!(both.as_str(), "か、な");
        assert_eq!(both.skipped(), 1);
    }

    #[test]
    fn test_concat() {
        let a = strict("カー");
        let b = strict("ドゥ");
        let joined = &a + &b;
        assert_eq!(joined.as_str(), "カードゥ");
        assert_eq!(joined.mora_count(), 3);
        assert_eq!(joined.mora_at(2).unwrap(), "ドゥ");
        assert_eq!(joined.morae()[2].start, 2);
        assert_eq!(a.clone() + b.clone(), joined);
    }

    #[test]
    fn test_find_is_mora_aligned() {
        let s = strict("キャッキャ");
        assert_eq!(s.find("キャ"), Some(0));
        assert_eq!(s.rfind("キャ"), Some(2));
        // "ャ" alone is not a mora of the haystack and fails validation
        assert_eq!(s.find("ャ"), None);
        assert!(!s.contains("キ"));
        assert!(s.contains("ッ"));
    }

    #[test]
    fn test_count_of_non_overlapping() {
        let s = strict("ああああ");
        assert_eq!(s.count_of("ああ"), 2);
        assert_eq!(s.match_indices("ああ"), vec![0, 2]);
        assert_eq!(s.rfind("ああ"), Some(2));
        assert_eq!(s.count_of(""), 5);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let s = strict("しんかんせん");
        assert!(s.starts_with("しん"));
        assert!(s.ends_with("せん"));
        assert!(!s.starts_with("しんかんせんせん"));
        assert_eq!(s.strip_prefix("しん").unwrap().as_str(), "かんせん");
        assert_eq!(s.strip_suffix("せん").unwrap().as_str(), "しんかん");
        assert!(s.strip_prefix("せん").is_none());
    }

    #[test]
    fn test_search_with_mora_string_needle() {
        let s = strict("ラーメン");
        let needle = strict("メン");
        assert_eq!(s.find(&needle), Some(2));
        assert!(s.ends_with(&needle));
    }

    #[test]
    fn test_replace() {
        let s = strict("かきかき");
        assert_eq!(s.replace("か", "さ", None).unwrap().as_str(), "さきさき");
        assert_eq!(s.replace("か", "さ", Some(1)).unwrap().as_str(), "さきかき");
        let shorter = s.replace("かき", "ん", None).unwrap();
        assert_eq!(shorter.as_str(), "んん");
        assert_eq!(shorter.mora_count(), 2);
    }

    #[test]
    fn test_replace_keeps_text_between_matches() {
        let s = MoraString::with_config("「か」、か!", &plain()).unwrap();
        let replaced = s.replace("か", "さ", None).unwrap();
        assert_eq!(replaced.as_str(), "「さ」、さ!");
        assert_eq!(replaced.mora_count(), 2);
        assert_eq!(replaced.skipped(), s.skipped());
        assert_eq!(replaced.morae()[1].start, 4);
    }

    #[test]
    fn test_replace_many_matches() {
        let n = 50_000;
        let s = strict(&"か".repeat(n));
        let replaced = s.replace("か", "さき", None).unwrap();
        assert_eq!(replaced.mora_count(), 2 * n);
        assert_eq!(replaced.as_str(), "さき".repeat(n));
        assert_eq!(replaced.morae()[2 * n - 1].start, 2 * n - 1);

        let grown = s.replace("", "ん", None).unwrap();
        assert_eq!(grown.mora_count(), 2 * n + 1);
    }

    #[test]
    fn test_concat_keeps_outer_text() {
        let a = MoraString::with_config("「カ」", &plain()).unwrap();
        let b = MoraString::with_config(" ド!", &plain()).unwrap();
        let joined = &a + &b;
        assert_eq!(joined.as_str(), "「カ」 ド!");
        assert_eq!(joined.skipped(), 4);
        assert_eq!(joined.char_offset(1), Some(4));
    }

    #[test]
    fn test_repeat() {
        let s = strict("キャン");
        let tripled = s.repeat(3);
        assert_eq!(tripled.as_str(), "キャンキャンキャン");
        assert_eq!(tripled.mora_count(), 6);
        assert_eq!(tripled.mora_at(4).unwrap(), "キャ");
        assert_eq!(&s * 3, tripled);
        assert!(s.repeat(0).is_empty());
    }

    #[test]
    fn test_from_strs_and_collect() {
        let joined = MoraString::from_strs(["ｶ", "ﾞ", "ッコー"], true).unwrap();
        assert_eq!(joined.as_str(), "ガッコー");
        assert_eq!(joined.mora_count(), 4);
        assert!(MoraString::from_strs(["か", "ゃゃ"], true).is_err());

        let collected: MoraString = ["ラー", "メン"].into_iter().map(strict).collect();
        assert_eq!(collected, strict("ラーメン"));
    }

    #[test]
    fn test_text_needle_uses_haystack_table() {
        let (table, _) = PatternTable::build([vec![("kya", "キャ"), ("tto", "ット")]]);
        let config = Config::builder().table(table).build().unwrap();
        let s = MoraString::with_config("kyattokya", &config).unwrap();
        assert_eq!(s.as_str(), "キャットキャ");
        assert_eq!(s.count_of("kya"), 2);
        assert_eq!(s.rfind("kya"), Some(3));
        assert!(s.ends_with("kya"));
        // Derived strings keep the table
        assert_eq!(s.slice(1..).unwrap().find("tto"), Some(0));
    }

    #[test]
    fn test_from_bytes() {
        let s = MoraString::from_bytes("ぱん".as_bytes(), true).unwrap();
        assert_eq!(s.mora_count(), 2);
        let err = MoraString::from_bytes(b"\xe3\x81\xb1\xe3", true).unwrap_err();
        assert!(matches!(err, MoraError::Encoding { valid_up_to: 3 }));
    }

    #[test]
    fn test_from_str_and_try_from() {
        let parsed: MoraString = "きゃ".parse().unwrap();
        assert_eq!(parsed.mora_count(), 1);
        assert!(MoraString::try_from("ーあ").is_err());
        assert!(MoraString::try_from(String::from("あー")).is_ok());
    }

    #[test]
    fn test_serialize() {
        let s = strict("ぱん");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["text"], "ぱん");
        assert_eq!(json["mora_count"], 2);
        assert_eq!(json["morae"], serde_json::json!(["ぱ", "ん"]));
    }

    #[test]
    fn test_kmp_overlapping() {
        let mut hits = Vec::new();
        kmp(&["a", "a", "a"], &["a", "a"], true, |pos| {
            hits.push(pos);
            ControlFlow::Continue(())
        });
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MoraString>();
    }
}
