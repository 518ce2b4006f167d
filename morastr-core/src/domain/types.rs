//! Mora spans and segmentation results

use serde::Serialize;
use std::ops::Range;

/// A mora span over normalized text
///
/// `start` and `len` count code points; the byte range addresses the same
/// characters in the UTF-8 buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Mora {
    /// Code-point index of the first character
    pub start: usize,
    /// Number of code points (1 or 2)
    pub len: usize,
    /// Byte offset of the first character
    pub byte_start: usize,
    /// Byte offset one past the last character
    pub byte_end: usize,
}

impl Mora {
    /// Single-character mora at the given position
    #[inline]
    pub(crate) fn unit(start: usize, byte_start: usize, ch: char) -> Self {
        Self {
            start,
            len: 1,
            byte_start,
            byte_end: byte_start + ch.len_utf8(),
        }
    }

    /// Code-point index one past the last character
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Byte range of the span
    #[inline]
    pub fn bytes(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// The span's text within `source`
    #[inline]
    pub fn as_str<'a>(&self, source: &'a str) -> &'a str {
        &source[self.bytes()]
    }

    /// Same span moved by the given code-point and byte offsets
    pub(crate) fn shifted(self, chars: usize, bytes: usize) -> Self {
        Self {
            start: self.start + chars,
            len: self.len,
            byte_start: self.byte_start + bytes,
            byte_end: self.byte_end + bytes,
        }
    }

    /// Same span relative to an origin at the given offsets
    pub(crate) fn rebased(self, chars: usize, bytes: usize) -> Self {
        Self {
            start: self.start - chars,
            len: self.len,
            byte_start: self.byte_start - bytes,
            byte_end: self.byte_end - bytes,
        }
    }
}

/// Output of a segmentation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segmentation {
    /// Mora spans in text order
    pub morae: Vec<Mora>,
    /// Characters classified as `Other`
    pub other: usize,
    /// Orphan characters dropped in lenient mode
    pub dropped: usize,
}

impl Segmentation {
    /// Code points covered by mora spans
    pub fn covered(&self) -> usize {
        self.morae.iter().map(|m| m.len).sum()
    }

    /// Characters that are not part of any mora
    pub fn skipped(&self) -> usize {
        self.other + self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mora() {
        let mora = Mora::unit(3, 9, 'カ');
        assert_eq!(mora.end(), 4);
        assert_eq!(mora.bytes(), 9..12);
    }

    #[test]
    fn test_as_str() {
        let text = "aキャ";
        let mora = Mora {
            start: 1,
            len: 2,
            byte_start: 1,
            byte_end: 7,
        };
        assert_eq!(mora.as_str(text), "キャ");
    }

    #[test]
    fn test_shifted() {
        let mora = Mora::unit(0, 0, 'ん').shifted(2, 6);
        assert_eq!(mora.start, 2);
        assert_eq!(mora.bytes(), 6..9);
        assert_eq!(mora.rebased(2, 6), Mora::unit(0, 0, 'ん'));
    }

    #[test]
    fn test_segmentation_totals() {
        let seg = Segmentation {
            morae: vec![
                Mora::unit(0, 0, 'ア'),
                Mora {
                    start: 1,
                    len: 2,
                    byte_start: 3,
                    byte_end: 9,
                },
            ],
            other: 2,
            dropped: 1,
        };
        assert_eq!(seg.covered(), 3);
        assert_eq!(seg.skipped(), 3);
    }
}
