//! Longest-match-first rewriting of variant spellings
//!
//! Matching is leftmost-longest and non-overlapping. Replacement text is
//! emitted as is and never rescanned.

use std::borrow::Cow;

use crate::error::Result;
use crate::table::{loader, PatternTable};

/// Normalize with the active table
pub fn normalize(text: &str) -> Cow<'_, str> {
    normalize_with(text, &loader::active_table())
}

/// Normalize with an explicit table
pub fn normalize_with<'a>(text: &'a str, table: &PatternTable) -> Cow<'a, str> {
    let matcher = table.matcher();
    if matcher.is_empty() || text.is_empty() {
        return Cow::Borrowed(text);
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let plain: Vec<char> = chars.iter().map(|&(_, ch)| ch).collect();
    let hits = matcher.longest_at(&plain);

    let Some(first) = hits.iter().position(Option::is_some) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..chars[first].0]);
    let mut pos = first;
    while pos < chars.len() {
        match hits[pos] {
            Some(hit) => {
                out.push_str(table.canonical_of(hit));
                pos += hit.len as usize;
            }
            None => {
                out.push(chars[pos].1);
                pos += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Decode UTF-8 and normalize with the active table
pub fn normalize_bytes(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let text = std::str::from_utf8(bytes)?;
    Ok(normalize(text))
}

/// Decode UTF-8 and normalize with an explicit table
pub fn normalize_bytes_with<'a>(bytes: &'a [u8], table: &PatternTable) -> Result<Cow<'a, str>> {
    let text = std::str::from_utf8(bytes)?;
    Ok(normalize_with(text, table))
}
