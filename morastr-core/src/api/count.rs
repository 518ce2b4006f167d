//! Counting without building a [`MoraString`](crate::MoraString)

use crate::api::config::Config;
use crate::domain::segmenter;
use crate::error::Result;
use crate::substitution::normalize_with;

/// Total mora count of `text`
///
/// With `ignore` set, ill-formed sequences are dropped instead of
/// rejected. Same result as `MoraString::new(text, !ignore)?.mora_count()`.
pub fn count_all(text: &str, ignore: bool) -> Result<usize> {
    count_all_with(text, &Config::from_validate(!ignore))
}

/// Total mora count under an explicit configuration
pub fn count_all_with(text: &str, config: &Config) -> Result<usize> {
    let table = config.table();
    let normalized = normalize_with(text, &table);
    Ok(segmenter::count(&normalized, config.segment_config())?)
}

/// Decode UTF-8 and count
pub fn count_all_bytes(bytes: &[u8], ignore: bool) -> Result<usize> {
    count_all(std::str::from_utf8(bytes)?, ignore)
}

/// Decode UTF-8 and count under an explicit configuration
pub fn count_all_bytes_with(bytes: &[u8], config: &Config) -> Result<usize> {
    count_all_with(std::str::from_utf8(bytes)?, config)
}
