//! TOML schema for mapping sources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named mapping document
///
/// ```toml
/// [metadata]
/// name = "halfwidth"
///
/// [entries]
/// "ｶﾞ" = "ガ"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Source description
    pub metadata: Metadata,
    /// Variant spelling to canonical spelling
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// Mapping metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Source name, used in diagnostics
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}
