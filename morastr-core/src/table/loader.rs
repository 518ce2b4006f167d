//! Mapping sources and the process-wide active table
//!
//! The embedded sources are parsed on first use. The active table is only
//! ever replaced as a whole, so readers holding an `Arc` snapshot keep a
//! consistent view.

use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::TableError;
use crate::table::config::MappingConfig;
use crate::table::{PatternEntry, PatternTable};

/// Embedded mapping sources, in merge order
const EMBEDDED_SOURCES: [(&str, &str); 2] = [
    (
        "halfwidth",
        include_str!("../../configs/tables/halfwidth.toml"),
    ),
    (
        "combining",
        include_str!("../../configs/tables/combining.toml"),
    ),
];

static ACTIVE: OnceLock<RwLock<Arc<PatternTable>>> = OnceLock::new();

/// Parse a mapping document
pub fn parse_mapping(name: &str, source: &str) -> Result<MappingConfig, TableError> {
    toml::from_str(source).map_err(|e| TableError::Parse {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Read and parse a mapping file
pub fn load_mapping_file(path: impl AsRef<Path>) -> Result<MappingConfig, TableError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    parse_mapping(&path.display().to_string(), &source)
}

/// Parsed embedded sources
pub fn embedded_mappings() -> Result<Vec<MappingConfig>, TableError> {
    EMBEDDED_SOURCES
        .iter()
        .map(|(name, source)| parse_mapping(name, source))
        .collect()
}

/// Table built from the embedded sources
pub fn default_table() -> Result<PatternTable, TableError> {
    let mappings = embedded_mappings()?;
    let (table, _) = PatternTable::build(mappings.into_iter().map(|m| m.entries));
    Ok(table)
}

fn active() -> &'static RwLock<Arc<PatternTable>> {
    ACTIVE.get_or_init(|| {
        let table = default_table().unwrap_or_else(|e| {
            tracing::error!("failed to load embedded mapping tables: {e}");
            PatternTable::empty()
        });
        RwLock::new(Arc::new(table))
    })
}

/// Snapshot of the active table
pub fn active_table() -> Arc<PatternTable> {
    let guard = active().read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&*guard)
}

/// Replace the active table
pub fn set_active_table(table: PatternTable) {
    let table = Arc::new(table);
    let mut guard = active().write().unwrap_or_else(PoisonError::into_inner);
    *guard = table;
    tracing::debug!(entries = guard.len(), "replaced active pattern table");
}

/// Add mappings to the active table
///
/// Builds a new table from the current one and swaps it in. Returns the
/// entries that changed the table.
pub fn register<I, K, V>(mapping: I) -> Vec<PatternEntry>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let lock = active();
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    let (table, effective) = guard.register(mapping);
    *guard = Arc::new(table);
    tracing::debug!(
        registered = effective.len(),
        entries = guard.len(),
        "registered mappings"
    );
    effective
}

/// Restore the active table built from the embedded sources
pub fn reset_active_table() -> Result<(), TableError> {
    set_active_table(default_table()?);
    Ok(())
}
