use crate::common::constants::MAX_TABLE_NAME_BYTES;
use crate::common::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// One row of the external catalog, as described in `spec.md` §6
/// ("Catalog input"): `(oid, name, nattrs, ntuples)`. Geometry
/// (`ntpp`/`npages`) is *not* part of the catalog proper — it's derived by
/// the catalog projection (component A) once `page_size` is known.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub oid: u32,
    pub name: String,
    pub nattrs: u32,
    pub ntuples: u32,
}

impl CatalogEntry {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.len() > MAX_TABLE_NAME_BYTES {
            return Err(Error::InvalidCatalog(format!(
                "table name '{}' must be 1-{} printable bytes",
                self.name, MAX_TABLE_NAME_BYTES
            )));
        }
        if self.nattrs == 0 {
            return Err(Error::InvalidCatalog(format!(
                "table '{}' must have at least one attribute",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    tables: Vec<CatalogEntry>,
}

/// Loads the ordered list of table rows that the catalog projection
/// (component A) consumes at engine startup.
pub struct Catalog;

impl Catalog {
    /// Reads a TOML/JSON catalog description (an array under a `tables`
    /// key) from `path`, validating each entry.
    pub fn load(path: &Path) -> Result<Vec<CatalogEntry>> {
        let raw = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|err| Error::InvalidCatalog(err.to_string()))?;
        let parsed: RawCatalog = raw
            .try_deserialize()
            .map_err(|err| Error::InvalidCatalog(err.to_string()))?;
        Self::from_entries(parsed.tables)
    }

    /// Validates a list of entries supplied directly (used heavily by
    /// tests, which build synthetic catalogs in memory rather than writing
    /// them to disk).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Vec<CatalogEntry>> {
        for entry in &entries {
            entry.validate()?;
        }
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate table name '{}'",
                    entry.name
                )));
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            oid: 1,
            name: name.to_string(),
            nattrs: 2,
            ntuples: 10,
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let result = Catalog::from_entries(vec![entry("this_name_is_too_long")]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Catalog::from_entries(vec![entry("r"), entry("r")]);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_well_formed_entries() {
        let result = Catalog::from_entries(vec![entry("r"), entry("s")]);
        assert!(result.is_ok());
    }
}
