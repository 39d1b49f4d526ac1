use crate::catalog::CatalogEntry;
use crate::common::constants::{ATTR_BYTES, PAGE_HEADER_BYTES};
use crate::common::{Error, Result};

/// Derived, per-session table geometry (`spec.md` §3, §4.A — "catalog
/// projection"). Computed once at `Engine::init()` time from the raw
/// catalog and the configured page size; every later lookup by table name
/// is against this projected list, not the raw catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub oid: u32,
    pub name: String,
    pub nattrs: u32,
    pub ntuples: u32,
    /// Tuples per page: `floor((page_size - 8) / (nattrs * 4))`.
    pub ntpp: u32,
    /// Page count: `ceil(ntuples / ntpp)`.
    pub npages: u32,
}

impl TableDescriptor {
    /// Number of tuples actually stored in page `ipid` (all pages but the
    /// last hold exactly `ntpp` tuples).
    pub fn tuples_in_page(&self, ipid: u32) -> u32 {
        if ipid + 1 == self.npages {
            self.ntuples - self.ntpp * (self.npages - 1)
        } else {
            self.ntpp
        }
    }
}

/// Projects the raw catalog into [`TableDescriptor`]s (component A).
pub fn project(entries: &[CatalogEntry], page_size: usize) -> Result<Vec<TableDescriptor>> {
    entries
        .iter()
        .map(|entry| project_one(entry, page_size))
        .collect()
}

fn project_one(entry: &CatalogEntry, page_size: usize) -> Result<TableDescriptor> {
    let row_bytes = entry.nattrs as usize * ATTR_BYTES;
    let usable = page_size.checked_sub(PAGE_HEADER_BYTES).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "page_size {page_size} is smaller than the {PAGE_HEADER_BYTES}-byte page header"
        ))
    })?;
    let ntpp = (usable / row_bytes) as u32;
    if ntpp == 0 {
        return Err(Error::InvalidConfig(format!(
            "table '{}' needs {row_bytes} bytes per tuple but page_size {page_size} only has {usable} usable bytes",
            entry.name
        )));
    }
    let npages = entry.ntuples.div_ceil(ntpp);

    Ok(TableDescriptor {
        oid: entry.oid,
        name: entry.name.clone(),
        nattrs: entry.nattrs,
        ntuples: entry.ntuples,
        ntpp,
        npages,
    })
}
