use crate::common::{Error, Result};

/// A single materialized tuple: `nattrs` signed 32-bit values.
pub type Tuple = Vec<i32>;

/// A contiguous `ntuples x nattrs` block of signed 32-bit values, addressed
/// by `(row, col)`. This replaces the reference's array-of-arrays
/// (`INT** tuple`) with a single owned allocation per page, per the design
/// note in `spec.md` §9 ("Raw pointer matrices → owned 2-D structures") —
/// eviction becomes one `Vec` drop instead of a per-row free loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleMatrix {
    nattrs: usize,
    data: Vec<i32>,
}

impl TupleMatrix {
    pub fn from_rows(nattrs: usize, rows: Vec<i32>) -> Self {
        debug_assert_eq!(rows.len() % nattrs.max(1), 0);
        TupleMatrix {
            nattrs,
            data: rows,
        }
    }

    pub fn nattrs(&self) -> usize {
        self.nattrs
    }

    pub fn ntuples(&self) -> usize {
        if self.nattrs == 0 {
            0
        } else {
            self.data.len() / self.nattrs
        }
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.nattrs + col]
    }

    pub fn row(&self, row: usize) -> &[i32] {
        let start = row * self.nattrs;
        &self.data[start..start + self.nattrs]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.ntuples()).map(move |r| self.row(r))
    }
}

/// Result shape common to both operators: a schema width plus a row set in
/// physical scan order (`spec.md` §6, "Relation result shape").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relation {
    pub nattrs: u32,
    pub tuples: Vec<Tuple>,
}

impl Relation {
    pub fn empty(nattrs: u32) -> Self {
        Relation {
            nattrs,
            tuples: Vec::new(),
        }
    }

    pub fn ntuples(&self) -> usize {
        self.tuples.len()
    }

    pub fn push(&mut self, row: Tuple) -> Result<()> {
        if row.len() != self.nattrs as usize {
            return Err(Error::InvalidInput(format!(
                "row width {} does not match relation width {}",
                row.len(),
                self.nattrs
            )));
        }
        self.tuples.push(row);
        Ok(())
    }
}
