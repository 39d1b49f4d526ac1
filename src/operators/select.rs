use crate::common::Result;
use crate::engine::Engine;
use crate::storage::Relation;

/// `spec.md` §4.F, `sel(idx, cond_val, table_name)`: a page-at-a-time scan
/// with a per-tuple equality filter. Pages are requested and released one
/// at a time, so the operator never holds more than one pin at once.
pub fn sel(engine: &mut Engine, idx: usize, cond_val: i32, table_name: &str) -> Result<Relation> {
    let table = engine.table(table_name)?.clone();
    if idx as u32 >= table.nattrs {
        return crate::errinput!(
            "attribute index {idx} out of range for table '{}' ({} attributes)",
            table.name,
            table.nattrs
        );
    }

    let mut result = Relation::empty(table.nattrs);
    for ipid in 0..table.npages {
        let bid = engine.request_page(&table.name, ipid)?;
        for row in engine.page_buffer().get(bid).tuples.rows() {
            if row[idx] == cond_val {
                result.push(row.to_vec())?;
            }
        }
        engine.page_buffer_mut().release(bid);
    }

    Ok(result)
}
