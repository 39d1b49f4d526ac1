use crate::common::Result;
use crate::engine::Engine;
use crate::storage::{Relation, TableDescriptor};

/// `spec.md` §4.G, "Block nested loop join": the outer side is read
/// `B - 1` pages at a time and held pinned while the inner side streams
/// past once per chunk. Output column order is always `t1 || t2`
/// regardless of which side is outer (`spec.md` §9, "Output column order
/// for nested loop").
pub fn execute(
    engine: &mut Engine,
    idx1: usize,
    t1: &TableDescriptor,
    idx2: usize,
    t2: &TableDescriptor,
    outer_is_t1: bool,
) -> Result<Relation> {
    let (outer, outer_idx, inner, inner_idx) = if outer_is_t1 {
        (t1, idx1, t2, idx2)
    } else {
        (t2, idx2, t1, idx1)
    };

    let chunk_width = engine.buf_slots().saturating_sub(1).max(1) as u32;
    let mut result = Relation::empty(t1.nattrs + t2.nattrs);

    let mut chunk_start = 0u32;
    while chunk_start < outer.npages {
        let w = chunk_width.min(outer.npages - chunk_start);
        let outer_bids: Vec<usize> = (0..w)
            .map(|j| engine.request_page(&outer.name, chunk_start + j))
            .collect::<Result<_>>()?;

        for inner_ipid in 0..inner.npages {
            let inner_bid = engine.request_page(&inner.name, inner_ipid)?;
            let inner_rows: Vec<Vec<i32>> = engine
                .page_buffer()
                .get(inner_bid)
                .tuples
                .rows()
                .map(|r| r.to_vec())
                .collect();

            for &outer_bid in &outer_bids {
                let outer_rows: Vec<Vec<i32>> = engine
                    .page_buffer()
                    .get(outer_bid)
                    .tuples
                    .rows()
                    .map(|r| r.to_vec())
                    .collect();

                for outer_row in &outer_rows {
                    for inner_row in &inner_rows {
                        if outer_row[outer_idx] == inner_row[inner_idx] {
                            let combined = if outer_is_t1 {
                                [outer_row.as_slice(), inner_row.as_slice()].concat()
                            } else {
                                [inner_row.as_slice(), outer_row.as_slice()].concat()
                            };
                            result.push(combined)?;
                        }
                    }
                }
            }

            engine.page_buffer_mut().release(inner_bid);
        }

        for outer_bid in outer_bids {
            engine.page_buffer_mut().release(outer_bid);
        }

        chunk_start += w;
    }

    Ok(result)
}
