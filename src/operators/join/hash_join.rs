use crate::common::Result;
use crate::engine::Engine;
use crate::storage::{Relation, TableDescriptor};

const NPARTITIONS: usize = 2;

fn partition_of(v: i32) -> usize {
    v.rem_euclid(NPARTITIONS as i32) as usize
}

/// `spec.md` §4.G, "Simple hash join": `t1` is always the build side,
/// `t2` always the probe side, partitioned by `value mod 2` on the join
/// attribute. The partition table is scratch memory, discarded on return.
pub fn execute(
    engine: &mut Engine,
    idx1: usize,
    t1: &TableDescriptor,
    idx2: usize,
    t2: &TableDescriptor,
) -> Result<Relation> {
    let mut partitions: Vec<Vec<Vec<i32>>> = vec![Vec::new(); NPARTITIONS];

    for ipid in 0..t1.npages {
        let bid = engine.request_page(&t1.name, ipid)?;
        let rows: Vec<Vec<i32>> = engine
            .page_buffer()
            .get(bid)
            .tuples
            .rows()
            .map(|r| r.to_vec())
            .collect();
        engine.page_buffer_mut().release(bid);

        for row in rows {
            partitions[partition_of(row[idx1])].push(row);
        }
    }

    let mut result = Relation::empty(t1.nattrs + t2.nattrs);

    for ipid in 0..t2.npages {
        let bid = engine.request_page(&t2.name, ipid)?;
        let rows: Vec<Vec<i32>> = engine
            .page_buffer()
            .get(bid)
            .tuples
            .rows()
            .map(|r| r.to_vec())
            .collect();
        engine.page_buffer_mut().release(bid);

        for probe_row in rows {
            for build_row in &partitions[partition_of(probe_row[idx2])] {
                if build_row[idx1] == probe_row[idx2] {
                    let combined = [build_row.as_slice(), probe_row.as_slice()].concat();
                    result.push(combined)?;
                }
            }
        }
    }

    Ok(result)
}
