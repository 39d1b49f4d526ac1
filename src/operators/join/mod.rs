mod hash_join;
mod nested_loop;
mod plan;

pub use plan::{choose_plan, JoinPlan};

use crate::common::Result;
use crate::engine::Engine;
use crate::storage::Relation;

/// `spec.md` §4.G, `join(idx1, t1, idx2, t2)`: picks a plan by combined
/// page footprint against the buffer, then dispatches to whichever
/// strategy the plan names. Result schema is always `t1_attrs ++ t2_attrs`.
pub fn join(
    engine: &mut Engine,
    idx1: usize,
    t1_name: &str,
    idx2: usize,
    t2_name: &str,
) -> Result<Relation> {
    let t1 = engine.table(t1_name)?.clone();
    let t2 = engine.table(t2_name)?.clone();

    if idx1 as u32 >= t1.nattrs {
        return crate::errinput!(
            "attribute index {idx1} out of range for table '{}' ({} attributes)",
            t1.name,
            t1.nattrs
        );
    }
    if idx2 as u32 >= t2.nattrs {
        return crate::errinput!(
            "attribute index {idx2} out of range for table '{}' ({} attributes)",
            t2.name,
            t2.nattrs
        );
    }

    match choose_plan(t1.npages, t2.npages, engine.buf_slots()) {
        JoinPlan::Hash => hash_join::execute(engine, idx1, &t1, idx2, &t2),
        JoinPlan::NestedLoop { outer_is_t1 } => {
            nested_loop::execute(engine, idx1, &t1, idx2, &t2, outer_is_t1)
        }
    }
}
