/// `spec.md` §4.G: which join strategy to run, and — for block nested
/// loop — which side is outer. A precomputed record rather than a branch
/// re-evaluated inside the hot loop (`spec.md` §9, "Plan dispatch → tagged
/// variant").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPlan {
    Hash,
    NestedLoop { outer_is_t1: bool },
}

/// `spec.md` §4.G, "Plan selection": simple hash when the combined page
/// footprint fits the buffer, block nested loop otherwise. Block nested
/// loop's outer/inner choice is a page-read cost comparison that favors
/// `t1` on ties.
pub fn choose_plan(npages1: u32, npages2: u32, buf_slots: usize) -> JoinPlan {
    let buf_slots = buf_slots as u32;
    if npages1 + npages2 <= buf_slots {
        return JoinPlan::Hash;
    }

    let chunk = buf_slots.saturating_sub(1).max(1);
    let chunks1 = npages1.div_ceil(chunk);
    let chunks2 = npages2.div_ceil(chunk);
    let cost1 = npages1 + npages2 * chunks1;
    let cost2 = npages2 + npages1 * chunks2;

    JoinPlan::NestedLoop {
        outer_is_t1: cost1 <= cost2,
    }
}
