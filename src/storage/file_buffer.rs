use crate::common::constants::EMPTY_SLOT_INVARIANT_MSG;
use crate::event_log::EventLog;
use std::fs::File;
use std::path::PathBuf;

/// A populated file-buffer slot (`spec.md` §3, "File descriptor slot").
/// The open handle is owned here and closes exactly once, either on
/// round-robin eviction or when the slot is dropped wholesale
/// (`spec.md` §9: "File handles as owned resources").
#[derive(Debug)]
pub struct FileSlot {
    pub oid: u32,
    pub name: String,
    pub nattrs: u32,
    pub ntuples: u32,
    pub npages: u32,
    pub ntpp: u32,
    pub path: PathBuf,
    pub file: File,
}

/// The file buffer: a fixed-capacity cache of open table files, evicted
/// round-robin (component B). Round-robin has no interaction with pin
/// state — file slots are never pinned — so, unlike the page buffer,
/// eviction here always succeeds in a single step.
#[derive(Debug)]
pub struct FileBuffer {
    slots: Vec<Option<FileSlot>>,
    nvf: usize,
}

impl FileBuffer {
    pub fn new(capacity: usize) -> Self {
        FileBuffer {
            slots: (0..capacity).map(|_| None).collect(),
            nvf: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently non-empty slots (`spec.md` §8, property 4).
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, idx: usize) -> &FileSlot {
        self.slots[idx].as_ref().expect(EMPTY_SLOT_INVARIANT_MSG)
    }

    pub fn file_mut(&mut self, idx: usize) -> &mut File {
        &mut self.slots[idx].as_mut().expect(EMPTY_SLOT_INVARIANT_MSG).file
    }

    /// Linear scan on table name (`spec.md` §4.B: "Lookup is a linear scan
    /// on table name").
    pub fn find(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.name == name))
    }

    /// `spec.md` §4.B: "acquire_slot()" — first-fit on an empty slot, else
    /// round-robin eviction at `NVF`.
    pub fn acquire_slot(&mut self, log: &mut dyn EventLog) -> usize {
        if let Some(idx) = self.slots.iter().position(|s| s.is_none()) {
            return idx;
        }

        let idx = self.nvf;
        if let Some(evicted) = self.slots[idx].take() {
            log.log_close_file(evicted.oid);
            // `evicted` (and its open `File`) drops here.
        }
        self.nvf = (idx + 1) % self.slots.len();
        idx
    }

    pub fn install(&mut self, idx: usize, slot: FileSlot) {
        self.slots[idx] = Some(slot);
    }
}
