use crate::catalog::CatalogEntry;
use crate::common::{Error, Result};
use crate::config::Config;
use crate::event_log::EventLog;
use crate::operators;
use crate::storage::{self, FileBuffer, PageBuffer, Relation, TableDescriptor};

/// The engine handle bundling every piece of process-local state the
/// reference scattered across global arrays and rotating-pointer counters
/// (`spec.md` §9, "Global state → explicit engine handle"): the projected
/// catalog, both buffers, and the event-log sink. `Engine::init` brackets
/// construction; `Engine::release` brackets teardown (`spec.md` §6).
///
/// Single-threaded by design (`spec.md` §5): no `Arc`/`RwLock` wrapping,
/// unlike the teacher's `BufferPoolManager`, since this engine never hands
/// a handle to more than one caller at a time.
pub struct Engine {
    config: Config,
    tables: Vec<TableDescriptor>,
    file_buffer: FileBuffer,
    page_buffer: PageBuffer,
    event_log: Box<dyn EventLog>,
}

impl Engine {
    /// `spec.md` §6, `init()`: projects the catalog against `page_size`,
    /// validates the configuration against the widest table, and allocates
    /// both buffers at their configured capacities.
    pub fn init(config: Config, catalog: Vec<CatalogEntry>, event_log: Box<dyn EventLog>) -> Result<Engine> {
        let tables = storage::project(&catalog, config.page_size)?;
        let max_nattrs = tables.iter().map(|t| t.nattrs).max().unwrap_or(0);
        config.validate(max_nattrs)?;

        Ok(Engine {
            file_buffer: FileBuffer::new(config.file_limit),
            page_buffer: PageBuffer::new(config.buf_slots),
            tables,
            config,
            event_log,
        })
    }

    /// `spec.md` §6, `release()`: frees every tuple matrix and both
    /// descriptor arrays by simply dropping the engine. Kept as an explicit
    /// call so call sites read the same `init()`/`release()` bracket the
    /// reference names, even though `Drop` alone would suffice.
    pub fn release(self) {
        drop(self);
    }

    pub fn table(&self, name: &str) -> Result<&TableDescriptor> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn buf_slots(&self) -> usize {
        self.config.buf_slots
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page_buffer(&self) -> &PageBuffer {
        &self.page_buffer
    }

    pub fn page_buffer_mut(&mut self) -> &mut PageBuffer {
        &mut self.page_buffer
    }

    pub fn event_log(&self) -> &dyn EventLog {
        self.event_log.as_ref()
    }

    /// `spec.md` §4.E, `request_page(table_name, ipid)`.
    pub fn request_page(&mut self, table_name: &str, ipid: u32) -> Result<usize> {
        storage::request_page(
            table_name,
            ipid,
            &self.tables,
            &self.config.database_root,
            self.config.page_size,
            &mut self.file_buffer,
            &mut self.page_buffer,
            self.event_log.as_mut(),
        )
    }

    /// `spec.md` §4.F.
    pub fn sel(&mut self, idx: usize, cond_val: i32, table_name: &str) -> Result<Relation> {
        operators::sel(self, idx, cond_val, table_name)
    }

    /// `spec.md` §4.G.
    pub fn join(&mut self, idx1: usize, t1: &str, idx2: usize, t2: &str) -> Result<Relation> {
        operators::join(self, idx1, t1, idx2, t2)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::debug!(
            "engine dropped: {} page slots, {} file slots in use",
            self.page_buffer.occupied_count(),
            self.file_buffer.occupied_count()
        );
    }
}
