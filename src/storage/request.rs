use crate::common::{Error, Result};
use crate::event_log::EventLog;
use crate::storage::file_buffer::FileBuffer;
use crate::storage::page_buffer::PageBuffer;
use crate::storage::page_reader::{read_via_disk, read_via_file_slot};
use crate::storage::table::TableDescriptor;
use std::path::Path;

/// `spec.md` §4.E, "Buffer request API": locates the requested page,
/// trying the page buffer, then the file buffer, then disk, in that order,
/// and returns a pinned page-buffer slot index.
pub fn request_page(
    table_name: &str,
    ipid: u32,
    tables: &[TableDescriptor],
    database_root: &Path,
    page_size: usize,
    file_buffer: &mut FileBuffer,
    page_buffer: &mut PageBuffer,
    log: &mut dyn EventLog,
) -> Result<usize> {
    if let Some(idx) = page_buffer.find(table_name, ipid) {
        page_buffer.mark_hit(idx);
        return Ok(idx);
    }

    if let Some(fid) = file_buffer.find(table_name) {
        return read_via_file_slot(file_buffer, page_buffer, fid, ipid, page_size, log);
    }

    let table = tables
        .iter()
        .find(|t| t.name == table_name)
        .ok_or_else(|| Error::UnknownTable(table_name.to_string()))?;

    read_via_disk(
        database_root,
        page_size,
        table,
        ipid,
        file_buffer,
        page_buffer,
        log,
    )
}
