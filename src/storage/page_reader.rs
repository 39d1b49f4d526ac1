use crate::common::Result;
use crate::event_log::EventLog;
use crate::storage::file_buffer::{FileBuffer, FileSlot};
use crate::storage::page_buffer::PageBuffer;
use crate::storage::table::TableDescriptor;
use crate::storage::tuple::TupleMatrix;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Decodes one page (`spec.md` §3, "On-disk page (binary format)"): an
/// 8-byte little-endian page id followed by `ntip * nattrs` little-endian
/// `i32` values, row-major (tuple-major, attribute-minor).
fn decode_page(file: &mut File, offset: u64, ntip: u32, nattrs: u32) -> Result<(u64, TupleMatrix)> {
    file.seek(SeekFrom::Start(offset))?;

    let mut pageid_bytes = [0u8; 8];
    file.read_exact(&mut pageid_bytes)?;
    let pageid = u64::from_le_bytes(pageid_bytes);

    let count = ntip as usize * nattrs as usize;
    let mut values = Vec::with_capacity(count);
    let mut word = [0u8; 4];
    for _ in 0..count {
        file.read_exact(&mut word)?;
        values.push(i32::from_le_bytes(word));
    }

    Ok((pageid, TupleMatrix::from_rows(nattrs as usize, values)))
}

/// `spec.md` §4.D, entry point 1: read a page via an already-open file-buffer
/// slot. Returns the (now-pinned) page-buffer slot index.
pub fn read_via_file_slot(
    file_buffer: &mut FileBuffer,
    page_buffer: &mut PageBuffer,
    fid: usize,
    ipid: u32,
    page_size: usize,
    log: &mut dyn EventLog,
) -> Result<usize> {
    let (nattrs, npages, ntuples, ntpp, oid, name) = {
        let slot = file_buffer.get(fid);
        (
            slot.nattrs,
            slot.npages,
            slot.ntuples,
            slot.ntpp,
            slot.oid,
            slot.name.clone(),
        )
    };

    let ntip = tuples_in_page(ipid, npages, ntuples, ntpp);
    let offset = ipid as u64 * page_size as u64;

    let (pageid, tuples) = decode_page(file_buffer.file_mut(fid), offset, ntip, nattrs)?;

    let bid = page_buffer.acquire_slot(log)?;
    log.log_read_page(pageid);
    page_buffer.install(bid, pageid, ipid, oid, name, tuples);

    Ok(bid)
}

/// `spec.md` §4.D, entry point 2: read a page from disk, opening (and
/// registering in the file buffer) a fresh handle along the way.
pub fn read_via_disk(
    database_root: &Path,
    page_size: usize,
    table: &TableDescriptor,
    ipid: u32,
    file_buffer: &mut FileBuffer,
    page_buffer: &mut PageBuffer,
    log: &mut dyn EventLog,
) -> Result<usize> {
    let path = database_root.join(table.oid.to_string());

    let mut file = File::open(&path)?;
    log.log_open_file(table.oid);

    let ntip = table.tuples_in_page(ipid);
    let offset = ipid as u64 * page_size as u64;
    let (pageid, tuples) = decode_page(&mut file, offset, ntip, table.nattrs)?;

    let bid = page_buffer.acquire_slot(log)?;
    log.log_read_page(pageid);
    page_buffer.install(bid, pageid, ipid, table.oid, table.name.clone(), tuples);

    let fid = file_buffer.acquire_slot(log);
    file_buffer.install(
        fid,
        FileSlot {
            oid: table.oid,
            name: table.name.clone(),
            nattrs: table.nattrs,
            ntuples: table.ntuples,
            npages: table.npages,
            ntpp: table.ntpp,
            path,
            file,
        },
    );

    Ok(bid)
}

fn tuples_in_page(ipid: u32, npages: u32, ntuples: u32, ntpp: u32) -> u32 {
    if ipid + 1 == npages {
        ntuples - ntpp * (npages - 1)
    } else {
        ntpp
    }
}
