use std::{
    fs::{self, Metadata},
    io,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{debug, trace};

use crate::{
    capabilities::StatCapabilities,
    permissions::{format_mode, raw_mode},
    record::{EntryType, FileRecord},
};

/// Stat-derived columns, taken from whichever stat result is in effect.
struct StatFields {
    inode: u64,
    uid: u64,
    gid: u64,
    device: u64,
    mode: u32,
    size: u64,
    block_size: Option<u64>,
    hard_links: Option<u64>,
    atime: i64,
    mtime: i64,
    ctime: i64,
    btime: i64,
}

/// Build the record for `path`, or `None` when it cannot be stat'ed.
///
/// With link-aware stat the entry is first inspected without following a
/// trailing symlink; a failure there drops the path. A failing target stat then
/// falls back to the link's own data, so dangling links still produce a row.
/// Without link-aware stat a failing target stat drops the path.
pub fn extract_file_info(
    path: &Path,
    parent: &Path,
    caps: StatCapabilities,
) -> Option<FileRecord> {
    let link_stat = if caps.link_aware {
        match fs::symlink_metadata(path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                debug!("[extract] lstat({:?}) failed, skipping: {e}", path);
                return None;
            }
        }
    } else {
        None
    };

    let is_symlink = link_stat
        .as_ref()
        .is_some_and(|meta| meta.file_type().is_symlink());

    let stat = match (fs::metadata(path), link_stat) {
        (Ok(meta), _) => meta,
        (Err(e), Some(link_meta)) => {
            trace!("[extract] stat({:?}) failed, using link data: {e}", path);
            link_meta
        }
        (Err(e), None) => {
            debug!("[extract] stat({:?}) failed, skipping: {e}", path);
            return None;
        }
    };

    let fields = stat_fields(&stat, caps);

    Some(FileRecord {
        path: path.to_string_lossy().into_owned(),
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        directory: parent.to_string_lossy().into_owned(),
        is_symlink,
        inode: fields.inode,
        uid: fields.uid,
        gid: fields.gid,
        mode: format_mode(fields.mode),
        device: fields.device,
        size: fields.size,
        block_size: fields.block_size,
        hard_links: fields.hard_links,
        atime: fields.atime,
        mtime: fields.mtime,
        ctime: fields.ctime,
        btime: fields.btime,
        entry_type: classify(path),
    })
}

/// Append the record for `path` to `results` if one can be built.
pub fn append_file_info(
    path: &Path,
    parent: &Path,
    caps: StatCapabilities,
    results: &mut Vec<FileRecord>,
) {
    if let Some(record) = extract_file_info(path, parent, caps) {
        results.push(record);
    }
}

/// Classify the entry by a dereferencing status query, independent of the
/// stat calls that fill the record.
pub(crate) fn classify(path: &Path) -> EntryType {
    match fs::metadata(path) {
        Ok(meta) => EntryType::from_file_type(meta.file_type()),
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => EntryType::Unknown,
            _ => {
                trace!("[extract] status({:?}) failed: {e}", path);
                EntryType::Error
            }
        },
    }
}

#[cfg(unix)]
fn stat_fields(meta: &Metadata, caps: StatCapabilities) -> StatFields {
    use std::os::unix::fs::MetadataExt;

    StatFields {
        inode: meta.ino(),
        uid: u64::from(meta.uid()),
        gid: u64::from(meta.gid()),
        device: meta.rdev(),
        mode: raw_mode(meta),
        size: meta.size(),
        block_size: caps.block_size.then(|| meta.blksize()),
        hard_links: caps.hard_links.then(|| meta.nlink()),
        atime: meta.atime(),
        mtime: meta.mtime(),
        ctime: meta.ctime(),
        btime: birth_time(meta, caps),
    }
}

#[cfg(not(unix))]
fn stat_fields(meta: &Metadata, caps: StatCapabilities) -> StatFields {
    StatFields {
        inode: 0,
        uid: 0,
        gid: 0,
        device: 0,
        mode: raw_mode(meta),
        size: meta.len(),
        block_size: None,
        hard_links: None,
        atime: to_unix_secs(meta.accessed().ok()),
        mtime: to_unix_secs(meta.modified().ok()),
        ctime: to_unix_secs(meta.created().ok()),
        btime: birth_time(meta, caps),
    }
}

fn birth_time(meta: &Metadata, caps: StatCapabilities) -> i64 {
    if caps.birth_time {
        to_unix_secs(meta.created().ok())
    } else {
        0
    }
}

/// Seconds since the epoch; unavailable or pre-epoch times become 0.
fn to_unix_secs(t: Option<SystemTime>) -> i64 {
    t.and_then(|tt| tt.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
