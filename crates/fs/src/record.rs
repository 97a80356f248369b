use std::fmt;
use std::fs::FileType;

use serde::Serialize;

/// Closed set of entry classifications reported in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Regular,
    Directory,
    Symlink,
    Block,
    Character,
    Fifo,
    Socket,
    Unknown,
    Error,
}

impl EntryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryType::Regular => "regular",
            EntryType::Directory => "directory",
            EntryType::Symlink => "symlink",
            EntryType::Block => "block",
            EntryType::Character => "character",
            EntryType::Fifo => "fifo",
            EntryType::Socket => "socket",
            EntryType::Unknown => "unknown",
            EntryType::Error => "error",
        }
    }

    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_file() {
            return EntryType::Regular;
        }
        if ft.is_dir() {
            return EntryType::Directory;
        }
        if ft.is_symlink() {
            return EntryType::Symlink;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;

            if ft.is_block_device() {
                return EntryType::Block;
            }
            if ft.is_char_device() {
                return EntryType::Character;
            }
            if ft.is_fifo() {
                return EntryType::Fifo;
            }
            if ft.is_socket() {
                return EntryType::Socket;
            }
        }

        EntryType::Unknown
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the file table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: String,
    /// Final path component
    pub filename: String,
    /// Parent directory as supplied by the query, or inferred from `path`
    pub directory: String,
    /// Set only when the entry itself is a symbolic link
    pub is_symlink: bool,
    pub inode: u64,
    pub uid: u64,
    pub gid: u64,
    /// Octal permission string, e.g. `0644`
    pub mode: String,
    /// Device id of special files (`st_rdev`)
    pub device: u64,
    pub size: u64,
    /// Preferred I/O block size, where stat exposes it
    pub block_size: Option<u64>,
    /// Hard link count, where stat exposes it
    pub hard_links: Option<u64>,
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
    /// Birth time, `0` where the platform does not record one
    pub btime: i64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}
