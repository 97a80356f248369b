/// What the host's stat interface can report.
///
/// The record shape is fixed; these flags decide which fields the extractor
/// fills in and whether a link-stat is attempted before the target stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCapabilities {
    /// `lstat` is available, so links can be inspected without following them.
    pub link_aware: bool,
    /// The filesystem records a creation time we can trust.
    pub birth_time: bool,
    /// `st_blksize` is part of the stat structure.
    pub block_size: bool,
    /// `st_nlink` is part of the stat structure.
    pub hard_links: bool,
}

impl StatCapabilities {
    pub const fn current() -> Self {
        StatCapabilities {
            link_aware: cfg!(unix),
            // Linux and Windows have no usable birth time for this table.
            birth_time: cfg!(any(
                target_os = "macos",
                target_os = "ios",
                target_os = "freebsd",
                target_os = "netbsd",
                target_os = "openbsd",
            )),
            block_size: cfg!(unix),
            hard_links: cfg!(unix),
        }
    }
}

impl Default for StatCapabilities {
    fn default() -> Self {
        Self::current()
    }
}
