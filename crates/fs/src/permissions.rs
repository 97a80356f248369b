use std::fs::Metadata;

/// Render the low 12 mode bits as four octal digits (special, user, group, other).
pub fn format_mode(mode: u32) -> String {
    format!("{:04o}", mode & 0o7777)
}

/// Raw mode bits of `meta`.
///
/// Hosts without unix modes get a synthetic value built from the read-only flag.
pub(crate) fn raw_mode(meta: &Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta.mode()
    }

    #[cfg(not(unix))]
    {
        if meta.permissions().readonly() {
            0o444
        } else {
            0o666
        }
    }
}
