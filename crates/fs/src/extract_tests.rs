use super::*;

use std::{
    fs::{create_dir, write},
    path::PathBuf,
    time::Duration,
};

fn caps() -> StatCapabilities {
    StatCapabilities::current()
}

fn record(path: &Path, parent: &Path) -> FileRecord {
    extract_file_info(path, parent, caps()).expect("record")
}

fn without_link_stat() -> StatCapabilities {
    StatCapabilities {
        link_aware: false,
        ..StatCapabilities::current()
    }
}

#[test]
fn to_unix_secs_handles_none_and_various_times() {
    let cases: &[(Option<SystemTime>, i64)] = &[
        (None, 0),
        (Some(UNIX_EPOCH), 0),
        (Some(UNIX_EPOCH + Duration::from_secs(42)), 42),
        (UNIX_EPOCH.checked_sub(Duration::from_secs(1)), 0),
    ];

    for (input, expected) in cases {
        assert_eq!(to_unix_secs(*input), *expected, "input {input:?}");
    }
}

#[test]
fn regular_file_produces_full_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    let file = root.join("a.txt");
    write(&file, b"0123456789").expect("write file");

    let rec = record(&file, root);

    assert_eq!(rec.path, file.to_string_lossy());
    assert_eq!(rec.filename, "a.txt");
    assert_eq!(rec.directory, root.to_string_lossy());
    assert_eq!(rec.size, 10);
    assert_eq!(rec.entry_type, EntryType::Regular);
    assert!(!rec.is_symlink);
    assert!(rec.mtime > 0);
    assert_eq!(rec.mode.len(), 4);

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let meta = std::fs::metadata(&file).expect("stat");
        assert_eq!(rec.uid, u64::from(meta.uid()));
        assert_eq!(rec.gid, u64::from(meta.gid()));
        assert_eq!(rec.inode, meta.ino());
        assert_eq!(rec.hard_links, Some(1));
        assert!(rec.block_size.is_some());
    }
}

#[test]
fn missing_path_yields_no_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("gone");

    let bare = without_link_stat();
    assert!(extract_file_info(&missing, tmp.path(), caps()).is_none());
    assert!(extract_file_info(&missing, tmp.path(), bare).is_none());
}

#[test]
fn directory_is_classified() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let sub = tmp.path().join("sub");
    create_dir(&sub).expect("create sub");

    let rec = record(&sub, tmp.path());
    assert_eq!(rec.entry_type, EntryType::Directory);
    assert_eq!(rec.filename, "sub");
}

#[test]
fn disabled_capabilities_leave_optional_fields_empty() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("f");
    write(&file, b"x").expect("write file");

    let bare = StatCapabilities {
        link_aware: false,
        birth_time: false,
        block_size: false,
        hard_links: false,
    };
    let rec = extract_file_info(&file, tmp.path(), bare).expect("record");
    assert_eq!(rec.block_size, None);
    assert_eq!(rec.hard_links, None);
    assert_eq!(rec.btime, 0);
    assert!(!rec.is_symlink);
}

#[test]
fn root_like_path_has_empty_filename() {
    let rec = record(Path::new("/"), Path::new(""));
    assert_eq!(rec.filename, "");
    assert_eq!(rec.directory, "");
    assert_eq!(rec.entry_type, EntryType::Directory);
}

#[test]
fn append_file_info_pushes_only_successes() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("ok");
    write(&file, b"x").expect("write file");

    let mut results = Vec::new();
    append_file_info(&file, tmp.path(), caps(), &mut results);
    let missing = tmp.path().join("missing");
    append_file_info(&missing, tmp.path(), caps(), &mut results);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].filename, "ok");
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::{fs::symlink, net::UnixListener};

    fn dangling_link(root: &Path) -> PathBuf {
        let link = root.join("dangling");
        symlink(root.join("no-such-target"), &link).expect("create symlink");
        link
    }

    #[test]
    fn symlink_to_file_reports_target_data() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = tmp.path();
        let target = root.join("target.bin");
        write(&target, b"12345").expect("write target");
        let link = root.join("link");
        symlink(&target, &link).expect("create symlink");

        let rec = record(&link, root);
        assert!(rec.is_symlink);
        assert_eq!(rec.size, 5);
        assert_eq!(rec.entry_type, EntryType::Regular);
        assert_eq!(rec.filename, "link");
    }

    #[test]
    fn dangling_symlink_falls_back_to_link_stat() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let link = dangling_link(tmp.path());

        let rec = record(&link, tmp.path());
        assert!(rec.is_symlink);
        assert_eq!(rec.entry_type, EntryType::Unknown);

        let link_len = tmp.path().join("no-such-target").as_os_str().len() as u64;
        assert_eq!(rec.size, link_len, "size should come from the link itself");
    }

    #[test]
    fn dangling_symlink_is_dropped_without_link_stat() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let link = dangling_link(tmp.path());

        let bare = without_link_stat();
        assert!(extract_file_info(&link, tmp.path(), bare).is_none());
    }

    #[test]
    fn unix_socket_is_classified() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let sock = tmp.path().join("s.sock");
        let _listener = UnixListener::bind(&sock).expect("bind socket");

        let rec = record(&sock, tmp.path());
        assert_eq!(rec.entry_type, EntryType::Socket);
    }

    #[test]
    fn symlink_loop_is_classified_as_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        symlink(&b, &a).expect("link a -> b");
        symlink(&a, &b).expect("link b -> a");

        let rec = record(&a, tmp.path());
        assert!(rec.is_symlink);
        assert_eq!(rec.entry_type, EntryType::Error);
    }
}
