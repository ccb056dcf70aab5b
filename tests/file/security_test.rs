/*!
 * Trust Check Tests
 * is_secure / trust against real files
 */

use secure_fd::{FileHandle, TrustViolation};
use std::fs::{self, OpenOptions};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::PathBuf;
use tempfile::TempDir;

fn create_with_mode(dir: &TempDir, name: &str, mode: u32) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"permit root\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    path
}

fn open_read(path: &PathBuf) -> FileHandle {
    FileHandle::open(path, OpenOptions::new().read(true)).unwrap()
}

#[test]
fn test_owner_execute_pattern_is_untrusted() {
    let dir = TempDir::new().unwrap();
    let path = create_with_mode(&dir, "conf", 0o540);
    let handle = open_read(&path);

    let first = handle.is_secure().unwrap();
    for _ in 0..3 {
        assert_eq!(handle.is_secure().unwrap(), first);
    }
    assert!(!first);
    assert!(handle
        .trust()
        .unwrap()
        .violations()
        .contains(&TrustViolation::Permissions { actual: 0o540, expected: 0o440 }));
}

#[test]
fn test_world_readable_is_untrusted() {
    let dir = TempDir::new().unwrap();
    let path = create_with_mode(&dir, "conf", 0o644);
    let handle = open_read(&path);

    assert!(!handle.is_secure().unwrap());
}

#[test]
fn test_ownership_checked() {
    let dir = TempDir::new().unwrap();
    let path = create_with_mode(&dir, "conf", 0o440);
    let handle = open_read(&path);
    let md = fs::metadata(&path).unwrap();

    let trust = handle.trust().unwrap();
    if md.uid() != 0 {
        assert!(trust.violations().contains(&TrustViolation::Owner { uid: md.uid() }));
    }
    if md.gid() == 0 {
        assert!(trust.violations().contains(&TrustViolation::RootGroup));
    }
    assert_eq!(trust.is_trusted(), md.uid() == 0 && md.gid() != 0);
}

#[test]
fn test_root_owned_non_root_group_is_trusted() {
    if !nix::unistd::geteuid().is_root() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = create_with_mode(&dir, "conf", 0o440);
    std::os::unix::fs::chown(&path, Some(0), Some(5)).unwrap();
    let handle = open_read(&path);

    assert!(handle.is_secure().unwrap());

    // Policy follows the file, not the handle
    fs::set_permissions(&path, fs::Permissions::from_mode(0o540)).unwrap();
    assert!(!handle.is_secure().unwrap());
}

#[test]
fn test_closed_handle_cannot_be_evaluated() {
    let dir = TempDir::new().unwrap();
    let path = create_with_mode(&dir, "conf", 0o440);
    let mut handle = open_read(&path);
    handle.close().unwrap();

    assert!(handle.is_secure().unwrap_err().is_io());
}
