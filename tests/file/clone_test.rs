/*!
 * Clone Tests
 * Content duplication, owner/mode transfer and cursor restoration
 */

use pretty_assertions::assert_eq;
use secure_fd::FileHandle;
use std::fs::{self, OpenOptions};
use std::io::SeekFrom;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::PathBuf;
use tempfile::TempDir;

fn create_temp_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn open_rw(path: &PathBuf) -> FileHandle {
    FileHandle::open(path, OpenOptions::new().read(true).write(true)).unwrap()
}

#[test]
fn test_clone_copies_content_owner_and_mode() {
    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "suex.conf", b"permit root as root\npermit :wheel\n");
    let dst_path = create_temp_file(
        &dir,
        "suex.conf.new",
        b"stale content that is longer than the source file\n",
    );

    let src = open_rw(&src_path);
    let mut dst = open_rw(&dst_path);

    src.clone_to(&mut dst, 0o600).unwrap();

    assert_eq!(fs::read(&dst_path).unwrap(), fs::read(&src_path).unwrap());

    let src_md = fs::metadata(&src_path).unwrap();
    let dst_md = fs::metadata(&dst_path).unwrap();
    assert_eq!(dst_md.uid(), src_md.uid());
    assert_eq!(dst_md.gid(), src_md.gid());
    assert_eq!(dst_md.mode() & 0o7777, 0o600);
    assert_eq!(dst.stat().unwrap().permissions(), 0o600);
}

#[test]
fn test_clone_transfers_foreign_owner_as_root() {
    if !nix::unistd::geteuid().is_root() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "suex.conf", b"permit :wheel\n");
    let dst_path = create_temp_file(&dir, "suex.conf.new", b"");
    std::os::unix::fs::chown(&src_path, Some(1234), Some(5678)).unwrap();
    std::os::unix::fs::chown(&dst_path, Some(0), Some(0)).unwrap();

    let src = open_rw(&src_path);
    let mut dst = open_rw(&dst_path);
    src.clone_to(&mut dst, 0o4750).unwrap();

    let dst_md = fs::metadata(&dst_path).unwrap();
    assert_eq!(dst_md.uid(), 1234);
    assert_eq!(dst_md.gid(), 5678);
    assert_eq!(dst_md.mode() & 0o7777, 0o4750);
    assert_eq!(fs::read(&dst_path).unwrap(), b"permit :wheel\n");
}

#[test]
fn test_clone_mode_independent_of_source() {
    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "src", b"data");
    let dst_path = create_temp_file(&dir, "dst", b"");
    fs::set_permissions(&src_path, fs::Permissions::from_mode(0o644)).unwrap();

    let src = open_rw(&src_path);
    let mut dst = open_rw(&dst_path);
    src.clone_to(&mut dst, 0o400).unwrap();

    assert_eq!(dst.mode().unwrap() & 0o7777, 0o400);
    assert_eq!(src.mode().unwrap() & 0o7777, 0o644);
}

#[test]
fn test_clone_restores_cursors() {
    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "src", b"0123456789");
    let dst_path = create_temp_file(&dir, "dst", b"abcdef");

    let src = open_rw(&src_path);
    let mut dst = open_rw(&dst_path);
    src.seek(SeekFrom::Start(7)).unwrap();
    dst.seek(SeekFrom::Start(3)).unwrap();

    src.clone_to(&mut dst, 0o640).unwrap();

    assert_eq!(src.tell().unwrap(), 7);
    assert_eq!(dst.tell().unwrap(), 3);
}

#[test]
fn test_failed_transfer_restores_cursors() {
    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "src", b"0123456789");
    let dst_path = create_temp_file(&dir, "dst", b"abcdef");

    let src = open_rw(&src_path);
    let mut dst = FileHandle::open(&dst_path, OpenOptions::new().read(true)).unwrap();
    src.seek(SeekFrom::Start(5)).unwrap();
    dst.seek(SeekFrom::Start(2)).unwrap();

    let err = src.clone_to(&mut dst, 0o600).unwrap_err();
    assert!(err.is_io());

    assert_eq!(src.tell().unwrap(), 5);
    assert_eq!(dst.tell().unwrap(), 2);
    assert_eq!(fs::read(&dst_path).unwrap(), b"abcdef");
}

#[test]
fn test_clone_from_closed_handle_fails() {
    let dir = TempDir::new().unwrap();
    let src_path = create_temp_file(&dir, "src", b"data");
    let dst_path = create_temp_file(&dir, "dst", b"");

    let mut src = open_rw(&src_path);
    let mut dst = open_rw(&dst_path);
    src.close().unwrap();

    assert!(src.clone_to(&mut dst, 0o600).unwrap_err().is_io());
}

#[test]
fn test_chown_failure_is_permission_error() {
    if nix::unistd::geteuid().is_root() {
        // root may chown to anything
        return;
    }

    let root_owned = PathBuf::from("/etc/passwd");
    let md = fs::metadata(&root_owned).unwrap();
    if md.uid() != 0 {
        return;
    }

    let dir = TempDir::new().unwrap();
    let dst_path = create_temp_file(&dir, "passwd.copy", b"");
    let src = FileHandle::open(&root_owned, OpenOptions::new().read(true)).unwrap();
    let mut dst = open_rw(&dst_path);

    let err = src.clone_to(&mut dst, 0o600).unwrap_err();
    assert!(err.is_permission());
    assert_eq!(src.tell().unwrap(), 0);
    assert_eq!(dst.tell().unwrap(), 0);
}
