use envchanter_fs::{Error, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_private_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".env");

    io::write_private(&path, b"A=1\n").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "A=1\n");
}

#[test]
fn test_write_private_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".env");
    fs::write(&path, "A=old\n").unwrap();

    io::write_text_private(&path, "A=new\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A=new\n");
}

#[test]
fn test_write_private_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config").join("dev").join(".env");

    io::write_text_private(&path, "A=1\n").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "A=1\n");
}

#[test]
fn test_write_private_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    io::write_text_private(&temp.path().join(".env"), "A=1\n").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&temp.path().join("missing.env"));

    let err = result.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_read_text_if_exists_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let content = io::read_text_if_exists(&temp.path().join("missing.env")).unwrap();
    assert!(content.is_none());
}

#[test]
fn test_read_text_if_exists_present() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".env");
    fs::write(&path, "A=1\n").unwrap();

    assert_eq!(
        io::read_text_if_exists(&path).unwrap().as_deref(),
        Some("A=1\n")
    );
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_written_file_is_owner_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");

        io::write_text_private(&path, "SECRET=1\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_rewrite_tightens_world_readable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "SECRET=1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        io::write_text_private(&path, "SECRET=2\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o077, 0, "group/world bits must be cleared, got {:o}", mode);
    }

    #[test]
    fn test_write_private_rejects_symlink_target() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("elsewhere.env");
        fs::write(&real, "untouched").unwrap();
        let link = temp.path().join(".env");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let result = io::write_text_private(&link, "SECRET=1\n");

        assert!(matches!(result, Err(Error::SymlinkTarget { .. })));
        assert_eq!(fs::read_to_string(&real).unwrap(), "untouched");
    }
}
