use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_artifact").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("out.bin")
}

#[test]
fn prepare_removes_stale_file() {
    let path = scratch("stale");
    std::fs::write(&path, b"stale").unwrap();
    let guard = ArtifactGuard::prepare(&path).unwrap();
    assert!(!path.exists());
    std::fs::write(guard.path(), b"fresh").unwrap();
    guard.commit();
    assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
}

#[test]
fn uncommitted_guard_removes_partial_file() {
    let path = scratch("partial");
    {
        let guard = ArtifactGuard::prepare(&path).unwrap();
        std::fs::write(guard.path(), b"half").unwrap();
    }
    assert!(!path.exists());
}

#[test]
fn missing_parent_is_created() {
    let dir = PathBuf::from("target")
        .join("unit_artifact")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("a").join("b.gif");
    let guard = ArtifactGuard::prepare(&path).unwrap();
    assert!(path.parent().unwrap().is_dir());
    drop(guard);
}
