// Runs in its own test binary: it mutates process environment variables.

use litebox::StoreConfig;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("litebox.toml");
    std::fs::write(&path, "storage_root = \"/from/file\"\nsort_listing = false\n").unwrap();

    // SAFETY: this is the only test in this binary, so no other thread reads the environment.
    unsafe {
        std::env::set_var("LITEBOX_STORAGE_ROOT", "/from/env");
        std::env::set_var("LITEBOX_SORT_LISTING", "true");
    }

    let config = StoreConfig::load_from(&path.to_string_lossy()).unwrap();

    assert_eq!(config.storage_root, "/from/env");
    assert!(config.sort_listing);
}
