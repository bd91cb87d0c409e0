use std::fs;
use std::path::{Path, PathBuf};

/// Path of a file under `tests/fixtures`
#[allow(dead_code)]
pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Copy the fixture delta files into `dir`
#[allow(dead_code)]
pub fn copy_fixture_deltas(dir: &Path) {
    for name in ["8.2-8.3.yaml", "8.3-8.4.json"] {
        fs::copy(fixture(&format!("deltas/{}", name)), dir.join(name)).unwrap();
    }
}
