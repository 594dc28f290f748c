//! Service-specific tests


#[cfg(test)]
pub mod common {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// Write `contents` to `name` inside `dir`
    pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create test file");
        file.write_all(contents.as_bytes()).expect("write test file");
        path
    }
}
