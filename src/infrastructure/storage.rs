use std::fs;
use std::path::{Path, PathBuf};

/// Default data directory: `data/` next to the crate manifest
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn data_dir_exists(data_dir: &Path) -> bool {
    data_dir.is_dir()
}

/// File names in `data_dir`, sorted
pub fn list_data_dir(data_dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = fs::read_dir(data_dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

pub fn resolve_dataset_path(data_dir: &Path, filename: &str) -> PathBuf {
    data_dir.join(filename)
}
