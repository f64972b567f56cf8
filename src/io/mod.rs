pub mod output;
pub mod reports;
pub mod walker;

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Read a file as text. Invalid UTF-8 sequences become U+FFFD so one bad
/// byte never costs the rest of the file.
pub fn read_file_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
