use crate::config::{PyqualConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Write the default configuration into `dir`, returning the file written.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let contents = format!(
        "# Pyqual Configuration\n\n{}",
        PyqualConfig::default().to_toml_string()?
    );
    io::write_file(&config_path, &contents)?;

    Ok(config_path)
}
