//! Init command handler

use crate::config::Config;
use std::path::Path;

pub fn cmd_init(path: &Path) -> anyhow::Result<()> {
    if Config::create_default_if_missing(path)? {
        println!("✓ Config file created at {}. Edit it and run again.", path.display());
    } else {
        println!("Config file already exists at {}", path.display());
    }
    Ok(())
}
