use anyhow::{Context as _, Result};
use crmsync_config::AppConfig;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub mod completions;
pub mod merge;
pub mod sync;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    let mut data = serde_json::to_string_pretty(value)?;
    data.push('\n');
    fs::write(path, data).with_context(|| format!("write output file {}", path.display()))?;
    Ok(())
}
