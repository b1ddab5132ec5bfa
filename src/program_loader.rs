use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads one instruction per line. Blank lines and lines starting with `#`
/// are left out.
pub fn load_program_file(file_path: &Path) -> Result<Vec<String>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: file_path.to_path_buf(),
        source,
    };
    let file = File::open(file_path).map_err(io_error)?;
    let reader = io::BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_error)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    info!("loaded {} lines from {}", lines.len(), file_path.display());
    Ok(lines)
}
