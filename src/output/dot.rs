//! DOT call graph output writer.

use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write DOT text to a file
///
/// **Public** - main entry point for DOT output
///
/// # Arguments
/// * `dot` - Rendered graph text from `render_dot`
/// * `output_path` - Path to output file; parent directories are created
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty or a directory
pub fn write_dot(dot: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing call graph to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    write_dot_to(dot, &mut writer)?;

    info!("Call graph written successfully ({} bytes)", dot.len() + 1);

    Ok(())
}

/// Write DOT text followed by a newline to any writer (e.g. stdout)
pub fn write_dot_to(dot: &str, mut writer: impl Write) -> Result<(), OutputError> {
    writeln!(writer, "{}", dot).map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;
    Ok(())
}
