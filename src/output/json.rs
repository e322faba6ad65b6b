//! JSON trace report writer.
//!
//! Writes TraceReport structs to JSON files with proper formatting.

use super::{ensure_parent_dir, validate_path};
use crate::parser::schema::TraceReport;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write trace reports to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `reports` - One report per traced binary
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    reports: &[TraceReport],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing trace report to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, reports).map_err(OutputError::SerializationFailed)?;

    info!(
        "Trace report written successfully ({} binaries, {} edges)",
        reports.len(),
        reports.iter().map(|r| r.edges.len()).sum::<usize>()
    );

    Ok(())
}

/// Read trace reports back from a JSON file
///
/// **Public** - useful for tests and post-processing
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Vec<TraceReport>, OutputError> {
    let file = File::open(input_path.as_ref()).map_err(OutputError::ReadFailed)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(OutputError::SerializationFailed)
}
