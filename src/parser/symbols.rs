//! Function listing parser.
//!
//! Parses the output of GDB's `info functions` into breakpoint targets.
//!
//! Example listing:
//!
//! ```text
//! All defined functions:
//!
//! File test.c:
//! 9:      int main(int, char **);
//! 23:     static void bar(int);
//! 17:     static void foo(int);
//!
//! Non-debugging symbols:
//! 0x0000000000001000  _init
//! 0x0000000000001030  exit@plt
//! ```

use super::schema::FunctionSite;
use crate::utils::config::{FILE_CONTEXT_PREFIX, FUNCTIONS_MARKER};
use crate::utils::error::ParseError;
use log::debug;

/// Parse functions with known source locations from a function listing
///
/// **Public** - main entry point of the symbol table reader
///
/// # Arguments
/// * `listing` - Raw debugger output of `info functions`
///
/// # Returns
/// Function sites sorted by (file, line), so breakpoint numbering does not
/// depend on the debugger's internal symbol order
///
/// # Errors
/// * `ParseError::MissingMarker` - the defined-functions section is absent
/// * `ParseError::InvalidLineNumber` - a line number token is not a positive integer
pub fn parse_functions(listing: &str) -> Result<Vec<FunctionSite>, ParseError> {
    let start = listing
        .find(FUNCTIONS_MARKER)
        .ok_or(ParseError::MissingMarker {
            marker: FUNCTIONS_MARKER,
        })?;

    // Source file of the section being walked, if any
    let mut current_file: Option<&str> = None;
    let mut sites = Vec::new();

    for line in listing[start..].lines() {
        let line = line.trim_end();

        if let Some(file) = line
            .strip_prefix(FILE_CONTEXT_PREFIX)
            .and_then(|rest| rest.strip_suffix(':'))
        {
            current_file = Some(file);
            continue;
        }

        if line.is_empty() {
            current_file = None;
            continue;
        }

        let Some(file) = current_file else {
            continue;
        };

        if let Some(site) = parse_listing_entry(file, line)? {
            sites.push(site);
        }
    }

    sites.sort();
    debug!("Parsed {} functions with debug info", sites.len());

    Ok(sites)
}

/// Parse one `<line>:\t<signature>` entry
///
/// **Private** - returns `Ok(None)` for lines that are not entries
fn parse_listing_entry(file: &str, line: &str) -> Result<Option<FunctionSite>, ParseError> {
    // Split on the first colon only; C++ signatures contain "::"
    let Some((head, signature)) = line.split_once(':') else {
        debug!("Skipping listing line without separator: {:?}", line);
        return Ok(None);
    };

    let token = head.trim();
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        debug!("Skipping non-entry listing line: {:?}", line);
        return Ok(None);
    }

    let line_number = match token.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(ParseError::InvalidLineNumber {
                line: line.to_string(),
                token: token.to_string(),
            })
        }
    };

    let signature = signature.trim();
    if signature.is_empty() {
        debug!("Skipping listing entry without signature: {:?}", line);
        return Ok(None);
    }

    Ok(Some(FunctionSite {
        file: file.to_string(),
        line: line_number,
        signature: signature.to_string(),
    }))
}
