//! Trace session transcript parser.
//!
//! Recovers call graph edges from the output of a scripted GDB session in
//! which every breakpoint prints a two-level backtrace and continues.
//!
//! Example transcript:
//!
//! ```text
//! Breakpoint 1, main (argc=1, argv=0x7fffffffe6a8) at test.c:11
//! 11      foo(23);
//! #0  main (argc=1, argv=0x7fffffffe6a8) at test.c:11
//!
//! Breakpoint 2, foo (n=23) at test.c:19
//! 19      bar(n);
//! #0  foo (n=23) at test.c:19
//! #1  0x0000555555555152 in main (argc=1, argv=0x7fffffffe6a8) at test.c:11
//! ```

use super::frame::{leading_line_number, parse_frame};
use super::schema::{Anomaly, AnomalyKind, Edge, FunctionSite, ParsedSession, StackFrame};
use crate::utils::config::{BACKTRACE_DEPTH, BREAKPOINT_DELIMITER};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// "Breakpoint 2, foo (n=23) at test.c:19" with the "Breakpoint " prefix
// already removed by the segment split
static HIT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+), ").expect("hit header pattern is valid"));

/// Where in the transcript a hit was reported, for diagnostics
struct HitContext {
    breakpoint: Option<u32>,
    location: Option<String>,
}

impl HitContext {
    fn anomaly(&self, kind: AnomalyKind, detail: impl Into<String>) -> Anomaly {
        Anomaly {
            breakpoint: self.breakpoint,
            location: self.location.clone(),
            kind,
            detail: detail.into(),
        }
    }
}

/// Parse call graph edges from a trace session transcript
///
/// **Public** - main entry point of the session output parser
///
/// # Arguments
/// * `transcript` - Captured standard output of the debugger
/// * `sites` - Breakpoint targets in creation order, used to describe hits
///
/// # Returns
/// Edges in transcript order plus the anomalies that caused hits to be
/// skipped or flagged. Anomalies never make the parse fail.
pub fn parse_session(transcript: &str, sites: &[FunctionSite]) -> ParsedSession {
    let mut session = ParsedSession::default();

    // The first piece is the preamble (banner, "Reading symbols from ...")
    for segment in transcript.split(BREAKPOINT_DELIMITER).skip(1) {
        let mut lines = segment.lines();
        let header = lines.next().unwrap_or_default();

        // "Breakpoint 3 at 0x1149: file test.c, line 11." confirms creation
        let Some(header) = HIT_HEADER.captures(header) else {
            debug!("Skipping non-hit breakpoint message: {:?}", header);
            continue;
        };

        session.hits += 1;
        let breakpoint = header[1].parse::<u32>().ok();
        let context = HitContext {
            breakpoint,
            location: breakpoint
                .and_then(|nr| nr.checked_sub(1))
                .and_then(|index| sites.get(index as usize))
                .map(FunctionSite::location),
        };

        let mut lines = lines.peekable();
        let source_line = lines
            .next_if(|line| !line.starts_with('#'))
            .map(str::trim_end)
            .filter(|line| !line.is_empty());

        match parse_hit(lines, &context, &mut session.anomalies) {
            Some(mut edges) => {
                for edge in &mut edges {
                    attach_source_line(edge, source_line);
                }
                session.edges.extend(edges);
            }
            None => debug!("Skipped hit of breakpoint {:?}", breakpoint),
        }
    }

    debug!(
        "Parsed {} edges from {} breakpoint hits ({} anomalies)",
        session.edges.len(),
        session.hits,
        session.anomalies.len()
    );

    session
}

/// Parse the backtrace lines of one hit into edges
///
/// **Private** - returns `None` when the whole hit must be skipped
fn parse_hit<'a>(
    lines: impl Iterator<Item = &'a str>,
    context: &HitContext,
    anomalies: &mut Vec<Anomaly>,
) -> Option<Vec<Edge>> {
    let mut frames = Vec::new();
    for line in lines.filter(|line| line.starts_with('#')) {
        match parse_frame(line) {
            Ok(frame) => frames.push(frame),
            Err(e) => {
                anomalies.push(context.anomaly(AnomalyKind::UnparsableFrame, e.to_string()));
                return None;
            }
        }
    }

    if frames.is_empty() {
        anomalies.push(context.anomaly(
            AnomalyKind::NoFrames,
            "unable to determine caller/callee of breakpoint hit",
        ));
        return None;
    }

    if frames.len() > BACKTRACE_DEPTH {
        anomalies.push(context.anomaly(
            AnomalyKind::MergedHits,
            format!(
                "{} frames reported for one hit; pairing frames by #0 boundaries",
                frames.len()
            ),
        ));
    }

    pair_frames(frames, context, anomalies)
}

/// Pair each #0 frame with the frame that follows it
///
/// **Private** - a following frame that is itself #0 is not consumed as the
/// caller; it starts the next edge and the current caller stays unknown.
fn pair_frames(
    frames: Vec<StackFrame>,
    context: &HitContext,
    anomalies: &mut Vec<Anomaly>,
) -> Option<Vec<Edge>> {
    let mut edges = Vec::new();
    let mut frames = frames.into_iter().peekable();

    while let Some(callee) = frames.next() {
        if callee.number != 0 {
            anomalies.push(context.anomaly(
                AnomalyKind::UnexpectedFrameNumber,
                format!(
                    "invalid stack frame number; expected #0, got #{} ({})",
                    callee.number, callee.function
                ),
            ));
            return None;
        }

        let caller_shadowed = matches!(frames.peek(), Some(next) if next.number == 0);
        let caller = if caller_shadowed {
            anomalies.push(context.anomaly(
                AnomalyKind::CallerShadowed,
                format!(
                    "frame #0 ({}) followed by another #0; caller recorded as unknown",
                    callee.function
                ),
            ));
            None
        } else {
            frames.next()
        };

        edges.push(Edge {
            caller,
            callee,
            callee_source_line: None,
        });
    }

    Some(edges)
}

/// Attach the about-to-execute source line when it belongs to the callee
///
/// **Private** - guards against header/source pairs misaligned by the split
fn attach_source_line(edge: &mut Edge, source_line: Option<&str>) {
    let Some(text) = source_line else {
        return;
    };
    if edge.callee.line.is_some() && leading_line_number(text) == edge.callee.line {
        edge.callee_source_line = Some(text.to_string());
    }
}
