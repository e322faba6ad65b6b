//! Stack frame line parsing.
//!
//! GDB prints one line per frame in a backtrace:
//!
//! ```text
//! #0  foo (n=23) at test.c:19
//! #1  0x0000555555555171 in foo (n=23) at test.c:19
//! #1  0x56598d16 in CCritSect::CCritSect (this=0x5686a728 <sgMemCrit>) at ./src/storm.h:2079
//! #1  0x5655c988 in _GLOBAL__sub_I_mainmenu.cpp ()
//! #2  0x00007ffff7829d90 in __libc_start_call_main () from /lib/x86_64-linux-gnu/libc.so.6
//! ```

use super::schema::StackFrame;
use crate::utils::error::ParseError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// "#<N>  [0x... in ]<name> (" up to and including the opening parenthesis
static FRAME_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9]+)[ \t]+(?:0x[0-9A-Fa-f]+ in )?([^ \t(]+)[ \t]?\(")
        .expect("frame head pattern is valid")
});

static SOURCE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^at (.+):([0-9]+)$").expect("location pattern is valid"));

/// Parse a single backtrace line into a [`StackFrame`]
///
/// The address prefix is discarded. Arguments are kept verbatim; they may
/// contain nested parentheses or `<symbol>` annotations.
///
/// # Errors
/// * `ParseError::InvalidFrame` - the line does not have the shape of a frame
pub fn parse_frame(line: &str) -> Result<StackFrame, ParseError> {
    let line = line.trim();
    let invalid = || ParseError::InvalidFrame {
        line: line.to_string(),
    };

    let head = FRAME_HEAD.captures(line).ok_or_else(invalid)?;
    let number: u32 = head[1].parse().map_err(|_| invalid())?;
    let function = head[2].to_string();

    // Index right after the opening parenthesis
    let args_start = head.get(0).map(|m| m.end()).ok_or_else(invalid)?;
    let args_len = matching_paren(&line[args_start..]).ok_or_else(invalid)?;
    let arguments = line[args_start..args_start + args_len].to_string();

    let mut frame = StackFrame {
        number,
        function,
        arguments,
        file: None,
        line: None,
        library: None,
    };

    let rest = line[args_start + args_len + 1..].trim();
    if rest.is_empty() {
        return Ok(frame);
    }

    if let Some(loc) = SOURCE_LOCATION.captures(rest) {
        frame.file = Some(loc[1].to_string());
        frame.line = Some(loc[2].parse().map_err(|_| invalid())?);
    } else if let Some(lib) = rest.strip_prefix("from ") {
        frame.library = Some(lib.trim().to_string());
    } else {
        debug!("Ignoring unrecognized frame suffix {:?} in {:?}", rest, line);
    }

    Ok(frame)
}

/// Length of the text before the parenthesis that closes an already-open one
///
/// Parentheses inside string literals (`"a)b"`) and character literals
/// (`41 ')'`) do not count.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if let Some(open) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                c if c == open => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }

    None
}

/// Leading decimal numeral of a line, e.g. `25` for `"25\t    baz(n);"`
pub fn leading_line_number(line: &str) -> Option<u32> {
    let end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    line[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_innermost_frame() {
        let frame = parse_frame("#0  foo (n=23) at test.c:19").unwrap();
        assert_eq!(
            frame,
            StackFrame {
                number: 0,
                function: "foo".to_string(),
                arguments: "n=23".to_string(),
                file: Some("test.c".to_string()),
                line: Some(19),
                library: None,
            }
        );
    }

    #[test]
    fn test_address_prefix_discarded() {
        let frame = parse_frame("#1  0x0000555555555171 in foo (n=23) at test.c:19").unwrap();
        assert_eq!(frame.number, 1);
        assert_eq!(frame.function, "foo");
        assert_eq!(frame.arguments, "n=23");
        assert_eq!(frame.file.as_deref(), Some("test.c"));
        assert_eq!(frame.line, Some(19));
    }

    #[test]
    fn test_no_debug_info() {
        let frame = parse_frame("#1  0x5655c988 in _GLOBAL__sub_I_mainmenu.cpp ()").unwrap();
        assert_eq!(frame.number, 1);
        assert_eq!(frame.function, "_GLOBAL__sub_I_mainmenu.cpp");
        assert_eq!(frame.arguments, "");
        assert_eq!(frame.file, None);
        assert_eq!(frame.line, None);
    }

    #[test]
    fn test_symbol_annotation_in_arguments() {
        let frame = parse_frame(
            "#1  0x56598d16 in CCritSect::CCritSect (this=0x5686a728 <sgMemCrit>) at ./src/storm.h:2079",
        )
        .unwrap();
        assert_eq!(frame.function, "CCritSect::CCritSect");
        assert_eq!(frame.arguments, "this=0x5686a728 <sgMemCrit>");
        assert_eq!(frame.file.as_deref(), Some("./src/storm.h"));
        assert_eq!(frame.line, Some(2079));
    }

    #[test]
    fn test_nested_parentheses_in_arguments() {
        let frame =
            parse_frame("#0  apply (f=0x401126 <square(int)>, s=0x402004 \"a)b\") at fn.c:7")
                .unwrap();
        assert_eq!(frame.arguments, "f=0x401126 <square(int)>, s=0x402004 \"a)b\"");
        assert_eq!(frame.line, Some(7));
    }

    #[test]
    fn test_char_literal_arguments() {
        let frame = parse_frame("#0  put (c=34 '\"') at t.c:3").unwrap();
        assert_eq!(frame.arguments, "c=34 '\"'");
        assert_eq!(frame.file.as_deref(), Some("t.c"));
        assert_eq!(frame.line, Some(3));

        let frame = parse_frame("#0  put (c=41 ')') at t.c:3").unwrap();
        assert_eq!(frame.arguments, "c=41 ')'");
        assert_eq!(frame.line, Some(3));

        let frame = parse_frame("#1  0x0000555555555171 in put (c=40 '(') at t.c:3").unwrap();
        assert_eq!(frame.arguments, "c=40 '('");
        assert_eq!(frame.line, Some(3));

        let frame = parse_frame("#0  put (c=39 '\\'', s=0x402004 \"it's\") at t.c:3").unwrap();
        assert_eq!(frame.arguments, "c=39 '\\'', s=0x402004 \"it's\"");
        assert_eq!(frame.line, Some(3));
    }

    #[test]
    fn test_library_frame() {
        let frame = parse_frame(
            "#2  0x00007ffff7829d90 in __libc_start_call_main () from /lib/x86_64-linux-gnu/libc.so.6",
        )
        .unwrap();
        assert_eq!(frame.function, "__libc_start_call_main");
        assert_eq!(
            frame.library.as_deref(),
            Some("/lib/x86_64-linux-gnu/libc.so.6")
        );
        assert_eq!(frame.file, None);
    }

    #[test]
    fn test_invalid_lines() {
        assert!(parse_frame("Breakpoint 1, main () at test.c:5").is_err());
        assert!(parse_frame("#x  foo () at test.c:1").is_err());
        assert!(parse_frame("#0  foo (unterminated").is_err());
        assert!(parse_frame("#0").is_err());
    }

    #[test]
    fn test_leading_line_number() {
        assert_eq!(leading_line_number("25\t    baz(n);"), Some(25));
        assert_eq!(leading_line_number("250\t}"), Some(250));
        assert_eq!(leading_line_number("\tbaz(n);"), None);
    }
}
