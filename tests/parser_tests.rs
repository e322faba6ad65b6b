use gdb_callgraph::parser::{parse_frame, parse_functions, FunctionSite, StackFrame};
use gdb_callgraph::utils::error::ParseError;
use pretty_assertions::assert_eq;

const LISTING: &str = "\
Reading symbols from ./test...
All defined functions:

File util.c:
40:\tint helper(int);
7:\tstatic void log_line(const char *);

File test.c:
9:\tint main(int, char **);
23:\tstatic void bar(int);
29:\tstatic void baz(int);
17:\tstatic void foo(int);

Non-debugging symbols:
0x0000000000001000  _init
0x0000000000001030  exit@plt
0x0000000000001040  _start
";

#[test]
fn test_frame_without_address() {
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
fn test_frame_with_address() {
    let frame = parse_frame("#1  0x0000555555555171 in foo (n=23) at test.c:19").unwrap();
    assert_eq!(
        frame,
        StackFrame {
            number: 1,
            function: "foo".to_string(),
            arguments: "n=23".to_string(),
            file: Some("test.c".to_string()),
            line: Some(19),
            library: None,
        }
    );
}

#[test]
fn test_frame_without_source_location() {
    let frame = parse_frame("#1  0x5655c988 in _GLOBAL__sub_I_mainmenu.cpp ()").unwrap();
    assert_eq!(
        frame,
        StackFrame {
            number: 1,
            function: "_GLOBAL__sub_I_mainmenu.cpp".to_string(),
            arguments: String::new(),
            file: None,
            line: None,
            library: None,
        }
    );
}

#[test]
fn test_frame_parse_error() {
    let err = parse_frame("#1  garbage without parens").unwrap_err();
    assert!(matches!(err, ParseError::InvalidFrame { .. }));
}

#[test]
fn test_functions_sorted_by_file_and_line() {
    let sites = parse_functions(LISTING).unwrap();
    let locations: Vec<String> = sites.iter().map(FunctionSite::location).collect();

    assert_eq!(
        locations,
        vec![
            "test.c:9",
            "test.c:17",
            "test.c:23",
            "test.c:29",
            "util.c:7",
            "util.c:40",
        ]
    );
    assert_eq!(sites[0].signature, "int main(int, char **);");
}

#[test]
fn test_functions_missing_marker() {
    let listing = "Reading symbols from ./stripped...\n(No debugging symbols found in ./stripped)\n";
    let result = parse_functions(listing);
    assert!(matches!(result, Err(ParseError::MissingMarker { .. })));
}

#[test]
fn test_functions_non_numeric_line_number() {
    let listing = "All defined functions:\n\nFile test.c:\n9x:\tint main(int, char **);\n";
    let result = parse_functions(listing);
    assert!(matches!(result, Err(ParseError::InvalidLineNumber { .. })));
}

#[test]
fn test_functions_empty_listing() {
    let listing = "All defined functions:\n\nNon-debugging symbols:\n0x0000000000001000  _init\n";
    assert!(parse_functions(listing).unwrap().is_empty());
}
