//! GDB command scripts fed to the debugger's standard input.

use crate::parser::schema::FunctionSite;
use crate::utils::config::{BACKTRACE_DEPTH, SESSION_SETUP_COMMANDS};

/// Script that prints the function listing
///
/// **Public** - input for the symbol table reader
pub fn build_listing_script() -> String {
    let mut script = setup_commands();
    script.push_str("info functions\n");
    script
}

/// Script that traces every function of the binary
///
/// **Public** - input for the trace session
///
/// # Arguments
/// * `sites` - Breakpoint targets; breakpoint `i + 1` is set on `sites[i]`
/// * `run_args` - Arguments passed to the traced program; GDB hands the
///   `run` line to a shell, so each one is quoted
///
/// # Example
/// ```text
/// break test.c:9
/// commands 1
/// backtrace 2
/// continue
/// end
/// run
/// ```
pub fn build_trace_script(sites: &[FunctionSite], run_args: &[String]) -> String {
    let mut script = setup_commands();

    // Breakpoints by location, so overloaded names stay distinct
    for site in sites {
        script.push_str(&format!("break {}\n", site.location()));
    }

    // Turn every stop into a backtrace followed by an automatic resume
    for breakpoint in 1..=sites.len() {
        script.push_str(&format!(
            "commands {}\nbacktrace {}\ncontinue\nend\n",
            breakpoint, BACKTRACE_DEPTH
        ));
    }

    script.push_str("run");
    for arg in run_args {
        script.push(' ');
        script.push_str(&shell_quote(arg));
    }
    script.push('\n');

    script
}

/// Quote an argument for the POSIX shell GDB starts the program with
///
/// Plain words pass through; anything else is single-quoted, with embedded
/// single quotes written as `'\''`.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', "'\\''"))
}

fn setup_commands() -> String {
    let mut script = String::new();
    for command in SESSION_SETUP_COMMANDS {
        script.push_str(command);
        script.push('\n');
    }
    script
}
