//! CLI argument parsing, exported from the library so integration tests can exercise it.

use std::path::PathBuf;

/// Fully-parsed CLI arguments for an exploration session.
#[derive(Debug)]
pub struct CliArgs {
    /// Path to the JSON IR dump.
    pub path: PathBuf,
    /// Start at this block id instead of the dump's entry block.
    pub entry: Option<u32>,
    /// Start at the body block of this named declaration.
    pub decl: Option<String>,
}

/// Result of `parse_args`.
#[derive(Debug)]
pub enum ParseArgsResult {
    /// Normal exploration request.
    Args(CliArgs),
    /// `--help` was present; caller should print usage and exit 0.
    Help,
    /// `--version` was present; caller should print the version and exit 0.
    Version,
}

/// Parses command-line arguments (the full `std::env::args()` slice including `argv[0]`).
pub fn parse_args(args: &[String]) -> Result<ParseArgsResult, String> {
    let mut path: Option<PathBuf> = None;
    let mut entry: Option<u32> = None;
    let mut decl: Option<String> = None;
    let mut i = 1usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(ParseArgsResult::Help),
            "--version" | "-V" => return Ok(ParseArgsResult::Version),
            "--entry" => {
                i += 1;
                let id = args
                    .get(i)
                    .ok_or_else(|| "--entry requires a block id".to_owned())?;
                entry = Some(id.parse::<u32>().map_err(|_| {
                    format!("--entry: '{}' is not a valid block id", id)
                })?);
            }
            "--decl" => {
                i += 1;
                let name = args
                    .get(i)
                    .ok_or_else(|| "--decl requires a declaration name".to_owned())?;
                decl = Some(name.clone());
            }
            arg if !arg.starts_with('-') => {
                path = Some(PathBuf::from(arg));
            }
            other => return Err(format!("unknown argument: '{}'", other)),
        }
        i += 1;
    }

    if entry.is_some() && decl.is_some() {
        return Err("--entry and --decl are mutually exclusive".to_owned());
    }

    let path = path.ok_or_else(|| "no dump file specified".to_owned())?;
    Ok(ParseArgsResult::Args(CliArgs { path, entry, decl }))
}

/// Returns the usage/help text for the CLI.
pub fn help_text() -> &'static str {
    "irex — interactive explorer for compiler IR dumps\n\
     Usage: irex [options] <dump.json>\n\
     \n\
     Options:\n\
       --entry <id>      Start at block <id> instead of the dump's entry block\n\
       --decl <name>     Start at the body of declaration <name>\n\
       --version, -V     Print the version and exit\n\
       --help, -h        Print this help and exit\n\
     \n\
     Keys: up/k down/j move, enter follow, backspace back, g goto,\n\
           space inspect, esc cancel, q quit\n"
}

/// Returns the version line for `--version`.
pub fn version_text() -> String {
    format!("irex {}\n", env!("CARGO_PKG_VERSION"))
}
