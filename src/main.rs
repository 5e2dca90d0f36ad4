use std::fs;
use std::process;

use irex::cli::{parse_args, CliArgs, ParseArgsResult};
use irex::decode::decode;
use irex::error::{Error, NavigationError};
use irex::explore::Explorer;
use irex::ir::block::BlockId;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    match parse_args(&args) {
        Ok(ParseArgsResult::Help) => {
            print!("{}", irex::cli::help_text());
            process::exit(0);
        }
        Ok(ParseArgsResult::Version) => {
            print!("{}", irex::cli::version_text());
            process::exit(0);
        }
        Ok(ParseArgsResult::Args(args)) => {
            if let Err(e) = run(args) {
                eprintln!("{} ({})", e, e.diagnostic_code());
                process::exit(1);
            }
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("run `irex --help` for usage");
            process::exit(2);
        }
    }
}

fn run(args: CliArgs) -> Result<(), Error> {
    let json = fs::read_to_string(&args.path)?;
    let program = decode(&json)?;

    let explorer = if let Some(id) = args.entry {
        Explorer::new_at(program, BlockId(id))?
    } else if let Some(name) = args.decl {
        let target = program
            .decl_target(&name)
            .ok_or_else(|| NavigationError::UnresolvedTarget {
                what: format!("declaration '{}'", name),
            })?;
        Explorer::new_at(program, target)?
    } else {
        Explorer::new(program)
    };

    irex::ui::run(explorer)?;
    Ok(())
}

/// Installs an env-filtered fmt subscriber when `RUST_LOG` is set.
///
/// Opt-in only: an unconditional stderr writer would scribble over the
/// alternate screen while the UI is running.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}
