mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("prismsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Invocation::Help) => {
            println!("{}", usage());
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("prismsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("prismsnake: {e}\n\n{}", usage());
            ExitCode::from(2)
        }
    }
}

fn usage() -> String {
    format!(
        concat!(
            "Usage: {} [-c <FILE>] [--log-file <FILE>]\n",
            "\n",
            "Play Snake in the terminal\n",
            "\n",
            "Options:\n",
            "  -c, --config <FILE>   Read configuration from the given file\n",
            "      --log-file <FILE> Append log messages to the given file\n",
            "  -h, --help            Show this help and exit\n",
            "  -V, --version         Show the program version and exit",
        ),
        env!("CARGO_PKG_NAME")
    )
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Err(ConfigError::NoPath) => Config::default(),
            Err(e) => return Err(e.into()),
        },
    };
    if let Some(path) = args.log_file {
        config.logging.file = Some(path);
    }
    logging::init(&config.logging).context("failed to set up logging")?;
    let terminal = ratatui::init();
    let r = App::new().run(terminal);
    ratatui::restore();
    io_exit(r).context("error running game")
}

/// Treat a broken pipe on the terminal as a normal exit
fn io_exit(r: io::Result<()>) -> io::Result<()> {
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r,
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    /// Configuration file given on the command line
    config: Option<PathBuf>,

    /// Log file overriding the one in the configuration
    log_file: Option<PathBuf>,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}
