//! Host driver: loads the stack module and plays reads and writes against
//! its pseudo-file from stdin.
//!
//! ```text
//! w <text>    write text, prints the accepted byte count
//! r [size]    read into a buffer of `size` bytes (4096 by default)
//! ls [dir]    list registered files
//! q           unload and quit
//! ```

use std::fmt;
use std::io::{self, BufRead, Write as _};
use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};
use procstack::{
    ModuleConfig, ProcManager, ReadPolicy, StackModule, DEFAULT_CAPACITY, DEFAULT_PATH,
};
use procstack_logging::Logger;

const DEFAULT_READ_SIZE: usize = 4096;

#[derive(Parser)]
#[command(name = "procstack", about = "LIFO buffer stack behind a pseudo-file")]
struct Args {
    /// Path the stack file is registered at
    #[arg(long, default_value = DEFAULT_PATH)]
    path: String,
    /// Maximum number of stored buffers
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: NonZeroUsize,
    /// Truncate reads into short buffers instead of rejecting them
    #[arg(long)]
    truncate: bool,
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level `{}`", s))
}

struct Stderr;

impl fmt::Write for Stderr {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        io::stderr().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if Logger::new(Stderr)
        .set_max_level(args.log_level)
        .init()
        .is_err()
    {
        eprintln!("logger already installed");
        return ExitCode::FAILURE;
    }

    let policy = if args.truncate {
        ReadPolicy::Truncate
    } else {
        ReadPolicy::Reject
    };
    let config = ModuleConfig::default()
        .with_path(&args.path)
        .with_capacity(args.capacity)
        .with_read_policy(policy);
    let module = match StackModule::init(config) {
        Ok(module) => module,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&module, io::stdin().lock(), io::stdout().lock());
    module.exit();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(module: &StackModule, input: impl BufRead, mut out: impl io::Write) -> io::Result<()> {
    let path = module.path();
    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let (command, rest) = match line.iter().position(|&b| b == b' ') {
            Some(i) => (&line[..i], &line[i + 1..]),
            None => (&line[..], &[][..]),
        };
        match command {
            b"w" => match ProcManager::write(path, rest) {
                Ok(n) => writeln!(out, "{}", n)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            b"r" => {
                let size = match text(rest) {
                    "" => DEFAULT_READ_SIZE,
                    size => match size.parse() {
                        Ok(size) => size,
                        Err(_) => {
                            let size = String::from_utf8_lossy(rest);
                            writeln!(out, "error: bad size `{}`", size.trim())?;
                            continue;
                        }
                    },
                };
                let mut buf = Vec::new();
                if buf.try_reserve_exact(size).is_err() {
                    writeln!(out, "error: cannot allocate {} bytes", size)?;
                    continue;
                }
                buf.resize(size, 0);
                match ProcManager::read(path, &mut buf) {
                    Ok(n) => {
                        out.write_all(&buf[..n])?;
                        writeln!(out)?;
                    }
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            b"ls" => {
                let dir = match text(rest) {
                    "" => "/",
                    dir => dir,
                };
                for entry in ProcManager::list(dir) {
                    writeln!(out, "{}", entry)?;
                }
            }
            b"q" => break,
            b"" => {}
            other => writeln!(
                out,
                "error: unknown command `{}`",
                String::from_utf8_lossy(other)
            )?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Trimmed argument text; anything that is not UTF-8 becomes `"\u{fffd}"`.
fn text(rest: &[u8]) -> &str {
    std::str::from_utf8(rest).map_or("\u{fffd}", str::trim)
}
