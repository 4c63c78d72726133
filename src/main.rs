use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{bail, IntoDiagnostic, Result};

use sapling::{RunState, MEMORY_MAX};

/// Sapling is a small instruction-level emulator for the SAP-2 8-bit
/// microprocessor.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a binary image to run at address 0
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a raw binary instruction image
    Run {
        /// Binary image to load and run
        name: PathBuf,
        /// Address to load the image at (decimal or 0x-prefixed hex)
        #[arg(short, long, default_value = "0", value_parser = parse_address)]
        base: u16,
        /// Print final register state after the run
        #[arg(short, long)]
        dump: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(command) = args.command {
        match command {
            Command::Run { name, base, dump } => run(&name, base, dump),
        }
    } else if let Some(path) = args.path {
        run(&path, 0, false)
    } else {
        println!("\n~ sapling v{VERSION} ~");
        println!("{SHORT_INFO}");
        std::process::exit(0);
    }
}

#[allow(unused)]
enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &PathBuf) {
    let right = format!("target {}", right.to_string_lossy());
    message(color, left, &right);
}

fn message<S>(color: MsgColor, left: S, right: S)
where
    S: Colorize + std::fmt::Display,
{
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    println!("{left:>12} {right}");
}

fn run(name: &PathBuf, base: u16, dump: bool) -> Result<()> {
    file_message(MsgColor::Green, "Loading", name);
    let image = fs::read(name).into_diagnostic()?;

    if base as usize + image.len() > MEMORY_MAX + 1 {
        bail!(
            "Image of {} bytes does not fit in memory at base address 0x{:04x}",
            image.len(),
            base
        );
    }

    let mut machine = RunState::new();
    machine.load(base, &image);

    message(MsgColor::Green, "Running", "loaded image");
    machine.start().into_diagnostic()?;

    if dump {
        let snapshot = machine.snapshot().to_string();
        message(MsgColor::Cyan, "State", snapshot.as_str());
    }
    file_message(MsgColor::Green, "Completed", name);
    Ok(())
}

/// Accept `--base` as decimal or 0x-prefixed hex.
fn parse_address(string: &str) -> Result<u16, String> {
    let parsed = match string.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => string.parse(),
    };
    parsed.map_err(|e| e.to_string())
}

const SHORT_INFO: &str = r"
Welcome to sapling, an instruction-level emulator for the SAP-2
instructional 8-bit computer architecture.
Please use `-h` or `--help` to access the usage instructions.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
