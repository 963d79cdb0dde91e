#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod logging;
mod shape_file;

#[derive(Parser)]
#[command(name = "memshape", about = "Layout-aware inspection of captured process memory")]
struct Cli {
	/// Raise log verbosity (`-v` debug, `-vv` trace); `RUST_LOG` wins when set.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Machines(cmd::machines::Args),
	Layout(cmd::layout::Args),
	Decode(cmd::decode::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> memshape::memory::Result<()> {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	match cli.command {
		Commands::Machines(args) => cmd::machines::run(args),
		Commands::Layout(args) => cmd::layout::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
	}
}
