#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "anyvalue", about = "Inspect dynamically shaped JSON documents")]
struct Cli {
	/// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Decode(cmd::decode::Args),
	Encode(cmd::encode::Args),
	Info(cmd::info::Args),
	Get(cmd::get::Args),
	Roundtrip(cmd::roundtrip::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> anyvalue::dynamic::Result<()> {
	match command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Info(args) => cmd::info::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
	}
}

fn init_tracing(verbose: u8) {
	use tracing_subscriber::EnvFilter;

	let default = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
