//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{fs, io::BufWriter, path::PathBuf, process::exit};

use clap::{ArgAction, Parser as ClapParser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xinstr::{emit, ConvertOptions, Document};

/// Converts the extended instruction table into its YAML description.
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Instruction table to read.
	source: PathBuf,

	/// YAML file to write.
	destination: PathBuf,

	/// Treat unrecognized upper-case template tokens as errors.
	#[arg(long)]
	strict: bool,

	/// Write operand kinds with their adjacency tags, e.g. `(reg)` or `label+`.
	#[arg(long)]
	decorate_operands: bool,

	/// Increase log verbosity (can be repeated). `RUST_LOG` takes precedence.
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn main() {
	let cli = Args::parse();
	init_logging(cli.verbose);

	let options = ConvertOptions {
		strict: cli.strict,
		decorate_operands: cli.decorate_operands,
	};

	let input = match fs::read_to_string(&cli.source) {
		Ok(x) => x,
		Err(e) => {
			eprintln!("Failed to read \"{}\": {}", cli.source.display(), e);
			exit(1);
		},
	};

	let document = match Document::parse(&input, &options) {
		Ok(document) => document,
		Err(e) => {
			eprintln!("Failed to convert \"{}\": {}", cli.source.display(), e);
			exit(1);
		},
	};

	for warning in document.warnings() {
		warn!("{}", warning);
	}

	let output_file = match fs::File::create(&cli.destination) {
		Ok(file) => file,
		Err(e) => {
			eprintln!("Failed to open output file \"{}\": {}", cli.destination.display(), e);
			exit(1);
		},
	};

	let mut writer = BufWriter::new(output_file);
	if let Err(e) = emit::write_document(&document, &mut writer, &options) {
		eprintln!("Failed to write to output file: {}", e);
		exit(1);
	}

	info!(
		instructions = document.instructions().len(),
		matches = document.match_count(),
		warnings = document.warnings().len(),
		"wrote {}",
		cli.destination.display()
	);
}
