//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! YAML output.
//!
//! Each instruction becomes one item of a top-level sequence. Comment and
//! blank lines from the source are written between the items where they
//! appeared, so the output stays readable next to the table it came from.

use std::io::Write;

use serde::Serialize;

use crate::{
	document::{Document, Instruction, InstructionMatch, Item},
	error::Result,
	options::ConvertOptions,
};

#[derive(Debug, Serialize)]
struct InstructionRecord<'a> {
	mnemonic: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	title: Option<&'a str>,
	matches: Vec<MatchRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	description: Option<&'a str>,
	operands: Vec<String>,
	/// One statement per line.
	expansion: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	compact_expansion: Option<String>,
}

fn block(statements: &[String]) -> String {
	statements
		.iter()
		.map(|statement| format!("{}\n", statement))
		.collect()
}

impl<'a> MatchRecord<'a> {
	fn new(instruction_match: &'a InstructionMatch, options: &ConvertOptions) -> Self {
		Self {
			description: instruction_match
				.description
				.as_deref()
				.filter(|description| !description.is_empty()),
			operands: instruction_match
				.operands
				.iter()
				.map(|operand| {
					if options.decorate_operands {
						operand.decorated()
					} else {
						operand.kind.to_string()
					}
				})
				.collect(),
			expansion: block(&instruction_match.expansion),
			compact_expansion: instruction_match
				.compact_expansion
				.as_deref()
				.filter(|compact| !compact.is_empty())
				.map(block),
		}
	}
}

impl<'a> InstructionRecord<'a> {
	fn new(instruction: &'a Instruction, options: &ConvertOptions) -> Self {
		Self {
			mnemonic: &instruction.mnemonic,
			title: instruction.title.as_deref(),
			matches: instruction
				.matches
				.iter()
				.map(|instruction_match| MatchRecord::new(instruction_match, options))
				.collect(),
		}
	}
}

pub fn to_string(document: &Document, options: &ConvertOptions) -> Result<String> {
	let mut output = String::new();

	for item in document.items() {
		match item {
			Item::Passthrough(line) => {
				output.push_str(line);
				output.push('\n');
			},
			Item::Instruction(instruction) => {
				let record = InstructionRecord::new(instruction, options);
				output.push_str(&serde_yaml::to_string(&[record])?);
			},
		}
	}

	Ok(output)
}

pub fn write_document<W: Write>(document: &Document, writer: &mut W, options: &ConvertOptions) -> Result<()> {
	writer.write_all(to_string(document, options)?.as_bytes())?;
	writer.flush()?;
	Ok(())
}
