//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::{
	definition::Definition,
	error::Result,
	operand::{Example, Operand},
	options::ConvertOptions,
	translate::Translator,
};

/// One concrete syntax of a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionMatch {
	/// Human description with `{i}` operand placeholders.
	pub description: Option<String>,
	pub operands: Vec<Operand>,
	pub expansion: Vec<String>,
	pub compact_expansion: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
	pub mnemonic: String,
	pub title: Option<String>,
	/// In definition order.
	pub matches: Vec<InstructionMatch>,
}

/// A template token that looked like a macro but was copied through as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
	pub line: usize,
	pub mnemonic: String,
	pub token: String,
}

impl Display for Warning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"line {} ({}): unrecognized macro token `{}`",
			self.line, self.mnemonic, self.token
		)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
	Passthrough(String),
	/// Index into `Document::instructions`, placed where the mnemonic first
	/// appeared.
	Instruction(usize),
}

/// Output items in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item<'a> {
	/// A blank or comment line, copied verbatim.
	Passthrough(&'a str),
	Instruction(&'a Instruction),
}

/// A whole instruction table, grouped by mnemonic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	entries: Vec<Entry>,
	instructions: Vec<Instruction>,
	warnings: Vec<Warning>,
}

struct ConvertedLine {
	mnemonic: String,
	title: Option<String>,
	instruction_match: InstructionMatch,
	unrecognized: Vec<String>,
}

fn convert_line(line: &str, options: &ConvertOptions) -> Result<ConvertedLine> {
	let definition = Definition::parse(line)?;
	let example = Example::parse(&definition.example)?;

	let mut translator = Translator::new(&example.map, options.strict);
	let expansion = translator.template(&definition.expansion)?;
	let compact_expansion = match &definition.compact {
		Some(compact) => Some(translator.template(compact)?),
		None => None,
	};
	let unrecognized = translator.into_unrecognized();

	let description = definition
		.description
		.as_deref()
		.map(|description| example.bind_description(description));

	Ok(ConvertedLine {
		mnemonic: example.mnemonic,
		title: definition.title,
		instruction_match: InstructionMatch {
			description,
			operands: example.operands,
			expansion,
			compact_expansion,
		},
		unrecognized,
	})
}

impl Document {
	pub fn parse(source: &str, options: &ConvertOptions) -> Result<Self> {
		let mut document = Document::default();
		let mut by_mnemonic = HashMap::<String, usize>::new();

		for (index, line) in source.lines().enumerate() {
			let line_number = index + 1;
			let line = line.trim();

			if line.is_empty() || line.starts_with('#') {
				document.entries.push(Entry::Passthrough(line.to_owned()));
				continue;
			}

			let converted = convert_line(line, options).map_err(|e| {
				let mnemonic = line.split_whitespace().next().unwrap_or_default();
				e.at_line(line_number, mnemonic)
			})?;

			debug!(
				line = line_number,
				mnemonic = converted.mnemonic.as_str(),
				operands = converted.instruction_match.operands.len(),
				statements = converted.instruction_match.expansion.len(),
				"converted definition"
			);

			document
				.warnings
				.extend(converted.unrecognized.into_iter().map(|token| Warning {
					line: line_number,
					mnemonic: converted.mnemonic.clone(),
					token,
				}));

			match by_mnemonic.get(&converted.mnemonic).copied() {
				Some(existing) => {
					let instruction = &mut document.instructions[existing];
					if converted.title.is_some() {
						instruction.title = converted.title;
					}
					instruction.matches.push(converted.instruction_match);
				},
				None => {
					let new_index = document.instructions.len();
					by_mnemonic.insert(converted.mnemonic.clone(), new_index);
					document.entries.push(Entry::Instruction(new_index));
					document.instructions.push(Instruction {
						mnemonic: converted.mnemonic,
						title: converted.title,
						matches: vec![converted.instruction_match],
					});
				},
			}
		}

		Ok(document)
	}

	pub fn items(&self) -> impl Iterator<Item = Item<'_>> + '_ {
		self.entries.iter().map(|entry| match entry {
			Entry::Passthrough(line) => Item::Passthrough(line),
			Entry::Instruction(index) => Item::Instruction(&self.instructions[*index]),
		})
	}

	/// Instructions in first-seen order.
	pub fn instructions(&self) -> &[Instruction] {
		&self.instructions
	}

	pub fn instruction(&self, mnemonic: &str) -> Option<&Instruction> {
		self.instructions
			.iter()
			.find(|instruction| instruction.mnemonic == mnemonic)
	}

	pub fn match_count(&self) -> usize {
		self.instructions
			.iter()
			.map(|instruction| instruction.matches.len())
			.sum()
	}

	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}
}
