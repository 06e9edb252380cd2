//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use pest::{iterators::Pairs, Parser};
use pest_derive::Parser;

use crate::error::Result;

#[derive(Parser)]
#[grammar = "definition.pest"]
pub struct DefinitionParser;

/// One definition line, split into its raw parts. Template statements are not
/// tokenized yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
	pub example: String,
	pub expansion: Vec<String>,
	pub compact: Option<Vec<String>>,
	pub title: Option<String>,
	pub description: Option<String>,
}

fn statements(segments: Pairs<Rule>) -> Vec<String> {
	segments
		.map(|segment| segment.as_str().trim())
		.filter(|statement| !statement.is_empty())
		.map(str::to_owned)
		.collect()
}

fn non_empty(text: &str) -> Option<String> {
	if text.is_empty() {
		None
	} else {
		Some(text.to_owned())
	}
}

impl Definition {
	/// Parses a line that is neither blank nor a comment line.
	pub fn parse(line: &str) -> Result<Self> {
		let pairs = DefinitionParser::parse(Rule::definition, line.trim()).map_err(Box::new)?;
		let mut definition = Definition::default();

		for pair in pairs.flat_map(|pair| pair.into_inner()) {
			match pair.as_rule() {
				Rule::expansion => {
					let mut segments = pair.into_inner();
					definition.example = segments
						.next()
						.map(|example| example.as_str().trim().to_owned())
						.unwrap_or_default();
					definition.expansion = statements(segments);
				},
				Rule::compact => {
					let compact = statements(pair.into_inner());
					if !compact.is_empty() {
						definition.compact = Some(compact);
					}
				},
				Rule::comment => {
					for part in pair.into_inner() {
						match part.as_rule() {
							Rule::title => definition.title = non_empty(part.as_str().trim()),
							Rule::description => {
								definition.description = non_empty(part.as_str().trim_start())
							},
							_ => unreachable!(),
						}
					}
				},
				_ => {},
			}
		}

		Ok(definition)
	}
}
