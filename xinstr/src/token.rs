//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Statement tokenizer and its inverse.
//!
//! A tokenized statement always has an odd number of tokens: even positions
//! hold content fragments and odd positions hold separators. A separator is
//! either one of the grouping characters `(`, `)` and `+`, or an empty string
//! standing in for a run of commas and whitespace.

const GROUP_CHARS: [char; 3] = ['(', ')', '+'];

fn is_group_char(char: char) -> bool {
	GROUP_CHARS.contains(&char)
}

/// Looks for a grouping separator (optional whitespace, a grouping character,
/// optional whitespace) starting at `start`. Returns the grouping character and
/// the index just past the separator.
fn group_separator(chars: &[char], start: usize) -> Option<(char, usize)> {
	let mut index = start;
	while index < chars.len() && chars[index].is_whitespace() {
		index += 1;
	}

	match chars.get(index) {
		Some(&char) if is_group_char(char) => {
			index += 1;
			while index < chars.len() && chars[index].is_whitespace() {
				index += 1;
			}
			Some((char, index))
		},
		_ => None,
	}
}

fn starts_plain_separator(chars: &[char], index: usize) -> bool {
	match chars[index] {
		',' => true,
		// whitespace right after a '-' belongs to the fragment (e.g. "- 5")
		char if char.is_whitespace() => index == 0 || chars[index - 1] != '-',
		_ => false,
	}
}

fn finish_fragment(fragment: &mut String, tokens: &mut Vec<String>) {
	tokens.push(fragment.replace(' ', ""));
	fragment.clear();
}

/// Splits a statement into content and separator tokens.
///
/// Empty fragments are kept so that the content/separator alternation holds,
/// e.g. `lw $1, 100($2)` becomes
/// `["lw", "", "$1", "", "100", "(", "$2", ")", ""]`.
pub fn tokenize(statement: &str) -> Vec<String> {
	let chars: Vec<char> = statement.trim().chars().collect();
	let mut tokens = Vec::new();
	let mut fragment = String::new();
	let mut index = 0;

	while index < chars.len() {
		if let Some((group, end)) = group_separator(&chars, index) {
			finish_fragment(&mut fragment, &mut tokens);
			tokens.push(group.to_string());
			index = end;
		} else if starts_plain_separator(&chars, index) {
			finish_fragment(&mut fragment, &mut tokens);
			tokens.push(String::new());
			while index < chars.len() && (chars[index] == ',' || chars[index].is_whitespace()) {
				index += 1;
			}
		} else {
			fragment.push(chars[index]);
			index += 1;
		}
	}

	finish_fragment(&mut fragment, &mut tokens);
	tokens
}

/// Joins tokens back into a `MNEMONIC op1, op2, ...` statement.
///
/// Empty separators render as `", "` (except right after the mnemonic), while
/// grouping separators render as themselves so that `100($2)` and `label+4`
/// come back without inserted commas.
pub fn reassemble<S: AsRef<str>>(tokens: &[S]) -> String {
	let Some(mnemonic) = tokens.first() else {
		return String::new();
	};

	let mut statement = format!("{} ", mnemonic.as_ref());
	for index in (2..tokens.len()).step_by(2) {
		let separator = tokens[index - 1].as_ref();
		if !separator.is_empty() {
			statement.push_str(separator);
		} else if index > 2 {
			statement.push_str(", ");
		}
		statement.push_str(tokens[index].as_ref());
	}

	statement
}
