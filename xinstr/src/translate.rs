//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Expansion template translation.
//!
//! Template statements are written with upper-case macro tokens which are
//! rewritten into `{index[:modifier,...]}` placeholders. Modifiers:
//!
//! * `L`  low-order 16 bits (zero-extended low half)
//! * `AL` arithmetic low-order 16 bits (sign-extended low half)
//! * `H`  high-order 16 bits (for a zero-extended low half)
//! * `AH` arithmetic high-order 16 bits (for a sign-extended low half)
//! * `B`  branch offset
//! * `-`  negation
//! * `+m` add `m` before anything else
//!
//! `DB` placeholders describe the delayed branching slot.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::warn;

use crate::{
	error::{Error, Result},
	operand::OperandMap,
	token::{reassemble, tokenize},
};

/// Operand index used by macros that do not name an example token.
const DEFAULT_OPERAND: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
	/// `RGn`, `OPn`
	Value,
	/// `NRn`, the register after operand n
	NextRegister,
	/// `LLn`, `VLn`, `LLP`
	Low,
	/// `LHL`, `VHLn`, `LHPN`
	High,
	/// `LHn`, `VHn`, `LHPA`
	ArithmeticHigh,
}

lazy_static! {
	static ref FAMILIES: HashMap<&'static str, Family> = HashMap::from([
		("RG", Family::Value),
		("OP", Family::Value),
		("NR", Family::NextRegister),
		("LL", Family::Low),
		("VL", Family::Low),
		("LLP", Family::Low),
		("LHL", Family::High),
		("VHL", Family::High),
		("LHPN", Family::High),
		("LH", Family::ArithmeticHigh),
		("VH", Family::ArithmeticHigh),
		("LHPA", Family::ArithmeticHigh),
	]);
}

/// Outcome of translating a single template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
	/// Not a macro; the token is emitted as written.
	Verbatim,
	Substituted(String),
	/// Looks like a macro but names no known family. The token is emitted as
	/// written.
	Unrecognized,
}

impl Translation {
	pub fn apply(self, token: String) -> String {
		match self {
			Translation::Substituted(substitution) => substitution,
			Translation::Verbatim | Translation::Unrecognized => token,
		}
	}
}

/// Whether the token has at least one cased letter and no lower-case ones.
fn is_upper(token: &str) -> bool {
	token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase)
}

fn pop_digit(key: &mut String) -> Option<u32> {
	let digit = key.chars().last()?.to_digit(10)?;
	key.pop();
	Some(digit)
}

/// Strips a trailing `P<digit>` offset. Only applies when more than three
/// characters remain, so `OPn` is left alone.
fn pop_offset(key: &mut String) -> Option<char> {
	if key.chars().count() <= 3 {
		return None;
	}

	let mut tail = key.chars().rev();
	match (tail.next(), tail.next()) {
		(Some(digit), Some('P')) if digit.is_ascii_digit() => {
			key.pop();
			key.pop();
			Some(digit)
		},
		_ => None,
	}
}

fn placeholder(index: usize, modifiers: &[String]) -> String {
	if modifiers.is_empty() {
		format!("{{{}}}", index)
	} else {
		format!("{{{}:{}}}", index, modifiers.join(","))
	}
}

/// Translates one template token using the operand map of its definition.
pub fn translate_token(token: &str, map: &OperandMap) -> Result<Translation> {
	if !is_upper(token) {
		return Ok(Translation::Verbatim);
	}

	if token == "DBNOP" {
		return Ok(Translation::Substituted("{DB:nop:}".to_owned()));
	}

	if let Some(parameters) = token.strip_prefix("BROFF") {
		let parameters: Vec<char> = parameters.chars().collect();
		if let &[first, second] = parameters.as_slice() {
			return Ok(Translation::Substituted(format!("{{DB:{}:{}}}", second, first)));
		}
	}

	if token == "LAB" || token == "S32" {
		let index = map.last_operand().ok_or_else(|| Error::NoOperands {
			token: token.to_owned(),
		})?;
		let modifier = if token == "LAB" { "B" } else { "-" };
		return Ok(Translation::Substituted(format!("{{{}:{}}}", index, modifier)));
	}

	let mut key = token.to_owned();
	let mut modifiers = Vec::new();

	let unsigned = key.ends_with('U');
	if unsigned {
		key.pop();
	}
	if let Some(offset) = pop_offset(&mut key) {
		modifiers.push(format!("+{}", offset));
	}
	let digit = pop_digit(&mut key);

	if key.chars().count() < 2 {
		return Ok(Translation::Verbatim);
	}

	let Some(family) = FAMILIES.get(key.as_str()) else {
		return Ok(Translation::Unrecognized);
	};

	match family {
		Family::Value => {},
		Family::NextRegister => modifiers.push("+1".to_owned()),
		Family::Low => modifiers.push(if unsigned { "L" } else { "AL" }.to_owned()),
		Family::High => modifiers.push("H".to_owned()),
		Family::ArithmeticHigh => modifiers.push("AH".to_owned()),
	}

	let index = match digit {
		Some(digit) => map.resolve(token, digit as usize)?,
		None => DEFAULT_OPERAND,
	};

	Ok(Translation::Substituted(placeholder(index, &modifiers)))
}

/// Translates whole template statements for one definition, collecting the
/// macro-like tokens it could not recognize.
#[derive(Debug)]
pub struct Translator<'a> {
	map: &'a OperandMap,
	strict: bool,
	unrecognized: Vec<String>,
}

impl<'a> Translator<'a> {
	pub fn new(map: &'a OperandMap, strict: bool) -> Self {
		Self {
			map,
			strict,
			unrecognized: Vec::new(),
		}
	}

	pub fn statement(&mut self, statement: &str) -> Result<String> {
		let mut tokens = tokenize(statement);
		for token in tokens.iter_mut() {
			let translation = translate_token(token, self.map).map_err(|e| e.in_statement(statement))?;
			if translation == Translation::Unrecognized {
				if self.strict {
					return Err(Error::UnknownMacro {
						token: token.clone(),
					}
					.in_statement(statement));
				}
				warn!(token = token.as_str(), statement, "unrecognized macro token left as is");
				self.unrecognized.push(token.clone());
			}
			*token = translation.apply(std::mem::take(token));
		}

		Ok(reassemble(&tokens).trim_end().to_owned())
	}

	/// Translates every non-blank statement of a template.
	pub fn template<S: AsRef<str>>(&mut self, statements: &[S]) -> Result<Vec<String>> {
		statements
			.iter()
			.map(|statement| statement.as_ref())
			.filter(|statement| !statement.trim().is_empty())
			.map(|statement| self.statement(statement))
			.collect()
	}

	pub fn unrecognized(&self) -> &[String] {
		&self.unrecognized
	}

	pub fn into_unrecognized(self) -> Vec<String> {
		self.unrecognized
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn map() -> OperandMap {
		OperandMap::from_slots(vec![None, Some(0), Some(1), Some(2)])
	}

	fn translate(token: &str) -> String {
		translate_token(token, &map()).unwrap().apply(token.to_owned())
	}

	#[test]
	fn plain_values() {
		assert_eq!(translate("RG1"), "{0}");
		assert_eq!(translate("RG2"), "{1}");
		assert_eq!(translate("RG3"), "{2}");
		assert_eq!(translate("OP3"), "{2}");
		assert_eq!(translate("NR2"), "{1:+1}");
	}

	#[test]
	fn low_and_high_halves() {
		assert_eq!(translate("LL3"), "{2:AL}");
		assert_eq!(translate("LL3U"), "{2:L}");
		assert_eq!(translate("LL2P4"), "{1:+4,AL}");
		assert_eq!(translate("LH3"), "{2:AH}");
		assert_eq!(translate("LH2P4"), "{1:+4,AH}");
		assert_eq!(translate("VL2"), "{1:AL}");
		assert_eq!(translate("VL2U"), "{1:L}");
		assert_eq!(translate("VL3P1"), "{2:+1,AL}");
		assert_eq!(translate("VL3P1U"), "{2:+1,L}");
		assert_eq!(translate("VHL3"), "{2:H}");
		assert_eq!(translate("VHL3P2"), "{2:+2,H}");
		assert_eq!(translate("VH2"), "{1:AH}");
		assert_eq!(translate("VH2P3"), "{1:+3,AH}");
	}

	#[test]
	fn label_offset_macros_default_to_operand_one() {
		assert_eq!(translate("LLP"), "{1:AL}");
		assert_eq!(translate("LLPU"), "{1:L}");
		assert_eq!(translate("LLPP4"), "{1:+4,AL}");
		assert_eq!(translate("LHPA"), "{1:AH}");
		assert_eq!(translate("LHPN"), "{1:H}");
		assert_eq!(translate("LHPAP4"), "{1:+4,AH}");
		assert_eq!(translate("LHL"), "{1:H}");
	}

	#[test]
	fn last_operand_macros() {
		assert_eq!(translate("LAB"), "{2:B}");
		assert_eq!(translate("S32"), "{2:-}");

		let short = OperandMap::from_slots(vec![None, Some(0), None]);
		assert_eq!(
			translate_token("LAB", &short).unwrap(),
			Translation::Substituted("{0:B}".to_owned())
		);

		let empty = OperandMap::from_slots(vec![None]);
		assert!(matches!(
			translate_token("S32", &empty),
			Err(Error::NoOperands { .. })
		));
	}

	#[test]
	fn delay_slot_markers() {
		assert_eq!(translate("DBNOP"), "{DB:nop:}");
		assert_eq!(translate("BROFF12"), "{DB:2:1}");
		assert_eq!(translate("BROFF07"), "{DB:7:0}");
	}

	#[test]
	fn non_macros_pass_through() {
		for token in ["addiu", "$1", "$AT", "100", "-", "{0}", "", "(", "A1", "U"] {
			assert_eq!(translate(token), token);
		}
		assert_eq!(translate_token("$at", &map()).unwrap(), Translation::Verbatim);
	}

	#[test]
	fn unknown_family_is_reported() {
		assert_eq!(translate_token("FOO3", &map()).unwrap(), Translation::Unrecognized);
		assert_eq!(translate("FOO3"), "FOO3");
		// the digit is not resolved for unknown families
		assert_eq!(translate_token("FOO9", &map()).unwrap(), Translation::Unrecognized);
	}

	#[test]
	fn bad_operand_references() {
		assert!(matches!(
			translate_token("RG7", &map()),
			Err(Error::OperandIndexOutOfRange { digit: 7, len: 4, .. })
		));
		assert!(matches!(
			translate_token("RG0", &map()),
			Err(Error::UnboundOperand { digit: 0, .. })
		));
	}

	#[test]
	fn statements() {
		let map = map();
		let mut translator = Translator::new(&map, false);
		assert_eq!(
			translator.statement("addu RG1, RG2, RG3").unwrap(),
			"addu {0}, {1}, {2}"
		);
		assert_eq!(
			translator.statement("lui $1, LH3").unwrap(),
			"lui $1, {2:AH}"
		);
		assert_eq!(
			translator.statement("lw RG1, LL3 ( $1 )").unwrap(),
			"lw {0}, {2:AL}($1)"
		);
		assert_eq!(translator.statement("nop").unwrap(), "nop");
		assert!(translator.unrecognized().is_empty());
	}

	#[test]
	fn template_skips_blank_statements() {
		let map = map();
		let mut translator = Translator::new(&map, false);
		assert_eq!(
			translator
				.template(&["lui $1, VH3", "", "  ", "ori RG1, $1, VL3U"])
				.unwrap(),
			["lui $1, {2:AH}", "ori {0}, $1, {2:L}"]
		);
	}

	#[test]
	fn unrecognized_tokens_are_collected() {
		let map = map();
		let mut translator = Translator::new(&map, false);
		assert_eq!(translator.statement("addu RG1, XY2, RG3").unwrap(), "addu {0}, XY2, {2}");
		assert_eq!(translator.into_unrecognized(), ["XY2"]);

		let mut strict = Translator::new(&map, true);
		let err = strict.statement("addu RG1, XY2, RG3").unwrap_err();
		assert!(matches!(err.root(), Error::UnknownMacro { token } if token == "XY2"));
	}

	#[test]
	fn errors_name_the_statement() {
		let map = map();
		let mut translator = Translator::new(&map, false);
		let err = translator.statement("addu RG1, RG2, RG8").unwrap_err();
		assert!(matches!(err, Error::Statement { ref statement, .. } if statement == "addu RG1, RG2, RG8"));
		assert!(matches!(err.root(), Error::OperandIndexOutOfRange { digit: 8, .. }));
	}
}
