//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{fmt::Display, num::IntErrorKind};

use tracing::trace;

use crate::{
	error::{Error, Result},
	token::tokenize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
	Reg,
	FReg,
	U3,
	U5,
	U16,
	S16,
	I32,
	Label,
}

/// A grouping token directly next to an operand in the example syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
	OpenParen,
	CloseParen,
	Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
	pub kind: OperandKind,
	pub prefix: Option<Adjacency>,
	pub suffix: Option<Adjacency>,
}

impl OperandKind {
	pub const fn name(&self) -> &'static str {
		match self {
			OperandKind::Reg => "reg",
			OperandKind::FReg => "freg",
			OperandKind::U3 => "u3",
			OperandKind::U5 => "u5",
			OperandKind::U16 => "u16",
			OperandKind::S16 => "s16",
			OperandKind::I32 => "i32",
			OperandKind::Label => "label",
		}
	}

	fn of_immediate(value: i64) -> Self {
		match value {
			0..=7 => Self::U3,
			8..=31 => Self::U5,
			32..=65535 => Self::U16,
			-32768..=-1 => Self::S16,
			_ => Self::I32,
		}
	}

	fn of_token(token: &str) -> Self {
		if let Some(register) = token.strip_prefix('$') {
			return if register.starts_with('f') {
				Self::FReg
			} else {
				Self::Reg
			};
		}

		match token.parse::<i64>() {
			Ok(value) => Self::of_immediate(value),
			Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
				Self::I32
			},
			Err(_) => Self::Label,
		}
	}
}

impl Display for OperandKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl Adjacency {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Adjacency::OpenParen => "(",
			Adjacency::CloseParen => ")",
			Adjacency::Plus => "+",
		}
	}

	fn from_token(token: &str) -> Option<Self> {
		match token {
			"(" => Some(Self::OpenParen),
			")" => Some(Self::CloseParen),
			"+" => Some(Self::Plus),
			_ => None,
		}
	}
}

impl Operand {
	pub const fn new(kind: OperandKind) -> Self {
		Self {
			kind,
			prefix: None,
			suffix: None,
		}
	}

	/// The kind together with its adjacency tags, e.g. `(reg)` or `label+`.
	pub fn decorated(&self) -> String {
		format!(
			"{}{}{}",
			self.prefix.map_or("", |tag| tag.as_str()),
			self.kind,
			self.suffix.map_or("", |tag| tag.as_str())
		)
	}
}

impl Display for Operand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.kind)
	}
}

/// Classifies the example token at `index`, or returns `None` when it is not
/// an operand by itself.
pub fn classify<S: AsRef<str>>(tokens: &[S], index: usize) -> Option<Operand> {
	let token = tokens.get(index)?.as_ref();
	if token.is_empty() || Adjacency::from_token(token).is_some() {
		return None;
	}

	let previous = index
		.checked_sub(1)
		.and_then(|previous| tokens.get(previous))
		.map(|previous| previous.as_ref());
	// the "N" in "label+N" belongs to the label operand before it
	if previous == Some("+") {
		return None;
	}

	let prefix = previous
		.and_then(Adjacency::from_token)
		.filter(|tag| *tag == Adjacency::OpenParen);
	let suffix = tokens
		.get(index + 1)
		.and_then(|next| Adjacency::from_token(next.as_ref()))
		.filter(|tag| *tag != Adjacency::OpenParen);

	Some(Operand {
		kind: OperandKind::of_token(token),
		prefix,
		suffix,
	})
}

/// Maps example token numbers (as written in template macros) to operand
/// indices.
///
/// Slot 0 is the mnemonic; every following slot is a non-empty example token,
/// which is either an operand or a grouping token such as `(`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandMap {
	slots: Vec<Option<usize>>,
}

impl OperandMap {
	pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
		Self { slots }
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	pub fn slots(&self) -> &[Option<usize>] {
		&self.slots
	}

	pub fn operand_count(&self) -> usize {
		self.slots.iter().flatten().count()
	}

	/// The index of the last declared operand.
	pub fn last_operand(&self) -> Option<usize> {
		self.operand_count().checked_sub(1)
	}

	/// Resolves the example token number `digit` used by the macro `token`.
	pub fn resolve(&self, token: &str, digit: usize) -> Result<usize> {
		match self.slots.get(digit) {
			Some(Some(index)) => Ok(*index),
			Some(None) => Err(Error::UnboundOperand {
				token: token.to_owned(),
				digit,
			}),
			None => Err(Error::OperandIndexOutOfRange {
				token: token.to_owned(),
				digit,
				len: self.slots.len(),
			}),
		}
	}
}

/// The classified example syntax of one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
	pub mnemonic: String,
	pub operands: Vec<Operand>,
	pub map: OperandMap,
	/// Example tokens that were classified as operands, in operand order.
	pub operand_tokens: Vec<String>,
}

impl Example {
	pub fn parse(example: &str) -> Result<Self> {
		let tokens = tokenize(example);
		let mnemonic = match tokens.first() {
			Some(mnemonic) if !mnemonic.is_empty() => mnemonic.clone(),
			_ => return Err(Error::MissingMnemonic),
		};

		let mut slots = vec![None];
		let mut operands = Vec::new();
		let mut operand_tokens = Vec::new();

		for (index, token) in tokens.iter().enumerate().skip(1) {
			if token.is_empty() {
				continue;
			}

			match classify(&tokens, index) {
				Some(operand) => {
					trace!(%mnemonic, token = token.as_str(), kind = %operand.decorated(), "operand");
					slots.push(Some(operands.len()));
					operands.push(operand);
					operand_tokens.push(token.clone());
				},
				None => slots.push(None),
			}
		}

		Ok(Self {
			mnemonic,
			operands,
			map: OperandMap::from_slots(slots),
			operand_tokens,
		})
	}

	/// Replaces every verbatim occurrence of an operand token in `description`
	/// with its `{index}` placeholder.
	pub fn bind_description(&self, description: &str) -> String {
		self.operand_tokens
			.iter()
			.enumerate()
			.fold(description.to_owned(), |description, (index, token)| {
				description.replace(token.as_str(), &format!("{{{}}}", index))
			})
	}
}
