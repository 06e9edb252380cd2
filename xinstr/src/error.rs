//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use thiserror::Error;

use crate::definition::Rule;

#[derive(Debug, Error)]
pub enum Error {
	#[error("`{token}` refers to example token {digit}, but the example only has {len} tokens")]
	OperandIndexOutOfRange {
		token: String,
		digit: usize,
		len: usize,
	},

	#[error("`{token}` refers to example token {digit}, which is not an operand")]
	UnboundOperand { token: String, digit: usize },

	#[error("`{token}` refers to the last operand, but the example has no operands")]
	NoOperands { token: String },

	#[error("unrecognized macro token `{token}`")]
	UnknownMacro { token: String },

	#[error("definition has no example syntax")]
	MissingMnemonic,

	#[error("malformed definition:\n{0}")]
	Syntax(#[from] Box<pest::error::Error<Rule>>),

	#[error("in `{statement}`: {source}")]
	Statement {
		statement: String,
		#[source]
		source: Box<Error>,
	},

	#[error("line {line} ({mnemonic}): {source}")]
	Line {
		line: usize,
		mnemonic: String,
		#[source]
		source: Box<Error>,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
	pub(crate) fn in_statement(self, statement: &str) -> Self {
		Self::Statement {
			statement: statement.to_owned(),
			source: Box::new(self),
		}
	}

	pub(crate) fn at_line(self, line: usize, mnemonic: &str) -> Self {
		Self::Line {
			line,
			mnemonic: mnemonic.to_owned(),
			source: Box::new(self),
		}
	}

	/// Strips location wrappers and returns the underlying error.
	pub fn root(&self) -> &Error {
		match self {
			Self::Statement { source, .. } | Self::Line { source, .. } => source.root(),
			other => other,
		}
	}
}
