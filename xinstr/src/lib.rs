//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Conversion of the extended (pseudo-) instruction table into YAML.
//!
//! Every table line gives an example syntax such as `lw $1, 100000($2)`,
//! followed by tab-separated template statements that use upper-case macro
//! tokens (`RG1`, `VH2`, `LLPP4`, ...) to refer to the example's tokens. The
//! converter classifies the example's operands and rewrites the templates
//! into `{index:modifiers}` placeholders.

pub mod definition;
pub mod document;
pub mod emit;
pub mod error;
pub mod operand;
pub mod options;
pub mod token;
pub mod translate;

pub use document::{Document, Instruction, InstructionMatch, Item, Warning};
pub use error::{Error, Result};
pub use operand::{Operand, OperandKind};
pub use options::ConvertOptions;

/// Converts a whole table to its YAML form.
pub fn convert(source: &str, options: &ConvertOptions) -> Result<String> {
	let document = Document::parse(source, options)?;
	emit::to_string(&document, options)
}
