//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
	/// Fail on upper-case template tokens that are not known macros instead of
	/// copying them through.
	pub strict: bool,
	/// Emit operand kinds with their adjacency tags (`(reg)`, `label+`).
	pub decorate_operands: bool,
}
