//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use proptest::prelude::*;
use xinstr::{
	operand::{classify, OperandMap},
	token::{reassemble, tokenize},
	translate::translate_token,
};

fn separator() -> impl Strategy<Value = &'static str> {
	prop::sample::select(vec![",", ", ", " , ", " ", "   ", ",,", " ,, "])
}

proptest! {
	#[test]
	fn reassembly_normalizes_separators(
		mnemonic in "[a-z]{1,6}",
		operands in prop::collection::vec(("\\$?[a-z0-9]{1,6}", separator()), 1..6),
	) {
		let statement: String = operands
			.iter()
			.fold(mnemonic.clone(), |statement, (operand, separator)| {
				format!("{}{}{}", statement, separator, operand)
			});
		let expected = format!(
			"{} {}",
			mnemonic,
			operands.iter().map(|(operand, _)| operand.as_str()).collect::<Vec<_>>().join(", ")
		);

		prop_assert_eq!(reassemble(&tokenize(&statement)), expected);
	}

	#[test]
	fn tokens_alternate_content_and_separators(statement in "[a-z0-9$(),+ -]{0,40}") {
		let tokens = tokenize(&statement);
		prop_assert_eq!(tokens.len() % 2, 1);

		for (index, token) in tokens.iter().enumerate() {
			if index % 2 == 1 {
				prop_assert!(["", "(", ")", "+"].contains(&token.as_str()), "separator {:?}", token);
			} else {
				prop_assert!(!token.contains(&[',', ' ', '(', ')', '+'][..]), "fragment {:?}", token);
			}
		}
	}

	#[test]
	fn classification_never_claims_grouping_tokens(statement in "[a-z0-9$(),+ -]{0,40}") {
		let tokens = tokenize(&statement);
		for index in 0..tokens.len() {
			if classify(&tokens, index).is_some() {
				prop_assert!(!tokens[index].is_empty());
				prop_assert!(index == 0 || tokens[index - 1] != "+");
			}
		}
	}

	#[test]
	fn macros_resolve_against_a_full_map(token in "[A-Z]{2,4}[0-9]?(P[0-9])?U?") {
		let map = OperandMap::from_slots((0..10).map(Some).collect());
		let translation = translate_token(&token, &map).unwrap().apply(token.clone());
		prop_assert!(translation == token || translation.starts_with('{'), "{:?} -> {:?}", token, translation);
	}
}
