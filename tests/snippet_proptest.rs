//! Property-based tests for parsing and rendering snippets.
//!
//! Inputs are drawn from arbitrary text and from an alphabet dense in snippet syntax,
//! so that most generated strings contain (possibly malformed) constructs.

use lsp_snippet::{parse, render, Snippet};
use proptest::prelude::*;

/// Strings built mostly from characters that are significant in snippet syntax.
fn snippet_like_strategy() -> impl Strategy<Value = String> {
	prop::collection::vec(
		prop_oneof![
			Just("$"),
			Just("${"),
			Just("}"),
			Just("\\"),
			Just(":"),
			Just("|"),
			Just(","),
			Just("/"),
			Just("1"),
			Just("23"),
			Just("X"),
			Just("TM_FILENAME"),
			Just("?"),
			Just("+"),
			Just("-"),
			Just("upcase"),
			Just("(.*)"),
			Just("g"),
			Just(" "),
			Just("ä"),
		],
		0..40,
	)
	.prop_map(|parts| parts.concat())
}

proptest! {
	#[test]
	fn pure_text_renders_as_itself(source in "[^$\\\\{}|,]*") {
		prop_assert_eq!(render(&parse(&source)), source);
	}

	#[test]
	fn arbitrary_input_parses(source in "\\PC*") {
		let snippet = parse(&source);
		let _ = render(&snippet);
	}

	#[test]
	fn snippet_like_input_parses_deterministically(source in snippet_like_strategy()) {
		let snippet = parse(&source);
		prop_assert_eq!(&snippet, &parse(&source));
		prop_assert_eq!(render(&snippet), render(&snippet));
	}

	#[test]
	fn canonical_source_parses_to_same_tree(source in snippet_like_strategy()) {
		let snippet = Snippet::parse(&source);
		let written = snippet.to_string();
		prop_assert_eq!(Snippet::parse(&written), snippet);
	}

	#[test]
	fn escaped_text_is_literal(text in "\\PC*") {
		let escaped: String = text
			.chars()
			.flat_map(|c| match c {
				'$' | '\\' | '}' => vec!['\\', c],
				c => vec![c],
			})
			.collect();
		prop_assert_eq!(render(&parse(&escaped)), text);
	}
}
