//! Parser and default-value renderer for LSP / TextMate snippet bodies.
//!
//! Snippets are the templates an editor inserts for completions, like `for ${1:i} in ${2:iter} {$0}`.
//! This crate parses a snippet body into a syntax tree and renders the text the snippet would insert
//! if the user never visited any tabstop.
//!
//! # Features
//!
//! * Tabstops: `$1` or `${1}`.
//! * Placeholders with (nested) default values: `${1:default ${2:nested}}`.
//! * Choices: `${1|one,two,three|}`, rendered as their first item.
//! * Variables: `$TM_FILENAME`, `${TM_FILENAME}` or `${TM_FILENAME:default}`.
//! * Regex transforms: `${TM_FILENAME/(.*)\.rs/${1:/upcase}/}`,
//!   with case modifiers and conditional insertions.
//! * Malformed input is never an error: anything that is not a valid construct is kept as literal text.
//! * Render all string values of a JSON document as snippets (optional, requires the `json` feature).
//!
//! # Examples
//!
//! The [`parse_snippet()`] function parses a snippet and renders its default text in one step.
//!
//! ```
//! assert_eq!(lsp_snippet::parse_snippet("fn ${1:name}(${2:arg: ${3:u32}}) {$0}"), "fn name(arg: u32) {}");
//! assert_eq!(lsp_snippet::parse_snippet("${1|debug,info,warn|}!(\"$2\")"), "debug!(\"\")");
//! ```
//!
//! Variables are not resolved by default: they render as their default value.
//! The values of variables can be provided with any [`VariableMap`],
//! for example a [`HashMap`][std::collections::HashMap] or a [`BTreeMap`][std::collections::BTreeMap].
//!
//! ```
//! # use std::collections::HashMap;
//! let mut variables = HashMap::new();
//! variables.insert("TM_FILENAME", "snippet_parser.rs");
//! assert_eq!(
//!   lsp_snippet::parse_snippet_with("mod ${TM_FILENAME/(\\w+)\\.rs/$1/};", &variables),
//!   "mod snippet_parser;",
//! );
//! assert_eq!(
//!   lsp_snippet::parse_snippet_with("struct ${TM_FILENAME/(\\w+)\\.rs/${1:/pascalcase}/};", &variables),
//!   "struct SnippetParser;",
//! );
//! ```
//!
//! The syntax tree can also be inspected directly.
//!
//! ```
//! use lsp_snippet::{Node, NodeKind, Snippet};
//!
//! let snippet = Snippet::parse("${1:hello} $TM_FILENAME");
//! let kinds: Vec<NodeKind> = snippet.children().iter().map(Node::kind).collect();
//! assert_eq!(kinds, [NodeKind::Placeholder, NodeKind::Text, NodeKind::Variable]);
//! assert_eq!(snippet.to_string(), "${1:hello} ${TM_FILENAME}");
//! ```
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub use error::TransformError;

pub mod map;
pub use map::*;

mod syntax;
pub use syntax::*;

mod transform;
pub use transform::{CompiledTransform, TransformOptions};

mod features;
#[allow(unused_imports)]
pub use features::*;

/// Parse a snippet body into a syntax tree.
///
/// This never fails: malformed constructs are kept as literal text.
/// See [`Snippet::parse()`].
pub fn parse(source: &str) -> Snippet {
	Snippet::parse(source)
}

/// Render the default text of a snippet, without variable values.
///
/// See [`Snippet::render()`].
pub fn render(snippet: &Snippet) -> String {
	snippet.render()
}

/// Parse a snippet body and render its default text.
///
/// Tabstops render as nothing, placeholders as their default value, choices as their first item
/// and variables as their default value (or as their transform applied to an empty string).
pub fn parse_snippet(source: &str) -> String {
	Snippet::parse(source).render()
}

/// Parse a snippet body and render its default text, taking variable values from a map.
///
/// You can pass any [`VariableMap`] as the `variables` parameter,
/// for example a [`HashMap`][std::collections::HashMap] or [`BTreeMap`][std::collections::BTreeMap]
/// with [`&str`] or [`String`] keys.
/// The values must implement [`AsRef<str>`].
pub fn parse_snippet_with<'a, M>(source: &str, variables: &'a M) -> String
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	Snippet::parse(source).render_with(variables)
}
