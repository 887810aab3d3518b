use super::{is_set, VariableMap};

/// [`VariableMap`] produced by [`fallback()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WithFallback<Base, Fallback> {
	base: Base,
	fallback: Fallback,
}

impl<'a, Value, Base, Fallback> VariableMap<'a> for WithFallback<Base, Fallback>
where
	Base: VariableMap<'a, Value = Value>,
	Fallback: VariableMap<'a, Value = Value>,
	Value: AsRef<str>,
{
	type Value = Value;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		let value = self.base.get(name);
		if is_set(&value) {
			return value;
		}
		self.fallback.get(name).or(value)
	}
}

/// Creates a [`VariableMap`] that looks up variables in `base` first and in `fallback` second.
///
/// An empty value counts as unset, the same way a snippet renders the default of a variable with an empty value.
/// So `fallback` is also consulted when `base` has the variable with an empty value.
///
/// # Example
/// ```rust
/// # use lsp_snippet::{fallback, parse_snippet_with};
///
/// let editor = [("TM_FILENAME", "main.rs"), ("TM_SELECTED_TEXT", "")];
/// let user = [("TM_SELECTED_TEXT", "clipboard"), ("USER_NAME", "ferris")];
/// let variables = fallback(editor, user);
///
/// assert_eq!(parse_snippet_with("$TM_FILENAME by $USER_NAME", &variables), "main.rs by ferris");
/// assert_eq!(parse_snippet_with("[$TM_SELECTED_TEXT]", &variables), "[clipboard]");
/// ```
pub const fn fallback<Base, Fallback>(base: Base, fallback: Fallback) -> WithFallback<Base, Fallback> {
	WithFallback { base, fallback }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::BTreeMap;

	use super::*;
	use assert2::check;

	#[test]
	fn base_takes_precedence() {
		let variables = fallback([("A", "base")], [("A", "fallback"), ("B", "fallback")]);
		check!(variables.get("A") == Some(&"base"));
		check!(variables.get("B") == Some(&"fallback"));
		check!(variables.get("C") == None);
	}

	#[test]
	fn empty_value_is_unset() {
		let variables = fallback([("A", ""), ("B", "")], [("A", "fallback")]);
		check!(variables.get("A") == Some(&"fallback"));
		check!(variables.get("B") == Some(&""));
	}

	#[test]
	fn nested_fallbacks_render() {
		let mut user: BTreeMap<&str, &str> = BTreeMap::new();
		user.insert("AUTHOR", "ferris");
		let editor = [("TM_FILENAME", "lib.rs"), ("AUTHOR", "")];
		let defaults = [("AUTHOR", "anonymous"), ("YEAR", "2024")];
		let variables = fallback(editor, fallback(&user, defaults));
		check!(crate::parse_snippet_with("// $TM_FILENAME: $AUTHOR $YEAR", &variables) == "// lib.rs: ferris 2024");
	}
}
