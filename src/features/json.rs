//! Rendering snippet bodies in JSON data.
//!
//! Snippet collections are commonly stored as JSON, with the snippet bodies as string values.

use serde::de::DeserializeOwned;

use crate::{Snippet, VariableMap};

/// Parse a struct from JSON data, after rendering all string values as snippets.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then replaces every string value with its rendered snippet text,
/// and then parses it further into the desired type.
///
/// Rendering never fails, so the only errors are JSON errors.
pub fn from_slice<'a, T: DeserializeOwned, M>(data: &[u8], variables: &'a M) -> Result<T, serde_json::Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	let mut value: serde_json::Value = serde_json::from_slice(data)?;
	render_string_values(&mut value, variables);
	T::deserialize(value)
}

/// Parse a struct from JSON data, after rendering all string values as snippets.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then replaces every string value with its rendered snippet text,
/// and then parses it further into the desired type.
///
/// Rendering never fails, so the only errors are JSON errors.
pub fn from_str<'a, T: DeserializeOwned, M>(data: &str, variables: &'a M) -> Result<T, serde_json::Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	let mut value: serde_json::Value = serde_json::from_str(data)?;
	render_string_values(&mut value, variables);
	T::deserialize(value)
}

/// Replace all string values of a JSON value with their rendered snippet text.
///
/// Object keys are left alone.
pub fn render_string_values<'a, M>(value: &mut serde_json::Value, variables: &'a M)
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	visit_string_values(value, &mut |value: &mut String| {
		*value = Snippet::parse(value).render_with(variables);
	})
}

/// Recursively apply a function to all string values in a JSON value.
fn visit_string_values<F>(value: &mut serde_json::Value, fun: &mut F)
where
	F: FnMut(&mut String),
{
	match value {
		serde_json::Value::Null => (),
		serde_json::Value::Bool(_) => (),
		serde_json::Value::Number(_) => (),
		serde_json::Value::String(val) => fun(val),
		serde_json::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun);
			}
		},
		serde_json::Value::Object(map) => {
			for value in map.values_mut() {
				visit_string_values(value, fun);
			}
		},
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::HashMap;

	use super::*;
	use assert2::{assert, let_assert};

	#[derive(Debug, serde::Deserialize)]
	struct Definition {
		prefix: String,
		body: Vec<String>,
	}

	#[test]
	fn test_from_str() {
		let mut variables = HashMap::new();
		variables.insert("TM_FILENAME", "main.rs");
		let_assert!(Ok(parsed) = from_str(r#"
			{
				"prefix": "fn",
				"body": ["// $TM_FILENAME", "fn ${1:name}() {", "\t$0", "}"]
			}"#,
			&variables,
		));

		let parsed: Definition = parsed;
		assert!(parsed.prefix == "fn");
		assert!(parsed.body == ["// main.rs", "fn name() {", "\t", "}"]);
	}

	#[test]
	fn test_from_slice_without_variables() {
		let_assert!(Ok(parsed) = from_slice(br#"
			{
				"prefix": "log",
				"body": ["println!(\"${1:value}: {}\", $1);${TM_SELECTED_TEXT:}"]
			}"#,
			&crate::NoVariables,
		));

		let parsed: Definition = parsed;
		assert!(parsed.prefix == "log");
		assert!(parsed.body == ["println!(\"value: {}\", );"]);
	}

	#[test]
	fn test_variable_value_is_not_parsed() {
		let mut variables = HashMap::new();
		variables.insert("TM_SELECTED_TEXT", "${1:not a placeholder}");
		let_assert!(Ok(parsed) = from_str(r#"
			{
				"prefix": "sel",
				"body": ["[$TM_SELECTED_TEXT]"]
			}"#,
			&variables,
		));

		let parsed: Definition = parsed;
		assert!(parsed.body == ["[${1:not a placeholder}]"]);
	}

	#[test]
	fn test_keys_and_non_strings_are_untouched() {
		let mut value = serde_json::json!({
			"$1": ["${1:a}", 1, true, null, { "${2:b}": "${2:b}" }],
		});
		render_string_values(&mut value, &crate::NoVariables);
		assert!(value == serde_json::json!({
			"$1": ["a", 1, true, null, { "${2:b}": "b" }],
		}));
	}

	#[test]
	fn test_invalid_json() {
		let result: Result<Definition, _> = from_str("{ not json", &crate::NoVariables);
		let_assert!(Err(e) = result);
		assert!(e.is_syntax());
	}

	#[test]
	fn test_dyn_variable_map() {
		let mut variables = HashMap::new();
		variables.insert("TM_FILENAME", "lib.rs");
		let variables: &dyn VariableMap<Value = &&str> = &variables;
		let_assert!(Ok(parsed) = from_str(r#"
			{
				"prefix": "mod",
				"body": ["${TM_FILENAME/(\\w+)\\.rs/mod $1;/}"]
			}"#,
			variables,
		));

		let parsed: Definition = parsed;
		assert!(parsed.body == ["mod lib;"]);
	}
}
