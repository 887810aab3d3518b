use super::{Choice, Node, Placeholder, Snippet, Tabstop, Text, Variable, VariableBody};
use crate::map::{NoVariables, VariableMap};

/// Common `expand` prototype for snippets and nodes.
///
/// Expansion appends the default text of the node to the output.
/// Variable values are looked up in the variable map; missing variables have an empty value.
pub trait Expand {
	/// Expand into the output string.
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>;
}

impl Snippet {
	/// Render the snippet to the text it inserts when no tabstop is ever visited.
	///
	/// Tabstops render as nothing, placeholders as their default value and choices as their first item.
	/// Variables are not resolved: they render as their default value, or as their transform applied to an empty string.
	pub fn render(&self) -> String {
		self.render_with(&NoVariables)
	}

	/// Render the snippet, taking variable values from the given map.
	///
	/// A variable with a transform renders as the transform applied to its value.
	/// A variable with an empty or missing value renders as its default value, if it has one.
	pub fn render_with<'a, M>(&self, variables: &'a M) -> String
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		let mut output = String::new();
		self.expand(&mut output, variables);
		output
	}
}

impl Expand for Snippet {
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		self.children.expand(output, variables)
	}
}

impl Expand for [Node] {
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		for node in self {
			node.expand(output, variables);
		}
	}
}

impl Expand for Node {
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		match self {
			Self::Tabstop(x) => x.expand(output, variables),
			Self::Placeholder(x) => x.expand(output, variables),
			Self::Choice(x) => x.expand(output, variables),
			Self::Variable(x) => x.expand(output, variables),
			Self::Text(x) => x.expand(output, variables),
		}
	}
}

impl Expand for Tabstop {
	/// Tabstops have no text of their own, even with a transform.
	fn expand<'a, M>(&self, _output: &mut String, _variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
	}
}

impl Expand for Placeholder {
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		self.children.expand(output, variables)
	}
}

impl Expand for Choice {
	fn expand<'a, M>(&self, output: &mut String, _variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		if let Some(item) = self.default_item() {
			output.push_str(item);
		}
	}
}

impl Expand for Variable {
	fn expand<'a, M>(&self, output: &mut String, variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		let value = variables.get(&self.name);
		let value = value.as_ref().map_or("", |value| value.as_ref());

		match &self.body {
			Some(VariableBody::Transform(transform)) => output.push_str(&transform.apply(value)),
			Some(VariableBody::Default(children)) if value.is_empty() => children.expand(output, variables),
			_ => output.push_str(value),
		}
	}
}

impl Expand for Text {
	fn expand<'a, M>(&self, output: &mut String, _variables: &'a M)
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		output.push_str(&self.text)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::BTreeMap;

	use super::*;
	use assert2::check;

	#[test]
	fn render_defaults() {
		check!(Snippet::parse("foo").render() == "foo");
		check!(Snippet::parse("$1 foo").render() == " foo");
		check!(Snippet::parse("${1:foo} bar").render() == "foo bar");
		check!(Snippet::parse("${1|foo,bar|} baz").render() == "foo baz");
		check!(Snippet::parse("${TM_FILENAME} baz").render() == " baz");
		check!(Snippet::parse("${TM_FILENAME/[.]/_/} foo").render() == " foo");
		check!(Snippet::parse("${TM_FILENAME/(.*)/${1:/upcase}/} foo").render() == " foo");
	}

	#[test]
	fn render_nested_defaults() {
		check!(Snippet::parse("fn ${1:name}(${2:arg: ${3:u32}}) {$0}").render() == "fn name(arg: u32) {}");
		check!(Snippet::parse("${FOO:${1:default}}").render() == "default");
		check!(Snippet::parse("${1/(.*)/[$1]/}").render() == "");
	}

	#[test]
	fn render_with_variables() {
		let mut variables = BTreeMap::new();
		variables.insert("TM_FILENAME", "main.rs");
		variables.insert("EMPTY", "");

		check!(Snippet::parse("${TM_FILENAME} baz").render_with(&variables) == "main.rs baz");
		check!(Snippet::parse("$TM_FILENAME").render_with(&variables) == "main.rs");
		check!(Snippet::parse("${TM_FILENAME:fallback}").render_with(&variables) == "main.rs");
		check!(Snippet::parse("${EMPTY:fallback}").render_with(&variables) == "fallback");
		check!(Snippet::parse("${MISSING:fall$TM_FILENAME}").render_with(&variables) == "fallmain.rs");
		check!(Snippet::parse("${TM_FILENAME/[.]/_/} foo").render_with(&variables) == "main_rs foo");
		check!(Snippet::parse("${TM_FILENAME/(.*)/${1:/upcase}/}").render_with(&variables) == "MAIN.RS");
		check!(Snippet::parse("${1:$TM_FILENAME}").render_with(&variables) == "main.rs");
	}

	#[test]
	fn tabstop_transform_renders_nothing() {
		let mut variables = BTreeMap::new();
		variables.insert("1", "value");
		check!(Snippet::parse("${1/(.*)/$1/}").render_with(&variables) == "");
	}

	#[test]
	fn render_is_repeatable() {
		let snippet = Snippet::parse("a ${1:b} ${2|c,d|} $X ${Y/(.*)/${1:?yes:no}/}");
		let first = snippet.render();
		check!(first == "a b c  no");
		check!(snippet.render() == first);
	}
}
