//! The snippet syntax tree.
//!
//! A parsed [`Snippet`] is an immutable tree of [`Node`]s.
//! Every node owns its children; there is no sharing and there are no back-references.
//!
//! The tree is produced in a single pass by [`Snippet::parse()`]
//! and can be rendered to its default text with [`Snippet::render()`].

mod display;
mod parse;
mod render;
mod scan;

pub use render::Expand;

/// The maximum nesting depth of placeholders and variables with default values.
///
/// Deeper constructs are not recognized and are parsed as literal text instead.
/// This bounds the recursion depth of the parser on adversarial input.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The kind of a node in the syntax tree.
///
/// Downstream consumers (an interactive tabstop UI, for example)
/// can use this tag to discriminate nodes without matching on the full enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// The root of the tree: [`Snippet`].
	Snippet,

	/// A [`Tabstop`].
	Tabstop,

	/// A [`Placeholder`].
	Placeholder,

	/// A [`Choice`].
	Choice,

	/// A [`Variable`].
	Variable,

	/// A [`Transform`].
	Transform,

	/// A [`Format`].
	Format,

	/// A [`Text`].
	Text,
}

impl NodeKind {
	/// Get the name of the node kind as a lowercase string.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Snippet => "snippet",
			Self::Tabstop => "tabstop",
			Self::Placeholder => "placeholder",
			Self::Choice => "choice",
			Self::Variable => "variable",
			Self::Transform => "transform",
			Self::Format => "format",
			Self::Text => "text",
		}
	}
}

impl std::fmt::Display for NodeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A parsed snippet body.
///
/// The snippet is the root of the syntax tree.
/// It holds an ordered, possibly empty, sequence of child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
	/// The top-level nodes of the snippet.
	pub children: Vec<Node>,
}

impl Snippet {
	/// Create a snippet from a list of child nodes.
	pub fn new(children: Vec<Node>) -> Self {
		Self { children }
	}

	/// Get the kind tag of the snippet, which is always [`NodeKind::Snippet`].
	pub fn kind(&self) -> NodeKind {
		NodeKind::Snippet
	}

	/// Get the top-level nodes of the snippet.
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Check if the snippet has no nodes at all.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}
}

/// A node that can appear in the body of a snippet, placeholder or variable default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Node {
	/// A tabstop: `$1`, `${1}` or `${1/regex/format/options}`.
	Tabstop(Tabstop),

	/// A placeholder with a default value: `${1:default}`.
	Placeholder(Placeholder),

	/// A choice between literal values: `${1|one,two,three|}`.
	Choice(Choice),

	/// A variable: `$NAME`, `${NAME}`, `${NAME:default}` or `${NAME/regex/format/options}`.
	Variable(Variable),

	/// Literal text.
	Text(Text),
}

impl Node {
	/// Get the kind tag of the node.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Tabstop(_) => NodeKind::Tabstop,
			Self::Placeholder(_) => NodeKind::Placeholder,
			Self::Choice(_) => NodeKind::Choice,
			Self::Variable(_) => NodeKind::Variable,
			Self::Text(_) => NodeKind::Text,
		}
	}

	/// Get the tabstop index of the node.
	///
	/// Returns `None` for variables and text, which do not have an index.
	pub fn index(&self) -> Option<u32> {
		match self {
			Self::Tabstop(x) => Some(x.index),
			Self::Placeholder(x) => Some(x.index),
			Self::Choice(x) => Some(x.index),
			Self::Variable(_) | Self::Text(_) => None,
		}
	}

	/// Get the node as a tabstop, if it is one.
	pub fn as_tabstop(&self) -> Option<&Tabstop> {
		match self {
			Self::Tabstop(x) => Some(x),
			_ => None,
		}
	}

	/// Get the node as a placeholder, if it is one.
	pub fn as_placeholder(&self) -> Option<&Placeholder> {
		match self {
			Self::Placeholder(x) => Some(x),
			_ => None,
		}
	}

	/// Get the node as a choice, if it is one.
	pub fn as_choice(&self) -> Option<&Choice> {
		match self {
			Self::Choice(x) => Some(x),
			_ => None,
		}
	}

	/// Get the node as a variable, if it is one.
	pub fn as_variable(&self) -> Option<&Variable> {
		match self {
			Self::Variable(x) => Some(x),
			_ => None,
		}
	}

	/// Get the node as literal text, if it is text.
	pub fn as_text(&self) -> Option<&Text> {
		match self {
			Self::Text(x) => Some(x),
			_ => None,
		}
	}
}

/// A tabstop: a zero-width cursor position with an index.
///
/// The same index may appear multiple times in one snippet.
/// Each occurrence is a separate node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tabstop {
	/// The tabstop index.
	pub index: u32,

	/// Optional transformation applied to the text typed at the tabstop.
	///
	/// Only the braced form `${1/regex/format/}` can carry a transform.
	pub transform: Option<Transform>,
}

impl Tabstop {
	/// Create a tabstop without a transform.
	pub fn new(index: u32) -> Self {
		Self { index, transform: None }
	}

	/// Create a tabstop with a transform.
	pub fn with_transform(index: u32, transform: Transform) -> Self {
		Self { index, transform: Some(transform) }
	}

	/// Get the kind tag of the tabstop.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Tabstop
	}
}

/// A placeholder: a tabstop with a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
	/// The tabstop index.
	pub index: u32,

	/// The nodes making up the default value.
	///
	/// An empty list means the default value is empty.
	pub children: Vec<Node>,
}

impl Placeholder {
	/// Create a placeholder with the given default value.
	pub fn new(index: u32, children: Vec<Node>) -> Self {
		Self { index, children }
	}

	/// Get the kind tag of the placeholder.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Placeholder
	}
}

/// A choice: a tabstop offering a fixed list of literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
	/// The tabstop index.
	pub index: u32,

	/// The values to choose from.
	///
	/// The parser always produces at least one item.
	/// The first item is the default selection.
	pub items: Vec<String>,
}

impl Choice {
	/// Create a choice from a list of items.
	pub fn new<I, S>(index: u32, items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			index,
			items: items.into_iter().map(Into::into).collect(),
		}
	}

	/// Get the kind tag of the choice.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Choice
	}

	/// Get the default selection: the first item.
	pub fn default_item(&self) -> Option<&str> {
		self.items.first().map(String::as_str)
	}
}

/// A variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
	/// The name of the variable.
	pub name: String,

	/// The default value or transform of the variable, if any.
	pub body: Option<VariableBody>,
}

/// The optional part of a braced variable after its name.
///
/// A variable can have a default value or a transform, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VariableBody {
	/// A default value: `${NAME:default}`.
	Default(Vec<Node>),

	/// A transform: `${NAME/regex/format/options}`.
	Transform(Transform),
}

impl Variable {
	/// Create a variable without a default value or transform.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			body: None,
		}
	}

	/// Create a variable with a default value.
	pub fn with_default(name: impl Into<String>, children: Vec<Node>) -> Self {
		Self {
			name: name.into(),
			body: Some(VariableBody::Default(children)),
		}
	}

	/// Create a variable with a transform.
	pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
		Self {
			name: name.into(),
			body: Some(VariableBody::Transform(transform)),
		}
	}

	/// Get the kind tag of the variable.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Variable
	}

	/// Get the default value of the variable, if it has one.
	pub fn default(&self) -> Option<&[Node]> {
		match &self.body {
			Some(VariableBody::Default(children)) => Some(children),
			_ => None,
		}
	}

	/// Get the transform of the variable, if it has one.
	pub fn transform(&self) -> Option<&Transform> {
		match &self.body {
			Some(VariableBody::Transform(transform)) => Some(transform),
			_ => None,
		}
	}
}

/// A regex based transformation: `/regex/format/options`.
///
/// See [`Transform::apply()`] for the semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
	/// The source of the regular expression.
	///
	/// The pattern is only compiled when the transform is applied.
	pub pattern: String,

	/// The replacement, as a sequence of capture references and literal text.
	pub items: Vec<FormatItem>,

	/// The option letters, such as `g` for global replacement.
	///
	/// Empty if no options were given.
	pub options: String,
}

impl Transform {
	/// Create a new transform.
	pub fn new(pattern: impl Into<String>, items: Vec<FormatItem>, options: impl Into<String>) -> Self {
		Self {
			pattern: pattern.into(),
			items,
			options: options.into(),
		}
	}

	/// Get the kind tag of the transform.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Transform
	}
}

/// One segment of the replacement section of a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum FormatItem {
	/// A reference to a capture group.
	Format(Format),

	/// Literal text, copied verbatim.
	Text(Text),
}

impl FormatItem {
	/// Get the kind tag of the segment.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Format(_) => NodeKind::Format,
			Self::Text(_) => NodeKind::Text,
		}
	}
}

/// A reference to a capture group inside the replacement of a transform.
///
/// Forms: `$1`, `${1}`, `${1:/upcase}`, `${1:+if}`, `${1:?if:else}` and `${1:-else}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Format {
	/// The index of the capture group, where 0 is the whole match.
	pub capture: u32,

	/// A case modifier applied to the captured text.
	pub modifier: Option<Modifier>,

	/// Text to insert instead of the capture when the capture is non-empty.
	pub if_text: Option<String>,

	/// Text to insert instead of the capture when the capture is empty or did not participate.
	pub else_text: Option<String>,
}

impl Format {
	/// Create a plain capture reference.
	pub fn new(capture: u32) -> Self {
		Self {
			capture,
			..Self::default()
		}
	}

	/// Create a capture reference with a case modifier.
	pub fn with_modifier(capture: u32, modifier: Modifier) -> Self {
		Self {
			capture,
			modifier: Some(modifier),
			..Self::default()
		}
	}

	/// Create a conditional capture reference.
	pub fn conditional(capture: u32, if_text: Option<String>, else_text: Option<String>) -> Self {
		Self {
			capture,
			modifier: None,
			if_text,
			else_text,
		}
	}

	/// Get the kind tag of the format.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Format
	}
}

/// A case modifier for a capture reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Modifier {
	/// Convert all characters to uppercase.
	Upcase,

	/// Convert all characters to lowercase.
	Downcase,

	/// Convert the first character to uppercase.
	Capitalize,

	/// Convert to `camelCase`.
	Camelcase,

	/// Convert to `PascalCase`.
	Pascalcase,
}

impl Modifier {
	/// Look up a modifier by its keyword.
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		match keyword {
			"upcase" => Some(Self::Upcase),
			"downcase" => Some(Self::Downcase),
			"capitalize" => Some(Self::Capitalize),
			"camelcase" => Some(Self::Camelcase),
			"pascalcase" => Some(Self::Pascalcase),
			_ => None,
		}
	}

	/// Get the keyword of the modifier.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Upcase => "upcase",
			Self::Downcase => "downcase",
			Self::Capitalize => "capitalize",
			Self::Camelcase => "camelcase",
			Self::Pascalcase => "pascalcase",
		}
	}
}

/// Literal text.
///
/// The text is stored after escape processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
	/// The literal text.
	pub text: String,
}

impl Text {
	/// Create a new text node.
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into() }
	}

	/// Get the kind tag of the text.
	pub fn kind(&self) -> NodeKind {
		NodeKind::Text
	}
}

impl From<Tabstop> for Node {
	#[inline]
	fn from(other: Tabstop) -> Self {
		Self::Tabstop(other)
	}
}

impl From<Placeholder> for Node {
	#[inline]
	fn from(other: Placeholder) -> Self {
		Self::Placeholder(other)
	}
}

impl From<Choice> for Node {
	#[inline]
	fn from(other: Choice) -> Self {
		Self::Choice(other)
	}
}

impl From<Variable> for Node {
	#[inline]
	fn from(other: Variable) -> Self {
		Self::Variable(other)
	}
}

impl From<Text> for Node {
	#[inline]
	fn from(other: Text) -> Self {
		Self::Text(other)
	}
}

impl From<Format> for FormatItem {
	#[inline]
	fn from(other: Format) -> Self {
		Self::Format(other)
	}
}

impl From<Text> for FormatItem {
	#[inline]
	fn from(other: Text) -> Self {
		Self::Text(other)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, check};

	#[test]
	fn node_kind_tags() {
		check!(Snippet::default().kind() == NodeKind::Snippet);
		check!(Node::from(Tabstop::new(1)).kind() == NodeKind::Tabstop);
		check!(Node::from(Placeholder::new(1, vec![])).kind() == NodeKind::Placeholder);
		check!(Node::from(Choice::new(1, ["a"])).kind() == NodeKind::Choice);
		check!(Node::from(Variable::new("FOO")).kind() == NodeKind::Variable);
		check!(Node::from(Text::new("foo")).kind() == NodeKind::Text);
		check!(FormatItem::from(Format::new(1)).kind() == NodeKind::Format);
		check!(Transform::new("a", vec![], "").kind() == NodeKind::Transform);
		check!(NodeKind::Placeholder.to_string() == "placeholder");
	}

	#[test]
	fn per_kind_accessors() {
		let node = Node::from(Choice::new(3, ["a", "b"]));
		check!(node.index() == Some(3));
		check!(node.as_tabstop().is_none());
		check!(node.as_choice().and_then(Choice::default_item) == Some("a"));

		let node = Node::from(Variable::with_default("FOO", vec![Text::new("x").into()]));
		check!(node.index() == None);
		let variable = node.as_variable().unwrap();
		assert!(variable.transform().is_none());
		assert!(variable.default() == Some(&[Node::Text(Text::new("x"))][..]));
	}

	#[test]
	fn modifier_keywords() {
		for modifier in [Modifier::Upcase, Modifier::Downcase, Modifier::Capitalize, Modifier::Camelcase, Modifier::Pascalcase] {
			check!(Modifier::from_keyword(modifier.keyword()) == Some(modifier));
		}
		check!(Modifier::from_keyword("shout") == None);
	}
}
