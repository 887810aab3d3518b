//! A [`Snippet`] is serialized as its snippet source, and deserialized by parsing a string.
//!
//! The individual nodes derive their implementations and serialize as a tagged tree.

use serde::{
	de::{Error, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::Snippet;

struct SnippetVisitor;

impl<'de> Visitor<'de> for SnippetVisitor {
	type Value = Snippet;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a snippet string")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Snippet::parse(v))
	}

	fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
	where
		E: Error,
	{
		let source = std::str::from_utf8(v).map_err(E::custom)?;
		self.visit_str(source)
	}
}

impl Serialize for Snippet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Snippet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(SnippetVisitor)
	}
}

#[cfg(test)]
mod test {
	use serde_test::{assert_de_tokens, assert_ser_tokens, assert_tokens, Token};

	use crate::{Node, Snippet, Tabstop, Text};

	#[test]
	fn snippet_ser_de() {
		let snippet = Snippet::parse("fn ${1:name}() {${0}}");
		assert_tokens(&snippet, &[Token::Str("fn ${1:name}() {${0}}")]);
	}

	#[test]
	fn snippet_serializes_canonical_source() {
		let snippet = Snippet::parse("$1 and $TM_FILENAME");
		assert_ser_tokens(&snippet, &[Token::Str("${1} and ${TM_FILENAME}")]);
	}

	#[test]
	fn snippet_deserializes_from_owned_and_borrowed_strings() {
		let expected = Snippet::new(vec![Text::new("a").into(), Tabstop::new(1).into()]);
		assert_de_tokens(&expected, &[Token::String("a$1")]);
		assert_de_tokens(&expected, &[Token::BorrowedStr("a$1")]);
		assert_de_tokens(&expected, &[Token::Bytes(b"a$1")]);
	}

	#[test]
	fn node_ser_de() {
		let node = Node::from(Tabstop::new(3));
		assert_tokens(&node, &[
			Token::Struct { name: "Tabstop", len: 3 },
			Token::Str("type"),
			Token::Str("tabstop"),
			Token::Str("index"),
			Token::U32(3),
			Token::Str("transform"),
			Token::None,
			Token::StructEnd,
		]);
	}
}
