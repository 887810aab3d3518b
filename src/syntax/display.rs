//! Writing syntax trees back out as snippet source.
//!
//! The output always uses the braced forms (`${1}`, `${NAME}`),
//! so a node can never merge with the text that follows it.
//! Parsing the output gives back the same tree.

use std::fmt::{self, Display, Write};

use super::{Choice, Format, FormatItem, Node, Placeholder, Snippet, Tabstop, Text, Transform, Variable, VariableBody};

/// Text with a backslash inserted before backslashes and a set of special characters.
struct Escaped<'a> {
	text: &'a str,
	special: &'static [char],
}

impl Display for Escaped<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in self.text.chars() {
			if c == '\\' || self.special.contains(&c) {
				f.write_char('\\')?;
			}
			f.write_char(c)?;
		}
		Ok(())
	}
}

fn escaped<'a>(text: &'a str, special: &'static [char]) -> Escaped<'a> {
	Escaped { text, special }
}

/// A regex pattern with unescaped forward slashes escaped.
///
/// Other escape sequences are already part of the pattern and are written verbatim.
struct Pattern<'a>(&'a str);

impl Display for Pattern<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut chars = self.0.chars();
		while let Some(c) = chars.next() {
			match c {
				'\\' => {
					f.write_char('\\')?;
					if let Some(next) = chars.next() {
						f.write_char(next)?;
					}
				},
				'/' => f.write_str("\\/")?,
				c => f.write_char(c)?,
			}
		}
		Ok(())
	}
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
	nodes.iter().try_for_each(|node| node.fmt(f))
}

impl Display for Snippet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_nodes(f, &self.children)
	}
}

impl Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tabstop(x) => x.fmt(f),
			Self::Placeholder(x) => x.fmt(f),
			Self::Choice(x) => x.fmt(f),
			Self::Variable(x) => x.fmt(f),
			Self::Text(x) => x.fmt(f),
		}
	}
}

impl Display for Tabstop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.transform {
			Some(transform) => write!(f, "${{{}{}}}", self.index, transform),
			None => write!(f, "${{{}}}", self.index),
		}
	}
}

impl Display for Placeholder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "${{{}:", self.index)?;
		write_nodes(f, &self.children)?;
		f.write_char('}')
	}
}

impl Display for Choice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "${{{}|", self.index)?;
		for (i, item) in self.items.iter().enumerate() {
			if i > 0 {
				f.write_char(',')?;
			}
			write!(f, "{}", escaped(item, &[',', '|']))?;
		}
		f.write_str("|}")
	}
}

impl Display for Variable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.body {
			None => write!(f, "${{{}}}", self.name),
			Some(VariableBody::Default(children)) => {
				write!(f, "${{{}:", self.name)?;
				write_nodes(f, children)?;
				f.write_char('}')
			},
			Some(VariableBody::Transform(transform)) => write!(f, "${{{}{}}}", self.name, transform),
		}
	}
}

impl Display for Transform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "/{}/", Pattern(&self.pattern))?;
		for item in &self.items {
			match item {
				FormatItem::Format(format) => format.fmt(f)?,
				FormatItem::Text(text) => write!(f, "{}", escaped(&text.text, &['$', '/']))?,
			}
		}
		write!(f, "/{}", self.options)
	}
}

impl Display for Format {
	/// A format with both a modifier and conditional text is written in its conditional form.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		const SPECIAL: &[char] = &[':', '}', '/'];
		match (&self.if_text, &self.else_text, self.modifier) {
			(Some(if_text), Some(else_text), _) => {
				write!(f, "${{{}:?{}:{}}}", self.capture, escaped(if_text, SPECIAL), escaped(else_text, SPECIAL))
			},
			(Some(if_text), None, _) => write!(f, "${{{}:+{}}}", self.capture, escaped(if_text, SPECIAL)),
			(None, Some(else_text), _) => write!(f, "${{{}:-{}}}", self.capture, escaped(else_text, SPECIAL)),
			(None, None, Some(modifier)) => write!(f, "${{{}:/{}}}", self.capture, modifier.keyword()),
			(None, None, None) => write!(f, "${{{}}}", self.capture),
		}
	}
}

impl Display for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", escaped(&self.text, &['$', '}']))
	}
}
