use super::scan::{self, Stops};
use super::{Choice, Format, FormatItem, Modifier, Node, Placeholder, Snippet, Tabstop, Text, Transform, Variable};
use super::MAX_NESTING_DEPTH;

/// The result of a grammar rule: the parsed value and the position after it, or `None` if the rule did not match.
type Parsed<T> = Option<(T, usize)>;

/// The result of a rule for a construct with a default value.
enum Nested<T> {
	/// The construct is complete and ends at the given position.
	Closed(T, usize),

	/// The default value runs to the end of the input without a closing brace.
	///
	/// The opening of the construct (up to `body_start`) is literal text,
	/// and `children` are the nodes parsed after it.
	/// The result is the same as backtracking to the text rule.
	Unterminated {
		body_start: usize,
		children: Vec<Node>,
	},
}

impl<T> Nested<T> {
	fn map<U>(self, func: impl FnOnce(T) -> U) -> Nested<U> {
		match self {
			Self::Closed(value, end) => Nested::Closed(func(value), end),
			Self::Unterminated { body_start, children } => Nested::Unterminated { body_start, children },
		}
	}
}

impl Snippet {
	/// Parse a snippet body.
	///
	/// Parsing never fails.
	/// Fragments that do not form a valid tabstop, placeholder, choice or variable
	/// (for example an unterminated `${1:` or a stray `$`) are kept as literal text.
	///
	/// Parsing is deterministic: the same input always gives the same tree.
	pub fn parse(source: &str) -> Self {
		Parser { source }.snippet()
	}
}

/// Backtracking recursive descent parser.
///
/// The rules do not share a cursor: each rule gets a start position
/// and returns the position after the matched input, or `None` without any other effect.
struct Parser<'a> {
	source: &'a str,
}

impl Parser<'_> {
	/// `Snippet := (Tabstop | Placeholder | Choice | Variable | Text)*`
	fn snippet(&self) -> Snippet {
		let mut children = Vec::new();
		let mut finger = 0;
		while finger < self.source.len() {
			// At the top level the text rule always consumes at least one character.
			let Some(end) = self.next_node(&mut children, finger, Stops::TOP_LEVEL, 0) else {
				break;
			};
			finger = end;
		}
		Snippet { children }
	}

	/// Parse one node and add it to `nodes`.
	///
	/// Returns the position after the node.
	fn next_node(&self, nodes: &mut Vec<Node>, finger: usize, stops: Stops, depth: usize) -> Option<usize> {
		match self.node(finger, stops, depth)? {
			Nested::Closed(node, end) => {
				push_node(nodes, node);
				Some(end)
			},
			Nested::Unterminated { body_start, children } => {
				push_node(nodes, Text::new(&self.source[finger..body_start]).into());
				for child in children {
					push_node(nodes, child);
				}
				Some(self.source.len())
			},
		}
	}

	/// Try all node rules in priority order.
	///
	/// `depth` is the nesting level of the list the node appears in.
	fn node(&self, finger: usize, stops: Stops, depth: usize) -> Option<Nested<Node>> {
		if scan::byte_at(self.source, finger) == Some(b'$') {
			if let Some((tabstop, end)) = self.tabstop(finger) {
				return Some(Nested::Closed(tabstop.into(), end));
			}
			if let Some(placeholder) = self.placeholder(finger, depth) {
				return Some(placeholder.map(Node::from));
			}
			if let Some((choice, end)) = self.choice(finger) {
				return Some(Nested::Closed(choice.into(), end));
			}
			if let Some(variable) = self.variable(finger, depth) {
				return Some(variable.map(Node::from));
			}
		}
		let (text, end) = self.text(finger, stops)?;
		Some(Nested::Closed(text.into(), end))
	}

	/// `Tabstop := '$' Digits | '${' Digits '}' | '${' Digits Transform '}'`
	fn tabstop(&self, finger: usize) -> Parsed<Tabstop> {
		let finger = scan::expect(self.source, finger, b'$')?;
		if let Some((index, end)) = scan::digits(self.source, finger) {
			return Some((Tabstop::new(index), end));
		}

		let finger = scan::expect(self.source, finger, b'{')?;
		let (index, finger) = scan::digits(self.source, finger)?;
		if let Some(end) = scan::expect(self.source, finger, b'}') {
			return Some((Tabstop::new(index), end));
		}

		let (transform, finger) = self.transform(finger)?;
		let end = scan::expect(self.source, finger, b'}')?;
		Some((Tabstop::with_transform(index, transform), end))
	}

	/// `Placeholder := '${' Digits ':' Body`
	fn placeholder(&self, finger: usize, depth: usize) -> Option<Nested<Placeholder>> {
		let finger = scan::expect(self.source, finger, b'$')?;
		let finger = scan::expect(self.source, finger, b'{')?;
		let (index, finger) = scan::digits(self.source, finger)?;
		let finger = scan::expect(self.source, finger, b':')?;
		let body = self.body(finger, depth + 1)?;
		Some(body.map(|children| Placeholder::new(index, children)))
	}

	/// `Choice := '${' Digits '|' ChoiceItem (',' ChoiceItem)* '|}'`
	fn choice(&self, finger: usize) -> Parsed<Choice> {
		let finger = scan::expect(self.source, finger, b'$')?;
		let finger = scan::expect(self.source, finger, b'{')?;
		let (index, finger) = scan::digits(self.source, finger)?;
		let mut finger = scan::expect(self.source, finger, b'|')?;

		let mut items = Vec::new();
		loop {
			let (item, end) = scan::literal_run(self.source, finger, Stops::CHOICE_ITEM);
			items.push(item);
			match scan::byte_at(self.source, end)? {
				b',' => finger = end + 1,
				_ => {
					// The run only stops at `,`, `|` or the end of input.
					let end = scan::expect(self.source, end + 1, b'}')?;
					return Some((Choice { index, items }, end));
				},
			}
		}
	}

	/// `Variable := '$' Name | '${' Name '}' | '${' Name ':' Body | '${' Name Transform '}'`
	fn variable(&self, finger: usize, depth: usize) -> Option<Nested<Variable>> {
		let finger = scan::expect(self.source, finger, b'$')?;
		if let Some((name, end)) = scan::name(self.source, finger) {
			return Some(Nested::Closed(Variable::new(name), end));
		}

		let finger = scan::expect(self.source, finger, b'{')?;
		let (name, finger) = scan::name(self.source, finger)?;
		match scan::byte_at(self.source, finger)? {
			b'}' => Some(Nested::Closed(Variable::new(name), finger + 1)),
			b':' => {
				let body = self.body(finger + 1, depth + 1)?;
				Some(body.map(|children| Variable::with_default(name, children)))
			},
			b'/' => {
				let (transform, finger) = self.transform(finger)?;
				let end = scan::expect(self.source, finger, b'}')?;
				Some(Nested::Closed(Variable::with_transform(name, transform), end))
			},
			_ => None,
		}
	}

	/// Parse a default value up to and including the closing brace.
	///
	/// `Body := (Tabstop | Placeholder | Choice | Variable | Text)* '}'`
	///
	/// Fails if `depth` exceeds [`MAX_NESTING_DEPTH`].
	fn body(&self, start: usize, depth: usize) -> Option<Nested<Vec<Node>>> {
		if depth > MAX_NESTING_DEPTH {
			return None;
		}

		let mut children = Vec::new();
		let mut finger = start;
		while finger < self.source.len() {
			if scan::byte_at(self.source, finger) == Some(b'}') {
				return Some(Nested::Closed(children, finger + 1));
			}
			finger = self.next_node(&mut children, finger, Stops::NESTED, depth)?;
		}
		Some(Nested::Unterminated {
			body_start: start,
			children,
		})
	}

	/// `Transform := '/' Pattern '/' (Format | TransformText)* '/' Options`
	///
	/// The closing brace is left to the caller.
	fn transform(&self, finger: usize) -> Parsed<Transform> {
		let finger = scan::expect(self.source, finger, b'/')?;
		let (pattern, finger) = scan::pattern_run(self.source, finger)?;

		let mut items = Vec::new();
		let mut finger = finger + 1;
		loop {
			match scan::byte_at(self.source, finger)? {
				b'/' => break,
				b'$' => {
					if let Some((format, end)) = self.format(finger) {
						items.push(FormatItem::Format(format));
						finger = end;
					} else {
						// A `$` that does not start a format is taken literally.
						let (text, end) = scan::literal_run(self.source, finger + 1, Stops::TRANSFORM_TEXT);
						push_format_text(&mut items, "$");
						push_format_text(&mut items, &text);
						finger = end;
					}
				},
				_ => {
					let (text, end) = scan::literal_run(self.source, finger, Stops::TRANSFORM_TEXT);
					push_format_text(&mut items, &text);
					finger = end;
				},
			}
		}

		let (options, end) = scan::letters(self.source, finger + 1);
		Some((Transform::new(pattern, items, options), end))
	}

	/// `Format := '$' Digits | '${' Digits '}' | '${' Digits ':' FormatBody '}'`
	fn format(&self, finger: usize) -> Parsed<Format> {
		let finger = scan::expect(self.source, finger, b'$')?;
		if let Some((capture, end)) = scan::digits(self.source, finger) {
			return Some((Format::new(capture), end));
		}

		let finger = scan::expect(self.source, finger, b'{')?;
		let (capture, finger) = scan::digits(self.source, finger)?;
		match scan::byte_at(self.source, finger)? {
			b'}' => Some((Format::new(capture), finger + 1)),
			b':' => self.format_body(capture, finger + 1),
			_ => None,
		}
	}

	/// Parse the part of a format after the colon, up to and including the closing brace.
	fn format_body(&self, capture: u32, finger: usize) -> Parsed<Format> {
		match scan::byte_at(self.source, finger)? {
			b'/' => {
				let (keyword, end) = scan::letters(self.source, finger + 1);
				let modifier = Modifier::from_keyword(keyword)?;
				let end = scan::expect(self.source, end, b'}')?;
				Some((Format::with_modifier(capture, modifier), end))
			},
			b'+' => {
				let (if_text, end) = scan::literal_run(self.source, finger + 1, Stops::CONDITIONAL_TEXT);
				let end = scan::expect(self.source, end, b'}')?;
				Some((Format::conditional(capture, Some(if_text), None), end))
			},
			b'?' => {
				let (if_text, end) = scan::literal_run(self.source, finger + 1, Stops::IF_TEXT);
				let end = scan::expect(self.source, end, b':')?;
				let (else_text, end) = scan::literal_run(self.source, end, Stops::CONDITIONAL_TEXT);
				let end = scan::expect(self.source, end, b'}')?;
				Some((Format::conditional(capture, Some(if_text), Some(else_text)), end))
			},
			b'-' => {
				let (else_text, end) = scan::literal_run(self.source, finger + 1, Stops::CONDITIONAL_TEXT);
				let end = scan::expect(self.source, end, b'}')?;
				Some((Format::conditional(capture, None, Some(else_text)), end))
			},
			_ => {
				// A bare modifier keyword, or else text without the leading `-`.
				let (keyword, end) = scan::letters(self.source, finger);
				if let Some(modifier) = Modifier::from_keyword(keyword) {
					if let Some(end) = scan::expect(self.source, end, b'}') {
						return Some((Format::with_modifier(capture, modifier), end));
					}
				}
				let (else_text, end) = scan::literal_run(self.source, finger, Stops::CONDITIONAL_TEXT);
				let end = scan::expect(self.source, end, b'}')?;
				Some((Format::conditional(capture, None, Some(else_text)), end))
			},
		}
	}

	/// `Text := (escaped-char | any-char-not-currently-significant)+`
	///
	/// This is the fallback rule, only tried after all other rules failed.
	/// A `$` at the start can not begin a valid construct at this point, so it is taken literally.
	fn text(&self, finger: usize, stops: Stops) -> Parsed<Text> {
		let mut text = String::new();
		let mut start = finger;
		if scan::byte_at(self.source, finger) == Some(b'$') {
			text.push('$');
			start += 1;
		}
		let (run, end) = scan::literal_run(self.source, start, stops);
		text.push_str(&run);
		(end > finger).then(|| (Text { text }, end))
	}
}

/// Add a node to a list, merging adjacent text.
fn push_node(nodes: &mut Vec<Node>, node: Node) {
	if let Node::Text(text) = &node {
		if let Some(Node::Text(last)) = nodes.last_mut() {
			last.text.push_str(&text.text);
			return;
		}
	}
	nodes.push(node);
}

/// Add literal text to the replacement of a transform, merging adjacent text.
fn push_format_text(items: &mut Vec<FormatItem>, text: &str) {
	if text.is_empty() {
		return;
	}
	if let Some(FormatItem::Text(last)) = items.last_mut() {
		last.text.push_str(text);
	} else {
		items.push(FormatItem::Text(Text::new(text)));
	}
}
