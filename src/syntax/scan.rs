//! Scanner primitives shared by the grammar rules.
//!
//! Every function here takes the entire source and a start position,
//! and reports the position after the consumed input.
//! None of them have side effects, so a failed attempt can simply be discarded.

/// The characters that end a literal run, in addition to the escape character.
///
/// Which characters are significant depends on where the run appears.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Stops {
	One(u8),
	Two(u8, u8),
	Three(u8, u8, u8),
}

impl Stops {
	/// Stop characters for text at the top level of a snippet.
	pub(crate) const TOP_LEVEL: Self = Self::One(b'$');

	/// Stop characters for text inside the default value of a placeholder or variable.
	pub(crate) const NESTED: Self = Self::Two(b'$', b'}');

	/// Stop characters for the items of a choice.
	pub(crate) const CHOICE_ITEM: Self = Self::Two(b',', b'|');

	/// Stop characters for literal text in the replacement section of a transform.
	pub(crate) const TRANSFORM_TEXT: Self = Self::Two(b'$', b'/');

	/// Stop characters for the if-text of a `${1:?if:else}` format.
	///
	/// Conditional text also stops at `/`: the replacement of a transform can not end without one.
	pub(crate) const IF_TEXT: Self = Self::Three(b':', b'}', b'/');

	/// Stop characters for the other conditional texts of a format.
	pub(crate) const CONDITIONAL_TEXT: Self = Self::Two(b'}', b'/');

	fn contains(self, byte: u8) -> bool {
		match self {
			Self::One(a) => byte == a,
			Self::Two(a, b) => byte == a || byte == b,
			Self::Three(a, b, c) => byte == a || byte == b || byte == c,
		}
	}
}

/// Find the first backslash or stop character in the haystack.
fn find_special(haystack: &[u8], stops: Stops) -> Option<usize> {
	match stops {
		Stops::One(a) => memchr::memchr2(b'\\', a, haystack),
		Stops::Two(a, b) => memchr::memchr3(b'\\', a, b, haystack),
		Stops::Three(a, b, c) => {
			// Only look for a backslash before the first stop, so the search never runs past the run.
			let stop = memchr::memchr3(a, b, c, haystack);
			memchr::memchr(b'\\', &haystack[..stop.unwrap_or(haystack.len())]).or(stop)
		},
	}
}

/// Get the byte at the given position, if any.
#[inline]
pub(crate) fn byte_at(source: &str, position: usize) -> Option<u8> {
	source.as_bytes().get(position).copied()
}

/// Consume a single expected byte.
///
/// Returns the position after the byte, or `None` if a different byte (or nothing) is at `finger`.
#[inline]
pub(crate) fn expect(source: &str, finger: usize, byte: u8) -> Option<usize> {
	(byte_at(source, finger) == Some(byte)).then_some(finger + 1)
}

/// Unescape a single escape sequence.
///
/// The `position` must point to a backslash.
/// Any character can be escaped, and is taken literally.
/// A backslash at the very end of the input is itself taken literally.
///
/// Returns the unescaped character and the length of the escape sequence in bytes.
pub(crate) fn unescape_one(source: &str, position: usize) -> (char, usize) {
	debug_assert_eq!(byte_at(source, position), Some(b'\\'));
	match source[position + 1..].chars().next() {
		Some(c) => (c, 1 + c.len_utf8()),
		None => ('\\', 1),
	}
}

/// Consume an escape-aware run of literal text.
///
/// The run ends at the first unescaped stop character or at the end of the input.
/// The run may be empty.
///
/// Returns the unescaped text and the position of the first byte after the run.
pub(crate) fn literal_run(source: &str, start: usize, stops: Stops) -> (String, usize) {
	let bytes = source.as_bytes();
	let mut text = String::new();
	let mut finger = start;
	while finger < source.len() {
		let next = match find_special(&bytes[finger..], stops) {
			Some(x) => finger + x,
			None => source.len(),
		};
		text.push_str(&source[finger..next]);
		finger = next;

		// Stop at the end of input or at a stop character.
		if finger == source.len() || stops.contains(bytes[finger]) {
			break;
		}

		let (c, len) = unescape_one(source, finger);
		text.push(c);
		finger += len;
	}
	(text, finger)
}

/// Consume the pattern of a transform, up to the first unescaped `/`.
///
/// Escape sequences are kept verbatim so they reach the regex engine,
/// except for `\/` which is unescaped to `/`.
///
/// Returns the pattern and the position of the terminating `/`,
/// or `None` if there is no terminating `/`.
pub(crate) fn pattern_run(source: &str, start: usize) -> Option<(String, usize)> {
	let bytes = source.as_bytes();
	let mut pattern = String::new();
	let mut finger = start;
	loop {
		let next = finger + memchr::memchr2(b'\\', b'/', &bytes[finger..])?;
		pattern.push_str(&source[finger..next]);
		if bytes[next] == b'/' {
			return Some((pattern, next));
		}

		let escaped = source[next + 1..].chars().next()?;
		if escaped != '/' {
			pattern.push('\\');
		}
		pattern.push(escaped);
		finger = next + 1 + escaped.len_utf8();
	}
}

/// Consume a run of ASCII digits and parse it as an index.
///
/// Returns `None` if there are no digits, or if the value does not fit in a `u32`.
pub(crate) fn digits(source: &str, start: usize) -> Option<(u32, usize)> {
	let len = source.as_bytes()[start..]
		.iter()
		.position(|c| !c.is_ascii_digit())
		.unwrap_or(source.len() - start);
	if len == 0 {
		return None;
	}
	let end = start + len;
	let value = source[start..end].parse().ok()?;
	Some((value, end))
}

/// Consume a variable name.
///
/// A name starts with an ASCII letter or underscore,
/// followed by any number of ASCII letters, digits and underscores.
pub(crate) fn name(source: &str, start: usize) -> Option<(&str, usize)> {
	let first = byte_at(source, start)?;
	if !first.is_ascii_alphabetic() && first != b'_' {
		return None;
	}
	let len = source.as_bytes()[start + 1..]
		.iter()
		.position(|&c| !is_valid_name(c))
		.unwrap_or(source.len() - start - 1);
	let end = start + 1 + len;
	Some((&source[start..end], end))
}

/// Consume a (possibly empty) run of ASCII letters.
pub(crate) fn letters(source: &str, start: usize) -> (&str, usize) {
	let len = source.as_bytes()[start..]
		.iter()
		.position(|c| !c.is_ascii_alphabetic())
		.unwrap_or(source.len() - start);
	(&source[start..start + len], start + len)
}

/// Name characters are ASCII alphanumeric characters and underscores.
fn is_valid_name(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::check;

	#[test]
	fn test_literal_run() {
		check!(literal_run("foo bar", 0, Stops::TOP_LEVEL) == (String::from("foo bar"), 7));
		check!(literal_run("foo $1", 0, Stops::TOP_LEVEL) == (String::from("foo "), 4));
		check!(literal_run("foo $1", 4, Stops::TOP_LEVEL) == (String::from(""), 4));
		check!(literal_run("a}b", 0, Stops::TOP_LEVEL) == (String::from("a}b"), 3));
		check!(literal_run("a}b", 0, Stops::NESTED) == (String::from("a"), 1));
		check!(literal_run("one,two|", 0, Stops::CHOICE_ITEM) == (String::from("one"), 3));
		check!(literal_run("one,two|", 4, Stops::CHOICE_ITEM) == (String::from("two"), 7));
		check!(literal_run("yes:no}", 0, Stops::IF_TEXT) == (String::from("yes"), 3));
		check!(literal_run("a/b:c}", 0, Stops::IF_TEXT) == (String::from("a"), 1));
		check!(literal_run("no}/", 0, Stops::CONDITIONAL_TEXT) == (String::from("no"), 2));
		check!(literal_run("a/b}", 0, Stops::CONDITIONAL_TEXT) == (String::from("a"), 1));
	}

	#[test]
	fn test_literal_run_escapes() {
		check!(literal_run(r"\$1", 0, Stops::TOP_LEVEL) == (String::from("$1"), 3));
		check!(literal_run(r"a\}b}", 0, Stops::NESTED) == (String::from("a}b"), 4));
		check!(literal_run(r"a\,b,c", 0, Stops::CHOICE_ITEM) == (String::from("a,b"), 4));
		check!(literal_run(r"\q\\", 0, Stops::TOP_LEVEL) == (String::from(r"q\"), 4));
		check!(literal_run(r"\❤x", 0, Stops::TOP_LEVEL) == (String::from("❤x"), 5));
		check!(literal_run(r"abc\", 0, Stops::TOP_LEVEL) == (String::from(r"abc\"), 4));
		check!(literal_run(r"a\:b\/c:d", 0, Stops::IF_TEXT) == (String::from("a:b/c"), 7));
		check!(literal_run(r"a\/b}", 0, Stops::CONDITIONAL_TEXT) == (String::from("a/b"), 4));
	}

	#[test]
	fn test_pattern_run() {
		check!(pattern_run("abc/def", 0) == Some((String::from("abc"), 3)));
		check!(pattern_run(r"[\.]/_/", 0) == Some((String::from(r"[\.]"), 4)));
		check!(pattern_run(r"a\/b/", 0) == Some((String::from("a/b"), 4)));
		check!(pattern_run(r"a\\/b", 0) == Some((String::from(r"a\\"), 3)));
		check!(pattern_run("abc", 0) == None);
		check!(pattern_run(r"abc\", 0) == None);
	}

	#[test]
	fn test_digits() {
		check!(digits("12}", 0) == Some((12, 2)));
		check!(digits("$0", 1) == Some((0, 2)));
		check!(digits("x1", 0) == None);
		check!(digits("99999999999", 0) == None);
	}

	#[test]
	fn test_name() {
		check!(name("TM_FILENAME}", 0) == Some(("TM_FILENAME", 11)));
		check!(name("_a1 b", 0) == Some(("_a1", 3)));
		check!(name("1abc", 0) == None);
		check!(name("", 0) == None);
		check!(name("a", 0) == Some(("a", 1)));
	}

	#[test]
	fn test_letters() {
		check!(letters("gi}", 0) == ("gi", 2));
		check!(letters("}", 0) == ("", 0));
	}
}
