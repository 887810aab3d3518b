//! Regex based transformations of variable and tabstop values.
//!
//! A [`Transform`] is compiled to a [`CompiledTransform`] when it is applied.
//! Each match of the pattern in the value is replaced by the [`FormatItem`]s of the transform,
//! and all text outside of the matches is copied verbatim.

use std::borrow::Cow;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{InvalidPattern, TransformError, UnknownOption};
use crate::syntax::{Format, FormatItem, Modifier, Transform};

/// The options of a transform, parsed from its option letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
	/// Replace all matches instead of only the first one (`g`).
	pub global: bool,

	/// Match letters case-insensitively (`i`).
	pub case_insensitive: bool,

	/// Make `^` and `$` match at the start and end of lines (`m`).
	pub multi_line: bool,

	/// Make `.` match newlines as well (`s`).
	pub dot_matches_new_line: bool,
}

impl TransformOptions {
	/// Parse option letters.
	///
	/// The letter `u` is accepted but has no effect: matching is always Unicode aware.
	pub fn parse(options: &str) -> Result<Self, UnknownOption> {
		let mut parsed = Self::default();
		for (position, option) in options.char_indices() {
			match option {
				'g' => parsed.global = true,
				'i' => parsed.case_insensitive = true,
				'm' => parsed.multi_line = true,
				's' => parsed.dot_matches_new_line = true,
				'u' => (),
				_ => return Err(UnknownOption { position, option }),
			}
		}
		Ok(parsed)
	}
}

/// A transform with a compiled regular expression.
///
/// Borrows the replacement from the [`Transform`] it was compiled from.
#[derive(Debug, Clone)]
pub struct CompiledTransform<'a> {
	regex: Regex,
	global: bool,
	items: &'a [FormatItem],
}

impl Transform {
	/// Compile the pattern and options of the transform.
	pub fn compile(&self) -> Result<CompiledTransform<'_>, TransformError> {
		let options = TransformOptions::parse(&self.options)?;
		let regex = RegexBuilder::new(&self.pattern)
			.case_insensitive(options.case_insensitive)
			.multi_line(options.multi_line)
			.dot_matches_new_line(options.dot_matches_new_line)
			.build()
			.map_err(|error| InvalidPattern {
				pattern: self.pattern.clone(),
				error,
			})?;
		Ok(CompiledTransform {
			regex,
			global: options.global,
			items: &self.items,
		})
	}

	/// Apply the transform to a value.
	///
	/// If the transform can not be compiled, the value is returned unchanged.
	/// Use [`Self::try_apply()`] if you need to know about the error.
	pub fn apply(&self, value: &str) -> String {
		match self.compile() {
			Ok(compiled) => compiled.apply(value),
			Err(_) => value.to_owned(),
		}
	}

	/// Apply the transform to a value, or report why it could not be compiled.
	pub fn try_apply(&self, value: &str) -> Result<String, TransformError> {
		Ok(self.compile()?.apply(value))
	}
}

impl CompiledTransform<'_> {
	/// Apply the transform to a value.
	///
	/// Without the `g` option only the first match is replaced.
	pub fn apply(&self, value: &str) -> String {
		let limit = if self.global { usize::MAX } else { 1 };
		let mut output = String::with_capacity(value.len());
		let mut last_end = 0;
		for captures in self.regex.captures_iter(value).take(limit) {
			let Some(whole) = captures.get(0) else {
				continue;
			};
			output.push_str(&value[last_end..whole.start()]);
			self.write_replacement(&mut output, &captures);
			last_end = whole.end();
		}
		output.push_str(&value[last_end..]);
		output
	}

	/// Write the replacement for a single match.
	fn write_replacement(&self, output: &mut String, captures: &Captures) {
		for item in self.items {
			match item {
				FormatItem::Text(text) => output.push_str(&text.text),
				FormatItem::Format(format) => {
					// Groups that did not participate, or that do not exist at all, are empty.
					let captured = usize::try_from(format.capture)
						.ok()
						.and_then(|index| captures.get(index))
						.map_or("", |m| m.as_str());
					output.push_str(&format.resolve(captured));
				},
			}
		}
	}
}

impl Format {
	/// Get the text to insert for a captured value.
	///
	/// An empty capture is replaced by the else-text, if there is one.
	/// A non-empty capture is replaced by the if-text, if there is one.
	/// Otherwise the capture is used, with the case modifier applied.
	pub fn resolve<'a>(&'a self, captured: &'a str) -> Cow<'a, str> {
		if captured.is_empty() {
			if let Some(else_text) = &self.else_text {
				return Cow::Borrowed(else_text);
			}
		} else if let Some(if_text) = &self.if_text {
			return Cow::Borrowed(if_text);
		}

		match self.modifier {
			Some(modifier) => Cow::Owned(modifier.apply(captured)),
			None => Cow::Borrowed(captured),
		}
	}
}

impl Modifier {
	/// Apply the case modifier to some text.
	pub fn apply(self, text: &str) -> String {
		match self {
			Self::Upcase => text.to_uppercase(),
			Self::Downcase => text.to_lowercase(),
			Self::Capitalize => capitalize(text),
			Self::Camelcase => join_words(text, false),
			Self::Pascalcase => join_words(text, true),
		}
	}
}

/// Uppercase the first character, leaving the rest unchanged.
fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Join the alphanumeric words of the text in camel case or Pascal case.
///
/// The first word is lowercased (and then capitalized for Pascal case),
/// the other words are capitalized.
fn join_words(text: &str, pascal: bool) -> String {
	let words = text.split(|c: char| !c.is_alphanumeric()).filter(|word| !word.is_empty());
	let mut output = String::with_capacity(text.len());
	for (i, word) in words.enumerate() {
		if i > 0 {
			output.push_str(&capitalize(word));
		} else if pascal {
			output.push_str(&capitalize(&word.to_lowercase()));
		} else {
			output.push_str(&word.to_lowercase());
		}
	}
	output
}
