//! Module containing error details.
//!
//! Parsing and rendering snippets never fail.
//! The only errors are reported when a [`Transform`][crate::Transform] is compiled explicitly,
//! with [`Transform::compile()`][crate::Transform::compile] or [`Transform::try_apply()`][crate::Transform::try_apply].

/// An error that can occur when compiling a transform.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum TransformError {
	/// The pattern of the transform is not a valid regular expression.
	InvalidPattern(InvalidPattern),

	/// The transform has an option letter that is not supported.
	UnknownOption(UnknownOption),
}

impl From<InvalidPattern> for TransformError {
	fn from(other: InvalidPattern) -> Self {
		Self::InvalidPattern(other)
	}
}

impl From<UnknownOption> for TransformError {
	fn from(other: UnknownOption) -> Self {
		Self::UnknownOption(other)
	}
}

impl std::error::Error for TransformError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::InvalidPattern(e) => Some(&e.error),
			Self::UnknownOption(_) => None,
		}
	}
}

impl std::fmt::Display for TransformError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidPattern(e) => e.fmt(f),
			Self::UnknownOption(e) => e.fmt(f),
		}
	}
}

/// The pattern of the transform is not a valid regular expression.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct InvalidPattern {
	/// The pattern that failed to compile.
	pub pattern: String,

	/// The error reported by the regex engine.
	pub error: regex::Error,
}

impl std::error::Error for InvalidPattern {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.error)
	}
}

impl std::fmt::Display for InvalidPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Invalid transform pattern: /{}/", self.pattern)
	}
}

/// The transform has an option letter that is not supported.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnknownOption {
	/// The byte offset of the option within the option string.
	pub position: usize,

	/// The unsupported option letter.
	pub option: char,
}

impl std::error::Error for UnknownOption {}

impl std::fmt::Display for UnknownOption {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unknown transform option: {:?}", self.option)
	}
}
