//! Maps that provide values for snippet variables.
//!
//! Snippets are rendered with [`NoVariables`] by default, so every variable has an empty value.
//! Hosts that know the value of variables such as `TM_FILENAME` or `TM_SELECTED_TEXT`
//! can pass any [`VariableMap`] to [`Snippet::render_with()`][crate::Snippet::render_with] instead.
//!
//! A variable with an empty value is treated the same as a missing variable:
//! it renders its default value, if it has one.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

mod fallback;
pub use fallback::*;

/// Trait for types that can be used as a variable map.
///
/// Variable names are passed without the leading `$`.
pub trait VariableMap<'a> {
	/// The type returned by the [`get()`][Self::get] function.
	type Value;

	/// Get the value of a variable.
	fn get(&'a self, name: &str) -> Option<Self::Value>;
}

/// Check if a variable has a non-empty value.
fn is_set<V: AsRef<str>>(value: &Option<V>) -> bool {
	value.as_ref().is_some_and(|value| !value.as_ref().is_empty())
}

/// A map without any variables.
///
/// Every variable lookup fails, so variables render as their default value
/// or as their transform applied to an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl<'a> VariableMap<'a> for NoVariables {
	type Value = NeverValue;

	#[inline]
	fn get(&'a self, _name: &str) -> Option<Self::Value> {
		None
	}
}

/// Value returned by the [`NoVariables`] map.
///
/// This type has no values, so it can never actually be returned.
#[derive(Debug)]
pub enum NeverValue {}

impl AsRef<str> for NeverValue {
	fn as_ref(&self) -> &str {
		match *self {}
	}
}

/// Variables from a list of name-value pairs.
///
/// Lookups are a linear search, which is fine for the handful of variables a snippet uses.
/// If the same name appears more than once, the first pair wins.
///
/// # Example
/// ```rust
/// # use lsp_snippet::VariableMap;
///
/// let variables = [("TM_FILENAME", "main.rs"), ("TM_LINE_NUMBER", "12")];
///
/// assert_eq!(variables.get("TM_FILENAME"), Some(&"main.rs"));
/// assert_eq!(variables.get("TM_SELECTED_TEXT"), None);
/// ```
impl<'a, K, V> VariableMap<'a> for [(K, V)]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.iter()
			.find(|(key, _)| key.borrow() == name)
			.map(|(_, value)| value)
	}
}

impl<'a, K, V, const N: usize> VariableMap<'a> for [(K, V); N]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		VariableMap::get(self.as_slice(), name)
	}
}

impl<'a, K, V> VariableMap<'a> for Vec<(K, V)>
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		VariableMap::get(self.as_slice(), name)
	}
}

/// Look up variables through a reference, so one map can be shared by several [`fallback()`] chains.
impl<'a, T> VariableMap<'a> for &'_ T
where
	T: ?Sized + VariableMap<'a>,
{
	type Value = T::Value;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		T::get(self, name)
	}
}

impl<'a, K, V> VariableMap<'a> for BTreeMap<K, V>
where
	K: Borrow<str> + Ord,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		BTreeMap::get(self, name)
	}
}

impl<'a, K, V, S> VariableMap<'a> for HashMap<K, V, S>
where
	K: Borrow<str> + Hash + Eq,
	V: 'a,
	S: BuildHasher,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		HashMap::get(self, name)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::{BTreeMap, HashMap};

	use super::*;
	use assert2::check;

	#[test]
	fn test_is_set() {
		check!(is_set(&Some("x")));
		check!(!is_set(&Some("")));
		check!(!is_set::<&str>(&None));
		check!(!is_set(&NoVariables.get("TM_FILENAME")));
	}

	#[test]
	fn test_pair_lists() {
		let pairs = vec![(String::from("A"), "first"), (String::from("A"), "second")];
		check!(VariableMap::get(&pairs, "A") == Some(&"first"));
		check!(VariableMap::get(pairs.as_slice(), "B") == None);
	}

	#[test]
	fn test_std_maps() {
		let mut btree: BTreeMap<String, String> = BTreeMap::new();
		btree.insert("TM_FILENAME".into(), "main.rs".into());
		check!(VariableMap::get(&btree, "TM_FILENAME").map(String::as_str) == Some("main.rs"));

		let mut hash: HashMap<&str, &str> = HashMap::new();
		hash.insert("TM_FILENAME", "main.rs");
		check!(VariableMap::get(&hash, "TM_FILENAME") == Some(&"main.rs"));
		check!(VariableMap::get(&&hash, "TM_DIRECTORY") == None);
	}
}
