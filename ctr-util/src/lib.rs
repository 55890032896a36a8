//////
//
// Language config
//

// Eff this convention.
#![allow(non_snake_case)]



//////
//
// Module definitions
//

/// Submodule providing operations on the file system.
pub mod fs;

/// Submodule providing utilities for reasoning about meta-related things like the target platform of a build.
pub mod meta;

/// Submodule providing operations on file system paths.
pub mod path;

/// Unit tests for the utilities.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Normalize-path library
pub use normalize_path; // re-export



//////
//
// Functions
//

/// Joins the given items into a single string, separating them by exactly one space each. Empty items are skipped, so
/// the result never contains leading, trailing or doubled separators.
///
/// # Arguments
///
/// * `items` – The items to join.
///
/// # Returns
///
/// The space-separated concatenation of all non-empty items.
pub fn joinSpaced<Str: AsRef<str>> (items: impl IntoIterator<Item=Str>) -> String {
	items.into_iter().fold(String::new(), |joined, item| {
		let item = item.as_ref();
		if item.is_empty()        { joined }
		else if joined.is_empty() { item.to_owned() }
		else                      { format!("{joined} {item}") }
	})
}
