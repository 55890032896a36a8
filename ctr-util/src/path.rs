//////
//
// Imports
//

// Standard library
use std::path::*;

// Normalize-path library
use normalize_path::NormalizePath;



//////
//
// Functions
//

/// Normalizes (i.e. returns an absolute path) the given *path* relative to the given *anchor*, **iff** *path* is
/// relative. If it is not, it will just be returned verbatim.
///
/// # Arguments
///
/// * `anchor` – The path to normalize relative to.
/// * `path` – The path to normalize in case it is relative.
///
/// # Returns
///
/// The absolute path resulting from normalizing *path*.
pub fn normalizeToAnchor<PathRef1: AsRef<Path>, PathRef2: AsRef<Path>> (anchor: PathRef1, path: PathRef2) -> PathBuf
{
	if path.as_ref().is_relative() {
		anchor.as_ref().join(path).normalize()
	}
	else {
		path.as_ref().into()
	}
}

/// Replaces the extension of the given path with the given suffix. The suffix is appended verbatim, so it should
/// include the leading dot (e.g. `".shbin"`).
///
/// # Arguments
///
/// * `path` – The path whose extension to replace.
/// * `suffix` – The new suffix, including the dot.
///
/// # Returns
///
/// The path with the same parent and file stem as `path`, ending in `suffix`.
pub fn withSuffix<PathRef: AsRef<Path>> (path: PathRef, suffix: &str) -> PathBuf
{
	let path = path.as_ref();
	let mut filename = path.file_stem().map(|stem| stem.to_os_string()).unwrap_or_default();
	filename.push(suffix);
	path.with_file_name(filename)
}

/// Checks whether the file name of the given path ends in the given suffix (including the dot, e.g. `".pica"`).
pub fn hasSuffix<PathRef: AsRef<Path>> (path: PathRef, suffix: &str) -> bool {
	path.as_ref().file_name().and_then(|name| name.to_str()).is_some_and(|name| name.ends_with(suffix))
}
