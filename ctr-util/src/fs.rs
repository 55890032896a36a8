//////
//
// Imports
//

// Standard library
use std::{fs, path::Path};

// Anyhow library
use anyhow::Result;



//////
//
// Functions
//

/// Recursively run a closure on an entire directory tree.
///
/// The closure receives the full path of the visited entry, its path relative to `baseDirectory` (the *destination
/// stack*, empty for the base directory itself) and its file type. Directories are visited before their contents.
pub fn doRecursively<PathRef: AsRef<Path>, Action: FnMut(&Path, &Path, fs::FileType)->Result<()>> (
	baseDirectory: PathRef, mut action: Action
) -> Result<()>
{
	// The actual recursive worker
	#[inline(always)]
	fn recurse<Action: FnMut(&Path, &Path, fs::FileType)->Result<()>> (source: &Path, destStack: &Path, action: &mut Action)
	-> Result<()> {
		let roottype = fs::metadata(source)?.file_type();
		action(source, &destStack, roottype)?;
		if !roottype.is_dir() { return Ok(()) }

		// Sort entries so traversal order doesn't depend on the file system
		let mut entries = fs::read_dir(source)?.collect::<std::io::Result<Vec<_>>>()?;
		entries.sort_by_key(|entry| entry.file_name());
		for entry in entries
		{
			let filetype = entry.file_type()?;
			if filetype.is_dir() {
				recurse(
					&entry.path(), &destStack.join(entry.file_name()), action
				)?;
			} else {
				action(&entry.path(), &destStack.join(entry.file_name()), filetype)?;
			}
		}
		Ok(())
	}

	// Dispatch
	recurse(baseDirectory.as_ref(), Path::new(""), &mut action)
}

/// Write `contents` to the given file, fully replacing whatever it contained before. Missing parent directories are
/// created first.
///
/// # Arguments
///
/// * `filepath` – The file to write.
/// * `contents` – The bytes to write.
///
/// # Returns
///
/// Nothing in case of success, or the [`std::io::Error`] of the first failing file system operation.
pub fn writeReplacing (filepath: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> std::io::Result<()>
{
	if let Some(parent) = filepath.as_ref().parent() && !parent.as_os_str().is_empty() {
		fs::create_dir_all(parent)?;
	}
	fs::write(filepath, contents)
}
