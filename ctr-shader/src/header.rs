//////
//
// Imports
//

// Standard library
use std::{error::Error, fmt::Display, io, path::{Path, PathBuf}};

// Tracing library
use tracing;

// Local imports
use crate::*;



//////
//
// Constants
//

/// The prefix every symbol declared by a generated header starts with.
pub const SYMBOL_PREFIX: &str = "shader_builtin_";



//////
//
// Errors
//

/// An error resulting from generating a header file from a shader binary file. Both variants are plain I/O failures;
/// they carry the path of the file that could not be accessed along with the unmodified underlying
/// [`io::Error`](std::io::Error).
#[derive(Debug)]
pub enum HeaderEmitError {
	/// The shader binary could not be read.
	ReadSource { path: PathBuf, source: io::Error },

	/// The generated header could not be written.
	WriteDestination { path: PathBuf, source: io::Error }
}
impl HeaderEmitError
{
	/// The path of the file that could not be accessed.
	pub fn path (&self) -> &Path {
		match self {
			Self::ReadSource { path, .. } | Self::WriteDestination { path, .. } => path
		}
	}

	/// The [kind](io::ErrorKind) of the underlying I/O error.
	pub fn kind (&self) -> io::ErrorKind {
		match self {
			Self::ReadSource { source, .. } | Self::WriteDestination { source, .. } => source.kind()
		}
	}
}
impl Display for HeaderEmitError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ReadSource { path, source } => write!(
				formatter, "HeaderEmitError[reading `{}`: {source}]", path.display()
			),
			Self::WriteDestination { path, source } => write!(
				formatter, "HeaderEmitError[writing `{}`: {source}]", path.display()
			)
		}
	}
}
impl Error for HeaderEmitError {
	fn source (&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::ReadSource { source, .. } | Self::WriteDestination { source, .. } => Some(source)
		}
	}
}

/// An error resulting from attempting to recover the bytes from text that is not a well-formed generated header.
#[derive(Debug,PartialEq,Eq)]
pub enum HeaderParseError {
	/// No `{ ... }` array initializer could be found.
	MissingInitializer,

	/// An element of the initializer is not a decimal number in the range `0..=255`.
	InvalidByte(String)
}
impl Display for HeaderParseError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingInitializer => write!(formatter, "HeaderParseError[missing array initializer]"),
			Self::InvalidByte(elem) => write!(formatter, "HeaderParseError[invalid byte `{elem}`]")
		}
	}
}
impl Error for HeaderParseError {}



//////
//
// Functions
//

/// Render the C header text that declares the given binary asset as a static byte array.
///
/// The output has exactly the form
///
/// ```text
/// /* Auto-generated from <provenanceLabel> */
/// static uint8_t shader_builtin_<symbolName>[] =
/// {<b0>,<b1>,...,<bn>};
/// ```
///
/// with every byte written as an unsigned decimal and no whitespace inside the braces. There is no trailing newline.
///
/// # Arguments
///
/// * `binaryAsset` – The bytes to embed. May be empty, in which case the initializer will be `{}`, which declares a
///                   zero-length array that most C compilers will reject. This is left to the caller to deal with.
/// * `symbolName` – Appended verbatim to [`SYMBOL_PREFIX`] to form the array name. It is **not** validated or escaped
///                  in any way, so callers must make sure it forms a legal C identifier.
/// * `provenanceLabel` – Free-form text naming the source of the asset, placed inside the comment banner.
///
/// # Returns
///
/// The header text.
pub fn emitHeader (binaryAsset: &[u8], symbolName: &str, provenanceLabel: &str) -> String
{
	// Each byte takes at most 3 digits plus a separator
	let mut header = String::with_capacity(
		provenanceLabel.len() + symbolName.len() + 4*binaryAsset.len() + 64
	);
	header.push_str("/* Auto-generated from ");
	header.push_str(provenanceLabel);
	header.push_str(" */\nstatic uint8_t ");
	header.push_str(SYMBOL_PREFIX);
	header.push_str(symbolName);
	header.push_str("[] =\n{");
	for (idx, byte) in binaryAsset.iter().enumerate() {
		if idx > 0 {
			header.push(',');
		}
		header.push_str(&byte.to_string());
	}
	header.push_str("};");
	header
}

/// Derive the symbol name for a generated header from its destination path: the file name with its final two
/// characters (i.e. the `.h` extension) removed. File names shorter than that yield an empty symbol name.
pub fn symbolNameFromTarget (target: impl AsRef<Path>) -> String
{
	let filename = target.as_ref().file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
	let keep = filename.chars().count().saturating_sub(2);
	filename.chars().take(keep).collect()
}

/// Generate the header for the shader binary stored in the file `source`, writing it to `target`. Any prior contents
/// of `target` are fully replaced, and missing parent directories get created. The symbol name is derived from `target`
/// via [`symbolNameFromTarget`], while the path of `source` is recorded as provenance.
///
/// # Arguments
///
/// * `source` – Path to the shader binary.
/// * `target` – Path to the header to write.
///
/// # Returns
///
/// Nothing in case of success, or a [`HeaderEmitError`] holding the offending path and the I/O error that occurred.
pub fn emitHeaderFile (source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<(), HeaderEmitError>
{
	let (source, target) = (source.as_ref(), target.as_ref());

	// Load the binary
	let binary = ShaderBinary::fromFile(source).map_err(
		|err| HeaderEmitError::ReadSource { path: source.to_owned(), source: err }
	)?;
	if binary.isEmpty() {
		tracing::warn!(
			"Shader binary '{}' is empty, '{}' will declare a zero-length array", source.display(), target.display()
		);
	}

	// Render and write
	let symbolName = symbolNameFromTarget(target);
	let header = binary.toHeader(&symbolName);
	util::fs::writeReplacing(target, header).map_err(
		|err| HeaderEmitError::WriteDestination { path: target.to_owned(), source: err }
	)?;
	tracing::debug!(
		"Generated '{}' ({SYMBOL_PREFIX}{symbolName}, {} bytes) from '{}'",
		target.display(), binary.bytes().len(), source.display()
	);

	// Done!
	Ok(())
}

/// Recover the embedded bytes from the text of a generated header, i.e. parse the comma-separated decimals between the
/// last pair of braces.
pub fn parseHeaderBody (header: &str) -> Result<Vec<u8>, HeaderParseError>
{
	let open = header.rfind('{').ok_or(HeaderParseError::MissingInitializer)?;
	let close = header[open..].find('}').map(|pos| open+pos).ok_or(HeaderParseError::MissingInitializer)?;
	let body = &header[open+1..close];
	if body.is_empty() {
		return Ok(Vec::new());
	}
	body.split(',').map(|elem| {
		// `u8::from_str` would also accept a leading `+`, which we never generate
		if elem.is_empty() || !elem.bytes().all(|c| c.is_ascii_digit()) {
			return Err(HeaderParseError::InvalidByte(elem.to_owned()));
		}
		elem.parse::<u8>().map_err(|_| HeaderParseError::InvalidByte(elem.to_owned()))
	}).collect()
}
