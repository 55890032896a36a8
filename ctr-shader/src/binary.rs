//////
//
// Imports
//

// Standard library
use std::{fs, path::{Path, PathBuf}};

// Local imports
use crate::*;



//////
//
// Classes
//

/// A compiled shader binary held in memory, together with the path it originates from.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ShaderBinary {
	bytes: Vec<u8>,
	origin: PathBuf
}
impl ShaderBinary
{
	/// Load the shader binary stored in the given file.
	pub fn fromFile (filename: impl AsRef<Path>) -> std::io::Result<Self> {
		Ok(Self {
			bytes: fs::read(filename.as_ref())?,
			origin: filename.as_ref().to_owned()
		})
	}

	/// Wrap bytes that were obtained some other way, recording `origin` as where they came from.
	pub fn fromBytes (bytes: Vec<u8>, origin: impl Into<PathBuf>) -> Self {
		Self { bytes, origin: origin.into() }
	}

	///
	#[inline(always)]
	pub fn bytes (&self) -> &[u8] {
		self.bytes.as_slice()
	}

	///
	#[inline(always)]
	pub fn origin (&self) -> &Path {
		self.origin.as_path()
	}

	///
	#[inline(always)]
	pub fn isEmpty (&self) -> bool {
		self.bytes.is_empty()
	}

	/// Render the header text declaring this binary as a byte array named after `symbolName`, recording the origin path
	/// as provenance.
	pub fn toHeader (&self, symbolName: &str) -> String {
		header::emitHeader(&self.bytes, symbolName, &self.origin.display().to_string())
	}
}
