//////
//
// Imports
//

// Standard library
use std::{error::Error, fmt::Display, path::{Path, PathBuf}};

// Local imports
use crate::*;



//////
//
// Constants
//

/// Name of the *picasso* PICA200 shader assembler executable.
pub const PICASSO: &str = "picasso";



//////
//
// Errors
//

/// An error resulting from a *picasso* invocation that did not finish successfully.
#[derive(Debug)]
pub struct ShaderCompileError {
	/// The shader source that failed to compile.
	pub source: PathBuf,

	/// The exit code of the compiler, if it terminated normally.
	pub exitCode: Option<i32>,

	/// Whatever the compiler printed to its error stream.
	pub stderr: String
}
impl Display for ShaderCompileError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
	{
		let code = self.exitCode.map(|code| code.to_string()).unwrap_or_else(|| "<none>".into());
		write!(formatter, "ShaderCompileError[`{}` (exit code {code})", self.source.display())?;
		if !self.stderr.trim().is_empty() {
			write!(formatter, ": {}", self.stderr.trim())?;
		}
		write!(formatter, "]")
	}
}
impl Error for ShaderCompileError {}



//////
//
// Classes
//

/// The command line for assembling a single PICA200 shader source into a shader binary.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct PicassoCommand {
	source: PathBuf,
	target: PathBuf
}
impl PicassoCommand
{
	/// Create the command for assembling `source` into `target`.
	pub fn forFiles (source: impl AsRef<Path>, target: impl AsRef<Path>) -> Self { Self {
		source: source.as_ref().to_owned(), target: target.as_ref().to_owned()
	}}

	/// Create the command for assembling `source` into the `.shbin` file of the same name inside `outDir`.
	pub fn intoDirectory (source: impl AsRef<Path>, outDir: impl AsRef<Path>) -> Self {
		let filename = source.as_ref().file_name().map(PathBuf::from).unwrap_or_default();
		let target = util::path::withSuffix(outDir.as_ref().join(filename), BINARY_SUFFIX);
		Self::forFiles(source, target)
	}

	///
	#[inline(always)]
	pub fn source (&self) -> &Path {
		&self.source
	}

	///
	#[inline(always)]
	pub fn target (&self) -> &Path {
		&self.target
	}

	/// The executable to run.
	#[inline(always)]
	pub fn program (&self) -> &'static str {
		PICASSO
	}

	/// The arguments to pass to the executable.
	pub fn args (&self) -> Vec<String> {
		vec![
			"-o".into(), self.target.display().to_string(), self.source.display().to_string()
		]
	}

	/// The full command line as a single string, e.g. `picasso -o shaders/2d.shbin shaders/2d.pica`.
	pub fn commandLine (&self) -> String {
		util::joinSpaced(std::iter::once(PICASSO.to_owned()).chain(self.args()))
	}
}
