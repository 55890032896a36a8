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

/// Submodule providing the [`ShaderBinary`], the in-memory form of a compiled PICA200 shader.
mod binary;
pub use binary::ShaderBinary; // re-export

/// Submodule providing the invocation of the *picasso* shader assembler.
pub mod compile;

/// Submodule implementing the conversion of shader binaries into embeddable C headers.
pub mod header;
pub use header::{emitHeader, emitHeaderFile, HeaderEmitError}; // re-export

/// Unit tests for the shader crate.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Local imports
use ctr_util as util;



//////
//
// Constants
//

/// File suffix of PICA200 shader assembly sources.
pub const SOURCE_SUFFIX: &str = ".pica";

/// File suffix of shader binaries as produced by *picasso*.
pub const BINARY_SUFFIX: &str = ".shbin";

/// File suffix of generated C headers embedding a shader binary.
pub const HEADER_SUFFIX: &str = ".h";
