//////
//
// Imports
//

// Standard library
use std::path::{Path, PathBuf};

// Anyhow library
use anyhow::{anyhow, Context, Result};

// Tracing library
use tracing;

// Local imports
use crate::*;



//////
//
// Functions
//

/// Prepare all shaders found in the given directory, skipping the indicated directory sub-trees.
///
/// Every file some rule of `env` consumes gets run through the whole [chain](rules::BuildRules::chainFor) of rules –
/// for `.pica` sources that is assembly into a `.shbin` binary followed by generation of the `.h` header. Outputs are
/// placed in `outDir`, mirroring the directory structure below `shaderDirectory`.
///
/// # Arguments
///
/// * `env` – The configured build environment providing the rules.
/// * `runner` – Runs any external programs the rules need.
/// * `shaderDirectory` – The directory to scan.
/// * `outDir` – The directory to put the outputs into.
/// * `skipSubDirs` – Sub-directories of `shaderDirectory` (given relative to it) that should be ignored.
///
/// # Returns
///
/// The source files that were prepared together with the final output (typically the header) of each, in traversal
/// order, or the first error any rule reported.
pub fn prepareShaders (
	env: &BuildEnvironment, runner: &dyn CommandRunner, shaderDirectory: impl AsRef<Path>, outDir: impl AsRef<Path>,
	skipSubDirs: &[impl AsRef<Path>]
) -> Result<Vec<(PathBuf, PathBuf)>>
{
	// Sanity checks
	for skipSubDir in skipSubDirs {
		if skipSubDir.as_ref().is_absolute() {
			return Err(anyhow!("Skip subdir is not relative: '{}'", skipSubDir.as_ref().display()))
		}
	}
	if env.rules.isEmpty() {
		return Err(anyhow!("No build rules registered – was the environment configured?"))
	}

	// Recurse through provided shader directory and process each file encountered that is not in a skipped
	// subdirectory
	let mut prepared = Vec::new();
	util::fs::doRecursively(shaderDirectory.as_ref(), |srcPath, destStack, fileType|
	{
		if fileType.is_dir() {
			return Ok(())
		}
		let destStackParent = destStack.parent().ok_or_else(|| anyhow!("INTERNAL LOGIC ERROR"))?;
		if skipSubDirs.iter().any(|skipDir| destStackParent.starts_with(skipDir.as_ref())) {
			// We're in a skipped directory
			return Ok(())
		}
		let chain = env.rules.chainFor(srcPath);
		if chain.is_empty() {
			return Ok(())
		}

		let tgtDir = outDir.as_ref().join(destStackParent);
		let mut current = srcPath.to_owned();
		for rule in chain {
			let target = rule.targetFor(&current, &tgtDir);
			rule.apply(&current, &target, runner).with_context(
				|| format!("Rule '{}' failed for '{}'", rule.name(), srcPath.display())
			)?;
			current = target;
		}
		tracing::debug!("Prepared shader '{}' -> '{}'", srcPath.display(), current.display());
		prepared.push((srcPath.to_owned(), current));
		Ok(())
	})?;

	// Done!
	tracing::info!("Prepared {} shader(s) from '{}'", prepared.len(), shaderDirectory.as_ref().display());
	Ok(prepared)
}

/// Prepare the shaders in the given directory of the crate whose build script is running, placing the outputs in the
/// same relative location inside the *Cargo* `OUT_DIR`. All sources and outputs are registered with *Cargo*'s re-run
/// detection.
///
/// # Arguments
///
/// * `env` – The configured build environment providing the rules.
/// * `runner` – Runs any external programs the rules need.
/// * `shaderDirectory` – The shader directory, relative to the crate manifest.
/// * `skipSubDirs` – Sub-directories of `shaderDirectory` (given relative to it) that should be ignored.
///
/// # Returns
///
/// The generated outputs, one for each prepared source file.
pub fn prepareShadersForCargo (
	env: &BuildEnvironment, runner: &dyn CommandRunner, shaderDirectory: impl AsRef<Path>,
	skipSubDirs: &[impl AsRef<Path>]
) -> Result<Vec<PathBuf>>
{
	// Sanity checks
	// - syntactic
	if shaderDirectory.as_ref().is_absolute() {
		return Err(anyhow!(
			"`shaderDirectory` is not relative: '{}'\nMust be a directory relative to the path of the Crate manifest!",
			shaderDirectory.as_ref().display()
		))
	}
	// - semantic
	let crateSrcDir = getCargoSourceDir()?;
	let absoluteShaderDir = util::path::normalizeToAnchor(&crateSrcDir, shaderDirectory.as_ref());
	if !absoluteShaderDir.starts_with(&crateSrcDir) {
		return Err(anyhow!(
			"`shaderDirectory` is not a subdir of the Crate source root:\ncrate root: {}\nshader dir: {}",
			crateSrcDir.display(), absoluteShaderDir.display()
		))
	}

	// Determine target root directory for prepared shaders
	let targetDir = std::path::absolute(getCargoOutDir()?.join(shaderDirectory.as_ref()))?;

	// Prepare and register with Cargo
	let prepared = prepareShaders(env, runner, &absoluteShaderDir, &targetDir, skipSubDirs)?;
	let mut outputs = Vec::with_capacity(prepared.len());
	for (source, output) in prepared {
		dependOnFile(&source);
		dependOnGeneratedFile(&output)?;
		outputs.push(output);
	}
	Ok(outputs)
}
