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

/// The module implementing toolchain detection.
pub mod detect;
pub use detect::{canBuild, Feasibility, ToolchainConfig}; // re-export

/// The module implementing the compiler and linker flag tables.
pub mod environment;
pub use environment::{configure, BuildEnvironment}; // re-export

/// The module providing build options and feature flags.
pub mod options;
pub use options::{BuildOptions, BuildTarget, FeatureFlags, Toggle}; // re-export

/// The module abstracting the invocation of external programs.
pub mod process;
pub use process::{CommandRunner, CommandSpec, CommandOutput, SystemCommandRunner}; // re-export

/// The module implementing the custom build rules registry.
pub mod rules;
pub use rules::{BuildRule, BuildRules}; // re-export

/// The module implementing the shader preparation facilities.
mod shaderprep;
pub use shaderprep::{prepareShaders, prepareShadersForCargo}; // re-export

/// The shader module providing the header emitter.
pub use ctr_shader as shader;

/// The utilities module.
pub use ctr_util as util;

/// Unit tests for the build tooling.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Standard library
use std::{env, path::{Path, PathBuf}};

// Anyhow library
pub use anyhow::{Context, Result, anyhow};

// Tracing library
use tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};



//////
//
// Constants
//

/// The environment variable holding the log filter directives for [`initTracing`].
pub const LOG_ENV_VAR: &str = "CTR_BUILD_LOG";

/// The environment variables describing the cross toolchain.
pub const TOOLCHAIN_ENV_VARS: [&str; 3] = ["DEVKITPRO", "DEVKITARM", "CTRULIB"];



//////
//
// Functions
//

/// Set up logging to standard error, filtered according to the [`LOG_ENV_VAR`] environment variable. Standard output
/// is left alone since *Cargo* reads build script instructions from there. Calling this more than once (or after some
/// other subscriber has been installed) has no effect.
///
/// # Returns
///
/// `true` if the subscriber was installed by this call, `false` if there already was one.
pub fn initTracing () -> bool
{
	// Set up logging
	let mut envFilterBuilder = EnvFilter::builder().with_env_var(LOG_ENV_VAR);
	#[cfg(debug_assertions)] {
		envFilterBuilder = envFilterBuilder.with_default_directive(tracing::Level::DEBUG.into());
	}
	#[cfg(not(debug_assertions))] {
		envFilterBuilder = envFilterBuilder.with_default_directive(tracing::Level::INFO.into());
	}
	let envFilter = envFilterBuilder.from_env_lossy();

	let fmt_layer = tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr);
	tracing_subscriber::registry().with(envFilter).with(fmt_layer).try_init().is_ok()
}

/// Report the root path of source code for the crate that is currently building.
pub fn getCargoSourceDir () -> Result<PathBuf> {
	env::var("CARGO_MANIFEST_DIR").map(PathBuf::from).context(
		"Cargo did not provide the `CARGO_MANIFEST_DIR` environment variable"
	)
}

/// Report the path of the `OUT_DIR` of the current *Cargo* invocation.
pub fn getCargoOutDir () -> Result<PathBuf> {
	env::var("OUT_DIR").map(PathBuf::from).context(
		"Cargo did not provide the `OUT_DIR` environment variable"
	)
}

/// Detect whether the current *Cargo* build is targeting the 3DS.
pub fn isCtrTarget () -> Result<bool> {
	Ok(util::meta::TargetTriple::fromCargoEnv()?.isCtr())
}

/// Make *Cargo* re-run the build script whenever the given file changes.
pub fn dependOnFile (filepath: impl AsRef<Path>) {
	println!("cargo::rerun-if-changed={}", filepath.as_ref().display());
}

/// Make *Cargo* re-run the build script whenever the given file, which the build script generated itself, changes or
/// disappears.
///
/// # Returns
///
/// An error if the file does not exist, which would indicate the generation step did not actually produce it.
pub fn dependOnGeneratedFile (filepath: impl AsRef<Path>) -> Result<()>
{
	if !filepath.as_ref().exists() {
		return Err(anyhow!("Generated file does not exist: '{}'", filepath.as_ref().display()));
	}
	dependOnFile(filepath);
	Ok(())
}

/// Performs the complete 3DS setup for the build script of a crate that targets the 3DS: captures the toolchain from
/// the environment, checks it is usable, configures the flag tables according to `options` and hands the linker
/// configuration to *Cargo*.
///
/// # Returns
///
/// The configured environment, or [`None`] if the current build does not target the 3DS (in which case nothing is
/// done). Fails if the toolchain is not usable.
pub fn configureForCargo (options: &BuildOptions) -> Result<Option<BuildEnvironment>>
{
	// Don't do anything if we're not building for the 3DS
	if !isCtrTarget()? {
		tracing::debug!("Not targeting the 3ds, skipping platform setup");
		return Ok(None);
	}
	for variable in TOOLCHAIN_ENV_VARS {
		println!("cargo::rerun-if-env-changed={variable}");
	}

	// Detect
	let toolchain = ToolchainConfig::fromEnv();
	let runner = SystemCommandRunner;
	if let Feasibility::Disabled(reason) = canBuild(&toolchain, &runner) {
		return Err(anyhow!("Cannot build for the 3ds: {reason}"));
	}

	// Configure
	let mut buildEnv = BuildEnvironment::default();
	configure(&mut buildEnv, options, &toolchain, &runner)?;
	buildEnv.emitCargoDirectives();

	// Done!
	Ok(Some(buildEnv))
}
