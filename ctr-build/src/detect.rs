//////
//
// Imports
//

// Standard library
use std::{env, error::Error, fmt::Display, fs, path::{Path, PathBuf}};

// Anyhow library
use anyhow::{Context, Result};

// Serde library
use serde;
use serde_yaml_ng;

// Tracing library
use tracing;

// Local imports
use crate::process::{CommandRunner, CommandSpec};



//////
//
// Constants
//

/// The libraries from the *devkitPro* portlibs that a 3DS build cannot do without.
pub const REQUIRED_PACKAGES: [&str; 2] = ["zlib", "libpng"];



//////
//
// Errors
//

/// An error indicating that a part of the toolchain required for the requested operation has not been configured.
#[derive(Debug,PartialEq,Eq)]
pub struct ToolchainMissingError {
	/// The environment variable that would normally point to the missing part.
	pub variable: &'static str
}
impl Display for ToolchainMissingError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "ToolchainMissingError[`{}` not set]", self.variable)
	}
}
impl Error for ToolchainMissingError {}



//////
//
// Enums
//

/// Outcome of checking whether the 3DS platform can be built on this host.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum Feasibility {
	/// Everything required is present.
	Enabled,

	/// Something is missing, the contained string says what.
	Disabled(String)
}
impl Feasibility
{
	///
	#[inline(always)]
	pub fn isEnabled (&self) -> bool {
		matches!(self, Self::Enabled)
	}

	/// The reason the platform is disabled, if it is.
	pub fn reason (&self) -> Option<&str> {
		match self {
			Self::Enabled => None,
			Self::Disabled(reason) => Some(reason)
		}
	}
}



//////
//
// Structs
//

/// Locations of the cross toolchain. Nothing in this crate reads the process environment behind the caller's back –
/// if the environment is to be used, it has to be captured explicitly via [`ToolchainConfig::fromEnv`].
#[derive(Debug,Clone,Default,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
	/// Root of the *devkitPro* installation (`DEVKITPRO`).
	pub devkitPro: Option<PathBuf>,

	/// Root of the *devkitARM* toolchain (`DEVKITARM`).
	pub devkitArm: Option<PathBuf>,

	/// Root of *libctru* (`CTRULIB`).
	pub ctrulib: Option<PathBuf>,

	/// Whether the build host runs Windows, where the platform is not supported.
	pub hostIsWindows: bool
}
impl ToolchainConfig
{
	/// Capture the toolchain locations from the `DEVKITPRO`, `DEVKITARM` and `CTRULIB` environment variables of the
	/// current process.
	pub fn fromEnv () -> Self { Self {
		devkitPro: env::var_os("DEVKITPRO").map(PathBuf::from),
		devkitArm: env::var_os("DEVKITARM").map(PathBuf::from),
		ctrulib: env::var_os("CTRULIB").map(PathBuf::from),
		hostIsWindows: cfg!(windows)
	}}

	/// Parse a configuration from YAML text. Missing keys take their default values.
	pub fn fromYaml (yaml: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(yaml)?)
	}

	/// Load a configuration from a YAML file.
	pub fn fromYamlFile (filename: impl AsRef<Path>) -> Result<Self> {
		let yaml = fs::read_to_string(filename.as_ref()).with_context(
			|| format!("Could not read toolchain config '{}'", filename.as_ref().display())
		)?;
		Self::fromYaml(&yaml)
	}

	/// The *devkitPro* root, or an error if it is not configured.
	pub fn requireDevkitPro (&self) -> Result<&Path, ToolchainMissingError> {
		self.devkitPro.as_deref().ok_or(ToolchainMissingError { variable: "DEVKITPRO" })
	}

	/// The *libctru* root, or an error if it is not configured.
	pub fn requireCtrulib (&self) -> Result<&Path, ToolchainMissingError> {
		self.ctrulib.as_deref().ok_or(ToolchainMissingError { variable: "CTRULIB" })
	}

	/// The first required environment variable that is not configured, if any.
	pub fn firstMissingVariable (&self) -> Option<&'static str>
	{
		if self.devkitPro.is_none() { Some("DEVKITPRO") }
		else if self.devkitArm.is_none() { Some("DEVKITARM") }
		else if self.ctrulib.is_none() { Some("CTRULIB") }
		else { None }
	}

	/// The environment under which `pkg-config` finds the 3DS portlibs and nothing from the host. Returns an empty list
	/// if *devkitPro* is not configured.
	pub fn pkgConfigEnv (&self) -> Vec<(String, String)>
	{
		let Some(devkitPro) = &self.devkitPro else {
			return Vec::new();
		};
		vec![
			("PKG_CONFIG_DIR".into(), String::new()),
			("PKG_CONFIG_PATH".into(), String::new()),
			("PKG_CONFIG_LIBDIR".into(), pkgConfigLibDir(devkitPro))
		]
	}

	/// Create a `pkg-config` invocation that runs under [`pkgConfigEnv`](Self::pkgConfigEnv).
	pub fn pkgConfigCommand (&self) -> CommandSpec {
		self.pkgConfigEnv().into_iter().fold(
			CommandSpec::new("pkg-config"), |cmd, (name, value)| cmd.env(name, value)
		)
	}
}



//////
//
// Functions
//

/// The platform is always offered to the build orchestrator.
#[inline(always)]
pub fn isActive () -> bool {
	true
}

/// The name the platform is known by in the build orchestrator.
#[inline(always)]
pub fn platformName () -> &'static str {
	"3ds"
}

/// The value for `PKG_CONFIG_LIBDIR` that points `pkg-config` at the 3DS and ARMv6K portlibs of the given *devkitPro*
/// installation.
pub fn pkgConfigLibDir (devkitPro: impl AsRef<Path>) -> String {
	let devkitPro = devkitPro.as_ref().display();
	format!("{devkitPro}/portlibs/3ds/lib/pkgconfig:{devkitPro}/portlibs/armv6k/lib/pkgconfig")
}

/// Determine whether the 3DS platform can be built with the given toolchain.
///
/// The checks happen in a fixed order and the first one that fails decides the reason reported:
///
/// 1. `DEVKITPRO`, `DEVKITARM` and `CTRULIB` must all be configured,
/// 2. the host must not be Windows,
/// 3. `pkg-config` must be runnable,
/// 4. each of the [`REQUIRED_PACKAGES`] must be known to `pkg-config` when restricted to the portlibs.
///
/// A command the runner fails to launch at all counts the same as a command that ran unsuccessfully.
pub fn canBuild (config: &ToolchainConfig, runner: &dyn CommandRunner) -> Feasibility
{
	// Helpers to log the reason before disabling; an absent toolchain only shows up in debug output
	let disableQuietly = |reason: String| {
		tracing::debug!("{reason}... 3ds disabled.");
		Feasibility::Disabled(reason)
	};
	let disable = |reason: String| {
		tracing::warn!("{reason}... 3ds disabled.");
		Feasibility::Disabled(reason)
	};
	let succeeds = |command: &CommandSpec| match runner.run(command) {
		Ok(output) => output.success,
		Err(err) => {
			tracing::debug!("{err:#}");
			false
		}
	};

	// Toolchain locations
	if let Some(variable) = config.firstMissingVariable() {
		return disableQuietly(format!("{variable} not set"));
	}
	if config.hostIsWindows {
		return disableQuietly("Windows hosts are not supported".into());
	}

	// pkg-config and the portlibs
	if !succeeds(&CommandSpec::new("pkg-config").arg("--version")) {
		return disable("pkg-config not found".into());
	}
	for package in REQUIRED_PACKAGES {
		if !succeeds(&config.pkgConfigCommand().arg(package).arg("--modversion")) {
			return disable(format!("{package} not found"));
		}
	}

	// Done!
	tracing::info!("3ds enabled");
	Feasibility::Enabled
}
