//////
//
// Imports
//

// Standard library
use std::{collections::BTreeMap, error::Error, fmt::Display, fs, path::Path, str::FromStr};

// Anyhow library
use anyhow::{Context, Result};

// Serde library
use serde;
use serde_yaml_ng;



//////
//
// Errors
//

/// An error resulting from a string that is not a valid [`Toggle`] or [`BuildTarget`].
#[derive(Debug,PartialEq,Eq)]
pub struct InvalidValueError {
	/// What kind of value was expected.
	pub expected: &'static str,

	/// The offending string.
	pub value: String
}
impl Display for InvalidValueError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "InvalidValueError[`{}` is not a valid {}]", self.value, self.expected)
	}
}
impl Error for InvalidValueError {}



//////
//
// Enums
//

/// A `yes`/`no` switch as used for build options and feature flags.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,serde::Serialize,serde::Deserialize)]
#[serde(try_from="ToggleRepr", into="String")]
pub enum Toggle {
	Yes,
	No
}
impl Toggle
{
	///
	#[inline(always)]
	pub fn isYes (self) -> bool {
		self == Self::Yes
	}
}
impl From<bool> for Toggle {
	fn from (value: bool) -> Self {
		if value { Self::Yes } else { Self::No }
	}
}
impl From<Toggle> for String {
	fn from (value: Toggle) -> Self {
		value.to_string()
	}
}
impl FromStr for Toggle
{
	type Err = InvalidValueError;

	fn from_str (value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"yes" | "true" | "on" | "1" => Ok(Self::Yes),
			"no" | "false" | "off" | "0" => Ok(Self::No),
			_ => Err(InvalidValueError { expected: "toggle (yes/no)", value: value.to_owned() })
		}
	}
}
impl Display for Toggle {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Yes => write!(formatter, "yes"),
			Self::No => write!(formatter, "no")
		}
	}
}

/// What a [`Toggle`] may be written as in configuration files – YAML makes `true`/`false` booleans, but `yes`/`no`
/// strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ToggleRepr {
	Bool(bool),
	Text(String)
}
impl TryFrom<ToggleRepr> for Toggle
{
	type Error = InvalidValueError;

	fn try_from (repr: ToggleRepr) -> Result<Self, Self::Error> {
		match repr {
			ToggleRepr::Bool(value) => Ok(value.into()),
			ToggleRepr::Text(text) => text.parse()
		}
	}
}

/// The kind of engine build to produce.
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(rename_all="snake_case")]
pub enum BuildTarget {
	/// Unoptimized build with debug checks and memory debugging.
	#[default]
	Debug,

	/// Optimized build that retains debug checks.
	ReleaseDebug,

	/// Fully optimized build.
	Release
}
impl FromStr for BuildTarget
{
	type Err = InvalidValueError;

	fn from_str (value: &str) -> Result<Self, Self::Err> {
		match value.trim() {
			"debug" => Ok(Self::Debug),
			"release_debug" => Ok(Self::ReleaseDebug),
			"release" => Ok(Self::Release),
			_ => Err(InvalidValueError { expected: "build target", value: value.to_owned() })
		}
	}
}
impl Display for BuildTarget {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Debug => write!(formatter, "debug"),
			Self::ReleaseDebug => write!(formatter, "release_debug"),
			Self::Release => write!(formatter, "release")
		}
	}
}



//////
//
// Structs
//

/// A platform-specific build option the orchestrator should offer to users.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct BuildOption {
	pub name: &'static str,
	pub help: &'static str,
	pub default: Toggle
}

/// The feature flags of a build, i.e. which engine modules and third-party components are switched on. Flags nobody
/// set are considered off.
#[derive(Debug,Clone,Default,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, Toggle>);
impl FeatureFlags
{
	/// The flags the 3DS platform starts from, see [`getFlags`].
	pub fn platformDefaults () -> Self {
		Self(getFlags().into_iter().map(|(name, toggle)| (name.to_owned(), toggle)).collect())
	}

	///
	pub fn get (&self, name: &str) -> Option<Toggle> {
		self.0.get(name).copied()
	}

	///
	pub fn isEnabled (&self, name: &str) -> bool {
		self.get(name).is_some_and(Toggle::isYes)
	}

	/// Set the given flag, returning its previous value if it had one.
	pub fn set (&mut self, name: impl Into<String>, toggle: Toggle) -> Option<Toggle> {
		self.0.insert(name.into(), toggle)
	}

	/// Iterate over all flags in name order.
	pub fn iter (&self) -> impl Iterator<Item=(&str, Toggle)> {
		self.0.iter().map(|(name, toggle)| (name.as_str(), *toggle))
	}
}

/// The choices a user made for a particular build.
#[derive(Debug,Clone,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
#[serde(default)]
pub struct BuildOptions {
	/// The kind of build.
	pub target: BuildTarget,

	/// Whether to add debug symbols to release builds (option `debug_release`).
	#[serde(alias="debug_release")]
	pub debugRelease: Toggle,

	/// Feature flags overriding the [platform defaults](FeatureFlags::platformDefaults).
	pub flags: FeatureFlags
}
impl Default for BuildOptions {
	fn default () -> Self { Self {
		target: BuildTarget::default(),
		debugRelease: getOpts().iter().find(|opt| opt.name == "debug_release").map(|opt| opt.default)
			.unwrap_or(Toggle::No),
		flags: FeatureFlags::default()
	}}
}
impl BuildOptions
{
	/// Parse options from YAML text. Missing keys take their default values.
	pub fn fromYaml (yaml: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(yaml)?)
	}

	/// Load options from a YAML file.
	pub fn fromYamlFile (filename: impl AsRef<Path>) -> Result<Self> {
		let yaml = fs::read_to_string(filename.as_ref()).with_context(
			|| format!("Could not read build options '{}'", filename.as_ref().display())
		)?;
		Self::fromYaml(&yaml)
	}

	/// The effective feature flags: the platform defaults with the user's overrides applied.
	pub fn featureFlags (&self) -> FeatureFlags {
		let mut flags = FeatureFlags::platformDefaults();
		for (name, toggle) in self.flags.iter() {
			flags.set(name, toggle);
		}
		flags
	}
}



//////
//
// Functions
//

/// The build options the 3DS platform adds to the orchestrator.
pub fn getOpts () -> Vec<BuildOption> {
	vec![
		BuildOption { name: "debug_release", help: "Add debug symbols to release version", default: Toggle::No }
	]
}

/// The feature flag defaults of the 3DS platform, in the order the orchestrator should apply them.
pub fn getFlags () -> Vec<(&'static str, Toggle)> {
	use Toggle::*;
	vec![
		("tools", No),
		("squish", No),
		("theora", No),
		("vorbis", Yes),
		("speex", No),
		("dds", No),
		("pvr", No),
		("etc1", No),
		("builtin_zlib", No),
		("openssl", No),
		("musepack", No)
	]
}
