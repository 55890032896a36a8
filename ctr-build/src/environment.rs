//////
//
// Imports
//

// Standard library
use std::{collections::BTreeMap, error::Error, fmt::Display, fs, path::Path};

// Anyhow library
use anyhow::{Context, Result};

// Serde library
use serde;
use serde_json;

// Tracing library
use tracing;

// Local imports
use crate::{
	detect::ToolchainConfig, options::{BuildOptions, BuildTarget}, process::CommandRunner,
	rules::{self, BuildRules}
};



//////
//
// Constants
//

/// Prefix of the cross toolchain executables.
pub const TOOL_PREFIX: &str = "arm-none-eabi-";

/// Code generation flags for the ARM11 MPCore of the 3DS.
const ARCH_FLAGS: [&str; 5] = ["-march=armv6k", "-mtune=mpcore", "-mfloat-abi=hard", "-mtp=soft", "-mword-relocations"];

/// Preprocessor definitions every 3DS build gets.
const PLATFORM_DEFINES: [&str; 4] = ["-D_3DS", "-DARM11", "-DNEED_LONG_INT", "-DLIBC_FILEIO_ENABLED"];

/// Linker flags every 3DS build gets.
const PLATFORM_LINKFLAGS: [&str; 5] = ["-specs=3dsx.specs", "-g", "-march=armv6k", "-mtune=mpcore", "-mfloat-abi=hard"];

/// `pkg-config` options that take their value as the next token, and whether the pair goes to the compiler flags
/// and/or the linker flags.
const PAIRED_OPTIONS: [(&str, bool, bool); 9] = [
	("-include", true, false), ("-imacros", true, false), ("-iquote", true, false), ("-idirafter", true, false),
	("-isystem", true, false), ("-isysroot", true, true), ("-arch", true, true), ("-framework", false, true),
	("-Xlinker", false, true)
];

/// Optional components that get their flags from `pkg-config` when switched on, as pairs of feature flag and package.
const PKG_CONFIG_COMPONENTS: [(&str, &str); 2] = [("openssl", "openssl"), ("freetype", "freetype2")];



//////
//
// Errors
//

/// An error resulting from a `pkg-config` query for compile and link flags that did not succeed.
#[derive(Debug)]
pub struct PkgConfigError {
	/// The package that was queried.
	pub package: String,

	/// Whatever `pkg-config` printed to its error stream.
	pub stderr: String
}
impl Display for PkgConfigError {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "PkgConfigError[`{}`: {}]", self.package, self.stderr.trim())
	}
}
impl Error for PkgConfigError {}



//////
//
// Classes
//

/// The compiler and linker configuration of a 3DS build, plus the custom [build rules](BuildRules) it needs.
///
/// The flag lists are append-only and keep their order, duplicates included, as they get handed to the compiler in
/// exactly that form. Only the flag tables are serialized; the rules have to be re-registered by [`configure`] after
/// loading an environment from disk.
#[derive(Debug,Clone,Default,serde::Serialize,serde::Deserialize)]
#[serde(default)]
pub struct BuildEnvironment {
	/// Engine modules that cannot be built for the platform.
	pub disabledModules: Vec<String>,

	/// Pointer width of the target.
	pub bits: Option<String>,

	/// Executables to use, keyed by their role (`CC`, `CXX`, `LD`, `AR`, `RANLIB`, `AS`).
	pub tools: BTreeMap<String, String>,

	/// Flags for both the C and the C++ compiler.
	pub ccFlags: Vec<String>,

	/// Include directories.
	pub cppPath: Vec<String>,

	/// Library search directories.
	pub libPath: Vec<String>,

	/// Flags for the linker.
	pub linkFlags: Vec<String>,

	/// Libraries to link against.
	pub libs: Vec<String>,

	/// Custom build rules.
	#[serde(skip)]
	pub rules: BuildRules
}
impl BuildEnvironment
{
	///
	pub fn fromFile (filename: impl AsRef<Path>) -> Result<Self> {
		let file = fs::File::open(filename.as_ref()).with_context(
			|| format!("Could not open build environment '{}'", filename.as_ref().display())
		)?;
		Ok(serde_json::from_reader(file)?)
	}

	///
	pub fn writeToFile (&self, filename: impl AsRef<Path>) -> Result<()> {
		Ok(serde_json::to_writer_pretty(fs::File::create(filename)?, self)?)
	}

	/// The executable configured for the given role, e.g. `"CC"`.
	pub fn tool (&self, role: &str) -> Option<&str> {
		self.tools.get(role).map(String::as_str)
	}

	///
	pub fn setTool (&mut self, role: impl Into<String>, executable: impl Into<String>) {
		self.tools.insert(role.into(), executable.into());
	}

	///
	pub fn appendCcFlags<Str: Into<String>> (&mut self, flags: impl IntoIterator<Item=Str>) {
		self.ccFlags.extend(flags.into_iter().map(Into::into));
	}

	///
	pub fn appendCppPath<Str: Into<String>> (&mut self, dirs: impl IntoIterator<Item=Str>) {
		self.cppPath.extend(dirs.into_iter().map(Into::into));
	}

	///
	pub fn appendLibPath<Str: Into<String>> (&mut self, dirs: impl IntoIterator<Item=Str>) {
		self.libPath.extend(dirs.into_iter().map(Into::into));
	}

	///
	pub fn appendLinkFlags<Str: Into<String>> (&mut self, flags: impl IntoIterator<Item=Str>) {
		self.linkFlags.extend(flags.into_iter().map(Into::into));
	}

	///
	pub fn appendLibs<Str: Into<String>> (&mut self, libs: impl IntoIterator<Item=Str>) {
		self.libs.extend(libs.into_iter().map(Into::into));
	}

	/// Merge the output of a `pkg-config --cflags --libs` query: include directories, library directories and
	/// libraries go to their respective lists, `-pthread` and `-fopenmp` to both compiler and linker flags, linker
	/// pass-through flags (`-Wl,…`, `-rdynamic`) to the linker flags, and all remaining options to the compiler flags.
	/// Tokens that aren't options (e.g. full paths to static libraries) are libraries. Options that take their value as
	/// the following token (`-isystem <dir>`, `-framework <name>`, …) stay together with it, while such an option at the
	/// very end of the output, with no value following, is dropped.
	pub fn parseConfig (&mut self, pkgConfigOutput: &str)
	{
		let mut tokens = pkgConfigOutput.split_ascii_whitespace();
		while let Some(token) = tokens.next()
		{
			// Options whose value always comes as the next token
			if let Some(&(_, toCc, toLink)) = PAIRED_OPTIONS.iter().find(|(option, ..)| *option == token) {
				let Some(value) = tokens.next() else {
					tracing::debug!("Dropping `{token}` that lacks a value");
					continue;
				};
				if toCc {
					self.ccFlags.extend([token.to_owned(), value.to_owned()]);
				}
				if toLink {
					self.linkFlags.extend([token.to_owned(), value.to_owned()]);
				}
				continue;
			}

			// Options whose value may come as a separate token
			let (option, value) = match token {
				"-I" | "-L" | "-l" => match tokens.next() {
					Some(value) => (token, value),
					None => {
						tracing::debug!("Dropping `{token}` that lacks a value");
						continue;
					}
				},
				_ if token.len() > 2 && token.get(..2).is_some_and(|prefix| ["-I", "-L", "-l"].contains(&prefix)) =>
					token.split_at(2),
				_ => ("", token)
			};
			match option {
				"-I" => self.cppPath.push(value.to_owned()),
				"-L" => self.libPath.push(value.to_owned()),
				"-l" => self.libs.push(value.to_owned()),
				_ if value == "-pthread" || value == "-fopenmp" => {
					self.ccFlags.push(value.to_owned());
					self.linkFlags.push(value.to_owned());
				},
				_ if value.starts_with("-Wl,") || value == "-rdynamic" => self.linkFlags.push(value.to_owned()),
				_ if !value.starts_with('-') => self.libs.push(value.to_owned()),
				_ => self.ccFlags.push(value.to_owned())
			}
		}
	}

	/// Whether the given entry of [`libs`](Self::libs) is the path to a library file rather than a library name.
	fn isLibraryFile (lib: &str) -> bool {
		Path::new(lib).parent().is_some_and(|parent| !parent.as_os_str().is_empty())
	}

	/// The instructions that make *Cargo* link the way this environment says, one `cargo::` line each.
	pub fn cargoDirectives (&self) -> Vec<String>
	{
		let mut directives = Vec::with_capacity(self.libPath.len() + self.libs.len() + self.linkFlags.len());
		directives.extend(self.libPath.iter().map(|dir| format!("cargo::rustc-link-search=native={dir}")));
		directives.extend(self.libs.iter().filter(|lib| !Self::isLibraryFile(lib)).map(
			|lib| format!("cargo::rustc-link-lib={lib}")
		));
		directives.extend(self.libs.iter().filter(|lib| Self::isLibraryFile(lib)).map(
			|lib| format!("cargo::rustc-link-arg={lib}")
		));
		directives.extend(self.linkFlags.iter().map(|flag| format!("cargo::rustc-link-arg={flag}")));
		directives
	}

	/// Print the [cargo directives](Self::cargoDirectives) to standard output for *Cargo* to pick up.
	pub fn emitCargoDirectives (&self) {
		for directive in self.cargoDirectives() {
			println!("{directive}");
		}
	}
}



//////
//
// Functions
//

/// Set up the given environment for building for the 3DS.
///
/// Registers the [`PICA`](rules::PICA) and [`PICA_HEADER`](rules::PICA_HEADER) rules, selects the cross toolchain
/// and appends all compiler and linker flags for the platform and the requested build target. Components switched on
/// in the feature flags that need third-party libraries (`openssl`, `freetype`) get their flags by querying
/// `pkg-config` through `runner`, restricted to the portlibs of the toolchain.
///
/// # Arguments
///
/// * `env` – The environment to extend.
/// * `options` – The user's build choices.
/// * `toolchain` – Where the cross toolchain lives. *devkitPro* and *libctru* must be configured.
/// * `runner` – Runs `pkg-config` if needed.
///
/// # Returns
///
/// Nothing in case of success, or an error if the toolchain is incomplete or a `pkg-config` query fails. In that case
/// `env` may have been partially extended already.
pub fn configure (
	env: &mut BuildEnvironment, options: &BuildOptions, toolchain: &ToolchainConfig, runner: &dyn CommandRunner
) -> Result<()>
{
	////
	// Preamble

	let devkitPro = toolchain.requireDevkitPro()?.display().to_string();
	let ctrulib = toolchain.requireCtrulib()?.display().to_string();
	let flags = options.featureFlags();


	////
	// Platform basics

	env.disabledModules.push("enet".into());
	env.rules.register(rules::picaRule());
	env.rules.register(rules::picaHeaderRule());
	env.bits = Some("32".into());

	env.appendCppPath(["#platform/3ds"]);
	for (role, tool) in [("CC", "gcc"), ("CXX", "g++"), ("LD", "g++"), ("AR", "ar"), ("RANLIB", "ranlib"), ("AS", "as")] {
		env.setTool(role, format!("{TOOL_PREFIX}{tool}"));
	}


	////
	// Flags

	env.appendCcFlags(ARCH_FLAGS);
	env.appendCcFlags(["-fomit-frame-pointer"]);

	env.appendCppPath([format!("{devkitPro}/portlibs/armv6k/include"), format!("{devkitPro}/portlibs/3ds/include")]);
	env.appendLibPath([format!("{devkitPro}/portlibs/armv6k/lib"), format!("{devkitPro}/portlibs/3ds/lib")]);

	env.appendLinkFlags(PLATFORM_LINKFLAGS);
	env.appendCppPath([format!("{ctrulib}/include")]);
	env.appendLibPath([format!("{ctrulib}/lib")]);
	env.appendLibs(["citro3d", "ctru"]);
	env.appendLibs(["png", "z"]);

	env.appendCcFlags(PLATFORM_DEFINES);
	env.appendCcFlags(targetFlags(options.target, options.debugRelease.isYes()));


	////
	// Third-party components

	for (flag, package) in PKG_CONFIG_COMPONENTS {
		if flags.isEnabled(flag) {
			let command = toolchain.pkgConfigCommand().arg(package).arg("--cflags").arg("--libs");
			let output = runner.run(&command)?;
			if !output.success {
				return Err(PkgConfigError { package: package.into(), stderr: output.stderr }.into());
			}
			env.parseConfig(&output.stdout);
		}
	}

	// Done!
	tracing::info!("Configured 3ds build environment for target '{}'", options.target);
	Ok(())
}

/// The compiler flags specific to the given build target.
pub fn targetFlags (target: BuildTarget, debugRelease: bool) -> Vec<&'static str>
{
	match target {
		BuildTarget::Release => if debugRelease { vec!["-g2"] } else { vec!["-O3"] },
		BuildTarget::ReleaseDebug => {
			let mut flags = vec!["-O2", "-ffast-math", "-DDEBUG_ENABLED"];
			if debugRelease {
				flags.push("-g2");
			}
			flags
		},
		BuildTarget::Debug => vec!["-g2", "-Wall", "-DDEBUG_ENABLED", "-DDEBUG_MEMORY_ENABLED"]
	}
}
