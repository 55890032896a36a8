//////
//
// Imports
//

// Standard library
use std::{fmt::Display, io, process::Command};

// Anyhow library
use anyhow::{Context, Result};

// Tracing library
use tracing;



//////
//
// Structs
//

/// Describes a single invocation of an external program.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct CommandSpec {
	/// The executable to run, looked up in `PATH` if not a path itself.
	pub program: String,

	/// The arguments to pass to the program.
	pub args: Vec<String>,

	/// Environment variables to set for the program in addition to the inherited environment. An empty value still
	/// *sets* the variable (to the empty string), it does not remove it.
	pub env: Vec<(String, String)>
}
impl CommandSpec
{
	///
	pub fn new (program: impl Into<String>) -> Self {
		Self { program: program.into(), ..Default::default() }
	}

	///
	pub fn arg (mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	///
	pub fn args<Str: Into<String>> (mut self, args: impl IntoIterator<Item=Str>) -> Self {
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	///
	pub fn env (mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.env.push((name.into(), value.into()));
		self
	}

	/// Render the invocation the way it would be typed into a POSIX shell (without any quoting), e.g.
	/// `PKG_CONFIG_PATH= pkg-config zlib --modversion`.
	pub fn commandLine (&self) -> String {
		ctr_util::joinSpaced(
			self.env.iter().map(|(name, value)| format!("{name}={value}"))
				.chain(std::iter::once(self.program.clone()))
				.chain(self.args.iter().cloned())
		)
	}
}
impl Display for CommandSpec {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "{}", self.commandLine())
	}
}

/// The result of running a [`CommandSpec`].
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct CommandOutput {
	/// Whether the program ran and exited with a success status.
	pub success: bool,

	/// The exit code, if the program ran and terminated normally.
	pub exitCode: Option<i32>,

	/// Captured standard output (lossily decoded as UTF-8).
	pub stdout: String,

	/// Captured standard error (lossily decoded as UTF-8).
	pub stderr: String
}
impl CommandOutput
{
	/// Convenience constructor for a successful run that printed `stdout`.
	pub fn succeeded (stdout: impl Into<String>) -> Self {
		Self { success: true, exitCode: Some(0), stdout: stdout.into(), stderr: String::new() }
	}

	/// Convenience constructor for a failed run with the given exit code that printed `stderr`.
	pub fn failed (exitCode: Option<i32>, stderr: impl Into<String>) -> Self {
		Self { success: false, exitCode, stdout: String::new(), stderr: stderr.into() }
	}
}



//////
//
// Traits
//

/// The seam through which all external programs (`pkg-config`, `picasso`) get invoked. Build scripts use the
/// [`SystemCommandRunner`], tests substitute scripted implementations.
pub trait CommandRunner
{
	/// Run the given command to completion and capture its output.
	///
	/// # Returns
	///
	/// The [`CommandOutput`] of the run. A program that could not be found at all is reported as an unsuccessful
	/// output rather than an error, just like a shell would report it. Errors are reserved for failures of the runner
	/// itself.
	fn run (&self, command: &CommandSpec) -> Result<CommandOutput>;
}



//////
//
// Classes
//

/// Runs commands as child processes of the current process.
#[derive(Debug,Clone,Copy,Default)]
pub struct SystemCommandRunner;
impl CommandRunner for SystemCommandRunner
{
	fn run (&self, command: &CommandSpec) -> Result<CommandOutput>
	{
		tracing::debug!("Running `{command}`");
		let mut process = Command::new(&command.program);
		process.args(&command.args);
		for (name, value) in &command.env {
			process.env(name, value);
		}
		match process.output() {
			Ok(output) => Ok(CommandOutput {
				success: output.status.success(),
				exitCode: output.status.code(),
				stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
				stderr: String::from_utf8_lossy(&output.stderr).into_owned()
			}),
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				tracing::debug!("`{}` not found", command.program);
				Ok(CommandOutput::failed(None, format!("{}: {err}", command.program)))
			},
			Err(err) => Err(err).context(format!("Failed to launch `{command}`"))
		}
	}
}
