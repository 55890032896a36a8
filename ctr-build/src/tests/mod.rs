//////
//
// Module definitions
//









//////
//
// Imports
//

// Standard library
use std::{cell::RefCell, io, path::PathBuf, sync::{Arc, Mutex}};

// Tracing library
use tracing_subscriber;

// Local imports
use crate::*;



//////
//
// Test helpers
//

/// A [`CommandRunner`] that answers every command via a closure instead of running anything, recording all commands it
/// was asked to run.
pub(crate) struct ScriptedRunner {
	handler: Box<dyn Fn(&CommandSpec) -> CommandOutput>,
	calls: RefCell<Vec<CommandSpec>>
}
impl ScriptedRunner
{
	pub fn new (handler: impl Fn(&CommandSpec) -> CommandOutput + 'static) -> Self {
		Self { handler: Box::new(handler), calls: RefCell::new(Vec::new()) }
	}

	/// A runner for which every command succeeds with the given output.
	pub fn succeeding (stdout: &'static str) -> Self {
		Self::new(move |_| CommandOutput::succeeded(stdout))
	}

	/// The command lines of all commands run so far.
	pub fn commandLines (&self) -> Vec<String> {
		self.calls.borrow().iter().map(CommandSpec::commandLine).collect()
	}

	pub fn calls (&self) -> Vec<CommandSpec> {
		self.calls.borrow().clone()
	}
}
impl CommandRunner for ScriptedRunner {
	fn run (&self, command: &CommandSpec) -> Result<CommandOutput> {
		self.calls.borrow_mut().push(command.clone());
		Ok((self.handler)(command))
	}
}

/// Log output collected by [`captureLog`].
#[derive(Clone,Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);
impl io::Write for LogBuffer
{
	fn write (&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush (&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Run the given closure with all events of at least the given level logged into a string, returning the closure's
/// result along with the log.
pub(crate) fn captureLog<T> (level: tracing::Level, func: impl FnOnce() -> T) -> (T, String)
{
	let buffer = LogBuffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_max_level(level)
		.with_ansi(false)
		.with_writer(move || writer.clone())
		.finish();
	let result = tracing::subscriber::with_default(subscriber, func);
	let log = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
	(result, log)
}

/// A toolchain configuration with all locations set.
pub(crate) fn completeToolchain () -> ToolchainConfig {
	ToolchainConfig {
		devkitPro: Some(PathBuf::from("/opt/devkitpro")),
		devkitArm: Some(PathBuf::from("/opt/devkitpro/devkitARM")),
		ctrulib: Some(PathBuf::from("/opt/devkitpro/libctru")),
		hostIsWindows: false
	}
}



//////
//
// Tests for functionality in the root module
//

#[test]
fn test_initTracing_idempotent() {
	initTracing();
	assert!(!initTracing());
}

#[test]
fn test_dependOnGeneratedFile()
{
	let tmp = tempfile::tempdir().unwrap();
	let existing = tmp.path().join("2d.h");
	std::fs::write(&existing, "x").unwrap();
	assert!(dependOnGeneratedFile(&existing).is_ok());
	assert!(dependOnGeneratedFile(tmp.path().join("missing.h")).is_err());
}
