//////
//
// Imports
//

// Standard library
use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};

// Anyhow library
use anyhow::Result;

// Tracing library
use tracing;

// Local imports
use crate::{shader, util, process::{CommandRunner, CommandSpec}};



//////
//
// Constants
//

/// Name of the rule assembling PICA200 shader sources into shader binaries.
pub const PICA: &str = "PICA";

/// Name of the rule turning shader binaries into embeddable C headers.
pub const PICA_HEADER: &str = "PICA_HEADER";



//////
//
// Types
//

/// The signature of the function a [`BuildRule`] uses to produce its `target` file from its `source` file. Any external
/// program must be run through the provided `runner`.
pub type Transform = fn(source: &Path, target: &Path, runner: &dyn CommandRunner) -> Result<()>;



//////
//
// Classes
//

/// A rule that produces files with one suffix from files with another suffix.
#[derive(Debug,Clone)]
pub struct BuildRule {
	name: String,
	srcSuffix: String,
	suffix: String,
	transform: Transform
}
impl BuildRule
{
	/// Create a rule called `name` that turns `*<srcSuffix>` files into `*<suffix>` files using `transform`. Suffixes
	/// include the leading dot.
	pub fn new (name: impl Into<String>, srcSuffix: impl Into<String>, suffix: impl Into<String>, transform: Transform)
	-> Self { Self {
		name: name.into(), srcSuffix: srcSuffix.into(), suffix: suffix.into(), transform
	}}

	///
	pub fn name (&self) -> &str {
		&self.name
	}

	///
	pub fn srcSuffix (&self) -> &str {
		&self.srcSuffix
	}

	///
	pub fn suffix (&self) -> &str {
		&self.suffix
	}

	/// Whether this rule consumes the given file.
	pub fn accepts (&self, source: impl AsRef<Path>) -> bool {
		util::path::hasSuffix(source, &self.srcSuffix)
	}

	/// The file this rule would produce from `source` when writing into `outDir`.
	pub fn targetFor (&self, source: impl AsRef<Path>, outDir: impl AsRef<Path>) -> PathBuf {
		let filename = source.as_ref().file_name().map(PathBuf::from).unwrap_or_default();
		util::path::withSuffix(outDir.as_ref().join(filename), &self.suffix)
	}

	/// Produce `target` from `source`. Errors of the transform are passed on as they are.
	pub fn apply (&self, source: &Path, target: &Path, runner: &dyn CommandRunner) -> Result<()> {
		tracing::debug!("{}: '{}' -> '{}'", self.name, source.display(), target.display());
		(self.transform)(source, target, runner)
	}
}

/// The registry of custom [`BuildRule`]s, looked up by name, by suffix pair or by the file they consume.
#[derive(Debug,Clone,Default)]
pub struct BuildRules {
	rules: BTreeMap<String, BuildRule>
}
impl BuildRules
{
	/// Register a rule. A rule registered earlier under the same name gets replaced and is returned.
	pub fn register (&mut self, rule: BuildRule) -> Option<BuildRule>
	{
		let replaced = self.rules.insert(rule.name.clone(), rule);
		if let Some(replaced) = &replaced {
			tracing::debug!("Replaced build rule '{}'", replaced.name);
		}
		replaced
	}

	///
	pub fn get (&self, name: &str) -> Option<&BuildRule> {
		self.rules.get(name)
	}

	/// Find the rule that turns `*<srcSuffix>` files into `*<suffix>` files.
	pub fn lookup (&self, srcSuffix: &str, suffix: &str) -> Option<&BuildRule> {
		self.rules.values().find(|rule| rule.srcSuffix == srcSuffix && rule.suffix == suffix)
	}

	/// All rules that consume the given file, in name order.
	pub fn forSource (&self, source: impl AsRef<Path>) -> Vec<&BuildRule> {
		self.rules.values().filter(|rule| rule.accepts(source.as_ref())).collect()
	}

	/// The sequence of rules to apply, one after the other, to get from `source` to a file no rule consumes anymore.
	/// Where several rules consume the same file, the first one in name order is taken. The chain never visits a rule
	/// twice.
	pub fn chainFor (&self, source: impl AsRef<Path>) -> Vec<&BuildRule>
	{
		let mut chain: Vec<&BuildRule> = Vec::new();
		let mut current = source.as_ref().to_owned();
		loop {
			let next = self.forSource(&current).into_iter().find(
				|rule| !chain.iter().any(|applied| applied.name == rule.name)
			);
			let Some(rule) = next else {
				return chain;
			};
			current = rule.targetFor(&current, "");
			chain.push(rule);
		}
	}

	/// Iterate over all rules in name order.
	pub fn iter (&self) -> impl Iterator<Item=&BuildRule> {
		self.rules.values()
	}

	///
	pub fn len (&self) -> usize {
		self.rules.len()
	}

	///
	pub fn isEmpty (&self) -> bool {
		self.rules.is_empty()
	}
}



//////
//
// Functions
//

/// The rule running *picasso* on `.pica` sources to obtain `.shbin` binaries.
pub fn picaRule () -> BuildRule {
	BuildRule::new(PICA, shader::SOURCE_SUFFIX, shader::BINARY_SUFFIX, assembleShader)
}

/// The rule embedding `.shbin` binaries into `.h` headers.
pub fn picaHeaderRule () -> BuildRule {
	BuildRule::new(PICA_HEADER, shader::BINARY_SUFFIX, shader::HEADER_SUFFIX, generateShaderHeader)
}

/// [`Transform`] of the [`PICA`] rule.
pub fn assembleShader (source: &Path, target: &Path, runner: &dyn CommandRunner) -> Result<()>
{
	if let Some(parent) = target.parent() && !parent.as_os_str().is_empty() {
		fs::create_dir_all(parent)?;
	}
	let picasso = shader::compile::PicassoCommand::forFiles(source, target);
	let output = runner.run(&CommandSpec::new(picasso.program()).args(picasso.args()))?;
	if !output.success {
		return Err(shader::compile::ShaderCompileError {
			source: source.to_owned(), exitCode: output.exitCode, stderr: output.stderr
		}.into());
	}
	tracing::info!("Assembled shader '{}'", source.display());
	Ok(())
}

/// [`Transform`] of the [`PICA_HEADER`] rule.
pub fn generateShaderHeader (source: &Path, target: &Path, _runner: &dyn CommandRunner) -> Result<()> {
	Ok(shader::emitHeaderFile(source, target)?)
}
