//////
//
// Imports
//

// Standard library
use std::{env, fmt::Display, str::FromStr};

// Anyhow library
use anyhow::{anyhow, Context, Result};



//////
//
// Constants
//

/// The target triple *rustc* uses for the Nintendo 3DS.
pub const CTR_TARGET_TRIPLE: &str = "armv6k-nintendo-3ds";



//////
//
// Structs
//

/// Representation of the [target triple](https://doc.rust-lang.org/cargo/appendix/glossary.html#target) that allows
/// easy individual access to all (sub-)components of the triple.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct TargetTriple {
	full: String,
	arch: String,
	vendor: String,
	sys: String,
	abi: String
}
impl TargetTriple
{
	pub fn fromString (triple: String) -> Result<Self>
	{
		let generateTripleErrorMsg = || {
			Err(anyhow!("Invalid target triple: {triple}"))
		};

		let tripleElems: Vec<&str> = triple.splitn(3, '-').collect();
		if tripleElems.len() < 3 || tripleElems.iter().any(|elem| elem.is_empty()) {
			return generateTripleErrorMsg();
		}
		let (sys, abi) = {
			let sys_abi: Vec<&str> = tripleElems[2].split('-').collect();
			if sys_abi.len() > 2 {
				return generateTripleErrorMsg();
			};
			(sys_abi[0].to_owned(), sys_abi.get(1).copied().unwrap_or("").to_owned())
		};
		Ok(TargetTriple {
			arch: tripleElems[0].to_owned(),
			vendor: tripleElems[1].to_owned(),
			sys, abi,
			full: triple
		})
	}

	/// Obtain the triple of the current *Cargo* build script invocation from the `TARGET` environment variable.
	pub fn fromCargoEnv () -> Result<Self> {
		Self::fromString(
			env::var("TARGET").context("Cargo did not provide the `TARGET` environment variable")?
		)
	}

	pub fn full (&self) -> &str {
		&self.full
	}
	pub fn arch (&self) -> &str {
		&self.arch
	}
	pub fn vendor (&self) -> &str {
		&self.vendor
	}
	pub fn sys (&self) -> &str {
		&self.sys
	}
	/// The ABI component, or an empty string if the triple has none.
	pub fn abi (&self) -> &str {
		&self.abi
	}

	/// Whether this is the Nintendo 3DS target.
	pub fn isCtr (&self) -> bool {
		self.vendor == "nintendo" && self.sys == "3ds"
	}
}
impl FromStr for TargetTriple {
	type Err = anyhow::Error;
	fn from_str (triple: &str) -> anyhow::Result<Self> {
		Self::fromString(triple.to_owned())
	}
}
impl Display for TargetTriple {
	fn fmt (&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "{}", self.full)
	}
}
