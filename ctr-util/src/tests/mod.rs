//////
//
// Tests for functionality in the root module
//

////
// Imports

// Standard library
use std::path::{Path, PathBuf};

// Local imports
use crate::*;


////
// Tests

#[test]
fn test_joinSpaced()
{
	assert_eq!(joinSpaced(["-g", "-O2"]), "-g -O2");
	assert_eq!(joinSpaced(Vec::<String>::new()), "");
	assert_eq!(joinSpaced(["", "-Wall", "", "-g2", ""]), "-Wall -g2");
	assert_eq!(joinSpaced(vec!["single".to_string()]), "single");
}



//////
//
// Tests for the `path` module
//

#[test]
fn test_normalizeToAnchor()
{
	let anchor = Path::new("/project/crate");
	assert_eq!(path::normalizeToAnchor(anchor, "shader/../shader/2d.pica"), PathBuf::from("/project/crate/shader/2d.pica"));
	assert_eq!(path::normalizeToAnchor(anchor, "/abs/3d.pica"), PathBuf::from("/abs/3d.pica"));
}

#[test]
fn test_withSuffix()
{
	assert_eq!(path::withSuffix("shaders/2d.pica", ".shbin"), PathBuf::from("shaders/2d.shbin"));
	assert_eq!(path::withSuffix("out/3d.shbin", ".h"), PathBuf::from("out/3d.h"));
	assert_eq!(path::withSuffix("noext", ".h"), PathBuf::from("noext.h"));
	// only the final extension is replaced
	assert_eq!(path::withSuffix("a/b.c.pica", ".shbin"), PathBuf::from("a/b.c.shbin"));
}

#[test]
fn test_hasSuffix()
{
	assert!(path::hasSuffix("shader/2d.pica", ".pica"));
	assert!(!path::hasSuffix("shader/2d.pica.bak", ".pica"));
	assert!(!path::hasSuffix("shader/", ".pica"));
}



//////
//
// Tests for the `fs` module
//

#[test]
fn test_doRecursively_visitsAllInOrder()
{
	let tmp = tempfile::tempdir().unwrap();
	std::fs::create_dir_all(tmp.path().join("b/nested")).unwrap();
	std::fs::write(tmp.path().join("a.pica"), b"a").unwrap();
	std::fs::write(tmp.path().join("b/nested/c.pica"), b"c").unwrap();

	let mut visitedFiles = Vec::new();
	let mut visitedDirs = Vec::new();
	fs::doRecursively(tmp.path(), |_, destStack, filetype| {
		if filetype.is_dir() { visitedDirs.push(destStack.to_owned()) }
		else                 { visitedFiles.push(destStack.to_owned()) }
		Ok(())
	}).unwrap();

	assert_eq!(visitedFiles, vec![PathBuf::from("a.pica"), PathBuf::from("b/nested/c.pica")]);
	assert_eq!(visitedDirs, vec![PathBuf::from(""), PathBuf::from("b"), PathBuf::from("b/nested")]);
}

#[test]
fn test_doRecursively_propagatesErrors()
{
	let tmp = tempfile::tempdir().unwrap();
	std::fs::write(tmp.path().join("x"), b"x").unwrap();
	let result = fs::doRecursively(tmp.path(), |_, _, filetype| {
		if filetype.is_dir() { Ok(()) } else { Err(anyhow::anyhow!("boom")) }
	});
	assert_eq!(result.unwrap_err().to_string(), "boom");
}

#[test]
fn test_writeReplacing()
{
	let tmp = tempfile::tempdir().unwrap();
	let target = tmp.path().join("deep/er/file.h");
	fs::writeReplacing(&target, "first version, rather long").unwrap();
	fs::writeReplacing(&target, "second").unwrap();
	assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
}



//////
//
// Tests for the `meta` module
//

#[test]
fn test_TargetTriple_ctr()
{
	let triple: meta::TargetTriple = meta::CTR_TARGET_TRIPLE.parse().unwrap();
	assert_eq!(triple.arch(), "armv6k");
	assert_eq!(triple.vendor(), "nintendo");
	assert_eq!(triple.sys(), "3ds");
	assert_eq!(triple.abi(), "");
	assert!(triple.isCtr());
	assert_eq!(triple.to_string(), "armv6k-nintendo-3ds");
}

#[test]
fn test_TargetTriple_withAbi()
{
	let triple: meta::TargetTriple = "x86_64-unknown-linux-gnu".parse().unwrap();
	assert_eq!(triple.sys(), "linux");
	assert_eq!(triple.abi(), "gnu");
	assert!(!triple.isCtr());
}

#[test]
fn test_TargetTriple_invalid()
{
	assert!("armv6k".parse::<meta::TargetTriple>().is_err());
	assert!("a-b-c-d-e".parse::<meta::TargetTriple>().is_err());
	assert!("a--c".parse::<meta::TargetTriple>().is_err());
}
