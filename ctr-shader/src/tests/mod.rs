//////
//
// Imports
//

// Standard library
use std::path::{Path, PathBuf};

// Local imports
use crate::*;
use crate::header::*;



//////
//
// Tests for the `header` module
//

#[test]
fn test_emitHeader_empty() {
	assert_eq!(
		emitHeader(&[], "foo", "x.shbin"),
		"/* Auto-generated from x.shbin */\nstatic uint8_t shader_builtin_foo[] =\n{};"
	);
}

#[test]
fn test_emitHeader_exactFormat() {
	assert_eq!(
		emitHeader(&[0, 255, 16], "test", "a.shbin"),
		"/* Auto-generated from a.shbin */\nstatic uint8_t shader_builtin_test[] =\n{0,255,16};"
	);
}

#[test]
fn test_emitHeader_singleByte() {
	let header = emitHeader(&[7], "one", "one.shbin");
	assert!(header.ends_with("\n{7};"));
	assert!(!header.ends_with('\n'));
}

#[test]
fn test_emitHeader_elementCountAndRange()
{
	for len in [0usize, 1, 2, 17, 256, 1000] {
		let bytes: Vec<u8> = (0..len).map(|i| (i*37 % 256) as u8).collect();
		let header = emitHeader(&bytes, "n", "l");
		let body = &header[header.rfind('{').unwrap()+1 .. header.rfind('}').unwrap()];
		let elems: Vec<&str> = if body.is_empty() { vec![] } else { body.split(',').collect() };
		assert_eq!(elems.len(), len);
		for elem in elems {
			let value: u32 = elem.parse().unwrap();
			assert!(value <= 255);
		}
		assert!(!body.contains(' '));
		assert!(!body.ends_with(','));
	}
}

#[test]
fn test_emitHeader_parsesBack()
{
	let bytes: Vec<u8> = (0..=255).collect();
	let header = emitHeader(&bytes, "all", "all.shbin");
	assert_eq!(parseHeaderBody(&header).unwrap(), bytes);
	assert_eq!(parseHeaderBody(&emitHeader(&[], "none", "x")).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_emitHeader_idempotent() {
	let bytes = [1u8, 2, 3, 200];
	assert_eq!(emitHeader(&bytes, "same", "s.shbin"), emitHeader(&bytes, "same", "s.shbin"));
}

#[test]
fn test_emitHeader_symbolNameVerbatim()
{
	// No sanitization is performed on the symbol name
	let header = emitHeader(&[1], "we!rd-name $*/", "p");
	assert!(header.contains("static uint8_t shader_builtin_we!rd-name $*/[] =\n"));
}

#[test]
fn test_emitHeader_provenanceVerbatim() {
	let header = emitHeader(&[1], "x", "build/shaders/2d.shbin");
	assert!(header.starts_with("/* Auto-generated from build/shaders/2d.shbin */\n"));
}

#[test]
fn test_symbolNameFromTarget()
{
	assert_eq!(symbolNameFromTarget("out/shaders/2d.h"), "2d");
	assert_eq!(symbolNameFromTarget("3d.h"), "3d");
	// the final two characters are dropped regardless of what they are
	assert_eq!(symbolNameFromTarget("gen/abc.hh"), "abc.");
	assert_eq!(symbolNameFromTarget("h"), "");
	assert_eq!(symbolNameFromTarget(""), "");
}

#[test]
fn test_parseHeaderBody_errors()
{
	assert_eq!(parseHeaderBody("no braces here"), Err(HeaderParseError::MissingInitializer));
	assert_eq!(parseHeaderBody("{1,2"), Err(HeaderParseError::MissingInitializer));
	assert_eq!(parseHeaderBody("{1,256};"), Err(HeaderParseError::InvalidByte("256".into())));
	assert_eq!(parseHeaderBody("{1,,2};"), Err(HeaderParseError::InvalidByte("".into())));
	assert_eq!(parseHeaderBody("{1, 2};"), Err(HeaderParseError::InvalidByte(" 2".into())));
	assert_eq!(parseHeaderBody("{+1};"), Err(HeaderParseError::InvalidByte("+1".into())));
}

#[test]
fn test_emitHeaderFile()
{
	let tmp = tempfile::tempdir().unwrap();
	let source = tmp.path().join("2d.shbin");
	let target = tmp.path().join("include/shaders/2d.h");
	std::fs::write(&source, [10u8, 0, 255]).unwrap();

	emitHeaderFile(&source, &target).unwrap();

	let expected = format!(
		"/* Auto-generated from {} */\nstatic uint8_t shader_builtin_2d[] =\n{{10,0,255}};", source.display()
	);
	assert_eq!(std::fs::read_to_string(&target).unwrap(), expected);
}

#[test]
fn test_emitHeaderFile_replacesExisting()
{
	let tmp = tempfile::tempdir().unwrap();
	let source = tmp.path().join("3d.shbin");
	let target = tmp.path().join("3d.h");
	std::fs::write(&source, [1u8]).unwrap();
	std::fs::write(&target, "x".repeat(4096)).unwrap();

	emitHeaderFile(&source, &target).unwrap();

	let written = std::fs::read_to_string(&target).unwrap();
	assert!(written.ends_with("shader_builtin_3d[] =\n{1};"));
	assert!(!written.contains("xxx"));
}

#[test]
fn test_emitHeaderFile_emptyBinary()
{
	let tmp = tempfile::tempdir().unwrap();
	let source = tmp.path().join("empty.shbin");
	let target = tmp.path().join("empty.h");
	std::fs::write(&source, b"").unwrap();

	emitHeaderFile(&source, &target).unwrap();
	assert!(std::fs::read_to_string(&target).unwrap().ends_with("shader_builtin_empty[] =\n{};"));
}

#[test]
fn test_emitHeaderFile_missingSource()
{
	let tmp = tempfile::tempdir().unwrap();
	let source = tmp.path().join("missing.shbin");
	let err = emitHeaderFile(&source, tmp.path().join("missing.h")).unwrap_err();
	assert!(matches!(err, HeaderEmitError::ReadSource { .. }));
	assert_eq!(err.path(), source.as_path());
	assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
	assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_emitHeaderFile_unwritableTarget()
{
	let tmp = tempfile::tempdir().unwrap();
	let source = tmp.path().join("2d.shbin");
	std::fs::write(&source, [1u8]).unwrap();
	// the destination is an existing directory, so writing it as a file must fail
	let target = tmp.path().join("2d.h");
	std::fs::create_dir(&target).unwrap();

	let err = emitHeaderFile(&source, &target).unwrap_err();
	assert!(matches!(err, HeaderEmitError::WriteDestination { .. }));
	assert_eq!(err.path(), target.as_path());
	assert!(err.to_string().starts_with("HeaderEmitError[writing `"));
}



//////
//
// Tests for the `ShaderBinary` class
//

#[test]
fn test_ShaderBinary()
{
	let binary = ShaderBinary::fromBytes(vec![4, 2], "gen/2d.shbin");
	assert_eq!(binary.bytes(), &[4, 2]);
	assert_eq!(binary.origin(), Path::new("gen/2d.shbin"));
	assert!(!binary.isEmpty());
	assert_eq!(binary.toHeader("2d"), emitHeader(&[4, 2], "2d", "gen/2d.shbin"));
}



//////
//
// Tests for the `compile` module
//

#[test]
fn test_PicassoCommand()
{
	let cmd = compile::PicassoCommand::forFiles("shaders/2d.pica", "out/2d.shbin");
	assert_eq!(cmd.program(), "picasso");
	assert_eq!(cmd.args(), vec!["-o".to_string(), "out/2d.shbin".into(), "shaders/2d.pica".into()]);
	assert_eq!(cmd.commandLine(), "picasso -o out/2d.shbin shaders/2d.pica");
}

#[test]
fn test_PicassoCommand_intoDirectory()
{
	let cmd = compile::PicassoCommand::intoDirectory("shaders/3d.pica", "out/gen");
	assert_eq!(cmd.source(), Path::new("shaders/3d.pica"));
	assert_eq!(cmd.target(), PathBuf::from("out/gen/3d.shbin").as_path());
}

#[test]
fn test_ShaderCompileError_display()
{
	let err = compile::ShaderCompileError {
		source: "s/2d.pica".into(), exitCode: Some(1), stderr: "line 3: unknown opcode\n".into()
	};
	assert_eq!(err.to_string(), "ShaderCompileError[`s/2d.pica` (exit code 1): line 3: unknown opcode]");
	let err = compile::ShaderCompileError { source: "x.pica".into(), exitCode: None, stderr: String::new() };
	assert_eq!(err.to_string(), "ShaderCompileError[`x.pica` (exit code <none>)]");
}
