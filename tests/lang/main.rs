use loxide::{ast::Parser, interpreter::Interpreter, lexer::Scanner, CaptureOutput, LoxError};

/// Runs a script and checks it against the expectations embedded in its
/// comments:
///
///  - `// expect: <line>` lines give the exact output, in order.
///  - `// Error` marks a script which must fail to scan or parse, and which
///    must therefore never be evaluated.
///  - `// expect runtime error` marks a script which must raise at least one
///    error while running.
///  - `// strict concat` runs the script with number-to-string coercion
///    disabled.
fn run_file(path: &str) -> Result<(), LoxError> {
    let source = String::from_utf8(std::fs::read(path)?).map_err(|e| {
        loxide::errors::user_with_internal(
            "The test script is not valid UTF-8.",
            "Make sure that the script is a plain text file encoded as UTF-8.",
            e,
        )
    })?;

    let expect = regex::Regex::new(r"(?i)//\s*expect: (.*)").unwrap();
    let expected = expect
        .captures_iter(&source)
        .map(|c| c[1].trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let (tokens, mut errs) = Scanner::scan_all(&source);
    let (stmts, parse_errs) = Parser::parse(tokens);
    errs.extend(parse_errs);

    if source.contains("// Error") {
        assert!(!errs.is_empty(), "{}: expected scan or parse errors, got none", path);
        return Ok(());
    }

    assert!(errs.is_empty(), "{}: unexpected scan or parse errors: {:?}", path, errs);

    let output = CaptureOutput::default();
    let mut interpreter = Interpreter::default().with_output(Box::new(output.clone()));
    if source.contains("// strict concat") {
        interpreter = interpreter.with_strict_concat();
    }

    let errs = interpreter.interpret(&stmts);
    if source.contains("// expect runtime error") {
        assert!(!errs.is_empty(), "{}: expected runtime errors, got none", path);
    } else {
        assert!(errs.is_empty(), "{}: unexpected runtime errors: {:?}", path, errs);
    }

    assert_eq!(
        expected.trim(),
        output.to_string().trim(),
        "{}: output did not match expectations",
        path
    );

    Ok(())
}

include!(concat!(env!("OUT_DIR"), "/tests/lang.rs"));
