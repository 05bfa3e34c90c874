use std::io::{BufRead, Write};

use loxide::{
    ast::{printer::AstPrinter, Parser, StmtVisitor},
    cmdline::CommandLineOptions,
    interpreter::Interpreter,
    lexer::Scanner,
    LoxError,
};

// Exit codes from sysexits(3).
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_SOFTWARE: i32 = 70;
const EX_IOERR: i32 = 74;

fn main() {
    let options = CommandLineOptions::parse();

    if !options.extra.is_empty() {
        eprintln!("Usage: loxide [-d|--debug] [--strict-concat] [script]");
        std::process::exit(EX_USAGE);
    }

    let mut interpreter = Interpreter::default();
    if options.strict_concat {
        interpreter = interpreter.with_strict_concat();
    }

    let code = match &options.file {
        Some(file) => run_file(file, &mut interpreter, options.debug),
        None => run_prompt(&mut interpreter, options.debug),
    };

    std::process::exit(code);
}

/// Runs one compilation unit. Lexing and parsing errors are all reported
/// together and suppress evaluation entirely; runtime errors are reported
/// after the statements which follow them have still run.
fn run(source: &str, interpreter: &mut Interpreter, debug: bool) -> i32 {
    let (tokens, mut errs) = Scanner::scan_all(source);
    let (stmts, parse_errs) = Parser::parse(tokens);
    errs.extend(parse_errs);

    if !errs.is_empty() {
        for err in errs {
            eprintln!("{}", err);
        }
        return EX_DATAERR;
    }

    if debug {
        let mut printer = AstPrinter {};
        for stmt in &stmts {
            eprintln!("{}", printer.visit_stmt(stmt));
        }
    }

    let errs = interpreter.interpret(&stmts);
    if errs.is_empty() {
        0
    } else {
        for err in errs {
            eprintln!("{}", err);
        }
        EX_SOFTWARE
    }
}

fn run_file(path: &str, interpreter: &mut Interpreter, debug: bool) -> i32 {
    match read_source(path) {
        Ok(source) => run(&source, interpreter, debug),
        Err(err) => {
            eprintln!("{}", err);
            EX_IOERR
        }
    }
}

fn read_source(path: &str) -> Result<String, LoxError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| {
        loxide::errors::user_with_internal(
            "The file you provided is not valid UTF-8.",
            "Make sure that the script is a plain text file encoded as UTF-8.",
            e,
        )
    })
}

/// Reads and runs lines until EOF. The interpreter, and with it the global
/// environment, persists across lines, and a failing line never ends the
/// session.
fn run_prompt(interpreter: &mut Interpreter, debug: bool) -> i32 {
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        if std::io::stdout().flush().is_err() {
            return EX_IOERR;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return 0,
            Ok(_) => {
                run(&line, interpreter, debug);
            }
            Err(err) => {
                eprintln!("{}", LoxError::from(err));
                return EX_IOERR;
            }
        }
    }
}
