human_errors::error_shim!(LoxError);

pub fn source_location(sample: String, line: usize, column: usize) -> SourceLocation {
    SourceLocation { sample, line, column }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    sample: String,
    line: usize,
    column: usize,
}

impl SourceLocation {
    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl std::error::Error for SourceLocation {}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "'{}' at line {}, column {}", &self.sample, self.line, self.column)
    }
}

/// A lexical error: reported against a line, scanning continues afterwards.
pub fn lexical(line: usize, message: &str, advice: &str) -> LoxError {
    user(&format!("[line {}] Error: {}", line, message), advice)
}

/// A parse error localized to a token. An empty sample means the parser ran
/// out of input, which renders as `at end`.
pub fn syntax(location: SourceLocation, message: &str, advice: &str) -> LoxError {
    if location.sample().is_empty() {
        user(&format!("[line {}] Error at end: {}", location.line(), message), advice)
    } else {
        user(
            &format!("[line {}] Error at '{}': {}", location.line(), location.sample(), message),
            advice,
        )
    }
}

/// A runtime error, reported against the operator or name token which
/// triggered it.
pub fn runtime(location: SourceLocation, message: &str, advice: &str) -> LoxError {
    user_with_internal(&format!("[line {}] Error: {}", location.line(), message), advice, location)
}

impl From<std::io::Error> for LoxError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => user_with_internal(
                "We could not find the file you provided.",
                "Make sure that the file exists and that you have permissions to access it.",
                e,
            ),
            std::io::ErrorKind::PermissionDenied => user_with_internal(
                "You do not have permissions to access the file you provided.",
                "Make sure that you have permissions to access the file.",
                e,
            ),
            kind => system_with_internal(
                &format!("We were unable to open the file you provided due to a {} error.", kind),
                "Check the internal error message and try searching for a solution online.",
                e)
        }
    }
}
