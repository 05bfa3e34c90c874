use crate::errors::{source_location, SourceLocation};

/// A single lexical token. The lexeme is an owned copy of the source text it
/// was scanned from, since the source buffer (a REPL line, usually) does not
/// outlive the tokens produced from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    ty: TokenType,
    lexeme: String,
    line: usize,
    column: usize,
}

impl Token {
    pub fn new<S: Into<String>>(ty: TokenType, lexeme: S, line: usize, column: usize) -> Self {
        Self {
            ty,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn is(&self, ty: TokenType) -> bool {
        self.ty == ty
    }

    pub fn is_one_of(&self, ty: &[TokenType]) -> bool {
        ty.contains(&self.ty)
    }

    pub fn ty(&self) -> TokenType {
        self.ty
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn location(&self) -> SourceLocation {
        source_location(self.lexeme.clone(), self.line, self.column)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.ty == TokenType::EndOfInput {
            write!(f, "the end of the input")
        } else {
            write!(f, "'{}'", self.lexeme)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenType {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Mod,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier,
    String,
    Number,

    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Ret,
    Super,
    This,
    True,
    Var,
    While,

    EndOfInput,
}
