use crate::{errors, LoxError};

use super::{Token, TokenType};

/// Converts a source buffer into tokens, one per call to `next()`. Lexical
/// errors are yielded in place of the offending token and scanning resumes
/// with the following character.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    line_start: usize,
}

#[allow(clippy::while_let_on_iterator)]
impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            line_start: 0,
        }
    }

    /// Scans the whole buffer, splitting tokens from lexical errors and
    /// terminating the token sequence with a single `EndOfInput` token.
    pub fn scan_all(source: &str) -> (Vec<Token>, Vec<LoxError>) {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        let mut errs = Vec::new();

        while let Some(result) = scanner.next() {
            match result {
                Ok(token) => tokens.push(token),
                Err(err) => errs.push(err),
            }
        }

        let column = source.len() - scanner.line_start + 1;
        tokens.push(Token::new(TokenType::EndOfInput, "", scanner.line, column));

        (tokens, errs)
    }

    fn newline(&mut self, offset: usize) {
        self.line += 1;
        self.line_start = offset + 1;
    }

    fn match_char(&mut self, next: char) -> bool {
        if let Some((_, c)) = self.chars.peek() {
            if *c == next {
                self.chars.next();
                return true;
            }
        }

        false
    }

    /// Consumes characters while `f` matches, returning the byte offset just
    /// past the last consumed character.
    fn advance_while<F: Fn(char) -> bool>(&mut self, f: F) -> usize {
        while let Some((_, c)) = self.chars.peek() {
            if !f(*c) {
                break;
            }

            self.chars.next();
        }

        self.peek_offset()
    }

    fn peek_offset(&mut self) -> usize {
        self.chars.peek().map(|(i, _)| *i).unwrap_or(self.source.len())
    }

    fn read_token(&mut self) -> Option<Result<Token, LoxError>> {
        while let Some((start, c)) = self.chars.next() {
            let line = self.line;
            let column = start - self.line_start + 1;
            let tok = |ty: TokenType, lexeme: &str| Some(Ok(Token::new(ty, lexeme, line, column)));

            match c {
                ' ' => continue,
                '\r' => continue,
                '\t' => continue,
                '\n' => self.newline(start),

                '(' => return tok(TokenType::LeftParen, "("),
                ')' => return tok(TokenType::RightParen, ")"),
                '{' => return tok(TokenType::LeftBrace, "{"),
                '}' => return tok(TokenType::RightBrace, "}"),
                ',' => return tok(TokenType::Comma, ","),
                '.' => return tok(TokenType::Dot, "."),
                '-' => return tok(TokenType::Minus, "-"),
                '+' => return tok(TokenType::Plus, "+"),
                ';' => return tok(TokenType::Semicolon, ";"),
                '*' => return tok(TokenType::Star, "*"),
                '%' => return tok(TokenType::Mod, "%"),

                '!' if self.match_char('=') => return tok(TokenType::BangEqual, "!="),
                '!' => return tok(TokenType::Bang, "!"),
                '=' if self.match_char('=') => return tok(TokenType::EqualEqual, "=="),
                '=' => return tok(TokenType::Equal, "="),
                '>' if self.match_char('=') => return tok(TokenType::GreaterEqual, ">="),
                '>' => return tok(TokenType::Greater, ">"),
                '<' if self.match_char('=') => return tok(TokenType::LessEqual, "<="),
                '<' => return tok(TokenType::Less, "<"),

                '/' if self.match_char('/') => {
                    while let Some((i, c)) = self.chars.next() {
                        if c == '\n' {
                            self.newline(i);
                            break;
                        }
                    }
                }
                '/' if self.match_char('*') => {
                    let mut depth = 1;
                    while let Some((i, c)) = self.chars.next() {
                        match c {
                            '\n' => self.newline(i),
                            '/' if self.match_char('*') => depth += 1,
                            '*' if self.match_char('/') => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }
                '/' => return tok(TokenType::Slash, "/"),

                '"' => return Some(self.read_string(start, line, column)),

                c if c.is_ascii_digit() => return Some(Ok(self.read_number(start, line, column))),
                c if c.is_alphabetic() || c == '_' => {
                    return Some(Ok(self.read_identifier(start, line, column)))
                }

                c => {
                    return Some(Err(errors::lexical(
                        line,
                        &format!("Unexpected character '{}'.", c),
                        "Make sure you have entered valid code and have not accidentally closed a string early.",
                    )))
                }
            }
        }

        None
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> Result<Token, LoxError> {
        while let Some((i, c)) = self.chars.next() {
            match c {
                '\n' => self.newline(i),
                '"' => {
                    // The lexeme keeps its quotes; the parser strips them.
                    return Ok(Token::new(
                        TokenType::String,
                        &self.source[start..=i],
                        line,
                        column,
                    ));
                }
                _ => {}
            }
        }

        Err(errors::lexical(
            line,
            "Unterminated string.",
            "Make sure that you have terminated your string with a '\"' character.",
        ))
    }

    fn read_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut end = self.advance_while(|c| c.is_ascii_digit());

        // A trailing dot is not part of the number: `12.` scans as `12` `.`
        // and a leading minus is always a separate token, so number lexemes
        // are never negative.
        if let Some((i, '.')) = self.chars.peek().copied() {
            if self.source[i + 1..].chars().next().map(|c| c.is_ascii_digit()).unwrap_or_default() {
                self.chars.next();
                end = self.advance_while(|c| c.is_ascii_digit());
            }
        }

        Token::new(TokenType::Number, &self.source[start..end], line, column)
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        let end = self.advance_while(|c| c.is_alphanumeric() || c == '_');
        let lexeme = &self.source[start..end];

        let ty = match lexeme {
            "and" => TokenType::And,
            "class" => TokenType::Class,
            "else" => TokenType::Else,
            "false" => TokenType::False,
            "for" => TokenType::For,
            "fun" => TokenType::Fun,
            "if" => TokenType::If,
            "nil" => TokenType::Nil,
            "or" => TokenType::Or,
            "print" => TokenType::Print,
            "ret" => TokenType::Ret,
            "super" => TokenType::Super,
            "this" => TokenType::This,
            "true" => TokenType::True,
            "var" => TokenType::Var,
            "while" => TokenType::While,
            _ => TokenType::Identifier,
        };

        Token::new(ty, lexeme, line, column)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, LoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<String> {
        let mut scanner = Scanner::new(source);
        let mut lexemes = Vec::new();
        while let Some(token) = scanner.next() {
            lexemes.push(token.expect("without an error").lexeme().to_string());
        }
        lexemes
    }

    #[test]
    fn test_basic_operators() {
        let mut scanner = Scanner::new("+ - * / %");

        assert_eq!(scanner.next().expect("a token").expect("without an error"), Token::new(TokenType::Plus, "+", 1, 1));
        assert_eq!(scanner.next().expect("a token").expect("without an error"), Token::new(TokenType::Minus, "-", 1, 3));
        assert_eq!(scanner.next().expect("a token").expect("without an error"), Token::new(TokenType::Star, "*", 1, 5));
        assert_eq!(scanner.next().expect("a token").expect("without an error"), Token::new(TokenType::Slash, "/", 1, 7));
        assert_eq!(scanner.next().expect("a token").expect("without an error"), Token::new(TokenType::Mod, "%", 1, 9));
        assert!(scanner.next().is_none(), "no more tokens");
    }

    #[test]
    fn test_basic_symbols() {
        let tokens = lexemes(r#"
// this is a comment
(( )){} // grouping stuff
!*+-/=<> <= == != >= // operators
"#);

        assert_eq!(tokens, vec![
            "(", "(", ")", ")", "{", "}",
            "!", "*", "+", "-", "/", "=", "<", ">", "<=", "==", "!=", ">=",
        ]);
    }

    #[test]
    fn test_comments() {
        let mut scanner = Scanner::new(r#"
// single line comment
/* multi-line comment on a single line */
/*
* multi-line comment
* on multiple lines
*/
/*/* Nested multi-line comment! */*/
        "#);

        assert!(scanner.next().is_none(), "no more tokens");
    }

    #[test]
    fn test_line_tracking_in_block_comments() {
        let mut scanner = Scanner::new("/*\n\n*/ x");

        let token = scanner.next().expect("a token").expect("without an error");
        assert_eq!(token, Token::new(TokenType::Identifier, "x", 3, 4));
    }

    #[test]
    fn test_strings() {
        let mut scanner = Scanner::new(r#" "test" "#);

        let token = scanner.next().expect("a token").expect("without an error");
        assert_eq!(token.ty(), TokenType::String);
        assert_eq!(token.lexeme(), "\"test\"");

        assert!(scanner.next().is_none(), "no more tokens");
    }

    #[test]
    fn test_multiline_string() {
        let mut scanner = Scanner::new("\"line one\nline two\" 5");

        let token = scanner.next().expect("a token").expect("without an error");
        assert_eq!(token.ty(), TokenType::String);
        assert_eq!(token.line(), 1);

        let token = scanner.next().expect("a token").expect("without an error");
        assert_eq!(token, Token::new(TokenType::Number, "5", 2, 11));
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("\"oops");

        let err = scanner.next().expect("a result").expect_err("an error");
        assert!(format!("{}", err).contains("Unterminated string."));
        assert!(scanner.next().is_none(), "no more tokens");
    }

    #[test]
    fn test_numbers() {
        let mut scanner = Scanner::new(r#" 123 12.34 12. "#);

        let numbers = ["123", "12.34", "12"];
        for number in numbers {
            let token = scanner.next().expect("a token").expect("without an error");
            assert_eq!(token.ty(), TokenType::Number);
            assert_eq!(token.lexeme(), number);
        }

        let token = scanner.next().expect("a token").expect("without an error");
        assert_eq!(token.ty(), TokenType::Dot);

        assert!(scanner.next().is_none(), "no more tokens");
    }

    #[test]
    fn test_negative_numbers_scan_as_two_tokens() {
        let (tokens, errs) = Scanner::scan_all("-5");

        assert!(errs.is_empty(), "no errors should be returned");
        assert_eq!(tokens[0].ty(), TokenType::Minus);
        assert_eq!(tokens[1], Token::new(TokenType::Number, "5", 1, 2));
        assert_eq!(tokens[2].ty(), TokenType::EndOfInput);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let mut scanner = Scanner::new(r#"
identifier _id a_b_c
and class else false for fun if nil or print ret super this true var while
"#);

        let identifiers = ["identifier", "_id", "a_b_c"];
        for identifier in identifiers {
            let token = scanner.next().expect("a token").expect("without an error");
            assert_eq!(token.ty(), TokenType::Identifier);
            assert_eq!(token.lexeme(), identifier);
        }

        let keywords = [
            TokenType::And, TokenType::Class, TokenType::Else, TokenType::False,
            TokenType::For, TokenType::Fun, TokenType::If, TokenType::Nil,
            TokenType::Or, TokenType::Print, TokenType::Ret, TokenType::Super,
            TokenType::This, TokenType::True, TokenType::Var, TokenType::While,
        ];
        for keyword in keywords {
            let token = scanner.next().expect("a token").expect("without an error");
            assert_eq!(token.ty(), keyword);
        }
    }

    #[test]
    fn test_unexpected_character_recovery() {
        let (tokens, errs) = Scanner::scan_all("@ 1");

        assert_eq!(errs.len(), 1, "one lexical error should be returned");
        assert!(format!("{}", errs[0]).contains("Unexpected character '@'."));

        // Scanning resumes after the bad character.
        assert_eq!(tokens[0], Token::new(TokenType::Number, "1", 1, 3));
        assert_eq!(tokens[1].ty(), TokenType::EndOfInput);
    }

    #[test]
    fn test_scan_all_round_trip() {
        let source = "var x = ( 1 + 2.5 ) * 3 ; print x ;";
        let (tokens, errs) = Scanner::scan_all(source);

        assert!(errs.is_empty(), "no errors should be returned");
        assert_eq!(tokens.last().map(|t| t.ty()), Some(TokenType::EndOfInput));

        let rendered = tokens[..tokens.len() - 1]
            .iter()
            .map(|t| t.lexeme())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_columns() {
        let (tokens, errs) = Scanner::scan_all("var x;\n  x = 1;");

        assert!(errs.is_empty(), "no errors should be returned");
        assert_eq!(tokens[0], Token::new(TokenType::Var, "var", 1, 1));
        assert_eq!(tokens[1], Token::new(TokenType::Identifier, "x", 1, 5));
        assert_eq!(tokens[3], Token::new(TokenType::Identifier, "x", 2, 3));
        assert_eq!(tokens[5], Token::new(TokenType::Number, "1", 2, 7));
    }
}
