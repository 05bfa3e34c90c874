use std::iter::Peekable;

use crate::{
    errors,
    lexer::{Token, TokenType},
    LoxError,
};

use super::{Expr, Literal, Stmt};

pub struct Parser;

// Macros which make it easier to implement certain common parts of the parser.
macro_rules! rd_term {
    ($name:ident := $token_id:ident => $ret:ty : $body:expr) => {
        fn $name<T: Iterator<Item = Token>>(
            $token_id: &mut Peekable<T>,
        ) -> Result<$ret, LoxError> {
            $body
        }
    };

    ($name:ident := $operand:ident ( $($op:ident)|+ )* => binary) => {
        rd_term!($name := tokens => Expr : {
            let mut left = Self::$operand(tokens)?;

            // Same-precedence operators fold left to right.
            while let Some(op) = rd_matches!(tokens, $($op)|+) {
                let right = Self::$operand(tokens)?;
                left = Expr::Binary(Box::new(left), op, Box::new(right));
            }

            Ok(left)
        });
    };
}

macro_rules! rd_matches {
    ($tokens:ident, $($ty:ident)|+) => {
        match $tokens.peek() {
            Some(token) if $(token.is(TokenType::$ty))||+ => $tokens.next(),
            _ => None,
        }
    };
}

macro_rules! rd_consume {
    ($tokens:ident, $id:ident @ $($ty:ident)|+ => $ok:expr, $msg:expr, $advice:expr) => {
        match $tokens.next() {
            Some($id) if $($id.is(TokenType::$ty))||+ => $ok,
            Some(unexpected) => return Err(errors::syntax(
                unexpected.location(),
                $msg,
                $advice,
            )),
            None => return Err(errors::user(
                &format!("{} but the input ended first.", $msg),
                $advice,
            )),
        }
    };

    ($tokens:ident, $($ty:ident)|+ => $ok:expr, $msg:expr, $advice:expr) => {
        match $tokens.next() {
            Some(token) if $(token.is(TokenType::$ty))||+ => $ok,
            Some(unexpected) => return Err(errors::syntax(
                unexpected.location(),
                $msg,
                $advice,
            )),
            None => return Err(errors::user(
                &format!("{} but the input ended first.", $msg),
                $advice,
            )),
        }
    };
}

impl Parser {
    /// Parses a full compilation unit, collecting one statement per
    /// successfully parsed declaration. A failed declaration records its
    /// error, discards tokens up to the next statement boundary, and parsing
    /// resumes there. A unit which produced any errors must not be evaluated.
    pub fn parse<T: IntoIterator<Item = Token>>(tokens: T) -> (Vec<Stmt>, Vec<LoxError>) {
        let mut tokens = tokens.into_iter().peekable();
        let mut stmts = Vec::new();
        let mut errs = Vec::new();

        while tokens.peek().map(|t| !t.is(TokenType::EndOfInput)).unwrap_or_default() {
            match Self::declaration(&mut tokens) {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    errs.push(err);
                    Self::synchronize(&mut tokens);
                }
            }
        }

        (stmts, errs)
    }

    /// Parses a single expression, for tooling and tests.
    pub fn parse_expr<T: IntoIterator<Item = Token>>(tokens: T) -> Result<Expr, LoxError> {
        let mut tokens = tokens.into_iter().peekable();
        Self::expression(&mut tokens)
    }

    rd_term!(declaration := tokens => Stmt : {
        if rd_matches!(tokens, Var).is_none() {
            return Self::statement(tokens);
        }

        rd_consume!(tokens, name @ Identifier => {
            let init = if rd_matches!(tokens, Equal).is_some() {
                Self::expression(tokens)?
            } else {
                Expr::Literal(Literal::Nil)
            };

            rd_consume!(
                tokens,
                Semicolon => Ok(Stmt::Var(name, init)),
                "Expected ';' after the variable declaration.",
                "Make sure that you have a semicolon after the variable declaration.")
            },
            "Expected a variable name after 'var'.",
            "Provide a variable name after the `var` keyword.")
    });

    rd_term!(statement := tokens => Stmt : {
        if rd_matches!(tokens, LeftBrace).is_some() {
            return Ok(Stmt::Block(Self::block(tokens)?));
        }

        let stmt = if rd_matches!(tokens, Print).is_some() {
            Stmt::Print(Self::expression(tokens)?)
        } else {
            Stmt::Expression(Self::expression(tokens)?)
        };

        rd_consume!(
            tokens,
            Semicolon => Ok(stmt),
            "Expected ';' after the expression.",
            "Make sure that you have a semicolon at the end of your previous expression.")
    });

    rd_term!(block := tokens => Vec<Stmt> : {
        let mut stmts = Vec::new();

        while tokens.peek().map(|t| !t.is_one_of(&[TokenType::RightBrace, TokenType::EndOfInput])).unwrap_or_default() {
            stmts.push(Self::declaration(tokens)?);
        }

        rd_consume!(
            tokens,
            RightBrace => Ok(stmts),
            "Expected a closing brace `}` after the block.",
            "Make sure you have a closing brace `}` after the block.")
    });

    rd_term!(expression := tokens => Expr : Self::assignment(tokens));

    rd_term!(assignment := tokens => Expr : {
        let expr = Self::equality(tokens)?;

        if let Some(equals) = rd_matches!(tokens, Equal) {
            let value = Self::assignment(tokens)?;

            return match expr {
                Expr::Var(name) => Ok(Expr::Assign(name, Box::new(value))),
                _ => Err(errors::syntax(
                    equals.location(),
                    "Invalid assignment target.",
                    "Make sure that you provide the name of a variable to assign to.",
                )),
            };
        }

        Ok(expr)
    });

    rd_term!(equality := comparison (BangEqual | EqualEqual)* => binary);

    rd_term!(comparison := term (Greater | GreaterEqual | Less | LessEqual)* => binary);

    rd_term!(term := factor (Minus | Plus)* => binary);

    rd_term!(factor := unary (Slash | Mod | Star)* => binary);

    rd_term!(unary := tokens => Expr : {
        if let Some(op) = rd_matches!(tokens, Bang | Minus) {
            let operand = Self::unary(tokens)?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }

        Self::primary(tokens)
    });

    rd_term!(primary := tokens => Expr : {
        match tokens.next() {
            Some(token) => match token.ty() {
                TokenType::False => Ok(Expr::Literal(Literal::Bool(false))),
                TokenType::True => Ok(Expr::Literal(Literal::Bool(true))),
                TokenType::Nil => Ok(Expr::Literal(Literal::Nil)),

                TokenType::Number => {
                    let value = token.lexeme().parse().map_err(|e| errors::user_with_internal(
                        &format!("Unable to parse number '{}'.", token.lexeme()),
                        "Make sure you have provided a valid number within the bounds of a 64-bit floating point number.",
                        e,
                    ))?;
                    Ok(Expr::Literal(Literal::Number(value)))
                },
                TokenType::String => {
                    let lexeme = token.lexeme();
                    let value = lexeme[1..lexeme.len() - 1].to_string();
                    Ok(Expr::Literal(Literal::String(value)))
                },

                TokenType::LeftParen => {
                    let expr = Self::expression(tokens)?;
                    rd_consume!(
                        tokens,
                        RightParen => Ok(Expr::Grouping(Box::new(expr))),
                        "Expected a closing parenthesis `)` after the expression.",
                        "Make sure you have a closing parenthesis `)` after the expression.")
                },

                TokenType::Identifier => Ok(Expr::Var(token)),

                _ => Err(errors::syntax(
                    token.location(),
                    "Expected an expression.",
                    "Make sure that you are providing a value, a variable, or a parenthesized expression at this location.",
                )),
            },
            None => Err(errors::user(
                "Reached the end of the input while waiting for an expression.",
                "Make sure that you have provided a valid expression.",
            )),
        }
    });

    /// Discards tokens until just after a semicolon or just before a keyword
    /// which begins a new statement, so one malformed declaration does not
    /// poison the rest of the unit.
    fn synchronize<T: Iterator<Item = Token>>(tokens: &mut Peekable<T>) {
        const BOUNDARIES: [TokenType; 8] = [
            TokenType::Class,
            TokenType::Fun,
            TokenType::Var,
            TokenType::For,
            TokenType::If,
            TokenType::While,
            TokenType::Print,
            TokenType::Ret,
        ];

        while let Some(token) =
            tokens.next_if(|t| !t.is(TokenType::EndOfInput) && !t.is_one_of(&BOUNDARIES))
        {
            if token.is(TokenType::Semicolon) {
                return;
            }
        }
    }
}
