//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary (('**' | '^') unary)?
//! primary := number | 'x' | name '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Power is right-associative and binds tighter than a leading sign, so
//! `-x**2` is `-(x**2)` while `2**-1` is `2**(-1)`.

use crate::ast::{BinaryOp, Expr, Function};
use crate::error::FormulaError;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::{MAX_FORMULA_DEPTH, MAX_FORMULA_LEN};

/// Parse a formula into an expression tree.
pub fn parse(src: &str) -> Result<Expr, FormulaError> {
    if src.len() > MAX_FORMULA_LEN {
        return Err(FormulaError::TooLong {
            len: src.len(),
            max: MAX_FORMULA_LEN,
        });
    }
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

fn unexpected(token: &Token) -> FormulaError {
    FormulaError::UnexpectedToken {
        found: token.kind.to_string(),
        pos: token.pos,
    }
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self) -> Result<Token, FormulaError> {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(FormulaError::UnexpectedEnd)?;
        self.cursor += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), FormulaError> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(())
        } else {
            Err(unexpected(&token))
        }
    }

    fn descend(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_FORMULA_DEPTH {
            return Err(FormulaError::TooDeep {
                max: MAX_FORMULA_DEPTH,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        self.descend()?;
        let expr = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.cursor += 1;
                Expr::Neg(Box::new(self.unary()?))
            }
            Some(TokenKind::Plus) => {
                self.cursor += 1;
                self.unary()?
            }
            _ => self.power()?,
        };
        self.ascend();
        Ok(expr)
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if self.peek_kind() == Some(&TokenKind::Power) {
            self.cursor += 1;
            let exponent = self.unary()?;
            return Ok(Expr::Binary(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                self.ascend();
                Ok(inner)
            }
            TokenKind::Ident(name) if name == "x" => Ok(Expr::Var),
            TokenKind::Ident(name) => {
                let function = Function::from_name(&name)
                    .ok_or_else(|| FormulaError::UnknownIdentifier(name.clone()))?;
                if self.peek_kind() != Some(&TokenKind::LParen) {
                    return Err(FormulaError::UnknownIdentifier(name));
                }
                self.cursor += 1;
                self.descend()?;
                let mut args = vec![self.expr()?];
                while self.peek_kind() == Some(&TokenKind::Comma) {
                    self.cursor += 1;
                    args.push(self.expr()?);
                }
                self.expect(TokenKind::RParen)?;
                self.ascend();
                if args.len() != function.arity() {
                    return Err(FormulaError::WrongArity {
                        function: function.name(),
                        expected: function.arity(),
                        found: args.len(),
                    });
                }
                Ok(Expr::Call(function, args))
            }
            _ => Err(unexpected(&token)),
        }
    }
}
