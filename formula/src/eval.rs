//! Evaluation of parsed formulas.

use crate::ast::{BinaryOp, Expr, Function};
use crate::error::FormulaError;
use crate::parser::parse;
use std::fmt;
use std::str::FromStr;

/// A parsed distribution formula.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    pub fn parse(src: &str) -> Result<Self, FormulaError> {
        Ok(Self {
            source: src.to_string(),
            expr: parse(src)?,
        })
    }

    /// The identity formula `x`.
    pub fn identity() -> Self {
        Self {
            source: "x".to_string(),
            expr: Expr::Var,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate at `x`. Any non-finite intermediate value is a domain error.
    pub fn eval(&self, x: f64) -> Result<f64, FormulaError> {
        eval_expr(&self.expr, x)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn finite(value: f64, what: impl fmt::Display) -> Result<f64, FormulaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::Domain(format!("{what} is {value}")))
    }
}

/// Remainder with the sign of the divisor.
fn floored_rem(a: f64, b: f64) -> Result<f64, FormulaError> {
    if b == 0.0 {
        return Err(FormulaError::Domain("modulo by zero".into()));
    }
    let r = a % b;
    Ok(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r })
}

fn eval_expr(expr: &Expr, x: f64) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => finite(*n, "literal"),
        Expr::Var => finite(x, "x"),
        Expr::Neg(inner) => Ok(-eval_expr(inner, x)?),
        Expr::Binary(op, lhs, rhs) => {
            let a = eval_expr(lhs, x)?;
            let b = eval_expr(rhs, x)?;
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err(FormulaError::Domain("division by zero".into()));
                    }
                    a / b
                }
                BinaryOp::Rem => floored_rem(a, b)?,
                BinaryOp::Pow => a.powf(b),
            };
            finite(value, format_args!("{a} {op:?} {b}"))
        }
        Expr::Call(function, args) => {
            let a = match args.first() {
                Some(arg) => eval_expr(arg, x)?,
                None => return Err(FormulaError::UnexpectedEnd),
            };
            let value = match function {
                Function::Abs => a.abs(),
                Function::Ceil => a.ceil(),
                Function::Floor => a.floor(),
                Function::Mod => {
                    let b = match args.get(1) {
                        Some(arg) => eval_expr(arg, x)?,
                        None => return Err(FormulaError::UnexpectedEnd),
                    };
                    floored_rem(a, b)?
                }
                Function::Sqrt => a.sqrt(),
                Function::Cbrt => a.cbrt(),
                Function::Sin => a.sin(),
                Function::Cos => a.cos(),
                Function::Tan => a.tan(),
                Function::Arcsin => a.asin(),
                Function::Arccos => a.acos(),
                Function::Arctan => a.atan(),
                Function::Sinh => a.sinh(),
                Function::Cosh => a.cosh(),
                Function::Tanh => a.tanh(),
                Function::Arcsinh => a.asinh(),
                Function::Arccosh => a.acosh(),
                Function::Arctanh => a.atanh(),
                Function::Exp => a.exp(),
                Function::Ln => a.ln(),
                Function::Log2 => a.log2(),
                Function::Log10 => a.log10(),
            };
            finite(value, format_args!("{}({a})", function.name()))
        }
    }
}
