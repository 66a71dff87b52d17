//! Distribution formulas.
//!
//! A formula is a real-valued expression of one free variable `x`, built from
//! numbers, arithmetic operators and a fixed vocabulary of math functions.
//! Formulas are parsed once into a tagged AST and evaluated by walking it;
//! there are no other identifiers, no assignment and no I/O.
//!
//! `^` is exponentiation, a synonym for `**`, and is right-associative like
//! it: `x ^ 2` squares and `2 ^ 3 ^ 2` is `2 ^ 9`. It is never bitwise XOR, so
//! formulas that relied on `^` erroring (and scoring 0) now evaluate a power.
//!
//! ```
//! use ces_formula::Formula;
//!
//! let f: Formula = "sqrt(x) + 2 ** 3".parse().unwrap();
//! assert_eq!(f.eval(16.0).unwrap(), 12.0);
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, Function};
pub use error::FormulaError;
pub use eval::Formula;

/// Longest accepted formula source, in bytes.
pub const MAX_FORMULA_LEN: usize = 1024;

/// Deepest accepted nesting of parentheses, calls and unary operators.
pub const MAX_FORMULA_DEPTH: usize = 64;
