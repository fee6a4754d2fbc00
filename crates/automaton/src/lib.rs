//!
//! A crate that converts regular expressions over the operators `|`, `.` and
//! `*` into finite automata. The expression is first rewritten into postfix
//! form, then an epsilon automaton is built from fragments, which is finally
//! determinized using the subset construction.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod automaton;
mod compile;
mod determinize;
mod display_dot;
mod fragment_builder;
mod io;
mod io_aut;
mod notation;
mod operator;
mod random_expression;
mod state_counter;
mod symbol;

pub use automaton::*;
pub use compile::*;
pub use determinize::*;
pub use display_dot::*;
pub use fragment_builder::*;
pub use io::*;
pub use io_aut::*;
pub use notation::*;
pub use operator::*;
pub use random_expression::*;
pub use state_counter::*;
pub use symbol::*;
