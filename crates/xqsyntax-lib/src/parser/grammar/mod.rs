//! Grammar productions for XQuery 3.1.
//!
//! Every production is a method on [`Parser`](super::core::Parser) returning
//! [`Parsed`](super::Parsed). Productions that dialects may extend are reached through
//! the hook table, never called directly by their callers.

mod constructors;
mod control;
mod expressions;
mod flwor;
mod module;
mod names;
mod primary;
mod types;
