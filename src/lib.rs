//! A declarative command line parser.
//!
//! Applications declare their parameters (typed values and switches,
//! required or optional) together with callbacks. The parser splits the
//! command line into `--name=value` pairs, checks them against the
//! declarations, reports missing and unknown options, and invokes the
//! callbacks of the parameters that were given.
//!
//! Any parameter may be abbreviated down to its distinctive name: the
//! shortest prefix of its name that no other parameter name starts with.

#[macro_use]
extern crate lazy_static;

pub mod dispatch;
pub mod help;
pub mod parameter;
pub mod parser;
pub mod prefix;
pub mod token;
pub mod types;
pub mod validate;


pub use parameter::{Handler, Parameter};
pub use parser::{Parsed, Parser, Writer};
pub use token::ParsedToken;
pub use validate::Analysis;
