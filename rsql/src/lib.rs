//! RSQL filter expressions translated into structured queries.
//!
//! The engine parses the RSQL grammar and renders each expression into a
//! target query string. The bundled [`mongo`] profile renders MongoDB-style
//! documents; any other target plugs in through custom operators and the
//! two boolean formatters. Processing is a pure in-process transformation:
//! no I/O, no retained state beyond the configured [`Parser`].
//!
//! # Syntax overview
//!
//! - Leaf operation: `key`, an operator matching `[!=][^=()]*=`, `value`
//! - `a==1;b==2` — `;` is AND
//! - `a==1,b==2` — `,` is OR and binds looser than `;`
//! - `(a==1;b==2),c=gt=5` — parentheses group to arbitrary depth
//! - `tags=in=(a,b,c)` — list-valued operators
//! - `\(` `\)` `\,` `\;` `\=` — escaped syntax characters pass through
//!   literally

mod codec;
pub mod error;
pub mod mongo;
pub mod operator;
pub mod parser;
mod scan;

pub use error::{ConfigError, ParseError};
pub use operator::{FormatterFn, Operator};
pub use parser::{BoolFormatter, KeyTransformer, Parser, ParserBuilder, ProcessOptions};
