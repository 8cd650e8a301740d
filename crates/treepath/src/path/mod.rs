//! Path query lexer and step parser.
//!
//! The surface grammar is small enough to keep the whole front end in two
//! stages:
//!
//! ```text
//! Query text → Lexer → Tokens → Step parser → Vec<RawStep>
//! ```
//!
//! - [`lexer`]: Logos-based tokenizer producing `Token { kind, span }`
//!   pairs. Tokens are zero-copy; text is sliced from source only when a
//!   step is materialized.
//!
//! - [`parser`]: fail-fast splitter turning the token stream into raw
//!   steps (`axis` + unresolved `spec`). A path is a single short
//!   expression, so unlike a full query language there is nothing to
//!   recover into: the first grammar violation aborts compilation with a
//!   [`crate::Error::MalformedQuery`] carrying the offending fragment and
//!   its span.
//!
//! Name resolution happens later, in [`crate::compile`], against the
//! caller's type registry.

pub mod lexer;
pub mod parser;
