//! javelin-util - Shared infrastructure for the Javelin Java parser.
//!
//! This crate holds the pieces every other Javelin crate needs: source
//! positions and the public error types. It deliberately contains no
//! lexing or parsing logic.

pub mod error;
pub mod position;

pub use error::{Error, LexerError, ParserError};
pub use position::{NodePosition, Position};
