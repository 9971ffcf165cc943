//! Wire codecs owned by the pagination engine.
//!
//! Format logic only; cursor validation against a sort spec lives in
//! `db::cursor`.

pub mod cursor;

pub use cursor::{CursorDecodeError, decode_cursor, encode_cursor};
