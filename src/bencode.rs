//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used by BitTorrent for `.torrent` files,
//! tracker responses and DHT messages.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Only one encoding exists for each value: integers have no leading zeros and
//! dictionary keys appear in ascending byte order. The encoder always produces
//! that canonical form and the default decoder only accepts it.
//!
//! # Examples
//!
//! ## Decoding
//!
//! ```
//! use bcodec::bencode::{decode, Value};
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list[0].as_str(), Some("spam"));
//! assert_eq!(list[1].as_integer(), Some(42));
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//! ```
//!
//! ## Encoding
//!
//! ```
//! use bcodec::bencode::{encode, to_bytes, Value};
//!
//! let list = Value::List(vec![Value::Integer(1), Value::List(vec![
//!     Value::string("a"),
//!     Value::Integer(2),
//! ])]);
//! assert_eq!(encode(&list).unwrap(), b"li1el1:ai2eee");
//!
//! // Host values go through `ToBencode`.
//! assert_eq!(to_bytes(&vec!["spam", "eggs"]).unwrap(), b"l4:spam4:eggse");
//! ```
//!
//! # Error Handling
//!
//! Encoding fails with [`EncodeError`] when a host value has no bencode form or a
//! dictionary key is not a byte string. Decoding fails with [`DecodeError`];
//! malformed integers and length prefixes carry a [`LexError`] whose
//! [`LexErrorCode`] tells callers what went wrong:
//!
//! - [`LexErrorCode::PrecedingZeroInSize`] - `03:abc`
//! - [`LexErrorCode::MaxSizeReached`] - integer beyond 128 bits, or length over the limit
//! - [`LexErrorCode::IllegalDigitInSize`] - `3abc:xyz`
//! - [`LexErrorCode::IllegalDigit`] - `i1x2e`, `ie`, `i03e`, `i-0e`
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod to_bencode;
mod value;

pub use decode::{decode, DecodeOptions, Decoder, DictKeys};
pub use encode::{encode, encode_to, to_bytes, Encoder};
pub use error::{DecodeError, EncodeError, LexError, LexErrorCode};
pub use to_bencode::{AsBytes, ToBencode};
pub use value::Value;
