//! IPv4/IPv6 addresses and address ranges in CIDR (`10.0.0.0/24`) and dash
//! (`10.0.0.5-10.0.0.9`) notation.
//!
//! A range is kept as two integers and behaves like a read-only sequence:
//! length, membership, Python-style indexing and slicing, and lazy
//! iteration, so `::/0` costs no more than `10.0.0.0/30`.
//!
//! ```
//! use netexpand::{AddressRange, CidrRange, SpanRange};
//!
//! let net: CidrRange = "192.168.1.0/24".parse().unwrap();
//! assert_eq!(net.len(), 256u128);
//! assert!(net.contains("192.168.1.128").unwrap());
//! assert_eq!("192.168.1.255", net.get(-1).unwrap().to_string());
//!
//! let span: SpanRange = "10.0.0.5 - 10.0.0.7".parse().unwrap();
//! let all: Vec<String> = span.iter().map(|a| a.to_string()).collect();
//! assert_eq!(vec!["10.0.0.5", "10.0.0.6", "10.0.0.7"], all);
//! ```

pub mod address;
pub mod cidr;
pub mod codec;
pub mod error;
pub mod index;
pub mod range;
pub mod span;

pub use address::Address;
pub use cidr::CidrRange;
pub use codec::{detect_version, int_to_text, text_to_int, Codec, Value, Version, V4_MAX, V6_MAX};
pub use error::{Error, Result};
pub use index::{RangeIndex, SliceSpec};
pub use range::{AddressRange, Addresses, Candidate, Interval, Length, Selection, Slice};
pub use span::SpanRange;
