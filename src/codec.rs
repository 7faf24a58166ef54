//! Conversion between textual and integer address forms.
//!
//! IPv4 addresses are parsed as strict dotted-decimal (no leading zeros, no
//! shorthand forms such as `127.1`). IPv6 addresses accept the usual
//! colon-hex syntax including `::` compression and an embedded IPv4 tail.
//! Rendering is canonical in both cases, so `2001:0DB8:0:0::1` comes back as
//! `2001:db8::1`.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Largest IPv4 address as an integer.
pub const V4_MAX: u128 = u32::MAX as u128;
/// Largest IPv6 address as an integer.
pub const V6_MAX: u128 = u128::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
    V4,
    V6,
}

impl Version {
    /// Number of bits in the address space.
    pub fn bits(self) -> u8 {
        match self {
            Version::V4 => 32,
            Version::V6 => 128,
        }
    }

    pub fn max(self) -> u128 {
        match self {
            Version::V4 => V4_MAX,
            Version::V6 => V6_MAX,
        }
    }

    /// The codec handling this version's syntax.
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Version::V4 => &V4Codec,
            Version::V6 => &V6Codec,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Version::V4 => write!(f, "IPv4"),
            Version::V6 => write!(f, "IPv6"),
        }
    }
}

/// Text/integer conversion for one IP version.
pub trait Codec: fmt::Debug + Send + Sync {
    fn version(&self) -> Version;

    fn text_to_int(&self, text: &str) -> Result<u128>;

    fn int_to_text(&self, value: u128) -> Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct V4Codec;

#[derive(Debug, Clone, Copy)]
pub struct V6Codec;

impl Codec for V4Codec {
    fn version(&self) -> Version {
        Version::V4
    }

    fn text_to_int(&self, text: &str) -> Result<u128> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
            )
            .expect("Not possible");
        }
        let invalid = || Error::InvalidAddress(text.to_owned());
        let caps = RE.captures(text).ok_or_else(invalid)?;
        (1..=4).try_fold(0u128, |acc, ind| {
            let octet = caps
                .get(ind)
                .ok_or_else(invalid)?
                .as_str()
                .parse::<u8>()
                .map_err(|_| invalid())?;
            Ok((acc << 8) | u128::from(octet))
        })
    }

    fn int_to_text(&self, value: u128) -> Result<String> {
        let value = u32::try_from(value).map_err(|_| Error::InvalidAddress(value.to_string()))?;
        Ok(Ipv4Addr::from(value).to_string())
    }
}

impl Codec for V6Codec {
    fn version(&self) -> Version {
        Version::V6
    }

    fn text_to_int(&self, text: &str) -> Result<u128> {
        Ipv6Addr::from_str(text)
            .map(u128::from)
            .map_err(|_| Error::InvalidAddress(text.to_owned()))
    }

    fn int_to_text(&self, value: u128) -> Result<String> {
        Ok(Ipv6Addr::from(value).to_string())
    }
}

/// Raw address input: either text or an integer magnitude.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Textual(String),
    Numeric(u128),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Textual(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Textual(s)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Numeric(u128::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Numeric(u128::from(n))
    }
}

impl From<u128> for Value {
    fn from(n: u128) -> Self {
        Value::Numeric(n)
    }
}

pub fn text_to_int(text: &str, version: Version) -> Result<u128> {
    version.codec().text_to_int(text)
}

pub fn int_to_text(value: u128, version: Version) -> Result<String> {
    version.codec().int_to_text(value)
}

/// Best-effort guess at the version of `value`.
///
/// Integers up to [`V4_MAX`] are IPv4, anything larger IPv6. Text containing
/// a `.` is IPv4, anything else IPv6. This is no validation; an IPv6 address
/// with an IPv4 tail is classified as IPv4, so pass an explicit version for
/// those.
pub fn detect_version(value: &Value) -> Version {
    match value {
        Value::Numeric(n) if *n <= V4_MAX => Version::V4,
        Value::Numeric(_) => Version::V6,
        Value::Textual(s) if s.contains('.') => Version::V4,
        Value::Textual(_) => Version::V6,
    }
}
