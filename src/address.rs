use crate::codec::{detect_version, Codec, Value, Version};
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A single IP address kept in whichever form it was given.
///
/// Text is validated lazily: construction never fails, [`Address::to_int`]
/// does. Equality and ordering go through the integer value, and addresses
/// of different versions are never equal.
#[derive(Clone, Debug)]
pub struct Address {
    value: Value,
    codec: &'static dyn Codec,
}

impl Address {
    /// Wraps `value`, guessing the version with [`detect_version`] when none
    /// is given.
    pub fn new<V: Into<Value>>(value: V, version: Option<Version>) -> Self {
        let value = value.into();
        let version = version.unwrap_or_else(|| detect_version(&value));
        Address {
            value,
            codec: version.codec(),
        }
    }

    pub(crate) fn from_int(n: u128, codec: &'static dyn Codec) -> Self {
        Address {
            value: Value::Numeric(n),
            codec,
        }
    }

    pub fn version(&self) -> Version {
        self.codec.version()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Integer value. Numeric addresses are returned as stored.
    pub fn to_int(&self) -> Result<u128> {
        match &self.value {
            Value::Textual(s) => self.codec.text_to_int(s),
            Value::Numeric(n) => Ok(*n),
        }
    }

    /// Textual value. Textual addresses are returned as stored.
    pub fn to_text(&self) -> Result<String> {
        match &self.value {
            Value::Textual(s) => Ok(s.clone()),
            Value::Numeric(n) => self.codec.int_to_text(*n),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        if self.version() != other.version() {
            return false;
        }
        match (self.to_int(), other.to_int()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.value == other.value,
        }
    }
}

impl Eq for Address {}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        if self.version() != other.version() {
            return None;
        }
        match (self.to_int(), other.to_int()) {
            (Ok(a), Ok(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

/// Renders the textual form; an integer too large for its version is shown
/// as the bare number.
impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.value {
            Value::Textual(s) => write!(f, "{}", s),
            Value::Numeric(n) => match self.codec.int_to_text(*n) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "{}", n),
            },
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::new(u32::from(ip), Some(Version::V4))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::new(u128::from(ip), Some(Version::V6))
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(ip) => ip.into(),
            IpAddr::V6(ip) => ip.into(),
        }
    }
}

impl TryFrom<&Address> for IpAddr {
    type Error = Error;

    fn try_from(addr: &Address) -> Result<Self> {
        let n = addr.to_int()?;
        match addr.version() {
            Version::V4 => u32::try_from(n)
                .map(|n| IpAddr::V4(Ipv4Addr::from(n)))
                .map_err(|_| Error::InvalidAddress(n.to_string())),
            Version::V6 => Ok(IpAddr::V6(Ipv6Addr::from(n))),
        }
    }
}
