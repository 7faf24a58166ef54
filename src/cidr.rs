use crate::address::Address;
use crate::codec::{detect_version, Value, Version};
use crate::error::{Error, Result};
use crate::range::{AddressRange, Addresses, Interval};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Block of addresses written as `<address>/<prefix>`.
///
/// Host bits of the address are cleared, so `10.0.0.7/24` covers
/// `10.0.0.0` through `10.0.0.255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CidrRange {
    interval: Interval,
    prefix: u8,
}

impl CidrRange {
    /// Parses `text`, guessing the version from it when `version` is `None`.
    pub fn new(text: &str, version: Option<Version>) -> Result<Self> {
        let (addr, prefix) = text.split_once('/').ok_or_else(|| {
            log::trace!("rejecting {:?}: no '/'", text);
            Error::MalformedInput {
                input: text.to_owned(),
                expected: '/',
            }
        })?;
        let version = version.unwrap_or_else(|| detect_version(&Value::from(text)));
        let bits = version.bits();
        let prefix = prefix
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= bits)
            .ok_or_else(|| {
                log::trace!("rejecting {:?}: prefix outside 0..={}", text, bits);
                Error::InvalidCidr(text.to_owned())
            })?;
        let host = host_mask(bits - prefix);
        let lo = version.codec().text_to_int(addr)? & !host;
        let interval = Interval::new(lo, lo | host, version)?;
        log::debug!("expanded {} to {}", text, interval);
        Ok(CidrRange { interval, prefix })
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }

    /// First address of the block.
    pub fn network(&self) -> Address {
        self.first()
    }
}

/// Low `bits` bits set.
fn host_mask(bits: u8) -> u128 {
    match bits {
        0 => 0,
        b => u128::MAX >> (128 - u32::from(b)),
    }
}

impl AddressRange for CidrRange {
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl FromStr for CidrRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CidrRange::new(s, None)
    }
}

impl Display for CidrRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

impl<'a> IntoIterator for &'a CidrRange {
    type Item = Address;
    type IntoIter = Addresses;

    fn into_iter(self) -> Addresses {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::text_to_int;
    use quickcheck_macros::quickcheck;

    #[test]
    fn some_tests() {
        let r = CidrRange::from_str("10.0.0.0/24").unwrap();
        assert_eq!(text_to_int("10.0.0.0", Version::V4).unwrap(), r.interval().lo());
        assert_eq!(text_to_int("10.0.0.255", Version::V4).unwrap(), r.interval().hi());
        assert_eq!(r.len(), 256u128);
        assert_eq!("10.0.0.0/24", r.to_string());

        let r = CidrRange::from_str("10.0.0.5/32").unwrap();
        assert_eq!(r.interval().lo(), r.interval().hi());
        assert_eq!(r.len(), 1u128);

        assert_eq!("0.0.0.0/0", CidrRange::from_str("1.2.3.4/0").unwrap().to_string());
        assert_eq!(
            "127.0.0.0/8",
            CidrRange::from_str("127.1.2.3/8").unwrap().to_string()
        );
        assert_eq!(
            "192.168.0.0/22",
            CidrRange::new("192.168.3.7/ 22", None).unwrap().to_string()
        );
    }

    #[test]
    fn v6() {
        let r = CidrRange::from_str("2001:db8::/32").unwrap();
        assert_eq!(Version::V6, r.version());
        assert_eq!(r.len(), 1u128 << 96);
        assert_eq!("2001:db8::", r.first().to_string());
        assert_eq!("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff", r.last().to_string());

        let all = CidrRange::from_str("::/0").unwrap();
        assert_eq!(None, all.len().get());
        assert_eq!(
            vec!["::", "::1", "::2"],
            all.iter().take(3).map(|a| a.to_string()).collect::<Vec<_>>()
        );
        assert_eq!("::1", CidrRange::from_str("::1/128").unwrap().last().to_string());
    }

    #[test]
    fn explicit_version() {
        let r = CidrRange::new("::ffff:10.0.0.0/120", Some(Version::V6)).unwrap();
        assert_eq!(r.len(), 256u128);
        assert_eq!("::ffff:10.0.0.255", r.last().to_string());
        assert_eq!(
            Err(Error::InvalidAddress("::ffff:10.0.0.0".to_owned())),
            CidrRange::new("::ffff:10.0.0.0/24", None)
        );
    }

    #[test]
    fn errors() {
        assert_eq!(
            Err(Error::MalformedInput {
                input: "10.0.0.0".to_owned(),
                expected: '/'
            }),
            CidrRange::from_str("10.0.0.0")
        );
        for s in &["10.0.0.0/33", "10.0.0.0/-1", "10.0.0.0/x", "10.0.0.0/", "::/129", "1.2.3.4/8/8"] {
            assert_eq!(
                Err(Error::InvalidCidr(s.to_string())),
                CidrRange::from_str(s),
                "{}",
                s
            );
        }
        assert_eq!(
            Err(Error::InvalidAddress("10.0.0.256".to_owned())),
            CidrRange::from_str("10.0.0.256/24")
        );
    }

    #[test]
    fn into_iter() {
        let r = CidrRange::from_str("192.168.1.0/30").unwrap();
        let mut seen = Vec::new();
        for a in &r {
            seen.push(a.to_string());
        }
        assert_eq!(
            vec!["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"],
            seen
        );
    }

    #[quickcheck]
    fn block_is_aligned(ip: u32, prefix: u8) -> bool {
        let prefix = prefix % 33;
        let text = format!("{}/{}", std::net::Ipv4Addr::from(ip), prefix);
        let r = CidrRange::from_str(&text).unwrap();
        let (lo, hi) = (r.interval().lo(), r.interval().hi());
        let count = hi - lo + 1;
        count == 1u128 << (32 - prefix)
            && lo % count == 0
            && r.contains(ip).unwrap()
            && r == CidrRange::from_str(&r.to_string()).unwrap()
    }
}
