use crate::address::Address;
use crate::codec::{detect_version, Value, Version};
use crate::error::{Error, Result};
use crate::range::{AddressRange, Addresses, Interval};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Arbitrary inclusive interval written as `<start>-<end>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanRange {
    interval: Interval,
}

impl SpanRange {
    /// Parses dash notation. Whitespace around either bound is ignored.
    pub fn new(text: &str, version: Option<Version>) -> Result<Self> {
        let malformed = || {
            log::trace!("rejecting {:?}: expected exactly one '-'", text);
            Error::MalformedInput {
                input: text.to_owned(),
                expected: '-',
            }
        };
        let (start, end) = text.split_once('-').ok_or_else(malformed)?;
        if end.contains('-') {
            return Err(malformed());
        }
        let version = version.unwrap_or_else(|| detect_version(&Value::from(text)));
        SpanRange::build(start, end, version)
    }

    /// Builds from separate bounds. Without `version` it is guessed from
    /// `start`.
    pub fn from_bounds(start: &str, stop: &str, version: Option<Version>) -> Result<Self> {
        let version = version.unwrap_or_else(|| detect_version(&Value::from(start)));
        SpanRange::build(start, stop, version)
    }

    fn build(start: &str, end: &str, version: Version) -> Result<Self> {
        let codec = version.codec();
        let lo = codec.text_to_int(start.trim())?;
        let hi = codec.text_to_int(end.trim())?;
        let interval = Interval::new(lo, hi, version)?;
        log::debug!("expanded {}-{} to {}", start.trim(), end.trim(), interval);
        Ok(SpanRange { interval })
    }
}

impl AddressRange for SpanRange {
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl FromStr for SpanRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SpanRange::new(s, None)
    }
}

impl Display for SpanRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.interval)
    }
}

impl<'a> IntoIterator for &'a SpanRange {
    type Item = Address;
    type IntoIter = Addresses;

    fn into_iter(self) -> Addresses {
        self.iter()
    }
}
