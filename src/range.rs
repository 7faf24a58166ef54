//! Behaviour shared by every range form.

use crate::address::Address;
use crate::codec::{Codec, Version};
use crate::error::{Error, Result};
use crate::index::{Offsets, RangeIndex, SliceSpec};
use std::fmt::{self, Display, Formatter};
use std::iter::FusedIterator;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Inclusive interval `[lo, hi]` of addresses of one version.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    lo: u128,
    hi: u128,
    codec: &'static dyn Codec,
}

impl Interval {
    pub fn new(lo: u128, hi: u128, version: Version) -> Result<Self> {
        if hi > version.max() {
            return Err(Error::InvalidAddress(hi.to_string()));
        }
        let codec = version.codec();
        if hi < lo {
            return Err(Error::InvalidRange {
                lo: Address::from_int(lo, codec).to_string(),
                hi: Address::from_int(hi, codec).to_string(),
            });
        }
        Ok(Interval { lo, hi, codec })
    }

    pub fn lo(&self) -> u128 {
        self.lo
    }

    pub fn hi(&self) -> u128 {
        self.hi
    }

    fn address(&self, offset: u128) -> Address {
        Address::from_int(self.lo + offset, self.codec)
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.lo == other.lo && self.hi == other.hi && self.codec.version() == other.codec.version()
    }
}

impl Eq for Interval {}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.address(0), self.address(self.hi - self.lo))
    }
}

/// Number of addresses in a range.
///
/// Stored as `len - 1` so the whole IPv6 space, `2^128` addresses, fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length {
    last: u128,
}

impl Length {
    /// The length, or `None` for the full IPv6 space.
    pub fn get(self) -> Option<u128> {
        self.last.checked_add(1)
    }

    /// Offset of the last address, `len - 1`.
    pub fn last_offset(self) -> u128 {
        self.last
    }

    pub fn as_f64(self) -> f64 {
        self.last as f64 + 1.0
    }
}

impl PartialEq<u128> for Length {
    fn eq(&self, other: &u128) -> bool {
        self.get() == Some(*other)
    }
}

impl Display for Length {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.get() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "340282366920938463463374607431768211456"),
        }
    }
}

/// Anything [`AddressRange::contains`] can test.
pub trait Candidate {
    /// Integer value of the candidate; text is parsed with `codec`.
    fn resolve(&self, codec: &dyn Codec) -> Result<u128>;
}

impl Candidate for str {
    fn resolve(&self, codec: &dyn Codec) -> Result<u128> {
        codec.text_to_int(self)
    }
}

impl Candidate for String {
    fn resolve(&self, codec: &dyn Codec) -> Result<u128> {
        codec.text_to_int(self)
    }
}

/// Uses the address's own version, not the range's.
impl Candidate for Address {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        self.to_int()
    }
}

impl Candidate for u32 {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        Ok(u128::from(*self))
    }
}

impl Candidate for u64 {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        Ok(u128::from(*self))
    }
}

impl Candidate for u128 {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        Ok(*self)
    }
}

impl Candidate for Ipv4Addr {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        Ok(u128::from(u32::from(*self)))
    }
}

impl Candidate for Ipv6Addr {
    fn resolve(&self, _: &dyn Codec) -> Result<u128> {
        Ok(u128::from(*self))
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn resolve(&self, codec: &dyn Codec) -> Result<u128> {
        (**self).resolve(codec)
    }
}

/// Result of [`AddressRange::select`].
#[derive(Clone, Debug)]
pub enum Selection {
    One(Address),
    Many(Slice),
}

/// Collection-like access to `[lo, hi]` without materializing it.
pub trait AddressRange {
    fn interval(&self) -> &Interval;

    fn version(&self) -> Version {
        self.interval().codec.version()
    }

    fn len(&self) -> Length {
        let i = self.interval();
        Length { last: i.hi - i.lo }
    }

    /// A range always holds at least one address.
    fn is_empty(&self) -> bool {
        false
    }

    fn first(&self) -> Address {
        self.interval().address(0)
    }

    fn last(&self) -> Address {
        let i = self.interval();
        i.address(i.hi - i.lo)
    }

    /// Tests `lo <= candidate <= hi`.
    ///
    /// Text is parsed as this range's version. Integers and [`Address`]
    /// values are compared as they are, whatever version they claim.
    fn contains<C: Candidate>(&self, candidate: C) -> Result<bool> {
        let i = self.interval();
        let n = candidate.resolve(i.codec)?;
        Ok(i.lo <= n && n <= i.hi)
    }

    /// Address at `index`, counting from the end when negative.
    fn get(&self, index: i128) -> Result<Address> {
        let i = self.interval();
        let last = i.hi - i.lo;
        let offset = if index < 0 {
            last.checked_sub(index.unsigned_abs() - 1)
        } else {
            Some(index.unsigned_abs()).filter(|p| *p <= last)
        };
        offset
            .map(|o| i.address(o))
            .ok_or(Error::IndexOutOfRange(index))
    }

    /// Python-style `[start:stop:step]`.
    ///
    /// A slice that selects nothing yields the first address alone.
    fn slice(&self, start: Option<i128>, stop: Option<i128>, step: Option<i128>) -> Result<Slice> {
        self.slice_with(SliceSpec::new(start, stop, step))
    }

    fn slice_with(&self, spec: SliceSpec) -> Result<Slice> {
        let i = self.interval();
        let last = i.hi - i.lo;
        let mut offsets = Offsets::new(spec.indices(last)?, last);
        if offsets.is_empty() {
            offsets = Offsets::single(0);
        }
        Ok(Slice {
            offsets,
            interval: *i,
        })
    }

    fn select(&self, index: &RangeIndex) -> Result<Selection> {
        match index {
            RangeIndex::Position(p) => self.get(*p).map(Selection::One),
            RangeIndex::Slice(s) => self.slice_with(*s).map(Selection::Many),
        }
    }

    /// Every address from `lo` to `hi`, produced one at a time.
    fn iter(&self) -> Addresses {
        let i = self.interval();
        Addresses {
            front: i.lo,
            back: i.hi,
            done: false,
            codec: i.codec,
        }
    }
}

impl AddressRange for Interval {
    fn interval(&self) -> &Interval {
        self
    }
}

/// Ascending walk over a range. Each call to [`AddressRange::iter`] starts
/// its own cursor.
#[derive(Clone, Debug)]
pub struct Addresses {
    front: u128,
    back: u128,
    done: bool,
    codec: &'static dyn Codec,
}

impl Iterator for Addresses {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.done {
            return None;
        }
        let cur = self.front;
        if self.front == self.back {
            self.done = true;
        } else {
            self.front += 1;
        }
        Some(Address::from_int(cur, self.codec))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match usize::try_from(self.back - self.front) {
            Ok(n) if n < usize::MAX => (n + 1, Some(n + 1)),
            _ => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for Addresses {
    fn next_back(&mut self) -> Option<Address> {
        if self.done {
            return None;
        }
        let cur = self.back;
        if self.front == self.back {
            self.done = true;
        } else {
            self.back -= 1;
        }
        Some(Address::from_int(cur, self.codec))
    }
}

impl FusedIterator for Addresses {}

/// Addresses picked by a slice, produced one at a time.
#[derive(Clone, Debug)]
pub struct Slice {
    offsets: Offsets,
    interval: Interval,
}

impl Iterator for Slice {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        self.offsets.next().map(|o| self.interval.address(o))
    }
}

impl FusedIterator for Slice {}
