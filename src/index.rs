//! Index and slice specifications over a range.
//!
//! Slices follow Python's `slice.indices(len)` rules. Ranges can be larger
//! than any signed machine integer, so normalized positions are kept as
//! [`Bound`] values (before the first address, at an offset, past the last)
//! instead of being shifted into `[-1, len]`.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

/// `start:stop:step`, each part optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: Option<i128>,
    pub stop: Option<i128>,
    pub step: Option<i128>,
}

impl SliceSpec {
    pub fn new(start: Option<i128>, stop: Option<i128>, step: Option<i128>) -> Self {
        SliceSpec { start, stop, step }
    }

    /// Normalizes against a range whose last offset is `last` (length - 1).
    pub(crate) fn indices(&self, last: u128) -> Result<Indices> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::ZeroSliceStep);
        }
        let backward = step < 0;
        let start = match self.start {
            Some(i) => clamp(i, last, backward),
            None if backward => Bound::At(last),
            None => Bound::At(0),
        };
        let stop = match self.stop {
            Some(i) => clamp(i, last, backward),
            None if backward => Bound::Before,
            None => Bound::After,
        };
        Ok(Indices { start, stop, step })
    }
}

/// A position relative to a range of `last + 1` addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Bound {
    /// Python's `-1` after normalization.
    Before,
    At(u128),
    /// Python's `len` after normalization.
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Indices {
    pub start: Bound,
    pub stop: Bound,
    pub step: i128,
}

fn clamp(index: i128, last: u128, backward: bool) -> Bound {
    if index < 0 {
        let back = index.unsigned_abs() - 1;
        match last.checked_sub(back) {
            Some(p) => Bound::At(p),
            None if backward => Bound::Before,
            None => Bound::At(0),
        }
    } else {
        let p = index.unsigned_abs();
        if p <= last {
            Bound::At(p)
        } else if backward {
            Bound::At(last)
        } else {
            Bound::After
        }
    }
}

/// Offsets selected by a normalized slice, produced on demand.
#[derive(Clone, Debug)]
pub(crate) struct Offsets {
    next: Option<u128>,
    stop: Bound,
    step: i128,
    last: u128,
}

impl Offsets {
    pub fn new(indices: Indices, last: u128) -> Self {
        let mut offsets = Offsets {
            next: None,
            stop: indices.stop,
            step: indices.step,
            last,
        };
        if let Bound::At(s) = indices.start {
            if offsets.before_stop(s) {
                offsets.next = Some(s);
            }
        }
        offsets
    }

    /// Yields `offset` and nothing else.
    pub fn single(offset: u128) -> Self {
        Offsets {
            next: Some(offset),
            stop: Bound::After,
            step: 1,
            last: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }

    fn before_stop(&self, n: u128) -> bool {
        if self.step > 0 {
            match self.stop {
                Bound::Before => false,
                Bound::At(t) => n < t,
                Bound::After => n <= self.last,
            }
        } else {
            match self.stop {
                Bound::Before => true,
                Bound::At(t) => n > t,
                Bound::After => false,
            }
        }
    }
}

impl Iterator for Offsets {
    type Item = u128;

    fn next(&mut self) -> Option<u128> {
        let cur = self.next?;
        let magnitude = self.step.unsigned_abs();
        let following = if self.step > 0 {
            cur.checked_add(magnitude)
        } else {
            cur.checked_sub(magnitude)
        };
        self.next = match following {
            Some(n) if self.before_stop(n) => Some(n),
            _ => None,
        };
        Some(cur)
    }
}

/// Scalar position or slice, as accepted by
/// [`AddressRange::select`](crate::AddressRange::select).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeIndex {
    Position(i128),
    Slice(SliceSpec),
}

impl From<i128> for RangeIndex {
    fn from(i: i128) -> Self {
        RangeIndex::Position(i)
    }
}

impl From<SliceSpec> for RangeIndex {
    fn from(s: SliceSpec) -> Self {
        RangeIndex::Slice(s)
    }
}

/// Parses `"5"`, `"-1"`, `"1:10"`, `"::-1"` and the like.
impl FromStr for RangeIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^([+-]?[0-9]+)?(:([+-]?[0-9]+)?(:([+-]?[0-9]+)?)?)?$"
            )
            .expect("Not possible");
        }
        let invalid = || Error::InvalidIndexType(s.to_owned());
        let caps = RE.captures(s).ok_or_else(invalid)?;
        let part = |ind: usize| -> Result<Option<i128>> {
            caps.get(ind)
                .map(|m| m.as_str().parse::<i128>().map_err(|_| invalid()))
                .transpose()
        };
        if caps.get(2).is_none() {
            return part(1)?.map(RangeIndex::Position).ok_or_else(invalid);
        }
        Ok(RangeIndex::Slice(SliceSpec::new(part(1)?, part(3)?, part(5)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn offsets(spec: SliceSpec, len: u128) -> Vec<u128> {
        Offsets::new(spec.indices(len - 1).unwrap(), len - 1).collect()
    }

    fn python(start: Option<i128>, stop: Option<i128>, step: Option<i128>, len: i128) -> Vec<u128> {
        // Reference loop over slice.indices(len), with the Python clamping
        // written out directly on signed integers.
        let step = step.unwrap_or(1);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let norm = |v: Option<i128>, default: i128| match v {
            None => default,
            Some(v) if v < 0 => (v + len).max(lower),
            Some(v) => v.min(upper),
        };
        let start = norm(start, if step < 0 { upper } else { lower });
        let stop = norm(stop, if step < 0 { lower } else { upper });
        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            out.push(i as u128);
            i += step;
        }
        out
    }

    #[test]
    fn defaults() {
        assert_eq!(vec![0, 1, 2, 3], offsets(SliceSpec::default(), 4));
        assert_eq!(
            vec![3, 2, 1, 0],
            offsets(SliceSpec::new(None, None, Some(-1)), 4)
        );
        assert_eq!(
            vec![1, 3],
            offsets(SliceSpec::new(Some(1), None, Some(2)), 5)
        );
        assert_eq!(
            vec![3, 4],
            offsets(SliceSpec::new(Some(-2), None, None), 5)
        );
        assert!(offsets(SliceSpec::new(Some(3), Some(1), None), 5).is_empty());
        assert!(offsets(SliceSpec::new(Some(10), None, None), 5).is_empty());
        assert_eq!(
            vec![4],
            offsets(SliceSpec::new(Some(10), Some(3), Some(-1)), 5)
        );
    }

    #[test]
    fn zero_step() {
        assert_eq!(
            Err(Error::ZeroSliceStep),
            SliceSpec::new(None, None, Some(0)).indices(10)
        );
    }

    #[test]
    fn huge_range() {
        let last = u128::MAX;
        let tail: Vec<u128> =
            Offsets::new(SliceSpec::new(Some(-2), None, None).indices(last).unwrap(), last)
                .collect();
        assert_eq!(vec![u128::MAX - 1, u128::MAX], tail);
        let mut backward =
            Offsets::new(SliceSpec::new(None, None, Some(-1)).indices(last).unwrap(), last);
        assert_eq!(Some(u128::MAX), backward.next());
        assert_eq!(Some(u128::MAX - 1), backward.next());
        let mut stepped =
            Offsets::new(SliceSpec::new(Some(-1), None, Some(i128::MAX)).indices(last).unwrap(), last);
        assert_eq!(Some(u128::MAX), stepped.next());
        assert_eq!(None, stepped.next());
    }

    #[test]
    fn single() {
        assert_eq!(vec![0], Offsets::single(0).collect::<Vec<_>>());
        assert_eq!(vec![7], Offsets::single(7).collect::<Vec<_>>());
        assert_eq!(vec![u128::MAX], Offsets::single(u128::MAX).collect::<Vec<_>>());
    }

    #[test]
    fn parse() {
        assert_eq!(Ok(RangeIndex::Position(5)), "5".parse());
        assert_eq!(Ok(RangeIndex::Position(-1)), "-1".parse());
        assert_eq!(
            Ok(RangeIndex::Slice(SliceSpec::new(Some(1), Some(10), Some(2)))),
            "1:10:2".parse()
        );
        assert_eq!(
            Ok(RangeIndex::Slice(SliceSpec::new(None, None, Some(-1)))),
            "::-1".parse()
        );
        assert_eq!(Ok(RangeIndex::Slice(SliceSpec::default())), ":".parse());
        assert_eq!(
            Ok(RangeIndex::Slice(SliceSpec::new(Some(2), None, None))),
            "2:".parse()
        );
        for s in &["", "a", "1.5", "1:2:3:4", "--1", " 1"] {
            assert_eq!(
                Err(Error::InvalidIndexType(s.to_string())),
                s.parse::<RangeIndex>(),
                "{}",
                s
            );
        }
    }

    #[quickcheck]
    fn matches_python(start: Option<i8>, stop: Option<i8>, step: Option<i8>, len: u8) -> bool {
        let len = i128::from(len % 40) + 1;
        let step = step.map(i128::from).filter(|s| *s != 0);
        let start = start.map(i128::from);
        let stop = stop.map(i128::from);
        offsets(SliceSpec::new(start, stop, step), len as u128) == python(start, stop, step, len)
    }
}
