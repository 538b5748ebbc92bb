//! Missing values
//!
//! Inside this crate an NA is the `NA` variant of [`OptionNA`], which keeps it
//! distinct from IEEE NaN (`Some(f64::NAN)`). In R's memory layout an NA is
//! an out-of-band bit pattern per kind; the conversions here translate
//! between the two.

use super::complex::Cplx;
use super::types::*;
use super::{OptionNA, Vector};

/// Integer NA, the smallest representable `i32`.
pub const NA_INTEGER: i32 = i32::MIN;

/// Double NA: a NaN whose low word holds 1954.
pub const NA_REAL_BITS: u64 = 0x7FF0_0000_0000_07A2;

const NA_REAL_LOW_WORD: u32 = 1954;

/// Whether a raw double carries the NA payload (as opposed to any other NaN).
pub fn is_na_real(x: f64) -> bool {
    x.is_nan() && (x.to_bits() as u32) == NA_REAL_LOW_WORD
}

pub fn na_real() -> f64 {
    f64::from_bits(NA_REAL_BITS)
}

impl OptionNA<f64> {
    pub fn from_r_bits(x: f64) -> Self {
        if is_na_real(x) {
            OptionNA::NA
        } else {
            OptionNA::Some(x)
        }
    }

    pub fn to_r_bits(&self) -> f64 {
        match self {
            OptionNA::Some(x) => *x,
            OptionNA::NA => na_real(),
        }
    }

    /// True for both NA and any NaN.
    pub fn is_nan_or_na(&self) -> bool {
        match self {
            OptionNA::Some(x) => x.is_nan(),
            OptionNA::NA => true,
        }
    }
}

impl OptionNA<i32> {
    pub fn from_r_bits(x: i32) -> Self {
        if x == NA_INTEGER {
            OptionNA::NA
        } else {
            OptionNA::Some(x)
        }
    }

    pub fn to_r_bits(&self) -> i32 {
        match self {
            OptionNA::Some(x) => *x,
            OptionNA::NA => NA_INTEGER,
        }
    }
}

impl OptionNA<Cplx> {
    /// A complex value is NA when either of its parts is the double NA.
    pub fn from_r_parts(re: f64, im: f64) -> Self {
        if is_na_real(re) || is_na_real(im) {
            OptionNA::NA
        } else {
            OptionNA::Some(Cplx::new(re, im))
        }
    }

    pub fn to_r_parts(&self) -> (f64, f64) {
        match self {
            OptionNA::Some(x) => (x.re, x.im),
            OptionNA::NA => (na_real(), na_real()),
        }
    }
}

/// Tracks whether NA values have been observed.
///
/// One tracker is armed per operand and one for the result of an operation.
/// A disabled tracker belongs to an operand known to be complete and skips
/// all per-element work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NACheck {
    enabled: bool,
    seen_na: bool,
}

impl NACheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the tracker for a vector that may contain NA values.
    pub fn enable(&mut self, vector: &Vector) {
        self.enable_if(!vector.is_complete());
    }

    pub fn enable_if(&mut self, may_contain_na: bool) {
        self.enabled = may_contain_na;
        self.seen_na = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether `value` is NA, recording the observation.
    #[inline]
    pub fn check<T: Atomic>(&mut self, value: &T) -> bool {
        if !self.enabled {
            return false;
        }
        let na = value.is_na();
        self.seen_na |= na;
        na
    }

    /// Whether `value` is NA or any other NaN. Only NA counts as observed.
    #[inline]
    pub fn check_nan_or_na(&mut self, value: &Double) -> bool {
        match value {
            OptionNA::Some(x) => x.is_nan(),
            OptionNA::NA => {
                self.seen_na |= self.enabled;
                true
            }
        }
    }

    pub fn never_seen_na(&self) -> bool {
        !self.seen_na
    }
}

/// The trackers used over a single evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NAChecks {
    pub left: NACheck,
    pub right: NACheck,
    pub result: NACheck,
}

impl NAChecks {
    /// Whether the produced values are known to hold no NA.
    ///
    /// When the result tracker is armed every produced value was observed, so
    /// its history is exact. Otherwise neither operand could hold NA and the
    /// operator cannot introduce one, so the result is complete by
    /// construction.
    pub fn result_complete(&self) -> bool {
        !self.result.is_enabled() || self.result.never_seen_na()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::OptionNA::*;

    #[test]
    fn na_is_distinct_from_nan() {
        assert_eq!(Double::from_r_bits(na_real()), NA);
        assert!(matches!(Double::from_r_bits(f64::NAN), Some(x) if x.is_nan()));
        assert!(is_na_real(Double::NA.to_r_bits()));
        assert!(!is_na_real(f64::NAN));
    }

    #[test]
    fn complex_na_from_either_part() {
        assert_eq!(Complex::from_r_parts(1.0, na_real()), NA);
        assert_eq!(
            Complex::from_r_parts(1.0, f64::NAN).to_r_parts().0,
            1.0
        );
    }

    #[test]
    fn disabled_tracker_skips_checks() {
        let mut check = NACheck::new();
        assert!(!check.check(&Integer::NA));
        assert!(check.never_seen_na());
    }

    #[test]
    fn tracker_remembers_na() {
        let mut check = NACheck::new();
        check.enable(&Vector::from(vec![Some(1), NA]));
        assert!(!check.check(&Integer::Some(1)));
        assert!(check.never_seen_na());
        assert!(check.check(&Integer::NA));
        assert!(!check.never_seen_na());

        check.enable_if(true);
        assert!(check.never_seen_na());
    }

    #[test]
    fn nan_is_reported_but_not_recorded() {
        let mut check = NACheck::new();
        check.enable_if(true);
        assert!(check.check_nan_or_na(&Some(f64::NAN)));
        assert!(check.never_seen_na());
        assert!(check.check_nan_or_na(&NA));
        assert!(!check.never_seen_na());
    }
}
