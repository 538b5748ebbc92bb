//! Elementwise kernels
//!
//! Each kernel computes a single position of a vectorized operator. Operand
//! values are checked against the per-call NA trackers before any math runs,
//! and the corner cases where a missing operand still determines the result
//! (`NA ^ 0`, `1 ^ NA`, `NaN + NA`, ...) are spelled out explicitly rather
//! than left to floating point behavior.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::diagnostics::{Diagnostics, LogSink, Raised, Warning};
use crate::error::EvalResult;
use crate::internal_err;
use crate::object::complex::Cplx;
use crate::object::na::NAChecks;
use crate::object::{types::*, OptionNA, Scalar, Vector};

use super::binary::evaluate_vectors;
use super::{Operator, Options};

/// State threaded through every kernel call of one evaluation.
#[derive(Debug, Default, Clone)]
pub(crate) struct CallState {
    pub checks: NAChecks,
    pub raised: Raised,
}

impl CallState {
    /// State with every tracker armed, for values of unknown completeness.
    #[cfg(test)]
    pub fn armed() -> Self {
        let mut state = CallState::default();
        state.checks.left.enable_if(true);
        state.checks.right.enable_if(true);
        state.checks.result.enable_if(true);
        state
    }

    /// Record a produced value with the result tracker.
    #[inline]
    pub fn emit<T: Atomic>(&mut self, value: T) -> T {
        self.checks.result.check(&value);
        value
    }
}

const EPSILON: f64 = f64::EPSILON;

/// `x ^ y` following R's special cases for infinite operands.
pub(crate) fn pow_f64(x: f64, y: f64) -> f64 {
    if x == 1.0 || y == 0.0 {
        return 1.0;
    }
    if x == 0.0 {
        return if y > 0.0 {
            0.0
        } else if y < 0.0 {
            f64::INFINITY
        } else {
            y
        };
    }
    if x.is_nan() || y.is_nan() {
        return x + y;
    }
    if x.is_finite() && y.is_finite() {
        return if y == 2.0 { x * x } else { x.powf(y) };
    }
    if !x.is_finite() {
        if x > 0.0 {
            return if y < 0.0 { 0.0 } else { f64::INFINITY };
        }
        // negative infinity
        if y.is_finite() && y == y.floor() {
            return if y < 0.0 {
                0.0
            } else if mod_f64(y, 2.0, &mut Raised::default()) != 0.0 {
                x
            } else {
                -x
            };
        }
    }
    if !y.is_finite() && x >= 0.0 {
        return if y > 0.0 {
            if x >= 1.0 {
                f64::INFINITY
            } else {
                0.0
            }
        } else if x < 1.0 {
            f64::INFINITY
        } else {
            0.0
        };
    }
    f64::NAN
}

/// Modulus taking the sign of the divisor.
pub(crate) fn mod_f64(x: f64, y: f64, raised: &mut Raised) -> f64 {
    if y == 0.0 {
        return f64::NAN;
    }
    if y.abs() * EPSILON > 1.0 && x.is_finite() && x.abs() <= y.abs() {
        return if x.abs() == y.abs() {
            0.0
        } else if (x < 0.0 && y > 0.0) || (y < 0.0 && x > 0.0) {
            x + y
        } else {
            x
        };
    }
    let q = x / y;
    if q.is_finite() && q.abs() * EPSILON > 1.0 {
        raised.raise(Warning::ModulusAccuracy);
    }
    let tmp = x - q.floor() * y;
    tmp - (tmp / y).floor() * y
}

/// Integer division rounding toward negative infinity.
pub(crate) fn int_div_f64(x: f64, y: f64) -> f64 {
    let q = x / y;
    if y == 0.0 || q.abs() * EPSILON > 1.0 || !q.is_finite() {
        return q;
    }
    if q.abs() < 1.0 {
        return if q < 0.0 || (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0) {
            -1.0
        } else {
            0.0
        };
    }
    let tmp = x - q.floor() * y;
    q.floor() + (tmp / y).floor()
}

fn double_op(op: Operator, x: f64, y: f64, raised: &mut Raised) -> f64 {
    use Operator::*;
    match op {
        Add => x + y,
        Subtract => x - y,
        Multiply => x * y,
        Divide => x / y,
        Pow => pow_f64(x, y),
        Mod => mod_f64(x, y, raised),
        IntegerDiv => int_div_f64(x, y),
        _ => f64::NAN,
    }
}

/// Arithmetic on doubles.
pub(crate) fn arith_double(op: Operator, l: &Double, r: &Double, state: &mut CallState) -> Double {
    use OptionNA::*;

    if state.checks.left.check(l) {
        return match (op, r) {
            (Operator::Pow, Some(y)) if *y == 0.0 => Some(1.0),
            (Operator::Mod, Some(y)) if *y == 0.0 => Some(f64::NAN),
            _ => NA,
        };
    }

    if state.checks.right.check(r) {
        return match (op, l) {
            (Operator::Pow, Some(x)) if *x == 1.0 => Some(1.0),
            _ if state.checks.left.check_nan_or_na(l) => l.clone(),
            _ => NA,
        };
    }

    match (l, r) {
        (Some(x), Some(y)) => Some(double_op(op, *x, *y, &mut state.raised)),
        _ => NA,
    }
}

/// Arithmetic on integers producing integers. Results outside the integer
/// range become NA with an overflow warning.
pub(crate) fn arith_integer(
    op: Operator,
    l: &Integer,
    r: &Integer,
    state: &mut CallState,
) -> Integer {
    use OptionNA::*;

    let l_na = state.checks.left.check(l);
    let r_na = state.checks.right.check(r);
    let (x, y) = match (l, r) {
        (Some(x), Some(y)) if !l_na && !r_na => (*x as i64, *y as i64),
        _ => return NA,
    };

    let value = match op {
        Operator::Add => x + y,
        Operator::Subtract => x - y,
        Operator::Multiply => x * y,
        Operator::Mod if y == 0 => return NA,
        Operator::Mod if x >= 0 && y > 0 => x % y,
        Operator::Mod => mod_f64(x as f64, y as f64, &mut state.raised) as i64,
        Operator::IntegerDiv if y == 0 => return NA,
        Operator::IntegerDiv => (x as f64 / y as f64).floor() as i64,
        _ => return NA,
    };

    match i32::try_from(value) {
        Ok(v) if v != crate::object::NA_INTEGER => Some(v),
        _ => {
            state.raised.raise(Warning::IntegerOverflow);
            NA
        }
    }
}

/// Arithmetic on integers that always produces doubles (`/` and `^`).
pub(crate) fn arith_integer_double(
    op: Operator,
    l: &Integer,
    r: &Integer,
    state: &mut CallState,
) -> Double {
    use OptionNA::*;

    let l_na = state.checks.left.check(l);
    let r_na = state.checks.right.check(r);

    if op == Operator::Pow && (matches!(l, Some(1)) || matches!(r, Some(0))) {
        return Some(1.0);
    }

    match (l, r) {
        (Some(x), Some(y)) if !l_na && !r_na => {
            Some(double_op(op, *x as f64, *y as f64, &mut state.raised))
        }
        _ => NA,
    }
}

fn complex_op(op: Operator, x: Cplx, y: Cplx) -> Cplx {
    use Operator::*;
    match op {
        Add => x + y,
        Subtract => x - y,
        Multiply => x * y,
        Divide => x / y,
        Pow => x.pow(y),
        _ => Cplx::nan(),
    }
}

/// Arithmetic on complex values. A missing operand wins over NaN.
pub(crate) fn arith_complex(
    op: Operator,
    l: &Complex,
    r: &Complex,
    state: &mut CallState,
) -> Complex {
    use OptionNA::*;

    if state.checks.left.check(l) {
        return match (op, r) {
            (Operator::Pow, Some(y)) if y.is_zero() => Some(Cplx::from_real(1.0)),
            _ => NA,
        };
    }

    if state.checks.right.check(r) {
        return match (op, l) {
            (Operator::Pow, Some(x)) if x.is_one() => Some(Cplx::from_real(1.0)),
            (Operator::Pow, Some(x)) if x.is_zero() => Some(Cplx::nan()),
            _ => NA,
        };
    }

    match (l, r) {
        (Some(x), Some(y)) => Some(complex_op(op, *x, *y)),
        _ => NA,
    }
}

/// Negation, for unary minus.
pub(crate) trait Negate: Atomic {
    fn negate(self) -> Self;
}

impl Negate for Integer {
    fn negate(self) -> Self {
        self.map(|x| -x)
    }
}

impl Negate for Double {
    fn negate(self) -> Self {
        self.map(|x| -x)
    }
}

impl Negate for Complex {
    fn negate(self) -> Self {
        self.map(|x| -x)
    }
}

fn ordering_result(op: Operator, ordering: Ordering) -> bool {
    use Operator::*;
    match op {
        Eq => ordering == Ordering::Equal,
        Ne => ordering != Ordering::Equal,
        Lt => ordering == Ordering::Less,
        Le => ordering != Ordering::Greater,
        Gt => ordering == Ordering::Greater,
        Ge => ordering != Ordering::Less,
        _ => false,
    }
}

/// Comparison of any ordered kind. Missing operands and NaN compare as NA.
pub(crate) fn compare<T>(op: Operator, l: &T, r: &T, state: &mut CallState) -> Logical
where
    T: Atomic + PartialOrd,
{
    if state.checks.left.check(l) | state.checks.right.check(r) {
        return OptionNA::NA;
    }
    match l.partial_cmp(r) {
        Some(ordering) => OptionNA::Some(ordering_result(op, ordering)),
        None => OptionNA::NA,
    }
}

/// Equality of complex values, which have no ordering.
pub(crate) fn compare_complex(
    op: Operator,
    l: &Complex,
    r: &Complex,
    state: &mut CallState,
) -> Logical {
    use OptionNA::*;
    debug_assert!(!op.is_ordering());

    if state.checks.left.check(l) | state.checks.right.check(r) {
        return NA;
    }
    match (l, r) {
        (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => match op {
            Operator::Ne => Some(x != y),
            _ => Some(x == y),
        },
        _ => NA,
    }
}

/// Three-valued `&` and `|`: a known `FALSE` decides `&`, a known `TRUE`
/// decides `|`, even against NA.
pub(crate) fn logical(op: Operator, l: &Logical, r: &Logical, state: &mut CallState) -> Logical {
    use OptionNA::*;
    state.checks.left.check(l);
    state.checks.right.check(r);

    let decisive = op == Operator::Or;
    match (l, r) {
        (Some(x), _) if *x == decisive => Some(decisive),
        (_, Some(y)) if *y == decisive => Some(decisive),
        (Some(_), Some(_)) => Some(!decisive),
        _ => NA,
    }
}

/// Bitwise `&` and `|` on raw bytes.
pub(crate) fn bitwise(op: Operator, l: &Raw, r: &Raw, _state: &mut CallState) -> Raw {
    match op {
        Operator::Or => l | r,
        _ => l & r,
    }
}

/// Apply an operator to two single values.
///
/// Warnings are forwarded to the `tracing` log; use
/// [`Session::apply_scalar`](crate::Session::apply_scalar) to direct them to
/// another sink.
pub fn apply_scalar(op: Operator, left: &Scalar, right: &Scalar) -> EvalResult<Scalar> {
    apply_scalar_with(op, left, right, &mut LogSink)
}

pub(crate) fn apply_scalar_with(
    op: Operator,
    left: &Scalar,
    right: &Scalar,
    sink: &mut impl Diagnostics,
) -> EvalResult<Scalar> {
    let mut raised = Raised::default();
    let result = evaluate_vectors(
        op,
        Cow::Owned(Vector::from(left.clone())),
        Cow::Owned(Vector::from(right.clone())),
        Options::all(),
        &mut raised,
    )?;
    raised.report(sink);

    result
        .get(0)
        .ok_or_else(|| internal_err!("scalar operation produced no value"))
}
