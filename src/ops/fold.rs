//! Constant folding of arithmetic progressions
//!
//! Shifting or scaling a progression by a constant (or adding two
//! progressions of equal length) yields another progression, so the result
//! can be described in O(1) instead of materializing every element.
//!
//! Folding is only done when it provably reads back exactly like the
//! elementwise result. All boundary values are carried as exact integers;
//! double progressions qualify only while every boundary value is integral
//! and small enough that no intermediate element rounds.

use std::borrow::Cow;

use crate::diagnostics::Raised;
use crate::object::{ElementKind, Scalar, Vector, VectorData};

use super::binary::evaluate_vectors;
use super::lattice::resolve_types;
use super::{Operator, Options};

/// Largest magnitude for which every element of a folded double progression
/// is computed without rounding.
const MAX_EXACT: f64 = (1u64 << 52) as f64;

/// One operand as seen by the folder.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Term<T> {
    Seq { start: T, stride: T, len: usize },
    Scalar(T),
}

impl<T: Copy> Term<T> {
    fn values(&self) -> Vec<T> {
        match *self {
            Term::Seq { start, stride, .. } => vec![start, stride],
            Term::Scalar(v) => vec![v],
        }
    }

    fn try_map<U>(self, f: impl Fn(T) -> Option<U>) -> Option<Term<U>> {
        Some(match self {
            Term::Seq { start, stride, len } => Term::Seq {
                start: f(start)?,
                stride: f(stride)?,
                len,
            },
            Term::Scalar(v) => Term::Scalar(f(v)?),
        })
    }
}

/// Read a vector as a progression or a single value. Missing values abort.
fn term(vector: &Vector) -> Option<Term<f64>> {
    if vector.len() == 1 {
        return match vector.get(0)? {
            s @ (Scalar::Logical(_) | Scalar::Integer(_) | Scalar::Double(_)) => {
                s.as_f64().map(Term::Scalar)
            }
            _ => None,
        };
    }

    let (start, stride, len) = match vector.data() {
        VectorData::Integer(x) => {
            let (s, d, len) = x.as_seq()?;
            (s.clone().as_option()? as f64, d.clone().as_option()? as f64, len)
        }
        VectorData::Double(x) => {
            let (s, d, len) = x.as_seq()?;
            (s.clone().as_option()?, d.clone().as_option()?, len)
        }
        _ => return None,
    };
    Some(Term::Seq { start, stride, len })
}

/// The value as an exact integer. Negative zero has no integer form.
fn exact(x: f64) -> Option<i64> {
    let negative_zero = x == 0.0 && x.is_sign_negative();
    (x.fract() == 0.0 && x.abs() <= MAX_EXACT && !negative_zero).then_some(x as i64)
}

/// Whether scaling produces a negative zero somewhere in the result. That
/// happens when a progression touching zero is scaled by a negative value,
/// or when any progression is multiplied by zero, and a progression cannot
/// describe it.
fn makes_negative_zero(op: Operator, left: Term<i64>, right: Term<i64>) -> bool {
    if !matches!(op, Operator::Multiply | Operator::Divide | Operator::IntegerDiv) {
        return false;
    }

    let ((Term::Seq { start, stride, len }, Term::Scalar(v))
    | (Term::Scalar(v), Term::Seq { start, stride, len })) = (left, right)
    else {
        return false;
    };

    let last = start.saturating_add(stride.saturating_mul(len as i64 - 1));
    v == 0 || (v < 0 && start.min(last) <= 0 && start.max(last) >= 0)
}

fn floor_div(x: i64, y: i64) -> i64 {
    let q = x / y;
    if x % y != 0 && (x < 0) != (y < 0) {
        q - 1
    } else {
        q
    }
}

/// Start, stride and length of the folded progression.
fn fold_terms(op: Operator, left: Term<i64>, right: Term<i64>) -> Option<(i64, i64, usize)> {
    use Operator::*;
    use Term::*;

    let (seq, value, seq_on_left) = match (left, right) {
        (Seq { start: s1, stride: d1, len: n1 }, Seq { start: s2, stride: d2, len: n2 }) => {
            return match op {
                Add if n1 == n2 => Some((s1.checked_add(s2)?, d1.checked_add(d2)?, n1)),
                Subtract if n1 == n2 => Some((s1.checked_sub(s2)?, d1.checked_sub(d2)?, n1)),
                _ => None,
            };
        }
        (seq @ Seq { .. }, Scalar(v)) => (seq, v, true),
        (Scalar(v), seq @ Seq { .. }) => (seq, v, false),
        (Scalar(_), Scalar(_)) => return None,
    };

    let Seq { start, stride, len } = seq else {
        return None;
    };

    match op {
        Add => Some((start.checked_add(value)?, stride, len)),
        Subtract if seq_on_left => Some((start.checked_sub(value)?, stride, len)),
        Subtract => Some((value.checked_sub(start)?, stride.checked_neg()?, len)),
        Multiply => Some((start.checked_mul(value)?, stride.checked_mul(value)?, len)),
        Divide if seq_on_left && value != 0 && start % value == 0 && stride % value == 0 => {
            Some((start / value, stride / value, len))
        }
        IntegerDiv if seq_on_left && value != 0 && stride % value == 0 => {
            Some((floor_div(start, value), stride / value, len))
        }
        _ => None,
    }
}

/// Fold `left op right` into a progression when at least one operand is a
/// progression and the other is a single value or a progression of equal
/// length. Returns `None` whenever folding does not apply; the caller then
/// iterates as usual.
///
/// Double results whose boundaries are not finite are materialized by
/// iterating instead, since a progression cannot describe them.
pub fn try_fold(op: Operator, left: &Vector, right: &Vector) -> Option<Vector> {
    if !(op.is_sequence_add_arithmetic() || op.is_sequence_mul_arithmetic()) {
        return None;
    }
    if !(left.is_seq() || right.is_seq()) || left.is_empty() || right.is_empty() {
        return None;
    }

    let resolved = resolve_types(op, left.kind(), right.kind()).ok()?;
    let (lterm, rterm) = (term(left)?, term(right)?);

    let finite = lterm
        .values()
        .into_iter()
        .chain(rterm.values())
        .all(f64::is_finite);

    if !finite {
        tracing::debug!(%op, "non-finite progression boundary, materializing");
        let mut raised = Raised::default();
        let options = Options {
            fold: false,
            ..Options::all()
        };
        return evaluate_vectors(
            op,
            Cow::Borrowed(left),
            Cow::Borrowed(right),
            options,
            &mut raised,
        )
        .ok();
    }

    let (lterm, rterm) = (lterm.try_map(exact)?, rterm.try_map(exact)?);
    if resolved.result == ElementKind::Double && makes_negative_zero(op, lterm, rterm) {
        tracing::debug!(%op, "progression would hold negative zeros, not folding");
        return None;
    }

    let (start, stride, len) = fold_terms(op, lterm, rterm)?;
    let last = start.checked_add(stride.checked_mul(len as i64 - 1)?)?;

    let folded = match resolved.result {
        ElementKind::Integer => {
            let in_range = |x: i64| x > i32::MIN as i64 && x <= i32::MAX as i64;
            if !(in_range(start) && in_range(stride) && in_range(last)) {
                return None;
            }
            Vector::seq_integer(start as i32, stride as i32, len)
        }
        ElementKind::Double => {
            let in_range = |x: i64| x.unsigned_abs() <= MAX_EXACT as u64;
            if !(in_range(start) && in_range(stride) && in_range(last)) {
                return None;
            }
            Vector::seq_double(start as f64, stride as f64, len)
        }
        _ => return None,
    };

    tracing::debug!(%op, start, stride, len, "folded progression");
    Some(folded)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::types::Integer;

    fn iterated(op: Operator, left: &Vector, right: &Vector) -> Vector {
        let options = Options {
            fold: false,
            reuse: false,
        };
        evaluate_vectors(
            op,
            Cow::Borrowed(left),
            Cow::Borrowed(right),
            options,
            &mut Raised::default(),
        )
        .unwrap()
    }

    #[test]
    fn shifting_a_range() {
        let seq = Vector::seq_integer(1, 1, 5);
        let folded = try_fold(Operator::Add, &seq, &Vector::from(vec![10])).unwrap();
        assert!(folded.is_seq());
        assert_eq!(folded, Vector::seq_integer(11, 1, 5));
        assert_eq!(folded.materialize(), Vector::from(vec![11, 12, 13, 14, 15]));
    }

    #[test]
    fn subtracting_from_a_constant_reverses() {
        let seq = Vector::seq_integer(1, 2, 3);
        let folded = try_fold(Operator::Subtract, &Vector::from(vec![10]), &seq).unwrap();
        assert_eq!(folded, Vector::from(vec![9, 7, 5]));
    }

    #[test]
    fn adding_two_ranges() {
        let l = Vector::seq_integer(1, 1, 4);
        let r = Vector::seq_integer(10, 10, 4);
        assert_eq!(
            try_fold(Operator::Add, &l, &r),
            Some(Vector::seq_integer(11, 11, 4))
        );
        assert_eq!(try_fold(Operator::Add, &l, &Vector::seq_integer(1, 1, 2)), None);
        assert_eq!(try_fold(Operator::Multiply, &l, &r), None);
    }

    #[test]
    fn scaling() {
        let seq = Vector::seq_integer(2, 4, 3);
        let two = Vector::from(vec![2]);
        assert_eq!(
            try_fold(Operator::Multiply, &two, &seq),
            Some(Vector::seq_integer(4, 8, 3))
        );

        let halves = try_fold(Operator::Divide, &seq, &two).unwrap();
        assert_eq!(halves.kind(), ElementKind::Double);
        assert_eq!(halves, Vector::from(vec![1.0, 3.0, 5.0]));

        assert_eq!(
            try_fold(Operator::IntegerDiv, &Vector::seq_integer(-3, 4, 3), &two),
            Some(Vector::seq_integer(-2, 2, 3))
        );
        assert_eq!(try_fold(Operator::Divide, &seq, &Vector::from(vec![3])), None);
        assert_eq!(try_fold(Operator::Divide, &two, &seq), None);
    }

    #[test]
    fn aborts_on_missing_or_overflow() {
        let seq = Vector::seq_integer(1, 1, 5);
        let na = Vector::from(vec![Integer::NA]);
        assert_eq!(try_fold(Operator::Add, &seq, &na), None);

        let big = Vector::from(vec![i32::MAX - 2]);
        assert_eq!(try_fold(Operator::Add, &seq, &big), None);
    }

    #[test]
    fn non_finite_boundaries_materialize() {
        let seq = Vector::seq_double(1.0, 1.0, 3);
        let inf = Vector::from(vec![f64::INFINITY]);
        let out = try_fold(Operator::Multiply, &seq, &inf).unwrap();
        assert!(!out.is_seq());
        assert_eq!(out, Vector::from(vec![f64::INFINITY; 3]));
    }

    #[test]
    fn fractional_doubles_are_not_folded() {
        let seq = Vector::seq_double(0.5, 0.25, 4);
        assert_eq!(try_fold(Operator::Add, &seq, &Vector::from(vec![1.0])), None);
    }

    /// Kinds and exact bit patterns of every element, so that signed zeros
    /// and NaN payloads are told apart.
    fn bits(v: &Vector) -> (ElementKind, Vec<Option<u64>>) {
        let values = (0..v.len())
            .map(|i| v.get(i).and_then(|x| x.as_f64()).map(f64::to_bits))
            .collect();
        (v.kind(), values)
    }

    #[test]
    fn negative_zeros_are_not_folded() {
        let through_zero = Vector::seq_integer(0, 1, 3);
        let minus_one = Vector::from(vec![-1]);
        assert_eq!(try_fold(Operator::Divide, &through_zero, &minus_one), None);

        let out = iterated(Operator::Divide, &through_zero, &minus_one);
        let first = out.get(0).and_then(|x| x.as_f64()).unwrap();
        assert!(first == 0.0 && first.is_sign_negative());

        let negatives = Vector::seq_double(-3.0, 1.0, 2);
        let zero = Vector::from(vec![0.0]);
        assert_eq!(try_fold(Operator::Multiply, &negatives, &zero), None);
        assert_eq!(try_fold(Operator::Add, &Vector::seq_double(-0.0, 1.0, 3), &zero), None);

        // integer results have a single zero
        assert_eq!(
            try_fold(Operator::Multiply, &through_zero, &minus_one),
            Some(Vector::seq_integer(0, -1, 3))
        );
    }

    #[test]
    fn folding_agrees_with_iteration() {
        crate::test_utils::init_test_logging();
        let seqs = [
            Vector::seq_integer(-5, 3, 7),
            Vector::seq_integer(100, -7, 4),
            Vector::seq_double(2.0, 6.0, 5),
            Vector::seq_double(-1e6, 2.0, 3),
            Vector::seq_integer(0, 1, 4),
            Vector::seq_integer(3, -1, 5),
            Vector::seq_double(-2.0, 1.0, 5),
        ];
        let scalars = [
            Vector::from(vec![3]),
            Vector::from(vec![-2]),
            Vector::from(vec![2.0]),
            Vector::from(vec![true]),
            Vector::from(vec![0.5]),
            Vector::from(vec![-1]),
            Vector::from(vec![0]),
            Vector::from(vec![-2.0]),
            Vector::from(vec![0.0]),
        ];
        let ops = [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::IntegerDiv,
        ];

        for seq in seqs.iter() {
            for v in scalars.iter() {
                for op in ops {
                    for (l, r) in [(seq, v), (v, seq)] {
                        if let Some(folded) = try_fold(op, l, r) {
                            assert_eq!(
                                bits(&folded),
                                bits(&iterated(op, l, r)),
                                "{op} on {l:?} and {r:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}
