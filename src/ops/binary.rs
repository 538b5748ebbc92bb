use std::borrow::Cow;

use crate::diagnostics::{Raised, Warning};
use crate::error::{Error, EvalResult};
use crate::internal_err;
use crate::object::reptype::RepType;
use crate::object::{types::*, List, Obj, Vector, VectorData};

use super::attributes::{attach_attributes, check_conformable, Side};
use super::combine::combine_all;
use super::fold::try_fold;
use super::iterators::{map_in_place_left, map_in_place_right, map_new, Strategy};
use super::lattice::{resolve_types, Resolved};
use super::scalar::*;
use super::{Family, Operator, Options};

/// An operator argument, tagged with whether the callee may take it over.
///
/// A `Temporary` operand is owned by the evaluation and, when nothing else
/// shares its buffer, may be overwritten with the result.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Shared(&'a Obj),
    Temporary(Obj),
}

impl<'a> Operand<'a> {
    pub fn obj(&self) -> &Obj {
        match self {
            Operand::Shared(x) => x,
            Operand::Temporary(x) => x,
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Operand::Temporary(_))
    }
}

impl<'a> From<&'a Obj> for Operand<'a> {
    fn from(value: &'a Obj) -> Self {
        Operand::Shared(value)
    }
}

impl From<Obj> for Operand<'_> {
    fn from(value: Obj) -> Self {
        Operand::Temporary(value)
    }
}

impl From<Vector> for Operand<'_> {
    fn from(value: Vector) -> Self {
        Operand::Temporary(Obj::Vector(value))
    }
}

/// Flatten a list whose elements are all single atomic values.
fn flatten_list(op: Operator, list: &List) -> EvalResult<Vector> {
    let target = match op.family() {
        Family::Arithmetic => ElementKind::Double,
        Family::Comparison => ElementKind::Character,
        Family::Logical => ElementKind::Logical,
    };

    let atomic = list
        .pairs()
        .iter()
        .all(|(_, value)| matches!(value, Obj::Vector(v) if v.len() == 1));

    if !atomic {
        return Err(Error::ListCoercion(target));
    }

    combine_all(list.pairs().to_vec())?
        .into_vector()
        .ok_or_else(|| internal_err!("flattened list is not a vector"))
}

/// View an operand as an atomic vector. `NULL` is an empty logical vector.
fn normalize<'a>(op: Operator, operand: Operand<'a>) -> EvalResult<Cow<'a, Vector>> {
    Ok(match operand {
        Operand::Shared(Obj::Vector(v)) => Cow::Borrowed(v),
        Operand::Temporary(Obj::Vector(v)) => Cow::Owned(v),
        Operand::Shared(Obj::Null) | Operand::Temporary(Obj::Null) => {
            Cow::Owned(Vector::empty(ElementKind::Logical))
        }
        Operand::Shared(Obj::List(l)) => Cow::Owned(flatten_list(op, l)?),
        Operand::Temporary(Obj::List(l)) => Cow::Owned(flatten_list(op, &l)?),
    })
}

/// Evaluate `left op right`, or the unary form of `op` when `right` is
/// missing.
pub(crate) fn evaluate(
    op: Operator,
    left: Operand<'_>,
    right: Option<Operand<'_>>,
    options: Options,
    raised: &mut Raised,
) -> EvalResult<Obj> {
    let Some(right) = right else {
        return evaluate_unary(op, left, options).map(Obj::Vector);
    };

    let left = normalize(op, left)?;
    let right = normalize(op, right)?;
    evaluate_vectors(op, left, right, options, raised).map(Obj::Vector)
}

/// Which operands may be overwritten with the result.
#[derive(Debug, Default, Clone, Copy)]
struct Reuse {
    left: bool,
    right: bool,
}

fn reusable(operand: &Cow<'_, Vector>, resolved: Resolved, len: usize) -> bool {
    matches!(operand, Cow::Owned(_))
        && operand.kind() == resolved.argument
        && resolved.argument == resolved.result
        && operand.len() > 1
        && operand.len() == len
        && !operand.is_seq()
}

/// Arm the NA trackers for one evaluation.
///
/// An operand tracker is needed when the operand may hold NA, or when
/// converting it to the argument kind can produce one (NaN to logical).
/// The result tracker observes every produced value whenever an NA could
/// appear in the output.
fn arm_trackers(op: Operator, resolved: Resolved, left: &Vector, right: &Vector) -> CallState {
    let may_hold_na = |v: &Vector| {
        !v.is_complete()
            || (resolved.argument == ElementKind::Logical
                && matches!(v.kind(), ElementKind::Double | ElementKind::Complex))
    };

    let mut state = CallState::default();
    state.checks.left.enable_if(may_hold_na(left));
    state.checks.right.enable_if(may_hold_na(right));
    state.checks.result.enable_if(
        state.checks.left.is_enabled()
            || state.checks.right.is_enabled()
            || op.introduces_na()
            || resolved.result == ElementKind::Integer,
    );
    state
}

/// Move the values out of an owned operand, leaving its attributes behind.
fn split(operand: Cow<'_, Vector>) -> (Cow<'_, Vector>, VectorData) {
    match operand {
        Cow::Borrowed(v) => (Cow::Borrowed(v), v.data().clone()),
        Cow::Owned(mut v) => {
            let data = v.take_data();
            (Cow::Owned(v), data)
        }
    }
}

pub(crate) fn evaluate_vectors(
    op: Operator,
    left: Cow<'_, Vector>,
    right: Cow<'_, Vector>,
    options: Options,
    raised: &mut Raised,
) -> EvalResult<Vector> {
    let resolved = resolve_types(op, left.kind(), right.kind())?;
    check_conformable(&left, &right)?;

    let (llen, rlen) = (left.len(), right.len());
    if llen == 0 || rlen == 0 {
        return Ok(Vector::empty(resolved.result));
    }

    if options.fold {
        if let Some(folded) = try_fold(op, &left, &right) {
            let (la, ra) = (left.attributes(), right.attributes());
            return Ok(attach_attributes(folded, la, llen, ra, rlen, None));
        }
    }

    let len = llen.max(rlen);
    let strategy = Strategy::select(llen, rlen);
    tracing::debug!(%op, %strategy, llen, rlen, "evaluating elementwise");

    let mut state = arm_trackers(op, resolved, &left, &right);
    if strategy.is_mismatched() {
        state.raised.raise(Warning::LengthMismatch {
            longer: len,
            shorter: llen.min(rlen),
        });
    }

    let reuse = Reuse {
        left: options.reuse && reusable(&left, resolved, len),
        right: options.reuse && reusable(&right, resolved, len),
    };

    let (left, ldata) = split(left);
    let (right, rdata) = split(right);
    let (data, reused) = compute(op, resolved, ldata, rdata, reuse, &mut state)?;
    let complete = state.checks.result_complete();
    raised.absorb(state.raised);

    let result = match reused {
        Some(Side::Left) => {
            tracing::debug!(%op, "result written into left operand");
            let result = left.into_owned().with_data(data, complete);
            attach_attributes(result, None, llen, right.attributes(), rlen, reused)
        }
        Some(Side::Right) => {
            tracing::debug!(%op, "result written into right operand");
            let result = right.into_owned().with_data(data, complete);
            attach_attributes(result, left.attributes(), llen, None, rlen, reused)
        }
        None => {
            let result = Vector::with_completeness(data, complete);
            attach_attributes(result, left.attributes(), llen, right.attributes(), rlen, None)
        }
    };

    Ok(result)
}

type Coerce<T> = fn(VectorData) -> EvalResult<RepType<T>>;

/// Run a kernel whose argument and result kinds agree, writing into an
/// operand's buffer when allowed.
fn same<T, K>(
    (left, right): (RepType<T>, RepType<T>),
    reuse: Reuse,
    state: &mut CallState,
    kernel: K,
) -> (VectorData, Option<Side>)
where
    T: Atomic,
    RepType<T>: Into<VectorData>,
    K: Fn(&T, &T, &mut CallState) -> T,
{
    let (llen, rlen) = (left.len(), right.len());
    let mut f = |x: &T, y: &T| {
        let out = kernel(x, y, state);
        state.emit(out)
    };

    let left = if reuse.left {
        match left.try_unique() {
            Ok(mut buffer) => {
                map_in_place_left(&mut buffer, right.reader(), rlen, &mut f);
                return (RepType::from(buffer).into(), Some(Side::Left));
            }
            Err(left) => left,
        }
    } else {
        left
    };

    let right = if reuse.right {
        match right.try_unique() {
            Ok(mut buffer) => {
                map_in_place_right(left.reader(), llen, &mut buffer, &mut f);
                return (RepType::from(buffer).into(), Some(Side::Right));
            }
            Err(right) => right,
        }
    } else {
        right
    };

    let out = map_new(left.reader(), llen, right.reader(), rlen, f);
    (RepType::from(out).into(), None)
}

/// Run a kernel into a fresh buffer.
fn fresh<A, O, K>(
    (left, right): (RepType<A>, RepType<A>),
    state: &mut CallState,
    kernel: K,
) -> (VectorData, Option<Side>)
where
    A: Atomic,
    O: Atomic,
    RepType<O>: Into<VectorData>,
    K: Fn(&A, &A, &mut CallState) -> O,
{
    let (llen, rlen) = (left.len(), right.len());
    let out = map_new(left.reader(), llen, right.reader(), rlen, |x, y| {
        let out = kernel(x, y, state);
        state.emit(out)
    });
    (RepType::from(out).into(), None)
}

fn coerce_both<T>(
    coerce: Coerce<T>,
    left: VectorData,
    right: VectorData,
) -> EvalResult<(RepType<T>, RepType<T>)> {
    Ok((coerce(left)?, coerce(right)?))
}

/// Dispatch on the resolved kinds to a typed kernel.
fn compute(
    op: Operator,
    resolved: Resolved,
    left: VectorData,
    right: VectorData,
    reuse: Reuse,
    state: &mut CallState,
) -> EvalResult<(VectorData, Option<Side>)> {
    use ElementKind as K;
    use Family::{Arithmetic, Comparison};

    let (l, r) = (left, right);
    Ok(match (op.family(), resolved.argument, resolved.result) {
        (Arithmetic, K::Integer, K::Integer) => {
            let args = coerce_both(VectorData::coerce::<Integer>, l, r)?;
            same(args, reuse, state, |x, y, s| arith_integer(op, x, y, s))
        }
        (Arithmetic, K::Integer, K::Double) => {
            let args = coerce_both(VectorData::coerce::<Integer>, l, r)?;
            fresh(args, state, |x, y, s| arith_integer_double(op, x, y, s))
        }
        (Arithmetic, K::Double, K::Double) => {
            let args = coerce_both(VectorData::coerce::<Double>, l, r)?;
            same(args, reuse, state, |x, y, s| arith_double(op, x, y, s))
        }
        (Arithmetic, K::Complex, K::Complex) => {
            let args = coerce_both(VectorData::coerce::<Complex>, l, r)?;
            same(args, reuse, state, |x, y, s| arith_complex(op, x, y, s))
        }

        (Comparison, K::Logical, _) => {
            let args = coerce_both(VectorData::coerce::<Logical>, l, r)?;
            fresh(args, state, |x, y, s| compare(op, x, y, s))
        }
        (Comparison, K::Integer, _) => {
            let args = coerce_both(VectorData::coerce::<Integer>, l, r)?;
            fresh(args, state, |x, y, s| compare(op, x, y, s))
        }
        (Comparison, K::Double, _) => {
            let args = coerce_both(VectorData::coerce::<Double>, l, r)?;
            fresh(args, state, |x, y, s| compare(op, x, y, s))
        }
        (Comparison, K::Complex, _) => {
            let args = coerce_both(VectorData::coerce::<Complex>, l, r)?;
            fresh(args, state, |x, y, s| compare_complex(op, x, y, s))
        }
        (Comparison, K::Character, _) => {
            let args = coerce_both(VectorData::coerce::<Character>, l, r)?;
            fresh(args, state, |x, y, s| compare(op, x, y, s))
        }
        (Comparison, K::Raw, _) => {
            let args = coerce_both(VectorData::coerce::<Raw>, l, r)?;
            fresh(args, state, |x, y, s| compare(op, x, y, s))
        }

        (Family::Logical, K::Logical, _) => {
            let args = coerce_both(VectorData::into_logical, l, r)?;
            same(args, reuse, state, |x, y, s| logical(op, x, y, s))
        }
        (Family::Logical, K::Raw, _) => {
            let args = coerce_both(VectorData::coerce::<Raw>, l, r)?;
            same(args, reuse, state, |x, y, s| bitwise(op, x, y, s))
        }

        (family, argument, result) => {
            return Err(internal_err!(format!(
                "no {family} kernel from {argument} to {result}"
            )))
        }
    })
}

fn negate_rep<T: Negate>(values: RepType<T>, in_place: bool) -> RepType<T> {
    match values {
        RepType::Seq { start, stride, len } => RepType::Seq {
            start: start.negate(),
            stride: stride.negate(),
            len,
        },
        values => match values.try_unique() {
            Ok(mut buffer) if in_place => {
                buffer.iter_mut().for_each(|x| *x = x.clone().negate());
                RepType::from(buffer)
            }
            Ok(buffer) => buffer.into_iter().map(Negate::negate).collect::<Vec<_>>().into(),
            Err(values) => values
                .iter_values()
                .map(Negate::negate)
                .collect::<Vec<_>>()
                .into(),
        },
    }
}

/// Unary `+` and `-`. Logical values promote to integer, attributes are
/// kept.
fn evaluate_unary(op: Operator, operand: Operand<'_>, options: Options) -> EvalResult<Vector> {
    if !op.is_sequence_add_arithmetic() {
        return Err(Error::Arity(op));
    }

    let mut vector = normalize(op, operand)?.into_owned();
    let complete = vector.is_complete();
    let negate = op == Operator::Subtract;
    let reuse = options.reuse;

    let data: VectorData = match vector.take_data() {
        data @ (VectorData::Logical(_) | VectorData::Integer(_)) => {
            let values = data.coerce::<Integer>()?;
            if negate {
                negate_rep(values, reuse).into()
            } else {
                values.into()
            }
        }
        VectorData::Double(x) if negate => negate_rep(x, reuse).into(),
        VectorData::Complex(x) if negate => negate_rep(x, reuse).into(),
        data @ (VectorData::Double(_) | VectorData::Complex(_)) => data,
        other => {
            return Err(Error::UnaryType {
                op,
                kind: other.kind(),
            })
        }
    };

    Ok(vector.with_data(data, complete))
}
