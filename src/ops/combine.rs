//! Concatenation
//!
//! Values are joined in argument order after coercing every argument to the
//! highest kind among them. Raw values rank lowest here, unlike for binary
//! operators where they only meet other raw values.

use crate::error::EvalResult;
use crate::internal_err;
use crate::object::reptype::RepType;
use crate::object::{types::*, FromData, List, Obj, OptionNA, Vector, VectorData};

/// Concatenate two values. `NULL` is the identity on either side, and two
/// `NULL`s make an empty double vector.
pub fn combine(left: &Obj, right: &Obj) -> EvalResult<Obj> {
    match (left, right) {
        (Obj::Null, Obj::Null) => Ok(Obj::Vector(Vector::empty(ElementKind::Double))),
        (Obj::Null, x) | (x, Obj::Null) => Ok(x.clone()),
        _ => combine_all(vec![(None, left.clone()), (None, right.clone())]),
    }
}

/// Concatenate any number of optionally named arguments.
///
/// An argument name prefixes the names of the values it contributes:
/// `a = c(x = 1, 2)` yields the names `a.x` and `a2`, and a single unnamed
/// value takes the argument name as is. When any argument is a list the
/// result is a list holding every element of every argument.
pub fn combine_all(args: Vec<(Option<String>, Obj)>) -> EvalResult<Obj> {
    let args: Vec<_> = args
        .into_iter()
        .filter(|(_, value)| !matches!(value, Obj::Null))
        .map(|(name, value)| (name.filter(|n| !n.is_empty()), value))
        .collect();

    if args.iter().any(|(_, value)| matches!(value, Obj::List(_))) {
        return combine_into_list(args).map(Obj::List);
    }

    let vectors = args
        .into_iter()
        .filter_map(|(name, value)| value.into_vector().map(|v| (name, v)))
        .collect();

    concat(vectors).map(Obj::Vector)
}

fn element_name(prefix: Option<&str>, name: Option<String>, i: usize, len: usize) -> Option<String> {
    match (prefix, name) {
        (None, name) => name,
        (Some(p), Some(n)) if !n.is_empty() => Some(format!("{p}.{n}")),
        (Some(p), _) if len == 1 => Some(p.to_string()),
        (Some(p), _) => Some(format!("{p}{}", i + 1)),
    }
}

fn element_names(prefix: Option<&str>, vector: &Vector) -> Vec<Option<String>> {
    let len = vector.len();
    let names: Vec<Option<String>> = match vector.names() {
        Some(names) => names.iter_values().map(OptionNA::as_option).collect(),
        None => vec![None; len],
    };

    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| element_name(prefix, name, i, len))
        .collect()
}

fn combine_into_list(args: Vec<(Option<String>, Obj)>) -> EvalResult<List> {
    let mut list = List::new();
    for (prefix, value) in args {
        match value {
            Obj::Null => (),
            Obj::List(values) => {
                let len = values.len();
                for (i, (name, value)) in values.into_pairs().into_iter().enumerate() {
                    list.push_named(element_name(prefix.as_deref(), name, i, len), value);
                }
            }
            Obj::Vector(vector) => {
                let names = element_names(prefix.as_deref(), &vector);
                for (i, name) in names.into_iter().enumerate() {
                    let value = vector
                        .get(i)
                        .ok_or_else(|| internal_err!("element index out of bounds"))?;
                    list.push_named(name, Obj::from(value));
                }
            }
        }
    }
    Ok(list)
}

fn concat_as<T: FromData>(parts: Vec<VectorData>) -> EvalResult<RepType<T>> {
    let mut values = Vec::with_capacity(parts.iter().map(VectorData::len).sum());
    for part in parts {
        values.extend(part.coerce::<T>()?.iter_values());
    }
    Ok(values.into())
}

/// Join integer progressions that continue one another without
/// materializing them.
fn continue_progression(parts: &[Vector]) -> Option<Vector> {
    let (first, rest) = parts.split_first()?;
    let VectorData::Integer(first) = first.data() else {
        return None;
    };
    let (start, stride, mut len) = first.as_seq()?;
    let (start, stride) = (start.clone().as_option()?, stride.clone().as_option()?);

    for part in rest {
        let next = start as i64 + stride as i64 * len as i64;
        let starts_at_next = |x: &Integer| x.clone().as_option().map(i64::from) == Some(next);
        match part.data() {
            VectorData::Integer(RepType::Seq { start, stride: d, len: n })
                if *d == OptionNA::Some(stride) && starts_at_next(start) =>
            {
                len += n
            }
            VectorData::Integer(x) if x.len() == 1 && starts_at_next(&x.get_atom(0)?) => len += 1,
            _ => return None,
        }
    }

    let joined = Vector::seq_integer(start, stride, len);
    joined.is_complete().then_some(joined)
}

fn concat(args: Vec<(Option<String>, Vector)>) -> EvalResult<Vector> {
    let Some(kind) = args
        .iter()
        .map(|(_, v)| v.kind())
        .max_by_key(|kind| kind.combine_precedence())
    else {
        return Ok(Vector::empty(ElementKind::Double));
    };

    let named = args
        .iter()
        .any(|(prefix, v)| prefix.is_some() || v.is_named());

    let names: Option<Vec<Character>> = named.then(|| {
        args.iter()
            .flat_map(|(prefix, v)| element_names(prefix.as_deref(), v))
            .map(|name| OptionNA::Some(name.unwrap_or_default()))
            .collect()
    });

    let complete = args.iter().all(|(_, v)| v.is_complete());
    let parts: Vec<Vector> = args.into_iter().map(|(_, v)| v).collect();

    if kind == ElementKind::Integer && !named {
        if let Some(joined) = continue_progression(&parts) {
            tracing::debug!(len = joined.len(), "combined progressions");
            return Ok(joined);
        }
    }

    let parts: Vec<VectorData> = parts.into_iter().map(Vector::into_data).collect();
    let data: VectorData = match kind {
        ElementKind::Logical => concat_as::<Logical>(parts)?.into(),
        ElementKind::Integer => concat_as::<Integer>(parts)?.into(),
        ElementKind::Double => concat_as::<Double>(parts)?.into(),
        ElementKind::Complex => concat_as::<Complex>(parts)?.into(),
        ElementKind::Character => concat_as::<Character>(parts)?.into(),
        ElementKind::Raw => concat_as::<Raw>(parts)?.into(),
    };

    let result = Vector::with_completeness(data, complete);
    match names {
        Some(names) => result.set_names(names),
        None => Ok(result),
    }
}
