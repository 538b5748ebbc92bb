use crate::error::{Error, EvalResult};
use crate::object::ElementKind;

use super::{Family, Operator};

/// Kinds an operator computes in and produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolved {
    pub argument: ElementKind,
    pub result: ElementKind,
}

impl Resolved {
    fn new(argument: ElementKind, result: ElementKind) -> Self {
        Resolved { argument, result }
    }
}

/// Pick the argument and result kinds of `left op right`.
///
/// This is a pure function of its inputs, and for commutative operators the
/// result kind does not depend on operand order.
pub fn resolve_types(op: Operator, left: ElementKind, right: ElementKind) -> EvalResult<Resolved> {
    use ElementKind::*;

    let type_error = |reason: &'static str| Error::Type {
        op,
        left,
        right,
        reason,
    };

    let resolved = match op.family() {
        Family::Arithmetic => {
            let argument = match left.max_precedence(right) {
                Some(Character | Raw) | None => {
                    return Err(type_error("non-numeric argument to binary operator"))
                }
                Some(Logical) => Integer,
                Some(kind) => kind,
            };

            if argument == Complex && matches!(op, Operator::Mod | Operator::IntegerDiv) {
                return Err(Error::UnimplementedOperation(op));
            }

            if argument == Integer && !op.supports_integer_result() {
                Resolved::new(Integer, Double)
            } else {
                Resolved::new(argument, argument)
            }
        }

        Family::Comparison => match left.max_precedence(right) {
            None => {
                return Err(type_error(
                    "comparison of raw values is only allowed with other raw values",
                ))
            }
            Some(Complex) if op.is_ordering() => {
                return Err(type_error("invalid comparison with complex values"))
            }
            Some(argument) => Resolved::new(argument, Logical),
        },

        Family::Logical => match (left, right) {
            (Raw, Raw) => Resolved::new(Raw, Raw),
            (Raw, Logical) | (Logical, Raw) => Resolved::new(Logical, Logical),
            (Character, _) | (_, Character) | (Raw, _) | (_, Raw) => {
                return Err(type_error(
                    "operations are possible only for numeric, logical or complex types",
                ))
            }
            _ => Resolved::new(Logical, Logical),
        },
    };

    tracing::trace!(%op, %left, %right, argument = %resolved.argument, result = %resolved.result, "resolved operand kinds");
    Ok(resolved)
}
