use crate::object::ElementKind;
use crate::ops::Operator;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(None, std::file!(), std::line!())
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal(Some($x.to_string()), std::file!(), std::line!())
    };
}

pub type EvalResult<T = crate::object::Obj> = Result<T, Error>;

/// Fatal conditions raised while evaluating an operator.
///
/// All of these are detected before any element is computed, so a failed
/// call never leaves a partially filled result behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{reason} ('{left}' {op} '{right}')")]
    Type {
        op: Operator,
        left: ElementKind,
        right: ElementKind,
        reason: &'static str,
    },

    #[error("invalid argument to unary operator '{op}' ('{kind}')")]
    UnaryType { op: Operator, kind: ElementKind },

    #[error("invalid operation on complex numbers ('{0}')")]
    UnimplementedOperation(Operator),

    #[error("non-conformable arrays")]
    NonConformableArrays,

    #[error("operator '{0}' needs two arguments")]
    Arity(Operator),

    #[error("(list) object cannot be coerced to type '{0}'")]
    ListCoercion(ElementKind),

    #[error("dims [product {product}] do not match the length of object [{len}]")]
    InvalidDimensions { product: usize, len: usize },

    #[error("'names' attribute [{names}] must be the same length as the vector [{len}]")]
    InvalidNames { names: usize, len: usize },

    #[error(
        "Internal Error ({1}:{2}){msg}",
        msg = .0.as_ref().map(|msg| format!("\n{msg}")).unwrap_or_default()
    )]
    Internal(Option<String>, &'static str, u32),
}

impl<T> From<Error> for EvalResult<T> {
    fn from(val: Error) -> Self {
        Err(val)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_error_message_names_operands() {
        let err = Error::Type {
            op: Operator::Add,
            left: ElementKind::Character,
            right: ElementKind::Double,
            reason: "non-numeric argument to binary operator",
        };

        assert_eq!(
            err.to_string(),
            "non-numeric argument to binary operator ('character' + 'double')"
        );
    }

    #[test]
    fn internal_error_carries_location() {
        let err: Error = internal_err!("unexpected kind");
        let msg = err.to_string();
        assert!(msg.starts_with("Internal Error (src/error.rs:"));
        assert!(msg.ends_with("\nunexpected kind"));
    }
}
