//! Vectorized binary operator semantics for an R-like array language.
//!
//! Values are atomic vectors (see [`object`]) whose elements may be missing
//! (`NA`). Operators recycle the shorter operand, promote both operands to a
//! common kind, keep track of whether the result may contain `NA`, and carry
//! attributes over to the result. Arithmetic on integer and double
//! progressions is folded into new progressions where that is exact.
//!
//! The entry point is [`Session`]:
//!
//! ```
//! use r_arith::{Obj, Operator, Session, Vector};
//!
//! let mut session = Session::default();
//! let x = Obj::from(Vector::seq_integer(1, 1, 5));
//! let y = Obj::from(Vector::from(vec![10]));
//!
//! let z = session.evaluate_binary(Operator::Add, &x, Some((&y).into())).unwrap();
//! assert_eq!(z, Obj::from(Vector::from(vec![11, 12, 13, 14, 15])));
//! ```

pub mod diagnostics;
pub mod error;
pub mod object;
pub mod ops;
pub mod session;

pub use diagnostics::{CollectSink, Diagnostics, LogSink, Warning};
pub use error::{Error, EvalResult};
pub use object::{ElementKind, List, Obj, OptionNA, Scalar, Vector};
pub use ops::{apply_scalar, combine, combine_all, resolve_types, try_fold, Operand, Operator};
pub use session::{Optimization, Session};

#[cfg(test)]
pub(crate) mod test_utils {
    use tracing_subscriber::EnvFilter;

    /// Route `tracing` output through the test harness, filtered by
    /// `RUST_LOG`.
    pub fn init_test_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
