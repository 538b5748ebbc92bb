//! Vectorized operators over R values

mod attributes;
mod binary;
mod combine;
mod fold;
mod iterators;
mod lattice;
mod operator;
mod scalar;

pub use attributes::{attach_attributes, check_conformable, Side};
pub use binary::Operand;
pub use combine::{combine, combine_all};
pub use fold::try_fold;
pub use iterators::{recycle, Strategy};
pub use lattice::{resolve_types, Resolved};
pub use operator::{Family, Operator};
pub use scalar::apply_scalar;

pub(crate) use binary::evaluate;
pub(crate) use scalar::apply_scalar_with;

/// Optimizations an evaluation may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Options {
    /// Fold progressions into progressions.
    pub fold: bool,
    /// Compute into a temporary operand's buffer.
    pub reuse: bool,
}

impl Options {
    pub fn all() -> Self {
        Options {
            fold: true,
            reuse: true,
        }
    }
}
