use std::fmt::Display;

use super::coercion::format_double;
use super::types::*;
use super::{OptionNA, Vector, VectorData};

/// A single element of any kind; semantically a vector of length one.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Logical(Logical),
    Integer(Integer),
    Double(Double),
    Complex(Complex),
    Character(Character),
    Raw(Raw),
}

impl Scalar {
    pub fn kind(&self) -> ElementKind {
        use Scalar::*;
        match self {
            Logical(_) => ElementKind::Logical,
            Integer(_) => ElementKind::Integer,
            Double(_) => ElementKind::Double,
            Complex(_) => ElementKind::Complex,
            Character(_) => ElementKind::Character,
            Raw(_) => ElementKind::Raw,
        }
    }

    pub fn is_na(&self) -> bool {
        use Scalar::*;
        match self {
            Logical(x) => x.is_na(),
            Integer(x) => x.is_na(),
            Double(x) => x.is_na(),
            Complex(x) => x.is_na(),
            Character(x) => x.is_na(),
            Raw(_) => false,
        }
    }

    /// The value as a double, for numeric scalars that are not NA.
    pub fn as_f64(&self) -> Option<f64> {
        use OptionNA::Some;
        match self {
            Scalar::Logical(Some(x)) => Option::Some(*x as i32 as f64),
            Scalar::Integer(Some(x)) => Option::Some(*x as f64),
            Scalar::Double(Some(x)) => Option::Some(*x),
            _ => None,
        }
    }
}

impl From<Scalar> for Vector {
    fn from(value: Scalar) -> Self {
        let data = match value {
            Scalar::Logical(x) => VectorData::Logical(vec![x].into()),
            Scalar::Integer(x) => VectorData::Integer(vec![x].into()),
            Scalar::Double(x) => VectorData::Double(vec![x].into()),
            Scalar::Complex(x) => VectorData::Complex(vec![x].into()),
            Scalar::Character(x) => VectorData::Character(vec![x].into()),
            Scalar::Raw(x) => VectorData::Raw(vec![x].into()),
        };
        Vector::new(data)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Logical(OptionNA::Some(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(Integer::from_r_bits(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Double(Double::from_r_bits(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Character(OptionNA::Some(value.to_string()))
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use OptionNA::*;
        match self {
            Scalar::Logical(Some(x)) => write!(f, "{}", if *x { "TRUE" } else { "FALSE" }),
            Scalar::Integer(Some(x)) => write!(f, "{x}"),
            Scalar::Double(Some(x)) => write!(f, "{}", format_double(*x)),
            Scalar::Complex(Some(x)) => write!(f, "{x}"),
            Scalar::Character(Some(x)) => write!(f, "\"{x}\""),
            Scalar::Raw(x) => write!(f, "{x:02x}"),
            _ => write!(f, "NA"),
        }
    }
}
