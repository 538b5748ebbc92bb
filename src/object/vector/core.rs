use std::fmt::Debug;
use std::fmt::Display;

use crate::error::{Error, EvalResult};
use crate::internal_err;

use super::attributes::Attributes;
use super::coercion::{format_double, CoercibleInto};
use super::complex::Cplx;
use super::reptype::RepType;
use super::types::*;
use crate::object::Scalar;

#[derive(Default, Clone, PartialEq)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> PartialOrd for OptionNA<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (OptionNA::Some(l), OptionNA::Some(r)) => l.partial_cmp(r),
            _ => None,
        }
    }
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn as_ref(&self) -> OptionNA<&T> {
        match self {
            OptionNA::Some(x) => OptionNA::Some(x),
            OptionNA::NA => OptionNA::NA,
        }
    }
}

impl<T> From<Option<T>> for OptionNA<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Option::Some(x) => OptionNA::Some(x),
            Option::None => OptionNA::NA,
        }
    }
}

pub trait DefaultDebug {}
impl DefaultDebug for bool {}
impl DefaultDebug for i32 {}
impl DefaultDebug for f64 {}
impl DefaultDebug for Cplx {}

impl<T> Debug for OptionNA<T>
where
    T: DefaultDebug + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl Debug for OptionNA<String> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "\"{}\"", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl Display for OptionNA<f64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", format_double(*x)),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

/// Typed vector values, one storage per element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData {
    Logical(RepType<Logical>),
    Integer(RepType<Integer>),
    Double(RepType<Double>),
    Complex(RepType<Complex>),
    Character(RepType<Character>),
    Raw(RepType<Raw>),
}

macro_rules! each_kind {
    ($data:expr, $x:ident => $body:expr) => {
        match $data {
            VectorData::Logical($x) => $body,
            VectorData::Integer($x) => $body,
            VectorData::Double($x) => $body,
            VectorData::Complex($x) => $body,
            VectorData::Character($x) => $body,
            VectorData::Raw($x) => $body,
        }
    };
}

impl VectorData {
    pub fn empty(kind: ElementKind) -> Self {
        use ElementKind::*;
        match kind {
            Logical => VectorData::Logical(RepType::new()),
            Integer => VectorData::Integer(RepType::new()),
            Double => VectorData::Double(RepType::new()),
            Complex => VectorData::Complex(RepType::new()),
            Character => VectorData::Character(RepType::new()),
            Raw => VectorData::Raw(RepType::new()),
        }
    }

    pub fn kind(&self) -> ElementKind {
        use VectorData::*;
        match self {
            Logical(_) => ElementKind::Logical,
            Integer(_) => ElementKind::Integer,
            Double(_) => ElementKind::Double,
            Complex(_) => ElementKind::Complex,
            Character(_) => ElementKind::Character,
            Raw(_) => ElementKind::Raw,
        }
    }

    pub fn len(&self) -> usize {
        each_kind!(self, x => x.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_seq(&self) -> bool {
        each_kind!(self, x => x.is_seq())
    }

    pub fn materialize(&self) -> Self {
        use VectorData::*;
        match self {
            Logical(x) => Logical(x.materialize()),
            Integer(x) => Integer(x.materialize()),
            Double(x) => Double(x.materialize()),
            Complex(x) => Complex(x.materialize()),
            Character(x) => Character(x.materialize()),
            Raw(x) => Raw(x.materialize()),
        }
    }

    /// Scan the values for any NA element.
    pub fn any_na(&self) -> bool {
        use VectorData::*;
        match self {
            Logical(x) => x.iter_values().any(|v| v.is_na()),
            // progressions are monotone, so only their ends can leave the range
            Integer(x @ RepType::Seq { len, .. }) => {
                let ends = [x.get_atom(0), x.get_atom(len.saturating_sub(1))];
                ends.iter().flatten().any(|v| v.is_na())
            }
            Double(RepType::Seq { .. }) => false,
            Integer(x) => x.iter_values().any(|v| v.is_na()),
            Double(x) => x.iter_values().any(|v| v.is_na()),
            Complex(x) => x.iter_values().any(|v| v.is_na()),
            Character(x) => x.iter_values().any(|v| v.is_na()),
            Raw(_) => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        use VectorData::*;
        match self {
            Logical(x) => x.get_atom(index).map(Scalar::Logical),
            Integer(x) => x.get_atom(index).map(Scalar::Integer),
            Double(x) => x.get_atom(index).map(Scalar::Double),
            Complex(x) => x.get_atom(index).map(Scalar::Complex),
            Character(x) => x.get_atom(index).map(Scalar::Character),
            Raw(x) => x.get_atom(index).map(Scalar::Raw),
        }
    }

    /// Convert into storage of the given kind.
    ///
    /// Values are moved when the kind already matches, and only conversions
    /// up the coercion order are supported.
    pub fn coerce<T: FromData>(self) -> EvalResult<RepType<T>> {
        T::from_data(self)
    }

    /// Convert into logical storage, the argument kind of logical operators.
    pub fn into_logical(self) -> EvalResult<RepType<Logical>> {
        use VectorData::*;
        match self {
            Logical(x) => Ok(x),
            Integer(x) => Ok(x.as_mode()),
            Double(x) => Ok(x.as_mode()),
            Complex(x) => Ok(x.as_mode()),
            Raw(x) => Ok(x.as_mode()),
            Character(_) => Err(internal_err!("character values have no logical form")),
        }
    }
}

/// Element types that can be produced from any lower-precedence storage.
pub trait FromData: Atomic {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>>;
}

fn cannot_coerce(from: ElementKind, to: ElementKind) -> Error {
    internal_err!(format!("cannot coerce {from} storage into {to}"))
}

impl FromData for Logical {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        match data {
            VectorData::Logical(x) => Ok(x),
            VectorData::Raw(x) => Ok(x.as_mode()),
            other => Err(cannot_coerce(other.kind(), Self::KIND)),
        }
    }
}

impl FromData for Integer {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        use VectorData::*;
        match data {
            Integer(x) => Ok(x),
            Logical(x) => Ok(x.as_mode()),
            Raw(x) => Ok(x.as_mode()),
            other => Err(cannot_coerce(other.kind(), Self::KIND)),
        }
    }
}

impl FromData for Double {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        use VectorData::*;
        match data {
            Double(x) => Ok(x),
            // keep progressions lazy across the integer to double promotion
            Integer(RepType::Seq { start, stride, len }) => Ok(RepType::seq(
                start.coerce_into(),
                stride.coerce_into(),
                len,
            )),
            Integer(x) => Ok(x.as_mode()),
            Logical(x) => Ok(x.as_mode()),
            Raw(x) => Ok(x.as_mode()),
            other => Err(cannot_coerce(other.kind(), Self::KIND)),
        }
    }
}

impl FromData for Complex {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        use VectorData::*;
        match data {
            Complex(x) => Ok(x),
            Double(x) => Ok(x.as_mode()),
            Integer(x) => Ok(x.as_mode()),
            Logical(x) => Ok(x.as_mode()),
            Raw(x) => Ok(x.as_mode()),
            other => Err(cannot_coerce(other.kind(), Self::KIND)),
        }
    }
}

impl FromData for Character {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        use VectorData::*;
        match data {
            Character(x) => Ok(x),
            Complex(x) => Ok(x.as_mode()),
            Double(x) => Ok(x.as_mode()),
            Integer(x) => Ok(x.as_mode()),
            Logical(x) => Ok(x.as_mode()),
            Raw(x) => Ok(x.as_mode()),
        }
    }
}

impl FromData for Raw {
    fn from_data(data: VectorData) -> EvalResult<RepType<Self>> {
        match data {
            VectorData::Raw(x) => Ok(x),
            other => Err(cannot_coerce(other.kind(), Self::KIND)),
        }
    }
}

macro_rules! data_from_rep {
    ($($variant:ident),*) => {
        $(
            impl From<RepType<$variant>> for VectorData {
                fn from(x: RepType<$variant>) -> Self {
                    VectorData::$variant(x)
                }
            }
        )*
    };
}

data_from_rep!(Logical, Integer, Double, Complex, Character, Raw);

/// An atomic vector
///
/// Couples typed values with a cached completeness flag (no element is NA)
/// and optional attributes such as dimensions and names.
#[derive(Debug, Clone)]
pub struct Vector {
    data: VectorData,
    complete: bool,
    attributes: Option<Box<Attributes>>,
}

impl Vector {
    /// Build a vector, scanning its values to establish completeness.
    pub fn new(data: VectorData) -> Self {
        let complete = !data.any_na();
        Vector {
            data,
            complete,
            attributes: None,
        }
    }

    /// Build a vector whose completeness is already known.
    pub(crate) fn with_completeness(data: VectorData, complete: bool) -> Self {
        debug_assert!(!complete || !data.any_na());
        Vector {
            data,
            complete,
            attributes: None,
        }
    }

    pub fn empty(kind: ElementKind) -> Self {
        Vector::with_completeness(VectorData::empty(kind), true)
    }

    /// An integer progression. Elements past the integer range read as NA.
    pub fn seq_integer(start: i32, stride: i32, len: usize) -> Self {
        let data = RepType::seq(Integer::from_r_bits(start), OptionNA::Some(stride), len);
        Vector::new(VectorData::Integer(data))
    }

    pub fn seq_double(start: f64, stride: f64, len: usize) -> Self {
        let data = RepType::seq(OptionNA::Some(start), OptionNA::Some(stride), len);
        Vector::with_completeness(VectorData::Double(data), true)
    }

    pub fn data(&self) -> &VectorData {
        &self.data
    }

    pub fn into_data(self) -> VectorData {
        self.data
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_seq(&self) -> bool {
        self.data.is_seq()
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.data.get(index)
    }

    pub fn materialize(self) -> Self {
        Vector {
            data: self.data.materialize(),
            ..self
        }
    }

    /// Move the values out, leaving an empty vector of the same kind.
    pub(crate) fn take_data(&mut self) -> VectorData {
        let empty = VectorData::empty(self.kind());
        std::mem::replace(&mut self.data, empty)
    }

    /// Replace the values, keeping attributes.
    pub(crate) fn with_data(self, data: VectorData, complete: bool) -> Self {
        debug_assert!(!complete || !data.any_na());
        Vector {
            data,
            complete,
            ..self
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_deref()
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        self.attributes.get_or_insert_with(Default::default)
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.attributes()?.dim.as_deref()
    }

    pub fn names(&self) -> Option<&RepType<Character>> {
        self.attributes()?.names.as_ref()
    }

    pub fn is_named(&self) -> bool {
        self.names().is_some()
    }

    pub fn set_dim(mut self, dim: Vec<usize>) -> EvalResult<Self> {
        let product = dim.iter().product();
        if product != self.len() {
            return Err(Error::InvalidDimensions {
                product,
                len: self.len(),
            });
        }
        self.attributes_mut().dim = Some(dim);
        Ok(self)
    }

    pub fn set_names(mut self, names: impl Into<RepType<Character>>) -> EvalResult<Self> {
        let names = names.into();
        if names.len() != self.len() {
            return Err(Error::InvalidNames {
                names: names.len(),
                len: self.len(),
            });
        }
        self.attributes_mut().names = Some(names);
        Ok(self)
    }

    pub fn set_attribute(mut self, name: impl Into<String>, value: Vector) -> Self {
        self.attributes_mut().other.insert(name.into(), value);
        self
    }

    pub(crate) fn set_attributes(mut self, attributes: Option<Attributes>) -> Self {
        self.attributes = attributes.filter(|a| !a.is_empty()).map(Box::new);
        self
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        let no_attrs = Attributes::default();
        self.data == other.data
            && self.attributes().unwrap_or(&no_attrs) == other.attributes().unwrap_or(&no_attrs)
    }
}

impl From<VectorData> for Vector {
    fn from(data: VectorData) -> Self {
        Vector::new(data)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(x: Vec<f64>) -> Self {
        Vector::from(x.into_iter().map(Double::from_r_bits).collect::<Vec<_>>())
    }
}

impl From<Vec<Double>> for Vector {
    fn from(x: Vec<Double>) -> Self {
        Vector::new(VectorData::Double(x.into()))
    }
}

impl From<Vec<i32>> for Vector {
    fn from(x: Vec<i32>) -> Self {
        Vector::from(x.into_iter().map(Integer::from_r_bits).collect::<Vec<_>>())
    }
}

impl From<Vec<Integer>> for Vector {
    fn from(x: Vec<Integer>) -> Self {
        Vector::new(VectorData::Integer(x.into()))
    }
}

impl From<Vec<bool>> for Vector {
    fn from(x: Vec<bool>) -> Self {
        Vector::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>())
    }
}

impl From<Vec<Logical>> for Vector {
    fn from(x: Vec<Logical>) -> Self {
        Vector::new(VectorData::Logical(x.into()))
    }
}

impl From<Vec<Cplx>> for Vector {
    fn from(x: Vec<Cplx>) -> Self {
        Vector::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>())
    }
}

impl From<Vec<Complex>> for Vector {
    fn from(x: Vec<Complex>) -> Self {
        Vector::new(VectorData::Complex(x.into()))
    }
}

impl From<Vec<String>> for Vector {
    fn from(x: Vec<String>) -> Self {
        Vector::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>())
    }
}

impl From<Vec<&str>> for Vector {
    fn from(x: Vec<&str>) -> Self {
        Vector::from(x.into_iter().map(String::from).collect::<Vec<_>>())
    }
}

impl From<Vec<Character>> for Vector {
    fn from(x: Vec<Character>) -> Self {
        Vector::new(VectorData::Character(x.into()))
    }
}

impl From<Vec<Raw>> for Vector {
    fn from(x: Vec<Raw>) -> Self {
        Vector::with_completeness(VectorData::Raw(x.into()), true)
    }
}

impl From<Vec<&str>> for RepType<Character> {
    fn from(x: Vec<&str>) -> Self {
        RepType::from(
            x.into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::OptionNA::*;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn completeness_is_scanned() {
        assert!(Vector::from(vec![1, 2, 3]).is_complete());
        assert!(!Vector::from(vec![Some(1), NA]).is_complete());
        assert!(Vector::seq_integer(1, 1, 10).is_complete());
    }

    #[test]
    fn sentinel_values_become_na() {
        let x = Vector::from(vec![1, i32::MIN]);
        assert!(!x.is_complete());
        assert_eq!(x.get(1), Option::Some(Scalar::Integer(NA)));
    }

    #[test]
    fn seq_past_integer_range_is_incomplete() {
        let x = Vector::seq_integer(i32::MAX - 1, 1, 3);
        assert!(!x.is_complete());
        assert_eq!(x.get(2), Option::Some(Scalar::Integer(NA)));
    }

    #[test]
    fn dims_must_match_length() {
        let x = Vector::from(vec![1, 2, 3, 4]);
        assert!(x.clone().set_dim(vec![2, 2]).is_ok());
        assert_eq!(
            x.set_dim(vec![3, 2]),
            Err(Error::InvalidDimensions { product: 6, len: 4 })
        );
    }

    #[test]
    fn seq_equals_materialized() {
        let seq = Vector::seq_integer(1, 1, 3);
        assert_eq!(seq.clone().materialize(), Vector::from(vec![1, 2, 3]));
        assert!(seq.is_seq());
    }

    #[test]
    fn integer_seq_promotes_lazily() {
        let x = Vector::seq_integer(2, 3, 4).into_data();
        let y: RepType<Double> = x.coerce().unwrap();
        assert!(y.is_seq());
        assert_eq!(y, RepType::from(vec![Some(2.0), Some(5.0), Some(8.0), Some(11.0)]));
    }
}
