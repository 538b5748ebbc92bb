use std::fmt::Debug;

use super::complex::Cplx;
use super::OptionNA;

/// The element kinds an atomic vector may hold.
///
/// Kinds are ordered for coercion as
/// `Logical < Integer < Double < Complex < Character`. `Raw` sits outside of
/// that chain for operators; it only mixes with itself (and with logicals in
/// logical contexts, which is handled by type resolution).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ElementKind {
    Logical,
    Integer,
    Double,
    Complex,
    Character,
    Raw,
}

impl ElementKind {
    /// Rank of a kind in the coercion order used by operators.
    pub fn precedence(self) -> Option<u8> {
        use ElementKind::*;
        match self {
            Logical => Some(0),
            Integer => Some(1),
            Double => Some(2),
            Complex => Some(3),
            Character => Some(4),
            Raw => None,
        }
    }

    /// The higher of two kinds, used as the common argument kind of an
    /// operator pair. Two raw kinds meet at `Raw`; a raw kind never meets any
    /// other kind.
    pub fn max_precedence(self, other: ElementKind) -> Option<ElementKind> {
        match (self.precedence(), other.precedence()) {
            (Some(l), Some(r)) => Some(if l >= r { self } else { other }),
            (None, None) => Some(ElementKind::Raw),
            _ => None,
        }
    }

    /// Rank used when concatenating, where raw values are the lowest kind.
    pub fn combine_precedence(self) -> u8 {
        self.precedence().map_or(0, |p| p + 1)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ElementKind::Logical | ElementKind::Integer | ElementKind::Double
        )
    }
}

pub type Logical = OptionNA<bool>;
pub type Integer = OptionNA<i32>;
pub type Double = OptionNA<f64>;
pub type Complex = OptionNA<Cplx>;
pub type Character = OptionNA<String>;
pub type Raw = u8;

/// Element types that may be stored in a vector.
pub trait Atomic: Clone + Debug + PartialEq + Default {
    const KIND: ElementKind;

    fn is_na(&self) -> bool;

    /// The `i`-th element of an arithmetic progression. Only [`Progression`]
    /// kinds are meaningful as progressions; every other kind reads its
    /// default value (NA where the kind has one).
    fn seq_nth(_start: &Self, _stride: &Self, _i: usize) -> Self {
        Self::default()
    }
}

/// Marker for element types that may be represented as an arithmetic
/// progression without materializing their values.
pub trait Progression: Atomic {}

impl Atomic for Logical {
    const KIND: ElementKind = ElementKind::Logical;
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl Atomic for Integer {
    const KIND: ElementKind = ElementKind::Integer;
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }

    fn seq_nth(start: &Self, stride: &Self, i: usize) -> Self {
        use OptionNA::*;
        match (start, stride) {
            (Some(s), Some(d)) => {
                let value = *s as i64 + *d as i64 * i as i64;
                match i32::try_from(value) {
                    Ok(x) if x != super::NA_INTEGER => Some(x),
                    _ => NA,
                }
            }
            _ => NA,
        }
    }
}
impl Progression for Integer {}

impl Atomic for Double {
    const KIND: ElementKind = ElementKind::Double;
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }

    fn seq_nth(start: &Self, stride: &Self, i: usize) -> Self {
        use OptionNA::*;
        match (start, stride) {
            (Some(s), Some(d)) => Some(s + d * i as f64),
            _ => NA,
        }
    }
}
impl Progression for Double {}

impl Atomic for Complex {
    const KIND: ElementKind = ElementKind::Complex;
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl Atomic for Character {
    const KIND: ElementKind = ElementKind::Character;
    fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl Atomic for Raw {
    const KIND: ElementKind = ElementKind::Raw;
    fn is_na(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use super::ElementKind::*;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn precedence_picks_higher_kind() {
        assert_eq!(Logical.max_precedence(Integer), Some(Integer));
        assert_eq!(Double.max_precedence(Integer), Some(Double));
        assert_eq!(Complex.max_precedence(Character), Some(Character));
        assert_eq!(Raw.max_precedence(Raw), Some(Raw));
        assert_eq!(Raw.max_precedence(Logical), None);
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!(ElementKind::from_str("double"), Ok(Double));
        assert_eq!(Character.to_string(), "character");
    }

    #[test]
    fn integer_sequence_elements() {
        let (s, d) = (OptionNA::Some(5), OptionNA::Some(-2));
        assert_eq!(super::Integer::seq_nth(&s, &d, 0), OptionNA::Some(5));
        assert_eq!(super::Integer::seq_nth(&s, &d, 3), OptionNA::Some(-1));
    }

    #[test]
    fn non_progression_kinds_read_missing_from_sequences() {
        let (s, d) = (OptionNA::Some("a".to_string()), OptionNA::Some("b".to_string()));
        assert_eq!(super::Character::seq_nth(&s, &d, 1), OptionNA::NA);
        assert_eq!(super::Raw::seq_nth(&1, &2, 1), 0);
    }
}
