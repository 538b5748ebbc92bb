use std::borrow::Cow;
use std::fmt::Debug;
use std::rc::Rc;

use super::coercion::CoercibleInto;
use super::types::{Atomic, Progression};

/// Vector storage
///
/// Values are either materialized into a shared buffer or described lazily
/// as an arithmetic progression `start + i * stride`. Both forms expose the
/// same read access; consumers should not assume materialization.
///
/// Only integer and double values are built as progressions, through
/// [`RepType::seq`]. A `Seq` of any other kind reads as missing values.
#[derive(Debug, Clone)]
pub enum RepType<T> {
    Materialized(Rc<Vec<T>>),
    Seq { start: T, stride: T, len: usize },
}

impl<T: Atomic> Default for RepType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Atomic> RepType<T> {
    /// Create an empty vector
    pub fn new() -> Self {
        RepType::Materialized(Rc::new(Vec::new()))
    }

    pub fn len(&self) -> usize {
        match self {
            RepType::Materialized(v) => v.len(),
            RepType::Seq { len, .. } => *len,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, RepType::Seq { .. })
    }

    /// Get a single element from a vector
    ///
    /// Access a single element without materializing a new vector
    ///
    pub fn get_atom(&self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        Some(self.reader().get(index).into_owned())
    }

    pub fn reader(&self) -> Reader<'_, T> {
        match self {
            RepType::Materialized(v) => Reader::Slice(v.as_slice()),
            RepType::Seq { start, stride, .. } => Reader::Seq(start, stride),
        }
    }

    pub fn iter_values(&self) -> impl Iterator<Item = T> + '_ {
        let reader = self.reader();
        (0..self.len()).map(move |i| reader.get(i).into_owned())
    }

    /// Produce a vector backed by a buffer, computing sequence elements.
    pub fn materialize(&self) -> Self {
        match self {
            RepType::Materialized(_) => self.clone(),
            RepType::Seq { .. } => RepType::from(self.iter_values().collect::<Vec<T>>()),
        }
    }

    /// Take the buffer out of a vector if nothing else shares it.
    pub fn try_unique(self) -> Result<Vec<T>, Self> {
        match self {
            RepType::Materialized(v) => Rc::try_unwrap(v).map_err(RepType::Materialized),
            seq => Err(seq),
        }
    }

    pub fn as_mode<Mode>(&self) -> RepType<Mode>
    where
        T: CoercibleInto<Mode>,
        Mode: Atomic,
    {
        RepType::from(
            self.iter_values()
                .map(CoercibleInto::<Mode>::coerce_into)
                .collect::<Vec<Mode>>(),
        )
    }
}

impl<T: Progression> RepType<T> {
    pub fn seq(start: T, stride: T, len: usize) -> Self {
        RepType::Seq { start, stride, len }
    }

    /// Start, stride and length when stored as a progression.
    pub fn as_seq(&self) -> Option<(&T, &T, usize)> {
        match self {
            RepType::Seq { start, stride, len } => Some((start, stride, *len)),
            RepType::Materialized(_) => None,
        }
    }
}

/// Uniform indexed read access over either storage form.
#[derive(Debug)]
pub enum Reader<'a, T> {
    Slice(&'a [T]),
    Seq(&'a T, &'a T),
}

impl<T> Clone for Reader<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Reader<'_, T> {}

impl<'a, T: Atomic> Reader<'a, T> {
    #[inline]
    pub fn get(&self, index: usize) -> Cow<'a, T> {
        match *self {
            Reader::Slice(v) => Cow::Borrowed(&v[index]),
            Reader::Seq(start, stride) => Cow::Owned(T::seq_nth(start, stride, index)),
        }
    }
}

impl<T: Atomic> From<Vec<T>> for RepType<T> {
    fn from(value: Vec<T>) -> Self {
        RepType::Materialized(Rc::new(value))
    }
}

impl<T: Atomic> PartialEq for RepType<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RepType::Materialized(l), RepType::Materialized(r)) if Rc::ptr_eq(l, r) => true,
            (
                RepType::Seq { start: ls, stride: ld, len: ll },
                RepType::Seq { start: rs, stride: rd, len: rl },
            ) if ll == rl && ls == rs && ld == rd => true,
            _ => self.len() == other.len() && self.iter_values().eq(other.iter_values()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::types::*;
    use crate::object::OptionNA::*;

    #[test]
    fn seq_reads_like_materialized() {
        let seq = RepType::<Integer>::seq(Some(1), Some(2), 4);
        let vec = RepType::from(vec![Some(1), Some(3), Some(5), Some(7)]);

        assert_eq!(seq, vec);
        assert_eq!(seq.get_atom(2), Option::Some(Some(5)));
        assert_eq!(seq.get_atom(4), None);
        assert!(!seq.materialize().is_seq());
    }

    #[test]
    fn unique_buffers_can_be_taken() {
        let x = RepType::from(vec![Some(1.0), NA]);
        let shared = x.clone();
        let x = x.try_unique().unwrap_err();
        drop(shared);
        assert_eq!(x.try_unique(), Ok(vec![Some(1.0), NA]));
    }

    #[test]
    fn iter() {
        let xs = RepType::from(vec![Some("a".to_string())]);
        let mut xsi = xs.iter_values();
        assert_eq!(xsi.next(), Option::Some(Some("a".to_string())));
        assert_eq!(xsi.next(), Option::None);
    }
}
