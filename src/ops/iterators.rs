use crate::object::reptype::Reader;
use crate::object::Atomic;

/// How the positions of two operands are paired up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    ScalarScalar,
    ScalarVector,
    VectorScalar,
    Equal,
    /// One length is an exact multiple of the other.
    Multiple,
    /// Neither length divides the other; recycled by modulo indexing.
    Modulo,
}

impl Strategy {
    /// Pick the pairing for operands of the given non-zero lengths.
    pub fn select(left: usize, right: usize) -> Strategy {
        debug_assert!(left > 0 && right > 0);
        match (left, right) {
            (1, 1) => Strategy::ScalarScalar,
            (1, _) => Strategy::ScalarVector,
            (_, 1) => Strategy::VectorScalar,
            (l, r) if l == r => Strategy::Equal,
            (l, r) if l.max(r) % l.min(r) == 0 => Strategy::Multiple,
            _ => Strategy::Modulo,
        }
    }

    /// Whether the shorter operand is cycled without dividing the longer.
    pub fn is_mismatched(self) -> bool {
        self == Strategy::Modulo
    }
}

/// Visit every output position in order as `(out, left_index, right_index)`.
pub fn recycle<F>(left: usize, right: usize, mut f: F) -> Strategy
where
    F: FnMut(usize, usize, usize),
{
    let strategy = Strategy::select(left, right);
    match strategy {
        Strategy::ScalarScalar => f(0, 0, 0),
        Strategy::ScalarVector => (0..right).for_each(|j| f(j, 0, j)),
        Strategy::VectorScalar => (0..left).for_each(|i| f(i, i, 0)),
        Strategy::Equal => (0..left).for_each(|i| f(i, i, i)),
        Strategy::Multiple if left > right => {
            for rep in 0..left / right {
                let offset = rep * right;
                (0..right).for_each(|j| f(offset + j, offset + j, j));
            }
        }
        Strategy::Multiple => {
            for rep in 0..right / left {
                let offset = rep * left;
                (0..left).for_each(|i| f(offset + i, i, offset + i));
            }
        }
        Strategy::Modulo => {
            (0..left.max(right)).for_each(|i| f(i, i % left, i % right));
        }
    }
    strategy
}

/// Compute every position into a new buffer.
pub fn map_new<L, R, O, F>(
    left: Reader<'_, L>,
    llen: usize,
    right: Reader<'_, R>,
    rlen: usize,
    mut f: F,
) -> Vec<O>
where
    L: Atomic,
    R: Atomic,
    F: FnMut(&L, &R) -> O,
{
    let mut out = Vec::with_capacity(llen.max(rlen));
    recycle(llen, rlen, |_, i, j| out.push(f(&left.get(i), &right.get(j))));
    out
}

/// Compute every position into the left operand's own buffer, which must
/// already have the output length.
pub fn map_in_place_left<T, F>(buffer: &mut [T], right: Reader<'_, T>, rlen: usize, mut f: F)
where
    T: Atomic,
    F: FnMut(&T, &T) -> T,
{
    let len = buffer.len();
    recycle(len, rlen, |out, _, j| {
        buffer[out] = f(&buffer[out], &right.get(j))
    });
}

/// Compute every position into the right operand's own buffer, which must
/// already have the output length.
pub fn map_in_place_right<T, F>(left: Reader<'_, T>, llen: usize, buffer: &mut [T], mut f: F)
where
    T: Atomic,
    F: FnMut(&T, &T) -> T,
{
    let len = buffer.len();
    recycle(llen, len, |out, i, _| {
        buffer[out] = f(&left.get(i), &buffer[out])
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::reptype::RepType;
    use crate::object::types::Integer;
    use crate::object::OptionNA::*;

    fn pairs(left: usize, right: usize) -> (Strategy, Vec<(usize, usize, usize)>) {
        let mut seen = vec![];
        let strategy = recycle(left, right, |o, i, j| seen.push((o, i, j)));
        (strategy, seen)
    }

    #[test]
    fn strategies_by_length() {
        assert_eq!(Strategy::select(1, 1), Strategy::ScalarScalar);
        assert_eq!(Strategy::select(1, 4), Strategy::ScalarVector);
        assert_eq!(Strategy::select(4, 1), Strategy::VectorScalar);
        assert_eq!(Strategy::select(3, 3), Strategy::Equal);
        assert_eq!(Strategy::select(2, 6), Strategy::Multiple);
        assert_eq!(Strategy::select(3, 2), Strategy::Modulo);
        assert!(Strategy::Modulo.is_mismatched());
    }

    #[test]
    fn every_strategy_matches_modulo_indexing() {
        for (l, r) in [(1, 1), (1, 5), (5, 1), (4, 4), (6, 2), (2, 6), (5, 3), (3, 7)] {
            let (_, seen) = pairs(l, r);
            let expected: Vec<_> = (0..l.max(r)).map(|o| (o, o % l, o % r)).collect();
            assert_eq!(seen, expected, "lengths {l} and {r}");
        }
    }

    #[test]
    fn recycles_shorter_operand() {
        let left = RepType::from(vec![Some(1), Some(2), Some(3)]);
        let right = RepType::from(vec![Some(10), Some(20)]);
        let out = map_new(left.reader(), 3, right.reader(), 2, |x: &Integer, y: &Integer| {
            match (x, y) {
                (Some(x), Some(y)) => Some(x + y),
                _ => NA,
            }
        });
        assert_eq!(out, vec![Some(11), Some(22), Some(13)]);
    }

    #[test]
    fn in_place_over_sequence() {
        let seq = RepType::<Integer>::seq(Some(1), Some(1), 2);
        let mut buffer = vec![Some(10), Some(20), Some(30), Some(40)];
        map_in_place_right(seq.reader(), 2, &mut buffer, |x, y| match (x, y) {
            (Some(x), Some(y)) => Some(x * y),
            _ => NA,
        });
        assert_eq!(buffer, vec![Some(10), Some(40), Some(30), Some(80)]);
    }
}
