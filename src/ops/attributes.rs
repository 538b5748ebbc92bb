use crate::error::{Error, EvalResult};
use crate::object::attributes::Attributes;
use crate::object::Vector;

/// Which operand a result was computed into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Operands that both carry dimensions must agree on them.
pub fn check_conformable(left: &Vector, right: &Vector) -> EvalResult<()> {
    match (left.dim(), right.dim()) {
        (Some(l), Some(r)) if l != r => Err(Error::NonConformableArrays),
        _ => Ok(()),
    }
}

/// Carry operand attributes over to a result.
///
/// With equal lengths attributes of both operands are merged, the left
/// operand winning on conflicts. Otherwise only the longer operand's
/// attributes are kept. A result computed into an operand's buffer already
/// holds that operand's attributes, whose entry here is then ignored.
pub fn attach_attributes(
    mut result: Vector,
    left: Option<&Attributes>,
    llen: usize,
    right: Option<&Attributes>,
    rlen: usize,
    reused: Option<Side>,
) -> Vector {
    if llen == rlen {
        match (reused, left, right) {
            (Some(Side::Left), _, Some(right)) => {
                result.attributes_mut().merge_missing_from(right)
            }
            (Some(Side::Right), Some(left), _) => result.attributes_mut().merge_from(left),
            (None, None, None) | (Some(_), _, _) => (),
            (None, left, right) => {
                let mut attributes = right.cloned().unwrap_or_default();
                if let Some(left) = left {
                    attributes.merge_from(left);
                }
                result = result.set_attributes(Some(attributes));
            }
        }
    } else if reused.is_none() {
        let longer = if llen > rlen { left } else { right };
        if let Some(attributes) = longer {
            result = result.set_attributes(Some(attributes.clone()));
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::reptype::RepType;
    use crate::object::types::Character;
    use pretty_assertions::assert_eq;

    fn named(values: Vec<i32>, names: Vec<&str>) -> Vector {
        Vector::from(values).set_names(names).unwrap()
    }

    #[test]
    fn left_names_win() {
        let l = named(vec![1, 2], vec!["a", "b"]);
        let r = named(vec![3, 4], vec!["c", "d"]);
        let out = attach_attributes(
            Vector::from(vec![4, 6]),
            l.attributes(),
            2,
            r.attributes(),
            2,
            None,
        );
        assert_eq!(out, named(vec![4, 6], vec!["a", "b"]));
    }

    #[test]
    fn dims_from_whichever_operand_has_them() {
        let l = named(vec![1, 2], vec!["a", "b"]);
        let r = Vector::from(vec![3, 4]).set_dim(vec![2, 1]).unwrap();
        let out = attach_attributes(
            Vector::from(vec![4, 6]),
            l.attributes(),
            2,
            r.attributes(),
            2,
            None,
        );
        assert_eq!(out.dim(), Some(&[2, 1][..]));
        assert!(out.is_named());
    }

    #[test]
    fn longer_operand_decides() {
        let l = named(vec![1], vec!["a"]);
        let r = named(vec![1, 2], vec!["x", "y"]);
        let out = attach_attributes(
            Vector::from(vec![2, 3]),
            l.attributes(),
            1,
            r.attributes(),
            2,
            None,
        );
        assert_eq!(out, named(vec![2, 3], vec!["x", "y"]));
    }

    #[test]
    fn reused_operand_keeps_its_own() {
        let reused = named(vec![10, 20], vec!["a", "b"]);
        let r = Vector::from(vec![1, 2]).set_dim(vec![2]).unwrap();
        let out = attach_attributes(reused, None, 2, r.attributes(), 2, Some(Side::Left));
        assert_eq!(out.names(), Some(&RepType::<Character>::from(vec!["a", "b"])));
        assert_eq!(out.dim(), Some(&[2][..]));
    }

    #[test]
    fn mismatched_dims() {
        let l = Vector::from(vec![1, 2, 3, 4]).set_dim(vec![2, 2]).unwrap();
        let r = Vector::from(vec![1, 2, 3, 4]).set_dim(vec![4, 1]).unwrap();
        assert_eq!(check_conformable(&l, &r), Err(Error::NonConformableArrays));
        assert_eq!(check_conformable(&l, &Vector::from(vec![1])), Ok(()));
    }
}
