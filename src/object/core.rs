use super::*;

/// Any value an operator may receive.
#[derive(Default, Clone, Debug, PartialEq)]
pub enum Obj {
    #[default]
    Null,
    Vector(Vector),
    List(List),
}

impl Obj {
    pub fn len(&self) -> usize {
        match self {
            Obj::Null => 0,
            Obj::Vector(v) => v.len(),
            Obj::List(l) => l.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Obj::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Obj::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vector> for Obj {
    fn from(value: Vector) -> Self {
        Obj::Vector(value)
    }
}

impl From<List> for Obj {
    fn from(value: List) -> Self {
        Obj::List(value)
    }
}

impl From<Scalar> for Obj {
    fn from(value: Scalar) -> Self {
        Obj::Vector(value.into())
    }
}
