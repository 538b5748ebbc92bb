use crate::object::Obj;

/// An ordered collection of optionally named values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    values: Vec<(Option<String>, Obj)>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_named(&self) -> bool {
        self.values.iter().any(|(name, _)| name.is_some())
    }

    pub fn push(&mut self, value: Obj) {
        self.values.push((None, value))
    }

    pub fn push_named(&mut self, name: Option<String>, value: Obj) {
        self.values.push((name, value))
    }

    pub fn pairs(&self) -> &[(Option<String>, Obj)] {
        &self.values
    }

    pub fn into_pairs(self) -> Vec<(Option<String>, Obj)> {
        self.values
    }
}

impl FromIterator<(Option<String>, Obj)> for List {
    fn from_iter<I: IntoIterator<Item = (Option<String>, Obj)>>(iter: I) -> Self {
        List {
            values: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Obj> for List {
    fn from_iter<I: IntoIterator<Item = Obj>>(iter: I) -> Self {
        iter.into_iter().map(|v| (None, v)).collect()
    }
}
