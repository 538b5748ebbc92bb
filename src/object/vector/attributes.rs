use hashbrown::HashMap;

use super::reptype::RepType;
use super::types::Character;
use super::Vector;

/// Vector metadata carried alongside values.
///
/// Dimensions and names have dedicated slots since operators treat them
/// specially; everything else is kept as a regular named attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub dim: Option<Vec<usize>>,
    pub names: Option<RepType<Character>>,
    pub other: HashMap<String, Vector>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.dim.is_none() && self.names.is_none() && self.other.is_empty()
    }

    /// Copy attributes from `from`, overwriting any of the same name.
    pub fn merge_from(&mut self, from: &Attributes) {
        if from.dim.is_some() {
            self.dim.clone_from(&from.dim);
        }
        if from.names.is_some() {
            self.names.clone_from(&from.names);
        }
        for (name, value) in from.other.iter() {
            self.other.insert(name.clone(), value.clone());
        }
    }

    /// Copy only the attributes not already present.
    pub fn merge_missing_from(&mut self, from: &Attributes) {
        if self.dim.is_none() {
            self.dim.clone_from(&from.dim);
        }
        if self.names.is_none() {
            self.names.clone_from(&from.names);
        }
        for (name, value) in from.other.iter() {
            self.other
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
}
