use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("label {0} is already present")]
    Conflict(String),
}

/// A namespaced metadata annotation attached to a component or artifact.
///
/// The value may be any JSON-compatible scalar, mapping, or sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub value: Value,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered label collection with uniqueness-by-name semantics.
///
/// Insertion order is preserved; mutation always returns a new collection,
/// leaving the receiver untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    /// First label with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Label> {
        self.0.iter().find(|label| label.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Return a new collection with `label` applied.
    ///
    /// If a label with the same name exists it is replaced at its current
    /// position, unless `raise_if_present` is set, in which case the call
    /// fails with [`LabelError::Conflict`]. Otherwise the label is appended.
    pub fn set(&self, label: Label, raise_if_present: bool) -> Result<Self, LabelError> {
        let mut labels = self.0.clone();
        match labels.iter().position(|existing| existing.name == label.name) {
            Some(_) if raise_if_present => Err(LabelError::Conflict(label.name)),
            Some(position) => {
                labels[position] = label;
                Ok(Self(labels))
            }
            None => {
                labels.push(label);
                Ok(Self(labels))
            }
        }
    }
}

impl From<Vec<Label>> for Labels {
    fn from(labels: Vec<Label>) -> Self {
        Self(labels)
    }
}

impl FromIterator<Label> for Labels {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Entities carrying a label collection.
///
/// `set_label` follows copy-on-write semantics: the receiver is never
/// mutated, a patched clone is returned instead.
pub trait Labeled: Clone {
    fn labels(&self) -> &Labels;

    fn with_labels(&self, labels: Labels) -> Self;

    fn label(&self, name: &str) -> Option<&Label> {
        self.labels().get(name)
    }

    fn has_label(&self, name: &str) -> bool {
        self.labels().has(name)
    }

    fn set_label(&self, label: Label, raise_if_present: bool) -> Result<Self, LabelError> {
        Ok(self.with_labels(self.labels().set(label, raise_if_present)?))
    }
}
