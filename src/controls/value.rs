//! Runtime values for controls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// A value supplied for a control at render time.
///
/// Deserializes from plain JSON/TOML scalars: `true`, `42`, `0.5`, `"text"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ControlValue {
    /// Whether a toggle with this value keeps its block.
    ///
    /// Booleans are themselves, numbers are truthy when non-zero (NaN is not),
    /// text is truthy when non-empty. The text `"false"` is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => !value.is_empty(),
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write_number(f, *value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Shortest decimal form: integral values print without a fraction.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value == 0.0 {
        // covers -0.0
        f.write_str("0")
    } else {
        write!(f, "{value}")
    }
}

impl From<bool> for ControlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ControlValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ControlValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ControlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Control name → value mapping used for rendering.
///
/// Keys are control names as written (after trimming). Names that no control
/// declares are ignored by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(BTreeMap<String, ControlValue>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ControlValue>,
    ) -> Option<ControlValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ControlValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ControlValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ControlValue> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Layer `overrides` on top of `self`; keys in `overrides` win.
    #[must_use]
    pub fn layered(mut self, overrides: &ValueMap) -> Self {
        for (name, value) in overrides.iter() {
            self.0.insert(name.clone(), value.clone());
        }
        self
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<ControlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> Extend<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<ControlValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a ControlValue);
    type IntoIter = btree_map::Iter<'a, String, ControlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
