//=========================================================================
// Persistence Bag
//=========================================================================
//
// The only data that crosses a flip. The outgoing state returns a
// `Persist` from `cleanup()`, the controller hands it unchanged to the
// incoming state's `startup()`.
//
// The core never inspects the contents. Cooperating states agree on a
// schema by sharing `PersistKey` constants:
//
// ```rust
// use aetheric_states::core::state::{Persist, PersistKey};
//
// // Written by the game state, read by the results screen.
// const SCORE: PersistKey<i64> = PersistKey::new("score");
//
// let mut bag = Persist::new();
// bag.put(&SCORE, 5);
// assert_eq!(bag.fetch(&SCORE), Some(5));
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::hash_map::{HashMap, Iter};
use std::marker::PhantomData;

//=== PersistValue ========================================================

/// A value stored in the persistence bag.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PersistValue>),
}

//--- Conversions ---------------------------------------------------------

impl From<bool> for PersistValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PersistValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PersistValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for PersistValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for PersistValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PersistValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<PersistValue>> From<Vec<T>> for PersistValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

//=== PersistType =========================================================

/// Types that can be read back out of a [`PersistValue`].
pub trait PersistType: Into<PersistValue> + Sized {
    fn from_value(value: &PersistValue) -> Option<Self>;
}

impl PersistType for bool {
    fn from_value(value: &PersistValue) -> Option<Self> {
        match value {
            PersistValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl PersistType for i64 {
    fn from_value(value: &PersistValue) -> Option<Self> {
        match value {
            PersistValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl PersistType for f64 {
    fn from_value(value: &PersistValue) -> Option<Self> {
        match value {
            PersistValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl PersistType for String {
    fn from_value(value: &PersistValue) -> Option<Self> {
        match value {
            PersistValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: PersistType> PersistType for Vec<T> {
    fn from_value(value: &PersistValue) -> Option<Self> {
        match value {
            PersistValue::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

//=== PersistKey ==========================================================

/// Typed name for one bag entry, shared by the sending and receiving state.
#[derive(Debug)]
pub struct PersistKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> PersistKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, _type: PhantomData }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

//=== Persist =============================================================

/// Opaque key → value bag carried across a flip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Persist {
    entries: HashMap<String, PersistValue>,
}

impl Persist {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Untyped Access ---------------------------------------------------

    /// Inserts a value, returning the previous one under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PersistValue>,
    ) -> Option<PersistValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PersistValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PersistValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, PersistValue> {
        self.entries.iter()
    }

    //--- Typed Access -----------------------------------------------------

    pub fn put<T: PersistType>(&mut self, key: &PersistKey<T>, value: T) {
        self.entries.insert(key.name.to_owned(), value.into());
    }

    /// Reads an entry. Returns `None` when absent or of a different type.
    pub fn fetch<T: PersistType>(&self, key: &PersistKey<T>) -> Option<T> {
        self.entries.get(key.name).and_then(T::from_value)
    }

    /// Removes and returns an entry if it has the expected type.
    pub fn take<T: PersistType>(&mut self, key: &PersistKey<T>) -> Option<T> {
        let value = self.fetch(key)?;
        self.entries.remove(key.name);
        Some(value)
    }
}

impl<K: Into<String>, V: Into<PersistValue>> FromIterator<(K, V)> for Persist {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Persist {
    type Item = (&'a String, &'a PersistValue);
    type IntoIter = Iter<'a, String, PersistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE: PersistKey<i64> = PersistKey::new("score");
    const PLAYER: PersistKey<String> = PersistKey::new("player");
    const HISTORY: PersistKey<Vec<i64>> = PersistKey::new("history");

    #[test]
    fn typed_keys_read_back_what_was_put() {
        let mut bag = Persist::new();
        bag.put(&SCORE, 5);
        bag.put(&PLAYER, "ada".to_owned());
        bag.put(&HISTORY, vec![3, 1, 4]);

        assert_eq!(bag.fetch(&SCORE), Some(5));
        assert_eq!(bag.fetch(&PLAYER).as_deref(), Some("ada"));
        assert_eq!(bag.fetch(&HISTORY), Some(vec![3, 1, 4]));
        assert_eq!(bag.len(), 3);
    }

    #[test]
    fn fetch_with_mismatched_type_is_none() {
        let mut bag = Persist::new();
        bag.insert("score", "five");

        assert_eq!(bag.fetch(&SCORE), None);
        assert!(bag.contains_key("score"));
    }

    #[test]
    fn take_removes_only_matching_entries() {
        let mut bag = Persist::new();
        bag.put(&SCORE, 9);
        bag.insert("player", 1);

        assert_eq!(bag.take(&SCORE), Some(9));
        assert!(!bag.contains_key("score"));

        assert_eq!(bag.take(&PLAYER), None);
        assert!(bag.contains_key("player"), "Mismatched entry should remain");
    }

    #[test]
    fn bags_compare_by_contents() {
        let built: Persist = [("score", 5)].into_iter().collect();
        let mut manual = Persist::new();
        manual.put(&SCORE, 5);

        assert_eq!(built, manual);
        assert_ne!(built, Persist::new());
    }

    #[test]
    fn heterogeneous_list_does_not_decode_as_ints() {
        let mut bag = Persist::new();
        bag.insert(
            "history",
            PersistValue::List(vec![PersistValue::Int(1), PersistValue::Bool(true)]),
        );
        assert_eq!(bag.fetch(&HISTORY), None);
    }
}
