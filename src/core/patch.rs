//! # Field Patches
//!
//! A shallow merge needs to tell three things apart for every optional field:
//!
//! ```text
//! Keep     →  field untouched
//! Clear    →  field set to None
//! Set(v)   →  field set to Some(v)
//! ```
//!
//! On the wire (action logs) this maps onto JSON as: key absent → `Keep`,
//! `null` → `Clear`, any value → `Set`. Patch fields are declared with
//! `#[serde(default, skip_serializing_if = "Patch::is_keep")]` to get that.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

// Manual impl: derive(Default) would demand `T: Default`.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Writes the patch into `slot`.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }

    /// `None` means "not provided": keeps the field as-is.
    /// Use `Patch::from` when `None` must clear instead.
    pub fn keep_or_set(value: Option<T>) -> Self {
        value.map_or(Patch::Keep, Patch::Set)
    }
}

/// `None` clears, `Some` sets. An explicit "no value" is still a write.
impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Clear, Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => serializer.serialize_some(value),
            // Keep is skipped at the field level, so only Clear lands here in practice.
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, skip_serializing_if = "Patch::is_keep")]
        value: Patch<u32>,
    }

    #[test]
    fn test_apply_keep_leaves_slot() {
        let mut slot = Some(3);
        Patch::Keep.apply_to(&mut slot);
        assert_eq!(slot, Some(3));
    }

    #[test]
    fn test_apply_clear_empties_slot() {
        let mut slot = Some(3);
        Patch::Clear.apply_to(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn test_apply_set_overwrites_slot() {
        let mut slot = Some(3);
        Patch::Set(9).apply_to(&mut slot);
        assert_eq!(slot, Some(9));
    }

    #[test]
    fn test_from_none_is_clear_but_keep_or_set_is_keep() {
        assert_eq!(Patch::<u32>::from(None), Patch::Clear);
        assert_eq!(Patch::<u32>::keep_or_set(None), Patch::Keep);
        assert_eq!(Patch::keep_or_set(Some(1)), Patch::Set(1));
    }

    #[test]
    fn test_json_absent_null_and_value() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.value, Patch::Keep);

        let null: Probe = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(null.value, Patch::Clear);

        let set: Probe = serde_json::from_str(r#"{"value":5}"#).unwrap();
        assert_eq!(set.value, Patch::Set(5));
    }

    #[test]
    fn test_json_keep_is_skipped_on_write() {
        assert_eq!(serde_json::to_string(&Probe::default()).unwrap(), "{}");
        let cleared = Probe { value: Patch::Clear };
        assert_eq!(serde_json::to_string(&cleared).unwrap(), r#"{"value":null}"#);
    }
}
