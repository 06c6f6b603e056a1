use indexmap::IndexMap;

use crate::value::{Key, Value};

/// Array under construction. Starts as a list and switches to a map the
/// first time a key breaks the `0, 1, 2, ...` sequence.
#[derive(Debug)]
pub(crate) enum Building {
    List(Vec<Value>),
    Map(IndexMap<Key, Value>),
}

impl Building {
    pub fn with_capacity(capacity: usize) -> Self {
        Building::List(Vec::with_capacity(capacity))
    }

    /// Adds one entry. Returns `true` if this entry promoted the list.
    pub fn insert(&mut self, key: Key, value: Value) -> bool {
        match self {
            Building::List(items) => {
                if key == Key::Int(items.len() as i64) {
                    items.push(value);
                    return false;
                }
                let mut map = IndexMap::with_capacity(items.len() + 1);
                for (idx, item) in std::mem::take(items).into_iter().enumerate() {
                    map.insert(Key::Int(idx as i64), item);
                }
                map.insert(key, value);
                *self = Building::Map(map);
                true
            }
            Building::Map(map) => {
                map.insert(key, value);
                false
            }
        }
    }

    pub fn finish(self) -> Value {
        match self {
            Building::List(items) => Value::from(items),
            Building::Map(map) => Value::from(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[rstest]
    fn sequential_keys_stay_a_list() {
        let mut building = Building::with_capacity(2);
        assert!(!building.insert(Key::Int(0), s("a")));
        assert!(!building.insert(Key::Int(1), s("b")));
        assert_eq!(building.finish(), Value::from(vec![s("a"), s("b")]));
    }

    #[rstest]
    fn gap_promotes_and_rekeys_existing_items() {
        let mut building = Building::with_capacity(3);
        building.insert(Key::Int(0), s("a"));
        building.insert(Key::Int(1), s("b"));
        assert!(building.insert(Key::Int(5), s("c")));
        assert!(matches!(building, Building::Map(_)));
        // Sequential again, but promotion is one-way.
        building.insert(Key::Int(3), s("d"));

        let mut expected = IndexMap::new();
        expected.insert(Key::Int(0), s("a"));
        expected.insert(Key::Int(1), s("b"));
        expected.insert(Key::Int(5), s("c"));
        expected.insert(Key::Int(3), s("d"));
        assert_eq!(building.finish(), Value::from(expected));
    }

    #[rstest]
    fn numeric_string_key_promotes_instead_of_counting_as_index() {
        let mut building = Building::with_capacity(1);
        assert!(building.insert(Key::from("0"), s("a")));
        assert!(matches!(building, Building::Map(_)));
    }

    #[rstest]
    fn duplicate_map_keys_keep_last_value_in_first_position() {
        let mut building = Building::with_capacity(3);
        building.insert(Key::from("x"), Value::Int(1));
        building.insert(Key::from("y"), Value::Int(2));
        building.insert(Key::from("x"), Value::Int(3));
        let value = building.finish();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&Key::from("x"), &Value::Int(3))));
    }
}
