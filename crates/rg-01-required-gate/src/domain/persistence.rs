//! # Declaration Persistence Codec
//!
//! The declaration table is stored as flat key/value properties:
//!
//! ```text
//! <list_key>                   = name1,name2
//! <dimension_prefix[0]>.name1  = Incoming,Outgoing
//! <dimension_prefix[1]>.name1  = Message
//! <dimension_prefix[0]>.name2  = All
//! ```
//!
//! A missing dimension key means the dimension is empty. Writes bring the
//! store exactly in line with the table: keys owned by the layout that the
//! table no longer produces are removed.

use super::guard::GuardSpec;
use shared_types::CATEGORY_DELIMITER;
use std::collections::BTreeMap;

/// Property keys used by one gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLayout {
    /// Key holding the comma-joined declared names.
    pub list_key: &'static str,
    /// Per-dimension key prefixes. The declared name is appended after a dot.
    pub dimension_prefixes: &'static [&'static str],
}

impl PropertyLayout {
    /// Key holding one dimension of one declaration.
    pub fn dimension_key(&self, dimension: usize, name: &str) -> String {
        format!("{}.{}", self.dimension_prefixes[dimension], name)
    }

    /// `true` if `key` belongs to this layout.
    pub fn owns(&self, key: &str) -> bool {
        key == self.list_key
            || self.dimension_prefixes.iter().any(|prefix| {
                key.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
            })
    }
}

/// One write against the property store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyOperation {
    Set { key: String, value: String },
    Remove { key: String },
}

/// Render the declaration table as the exact set of properties it owns.
pub fn encode_table<G: GuardSpec>(
    layout: &PropertyLayout,
    declarations: &BTreeMap<String, G>,
) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    if declarations.is_empty() {
        return properties;
    }

    let names: Vec<&str> = declarations.keys().map(String::as_str).collect();
    properties.insert(
        layout.list_key.to_string(),
        names.join(&CATEGORY_DELIMITER.to_string()),
    );

    for (name, guard) in declarations {
        let mut guard = guard.clone();
        guard.collapse_wildcards();
        for dimension in 0..G::DIMENSIONS {
            let value = guard.encode_dimension(dimension);
            if !value.is_empty() {
                properties.insert(layout.dimension_key(dimension, name), value);
            }
        }
    }
    properties
}

/// Rebuild the declaration table from stored properties.
///
/// Names are trimmed and empty names skipped. Tokens are parsed leniently
/// (see [`shared_types::CategorySet::from_property`]).
pub fn decode_table<G: GuardSpec>(
    layout: &PropertyLayout,
    properties: &BTreeMap<String, String>,
) -> BTreeMap<String, G> {
    let mut declarations = BTreeMap::new();
    let Some(list) = properties.get(layout.list_key) else {
        return declarations;
    };

    for name in list.split(CATEGORY_DELIMITER).map(str::trim) {
        if name.is_empty() {
            continue;
        }
        let mut guard = G::default();
        for dimension in 0..G::DIMENSIONS {
            if let Some(raw) = properties.get(&layout.dimension_key(dimension, name)) {
                guard.decode_dimension(dimension, raw);
            }
        }
        guard.collapse_wildcards();
        declarations.insert(name.to_string(), guard);
    }
    declarations
}

/// Operations that turn `current` into the encoded form of `declarations`.
///
/// Only keys owned by `layout` are touched.
pub fn plan_writes<G: GuardSpec>(
    layout: &PropertyLayout,
    declarations: &BTreeMap<String, G>,
    current: &BTreeMap<String, String>,
) -> Vec<PropertyOperation> {
    let desired = encode_table(layout, declarations);
    let mut operations = Vec::new();

    for key in current.keys() {
        if layout.owns(key) && !desired.contains_key(key) {
            operations.push(PropertyOperation::Remove { key: key.clone() });
        }
    }
    for (key, value) in desired {
        if current.get(&key) != Some(&value) {
            operations.push(PropertyOperation::Set { key, value });
        }
    }
    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CategorySet, RoomEventCategory};

    type Guard = CategorySet<RoomEventCategory>;

    const LAYOUT: PropertyLayout = PropertyLayout {
        list_key: "muc.listeners.required",
        dimension_prefixes: &["muc.listener.blocking.event"],
    };

    fn props(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_table() {
        let mut table = BTreeMap::new();
        table.insert(
            "archiver".to_string(),
            Guard::from([RoomEventCategory::BeforeLeft, RoomEventCategory::BeforeJoined]),
        );
        table.insert("audit".to_string(), Guard::new());

        let encoded = encode_table(&LAYOUT, &table);
        assert_eq!(
            encoded,
            props(&[
                ("muc.listeners.required", "archiver,audit"),
                ("muc.listener.blocking.event.archiver", "BeforeJoined,BeforeLeft"),
            ])
        );
    }

    #[test]
    fn test_encode_empty_table_has_no_list_key() {
        let table = BTreeMap::<String, Guard>::new();
        assert!(encode_table(&LAYOUT, &table).is_empty());
    }

    #[test]
    fn test_decode_table_lenient() {
        let stored = props(&[
            ("muc.listeners.required", " archiver, ,filter,"),
            ("muc.listener.blocking.event.archiver", "BeforeJoined, Bogus"),
            ("muc.listener.blocking.event.filter", "BeforeCreated,All"),
        ]);

        let table: BTreeMap<String, Guard> = decode_table(&LAYOUT, &stored);
        assert_eq!(table.len(), 2);
        assert_eq!(table["archiver"], Guard::from([RoomEventCategory::BeforeJoined]));
        assert!(table["filter"].is_wildcard());
    }

    #[test]
    fn test_decode_missing_dimension_key_is_empty() {
        let stored = props(&[("muc.listeners.required", "quiet")]);
        let table: BTreeMap<String, Guard> = decode_table(&LAYOUT, &stored);
        assert!(table["quiet"].is_empty());
    }

    #[test]
    fn test_plan_writes_removes_stale_keys() {
        let current = props(&[
            ("muc.listeners.required", "archiver,gone"),
            ("muc.listener.blocking.event.archiver", "BeforeJoined"),
            ("muc.listener.blocking.event.gone", "All"),
            ("unrelated.key", "untouched"),
        ]);
        let mut table = BTreeMap::new();
        table.insert("archiver".to_string(), Guard::from([RoomEventCategory::BeforeJoined]));

        let ops = plan_writes(&LAYOUT, &table, &current);
        assert_eq!(
            ops,
            vec![
                PropertyOperation::Remove {
                    key: "muc.listener.blocking.event.gone".to_string()
                },
                PropertyOperation::Set {
                    key: "muc.listeners.required".to_string(),
                    value: "archiver".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_plan_writes_empty_table_clears_layout() {
        let current = props(&[
            ("muc.listeners.required", "archiver"),
            ("muc.listener.blocking.event.archiver", "All"),
        ]);
        let ops = plan_writes(&LAYOUT, &BTreeMap::<String, Guard>::new(), &current);
        assert_eq!(ops.len(), 2);
        assert!(ops
            .iter()
            .all(|op| matches!(op, PropertyOperation::Remove { .. })));
    }

    #[test]
    fn test_plan_writes_is_idempotent() {
        let mut table = BTreeMap::new();
        table.insert("archiver".to_string(), Guard::wildcard());
        let stored = encode_table(&LAYOUT, &table);
        assert!(plan_writes(&LAYOUT, &table, &stored).is_empty());
    }

    #[test]
    fn test_layout_owns() {
        assert!(LAYOUT.owns("muc.listeners.required"));
        assert!(LAYOUT.owns("muc.listener.blocking.event.x"));
        assert!(!LAYOUT.owns("muc.listener.blocking.event."));
        assert!(!LAYOUT.owns("muc.listener.blocking.eventful"));
    }
}
