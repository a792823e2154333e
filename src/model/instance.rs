use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::PLACEHOLDER;

/// Shown when an instance id has no entry in the table.
pub const UNKNOWN_INSTANCE: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRef {
    pub guid: String,
    #[serde(rename = "type")]
    pub ifc_type: String,
}

/// Read-only lookup of `instance_id` to its display pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceTable {
    entries: HashMap<String, InstanceRef>,
}

impl InstanceTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a normalized instance id to `(guid, type)`.
    pub fn resolve<'a>(&'a self, instance_id: &str) -> (&'a str, &'a str) {
        if instance_id.is_empty() || instance_id == PLACEHOLDER {
            return (PLACEHOLDER, PLACEHOLDER);
        }
        match self.entries.get(instance_id) {
            Some(inst) => (inst.guid.as_str(), inst.ifc_type.as_str()),
            None => (UNKNOWN_INSTANCE, UNKNOWN_INSTANCE),
        }
    }
}

impl FromIterator<(String, InstanceRef)> for InstanceTable {
    fn from_iter<I: IntoIterator<Item = (String, InstanceRef)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> InstanceTable {
        [(
            "5".to_string(),
            InstanceRef {
                guid: "#105".to_string(),
                ifc_type: "IfcWall".to_string(),
            },
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_known_instance() {
        assert_eq!(table().resolve("5"), ("#105", "IfcWall"));
    }

    #[test]
    fn test_resolve_unknown_instance() {
        assert_eq!(table().resolve("6"), ("?", "?"));
    }

    #[test]
    fn test_resolve_absent_instance() {
        assert_eq!(table().resolve("-"), ("-", "-"));
        assert_eq!(table().resolve(""), ("-", "-"));
    }

    #[test]
    fn test_deserialize_table() {
        let json = r##"{"1": {"guid": "#12", "type": "IfcSlab"}}"##;
        let table: InstanceTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("1"), ("#12", "IfcSlab"));
    }

    #[test]
    fn test_empty_table() {
        let table = InstanceTable::default();
        assert!(table.is_empty());
        assert_eq!(table.resolve("1"), ("?", "?"));
    }
}
