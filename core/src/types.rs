//! Domain DTOs for the data-item API.
//!
//! # Design
//! These types mirror the wire schema but are defined independently of the
//! mock-server crate; integration tests catch schema drift between the two.
//! Multi-word fields use camelCase on the wire (`createdAt`, `updatedAt`).
//! Timestamps are opaque strings: the server assigns them and the client
//! only ever displays them, never parses them.

use serde::{Deserialize, Serialize};

/// A single data item as returned by the API.
///
/// `id` and the timestamps are server-assigned: absent before creation,
/// immutable afterward. `value` is an unconstrained numeric (the wire
/// format allows integers and floats alike).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request payload for creating a new data item. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDataItem {
    pub name: String,
    pub description: String,
    pub value: f64,
}

/// Request payload for updating an existing item. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_item_timestamps_use_camel_case() {
        let item = DataItem {
            id: Some(1),
            name: "A".to_string(),
            description: "d".to_string(),
            value: 5.0,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            updated_at: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn data_item_without_id_omits_it() {
        let item = DataItem {
            id: None,
            name: "A".to_string(),
            description: "d".to_string(),
            value: 5.0,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn data_item_accepts_integer_and_float_values() {
        let int: DataItem =
            serde_json::from_str(r#"{"id":1,"name":"a","description":"b","value":5}"#).unwrap();
        assert_eq!(int.value, 5.0);
        let float: DataItem =
            serde_json::from_str(r#"{"id":1,"name":"a","description":"b","value":5.5}"#).unwrap();
        assert_eq!(float.value, 5.5);
    }

    #[test]
    fn item_patch_omits_unset_fields() {
        let patch = ItemPatch {
            value: Some(9.0),
            ..ItemPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["value"], 9.0);
        assert!(json.get("name").is_none());
        assert!(json.get("description").is_none());
    }
}
