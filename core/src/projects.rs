//! Project hierarchy: flattening and grouped counts
//!
//! The provider returns projects as a tree through `children`. The data is
//! assumed acyclic. Both walks use an explicit stack, so deep trees cannot
//! overflow the call stack.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::fields::Fields;

/// One node of the project tree.
///
/// Identity and classification fields are typed; every other provider
/// field (status, timestamps, task ids) is carried through untouched in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_uid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub nand: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub fw: Option<String>,
    /// Owner ("project lead")
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub pl: Option<String>,
    #[serde(default, deserialize_with = "lenient_children", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ProjectNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<ProjectNode>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(nodes_from(items))),
        _ => Ok(None),
    }
}

/// Decode array elements as nodes, dropping anything that is not an object
fn nodes_from(items: Vec<Value>) -> Vec<ProjectNode> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::debug!("Skipping malformed project node: {}", e);
                None
            }
        })
        .collect()
}

impl ProjectNode {
    pub fn children(&self) -> &[ProjectNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// One page of the provider's project listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPage {
    pub data: Vec<ProjectNode>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

impl ProjectPage {
    /// Decode leniently: absent paging fields take the provider defaults
    /// (page 1, size 50, total 0).
    pub fn from_value(raw: &Value) -> Self {
        let fields = Fields::of(raw);
        Self {
            data: nodes_from(fields.list("data").to_vec()),
            page: fields.u64_or("page", 1),
            size: fields.u64_or("size", 50),
            total: fields.u64_or("total", 0),
        }
    }
}

/// Pre-order flatten of raw provider nodes: each node, minus its
/// `children` key and otherwise untouched, before its subtree.
/// Non-object entries are skipped.
pub fn flatten_projects(roots: &[Value]) -> Vec<Value> {
    let mut flat = Vec::new();
    let mut stack: Vec<&Value> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        let Some(object) = node.as_object() else {
            tracing::debug!("Skipping non-object project node");
            continue;
        };

        let mut copy = object.clone();
        copy.remove("children");
        flat.push(Value::Object(copy));

        stack.extend(Fields::of(node).list("children").iter().rev());
    }

    flat
}

/// Counts keyed by label, kept in first-seen order until sorted.
///
/// Serializes as a JSON object whose key order is the tally order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    /// Stable sort by descending count; ties keep first-seen order
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        for (slot, (label, _)) in self.entries.iter().enumerate() {
            if let Some(entry) = self.index.get_mut(label) {
                *entry = slot;
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.index.get(label).map(|&slot| self.entries[slot].1)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Project counts grouped by customer and by controller
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectCounts {
    pub total: u64,
    pub by_customer: Tally,
    pub by_controller: Tally,
}

const UNKNOWN: &str = "Unknown";

impl ProjectCounts {
    /// Visit every node, nested children included, and tally each one.
    /// Missing customer/controller values count as `"Unknown"`.
    pub fn tally(page: &ProjectPage) -> Self {
        let mut by_customer = Tally::default();
        let mut by_controller = Tally::default();
        let mut stack: Vec<&ProjectNode> = page.data.iter().rev().collect();

        while let Some(node) = stack.pop() {
            by_customer.increment(node.customer.as_deref().unwrap_or(UNKNOWN));
            by_controller.increment(node.controller.as_deref().unwrap_or(UNKNOWN));
            stack.extend(node.children().iter().rev());
        }

        by_customer.sort_descending();
        by_controller.sort_descending();

        Self {
            total: page.total,
            by_customer,
            by_controller,
        }
    }
}
