//! Resource formatting: flat record in, resource object out.

use serde_json::{Map, Value};

use crate::document::{id_segment, Resource, ResourceLinks};

/// Formats a flat record as a full resource.
///
/// Returns `None` when the record is absent or not an object. `id` is set
/// only when the record carries an `id` key; `links.self` requires one. All
/// non-`id` fields pass into `attributes` verbatim, in record order.
/// Relationships are resolved separately and merged onto the result.
pub(crate) fn format_resource(type_name: &str, record: &Value, base_url: &str) -> Option<Resource> {
    let map = record.as_object()?;
    let id = map.get("id").cloned();

    let links = id.as_ref().map(|id| ResourceLinks {
        self_link: format!("{}/{}/{}", base_url, type_name, id_segment(id)),
    });

    let attributes: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| key.as_str() != "id")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some(Resource {
        resource_type: type_name.to_string(),
        id,
        links,
        attributes: if attributes.is_empty() {
            None
        } else {
            Some(attributes)
        },
        relationships: None,
    })
}
