//! Digital Object record construction.
//!
//! ArchivesSpace rejects creation requests that omit any of the
//! record's collection or flag fields, so every create starts from the
//! full default template produced by [`digital_object_template`] and
//! layers caller-supplied overrides on top. The template is freshly
//! allocated per call; nothing here is shared or mutated in place
//! across calls.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::file_version::FileVersion;

/// Errors from record-payload manipulation.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The record has no `file_versions` array to append to.
    #[error("record has no file_versions array")]
    MissingFileVersions,
}

/// Build the default Digital Object record.
///
/// Every field the service requires is present: empty collection
/// fields, the standard flag defaults (`is_slug_auto=true`,
/// `publish=true`, `restrictions=false`), a placeholder title, and a
/// freshly generated UUID v4 as the `digital_object_id`.
pub fn digital_object_template() -> Map<String, Value> {
    let template = serde_json::json!({
        "jsonmodel_type": "digital_object",
        "external_ids": [],
        "subjects": [],
        "linked_events": [],
        "external_documents": [],
        "rights_statements": [],
        "linked_agents": [],
        "is_slug_auto": true,
        "publish": true,
        "file_versions": [],
        "restrictions": false,
        "notes": [],
        "linked_instances": [],
        "title": "Initialized object",
        "digital_object_id": Uuid::new_v4().to_string(),
    });
    match template {
        Value::Object(map) => map,
        _ => unreachable!("template literal is an object"),
    }
}

/// Assemble the record submitted on creation.
///
/// Steps, in order:
/// 1. start from [`digital_object_template`];
/// 2. shallow-merge `overrides` key by key (an override value replaces
///    the template value entirely, unknown keys are added);
/// 3. force `title` to the given argument, superseding any `title`
///    override;
/// 4. append each of `file_versions` in caller order.
///
/// The `digital_object_id` is generated in step 1, so an override may
/// replace the generated value with its own.
///
/// Fails only when `file_versions` is non-empty but an override
/// replaced the record's `file_versions` with something that is not an
/// array.
pub fn build_digital_object(
    title: &str,
    overrides: &Map<String, Value>,
    file_versions: &[FileVersion],
) -> Result<Value, RecordError> {
    let mut record = digital_object_template();

    for (key, value) in overrides {
        record.insert(key.clone(), value.clone());
    }

    record.insert("title".to_string(), Value::String(title.to_string()));

    if !file_versions.is_empty() {
        let versions = record
            .get_mut("file_versions")
            .and_then(Value::as_array_mut)
            .ok_or(RecordError::MissingFileVersions)?;
        for file_version in file_versions {
            versions.push(file_version.to_json());
        }
    }

    Ok(Value::Object(record))
}

/// Append a badge file version to a fetched record, in place.
///
/// The badge is an embedded, non-representative image pointing at
/// `badge_uri`. Existing file versions are left untouched and in
/// order.
pub fn attach_badge(record: &mut Value, badge_uri: &str) -> Result<(), RecordError> {
    let versions = record
        .get_mut("file_versions")
        .and_then(Value::as_array_mut)
        .ok_or(RecordError::MissingFileVersions)?;
    versions.push(FileVersion::badge(badge_uri).to_json());
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn overrides(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn template_contains_every_required_field() {
        let template = digital_object_template();
        for key in [
            "external_ids",
            "subjects",
            "linked_events",
            "external_documents",
            "rights_statements",
            "linked_agents",
            "file_versions",
            "notes",
            "linked_instances",
        ] {
            assert_eq!(template[key], json!([]), "field {key}");
        }
        assert_eq!(template["jsonmodel_type"], "digital_object");
        assert_eq!(template["is_slug_auto"], true);
        assert_eq!(template["publish"], true);
        assert_eq!(template["restrictions"], false);
        assert_eq!(template["title"], "Initialized object");
        assert!(template["digital_object_id"].is_string());
    }

    #[test]
    fn template_generates_a_fresh_id_per_call() {
        let first = digital_object_template();
        let second = digital_object_template();
        assert_ne!(first["digital_object_id"], second["digital_object_id"]);
    }

    #[test]
    fn build_with_no_overrides_keeps_defaults_and_sets_title() {
        let record = build_digital_object("Tulip Tree", &Map::new(), &[]).unwrap();
        assert_eq!(record["title"], "Tulip Tree");
        assert_eq!(record["file_versions"], json!([]));
        assert_eq!(record["publish"], true);
        assert!(record["digital_object_id"].is_string());
    }

    #[test]
    fn overrides_replace_values_and_add_unknown_keys() {
        let overrides = overrides(&[
            ("publish", json!(false)),
            ("extra_field", json!("kept")),
        ]);
        let record = build_digital_object("T", &overrides, &[]).unwrap();
        assert_eq!(record["publish"], false);
        assert_eq!(record["extra_field"], "kept");
    }

    #[test]
    fn title_argument_supersedes_title_override() {
        let overrides = overrides(&[("title", json!("X"))]);
        let record = build_digital_object("Y", &overrides, &[]).unwrap();
        assert_eq!(record["title"], "Y");
    }

    #[test]
    fn override_may_replace_generated_digital_object_id() {
        let overrides = overrides(&[("digital_object_id", json!("my-key"))]);
        let record = build_digital_object("T", &overrides, &[]).unwrap();
        assert_eq!(record["digital_object_id"], "my-key");
    }

    #[test]
    fn file_versions_are_appended_in_caller_order() {
        let fv1 = FileVersion::new("uri-1");
        let fv2 = FileVersion::badge("uri-2");
        let record =
            build_digital_object("T", &Map::new(), &[fv1.clone(), fv2.clone()]).unwrap();
        assert_eq!(record["file_versions"], json!([fv1.to_json(), fv2.to_json()]));
    }

    #[test]
    fn file_versions_append_onto_an_overridden_array() {
        let existing = json!([{"file_uri": "already-there"}]);
        let overrides = overrides(&[("file_versions", existing)]);
        let record =
            build_digital_object("T", &overrides, &[FileVersion::new("new-one")]).unwrap();
        let versions = record["file_versions"].as_array().unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0]["file_uri"], "already-there");
        assert_eq!(versions[1]["file_uri"], "new-one");
    }

    #[test]
    fn appending_onto_a_non_array_override_fails() {
        let overrides = overrides(&[("file_versions", json!("not an array"))]);
        let result = build_digital_object("T", &overrides, &[FileVersion::new("uri")]);
        assert_matches!(result, Err(RecordError::MissingFileVersions));
    }

    #[test]
    fn attach_badge_appends_exactly_one_embedded_version() {
        let mut record = json!({
            "title": "existing",
            "file_versions": [{"file_uri": "first"}],
        });
        attach_badge(&mut record, "https://example.org/TN").unwrap();
        let versions = record["file_versions"].as_array().unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0]["file_uri"], "first");
        assert_eq!(versions[1]["file_uri"], "https://example.org/TN");
        assert_eq!(versions[1]["xlink_show_attribute"], "embed");
        assert_eq!(versions[1]["is_representative"], false);
    }

    #[test]
    fn attach_badge_without_file_versions_fails() {
        let mut record = json!({"error": "DigitalObject not found"});
        let result = attach_badge(&mut record, "uri");
        assert_matches!(result, Err(RecordError::MissingFileVersions));
    }
}
