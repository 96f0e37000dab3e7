//! The `file_version` sub-record embedded in Digital Objects.
//!
//! A [`FileVersion`] points at one digital surrogate (an image URL, a
//! PDF, etc.) together with its xlink display attributes. ArchivesSpace
//! stores these inside the Digital Object's `file_versions` array.

use serde::{Deserialize, Serialize};

/// One file reference inside a Digital Object.
///
/// Defaults match what ArchivesSpace expects for a plain published
/// surrogate: `publish=true`, not representative, opened on request in
/// a new window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    /// Fixed record-kind discriminator, always `"file_version"`.
    pub jsonmodel_type: String,
    /// URI of the digital surrogate.
    pub file_uri: String,
    /// Whether the file is publicly visible.
    pub publish: bool,
    /// Whether this file represents the whole Digital Object.
    pub is_representative: bool,
    /// xlink actuate attribute (`"onRequest"` by default).
    pub xlink_actuate_attribute: String,
    /// xlink show attribute (`"new"`, `"embed"`, ...).
    pub xlink_show_attribute: String,
}

impl FileVersion {
    /// Create a file version for `file_uri` with default display
    /// attributes.
    pub fn new(file_uri: impl Into<String>) -> Self {
        Self {
            jsonmodel_type: "file_version".to_string(),
            file_uri: file_uri.into(),
            publish: true,
            is_representative: false,
            xlink_actuate_attribute: "onRequest".to_string(),
            xlink_show_attribute: "new".to_string(),
        }
    }

    /// Create a badge: an embedded, non-representative image used to
    /// visually represent the Digital Object.
    pub fn badge(file_uri: impl Into<String>) -> Self {
        Self::new(file_uri).show_attribute("embed")
    }

    /// Set the xlink show attribute.
    pub fn show_attribute(mut self, value: impl Into<String>) -> Self {
        self.xlink_show_attribute = value.into();
        self
    }

    /// Set the xlink actuate attribute.
    pub fn actuate_attribute(mut self, value: impl Into<String>) -> Self {
        self.xlink_actuate_attribute = value.into();
        self
    }

    /// Mark (or unmark) this file as the object's representative image.
    pub fn representative(mut self, value: bool) -> Self {
        self.is_representative = value;
        self
    }

    /// Set the publish flag.
    pub fn publish(mut self, value: bool) -> Self {
        self.publish = value;
        self
    }

    /// Render as the JSON object ArchivesSpace expects.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "jsonmodel_type": self.jsonmodel_type,
            "file_uri": self.file_uri,
            "publish": self.publish,
            "is_representative": self.is_representative,
            "xlink_actuate_attribute": self.xlink_actuate_attribute,
            "xlink_show_attribute": self.xlink_show_attribute,
        })
    }
}
