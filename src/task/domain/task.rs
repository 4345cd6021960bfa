//! Task record as fetched from the task source.

use super::{Attribute, AttributeValue, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a task has no non-empty title attribute.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Externally sourced work item.
///
/// Tasks are immutable once fetched; a reload replaces them wholesale.
/// Attributes keep source order and are looked up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_edited_time: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task with an explicit title and no attributes.
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            attributes: Vec::new(),
            created_time: None,
            last_edited_time: None,
        }
    }

    /// Creates a task whose title comes from its first non-empty title
    /// attribute, falling back to [`UNTITLED_TASK`].
    #[must_use]
    pub fn from_attributes(
        id: impl Into<TaskId>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        let attributes: Vec<Attribute> = attributes.into_iter().collect();
        let title = attributes
            .iter()
            .find_map(|attribute| match &attribute.value {
                AttributeValue::Title { title } if !title.is_empty() => Some(title.clone()),
                _ => None,
            })
            .unwrap_or_else(|| UNTITLED_TASK.to_owned());
        Self {
            attributes,
            ..Self::new(id, title)
        }
    }

    /// Adds an attribute, replacing any existing attribute with the same name.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|existing| existing.name == attribute.name)
        {
            *existing = attribute;
        } else {
            self.attributes.push(attribute);
        }
        self
    }

    /// Sets the source timestamps.
    #[must_use]
    pub fn with_timestamps(
        mut self,
        created_time: DateTime<Utc>,
        last_edited_time: DateTime<Utc>,
    ) -> Self {
        self.created_time = Some(created_time);
        self.last_edited_time = Some(last_edited_time);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns all attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
    }

    /// Returns the source creation timestamp, if known.
    #[must_use]
    pub const fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_time
    }

    /// Returns the source last-edit timestamp, if known.
    #[must_use]
    pub const fn last_edited_time(&self) -> Option<DateTime<Utc>> {
        self.last_edited_time
    }
}
