//! The MCP tool result wrapper
//!
//! Hosts expect exactly one `text` content item whose text is itself a JSON
//! document, so every payload is encoded twice: once into the text field, and
//! once more when the envelope goes over the wire.

use serde::{Deserialize, Serialize};

use crate::error::HuduError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// `{"content": [{"type": "text", "text": "<payload JSON>"}]}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolEnvelope {
    pub content: Vec<Content>,
}

impl ToolEnvelope {
    /// The encoded inner payload
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|item| match item {
            Content::Text { text } => text.as_str(),
        })
    }
}

/// Wrap `payload` as a single text content item
pub fn wrap<T: Serialize>(payload: &T) -> Result<ToolEnvelope, HuduError> {
    let text = serde_json::to_string(payload)?;
    Ok(ToolEnvelope {
        content: vec![Content::Text { text }],
    })
}
