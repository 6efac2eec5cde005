//! Envelope for single-PNR messages produced by the splitter
//!
//! Wraps each re-assembled message with metadata for tracking downstream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::record::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Unique message ID for tracking
    pub message_id: Uuid,

    /// Position of the PNR within the composite message
    pub index: usize,

    /// Self-contained single-PNR message text
    pub body: String,

    /// Timestamp when the composite message was split
    pub received_at: DateTime<Utc>,

    /// Source file or identifier of the composite message
    pub source: Option<String>,
}

impl MessageEnvelope {
    pub fn new(index: usize, body: String, source: Option<String>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            index,
            body,
            received_at: Utc::now(),
            source,
        }
    }

    /// Wrap every split message, numbering them in order.
    pub fn wrap_all(bodies: Vec<String>, source: Option<&str>) -> Vec<Self> {
        bodies
            .into_iter()
            .enumerate()
            .map(|(index, body)| Self::new(index, body, source.map(str::to_string)))
            .collect()
    }
}

impl Record for MessageEnvelope {
    const NAME: &'static str = "MessageEnvelope";
}
