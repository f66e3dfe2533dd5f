use serde::{Deserialize, Serialize};

/// A subject + body pair. Transient until sent; the sent copy lives in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEmail {
    pub subject: String,
    pub body: String,
}

impl DraftEmail {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}
