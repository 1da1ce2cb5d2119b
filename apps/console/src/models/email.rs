use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A per-recipient draft produced by the service. Subject and body are
/// operator-editable in place before sending; the recipient email is the
/// display key and is never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// The two operator-editable fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Subject,
    Body,
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" => Ok(DraftField::Subject),
            "body" => Ok(DraftField::Body),
            other => Err(format!("unknown field '{other}' (expected subject or body)")),
        }
    }
}

/// One entry of the per-recipient delivery report a send may return.
/// The service decides what to include beyond recipient and status, so
/// unknown fields are kept and surfaced in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetail {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_field_parses_subject_and_body() {
        assert_eq!("subject".parse::<DraftField>().unwrap(), DraftField::Subject);
        assert_eq!("body".parse::<DraftField>().unwrap(), DraftField::Body);
        assert!("recipient".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_delivery_detail_keeps_unknown_fields() {
        let json = r#"{
            "email": "ada@example.com",
            "status": "sent",
            "message_id": "m-42",
            "latency_ms": 180
        }"#;

        let detail: DeliveryDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.email, "ada@example.com");
        assert_eq!(detail.status, "sent");
        assert_eq!(detail.extra["message_id"], "m-42");
        assert_eq!(detail.extra["latency_ms"], 180);
    }

    #[test]
    fn test_delivery_detail_tolerates_missing_fields() {
        let detail: DeliveryDetail = serde_json::from_str("{}").unwrap();
        assert!(detail.email.is_empty());
        assert!(detail.status.is_empty());
        assert!(detail.extra.is_empty());
    }
}
