use serde::{Deserialize, Serialize};

use crate::event::{ActivityStatus, ActivityTx};

/// Request to move an existing event to a new status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub actor: String,
    pub id: String,
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<ActivityTx>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_without_tx() {
        let update: StatusUpdate = serde_json::from_value(json!({
            "actor": "0x1111111111111111111111111111111111111111",
            "id": "0b9c4c56-1c2f-4b7e-9a3d-2f5e6d7c8b9a",
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(update.status, ActivityStatus::Completed);
        assert!(update.tx.is_none());
    }

    #[test]
    fn decodes_partial_tx() {
        let update: StatusUpdate = serde_json::from_value(json!({
            "actor": "0x1111111111111111111111111111111111111111",
            "id": "0b9c4c56-1c2f-4b7e-9a3d-2f5e6d7c8b9a",
            "status": "submitted",
            "tx": { "destTxHash": "0xbeef" }
        }))
        .unwrap();
        let tx = update.tx.unwrap();
        assert!(tx.source_tx_hash.is_none());
        assert_eq!(tx.dest_tx_hash.as_deref(), Some("0xbeef"));
    }
}
