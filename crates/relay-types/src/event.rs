use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The literal `app` value carried by every event this relayer accepts.
pub const APP_ID: &str = "arc-stable-toolbox";

/// One activity performed by an on-chain actor.
///
/// `(actor, id)` identifies an event. Only `status` and `tx` change after the
/// event is appended; everything else is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,
    pub created_at: String,
    pub actor: String,
    pub app: ActivityApp,
    pub intent_id: String,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chains: Option<ActivityChains>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<ActivityToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<ActivityTx>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<ActivityRefs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<ActivityAi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<ActivitySignals>,
}

impl ActivityEvent {
    /// Replace the status and shallow-merge `tx` into the existing hashes.
    pub fn apply_status(&mut self, status: ActivityStatus, tx: Option<&ActivityTx>) {
        self.status = status;
        if let Some(update) = tx {
            self.tx.get_or_insert_with(ActivityTx::default).merge(update);
        }
    }
}

/// Owning application. Only one value exists on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityApp {
    #[default]
    #[serde(rename = "arc-stable-toolbox")]
    ArcStableToolbox,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Bridge,
    Swap,
    Deploy,
    ContractCall,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Bridge,
        ActivityKind::Swap,
        ActivityKind::Deploy,
        ActivityKind::ContractCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bridge => "bridge",
            Self::Swap => "swap",
            Self::Deploy => "deploy",
            Self::ContractCall => "contractCall",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}

/// Lifecycle status of an activity. Any status may follow any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Started,
    Approved,
    Submitted,
    Attested,
    Completed,
    Failed,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 6] = [
        ActivityStatus::Started,
        ActivityStatus::Approved,
        ActivityStatus::Submitted,
        ActivityStatus::Attested,
        ActivityStatus::Completed,
        ActivityStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Approved => "approved",
            Self::Submitted => "submitted",
            Self::Attested => "attested",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeError::UnknownStatus(s.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityChains {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_chain_id: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSymbol {
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "EURC")]
    Eurc,
}

/// Token moved by the activity. `amount` is an integer in base units,
/// kept as a decimal string to avoid precision loss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityToken {
    pub symbol: TokenSymbol,
    pub amount: String,
}

/// Transaction hashes on the source and destination chains.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTx {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_tx_hash: Option<String>,
}

impl ActivityTx {
    /// Overwrite each hash that `update` carries; keep the others.
    pub fn merge(&mut self, update: &ActivityTx) {
        if let Some(hash) = &update.source_tx_hash {
            self.source_tx_hash = Some(hash.clone());
        }
        if let Some(hash) = &update.dest_tx_hash {
            self.dest_tx_hash = Some(hash.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source_tx_hash.is_none() && self.dest_tx_hash.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_dest_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    Suggest,
    Approve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiVerdict {
    Approve,
    Deny,
    Suggest,
}

/// Metadata for decisions taken with an AI assistant in the loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityAi {
    pub mode: AiMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<AiVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySignals {
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActivitySignalsMeta>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySignalsMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage: Option<String>,
}
