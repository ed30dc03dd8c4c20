//! CLI commands for tagsel

pub mod dispatch;
pub mod parse;
pub mod select;
pub mod tags;

use serde_json::Value;
use tagsel_core::selector::{RejectReason, RejectedSpec};

/// JSON rendering of skipped specs shared by commands
pub(crate) fn rejected_json(rejected: &[RejectedSpec]) -> Value {
    serde_json::to_value(rejected).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// One-line description of a skipped spec
pub(crate) fn describe_rejected(rejected: &RejectedSpec) -> String {
    match &rejected.reason {
        RejectReason::Malformed => {
            format!("\"{}\" (malformed)", rejected.spec)
        }
        RejectReason::UnknownModule(module) => {
            format!("\"{}\" (unknown module {})", rejected.spec, module)
        }
    }
}
