//! Execution proofs: the cryptographic attestation of completed work.

use agentic_hash::{CanonicalValue, Hashable};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A proof that an agent completed a service, submitted to `release_escrow`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExecutionProof {
    /// The agent that performed the work.
    pub agent_id: String,
    /// Unique identifier for this execution, scoped per agent.
    pub execution_id: String,
    /// When the execution completed.
    pub timestamp: DateTime<Utc>,
    /// Whether the task completed successfully.
    pub task_completed: bool,
    /// How long the execution took, in milliseconds.
    pub execution_time_ms: u64,
    /// Arbitrary structured result payload.
    pub result: Value,
    /// Arbitrary structured metadata payload.
    pub metadata: Value,
    /// The canonical hash of every field above, computed by the submitter.
    pub proof_hash: String,
}

impl ExecutionProof {
    /// Builds a proof and computes its own `proof_hash` from the other fields.
    pub fn new(
        agent_id: impl Into<String>,
        execution_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        task_completed: bool,
        execution_time_ms: u64,
        result: Value,
        metadata: Value,
    ) -> Result<Self, agentic_hash::HashError> {
        let unsigned = ProofFields {
            agent_id: agent_id.into(),
            execution_id: execution_id.into(),
            timestamp,
            task_completed,
            execution_time_ms,
            result,
            metadata,
        };
        let proof_hash = agentic_hash::hash_of(&unsigned)?;
        Ok(Self {
            agent_id: unsigned.agent_id,
            execution_id: unsigned.execution_id,
            timestamp: unsigned.timestamp,
            task_completed: unsigned.task_completed,
            execution_time_ms: unsigned.execution_time_ms,
            result: unsigned.result,
            metadata: unsigned.metadata,
            proof_hash,
        })
    }

    /// Recomputes the canonical hash over this proof's fields, excluding
    /// `proof_hash` itself, for comparison against the embedded value.
    pub fn recompute_hash(&self) -> Result<String, agentic_hash::HashError> {
        agentic_hash::hash_of(&ProofFields {
            agent_id: self.agent_id.clone(),
            execution_id: self.execution_id.clone(),
            timestamp: self.timestamp,
            task_completed: self.task_completed,
            execution_time_ms: self.execution_time_ms,
            result: self.result.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

/// The subset of [`ExecutionProof`] fields that feed the canonical hash;
/// kept as a distinct type so the stored `proof_hash` can never accidentally
/// be folded into its own input.
struct ProofFields {
    agent_id: String,
    execution_id: String,
    timestamp: DateTime<Utc>,
    task_completed: bool,
    execution_time_ms: u64,
    result: Value,
    metadata: Value,
}

fn json_to_canonical(value: &Value) -> CanonicalValue {
    match value {
        Value::Null => CanonicalValue::Null,
        Value::Bool(b) => CanonicalValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CanonicalValue::Int(i)
            } else {
                CanonicalValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => CanonicalValue::Str(s.clone()),
        Value::Array(items) => CanonicalValue::Seq(items.iter().map(json_to_canonical).collect()),
        Value::Object(map) => {
            CanonicalValue::map(map.iter().map(|(k, v)| (k.clone(), json_to_canonical(v))).collect())
        }
    }
}

impl Hashable for ProofFields {
    fn to_canonical(&self) -> CanonicalValue {
        CanonicalValue::map(vec![
            ("agent_id".to_string(), CanonicalValue::Str(self.agent_id.clone())),
            ("execution_id".to_string(), CanonicalValue::Str(self.execution_id.clone())),
            ("timestamp".to_string(), CanonicalValue::Timestamp(self.timestamp)),
            ("task_completed".to_string(), CanonicalValue::Bool(self.task_completed)),
            ("execution_time_ms".to_string(), CanonicalValue::Int(self.execution_time_ms as i64)),
            ("result".to_string(), json_to_canonical(&self.result)),
            ("metadata".to_string(), json_to_canonical(&self.metadata)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recompute_hash_matches_constructed_hash() {
        let proof = ExecutionProof::new(
            "agent-1",
            "exec-1",
            Utc::now(),
            true,
            1500,
            json!({"ok": true}),
            json!({}),
        )
        .unwrap();
        assert_eq!(proof.recompute_hash().unwrap(), proof.proof_hash);
    }

    #[test]
    fn tampering_with_result_changes_the_hash() {
        let ts = Utc::now();
        let mut proof =
            ExecutionProof::new("agent-1", "exec-1", ts, true, 1500, json!({"ok": true}), json!({}))
                .unwrap();
        let original_hash = proof.proof_hash.clone();
        proof.result = json!({"ok": false});
        assert_ne!(proof.recompute_hash().unwrap(), original_hash);
    }
}
