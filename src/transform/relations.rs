//! Relation extraction
//!
//! Link fields come back from the API as lists of foreign record ids
//! (`["recA", "recB"]`). Each id becomes one edge in the synthetic
//! relations stream.

use crate::types::RelationEdge;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix every remote record id starts with
const RECORD_ID_PREFIX: &str = "rec";

/// Length of generated edge ids
pub const EDGE_ID_LEN: usize = 12;

/// What to do when a link list contains something that isn't a record id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationListPolicy {
    /// Stop reading the list at the first non-id element
    #[default]
    StopAtFirstNonId,
    /// Ignore non-id elements and keep going
    SkipNonIds,
}

fn is_record_id(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| s.starts_with(RECORD_ID_PREFIX))
}

/// `len` independent lowercase ASCII letters
pub fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// Edges for one field value of the record `source_id`.
///
/// Anything but a JSON array yields nothing.
pub fn extract_relations<R: Rng>(
    value: &Value,
    source_id: &str,
    policy: RelationListPolicy,
    rng: &mut R,
) -> Vec<RelationEdge> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    let mut edges = Vec::new();
    for item in items {
        match is_record_id(item) {
            Some(target) => edges.push(RelationEdge {
                id: random_token(rng, EDGE_ID_LEN),
                relation1: source_id.to_string(),
                relation2: target.to_string(),
            }),
            None => match policy {
                RelationListPolicy::StopAtFirstNonId => break,
                RelationListPolicy::SkipNonIds => continue,
            },
        }
    }
    edges
}

/// Run-scoped collection of every edge found while projecting records
pub struct RelationAccumulator {
    edges: Vec<RelationEdge>,
    policy: RelationListPolicy,
    rng: StdRng,
}

impl RelationAccumulator {
    pub fn new(policy: RelationListPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }

    /// Deterministic edge ids, for reproducible output
    pub fn with_seed(policy: RelationListPolicy, seed: u64) -> Self {
        Self::with_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(policy: RelationListPolicy, rng: StdRng) -> Self {
        RelationAccumulator {
            edges: Vec::new(),
            policy,
            rng,
        }
    }

    /// Inspect a raw field value and keep any edges it yields
    pub fn observe(&mut self, value: &Value, source_id: &str) {
        let found = extract_relations(value, source_id, self.policy, &mut self.rng);
        self.edges.extend(found);
    }

    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_edges(self) -> Vec<RelationEdge> {
        self.edges
    }
}
