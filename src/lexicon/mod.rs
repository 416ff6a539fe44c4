// WHY: the scorer only sees the OracleSet, so further lexicons plug in without touching it
// Oracles are read-only services answering "is this normalized form attested?"

use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::config::MAX_WEIGHT;

pub mod classical;
pub mod medieval;
pub mod paradigm;

pub use classical::{Analysis, ClassicalOracle, MorphologicalAnalyzer};
pub use medieval::MedievalOracle;
pub use paradigm::{Paradigm, ParadigmAnalyzer};

/// Boolean attestation capability shared by every lexicon
/// Implementations must never fail: errors degrade to `false`.
pub trait LexicalOracle: Send + Sync {
    fn name(&self) -> &str;

    fn attests(&self, normalized_form: &str) -> bool;
}

/// An oracle registered with the score it contributes when it attests a form
#[derive(Clone)]
pub struct RegisteredOracle {
    label: String,
    weight: i32,
    oracle: Arc<dyn LexicalOracle>,
}

impl RegisteredOracle {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn attests(&self, normalized_form: &str) -> bool {
        self.oracle.attests(normalized_form)
    }
}

impl fmt::Debug for RegisteredOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredOracle")
            .field("label", &self.label)
            .field("weight", &self.weight)
            .field("oracle", &self.oracle.name())
            .finish()
    }
}

/// Ordered registry of weighted oracles consulted for every token
#[derive(Debug, Clone, Default)]
pub struct OracleSet {
    entries: Vec<RegisteredOracle>,
}

impl OracleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weights are clamped into `0..=MAX_WEIGHT` so an attestation can never lower a score
    pub fn register(&mut self, label: impl Into<String>, weight: i32, oracle: Arc<dyn LexicalOracle>) {
        let label = label.into();
        let clamped = weight.clamp(0, MAX_WEIGHT);
        if clamped != weight {
            warn!(oracle = %label, weight, clamped, "Oracle weight out of range, clamped");
        }
        self.entries.push(RegisteredOracle { label, weight: clamped, oracle });
    }

    /// Builder-style registration
    pub fn with(mut self, label: impl Into<String>, weight: i32, oracle: Arc<dyn LexicalOracle>) -> Self {
        self.register(label, weight, oracle);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredOracle> {
        self.entries.iter()
    }

    /// True if any registered oracle attests the form
    pub fn any_attests(&self, normalized_form: &str) -> bool {
        self.entries.iter().any(|entry| entry.attests(normalized_form))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_and_any_attests() {
        let medieval = Arc::new(MedievalOracle::from_forms(["abbatissa"]));
        let extra = Arc::new(MedievalOracle::from_forms(["cartularium"]));
        let set = OracleSet::new()
            .with("medieval", 40, medieval)
            .with("cartulary", 15, extra);

        let labels: Vec<_> = set.iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["medieval", "cartulary"]);
        assert_eq!(set.iter().map(|o| o.weight()).sum::<i32>(), 55);

        assert!(set.any_attests("abbatissa"));
        assert!(set.any_attests("cartularium"));
        assert!(!set.any_attests("monachuss"));
    }

    #[test]
    fn test_out_of_range_weights_clamped() {
        let forms = Arc::new(MedievalOracle::from_forms(["abbatissa"]));
        let set = OracleSet::new()
            .with("negative", -25, forms.clone())
            .with("huge", i32::MAX, forms);
        let weights: Vec<_> = set.iter().map(|o| o.weight()).collect();
        assert_eq!(weights, vec![0, MAX_WEIGHT]);
    }

    #[test]
    fn test_empty_set_attests_nothing() {
        let set = OracleSet::new();
        assert!(set.is_empty());
        assert!(!set.any_attests("dominus"));
    }
}
