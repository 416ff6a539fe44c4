// WHY: additive fusion of oracle and heuristic signals into a 0-100 score plus the tier classifier
// Every score carries the list of reasons that produced it

use serde::Serialize;
use std::fmt;

use crate::config::{ScoringConfig, SignalWeights, Thresholds};
use crate::heuristics::HeuristicDetectors;
use crate::lexicon::OracleSet;
use crate::text::Token;

/// Why a score component was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    Attested { oracle: String },
    ProductiveSuffix { suffix: String },
    EcclesiasticalContext { neighbor: String },
    OrthographicVariant { candidate: String },
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Attested { oracle } => write!(f, "attested by {oracle}"),
            Signal::ProductiveSuffix { suffix } => write!(f, "productive suffix -{suffix}"),
            Signal::EcclesiasticalContext { neighbor } => write!(f, "ecclesiastical context ({neighbor})"),
            Signal::OrthographicVariant { candidate } => write!(f, "orthographic variant of {candidate}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub reason: Signal,
    pub delta: i32,
}

/// Auditable score: base plus ordered components, clamped on read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn new(base: i32) -> Self {
        Self { base, components: Vec::new() }
    }

    pub fn push(&mut self, reason: Signal, delta: i32) {
        self.components.push(ScoreComponent { reason, delta });
    }

    /// Unclamped sum, useful to see how far a score saturated
    pub fn raw_total(&self) -> i32 {
        self.components
            .iter()
            .fold(self.base, |total, c| total.saturating_add(c.delta))
    }

    pub fn final_score(&self) -> u8 {
        self.raw_total().clamp(0, 100) as u8
    }

    pub fn reasons(&self) -> impl Iterator<Item = String> + '_ {
        self.components.iter().map(|c| format!("{} ({:+})", c.reason, c.delta))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Valid,
    Review,
    Suspect,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Valid => "VALID",
            Classification::Review => "REVIEW",
            Classification::Suspect => "SUSPECT",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a final score to its tier; both thresholds are inclusive lower bounds
pub fn classify(final_score: u8, thresholds: &Thresholds) -> Classification {
    if final_score >= thresholds.valid {
        Classification::Valid
    } else if final_score >= thresholds.review {
        Classification::Review
    } else {
        Classification::Suspect
    }
}

pub struct Scorer {
    base: i32,
    weights: SignalWeights,
}

impl Scorer {
    pub fn new(base: i32, weights: SignalWeights) -> Self {
        Self { base, weights }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.base_score, config.weights.clone())
    }

    /// Score one token given its neighbor window (normalized forms, token itself excluded)
    pub fn score<S: AsRef<str>>(
        &self,
        token: &Token,
        oracles: &OracleSet,
        detectors: &HeuristicDetectors,
        window: &[S],
    ) -> ScoreBreakdown {
        let form = token.normalized_form();
        let mut breakdown = ScoreBreakdown::new(self.base);

        for oracle in oracles.iter() {
            if oracle.attests(form) {
                breakdown.push(Signal::Attested { oracle: oracle.label().to_string() }, oracle.weight());
            }
        }

        if let Some(suffix) = detectors.matching_suffix(form) {
            breakdown.push(
                Signal::ProductiveSuffix { suffix: suffix.to_string() },
                self.weights.productive_suffix,
            );
        }

        if let Some(neighbor) = detectors.matching_context(window) {
            breakdown.push(
                Signal::EcclesiasticalContext { neighbor: neighbor.to_string() },
                self.weights.ecclesiastical_context,
            );
        }

        if let Some(candidate) = detectors.matching_variant(form, oracles) {
            breakdown.push(Signal::OrthographicVariant { candidate }, self.weights.orthographic_variant);
        }

        breakdown
    }
}
