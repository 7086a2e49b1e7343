//! # Fuzzy carbon/investment scoring
//!
//! Scores one alternative on two criteria, carbon emissions and investment
//! cost, each against its own acceptability band. Each criterion becomes a
//! membership value in `[0, 1]`; the two memberships are merged by a
//! triangular norm into one desirability score.
//!
//! ## Membership
//!
//! For a band `[lower, upper]`, direction `beta ∈ {0, 1}` and weight `w`:
//!
//! ```text
//! value > upper            → 0
//! lower ≤ value ≤ upper    → (t1·(1-β) + t2·β)^w
//!                            t1 = (upper-value)/(upper-lower)
//!                            t2 = (value-lower)/(upper-lower)
//! value < lower            → 1 - β
//! ```
//!
//! Exceeding `upper` always scores 0, while falling below `lower` scores
//! `1 - β`. The asymmetry is part of the scoring model and is kept as is.
//!
//! `β` follows one policy everywhere: β = 1 iff the value strictly exceeds
//! the lower limit (see [`growth_beta`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emissions::{node_emissions, FactorSource};
use crate::model::{Bounds, Node};
use crate::{Error, Result};

/// Default `p` for the generic Hamacher product.
pub const DEFAULT_HAMACHER_P: f64 = 0.5;

// ============================================================================
// Membership
// ============================================================================

/// Membership of `value` in the band `[lower, upper]`.
///
/// Pure numeric function: `lower < upper` is the caller's precondition and
/// is not re-checked here. [`evaluate`] validates bands before calling it.
pub fn membership(value: f64, lower: f64, upper: f64, beta: f64, weight: f64) -> f64 {
    if value > upper {
        0.0
    } else if value >= lower {
        let span = upper - lower;
        let t1 = (upper - value) / span;
        let t2 = (value - lower) / span;
        (t1 * (1.0 - beta) + t2 * beta).powf(weight)
    } else {
        1.0 - beta
    }
}

/// Direction flag: 1 iff `value` strictly exceeds `lower`, else 0.
pub fn growth_beta(value: f64, lower: f64) -> f64 {
    if value > lower { 1.0 } else { 0.0 }
}

// ============================================================================
// T-norms
// ============================================================================

/// Fuzzy conjunction used to merge the two memberships.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TNorm {
    /// `a·b`
    #[default]
    Algebraic,
    /// `a·b / (2 - (a + b - a·b))`
    Einstein,
    /// `a·b / (a + b - a·b)`, defined as 0 when `a = b = 0`
    HamacherParticular,
    /// `a·b / (p + (1-p)(a + b - a·b))`, `p ∈ (0, 1]`
    HamacherGeneric { p: f64 },
}

impl TNorm {
    /// Parse a t-norm by name. `p` is used only by `hamacher_generic`.
    pub fn from_name(name: &str, p: f64) -> Result<Self> {
        match name {
            "algebraic" => Ok(TNorm::Algebraic),
            "einstein" => Ok(TNorm::Einstein),
            "hamacher_particular" => Ok(TNorm::HamacherParticular),
            "hamacher_generic" => Ok(TNorm::HamacherGeneric { p }),
            other => Err(Error::InvalidArgument(format!("unknown t-norm '{other}'"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TNorm::Algebraic => "algebraic",
            TNorm::Einstein => "einstein",
            TNorm::HamacherParticular => "hamacher_particular",
            TNorm::HamacherGeneric { .. } => "hamacher_generic",
        }
    }

    /// Reject parameters outside the operator's domain.
    pub fn validate(&self) -> Result<()> {
        match *self {
            TNorm::HamacherGeneric { p } if !(p > 0.0 && p <= 1.0) => Err(Error::InvalidArgument(
                format!("hamacher_generic p must be in (0, 1], got {p}"),
            )),
            _ => Ok(()),
        }
    }

    /// Combine two memberships.
    pub fn combine(&self, a: f64, b: f64) -> f64 {
        let product = a * b;
        let union = a + b - product;
        match *self {
            TNorm::Algebraic => product,
            TNorm::Einstein => product / (2.0 - union),
            TNorm::HamacherParticular => {
                if union == 0.0 { 0.0 } else { product / union }
            }
            TNorm::HamacherGeneric { p } => product / (p + (1.0 - p) * union),
        }
    }
}

impl fmt::Display for TNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TNorm::HamacherGeneric { p } => write!(f, "{}(p={p})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for TNorm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TNorm::from_name(s, DEFAULT_HAMACHER_P)
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Acceptability band and weight for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub bounds: Bounds,
    pub weight: f64,
}

impl Criterion {
    pub fn new(lower: f64, upper: f64, weight: f64) -> Self {
        Self { bounds: Bounds::new(lower, upper), weight }
    }

    /// Membership of `value` with the growth-based direction.
    pub fn membership(&self, value: f64) -> f64 {
        let Bounds { min, max } = self.bounds;
        membership(value, min, max, growth_beta(value, min), self.weight)
    }

    fn validate(&self, label: &str) -> Result<()> {
        if self.bounds.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "{label} band requires lower < upper, got [{}, {}]",
                self.bounds.min, self.bounds.max
            )))
        }
    }
}

/// Both criteria of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub carbon: Criterion,
    pub cost: Criterion,
}

/// One alternative to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub carbon_emissions: f64,
    pub investment_cost: f64,
}

impl Alternative {
    pub fn new(name: impl Into<String>, carbon_emissions: f64, investment_cost: f64) -> Self {
        Self { name: name.into(), carbon_emissions, investment_cost }
    }
}

/// Detailed outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mu_carbon: f64,
    pub mu_cost: f64,
    pub score: f64,
}

/// Score an alternative, returning both memberships and the combined score.
pub fn evaluate_detailed(alt: &Alternative, criteria: &Criteria, t_norm: TNorm) -> Result<Evaluation> {
    criteria.carbon.validate("carbon")?;
    criteria.cost.validate("cost")?;
    t_norm.validate()?;

    let mu_carbon = criteria.carbon.membership(alt.carbon_emissions);
    let mu_cost = criteria.cost.membership(alt.investment_cost);
    let score = t_norm.combine(mu_carbon, mu_cost);

    debug!(alternative = %alt.name, mu_carbon, mu_cost, score, t_norm = %t_norm, "alternative scored");
    Ok(Evaluation { mu_carbon, mu_cost, score })
}

/// Joint carbon/investment desirability of an alternative, in `[0, 1]`.
pub fn evaluate(alt: &Alternative, criteria: &Criteria, t_norm: TNorm) -> Result<f64> {
    evaluate_detailed(alt, criteria, t_norm).map(|e| e.score)
}

/// Flat-argument form of [`evaluate`].
#[allow(clippy::too_many_arguments)]
pub fn evaluate_carbon_investment(
    carbon_emissions: f64,
    investment_cost: f64,
    carbon_lower: f64,
    carbon_upper: f64,
    cost_lower: f64,
    cost_upper: f64,
    carbon_weight: f64,
    cost_weight: f64,
    t_norm: TNorm,
) -> Result<f64> {
    let criteria = Criteria {
        carbon: Criterion::new(carbon_lower, carbon_upper, carbon_weight),
        cost: Criterion::new(cost_lower, cost_upper, cost_weight),
    };
    evaluate(&Alternative::new("", carbon_emissions, investment_cost), &criteria, t_norm)
}

// ============================================================================
// Stage scoring and comparison
// ============================================================================

/// Importance of each criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub carbon: f64,
    pub cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { carbon: 0.6, cost: 0.4 }
    }
}

/// Score a normal stage using its own emissions, investment and bands.
pub fn evaluate_stage<F: FactorSource + ?Sized>(
    node: &Node,
    factors: &F,
    weights: Weights,
    t_norm: TNorm,
) -> Result<Evaluation> {
    if node.is_special() {
        return Err(Error::InvalidArgument(format!(
            "special node '{}' has no emissions or investment to score",
            node.name
        )));
    }
    let alt = Alternative::new(node.name.clone(), node_emissions(node, factors), node.investment);
    let criteria = Criteria {
        carbon: Criterion { bounds: node.co2, weight: weights.carbon },
        cost: Criterion { bounds: node.investment_bounds, weight: weights.cost },
    };
    evaluate_detailed(&alt, &criteria, t_norm)
}

/// An alternative with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAlternative {
    pub alternative: Alternative,
    pub score: f64,
}

/// Score every alternative and sort by descending score (stable on ties).
pub fn rank_alternatives(
    alternatives: &[Alternative],
    criteria: &Criteria,
    t_norm: TNorm,
) -> Result<Vec<ScoredAlternative>> {
    let mut scored = alternatives
        .iter()
        .map(|alt| {
            evaluate(alt, criteria, t_norm)
                .map(|score| ScoredAlternative { alternative: alt.clone(), score })
        })
        .collect::<Result<Vec<_>>>()?;
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_membership_regions() {
        assert_eq!(membership(11.0, 0.0, 10.0, 1.0, 1.0), 0.0);
        assert_eq!(membership(11.0, 0.0, 10.0, 0.0, 1.0), 0.0);
        assert_eq!(membership(-1.0, 0.0, 10.0, 1.0, 1.0), 0.0);
        assert_eq!(membership(-1.0, 0.0, 10.0, 0.0, 1.0), 1.0);
        assert!((membership(2.5, 0.0, 10.0, 1.0, 1.0) - 0.25).abs() < EPS);
        assert!((membership(2.5, 0.0, 10.0, 0.0, 1.0) - 0.75).abs() < EPS);
    }

    #[test]
    fn test_membership_band_edges() {
        assert_eq!(membership(0.0, 0.0, 10.0, 0.0, 1.0), 1.0);
        assert_eq!(membership(10.0, 0.0, 10.0, 1.0, 1.0), 1.0);
        assert_eq!(membership(10.0, 0.0, 10.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_weight_is_exponent() {
        let m = membership(5.0, 0.0, 10.0, 1.0, 2.0);
        assert!((m - 0.25).abs() < EPS);
    }

    #[test]
    fn test_growth_beta() {
        assert_eq!(growth_beta(5.0, 1.0), 1.0);
        assert_eq!(growth_beta(1.0, 1.0), 0.0);
        assert_eq!(growth_beta(0.5, 1.0), 0.0);
    }

    #[test]
    fn test_tnorm_names() {
        assert_eq!("algebraic".parse::<TNorm>().unwrap(), TNorm::Algebraic);
        assert_eq!("einstein".parse::<TNorm>().unwrap(), TNorm::Einstein);
        assert_eq!("hamacher_particular".parse::<TNorm>().unwrap(), TNorm::HamacherParticular);
        assert_eq!(
            "hamacher_generic".parse::<TNorm>().unwrap(),
            TNorm::HamacherGeneric { p: DEFAULT_HAMACHER_P }
        );
        assert!(matches!("lukasiewicz".parse::<TNorm>(), Err(Error::InvalidArgument(_))));
        assert_eq!(TNorm::from_name("hamacher_generic", 0.2).unwrap().to_string(), "hamacher_generic(p=0.2)");
    }

    #[test]
    fn test_hamacher_particular_zero_zero() {
        assert_eq!(TNorm::HamacherParticular.combine(0.0, 0.0), 0.0);
        assert!(!TNorm::HamacherParticular.combine(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_tnorms_bounded_by_min() {
        let norms = [
            TNorm::Algebraic,
            TNorm::Einstein,
            TNorm::HamacherParticular,
            TNorm::HamacherGeneric { p: 0.5 },
        ];
        for t in norms {
            assert!((t.combine(1.0, 0.7) - 0.7).abs() < EPS, "{t} identity");
            assert_eq!(t.combine(0.0, 0.7), 0.0, "{t} annihilator");
            assert!(t.combine(0.4, 0.6) <= 0.4 + EPS, "{t} bounded");
        }
    }

    #[test]
    fn test_generic_p_one_is_algebraic() {
        let t = TNorm::HamacherGeneric { p: 1.0 };
        assert!((t.combine(0.3, 0.8) - 0.24).abs() < EPS);
    }

    #[test]
    fn test_invalid_band_rejected() {
        let criteria = Criteria {
            carbon: Criterion::new(10.0, 10.0, 1.0),
            cost: Criterion::new(0.0, 1.0, 1.0),
        };
        let alt = Alternative::new("x", 5.0, 0.5);
        assert!(matches!(evaluate(&alt, &criteria, TNorm::Algebraic), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_p_rejected() {
        let criteria = Criteria {
            carbon: Criterion::new(0.0, 10.0, 1.0),
            cost: Criterion::new(0.0, 1.0, 1.0),
        };
        let alt = Alternative::new("x", 5.0, 0.5);
        for p in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(evaluate(&alt, &criteria, TNorm::HamacherGeneric { p }).is_err(), "p = {p}");
        }
    }

    #[test]
    fn test_stage_scoring() {
        let table = crate::emissions::EmissionFactorTable::default();
        // 10 L diesel = 26.9, band [0, 53.8] → t2 = 0.5
        let stage = Node::normal("Boiler", "L (Diesel)", 10.0)
            .with_co2_bounds(0.0, 53.8)
            .with_investment(500.0, 0.0, 1000.0);
        let eval = evaluate_stage(&stage, &table, Weights { carbon: 1.0, cost: 1.0 }, TNorm::Algebraic).unwrap();
        assert!((eval.mu_carbon - 0.5).abs() < 1e-9);
        assert!((eval.mu_cost - 0.5).abs() < 1e-9);
        assert!((eval.score - 0.25).abs() < 1e-9);

        assert!(evaluate_stage(&Node::starter(), &table, Weights::default(), TNorm::Algebraic).is_err());
    }
}
