//! Node in the process flow: one production/energy stage, or one of the
//! two fixed markers (`starter`, `end`).

use serde::{Deserialize, Serialize};

/// Name of the fixed start marker.
pub const STARTER: &str = "starter";
/// Name of the fixed end marker.
pub const END: &str = "end";

/// Which fixed marker a special node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRole {
    Starter,
    End,
}

impl SpecialRole {
    /// The reserved node name for this marker.
    pub fn name(self) -> &'static str {
        match self {
            SpecialRole::Starter => STARTER,
            SpecialRole::End => END,
        }
    }

    /// Role reserved for `name`, if any.
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            STARTER => Some(SpecialRole::Starter),
            END => Some(SpecialRole::End),
            _ => None,
        }
    }
}

/// Role of a node in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Special(SpecialRole),
    Normal,
}

/// An acceptability band `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A band is usable for scoring only when `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }
}

/// A stage in the process flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub role: NodeRole,
    /// Key into the emission factor table. Ignored for special nodes.
    pub energy_type: String,
    /// Energy/fuel consumed at this stage. Ignored for special nodes.
    pub quantity: f64,
    /// Acceptable CO2 band for fuzzy scoring.
    pub co2: Bounds,
    /// Acceptable investment band for fuzzy scoring.
    pub investment_bounds: Bounds,
    /// Actual investment for this stage.
    pub investment: f64,
    pub description: String,
}

impl Node {
    /// A normal stage consuming `quantity` units of `energy_type`.
    pub fn normal(name: impl Into<String>, energy_type: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Normal,
            energy_type: energy_type.into(),
            quantity,
            co2: Bounds::default(),
            investment_bounds: Bounds::default(),
            investment: 0.0,
            description: String::new(),
        }
    }

    /// One of the two fixed markers.
    pub fn special(role: SpecialRole) -> Self {
        Self {
            name: role.name().to_string(),
            role: NodeRole::Special(role),
            energy_type: "N/A".to_string(),
            quantity: 0.0,
            co2: Bounds::default(),
            investment_bounds: Bounds::default(),
            investment: 0.0,
            description: String::new(),
        }
    }

    pub fn starter() -> Self {
        Self::special(SpecialRole::Starter)
    }

    pub fn end() -> Self {
        Self::special(SpecialRole::End)
    }

    pub fn with_co2_bounds(mut self, min: f64, max: f64) -> Self {
        self.co2 = Bounds::new(min, max);
        self
    }

    pub fn with_investment(mut self, investment: f64, min: f64, max: f64) -> Self {
        self.investment = investment;
        self.investment_bounds = Bounds::new(min, max);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_special(&self) -> bool {
        matches!(self.role, NodeRole::Special(_))
    }

    pub fn special_role(&self) -> Option<SpecialRole> {
        match self.role {
            NodeRole::Special(role) => Some(role),
            NodeRole::Normal => None,
        }
    }
}
