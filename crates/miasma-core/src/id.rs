//! Strongly-typed identifiers: factions, influence categories and agents.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::falloff::FalloffCurve;

/// The side an agent fights for.
///
/// Every faction owns one influence field per [`Category`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Faction {
    /// The player's side.
    Player,
    /// The opposing side.
    Enemy,
}

impl Faction {
    /// Number of factions.
    pub const COUNT: usize = 2;

    /// All factions in declaration order.
    pub const ALL: [Faction; Self::COUNT] = [Faction::Player, Faction::Enemy];

    /// Dense index of this faction, in `0..COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// What an influence field measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Danger projected by an agent.
    Threat,
    /// Physical presence, split between the current and predicted cell.
    Location,
    /// A ring-shaped pull peaking halfway out from the agent.
    Attractor,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 3;

    /// All categories in declaration order.
    pub const ALL: [Category; Self::COUNT] =
        [Category::Threat, Category::Location, Category::Attractor];

    /// Dense index of this category, in `0..COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The curve this category is baked and propagated with.
    ///
    /// The mapping is fixed: it is used both to bake the category's
    /// templates and as the hop decay of the flood-fill.
    pub fn curve(self) -> FalloffCurve {
        match self {
            Self::Threat => FalloffCurve::Linear,
            Self::Location => FalloffCurve::Linear,
            Self::Attractor => FalloffCurve::Attractor,
        }
    }

    /// Whether imprints of this category are split between the current
    /// and the predicted future cell at half weight each.
    pub fn splits_presence(self) -> bool {
        matches!(self, Self::Location)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threat => write!(f, "threat"),
            Self::Location => write!(f, "location"),
            Self::Attractor => write!(f, "attractor"),
        }
    }
}

/// Counter for unique [`AgentId`] allocation.
static AGENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a registered agent.
///
/// Allocated from a monotonic atomic counter via [`AgentId::next`], so two
/// registrations never share an id even if they describe identical agents.
/// Deregistration matches on this identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(u64);

impl AgentId {
    /// Allocate a fresh, unique agent id. Thread-safe.
    pub fn next() -> Self {
        Self(AGENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense() {
        for (i, faction) in Faction::ALL.iter().enumerate() {
            assert_eq!(faction.index(), i);
        }
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn category_curve_mapping_is_fixed() {
        assert_eq!(Category::Threat.curve(), FalloffCurve::Linear);
        assert_eq!(Category::Location.curve(), FalloffCurve::Linear);
        assert_eq!(Category::Attractor.curve(), FalloffCurve::Attractor);
    }

    #[test]
    fn only_location_splits() {
        assert!(Category::Location.splits_presence());
        assert!(!Category::Threat.splits_presence());
        assert!(!Category::Attractor.splits_presence());
    }

    #[test]
    fn agent_ids_are_unique() {
        let a = AgentId::next();
        let b = AgentId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
