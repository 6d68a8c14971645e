//! Agents: what the host registers, and what the registry remembers.

use std::fmt;
use std::sync::Arc;

use glam::{IVec2, Vec3};
use miasma_core::{AgentId, Faction, ImprintList, ImprintSpec};
use parking_lot::Mutex;

/// Live motion state of an agent, supplied by the host.
///
/// Read from the repaint worker when background repaint is enabled, hence
/// `Send + Sync`.
pub trait Kinematics: Send + Sync {
    /// Current world position.
    fn position(&self) -> Vec3;

    /// Current velocity in world units per repaint, or `None` for a static
    /// agent. Dynamic agents also imprint at their predicted next cell.
    fn velocity(&self) -> Option<Vec3> {
        None
    }
}

/// A lock-protected position/velocity pair the host can write into.
#[derive(Debug, Default)]
pub struct SharedKinematics {
    state: Mutex<(Vec3, Option<Vec3>)>,
}

impl SharedKinematics {
    /// A static agent at `position`.
    pub fn fixed(position: Vec3) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new((position, None)),
        })
    }

    /// A moving agent at `position` with `velocity`.
    pub fn moving(position: Vec3, velocity: Vec3) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new((position, Some(velocity))),
        })
    }

    /// Teleport to `position`.
    pub fn set_position(&self, position: Vec3) {
        self.state.lock().0 = position;
    }

    /// Change velocity; `None` makes the agent static.
    pub fn set_velocity(&self, velocity: Option<Vec3>) {
        self.state.lock().1 = velocity;
    }
}

impl Kinematics for SharedKinematics {
    fn position(&self) -> Vec3 {
        self.state.lock().0
    }

    fn velocity(&self) -> Option<Vec3> {
        self.state.lock().1
    }
}

/// Registration request: faction, imprints and a kinematics handle.
#[derive(Clone)]
pub struct AgentSpec {
    /// Side the agent's imprints are painted for.
    pub faction: Faction,
    /// Contributions painted into the faction's fields.
    pub imprints: ImprintList,
    /// Live position/velocity source.
    pub kinematics: Arc<dyn Kinematics>,
}

impl AgentSpec {
    /// An agent with no imprints yet.
    pub fn new(faction: Faction, kinematics: Arc<dyn Kinematics>) -> Self {
        Self {
            faction,
            imprints: ImprintList::new(),
            kinematics,
        }
    }

    /// Add an imprint.
    pub fn with_imprint(mut self, imprint: ImprintSpec) -> Self {
        self.imprints.push(imprint);
        self
    }
}

impl fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSpec")
            .field("faction", &self.faction)
            .field("imprints", &self.imprints)
            .field("position", &self.kinematics.position())
            .finish()
    }
}

/// An active agent with the coordinates its imprints are painted at.
#[derive(Clone)]
pub(crate) struct AgentRecord {
    pub id: AgentId,
    pub spec: AgentSpec,
    /// Committed current cell.
    pub location: IVec2,
    /// Committed predicted cell.
    pub future: IVec2,
}
