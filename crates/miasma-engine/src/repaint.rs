//! Incremental repaint: move every agent's imprints to where it is now.
//!
//! A repaint job is a snapshot of the agent table. Running it erases
//! each moved agent's imprints at its committed cells and repaints them at
//! its live cells. Each agent's new coordinates are handed to a commit
//! sink as soon as that agent is repainted, so a job that dies partway
//! still reports exactly the agents whose paint reached the fields. The
//! same code runs inline on the caller's thread or on a spawned worker;
//! only the way fields are reached differs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::IVec2;
use miasma_core::AgentId;
use miasma_field::TemplateCache;
use miasma_space::GridGeometry;
use tracing::trace;

use crate::agent::AgentRecord;
use crate::store::{slot, FieldAccess};

/// Counters from one completed repaint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepaintStats {
    /// Agents examined.
    pub agents_visited: usize,
    /// Agents whose cell changed and were repainted.
    pub agents_moved: usize,
    /// Flood-fill passes issued (erase and paint both count).
    pub paints: usize,
    /// Wall-clock time spent painting.
    pub duration: Duration,
    /// Whether the repaint ran on a worker thread.
    pub background: bool,
}

/// New committed coordinates for one moved agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RepaintCommit {
    pub id: AgentId,
    pub location: IVec2,
    pub future: IVec2,
}

/// What a background worker reports back to the registry.
#[derive(Debug)]
pub(crate) enum RepaintEvent {
    /// One agent was repainted.
    Moved(RepaintCommit),
    /// The job ran to completion.
    Finished(RepaintStats),
}

pub(crate) struct RepaintJob {
    pub agents: Vec<AgentRecord>,
    pub geometry: GridGeometry,
    pub templates: Arc<TemplateCache>,
}

impl RepaintJob {
    pub fn run(
        &self,
        fields: &mut FieldAccess<'_>,
        mut commit: impl FnMut(RepaintCommit),
    ) -> RepaintStats {
        let start = Instant::now();
        let mut stats = RepaintStats {
            agents_visited: self.agents.len(),
            ..Default::default()
        };

        for agent in &self.agents {
            let position = agent.spec.kinematics.position();
            let current = self.geometry.coordinate_of(position);
            if current == agent.location {
                continue;
            }
            let future = match agent.spec.kinematics.velocity() {
                Some(velocity) => self.geometry.clamp(self.geometry.coordinate_of(position + velocity)),
                None => current,
            };
            for imprint in &agent.spec.imprints {
                let s = slot(agent.spec.faction, imprint.category);
                stats.paints += fields.with_field(s, |field| {
                    field.paint_imprint(&self.templates, imprint, agent.location, agent.future, -1.0)
                        + field.paint_imprint(&self.templates, imprint, current, future, 1.0)
                });
            }
            trace!(agent = %agent.id, from = ?agent.location, to = ?current, "agent moved");
            stats.agents_moved += 1;
            commit(RepaintCommit {
                id: agent.id,
                location: current,
                future,
            });
        }

        stats.duration = start.elapsed();
        stats
    }
}
