//! The map registry: agents in, influence fields out.
//!
//! # Tick model
//!
//! [`MapRegistry::update`] runs once per host tick:
//!
//! 1. Collect a finished background repaint.
//! 2. Apply pending registrations, unless a repaint is still in flight.
//! 3. Advance the repaint timer; once it exceeds the configured interval
//!    and no repaint is in flight, start one.
//!
//! Registration changes and repaints therefore never overlap: the agent
//! table is only mutated while no worker holds a snapshot of it.
//!
//! # Background repaint
//!
//! In [`UpdateMode::Background`] the repaint job and a clone of the field
//! store move into a spawned thread. Each field mutation holds only that
//! field's lock, so readers may observe one field freshly repainted and
//! another not yet. The worker streams each agent's new coordinates over a
//! channel as soon as that agent is repainted, then its stats once done.
//! If the worker panics, every coordinate it sent is still committed, so
//! the agent table keeps matching what actually reached the fields.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use glam::{IVec2, Vec3};
use indexmap::IndexMap;
use miasma_core::{AgentId, Category, Faction};
use miasma_field::{CompositionBuffer, InfluenceField, TemplateCache};
use miasma_space::{GridError, GridGeometry, ValidityMask, Walkability};
use tracing::{debug, error, info, warn};

use crate::agent::{AgentRecord, AgentSpec};
use crate::composition::Composition;
use crate::config::{ConfigError, RegistryConfig, UpdateMode};
use crate::repaint::{RepaintCommit, RepaintEvent, RepaintJob, RepaintStats};
use crate::store::{slot, FieldStore};

/// Whether a repaint is currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryPhase {
    /// No repaint in flight; registrations may be applied.
    Idle,
    /// A background repaint has been started and not yet collected.
    RepaintInFlight,
}

/// Agents added and removed by one
/// [`apply_pending_registrations`](MapRegistry::apply_pending_registrations).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistrationCounts {
    /// Agents that became active.
    pub added: usize,
    /// Agents that were removed and erased.
    pub removed: usize,
}

struct InFlight {
    handle: JoinHandle<()>,
    events: Receiver<RepaintEvent>,
}

fn apply_commit(agents: &mut IndexMap<AgentId, AgentRecord>, commit: RepaintCommit) {
    if let Some(record) = agents.get_mut(&commit.id) {
        record.location = commit.location;
        record.future = commit.future;
    }
}

/// Owns every influence field and the agents painting into them.
pub struct MapRegistry {
    config: RegistryConfig,
    geometry: GridGeometry,
    mask: ValidityMask,
    pub(crate) templates: Arc<TemplateCache>,
    pub(crate) fields: FieldStore,
    pub(crate) agents: IndexMap<AgentId, AgentRecord>,
    pending_add: Vec<(AgentId, AgentSpec)>,
    pending_remove: Vec<AgentId>,
    timer: Duration,
    in_flight: Option<InFlight>,
    last_repaint: Option<RepaintStats>,
    pub(crate) buffer: CompositionBuffer,
}

impl MapRegistry {
    /// Build a registry over `mask`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation or the mask
    /// was built for a different grid.
    pub fn new(config: RegistryConfig, mask: ValidityMask) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = config.geometry()?;
        if !mask.matches(&geometry) {
            return Err(GridError::MaskSizeMismatch {
                expected: geometry.cell_count(),
                actual: mask.len(),
            }
            .into());
        }
        let templates = Arc::new(TemplateCache::new(
            config.max_template_tier,
            config.cell_size,
        ));
        info!(
            grid = ?geometry.grid_size(),
            walkable = mask.count_valid(),
            tiers = templates.max_tier(),
            mode = ?config.update_mode,
            "influence map registry created"
        );
        Ok(Self {
            fields: FieldStore::new(&geometry, &mask),
            buffer: CompositionBuffer::new(&geometry, mask.clone(), config.seed),
            templates,
            geometry,
            mask,
            config,
            agents: IndexMap::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            timer: Duration::ZERO,
            in_flight: None,
            last_repaint: None,
        })
    }

    /// Build a registry, sampling `walkability` at every cell centre.
    pub fn with_walkability(
        config: RegistryConfig,
        walkability: &impl Walkability,
    ) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let mask = ValidityMask::from_walkability(&geometry, walkability);
        Self::new(config, mask)
    }

    // ── Registration ───────────────────────────────────────────

    /// Queue an agent for addition on the next applied tick.
    pub fn register(&mut self, agent: AgentSpec) -> AgentId {
        let id = AgentId::next();
        self.pending_add.push((id, agent));
        id
    }

    /// Queue an agent for removal on the next applied tick.
    ///
    /// Unknown ids are ignored when the queue is applied.
    pub fn deregister(&mut self, id: AgentId) {
        self.pending_remove.push(id);
    }

    /// Apply queued removals, then queued additions.
    ///
    /// Does nothing while a repaint is in flight. Removed agents have
    /// their imprints erased at their committed cells; added agents are
    /// painted at the cell of their live position.
    pub fn apply_pending_registrations(&mut self) -> RegistrationCounts {
        let mut counts = RegistrationCounts::default();
        if self.in_flight.is_some() {
            return counts;
        }

        let removals = std::mem::take(&mut self.pending_remove);
        let mut additions = std::mem::take(&mut self.pending_add);
        let templates = Arc::clone(&self.templates);
        let geometry = self.geometry;

        let mut removed = Vec::new();
        for id in removals {
            match self.agents.shift_remove(&id) {
                Some(record) => removed.push(record),
                // Registered and deregistered before ever being applied.
                None => additions.retain(|(pending, _)| *pending != id),
            }
        }

        let added: Vec<AgentRecord> = additions
            .into_iter()
            .map(|(id, spec)| {
                let location = geometry.coordinate_of(spec.kinematics.position());
                AgentRecord {
                    id,
                    spec,
                    location,
                    future: location,
                }
            })
            .collect();

        self.fields.with_access(|fields| {
            for record in &removed {
                for imprint in &record.spec.imprints {
                    fields.with_field(slot(record.spec.faction, imprint.category), |field| {
                        field.paint_imprint(&templates, imprint, record.location, record.future, -1.0)
                    });
                }
            }
            for record in &added {
                for imprint in &record.spec.imprints {
                    fields.with_field(slot(record.spec.faction, imprint.category), |field| {
                        field.paint_imprint(&templates, imprint, record.location, record.future, 1.0)
                    });
                }
            }
        });

        counts.removed = removed.len();
        counts.added = added.len();
        for record in added {
            self.agents.insert(record.id, record);
        }
        if counts.added + counts.removed > 0 {
            debug!(
                added = counts.added,
                removed = counts.removed,
                active = self.agents.len(),
                "registrations applied"
            );
        }
        counts
    }

    // ── Repaint ────────────────────────────────────────────────

    /// Advance the registry by one host tick of length `dt`.
    pub fn update(&mut self, dt: Duration) -> RegistryPhase {
        self.poll_repaint();
        self.apply_pending_registrations();
        self.timer += dt;
        if self.timer > self.config.repaint_interval && self.in_flight.is_none() {
            self.repaint();
        }
        self.phase()
    }

    /// Start a repaint now, unless one is already in flight.
    ///
    /// Inline mode completes before returning; background mode returns as
    /// soon as the worker is spawned.
    pub fn repaint(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        match self.config.update_mode {
            UpdateMode::Inline => self.repaint_inline(),
            UpdateMode::Background => self.repaint_background(),
        }
    }

    fn snapshot(&self) -> RepaintJob {
        RepaintJob {
            agents: self.agents.values().cloned().collect(),
            geometry: self.geometry,
            templates: Arc::clone(&self.templates),
        }
    }

    fn repaint_inline(&mut self) {
        let job = self.snapshot();
        let agents = &mut self.agents;
        let stats = self
            .fields
            .with_access(|fields| job.run(fields, |c| apply_commit(agents, c)));
        self.record(stats);
    }

    fn repaint_background(&mut self) {
        let job = self.snapshot();
        let store = self.fields.clone();
        let (tx, rx) = crossbeam_channel::unbounded();
        let spawned = thread::Builder::new()
            .name("miasma-repaint".into())
            .spawn(move || {
                let mut stats = job.run(&mut store.locked(), |c| {
                    let _ = tx.send(RepaintEvent::Moved(c));
                });
                stats.background = true;
                let _ = tx.send(RepaintEvent::Finished(stats));
            });
        match spawned {
            Ok(handle) => {
                self.in_flight = Some(InFlight { handle, events: rx });
            }
            Err(e) => {
                let err = ConfigError::ThreadSpawnFailed {
                    reason: e.to_string(),
                };
                warn!(%err, "repainting inline instead");
                self.repaint_inline();
            }
        }
    }

    /// Commit whatever the worker has reported so far, collecting it if it
    /// is done. Never blocks.
    fn poll_repaint(&mut self) {
        loop {
            let Some(in_flight) = &self.in_flight else {
                return;
            };
            match in_flight.events.try_recv() {
                Ok(RepaintEvent::Moved(c)) => apply_commit(&mut self.agents, c),
                Ok(RepaintEvent::Finished(stats)) => return self.finish(Some(stats)),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => return self.finish(None),
            }
        }
    }

    /// Block until an in-flight background repaint has been collected.
    ///
    /// Returns the stats of the collected repaint, or `None` if nothing
    /// was in flight or the worker panicked.
    pub fn wait_for_repaint(&mut self) -> Option<RepaintStats> {
        loop {
            let in_flight = self.in_flight.as_ref()?;
            match in_flight.events.recv() {
                Ok(RepaintEvent::Moved(c)) => apply_commit(&mut self.agents, c),
                Ok(RepaintEvent::Finished(stats)) => {
                    self.finish(Some(stats));
                    return self.last_repaint.clone();
                }
                Err(_) => {
                    self.finish(None);
                    return None;
                }
            }
        }
    }

    fn finish(&mut self, stats: Option<RepaintStats>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        if in_flight.handle.join().is_err() {
            error!("background repaint worker panicked; agents it had not reached keep their cells");
        }
        match stats {
            Some(stats) => self.record(stats),
            None => self.timer = Duration::ZERO,
        }
    }

    fn record(&mut self, stats: RepaintStats) {
        debug!(
            visited = stats.agents_visited,
            moved = stats.agents_moved,
            paints = stats.paints,
            elapsed_us = stats.duration.as_micros() as u64,
            background = stats.background,
            "repaint complete"
        );
        self.timer = Duration::ZERO;
        self.last_repaint = Some(stats);
    }

    /// Drop every agent and pending request and zero every field.
    ///
    /// Waits for an in-flight repaint first.
    pub fn reset(&mut self) {
        self.wait_for_repaint();
        self.agents.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
        self.fields.with_access(|fields| fields.clear_all());
        self.timer = Duration::ZERO;
        self.last_repaint = None;
    }

    // ── Queries ────────────────────────────────────────────────

    /// Value of `(faction, category)` at `position`; `0.0` off the grid.
    pub fn value_at(&self, position: Vec3, faction: Faction, category: Category) -> f32 {
        self.fields
            .get(faction, category)
            .lock()
            .value_at_position(position)
    }

    /// Run `f` with read access to one field, under its lock.
    pub fn with_field<R>(
        &self,
        faction: Faction,
        category: Category,
        f: impl FnOnce(&InfluenceField) -> R,
    ) -> R {
        let field = self.fields.get(faction, category).lock();
        f(&*field)
    }

    /// Start a composition query anchored at `position` with a square
    /// window of `2 * radius + 1` cells.
    pub fn composition(&mut self, position: Vec3, radius: u32) -> Composition<'_> {
        self.buffer.reinit(position, radius);
        Composition::new(self, radius)
    }

    /// Current phase.
    pub fn phase(&self) -> RegistryPhase {
        if self.in_flight.is_some() {
            RegistryPhase::RepaintInFlight
        } else {
            RegistryPhase::Idle
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// World grid geometry.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The walkability mask.
    pub fn mask(&self) -> &ValidityMask {
        &self.mask
    }

    /// Baked templates.
    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    /// Number of active agents.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of queued registrations and deregistrations.
    pub fn pending_count(&self) -> usize {
        self.pending_add.len() + self.pending_remove.len()
    }

    /// Committed grid cell of an active agent.
    pub fn agent_location(&self, id: AgentId) -> Option<IVec2> {
        self.agents.get(&id).map(|r| r.location)
    }

    /// Stats of the most recently collected repaint.
    pub fn last_repaint(&self) -> Option<&RepaintStats> {
        self.last_repaint.as_ref()
    }
}

impl Drop for MapRegistry {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            let _ = in_flight.handle.join();
        }
    }
}
