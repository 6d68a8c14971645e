//! Test utilities and mock kinematics for miasma development.
//!
//! Provides small registry configurations, hand-built masks, and
//! [`Kinematics`] implementations that let tests stall or crash a
//! background repaint on demand.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use glam::Vec3;
use miasma_core::{Category, Faction};
use miasma_engine::{Kinematics, MapRegistry};

/// A static agent whose `position()` blocks while the gate is closed.
///
/// Close the gate after the agent has been registered to hold a
/// background repaint in flight; open it to let the worker finish.
pub struct GatedKinematics {
    position: Vec3,
    closed: AtomicBool,
}

impl GatedKinematics {
    pub fn new(position: Vec3) -> Arc<Self> {
        Arc::new(Self {
            position,
            closed: AtomicBool::new(false),
        })
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn open(&self) {
        self.closed.store(false, Ordering::Release);
    }
}

impl Kinematics for GatedKinematics {
    fn position(&self) -> Vec3 {
        while self.closed.load(Ordering::Acquire) {
            thread::yield_now();
        }
        self.position
    }
}

/// A static agent that panics once armed.
pub struct PanickingKinematics {
    position: Vec3,
    armed: AtomicBool,
    calls: AtomicUsize,
}

impl PanickingKinematics {
    pub fn new(position: Vec3) -> Arc<Self> {
        Arc::new(Self {
            position,
            armed: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Number of `position()` calls so far, including the one that panicked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Kinematics for PanickingKinematics {
    fn position(&self) -> Vec3 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.armed.load(Ordering::Acquire) {
            panic!("kinematics armed to panic");
        }
        self.position
    }
}

/// Copy of one field's values.
pub fn field_values(registry: &MapRegistry, faction: Faction, category: Category) -> Vec<f32> {
    registry.with_field(faction, category, |f| f.values().to_vec())
}

/// Assert every (faction, category) field of `a` and `b` matches within `tol`.
pub fn assert_registries_match(a: &MapRegistry, b: &MapRegistry, tol: f32) {
    for faction in Faction::ALL {
        for category in Category::ALL {
            let va = field_values(a, faction, category);
            let vb = field_values(b, faction, category);
            assert_eq!(va.len(), vb.len(), "{faction}/{category}: length");
            for (i, (x, y)) in va.iter().zip(&vb).enumerate() {
                assert!(
                    (x - y).abs() <= tol,
                    "{faction}/{category} cell {i}: {x} vs {y}"
                );
            }
        }
    }
}

/// Sum of absolute values over every field.
pub fn total_influence(registry: &MapRegistry) -> f32 {
    let mut total = 0.0;
    for faction in Faction::ALL {
        for category in Category::ALL {
            total += registry.with_field(faction, category, |f| {
                f.values().iter().map(|v| v.abs()).sum::<f32>()
            });
        }
    }
    total
}
