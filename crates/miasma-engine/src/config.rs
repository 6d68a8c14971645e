//! Registry configuration, validation, and error types.
//!
//! [`RegistryConfig`] is the builder-input for a
//! [`MapRegistry`](crate::MapRegistry). [`validate()`](RegistryConfig::validate)
//! checks structural invariants before anything is allocated.

use std::time::Duration;

use glam::Vec2;
use miasma_space::{GridError, GridGeometry};

// ── UpdateMode ─────────────────────────────────────────────────────

/// Where repaint work runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Repaint synchronously inside [`update`](crate::MapRegistry::update).
    #[default]
    Inline,
    /// Repaint on a spawned worker thread; results are collected on a
    /// later `update`.
    Background,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`RegistryConfig`] or building a
/// registry from it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Grid geometry or mask is invalid.
    #[error("grid: {0}")]
    Grid(#[from] GridError),
    /// The repaint interval is zero.
    #[error("repaint_interval must be non-zero")]
    InvalidRepaintInterval,
    /// No template tiers were requested.
    #[error("max_template_tier must be at least 1, got {value}")]
    InvalidTemplateTier {
        /// The rejected value.
        value: u32,
    },
    /// A background repaint thread could not be spawned.
    #[error("thread spawn failed: {reason}")]
    ThreadSpawnFailed {
        /// Description from the OS.
        reason: String,
    },
}

// ── RegistryConfig ─────────────────────────────────────────────────

/// Complete configuration for a [`MapRegistry`](crate::MapRegistry).
#[derive(Clone, Debug, PartialEq)]
pub struct RegistryConfig {
    /// Edge length of one grid cell in world units. Default: 1.0.
    pub cell_size: f32,
    /// Lower corner of the world on the x/z plane. Default: (-32, -32).
    pub world_min: Vec2,
    /// Upper corner of the world on the x/z plane. Default: (32, 32).
    pub world_max: Vec2,
    /// Minimum time between repaints. Default: 100 ms.
    pub repaint_interval: Duration,
    /// Number of template tiers baked per category. Imprint radii at or
    /// above this are clamped. Default: 10.
    pub max_template_tier: u32,
    /// Inline or background repaint. Default: inline.
    pub update_mode: UpdateMode,
    /// Seed for the best-cell search order.
    pub seed: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            world_min: Vec2::splat(-32.0),
            world_max: Vec2::splat(32.0),
            repaint_interval: Duration::from_millis(100),
            max_template_tier: 10,
            update_mode: UpdateMode::Inline,
            seed: 0,
        }
    }
}

impl RegistryConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry()?;
        if self.repaint_interval.is_zero() {
            return Err(ConfigError::InvalidRepaintInterval);
        }
        if self.max_template_tier == 0 {
            return Err(ConfigError::InvalidTemplateTier {
                value: self.max_template_tier,
            });
        }
        Ok(())
    }

    /// The grid geometry these settings describe.
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        Ok(GridGeometry::new(
            self.cell_size,
            self.world_min,
            self.world_max,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RegistryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.geometry().unwrap().grid_size(), glam::IVec2::splat(65));
    }

    #[test]
    fn rejects_bad_cell_size() {
        let config = RegistryConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Grid(GridError::InvalidCellSize { value: 0.0 }))
        );
    }

    #[test]
    fn rejects_inverted_world() {
        let config = RegistryConfig {
            world_min: Vec2::splat(4.0),
            world_max: Vec2::splat(-4.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Grid(GridError::EmptyWorld { .. }))
        ));
    }

    #[test]
    fn rejects_zero_interval_and_tiers() {
        let config = RegistryConfig {
            repaint_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRepaintInterval));

        let config = RegistryConfig {
            max_template_tier: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTemplateTier { value: 0 })
        );
    }

    #[test]
    fn errors_display() {
        let err = ConfigError::ThreadSpawnFailed {
            reason: "out of threads".into(),
        };
        assert_eq!(err.to_string(), "thread spawn failed: out of threads");
    }
}
