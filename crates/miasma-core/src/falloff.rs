//! Radial falloff curves.
//!
//! A [`FalloffCurve`] maps a distance and a radius to a weight in `[0, 1]`.
//! Curves are used twice: to bake the per-cell weights of a falloff
//! template, and as the per-hop decay applied while a template is flood
//! filled across a field.

/// A named radial falloff shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FalloffCurve {
    /// `1 - d/r`, reaching zero exactly at the radius.
    Linear,
    /// `d/r`, zero at the centre and saturating at the radius.
    InverseLinear,
    /// `1 - (d/r)^5`: flat near the centre, steep near the radius.
    EaseInQuint,
    /// Gaussian ring peaking at half the radius, with sigma `r/4`.
    Attractor,
    /// Interest weighting: flat for the first fifth of the radius,
    /// then linear down to zero.
    Read,
}

impl FalloffCurve {
    /// Evaluate the curve at `distance` for the given `radius`.
    ///
    /// The result is always in `[0, 1]`. A non-positive radius is a point
    /// source: distance zero evaluates as `t = 0`, anything else as
    /// `t = ∞`.
    pub fn evaluate(self, distance: f32, radius: f32) -> f32 {
        let t = normalized(distance, radius);
        let w = match self {
            Self::Linear => 1.0 - t,
            Self::InverseLinear => t,
            Self::EaseInQuint => {
                if t >= 1.0 {
                    0.0
                } else {
                    1.0 - t.powi(5)
                }
            }
            Self::Attractor => {
                if radius <= 0.0 {
                    return if distance == 0.0 { 1.0 } else { 0.0 };
                }
                let sigma = radius * 0.25;
                let z = (distance - radius * 0.5) / sigma;
                (-0.5 * z * z).exp()
            }
            Self::Read => {
                if radius <= 0.0 {
                    1.0 - t
                } else {
                    let held = (distance - 0.2 * radius).max(0.0);
                    1.0 - held / radius
                }
            }
        };
        if w.is_nan() {
            0.0
        } else {
            w.clamp(0.0, 1.0)
        }
    }
}

fn normalized(distance: f32, radius: f32) -> f32 {
    if radius > 0.0 {
        distance / radius
    } else if distance == 0.0 {
        0.0
    } else {
        f32::INFINITY
    }
}
