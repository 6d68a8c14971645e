//! Falloff templates and the per-registry template cache.

use glam::IVec2;
use miasma_core::{Category, FalloffCurve};

/// A square, odd-sized stencil of weights centred on its middle cell.
///
/// The curve it was baked with is kept and reused as the hop decay when
/// the template is flood-filled onto a field.
#[derive(Clone, Debug, PartialEq)]
pub struct FalloffTemplate {
    dimension: i32,
    center: i32,
    values: Vec<f32>,
    curve: FalloffCurve,
}

impl FalloffTemplate {
    /// Bake `curve` for a world-space `radius` on cells of `cell_size`.
    ///
    /// The template spans `round(radius / cell_size)` cells either side of
    /// the centre; each weight is the curve at the Euclidean distance of the
    /// cell centre, in world units.
    pub fn bake(curve: FalloffCurve, radius: u32, cell_size: f32) -> Self {
        let r = radius as f32;
        let discretized = (r / cell_size).round().max(0.0) as i32;
        Self::from_fn(discretized, curve, |offset| {
            let distance = offset.as_vec2().length() * cell_size;
            curve.evaluate(distance, r)
        })
    }

    /// A template of `radius` cells either side with every weight equal.
    pub fn uniform(radius: u32, weight: f32, curve: FalloffCurve) -> Self {
        Self::from_fn(radius as i32, curve, |_| weight)
    }

    fn from_fn(radius: i32, curve: FalloffCurve, mut f: impl FnMut(IVec2) -> f32) -> Self {
        let dimension = 2 * radius + 1;
        let mut values = Vec::with_capacity((dimension * dimension) as usize);
        for y in 0..dimension {
            for x in 0..dimension {
                values.push(f(IVec2::new(x - radius, y - radius)));
            }
        }
        Self {
            dimension,
            center: radius,
            values,
            curve,
        }
    }

    /// Side length in cells (always odd).
    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    /// Index of the centre cell along either axis; also the radius in cells.
    pub fn center(&self) -> i32 {
        self.center
    }

    /// The curve the template was baked with.
    pub fn curve(&self) -> FalloffCurve {
        self.curve
    }

    /// Row-major weights.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Weight at template coordinate `t`, `0.0` outside the stencil.
    pub fn weight(&self, t: IVec2) -> f32 {
        if t.x < 0 || t.y < 0 || t.x >= self.dimension || t.y >= self.dimension {
            return 0.0;
        }
        self.values[(t.y * self.dimension + t.x) as usize]
    }

    /// Weight of the centre cell.
    pub fn centre_weight(&self) -> f32 {
        self.weight(IVec2::splat(self.center))
    }
}

/// All templates a registry needs, baked up front.
///
/// One template per (category, tier) for painting, plus one
/// [`FalloffCurve::Read`] template per tier for interest weighting during
/// best-cell search. Lookups clamp the tier to `max_tier - 1`.
#[derive(Clone, Debug)]
pub struct TemplateCache {
    max_tier: u32,
    cell_size: f32,
    imprints: Vec<FalloffTemplate>,
    interest: Vec<FalloffTemplate>,
}

impl TemplateCache {
    /// Bake tiers `0..max_tier` for every category. A zero `max_tier` is
    /// treated as one.
    pub fn new(max_tier: u32, cell_size: f32) -> Self {
        let max_tier = max_tier.max(1);
        let imprints = Category::ALL
            .iter()
            .flat_map(|category| {
                (0..max_tier).map(move |tier| FalloffTemplate::bake(category.curve(), tier, cell_size))
            })
            .collect();
        let interest = (0..max_tier)
            .map(|tier| FalloffTemplate::bake(FalloffCurve::Read, tier, cell_size))
            .collect();
        Self {
            max_tier,
            cell_size,
            imprints,
            interest,
        }
    }

    /// Number of tiers per category.
    pub fn max_tier(&self) -> u32 {
        self.max_tier
    }

    /// Cell size the templates were baked for.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The tier actually used for a requested radius.
    pub fn clamp_tier(&self, radius: u32) -> u32 {
        radius.min(self.max_tier - 1)
    }

    /// Paint template for `category` at `radius` (clamped).
    pub fn imprint(&self, category: Category, radius: u32) -> &FalloffTemplate {
        let tier = self.clamp_tier(radius) as usize;
        &self.imprints[category.index() * self.max_tier as usize + tier]
    }

    /// Interest template at `radius` (clamped).
    pub fn interest(&self, radius: u32) -> &FalloffTemplate {
        &self.interest[self.clamp_tier(radius) as usize]
    }
}
