//! Imprint specifications: what an agent projects onto the fields.

use smallvec::SmallVec;

use crate::falloff::FalloffCurve;
use crate::id::Category;

/// One influence contribution carried by an agent.
///
/// `radius` selects the template tier; `peak` scales the template.
/// `falloff` is carried for consumers: templates are always baked with
/// [`Category::curve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImprintSpec {
    /// Field category this imprint paints into.
    pub category: Category,
    /// Template tier (radius in world units, rounded to cells on bake).
    pub radius: u32,
    /// Peak value painted at the agent's cell.
    pub peak: f32,
    /// Declared falloff shape.
    pub falloff: FalloffCurve,
}

impl ImprintSpec {
    /// An imprint using the category's own curve as its declared falloff.
    pub fn new(category: Category, radius: u32, peak: f32) -> Self {
        Self {
            category,
            radius,
            peak,
            falloff: category.curve(),
        }
    }

    /// Override the declared falloff.
    pub fn with_falloff(mut self, falloff: FalloffCurve) -> Self {
        self.falloff = falloff;
        self
    }
}

/// Per-agent imprint list. Agents rarely carry more than a few.
pub type ImprintList = SmallVec<[ImprintSpec; 4]>;
