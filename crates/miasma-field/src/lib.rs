//! Influence fields for miasma.
//!
//! | Type | Role |
//! |------|------|
//! | [`FalloffTemplate`] | Immutable square weight stencil baked from a curve |
//! | [`TemplateCache`] | Every template a registry will need, baked once |
//! | [`InfluenceField`] | A grid of values plus the obstacle-aware flood-fill |
//! | [`CompositionBuffer`] | Scratch window for blending fields and picking a cell |
//!
//! Painting never crosses cells the [`ValidityMask`](miasma_space::ValidityMask)
//! marks as blocked, and never writes to them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod composition;
pub mod field;
pub mod template;

pub use composition::CompositionBuffer;
pub use field::InfluenceField;
pub use template::{FalloffTemplate, TemplateCache};
