//! Per-(faction, category) field storage with one lock per field.
//!
//! The store is shared with at most one background repaint worker. While
//! no worker holds a clone, the registry reaches the fields through
//! [`Arc::get_mut`] and never touches a lock on the write path.

use std::sync::Arc;

use miasma_core::{Category, Faction};
use miasma_field::InfluenceField;
use miasma_space::{GridGeometry, ValidityMask};
use parking_lot::Mutex;

pub(crate) const FIELD_COUNT: usize = Faction::COUNT * Category::COUNT;

/// Dense slot of the field for `(faction, category)`.
pub(crate) fn slot(faction: Faction, category: Category) -> usize {
    faction.index() * Category::COUNT + category.index()
}

#[derive(Clone)]
pub(crate) struct FieldStore {
    fields: Arc<[Mutex<InfluenceField>]>,
}

impl FieldStore {
    pub fn new(geometry: &GridGeometry, mask: &ValidityMask) -> Self {
        let fields: Vec<_> = (0..FIELD_COUNT)
            .map(|_| Mutex::new(InfluenceField::whole(geometry, mask.clone())))
            .collect();
        Self {
            fields: fields.into(),
        }
    }

    /// The lock for one field. Readers always go through here.
    pub fn get(&self, faction: Faction, category: Category) -> &Mutex<InfluenceField> {
        &self.fields[slot(faction, category)]
    }

    /// Run `f` with write access, exclusive when the store is unshared.
    pub fn with_access<R>(&mut self, f: impl FnOnce(&mut FieldAccess<'_>) -> R) -> R {
        match Arc::get_mut(&mut self.fields) {
            Some(fields) => f(&mut FieldAccess::Exclusive(fields)),
            None => f(&mut FieldAccess::Locked(&self.fields)),
        }
    }

    /// Write access that locks each field per mutation.
    pub fn locked(&self) -> FieldAccess<'_> {
        FieldAccess::Locked(&self.fields)
    }
}

/// How a writer reaches the fields.
pub(crate) enum FieldAccess<'a> {
    /// Sole owner: plain `&mut`, no locking.
    Exclusive(&'a mut [Mutex<InfluenceField>]),
    /// Shared with another thread: each mutation holds that field's lock.
    Locked(&'a [Mutex<InfluenceField>]),
}

impl FieldAccess<'_> {
    pub fn with_field<R>(&mut self, slot: usize, f: impl FnOnce(&mut InfluenceField) -> R) -> R {
        match self {
            Self::Exclusive(fields) => f(fields[slot].get_mut()),
            Self::Locked(fields) => f(&mut *fields[slot].lock()),
        }
    }

    pub fn clear_all(&mut self) {
        for s in 0..FIELD_COUNT {
            self.with_field(s, |field| field.clear());
        }
    }
}
