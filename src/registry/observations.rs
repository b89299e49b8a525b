//! # Observation Registry

use std::collections::HashMap;

use super::errors::{RegistryError, RegistryResult};
use crate::observation::{Observation, ObservationBatch};

/// Registered observation batches, in insertion order.
///
/// Keeps an index from row identifier to `(batch, row)` so lookups do not
/// scan every batch.
#[derive(Debug, Default)]
pub struct ObservationRegistry {
    batches: Vec<ObservationBatch>,
    by_row_id: HashMap<String, (usize, usize)>,
}

impl ObservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch, returning a reference to the stored entry
    pub fn register(&mut self, batch: ObservationBatch) -> RegistryResult<&ObservationBatch> {
        batch.validate().map_err(RegistryError::InvalidBatch)?;

        if let Some(id) = batch
            .row_ids()
            .iter()
            .find(|id| self.by_row_id.contains_key(id.as_str()))
        {
            return Err(RegistryError::DuplicateRowId(id.clone()));
        }

        let position = self.batches.len();
        for (row, id) in batch.row_ids().iter().enumerate() {
            self.by_row_id.insert(id.clone(), (position, row));
        }
        self.batches.push(batch);

        Ok(&self.batches[position])
    }

    pub fn lookup(&self, row_id: &str) -> Option<Observation<'_>> {
        let &(batch, row) = self.by_row_id.get(row_id)?;
        self.batches[batch].observation(row)
    }

    pub fn contains(&self, row_id: &str) -> bool {
        self.by_row_id.contains_key(row_id)
    }

    /// All batches in insertion order
    pub fn all(&self) -> &[ObservationBatch] {
        &self.batches
    }

    /// Every row of every batch, flattened in registration order
    pub fn observations(&self) -> impl Iterator<Item = Observation<'_>> {
        self.batches.iter().flat_map(ObservationBatch::observations)
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.observations().map(|o| o.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
