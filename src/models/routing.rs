//! Routing table (MBOM).
//!
//! Maps `(product_type, stage)` to the machines able to perform that stage
//! and their processing times. The relation is many-to-many: several
//! machines may serve one stage, with different durations.
//!
//! # Stage Order
//! Stages of a product are ordered with [`compare_ids`], so `"10"` follows
//! `"9"`. The first stage in that order is where an unstarted order begins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ident::{compare_ids, Time};

/// One MBOM row as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingEntry {
    /// Product type key.
    pub product_type: String,
    /// Stage key within the product type.
    pub stage: String,
    /// Machine able to perform the stage.
    pub machine_id: String,
    /// Processing time on that machine (s).
    #[serde(alias = "process_time(s)")]
    pub process_time: Time,
}

impl RoutingEntry {
    pub fn new(
        product_type: impl Into<String>,
        stage: impl Into<String>,
        machine_id: impl Into<String>,
        process_time: Time,
    ) -> Self {
        Self {
            product_type: product_type.into(),
            stage: stage.into(),
            machine_id: machine_id.into(),
            process_time,
        }
    }
}

/// A machine alternative for one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineOption {
    pub machine_id: String,
    pub process_time: Time,
}

/// All machine alternatives of one stage, sorted by machine id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRoute {
    pub stage: String,
    pub options: Vec<MachineOption>,
}

/// Where an order goes after a given stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextStage<'a> {
    /// The following stage in routing order.
    Stage(&'a StageRoute),
    /// The given stage was the last one.
    Complete,
}

/// Routing table grouped by product type and stage.
///
/// (De)serialises as a flat list of MBOM rows, so a deserialised table
/// goes through [`RoutingTable::insert`] and keeps its ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RoutingEntry>", into = "Vec<RoutingEntry>")]
pub struct RoutingTable {
    products: BTreeMap<String, Vec<StageRoute>>,
}

impl RoutingTable {
    /// Creates an empty routing table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups MBOM rows by product type and stage.
    ///
    /// Duplicate `(product_type, stage, machine_id)` rows collapse to the
    /// shortest processing time.
    pub fn from_entries(entries: &[RoutingEntry]) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Adds one MBOM row.
    pub fn insert(&mut self, entry: &RoutingEntry) {
        let stages = self.products.entry(entry.product_type.clone()).or_default();

        let stage_idx = match stages.binary_search_by(|s| compare_ids(&s.stage, &entry.stage)) {
            Ok(idx) => idx,
            Err(idx) => {
                stages.insert(
                    idx,
                    StageRoute {
                        stage: entry.stage.clone(),
                        options: Vec::new(),
                    },
                );
                idx
            }
        };

        let options = &mut stages[stage_idx].options;
        match options.binary_search_by(|o| compare_ids(&o.machine_id, &entry.machine_id)) {
            Ok(idx) => {
                let existing = &mut options[idx];
                existing.process_time = existing.process_time.min(entry.process_time);
            }
            Err(idx) => options.insert(
                idx,
                MachineOption {
                    machine_id: entry.machine_id.clone(),
                    process_time: entry.process_time,
                },
            ),
        }
    }

    /// Whether the product type has any routing rows.
    pub fn has_product(&self, product_type: &str) -> bool {
        self.products.contains_key(product_type)
    }

    /// Stages of a product type in routing order.
    pub fn stages(&self, product_type: &str) -> &[StageRoute] {
        self.products
            .get(product_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First stage of a product type.
    pub fn first_stage(&self, product_type: &str) -> Option<&StageRoute> {
        self.stages(product_type).first()
    }

    /// Looks up one stage.
    pub fn stage(&self, product_type: &str, stage: &str) -> Option<&StageRoute> {
        self.stages(product_type).iter().find(|s| s.stage == stage)
    }

    /// Stage following `current`.
    ///
    /// Returns `None` if `current` is not a stage of the product type.
    pub fn next_stage(&self, product_type: &str, current: &str) -> Option<NextStage<'_>> {
        let stages = self.stages(product_type);
        let idx = stages.iter().position(|s| s.stage == current)?;
        Some(match stages.get(idx + 1) {
            Some(next) => NextStage::Stage(next),
            None => NextStage::Complete,
        })
    }

    /// Processing time of a stage on a machine.
    pub fn process_time(&self, product_type: &str, stage: &str, machine_id: &str) -> Option<Time> {
        self.stage(product_type, stage)?
            .options
            .iter()
            .find(|o| o.machine_id == machine_id)
            .map(|o| o.process_time)
    }

    /// Product types in the table.
    pub fn product_types(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// Number of product types.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Number of distinct `(product_type, stage)` pairs.
    pub fn stage_count(&self) -> usize {
        self.products.values().map(Vec::len).sum()
    }
}

impl From<Vec<RoutingEntry>> for RoutingTable {
    fn from(entries: Vec<RoutingEntry>) -> Self {
        Self::from_entries(&entries)
    }
}

impl From<RoutingTable> for Vec<RoutingEntry> {
    fn from(table: RoutingTable) -> Self {
        table
            .products
            .into_iter()
            .flat_map(|(product_type, stages)| {
                stages.into_iter().flat_map(move |route| {
                    let product_type = product_type.clone();
                    route.options.into_iter().map(move |option| {
                        RoutingEntry::new(
                            product_type.clone(),
                            route.stage.clone(),
                            option.machine_id,
                            option.process_time,
                        )
                    })
                })
            })
            .collect()
    }
}
