//! Shadow Layer Lifecycle Manager.
//!
//! Holds the active [`TreeSelection`], its cloud once loaded, the active
//! season, and the layers built from them. Every transition rebuilds the full
//! layer set and hands back a single [`LayerUpdate`], so at no revision does
//! the set mix trees or seasons.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::descriptor::{LayerDescriptor, LayerSlot, LayerSnapshot, LayerStyle, LayerUpdate};
use super::selection::{SelectionTicket, TreeSelection};
use crate::cloud::PointCloud;
use crate::core::Result;
use crate::shadow::ShadowProjector;
use crate::solar::{DayProfile, SolarTable};
use crate::stats::{CanopyMetrics, compute_metrics};

/// Progress of the active tree's point-cloud load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Pending,
    Loaded,
    /// The asset was missing or malformed; nothing is drawn.
    Failed,
}

struct ActiveTree {
    selection: TreeSelection,
    ticket: SelectionTicket,
    state: LoadState,
    cloud: Option<PointCloud>,
    metrics: Option<CanopyMetrics>,
}

/// Owns the drawn layer set for the active tree and season.
pub struct LayerManager {
    table: Arc<SolarTable>,
    projector: ShadowProjector,
    style: LayerStyle,
    season: usize,
    /// Copy of `table.profile(season)`, kept in step with `season`.
    profile: DayProfile,
    active: Option<ActiveTree>,
    next_ticket: u64,
    layers: BTreeMap<LayerSlot, LayerDescriptor>,
    revision: u64,
}

impl LayerManager {
    /// Create a manager showing nothing, with `season` active.
    pub fn new(table: Arc<SolarTable>, season: usize, projector: ShadowProjector, style: LayerStyle) -> Result<Self> {
        let profile = table.profile(season)?.clone();
        Ok(Self {
            table,
            projector,
            style,
            season,
            profile,
            active: None,
            next_ticket: 0,
            layers: BTreeMap::new(),
            revision: 0,
        })
    }

    /// Make `selection` the active tree.
    ///
    /// Every layer of the previous tree is torn down immediately; the new
    /// tree's layers appear once [`complete_load`](Self::complete_load) is
    /// called with the returned ticket.
    pub fn select(&mut self, selection: TreeSelection) -> (SelectionTicket, LayerUpdate) {
        self.next_ticket += 1;
        let ticket = SelectionTicket(self.next_ticket);

        log::info!(
            "Selected tree {} ({} / {}) at ({:.5}, {:.5})",
            selection.tree_id, selection.zone, selection.species, selection.latitude, selection.longitude
        );

        self.active = Some(ActiveTree {
            selection,
            ticket,
            state: LoadState::Pending,
            cloud: None,
            metrics: None,
        });
        (ticket, self.rebuild())
    }

    /// Drop the active tree and all its layers.
    pub fn clear(&mut self) -> LayerUpdate {
        self.next_ticket += 1;
        self.active = None;
        self.rebuild()
    }

    /// Whether `ticket` still belongs to the active selection.
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.active.as_ref().is_some_and(|a| a.ticket == ticket)
    }

    /// Apply the outcome of a point-cloud load; `None` means the asset could
    /// not be loaded.
    ///
    /// Returns `None` and changes nothing if `ticket` has been superseded.
    pub fn complete_load(&mut self, ticket: SelectionTicket, cloud: Option<PointCloud>) -> Option<LayerUpdate> {
        let unit_scale = self.style.unit_scale;
        let active = match self.active.as_mut() {
            Some(active) if active.ticket == ticket => active,
            _ => {
                log::debug!("Discarding stale point-cloud load (ticket {})", ticket.generation());
                return None;
            }
        };

        match cloud {
            Some(cloud) => {
                let diameter = active.selection.expected_canopy_diameter(unit_scale);
                active.metrics = compute_metrics(&cloud, diameter, unit_scale);
                if active.metrics.is_none() {
                    log::info!("No canopy points within {:.1} of trunk {}", diameter / 4.0, active.selection.tree_id);
                }
                active.cloud = Some(cloud);
                active.state = LoadState::Loaded;
            }
            None => {
                active.cloud = None;
                active.metrics = None;
                active.state = LoadState::Failed;
            }
        }

        Some(self.rebuild())
    }

    /// Switch the active season.
    ///
    /// An index outside the table is rejected before anything changes.
    pub fn set_season(&mut self, season: usize) -> Result<LayerUpdate> {
        let profile = self.table.profile(season)?.clone();
        log::info!("Season {} selected ({} sunlit hours)", season, profile.visible_count());
        self.season = season;
        self.profile = profile;
        Ok(self.rebuild())
    }

    /// Replace the whole layer set with one built from current state.
    fn rebuild(&mut self) -> LayerUpdate {
        let layers = self.build_layers();

        let removed: Vec<String> = self.layers.values().map(|l| l.id.clone()).collect();
        let added: Vec<LayerDescriptor> = layers.values().cloned().collect();

        self.layers = layers;
        self.revision += 1;

        if !added.is_empty() {
            log::info!(
                "Layer rebuild r{}: {} removed, {} added ({} shadow)",
                self.revision,
                removed.len(),
                added.len(),
                self.shadow_layer_count()
            );
        }

        LayerUpdate {
            revision: self.revision,
            removed,
            added,
        }
    }

    fn build_layers(&self) -> BTreeMap<LayerSlot, LayerDescriptor> {
        let mut layers = BTreeMap::new();

        let Some(active) = &self.active else {
            return layers;
        };
        let Some(cloud) = &active.cloud else {
            return layers;
        };

        let tree_id = active.selection.tree_id.as_str();
        let origin = active.selection.origin();

        layers.insert(
            LayerSlot::Canopy,
            LayerDescriptor::canopy(tree_id, origin, cloud, &self.style),
        );

        for (index, sun) in self.profile.visible_slots() {
            let shadow = self.projector.project_cloud(cloud, sun);
            layers.insert(
                LayerSlot::Shadow { index },
                LayerDescriptor::shadow(tree_id, origin, index, &shadow, &self.style),
            );
        }

        layers
    }

    /// Layers currently drawn, canopy first, then shadows in hour order.
    pub fn layers(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.values()
    }

    pub fn layer(&self, slot: LayerSlot) -> Option<&LayerDescriptor> {
        self.layers.get(&slot)
    }

    pub fn shadow_layer_count(&self) -> usize {
        self.layers
            .keys()
            .filter(|s| matches!(s, LayerSlot::Shadow { .. }))
            .count()
    }

    pub fn selection(&self) -> Option<&TreeSelection> {
        self.active.as_ref().map(|a| &a.selection)
    }

    pub fn load_state(&self) -> Option<LoadState> {
        self.active.as_ref().map(|a| a.state)
    }

    /// Canopy metrics for the active tree; `None` while loading, after a
    /// failed load, or when the trunk window holds no points.
    pub fn metrics(&self) -> Option<CanopyMetrics> {
        self.active.as_ref().and_then(|a| a.metrics)
    }

    pub fn season(&self) -> usize {
        self.season
    }

    pub fn profile(&self) -> &DayProfile {
        &self.profile
    }

    /// Monotonic counter bumped by every rebuild.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Consistent copy of everything the shell draws and displays.
    pub fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            revision: self.revision,
            season: self.season,
            tree_id: self.selection().map(|s| s.tree_id.clone()),
            load_state: self.load_state(),
            metrics: self.metrics(),
            layers: self.layers.values().cloned().collect(),
        }
    }
}
