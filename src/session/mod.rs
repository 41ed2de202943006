//! Async orchestration of tree picks and season changes.
//!
//! [`ShadowSession`] is the entry point for a map shell: it validates picks,
//! loads point clouds through the shared [`PointCloudSource`], and feeds the
//! results to a [`LayerManager`]. The manager lock is never held across the
//! fetch, so a newer pick can land while an older load is still in flight;
//! the older result is then dropped on arrival.

pub mod config;

pub use config::ShadeConfig;

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::cloud::{HttpFetcher, PointCloudFetcher, PointCloudSource};
use crate::core::{Error, Result};
use crate::layers::{LayerManager, LayerSnapshot, LayerUpdate, SelectionTicket, TreeSelection};
use crate::solar::SolarTable;
use crate::stats::CanopyMetrics;

/// What became of a tree pick.
#[derive(Debug)]
pub enum SelectionOutcome {
    /// The tree's canopy and shadows are drawn.
    Rendered {
        ticket: SelectionTicket,
        update: LayerUpdate,
        metrics: Option<CanopyMetrics>,
    },
    /// The asset could not be loaded; the tree is selected but has no layers.
    NoData { ticket: SelectionTicket, error: Error },
    /// Another pick arrived before the load finished; its result was dropped.
    Superseded { ticket: SelectionTicket },
}

/// One map view's shadow state.
pub struct ShadowSession {
    source: Arc<PointCloudSource>,
    manager: Mutex<LayerManager>,
    snapshots: watch::Sender<Arc<LayerSnapshot>>,
}

impl ShadowSession {
    /// Create a session fetching from `config.asset_base_url` over HTTP.
    pub fn from_config(config: &ShadeConfig, table: SolarTable) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.asset_base_url.clone()));
        Self::new(config, table, fetcher)
    }

    pub fn new(config: &ShadeConfig, table: SolarTable, fetcher: Arc<dyn PointCloudFetcher>) -> Result<Self> {
        Self::with_source(config, table, Arc::new(PointCloudSource::new(fetcher)))
    }

    /// Create a session sharing an existing point-cloud source (and cache).
    pub fn with_source(config: &ShadeConfig, table: SolarTable, source: Arc<PointCloudSource>) -> Result<Self> {
        config.validate()?;
        let manager = LayerManager::new(
            Arc::new(table),
            config.initial_season,
            config.projector(),
            config.layer_style(),
        )?;
        let (snapshots, _) = watch::channel(Arc::new(manager.snapshot()));

        Ok(Self {
            source,
            manager: Mutex::new(manager),
            snapshots,
        })
    }

    /// Make `selection` the active tree and draw its shadows for the active
    /// season.
    ///
    /// Returns an error only for a selection with an empty zone, species or
    /// tree id, which is rejected before any state changes.
    pub async fn select_tree(&self, selection: TreeSelection) -> Result<SelectionOutcome> {
        let key = selection.asset_key()?;

        let ticket = {
            let mut manager = self.manager.lock().await;
            let (ticket, _) = manager.select(selection);
            self.publish(&manager);
            ticket
        };

        let (cloud, error) = match self.source.load_key(&key).await {
            Ok(cloud) => (Some(cloud), None),
            Err(e) => {
                log::warn!("Point cloud for tree {} unavailable: {}", key.tree_id(), e);
                (None, Some(e))
            }
        };

        let mut manager = self.manager.lock().await;
        let Some(update) = manager.complete_load(ticket, cloud) else {
            return Ok(SelectionOutcome::Superseded { ticket });
        };
        self.publish(&manager);

        Ok(match error {
            None => SelectionOutcome::Rendered {
                ticket,
                update,
                metrics: manager.metrics(),
            },
            Some(error) => SelectionOutcome::NoData { ticket, error },
        })
    }

    /// Switch the active season and rebuild the shadows of the active tree.
    pub async fn set_season(&self, season: usize) -> Result<LayerUpdate> {
        let mut manager = self.manager.lock().await;
        let update = manager.set_season(season)?;
        self.publish(&manager);
        Ok(update)
    }

    /// Drop the active tree.
    pub async fn clear(&self) -> LayerUpdate {
        let mut manager = self.manager.lock().await;
        let update = manager.clear();
        self.publish(&manager);
        update
    }

    /// Current layer set.
    pub fn snapshot(&self) -> Arc<LayerSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receive every published layer set. Each value is complete on its own.
    pub fn subscribe(&self) -> watch::Receiver<Arc<LayerSnapshot>> {
        self.snapshots.subscribe()
    }

    fn publish(&self, manager: &LayerManager) {
        self.snapshots.send_replace(Arc::new(manager.snapshot()));
    }
}
