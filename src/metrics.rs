use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operation counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub imports_applied: Arc<AtomicU64>,
    pub imports_rejected: Arc<AtomicU64>,
    pub nodes_created: Arc<AtomicU64>,
    pub nodes_updated: Arc<AtomicU64>,
    pub nodes_deleted: Arc<AtomicU64>,
    pub node_lookups: Arc<AtomicU64>,
    pub update_queries: Arc<AtomicU64>,
    pub path_listings: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            imports_applied: Arc::new(AtomicU64::new(0)),
            imports_rejected: Arc::new(AtomicU64::new(0)),
            nodes_created: Arc::new(AtomicU64::new(0)),
            nodes_updated: Arc::new(AtomicU64::new(0)),
            nodes_deleted: Arc::new(AtomicU64::new(0)),
            node_lookups: Arc::new(AtomicU64::new(0)),
            update_queries: Arc::new(AtomicU64::new(0)),
            path_listings: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn record_import(&self, created: usize, updated: usize) {
        self.imports_applied.fetch_add(1, Ordering::Relaxed);
        self.nodes_created.fetch_add(created as u64, Ordering::Relaxed);
        self.nodes_updated.fetch_add(updated as u64, Ordering::Relaxed);
    }

    pub fn inc_imports_rejected(&self) {
        self.imports_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_deleted(&self, count: usize) {
        self.nodes_deleted.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn inc_node_lookups(&self) {
        self.node_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_update_queries(&self) {
        self.update_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_path_listings(&self) {
        self.path_listings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            imports_applied: self.imports_applied.load(Ordering::Relaxed),
            imports_rejected: self.imports_rejected.load(Ordering::Relaxed),
            nodes_created: self.nodes_created.load(Ordering::Relaxed),
            nodes_updated: self.nodes_updated.load(Ordering::Relaxed),
            nodes_deleted: self.nodes_deleted.load(Ordering::Relaxed),
            node_lookups: self.node_lookups.load(Ordering::Relaxed),
            update_queries: self.update_queries.load(Ordering::Relaxed),
            path_listings: self.path_listings.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub imports_applied: u64,
    pub imports_rejected: u64,
    pub nodes_created: u64,
    pub nodes_updated: u64,
    pub nodes_deleted: u64,
    pub node_lookups: u64,
    pub update_queries: u64,
    pub path_listings: u64,
    pub uptime_seconds: u64,
}
