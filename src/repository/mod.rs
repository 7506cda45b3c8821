//! Consumer group snapshot repository
//!
//! The repository owns whole-group snapshots and refresh-on-demand
//! semantics. Snapshots are replaced wholesale; there is no incremental
//! merge. Refreshes for the same group are de-duplicated: an unforced
//! refresh while one is already outstanding is a no-op, while a forced
//! refresh always issues a new request.

use crate::error::Result;
use crate::group::authorize::ClusterCapabilities;
use crate::group::description::GroupDescription;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::debug;

/// Source of fresh group snapshots (the cluster-facing side).
#[async_trait]
pub trait GroupSource: Send + Sync {
    /// Describe a group, returning `None` when the cluster does not know it.
    async fn describe_group(&self, group_id: &str) -> Result<Option<GroupDescription>>;

    /// Feature support of the connected cluster.
    fn capabilities(&self) -> ClusterCapabilities;
}

/// Read side of the repository, consumed by the inspector.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Latest snapshot of the group, if one has been fetched.
    async fn get_group(&self, group_id: &str) -> Option<GroupDescription>;

    /// Refresh the group's snapshot from the source.
    async fn refresh_group(&self, group_id: &str, force: bool) -> Result<()>;

    /// Feature support of the connected cluster.
    fn cluster_capabilities(&self) -> ClusterCapabilities;
}

/// In-memory snapshot repository backed by a [`GroupSource`]
pub struct SnapshotRepository<S> {
    source: S,
    snapshots: RwLock<HashMap<String, GroupDescription>>,
    // Outstanding refreshes per group. A count rather than a set: a forced
    // refresh may run alongside an unforced one, and finishing must only
    // release its own slot.
    in_flight: Mutex<HashMap<String, usize>>,
}

impl<S: GroupSource> SnapshotRepository<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshots: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Number of groups with a cached snapshot.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.read().len()
    }
}

#[async_trait]
impl<S: GroupSource> GroupRepository for SnapshotRepository<S> {
    async fn get_group(&self, group_id: &str) -> Option<GroupDescription> {
        self.snapshots.read().get(group_id).cloned()
    }

    async fn refresh_group(&self, group_id: &str, force: bool) -> Result<()> {
        {
            let mut in_flight = self.in_flight.lock();
            let outstanding = in_flight.get(group_id).copied().unwrap_or(0);
            if outstanding > 0 && !force {
                debug!(group = group_id, "refresh already in flight, coalescing");
                return Ok(());
            }
            // A forced refresh always fetches, even alongside an
            // outstanding one.
            *in_flight.entry(group_id.to_string()).or_insert(0) += 1;
        }

        let fetched = self.source.describe_group(group_id).await;
        {
            let mut in_flight = self.in_flight.lock();
            if let Some(count) = in_flight.get_mut(group_id) {
                *count -= 1;
                if *count == 0 {
                    in_flight.remove(group_id);
                }
            }
        }

        match fetched? {
            Some(group) => {
                debug!(
                    group = group_id,
                    topics = group.topic_offsets.len(),
                    members = group.members.len(),
                    "refreshed group snapshot"
                );
                self.snapshots.write().insert(group_id.to_string(), group);
            }
            None => {
                debug!(group = group_id, "group unknown to cluster, dropping snapshot");
                self.snapshots.write().remove(group_id);
            }
        }

        Ok(())
    }

    fn cluster_capabilities(&self) -> ClusterCapabilities {
        self.source.capabilities()
    }
}
