//! Lag join engine
//!
//! Joins a group snapshot's per-partition committed offsets with the
//! group's member assignments, producing one flat [`JoinedRecord`] per
//! partition. The join is a pure derivation recomputed from the current
//! snapshot on every query; its output is never cached across snapshots.

use crate::group::description::{Assignment, GroupDescription, GroupMemberDescription};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identity of the member a partition is assigned to.
///
/// A lookup result copied out of the snapshot during the join. It does not
/// own the member and never outlives the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedMember {
    /// Member ID
    pub id: String,
    /// Client ID
    pub client_id: String,
    /// Client host
    pub client_host: String,
}

/// One partition of the group, joined with its owning member (if any)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRecord {
    pub topic_name: String,
    pub partition_id: i32,
    pub group_offset: i64,
    pub high_water_mark: i64,
    /// Lag, clamped to be non-negative
    pub lag: i64,
    /// Owning member, or `None` for a partition with a committed offset but
    /// no currently consuming member (e.g. right after a rebalance).
    pub assigned_member: Option<AssignedMember>,
}

/// Join every partition offset of the group with the member it is assigned
/// to. The output has exactly one record per partition offset, in snapshot
/// order.
pub fn join(group: &GroupDescription) -> Vec<JoinedRecord> {
    // Flatten (member, assignment) pairs once; each partition below does a
    // linear lookup over this list.
    let assignments: Vec<(&GroupMemberDescription, &Assignment)> = group
        .members
        .iter()
        .flat_map(|m| m.assignments.iter().map(move |a| (m, a)))
        .collect();

    let mut records = Vec::with_capacity(group.partition_count());
    for topic in &group.topic_offsets {
        for partition in &topic.partition_offsets {
            let mut owners = assignments.iter().filter(|(_, a)| {
                a.topic_name == topic.topic && a.partition_ids.contains(&partition.partition_id)
            });

            let owner = owners.next();
            if owners.next().is_some() {
                // The snapshot is external and unvalidated; a duplicate
                // assignment is an anomaly, not a fatal error. First match
                // in iteration order wins.
                warn!(
                    group = %group.group_id,
                    topic = %topic.topic,
                    partition = partition.partition_id,
                    "partition assigned to more than one member, keeping first match"
                );
            }

            let lag = if partition.lag < 0 {
                // Stale committed offset after log truncation can report a
                // negative lag; clamp rather than propagate it.
                warn!(
                    group = %group.group_id,
                    topic = %topic.topic,
                    partition = partition.partition_id,
                    lag = partition.lag,
                    "negative lag in snapshot, clamping to 0"
                );
                0
            } else {
                partition.lag
            };

            records.push(JoinedRecord {
                topic_name: topic.topic.clone(),
                partition_id: partition.partition_id,
                group_offset: partition.group_offset,
                high_water_mark: partition.high_water_mark,
                lag,
                assigned_member: owner.map(|(m, _)| AssignedMember {
                    id: m.id.clone(),
                    client_id: m.client_id.clone(),
                    client_host: m.client_host.clone(),
                }),
            });
        }
    }

    records
}
