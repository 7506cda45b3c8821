//! Consumer group snapshot data structures
//!
//! A [`GroupDescription`] is an immutable snapshot of a consumer group as
//! reported by the cluster: its state, per-topic committed offsets and the
//! current member list with partition assignments. Snapshots are refreshed
//! wholesale by the repository; nothing here is mutated incrementally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Consumer group state as reported by the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupState {
    /// Group has members which have been assigned partitions
    Stable,
    /// The cluster is assigning partitions to group members
    CompletingRebalance,
    /// A reassignment of partitions is required, members have been asked to
    /// stop consuming
    PreparingRebalance,
    /// Group exists, but does not have any members
    Empty,
    /// Group does not have any members and its metadata has been removed
    Dead,
    /// Group state is not known
    Unknown,
}

impl GroupState {
    /// Human-readable explanation of the state, suitable for a tooltip.
    pub fn describe(&self) -> &'static str {
        match self {
            GroupState::Stable => "Consumer group has members which have been assigned partitions",
            GroupState::CompletingRebalance => "Partitions are being assigned to group members",
            GroupState::PreparingRebalance => {
                "A reassignment of partitions is required, members have been asked to stop consuming"
            }
            GroupState::Empty => "Consumer group exists, but does not have any members",
            GroupState::Dead => {
                "Consumer group does not have any members and its metadata has been removed"
            }
            GroupState::Unknown => "Group state is not known",
        }
    }
}

impl fmt::Display for GroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupState::Stable => "Stable",
            GroupState::CompletingRebalance => "Completing Rebalance",
            GroupState::PreparingRebalance => "Preparing Rebalance",
            GroupState::Empty => "Empty",
            GroupState::Dead => "Dead",
            GroupState::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Committed offset and lag for a single partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionOffset {
    /// Partition ID (unique within its topic)
    pub partition_id: i32,

    /// Offset committed by the group
    pub group_offset: i64,

    /// High-water mark (log end offset) of the partition
    pub high_water_mark: i64,

    /// Lag as reported by the cluster, typically
    /// `high_water_mark - group_offset`
    pub lag: i64,
}

/// Committed offsets of one topic within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOffset {
    /// Topic name (unique per group)
    pub topic: String,

    /// Per-partition offsets, in snapshot order
    pub partition_offsets: Vec<PartitionOffset>,
}

/// Partitions of one topic owned by a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Topic name
    pub topic_name: String,

    /// Partition IDs owned by the member for this topic.
    /// A given (topic, partition) pair is assigned to at most one member
    /// within a snapshot.
    pub partition_ids: Vec<i32>,
}

/// A member of the consumer group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberDescription {
    /// Member ID (assigned by the coordinator)
    pub id: String,

    /// Client ID (from the client)
    pub client_id: String,

    /// Client host
    pub client_host: String,

    /// Partition assignments, in snapshot order
    pub assignments: Vec<Assignment>,
}

/// Immutable snapshot of a consumer group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescription {
    /// Group ID
    pub group_id: String,

    /// Group state
    pub state: GroupState,

    /// Protocol type (typically "consumer")
    pub protocol_type: String,

    /// Broker ID of the group coordinator
    pub coordinator_id: i32,

    /// Summed lag across all partitions, as reported by the cluster
    pub lag_sum: i64,

    /// Committed offsets per topic, in snapshot order
    pub topic_offsets: Vec<TopicOffset>,

    /// Group members, in snapshot order
    pub members: Vec<GroupMemberDescription>,

    /// The caller lacks edit permissions for this group
    pub no_edit_perms: bool,

    /// The caller lacks delete permissions for this group
    pub no_delete_perms: bool,

    /// The group has active members
    pub is_in_use: bool,
}

impl GroupDescription {
    /// Total number of partitions with committed offsets across all topics.
    pub fn partition_count(&self) -> usize {
        self.topic_offsets
            .iter()
            .map(|t| t.partition_offsets.len())
            .sum()
    }

    /// Total number of partitions assigned to members, across all topics.
    pub fn assigned_partition_count(&self) -> usize {
        self.members
            .iter()
            .flat_map(|m| &m.assignments)
            .map(|a| a.partition_ids.len())
            .sum()
    }

    /// Committed offset entry for a single (topic, partition), if present.
    pub fn find_partition_offset(&self, topic: &str, partition_id: i32) -> Option<&PartitionOffset> {
        self.topic_offsets
            .iter()
            .find(|t| t.topic == topic)?
            .partition_offsets
            .iter()
            .find(|p| p.partition_id == partition_id)
    }

    /// Summary values for the dashboard's statistics bar.
    pub fn statistics(&self) -> GroupStatistics {
        GroupStatistics {
            state: self.state,
            assigned_partitions: self.assigned_partition_count(),
            protocol_type: self.protocol_type.clone(),
            coordinator_id: self.coordinator_id,
            total_lag: self.lag_sum,
        }
    }
}

/// Derived summary of a group snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatistics {
    pub state: GroupState,
    pub assigned_partitions: usize,
    pub protocol_type: String,
    pub coordinator_id: i32,
    pub total_lag: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> GroupDescription {
        GroupDescription {
            group_id: "orders-processor".to_string(),
            state: GroupState::Stable,
            protocol_type: "consumer".to_string(),
            coordinator_id: 2,
            lag_sum: 8,
            topic_offsets: vec![TopicOffset {
                topic: "orders".to_string(),
                partition_offsets: vec![
                    PartitionOffset {
                        partition_id: 0,
                        group_offset: 100,
                        high_water_mark: 105,
                        lag: 5,
                    },
                    PartitionOffset {
                        partition_id: 1,
                        group_offset: 200,
                        high_water_mark: 203,
                        lag: 3,
                    },
                ],
            }],
            members: vec![GroupMemberDescription {
                id: "consumer-1-abc".to_string(),
                client_id: "consumer-1".to_string(),
                client_host: "10.0.0.5".to_string(),
                assignments: vec![Assignment {
                    topic_name: "orders".to_string(),
                    partition_ids: vec![0, 1],
                }],
            }],
            no_edit_perms: false,
            no_delete_perms: false,
            is_in_use: true,
        }
    }

    #[test]
    fn test_partition_counts() {
        let group = sample_group();
        assert_eq!(group.partition_count(), 2);
        assert_eq!(group.assigned_partition_count(), 2);
    }

    #[test]
    fn test_find_partition_offset() {
        let group = sample_group();
        let offset = group.find_partition_offset("orders", 1);
        assert_eq!(offset.map(|p| p.lag), Some(3));
        assert!(group.find_partition_offset("orders", 7).is_none());
        assert!(group.find_partition_offset("payments", 0).is_none());
    }

    #[test]
    fn test_statistics() {
        let stats = sample_group().statistics();
        assert_eq!(stats.state, GroupState::Stable);
        assert_eq!(stats.assigned_partitions, 2);
        assert_eq!(stats.total_lag, 8);
        assert_eq!(stats.coordinator_id, 2);
    }

    #[test]
    fn test_group_state_serialization() {
        let json = serde_json::to_string(&GroupState::CompletingRebalance).unwrap();
        assert_eq!(json, "\"completingRebalance\"");

        let state: GroupState = serde_json::from_str("\"preparingRebalance\"").unwrap();
        assert_eq!(state, GroupState::PreparingRebalance);
    }

    #[test]
    fn test_group_description_roundtrip() {
        let group = sample_group();
        let json = serde_json::to_string(&group).unwrap();
        assert!(json.contains("\"groupId\""));
        assert!(json.contains("\"highWaterMark\""));

        let deserialized: GroupDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, group);
    }

    #[test]
    fn test_group_state_display() {
        assert_eq!(GroupState::Stable.to_string(), "Stable");
        assert_eq!(
            GroupState::PreparingRebalance.to_string(),
            "Preparing Rebalance"
        );
        assert!(!GroupState::Dead.describe().is_empty());
    }
}
