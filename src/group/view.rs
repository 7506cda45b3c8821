//! View aggregation over joined lag records
//!
//! Two alternative groupings over the same joined record set: by topic and
//! by member. Both compute their summary statistics before the zero-lag
//! filter runs, drop groups the filter empties out, and report a
//! distinguished "all filtered" result when the filter removed every
//! candidate. The functions here are pure; results are recomputed from the
//! snapshot on every call.

use crate::group::description::GroupDescription;
use crate::group::join::{join, JoinedRecord};
use serde::{Deserialize, Serialize};

/// Which grouping the partitions view uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Group partitions by topic
    Topic,
    /// Group partitions by owning member
    Member,
}

/// Lag filter applied to the partitions view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    /// Show every partition
    ShowAll,
    /// Hide partitions whose lag is zero
    WithLag,
}

impl FilterMode {
    /// Whether zero-lag partitions are hidden under this filter.
    pub fn hides_zero_lag(&self) -> bool {
        matches!(self, FilterMode::WithLag)
    }
}

/// Result of aggregating a group's partitions into topic or member groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewResult<T> {
    /// At least one group survived filtering
    Groups {
        groups: Vec<T>,
        /// Index of the group to expand by default: set when exactly one
        /// group survived filtering, unset otherwise.
        default_expand: Option<usize>,
    },
    /// There were candidate groups, but the zero-lag filter removed every
    /// one of them. Carries the pre-filter candidate count so the caller
    /// can say "all N topics/members have been filtered".
    AllFiltered { candidates: usize },
    /// The group has no topics/members to aggregate
    NoData,
}

impl<T> ViewResult<T> {
    /// Surviving groups, or `None` for the two empty-result markers.
    pub fn groups(&self) -> Option<&[T]> {
        match self {
            ViewResult::Groups { groups, .. } => Some(groups),
            _ => None,
        }
    }
}

/// One topic's partitions with summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicLagGroup {
    pub topic_name: String,
    /// Summed lag of all partitions of the topic (computed before the
    /// zero-lag filter)
    pub total_lag: i64,
    /// Number of partitions with an assigned member (computed before the
    /// zero-lag filter)
    pub assigned_partitions: usize,
    /// Partitions surviving the filter, in snapshot order
    pub partitions: Vec<JoinedRecord>,
}

/// One row of a member's partition table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPartitionRow {
    pub topic_name: String,
    pub partition_id: i32,
    pub partition_lag: i64,
}

/// One member's assigned partitions with summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLagGroup {
    pub id: String,
    pub client_id: String,
    pub client_host: String,
    /// Summed lag over all assigned partitions (computed before the
    /// zero-lag filter)
    pub total_lag: i64,
    /// Number of assigned partitions (computed before the zero-lag filter,
    /// so filtering never changes it)
    pub total_partitions: usize,
    /// Rows surviving the filter, in assignment order
    pub partitions: Vec<MemberPartitionRow>,
}

/// Aggregate the group's partitions by topic.
///
/// Topic groups are sorted ascending by topic name. Per-group summary
/// statistics are computed before the zero-lag filter; groups the filter
/// empties out are dropped rather than rendered with zero rows.
pub fn compute_topic_view(group: &GroupDescription, hide_zero_lag: bool) -> ViewResult<TopicLagGroup> {
    // Bucket joined records by topic, then sort buckets by name.
    let mut buckets: Vec<(String, Vec<JoinedRecord>)> = Vec::new();
    for record in join(group) {
        match buckets.iter().position(|(name, _)| *name == record.topic_name) {
            Some(i) => buckets[i].1.push(record),
            None => buckets.push((record.topic_name.clone(), vec![record])),
        }
    }
    buckets.sort_by(|a, b| a.0.cmp(&b.0));

    let candidates = buckets.len();
    let mut groups = Vec::new();
    for (topic_name, mut partitions) in buckets {
        let total_lag = partitions.iter().map(|r| r.lag).sum();
        let assigned_partitions = partitions
            .iter()
            .filter(|r| r.assigned_member.is_some())
            .count();

        if hide_zero_lag {
            partitions.retain(|r| r.lag != 0);
        }
        if partitions.is_empty() {
            continue;
        }

        groups.push(TopicLagGroup {
            topic_name,
            total_lag,
            assigned_partitions,
            partitions,
        });
    }

    finish(groups, candidates, hide_zero_lag)
}

/// Aggregate the group's partitions by owning member.
///
/// Rows are driven by member assignments, so partitions without an assigned
/// member never appear in this view. A partition that is assigned but has
/// no committed offset shows a lag of zero.
pub fn compute_member_view(
    group: &GroupDescription,
    hide_zero_lag: bool,
) -> ViewResult<MemberLagGroup> {
    let candidates = group.members.len();
    let mut groups = Vec::new();

    for member in &group.members {
        let mut rows: Vec<MemberPartitionRow> = member
            .assignments
            .iter()
            .flat_map(|a| {
                a.partition_ids.iter().map(|&partition_id| {
                    let lag = group
                        .find_partition_offset(&a.topic_name, partition_id)
                        .map(|p| p.lag.max(0))
                        .unwrap_or(0);
                    MemberPartitionRow {
                        topic_name: a.topic_name.clone(),
                        partition_id,
                        partition_lag: lag,
                    }
                })
            })
            .collect();

        let total_lag = rows.iter().map(|r| r.partition_lag).sum();
        let total_partitions = rows.len();

        if hide_zero_lag {
            rows.retain(|r| r.partition_lag != 0);
        }
        if rows.is_empty() {
            continue;
        }

        groups.push(MemberLagGroup {
            id: member.id.clone(),
            client_id: member.client_id.clone(),
            client_host: member.client_host.clone(),
            total_lag,
            total_partitions,
            partitions: rows,
        });
    }

    finish(groups, candidates, hide_zero_lag)
}

fn finish<T>(groups: Vec<T>, candidates: usize, hide_zero_lag: bool) -> ViewResult<T> {
    if groups.is_empty() {
        // Only report "all filtered" when the filter did the removing;
        // otherwise an empty result is plain missing data.
        if hide_zero_lag && candidates > 0 {
            return ViewResult::AllFiltered { candidates };
        }
        return ViewResult::NoData;
    }

    let default_expand = if groups.len() == 1 { Some(0) } else { None };
    ViewResult::Groups {
        groups,
        default_expand,
    }
}
