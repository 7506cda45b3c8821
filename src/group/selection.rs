//! Offset selection state for edit/delete workflows
//!
//! Tracks which partition offsets are staged for a pending edit or delete
//! action and at what granularity. At most one edit selection and one
//! delete selection exist at a time; staging a new one of the same kind
//! silently replaces the old one, and dismissing the workflow's modal
//! clears it.

use crate::group::description::GroupDescription;
use crate::group::join::JoinedRecord;
use serde::{Deserialize, Serialize};

/// Scope of a staged edit/delete action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionGranularity {
    /// Every partition offset of the group
    Group,
    /// The visible partitions of a single topic
    Topic,
    /// A single partition
    Partition,
}

/// Which pending workflow a selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Edit,
    Delete,
}

/// A single offset staged for editing or deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedOffset {
    pub topic_name: String,
    pub partition_id: i32,
    pub offset: i64,
}

impl StagedOffset {
    fn from_record(record: &JoinedRecord) -> Self {
        Self {
            topic_name: record.topic_name.clone(),
            partition_id: record.partition_id,
            offset: record.group_offset,
        }
    }
}

/// Offsets staged for a pending edit or delete action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetSelection {
    pub granularity: SelectionGranularity,
    pub offsets: Vec<StagedOffset>,
}

/// Staged offset selections, at most one per [`ActionKind`]
#[derive(Debug, Default)]
pub struct SelectionState {
    editing: Option<OffsetSelection>,
    deleting: Option<OffsetSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage every partition offset of the whole group.
    ///
    /// A group without any topic offsets stages nothing and leaves the
    /// current selection untouched.
    pub fn stage_group(&mut self, kind: ActionKind, group: &GroupDescription) {
        let offsets: Vec<StagedOffset> = group
            .topic_offsets
            .iter()
            .flat_map(|t| {
                t.partition_offsets.iter().map(|p| StagedOffset {
                    topic_name: t.topic.clone(),
                    partition_id: p.partition_id,
                    offset: p.group_offset,
                })
            })
            .collect();

        self.stage(kind, SelectionGranularity::Group, offsets);
    }

    /// Stage the currently visible partitions of a single topic, as already
    /// filtered by the aggregator. An empty row set stages nothing.
    pub fn stage_topic(&mut self, kind: ActionKind, partitions: &[JoinedRecord]) {
        let offsets = partitions.iter().map(StagedOffset::from_record).collect();
        self.stage(kind, SelectionGranularity::Topic, offsets);
    }

    /// Stage a single partition.
    pub fn stage_partition(&mut self, kind: ActionKind, record: &JoinedRecord) {
        self.stage(
            kind,
            SelectionGranularity::Partition,
            vec![StagedOffset::from_record(record)],
        );
    }

    /// Drop the selection of the given kind, if any. Called when the
    /// workflow's modal is dismissed, whether committed or cancelled.
    pub fn clear(&mut self, kind: ActionKind) {
        *self.slot_mut(kind) = None;
    }

    /// The currently staged selection of the given kind.
    pub fn selection(&self, kind: ActionKind) -> Option<&OffsetSelection> {
        match kind {
            ActionKind::Edit => self.editing.as_ref(),
            ActionKind::Delete => self.deleting.as_ref(),
        }
    }

    fn stage(
        &mut self,
        kind: ActionKind,
        granularity: SelectionGranularity,
        offsets: Vec<StagedOffset>,
    ) {
        // Staging an empty selection is a silent no-op.
        if offsets.is_empty() {
            return;
        }
        *self.slot_mut(kind) = Some(OffsetSelection {
            granularity,
            offsets,
        });
    }

    fn slot_mut(&mut self, kind: ActionKind) -> &mut Option<OffsetSelection> {
        match kind {
            ActionKind::Edit => &mut self.editing,
            ActionKind::Delete => &mut self.deleting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::description::{GroupState, PartitionOffset, TopicOffset};

    fn group_with_offsets(topic_offsets: Vec<TopicOffset>) -> GroupDescription {
        GroupDescription {
            group_id: "audit".to_string(),
            state: GroupState::Empty,
            protocol_type: "consumer".to_string(),
            coordinator_id: 0,
            lag_sum: 0,
            topic_offsets,
            members: vec![],
            no_edit_perms: false,
            no_delete_perms: false,
            is_in_use: false,
        }
    }

    fn record(topic: &str, partition_id: i32, group_offset: i64) -> JoinedRecord {
        JoinedRecord {
            topic_name: topic.to_string(),
            partition_id,
            group_offset,
            high_water_mark: group_offset + 10,
            lag: 10,
            assigned_member: None,
        }
    }

    #[test]
    fn test_stage_group_flattens_all_partitions() {
        let g = group_with_offsets(vec![
            TopicOffset {
                topic: "a".to_string(),
                partition_offsets: vec![
                    PartitionOffset {
                        partition_id: 0,
                        group_offset: 11,
                        high_water_mark: 11,
                        lag: 0,
                    },
                    PartitionOffset {
                        partition_id: 1,
                        group_offset: 22,
                        high_water_mark: 22,
                        lag: 0,
                    },
                ],
            },
            TopicOffset {
                topic: "b".to_string(),
                partition_offsets: vec![PartitionOffset {
                    partition_id: 0,
                    group_offset: 33,
                    high_water_mark: 33,
                    lag: 0,
                }],
            },
        ]);

        let mut state = SelectionState::new();
        state.stage_group(ActionKind::Edit, &g);

        let selection = state.selection(ActionKind::Edit).unwrap();
        assert_eq!(selection.granularity, SelectionGranularity::Group);
        assert_eq!(selection.offsets.len(), 3);
        assert_eq!(selection.offsets[2].topic_name, "b");
        assert_eq!(selection.offsets[2].offset, 33);
    }

    #[test]
    fn test_stage_group_without_offsets_is_noop() {
        let g = group_with_offsets(vec![]);
        let mut state = SelectionState::new();

        state.stage_group(ActionKind::Delete, &g);
        assert!(state.selection(ActionKind::Delete).is_none());

        // An existing selection survives an empty staging attempt.
        state.stage_partition(ActionKind::Delete, &record("a", 0, 5));
        state.stage_group(ActionKind::Delete, &g);
        let selection = state.selection(ActionKind::Delete).unwrap();
        assert_eq!(selection.granularity, SelectionGranularity::Partition);
    }

    #[test]
    fn test_stage_topic_then_clear() {
        let mut state = SelectionState::new();
        state.stage_topic(
            ActionKind::Delete,
            &[record("a", 0, 5), record("a", 1, 9)],
        );

        let selection = state.selection(ActionKind::Delete).unwrap();
        assert_eq!(selection.granularity, SelectionGranularity::Topic);
        assert_eq!(selection.offsets.len(), 2);

        state.clear(ActionKind::Delete);
        assert!(state.selection(ActionKind::Delete).is_none());
    }

    #[test]
    fn test_staging_replaces_same_kind_silently() {
        let mut state = SelectionState::new();
        state.stage_topic(ActionKind::Edit, &[record("a", 0, 5)]);
        state.stage_partition(ActionKind::Edit, &record("b", 2, 7));

        let selection = state.selection(ActionKind::Edit).unwrap();
        assert_eq!(selection.granularity, SelectionGranularity::Partition);
        assert_eq!(selection.offsets[0].topic_name, "b");
    }

    #[test]
    fn test_edit_and_delete_selections_are_independent() {
        let mut state = SelectionState::new();
        state.stage_partition(ActionKind::Edit, &record("a", 0, 5));
        state.stage_topic(ActionKind::Delete, &[record("b", 0, 1)]);

        assert_eq!(
            state.selection(ActionKind::Edit).unwrap().granularity,
            SelectionGranularity::Partition
        );
        assert_eq!(
            state.selection(ActionKind::Delete).unwrap().granularity,
            SelectionGranularity::Topic
        );

        state.clear(ActionKind::Edit);
        assert!(state.selection(ActionKind::Edit).is_none());
        assert!(state.selection(ActionKind::Delete).is_some());
    }

    #[test]
    fn test_staged_offset_uses_group_offset() {
        let mut state = SelectionState::new();
        state.stage_partition(ActionKind::Edit, &record("a", 3, 42));

        let offset = &state.selection(ActionKind::Edit).unwrap().offsets[0];
        assert_eq!(offset.partition_id, 3);
        assert_eq!(offset.offset, 42);
    }
}
