//! Consumer group snapshot model and derived views
//!
//! This module contains the group snapshot data structures and every pure
//! derivation computed from them: the lag join, the by-topic and by-member
//! aggregations, action authorization and offset selection state.

pub mod authorize;
pub mod description;
pub mod join;
pub mod selection;
pub mod view;

pub use authorize::{
    delete_group_denied, delete_group_offsets_denied, edit_offsets_denied, ClusterCapabilities,
    DenialReason,
};
pub use description::{
    Assignment, GroupDescription, GroupMemberDescription, GroupState, GroupStatistics,
    PartitionOffset, TopicOffset,
};
pub use join::{join, AssignedMember, JoinedRecord};
pub use selection::{
    ActionKind, OffsetSelection, SelectionGranularity, SelectionState, StagedOffset,
};
pub use view::{
    compute_member_view, compute_topic_view, FilterMode, MemberLagGroup, MemberPartitionRow,
    TopicLagGroup, ViewMode, ViewResult,
};
