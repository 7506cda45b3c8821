#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # Lagview
//!
//! Lagview is the consumer-group lag inspection core of a streaming
//! dashboard. It joins a consumer group's committed partition offsets with
//! the group's member assignments, aggregates the result by topic or by
//! member, decides whether offset edit/delete actions are permitted, and
//! tracks which offsets are staged for a pending edit or delete workflow.
//!
//! ## Architecture
//!
//! - [`group`]: group snapshot model and its pure derivations: the lag
//!   join, by-topic/by-member view aggregation, action authorization and
//!   offset selection state
//! - [`repository`]: snapshot repository seam with refresh-on-demand and
//!   in-flight de-duplication
//! - [`inspector`]: controller owning view mode, lag filter and staged
//!   selections
//! - [`config`]: inspector settings
//! - [`error`]: error types and Result alias
//!
//! ## Example
//!
//! ```no_run
//! use lagview::{compute_topic_view, GroupDescription, ViewResult};
//!
//! fn print_lag(group: &GroupDescription) {
//!     match compute_topic_view(group, false) {
//!         ViewResult::Groups { groups, .. } => {
//!             for topic in &groups {
//!                 println!("{}: lag {}", topic.topic_name, topic.total_lag);
//!             }
//!         }
//!         ViewResult::AllFiltered { candidates } => {
//!             println!("all {} topics have been filtered", candidates);
//!         }
//!         ViewResult::NoData => println!("no data found"),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod inspector;
pub mod repository;

pub use config::InspectorSettings;
pub use error::{LagviewError, Result};
pub use group::{
    compute_member_view, compute_topic_view, delete_group_denied, delete_group_offsets_denied,
    edit_offsets_denied, join, ActionKind, AssignedMember, Assignment, ClusterCapabilities,
    DenialReason, FilterMode, GroupDescription, GroupMemberDescription, GroupState,
    GroupStatistics, JoinedRecord, MemberLagGroup, MemberPartitionRow, OffsetSelection,
    PartitionOffset, SelectionGranularity, SelectionState, StagedOffset, TopicLagGroup,
    TopicOffset, ViewMode, ViewResult,
};
pub use inspector::{GroupInspector, PartitionsView};
pub use repository::{GroupRepository, GroupSource, SnapshotRepository};
