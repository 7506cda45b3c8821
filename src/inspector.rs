//! Group inspection controller
//!
//! [`GroupInspector`] owns the mutable presentation state of the dashboard
//! view: the view mode, the lag filter and the staged offset selections.
//! All state lives in plain fields mutated only through the explicit
//! operations below; the rendering layer re-queries the derived views after
//! each mutation. Derived views themselves are pure functions of the
//! current snapshot and carry no cache.

use crate::config::InspectorSettings;
use crate::error::{LagviewError, Result};
use crate::group::authorize::{self, DenialReason};
use crate::group::description::{GroupDescription, GroupStatistics};
use crate::group::join::JoinedRecord;
use crate::group::selection::{ActionKind, OffsetSelection, SelectionState};
use crate::group::view::{
    compute_member_view, compute_topic_view, FilterMode, MemberLagGroup, TopicLagGroup, ViewMode,
    ViewResult,
};
use crate::repository::GroupRepository;
use std::sync::Arc;
use tracing::debug;

/// Partition listing for the currently selected view mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionsView {
    Topics(ViewResult<TopicLagGroup>),
    Members(ViewResult<MemberLagGroup>),
}

/// Controller for a single consumer group's dashboard view
pub struct GroupInspector {
    repository: Arc<dyn GroupRepository>,
    view_mode: ViewMode,
    filter_mode: FilterMode,
    selections: SelectionState,
}

impl GroupInspector {
    pub fn new(repository: Arc<dyn GroupRepository>) -> Self {
        Self::with_settings(repository, InspectorSettings::default())
    }

    pub fn with_settings(repository: Arc<dyn GroupRepository>, settings: InspectorSettings) -> Self {
        Self {
            repository,
            view_mode: settings.default_view_mode,
            filter_mode: settings.default_filter,
            selections: SelectionState::new(),
        }
    }

    /// Latest snapshot of the group.
    ///
    /// A group the repository does not know yields
    /// [`LagviewError::GroupUnavailable`], which is distinct from a group
    /// that exists but has no topics or members.
    pub async fn load(&self, group_id: &str) -> Result<GroupDescription> {
        self.repository
            .get_group(group_id)
            .await
            .ok_or_else(|| LagviewError::GroupUnavailable(group_id.to_string()))
    }

    /// Refresh the group's snapshot through the repository.
    pub async fn refresh(&self, group_id: &str, force: bool) -> Result<()> {
        debug!(group = group_id, force, "refreshing group");
        self.repository.refresh_group(group_id, force).await
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
    }

    /// Aggregated partitions for the current view mode and filter.
    pub fn partitions_view(&self, group: &GroupDescription) -> PartitionsView {
        let hide_zero_lag = self.filter_mode.hides_zero_lag();
        match self.view_mode {
            ViewMode::Topic => PartitionsView::Topics(compute_topic_view(group, hide_zero_lag)),
            ViewMode::Member => PartitionsView::Members(compute_member_view(group, hide_zero_lag)),
        }
    }

    /// Summary values for the statistics bar.
    pub fn statistics(&self, group: &GroupDescription) -> GroupStatistics {
        group.statistics()
    }

    /// Why editing the group's offsets is disabled, or `None` if allowed.
    pub fn edit_offsets_denied(&self, group: &GroupDescription) -> Option<DenialReason> {
        authorize::edit_offsets_denied(group, self.repository.cluster_capabilities())
    }

    /// Why deleting the group is disabled, or `None` if allowed.
    pub fn delete_group_denied(&self, group: &GroupDescription) -> Option<DenialReason> {
        authorize::delete_group_denied(group, self.repository.cluster_capabilities())
    }

    /// Why deleting the group's offsets is disabled, or `None` if allowed.
    pub fn delete_group_offsets_denied(&self, group: &GroupDescription) -> Option<DenialReason> {
        authorize::delete_group_offsets_denied(group, self.repository.cluster_capabilities())
    }

    /// Stage the whole group's offsets for an edit or delete workflow.
    pub fn stage_group(&mut self, kind: ActionKind, group: &GroupDescription) {
        self.selections.stage_group(kind, group);
    }

    /// Stage one topic's currently visible partitions.
    pub fn stage_topic(&mut self, kind: ActionKind, partitions: &[JoinedRecord]) {
        self.selections.stage_topic(kind, partitions);
    }

    /// Stage a single partition.
    pub fn stage_partition(&mut self, kind: ActionKind, record: &JoinedRecord) {
        self.selections.stage_partition(kind, record);
    }

    /// Drop the staged selection of the given kind.
    pub fn clear_selection(&mut self, kind: ActionKind) {
        self.selections.clear(kind);
    }

    /// The currently staged selection of the given kind.
    pub fn selection(&self, kind: ActionKind) -> Option<&OffsetSelection> {
        self.selections.selection(kind)
    }
}
