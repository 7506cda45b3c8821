//! Offset action authorization
//!
//! Advisory predicates deciding whether the edit/delete actions on a group
//! are permitted. A denied action is never an error: the caller disables
//! the corresponding control and surfaces the [`DenialReason`] as the
//! explanation. Checks run in fixed precedence order and the first
//! applicable reason wins; lower-precedence reasons are not evaluated.

use crate::group::description::GroupDescription;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cluster-level feature support relevant to group actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCapabilities {
    /// The cluster supports patching group offsets
    pub patch_group: bool,
    /// The cluster supports deleting groups
    pub delete_group: bool,
    /// The cluster supports deleting individual group offsets
    pub delete_group_offsets: bool,
}

impl ClusterCapabilities {
    /// Capabilities of a cluster that supports every group action.
    pub fn full() -> Self {
        Self {
            patch_group: true,
            delete_group: true,
            delete_group_offsets: true,
        }
    }
}

/// Reason an edit/delete action is not permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("You don't have 'editConsumerGroup' permissions for this group")]
    MissingEditPermission,

    #[error("You don't have 'deleteConsumerGroup' permissions for this group")]
    MissingDeletePermission,

    #[error("Consumer groups with active members cannot be edited")]
    GroupInUseForEdit,

    #[error("Consumer groups with active members cannot be deleted")]
    GroupInUseForDelete,

    #[error("This cluster does not support editing group offsets")]
    PatchGroupUnsupported,

    #[error("This cluster does not support deleting groups")]
    DeleteGroupUnsupported,

    #[error("This cluster does not support deleting group offsets")]
    DeleteGroupOffsetsUnsupported,
}

/// Why editing the group's offsets is not allowed, or `None` if it is.
pub fn edit_offsets_denied(
    group: &GroupDescription,
    capabilities: ClusterCapabilities,
) -> Option<DenialReason> {
    if group.no_edit_perms {
        return Some(DenialReason::MissingEditPermission);
    }
    if group.is_in_use {
        return Some(DenialReason::GroupInUseForEdit);
    }
    if !capabilities.patch_group {
        return Some(DenialReason::PatchGroupUnsupported);
    }
    None
}

/// Why deleting the whole group is not allowed, or `None` if it is.
pub fn delete_group_denied(
    group: &GroupDescription,
    capabilities: ClusterCapabilities,
) -> Option<DenialReason> {
    if group.no_delete_perms {
        return Some(DenialReason::MissingDeletePermission);
    }
    if group.is_in_use {
        return Some(DenialReason::GroupInUseForDelete);
    }
    if !capabilities.delete_group {
        return Some(DenialReason::DeleteGroupUnsupported);
    }
    None
}

/// Why deleting a subset of the group's offsets is not allowed, or `None`
/// if it is. Offset deletion is gated by the *edit* permission, not the
/// delete permission; the same permission governs both offset mutations.
pub fn delete_group_offsets_denied(
    group: &GroupDescription,
    capabilities: ClusterCapabilities,
) -> Option<DenialReason> {
    if group.no_edit_perms {
        return Some(DenialReason::MissingEditPermission);
    }
    if group.is_in_use {
        return Some(DenialReason::GroupInUseForDelete);
    }
    if !capabilities.delete_group_offsets {
        return Some(DenialReason::DeleteGroupOffsetsUnsupported);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::description::GroupState;

    fn group(no_edit_perms: bool, no_delete_perms: bool, is_in_use: bool) -> GroupDescription {
        GroupDescription {
            group_id: "billing".to_string(),
            state: GroupState::Empty,
            protocol_type: "consumer".to_string(),
            coordinator_id: 0,
            lag_sum: 0,
            topic_offsets: vec![],
            members: vec![],
            no_edit_perms,
            no_delete_perms,
            is_in_use,
        }
    }

    #[test]
    fn test_all_actions_allowed() {
        let g = group(false, false, false);
        let caps = ClusterCapabilities::full();
        assert_eq!(edit_offsets_denied(&g, caps), None);
        assert_eq!(delete_group_denied(&g, caps), None);
        assert_eq!(delete_group_offsets_denied(&g, caps), None);
    }

    #[test]
    fn test_edit_permission_takes_precedence_over_in_use() {
        let g = group(true, false, true);
        assert_eq!(
            edit_offsets_denied(&g, ClusterCapabilities::full()),
            Some(DenialReason::MissingEditPermission)
        );
    }

    #[test]
    fn test_in_use_takes_precedence_over_capability() {
        let g = group(false, false, true);
        let caps = ClusterCapabilities::default();
        assert_eq!(
            edit_offsets_denied(&g, caps),
            Some(DenialReason::GroupInUseForEdit)
        );
        assert_eq!(
            delete_group_denied(&g, caps),
            Some(DenialReason::GroupInUseForDelete)
        );
    }

    #[test]
    fn test_missing_capabilities() {
        let g = group(false, false, false);
        let caps = ClusterCapabilities::default();
        assert_eq!(
            edit_offsets_denied(&g, caps),
            Some(DenialReason::PatchGroupUnsupported)
        );
        assert_eq!(
            delete_group_denied(&g, caps),
            Some(DenialReason::DeleteGroupUnsupported)
        );
        assert_eq!(
            delete_group_offsets_denied(&g, caps),
            Some(DenialReason::DeleteGroupOffsetsUnsupported)
        );
    }

    #[test]
    fn test_offset_deletion_gated_by_edit_permission() {
        // Delete permission alone does not allow offset deletion.
        let g = group(true, false, false);
        assert_eq!(
            delete_group_offsets_denied(&g, ClusterCapabilities::full()),
            Some(DenialReason::MissingEditPermission)
        );

        // Missing delete permission does not block offset deletion.
        let g = group(false, true, false);
        assert_eq!(
            delete_group_offsets_denied(&g, ClusterCapabilities::full()),
            None
        );
        assert_eq!(
            delete_group_denied(&g, ClusterCapabilities::full()),
            Some(DenialReason::MissingDeletePermission)
        );
    }

    #[test]
    fn test_reason_messages() {
        assert_eq!(
            DenialReason::GroupInUseForEdit.to_string(),
            "Consumer groups with active members cannot be edited"
        );
        assert_eq!(
            DenialReason::MissingEditPermission.to_string(),
            "You don't have 'editConsumerGroup' permissions for this group"
        );
    }
}
