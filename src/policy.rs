//! Ownership policy for user-scoped resources.
//!
//! Tracks and collections belong to the user that created them; mutating or
//! nesting them requires ownership, and the admin flag overrides ownership
//! everywhere. An id that resolves to no row is treated identically to an
//! ownership mismatch, so callers cannot distinguish "not yours" from
//! "does not exist".

use crate::database::operations::DataOps;
use crate::error::ApiError;
use crate::middleware::Principal;

/// The ownership decision: admins bypass ownership, everyone else must own
/// the resource. `owner` is `None` when the id resolved to no row.
pub fn owner_or_admin(principal: &Principal, owner: Option<i32>) -> bool {
    principal.is_admin || owner == Some(principal.user_id)
}

/// Require that the principal may mutate the given track
pub async fn require_track_owner(
    ops: &dyn DataOps,
    principal: &Principal,
    track_id: i32,
) -> Result<(), ApiError> {
    let owner = ops.track_owner(track_id).await?;

    if owner_or_admin(principal, owner) {
        Ok(())
    } else {
        Err(ApiError::not_authorized("Not authorized to modify this track"))
    }
}

/// Require that the principal may mutate the given collection
pub async fn require_collection_owner(
    ops: &dyn DataOps,
    principal: &Principal,
    collection_id: i32,
) -> Result<(), ApiError> {
    let owner = ops.collection_owner(collection_id).await?;

    if owner_or_admin(principal, owner) {
        Ok(())
    } else {
        Err(ApiError::not_authorized(
            "Not authorized to modify this collection",
        ))
    }
}
