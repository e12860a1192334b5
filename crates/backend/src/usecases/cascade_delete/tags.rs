use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::info;

use super::constraint_instance_deleter;
use crate::domain::room::repository as room_repository;
use crate::domain::tag::repository as tag_repository;
use crate::domain::timeslot::repository as timeslot_repository;
use crate::shared::error::ApiError;

/// Deletes tags, their room and timeslot memberships, and every constraint
/// instance naming them. Rooms and timeslots themselves stay.
pub async fn execute<C>(db: &C, ids: &[String]) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if ids.is_empty() {
        return Err(ApiError::validation("No tag ids were given"));
    }
    let found = tag_repository::count_by_ids(db, ids).await?;
    if found != ids.len() as u64 {
        return Err(ApiError::not_found("Could not find a tag with this id"));
    }
    let txn = db.begin().await?;
    room_repository::remove_memberships_for_tags(&txn, ids).await?;
    timeslot_repository::remove_memberships_for_tags(&txn, ids).await?;
    constraint_instance_deleter::remove_instances_referencing(&txn, ids).await?;
    tag_repository::delete_by_ids(&txn, ids).await?;
    txn.commit().await?;
    info!("Deleted {} tag(s)", ids.len());
    Ok(())
}
