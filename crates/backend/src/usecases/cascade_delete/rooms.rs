use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::info;

use super::{constraint_instance_deleter, lessons_deleter};
use crate::domain::room::repository as room_repository;
use crate::shared::error::ApiError;

/// Deletes rooms with everything that depends on them. Either every id
/// resolves to a stored room and the whole batch is removed, or nothing
/// changes.
pub async fn execute<C>(db: &C, ids: &[String]) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if ids.is_empty() {
        return Err(ApiError::validation("No room ids were given"));
    }
    let found = room_repository::count_by_ids(db, ids).await?;
    if found != ids.len() as u64 {
        return Err(ApiError::not_found("Could not find a room with this id"));
    }
    let txn = db.begin().await?;
    lessons_deleter::delete_for_rooms(&txn, ids).await?;
    constraint_instance_deleter::remove_instances_referencing(&txn, ids).await?;
    room_repository::delete_by_ids(&txn, ids).await?;
    txn.commit().await?;
    info!("Deleted {} room(s)", ids.len());
    Ok(())
}
