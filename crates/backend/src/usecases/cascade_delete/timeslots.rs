use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::info;

use super::{constraint_instance_deleter, lessons_deleter};
use crate::domain::timeslot::repository as timeslot_repository;
use crate::shared::error::ApiError;

/// Deletes timeslots with their lessons and referencing constraint
/// instances, all or nothing.
pub async fn execute<C>(db: &C, ids: &[String]) -> Result<(), ApiError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if ids.is_empty() {
        return Err(ApiError::validation("No timeslot ids were given"));
    }
    let found = timeslot_repository::count_by_ids(db, ids).await?;
    if found != ids.len() as u64 {
        return Err(ApiError::not_found("Could not find a timeslot with this id"));
    }
    let txn = db.begin().await?;
    lessons_deleter::delete_for_timeslots(&txn, ids).await?;
    constraint_instance_deleter::remove_instances_referencing(&txn, ids).await?;
    timeslot_repository::delete_by_ids(&txn, ids).await?;
    txn.commit().await?;
    info!("Deleted {} timeslot(s)", ids.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lesson::repository as lesson_repository;
    use crate::domain::timeslot::repository as timeslot_repository;
    use crate::shared::data::db::create_schema;
    use contracts::domain::lesson::Lesson;
    use contracts::domain::timeslot::Timeslot;
    use contracts::enums::day::Day;
    use sea_orm::{Database, DatabaseConnection};

    async fn seed(db: &DatabaseConnection) {
        for (id, day) in [("s1", Day::Monday), ("s2", Day::Tuesday)] {
            timeslot_repository::insert(
                db,
                &Timeslot {
                    id: id.to_string(),
                    day,
                    slot: 1,
                    tags: vec![],
                },
            )
            .await
            .unwrap();
        }
        for (id, slot) in [(1, "s1"), (2, "s2")] {
            lesson_repository::insert(
                db,
                &Lesson {
                    id,
                    year: 2024,
                    room_id: "r1".to_string(),
                    timeslot_id: slot.to_string(),
                    timetable_id: None,
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        seed(&db).await;
        let result = execute(&db, &[]).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(timeslot_repository::find_by_id(&db, "s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cascade_removes_lessons_in_slot() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        seed(&db).await;

        execute(&db, &["s1".to_string()]).await.unwrap();

        assert!(timeslot_repository::find_by_id(&db, "s1").await.unwrap().is_none());
        assert!(lesson_repository::find_by_id(&db, 1).await.unwrap().is_none());
        assert!(lesson_repository::find_by_id(&db, 2).await.unwrap().is_some());
    }
}
