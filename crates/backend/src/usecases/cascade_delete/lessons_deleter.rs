use sea_orm::{ConnectionTrait, DbErr};

use crate::domain::lesson::repository as lesson_repository;
use crate::domain::timetable::repository as timetable_repository;

/// Removes lessons together with their timetable memberships. Memberships
/// go first so no timetable ever points at a missing lesson.
pub async fn delete_lessons<C: ConnectionTrait>(db: &C, lesson_ids: &[i64]) -> Result<(), DbErr> {
    if lesson_ids.is_empty() {
        return Ok(());
    }
    timetable_repository::detach_lessons(db, lesson_ids).await?;
    lesson_repository::delete_by_ids(db, lesson_ids).await
}

pub async fn delete_for_rooms<C: ConnectionTrait>(
    db: &C,
    room_ids: &[String],
) -> Result<(), DbErr> {
    let lesson_ids = lesson_repository::ids_for_rooms(db, room_ids).await?;
    delete_lessons(db, &lesson_ids).await
}

pub async fn delete_for_timeslots<C: ConnectionTrait>(
    db: &C,
    timeslot_ids: &[String],
) -> Result<(), DbErr> {
    let lesson_ids = lesson_repository::ids_for_timeslots(db, timeslot_ids).await?;
    delete_lessons(db, &lesson_ids).await
}
