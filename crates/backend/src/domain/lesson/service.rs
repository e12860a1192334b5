use contracts::domain::lesson::{Lesson, LessonRequest};
use contracts::shared::page::Page;

use super::repository::{self, LessonFilter};
use crate::domain::room::repository as room_repository;
use crate::domain::timeslot::repository as timeslot_repository;
use crate::domain::timetable::repository as timetable_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use crate::usecases::cascade_delete::lessons_deleter;

pub async fn get(
    page: u64,
    page_size: u64,
    filter: LessonFilter,
) -> Result<Page<Lesson>, ApiError> {
    let (items, total) = repository::list(get_connection(), &filter, page, page_size).await?;
    Ok(Page::new(items, total, page, page_size))
}

pub async fn get_by_id(id: i64) -> Result<Lesson, ApiError> {
    repository::find_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find a lesson with this id"))
}

pub async fn create(request: LessonRequest) -> Result<Lesson, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    if repository::exists(db, request.id).await? {
        return Err(ApiError::validation("A lesson with this id already exists"));
    }
    check_references(db, &request).await?;
    let record = to_record(request.id, request);
    repository::insert(db, &record).await?;
    Ok(record)
}

pub async fn update(id: i64, request: LessonRequest) -> Result<Lesson, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let db = get_connection();
    if !repository::exists(db, id).await? {
        return Err(ApiError::not_found("Could not find a lesson with this id"));
    }
    check_references(db, &request).await?;
    let record = to_record(id, request);
    repository::update(db, &record).await?;
    Ok(record)
}

pub async fn delete(id: i64) -> Result<(), ApiError> {
    let db = get_connection();
    if !repository::exists(db, id).await? {
        return Err(ApiError::not_found("Could not find a lesson with this id"));
    }
    lessons_deleter::delete_lessons(db, &[id]).await?;
    Ok(())
}

fn to_record(id: i64, request: LessonRequest) -> Lesson {
    Lesson {
        id,
        year: request.year,
        room_id: request.room_id,
        timeslot_id: request.timeslot_id,
        timetable_id: request.timetable_id,
    }
}

/// A lesson may only point at stored entities; a dangling reference in the
/// payload is a client error, not a missing resource.
async fn check_references<C: sea_orm::ConnectionTrait>(
    db: &C,
    request: &LessonRequest,
) -> Result<(), ApiError> {
    if room_repository::find_by_id(db, &request.room_id).await?.is_none() {
        return Err(ApiError::validation("The referenced room does not exist"));
    }
    if timeslot_repository::find_by_id(db, &request.timeslot_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation("The referenced timeslot does not exist"));
    }
    if let Some(timetable_id) = &request.timetable_id {
        if timetable_repository::find_by_id(db, timetable_id)
            .await?
            .is_none()
        {
            return Err(ApiError::validation(
                "The referenced timetable does not exist",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::create_schema;
    use contracts::domain::room::Room;
    use contracts::domain::timeslot::Timeslot;
    use contracts::enums::day::Day;
    use sea_orm::{Database, DatabaseConnection};

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        room_repository::insert(
            &db,
            &Room {
                id: "r1".into(),
                name: "Alpha".into(),
                building_name: "Main".into(),
                capacity: 30,
                tags: vec![],
            },
        )
        .await
        .unwrap();
        timeslot_repository::insert(
            &db,
            &Timeslot {
                id: "s1".into(),
                day: Day::Monday,
                slot: 1,
                tags: vec![],
            },
        )
        .await
        .unwrap();
        db
    }

    fn request(room: &str, timeslot: &str, timetable: Option<&str>) -> LessonRequest {
        LessonRequest {
            id: 1,
            year: 2024,
            room_id: room.to_string(),
            timeslot_id: timeslot.to_string(),
            timetable_id: timetable.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_dangling_references_are_validation_errors() {
        let db = test_db().await;
        let missing_room = check_references(&db, &request("ghost", "s1", None)).await;
        assert!(matches!(missing_room, Err(ApiError::Validation(_))));
        let missing_slot = check_references(&db, &request("r1", "ghost", None)).await;
        assert!(matches!(missing_slot, Err(ApiError::Validation(_))));
        let missing_timetable = check_references(&db, &request("r1", "s1", Some("ghost"))).await;
        assert!(matches!(missing_timetable, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_stored_references_pass() {
        let db = test_db().await;
        assert!(check_references(&db, &request("r1", "s1", None)).await.is_ok());
    }
}
