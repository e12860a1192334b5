use contracts::domain::lesson::Lesson;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::timetable::repository as timetable_repository;
use crate::shared::data::specification::SpecificationBuilder;

mod lesson {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "lessons")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub year: i32,
        pub room_id: String,
        pub timeslot_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Optional criteria for the lesson listing.
#[derive(Debug, Default, Clone)]
pub struct LessonFilter {
    pub year: Option<i32>,
    pub room_id: Option<String>,
    pub timeslot_id: Option<String>,
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &LessonFilter,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Lesson>, u64), DbErr> {
    let condition = SpecificationBuilder::new()
        .and_eq(filter.year, lesson::Column::Year)
        .and_eq(filter.room_id.clone(), lesson::Column::RoomId)
        .and_eq(filter.timeslot_id.clone(), lesson::Column::TimeslotId)
        .build();
    let paginator = lesson::Entity::find()
        .filter(condition)
        .order_by_asc(lesson::Column::Id)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    let lessons = attach_timetables(db, models).await?;
    Ok((lessons, total))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Lesson>, DbErr> {
    let Some(model) = lesson::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut lessons = attach_timetables(db, vec![model]).await?;
    Ok(lessons.pop())
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
    let count = lesson::Entity::find()
        .filter(lesson::Column::Id.eq(id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_room_and_year<C: ConnectionTrait>(
    db: &C,
    room_id: &str,
    year: i32,
) -> Result<Vec<Lesson>, DbErr> {
    let models = lesson::Entity::find()
        .filter(lesson::Column::RoomId.eq(room_id))
        .filter(lesson::Column::Year.eq(year))
        .order_by_asc(lesson::Column::Id)
        .all(db)
        .await?;
    attach_timetables(db, models).await
}

pub async fn find_by_timeslot_and_year<C: ConnectionTrait>(
    db: &C,
    timeslot_id: &str,
    year: i32,
) -> Result<Vec<Lesson>, DbErr> {
    let models = lesson::Entity::find()
        .filter(lesson::Column::TimeslotId.eq(timeslot_id))
        .filter(lesson::Column::Year.eq(year))
        .order_by_asc(lesson::Column::Id)
        .all(db)
        .await?;
    attach_timetables(db, models).await
}

pub async fn ids_for_rooms<C: ConnectionTrait>(
    db: &C,
    room_ids: &[String],
) -> Result<Vec<i64>, DbErr> {
    let models = lesson::Entity::find()
        .filter(lesson::Column::RoomId.is_in(room_ids.to_vec()))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.id).collect())
}

pub async fn ids_for_timeslots<C: ConnectionTrait>(
    db: &C,
    timeslot_ids: &[String],
) -> Result<Vec<i64>, DbErr> {
    let models = lesson::Entity::find()
        .filter(lesson::Column::TimeslotId.is_in(timeslot_ids.to_vec()))
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.id).collect())
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &Lesson) -> Result<(), DbErr> {
    let active = lesson::ActiveModel {
        id: Set(record.id),
        year: Set(record.year),
        room_id: Set(record.room_id.clone()),
        timeslot_id: Set(record.timeslot_id.clone()),
    };
    active.insert(db).await?;
    timetable_repository::set_for_lesson(db, record.id, record.timetable_id.as_deref()).await
}

pub async fn update<C: ConnectionTrait>(db: &C, record: &Lesson) -> Result<(), DbErr> {
    let active = lesson::ActiveModel {
        id: Set(record.id),
        year: Set(record.year),
        room_id: Set(record.room_id.clone()),
        timeslot_id: Set(record.timeslot_id.clone()),
    };
    active.update(db).await?;
    timetable_repository::set_for_lesson(db, record.id, record.timetable_id.as_deref()).await
}

/// Deletes lesson rows only. Timetable memberships are removed separately
/// so callers control the mutation order.
pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[i64]) -> Result<(), DbErr> {
    lesson::Entity::delete_many()
        .filter(lesson::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}

async fn attach_timetables<C: ConnectionTrait>(
    db: &C,
    models: Vec<lesson::Model>,
) -> Result<Vec<Lesson>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut memberships = timetable_repository::memberships_for_lessons(db, &ids).await?;
    Ok(models
        .into_iter()
        .map(|m| Lesson {
            id: m.id,
            year: m.year,
            room_id: m.room_id,
            timeslot_id: m.timeslot_id,
            timetable_id: memberships.remove(&m.id),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::create_schema;
    use sea_orm::{Database, DatabaseConnection};

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        db
    }

    fn sample(id: i64, year: i32, room: &str, timetable: Option<&str>) -> Lesson {
        Lesson {
            id,
            year,
            room_id: room.to_string(),
            timeslot_id: "s1".to_string(),
            timetable_id: timetable.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_round_trip_keeps_timetable_membership() {
        let db = test_db().await;
        timetable_repository::insert(
            &db,
            &contracts::domain::timetable::Timetable {
                id: "tt1".to_string(),
                name: "2024".to_string(),
            },
        )
        .await
        .unwrap();
        insert(&db, &sample(1, 2024, "r1", Some("tt1"))).await.unwrap();
        insert(&db, &sample(2, 2024, "r1", None)).await.unwrap();
        let found = find_by_id(&db, 1).await.unwrap().unwrap();
        assert_eq!(found.timetable_id.as_deref(), Some("tt1"));
        let unplaced = find_by_id(&db, 2).await.unwrap().unwrap();
        assert_eq!(unplaced.timetable_id, None);
    }

    #[tokio::test]
    async fn test_year_filter() {
        let db = test_db().await;
        insert(&db, &sample(1, 2023, "r1", None)).await.unwrap();
        insert(&db, &sample(2, 2024, "r1", None)).await.unwrap();
        insert(&db, &sample(3, 2024, "r2", None)).await.unwrap();
        let filter = LessonFilter {
            year: Some(2024),
            ..Default::default()
        };
        let (lessons, total) = list(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert!(lessons.iter().all(|l| l.year == 2024));
    }

    #[tokio::test]
    async fn test_room_lessons_follow_the_stored_current_year() {
        use crate::domain::server::repository as server_repository;

        let db = test_db().await;
        server_repository::set_current_year(&db, 2025).await.unwrap();
        insert(&db, &sample(1, 2024, "r1", None)).await.unwrap();
        insert(&db, &sample(2, 2025, "r1", None)).await.unwrap();

        let year = server_repository::get_current_year(&db).await.unwrap();
        let lessons = find_by_room_and_year(&db, "r1", year).await.unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].id, 2);
    }

    #[tokio::test]
    async fn test_find_by_room_and_year() {
        let db = test_db().await;
        insert(&db, &sample(1, 2024, "r1", None)).await.unwrap();
        insert(&db, &sample(2, 2024, "r2", None)).await.unwrap();
        insert(&db, &sample(3, 2023, "r1", None)).await.unwrap();
        let lessons = find_by_room_and_year(&db, "r1", 2024).await.unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].id, 1);
    }
}
