use std::collections::HashMap;

use contracts::domain::timetable::Timetable;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

mod timetable {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "timetables")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod timetable_lesson {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "timetable_lessons")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub timetable_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub lesson_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<timetable::Model> for Timetable {
    fn from(m: timetable::Model) -> Self {
        Timetable {
            id: m.id,
            name: m.name,
        }
    }
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Timetable>, u64), DbErr> {
    let paginator = timetable::Entity::find()
        .order_by_asc(timetable::Column::Name)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Timetable>, DbErr> {
    let model = timetable::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &Timetable) -> Result<(), DbErr> {
    let active = timetable::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<(), DbErr> {
    timetable_lesson::Entity::delete_many()
        .filter(timetable_lesson::Column::TimetableId.eq(id))
        .exec(db)
        .await?;
    timetable::Entity::delete_many()
        .filter(timetable::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Timetable each of the given lessons belongs to, if any.
pub async fn memberships_for_lessons<C: ConnectionTrait>(
    db: &C,
    lesson_ids: &[i64],
) -> Result<HashMap<i64, String>, DbErr> {
    if lesson_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links = timetable_lesson::Entity::find()
        .filter(timetable_lesson::Column::LessonId.is_in(lesson_ids.to_vec()))
        .all(db)
        .await?;
    Ok(links
        .into_iter()
        .map(|l| (l.lesson_id, l.timetable_id))
        .collect())
}

/// Replaces the lesson's timetable membership. `None` detaches it.
pub async fn set_for_lesson<C: ConnectionTrait>(
    db: &C,
    lesson_id: i64,
    timetable_id: Option<&str>,
) -> Result<(), DbErr> {
    timetable_lesson::Entity::delete_many()
        .filter(timetable_lesson::Column::LessonId.eq(lesson_id))
        .exec(db)
        .await?;
    if let Some(timetable_id) = timetable_id {
        let link = timetable_lesson::ActiveModel {
            timetable_id: Set(timetable_id.to_string()),
            lesson_id: Set(lesson_id),
        };
        link.insert(db).await?;
    }
    Ok(())
}

pub async fn detach_lessons<C: ConnectionTrait>(db: &C, lesson_ids: &[i64]) -> Result<(), DbErr> {
    timetable_lesson::Entity::delete_many()
        .filter(timetable_lesson::Column::LessonId.is_in(lesson_ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
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

    #[tokio::test]
    async fn test_set_for_lesson_replaces_membership() {
        let db = test_db().await;
        set_for_lesson(&db, 1, Some("tt1")).await.unwrap();
        set_for_lesson(&db, 1, Some("tt2")).await.unwrap();
        let memberships = memberships_for_lessons(&db, &[1]).await.unwrap();
        assert_eq!(memberships.get(&1).map(String::as_str), Some("tt2"));
        set_for_lesson(&db, 1, None).await.unwrap();
        assert!(memberships_for_lessons(&db, &[1]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detach_lessons_is_scoped() {
        let db = test_db().await;
        set_for_lesson(&db, 1, Some("tt1")).await.unwrap();
        set_for_lesson(&db, 2, Some("tt1")).await.unwrap();
        detach_lessons(&db, &[1]).await.unwrap();
        let memberships = memberships_for_lessons(&db, &[1, 2]).await.unwrap();
        assert!(!memberships.contains_key(&1));
        assert!(memberships.contains_key(&2));
    }
}
