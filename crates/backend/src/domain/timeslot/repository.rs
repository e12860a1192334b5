use std::collections::{HashMap, HashSet};

use contracts::domain::tag::Tag;
use contracts::domain::timeslot::Timeslot;
use contracts::enums::day::Day;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::shared::data::specification::SpecificationBuilder;

mod timeslot {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "timeslots")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub day: String,
        pub slot: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod timeslot_tag {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "timeslot_tags")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub timeslot_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub tag_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Optional criteria for the timeslot listing.
#[derive(Debug, Default, Clone)]
pub struct TimeslotFilter {
    pub day: Option<Day>,
    pub tag_ids: Option<Vec<String>>,
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &TimeslotFilter,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Timeslot>, u64), DbErr> {
    let condition = SpecificationBuilder::new()
        .and_eq(
            filter.day.map(|d| d.code().to_string()),
            timeslot::Column::Day,
        )
        .and_join_in(
            filter.tag_ids.as_deref(),
            timeslot::Column::Id,
            timeslot_tag::Entity,
            timeslot_tag::Column::TimeslotId,
            timeslot_tag::Column::TagId,
        )
        .build();
    let paginator = timeslot::Entity::find()
        .filter(condition)
        .order_by_asc(timeslot::Column::Day)
        .order_by_asc(timeslot::Column::Slot)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    let timeslots = attach_tags(db, models).await?;
    Ok((timeslots, total))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Timeslot>, DbErr> {
    let Some(model) = timeslot::Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };
    let mut timeslots = attach_tags(db, vec![model]).await?;
    Ok(timeslots.pop())
}

pub async fn count_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<u64, DbErr> {
    timeslot::Entity::find()
        .filter(timeslot::Column::Id.is_in(ids.to_vec()))
        .count(db)
        .await
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &Timeslot) -> Result<(), DbErr> {
    let active = timeslot::ActiveModel {
        id: Set(record.id.clone()),
        day: Set(record.day.code().to_string()),
        slot: Set(record.slot),
    };
    active.insert(db).await?;
    link_tags(db, &record.id, &record.tags).await
}

pub async fn update<C: ConnectionTrait>(db: &C, record: &Timeslot) -> Result<(), DbErr> {
    let active = timeslot::ActiveModel {
        id: Set(record.id.clone()),
        day: Set(record.day.code().to_string()),
        slot: Set(record.slot),
    };
    active.update(db).await?;
    timeslot_tag::Entity::delete_many()
        .filter(timeslot_tag::Column::TimeslotId.eq(record.id.clone()))
        .exec(db)
        .await?;
    link_tags(db, &record.id, &record.tags).await
}

pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<(), DbErr> {
    timeslot_tag::Entity::delete_many()
        .filter(timeslot_tag::Column::TimeslotId.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    timeslot::Entity::delete_many()
        .filter(timeslot::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}

/// Drops timeslot memberships of the given tags, leaving the timeslots.
pub async fn remove_memberships_for_tags<C: ConnectionTrait>(
    db: &C,
    tag_ids: &[String],
) -> Result<(), DbErr> {
    timeslot_tag::Entity::delete_many()
        .filter(timeslot_tag::Column::TagId.is_in(tag_ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}

async fn link_tags<C: ConnectionTrait>(
    db: &C,
    timeslot_id: &str,
    tags: &[Tag],
) -> Result<(), DbErr> {
    for tag in tags {
        let link = timeslot_tag::ActiveModel {
            timeslot_id: Set(timeslot_id.to_string()),
            tag_id: Set(tag.id.clone()),
        };
        link.insert(db).await?;
    }
    Ok(())
}

async fn attach_tags<C: ConnectionTrait>(
    db: &C,
    models: Vec<timeslot::Model>,
) -> Result<Vec<Timeslot>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let timeslot_ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let links = timeslot_tag::Entity::find()
        .filter(timeslot_tag::Column::TimeslotId.is_in(timeslot_ids))
        .all(db)
        .await?;
    let tag_ids: Vec<String> = links
        .iter()
        .map(|l| l.tag_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let tags = crate::domain::tag::repository::find_by_ids(db, &tag_ids).await?;
    let tags_by_id: HashMap<String, Tag> = tags.into_iter().map(|t| (t.id.clone(), t)).collect();
    let mut tags_by_slot: HashMap<String, Vec<Tag>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags_by_id.get(&link.tag_id) {
            tags_by_slot
                .entry(link.timeslot_id)
                .or_default()
                .push(tag.clone());
        }
    }
    Ok(models
        .into_iter()
        .map(|m| {
            let tags = tags_by_slot.remove(&m.id).unwrap_or_default();
            Timeslot {
                id: m.id,
                day: Day::from_code(&m.day).unwrap_or(Day::Monday),
                slot: m.slot,
                tags,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tag::repository as tag_repository;
    use crate::shared::data::db::create_schema;
    use sea_orm::{Database, DatabaseConnection};

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        db
    }

    fn tag(id: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    fn slot(id: &str, day: Day, slot: i32, tags: Vec<Tag>) -> Timeslot {
        Timeslot {
            id: id.to_string(),
            day,
            slot,
            tags,
        }
    }

    async fn seed(db: &DatabaseConnection) {
        for t in [tag("t1"), tag("t2")] {
            tag_repository::insert(db, &t).await.unwrap();
        }
        insert(db, &slot("s1", Day::Monday, 1, vec![tag("t1")]))
            .await
            .unwrap();
        insert(db, &slot("s2", Day::Monday, 2, vec![])).await.unwrap();
        insert(db, &slot("s3", Day::Friday, 1, vec![tag("t2")]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_round_trip_preserves_day_and_tags() {
        let db = test_db().await;
        seed(&db).await;
        let found = find_by_id(&db, "s3").await.unwrap().unwrap();
        assert_eq!(found.day, Day::Friday);
        assert_eq!(found.slot, 1);
        assert_eq!(found.tags.len(), 1);
    }

    #[tokio::test]
    async fn test_day_filter() {
        let db = test_db().await;
        seed(&db).await;
        let filter = TimeslotFilter {
            day: Some(Day::Monday),
            ..Default::default()
        };
        let (slots, total) = list(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert!(slots.iter().all(|s| s.day == Day::Monday));
    }

    #[tokio::test]
    async fn test_tag_filter() {
        let db = test_db().await;
        seed(&db).await;
        let filter = TimeslotFilter {
            tag_ids: Some(vec!["t1".to_string()]),
            ..Default::default()
        };
        let (slots, total) = list(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(slots[0].id, "s1");
    }
}
