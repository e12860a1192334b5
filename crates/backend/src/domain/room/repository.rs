use std::collections::{HashMap, HashSet};

use contracts::domain::room::Room;
use contracts::domain::tag::Tag;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::shared::data::specification::SpecificationBuilder;

mod room {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "rooms")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub building_name: String,
        pub capacity: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod room_tag {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "room_tags")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub room_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub tag_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Optional criteria for the room listing.
#[derive(Debug, Default, Clone)]
pub struct RoomFilter {
    pub search: Option<String>,
    pub min_capacity: Option<i32>,
    pub tag_ids: Option<Vec<String>>,
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &RoomFilter,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Room>, u64), DbErr> {
    let condition = SpecificationBuilder::new()
        .search(
            filter.search.as_deref(),
            &[room::Column::Name, room::Column::BuildingName],
        )
        .and_gte(filter.min_capacity, room::Column::Capacity)
        .and_join_in(
            filter.tag_ids.as_deref(),
            room::Column::Id,
            room_tag::Entity,
            room_tag::Column::RoomId,
            room_tag::Column::TagId,
        )
        .build();
    let paginator = room::Entity::find()
        .filter(condition)
        .order_by_asc(room::Column::Name)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    let rooms = attach_tags(db, models).await?;
    Ok((rooms, total))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Room>, DbErr> {
    let Some(model) = room::Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };
    let mut rooms = attach_tags(db, vec![model]).await?;
    Ok(rooms.pop())
}

pub async fn count_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<u64, DbErr> {
    room::Entity::find()
        .filter(room::Column::Id.is_in(ids.to_vec()))
        .count(db)
        .await
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &Room) -> Result<(), DbErr> {
    let active = room::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
        building_name: Set(record.building_name.clone()),
        capacity: Set(record.capacity),
    };
    active.insert(db).await?;
    link_tags(db, &record.id, &record.tags).await
}

pub async fn update<C: ConnectionTrait>(db: &C, record: &Room) -> Result<(), DbErr> {
    let active = room::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
        building_name: Set(record.building_name.clone()),
        capacity: Set(record.capacity),
    };
    active.update(db).await?;
    room_tag::Entity::delete_many()
        .filter(room_tag::Column::RoomId.eq(record.id.clone()))
        .exec(db)
        .await?;
    link_tags(db, &record.id, &record.tags).await
}

pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<(), DbErr> {
    room_tag::Entity::delete_many()
        .filter(room_tag::Column::RoomId.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    room::Entity::delete_many()
        .filter(room::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}

/// Drops room memberships of the given tags, leaving the rooms themselves.
pub async fn remove_memberships_for_tags<C: ConnectionTrait>(
    db: &C,
    tag_ids: &[String],
) -> Result<(), DbErr> {
    room_tag::Entity::delete_many()
        .filter(room_tag::Column::TagId.is_in(tag_ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}

async fn link_tags<C: ConnectionTrait>(db: &C, room_id: &str, tags: &[Tag]) -> Result<(), DbErr> {
    for tag in tags {
        let link = room_tag::ActiveModel {
            room_id: Set(room_id.to_string()),
            tag_id: Set(tag.id.clone()),
        };
        link.insert(db).await?;
    }
    Ok(())
}

async fn attach_tags<C: ConnectionTrait>(
    db: &C,
    models: Vec<room::Model>,
) -> Result<Vec<Room>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let room_ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let links = room_tag::Entity::find()
        .filter(room_tag::Column::RoomId.is_in(room_ids))
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
    let mut tags_by_room: HashMap<String, Vec<Tag>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags_by_id.get(&link.tag_id) {
            tags_by_room.entry(link.room_id).or_default().push(tag.clone());
        }
    }
    Ok(models
        .into_iter()
        .map(|m| {
            let tags = tags_by_room.remove(&m.id).unwrap_or_default();
            Room {
                id: m.id,
                name: m.name,
                building_name: m.building_name,
                capacity: m.capacity,
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

    fn tag(id: &str, name: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn sample_room(id: &str, name: &str, capacity: i32, tags: Vec<Tag>) -> Room {
        Room {
            id: id.to_string(),
            name: name.to_string(),
            building_name: "Main".to_string(),
            capacity,
            tags,
        }
    }

    async fn seed(db: &DatabaseConnection) {
        for t in [tag("t1", "projector"), tag("t2", "whiteboard")] {
            tag_repository::insert(db, &t).await.unwrap();
        }
        insert(db, &sample_room("a", "Alpha", 30, vec![tag("t1", "projector")]))
            .await
            .unwrap();
        insert(
            db,
            &sample_room(
                "b",
                "Beta",
                100,
                vec![tag("t1", "projector"), tag("t2", "whiteboard")],
            ),
        )
        .await
        .unwrap();
        insert(db, &sample_room("c", "Gamma", 10, vec![])).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_then_find_returns_tags() {
        let db = test_db().await;
        seed(&db).await;
        let found = find_by_id(&db, "b").await.unwrap().unwrap();
        assert_eq!(found.name, "Beta");
        assert_eq!(found.tags.len(), 2);
    }

    #[tokio::test]
    async fn test_list_without_criteria_returns_everything() {
        let db = test_db().await;
        seed(&db).await;
        let (rooms, total) = list(&db, &RoomFilter::default(), 0, 10).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_filtered_list_is_subset_of_unfiltered() {
        let db = test_db().await;
        seed(&db).await;
        let filter = RoomFilter {
            min_capacity: Some(20),
            ..Default::default()
        };
        let (rooms, total) = list(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert!(rooms.iter().all(|r| r.capacity >= 20));
    }

    #[tokio::test]
    async fn test_tag_filter_keeps_rooms_with_any_listed_tag() {
        let db = test_db().await;
        seed(&db).await;
        let filter = RoomFilter {
            tag_ids: Some(vec!["t2".to_string()]),
            ..Default::default()
        };
        let (rooms, total) = list(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rooms[0].id, "b");
    }

    #[tokio::test]
    async fn test_combined_criteria_intersect() {
        let db = test_db().await;
        seed(&db).await;
        let filter = RoomFilter {
            search: Some("a".to_string()),
            min_capacity: Some(20),
            tag_ids: Some(vec!["t1".to_string()]),
        };
        let (rooms, _) = list(&db, &filter, 0, 10).await.unwrap();
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_update_replaces_tag_links() {
        let db = test_db().await;
        seed(&db).await;
        let mut record = find_by_id(&db, "b").await.unwrap().unwrap();
        record.tags = vec![tag("t2", "whiteboard")];
        update(&db, &record).await.unwrap();
        let found = find_by_id(&db, "b").await.unwrap().unwrap();
        assert_eq!(found.tags.len(), 1);
        assert_eq!(found.tags[0].id, "t2");
    }

    #[tokio::test]
    async fn test_remove_memberships_keeps_rooms() {
        let db = test_db().await;
        seed(&db).await;
        remove_memberships_for_tags(&db, &["t1".to_string()]).await.unwrap();
        let found = find_by_id(&db, "a").await.unwrap().unwrap();
        assert!(found.tags.is_empty());
        assert_eq!(count_by_ids(&db, &["a".to_string()]).await.unwrap(), 1);
    }
}
