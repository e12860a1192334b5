use contracts::domain::tag::Tag;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::shared::data::specification::SpecificationBuilder;

mod tag {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "tags")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<tag::Model> for Tag {
    fn from(m: tag::Model) -> Self {
        Tag {
            id: m.id,
            name: m.name,
        }
    }
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    search: Option<&str>,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Tag>, u64), DbErr> {
    let condition = SpecificationBuilder::new()
        .search(search, &[tag::Column::Name])
        .build();
    let paginator = tag::Entity::find()
        .filter(condition)
        .order_by_asc(tag::Column::Name)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Tag>, DbErr> {
    let model = tag::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<Vec<Tag>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let models = tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn count_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<u64, DbErr> {
    tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.to_vec()))
        .count(db)
        .await
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &Tag) -> Result<(), DbErr> {
    let active = tag::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, record: &Tag) -> Result<(), DbErr> {
    let active = tag::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
    };
    active.update(db).await?;
    Ok(())
}

pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<(), DbErr> {
    tag::Entity::delete_many()
        .filter(tag::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(())
}
