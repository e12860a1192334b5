use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};

mod settings {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "server_settings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i32,
        pub current_year: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

// The settings table holds a single row seeded at schema creation.
const SETTINGS_ROW: i32 = 1;

pub async fn get_current_year<C: ConnectionTrait>(db: &C) -> Result<i32, DbErr> {
    let row = settings::Entity::find_by_id(SETTINGS_ROW)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("server settings row is missing".into()))?;
    Ok(row.current_year)
}

pub async fn set_current_year<C: ConnectionTrait>(db: &C, year: i32) -> Result<(), DbErr> {
    let active = settings::ActiveModel {
        id: Set(SETTINGS_ROW),
        current_year: Set(year),
    };
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::create_schema;
    use sea_orm::Database;

    #[tokio::test]
    async fn test_year_is_seeded_and_updatable() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        assert!(get_current_year(&db).await.unwrap() > 0);
        set_current_year(&db, 2031).await.unwrap();
        assert_eq!(get_current_year(&db).await.unwrap(), 2031);
    }
}
