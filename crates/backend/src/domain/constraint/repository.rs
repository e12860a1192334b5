use contracts::domain::constraint::{ConstraintInstance, ConstraintSignature};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::shared::data::specification::SpecificationBuilder;

mod signature {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "constraint_signatures")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub description: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod instance {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "constraint_instances")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub signature_id: String,
        pub arguments: Json,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<signature::Model> for ConstraintSignature {
    fn from(m: signature::Model) -> Self {
        ConstraintSignature {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }
}

/// A stored `arguments` value must be a JSON array of strings; anything
/// else would let a corrupt instance slip past the deletion scan.
fn to_instance(m: instance::Model) -> Result<ConstraintInstance, DbErr> {
    let arguments = match serde_json::from_value(m.arguments) {
        Ok(arguments) => arguments,
        Err(err) => {
            return Err(DbErr::Custom(format!(
                "malformed arguments on constraint instance {}: {err}",
                m.id
            )))
        }
    };
    Ok(ConstraintInstance {
        id: m.id,
        signature_id: m.signature_id,
        arguments,
    })
}

pub async fn list_signatures<C: ConnectionTrait>(
    db: &C,
    search: Option<&str>,
    page: u64,
    page_size: u64,
) -> Result<(Vec<ConstraintSignature>, u64), DbErr> {
    let condition = SpecificationBuilder::new()
        .search(search, &[signature::Column::Name, signature::Column::Description])
        .build();
    let paginator = signature::Entity::find()
        .filter(condition)
        .order_by_asc(signature::Column::Name)
        .paginate(db, page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn find_signature_by_id<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<ConstraintSignature>, DbErr> {
    let model = signature::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn insert_signature<C: ConnectionTrait>(
    db: &C,
    record: &ConstraintSignature,
) -> Result<(), DbErr> {
    let active = signature::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
        description: Set(record.description.clone()),
    };
    active.insert(db).await?;
    Ok(())
}

/// All stored instances. Arguments carry no foreign keys, so callers that
/// look for references must scan the whole table.
pub async fn list_instances<C: ConnectionTrait>(db: &C) -> Result<Vec<ConstraintInstance>, DbErr> {
    let models = instance::Entity::find()
        .order_by_asc(instance::Column::Id)
        .all(db)
        .await?;
    models.into_iter().map(to_instance).collect()
}

pub async fn list_instances_for_signature<C: ConnectionTrait>(
    db: &C,
    signature_id: &str,
) -> Result<Vec<ConstraintInstance>, DbErr> {
    let models = instance::Entity::find()
        .filter(instance::Column::SignatureId.eq(signature_id))
        .order_by_asc(instance::Column::Id)
        .all(db)
        .await?;
    models.into_iter().map(to_instance).collect()
}

pub async fn insert_instance<C: ConnectionTrait>(
    db: &C,
    record: &ConstraintInstance,
) -> Result<(), DbErr> {
    let active = instance::ActiveModel {
        id: Set(record.id.clone()),
        signature_id: Set(record.signature_id.clone()),
        arguments: Set(serde_json::json!(record.arguments)),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn delete_instances_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
) -> Result<u64, DbErr> {
    let result = instance::Entity::delete_many()
        .filter(instance::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
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
    async fn test_instance_arguments_survive_storage() {
        let db = test_db().await;
        insert_signature(
            &db,
            &ConstraintSignature {
                id: "sig1".into(),
                name: "RoomConflict".into(),
                description: "No two lessons in one room at once".into(),
            },
        )
        .await
        .unwrap();
        insert_instance(
            &db,
            &ConstraintInstance {
                id: "c1".into(),
                signature_id: "sig1".into(),
                arguments: vec!["r1".into(), "s2".into()],
            },
        )
        .await
        .unwrap();
        let instances = list_instances(&db).await.unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].arguments, vec!["r1", "s2"]);
    }

    #[tokio::test]
    async fn test_non_array_arguments_are_an_error() {
        use sea_orm::{DatabaseBackend, Statement};

        let db = test_db().await;
        db.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "INSERT INTO constraint_instances (id, signature_id, arguments) \
             VALUES ('bad', 'sig1', '{\"not\":\"an array\"}');"
                .to_string(),
        ))
        .await
        .unwrap();
        assert!(list_instances(&db).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = test_db().await;
        insert_signature(
            &db,
            &ConstraintSignature {
                id: "sig1".into(),
                name: "X".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        for id in ["c1", "c2"] {
            insert_instance(
                &db,
                &ConstraintInstance {
                    id: id.into(),
                    signature_id: "sig1".into(),
                    arguments: vec![],
                },
            )
            .await
            .unwrap();
        }
        let removed = delete_instances_by_ids(&db, &["c1".into(), "missing".into()])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(list_instances(&db).await.unwrap().len(), 1);
    }
}
