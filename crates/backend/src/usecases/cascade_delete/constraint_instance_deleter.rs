use sea_orm::{ConnectionTrait, DbErr};
use tracing::debug;

use crate::domain::constraint::repository as constraint_repository;

/// Purges constraint instances whose arguments mention any of the given
/// entity ids. Arguments are opaque strings, so the whole table is scanned
/// and matched in memory.
pub async fn remove_instances_referencing<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
) -> Result<u64, DbErr> {
    let instances = constraint_repository::list_instances(db).await?;
    let matched: Vec<String> = instances
        .into_iter()
        .filter(|instance| instance.references_any(ids))
        .map(|instance| instance.id)
        .collect();
    if matched.is_empty() {
        return Ok(0);
    }
    let removed = constraint_repository::delete_instances_by_ids(db, &matched).await?;
    debug!("Removed {} constraint instance(s) referencing deleted ids", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraint::repository as constraint_repository;
    use crate::shared::data::db::create_schema;
    use contracts::domain::constraint::{ConstraintInstance, ConstraintSignature};
    use sea_orm::{Database, DatabaseConnection};

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_schema(&db).await.unwrap();
        db
    }

    async fn seed_instance(db: &DatabaseConnection, id: &str, arguments: Vec<String>) {
        constraint_repository::insert_instance(
            db,
            &ConstraintInstance {
                id: id.into(),
                signature_id: "sig1".into(),
                arguments,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_only_referencing_instances_are_removed() {
        let db = test_db().await;
        constraint_repository::insert_signature(
            &db,
            &ConstraintSignature {
                id: "sig1".into(),
                name: "RoomConflict".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        seed_instance(&db, "c1", vec!["r1".into(), "x".into()]).await;
        seed_instance(&db, "c2", vec!["r2".into()]).await;
        seed_instance(&db, "c3", vec![]).await;

        let removed = remove_instances_referencing(&db, &["r1".into()]).await.unwrap();
        assert_eq!(removed, 1);

        let left = constraint_repository::list_instances(&db).await.unwrap();
        let ids: Vec<&str> = left.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c3"]);
    }

    #[tokio::test]
    async fn test_no_match_removes_nothing() {
        let db = test_db().await;
        constraint_repository::insert_signature(
            &db,
            &ConstraintSignature {
                id: "sig1".into(),
                name: "X".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        seed_instance(&db, "c1", vec!["r1".into()]).await;
        let removed = remove_instances_referencing(&db, &["other".into()]).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(constraint_repository::list_instances(&db).await.unwrap().len(), 1);
    }
}
