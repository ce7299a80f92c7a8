//! Store operations for the wishes collection.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::database::manager::StoreError;
use crate::database::models::wish::{Wish, WishNew, WishUpdate};

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Wish>, StoreError> {
    let wish = sqlx::query_as::<_, Wish>("SELECT id, user_id, card_id FROM wishes WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(wish)
}

/// List wishes, restricted by owner and/or card when a filter is given.
pub async fn list(
    conn: &mut SqliteConnection,
    user_id: Option<i64>,
    card_id: Option<i64>,
) -> Result<Vec<Wish>, StoreError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, user_id, card_id FROM wishes");
    push_filters(&mut query, user_id, card_id);

    let wishes = query.build_query_as::<Wish>().fetch_all(&mut *conn).await?;

    Ok(wishes)
}

/// Insert a wish, assigning one past the highest existing id (0 when the
/// collection is empty). Same next-id race caveat as the samples store.
pub async fn insert(conn: &mut SqliteConnection, new: &WishNew) -> Result<i64, StoreError> {
    let id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id) + 1, 0) FROM wishes")
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO wishes (id, user_id, card_id) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(new.user_id)
        .bind(new.card_id)
        .execute(&mut *conn)
        .await?;

    Ok(id)
}

/// Overwrite exactly the fields present in the patch and return the record
/// as stored afterwards. An all-empty patch degenerates to a fetch.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    patch: &WishUpdate,
) -> Result<Wish, StoreError> {
    if !patch.is_empty() {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE wishes SET ");
        let mut fields = query.separated(", ");

        if let Some(user_id) = patch.user_id {
            fields.push("user_id = ").push_bind_unseparated(user_id);
        }
        if let Some(card_id) = patch.card_id {
            fields.push("card_id = ").push_bind_unseparated(card_id);
        }

        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Wish {} not found", id)));
        }
    }

    get(conn, id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Wish {} not found", id)))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM wishes WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("Wish {} not found", id)));
    }

    Ok(())
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, user_id: Option<i64>, card_id: Option<i64>) {
    let mut clause = " WHERE ";

    if let Some(user_id) = user_id {
        query.push(clause).push("user_id = ").push_bind(user_id);
        clause = " AND ";
    }
    if let Some(card_id) = card_id {
        query.push(clause).push("card_id = ").push_bind(card_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::manager::DatabaseManager;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        DatabaseManager::init_schema(&pool).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn ids_start_at_zero_and_count_up() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = insert(&mut conn, &WishNew { user_id: 0, card_id: 2 }).await.unwrap();
        let second = insert(&mut conn, &WishNew { user_id: 1, card_id: 2 }).await.unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_the_other_field() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let id = insert(&mut conn, &WishNew { user_id: 2, card_id: 1 }).await.unwrap();

        let patch = WishUpdate {
            card_id: Some(7),
            ..Default::default()
        };
        let updated = update(&mut conn, id, &patch).await.unwrap();

        assert_eq!(updated.user_id, 2);
        assert_eq!(updated.card_id, 7);
    }

    #[tokio::test]
    async fn missing_ids_are_reported() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(get(&mut conn, 5).await.unwrap().is_none());
        assert!(matches!(
            update(&mut conn, 5, &WishUpdate { user_id: Some(1), ..Default::default() }).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            delete(&mut conn, 5).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_honors_owner_and_card_filters() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        insert(&mut conn, &WishNew { user_id: 0, card_id: 2 }).await.unwrap();
        insert(&mut conn, &WishNew { user_id: 1, card_id: 2 }).await.unwrap();
        insert(&mut conn, &WishNew { user_id: 1, card_id: 3 }).await.unwrap();

        assert_eq!(list(&mut conn, None, None).await.unwrap().len(), 3);
        assert_eq!(list(&mut conn, Some(1), None).await.unwrap().len(), 2);
        assert_eq!(list(&mut conn, None, Some(2)).await.unwrap().len(), 2);
        assert_eq!(list(&mut conn, Some(1), Some(2)).await.unwrap().len(), 1);
    }
}
