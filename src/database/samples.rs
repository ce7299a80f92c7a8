//! Store operations for the samples collection.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::database::manager::StoreError;
use crate::database::models::sample::{Sample, SampleNew, SampleUpdate};

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Sample>, StoreError> {
    let sample = sqlx::query_as::<_, Sample>("SELECT id, user_id, card_id, state, wts FROM samples WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(sample)
}

/// List samples, restricted by owner and/or card when a filter is given.
/// Both filters apply conjunctively; omitted filters leave the field
/// unrestricted. No ordering is guaranteed.
pub async fn list(
    conn: &mut SqliteConnection,
    user_id: Option<i64>,
    card_id: Option<i64>,
) -> Result<Vec<Sample>, StoreError> {
    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT id, user_id, card_id, state, wts FROM samples");
    push_filters(&mut query, user_id, card_id);

    let samples = query
        .build_query_as::<Sample>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(samples)
}

/// Insert a sample, assigning one past the highest existing id (0 when the
/// collection is empty). Two writers racing through here can compute the
/// same next id; a single serving instance is assumed.
pub async fn insert(conn: &mut SqliteConnection, new: &SampleNew) -> Result<i64, StoreError> {
    let id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id) + 1, 0) FROM samples")
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO samples (id, user_id, card_id, state, wts) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(id)
        .bind(new.user_id)
        .bind(new.card_id)
        .bind(&new.state)
        .bind(new.wts)
        .execute(&mut *conn)
        .await?;

    Ok(id)
}

/// Overwrite exactly the fields present in the patch and return the record
/// as stored afterwards. An all-empty patch degenerates to a fetch.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    patch: &SampleUpdate,
) -> Result<Sample, StoreError> {
    if !patch.is_empty() {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE samples SET ");
        let mut fields = query.separated(", ");

        if let Some(user_id) = patch.user_id {
            fields.push("user_id = ").push_bind_unseparated(user_id);
        }
        if let Some(card_id) = patch.card_id {
            fields.push("card_id = ").push_bind_unseparated(card_id);
        }
        if let Some(state) = &patch.state {
            fields.push("state = ").push_bind_unseparated(state.clone());
        }
        if let Some(wts) = patch.wts {
            fields.push("wts = ").push_bind_unseparated(wts);
        }

        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Sample {} not found", id)));
        }
    }

    get(conn, id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Sample {} not found", id)))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM samples WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("Sample {} not found", id)));
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
