use crate::models::DbSport;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_sports(pool: &Pool<Postgres>) -> Result<Vec<DbSport>> {
    let sports = sqlx::query_as::<_, DbSport>(
        r#"
        SELECT id, name
        FROM sports
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sports)
}
