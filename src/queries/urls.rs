use libsql::{Connection, TransactionBehavior, de, params};

use crate::{
    db::{URL_CHECKS_T, URLS_T, rollback_tx},
    error::{Error, Result},
    queries::checks::get_checks,
    types::{Registration, Url, UrlDetail, UrlListing, now_timestamp},
};

pub async fn find_url_id(db: &Connection, name: &str) -> Result<Option<i64>> {
    let mut result = db
        .query(&format!("SELECT id FROM {URLS_T} WHERE name = ?1"), [name])
        .await?;

    let Some(row) = result.next().await? else {
        return Ok(None);
    };

    Ok(Some(row.get(0)?))
}

pub async fn url_exists(db: &Connection, id: i64) -> Result<bool> {
    let mut result = db
        .query(&format!("SELECT id FROM {URLS_T} WHERE id = ?1"), [id])
        .await?;

    Ok(result.next().await?.is_some())
}

/// Inserts `name`, yielding `None` when the UNIQUE constraint already holds it.
async fn insert_url(db: &Connection, name: &str) -> Result<Option<i64>> {
    let mut result = db
        .query(
            &format!(
                "INSERT INTO {URLS_T}
                    (name, created_at)
                VALUES
                    (?1, ?2)
                ON CONFLICT (name) DO NOTHING
                RETURNING id
                "
            ),
            (name, now_timestamp()?),
        )
        .await?;

    let Some(row) = result.next().await? else {
        return Ok(None);
    };

    Ok(Some(row.get(0)?))
}

async fn register_or_find_tx(db: &Connection, name: &str) -> Result<Registration> {
    if let Some(id) = find_url_id(db, name).await? {
        return Ok(Registration { id, is_new: false });
    }

    if let Some(id) = insert_url(db, name).await? {
        return Ok(Registration { id, is_new: true });
    }

    // Another writer inserted the same name first
    match find_url_id(db, name).await? {
        Some(id) => Ok(Registration { id, is_new: false }),
        None => Err(Error::RegistrationConflict(name.to_owned())),
    }
}

/// Returns the id stored under `name`, inserting a new row when the name is
/// unseen. The lookup and insert share one transaction.
pub async fn register_or_find(db: &Connection, name: &str) -> Result<Registration> {
    let tx = db
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .await?;

    match register_or_find_tx(&tx, name).await {
        Ok(registration) => {
            tx.commit().await?;
            Ok(registration)
        }
        Err(e) => {
            rollback_tx(tx, "Register Url").await;
            Err(e)
        }
    }
}

pub async fn list_urls(db: &Connection) -> Result<Vec<UrlListing>> {
    let mut result = db
        .query(
            &format!(
                "SELECT
                    u.id,
                    u.name,
                    u.created_at,
                    MAX(c.created_at) AS last_check_at
                FROM {URLS_T} AS u
                LEFT JOIN {URL_CHECKS_T} AS c
                    ON u.id = c.url_id
                GROUP BY u.id
                ORDER BY u.created_at DESC, u.id DESC
                "
            ),
            params!(),
        )
        .await?;

    let mut urls = Vec::new();
    while let Some(row) = result.next().await? {
        let url: UrlListing = de::from_row(&row)?;
        urls.push(url);
    }

    Ok(urls)
}

pub async fn get_url(db: &Connection, id: i64) -> Result<Url> {
    let mut result = db
        .query(
            &format!("SELECT id, name, created_at FROM {URLS_T} WHERE id = ?1"),
            [id],
        )
        .await?;

    let Some(row) = result.next().await? else {
        return Err(Error::NotFound(id));
    };

    Ok(de::from_row(&row)?)
}

pub async fn get_url_detail(db: &Connection, id: i64) -> Result<UrlDetail> {
    let url = get_url(db, id).await?;
    let checks = get_checks(db, id).await?;

    Ok(UrlDetail { url, checks })
}
