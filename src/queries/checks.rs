use libsql::{Connection, TransactionBehavior, de};

use crate::{
    db::{URL_CHECKS_T, rollback_tx},
    error::{Error, Result},
    queries::urls::url_exists,
    types::{UrlCheck, now_timestamp},
};

pub async fn get_checks(db: &Connection, url_id: i64) -> Result<Vec<UrlCheck>> {
    let mut result = db
        .query(
            &format!(
                "SELECT id, url_id, created_at
                FROM {URL_CHECKS_T}
                WHERE url_id = ?1
                ORDER BY created_at DESC, id DESC
                "
            ),
            [url_id],
        )
        .await?;

    let mut checks = Vec::new();
    while let Some(row) = result.next().await? {
        let check: UrlCheck = de::from_row(&row)?;
        checks.push(check);
    }

    Ok(checks)
}

async fn record_check_tx(db: &Connection, url_id: i64) -> Result<UrlCheck> {
    if !url_exists(db, url_id).await? {
        return Err(Error::NotFound(url_id));
    }

    let mut result = db
        .query(
            &format!(
                "INSERT INTO {URL_CHECKS_T}
                    (url_id, created_at)
                VALUES
                    (?1, ?2)
                RETURNING id, url_id, created_at
                "
            ),
            (url_id, now_timestamp()?),
        )
        .await?;

    let Some(row) = result.next().await? else {
        return Err(Error::NotFound(url_id));
    };

    Ok(de::from_row(&row)?)
}

pub async fn record_check(db: &Connection, url_id: i64) -> Result<UrlCheck> {
    let tx = db
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .await?;

    match record_check_tx(&tx, url_id).await {
        Ok(check) => {
            tx.commit().await?;
            Ok(check)
        }
        Err(e) => {
            rollback_tx(tx, "Record Check").await;
            Err(e)
        }
    }
}
