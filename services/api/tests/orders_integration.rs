//! Integration tests for order ingestion and lifecycle updates
//!
//! These tests run against a live PostgreSQL database configured through
//! `DATABASE_URL` and are ignored by default. They verify the atomicity
//! guarantee of batch ingestion: either every line of a batch persists,
//! or none do.

use api::models::{OrderItemRequest, OrderStatus, UpdateOrderRequest};
use api::repositories::OrderRepository;
use common::database::{DatabaseConfig, init_pool};
use sqlx::{PgPool, Row};
use std::time::{SystemTime, UNIX_EPOCH};

async fn setup_pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pedido (
            idpedido SERIAL PRIMARY KEY,
            idperfume INTEGER NOT NULL,
            idusuario INTEGER,
            cantidad INTEGER NOT NULL,
            fecha DATE NOT NULL,
            "idPedidoTemp" TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pedidos (
            idpedido SERIAL PRIMARY KEY,
            idusuario INTEGER NOT NULL,
            idperfume INTEGER NOT NULL,
            cantidad INTEGER NOT NULL,
            estado TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

fn unique_batch_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Failed to get current time")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

fn item(idperfume: i32, cantidad: i32, fecha: &str, batch_id: &str) -> OrderItemRequest {
    serde_json::from_value(serde_json::json!({
        "idperfume": idperfume,
        "cantidad": cantidad,
        "fecha": fecha,
        "idpedidotemp": batch_id,
    }))
    .expect("Failed to build order item")
}

async fn rows_for_batch(pool: &PgPool, batch_id: &str) -> i64 {
    sqlx::query(r#"SELECT COUNT(*) AS n FROM pedido WHERE "idPedidoTemp" = $1"#)
        .bind(batch_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
        .get("n")
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_valid_batch_commits_all_rows_in_order(
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await?;
    let repo = OrderRepository::new(pool.clone());
    let batch_id = unique_batch_id("ok");

    let items = vec![
        item(1, 2, "2024-01-01", &batch_id),
        item(2, 1, "2024-01-01", &batch_id),
        item(3, 5, "2024-01-02", &batch_id),
    ];

    let inserted = repo.create_batch(&items).await?;

    assert_eq!(inserted.len(), 3, "Row count must equal item count");
    let perfume_ids: Vec<i32> = inserted.iter().map(|line| line.idperfume).collect();
    assert_eq!(perfume_ids, vec![1, 2, 3], "Input order must be preserved");
    assert!(
        inserted.iter().all(|line| line.idusuario.is_none()),
        "Orders are anonymous at ingestion"
    );
    assert_eq!(rows_for_batch(&pool, &batch_id).await, 3);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_invalid_item_rolls_back_whole_batch() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await?;
    let repo = OrderRepository::new(pool.clone());
    let batch_id = unique_batch_id("bad");

    // Second item is missing fecha and idpedidotemp.
    let items = vec![
        item(1, 2, "2024-01-01", &batch_id),
        serde_json::from_value::<OrderItemRequest>(serde_json::json!({
            "idperfume": 2,
            "cantidad": 0,
        }))
        .expect("Failed to build order item"),
    ];

    let result = repo.create_batch(&items).await;

    assert!(result.is_err(), "An invalid item must fail the whole batch");
    assert_eq!(
        rows_for_batch(&pool, &batch_id).await,
        0,
        "No row of the batch may persist after rollback"
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_update_missing_order_reports_not_found(
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await?;
    let repo = OrderRepository::new(pool.clone());

    let updated = repo
        .update(
            -999,
            &UpdateOrderRequest {
                estado: OrderStatus::Cancelado,
                cantidad: 1,
            },
        )
        .await?;

    assert!(updated.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_update_existing_order_returns_new_state(
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await?;
    let repo = OrderRepository::new(pool.clone());

    let row = sqlx::query(
        r#"
        INSERT INTO pedidos (idusuario, idperfume, cantidad, estado)
        VALUES (1, 1, 1, 'pendiente')
        RETURNING idpedido
        "#,
    )
    .fetch_one(&pool)
    .await?;
    let id: i32 = row.get("idpedido");

    let updated = repo
        .update(
            id,
            &UpdateOrderRequest {
                estado: OrderStatus::Confirmado,
                cantidad: 4,
            },
        )
        .await?
        .expect("Order must exist");

    assert_eq!(updated.estado, OrderStatus::Confirmado);
    assert_eq!(updated.cantidad, 4);

    Ok(())
}
