//! Order repository: atomic batch ingestion and lifecycle updates
//!
//! Batch ingestion is the only multi-row write in the system. It holds one
//! pooled connection inside a transaction for its full duration; dropping
//! the transaction on any error path rolls back and returns the connection
//! to the pool, so no partial batch is ever observable.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::{AdminOrderRow, Order, OrderItemRequest, OrderLine, OrderStatus, UpdateOrderRequest};

fn map_order(row: &PgRow) -> Result<Order> {
    let estado: String = row.get("estado");
    Ok(Order {
        idpedido: row.get("idpedido"),
        idusuario: row.get("idusuario"),
        idperfume: row.get("idperfume"),
        cantidad: row.get("cantidad"),
        estado: estado.parse()?,
    })
}

fn map_order_line(row: &PgRow) -> OrderLine {
    OrderLine {
        idpedido: row.get("idpedido"),
        idperfume: row.get("idperfume"),
        idusuario: row.get("idusuario"),
        cantidad: row.get("cantidad"),
        fecha: row.get("fecha"),
        id_pedido_temp: row.get("idPedidoTemp"),
    }
}

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order batch atomically
    ///
    /// Items are validated and inserted in input order inside one
    /// transaction. Any validation or store failure aborts the whole
    /// batch: the early return drops the transaction, which rolls back
    /// and releases the pooled connection. On success the persisted rows
    /// are returned in input order.
    pub async fn create_batch(&self, items: &[OrderItemRequest]) -> Result<Vec<OrderLine>> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = Vec::with_capacity(items.len());

        for item in items {
            let valid = item.validate()?;

            // idusuario stays NULL: orders are anonymous at ingestion and
            // associated with a user later in the lifecycle.
            let row = sqlx::query(
                r#"
                INSERT INTO pedido (idperfume, idusuario, cantidad, fecha, "idPedidoTemp")
                VALUES ($1, NULL, $2, $3, $4)
                RETURNING idpedido, idperfume, idusuario, cantidad, fecha, "idPedidoTemp"
                "#,
            )
            .bind(valid.idperfume)
            .bind(valid.cantidad)
            .bind(valid.fecha)
            .bind(&valid.idpedidotemp)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(map_order_line(&row));
        }

        tx.commit().await?;

        info!("Inserted order batch of {} lines", inserted.len());
        Ok(inserted)
    }

    /// Update an order's status and quantity
    ///
    /// Returns `None` when no order matches the id.
    pub async fn update(&self, id: i32, payload: &UpdateOrderRequest) -> Result<Option<Order>> {
        info!("Updating order {} to estado {}", id, payload.estado);

        let row = sqlx::query(
            r#"
            UPDATE pedidos
            SET estado = $1, cantidad = $2
            WHERE idpedido = $3
            RETURNING idpedido, idusuario, idperfume, cantidad, estado
            "#,
        )
        .bind(payload.estado.as_str())
        .bind(payload.cantidad)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_order).transpose()
    }

    /// Mark an order as confirmed
    pub async fn confirm(&self, id: i32) -> Result<Option<Order>> {
        info!("Confirming order {}", id);

        let row = sqlx::query(
            r#"
            UPDATE pedidos
            SET estado = $1
            WHERE idpedido = $2
            RETURNING idpedido, idusuario, idperfume, cantidad, estado
            "#,
        )
        .bind(OrderStatus::Confirmado.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_order).transpose()
    }

    /// List a user's orders, excluding cancelled ones
    pub async fn by_user(&self, user_id: i32) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT idpedido, idusuario, idperfume, cantidad, estado
            FROM pedidos
            WHERE idusuario = $1 AND estado != $2
            "#,
        )
        .bind(user_id)
        .bind(OrderStatus::Cancelado.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_order).collect()
    }

    /// Admin listing of orders in a given state, joined with user and
    /// perfume names
    pub async fn admin_by_status(&self, status: OrderStatus) -> Result<Vec<AdminOrderRow>> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.idpedido,
                u.nombre AS nombre_usuario,
                u.apellidos AS apellidos_usuario,
                perf.nombre AS nombre_perfume,
                p.cantidad,
                p.estado
            FROM pedidos AS p
            INNER JOIN usuarios AS u ON p.idusuario = u."idUser"
            INNER JOIN perfume AS perf ON p.idperfume = perf.idperfume
            WHERE p.estado = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let estado: String = row.get("estado");
                Ok(AdminOrderRow {
                    idpedido: row.get("idpedido"),
                    nombre_usuario: row.get("nombre_usuario"),
                    apellidos_usuario: row.get("apellidos_usuario"),
                    nombre_perfume: row.get("nombre_perfume"),
                    cantidad: row.get("cantidad"),
                    estado: estado.parse()?,
                })
            })
            .collect()
    }
}
