//! Order models: batch line items, persisted orders, and the status set

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical order lifecycle states
///
/// Values outside this set are rejected at deserialization; transitions
/// between states are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendiente,
    Confirmado,
    Cancelado,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "pendiente",
            OrderStatus::Confirmado => "confirmado",
            OrderStatus::Cancelado => "cancelado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pendiente" => Ok(OrderStatus::Pendiente),
            "confirmado" => Ok(OrderStatus::Confirmado),
            "cancelado" => Ok(OrderStatus::Cancelado),
            other => Err(anyhow::anyhow!("Estado de pedido desconocido: {}", other)),
        }
    }
}

/// One line item of an order batch submission
///
/// Fields are optional on purpose: a missing field must abort the whole
/// batch inside the transaction, not fail at the framework boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    pub idperfume: Option<i32>,
    pub cantidad: Option<i32>,
    pub fecha: Option<NaiveDate>,
    pub idpedidotemp: Option<String>,
}

/// A line item that passed validation and is ready to insert
#[derive(Debug, Clone)]
pub struct ValidOrderItem {
    pub idperfume: i32,
    pub cantidad: i32,
    pub fecha: NaiveDate,
    pub idpedidotemp: String,
}

impl OrderItemRequest {
    /// Validate that the item carries all four required fields, with a
    /// positive product id and quantity
    pub fn validate(&self) -> Result<ValidOrderItem> {
        match (
            self.idperfume,
            self.cantidad,
            self.fecha,
            self.idpedidotemp.as_ref(),
        ) {
            (Some(idperfume), Some(cantidad), Some(fecha), Some(idpedidotemp))
                if idperfume > 0 && cantidad > 0 && !idpedidotemp.is_empty() =>
            {
                Ok(ValidOrderItem {
                    idperfume,
                    cantidad,
                    fecha,
                    idpedidotemp: idpedidotemp.clone(),
                })
            }
            _ => Err(anyhow::anyhow!(
                "Cada producto debe contener idperfume, cantidad, fecha y idpedidotemp."
            )),
        }
    }
}

/// Persisted order line (`pedido` table), one per validated batch item
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub idpedido: i32,
    pub idperfume: i32,
    pub idusuario: Option<i32>,
    pub cantidad: i32,
    pub fecha: NaiveDate,
    #[serde(rename = "idPedidoTemp")]
    pub id_pedido_temp: String,
}

/// Order aggregate (`pedidos` table) used by the lifecycle/admin paths
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub idpedido: i32,
    pub idusuario: i32,
    pub idperfume: i32,
    pub cantidad: i32,
    pub estado: OrderStatus,
}

/// Status/quantity update payload for an existing order
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    pub estado: OrderStatus,
    pub cantidad: i32,
}

/// Admin listing row joining user and perfume names
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderRow {
    pub idpedido: i32,
    pub nombre_usuario: String,
    pub apellidos_usuario: String,
    pub nombre_perfume: String,
    pub cantidad: i32,
    pub estado: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pendiente,
            OrderStatus::Confirmado,
            OrderStatus::Cancelado,
        ] {
            let parsed: OrderStatus = status.as_str().parse().expect("Failed to parse status");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("enviado".parse::<OrderStatus>().is_err());
        assert!(serde_json::from_str::<OrderStatus>(r#""enviado""#).is_err());
    }

    #[test]
    fn test_complete_item_validates() {
        let item: OrderItemRequest = serde_json::from_str(
            r#"{"idperfume":1,"cantidad":2,"fecha":"2024-01-01","idpedidotemp":"t1"}"#,
        )
        .expect("Failed to deserialize");

        let valid = item.validate().expect("Item should validate");
        assert_eq!(valid.idperfume, 1);
        assert_eq!(valid.cantidad, 2);
        assert_eq!(valid.idpedidotemp, "t1");
    }

    #[test]
    fn test_item_with_missing_fields_is_rejected() {
        let item: OrderItemRequest = serde_json::from_str(r#"{"idperfume":2,"cantidad":0}"#)
            .expect("Failed to deserialize");

        assert!(item.validate().is_err());
    }

    #[test]
    fn test_item_with_zero_ids_is_rejected() {
        let item: OrderItemRequest = serde_json::from_str(
            r#"{"idperfume":0,"cantidad":2,"fecha":"2024-01-01","idpedidotemp":"t1"}"#,
        )
        .expect("Failed to deserialize");
        assert!(item.validate().is_err());

        let item: OrderItemRequest = serde_json::from_str(
            r#"{"idperfume":1,"cantidad":0,"fecha":"2024-01-01","idpedidotemp":"t1"}"#,
        )
        .expect("Failed to deserialize");
        assert!(item.validate().is_err());
    }
}
