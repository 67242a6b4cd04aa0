//! Perfume and selection models

use serde::{Deserialize, Serialize};

/// Perfume entity (`perfume` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perfume {
    pub idperfume: i32,
    pub nombre: String,
    pub marca: i32,
    pub top: Option<i32>,
    pub descripcion: String,
    pub clima: Option<String>,
    pub genero: String,
    pub activo: bool,
}

/// Perfume row joined with its brand name (`marcas.nombre AS marcap`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfumeWithBrand {
    #[serde(flatten)]
    pub perfume: Perfume,
    pub marcap: String,
}

/// Perfume creation/update payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerfume {
    pub nombre: String,
    pub marca: i32,
    pub top: Option<i32>,
    pub descripcion: String,
    pub clima: Option<String>,
    pub genero: String,
}

/// Curated selection entity (`selecciones` table)
#[derive(Debug, Clone, Serialize)]
pub struct Seleccion {
    pub idseleccion: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Cart item submitted for enrichment before checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub idperfume: i32,
    pub cantidad: Option<i32>,
    pub fecha: Option<String>,
    pub idpedidotemp: Option<String>,
}

/// Cart item joined with the full perfume row it references
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedCartItem {
    #[serde(flatten)]
    pub item: CartItem,
    pub perfume: Option<PerfumeWithBrand>,
}
