//! Perfume catalog repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::{NewPerfume, Perfume, PerfumeWithBrand, Seleccion};

fn map_perfume(row: &PgRow) -> Perfume {
    Perfume {
        idperfume: row.get("idperfume"),
        nombre: row.get("nombre"),
        marca: row.get("marca"),
        top: row.get("top"),
        descripcion: row.get("descripcion"),
        clima: row.get("clima"),
        genero: row.get("genero"),
        activo: row.get("activo"),
    }
}

fn map_perfume_with_brand(row: &PgRow) -> PerfumeWithBrand {
    PerfumeWithBrand {
        perfume: map_perfume(row),
        marcap: row.get("marcap"),
    }
}

/// Perfume repository
#[derive(Clone)]
pub struct PerfumeRepository {
    pool: PgPool,
}

impl PerfumeRepository {
    /// Create a new perfume repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active perfumes with their brand name
    pub async fn list_active(&self) -> Result<Vec<PerfumeWithBrand>> {
        let rows = sqlx::query(
            r#"
            SELECT p.*, m.nombre AS marcap
            FROM perfume AS p
            INNER JOIN marcas AS m ON p.marca = m.idmarca
            WHERE p.activo = true
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_perfume_with_brand).collect())
    }

    /// Search active perfumes by perfume or brand name
    pub async fn search(&self, term: &str) -> Result<Vec<PerfumeWithBrand>> {
        info!("Searching perfumes with term: {}", term);

        let rows = sqlx::query(
            r#"
            SELECT p.*, m.nombre AS marcap
            FROM perfume AS p
            INNER JOIN marcas AS m ON p.marca = m.idmarca
            WHERE p.activo = true AND (p.nombre ILIKE $1 OR m.nombre ILIKE $1)
            "#,
        )
        .bind(format!("%{}%", term))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_perfume_with_brand).collect())
    }

    /// Find a perfume by id, active or not
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PerfumeWithBrand>> {
        let row = sqlx::query(
            r#"
            SELECT p.*, m.nombre AS marcap
            FROM perfume AS p
            INNER JOIN marcas AS m ON p.marca = m.idmarca
            WHERE p.idperfume = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_perfume_with_brand))
    }

    /// List active perfumes of a gender (an empty list is not an error)
    pub async fn by_genero(&self, genero: &str) -> Result<Vec<PerfumeWithBrand>> {
        let rows = sqlx::query(
            r#"
            SELECT p.*, m.nombre AS marcap
            FROM perfume AS p
            INNER JOIN marcas AS m ON p.marca = m.idmarca
            WHERE p.genero = $1 AND p.activo = true
            "#,
        )
        .bind(genero)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_perfume_with_brand).collect())
    }

    /// Fetch active perfumes matching any of the given ids
    pub async fn find_active_by_ids(&self, ids: &[i32]) -> Result<Vec<PerfumeWithBrand>> {
        let rows = sqlx::query(
            r#"
            SELECT p.*, m.nombre AS marcap
            FROM perfume AS p
            INNER JOIN marcas AS m ON p.marca = m.idmarca
            WHERE p.activo = true AND p.idperfume = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_perfume_with_brand).collect())
    }

    /// Create a new perfume
    pub async fn create(&self, payload: &NewPerfume) -> Result<Perfume> {
        info!("Creating new perfume: {}", payload.nombre);

        let row = sqlx::query(
            r#"
            INSERT INTO perfume (nombre, marca, top, descripcion, clima, genero)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.nombre)
        .bind(payload.marca)
        .bind(payload.top)
        .bind(&payload.descripcion)
        .bind(&payload.clima)
        .bind(&payload.genero)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_perfume(&row))
    }

    /// Update an existing perfume
    pub async fn update(&self, id: i32, payload: &NewPerfume) -> Result<Option<Perfume>> {
        let row = sqlx::query(
            r#"
            UPDATE perfume
            SET nombre = $1, marca = $2, top = $3, descripcion = $4, clima = $5, genero = $6
            WHERE idperfume = $7
            RETURNING *
            "#,
        )
        .bind(&payload.nombre)
        .bind(payload.marca)
        .bind(payload.top)
        .bind(&payload.descripcion)
        .bind(&payload.clima)
        .bind(&payload.genero)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_perfume))
    }

    /// Soft-delete a perfume by marking it inactive
    pub async fn soft_delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("UPDATE perfume SET activo = false WHERE idperfume = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all curated selections
    pub async fn selecciones(&self) -> Result<Vec<Seleccion>> {
        let rows = sqlx::query("SELECT * FROM selecciones")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Seleccion {
                idseleccion: row.get("idseleccion"),
                nombre: row.get("nombre"),
                descripcion: row.get("descripcion"),
            })
            .collect())
    }
}
