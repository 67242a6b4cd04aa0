//! User repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{RegisterRequest, RegisteredUser, UpdateProfileRequest, User, UserProfile};
use crate::password;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user
    ///
    /// The password is hashed before it crosses the store boundary; the
    /// returned projection excludes the stored digest.
    pub async fn create(&self, payload: &RegisterRequest) -> Result<RegisteredUser> {
        info!("Creating new user: {}", payload.correo);

        let password_hash = password::hash_password(&payload.contrasena)?;

        let row = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, apellidos, correo, telf, contraseña, seleccion)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING "idUser", nombre, apellidos, telf, correo, admin, seleccion
            "#,
        )
        .bind(&payload.nombre)
        .bind(&payload.apellidos)
        .bind(&payload.correo)
        .bind(&payload.telefono)
        .bind(&password_hash)
        .bind(payload.seleccion)
        .fetch_one(&self.pool)
        .await?;

        Ok(RegisteredUser {
            id_user: row.get("idUser"),
            nombre: row.get("nombre"),
            apellidos: row.get("apellidos"),
            telf: row.get("telf"),
            correo: row.get("correo"),
            admin: row.get("admin"),
            seleccion: row.get("seleccion"),
        })
    }

    /// Find a user by email
    pub async fn find_by_email(&self, correo: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT "idUser", nombre, apellidos, telf, correo, contraseña, admin, seleccion
            FROM usuarios
            WHERE correo = $1
            "#,
        )
        .bind(correo)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(User {
                id_user: row.get("idUser"),
                nombre: row.get("nombre"),
                apellidos: row.get("apellidos"),
                telf: row.get("telf"),
                correo: row.get("correo"),
                contrasena: row.get("contraseña"),
                admin: row.get("admin"),
                seleccion: row.get("seleccion"),
            })),
            None => Ok(None),
        }
    }

    /// Verify a user's password against the stored digest
    pub fn verify_password(&self, user: &User, plaintext: &str) -> Result<bool> {
        password::verify_password(plaintext, &user.contrasena)
    }

    /// Read the profile projection of a user
    pub async fn profile(&self, id: i32) -> Result<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT "idUser", nombre, apellidos, telf
            FROM usuarios
            WHERE "idUser" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserProfile {
            id_user: row.get("idUser"),
            nombre: row.get("nombre"),
            apellidos: row.get("apellidos"),
            telf: row.get("telf"),
        }))
    }

    /// Update a user's profile
    ///
    /// An absent password leaves the stored hash unchanged via a
    /// coalescing update.
    pub async fn update_profile(
        &self,
        id: i32,
        payload: &UpdateProfileRequest,
    ) -> Result<Option<UserProfile>> {
        info!("Updating profile for user: {}", id);

        let password_hash = match &payload.contrasena {
            Some(plaintext) => Some(password::hash_password(plaintext)?),
            None => None,
        };

        let row = sqlx::query(
            r#"
            UPDATE usuarios
            SET nombre = $1, apellidos = $2, telf = $3, contraseña = COALESCE($4, contraseña)
            WHERE "idUser" = $5
            RETURNING "idUser", nombre, apellidos, telf
            "#,
        )
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.telefono)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserProfile {
            id_user: row.get("idUser"),
            nombre: row.get("nombre"),
            apellidos: row.get("apellidos"),
            telf: row.get("telf"),
        }))
    }
}
