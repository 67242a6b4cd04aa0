//! User model and related functionality

use serde::{Deserialize, Serialize};

/// User entity (`usuarios` table)
///
/// Held internally only; the password hash never leaves the service, so
/// responses use the projection types below instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id_user: i32,
    pub nombre: String,
    pub apellidos: String,
    pub telf: String,
    pub correo: String,
    pub contrasena: String,
    pub admin: bool,
    pub seleccion: Option<i32>,
}

/// Registration request payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub apellidos: String,
    pub telefono: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
    pub correo: String,
    pub seleccion: Option<i32>,
}

/// Created user, returned by registration (password hash excluded)
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    #[serde(rename = "idUser")]
    pub id_user: i32,
    pub nombre: String,
    pub apellidos: String,
    pub telf: String,
    pub correo: String,
    pub admin: bool,
    pub seleccion: Option<i32>,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
}

/// User projection embedded in the login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: i32,
    pub nombre: String,
    pub apellidos: String,
    pub telf: String,
    pub admin: bool,
}

/// Login response: the bearer token plus the user, minus the password
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Profile projection for the authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(rename = "idUser")]
    pub id_user: i32,
    pub nombre: String,
    pub apellidos: String,
    pub telf: String,
}

/// Profile update payload; an absent password leaves the stored hash
/// unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    #[serde(rename = "contraseña")]
    pub contrasena: Option<String>,
}

impl User {
    /// Projection used by the login response
    pub fn to_login_user(&self) -> LoginUser {
        LoginUser {
            id: self.id_user,
            nombre: self.nombre.clone(),
            apellidos: self.apellidos.clone(),
            telf: self.telf.clone(),
            admin: self.admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_excludes_password() {
        let user = User {
            id_user: 1,
            nombre: "Ana".to_string(),
            apellidos: "García".to_string(),
            telf: "600000000".to_string(),
            correo: "a@x.com".to_string(),
            contrasena: "$argon2id$...".to_string(),
            admin: false,
            seleccion: None,
        };

        let response = LoginResponse {
            token: "tok".to_string(),
            user: user.to_login_user(),
        };

        let json = serde_json::to_value(&response).expect("Failed to serialize");
        assert_eq!(json["user"]["id"], 1);
        assert!(json["user"].get("contraseña").is_none());
    }

    #[test]
    fn test_login_request_wire_names() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"correo":"a@x.com","contraseña":"right"}"#)
                .expect("Failed to deserialize");

        assert_eq!(request.correo, "a@x.com");
        assert_eq!(request.contrasena, "right");
    }
}
