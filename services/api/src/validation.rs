//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("El correo es obligatorio".to_string());
    }

    if email.len() > 254 {
        return Err("El correo es demasiado largo".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Formato de correo inválido".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("La contraseña es obligatoria".to_string());
    }

    if password.len() < 8 {
        return Err("La contraseña debe tener al menos 8 caracteres".to_string());
    }

    if password.len() > 128 {
        return Err("La contraseña es demasiado larga".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("ana.garcia+tienda@example.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("sin-arroba").is_err());
        assert!(validate_email("a@x").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secreto123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("corta").is_err());
    }
}
