pub const MISSING_EMAIL: &str = "Por favor ingresa tu correo.";
pub const MISSING_RESET_FIELDS: &str = "Completa todos los campos.";
pub const SHORT_PASSWORD: &str = "La nueva contraseña debe tener al menos 6 caracteres.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Request,
    Reset,
    Done,
}

pub fn validate_request(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err(MISSING_EMAIL.to_string());
    }
    Ok(())
}

pub fn validate_reset(email: &str, codigo: &str, new_password: &str) -> Result<(), String> {
    if email.trim().is_empty() || codigo.trim().is_empty() || new_password.trim().is_empty() {
        return Err(MISSING_RESET_FIELDS.to_string());
    }
    if new_password.trim().len() < 6 {
        return Err(SHORT_PASSWORD.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_step_needs_email() {
        assert_eq!(validate_request("  ").unwrap_err(), MISSING_EMAIL);
        assert!(validate_request("ana@unison.mx").is_ok());
    }

    #[test]
    fn reset_step_requires_every_field() {
        assert_eq!(
            validate_reset("", "123456", "nueva-clave").unwrap_err(),
            MISSING_RESET_FIELDS
        );
        assert_eq!(
            validate_reset("ana@unison.mx", "", "nueva-clave").unwrap_err(),
            MISSING_RESET_FIELDS
        );
        assert_eq!(
            validate_reset("ana@unison.mx", "123456", "").unwrap_err(),
            MISSING_RESET_FIELDS
        );
    }

    #[test]
    fn reset_step_enforces_minimum_password_length() {
        assert_eq!(
            validate_reset("ana@unison.mx", "123456", "corta").unwrap_err(),
            SHORT_PASSWORD
        );
        assert!(validate_reset("ana@unison.mx", "123456", "segura").is_ok());
    }
}
