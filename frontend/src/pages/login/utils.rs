pub const MISSING_CREDENTIALS: &str = "Por favor ingresa correo y contraseña.";

/// Ambos campos son obligatorios antes de tocar la red.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(MISSING_CREDENTIALS.to_string());
    }
    Ok(())
}
