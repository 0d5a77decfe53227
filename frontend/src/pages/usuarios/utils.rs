use crate::api::{CreateProfesorRequest, Role, UpdateProfesorRequest, UserRecord};
use crate::tables::{matches_option, matches_search};

pub const MISSING_FIELDS: &str =
    "Nombre, correo, número de empleado y rol son obligatorios.";
pub const INVALID_EMAIL: &str = "Ingresa un correo válido.";

pub const EXPORT_HEADERS: &[&str] = &["Nombre", "Correo", "Núm. empleado", "Rol"];

pub fn searchable_text(record: &UserRecord) -> String {
    format!(
        "{} {} {} {}",
        record.nombre, record.email, record.num_empleado, record.rol,
    )
}

pub fn apply_filters(records: &[UserRecord], search: &str, rol: &str) -> Vec<UserRecord> {
    records
        .iter()
        .filter(|r| matches_option(&r.rol, rol))
        .filter(|r| matches_search(&searchable_text(r), search))
        .cloned()
        .collect()
}

/// Refleja en la tabla el cambio de rol que ya aceptó el backend.
pub fn apply_rol(records: &mut [UserRecord], usuario_id: i64, rol_id: i64, roles: &[Role]) {
    let nombre = roles
        .iter()
        .find(|r| r.id == rol_id)
        .map(|r| r.nombre.clone())
        .unwrap_or_default();
    if let Some(user) = records.iter_mut().find(|u| u.usuario_id == usuario_id) {
        user.rol_id = rol_id;
        user.rol = nombre;
    }
}

pub fn remove_by_usuario_id(records: &mut Vec<UserRecord>, usuario_id: i64) {
    records.retain(|u| u.usuario_id != usuario_id);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfesorFormState {
    pub nombre: String,
    pub correo: String,
    pub num_empleado: String,
    pub rol_id: String,
    pub password: String,
}

impl ProfesorFormState {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            nombre: record.nombre.clone(),
            correo: record.email.clone(),
            num_empleado: record.num_empleado.to_string(),
            rol_id: if record.rol_id == 0 {
                String::new()
            } else {
                record.rol_id.to_string()
            },
            password: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty()
            || self.correo.trim().is_empty()
            || self.num_empleado.trim().parse::<i64>().is_err()
            || self.rol_id.trim().parse::<i64>().is_err()
        {
            return Err(MISSING_FIELDS.to_string());
        }
        if !self.correo.contains('@') {
            return Err(INVALID_EMAIL.to_string());
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> CreateProfesorRequest {
        CreateProfesorRequest {
            nombre_completo: self.nombre.trim().to_string(),
            correo: self.correo.trim().to_string(),
            num_empleado: self.num_empleado.trim().parse().unwrap_or(0),
            rol_id: self.rol_id.trim().parse().unwrap_or(0),
            password: {
                let value = self.password.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            },
        }
    }

    pub fn to_update_request(&self, usuario_id: i64) -> UpdateProfesorRequest {
        UpdateProfesorRequest {
            usuario_id,
            nombre_completo: self.nombre.trim().to_string(),
            correo: self.correo.trim().to_string(),
            num_empleado: self.num_empleado.trim().parse().unwrap_or(0),
            rol_id: self.rol_id.trim().parse().unwrap_or(0),
        }
    }
}

pub fn export_rows(records: &[UserRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.nombre.clone(),
                r.email.clone(),
                r.num_empleado.to_string(),
                r.rol.clone(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(usuario_id: i64, nombre: &str, rol: &str) -> UserRecord {
        UserRecord {
            id: usuario_id,
            profesor_id: usuario_id,
            usuario_id,
            nombre: nombre.into(),
            email: format!("{}@unison.mx", nombre.to_lowercase()),
            num_empleado: 4000 + usuario_id,
            rol_id: 1,
            rol: rol.into(),
        }
    }

    #[test]
    fn filters_by_role_and_search() {
        let records = vec![
            record(1, "Ana", "ADMINISTRADOR"),
            record(2, "Mario", "COORDINADOR"),
            record(3, "Laura", "COORDINADOR"),
        ];
        assert_eq!(apply_filters(&records, "", "COORDINADOR").len(), 2);
        assert_eq!(apply_filters(&records, "laura", "ALL").len(), 1);
        assert!(apply_filters(&records, "laura", "ADMINISTRADOR").is_empty());
    }

    #[test]
    fn role_change_renames_from_catalog() {
        let mut records = vec![record(1, "Ana", "ADMINISTRADOR")];
        let roles = vec![
            Role { id: 1, nombre: "ADMINISTRADOR".into() },
            Role { id: 2, nombre: "COORDINADOR".into() },
        ];
        apply_rol(&mut records, 1, 2, &roles);
        assert_eq!(records[0].rol_id, 2);
        assert_eq!(records[0].rol, "COORDINADOR");
    }

    #[test]
    fn delete_removes_by_usuario_id() {
        let mut records = vec![record(1, "Ana", "ADMINISTRADOR"), record(2, "Mario", "COORDINADOR")];
        remove_by_usuario_id(&mut records, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nombre, "Mario");
    }

    #[test]
    fn form_validation_checks_numbers_and_email() {
        let mut form = ProfesorFormState {
            nombre: "Mario Soto".into(),
            correo: "mario@unison.mx".into(),
            num_empleado: "5120".into(),
            rol_id: "2".into(),
            password: String::new(),
        };
        assert!(form.validate().is_ok());

        form.correo = "mario.unison.mx".into();
        assert_eq!(form.validate().unwrap_err(), INVALID_EMAIL);

        form.correo = "mario@unison.mx".into();
        form.rol_id = String::new();
        assert_eq!(form.validate().unwrap_err(), MISSING_FIELDS);
    }

    #[test]
    fn create_request_omits_blank_password() {
        let form = ProfesorFormState {
            nombre: "Mario Soto".into(),
            correo: "mario@unison.mx".into(),
            num_empleado: "5120".into(),
            rol_id: "2".into(),
            password: "  ".into(),
        };
        assert_eq!(form.to_create_request().password, None);
    }

    #[test]
    fn export_rows_match_header_arity() {
        let rows = export_rows(&[record(1, "Ana", "ADMINISTRADOR")]);
        assert_eq!(rows[0].len(), EXPORT_HEADERS.len());
        assert_eq!(rows[0][3], "ADMINISTRADOR");
    }
}
