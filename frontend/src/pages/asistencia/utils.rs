use crate::api::{AttendanceRecord, NewAttendance};
use crate::tables::{matches_option, matches_search};

pub const MISSING_FIELDS: &str =
    "Periodo, código de materia, grupo y matrícula son obligatorios.";

pub const EXPORT_HEADERS: &[&str] = &[
    "Periodo",
    "Código materia",
    "Materia",
    "Grupo",
    "Matrícula",
    "Expediente",
    "Alumno",
    "Fuente",
    "Fecha de alta",
];

/// Texto sobre el que corre la búsqueda libre.
pub fn searchable_text(record: &AttendanceRecord) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        record.periodo,
        record.codigo_materia,
        record.nombre_materia,
        record.grupo,
        record.matricula,
        record.nombre_alumno,
        record.apellido_paterno,
        record.apellido_materno.as_deref().unwrap_or(""),
    )
}

pub fn apply_filters(
    records: &[AttendanceRecord],
    search: &str,
    periodo: &str,
    codigo: &str,
    grupo: &str,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| matches_option(&r.periodo, periodo))
        .filter(|r| matches_option(&r.codigo_materia, codigo))
        .filter(|r| matches_option(&r.grupo, grupo))
        .filter(|r| matches_search(&searchable_text(r), search))
        .cloned()
        .collect()
}

/// Identidad de la relación: periodo + materia + grupo + matrícula.
pub fn same_relation(a: &AttendanceRecord, b: &AttendanceRecord) -> bool {
    a.periodo == b.periodo
        && a.codigo_materia == b.codigo_materia
        && a.grupo == b.grupo
        && a.matricula == b.matricula
}

/// Edición local: reemplaza la fila cuya llave compuesta coincide con la
/// original. No toca el backend.
pub fn replace_local(
    records: &mut Vec<AttendanceRecord>,
    original: &AttendanceRecord,
    updated: AttendanceRecord,
) {
    if let Some(slot) = records.iter_mut().find(|r| same_relation(r, original)) {
        *slot = updated;
    }
}

/// Borrado local por llave compuesta.
pub fn remove_local(records: &mut Vec<AttendanceRecord>, target: &AttendanceRecord) {
    records.retain(|r| !same_relation(r, target));
}

/// Normaliza la lista de matrículas separada por comas: recorta espacios
/// y descarta entradas vacías.
pub fn normalize_matriculas(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFormState {
    pub periodo: String,
    pub codigo_materia: String,
    pub nombre_materia: String,
    pub grupo: String,
    pub matricula: String,
    pub nombre_alumno: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
}

impl AttendanceFormState {
    pub fn from_record(record: &AttendanceRecord) -> Self {
        Self {
            periodo: record.periodo.clone(),
            codigo_materia: record.codigo_materia.clone(),
            nombre_materia: record.nombre_materia.clone(),
            grupo: record.grupo.clone(),
            matricula: record.matricula.clone(),
            nombre_alumno: record.nombre_alumno.clone(),
            apellido_paterno: record.apellido_paterno.clone(),
            apellido_materno: record.apellido_materno.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.periodo.trim().is_empty()
            || self.codigo_materia.trim().is_empty()
            || self.grupo.trim().is_empty()
            || self.matricula.trim().is_empty()
        {
            return Err(MISSING_FIELDS.to_string());
        }
        Ok(())
    }

    pub fn to_request(&self) -> NewAttendance {
        NewAttendance {
            periodo: self.periodo.trim().to_string(),
            codigo_materia: self.codigo_materia.trim().to_string(),
            nombre_materia: self.nombre_materia.trim().to_string(),
            grupo: self.grupo.trim().to_string(),
            matricula: normalize_matriculas(&self.matricula),
            nombre_alumno: self.nombre_alumno.trim().to_string(),
            apellido_paterno: self.apellido_paterno.trim().to_string(),
            apellido_materno: {
                let value = self.apellido_materno.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            },
        }
    }

    /// Aplica la edición local conservando los campos de archivo de la
    /// fila original.
    pub fn apply_to(&self, original: &AttendanceRecord) -> AttendanceRecord {
        AttendanceRecord {
            periodo: self.periodo.trim().to_string(),
            codigo_materia: self.codigo_materia.trim().to_string(),
            nombre_materia: self.nombre_materia.trim().to_string(),
            grupo: self.grupo.trim().to_string(),
            matricula: self.matricula.trim().to_string(),
            nombre_alumno: self.nombre_alumno.trim().to_string(),
            apellido_paterno: self.apellido_paterno.trim().to_string(),
            apellido_materno: {
                let value = self.apellido_materno.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            },
            ..original.clone()
        }
    }
}

pub fn export_rows(records: &[AttendanceRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.periodo.clone(),
                r.codigo_materia.clone(),
                r.nombre_materia.clone(),
                r.grupo.clone(),
                r.matricula.clone(),
                r.expediente.clone().unwrap_or_default(),
                format!(
                    "{} {} {}",
                    r.nombre_alumno,
                    r.apellido_paterno,
                    r.apellido_materno.as_deref().unwrap_or(""),
                )
                .trim()
                .to_string(),
                r.fuente.clone(),
                r.fecha_alta.clone(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(periodo: &str, codigo: &str, grupo: &str, matricula: &str) -> AttendanceRecord {
        AttendanceRecord {
            periodo: periodo.into(),
            codigo_materia: codigo.into(),
            nombre_materia: "Cálculo I".into(),
            grupo: grupo.into(),
            matricula: matricula.into(),
            expediente: None,
            nombre_alumno: "Diana".into(),
            apellido_paterno: "Ruiz".into(),
            apellido_materno: None,
            fecha_alta: "2025-02-01T10:00:00Z".into(),
            fuente: "archivo".into(),
            archivo_id: Some(3),
            nombre_archivo: Some("lista.xlsx".into()),
            fecha_archivo: None,
        }
    }

    #[test]
    fn filters_combine_with_and() {
        let records = vec![
            record("2025-1", "MAT-101", "A1", "220045"),
            record("2025-1", "FIS-200", "A1", "220046"),
            record("2024-2", "MAT-101", "B2", "220047"),
        ];
        let hits = apply_filters(&records, "", "2025-1", "MAT-101", "ALL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matricula, "220045");

        let search_hits = apply_filters(&records, "ruiz", "ALL", "ALL", "ALL");
        assert_eq!(search_hits.len(), 3);

        let none = apply_filters(&records, "inexistente", "ALL", "ALL", "ALL");
        assert!(none.is_empty());
    }

    #[test]
    fn local_edit_replaces_by_composite_key() {
        let mut records = vec![
            record("2025-1", "MAT-101", "A1", "220045"),
            record("2025-1", "MAT-101", "A1", "220046"),
        ];
        let original = records[0].clone();
        let mut form = AttendanceFormState::from_record(&original);
        form.nombre_alumno = "Daniela".into();
        let updated = form.apply_to(&original);

        replace_local(&mut records, &original, updated);
        assert_eq!(records[0].nombre_alumno, "Daniela");
        assert_eq!(records[1].nombre_alumno, "Diana");
        // conserva los metadatos de archivo de la fila original
        assert_eq!(records[0].archivo_id, Some(3));
    }

    #[test]
    fn local_delete_removes_only_the_target() {
        let mut records = vec![
            record("2025-1", "MAT-101", "A1", "220045"),
            record("2025-1", "MAT-101", "A1", "220046"),
        ];
        let target = records[0].clone();
        remove_local(&mut records, &target);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].matricula, "220046");
    }

    #[test]
    fn matriculas_list_is_normalized() {
        assert_eq!(normalize_matriculas("220045, 220046 ,,220047"), "220045,220046,220047");
        assert_eq!(normalize_matriculas(" 220045 "), "220045");
        assert_eq!(normalize_matriculas(" , "), "");
    }

    #[test]
    fn form_requires_key_fields() {
        let mut form = AttendanceFormState {
            periodo: "2025-1".into(),
            codigo_materia: "MAT-101".into(),
            grupo: "A1".into(),
            matricula: "220045".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.matricula = "  ".into();
        assert_eq!(form.validate().unwrap_err(), MISSING_FIELDS);
    }

    #[test]
    fn export_rows_match_header_arity() {
        let rows = export_rows(&[record("2025-1", "MAT-101", "A1", "220045")]);
        assert_eq!(rows[0].len(), EXPORT_HEADERS.len());
        assert_eq!(rows[0][0], "2025-1");
        assert_eq!(rows[0][6], "Diana Ruiz");
    }
}
