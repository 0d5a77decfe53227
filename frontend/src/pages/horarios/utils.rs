use crate::api::{NewSchedule, ScheduleRecord};
use crate::tables::{matches_option, matches_search};

pub const MISSING_FIELDS: &str =
    "Periodo, código de materia, nombre de materia y grupo son obligatorios.";
pub const NO_UPLOAD_FILES: &str =
    "Selecciona al menos un archivo (ISI o Prelistas) para subir.";

pub const EXPORT_HEADERS: &[&str] = &[
    "Periodo",
    "Código materia",
    "Materia",
    "Grupo",
    "Día",
    "Aula",
    "Hora inicio",
    "Hora fin",
    "Profesor",
    "Cupo",
];

pub fn dia_semana_label(dia: Option<i32>) -> &'static str {
    match dia {
        Some(1) => "Lunes",
        Some(2) => "Martes",
        Some(3) => "Miércoles",
        Some(4) => "Jueves",
        Some(5) => "Viernes",
        Some(6) => "Sábado",
        Some(7) => "Domingo",
        _ => "—",
    }
}

pub fn profesor_full_name(record: &ScheduleRecord) -> String {
    [
        record.profesor_nombre.as_deref(),
        record.profesor_apellido_paterno.as_deref(),
        record.profesor_apellido_materno.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn searchable_text(record: &ScheduleRecord) -> String {
    format!(
        "{} {} {} {} {} {}",
        record.periodo,
        record.codigo_materia,
        record.nombre_materia,
        record.grupo,
        record.aula.as_deref().unwrap_or(""),
        profesor_full_name(record),
    )
}

pub fn empleado_text(record: &ScheduleRecord) -> String {
    record
        .num_empleado
        .map(|n| n.to_string())
        .unwrap_or_default()
}

pub fn apply_filters(
    records: &[ScheduleRecord],
    search: &str,
    periodo: &str,
    codigo: &str,
    grupo: &str,
    empleado: &str,
) -> Vec<ScheduleRecord> {
    records
        .iter()
        .filter(|r| matches_option(&r.periodo, periodo))
        .filter(|r| matches_option(&r.codigo_materia, codigo))
        .filter(|r| matches_option(&r.grupo, grupo))
        .filter(|r| matches_option(&empleado_text(r), empleado))
        .filter(|r| matches_search(&searchable_text(r), search))
        .cloned()
        .collect()
}

pub fn replace_by_id(records: &mut [ScheduleRecord], updated: ScheduleRecord) {
    if let Some(slot) = records.iter_mut().find(|r| r.id == updated.id) {
        *slot = updated;
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFormState {
    pub periodo: String,
    pub codigo_materia: String,
    pub nombre_materia: String,
    pub grupo: String,
    pub dia_semana: String,
    pub aula: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub num_empleado: String,
    pub profesor_nombre: String,
    pub profesor_apellido_paterno: String,
    pub profesor_apellido_materno: String,
    pub cupo: String,
}

impl ScheduleFormState {
    pub fn from_record(record: &ScheduleRecord) -> Self {
        Self {
            periodo: record.periodo.clone(),
            codigo_materia: record.codigo_materia.clone(),
            nombre_materia: record.nombre_materia.clone(),
            grupo: record.grupo.clone(),
            dia_semana: record
                .dia_semana
                .map(|d| d.to_string())
                .unwrap_or_default(),
            aula: record.aula.clone().unwrap_or_default(),
            hora_inicio: record.hora_inicio.clone().unwrap_or_default(),
            hora_fin: record.hora_fin.clone().unwrap_or_default(),
            num_empleado: record
                .num_empleado
                .map(|n| n.to_string())
                .unwrap_or_default(),
            profesor_nombre: record.profesor_nombre.clone().unwrap_or_default(),
            profesor_apellido_paterno: record
                .profesor_apellido_paterno
                .clone()
                .unwrap_or_default(),
            profesor_apellido_materno: record
                .profesor_apellido_materno
                .clone()
                .unwrap_or_default(),
            cupo: record.cupo.map(|c| c.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.periodo.trim().is_empty()
            || self.codigo_materia.trim().is_empty()
            || self.nombre_materia.trim().is_empty()
            || self.grupo.trim().is_empty()
        {
            return Err(MISSING_FIELDS.to_string());
        }
        Ok(())
    }

    pub fn to_request(&self) -> NewSchedule {
        NewSchedule {
            periodo: self.periodo.trim().to_string(),
            codigo_materia: self.codigo_materia.trim().to_string(),
            nombre_materia: self.nombre_materia.trim().to_string(),
            grupo: self.grupo.trim().to_string(),
            dia_semana: self.dia_semana.trim().parse().ok(),
            aula: optional(&self.aula),
            hora_inicio: optional(&self.hora_inicio),
            hora_fin: optional(&self.hora_fin),
            num_empleado: self.num_empleado.trim().parse().ok(),
            profesor_nombre: optional(&self.profesor_nombre),
            profesor_apellido_paterno: optional(&self.profesor_apellido_paterno),
            profesor_apellido_materno: optional(&self.profesor_apellido_materno),
            cupo: self.cupo.trim().parse().ok(),
        }
    }
}

pub fn export_rows(records: &[ScheduleRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.periodo.clone(),
                r.codigo_materia.clone(),
                r.nombre_materia.clone(),
                r.grupo.clone(),
                dia_semana_label(r.dia_semana).to_string(),
                r.aula.clone().unwrap_or_default(),
                r.hora_inicio.clone().unwrap_or_default(),
                r.hora_fin.clone().unwrap_or_default(),
                profesor_full_name(r),
                r.cupo.map(|c| c.to_string()).unwrap_or_default(),
            ]
        })
        .collect()
}
