use crate::api::{MateriaPayload, PlanRecord};
use crate::tables::{matches_option, matches_search};

pub const MISSING_FIELDS: &str = "Código, nombre de materia y plan son obligatorios.";
/// Valores del filtro de tipo; el backend solo distingue estos dos en la vista.
pub const TIPOS: &[&str] = &["OBLIGATORIA", "OPTATIVA"];
/// Valores asignables desde el formulario; TALLER existe en los planes pero no
/// como filtro.
pub const FORM_TIPOS: &[&str] = &["OBLIGATORIA", "OPTATIVA", "TALLER"];

pub const EXPORT_HEADERS: &[&str] = &[
    "Código",
    "Materia",
    "Créditos",
    "Tipo",
    "Plan",
    "Versión",
];

pub fn searchable_text(record: &PlanRecord) -> String {
    format!(
        "{} {} {}",
        record.codigo, record.nombre_materia, record.plan_nombre,
    )
}

/// `plan` es el id del plan como texto (o el centinela de "todos").
pub fn apply_filters(
    records: &[PlanRecord],
    search: &str,
    plan: &str,
    tipo: &str,
) -> Vec<PlanRecord> {
    records
        .iter()
        .filter(|r| matches_option(&r.plan_id.to_string(), plan))
        .filter(|r| matches_option(&r.tipo, tipo))
        .filter(|r| matches_search(&searchable_text(r), search))
        .cloned()
        .collect()
}

pub fn replace_by_id(records: &mut [PlanRecord], updated: PlanRecord) {
    if let Some(slot) = records.iter_mut().find(|r| r.id == updated.id) {
        *slot = updated;
    }
}

pub fn remove_by_id(records: &mut Vec<PlanRecord>, id: i64) {
    records.retain(|r| r.id != id);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MateriaFormState {
    pub codigo: String,
    pub nombre: String,
    pub creditos: String,
    pub tipo: String,
    pub plan_id: String,
}

impl Default for MateriaFormState {
    fn default() -> Self {
        Self {
            codigo: String::new(),
            nombre: String::new(),
            creditos: String::new(),
            tipo: "OBLIGATORIA".to_string(),
            plan_id: String::new(),
        }
    }
}

impl MateriaFormState {
    pub fn from_record(record: &PlanRecord) -> Self {
        Self {
            codigo: record.codigo.clone(),
            nombre: record.nombre_materia.clone(),
            creditos: record.creditos.to_string(),
            tipo: record.tipo.clone(),
            plan_id: record.plan_id.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.codigo.trim().is_empty()
            || self.nombre.trim().is_empty()
            || self.plan_id.trim().parse::<i64>().is_err()
        {
            return Err(MISSING_FIELDS.to_string());
        }
        Ok(())
    }

    pub fn to_payload(&self) -> MateriaPayload {
        MateriaPayload {
            codigo: self.codigo.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            creditos: self.creditos.trim().parse().unwrap_or(0),
            tipo: self.tipo.clone(),
            plan_estudio_id: self.plan_id.trim().parse().unwrap_or(0),
        }
    }
}

pub fn export_rows(records: &[PlanRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.codigo.clone(),
                r.nombre_materia.clone(),
                r.creditos.to_string(),
                r.tipo.clone(),
                r.plan_nombre.clone(),
                r.plan_version.clone(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, codigo: &str, tipo: &str, plan_id: i64) -> PlanRecord {
        PlanRecord {
            id,
            codigo: codigo.into(),
            nombre_materia: "Programación I".into(),
            creditos: 8,
            tipo: tipo.into(),
            plan_id,
            plan_nombre: "Ing. en Sistemas".into(),
            plan_version: "2019".into(),
            plan_total_creditos: Some(340),
            plan_semestres_sugeridos: Some(9),
        }
    }

    #[test]
    fn filters_by_plan_and_tipo() {
        let records = vec![
            record(1, "ISI-101", "OBLIGATORIA", 2),
            record(2, "ISI-210", "OPTATIVA", 2),
            record(3, "QUI-101", "OBLIGATORIA", 3),
        ];
        let by_plan = apply_filters(&records, "", "2", "ALL");
        assert_eq!(by_plan.len(), 2);

        let by_tipo = apply_filters(&records, "", "ALL", "OPTATIVA");
        assert_eq!(by_tipo.len(), 1);
        assert_eq!(by_tipo[0].codigo, "ISI-210");

        let by_search = apply_filters(&records, "qui", "ALL", "ALL");
        assert_eq!(by_search.len(), 1);
    }

    #[test]
    fn form_requires_a_valid_plan() {
        let mut form = MateriaFormState {
            codigo: "ISI-101".into(),
            nombre: "Programación I".into(),
            creditos: "8".into(),
            plan_id: "2".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.plan_id = "".into();
        assert_eq!(form.validate().unwrap_err(), MISSING_FIELDS);
    }

    #[test]
    fn payload_parses_numeric_fields() {
        let form = MateriaFormState {
            codigo: " ISI-101 ".into(),
            nombre: "Programación I".into(),
            creditos: "8".into(),
            tipo: "OPTATIVA".into(),
            plan_id: "2".into(),
        };
        let payload = form.to_payload();
        assert_eq!(payload.codigo, "ISI-101");
        assert_eq!(payload.creditos, 8);
        assert_eq!(payload.plan_estudio_id, 2);
        assert_eq!(payload.tipo, "OPTATIVA");
    }

    #[test]
    fn form_tipos_offer_taller() {
        assert!(FORM_TIPOS.contains(&"TALLER"));
        assert!(!TIPOS.contains(&"TALLER"));
        for tipo in TIPOS {
            assert!(FORM_TIPOS.contains(tipo));
        }
    }

    #[test]
    fn remove_by_id_drops_only_that_row() {
        let mut records = vec![
            record(1, "ISI-101", "OBLIGATORIA", 2),
            record(2, "ISI-210", "OPTATIVA", 2),
        ];
        remove_by_id(&mut records, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);

        remove_by_id(&mut records, 99);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn export_rows_match_header_arity() {
        let rows = export_rows(&[record(1, "ISI-101", "OBLIGATORIA", 2)]);
        assert_eq!(rows[0].len(), EXPORT_HEADERS.len());
        assert_eq!(rows[0][3], "OBLIGATORIA");
        assert_eq!(rows[0][5], "2019");
    }
}
