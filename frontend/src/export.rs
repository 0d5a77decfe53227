//! Exportación a CSV de las filas filtradas (no paginadas) de cada tabla.

use crate::api::ApiError;
use crate::utils::{download, time};

pub const EMPTY_EXPORT_MESSAGE: &str = "No hay registros para exportar.";

/// `<dominio>_YYYY-MM-DD.csv`
pub fn export_filename(stem: &str) -> String {
    format!("{}_{}.csv", stem, time::today_stamp())
}

/// Serializa encabezados + filas con el escritor de `csv` en memoria.
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .map_err(|e| ApiError::request_failed(format!("Error al generar CSV: {}", e)))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| ApiError::request_failed(format!("Error al generar CSV: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::request_failed(format!("Error al generar CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ApiError::request_failed(format!("Error al generar CSV: {}", e)))
}

/// Valida, serializa y dispara la descarga. Con cero filas no se genera
/// archivo.
pub fn export_csv(stem: &str, headers: &[&str], rows: Vec<Vec<String>>) -> Result<(), ApiError> {
    if rows.is_empty() {
        return Err(ApiError::validation(EMPTY_EXPORT_MESSAGE));
    }
    let csv_data = build_csv(headers, &rows)?;
    download::trigger_csv_download(&export_filename(stem), &csv_data)
        .map_err(ApiError::request_failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_csv_writes_headers_then_rows() {
        let csv = build_csv(
            &["Periodo", "Grupo"],
            &[
                vec!["2025-1".into(), "A1".into()],
                vec!["2025-1".into(), "B2".into()],
            ],
        )
        .unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Periodo,Grupo"));
        assert_eq!(lines.next(), Some("2025-1,A1"));
        assert_eq!(lines.next(), Some("2025-1,B2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn build_csv_quotes_embedded_commas() {
        let csv = build_csv(&["Nombre"], &[vec!["Ruiz, Diana".into()]]).unwrap();
        assert!(csv.contains("\"Ruiz, Diana\""));
    }

    #[test]
    fn build_csv_is_deterministic_for_same_input() {
        let rows = vec![vec!["2025-1".into(), "A1".into()]];
        let first = build_csv(&["Periodo", "Grupo"], &rows).unwrap();
        let second = build_csv(&["Periodo", "Grupo"], &rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn export_csv_refuses_empty_filtered_set() {
        let err = export_csv("planes", &["Código"], Vec::new()).unwrap_err();
        assert_eq!(err.error, EMPTY_EXPORT_MESSAGE);
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn export_filename_carries_date_stamp() {
        let name = export_filename("horarios");
        assert!(name.starts_with("horarios_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "horarios_".len() + 10 + ".csv".len());
    }
}
