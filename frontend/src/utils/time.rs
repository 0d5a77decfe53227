use chrono::{DateTime, NaiveDate};

/// Fecha local de hoy. En el navegador sale de `js_sys::Date` para no
/// depender de la zona horaria del binario.
#[cfg(target_arch = "wasm32")]
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Sello `YYYY-MM-DD` para nombres de archivo exportados.
pub fn today_stamp() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Fecha corta `dd/mm/aa` para el historial de cargas. Si la cadena ISO
/// no se puede interpretar se regresa tal cual.
pub fn short_date(iso: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
        return parsed.format("%d/%m/%y").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return parsed.format("%d/%m/%y").to_string();
    }
    iso.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_formats_rfc3339_timestamps() {
        assert_eq!(short_date("2025-02-01T10:30:00Z"), "01/02/25");
        assert_eq!(short_date("2024-12-31T23:00:00-07:00"), "31/12/24");
    }

    #[test]
    fn short_date_accepts_bare_dates() {
        assert_eq!(short_date("2025-08-15"), "15/08/25");
    }

    #[test]
    fn short_date_passes_through_garbage() {
        assert_eq!(short_date("ayer"), "ayer");
        assert_eq!(short_date(""), "");
    }

    #[test]
    fn today_stamp_is_iso_shaped() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 10);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[7..8], "-");
    }
}
