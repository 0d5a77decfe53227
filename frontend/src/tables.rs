//! Mecánica compartida de las tablas de registros: búsqueda, filtros por
//! columna, opciones distintas y paginación. Todo son proyecciones puras
//! sobre el arreglo completo en memoria.

/// Centinela de los filtros por columna: "todas las opciones".
pub const ALL: &str = "ALL";

pub const PAGE_SIZE: usize = 15;

/// Cuántos botones numerados muestra la tira de paginación.
const PAGE_WINDOW: usize = 5;

/// Subcadena sin distinguir mayúsculas; una búsqueda vacía acepta todo.
pub fn matches_search(haystack: &str, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Igualdad exacta salvo que el filtro esté en `ALL`.
pub fn matches_option(value: &str, selected: &str) -> bool {
    selected == ALL || value == selected
}

/// Valores distintos no vacíos, ordenados ascendente.
pub fn distinct_options<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut options: Vec<String> = values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    options.sort();
    options.dedup();
    options
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Rango `[inicio, fin)` de la página (1-indexada) dentro del arreglo
/// filtrado.
pub fn page_bounds(len: usize, page: usize) -> (usize, usize) {
    let page = page.clamp(1, total_pages(len));
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(len);
    (start, end)
}

/// Números de página visibles: hasta cinco botones centrados en la página
/// actual, pegados a los extremos cerca de los bordes.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    if total <= PAGE_WINDOW {
        return (1..=total).collect();
    }
    let half = PAGE_WINDOW / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(total - PAGE_WINDOW + 1);
    (start..start + PAGE_WINDOW).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_and_empty_matches_all() {
        assert!(matches_search("Cálculo I MAT-101", "mat-101"));
        assert!(matches_search("Cálculo I", ""));
        assert!(matches_search("Cálculo I", "   "));
        assert!(!matches_search("Cálculo I", "física"));
    }

    #[test]
    fn option_filter_honors_all_sentinel() {
        assert!(matches_option("2025-1", ALL));
        assert!(matches_option("2025-1", "2025-1"));
        assert!(!matches_option("2025-1", "2024-2"));
    }

    #[test]
    fn distinct_options_sorts_and_drops_blanks() {
        let options = distinct_options(
            ["B1", "A1", "", "  ", "B1", "A2"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(options, vec!["A1", "A2", "B1"]);
    }

    #[test]
    fn total_pages_never_drops_below_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(15), 1);
        assert_eq!(total_pages(16), 2);
        assert_eq!(total_pages(45), 3);
    }

    #[test]
    fn page_bounds_clamp_page_and_tail() {
        assert_eq!(page_bounds(40, 1), (0, 15));
        assert_eq!(page_bounds(40, 3), (30, 40));
        // página fuera de rango cae en la última
        assert_eq!(page_bounds(40, 9), (30, 40));
        assert_eq!(page_bounds(0, 1), (0, 0));
    }

    #[test]
    fn page_window_centers_on_current_page() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn page_window_sticks_to_boundaries() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn page_window_with_few_pages_lists_them_all() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(2, 5), vec![1, 2, 3, 4, 5]);
        assert!(page_window(1, 0).is_empty());
    }
}
