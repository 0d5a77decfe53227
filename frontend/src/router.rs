use leptos::*;
use leptos_router::*;

use crate::{
    pages::{HomePage, LoginPage, PerfilPage, RecuperarPage},
    state::session::SessionProvider,
};

pub const ROUTE_PATHS: &[&str] =
    &["/", "/login", "/recuperar-contrasena", "/configuracion-perfil"];
pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/", "/configuracion-perfil"];
pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login", "/recuperar-contrasena"];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    view! {
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/recuperar-contrasena" view=RecuperarPage/>
                    <Route path="/configuracion-perfil" view=PerfilPage/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn recovery_route_is_registered() {
        assert!(ROUTE_PATHS.contains(&"/recuperar-contrasena"));
    }

    #[test]
    fn every_route_is_protected_or_public() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        let split: HashSet<&str> = PROTECTED_ROUTE_PATHS
            .iter()
            .chain(PUBLIC_ROUTE_PATHS)
            .copied()
            .collect();
        assert_eq!(all, split);
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
