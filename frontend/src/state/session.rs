use crate::{api::SessionUser, utils::storage};
use leptos::*;

/// Slot único de sesión; el perfil se guarda como llega del login.
pub const USER_STORAGE_KEY: &str = "userData";

pub type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub checking: bool,
}

/// JSON ilegible o un perfil sin correo cuentan como sesión inexistente.
pub fn parse_session(raw: &str) -> Option<SessionUser> {
    let user: SessionUser = serde_json::from_str(raw).ok()?;
    if user.email.trim().is_empty() {
        return None;
    }
    Some(user)
}

/// Lee el slot; un valor corrupto se limpia y se registra en consola,
/// nunca se muestra como error.
pub fn read() -> Option<SessionUser> {
    let storage = storage::local_storage().ok()?;
    let raw = storage.get_item(USER_STORAGE_KEY).ok().flatten()?;
    match parse_session(&raw) {
        Some(user) => Some(user),
        None => {
            log::warn!("sesión almacenada ilegible; se descarta");
            let _ = storage.remove_item(USER_STORAGE_KEY);
            None
        }
    }
}

pub fn write(user: &SessionUser) -> Result<(), String> {
    let storage = storage::local_storage()?;
    let raw = serde_json::to_string(user).map_err(|_| "No se pudo serializar la sesión")?;
    storage
        .set_item(USER_STORAGE_KEY, &raw)
        .map_err(|_| "No se pudo guardar la sesión".to_string())
}

pub fn clear() {
    if let Ok(storage) = storage::local_storage() {
        let _ = storage.remove_item(USER_STORAGE_KEY);
    }
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (session, set_session) = create_signal(SessionState {
        user: None,
        checking: true,
    });
    // El localStorage solo existe en el navegador; el efecto no corre al
    // renderizar en el servidor de pruebas.
    create_effect(move |_| {
        let user = read();
        set_session.set(SessionState {
            user,
            checking: false,
        });
    });
    provide_context::<SessionContext>((session, set_session));
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub fn can_view_roles(user: Option<&SessionUser>) -> bool {
    user.map(|u| u.app_roles.iter().any(|r| r == "ADMINISTRADOR"))
        .unwrap_or(false)
}

pub fn can_access_prof_module(user: Option<&SessionUser>) -> bool {
    user.map(|u| {
        u.app_roles
            .iter()
            .any(|r| r == "ADMINISTRADOR" || r == "COORDINADOR")
    })
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_app_roles(app_roles: &[&str]) -> SessionUser {
        SessionUser {
            id: 1,
            profesor_id: None,
            email: "ana@unison.mx".into(),
            nombre: "Ana".into(),
            roles: vec![],
            app_roles: app_roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn parse_session_accepts_valid_profile() {
        let raw = r#"{"id":1,"email":"ana@unison.mx","nombre":"Ana","roles":[],"appRoles":[]}"#;
        let user = parse_session(raw).unwrap();
        assert_eq!(user.email, "ana@unison.mx");
    }

    #[test]
    fn parse_session_rejects_malformed_json() {
        assert!(parse_session("{no es json").is_none());
        assert!(parse_session("").is_none());
    }

    #[test]
    fn parse_session_rejects_empty_email() {
        let raw = r#"{"id":1,"email":"  ","nombre":"Ana"}"#;
        assert!(parse_session(raw).is_none());
    }

    #[test]
    fn role_gates_check_app_roles() {
        let admin = user_with_app_roles(&["ADMINISTRADOR"]);
        let coordinador = user_with_app_roles(&["COORDINADOR"]);
        let profesor = user_with_app_roles(&["PROFESOR"]);

        assert!(can_view_roles(Some(&admin)));
        assert!(!can_view_roles(Some(&coordinador)));
        assert!(!can_view_roles(Some(&profesor)));
        assert!(!can_view_roles(None));

        assert!(can_access_prof_module(Some(&admin)));
        assert!(can_access_prof_module(Some(&coordinador)));
        assert!(!can_access_prof_module(Some(&profesor)));
        assert!(!can_access_prof_module(None));
    }

    #[test]
    fn use_session_returns_default_without_context() {
        let runtime = create_runtime();
        let (state, _set_state) = use_session();
        let snapshot = state.get();
        assert!(snapshot.user.is_none());
        assert!(!snapshot.checking);
        runtime.dispose();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample() -> SessionUser {
        SessionUser {
            id: 1,
            profesor_id: None,
            email: "ana@unison.mx".into(),
            nombre: "Ana".into(),
            roles: vec![],
            app_roles: vec!["ADMINISTRADOR".into()],
        }
    }

    #[wasm_bindgen_test]
    fn write_then_read_roundtrips_the_slot() {
        clear();
        write(&sample()).unwrap();
        let user = read().unwrap();
        assert_eq!(user.email, "ana@unison.mx");
        clear();
        assert!(read().is_none());
    }

    #[wasm_bindgen_test]
    fn corrupt_slot_is_discarded_and_removed() {
        let storage = crate::utils::storage::local_storage().unwrap();
        storage.set_item(USER_STORAGE_KEY, "{no es json").unwrap();
        assert!(read().is_none());
        assert!(storage.get_item(USER_STORAGE_KEY).unwrap().is_none());
    }
}
