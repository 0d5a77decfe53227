#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::SessionUser;
    use crate::state::session::{SessionContext, SessionState};
    use leptos::*;

    pub fn sample_user(app_roles: &[&str]) -> SessionUser {
        SessionUser {
            id: 7,
            profesor_id: Some(12),
            email: "ana@unison.mx".into(),
            nombre: "Ana Morales".into(),
            roles: vec!["Profesor".into()],
            app_roles: app_roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn provide_session(user: Option<SessionUser>, checking: bool) -> SessionContext {
        let (session, set_session) = create_signal(SessionState { user, checking });
        provide_context::<SessionContext>((session, set_session));
        (session, set_session)
    }
}
