use crate::state::session::use_session;
use leptos::*;

/// Envuelve las vistas protegidas: sin sesión válida redirige a /login y
/// no renderiza nada; mientras se revisa el slot muestra un marcador.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().user.is_some());
    let checking = create_memo(move |_| session.get().checking);
    create_effect(move |_| {
        let state = session.get();
        if state.checking || state.user.is_some() {
            return;
        }
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), checking.get())
            fallback=move || {
                if checking.get() {
                    view! {
                        <div class="flex items-center justify-center min-h-screen text-[#16469B]">
                            "Verificando sesión…"
                        </div>
                    }
                    .into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, checking: bool) -> bool {
    is_authenticated && !checking
}

#[cfg(test)]
mod tests {
    use super::should_render_children;

    #[test]
    fn guard_blocks_until_session_is_confirmed() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireSession;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn renders_children_with_active_session() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! {
                <RequireSession>
                    {|| view! { <div>"contenido-protegido"</div> }}
                </RequireSession>
            }
        });
        assert!(html.contains("contenido-protegido"));
    }

    #[test]
    fn hides_children_without_session() {
        let html = render_to_string(move || {
            provide_session(None, false);
            view! {
                <RequireSession>
                    {|| view! { <div>"contenido-protegido"</div> }}
                </RequireSession>
            }
        });
        assert!(!html.contains("contenido-protegido"));
    }

    #[test]
    fn shows_placeholder_while_checking() {
        let html = render_to_string(move || {
            provide_session(None, true);
            view! {
                <RequireSession>
                    {|| view! { <div>"contenido-protegido"</div> }}
                </RequireSession>
            }
        });
        assert!(html.contains("Verificando sesión…"));
        assert!(!html.contains("contenido-protegido"));
    }
}
