use leptos::*;

use crate::{
    api::SessionUser,
    components::{guard::RequireSession, layout},
    state::session::use_session,
};

/// Rol que encabeza la tarjeta: el primer appRole, luego el primer rol.
pub fn primary_role(user: &SessionUser) -> String {
    user.app_roles
        .first()
        .or_else(|| user.roles.first())
        .cloned()
        .unwrap_or_else(|| "Administrador".to_string())
}

/// Unión sin duplicados de appRoles y roles, separada por comas.
pub fn all_roles(user: &SessionUser) -> String {
    let mut seen = Vec::new();
    for rol in user.app_roles.iter().chain(user.roles.iter()) {
        if !seen.contains(rol) {
            seen.push(rol.clone());
        }
    }
    if seen.is_empty() {
        primary_role(user)
    } else {
        seen.join(", ")
    }
}

#[component]
pub fn PerfilPage() -> impl IntoView {
    view! {
        <RequireSession>
            <PerfilCard />
        </RequireSession>
    }
}

#[component]
fn PerfilCard() -> impl IntoView {
    let (session, _) = use_session();
    let user = create_memo(move |_| session.get().user);

    let go_home = move |_| {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/");
        }
    };
    let go_recovery = move |_| {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/recuperar-contrasena");
        }
    };

    view! {
        <div class="min-h-screen bg-gray-100">
            <layout::UniversityHeader />
            <main class="mx-auto max-w-5xl p-4 sm:p-6">
                <section class="rounded-3xl bg-white p-6 shadow-md md:p-8">
                    <div class="mb-4 flex justify-end">
                        <button
                            class="rounded-full bg-[#16469B] px-4 py-2 text-sm font-medium text-white hover:bg-[#123670]"
                            on:click=go_home
                        >
                            "Regresar al inicio"
                        </button>
                    </div>
                    {move || {
                        user.get()
                            .map(|u| {
                                let avatar = layout::initials(&u.nombre, &u.email);
                                let rol_principal = primary_role(&u);
                                let roles_sistema = all_roles(&u);
                                view! {
                                    <div class="flex flex-col items-start gap-8 md:flex-row">
                                        <div class="flex flex-col items-center gap-3">
                                            <div class="flex h-32 w-32 items-center justify-center rounded-full bg-[#16469B] text-4xl font-semibold text-white shadow-md md:h-40 md:w-40 md:text-5xl">
                                                {avatar}
                                            </div>
                                        </div>
                                        <div class="w-full flex-1">
                                            <h2 class="mb-4 border-b-2 border-[#16469B] pb-1 text-xl font-bold text-[#16469B]">
                                                "Información Personal"
                                            </h2>
                                            <div class="space-y-1 text-gray-700">
                                                <p class="text-xs font-semibold uppercase text-[#16469B]">
                                                    "Universidad de Sonora"
                                                </p>
                                                <p>
                                                    "Nombre: "
                                                    <span class="font-medium">{u.nombre.clone()}</span>
                                                </p>
                                                <p>
                                                    "ID usuario: "
                                                    <span class="font-medium">{u.id}</span>
                                                </p>
                                                <p>
                                                    "Correo institucional: "
                                                    <span class="font-medium">{u.email.clone()}</span>
                                                </p>
                                                <p>
                                                    "Rol principal: "
                                                    <span class="font-medium">{rol_principal}</span>
                                                </p>
                                                <p>
                                                    "Roles en el sistema: "
                                                    <span class="font-medium">{roles_sistema}</span>
                                                </p>
                                            </div>
                                        </div>
                                    </div>
                                }
                            })
                    }}
                    <hr class="my-8 border-gray-200" />
                    <section>
                        <h2 class="mb-4 border-b-2 border-[#16469B] pb-1 text-xl font-bold text-[#16469B]">
                            "Seguridad de Cuenta"
                        </h2>
                        <button
                            class="mt-2 inline-flex items-center text-sm text-[#16469B] hover:underline"
                            on:click=go_recovery
                        >
                            "Cambiar contraseña"
                        </button>
                    </section>
                </section>
            </main>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::PerfilPage;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn shows_the_session_profile() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! { <PerfilPage /> }
        });
        assert!(html.contains("Información Personal"));
        assert!(html.contains("Ana Morales"));
        assert!(html.contains("ana@unison.mx"));
        assert!(html.contains("ADMINISTRADOR, Profesor"));
        assert!(html.contains("Cambiar contraseña"));
    }

    #[test]
    fn hides_the_card_without_session() {
        let html = render_to_string(move || {
            provide_session(None, false);
            view! { <PerfilPage /> }
        });
        assert!(!html.contains("Información Personal"));
    }
}
