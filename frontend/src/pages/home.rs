use leptos::*;

use crate::{
    components::{
        guard::RequireSession,
        layout::UniversityHeader,
        nav_tabs::{NavigationTabs, Tab},
    },
    pages::{
        asistencia::AsistenciaPanel, historico::HistoricoPanel, horarios::HorariosPanel,
        planes::PlanesPanel, usuarios::UsuariosPanel,
    },
    state::session::{self, use_session},
};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <RequireSession>
            <HomeShell />
        </RequireSession>
    }
}

#[component]
fn HomeShell() -> impl IntoView {
    let (session, _set_session) = use_session();
    let can_view_roles = create_memo(move |_| {
        session::can_view_roles(session.get().user.as_ref())
    });
    let can_access_prof_module = create_memo(move |_| {
        session::can_access_prof_module(session.get().user.as_ref())
    });

    let (active_tab, set_active_tab) = create_signal(Tab::Historico);

    view! {
        <div class="min-h-screen bg-gray-100">
            <UniversityHeader />
            <NavigationTabs
                active=active_tab
                on_change=Callback::new(move |tab| set_active_tab.set(tab))
                can_view_roles=Signal::derive(move || can_view_roles.get())
                can_access_prof_module=Signal::derive(move || can_access_prof_module.get())
            />
            <main class="mx-auto max-w-7xl p-4 sm:p-6">
                {move || match active_tab.get() {
                    Tab::Roles => view! { <UsuariosPanel /> }.into_view(),
                    Tab::Historico => view! { <HistoricoPanel /> }.into_view(),
                    Tab::Horarios => view! { <HorariosPanel /> }.into_view(),
                    Tab::Asistencia => view! { <AsistenciaPanel /> }.into_view(),
                    Tab::Planes => view! { <PlanesPanel /> }.into_view(),
                }}
            </main>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn default_tab_is_the_academic_history() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["COORDINADOR"])), false);
            view! { <HomePage /> }
        });

        assert!(html.contains("Histórico académico"));
        assert!(html.contains("Reporte Histórico"));
    }

    #[test]
    fn roles_tab_requires_the_admin_role() {
        let coordinador = render_to_string(move || {
            provide_session(Some(sample_user(&["COORDINADOR"])), false);
            view! { <HomePage /> }
        });
        assert!(!coordinador.contains("Gestión de Roles"));

        let admin = render_to_string(move || {
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! { <HomePage /> }
        });
        assert!(admin.contains("Gestión de Roles"));
    }
}
