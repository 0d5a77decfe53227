use crate::state::session;
use leptos::*;

/// Módulo externo de profesores; solo visible para ADMIN/COORDINADOR.
pub const PROFESORES_URL: &str =
    "https://deploy-sistema-gestion-academica-production.up.railway.app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Roles,
    Historico,
    Horarios,
    Asistencia,
    Planes,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Roles => "Gestión de Roles",
            Tab::Historico => "Reporte Histórico",
            Tab::Horarios => "Horarios",
            Tab::Asistencia => "Grupos",
            Tab::Planes => "Planes de estudio",
        }
    }
}

/// Pestañas visibles en orden fijo; "Gestión de Roles" solo para quien
/// puede administrar roles.
pub fn visible_tabs(can_view_roles: bool) -> Vec<Tab> {
    let mut tabs = Vec::with_capacity(5);
    if can_view_roles {
        tabs.push(Tab::Roles);
    }
    tabs.extend([Tab::Historico, Tab::Horarios, Tab::Asistencia, Tab::Planes]);
    tabs
}

#[component]
pub fn NavigationTabs(
    active: ReadSignal<Tab>,
    on_change: Callback<Tab>,
    #[prop(into)] can_view_roles: Signal<bool>,
    #[prop(into)] can_access_prof_module: Signal<bool>,
) -> impl IntoView {
    let go_to_profesores = move |_| {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(PROFESORES_URL);
        }
    };
    let logout = move |_| {
        session::clear();
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    };

    view! {
        <div class="bg-[#E6B10F] text-white px-3 sm:px-6 shadow-sm">
            <div class="flex items-center">
                <div class="flex">
                    {move || {
                        visible_tabs(can_view_roles.get())
                            .into_iter()
                            .map(|tab| {
                                let is_active = move || active.get() == tab;
                                view! {
                                    <button
                                        class="py-3 sm:py-6 px-4 sm:px-6 text-base sm:text-xl font-normal transition-colors"
                                        class=("text-[#16469B]", is_active)
                                        class=("text-white", move || !is_active())
                                        on:click=move |_| on_change.call(tab)
                                    >
                                        {tab.label()}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <Show when=move || can_access_prof_module.get()>
                    <div class="ml-auto flex items-center gap-2">
                        <button
                            class="my-2 px-4 py-2 rounded-full bg-[#16469B] text-xs sm:text-sm font-medium hover:bg-[#123670] transition-colors"
                            on:click=go_to_profesores
                        >
                            "Ir al módulo Profesores"
                        </button>
                        <button
                            class="my-2 px-4 py-2 rounded-full bg-[#16469B] text-xs sm:text-sm font-medium text-white hover:bg-[#123670] transition-colors"
                            on:click=logout
                        >
                            "Cerrar sesión"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_tab_only_shows_for_admins() {
        assert_eq!(
            visible_tabs(true),
            vec![
                Tab::Roles,
                Tab::Historico,
                Tab::Horarios,
                Tab::Asistencia,
                Tab::Planes
            ]
        );
        assert_eq!(
            visible_tabs(false),
            vec![Tab::Historico, Tab::Horarios, Tab::Asistencia, Tab::Planes]
        );
    }

    #[test]
    fn tab_labels_match_the_ui() {
        assert_eq!(Tab::Asistencia.label(), "Grupos");
        assert_eq!(Tab::Planes.label(), "Planes de estudio");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn tab_bar_renders_gated_controls_for_admin() {
        let html = render_to_string(move || {
            let (active, _) = create_signal(Tab::Historico);
            view! {
                <NavigationTabs
                    active=active
                    on_change=Callback::new(|_| {})
                    can_view_roles=Signal::derive(|| true)
                    can_access_prof_module=Signal::derive(|| true)
                />
            }
        });
        assert!(html.contains("Gestión de Roles"));
        assert!(html.contains("Cerrar sesión"));
        assert!(html.contains("Ir al módulo Profesores"));
    }

    #[test]
    fn tab_bar_hides_roles_tab_for_non_admin() {
        let html = render_to_string(move || {
            let (active, _) = create_signal(Tab::Historico);
            view! {
                <NavigationTabs
                    active=active
                    on_change=Callback::new(|_| {})
                    can_view_roles=Signal::derive(|| false)
                    can_access_prof_module=Signal::derive(|| false)
                />
            }
        });
        assert!(!html.contains("Gestión de Roles"));
        assert!(!html.contains("Cerrar sesión"));
    }
}
