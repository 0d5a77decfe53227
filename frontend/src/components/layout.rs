use crate::state::session::use_session;
use leptos::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center p-8">
            <div class="animate-spin rounded-full h-10 w-10 border-b-2 border-[#16469B]"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    let text = Signal::derive(move || message.get());
    view! {
        <Show when=move || !text.get().is_empty()>
            <div class="rounded-md bg-red-50 border border-red-300 text-red-700 px-4 py-2 text-sm">
                {move || text.get()}
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    let text = Signal::derive(move || message.get());
    view! {
        <Show when=move || !text.get().is_empty()>
            <div class="rounded-md bg-green-50 border border-green-300 text-green-700 px-4 py-2 text-sm">
                {move || text.get()}
            </div>
        </Show>
    }
}

/// Iniciales para el avatar: primeras letras de los dos primeros nombres,
/// o la inicial del correo, o "US".
pub fn initials(nombre: &str, email: &str) -> String {
    let parts: Vec<&str> = nombre.split_whitespace().collect();
    if !parts.is_empty() {
        let first = parts[0].chars().next();
        let second = parts.get(1).and_then(|p| p.chars().next());
        let mut result = String::new();
        if let Some(c) = first {
            result.extend(c.to_uppercase());
        }
        if let Some(c) = second {
            result.extend(c.to_uppercase());
        }
        if !result.is_empty() {
            return result;
        }
    }
    if let Some(c) = email.chars().next() {
        return c.to_uppercase().to_string();
    }
    "US".to_string()
}

/// Cabecera institucional con el escudo y el avatar del usuario activo.
#[component]
pub fn UniversityHeader() -> impl IntoView {
    let (session, _) = use_session();
    let avatar = create_memo(move |_| {
        session
            .get()
            .user
            .map(|u| initials(&u.nombre, &u.email))
            .unwrap_or_else(|| "US".to_string())
    });

    view! {
        <div class="bg-white border-t-[6px] border-b-[6px] border-[#16469B]">
            <div class="flex flex-col sm:flex-row items-center justify-between px-3 sm:px-6 py-3 sm:py-2">
                <div class="flex flex-col sm:flex-row items-center space-y-3 sm:space-y-0 sm:space-x-4">
                    <img
                        src="/logo.png"
                        alt="Universidad de Sonora"
                        class="w-12 h-12 lg:w-[110px] lg:h-[110px] rounded-full object-cover"
                    />
                    <div class="text-center sm:text-left px-8 leading-10">
                        <h1 class="text-lg sm:text-2xl lg:text-3xl font-extrabold text-[#16469B] tracking-wider">
                            "UNIVERSIDAD DE SONORA"
                        </h1>
                        <p class="text-xs sm:text-xl text-[#16469B] italic font-semibold tracking-wider">
                            "El Saber de mis Hijos hará mi Grandeza"
                        </p>
                    </div>
                </div>
                <div class="flex flex-col items-center sm:items-end gap-2 mt-3 mr-4 sm:mt-0">
                    <a
                        href="/configuracion-perfil"
                        aria-label="Ver perfil"
                        class="w-8 h-8 sm:w-[3.7rem] sm:h-[3.7rem] bg-[#E6B10F] rounded-full flex items-center justify-center text-white font-bold text-sm sm:text-xl shadow-md hover:opacity-90"
                    >
                        {move || avatar.get()}
                    </a>
                </div>
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::UniversityHeader;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn header_shows_user_initials() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! { <UniversityHeader/> }
        });
        assert!(html.contains("UNIVERSIDAD DE SONORA"));
        assert!(html.contains("AM"));
        assert!(html.contains("/configuracion-perfil"));
    }
}
