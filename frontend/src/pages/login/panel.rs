use leptos::*;

use crate::{
    api::LoginRequest,
    components::layout::ErrorMessage,
    state::session,
};

use super::{repository::LoginRepository, utils};

#[component]
pub fn LoginPage() -> impl IntoView {
    let repository = LoginRepository::new();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(String::new());

    let login_action = create_action(move |request: &LoginRequest| {
        let repo = repository.clone();
        let request = request.clone();
        async move { repo.login(request).await }
    });
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(response) => {
                    if let Err(err) = session::write(&response.user) {
                        log::warn!("no se pudo guardar la sesión: {}", err);
                    }
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href("/");
                    }
                }
                Err(err) => error.set(err.error),
            }
        }
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        let password_value = password.get();
        if let Err(message) = utils::validate_credentials(&email_value, &password_value) {
            error.set(message);
            return;
        }
        error.set(String::new());
        login_action.dispatch(LoginRequest {
            email: email_value.trim().to_string(),
            password: password_value,
        });
    };

    view! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-white rounded-lg shadow-lg border-t-8 border-[#16469B] p-8 space-y-6">
                <div class="text-center space-y-1">
                    <h1 class="text-2xl font-extrabold text-[#16469B]">
                        "Sistema de Carga de Archivos"
                    </h1>
                    <p class="text-sm text-gray-600">"Universidad de Sonora"</p>
                </div>
                <form class="space-y-4" on:submit=submit>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">
                            "Correo electrónico"
                        </label>
                        <input
                            type="email"
                            class="w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-2 focus:ring-[#16469B]"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">
                            "Contraseña"
                        </label>
                        <input
                            type="password"
                            class="w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-2 focus:ring-[#16469B]"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <ErrorMessage message=Signal::derive(move || error.get())/>
                    <button
                        type="submit"
                        class="w-full py-2 rounded-md bg-[#16469B] text-white font-semibold hover:bg-[#123670] disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Ingresando…" } else { "Iniciar sesión" }}
                    </button>
                </form>
                <div class="text-center">
                    <a
                        href="/recuperar-contrasena"
                        class="text-sm text-[#16469B] hover:underline"
                    >
                        "¿Olvidaste tu contraseña?"
                    </a>
                </div>
            </div>
        </div>
    }
}
