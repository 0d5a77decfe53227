use leptos::*;

use crate::{
    api::ResetPasswordRequest,
    components::layout::{ErrorMessage, SuccessMessage},
};

use super::{
    repository::RecuperarRepository,
    utils::{self, Step},
};

#[component]
pub fn RecuperarPage() -> impl IntoView {
    let repository = RecuperarRepository::new();

    let step = create_rw_signal(Step::Request);
    let email = create_rw_signal(String::new());
    let codigo = create_rw_signal(String::new());
    let new_password = create_rw_signal(String::new());
    let error = create_rw_signal(String::new());
    let notice = create_rw_signal(String::new());

    let request_action = {
        let repo = repository.clone();
        create_action(move |email: &String| {
            let repo = repo.clone();
            let email = email.clone();
            async move { repo.request_code(email).await }
        })
    };
    let reset_action = {
        let repo = repository.clone();
        create_action(move |request: &ResetPasswordRequest| {
            let repo = repo.clone();
            let request = request.clone();
            async move { repo.reset(request).await }
        })
    };
    let pending = Signal::derive(move || {
        request_action.pending().get() || reset_action.pending().get()
    });

    create_effect(move |_| {
        if let Some(result) = request_action.value().get() {
            match result {
                Ok(response) => {
                    notice.set(response.message);
                    error.set(String::new());
                    step.set(Step::Reset);
                }
                Err(err) => error.set(err.error),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = reset_action.value().get() {
            match result {
                Ok(response) => {
                    notice.set(response.message);
                    error.set(String::new());
                    step.set(Step::Done);
                }
                Err(err) => error.set(err.error),
            }
        }
    });

    let submit_request = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        if let Err(message) = utils::validate_request(&email_value) {
            error.set(message);
            return;
        }
        error.set(String::new());
        request_action.dispatch(email_value.trim().to_string());
    };

    let submit_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        let codigo_value = codigo.get();
        let password_value = new_password.get();
        if let Err(message) =
            utils::validate_reset(&email_value, &codigo_value, &password_value)
        {
            error.set(message);
            return;
        }
        error.set(String::new());
        reset_action.dispatch(ResetPasswordRequest {
            email: email_value.trim().to_string(),
            codigo: codigo_value.trim().to_string(),
            new_password: password_value,
        });
    };

    let input_class = "w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-2 focus:ring-[#16469B]";

    view! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-white rounded-lg shadow-lg border-t-8 border-[#E6B10F] p-8 space-y-6">
                <h1 class="text-2xl font-extrabold text-[#16469B] text-center">
                    "Recuperar contraseña"
                </h1>
                <SuccessMessage message=Signal::derive(move || notice.get())/>
                <ErrorMessage message=Signal::derive(move || error.get())/>
                {move || match step.get() {
                    Step::Request => view! {
                        <form class="space-y-4" on:submit=submit_request>
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">
                                    "Correo electrónico"
                                </label>
                                <input
                                    type="email"
                                    class=input_class
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </div>
                            <button
                                type="submit"
                                class="w-full py-2 rounded-md bg-[#16469B] text-white font-semibold hover:bg-[#123670] disabled:opacity-50"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Enviando…" } else { "Enviar código" }}
                            </button>
                        </form>
                    }
                    .into_view(),
                    Step::Reset => view! {
                        <form class="space-y-4" on:submit=submit_reset>
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">
                                    "Correo electrónico"
                                </label>
                                <input
                                    type="email"
                                    class=input_class
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">
                                    "Código de verificación"
                                </label>
                                <input
                                    type="text"
                                    class=input_class
                                    prop:value=move || codigo.get()
                                    on:input=move |ev| codigo.set(event_target_value(&ev))
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700 mb-1">
                                    "Nueva contraseña"
                                </label>
                                <input
                                    type="password"
                                    class=input_class
                                    prop:value=move || new_password.get()
                                    on:input=move |ev| new_password.set(event_target_value(&ev))
                                />
                            </div>
                            <button
                                type="submit"
                                class="w-full py-2 rounded-md bg-[#16469B] text-white font-semibold hover:bg-[#123670] disabled:opacity-50"
                                disabled=move || pending.get()
                            >
                                {move || {
                                    if pending.get() { "Guardando…" } else { "Restablecer contraseña" }
                                }}
                            </button>
                        </form>
                    }
                    .into_view(),
                    Step::Done => view! {
                        <p class="text-sm text-gray-700 text-center">
                            "Tu contraseña fue restablecida. Ya puedes iniciar sesión."
                        </p>
                    }
                    .into_view(),
                }}
                <div class="text-center">
                    <a href="/login" class="text-sm text-[#16469B] hover:underline">
                        "Volver a iniciar sesión"
                    </a>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn starts_on_the_request_step() {
        let html = render_to_string(|| view! { <RecuperarPage/> });
        assert!(html.contains("Recuperar contraseña"));
        assert!(html.contains("Enviar código"));
        assert!(html.contains("Volver a iniciar sesión"));
        assert!(!html.contains("Código de verificación"));
    }
}
