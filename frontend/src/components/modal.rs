use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Resultado de una mutación o validación, mostrado en un modal que solo
/// se cierra con el botón de aceptar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl AlertInfo {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[component]
pub fn AlertModal(alert: RwSignal<Option<AlertInfo>>) -> impl IntoView {
    view! {
        <Show when=move || alert.get().is_some()>
            {move || {
                alert
                    .get()
                    .map(|info| {
                        let accent = match info.kind {
                            AlertKind::Success => "text-green-700",
                            AlertKind::Error => "text-red-700",
                        };
                        view! {
                            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                                <div class="absolute inset-0 bg-black/40"></div>
                                <div
                                    class="relative z-[61] w-full max-w-md rounded-lg bg-white shadow-xl p-6 space-y-4"
                                    role="alertdialog"
                                    aria-modal="true"
                                >
                                    <h2 class=format!(
                                        "text-lg font-semibold {}",
                                        accent,
                                    )>{info.title.clone()}</h2>
                                    <p class="text-sm text-gray-700 whitespace-pre-line">
                                        {info.message.clone()}
                                    </p>
                                    <div class="flex justify-end">
                                        <button
                                            class="px-4 py-2 rounded-md bg-[#16469B] text-white text-sm font-semibold hover:bg-[#123670]"
                                            on:click=move |_| alert.set(None)
                                        >
                                            "Aceptar"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}
        </Show>
    }
}

/// Contenedor genérico de los formularios modales (crear/editar registro).
#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let title_text = Signal::derive(move || title.get());
    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Cerrar"
                    class="absolute inset-0 bg-black/40"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class="relative z-[51] w-full max-w-lg rounded-lg bg-white shadow-xl p-6 space-y-4 max-h-[90vh] overflow-y-auto"
                    role="dialog"
                    aria-modal="true"
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-[#16469B]">
                            {move || title_text.get()}
                        </h2>
                        <button
                            type="button"
                            aria-label="Cerrar"
                            class="text-gray-500 hover:text-gray-800"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_constructors_tag_the_kind() {
        let ok = AlertInfo::success("Listo", "Registro guardado");
        assert_eq!(ok.kind, AlertKind::Success);
        let bad = AlertInfo::error("Error", "Algo falló");
        assert_eq!(bad.kind, AlertKind::Error);
        assert_eq!(bad.title, "Error");
    }
}
