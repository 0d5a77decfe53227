use leptos::*;

/// Campo de texto controlado para los formularios modales.
#[component]
pub fn TextField(
    #[prop(into)] label: MaybeSignal<String>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeSignal<String>,
    #[prop(optional, into)] input_type: MaybeSignal<String>,
) -> impl IntoView {
    let label_text = Signal::derive(move || label.get());
    let kind = Signal::derive(move || {
        let raw = input_type.get();
        if raw.trim().is_empty() {
            "text".to_string()
        } else {
            raw
        }
    });
    view! {
        <label class="block text-sm font-medium text-gray-700">
            {move || label_text.get()}
            <input
                class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                type=move || kind.get()
                placeholder=move || placeholder.get()
                value=move || value.get()
                prop:value=move || value.get()
                on:input=move |ev| on_change.call(event_target_value(&ev))
            />
        </label>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_label_and_value() {
        let html = render_to_string(|| {
            let (value, _) = create_signal("2025-1".to_string());
            view! {
                <TextField
                    label="Periodo"
                    value=value
                    on_change=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Periodo"));
        assert!(html.contains("2025-1"));
    }
}
