use leptos::ev::DragEvent;
use leptos::*;
use wasm_bindgen::JsCast;

/// Zona de carga: selector de archivo más arrastrar-y-soltar. El archivo
/// queda montado en la señal hasta que la vista lo procese.
#[component]
pub fn FileDropZone(
    file: RwSignal<Option<web_sys::File>>,
    #[prop(into)] label: MaybeSignal<String>,
    #[prop(optional, into)] accept: MaybeSignal<String>,
) -> impl IntoView {
    let (dragging, set_dragging) = create_signal(false);
    let label_text = Signal::derive(move || label.get());
    let accept_text = Signal::derive(move || accept.get());

    let on_pick = move |ev: leptos::ev::Event| {
        let picked = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if picked.is_some() {
            file.set(picked);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };
    let on_dragleave = move |_: DragEvent| set_dragging.set(false);
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if dropped.is_some() {
            file.set(dropped);
        }
    };

    let staged_name = create_memo(move |_| file.get().map(|f| f.name()));

    view! {
        <div
            class="border-2 border-dashed rounded-lg p-6 text-center transition-colors"
            class=("border-[#16469B]", move || dragging.get())
            class=("bg-blue-50", move || dragging.get())
            class=("border-gray-300", move || !dragging.get())
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <p class="text-sm font-medium text-gray-700 mb-2">{move || label_text.get()}</p>
            {move || match staged_name.get() {
                Some(name) => view! {
                    <p class="text-sm text-[#16469B] font-semibold">{name}</p>
                }
                .into_view(),
                None => view! {
                    <p class="text-xs text-gray-500">
                        "Arrastra el archivo aquí o selecciónalo"
                    </p>
                }
                .into_view(),
            }}
            <label class="inline-block mt-3 px-4 py-2 rounded-md bg-[#E6B10F] text-white text-sm font-semibold cursor-pointer hover:opacity-90">
                "Seleccionar archivo"
                <input
                    type="file"
                    class="hidden"
                    accept=move || accept_text.get()
                    on:change=on_pick
                />
            </label>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn drop_zone_renders_label_and_picker() {
        let html = render_to_string(move || {
            let file = create_rw_signal(None::<web_sys::File>);
            view! {
                <FileDropZone
                    file=file
                    label="Archivo ISI"
                    accept=".xlsx,.xls"
                />
            }
        });
        assert!(html.contains("Archivo ISI"));
        assert!(html.contains("Seleccionar archivo"));
        assert!(html.contains("Arrastra el archivo aquí"));
    }
}
