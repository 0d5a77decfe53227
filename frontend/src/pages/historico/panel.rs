use leptos::*;

use crate::{
    api::EstructuraResumen,
    components::{
        modal::{AlertInfo, AlertModal},
        upload::FileDropZone,
    },
    utils::files::stage_file,
};

use super::repository::HistoricoRepository;

#[component]
pub fn HistoricoPanel() -> impl IntoView {
    let repository = HistoricoRepository::new();

    let file = create_rw_signal(None::<web_sys::File>);
    let last_resumen = create_rw_signal(None::<EstructuraResumen>);
    let alert = create_rw_signal(None::<AlertInfo>);

    let ingest_action = create_action(move |input: &web_sys::File| {
        let repo = repository.clone();
        let input = input.clone();
        async move {
            let staged = stage_file(&input).await?;
            repo.ingest(staged).await
        }
    });
    let ingesting = ingest_action.pending();

    create_effect(move |_| {
        if let Some(result) = ingest_action.value().get() {
            match result {
                Ok(resumen) => {
                    alert.set(Some(AlertInfo::success(
                        "Histórico procesado",
                        format!(
                            "{} alumnos y {} planes actualizados.",
                            resumen.alumnos_upsert, resumen.planes_upsert,
                        ),
                    )));
                    last_resumen.set(Some(resumen));
                    file.set(None);
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("Error al procesar", err.error)));
                }
            }
        }
    });

    let start_upload = move |_| {
        let Some(selected) = file.get() else {
            alert.set(Some(AlertInfo::error(
                "Datos incompletos",
                "Selecciona el archivo de estructura académica.",
            )));
            return;
        };
        ingest_action.dispatch(selected);
    };

    view! {
        <section class="space-y-4">
            <div>
                <h2 class="text-xl font-semibold text-[#16469B]">"Histórico académico"</h2>
                <p class="text-sm text-gray-600">
                    "Carga el archivo de estructura con alumnos y planes; la información se \
                     actualiza en una sola pasada."
                </p>
            </div>

            <div class="grid gap-4 lg:grid-cols-2">
                <div class="space-y-3 rounded-lg border border-gray-200 bg-white p-4">
                    <FileDropZone
                        file=file
                        label="Arrastra el archivo de estructura o haz clic para seleccionarlo"
                        accept=".xlsx,.xls,.csv"
                    />
                    <button
                        class="rounded bg-[#16469B] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50 hover:bg-[#123670]"
                        disabled=move || ingesting.get() || file.get().is_none()
                        on:click=start_upload
                    >
                        {move || if ingesting.get() { "Procesando…" } else { "Subir y procesar" }}
                    </button>
                </div>

                <Show when=move || last_resumen.get().is_some()>
                    {move || {
                        last_resumen
                            .get()
                            .map(|resumen| {
                                let warnings = (!resumen.warnings.is_empty()).then(|| {
                                    view! {
                                        <ul class="list-disc pl-5 text-sm text-amber-700">
                                            {resumen
                                                .warnings
                                                .iter()
                                                .map(|warning| view! { <li>{warning.clone()}</li> })
                                                .collect_view()}
                                        </ul>
                                    }
                                });
                                view! {
                                    <div class="space-y-2 rounded-lg border border-gray-200 bg-white p-4">
                                        <h3 class="text-sm font-semibold text-gray-700">
                                            "Resultado de la última carga"
                                        </h3>
                                        <p class="text-sm text-gray-800">
                                            {format!(
                                                "Alumnos actualizados: {}",
                                                resumen.alumnos_upsert,
                                            )}
                                        </p>
                                        <p class="text-sm text-gray-800">
                                            {format!("Planes actualizados: {}", resumen.planes_upsert)}
                                        </p>
                                        {warnings}
                                    </div>
                                }
                            })
                    }}
                </Show>
            </div>

            <AlertModal alert=alert />
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn panel_renders_upload_controls() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! { <HistoricoPanel /> }
        });

        assert!(html.contains("Histórico académico"));
        assert!(html.contains("Subir y procesar"));
    }
}
