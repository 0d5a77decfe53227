use leptos::*;

use crate::{
    api::{HistorialItem, MateriaPayload, PlanOption, PlanRecord},
    components::{
        confirm_dialog::ConfirmDialog,
        form::TextField,
        layout::{ErrorMessage, LoadingSpinner},
        modal::{AlertInfo, AlertModal, Modal},
        pagination::Pagination,
        upload::FileDropZone,
    },
    export,
    tables::{self, ALL},
    utils::{files::stage_file, time::short_date},
};

use super::{
    repository::PlanesRepository,
    utils::{
        apply_filters, export_rows, remove_by_id, replace_by_id, MateriaFormState,
        EXPORT_HEADERS, FORM_TIPOS, TIPOS,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Upload,
}

#[component]
pub fn PlanesPanel() -> impl IntoView {
    let repository = PlanesRepository::new();

    let records = create_rw_signal(Vec::<PlanRecord>::new());
    let planes = create_rw_signal(Vec::<PlanOption>::new());
    let loading = create_rw_signal(false);
    let load_error = create_rw_signal(None::<String>);
    let reload = create_rw_signal(0u32);

    let search = create_rw_signal(String::new());
    let plan_filter = create_rw_signal(ALL.to_string());
    let tipo_filter = create_rw_signal(ALL.to_string());
    let page = create_rw_signal(1usize);
    let mode = create_rw_signal(ViewMode::Table);

    let form = create_rw_signal(MateriaFormState::default());
    let form_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let pending_delete = create_rw_signal(None::<PlanRecord>);
    let alert = create_rw_signal(None::<AlertInfo>);

    let pdf_file = create_rw_signal(None::<web_sys::File>);
    let force_flag = create_rw_signal(false);
    let debug_flag = create_rw_signal(true);
    let ocr_flag = create_rw_signal(false);
    let historial = create_rw_signal(Vec::<HistorialItem>::new());

    let repo_for_fetch = repository.clone();
    create_effect(move |_| {
        reload.track();
        let repo = repo_for_fetch.clone();
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            match repo.fetch_catalogo().await {
                Ok(options) => planes.set(options),
                Err(err) => load_error.set(Some(err.error)),
            }
            match repo.fetch_materias().await {
                Ok(rows) => records.set(rows),
                Err(err) => load_error.set(Some(err.error)),
            }
            loading.set(false);
        });
    });

    let repo_for_historial = repository.clone();
    create_effect(move |_| {
        reload.track();
        if mode.get() != ViewMode::Upload {
            return;
        }
        let repo = repo_for_historial.clone();
        spawn_local(async move {
            if let Ok(items) = repo.historial().await {
                historial.set(items);
            }
        });
    });

    let filtered = create_memo(move |_| {
        apply_filters(
            &records.get(),
            &search.get(),
            &plan_filter.get(),
            &tipo_filter.get(),
        )
    });
    let total = create_memo(move |_| tables::total_pages(filtered.get().len()));
    let visible = create_memo(move |_| {
        let rows = filtered.get();
        let (start, end) = tables::page_bounds(rows.len(), page.get());
        rows[start..end].to_vec()
    });

    let repo_for_create = repository.clone();
    let crear_action = create_action(move |payload: &MateriaPayload| {
        let repo = repo_for_create.clone();
        let payload = payload.clone();
        async move { repo.crear(payload).await }
    });

    let repo_for_update = repository.clone();
    let actualizar_action = create_action(move |input: &(i64, MateriaPayload)| {
        let repo = repo_for_update.clone();
        let (id, payload) = input.clone();
        async move { repo.actualizar(id, payload).await }
    });

    let repo_for_delete = repository.clone();
    let eliminar_action = create_action(move |id: &i64| {
        let repo = repo_for_delete.clone();
        let id = *id;
        async move { repo.eliminar(id).await.map(|_| id) }
    });

    create_effect(move |_| {
        if let Some(result) = crear_action.value().get() {
            match result {
                Ok(created) => {
                    records.update(|all| all.insert(0, created));
                    page.set(1);
                    form_open.set(false);
                    form.set(MateriaFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Materia agregada",
                        "La materia se registró en el plan.",
                    )));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo crear", err.error)));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = actualizar_action.value().get() {
            match result {
                Ok(updated) => {
                    records.update(|all| replace_by_id(all, updated));
                    form_open.set(false);
                    editing.set(None);
                    form.set(MateriaFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Materia actualizada",
                        "Los cambios se guardaron correctamente.",
                    )));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo actualizar", err.error)));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = eliminar_action.value().get() {
            match result {
                Ok(id) => {
                    records.update(|all| remove_by_id(all, id));
                    alert.set(Some(AlertInfo::success(
                        "Materia eliminada",
                        "La materia se eliminó correctamente del plan de estudios.",
                    )));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo eliminar", err.error)));
                }
            }
        }
    });

    let repo_for_upload = repository.clone();
    let upload_action = create_action(move |input: &(web_sys::File, bool, bool, bool)| {
        let repo = repo_for_upload.clone();
        let (file, force, debug, ocr) = input.clone();
        async move {
            let staged = stage_file(&file).await?;
            repo.subir_pdf(staged, force, debug, ocr).await
        }
    });
    let uploading = upload_action.pending();

    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            match result {
                Ok(response) => {
                    let message = match response.ingesta {
                        Some(ingesta) => format!(
                            "Plan {}: {} materias nuevas, {} actualizadas, {} sin cambio.",
                            ingesta.plan_id, ingesta.added, ingesta.updated, ingesta.unchanged,
                        ),
                        None => "El PDF se cargó correctamente.".to_string(),
                    };
                    alert.set(Some(AlertInfo::success("Plan procesado", message)));
                    pdf_file.set(None);
                    mode.set(ViewMode::Table);
                    page.set(1);
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("Error al procesar", err.error)));
                }
            }
        }
    });

    let open_create = move |_| {
        editing.set(None);
        form.set(MateriaFormState::default());
        form_open.set(true);
    };

    let open_edit = move |record: PlanRecord| {
        form.set(MateriaFormState::from_record(&record));
        editing.set(Some(record.id));
        form_open.set(true);
    };

    let submit_form = move |_| {
        let state = form.get();
        if let Err(message) = state.validate() {
            alert.set(Some(AlertInfo::error("Datos incompletos", message)));
            return;
        }
        match editing.get() {
            Some(id) => actualizar_action.dispatch((id, state.to_payload())),
            None => crear_action.dispatch(state.to_payload()),
        }
    };

    let confirm_delete = move |_: ()| {
        if let Some(target) = pending_delete.get() {
            pending_delete.set(None);
            eliminar_action.dispatch(target.id);
        }
    };

    let export_table = move |_| {
        let rows = export_rows(&filtered.get());
        if let Err(err) = export::export_csv("planes", EXPORT_HEADERS, rows) {
            alert.set(Some(AlertInfo::error("Exportación", err.error)));
        }
    };

    let start_upload = move |_| {
        let Some(file) = pdf_file.get() else {
            alert.set(Some(AlertInfo::error(
                "Datos incompletos",
                "Selecciona el PDF del plan de estudios.",
            )));
            return;
        };
        upload_action.dispatch((file, force_flag.get(), debug_flag.get(), ocr_flag.get()));
    };

    let select_class = "rounded border border-gray-300 px-2 py-1 text-sm text-gray-700";
    let saving = Signal::derive(move || {
        crear_action.pending().get() || actualizar_action.pending().get()
    });

    view! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-xl font-semibold text-[#16469B]">"Planes de estudio"</h2>
                <div class="flex gap-2">
                    <Show when=move || mode.get() == ViewMode::Table>
                        <button
                            class="rounded bg-[#16469B] px-3 py-1.5 text-sm font-semibold text-white hover:bg-[#123670]"
                            on:click=open_create
                        >
                            "Nueva materia"
                        </button>
                        <button
                            class="rounded border border-[#16469B] px-3 py-1.5 text-sm font-semibold text-[#16469B] hover:bg-blue-50"
                            on:click=export_table
                        >
                            "Exportar CSV"
                        </button>
                    </Show>
                    <button
                        class="rounded border border-gray-300 px-3 py-1.5 text-sm text-gray-700 hover:bg-gray-100"
                        on:click=move |_| {
                            mode.update(|current| {
                                *current = match current {
                                    ViewMode::Table => ViewMode::Upload,
                                    ViewMode::Upload => ViewMode::Table,
                                }
                            })
                        }
                    >
                        {move || match mode.get() {
                            ViewMode::Table => "Subir PDF",
                            ViewMode::Upload => "Volver a la tabla",
                        }}
                    </button>
                </div>
            </div>

            <Show when=move || mode.get() == ViewMode::Upload>
                <div class="grid gap-4 lg:grid-cols-2">
                    <div class="space-y-3 rounded-lg border border-gray-200 bg-white p-4">
                        <FileDropZone
                            file=pdf_file
                            label="Arrastra el PDF del plan de estudios o haz clic para seleccionarlo"
                            accept=".pdf"
                        />
                        <div class="flex flex-wrap gap-4 text-sm text-gray-700">
                            <label class="flex items-center gap-2">
                                <input
                                    type="checkbox"
                                    prop:checked=move || force_flag.get()
                                    on:change=move |ev| {
                                        force_flag.set(event_target_checked(&ev))
                                    }
                                />
                                "Forzar recarga"
                            </label>
                            <label class="flex items-center gap-2">
                                <input
                                    type="checkbox"
                                    prop:checked=move || debug_flag.get()
                                    on:change=move |ev| {
                                        debug_flag.set(event_target_checked(&ev))
                                    }
                                />
                                "Modo depuración"
                            </label>
                            <label class="flex items-center gap-2">
                                <input
                                    type="checkbox"
                                    prop:checked=move || ocr_flag.get()
                                    on:change=move |ev| ocr_flag.set(event_target_checked(&ev))
                                />
                                "Usar OCR"
                            </label>
                        </div>
                        <button
                            class="rounded bg-[#16469B] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50 hover:bg-[#123670]"
                            disabled=move || uploading.get() || pdf_file.get().is_none()
                            on:click=start_upload
                        >
                            {move || {
                                if uploading.get() { "Procesando…" } else { "Subir y procesar" }
                            }}
                        </button>
                    </div>
                    <div class="rounded-lg border border-gray-200 bg-white p-4">
                        <h3 class="mb-2 text-sm font-semibold text-gray-700">
                            "Últimos planes cargados"
                        </h3>
                        <ul class="divide-y divide-gray-100 text-sm">
                            {move || {
                                historial
                                    .get()
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li class="flex items-center justify-between py-2">
                                                <span class="text-gray-800">
                                                    {item.nombre_archivo.clone()}
                                                </span>
                                                <span class="text-xs text-gray-500">
                                                    {format!(
                                                        "{} · {}",
                                                        short_date(&item.fecha),
                                                        item.estado,
                                                    )}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                        <Show when=move || historial.get().is_empty()>
                            <p class="py-4 text-center text-sm text-gray-500">
                                "Aún no hay planes cargados."
                            </p>
                        </Show>
                    </div>
                </div>
            </Show>

            <Show when=move || mode.get() == ViewMode::Table>
                <div class="flex flex-wrap items-center gap-2">
                    <input
                        class="w-64 rounded border border-gray-300 px-2 py-1 text-sm"
                        placeholder="Buscar código o materia"
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <select
                        class=select_class
                        on:change=move |ev| {
                            plan_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || plan_filter.get() == ALL>
                            "Todos los planes"
                        </option>
                        {move || {
                            planes
                                .get()
                                .into_iter()
                                .map(|plan| {
                                    let value = plan.id.to_string();
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || plan_filter.get() == current
                                        >
                                            {plan.label.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <select
                        class=select_class
                        on:change=move |ev| {
                            tipo_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || tipo_filter.get() == ALL>
                            "Todos los tipos"
                        </option>
                        {TIPOS
                            .iter()
                            .map(|tipo| {
                                let value = tipo.to_string();
                                let current = value.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || tipo_filter.get() == current
                                    >
                                        {*tipo}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <Show when=move || load_error.get().is_some()>
                    <ErrorMessage message=Signal::derive(move || {
                        load_error.get().unwrap_or_default()
                    }) />
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=move || view! { <LoadingSpinner /> }
                >
                    <div class="overflow-x-auto rounded-lg border border-gray-200 bg-white">
                        <table class="min-w-full divide-y divide-gray-200 text-sm">
                            <thead class="bg-gray-50 text-left text-xs font-semibold uppercase text-gray-600">
                                <tr>
                                    <th class="px-3 py-2">"Código"</th>
                                    <th class="px-3 py-2">"Materia"</th>
                                    <th class="px-3 py-2">"Créditos"</th>
                                    <th class="px-3 py-2">"Tipo"</th>
                                    <th class="px-3 py-2">"Plan"</th>
                                    <th class="px-3 py-2">"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-100">
                                {move || {
                                    visible
                                        .get()
                                        .into_iter()
                                        .map(|record| {
                                            let edit_target = record.clone();
                                            let delete_target = record.clone();
                                            view! {
                                                <tr class="hover:bg-gray-50">
                                                    <td class="px-3 py-2">{record.codigo.clone()}</td>
                                                    <td class="px-3 py-2">
                                                        {record.nombre_materia.clone()}
                                                    </td>
                                                    <td class="px-3 py-2">{record.creditos}</td>
                                                    <td class="px-3 py-2">{record.tipo.clone()}</td>
                                                    <td class="px-3 py-2">
                                                        {format!(
                                                            "{} (v{})",
                                                            record.plan_nombre,
                                                            record.plan_version,
                                                        )}
                                                    </td>
                                                    <td class="px-3 py-2">
                                                        <div class="flex gap-2">
                                                            <button
                                                                class="text-sm font-medium text-[#16469B] hover:underline"
                                                                on:click=move |_| open_edit(edit_target.clone())
                                                            >
                                                                "Editar"
                                                            </button>
                                                            <button
                                                                class="text-sm font-medium text-red-600 hover:underline"
                                                                on:click=move |_| {
                                                                    pending_delete.set(Some(delete_target.clone()))
                                                                }
                                                            >
                                                                "Eliminar"
                                                            </button>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                        <Show when=move || filtered.get().is_empty()>
                            <p class="px-3 py-6 text-center text-sm text-gray-500">
                                "Sin materias para los filtros actuales."
                            </p>
                        </Show>
                    </div>
                    <Pagination
                        current=Signal::derive(move || page.get())
                        total=Signal::derive(move || total.get())
                        on_page=Callback::new(move |target| page.set(target))
                    />
                </Show>
            </Show>

            <Modal
                is_open=Signal::derive(move || form_open.get())
                title=Signal::derive(move || {
                    if editing.get().is_some() {
                        "Editar materia".to_string()
                    } else {
                        "Nueva materia".to_string()
                    }
                })
                on_close=Callback::new(move |_| {
                    form_open.set(false);
                    editing.set(None);
                })
            >
                <div class="grid grid-cols-1 gap-3 sm:grid-cols-2">
                    <TextField
                        label="Código"
                        value=Signal::derive(move || form.get().codigo)
                        on_change=Callback::new(move |value| form.update(|f| f.codigo = value))
                    />
                    <TextField
                        label="Nombre de la materia"
                        value=Signal::derive(move || form.get().nombre)
                        on_change=Callback::new(move |value| form.update(|f| f.nombre = value))
                    />
                    <TextField
                        label="Créditos"
                        value=Signal::derive(move || form.get().creditos)
                        on_change=Callback::new(move |value| form.update(|f| f.creditos = value))
                    />
                    <label class="block text-sm font-medium text-gray-700">
                        "Tipo"
                        <select
                            class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                            on:change=move |ev| {
                                form.update(|f| f.tipo = event_target_value(&ev))
                            }
                        >
                            {FORM_TIPOS
                                .iter()
                                .map(|tipo| {
                                    let value = tipo.to_string();
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || form.get().tipo == current
                                        >
                                            {*tipo}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="block text-sm font-medium text-gray-700 sm:col-span-2">
                        "Plan de estudios"
                        <select
                            class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                            on:change=move |ev| {
                                form.update(|f| f.plan_id = event_target_value(&ev))
                            }
                        >
                            <option value="" selected=move || form.get().plan_id.is_empty()>
                                "Selecciona un plan"
                            </option>
                            {move || {
                                planes
                                    .get()
                                    .into_iter()
                                    .map(|plan| {
                                        let value = plan.id.to_string();
                                        let current = value.clone();
                                        view! {
                                            <option
                                                value=value
                                                selected=move || form.get().plan_id == current
                                            >
                                                {plan.label.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                </div>
                <div class="flex justify-end gap-2">
                    <button
                        class="rounded border border-gray-300 px-4 py-2 text-sm text-gray-700 hover:bg-gray-100"
                        on:click=move |_| {
                            form_open.set(false);
                            editing.set(None);
                        }
                    >
                        "Cancelar"
                    </button>
                    <button
                        class="rounded bg-[#16469B] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50 hover:bg-[#123670]"
                        disabled=move || saving.get()
                        on:click=submit_form
                    >
                        {move || if saving.get() { "Guardando…" } else { "Guardar" }}
                    </button>
                </div>
            </Modal>

            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.get().is_some())
                title="Eliminar materia"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|record| {
                            format!(
                                "¿Eliminar la materia {} del plan {}? Esta acción no se puede deshacer.",
                                record.codigo, record.plan_nombre,
                            )
                        })
                        .unwrap_or_default()
                })
                on_confirm=Callback::new(confirm_delete)
                on_cancel=Callback::new(move |_| pending_delete.set(None))
                confirm_label="Eliminar"
                destructive=true
            />

            <AlertModal alert=alert />
        </section>
    }
}
