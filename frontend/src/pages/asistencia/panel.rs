use leptos::*;

use crate::{
    api::{AttendanceRecord, NewAttendance},
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
    utils::files::stage_file,
};

use super::{
    repository::AsistenciaRepository,
    utils::{
        apply_filters, export_rows, remove_local, replace_local, AttendanceFormState,
        EXPORT_HEADERS,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Upload,
}

#[component]
pub fn AsistenciaPanel() -> impl IntoView {
    let repository = AsistenciaRepository::new();

    let records = create_rw_signal(Vec::<AttendanceRecord>::new());
    let loading = create_rw_signal(false);
    let load_error = create_rw_signal(None::<String>);
    let reload = create_rw_signal(0u32);

    let search = create_rw_signal(String::new());
    let periodo_filter = create_rw_signal(ALL.to_string());
    let codigo_filter = create_rw_signal(ALL.to_string());
    let grupo_filter = create_rw_signal(ALL.to_string());
    let page = create_rw_signal(1usize);
    let mode = create_rw_signal(ViewMode::Table);

    let form = create_rw_signal(AttendanceFormState::default());
    let form_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<AttendanceRecord>);
    let pending_delete = create_rw_signal(None::<AttendanceRecord>);
    let alert = create_rw_signal(None::<AlertInfo>);

    let upload_file = create_rw_signal(None::<web_sys::File>);
    let periodo_etiqueta = create_rw_signal(String::new());

    let repo_for_fetch = repository.clone();
    create_effect(move |_| {
        reload.track();
        let repo = repo_for_fetch.clone();
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            match repo.fetch_resumen(None).await {
                Ok(rows) => records.set(rows),
                Err(err) => load_error.set(Some(err.error)),
            }
            loading.set(false);
        });
    });

    let filtered = create_memo(move |_| {
        apply_filters(
            &records.get(),
            &search.get(),
            &periodo_filter.get(),
            &codigo_filter.get(),
            &grupo_filter.get(),
        )
    });
    let periodo_options = create_memo(move |_| {
        tables::distinct_options(records.get().iter().map(|r| r.periodo.clone()))
    });
    let codigo_options = create_memo(move |_| {
        tables::distinct_options(records.get().iter().map(|r| r.codigo_materia.clone()))
    });
    let grupo_options = create_memo(move |_| {
        tables::distinct_options(records.get().iter().map(|r| r.grupo.clone()))
    });
    let total = create_memo(move |_| tables::total_pages(filtered.get().len()));
    let visible = create_memo(move |_| {
        let rows = filtered.get();
        let (start, end) = tables::page_bounds(rows.len(), page.get());
        rows[start..end].to_vec()
    });

    let repo_for_create = repository.clone();
    let crear_action = create_action(move |payload: &NewAttendance| {
        let repo = repo_for_create.clone();
        let payload = payload.clone();
        async move { repo.crear(payload).await }
    });

    create_effect(move |_| {
        if let Some(result) = crear_action.value().get() {
            match result {
                Ok(rows) => {
                    let count = rows.len();
                    records.update(|all| {
                        let mut merged = rows.clone();
                        merged.extend(all.drain(..));
                        *all = merged;
                    });
                    page.set(1);
                    form_open.set(false);
                    form.set(AttendanceFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Registro agregado",
                        format!("Se agregaron {} registros de asistencia.", count),
                    )));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo guardar", err.error)));
                }
            }
        }
    });

    let repo_for_upload = repository.clone();
    let ingest_action = create_action(move |input: &(web_sys::File, String)| {
        let repo = repo_for_upload.clone();
        let (file, etiqueta) = input.clone();
        async move {
            let staged = stage_file(&file).await?;
            repo.ingest(staged, etiqueta).await
        }
    });
    let ingesting = ingest_action.pending();

    create_effect(move |_| {
        if let Some(result) = ingest_action.value().get() {
            match result {
                Ok(resumen) => {
                    alert.set(Some(AlertInfo::success(
                        "Archivo procesado",
                        format!(
                            "Periodo {}: {} alumnos vinculados, {} inscripciones creadas.",
                            resumen.periodo_etiqueta,
                            resumen.alumnos_vinculados,
                            resumen.inscripciones_creadas,
                        ),
                    )));
                    search.set(resumen.periodo_etiqueta.clone());
                    upload_file.set(None);
                    periodo_etiqueta.set(String::new());
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
        form.set(AttendanceFormState::default());
        form_open.set(true);
    };

    let open_edit = move |record: AttendanceRecord| {
        form.set(AttendanceFormState::from_record(&record));
        editing.set(Some(record));
        form_open.set(true);
    };

    let submit_form = move |_| {
        let state = form.get();
        if let Err(message) = state.validate() {
            alert.set(Some(AlertInfo::error("Datos incompletos", message)));
            return;
        }
        match editing.get() {
            Some(original) => {
                let updated = state.apply_to(&original);
                records.update(|all| replace_local(all, &original, updated));
                editing.set(None);
                form_open.set(false);
                form.set(AttendanceFormState::default());
            }
            None => {
                crear_action.dispatch(state.to_request());
            }
        }
    };

    let confirm_delete = move |_: ()| {
        if let Some(target) = pending_delete.get() {
            records.update(|all| remove_local(all, &target));
            pending_delete.set(None);
            alert.set(Some(AlertInfo::success(
                "Relación eliminada",
                "La relación alumno–grupo se eliminó correctamente.",
            )));
        }
    };

    let export_table = move |_| {
        let rows = export_rows(&filtered.get());
        if let Err(err) = export::export_csv("asistencia", EXPORT_HEADERS, rows) {
            alert.set(Some(AlertInfo::error("Exportación", err.error)));
        }
    };

    let start_upload = move |_| {
        let etiqueta = periodo_etiqueta.get().trim().to_string();
        if etiqueta.is_empty() {
            alert.set(Some(AlertInfo::error(
                "Datos incompletos",
                "Ingresa la etiqueta de periodo (por ejemplo 2025-1).",
            )));
            return;
        }
        let Some(file) = upload_file.get() else {
            alert.set(Some(AlertInfo::error(
                "Datos incompletos",
                "Selecciona un archivo de asistencia.",
            )));
            return;
        };
        ingest_action.dispatch((file, etiqueta));
    };

    let select_class = "rounded border border-gray-300 px-2 py-1 text-sm text-gray-700";
    let creating = crear_action.pending();

    view! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-xl font-semibold text-[#16469B]">"Asistencia por grupo"</h2>
                <div class="flex gap-2">
                    <Show when=move || mode.get() == ViewMode::Table>
                        <button
                            class="rounded bg-[#16469B] px-3 py-1.5 text-sm font-semibold text-white hover:bg-[#123670]"
                            on:click=open_create
                        >
                            "Nuevo registro"
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
                            ViewMode::Table => "Subir archivo",
                            ViewMode::Upload => "Volver a la tabla",
                        }}
                    </button>
                </div>
            </div>

            <Show when=move || mode.get() == ViewMode::Upload>
                <div class="space-y-3 rounded-lg border border-gray-200 bg-white p-4">
                    <label class="block text-sm font-medium text-gray-700">
                        "Etiqueta de periodo"
                        <input
                            class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                            placeholder="2025-1"
                            prop:value=move || periodo_etiqueta.get()
                            on:input=move |ev| periodo_etiqueta.set(event_target_value(&ev))
                        />
                    </label>
                    <FileDropZone
                        file=upload_file
                        label="Arrastra el archivo de asistencia o haz clic para seleccionarlo"
                        accept=".xlsx,.xls,.csv"
                    />
                    <button
                        class="rounded bg-[#16469B] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50 hover:bg-[#123670]"
                        disabled=move || {
                            ingesting.get()
                                || upload_file.get().is_none()
                                || periodo_etiqueta.get().trim().is_empty()
                        }
                        on:click=start_upload
                    >
                        {move || if ingesting.get() { "Procesando…" } else { "Subir y procesar" }}
                    </button>
                </div>
            </Show>

            <Show when=move || mode.get() == ViewMode::Table>
                <div class="flex flex-wrap items-center gap-2">
                    <input
                        class="w-64 rounded border border-gray-300 px-2 py-1 text-sm"
                        placeholder="Buscar alumno, materia o matrícula"
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <select
                        class=select_class
                        on:change=move |ev| {
                            periodo_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || periodo_filter.get() == ALL>
                            "Todos los periodos"
                        </option>
                        {move || {
                            periodo_options
                                .get()
                                .into_iter()
                                .map(|value| {
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value.clone()
                                            selected=move || periodo_filter.get() == current
                                        >
                                            {value}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <select
                        class=select_class
                        on:change=move |ev| {
                            codigo_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || codigo_filter.get() == ALL>
                            "Todas las materias"
                        </option>
                        {move || {
                            codigo_options
                                .get()
                                .into_iter()
                                .map(|value| {
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value.clone()
                                            selected=move || codigo_filter.get() == current
                                        >
                                            {value}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <select
                        class=select_class
                        on:change=move |ev| {
                            grupo_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || grupo_filter.get() == ALL>
                            "Todos los grupos"
                        </option>
                        {move || {
                            grupo_options
                                .get()
                                .into_iter()
                                .map(|value| {
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value.clone()
                                            selected=move || grupo_filter.get() == current
                                        >
                                            {value}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
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
                                    <th class="px-3 py-2">"Periodo"</th>
                                    <th class="px-3 py-2">"Materia"</th>
                                    <th class="px-3 py-2">"Grupo"</th>
                                    <th class="px-3 py-2">"Matrícula"</th>
                                    <th class="px-3 py-2">"Alumno"</th>
                                    <th class="px-3 py-2">"Fuente"</th>
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
                                                    <td class="px-3 py-2">{record.periodo.clone()}</td>
                                                    <td class="px-3 py-2">
                                                        {format!(
                                                            "{} {}",
                                                            record.codigo_materia,
                                                            record.nombre_materia,
                                                        )}
                                                    </td>
                                                    <td class="px-3 py-2">{record.grupo.clone()}</td>
                                                    <td class="px-3 py-2">{record.matricula.clone()}</td>
                                                    <td class="px-3 py-2">
                                                        {format!(
                                                            "{} {} {}",
                                                            record.nombre_alumno,
                                                            record.apellido_paterno,
                                                            record.apellido_materno.clone().unwrap_or_default(),
                                                        )
                                                            .trim()
                                                            .to_string()}
                                                    </td>
                                                    <td class="px-3 py-2">{record.fuente.clone()}</td>
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
                                "Sin registros de asistencia para los filtros actuales."
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
                        "Editar registro".to_string()
                    } else {
                        "Nuevo registro de asistencia".to_string()
                    }
                })
                on_close=Callback::new(move |_| {
                    form_open.set(false);
                    editing.set(None);
                })
            >
                <div class="grid grid-cols-1 gap-3 sm:grid-cols-2">
                    <TextField
                        label="Periodo"
                        value=Signal::derive(move || form.get().periodo)
                        on_change=Callback::new(move |value| form.update(|f| f.periodo = value))
                    />
                    <TextField
                        label="Código de materia"
                        value=Signal::derive(move || form.get().codigo_materia)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.codigo_materia = value)
                        })
                    />
                    <TextField
                        label="Nombre de materia"
                        value=Signal::derive(move || form.get().nombre_materia)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.nombre_materia = value)
                        })
                    />
                    <TextField
                        label="Grupo"
                        value=Signal::derive(move || form.get().grupo)
                        on_change=Callback::new(move |value| form.update(|f| f.grupo = value))
                    />
                    <TextField
                        label="Matrícula(s)"
                        value=Signal::derive(move || form.get().matricula)
                        on_change=Callback::new(move |value| form.update(|f| f.matricula = value))
                    />
                    <TextField
                        label="Nombre del alumno"
                        value=Signal::derive(move || form.get().nombre_alumno)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.nombre_alumno = value)
                        })
                    />
                    <TextField
                        label="Apellido paterno"
                        value=Signal::derive(move || form.get().apellido_paterno)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.apellido_paterno = value)
                        })
                    />
                    <TextField
                        label="Apellido materno"
                        value=Signal::derive(move || form.get().apellido_materno)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.apellido_materno = value)
                        })
                    />
                </div>
                <Show when=move || editing.get().is_none()>
                    <p class="text-xs text-gray-500">
                        "Puedes capturar varias matrículas separadas por comas."
                    </p>
                </Show>
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
                        disabled=move || creating.get()
                        on:click=submit_form
                    >
                        {move || if creating.get() { "Guardando…" } else { "Guardar" }}
                    </button>
                </div>
            </Modal>

            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.get().is_some())
                title="Eliminar registro"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|record| {
                            format!(
                                "¿Quitar de la vista la asistencia de {} en {} {}?",
                                record.matricula,
                                record.codigo_materia,
                                record.grupo,
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

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn panel_renders_table_controls() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(&["COORDINADOR"])), false);
            view! { <AsistenciaPanel /> }
        });

        assert!(html.contains("Asistencia por grupo"));
        assert!(html.contains("Nuevo registro"));
        assert!(html.contains("Exportar CSV"));
        assert!(html.contains("Todos los periodos"));
    }
}
