use leptos::*;

use crate::{
    api::{HistorialItem, NewSchedule, ScheduleRecord},
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
    repository::HorariosRepository,
    utils::{
        apply_filters, dia_semana_label, empleado_text, export_rows, profesor_full_name,
        replace_by_id, ScheduleFormState, EXPORT_HEADERS, NO_UPLOAD_FILES,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Upload,
}

#[component]
pub fn HorariosPanel() -> impl IntoView {
    let repository = HorariosRepository::new();

    let records = create_rw_signal(Vec::<ScheduleRecord>::new());
    let loading = create_rw_signal(false);
    let load_error = create_rw_signal(None::<String>);
    let reload = create_rw_signal(0u32);

    let search = create_rw_signal(String::new());
    let periodo_filter = create_rw_signal(ALL.to_string());
    let codigo_filter = create_rw_signal(ALL.to_string());
    let grupo_filter = create_rw_signal(ALL.to_string());
    let empleado_filter = create_rw_signal(ALL.to_string());
    let page = create_rw_signal(1usize);
    let mode = create_rw_signal(ViewMode::Table);

    let form = create_rw_signal(ScheduleFormState::default());
    let form_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let pending_delete = create_rw_signal(None::<ScheduleRecord>);
    let alert = create_rw_signal(None::<AlertInfo>);

    let isi_file = create_rw_signal(None::<web_sys::File>);
    let prelistas_file = create_rw_signal(None::<web_sys::File>);
    let historial = create_rw_signal(Vec::<HistorialItem>::new());

    let repo_for_fetch = repository.clone();
    create_effect(move |_| {
        reload.track();
        let repo = repo_for_fetch.clone();
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            match repo.fetch().await {
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
            &periodo_filter.get(),
            &codigo_filter.get(),
            &grupo_filter.get(),
            &empleado_filter.get(),
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
    let empleado_options = create_memo(move |_| {
        tables::distinct_options(records.get().iter().map(empleado_text))
    });
    let total = create_memo(move |_| tables::total_pages(filtered.get().len()));
    let visible = create_memo(move |_| {
        let rows = filtered.get();
        let (start, end) = tables::page_bounds(rows.len(), page.get());
        rows[start..end].to_vec()
    });

    let repo_for_create = repository.clone();
    let crear_action = create_action(move |payload: &NewSchedule| {
        let repo = repo_for_create.clone();
        let payload = payload.clone();
        async move { repo.crear(payload).await }
    });

    let repo_for_update = repository.clone();
    let actualizar_action = create_action(move |input: &(i64, NewSchedule)| {
        let repo = repo_for_update.clone();
        let (id, payload) = input.clone();
        async move { repo.actualizar(id, payload).await }
    });

    let repo_for_delete = repository.clone();
    let eliminar_action = create_action(move |id: &i64| {
        let repo = repo_for_delete.clone();
        let id = *id;
        async move { repo.eliminar(id).await }
    });

    create_effect(move |_| {
        if let Some(result) = crear_action.value().get() {
            match result {
                Ok(created) => {
                    records.update(|all| all.insert(0, created));
                    page.set(1);
                    form_open.set(false);
                    form.set(ScheduleFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Horario creado",
                        "El horario se registró correctamente.",
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
                    form.set(ScheduleFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Horario actualizado",
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
                Ok(()) => {
                    alert.set(Some(AlertInfo::success(
                        "Horario eliminado",
                        "El horario fue eliminado correctamente.",
                    )));
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo eliminar", err.error)));
                }
            }
        }
    });

    let repo_for_upload = repository.clone();
    let ingest_action = create_action(
        move |input: &(Option<web_sys::File>, Option<web_sys::File>)| {
            let repo = repo_for_upload.clone();
            let (isi, prelistas) = input.clone();
            async move {
                let isi = match isi {
                    Some(file) => Some(stage_file(&file).await?),
                    None => None,
                };
                let prelistas = match prelistas {
                    Some(file) => Some(stage_file(&file).await?),
                    None => None,
                };
                repo.ingest(isi, prelistas).await
            }
        },
    );
    let ingesting = ingest_action.pending();

    create_effect(move |_| {
        if let Some(result) = ingest_action.value().get() {
            match result {
                Ok(resumen) => {
                    alert.set(Some(AlertInfo::success(
                        "Archivos procesados",
                        format!(
                            "{} grupos y {} horarios actualizados.",
                            resumen.grupos_upsert, resumen.horarios_upsert,
                        ),
                    )));
                    isi_file.set(None);
                    prelistas_file.set(None);
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
        form.set(ScheduleFormState::default());
        form_open.set(true);
    };

    let open_edit = move |record: ScheduleRecord| {
        form.set(ScheduleFormState::from_record(&record));
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
            Some(id) => actualizar_action.dispatch((id, state.to_request())),
            None => crear_action.dispatch(state.to_request()),
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
        if let Err(err) = export::export_csv("horarios", EXPORT_HEADERS, rows) {
            alert.set(Some(AlertInfo::error("Exportación", err.error)));
        }
    };

    let start_upload = move |_| {
        let isi = isi_file.get();
        let prelistas = prelistas_file.get();
        if isi.is_none() && prelistas.is_none() {
            alert.set(Some(AlertInfo::error("Datos incompletos", NO_UPLOAD_FILES)));
            return;
        }
        ingest_action.dispatch((isi, prelistas));
    };

    let select_class = "rounded border border-gray-300 px-2 py-1 text-sm text-gray-700";
    let saving = Signal::derive(move || {
        crear_action.pending().get() || actualizar_action.pending().get()
    });

    view! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-xl font-semibold text-[#16469B]">"Horarios"</h2>
                <div class="flex gap-2">
                    <Show when=move || mode.get() == ViewMode::Table>
                        <button
                            class="rounded bg-[#16469B] px-3 py-1.5 text-sm font-semibold text-white hover:bg-[#123670]"
                            on:click=open_create
                        >
                            "Nuevo horario"
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
                            ViewMode::Table => "Subir archivos",
                            ViewMode::Upload => "Volver a la tabla",
                        }}
                    </button>
                </div>
            </div>

            <Show when=move || mode.get() == ViewMode::Upload>
                <div class="grid gap-4 lg:grid-cols-2">
                    <div class="space-y-3 rounded-lg border border-gray-200 bg-white p-4">
                        <FileDropZone
                            file=isi_file
                            label="Archivo ISI"
                            accept=".xlsx,.xls,.csv"
                        />
                        <FileDropZone
                            file=prelistas_file
                            label="Archivo de prelistas"
                            accept=".xlsx,.xls,.csv"
                        />
                        <button
                            class="rounded bg-[#16469B] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50 hover:bg-[#123670]"
                            disabled=move || {
                                ingesting.get()
                                    || (isi_file.get().is_none() && prelistas_file.get().is_none())
                            }
                            on:click=start_upload
                        >
                            {move || {
                                if ingesting.get() { "Procesando…" } else { "Subir y procesar" }
                            }}
                        </button>
                    </div>
                    <div class="rounded-lg border border-gray-200 bg-white p-4">
                        <h3 class="mb-2 text-sm font-semibold text-gray-700">
                            "Últimos archivos cargados"
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
                                "Aún no hay archivos cargados."
                            </p>
                        </Show>
                    </div>
                </div>
            </Show>

            <Show when=move || mode.get() == ViewMode::Table>
                <div class="flex flex-wrap items-center gap-2">
                    <input
                        class="w-64 rounded border border-gray-300 px-2 py-1 text-sm"
                        placeholder="Buscar materia, profesor o aula"
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
                    <select
                        class=select_class
                        on:change=move |ev| {
                            empleado_filter.set(event_target_value(&ev));
                            page.set(1);
                        }
                    >
                        <option value=ALL selected=move || empleado_filter.get() == ALL>
                            "Todos los empleados"
                        </option>
                        {move || {
                            empleado_options
                                .get()
                                .into_iter()
                                .map(|value| {
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value.clone()
                                            selected=move || empleado_filter.get() == current
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
                                    <th class="px-3 py-2">"Día"</th>
                                    <th class="px-3 py-2">"Horario"</th>
                                    <th class="px-3 py-2">"Aula"</th>
                                    <th class="px-3 py-2">"Profesor"</th>
                                    <th class="px-3 py-2">"Cupo"</th>
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
                                                    <td class="px-3 py-2">
                                                        {dia_semana_label(record.dia_semana)}
                                                    </td>
                                                    <td class="px-3 py-2">
                                                        {format!(
                                                            "{} - {}",
                                                            record.hora_inicio.clone().unwrap_or_default(),
                                                            record.hora_fin.clone().unwrap_or_default(),
                                                        )}
                                                    </td>
                                                    <td class="px-3 py-2">
                                                        {record.aula.clone().unwrap_or_default()}
                                                    </td>
                                                    <td class="px-3 py-2">{profesor_full_name(&record)}</td>
                                                    <td class="px-3 py-2">
                                                        {record
                                                            .cupo
                                                            .map(|c| c.to_string())
                                                            .unwrap_or_default()}
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
                                "Sin horarios para los filtros actuales."
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
                        "Editar horario".to_string()
                    } else {
                        "Nuevo horario".to_string()
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
                    <label class="block text-sm font-medium text-gray-700">
                        "Día de la semana"
                        <select
                            class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                            on:change=move |ev| {
                                form.update(|f| f.dia_semana = event_target_value(&ev))
                            }
                        >
                            <option value="" selected=move || form.get().dia_semana.is_empty()>
                                "Sin asignar"
                            </option>
                            {(1..=7)
                                .map(|dia| {
                                    let value = dia.to_string();
                                    let current = value.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || form.get().dia_semana == current
                                        >
                                            {dia_semana_label(Some(dia))}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <TextField
                        label="Aula"
                        value=Signal::derive(move || form.get().aula)
                        on_change=Callback::new(move |value| form.update(|f| f.aula = value))
                    />
                    <TextField
                        label="Hora inicio"
                        placeholder="08:00"
                        value=Signal::derive(move || form.get().hora_inicio)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.hora_inicio = value)
                        })
                    />
                    <TextField
                        label="Hora fin"
                        placeholder="10:00"
                        value=Signal::derive(move || form.get().hora_fin)
                        on_change=Callback::new(move |value| form.update(|f| f.hora_fin = value))
                    />
                    <TextField
                        label="Núm. de empleado"
                        value=Signal::derive(move || form.get().num_empleado)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.num_empleado = value)
                        })
                    />
                    <TextField
                        label="Nombre del profesor"
                        value=Signal::derive(move || form.get().profesor_nombre)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.profesor_nombre = value)
                        })
                    />
                    <TextField
                        label="Apellido paterno"
                        value=Signal::derive(move || form.get().profesor_apellido_paterno)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.profesor_apellido_paterno = value)
                        })
                    />
                    <TextField
                        label="Apellido materno"
                        value=Signal::derive(move || form.get().profesor_apellido_materno)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.profesor_apellido_materno = value)
                        })
                    />
                    <TextField
                        label="Cupo"
                        value=Signal::derive(move || form.get().cupo)
                        on_change=Callback::new(move |value| form.update(|f| f.cupo = value))
                    />
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
                title="Eliminar horario"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|record| {
                            format!(
                                "¿Eliminar el horario de {} grupo {}? Esta acción no se puede deshacer.",
                                record.codigo_materia, record.grupo,
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
            view! { <HorariosPanel /> }
        });

        assert!(html.contains("Horarios"));
        assert!(html.contains("Nuevo horario"));
        assert!(html.contains("Subir archivos"));
        assert!(html.contains("Todos los grupos"));
    }
}
