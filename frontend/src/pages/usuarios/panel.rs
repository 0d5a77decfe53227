use leptos::*;

use crate::{
    api::{Role, UserRecord},
    components::{
        confirm_dialog::ConfirmDialog,
        form::TextField,
        layout::{ErrorMessage, LoadingSpinner},
        modal::{AlertInfo, AlertModal, Modal},
        pagination::Pagination,
    },
    export,
    tables::{self, ALL},
};

use super::{
    repository::UsuariosRepository,
    utils::{
        apply_filters, apply_rol, export_rows, remove_by_usuario_id, ProfesorFormState,
        EXPORT_HEADERS,
    },
};

#[component]
pub fn UsuariosPanel() -> impl IntoView {
    let repository = UsuariosRepository::new();

    let records = create_rw_signal(Vec::<UserRecord>::new());
    let roles = create_rw_signal(Vec::<Role>::new());
    let loading = create_rw_signal(false);
    let load_error = create_rw_signal(None::<String>);
    let reload = create_rw_signal(0u32);

    let search = create_rw_signal(String::new());
    let rol_filter = create_rw_signal(ALL.to_string());
    let page = create_rw_signal(1usize);

    let form = create_rw_signal(ProfesorFormState::default());
    let form_open = create_rw_signal(false);
    // (profesor_id, usuario_id) del registro en edición
    let editing = create_rw_signal(None::<(i64, i64)>);
    let pending_delete = create_rw_signal(None::<UserRecord>);
    let alert = create_rw_signal(None::<AlertInfo>);

    let repo_for_fetch = repository.clone();
    create_effect(move |_| {
        reload.track();
        let repo = repo_for_fetch.clone();
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            match repo.fetch_roles().await {
                Ok(catalogo) => roles.set(catalogo),
                Err(err) => load_error.set(Some(err.error)),
            }
            match repo.fetch_usuarios().await {
                Ok(rows) => records.set(rows),
                Err(err) => load_error.set(Some(err.error)),
            }
            loading.set(false);
        });
    });

    let filtered = create_memo(move |_| {
        apply_filters(&records.get(), &search.get(), &rol_filter.get())
    });
    let total = create_memo(move |_| tables::total_pages(filtered.get().len()));
    let visible = create_memo(move |_| {
        let rows = filtered.get();
        let (start, end) = tables::page_bounds(rows.len(), page.get());
        rows[start..end].to_vec()
    });

    let repo_for_rol = repository.clone();
    let rol_action = create_action(move |input: &(i64, i64)| {
        let repo = repo_for_rol.clone();
        let (usuario_id, rol_id) = *input;
        async move {
            repo.cambiar_rol(usuario_id, rol_id)
                .await
                .map(|_| (usuario_id, rol_id))
        }
    });

    let repo_for_delete = repository.clone();
    let eliminar_action = create_action(move |usuario_id: &i64| {
        let repo = repo_for_delete.clone();
        let usuario_id = *usuario_id;
        async move { repo.eliminar(usuario_id).await.map(|_| usuario_id) }
    });

    let repo_for_create = repository.clone();
    let crear_action = create_action(move |form_state: &ProfesorFormState| {
        let repo = repo_for_create.clone();
        let request = form_state.to_create_request();
        async move { repo.crear(request).await }
    });

    let repo_for_update = repository.clone();
    let actualizar_action = create_action(
        move |input: &(i64, i64, ProfesorFormState)| {
            let repo = repo_for_update.clone();
            let (profesor_id, usuario_id, form_state) = input.clone();
            let request = form_state.to_update_request(usuario_id);
            async move { repo.actualizar(profesor_id, request).await }
        },
    );

    create_effect(move |_| {
        if let Some(result) = rol_action.value().get() {
            match result {
                Ok((usuario_id, rol_id)) => {
                    records.update(|all| apply_rol(all, usuario_id, rol_id, &roles.get()));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo cambiar el rol", err.error)));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = eliminar_action.value().get() {
            match result {
                Ok(usuario_id) => {
                    records.update(|all| remove_by_usuario_id(all, usuario_id));
                    alert.set(Some(AlertInfo::success(
                        "Usuario eliminado",
                        "El usuario se eliminó correctamente.",
                    )));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo eliminar", err.error)));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = crear_action.value().get() {
            match result {
                Ok(created) => {
                    form_open.set(false);
                    form.set(ProfesorFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Profesor registrado",
                        format!("Se creó la cuenta de {}.", created.nombre),
                    )));
                    reload.update(|value| *value = value.wrapping_add(1));
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
                    form_open.set(false);
                    editing.set(None);
                    form.set(ProfesorFormState::default());
                    alert.set(Some(AlertInfo::success(
                        "Profesor actualizado",
                        format!("Se guardaron los cambios de {}.", updated.nombre),
                    )));
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    alert.set(Some(AlertInfo::error("No se pudo actualizar", err.error)));
                }
            }
        }
    });

    let open_create = move |_| {
        editing.set(None);
        form.set(ProfesorFormState::default());
        form_open.set(true);
    };

    let open_edit = move |record: UserRecord| {
        form.set(ProfesorFormState::from_record(&record));
        editing.set(Some((record.profesor_id, record.usuario_id)));
        form_open.set(true);
    };

    let submit_form = move |_| {
        let state = form.get();
        if let Err(message) = state.validate() {
            alert.set(Some(AlertInfo::error("Datos incompletos", message)));
            return;
        }
        match editing.get() {
            Some((profesor_id, usuario_id)) => {
                actualizar_action.dispatch((profesor_id, usuario_id, state))
            }
            None => crear_action.dispatch(state),
        }
    };

    let confirm_delete = move |_: ()| {
        if let Some(target) = pending_delete.get() {
            pending_delete.set(None);
            eliminar_action.dispatch(target.usuario_id);
        }
    };

    let export_table = move |_| {
        let rows = export_rows(&filtered.get());
        if let Err(err) = export::export_csv("usuarios", EXPORT_HEADERS, rows) {
            alert.set(Some(AlertInfo::error("Exportación", err.error)));
        }
    };

    let select_class = "rounded border border-gray-300 px-2 py-1 text-sm text-gray-700";
    let saving = Signal::derive(move || {
        crear_action.pending().get() || actualizar_action.pending().get()
    });

    view! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-xl font-semibold text-[#16469B]">"Usuarios y roles"</h2>
                <div class="flex gap-2">
                    <button
                        class="rounded bg-[#16469B] px-3 py-1.5 text-sm font-semibold text-white hover:bg-[#123670]"
                        on:click=open_create
                    >
                        "Nuevo profesor"
                    </button>
                    <button
                        class="rounded border border-[#16469B] px-3 py-1.5 text-sm font-semibold text-[#16469B] hover:bg-blue-50"
                        on:click=export_table
                    >
                        "Exportar CSV"
                    </button>
                </div>
            </div>

            <div class="flex flex-wrap items-center gap-2">
                <input
                    class="w-64 rounded border border-gray-300 px-2 py-1 text-sm"
                    placeholder="Buscar nombre, correo o empleado"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
                <select
                    class=select_class
                    on:change=move |ev| {
                        rol_filter.set(event_target_value(&ev));
                        page.set(1);
                    }
                >
                    <option value=ALL selected=move || rol_filter.get() == ALL>
                        "Todos los roles"
                    </option>
                    {move || {
                        roles
                            .get()
                            .into_iter()
                            .map(|rol| {
                                let value = rol.nombre.clone();
                                let current = value.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || rol_filter.get() == current
                                    >
                                        {rol.nombre.clone()}
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
                                <th class="px-3 py-2">"Nombre"</th>
                                <th class="px-3 py-2">"Correo"</th>
                                <th class="px-3 py-2">"Núm. empleado"</th>
                                <th class="px-3 py-2">"Rol"</th>
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
                                        let usuario_id = record.usuario_id;
                                        let rol_id = record.rol_id;
                                        view! {
                                            <tr class="hover:bg-gray-50">
                                                <td class="px-3 py-2">{record.nombre.clone()}</td>
                                                <td class="px-3 py-2">{record.email.clone()}</td>
                                                <td class="px-3 py-2">{record.num_empleado}</td>
                                                <td class="px-3 py-2">
                                                    <select
                                                        class="rounded border border-gray-300 px-2 py-1 text-sm"
                                                        on:change=move |ev| {
                                                            if let Ok(nuevo) =
                                                                event_target_value(&ev).parse::<i64>()
                                                            {
                                                                rol_action.dispatch((usuario_id, nuevo));
                                                            }
                                                        }
                                                    >
                                                        <option value="" selected=rol_id == 0>
                                                            "Sin rol"
                                                        </option>
                                                        {roles
                                                            .get()
                                                            .into_iter()
                                                            .map(|rol| {
                                                                view! {
                                                                    <option
                                                                        value=rol.id.to_string()
                                                                        selected=rol.id == rol_id
                                                                    >
                                                                        {rol.nombre.clone()}
                                                                    </option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
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
                            "Sin usuarios para los filtros actuales."
                        </p>
                    </Show>
                </div>
                <Pagination
                    current=Signal::derive(move || page.get())
                    total=Signal::derive(move || total.get())
                    on_page=Callback::new(move |target| page.set(target))
                />
            </Show>

            <Modal
                is_open=Signal::derive(move || form_open.get())
                title=Signal::derive(move || {
                    if editing.get().is_some() {
                        "Editar profesor".to_string()
                    } else {
                        "Nuevo profesor".to_string()
                    }
                })
                on_close=Callback::new(move |_| {
                    form_open.set(false);
                    editing.set(None);
                })
            >
                <div class="grid grid-cols-1 gap-3 sm:grid-cols-2">
                    <TextField
                        label="Nombre completo"
                        value=Signal::derive(move || form.get().nombre)
                        on_change=Callback::new(move |value| form.update(|f| f.nombre = value))
                    />
                    <TextField
                        label="Correo institucional"
                        value=Signal::derive(move || form.get().correo)
                        on_change=Callback::new(move |value| form.update(|f| f.correo = value))
                    />
                    <TextField
                        label="Núm. de empleado"
                        value=Signal::derive(move || form.get().num_empleado)
                        on_change=Callback::new(move |value| {
                            form.update(|f| f.num_empleado = value)
                        })
                    />
                    <label class="block text-sm font-medium text-gray-700">
                        "Rol"
                        <select
                            class="mt-1 w-full rounded border border-gray-300 px-2 py-1 text-sm"
                            on:change=move |ev| {
                                form.update(|f| f.rol_id = event_target_value(&ev))
                            }
                        >
                            <option value="" selected=move || form.get().rol_id.is_empty()>
                                "Selecciona un rol"
                            </option>
                            {move || {
                                roles
                                    .get()
                                    .into_iter()
                                    .map(|rol| {
                                        let value = rol.id.to_string();
                                        let current = value.clone();
                                        view! {
                                            <option
                                                value=value
                                                selected=move || form.get().rol_id == current
                                            >
                                                {rol.nombre.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                    <Show when=move || editing.get().is_none()>
                        <TextField
                            label="Contraseña inicial (opcional)"
                            input_type="password"
                            value=Signal::derive(move || form.get().password)
                            on_change=Callback::new(move |value| {
                                form.update(|f| f.password = value)
                            })
                        />
                    </Show>
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
                title="Eliminar usuario"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|record| {
                            format!(
                                "¿Eliminar la cuenta de {}? Esta acción no se puede deshacer.",
                                record.nombre,
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
            provide_session(Some(sample_user(&["ADMINISTRADOR"])), false);
            view! { <UsuariosPanel /> }
        });

        assert!(html.contains("Usuarios y roles"));
        assert!(html.contains("Nuevo profesor"));
        assert!(html.contains("Todos los roles"));
    }
}
