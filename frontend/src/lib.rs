pub mod api;
mod components;
pub mod config;
mod export;
mod pages;
pub mod router;
mod state;
mod tables;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Arranque del cliente: inicializa logging y configuración de runtime y
/// monta la aplicación en el body.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Iniciando Sistema de Carga de Archivos (wasm)");

    // La carga de ./config.json no bloquea el montaje; los repositorios
    // esperan la base URL resuelta antes de la primera petición.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("Configuración de runtime inicializada");
    });

    router::mount_app();
}
