fn main() {
    #[cfg(target_arch = "wasm32")]
    carga_archivos_frontend::start();
}
