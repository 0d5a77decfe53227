use wasm_bindgen_futures::JsFuture;

use crate::api::{ApiError, StagedFile};

/// Lee un `File` del navegador a memoria para armar el form multipart.
pub async fn stage_file(file: &web_sys::File) -> Result<StagedFile, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::request_failed("No se pudo leer el archivo seleccionado"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(StagedFile::new(file.name(), bytes))
}
