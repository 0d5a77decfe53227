use crate::api::{ApiClient, ApiError, EstructuraResumen, StagedFile};
use std::rc::Rc;

#[derive(Clone)]
pub struct HistoricoRepository {
    client: Rc<ApiClient>,
}

impl Default for HistoricoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoricoRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Carga del histórico académico: sube el archivo de estructura y lo
    /// procesa en cuanto el backend confirma la subida.
    pub async fn ingest(&self, file: StagedFile) -> Result<EstructuraResumen, ApiError> {
        let archivo_id = self.client.subir_estructura(file).await?;
        self.client.procesar_estructura(archivo_id).await
    }
}
