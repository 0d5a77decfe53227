use crate::api::{
    ApiClient, ApiError, AsistenciaResumen, AttendanceRecord, NewAttendance, StagedFile,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct AsistenciaRepository {
    client: Rc<ApiClient>,
}

impl Default for AsistenciaRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AsistenciaRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_resumen(
        &self,
        periodo: Option<String>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.client.asistencia_resumen(periodo.as_deref()).await
    }

    pub async fn crear(&self, payload: NewAttendance) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.client.crear_asistencia(payload).await
    }

    /// Ingesta en dos fases: subir el archivo y procesarlo con la etiqueta
    /// de periodo. Cualquier falla es una sola falla de ingesta.
    pub async fn ingest(
        &self,
        file: StagedFile,
        periodo_etiqueta: String,
    ) -> Result<AsistenciaResumen, ApiError> {
        let archivo_id = self.client.subir_asistencia(file).await?;
        self.client
            .procesar_asistencia(archivo_id, &periodo_etiqueta)
            .await
    }
}
