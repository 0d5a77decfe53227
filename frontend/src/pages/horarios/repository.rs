use crate::api::{
    ApiClient, ApiError, HistorialItem, HorariosProcessRequest, HorariosResumen, NewSchedule,
    ScheduleRecord, StagedFile,
};
use std::rc::Rc;

pub const HISTORIAL_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct HorariosRepository {
    client: Rc<ApiClient>,
}

impl Default for HorariosRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HorariosRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch(&self) -> Result<Vec<ScheduleRecord>, ApiError> {
        self.client.horarios().await
    }

    pub async fn crear(&self, payload: NewSchedule) -> Result<ScheduleRecord, ApiError> {
        self.client.crear_horario(payload).await
    }

    pub async fn actualizar(
        &self,
        id: i64,
        payload: NewSchedule,
    ) -> Result<ScheduleRecord, ApiError> {
        self.client.actualizar_horario(id, payload).await
    }

    pub async fn eliminar(&self, id: i64) -> Result<(), ApiError> {
        self.client.eliminar_horario(id).await
    }

    pub async fn historial(&self) -> Result<Vec<HistorialItem>, ApiError> {
        self.client.horarios_historial(HISTORIAL_LIMIT).await
    }

    /// Ingesta de horarios: sube los archivos presentes (ISI, prelistas o
    /// ambos) y dispara el procesamiento con los ids que regresó la subida.
    pub async fn ingest(
        &self,
        isi: Option<StagedFile>,
        prelistas: Option<StagedFile>,
    ) -> Result<HorariosResumen, ApiError> {
        let ack = self.client.subir_horarios(isi, prelistas).await?;
        self.client
            .procesar_horarios(HorariosProcessRequest {
                archivo_id_isi: ack.archivo_id_isi,
                archivo_id_prelistas: ack.archivo_id_prelistas,
            })
            .await
    }
}
