use crate::api::{
    ApiClient, ApiError, HistorialItem, MateriaPayload, PlanOption, PlanRecord,
    PlanUploadResponse, StagedFile,
};
use std::rc::Rc;

pub const HISTORIAL_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct PlanesRepository {
    client: Rc<ApiClient>,
}

impl Default for PlanesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanesRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_catalogo(&self) -> Result<Vec<PlanOption>, ApiError> {
        let items = self.client.planes_catalogo().await?;
        Ok(items.into_iter().map(PlanOption::from).collect())
    }

    pub async fn fetch_materias(&self) -> Result<Vec<PlanRecord>, ApiError> {
        let rows = self.client.plan_materias().await?;
        Ok(rows.into_iter().map(PlanRecord::from).collect())
    }

    pub async fn crear(&self, payload: MateriaPayload) -> Result<PlanRecord, ApiError> {
        let row = self.client.crear_plan_materia(payload).await?;
        Ok(row.into())
    }

    pub async fn actualizar(
        &self,
        id: i64,
        payload: MateriaPayload,
    ) -> Result<PlanRecord, ApiError> {
        let row = self.client.actualizar_plan_materia(id, payload).await?;
        Ok(row.into())
    }

    pub async fn eliminar(&self, id: i64) -> Result<(), ApiError> {
        self.client.eliminar_plan_materia(id).await
    }

    pub async fn subir_pdf(
        &self,
        file: StagedFile,
        force: bool,
        debug: bool,
        ocr: bool,
    ) -> Result<PlanUploadResponse, ApiError> {
        self.client.subir_plan_pdf(file, force, debug, ocr).await
    }

    pub async fn historial(&self) -> Result<Vec<HistorialItem>, ApiError> {
        self.client.plan_historial(HISTORIAL_LIMIT).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn repo_for(server: &MockServer) -> PlanesRepository {
        PlanesRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.base_url(),
        )))
    }

    #[tokio::test]
    async fn catalogo_becomes_labeled_options() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/plan/catalogo");
            then.status(200).json_body(json!({
                "ok": true,
                "items": [
                    {"id": 2, "nombre": "Ing. en Sistemas", "version": "2019"}
                ]
            }));
        });

        let options = repo_for(&server).fetch_catalogo().await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, 2);
        assert_eq!(options[0].label, "Ing. en Sistemas (v2019)");
    }

    #[tokio::test]
    async fn materias_rows_are_normalized() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/plan/materias");
            then.status(200).json_body(json!({
                "ok": true,
                "items": [{
                    "materia_id": 44,
                    "codigo": "ISI-101",
                    "nombre": "Programación I",
                    "creditos": 8,
                    "tipo": null,
                    "plan_id": 2,
                    "plan_nombre": "Ing. en Sistemas",
                    "plan_version": "2019"
                }]
            }));
        });

        let records = repo_for(&server).fetch_materias().await.unwrap();
        assert_eq!(records[0].id, 44);
        assert_eq!(records[0].tipo, "OBLIGATORIA");
    }

    #[tokio::test]
    async fn upload_sends_pdf_with_debug_flag() {
        let server = MockServer::start_async().await;
        let upload = server.mock(|when, then| {
            when.method(POST)
                .path("/plan/upload")
                .query_param("debug", "1");
            then.status(200).json_body(json!({
                "ok": true,
                "action": "created",
                "archivoId": 12,
                "ingesta": {
                    "planId": 2,
                    "materiasInput": 50,
                    "added": 48,
                    "updated": 2,
                    "unchanged": 0,
                    "warnings": [],
                    "action": "created"
                }
            }));
        });

        let response = repo_for(&server)
            .subir_pdf(StagedFile::new("plan.pdf", vec![1]), false, true, false)
            .await
            .unwrap();

        assert_eq!(response.archivo_id, 12);
        assert_eq!(response.ingesta.unwrap().added, 48);
        upload.assert();
    }
}
