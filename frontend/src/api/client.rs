use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{api::types::*, config};

/// Archivo ya en memoria, listo para un form multipart.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.name)
    }
}

/// Sobre `{ok, items, error}` que envuelve los listados del backend.
#[derive(Debug, serde::Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ListEnvelope<T> {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    items: Option<Vec<T>>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> ListEnvelope<T> {
    fn into_items(self, fallback: &str) -> Result<Vec<T>, ApiError> {
        if !self.ok {
            return Err(ApiError::invalid_response(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        self.items
            .ok_or_else(|| ApiError::invalid_response(fallback.to_string()))
    }
}

#[derive(Debug, serde::Deserialize)]
struct AckEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct UploadEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default, rename = "archivoId")]
    archivo_id: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ResumenEnvelope<T> {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    resumen: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> ResumenEnvelope<T> {
    fn into_resumen(self, fallback: &str) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::invalid_response(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        self.resumen
            .ok_or_else(|| ApiError::invalid_response(fallback.to_string()))
    }
}

pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Extrae `{error}` del cuerpo si se puede; si no, el mensaje genérico
    /// de la operación.
    async fn error_from(response: Response, fallback: &str) -> ApiError {
        match response.json::<ApiError>().await {
            Ok(err) if !err.error.trim().is_empty() => ApiError::request_failed(err.error),
            _ => ApiError::request_failed(fallback),
        }
    }

    async fn parse_body<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|_| ApiError::invalid_response(fallback))
        } else {
            Err(Self::error_from(response, fallback).await)
        }
    }

    // ---- Autenticación ----

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/api/auth/login", base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al iniciar sesión").await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/api/auth/forgot-password", base_url))
            .json(&ForgotPasswordRequest {
                email: email.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al solicitar el código de recuperación").await
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/api/auth/reset-password", base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al restablecer la contraseña").await
    }

    // ---- Asistencia (relaciones alumno–grupo) ----

    pub async fn asistencia_resumen(
        &self,
        periodo: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut request = self
            .client
            .get(format!("{}/asistencia/resumen", base_url));
        if let Some(periodo) = periodo.filter(|p| !p.is_empty()) {
            request = request.query(&[("periodo", periodo)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<AttendanceRecord> =
            Self::parse_body(response, "Error al obtener el resumen de asistencia").await?;
        envelope.into_items("Respuesta inválida del resumen de asistencia")
    }

    pub async fn crear_asistencia(
        &self,
        payload: NewAttendance,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/asistencia", base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let body: OneOrMany<AttendanceRecord> =
            Self::parse_body(response, "Error al crear relación de asistencia").await?;
        Ok(body.into_vec())
    }

    /// Sube la lista de asistencia; el campo multipart debe llamarse "file".
    pub async fn subir_asistencia(&self, file: StagedFile) -> Result<i64, ApiError> {
        let base_url = self.resolved_base_url().await;
        let form = Form::new().part("file", file.into_part());
        let response = self
            .client
            .post(format!("{}/asistencia/upload", base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let ack: UploadEnvelope =
            Self::parse_body(response, "Error al subir lista de asistencia").await?;
        if !ack.ok {
            return Err(ApiError::invalid_response(
                ack.error
                    .unwrap_or_else(|| "Respuesta inválida al subir asistencia".to_string()),
            ));
        }
        ack.archivo_id
            .ok_or_else(|| ApiError::invalid_response("Respuesta inválida al subir asistencia"))
    }

    pub async fn procesar_asistencia(
        &self,
        archivo_id: i64,
        periodo_etiqueta: &str,
    ) -> Result<AsistenciaResumen, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut body = serde_json::Map::new();
        if !periodo_etiqueta.is_empty() {
            body.insert("periodoEtiqueta".into(), json!(periodo_etiqueta));
        }
        let response = self
            .client
            .post(format!("{}/asistencia/process/{}", base_url, archivo_id))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ResumenEnvelope<AsistenciaResumen> =
            Self::parse_body(response, "Error al procesar lista de asistencia").await?;
        envelope.into_resumen("Respuesta inválida al procesar lista de asistencia")
    }

    // ---- Horarios ----

    pub async fn horarios(&self) -> Result<Vec<ScheduleRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/horarios", base_url))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<ScheduleRecord> =
            Self::parse_body(response, "Error al obtener horarios").await?;
        envelope.into_items("Respuesta inválida al obtener horarios")
    }

    pub async fn crear_horario(&self, payload: NewSchedule) -> Result<ScheduleRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/horarios", base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al crear horario").await
    }

    pub async fn actualizar_horario(
        &self,
        id: i64,
        payload: NewSchedule,
    ) -> Result<ScheduleRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/horarios/{}", base_url, id))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al actualizar horario").await
    }

    pub async fn eliminar_horario(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .delete(format!("{}/horarios/{}", base_url, id))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let ack: AckEnvelope = Self::parse_body(response, "Error al eliminar horario").await?;
        if ack.ok {
            Ok(())
        } else {
            Err(ApiError::invalid_response(
                ack.error.unwrap_or_else(|| "Error al eliminar horario".to_string()),
            ))
        }
    }

    /// Sube los archivos de horarios; campos multipart "isi" y "prelistas",
    /// ambos opcionales pero al menos uno presente.
    pub async fn subir_horarios(
        &self,
        isi: Option<StagedFile>,
        prelistas: Option<StagedFile>,
    ) -> Result<HorariosUploadAck, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut form = Form::new();
        if let Some(file) = isi {
            form = form.part("isi", file.into_part());
        }
        if let Some(file) = prelistas {
            form = form.part("prelistas", file.into_part());
        }
        let response = self
            .client
            .post(format!("{}/horarios/upload", base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let ack: HorariosUploadAck =
            Self::parse_body(response, "Error al subir archivos de horarios").await?;
        if !ack.ok {
            return Err(ApiError::invalid_response(
                ack.error
                    .clone()
                    .unwrap_or_else(|| "Respuesta inválida al subir horarios".to_string()),
            ));
        }
        Ok(ack)
    }

    pub async fn procesar_horarios(
        &self,
        request: HorariosProcessRequest,
    ) -> Result<HorariosResumen, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/horarios/process", base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ResumenEnvelope<HorariosResumen> =
            Self::parse_body(response, "Error al procesar horarios").await?;
        envelope.into_resumen("Respuesta inválida al procesar horarios")
    }

    pub async fn horarios_historial(&self, limit: u32) -> Result<Vec<HistorialItem>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/horarios/historial", base_url))
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<HistorialItem> =
            Self::parse_body(response, "Error al obtener historial de horarios").await?;
        envelope.into_items("Respuesta inválida del historial de horarios")
    }

    // ---- Planes de estudio ----

    pub async fn planes_catalogo(&self) -> Result<Vec<PlanCatalogItem>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/plan/catalogo", base_url))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<PlanCatalogItem> =
            Self::parse_body(response, "Error al obtener planes").await?;
        envelope.into_items("Respuesta inválida del catálogo de planes")
    }

    pub async fn plan_materias(&self) -> Result<Vec<MateriaPlanRow>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/plan/materias", base_url))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<MateriaPlanRow> =
            Self::parse_body(response, "Error al obtener materias de plan").await?;
        envelope.into_items("Respuesta inválida al obtener materias de plan")
    }

    pub async fn crear_plan_materia(
        &self,
        payload: MateriaPayload,
    ) -> Result<MateriaPlanRow, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/plan/materias", base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al crear materia de plan").await
    }

    pub async fn actualizar_plan_materia(
        &self,
        id: i64,
        payload: MateriaPayload,
    ) -> Result<MateriaPlanRow, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/plan/materias/{}", base_url, id))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al actualizar materia de plan").await
    }

    pub async fn eliminar_plan_materia(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .delete(format!("{}/plan/materias/{}", base_url, id))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let ack: AckEnvelope =
            Self::parse_body(response, "No se pudo eliminar la materia. Intenta de nuevo más tarde.")
                .await?;
        if ack.ok {
            Ok(())
        } else {
            Err(ApiError::invalid_response(ack.error.unwrap_or_else(|| {
                "No se pudo eliminar la materia. Intenta de nuevo más tarde.".to_string()
            })))
        }
    }

    /// Sube un plan de estudios en PDF; campo multipart "pdf".
    pub async fn subir_plan_pdf(
        &self,
        file: StagedFile,
        force: bool,
        debug: bool,
        ocr: bool,
    ) -> Result<PlanUploadResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut params: Vec<(&str, &str)> = Vec::new();
        if force {
            params.push(("force", "1"));
        }
        if debug {
            params.push(("debug", "1"));
        }
        if ocr {
            params.push(("ocr", "1"));
        }
        let form = Form::new().part("pdf", file.into_part());
        let response = self
            .client
            .post(format!("{}/plan/upload", base_url))
            .query(&params)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let body: PlanUploadResponse =
            Self::parse_body(response, "Error al subir plan de estudios").await?;
        if !body.ok {
            return Err(ApiError::invalid_response(
                "Respuesta inválida al subir plan de estudios",
            ));
        }
        Ok(body)
    }

    pub async fn plan_historial(&self, limit: u32) -> Result<Vec<HistorialItem>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/plan/historial", base_url))
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let envelope: ListEnvelope<HistorialItem> =
            Self::parse_body(response, "Error al obtener historial de plan de estudios").await?;
        envelope.into_items("Respuesta inválida del historial de plan de estudios")
    }

    // ---- Estructura (reporte histórico) ----

    pub async fn subir_estructura(&self, file: StagedFile) -> Result<i64, ApiError> {
        let base_url = self.resolved_base_url().await;
        let form = Form::new().part("file", file.into_part());
        let response = self
            .client
            .post(format!("{}/estructura/upload", base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let status = response.status();
        let ack: UploadEnvelope = response.json().await.map_err(|_| {
            ApiError::invalid_response(format!("Error al subir estructura ({})", status))
        })?;
        if !status.is_success() || !ack.ok {
            return Err(ApiError::request_failed(ack.error.unwrap_or_else(|| {
                format!("Error al subir estructura ({})", status)
            })));
        }
        ack.archivo_id.ok_or_else(|| {
            ApiError::invalid_response(format!("Error al subir estructura ({})", status))
        })
    }

    pub async fn procesar_estructura(&self, archivo_id: i64) -> Result<EstructuraResumen, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/estructura/process/{}", base_url, archivo_id))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        let status = response.status();
        let envelope: ResumenEnvelope<EstructuraResumen> = response.json().await.map_err(|_| {
            ApiError::invalid_response(format!("Error al procesar estructura ({})", status))
        })?;
        if !status.is_success() {
            return Err(ApiError::request_failed(envelope.error.unwrap_or_else(
                || format!("Error al procesar estructura ({})", status),
            )));
        }
        envelope.into_resumen("Respuesta inválida al procesar estructura")
    }

    // ---- Usuarios y roles ----

    pub async fn usuarios(&self) -> Result<Vec<UserDto>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/admin/users", base_url))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al obtener usuarios").await
    }

    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/admin/roles", base_url))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al obtener roles").await
    }

    pub async fn actualizar_rol(&self, usuario_id: i64, rol_id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .patch(format!("{}/admin/users/{}/role", base_url, usuario_id))
            .json(&json!({ "rolId": rol_id }))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, "Error al actualizar rol").await)
        }
    }

    pub async fn eliminar_usuario(&self, usuario_id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .delete(format!("{}/admin/users/{}", base_url, usuario_id))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, "Error al eliminar usuario").await)
        }
    }

    pub async fn crear_profesor(
        &self,
        request: CreateProfesorRequest,
    ) -> Result<UserDto, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/admin/users", base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al crear profesor").await
    }

    pub async fn actualizar_profesor(
        &self,
        profesor_id: i64,
        request: UpdateProfesorRequest,
    ) -> Result<UserDto, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/admin/users/{}", base_url, profesor_id))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Error de red: {}", e)))?;
        Self::parse_body(response, "Error al actualizar profesor").await
    }
}
