use leptos::{IntoView, View};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: SessionUser,
}

/// Perfil que envía el backend al autenticar; persiste en
/// `localStorage["userData"]` tal cual llega (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    #[serde(default)]
    pub profesor_id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub app_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub codigo: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Fila de `vista_asistencia_grupos`: una relación alumno–grupo–materia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub periodo: String,
    pub codigo_materia: String,
    #[serde(default)]
    pub nombre_materia: String,
    pub grupo: String,
    pub matricula: String,
    #[serde(default)]
    pub expediente: Option<String>,
    #[serde(default)]
    pub nombre_alumno: String,
    #[serde(default)]
    pub apellido_paterno: String,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub fecha_alta: String,
    #[serde(default)]
    pub fuente: String,
    #[serde(default)]
    pub archivo_id: Option<i64>,
    #[serde(default)]
    pub nombre_archivo: Option<String>,
    #[serde(default)]
    pub fecha_archivo: Option<String>,
}

/// Alta manual de relación alumno–grupo. `matricula` admite una lista
/// separada por comas; el backend crea una fila por matrícula.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttendance {
    pub periodo: String,
    pub codigo_materia: String,
    pub nombre_materia: String,
    pub grupo: String,
    pub matricula: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nombre_alumno: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub apellido_paterno: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido_materno: Option<String>,
}

/// El alta de asistencia puede regresar una fila o un arreglo.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsistenciaResumen {
    pub periodo_etiqueta: String,
    #[serde(default)]
    pub periodo_id: Option<i64>,
    #[serde(default)]
    pub grupo_id: Option<i64>,
    #[serde(default)]
    pub alumnos_vinculados: i64,
    #[serde(default)]
    pub alumnos_sin_alumno: i64,
    #[serde(default)]
    pub alumnos_sin_grupo: i64,
    #[serde(default)]
    pub inscripciones_creadas: i64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: i64,
    pub periodo: String,
    pub codigo_materia: String,
    pub nombre_materia: String,
    pub grupo: String,
    #[serde(default)]
    pub dia_semana: Option<i32>,
    #[serde(default)]
    pub aula: Option<String>,
    #[serde(default)]
    pub hora_inicio: Option<String>,
    #[serde(default)]
    pub hora_fin: Option<String>,
    #[serde(default)]
    pub num_empleado: Option<i64>,
    #[serde(default)]
    pub profesor_nombre: Option<String>,
    #[serde(default)]
    pub profesor_apellido_paterno: Option<String>,
    #[serde(default)]
    pub profesor_apellido_materno: Option<String>,
    #[serde(default)]
    pub cupo: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSchedule {
    pub periodo: String,
    pub codigo_materia: String,
    pub nombre_materia: String,
    pub grupo: String,
    pub dia_semana: Option<i32>,
    pub aula: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub num_empleado: Option<i64>,
    pub profesor_nombre: Option<String>,
    pub profesor_apellido_paterno: Option<String>,
    pub profesor_apellido_materno: Option<String>,
    pub cupo: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HorariosUploadAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, rename = "archivoIdISI")]
    pub archivo_id_isi: Option<i64>,
    #[serde(default, rename = "archivoIdPrelistas")]
    pub archivo_id_prelistas: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HorariosProcessRequest {
    #[serde(rename = "archivoIdISI", skip_serializing_if = "Option::is_none")]
    pub archivo_id_isi: Option<i64>,
    #[serde(rename = "archivoIdPrelistas", skip_serializing_if = "Option::is_none")]
    pub archivo_id_prelistas: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorariosResumen {
    #[serde(default)]
    pub grupos_upsert: i64,
    #[serde(default)]
    pub horarios_upsert: i64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Entrada del historial de archivos cargados (horarios y planes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorialItem {
    pub id: i64,
    pub fecha: String,
    pub nombre_archivo: String,
    pub estado: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCatalogItem {
    pub id: i64,
    pub nombre: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOption {
    pub id: i64,
    pub label: String,
}

impl From<PlanCatalogItem> for PlanOption {
    fn from(item: PlanCatalogItem) -> Self {
        Self {
            id: item.id,
            label: format!("{} (v{})", item.nombre, item.version),
        }
    }
}

/// Fila cruda de `vista_materias_planes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MateriaPlanRow {
    pub materia_id: i64,
    pub codigo: String,
    pub nombre: String,
    pub creditos: i64,
    #[serde(default)]
    pub tipo: Option<String>,
    pub plan_id: i64,
    pub plan_nombre: String,
    pub plan_version: String,
    #[serde(default)]
    pub total_creditos: Option<i64>,
    #[serde(default)]
    pub semestres_sugeridos: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub id: i64,
    pub codigo: String,
    pub nombre_materia: String,
    pub creditos: i64,
    pub tipo: String,
    pub plan_id: i64,
    pub plan_nombre: String,
    pub plan_version: String,
    pub plan_total_creditos: Option<i64>,
    pub plan_semestres_sugeridos: Option<i64>,
}

impl From<MateriaPlanRow> for PlanRecord {
    fn from(row: MateriaPlanRow) -> Self {
        Self {
            id: row.materia_id,
            codigo: row.codigo,
            nombre_materia: row.nombre,
            creditos: row.creditos,
            tipo: row.tipo.unwrap_or_else(|| "OBLIGATORIA".to_string()),
            plan_id: row.plan_id,
            plan_nombre: row.plan_nombre,
            plan_version: row.plan_version,
            plan_total_creditos: row.total_creditos,
            plan_semestres_sugeridos: row.semestres_sugeridos,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MateriaPayload {
    pub codigo: String,
    pub nombre: String,
    pub creditos: i64,
    pub tipo: String,
    pub plan_estudio_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUploadIngesta {
    pub plan_id: i64,
    #[serde(default)]
    pub materias_input: i64,
    #[serde(default)]
    pub added: i64,
    #[serde(default)]
    pub updated: i64,
    #[serde(default)]
    pub unchanged: i64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUploadResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub action: String,
    pub archivo_id: i64,
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
    #[serde(default)]
    pub ingesta: Option<PlanUploadIngesta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstructuraResumen {
    #[serde(default)]
    pub alumnos_upsert: i64,
    #[serde(default)]
    pub planes_upsert: i64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// DTO crudo de `/admin/users`; `rolId`/`rol` llegan en null cuando el
/// usuario no tiene rol asignado.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub profesor_id: i64,
    pub usuario_id: i64,
    pub nombre: String,
    pub email: String,
    pub num_empleado: i64,
    #[serde(default)]
    pub rol_id: Option<i64>,
    #[serde(default)]
    pub rol: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub profesor_id: i64,
    pub usuario_id: i64,
    pub nombre: String,
    pub email: String,
    pub num_empleado: i64,
    pub rol_id: i64,
    pub rol: String,
}

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            profesor_id: dto.profesor_id,
            usuario_id: dto.usuario_id,
            nombre: dto.nombre,
            email: dto.email,
            num_empleado: dto.num_empleado,
            // 0 / "" = sin rol asignado
            rol_id: dto.rol_id.unwrap_or(0),
            rol: dto.rol.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfesorRequest {
    pub nombre_completo: String,
    pub correo: String,
    pub num_empleado: i64,
    pub rol_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfesorRequest {
    pub usuario_id: i64,
    pub nombre_completo: String,
    pub correo: String,
    pub num_empleado: i64,
    pub rol_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "INVALID_RESPONSE".to_string(),
        }
    }
}
