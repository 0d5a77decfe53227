use crate::api::{
    ApiClient, ApiError, CreateProfesorRequest, Role, UpdateProfesorRequest, UserRecord,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct UsuariosRepository {
    client: Rc<ApiClient>,
}

impl Default for UsuariosRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UsuariosRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_usuarios(&self) -> Result<Vec<UserRecord>, ApiError> {
        let dtos = self.client.usuarios().await?;
        Ok(dtos.into_iter().map(UserRecord::from).collect())
    }

    pub async fn fetch_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.client.roles().await
    }

    pub async fn cambiar_rol(&self, usuario_id: i64, rol_id: i64) -> Result<(), ApiError> {
        self.client.actualizar_rol(usuario_id, rol_id).await
    }

    pub async fn eliminar(&self, usuario_id: i64) -> Result<(), ApiError> {
        self.client.eliminar_usuario(usuario_id).await
    }

    pub async fn crear(&self, request: CreateProfesorRequest) -> Result<UserRecord, ApiError> {
        let dto = self.client.crear_profesor(request).await?;
        Ok(dto.into())
    }

    pub async fn actualizar(
        &self,
        profesor_id: i64,
        request: UpdateProfesorRequest,
    ) -> Result<UserRecord, ApiError> {
        let dto = self.client.actualizar_profesor(profesor_id, request).await?;
        Ok(dto.into())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn repo_for(server: &MockServer) -> UsuariosRepository {
        UsuariosRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.base_url(),
        )))
    }

    #[tokio::test]
    async fn create_sends_camel_case_payload() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/admin/users").json_body(json!({
                "nombreCompleto": "Mario Soto",
                "correo": "mario@unison.mx",
                "numEmpleado": 5120,
                "rolId": 2
            }));
            then.status(201).json_body(json!({
                "id": 31,
                "profesorId": 31,
                "usuarioId": 77,
                "nombre": "Mario Soto",
                "email": "mario@unison.mx",
                "numEmpleado": 5120,
                "rolId": 2,
                "rol": "COORDINADOR"
            }));
        });

        let created = repo_for(&server)
            .crear(CreateProfesorRequest {
                nombre_completo: "Mario Soto".into(),
                correo: "mario@unison.mx".into(),
                num_empleado: 5120,
                rol_id: 2,
                password: None,
            })
            .await
            .unwrap();

        assert_eq!(created.usuario_id, 77);
        assert_eq!(created.rol, "COORDINADOR");
        create.assert();
    }

    #[tokio::test]
    async fn update_targets_the_profesor_id() {
        let server = MockServer::start_async().await;
        let update = server.mock(|when, then| {
            when.method(PUT).path("/admin/users/31");
            then.status(200).json_body(json!({
                "id": 31,
                "profesorId": 31,
                "usuarioId": 77,
                "nombre": "Mario Soto Lugo",
                "email": "mario@unison.mx",
                "numEmpleado": 5120,
                "rolId": 3,
                "rol": "ADMINISTRADOR"
            }));
        });

        let updated = repo_for(&server)
            .actualizar(
                31,
                UpdateProfesorRequest {
                    usuario_id: 77,
                    nombre_completo: "Mario Soto Lugo".into(),
                    correo: "mario@unison.mx".into(),
                    num_empleado: 5120,
                    rol_id: 3,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.nombre, "Mario Soto Lugo");
        update.assert();
    }

    #[tokio::test]
    async fn delete_failure_surfaces_the_backend_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/admin/users/77");
            then.status(409)
                .json_body(json!({"error": "El usuario tiene registros asociados"}));
        });

        let err = repo_for(&server).eliminar(77).await.unwrap_err();
        assert_eq!(err.error, "El usuario tiene registros asociados");
    }
}
