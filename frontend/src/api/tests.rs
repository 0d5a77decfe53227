use super::client::{ApiClient, StagedFile};
use super::types::*;
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.base_url())
}

#[tokio::test]
async fn login_returns_user_profile() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({"email": "ana@unison.mx", "password": "secreta"}));
        then.status(200).json_body(json!({
            "message": "Bienvenida",
            "user": {
                "id": 7,
                "profesorId": 12,
                "email": "ana@unison.mx",
                "nombre": "Ana Morales",
                "roles": ["Profesor"],
                "appRoles": ["ADMINISTRADOR"]
            }
        }));
    });

    let response = client_for(&server)
        .login(LoginRequest {
            email: "ana@unison.mx".into(),
            password: "secreta".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.email, "ana@unison.mx");
    assert_eq!(response.user.app_roles, vec!["ADMINISTRADOR"]);
}

#[tokio::test]
async fn login_surfaces_backend_error_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401)
            .json_body(json!({"error": "Credenciales inválidas"}));
    });

    let err = client_for(&server)
        .login(LoginRequest {
            email: "ana@unison.mx".into(),
            password: "mala".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.error, "Credenciales inválidas");
}

#[tokio::test]
async fn asistencia_resumen_unwraps_items_envelope() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/asistencia/resumen")
            .query_param("periodo", "2025-1");
        then.status(200).json_body(json!({
            "ok": true,
            "items": [{
                "periodo": "2025-1",
                "codigo_materia": "MAT-101",
                "nombre_materia": "Cálculo I",
                "grupo": "A1",
                "matricula": "220045",
                "expediente": null,
                "nombre_alumno": "Diana",
                "apellido_paterno": "Ruiz",
                "apellido_materno": null,
                "fecha_alta": "2025-02-01T10:00:00Z",
                "fuente": "archivo",
                "archivo_id": 3,
                "nombre_archivo": "lista.xlsx",
                "fecha_archivo": "2025-02-01T09:00:00Z"
            }]
        }));
    });

    let records = client_for(&server)
        .asistencia_resumen(Some("2025-1"))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].matricula, "220045");
}

#[tokio::test]
async fn asistencia_resumen_rejects_not_ok_envelope() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/asistencia/resumen");
        then.status(200)
            .json_body(json!({"ok": false, "error": "vista no disponible"}));
    });

    let err = client_for(&server)
        .asistencia_resumen(None)
        .await
        .unwrap_err();

    assert_eq!(err.error, "vista no disponible");
}

#[tokio::test]
async fn crear_asistencia_normalizes_single_row_to_vec() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/asistencia");
        then.status(201).json_body(json!({
            "periodo": "2025-1",
            "codigo_materia": "MAT-101",
            "nombre_materia": "Cálculo I",
            "grupo": "A1",
            "matricula": "220050",
            "nombre_alumno": "Elsa",
            "apellido_paterno": "Paz",
            "fecha_alta": "2025-02-02T10:00:00Z",
            "fuente": "manual"
        }));
    });

    let rows = client_for(&server)
        .crear_asistencia(NewAttendance {
            periodo: "2025-1".into(),
            codigo_materia: "MAT-101".into(),
            nombre_materia: "Cálculo I".into(),
            grupo: "A1".into(),
            matricula: "220050".into(),
            nombre_alumno: "Elsa".into(),
            apellido_paterno: "Paz".into(),
            apellido_materno: None,
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].matricula, "220050");
}

#[tokio::test]
async fn subir_asistencia_returns_archivo_id() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/asistencia/upload")
            .body_contains("lista.xlsx");
        then.status(200).json_body(json!({"ok": true, "archivoId": 91}));
    });

    let archivo_id = client_for(&server)
        .subir_asistencia(StagedFile::new("lista.xlsx", vec![1, 2, 3]))
        .await
        .unwrap();

    assert_eq!(archivo_id, 91);
}

#[tokio::test]
async fn subir_asistencia_rejects_ack_without_archivo_id() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/asistencia/upload");
        then.status(200).json_body(json!({"ok": true}));
    });

    let err = client_for(&server)
        .subir_asistencia(StagedFile::new("lista.xlsx", vec![1]))
        .await
        .unwrap_err();

    assert!(err.error.contains("Respuesta inválida"));
}

#[tokio::test]
async fn procesar_asistencia_sends_periodo_etiqueta() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/asistencia/process/91")
            .json_body(json!({"periodoEtiqueta": "2025-1"}));
        then.status(200).json_body(json!({
            "ok": true,
            "resumen": {
                "periodoEtiqueta": "2025-1",
                "periodoId": 4,
                "grupoId": null,
                "alumnosVinculados": 30,
                "alumnosSinAlumno": 1,
                "alumnosSinGrupo": 0,
                "inscripcionesCreadas": 29,
                "warnings": ["fila 12 sin matrícula"]
            }
        }));
    });

    let resumen = client_for(&server)
        .procesar_asistencia(91, "2025-1")
        .await
        .unwrap();

    assert_eq!(resumen.periodo_etiqueta, "2025-1");
    assert_eq!(resumen.alumnos_vinculados, 30);
    assert_eq!(resumen.warnings.len(), 1);
}

#[tokio::test]
async fn subir_horarios_reports_both_archivo_ids() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/horarios/upload");
        then.status(200).json_body(json!({
            "ok": true,
            "archivoIdISI": 10,
            "archivoIdPrelistas": 11
        }));
    });

    let ack = client_for(&server)
        .subir_horarios(
            Some(StagedFile::new("isi.xlsx", vec![1])),
            Some(StagedFile::new("prelistas.xlsx", vec![2])),
        )
        .await
        .unwrap();

    assert_eq!(ack.archivo_id_isi, Some(10));
    assert_eq!(ack.archivo_id_prelistas, Some(11));
}

#[tokio::test]
async fn procesar_horarios_unwraps_resumen() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/horarios/process")
            .json_body(json!({"archivoIdISI": 10}));
        then.status(200).json_body(json!({
            "ok": true,
            "resumen": {"gruposUpsert": 12, "horariosUpsert": 48, "warnings": []}
        }));
    });

    let resumen = client_for(&server)
        .procesar_horarios(HorariosProcessRequest {
            archivo_id_isi: Some(10),
            archivo_id_prelistas: None,
        })
        .await
        .unwrap();

    assert_eq!(resumen.grupos_upsert, 12);
    assert_eq!(resumen.horarios_upsert, 48);
}

#[tokio::test]
async fn eliminar_horario_requires_ok_flag() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(DELETE).path("/horarios/5");
        then.status(200).json_body(json!({"ok": true}));
    });

    client_for(&server).eliminar_horario(5).await.unwrap();
}

#[tokio::test]
async fn plan_materias_maps_rows() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/plan/materias");
        then.status(200).json_body(json!({
            "ok": true,
            "items": [{
                "materia_id": 4,
                "codigo": "MAT-101",
                "nombre": "Cálculo I",
                "creditos": 8,
                "tipo": null,
                "plan_id": 2,
                "plan_nombre": "Ing. Sistemas",
                "plan_version": "2022",
                "total_creditos": 400,
                "semestres_sugeridos": 9
            }]
        }));
    });

    let rows = client_for(&server).plan_materias().await.unwrap();
    let record = PlanRecord::from(rows[0].clone());
    assert_eq!(record.tipo, "OBLIGATORIA");
    assert_eq!(record.plan_nombre, "Ing. Sistemas");
}

#[tokio::test]
async fn eliminar_plan_materia_surfaces_fk_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(DELETE).path("/plan/materias/4");
        then.status(409).json_body(json!({
            "error": "No se puede eliminar esta materia porque está asociada a grupos, kardex u otros registros."
        }));
    });

    let err = client_for(&server)
        .eliminar_plan_materia(4)
        .await
        .unwrap_err();

    assert!(err.error.contains("asociada a grupos"));
}

#[tokio::test]
async fn subir_plan_pdf_passes_debug_flag() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/plan/upload")
            .query_param("debug", "1");
        then.status(200).json_body(json!({
            "ok": true,
            "action": "created",
            "archivoId": 15,
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

    let response = client_for(&server)
        .subir_plan_pdf(StagedFile::new("plan.pdf", vec![1]), false, true, false)
        .await
        .unwrap();

    assert_eq!(response.archivo_id, 15);
    assert_eq!(response.ingesta.unwrap().added, 48);
}

#[tokio::test]
async fn procesar_estructura_unwraps_resumen() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/estructura/process/21");
        then.status(200).json_body(json!({
            "ok": true,
            "resumen": {"alumnosUpsert": 120, "planesUpsert": 3, "warnings": ["plan sin versión"]}
        }));
    });

    let resumen = client_for(&server).procesar_estructura(21).await.unwrap();
    assert_eq!(resumen.alumnos_upsert, 120);
    assert_eq!(resumen.planes_upsert, 3);
}

#[tokio::test]
async fn usuarios_returns_plain_array() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/admin/users");
        then.status(200).json_body(json!([{
            "id": 1,
            "profesorId": 1,
            "usuarioId": 10,
            "nombre": "Luis Soto",
            "email": "luis@unison.mx",
            "numEmpleado": 4821,
            "rolId": null,
            "rol": null
        }]));
    });

    let users = client_for(&server).usuarios().await.unwrap();
    let record = UserRecord::from(users[0].clone());
    assert_eq!(record.rol_id, 0);
    assert_eq!(record.rol, "");
}

#[tokio::test]
async fn actualizar_rol_sends_patch_body() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::PATCH)
            .path("/admin/users/10/role")
            .json_body(json!({"rolId": 2}));
        then.status(200).json_body(json!({"ok": true}));
    });

    client_for(&server).actualizar_rol(10, 2).await.unwrap();
    mock.assert();
}
