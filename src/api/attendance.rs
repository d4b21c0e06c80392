use std::sync::Mutex;

use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::config::Config;
use crate::csv::CsvError;
use crate::store::{RecordStore, StoreError};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct AddAttendance {
    #[schema(example = "101", value_type = String)]
    pub employee_id: String,
    #[schema(example = "Jane Doe", value_type = String)]
    pub employee_name: String,
    #[schema(example = "Present", value_type = String)]
    pub status: String,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "Absent", value_type = String)]
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceRow {
    #[schema(example = "101")]
    pub employee_id: String,
    #[schema(example = "Jane Doe")]
    pub employee_name: String,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    #[schema(
        example = json!([{
            "employee_id": "101",
            "employee_name": "Jane Doe",
            "status": "Present"
        }])
    )]
    pub data: Vec<AttendanceRow>,
    #[schema(example = 1)]
    pub total: usize,
}

type SharedStore = web::Data<Mutex<RecordStore>>;

fn lock_store(store: &SharedStore) -> actix_web::Result<std::sync::MutexGuard<'_, RecordStore>> {
    store.lock().map_err(|e| {
        error!(error = %e, "Record store mutex poisoned");
        ErrorInternalServerError("Internal Server Error")
    })
}

fn store_error_response(e: StoreError) -> HttpResponse {
    let body = json!({ "message": e.to_string() });
    match e {
        StoreError::DuplicateId => HttpResponse::Conflict().json(body),
        StoreError::NotFound => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Add a new attendance record
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AddAttendance,
    responses(
        (status = 200, description = "Attendance record added", body = Object, example = json!({
            "message": "Attendance record added successfully"
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "employee id must contain only digits"
        })),
        (status = 409, description = "Duplicate employee id", body = Object, example = json!({
            "message": "an attendance record for this employee id already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn add_record(
    store: SharedStore,
    payload: web::Json<AddAttendance>,
) -> actix_web::Result<impl Responder> {
    let mut store = lock_store(&store)?;

    match store.add(&payload.employee_id, &payload.employee_name, &payload.status) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "message": "Attendance record added successfully"
        }))),
        Err(e) => Ok(store_error_response(e)),
    }
}

/// Update the status of an existing record
#[utoipa::path(
    put,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance record updated", body = Object, example = json!({
            "message": "Attendance record updated successfully"
        })),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee ID not found", body = Object, example = json!({
            "message": "employee id not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_status(
    store: SharedStore,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendance>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let mut store = lock_store(&store)?;

    match store.update_status(&employee_id, &payload.status) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "message": "Attendance record updated successfully"
        }))),
        Err(e) => Ok(store_error_response(e)),
    }
}

/// List all attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All records in insertion order", body = AttendanceListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_records(store: SharedStore) -> actix_web::Result<impl Responder> {
    let store = lock_store(&store)?;

    let data: Vec<AttendanceRow> = store
        .render()
        .into_iter()
        .map(|(employee_id, employee_name, status)| AttendanceRow {
            employee_id,
            employee_name,
            status,
        })
        .collect();
    let total = data.len();

    Ok(HttpResponse::Ok().json(AttendanceListResponse { data, total }))
}

/// Persist all records to the configured CSV file
#[utoipa::path(
    post,
    path = "/api/attendance/save",
    responses(
        (status = 200, description = "Data saved", body = Object, example = json!({
            "message": "Data saved successfully", "saved": 3
        })),
        (status = 500, description = "Write failed")
    ),
    tag = "Attendance"
)]
pub async fn save_records(store: SharedStore, config: web::Data<Config>) -> actix_web::Result<impl Responder> {
    let store = lock_store(&store)?;

    match store.save_to(&config.data_file) {
        Ok(()) => {
            info!(path = %config.data_file.display(), records = store.len(), "Saved attendance data");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Data saved successfully",
                "saved": store.len()
            })))
        }
        Err(e) => {
            error!(error = %e, path = %config.data_file.display(), "Failed to save attendance data");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Failed to save attendance data"
            })))
        }
    }
}

/// Replace all records with the contents of the configured CSV file
#[utoipa::path(
    post,
    path = "/api/attendance/load",
    responses(
        (status = 200, description = "Data loaded", body = Object, example = json!({
            "message": "Data loaded successfully", "loaded": 3
        })),
        (status = 400, description = "File contents rejected", body = Object, example = json!({
            "message": "line 2: expected 3 comma-separated fields"
        })),
        (status = 404, description = "Data file does not exist", body = Object, example = json!({
            "message": "The file does not exist"
        })),
        (status = 500, description = "Read failed")
    ),
    tag = "Attendance"
)]
pub async fn load_records(store: SharedStore, config: web::Data<Config>) -> actix_web::Result<impl Responder> {
    let mut store = lock_store(&store)?;

    match store.load_from(&config.data_file) {
        Ok(()) => {
            info!(path = %config.data_file.display(), records = store.len(), "Loaded attendance data");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Data loaded successfully",
                "loaded": store.len()
            })))
        }
        Err(CsvError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(HttpResponse::NotFound().json(json!({
                "message": "The file does not exist"
            })))
        }
        Err(e @ (CsvError::MalformedLine { .. } | CsvError::InvalidRecord { .. })) => {
            Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })))
        }
        Err(e) => {
            error!(error = %e, path = %config.data_file.display(), "Failed to load attendance data");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Failed to load attendance data"
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use actix_web::{App, http::StatusCode, test, web::Data};
    use std::path::PathBuf;

    fn test_config(data_file: PathBuf) -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            data_file,
            api_prefix: "/api".to_string(),
        }
    }

    macro_rules! spawn_app {
        ($store:expr, $config:expr) => {{
            let config: Config = $config;
            test::init_service(
                App::new()
                    .app_data($store)
                    .app_data(Data::new(config.clone()))
                    .configure(|cfg| routes::configure(cfg, config)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn add_then_list() {
        let store = Data::new(Mutex::new(RecordStore::new()));
        let app = spawn_app!(store, test_config(PathBuf::from("unused.csv")));

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(AddAttendance {
                employee_id: "101".to_string(),
                employee_name: "Jane Doe".to_string(),
                status: "Present".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/attendance").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["employee_id"], "101");
        assert_eq!(body["data"][0]["status"], "Present");
    }

    #[actix_web::test]
    async fn duplicate_add_is_conflict() {
        let store = Data::new(Mutex::new(RecordStore::new()));
        store
            .lock()
            .unwrap()
            .add("101", "Jane Doe", "Present")
            .unwrap();
        let app = spawn_app!(store, test_config(PathBuf::from("unused.csv")));

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(AddAttendance {
                employee_id: "101".to_string(),
                employee_name: "Jane Again".to_string(),
                status: "Absent".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn invalid_id_is_bad_request() {
        let store = Data::new(Mutex::new(RecordStore::new()));
        let app = spawn_app!(store, test_config(PathBuf::from("unused.csv")));

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(AddAttendance {
                employee_id: "12a".to_string(),
                employee_name: "X".to_string(),
                status: "Present".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_unknown_id_is_not_found() {
        let store = Data::new(Mutex::new(RecordStore::new()));
        let app = spawn_app!(store, test_config(PathBuf::from("unused.csv")));

        let req = test::TestRequest::put()
            .uri("/api/attendance/999")
            .set_json(UpdateAttendance {
                status: "Present".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn save_then_load_round_trips_through_the_api() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().join("attendance.csv"));

        let store = Data::new(Mutex::new(RecordStore::new()));
        {
            let mut guard = store.lock().unwrap();
            guard.add("101", "Jane Doe", "Present").unwrap();
            guard.add("102", "John Smith", "On Leave").unwrap();
        }
        let app = spawn_app!(store.clone(), config.clone());

        let req = test::TestRequest::post()
            .uri("/api/attendance/save")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        store.lock().unwrap().replace_all(Vec::new());

        let req = test::TestRequest::post()
            .uri("/api/attendance/load")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["loaded"], 2);
        assert_eq!(store.lock().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn load_missing_file_is_not_found_and_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().join("missing.csv"));

        let store = Data::new(Mutex::new(RecordStore::new()));
        store
            .lock()
            .unwrap()
            .add("101", "Jane Doe", "Present")
            .unwrap();
        let app = spawn_app!(store.clone(), config);

        let req = test::TestRequest::post()
            .uri("/api/attendance/load")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.lock().unwrap().len(), 1);
    }
}
