//! Upload API integration tests.
//!
//! Run with: `cargo test -p intake-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_test_jpeg, create_test_xlsx, file_form, XLSX_MIME};
use helpers::{setup_test_app, TEST_MAX_UPLOAD_MB};
use intake_core::FileKind;
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_xlsx_returns_preview() {
    let app = setup_test_app().await;
    let data = create_test_xlsx(2);

    let response = app
        .client()
        .post("/upload/excel")
        .multipart(file_form(data.clone(), "report.xlsx", XLSX_MIME))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["filename"], "report.xlsx");
    assert_eq!(body["type"], "excel");
    assert_eq!(body["mime"], XLSX_MIME);
    assert!(body["saved_to"].as_str().unwrap().ends_with("report.xlsx"));
    assert_eq!(
        body["preview_data"],
        json!([["name", "qty"], ["item1", 1], ["item2", 2]])
    );
    assert!(body.get("warning").is_none());

    let expected_kb = ((data.len() as f64 / 1024.0) * 100.0).round() / 100.0;
    assert_eq!(body["size_kb"].as_f64().unwrap(), expected_kb);

    let records = app.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, body["id"].as_i64().unwrap());
    assert_eq!(records[0].file_type, FileKind::Spreadsheet);
}

#[tokio::test]
async fn test_preview_is_limited_to_five_rows() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/excel")
        .multipart(file_form(create_test_xlsx(50), "long.xlsx", XLSX_MIME))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let rows = body["preview_data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4], json!(["item4", 4]));
}

#[tokio::test]
async fn test_upload_image_has_no_preview_key() {
    let app = setup_test_app().await;
    let data = create_test_jpeg(500 * 1024);

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(data.clone(), "photo.jpg", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["type"], "image");
    assert_eq!(body["size_kb"].as_f64().unwrap(), 500.0);
    assert!(body.get("preview_data").is_none());

    let stored = std::fs::read(app.dir(FileKind::Image).join("photo.jpg")).unwrap();
    assert_eq!(stored, data);
}

#[tokio::test]
async fn test_upload_video_accepts_any_video_mime() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/video")
        .multipart(file_form(b"frames".to_vec(), "clip.mkv", "video/webm"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["mime"], "video/webm");
    assert_eq!(app.files(FileKind::Video), vec!["clip.mkv"]);
}

#[tokio::test]
async fn test_filename_is_lowercased() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(64), "Holiday.JPEG", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["filename"], "holiday.jpeg");
    assert_eq!(app.files(FileKind::Image), vec!["holiday.jpeg"]);
}

#[tokio::test]
async fn test_invalid_extension_is_rejected_without_side_effects() {
    let app = setup_test_app().await;

    let cases = [
        ("/upload/excel", "data.csv", "text/csv"),
        ("/upload/image", "notes.txt", "image/png"),
        ("/upload/video", "clip.webm", "video/webm"),
        ("/upload/image", "README", "image/png"),
    ];

    for (path, filename, mime) in cases {
        let response = app
            .client()
            .post(path)
            .multipart(file_form(b"payload".to_vec(), filename, mime))
            .await;

        assert_eq!(response.status_code(), 400, "{path} {filename}");
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_EXTENSION");
    }

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(b"payload".to_vec(), "notes.txt", "image/png"))
        .await;
    assert_eq!(
        response.json::<Value>()["error"],
        "File extension .txt not allowed for type image"
    );

    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_invalid_mime_is_rejected_without_side_effects() {
    let app = setup_test_app().await;

    let cases = [
        ("/upload/excel", "report.xlsx", "text/csv"),
        ("/upload/image", "photo.png", "image/gif"),
        ("/upload/video", "clip.mp4", "application/octet-stream"),
    ];

    for (path, filename, mime) in cases {
        let response = app
            .client()
            .post(path)
            .multipart(file_form(b"payload".to_vec(), filename, mime))
            .await;

        assert_eq!(response.status_code(), 400, "{path} {mime}");
        assert_eq!(response.json::<Value>()["code"], "INVALID_CONTENT_TYPE");
    }

    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_file_over_limit_is_rejected() {
    let app = setup_test_app().await;
    let limit = (TEST_MAX_UPLOAD_MB * 1024 * 1024) as usize;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(limit + 1), "big.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "FILE_TOO_LARGE");
    assert_eq!(
        body["error"],
        "File exceeds maximum allowed size of 1 MB for type image"
    );
    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_file_at_limit_is_accepted() {
    let app = setup_test_app().await;
    let limit = (TEST_MAX_UPLOAD_MB * 1024 * 1024) as usize;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(limit), "exact.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["size_kb"].as_f64().unwrap(), 1024.0);
}

#[tokio::test]
async fn test_body_far_over_limit_is_too_large() {
    let app = setup_test_app().await;
    let limit = (TEST_MAX_UPLOAD_MB * 1024 * 1024) as usize;

    for (path, filename, mime) in [
        ("/upload/video", "huge.mp4", "video/mp4"),
        ("/upload/image", "huge.png", "image/png"),
    ] {
        let response = app
            .client()
            .post(path)
            .multipart(file_form(vec![0u8; limit * 3], filename, mime))
            .await;

        assert_eq!(response.status_code(), 400, "{path}");
        let body: Value = response.json();
        assert_eq!(body["code"], "FILE_TOO_LARGE", "{path}");
    }

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(vec![0u8; limit * 2], "big.png", "image/png"))
        .await;
    assert_eq!(
        response.json::<Value>()["error"],
        "File exceeds maximum allowed size of 1 MB for type image"
    );

    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_empty_file_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(Vec::new(), "blank.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "EMPTY_FILE");
    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_duplicate_upload_overwrites_file_and_adds_row() {
    let app = setup_test_app().await;

    let first = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(100), "photo.jpg", "image/jpeg"))
        .await;
    let second_data = create_test_jpeg(300);
    let second = app
        .client()
        .post("/upload/image")
        .multipart(file_form(second_data.clone(), "photo.jpg", "image/jpeg"))
        .await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);

    let first_id = first.json::<Value>()["id"].as_i64().unwrap();
    let second_id = second.json::<Value>()["id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);

    let records = app.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].saved_path, records[1].saved_path);

    assert_eq!(app.files(FileKind::Image), vec!["photo.jpg"]);
    let stored = std::fs::read(app.dir(FileKind::Image).join("photo.jpg")).unwrap();
    assert_eq!(stored, second_data);
}

#[tokio::test]
async fn test_malformed_spreadsheet_is_stored_with_warning() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/excel")
        .multipart(file_form(
            b"definitely not a workbook".to_vec(),
            "broken.xlsx",
            XLSX_MIME,
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["preview_data"], Value::Null);
    assert!(body.get("preview_data").is_some());
    assert!(body["warning"].as_str().is_some());
    assert_eq!(app.records().len(), 1);
    assert_eq!(app.files(FileKind::Spreadsheet), vec!["broken.xlsx"]);
}

#[tokio::test]
async fn test_metadata_failure_leaves_no_file() {
    let app = setup_test_app().await;
    app.metadata.set_failing(true);

    let response = app
        .client()
        .post("/upload/video")
        .multipart(file_form(b"frames".to_vec(), "clip.mp4", "video/mp4"))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert!(body.get("details").is_none());
    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_generic_route_matches_aliases() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(64), "a.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .client()
        .post("/upload/excel")
        .multipart(file_form(create_test_xlsx(1), "b.xls", "application/vnd.ms-excel"))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .client()
        .post("/upload/video")
        .multipart(file_form(b"frames".to_vec(), "c.mov", "video/quicktime"))
        .await;
    assert_eq!(response.status_code(), 200);

    assert_eq!(app.files(FileKind::Image), vec!["a.png"]);
    assert_eq!(app.files(FileKind::Spreadsheet), vec!["b.xls"]);
    assert_eq!(app.files(FileKind::Video), vec!["c.mov"]);
}

#[tokio::test]
async fn test_unknown_kind_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/audio")
        .multipart(file_form(b"noise".to_vec(), "song.mp3", "audio/mpeg"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_KIND");
    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_missing_file_field_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("description", "no file here")
        .add_part(
            "attachment",
            Part::bytes(b"payload".to_vec())
                .file_name("photo.png")
                .mime_type("image/png"),
        );
    let response = app.client().post("/upload/image").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.is_untouched());
}

#[tokio::test]
async fn test_other_fields_before_file_are_skipped() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("description", "holiday")
        .add_part(
            "file",
            Part::bytes(create_test_jpeg(64))
                .file_name("beach.png")
                .mime_type("image/png"),
        );
    let response = app.client().post("/upload/image").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.files(FileKind::Image), vec!["beach.png"]);
}

#[tokio::test]
async fn test_path_components_are_stripped_from_filename() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(
            create_test_jpeg(64),
            "../../etc/cover.png",
            "image/png",
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["filename"], "cover.png");
    assert_eq!(app.files(FileKind::Image), vec!["cover.png"]);
}

#[tokio::test]
async fn test_longest_allowed_filename_is_stored() {
    let app = setup_test_app().await;
    let filename = format!("{}.png", "a".repeat(251));

    let response = app
        .client()
        .post("/upload/image")
        .multipart(file_form(create_test_jpeg(64), &filename, "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["filename"], filename.as_str());
    assert_eq!(app.files(FileKind::Image), vec![filename]);
}
