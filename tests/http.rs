use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use predict_widget::{
    ClientConfig, HttpTransport, PredictionController, PredictionError, PredictionView,
    RenderedPrediction, SelectedFile,
};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

#[derive(Clone, Debug, PartialEq)]
struct Upload {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    size: usize,
}

type Uploads = Arc<Mutex<Vec<Upload>>>;

async fn predict(State(uploads): State<Uploads>, mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        let upload = Upload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            size: field.bytes().await.map(|b| b.len()).unwrap_or_default(),
        };
        let is_image = upload
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        uploads.lock().unwrap().push(upload);

        if !is_image {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Invalid file type. Please upload an image (JPG or PNG)." })),
            );
        }

        return (
            StatusCode::OK,
            Json(json!({
                "prediction": "Cat",
                "confidence": "98.50%",
                "details": {"Cat": 0.985, "Dog": 0.01, "Wild": 0.005}
            })),
        );
    }

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{"loc": ["body", "file"], "msg": "Field required"}] })),
    )
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
}

async fn gateway() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>")
}

async fn spawn_server() -> (SocketAddr, Uploads) {
    let uploads = Uploads::default();
    let app = Router::new()
        .route("/predict", post(predict))
        .route("/broken", post(broken))
        .route("/gateway", post(gateway))
        .with_state(uploads.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (addr, uploads)
}

/// Keeps what is currently visible, like a page would.
#[derive(Debug, Default)]
struct Screen {
    file_name: String,
    loading: bool,
    result: Option<RenderedPrediction>,
    error: Option<String>,
}

impl PredictionView for Screen {
    fn show_selected_name(&mut self, text: &str) {
        self.file_name = text.to_string();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_result(&mut self, result: &RenderedPrediction) {
        self.result = Some(result.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_results(&mut self) {
        self.result = None;
        self.error = None;
    }
}

fn controller(addr: SocketAddr, path: &str) -> PredictionController<HttpTransport, Screen> {
    let config = ClientConfig {
        path: path.to_string(),
        ..ClientConfig::new(addr.ip().to_string(), addr.port())
    };
    PredictionController::new(HttpTransport::new(&config).unwrap(), Screen::default())
}

fn kitten() -> SelectedFile {
    SelectedFile::new("kitten.jpg", vec![0xff, 0xd8, 0xff, 0xe0])
}

#[tokio::test]
async fn uploads_file_and_renders_result() {
    let (addr, uploads) = spawn_server().await;
    let controller = controller(addr, "/predict");
    controller.select_files(vec![kitten()]);

    controller.trigger_prediction().await.unwrap();

    assert_eq!(
        uploads.lock().unwrap().as_slice(),
        [Upload {
            field: "file".into(),
            file_name: Some("kitten.jpg".into()),
            content_type: Some("image/jpeg".into()),
            size: 4,
        }]
    );

    let screen = controller.view();
    assert_eq!(screen.file_name, "✅ Selected: kitten.jpg");
    assert!(!screen.loading);
    assert_eq!(screen.error, None);
    let result = screen.result.as_ref().unwrap();
    assert_eq!(result.headline, "Cat 🐱");
    assert_eq!(result.confidence, "98.50%");
    let rows: Vec<_> = result
        .rows
        .iter()
        .map(|r| (r.label.as_str(), r.percentage.as_str()))
        .collect();
    assert_eq!(
        rows,
        [("Cat 🐱", "98.50%"), ("Dog 🐶", "1.00%"), ("Wild Animal 🐻", "0.50%")]
    );
}

#[tokio::test]
async fn rejected_upload_shows_server_detail() {
    let (addr, _) = spawn_server().await;
    let controller = controller(addr, "/predict");
    controller.select_files(vec![SelectedFile::new("notes.txt", b"hello".to_vec())]);

    let err = controller.trigger_prediction().await.unwrap_err();

    assert!(matches!(err, PredictionError::Server(_)));
    let screen = controller.view();
    assert_eq!(
        screen.error.as_deref(),
        Some("Invalid file type. Please upload an image (JPG or PNG).")
    );
    assert!(!screen.loading);
}

#[tokio::test]
async fn new_attempt_hides_previous_result() {
    let (addr, _) = spawn_server().await;
    let controller = controller(addr, "/predict");
    controller.select_files(vec![kitten()]);
    controller.trigger_prediction().await.unwrap();

    controller.select_files(vec![SelectedFile::new("notes.txt", b"hello".to_vec())]);
    controller.trigger_prediction().await.unwrap_err();

    let screen = controller.view();
    assert_eq!(screen.file_name, "✅ Selected: notes.txt");
    assert!(screen.result.is_none());
    assert!(screen.error.is_some());
}

#[tokio::test]
async fn missing_detail_falls_back() {
    let (addr, _) = spawn_server().await;
    let controller = controller(addr, "/broken");
    controller.select_files(vec![kitten()]);

    controller.trigger_prediction().await.unwrap_err();

    assert_eq!(controller.view().error.as_deref(), Some("Server Error."));
}

#[tokio::test]
async fn non_json_body_is_a_connection_failure() {
    let (addr, _) = spawn_server().await;
    let controller = controller(addr, "/gateway");
    controller.select_files(vec![kitten()]);

    let err = controller.trigger_prediction().await.unwrap_err();

    assert!(matches!(err, PredictionError::Transport(_)));
    assert_eq!(
        controller.view().error.as_deref(),
        Some("Connection failed. Ensure the server is running.")
    );
}

#[tokio::test]
async fn closed_port_is_a_connection_failure() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let controller = controller(addr, "/predict");
    controller.select_files(vec![kitten()]);

    let err = controller.trigger_prediction().await.unwrap_err();

    assert!(matches!(err, PredictionError::Transport(_)));
    let screen = controller.view();
    assert_eq!(
        screen.error.as_deref(),
        Some("Connection failed. Ensure the server is running.")
    );
    assert!(!screen.loading);
}

#[tokio::test]
async fn no_selection_never_reaches_the_server() {
    let (addr, uploads) = spawn_server().await;
    let controller = controller(addr, "/predict");

    let err = controller.trigger_prediction().await.unwrap_err();

    assert!(matches!(err, PredictionError::NoFileSelected));
    assert!(uploads.lock().unwrap().is_empty());
    assert_eq!(
        controller.view().error.as_deref(),
        Some("Please select an image first!")
    );
}
