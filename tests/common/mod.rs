//! Stub Discord API and CDN for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use emojibox::application::EmojiPipeline;
use emojibox::infrastructure::{DiscordClient, DiskEmojiCache, GifsicleResizer, ImageNormalizer};

pub const TOKEN: &str = "tok";

pub struct StubDiscord {
    pub accept_login: bool,
    pub login_response: Value,
    pub guilds: Vec<Value>,
    pub emojis: HashMap<String, String>,
    pub images: HashMap<String, Vec<u8>>,
    pub login_requests: Mutex<Vec<Value>>,
    pub authorizations: Mutex<Vec<String>>,
    pub cdn_requests: Mutex<Vec<String>>,
}

impl StubDiscord {
    pub fn new() -> Self {
        Self {
            accept_login: true,
            login_response: json!({ "token": TOKEN, "user_id": "42" }),
            guilds: Vec::new(),
            emojis: HashMap::new(),
            images: HashMap::new(),
            login_requests: Mutex::new(Vec::new()),
            authorizations: Mutex::new(Vec::new()),
            cdn_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_login(mut self) -> Self {
        self.accept_login = false;
        self
    }

    pub fn with_login_response(mut self, body: Value) -> Self {
        self.login_response = body;
        self
    }

    pub fn with_guild(mut self, id: &str, name: &str, emojis: Value) -> Self {
        self.guilds.push(json!({ "id": id, "name": name }));
        self.emojis.insert(id.to_string(), emojis.to_string());
        self
    }

    pub fn with_raw_emojis(mut self, guild_id: &str, body: &str) -> Self {
        self.emojis.insert(guild_id.to_string(), body.to_string());
        self
    }

    pub fn with_image(mut self, file_name: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(file_name.to_string(), bytes);
        self
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let ok = value == TOKEN;
        self.authorizations.lock().push(value);
        ok
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "401: Unauthorized", "code": 0 })),
    )
        .into_response()
}

async fn login(State(stub): State<Arc<StubDiscord>>, Json(body): Json<Value>) -> Response {
    stub.login_requests.lock().push(body);
    if !stub.accept_login {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid Form Body", "code": 50035 })),
        )
            .into_response();
    }
    Json(stub.login_response.clone()).into_response()
}

async fn guilds(State(stub): State<Arc<StubDiscord>>, headers: HeaderMap) -> Response {
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    Json(Value::Array(stub.guilds.clone())).into_response()
}

async fn emojis(
    State(stub): State<Arc<StubDiscord>>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    let body = stub.emojis.get(&id).cloned().unwrap_or_else(|| "[]".to_string());
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn cdn(State(stub): State<Arc<StubDiscord>>, UrlPath(file): UrlPath<String>) -> Response {
    stub.cdn_requests.lock().push(file.clone());
    match stub.images.get(&file) {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "404: Not Found").into_response(),
    }
}

pub async fn start_server(stub: StubDiscord) -> (SocketAddr, Arc<StubDiscord>) {
    let stub = Arc::new(stub);
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users/@me/guilds", get(guilds))
        .route("/api/guilds/{id}/emojis", get(emojis))
        .route("/cdn/{file}", get(cdn))
        .with_state(stub.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, stub)
}

pub fn client(addr: SocketAddr) -> DiscordClient {
    DiscordClient::with_endpoints(
        format!("http://{addr}/api"),
        format!("http://{addr}/cdn"),
        Duration::from_secs(5),
    )
    .unwrap()
}

pub async fn pipeline(addr: SocketAddr, cache_dir: &Path) -> EmojiPipeline {
    let client = Arc::new(client(addr));
    let cache = Arc::new(DiskEmojiCache::new(cache_dir.to_path_buf()).await.unwrap());
    let normalizer = Arc::new(ImageNormalizer::new(50, Arc::new(GifsicleResizer::default())));
    EmojiPipeline::new(client.clone(), client, cache, normalizer)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn cache_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}
