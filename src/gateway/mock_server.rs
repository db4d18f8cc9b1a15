use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Sibling Services (tests only)
// ============================================================================
//
// An actix-web server on a random local port. Responses are configured per
// "METHOD /path" using the raw, still percent-encoded path; anything not
// configured answers 404. Every request is recorded in arrival order.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<String, (u16, Value)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

pub struct MockService {
    state: Arc<MockState>,
    addr: std::net::SocketAddr,
    _handle: ServerHandle,
}

impl MockService {
    /// Start on 127.0.0.1:0. Must be called from an actix runtime
    /// (`#[actix_web::test]`).
    pub fn start() -> Self {
        let state = Arc::new(MockState::default());
        let data = web::Data::from(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Failed to get local address");

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(handle))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            state,
            addr,
            _handle: handle,
        }
    }

    /// Base URL for this server (e.g. "http://127.0.0.1:12345")
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), (status, body));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let method = req.method().to_string();
    let path = req.path().to_string();

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        body: serde_json::from_slice(&body).ok(),
    });

    let configured = state
        .responses
        .lock()
        .unwrap()
        .get(&format!("{} {}", method, path))
        .cloned();

    match configured {
        Some((status, body)) => HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(body),
        None => HttpResponse::NotFound().json(serde_json::json!({"message": "not configured"})),
    }
}

/// A local URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);
    format!("http://{}", addr)
}
