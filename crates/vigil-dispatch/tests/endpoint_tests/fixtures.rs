//! Provider doubles, a fixture upstream and request helpers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Query;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceExt;
use vigil_dispatch::weather::{ForecastDaily, ForecastHourly, ForecastResponse};
use vigil_dispatch::{
    Dispatcher, SERVICE_PATH, WeatherError, WeatherProvider, WeatherSeed, service_router,
};

/// Provider double returning a canned forecast or failing.
pub struct StubProvider {
    response: Option<ForecastResponse>,
    calls: AtomicUsize,
    last_seed: Mutex<Option<WeatherSeed>>,
}

impl StubProvider {
    pub fn ok(response: ForecastResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
            last_seed: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_seed: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_seed(&self) -> Option<WeatherSeed> {
        self.last_seed.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn forecast(&self, seed: &WeatherSeed) -> Result<ForecastResponse, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_seed.lock().unwrap() = Some(seed.clone());
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(WeatherError::Decode(
                serde_json::from_str::<ForecastResponse>("<html>").unwrap_err(),
            )),
        }
    }
}

/// Upstream forecast with `hours` hourly samples and one day.
pub fn forecast(hours: usize) -> ForecastResponse {
    ForecastResponse {
        hourly: ForecastHourly {
            time: (0..hours).map(|h| format!("2026-10-15T{h:02}:00")).collect(),
            temperature_2m: (0..hours).map(|h| 10.0 + h as f64 * 0.25).collect(),
            wind_speed_10m: (0..hours).map(|h| 5.0 + h as f64 * 0.5).collect(),
            wind_direction_10m: (0..hours).map(|h| (h * 10) as i32).collect(),
            relative_humidity_2m: (0..hours).map(|h| 60 + h as i32).collect(),
            weather_code: (0..hours).map(|h| (h % 4) as i32).collect(),
        },
        daily: ForecastDaily {
            time: vec!["2026-10-15".into()],
            sunrise: vec!["2026-10-15T05:21".into()],
            sunset: vec!["2026-10-15T16:08".into()],
        },
    }
}

pub fn router(provider: Arc<StubProvider>) -> Router {
    service_router(Dispatcher::new(provider))
}

/// Response status, content type and body text.
pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

pub async fn send(router: Router, method: &str, body: impl Into<Body>) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri(SERVICE_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn post(router: Router, body: &str) -> Reply {
    send(router, "POST", body.to_string()).await
}

/// Local stand-in for the forecast API.
pub struct Upstream {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Upstream {
    /// Serves `GET /v1/forecast` with a fixed status and body.
    pub async fn spawn(status: StatusCode, body: String) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        let app = Router::new().route(
            "/v1/forecast",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorder = Arc::clone(&recorder);
                let body = body.clone();
                async move {
                    recorder.lock().unwrap().push(params);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, seen }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1/forecast", self.addr)
    }

    /// Query strings received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.seen.lock().unwrap().clone()
    }
}
