//! Startup behavior against a real listener.

use std::time::Duration;

use tokio::net::TcpListener;

use api_server::config::{AppConfig, DeployMode};
use api_server::http::{default_api_router, HttpServer};

async fn spawn_server(config: AppConfig) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, default_api_router()).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

async fn get(url: &str) -> reqwest::Response {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    for _ in 0..20 {
        match client.get(url).send().await {
            Ok(response) => return response,
            Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    }
    panic!("server did not come up at {url}");
}

#[tokio::test]
async fn test_health_over_real_listener() {
    let addr = spawn_server(AppConfig {
        mode: DeployMode::Test,
        ..AppConfig::default()
    })
    .await;

    let response = get(&format!("http://{addr}/health")).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_api_fallback_returns_json_404() {
    let addr = spawn_server(AppConfig {
        mode: DeployMode::Test,
        ..AppConfig::default()
    })
    .await;

    let response = get(&format!("http://{addr}/api/does-not-exist")).await;
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn test_bind_fails_when_port_taken() {
    let holder = TcpListener::bind("0.0.0.0:0").await.unwrap();
    let port = holder.local_addr().unwrap().port();

    let config = AppConfig {
        port,
        ..AppConfig::default()
    };
    assert!(HttpServer::bind(&config).await.is_err());
}
