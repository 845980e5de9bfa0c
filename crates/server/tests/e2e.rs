use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use server::startup::{build_app, connect_and_migrate};

struct TestApp {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_and_migrate(&cfg).await?;
    let app = build_app(db, true).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move { let _ = rx.await; };
        if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, stop: Some(tx) })
}

#[tokio::test]
async fn e2e_public_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));

    let res = client.get(&app.base_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_peak_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let peaks = format!("{}/peaks/", app.base_url);

    let res = client
        .get(&peaks)
        .query(&[("min_lat", "45"), ("max_lat", "78"), ("min_lon", "5"), ("max_lon", "7")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let found: Value = res.json().await?;
    assert_eq!(found[0]["name"], "Mont Blanc");
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let res = client
        .post(&peaks)
        .json(&json!({"name": "Aoraki", "latitude": -43.595, "longitude": 170.142, "altitude": 3724}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().unwrap_or_default();
    assert_eq!(id, 7);

    let res = client.patch(format!("{peaks}{id}")).json(&json!({"altitude": 3754})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let patched: Value = res.json().await?;
    assert_eq!(patched["altitude"], 3754);
    assert_eq!(patched["name"], "Aoraki");

    let res = client.delete(format!("{peaks}{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = client.get(format!("{peaks}{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"detail": "Peak not found"}));
    Ok(())
}
