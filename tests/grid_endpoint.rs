//! End-to-end probe runs against a mocked KMarket server.

use chrono::Utc;
use grid_probe::report::CONNECT_HINT;
use grid_probe::{GridClient, GridProbe, GridSource, ProbeConfig, ProbeOutcome};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn grid_body() -> Value {
    json!({
        "success": true,
        "data": {
            "symbol": "BTC",
            "currentPrice": 50000,
            "currentTime": 1700000000000i64,
            "intervalSec": 30,
            "update": false,
            "col1": [
                {
                    "expiryTime": 1700000030000i64,
                    "status": "open",
                    "priceRange": {"label": "49000-50000"},
                    "odds": 1.85,
                    "isWinning": null
                },
                {
                    "expiryTime": 1700000030000i64,
                    "status": "open",
                    "priceRange": {"label": "50000-51000"},
                    "odds": 2.4,
                    "isWinning": true
                }
            ],
            "col2": [],
            "col3": [],
            "col4": [],
            "col5": [],
            "col6": []
        },
        "timestamp": "2023-11-14T22:13:20.000Z"
    })
}

/// Setup mock grid endpoint
async fn setup_mock_grid(template: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/market/grid"))
        .respond_with(template)
        .mount(&mock_server)
        .await;

    mock_server
}

fn config_for(base_url: String) -> ProbeConfig {
    ProbeConfig {
        base_url,
        ..ProbeConfig::default()
    }
}

async fn run_against(config: &ProbeConfig) -> (ProbeOutcome, String) {
    let client = GridClient::new(config).unwrap();
    let probe = GridProbe::new(client);
    let mut out = Vec::new();
    let outcome = probe.run(&mut out, &Utc).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_fetch_sends_plain_get() {
    let server = setup_mock_grid(ResponseTemplate::new(200).set_body_json(grid_body())).await;
    let client = GridClient::new(&config_for(format!("{}/api", server.uri()))).unwrap();

    let response = client.fetch_grid().await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, grid_body());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_success_report() {
    let server = setup_mock_grid(ResponseTemplate::new(200).set_body_json(grid_body())).await;
    let (outcome, text) = run_against(&config_for(format!("{}/api", server.uri()))).await;

    assert_eq!(outcome, ProbeOutcome::Snapshot);
    assert!(text.contains("状态码: 200\n成功: true\n"));
    assert!(text.contains("  - Symbol: BTC\n"));
    assert!(text.contains("  - 当前价格: 50000\n"));
    assert!(text.contains("  - 列间隔: 30s\n"));
    assert!(text.contains("📦 COL1 (到期: 22:13:50, 状态: open):\n"));
    assert!(text.contains("    Row 1: 49000-50000  | 赔率:  1.85\n"));
    assert!(text.contains("    Row 2: 50000-51000  | 赔率:   2.4 🏆\n"));

    // 完整 JSON 保留服务端字段顺序
    let dump = serde_json::to_string_pretty(&grid_body()).unwrap();
    assert!(text.ends_with(&format!("{}\n", dump)));
    let success_at = text.rfind("\"success\"").unwrap();
    let timestamp_at = text.rfind("\"timestamp\"").unwrap();
    assert!(success_at < timestamp_at);
}

#[tokio::test]
async fn test_error_status_still_renders_envelope() {
    let body = json!({"success": false, "message": "grid unavailable", "error": "Service Unavailable"});
    let server = setup_mock_grid(ResponseTemplate::new(503).set_body_json(body)).await;
    let (outcome, text) = run_against(&config_for(format!("{}/api", server.uri()))).await;

    assert_eq!(outcome, ProbeOutcome::Rejected);
    assert!(text.ends_with("\n状态码: 503\n成功: false\n错误: grid unavailable\n"));
}

#[tokio::test]
async fn test_malformed_body() {
    let server =
        setup_mock_grid(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;
    let (outcome, text) = run_against(&config_for(format!("{}/api", server.uri()))).await;

    assert_eq!(outcome, ProbeOutcome::Failed);
    assert!(text.contains("❌ 错误: JSON 解析错误"));
    assert!(!text.contains(CONNECT_HINT));
}

#[tokio::test]
async fn test_server_not_running() {
    // 绑定后立即释放，得到一个无人监听的端口
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = config_for(format!("http://127.0.0.1:{}/api", port));

    let client = GridClient::new(&config).unwrap();
    let err = client.fetch_grid().await.unwrap_err();
    assert!(err.is_connect(), "{:?}", err);

    let (outcome, text) = run_against(&config).await;
    assert_eq!(outcome, ProbeOutcome::Failed);
    assert!(text.ends_with(&format!("{}\n", CONNECT_HINT)));
}

#[tokio::test]
async fn test_identical_responses_render_identically() {
    let server = setup_mock_grid(ResponseTemplate::new(200).set_body_json(grid_body())).await;
    let config = config_for(format!("{}/api", server.uri()));

    let (_, first) = run_against(&config).await;
    let (_, second) = run_against(&config).await;
    assert_eq!(first, second);
}
