use chrono::{Duration, Local};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    started: bool,
    day: Option<u16>,
    start_date: Option<String>,
    readings: Vec<String>,
    days_completed: usize,
    percent: u32,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    days_completed: usize,
    current_streak: u32,
    percent: u32,
    missed_days: Vec<u16>,
}

#[derive(Debug, Deserialize)]
struct SyncTokenResponse {
    token: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "reading_plan_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + std::time::Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(std::time::Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_reading_plan"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn reset(client: &Client, base_url: &str) {
    let response = client
        .post(format!("{base_url}/api/reset"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

/// Starts the plan so that today is the given day number.
async fn start_on_day(client: &Client, base_url: &str, today_day_num: i64) {
    let start_date = Local::now().date_naive() - Duration::days(today_day_num - 1);
    let response = client
        .post(format!("{base_url}/api/start"))
        .json(&serde_json::json!({ "start_date": start_date.to_string() }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

async fn complete_day(client: &Client, base_url: &str, day: u16) -> StatsResponse {
    client
        .post(format!("{base_url}/api/complete"))
        .json(&serde_json::json!({ "day": day }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn get_today(client: &Client, base_url: &str) -> TodayResponse {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn get_stats(client: &Client, base_url: &str) -> StatsResponse {
    client
        .get(format!("{base_url}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_start_makes_today_day_one() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;

    let today = get_today(&client, &server.base_url).await;
    assert!(today.started);
    assert_eq!(today.day, Some(1));
    assert!(!today.readings.is_empty());
    assert_eq!(today.days_completed, 0);
    assert_eq!(today.percent, 0);
}

#[tokio::test]
async fn http_complete_twice_stores_once() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;

    complete_day(&client, &server.base_url, 1).await;
    let stats = complete_day(&client, &server.base_url, 1).await;
    assert_eq!(stats.days_completed, 1);
}

#[tokio::test]
async fn http_streak_and_missed_days() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 5).await;
    for day in [1u16, 2, 3, 5] {
        complete_day(&client, &server.base_url, day).await;
    }

    let stats = get_stats(&client, &server.base_url).await;
    assert_eq!(stats.days_completed, 4);
    // Day 4 missing breaks continuity walking down from day 5.
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.missed_days, vec![4]);
    assert_eq!(stats.percent, 1);
}

#[tokio::test]
async fn http_sync_round_trip_restores_progress() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 10).await;
    for day in [1u16, 2, 3, 7] {
        complete_day(&client, &server.base_url, day).await;
    }
    let exported = get_today(&client, &server.base_url).await;

    let token: SyncTokenResponse = client
        .get(format!("{}/api/sync/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Wipe this "device", then import the link form of the token.
    reset(&client, &server.base_url).await;
    assert!(!get_today(&client, &server.base_url).await.started);

    let imported: TodayResponse = client
        .post(format!("{}/api/sync/import", server.base_url))
        .json(&serde_json::json!({ "token": format!("#sync={}", token.token) }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(imported.started);
    assert_eq!(imported.start_date, exported.start_date);
    assert_eq!(imported.days_completed, 4);
    // Import lands the cursor on today, day 10 of the restored plan.
    assert_eq!(imported.day, Some(10));
}

#[tokio::test]
async fn http_sync_preview_does_not_mutate() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;
    complete_day(&client, &server.base_url, 1).await;

    let token: SyncTokenResponse = client
        .get(format!("{}/api/sync/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let preview = client
        .post(format!("{}/api/sync/preview", server.base_url))
        .json(&serde_json::json!({ "token": token.token }))
        .send()
        .await
        .unwrap();
    assert!(preview.status().is_success());

    let stats = get_stats(&client, &server.base_url).await;
    assert_eq!(stats.days_completed, 1);
}

#[tokio::test]
async fn http_bad_token_is_rejected_without_side_effects() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;
    complete_day(&client, &server.base_url, 1).await;

    let response = client
        .post(format!("{}/api/sync/import", server.base_url))
        .json(&serde_json::json!({ "token": "v2.20260101.AAAA" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let today = get_today(&client, &server.base_url).await;
    assert!(today.started);
    assert_eq!(today.days_completed, 1);
}

#[tokio::test]
async fn http_export_before_start_is_conflict() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;

    let response = client
        .get(format!("{}/api/sync/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_reset_returns_to_not_started() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;
    complete_day(&client, &server.base_url, 1).await;

    reset(&client, &server.base_url).await;
    let today = get_today(&client, &server.base_url).await;
    assert!(!today.started);
    assert_eq!(today.days_completed, 0);
}

#[tokio::test]
async fn http_reminder_ics_download() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;

    let response = client
        .get(format!("{}/api/reminder.ics?time=07:30", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/calendar"));

    let body = response.text().await.unwrap();
    assert!(body.contains("RRULE:FREQ=DAILY;COUNT=365"));
    assert!(body.contains("T073000"));
}

#[tokio::test]
async fn http_day_lookup_reports_date_and_completion() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 3).await;
    complete_day(&client, &server.base_url, 1).await;

    #[derive(Debug, Deserialize)]
    struct DayResponse {
        day: u16,
        date: String,
        readings: Vec<String>,
        completed: bool,
        is_today: bool,
    }

    let start_date = (Local::now().date_naive() - Duration::days(2)).to_string();
    let day_one: DayResponse = client
        .get(format!("{}/api/day/1", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(day_one.day, 1);
    assert_eq!(day_one.date, start_date);
    assert!(day_one.completed);
    assert!(!day_one.is_today);
    assert!(!day_one.readings.is_empty());

    let day_three: DayResponse = client
        .get(format!("{}/api/day/3", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(day_three.is_today);
    assert!(!day_three.completed);
}

#[tokio::test]
async fn http_view_navigation_clamps_to_plan_range() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 2).await;

    #[derive(Debug, Deserialize)]
    struct DayResponse {
        day: u16,
        readings: Vec<String>,
        is_today: bool,
    }

    async fn view(client: &Client, base_url: &str, day: i64) -> DayResponse {
        client
            .post(format!("{base_url}/api/view"))
            .json(&serde_json::json!({ "day": day }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    // Walking off the front of the plan sticks at day 1.
    let first = view(&client, &server.base_url, 0).await;
    assert_eq!(first.day, 1);
    assert!(!first.is_today);
    assert!(!first.readings.is_empty());

    let last = view(&client, &server.base_url, 400).await;
    assert_eq!(last.day, 365);

    let today = view(&client, &server.base_url, 2).await;
    assert_eq!(today.day, 2);
    assert!(today.is_today);
}

#[tokio::test]
async fn http_view_before_start_is_conflict() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/view", server.base_url))
        .json(&serde_json::json!({ "day": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_day_lookup_before_start_is_conflict() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;

    let response = client
        .get(format!("{}/api/day/1", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_invalid_day_is_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    reset(&client, &server.base_url).await;
    start_on_day(&client, &server.base_url, 1).await;

    for day in [0i64, 366] {
        let response = client
            .post(format!("{}/api/complete", server.base_url))
            .json(&serde_json::json!({ "day": day }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
