use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:3000";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

/// Cookie header and CSRF token of a logged-in organizer.
struct Session {
    cookie: String,
    csrf_token: String,
}

#[tokio::main]
async fn main() {
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!("{}", "❌ Server is NOT reachable at localhost:3000. Please start it first.".red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let session = setup_organizer(&client).await;
    let event_link = format!("benchmark-{}", Uuid::new_v4().simple());
    let event_id = setup_event(&client, &session, &event_link).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Event ID:   {}", event_id);
    println!("   Event link: {}", event_link);

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", BASE_URL),
            body: None,
        },
        Target {
            name: "Get Event Form (Public Read)",
            method: "GET",
            url: format!("{}/api/v1/public/events/{}", BASE_URL, event_link),
            body: None,
        },
        Target {
            name: "Confirm Guest (Public Write)",
            method: "POST",
            url: format!("{}/api/v1/public/guests", BASE_URL),
            body: Some(json!({
                "event_id": event_id,
                "fields": [
                    { "id": "field-nome", "value": "Convidado Benchmark" },
                    { "id": "field-idade", "value": 30 },
                    { "id": "field-restricao", "value": "Nenhuma" }
                ],
                "action": "next"
            })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn setup_organizer(client: &Client) -> Session {
    let username = format!("bench-{}", Uuid::new_v4());
    let password = Uuid::new_v4().to_string();

    let res = client.post(format!("{}/api/v1/auth/register", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send register request");

    if !res.status().is_success() {
        panic!("Failed to register organizer: status {}", res.status());
    }

    let login_res = client.post(format!("{}/api/v1/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Login failed during setup");

    if !login_res.status().is_success() {
        panic!("Login failed. Status: {}", login_res.status());
    }

    let cookie = login_res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter(|pair| pair.starts_with("access_token="))
        .collect::<Vec<_>>()
        .join("; ");

    let auth_body: Value = login_res.json().await.unwrap();
    let csrf_token = auth_body["csrf_token"].as_str().expect("No csrf_token").to_string();

    Session { cookie, csrf_token }
}

async fn setup_event(client: &Client, session: &Session, link: &str) -> String {
    let event_payload = json!({
        "name": "Benchmark Party",
        "link": link,
        "description": "Load testing",
        "image_url": "http://localhost/party.png",
        "date": (Utc::now() + ChronoDuration::days(30)).to_rfc3339(),
        "confirmation_deadline": (Utc::now() + ChronoDuration::days(20)).to_rfc3339(),
        "fields": ["field-nome", "field-idade", "field-restricao"]
    });

    let res = client.post(format!("{}/api/v1/events", BASE_URL))
        .header(header::COOKIE, &session.cookie)
        .header("X-CSRF-Token", &session.csrf_token)
        .json(&event_payload)
        .send()
        .await
        .expect("Failed to create event");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create event data. Status: {}. Body: {}", status, txt);
    }

    let body: Value = res.json().await.expect("Failed to parse event response");
    body["id"].as_str().expect("No event id").to_string()
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
