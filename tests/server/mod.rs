use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-key";
#[allow(dead_code)]
pub const TEST_USER_AGENT: &str = "KijiTest/1.0";
#[allow(dead_code)]
pub const PAGING_TOTAL: usize = 45;

/// Largest page the mock provider accepts, like the real one
const PROVIDER_PAGE_LIMIT: usize = 20;

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    count: usize,
    #[serde(default)]
    offset: usize,
}

fn provider_result(title: String, url: String, description: String) -> Value {
    json!({ "title": title, "url": url, "description": description })
}

async fn search(req: HttpRequest, query: web::Query<SearchQuery>) -> HttpResponse {
    let token = req
        .headers()
        .get("X-Subscription-Token")
        .and_then(|v| v.to_str().ok());
    if token != Some(TEST_API_KEY) {
        return HttpResponse::Unauthorized().finish();
    }
    if query.count == 0 || query.count > PROVIDER_PAGE_LIMIT {
        return HttpResponse::UnprocessableEntity().finish();
    }

    let base = format!("http://{}", req.connection_info().host());
    let entry = |name: &str| {
        provider_result(
            format!("Page {}", name),
            format!("{}/{}", base, name),
            format!("About {}", name),
        )
    };

    let all: Vec<Value> = match query.q.as_str() {
        "paging" => (1..=PAGING_TOTAL)
            .map(|n| {
                provider_result(
                    format!("Result {}", n),
                    format!("https://www.site{}.test/article", n),
                    format!("Snippet {}", n),
                )
            })
            .collect(),
        "agent" => vec![entry("agent")],
        "empty" => vec![],
        _ => vec![
            entry("pages/alpha"),
            entry("pages/beta"),
            entry("slow"),
            entry("pages/delta"),
            entry("pages/epsilon"),
        ],
    };

    let start = (query.offset * query.count).min(all.len());
    let end = (start + query.count).min(all.len());

    let results = all[start..end].to_vec();

    HttpResponse::Ok().json(json!({ "web": { "results": results } }))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn page(path: web::Path<String>) -> HttpResponse {
    let body = match path.as_str() {
        "alpha" => format!(
            "<html><head><title>Alpha</title><style>.x {{ color: red; }}</style></head>\
             <body><h1>SEO対策入門</h1><h2>内部リンク 設計</h2><h3>タイトルタグ</h3>\
             <p>{}</p><script>var tracking = 1;</script></body></html>",
            "a".repeat(600)
        ),
        "beta" => format!(
            "<html><body><h2>内部リンク 設計</h2><h2>被リンク</h2><p>{}</p></body></html>",
            "b".repeat(1000)
        ),
        "delta" => "<html><body><h2>delta</h2><p>short</p></body></html>".to_string(),
        "epsilon" => "<html><body><h2>epsilon</h2></body></html>".to_string(),
        _ => return HttpResponse::NotFound().finish(),
    };
    html(body)
}

async fn slow() -> HttpResponse {
    actix_web::rt::time::sleep(Duration::from_secs(3)).await;
    html("<html><body><h2>late</h2></body></html>".to_string())
}

async fn agent(req: HttpRequest) -> HttpResponse {
    let user_agent = req
        .headers()
        .get("User-Agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    html(format!("<html><body><h2>{}</h2></body></html>", user_agent))
}

/// Starts a server mocking the ranking API and a handful of competitor pages
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route("/res/v1/web/search", web::get().to(search))
            .route("/pages/{name}", web::get().to(page))
            .route("/slow", web::get().to(slow))
            .route("/agent", web::get().to(agent))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

#[allow(dead_code)]
pub fn search_endpoint(base_url: &str) -> String {
    format!("{}/res/v1/web/search", base_url)
}
