//! API integration tests
//!
//! Binds the router to an ephemeral port and drives it with reqwest.

use bookshelf_server::{create_router, AppConfig, AppState};
use reqwest::Client;
use serde_json::{json, Value};

/// Start a fresh server and return its base URL
async fn start_server() -> String {
    let app = create_router(AppState::new(AppConfig::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{}", addr)
}

fn book_body(name: &str, page_count: i64, read_page: i64, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create_book(client: &Client, base: &str, body: &Value) -> String {
    let response = client
        .post(format!("{}/books", base))
        .json(body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

async fn list_ids(client: &Client, url: String) -> Vec<String> {
    let body: Value = client
        .get(url)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["data"]["books"]
        .as_array()
        .expect("books is not an array")
        .iter()
        .map(|b| b["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let base = start_server().await;
    let response = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_book() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&book_body("A", 100, 100, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().expect("No book ID");
    assert_eq!(id.len(), 16);

    let body: Value = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book = &body["data"]["book"];
    assert_eq!(body["status"], "success");
    assert_eq!(book["id"], id);
    assert_eq!(book["finished"], true);
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
    assert!(book["insertedAt"].as_str().unwrap_or_default().ends_with('Z'));
}

#[tokio::test]
async fn test_create_book_rejections() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&json!({ "pageCount": 10, "readPage": 0, "reading": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let response = client
        .post(format!("{}/books", base))
        .json(&book_body("B", 100, 150, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let response = client
        .post(format!("{}/books", base))
        .json(&json!({ "name": "C", "pageCount": "many" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");

    assert!(list_ids(&client, format!("{}/books", base)).await.is_empty());
}

#[tokio::test]
async fn test_list_books_filters() {
    let base = start_server().await;
    let client = Client::new();

    let reading = create_book(&client, &base, &book_body("Reading Dicoding", 100, 20, true)).await;
    let finished = create_book(&client, &base, &book_body("Finished", 50, 50, false)).await;
    let idle = create_book(&client, &base, &book_body("Idle dicoding", 80, 0, false)).await;

    let body: Value = client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    let first = &body["data"]["books"][0];
    assert_eq!(first["id"], reading.as_str());
    assert_eq!(first["name"], "Reading Dicoding");
    assert_eq!(first["publisher"], "Dicoding Indonesia");
    assert!(first.get("pageCount").is_none());

    assert_eq!(
        list_ids(&client, format!("{}/books", base)).await,
        vec![reading.clone(), finished.clone(), idle.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?reading=1", base)).await,
        vec![reading.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?finished=0", base)).await,
        vec![reading.clone(), idle.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?name=DICODING", base)).await,
        vec![reading.clone(), idle.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?reading=0&finished=1&name=Idle", base)).await,
        vec![finished.clone(), idle]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?reading=abc&finished=1", base)).await,
        vec![finished]
    );
}

#[tokio::test]
async fn test_update_book() {
    let base = start_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_body("A", 100, 100, false)).await;

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book_body("A revised", 300, 30, true))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let body: Value = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book = &body["data"]["book"];
    assert_eq!(book["name"], "A revised");
    assert_eq!(book["readPage"], 30);
    assert_eq!(book["reading"], true);
    // finished keeps its creation-time value
    assert_eq!(book["finished"], true);
}

#[tokio::test]
async fn test_update_book_rejections() {
    let base = start_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_body("A", 100, 10, false)).await;

    let response = client
        .put(format!("{}/books/unknown-id", base))
        .json(&json!({ "pageCount": 10, "readPage": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book_body("A", 100, 150, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let response = client
        .put(format!("{}/books/unknown-id", base))
        .json(&book_body("A", 100, 50, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    assert_eq!(list_ids(&client, format!("{}/books", base)).await, vec![id]);
}

#[tokio::test]
async fn test_delete_book() {
    let base = start_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, &book_body("A", 100, 10, false)).await;

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let response = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_list_books_repeated_keys() {
    let base = start_server().await;
    let client = Client::new();

    let reading = create_book(&client, &base, &book_body("alpha", 100, 20, true)).await;
    let finished = create_book(&client, &base, &book_body("beta", 50, 50, false)).await;

    for query in ["reading=1&reading=0", "finished=1&finished=1", "name=a&name=b"] {
        let response = client
            .get(format!("{}/books?{}", base, query))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200, "query {}", query);
    }

    assert_eq!(
        list_ids(&client, format!("{}/books?reading=1&reading=0", base)).await,
        vec![reading.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?finished=1&finished=0", base)).await,
        vec![finished.clone()]
    );
    // first name wins: "alp" matches only alpha, "bet" would match only beta
    assert_eq!(
        list_ids(&client, format!("{}/books?name=alp&name=bet", base)).await,
        vec![reading.clone()]
    );
    assert_eq!(
        list_ids(&client, format!("{}/books?reading", base)).await,
        vec![reading, finished]
    );
}
