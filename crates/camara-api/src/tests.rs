//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::{sync::Arc, time::Duration};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use camara_core::{expense::NewExpense, legislator::NewLegislator, store::LegislativeStore};
use camara_store_sqlite::SqliteStore;
use camara_sync::{SyncConfig, SyncPipeline};
use camara_upstream::{UpstreamClient, UpstreamConfig};
use serde_json::{Value, json};
use tokio::{io::AsyncWriteExt, net::TcpListener};
use tower::ServiceExt;
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{method, path, query_param},
};

use crate::{AppState, router};

/// Nothing listens on the discard port, so any upstream call fails fast.
const NO_UPSTREAM: &str = "http://127.0.0.1:9";

async fn make_state(upstream_url: &str) -> AppState<SqliteStore, UpstreamClient> {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let upstream = UpstreamClient::new(UpstreamConfig {
    base_url: upstream_url.to_string(),
    ..UpstreamConfig::default()
  })
  .unwrap();
  let sync = SyncPipeline::new(
    Arc::clone(&store),
    Arc::new(upstream),
    SyncConfig::default().without_delays(),
  );
  AppState { store, sync }
}

async fn send(
  state: AppState<SqliteStore, UpstreamClient>,
  method: &str,
  uri: &str,
) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .unwrap();
  let resp = router(state).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, body)
}

fn legislator(id: i64, name: &str) -> NewLegislator {
  NewLegislator {
    id,
    name: name.into(),
    party: "PSB".into(),
    state: "PE".into(),
    ..NewLegislator::default()
  }
}

fn expense(legislator_id: i64, year: i32, document: &str, amount: f64) -> NewExpense {
  NewExpense {
    legislator_id,
    year,
    month: 1,
    document_date: format!("{year}-01-{:02}", amount as u32 % 28 + 1),
    gross_amount: amount,
    net_amount: amount,
    document_number: document.into(),
    ..NewExpense::default()
  }
}

// ── Banner & health ───────────────────────────────────────────────────────────

#[tokio::test]
async fn banner_lists_endpoints() {
  let (status, body) = send(make_state(NO_UPSTREAM).await, "GET", "/").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["message"].is_string());
  let endpoints = body["endpoints"].as_array().unwrap();
  assert!(endpoints.iter().any(|e| e == "POST /api/sync"));
}

#[tokio::test]
async fn health_reports_ok() {
  let (status, body) = send(make_state(NO_UPSTREAM).await, "GET", "/api/health").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "ok");
  assert!(body["time"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
  let req = Request::builder()
    .uri("/api/health")
    .header(header::ORIGIN, "https://painel.example.org")
    .body(Body::empty())
    .unwrap();
  let resp = router(make_state(NO_UPSTREAM).await).oneshot(req).await.unwrap();
  assert_eq!(
    resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
    "*"
  );
}

// ── Legislators & expenses ────────────────────────────────────────────────────

#[tokio::test]
async fn lists_legislators_with_upstream_field_names() {
  let state = make_state(NO_UPSTREAM).await;
  state.store.upsert_legislator(legislator(2, "Zélia")).await.unwrap();
  state.store.upsert_legislator(legislator(1, "Amaro")).await.unwrap();

  let (status, body) = send(state, "GET", "/api/deputados").await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0]["nome"], "Amaro");
  assert_eq!(rows[0]["siglaPartido"], "PSB");
  assert_eq!(rows[0]["siglaUf"], "PE");
  assert!(rows[0]["updatedAt"].is_string());
}

#[tokio::test]
async fn expenses_default_to_2024() {
  let state = make_state(NO_UPSTREAM).await;
  state.store.insert_expense_if_absent(expense(5, 2024, "a", 10.0)).await.unwrap();
  state.store.insert_expense_if_absent(expense(5, 2025, "b", 20.0)).await.unwrap();

  let (status, body) = send(state.clone(), "GET", "/api/deputados/5/gastos").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["numDocumento"], "a");
  assert_eq!(body[0]["deputadoId"], 5);

  let (_, body) = send(state, "GET", "/api/deputados/5/gastos?ano=2025").await;
  assert_eq!(body[0]["numDocumento"], "b");
}

#[tokio::test]
async fn bad_id_or_year_is_400_with_json_error() {
  let state = make_state(NO_UPSTREAM).await;

  let (status, body) = send(state.clone(), "GET", "/api/deputados/abc/gastos").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!({ "error": "ID inválido" }));

  let (status, body) = send(state.clone(), "GET", "/api/deputados/1/gastos?ano=xx").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!({ "error": "Ano inválido" }));

  let (status, _) = send(state, "GET", "/api/deputados/abc/projetos").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Ranking & stats ───────────────────────────────────────────────────────────

#[tokio::test]
async fn ranking_honours_year_and_limit() {
  let state = make_state(NO_UPSTREAM).await;
  for (id, name, amount) in [(1, "Ana", 50.0), (2, "Beto", 300.0), (3, "Caio", 120.0)] {
    state.store.upsert_legislator(legislator(id, name)).await.unwrap();
    state
      .store
      .insert_expense_if_absent(expense(id, 2025, "x", amount))
      .await
      .unwrap();
  }

  let (status, body) = send(state.clone(), "GET", "/api/ranking?ano=2025&limite=2").await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0]["nome"], "Beto");
  assert_eq!(rows[0]["totalGasto"], 300.0);
  assert_eq!(rows[0]["numeroGastos"], 1);
  assert_eq!(rows[0]["posicao"], 1);
  assert_eq!(rows[1]["nome"], "Caio");
  assert_eq!(rows[1]["posicao"], 2);

  // Default year has no expenses at all.
  let (_, body) = send(state.clone(), "GET", "/api/ranking").await;
  assert_eq!(body, json!([]));

  let (status, body) = send(state, "GET", "/api/ranking?limite=-1").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Limite inválido");
}

#[tokio::test]
async fn stats_on_empty_store() {
  let (status, body) = send(make_state(NO_UPSTREAM).await, "GET", "/api/estatisticas").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({
    "totalDeputados": 0,
    "totalGastos2024": 0,
    "totalGastos2025": 0,
    "ultimaAtualizacao": null,
  }));
}

// ── Sync ──────────────────────────────────────────────────────────────────────

async fn mount_listing(server: &MockServer, route: &str, params: &[(&str, &str)], dados: Value) {
  let mut mock = Mock::given(method("GET")).and(path(route));
  for (k, v) in params {
    mock = mock.and(query_param(*k, *v));
  }
  mock
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dados": dados, "links": [] })))
    .mount(server)
    .await;
}

fn upstream_expense(document: &str, amount: f64) -> Value {
  json!({
    "mes": 3,
    "tipoDespesa": "TELEFONIA",
    "dataDocumento": "2024-03-01T00:00:00",
    "valorDocumento": amount,
    "valorLiquido": amount,
    "nomeFornecedor": "OPERADORA",
    "cnpjCPFFornecedor": "00000000000191",
    "numDocumento": document
  })
}

#[tokio::test]
async fn sync_end_to_end_is_idempotent() {
  let server = MockServer::start().await;
  mount_listing(&server, "/deputados", &[], json!([
    {"id": 1, "nome": "Ana", "siglaPartido": "PT", "siglaUf": "SP"},
    {"id": 2, "nome": "Bruno", "siglaPartido": "PL", "siglaUf": "RJ"}
  ]))
  .await;
  mount_listing(&server, "/deputados/1/despesas", &[("ano", "2024")], json!([
    upstream_expense("1-a", 10.0),
    upstream_expense("1-b", 20.0)
  ]))
  .await;
  mount_listing(&server, "/deputados/2/despesas", &[("ano", "2024")], json!([
    upstream_expense("2-a", 30.0)
  ]))
  .await;
  mount_listing(&server, "/deputados/1/despesas", &[("ano", "2025")], json!([
    upstream_expense("1-c", 40.0)
  ]))
  .await;
  mount_listing(&server, "/deputados/2/despesas", &[("ano", "2025")], json!([
    upstream_expense("2-b", 50.0),
    upstream_expense("2-c", 60.0)
  ]))
  .await;

  let state = make_state(&server.uri()).await;

  let (status, body) = send(state.clone(), "POST", "/api/sync").await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["message"], "Sincronização concluída com sucesso!");
  assert_eq!(body["summary"]["legislators"]["saved"], 2);
  assert_eq!(body["summary"]["expenses"][0]["inserted"], 3);
  assert_eq!(body["summary"]["expenses"][1]["inserted"], 3);

  let (status, body) = send(state.clone(), "POST", "/api/sync").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["summary"]["expenses"][0]["duplicates"], 3);

  let (_, stats) = send(state.clone(), "GET", "/api/estatisticas").await;
  assert_eq!(stats["totalDeputados"], 2);
  assert_eq!(stats["totalGastos2024"], 3);
  assert_eq!(stats["totalGastos2025"], 3);
  assert!(stats["ultimaAtualizacao"].is_string());

  let (_, ranking) = send(state, "GET", "/api/ranking?ano=2025").await;
  assert_eq!(ranking[0]["id"], 2);
  assert_eq!(ranking[0]["totalGasto"], 110.0);
}

#[tokio::test]
async fn sync_failure_is_500() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/deputados"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let (status, body) = send(make_state(&server.uri()).await, "POST", "/api/sync").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  let message = body["error"].as_str().unwrap();
  assert!(message.starts_with("Erro ao sincronizar deputados: "), "{body}");
  assert!(message.contains("HTTP 500"), "{body}");
}

#[tokio::test]
async fn concurrent_sync_is_409() {
  let state = make_state(NO_UPSTREAM).await;
  let _running = state.sync.gate().try_acquire().unwrap();

  let (status, body) = send(state, "POST", "/api/sync").await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body, json!({ "error": "Sincronização já em andamento" }));
}

#[tokio::test]
async fn sync_finishes_after_client_hangs_up() {
  let server = MockServer::start().await;
  mount_listing(&server, "/deputados", &[], json!([
    {"id": 1, "nome": "Ana", "siglaPartido": "PT", "siglaUf": "SP"}
  ]))
  .await;
  // The first expense request outlives the client connection.
  Mock::given(method("GET"))
    .and(path("/deputados/1/despesas"))
    .and(query_param("ano", "2024"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "dados": [upstream_expense("1-a", 10.0)] }))
        .set_delay(Duration::from_millis(800)),
    )
    .mount(&server)
    .await;
  mount_listing(&server, "/deputados/1/despesas", &[("ano", "2025")], json!([
    upstream_expense("1-b", 20.0)
  ]))
  .await;

  let state = make_state(&server.uri()).await;
  let store = Arc::clone(&state.store);
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router(state)).await });

  let mut client = tokio::net::TcpStream::connect(address).await.unwrap();
  client
    .write_all(b"POST /api/sync HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n")
    .await
    .unwrap();
  tokio::time::sleep(Duration::from_millis(300)).await;
  drop(client);

  let mut counts = (0, 0);
  for _ in 0..50 {
    counts = (
      store.count_expenses(2024).await.unwrap(),
      store.count_expenses(2025).await.unwrap(),
    );
    if counts == (1, 1) {
      break;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;
  }
  assert_eq!(store.count_legislators().await.unwrap(), 1);
  assert_eq!(counts, (1, 1));
}

// ── Projects ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn projects_are_fetched_live() {
  let server = MockServer::start().await;
  mount_listing(&server, "/proposicoes", &[("idDeputadoAutor", "204554")], json!([
    {"id": 11, "siglaTipo": "PL", "numero": 100, "ano": 2024, "ementa": "Ementa A"},
    {"id": 10, "siglaTipo": "REQ", "numero": 7, "ano": 2023, "ementa": "Ementa B"}
  ]))
  .await;

  let (status, body) = send(make_state(&server.uri()).await, "GET", "/api/deputados/204554/projetos").await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0]["siglaTipo"], "PL");
  assert_eq!(rows[1]["ementa"], "Ementa B");
}

#[tokio::test]
async fn unreachable_upstream_for_projects_is_500() {
  let (status, body) = send(make_state(NO_UPSTREAM).await, "GET", "/api/deputados/1/projetos").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].is_string());
}
