//! HTTP client for the Câmara open-data API.

use std::time::Duration;

use camara_core::{expense::NewExpense, legislator::NewLegislator, project::Project};
use tracing::debug;

use crate::{
  Upstream,
  decode::{Page, decode_expense, decode_legislator, decode_project},
  envelope::Envelope,
  error::{Result, UpstreamError},
};

pub const DEFAULT_BASE_URL: &str = "https://dadosabertos.camara.leg.br/api/v2";

const DEFAULT_USER_AGENT: &str = concat!("camara-upstream/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
  pub base_url:   String,
  pub timeout:    Duration,
  pub user_agent: String,
}

impl Default for UpstreamConfig {
  fn default() -> Self {
    Self {
      base_url:   DEFAULT_BASE_URL.to_string(),
      timeout:    Duration::from_secs(30),
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }
}

/// Async client for the upstream listings.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
  client:   reqwest::Client,
  base_url: String,
}

impl UpstreamClient {
  pub fn new(config: UpstreamConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .user_agent(config.user_agent)
      .build()?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Issue one GET against `path` and decode the `{dados, links}` envelope.
  ///
  /// A non-2xx status is returned as [`UpstreamError::Status`] without
  /// looking at the body.
  pub async fn get_page(&self, path: &str, query: &[(&str, String)]) -> Result<Envelope> {
    let response = self
      .client
      .get(format!("{}{path}", self.base_url))
      .query(query)
      .send()
      .await?;

    let url = response.url().to_string();
    let status = response.status();
    debug!(%url, status = status.as_u16(), "upstream response");

    if !status.is_success() {
      return Err(UpstreamError::Status {
        status: status.as_u16(),
        url,
      });
    }

    let body = response.bytes().await?;
    let envelope: Envelope =
      serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { url, source })?;
    debug!(
      items = envelope.items.len(),
      next = envelope.link("next").unwrap_or("-"),
      "upstream page decoded"
    );
    Ok(envelope)
  }
}

fn paging(page: u32, page_size: u32) -> [(&'static str, String); 2] {
  [("itens", page_size.to_string()), ("pagina", page.to_string())]
}

impl Upstream for UpstreamClient {
  async fn legislators_page(&self, page: u32, page_size: u32) -> Result<Page<NewLegislator>> {
    let [items, pagina] = paging(page, page_size);
    let envelope = self
      .get_page("/deputados", &[
        ("ordem", "ASC".into()),
        ("ordenarPor", "nome".into()),
        items,
        pagina,
      ])
      .await?;
    Ok(Page::from_items(&envelope.items, decode_legislator))
  }

  async fn expenses_page(
    &self,
    legislator_id: i64,
    year: i32,
    page: u32,
    page_size: u32,
  ) -> Result<Page<NewExpense>> {
    let [items, pagina] = paging(page, page_size);
    let envelope = self
      .get_page(&format!("/deputados/{legislator_id}/despesas"), &[
        ("ano", year.to_string()),
        items,
        pagina,
        ("ordem", "DESC".into()),
        ("ordenarPor", "dataDocumento".into()),
      ])
      .await?;
    Ok(Page::from_items(&envelope.items, |item| {
      Ok(decode_expense(item, legislator_id, year))
    }))
  }

  async fn projects_page(
    &self,
    legislator_id: i64,
    page: u32,
    page_size: u32,
  ) -> Result<Page<Project>> {
    let [items, pagina] = paging(page, page_size);
    let envelope = self
      .get_page("/proposicoes", &[
        ("idDeputadoAutor", legislator_id.to_string()),
        items,
        pagina,
        ("ordem", "DESC".into()),
        ("ordenarPor", "id".into()),
      ])
      .await?;
    Ok(Page::from_items(&envelope.items, |item| Ok(decode_project(item))))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
  };

  use super::*;

  fn client(server: &MockServer) -> UpstreamClient {
    UpstreamClient::new(UpstreamConfig {
      base_url: format!("{}/", server.uri()),
      timeout: Duration::from_secs(5),
      user_agent: "camara-test/1".into(),
    })
    .expect("client")
  }

  #[tokio::test]
  async fn legislators_page_sends_listing_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/deputados"))
      .and(query_param("ordem", "ASC"))
      .and(query_param("ordenarPor", "nome"))
      .and(query_param("itens", "100"))
      .and(query_param("pagina", "3"))
      .and(header("user-agent", "camara-test/1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "dados": [
          {"id": 1, "nome": "Ana", "siglaPartido": "PT", "siglaUf": "SP"},
          {"nome": "sem id"}
        ],
        "links": []
      })))
      .expect(1)
      .mount(&server)
      .await;

    let page = client(&server).legislators_page(3, 100).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.records[0].value.name, "Ana");
    assert_eq!(page.rejected.len(), 1);
  }

  #[tokio::test]
  async fn expenses_page_targets_legislator_and_year() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/deputados/204554/despesas"))
      .and(query_param("ano", "2025"))
      .and(query_param("ordem", "DESC"))
      .and(query_param("ordenarPor", "dataDocumento"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "dados": [{"mes": 2, "numDocumento": "NF-9", "valorDocumento": 80.5}]
      })))
      .mount(&server)
      .await;

    let page = client(&server).expenses_page(204554, 2025, 1, 100).await.unwrap();
    let e = &page.records[0].value;
    assert_eq!(e.legislator_id, 204554);
    assert_eq!(e.year, 2025);
    assert_eq!(e.document_number, "NF-9");
  }

  #[tokio::test]
  async fn projects_page_filters_by_author() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/proposicoes"))
      .and(query_param("idDeputadoAutor", "7"))
      .and(query_param("ordenarPor", "id"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "dados": [{"id": 99, "siglaTipo": "PEC", "numero": 3, "ano": 2024}]
      })))
      .mount(&server)
      .await;

    let page = client(&server).projects_page(7, 1, 100).await.unwrap();
    assert_eq!(page.records[0].value.kind, "PEC");
  }

  #[tokio::test]
  async fn error_status_is_not_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(503).set_body_json(json!({"dados": []})))
      .mount(&server)
      .await;

    let err = client(&server).legislators_page(1, 100).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 503, .. }), "{err:?}");
  }

  #[tokio::test]
  async fn unparseable_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/deputados"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/proposicoes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"links": []})))
      .mount(&server)
      .await;

    let c = client(&server);
    let err = c.legislators_page(1, 100).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Decode { .. }), "{err:?}");
    let err = c.projects_page(1, 1, 100).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Decode { .. }), "{err:?}");
  }

  #[tokio::test]
  async fn connection_failure_is_transport() {
    let c = UpstreamClient::new(UpstreamConfig {
      base_url: "http://127.0.0.1:9".into(),
      timeout: Duration::from_secs(2),
      ..UpstreamConfig::default()
    })
    .unwrap();

    let err = c.legislators_page(1, 100).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)), "{err:?}");
  }
}
