use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{header::AUTHORIZATION, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    catalog::{ClientCatalog, ProductCatalog},
    config::Config,
    draft::OrderSink,
    model::{CatalogProduct, ClientRef, OrderRequest, SubmissionError, SubmitResult},
};

use super::models::{
    AddOrderData, AddOrderVariables, GetClientsData, GetProductsData, GraphQlRequest,
    GraphQlResponse,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const GET_CLIENTS: &str = r#"
query getClients {
  getClients {
    id
    name
    last_name
  }
}
"#;

const GET_PRODUCTS: &str = r#"
query getProducts {
  getProducts {
    id
    name
    amount
    price
  }
}
"#;

const ADD_ORDER: &str = r#"
mutation addOrder($input: OrderInput) {
  addOrder(input: $input) {
    id
    items {
      id
      amount
    }
    total
    client {
      id
      name
      last_name
    }
    state
    deadline
  }
}
"#;

/// Клиент к GraphQL API.
pub struct Client {
    client: reqwest::blocking::Client,
    url: Url,
    token: Option<String>,
}

impl Client {
    /// Создаёт новый инстанс клиента.
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            url: Url::parse(&cfg.api_url)?,
            token: cfg.token.clone(),
        })
    }

    fn query<V: Serialize, R: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Option<&V>,
    ) -> Result<R, ApiError> {
        let payload = GraphQlRequest { query, variables };

        let mut req_builder = self.client.post(self.url.clone()).json(&payload);

        if let Some(t) = &self.token {
            req_builder = req_builder.header(AUTHORIZATION, format!("Bearer {}", t));
        }

        debug!(
            "Запрос {} в API {} (токен: {})",
            operation,
            self.url,
            self.token.is_some()
        );
        let resp = req_builder.send()?;

        let status = resp.status();
        let body = resp.text()?;

        debug!("Тело ответа на {}: {}", operation, body);

        decode(status, &body)
    }
}

// GraphQL-сервер отдаёт ошибки в теле как с кодом 200, так и с 400.
fn decode<R: DeserializeOwned>(status: StatusCode, body: &str) -> Result<R, ApiError> {
    match serde_json::from_str::<GraphQlResponse<R>>(body) {
        Ok(resp) if !resp.errors.is_empty() => {
            let messages: Vec<_> = resp.errors.into_iter().map(|e| e.message).collect();
            Err(ApiError::GraphQl(messages.join("; ")))
        }
        Ok(resp) if status == StatusCode::OK => resp.data.ok_or(ApiError::EmptyData),
        Err(e) if status == StatusCode::OK => Err(ApiError::Deserialize(e)),
        _ => Err(ApiError::Status {
            status,
            body: body.to_owned(),
        }),
    }
}

impl ClientCatalog for Client {
    fn clients(&self) -> anyhow::Result<Vec<ClientRef>> {
        let data: GetClientsData = self.query::<(), _>("getClients", GET_CLIENTS, None)?;

        Ok(data.get_clients)
    }
}

impl ProductCatalog for Client {
    fn products(&self) -> anyhow::Result<Vec<CatalogProduct>> {
        let data: GetProductsData = self.query::<(), _>("getProducts", GET_PRODUCTS, None)?;

        Ok(data.get_products)
    }
}

impl OrderSink for Client {
    fn submit(&self, order: &OrderRequest) -> SubmitResult {
        let variables = AddOrderVariables { input: order };

        let data: AddOrderData = self
            .query("addOrder", ADD_ORDER, Some(&variables))
            .map_err(|e| {
                warn!("API не принял заказ: {}", e);
                e
            })?;

        info!(
            "API зарегистрировал заказ {} на сумму {}",
            data.add_order.id, data.add_order.total
        );

        Ok(data.add_order)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("send request")]
    Transport(#[from] reqwest::Error),

    #[error("got {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    GraphQl(String),

    #[error("response has no data")]
    EmptyData,

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),
}

impl From<ApiError> for SubmissionError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Transport(e) => SubmissionError::Transport(e),
            ApiError::Deserialize(e) => SubmissionError::Malformed(e),
            e @ (ApiError::Status { .. } | ApiError::GraphQl(_) | ApiError::EmptyData) => {
                SubmissionError::Rejected(e.to_string())
            }
        }
    }
}
