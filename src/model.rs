use std::fmt::Display;

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::newtype;

newtype!(ClientId, String, "String", id_validate);

newtype!(ProductId, String, "String", id_validate);

fn id_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("shouldn't be empty"));
    }

    Ok(())
}

newtype!(Price, Decimal, "rust_decimal::Decimal", price_validate);

fn price_validate(value: &Decimal) -> anyhow::Result<()> {
    if *value < Decimal::ZERO {
        return Err(anyhow!("shouldn't be negative"));
    }

    Ok(())
}

/// Клиент, на которого оформляется заказ.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientRef {
    pub id: ClientId,
    pub name: String,
    pub last_name: String,
}

impl Display for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.last_name)
    }
}

/// Товар из справочника.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,

    /// Сколько единиц товара есть в наличии.
    #[serde(rename = "amount")]
    pub available_amount: u32,
}

impl Display for CatalogProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ─ {} шт.", self.name, self.available_amount)
    }
}

/// Заказ в том виде, в котором его принимает API.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub client: ClientId,
    pub items: Vec<OrderItem>,
    pub deadline: NaiveDate,
}

/// Одна позиция заказа: какой товар и сколько штук.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: ProductId,
    pub amount: u32,
}

/// Заказ, зарегистрированный на стороне API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CommittedOrder {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub client: ClientRef,

    #[serde(default)]
    pub state: OrderStatus,

    #[serde(default)]
    pub deadline: Option<String>,
}

/// Статус исполнения заказа.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    #[display(fmt = "ожидает")]
    Pending,
    #[display(fmt = "выполнен")]
    Completed,
    #[display(fmt = "отменён")]
    Cancelled,
}

pub type SubmitResult = std::result::Result<CommittedOrder, SubmissionError>;

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("send order")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response")]
    Malformed(#[from] serde_json::Error),
}
