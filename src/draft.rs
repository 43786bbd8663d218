//! Черновик заказа, который оператор собирает перед отправкой.
//!
//! Черновик меняется только через [`reduce`]: каждое действие целиком
//! заменяет предыдущее значение, поэтому промежуточных состояний нет.

mod gate;
mod merge;
mod reducer;
mod store;
mod total;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{CatalogProduct, ClientRef, OrderItem, OrderRequest, Price, ProductId};

pub use gate::{missing, Requirement};
pub use reducer::{parse_amount, reduce, Action, DEFAULT_AMOUNT};
pub use store::{DraftStore, OrderSink, SubmitOutcome};

/// Позиция черновика.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Совпадает с идентификатором товара.
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub available_amount: u32,

    /// Сколько штук покупаем. `None` пока количество не проинициализировано.
    pub buying: Option<u32>,
}

impl OrderLine {
    /// Создаёт позицию для только что выбранного товара.
    pub fn pending(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            available_amount: product.available_amount,
            buying: None,
        }
    }
}

/// Черновик заказа.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderDraft {
    client: Option<ClientRef>,
    lines: Vec<OrderLine>,
    total: Decimal,
    deadline: Option<NaiveDate>,
}

impl OrderDraft {
    pub fn client(&self) -> Option<&ClientRef> {
        self.client.as_ref()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Собирает запрос на создание заказа.
    /// Возвращает `None`, если в черновике чего-то не хватает.
    pub fn to_request(&self) -> Option<OrderRequest> {
        let client = self.client.as_ref()?;
        let deadline = self.deadline?;

        let items = self
            .lines
            .iter()
            .map(|line| {
                line.buying.map(|amount| OrderItem {
                    id: line.id.clone(),
                    amount,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(OrderRequest {
            client: client.id.clone(),
            items,
            deadline,
        })
    }
}
