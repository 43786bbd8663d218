use chrono::NaiveDate;
use log::{debug, info};

use crate::model::{
    CatalogProduct, ClientRef, CommittedOrder, OrderRequest, ProductId, SubmissionError,
    SubmitResult,
};

use super::{gate, reduce, Action, OrderDraft, Requirement};

/// Получатель готовых заказов.
pub trait OrderSink {
    /// Регистрирует заказ. Повторная отправка того же запроса безопасна.
    fn submit(&self, order: &OrderRequest) -> SubmitResult;
}

/// Итог попытки отправить черновик.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Черновик не заполнен, отправка не выполнялась.
    Withheld(Vec<Requirement>),

    /// Заказ зарегистрирован, черновик сброшен.
    Committed(CommittedOrder),
}

/// Держатель текущего черновика.
/// Все изменения проходят через [`DraftStore::dispatch`].
#[derive(Debug, Default)]
pub struct DraftStore {
    draft: OrderDraft,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("Применяем {:?}", action);
        let draft = std::mem::take(&mut self.draft);
        self.draft = reduce(draft, action);
    }

    pub fn select_client(&mut self, client: ClientRef) {
        self.dispatch(Action::SelectClient(client));
    }

    pub fn select_products(&mut self, selection: Vec<CatalogProduct>) {
        self.dispatch(Action::SelectProducts(selection));
    }

    pub fn set_line_amount(&mut self, id: ProductId, buying: i64) {
        self.dispatch(Action::SetLineAmount { id, buying });
    }

    pub fn set_deadline(&mut self, deadline: NaiveDate) {
        self.dispatch(Action::SetDeadline(deadline));
    }

    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }

    pub fn is_submittable(&self) -> bool {
        gate::is_submittable(&self.draft)
    }

    /// Отправляет черновик, если он заполнен.
    ///
    /// После успешной регистрации черновик сбрасывается. При ошибке черновик
    /// остаётся как был, чтобы его можно было поправить и отправить снова.
    pub fn submit<S: OrderSink + ?Sized>(
        &mut self,
        sink: &S,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let missing = gate::missing(&self.draft);

        let request = match self.draft.to_request() {
            Some(request) if missing.is_empty() => request,
            _ => return Ok(SubmitOutcome::Withheld(missing)),
        };

        let order = sink.submit(&request)?;

        info!("Заказ {} зарегистрирован, сбрасываем черновик", order.id);
        self.reset();

        Ok(SubmitOutcome::Committed(order))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::draft::fixtures::{client, id, product};
    use crate::model::{OrderItem, OrderStatus};
    use rust_decimal_macros::dec;

    /// Получатель, который запоминает запросы и отвечает заранее заданным образом.
    struct FakeSink {
        requests: RefCell<Vec<OrderRequest>>,
        reject_with: Option<String>,
    }

    impl FakeSink {
        fn accepting() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reject_with: None,
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reject_with: Some(message.to_owned()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl OrderSink for FakeSink {
        fn submit(&self, order: &OrderRequest) -> SubmitResult {
            self.requests.borrow_mut().push(order.clone());

            if let Some(message) = &self.reject_with {
                return Err(SubmissionError::Rejected(message.clone()));
            }

            Ok(CommittedOrder {
                id: "o1".to_owned(),
                items: order.items.clone(),
                total: dec!(0),
                client: client(order.client.as_str()),
                state: OrderStatus::Pending,
                deadline: Some(order.deadline.to_string()),
            })
        }
    }

    fn composed() -> DraftStore {
        let mut store = DraftStore::new();
        store.select_client(client("c1"));
        store.select_products(vec![product("p1", dec!(10)), product("p2", dec!(20))]);
        store.set_line_amount(id("p1"), 3);
        store.set_deadline(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        store
    }

    #[test]
    fn operations_reach_the_draft() {
        let store = composed();

        assert_eq!(store.draft().total(), dec!(50));
        assert!(store.is_submittable());
    }

    #[test]
    fn incomplete_draft_is_withheld() {
        let sink = FakeSink::accepting();
        let mut store = DraftStore::new();
        store.select_client(client("c1"));

        let outcome = store.submit(&sink).unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Withheld(vec![Requirement::Products, Requirement::Deadline])
        );
        assert_eq!(sink.calls(), 0);
        assert!(store.draft().client().is_some());
    }

    #[test]
    fn committed_order_resets_draft() {
        let sink = FakeSink::accepting();
        let mut store = composed();

        let outcome = store.submit(&sink).unwrap();

        let SubmitOutcome::Committed(order) = outcome else {
            panic!("order should be committed");
        };
        assert_eq!(
            order.items,
            vec![
                OrderItem {
                    id: id("p1"),
                    amount: 3
                },
                OrderItem {
                    id: id("p2"),
                    amount: 1
                },
            ]
        );
        assert_eq!(store.draft(), &OrderDraft::default());
    }

    #[test]
    fn rejected_order_leaves_draft_untouched() {
        let sink = FakeSink::rejecting("out of stock");
        let mut store = composed();
        let before = store.draft().clone();

        let err = store.submit(&sink).unwrap_err();

        assert!(matches!(err, SubmissionError::Rejected(ref m) if m == "out of stock"));
        assert_eq!(store.draft(), &before);
    }

    #[test]
    fn retry_sends_same_request() {
        let sink = FakeSink::rejecting("timeout");
        let mut store = composed();

        assert!(store.submit(&sink).is_err());
        assert!(store.submit(&sink).is_err());

        let requests = sink.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }
}
