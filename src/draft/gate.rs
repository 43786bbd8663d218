use super::OrderDraft;

/// То, без чего заказ нельзя отправить.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Requirement {
    #[display(fmt = "клиент")]
    Client,
    #[display(fmt = "товары")]
    Products,
    #[display(fmt = "количество для каждого товара")]
    Amounts,
    #[display(fmt = "срок")]
    Deadline,
}

/// Возвращает список незаполненных частей черновика.
pub fn missing(draft: &OrderDraft) -> Vec<Requirement> {
    let mut missing = Vec::with_capacity(4);

    if draft.client.is_none() {
        missing.push(Requirement::Client);
    }

    if draft.lines.is_empty() {
        missing.push(Requirement::Products);
    }

    if !draft
        .lines
        .iter()
        .all(|line| matches!(line.buying, Some(buying) if buying > 0))
    {
        missing.push(Requirement::Amounts);
    }

    if draft.deadline.is_none() {
        missing.push(Requirement::Deadline);
    }

    missing
}

/// Проверяет что черновик можно отправлять.
pub fn is_submittable(draft: &OrderDraft) -> bool {
    missing(draft).is_empty()
}
