use chrono::NaiveDate;
use log::debug;

use crate::model::{CatalogProduct, ClientRef, ProductId};

use super::{merge, total, OrderDraft, OrderLine};

/// Количество, с которого начинается каждая новая позиция.
pub const DEFAULT_AMOUNT: u32 = 1;

/// Все возможные изменения черновика.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Выбран клиент.
    SelectClient(ClientRef),

    /// Выбран новый набор товаров.
    SelectProducts(Vec<CatalogProduct>),

    /// Введено количество для позиции.
    /// Значение будет приведено к допустимому диапазону.
    SetLineAmount { id: ProductId, buying: i64 },

    /// Выбран срок исполнения.
    SetDeadline(NaiveDate),

    /// Черновик сбрасывается в пустое состояние.
    Reset,
}

/// Применяет действие к черновику и возвращает новый черновик.
pub fn reduce(draft: OrderDraft, action: Action) -> OrderDraft {
    match action {
        Action::SelectClient(client) => OrderDraft {
            client: Some(client),
            ..draft
        },
        Action::SelectProducts(selection) => {
            let mut lines = merge::merge(&draft.lines, selection);
            initialize_pending(&mut lines);
            let total = total::total(&lines);

            OrderDraft {
                lines,
                total,
                ..draft
            }
        }
        Action::SetLineAmount { id, buying } => set_line_amount(draft, &id, buying),
        Action::SetDeadline(deadline) => OrderDraft {
            deadline: Some(deadline),
            ..draft
        },
        Action::Reset => OrderDraft::default(),
    }
}

// Новые позиции получают количество сразу, в той же редукции, так что
// сумма никогда не отстаёт от выбранного набора.
fn initialize_pending(lines: &mut [OrderLine]) {
    for line in lines.iter_mut().filter(|line| line.buying.is_none()) {
        line.buying = Some(clamp_amount(
            DEFAULT_AMOUNT.into(),
            line.available_amount,
        ));
    }
}

fn set_line_amount(mut draft: OrderDraft, id: &ProductId, requested: i64) -> OrderDraft {
    let Some(line) = draft.lines.iter_mut().find(|line| &line.id == id) else {
        debug!("Позиции {} в черновике уже нет, количество не меняем", id);
        return draft;
    };

    line.buying = Some(clamp_amount(requested, line.available_amount));
    draft.total = total::total(&draft.lines);

    draft
}

/// Разбирает введённое пользователем количество.
///
/// Берётся знак и ведущие цифры строки, остальное отбрасывается: `"3шт"`
/// даёт `3`. Если цифр нет совсем, возвращается [`DEFAULT_AMOUNT`].
pub fn parse_amount(input: &str) -> i64 {
    let input = input.trim();

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return DEFAULT_AMOUNT.into();
    }

    match digits[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        // Цифр слишком много для i64.
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Приводит количество к диапазону `[1, available]`.
/// Если товара нет в наличии, верхней границей считается 1.
pub fn clamp_amount(requested: i64, available: u32) -> u32 {
    let upper = available.max(DEFAULT_AMOUNT);

    u32::try_from(requested.clamp(1, upper.into())).unwrap_or(DEFAULT_AMOUNT)
}
