use rust_decimal::Decimal;

use super::OrderLine;

/// Считает сумму заказа заново по всем позициям.
/// Позиции без количества в сумму не входят.
pub fn total(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .filter_map(|line| {
            line.buying
                .map(|buying| line.price.get() * Decimal::from(buying))
        })
        .sum()
}
