use std::collections::HashSet;

use crate::model::CatalogProduct;

use super::OrderLine;

/// Сводит новый набор выбранных товаров с текущими позициями.
///
/// Порядок позиций повторяет порядок выбора. Для товаров, которые уже были в
/// черновике, сохраняется введённое количество; новые товары получают позицию
/// без количества. Товары, которых нет в выборе, из черновика пропадают.
/// Повторы в выборе схлопываются до первого вхождения.
pub fn merge(lines: &[OrderLine], selection: Vec<CatalogProduct>) -> Vec<OrderLine> {
    let mut seen = HashSet::with_capacity(selection.len());

    selection
        .into_iter()
        .filter(|product| seen.insert(product.id.clone()))
        .map(|product| {
            let buying = lines
                .iter()
                .find(|line| line.id == product.id)
                .and_then(|line| line.buying);

            OrderLine {
                buying,
                ..OrderLine::pending(product)
            }
        })
        .collect()
}
