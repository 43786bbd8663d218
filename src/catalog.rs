use log::debug;

use crate::model::{CatalogProduct, ClientRef, CommittedOrder};

/// Источник списка клиентов.
pub trait ClientCatalog {
    fn clients(&self) -> anyhow::Result<Vec<ClientRef>>;
}

/// Источник списка товаров.
pub trait ProductCatalog {
    fn products(&self) -> anyhow::Result<Vec<CatalogProduct>>;
}

/// Справочники, загруженные на время сессии.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    clients: Vec<ClientRef>,
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn new(clients: Vec<ClientRef>, products: Vec<CatalogProduct>) -> Self {
        Self { clients, products }
    }

    /// Загружает оба справочника из источника.
    pub fn load<S: ClientCatalog + ProductCatalog + ?Sized>(source: &S) -> anyhow::Result<Self> {
        let clients = source.clients()?;
        let products = source.products()?;

        Ok(Self::new(clients, products))
    }

    pub fn clients(&self) -> &[ClientRef] {
        &self.clients
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Уменьшает остатки товаров на количество, ушедшее в заказ.
    pub fn apply_committed(&mut self, order: &CommittedOrder) {
        for item in order.items.iter() {
            let Some(product) = self.products.iter_mut().find(|p| p.id == item.id) else {
                continue;
            };

            product.available_amount = product.available_amount.saturating_sub(item.amount);

            debug!(
                "Остаток товара {} после заказа {}: {}",
                product.id, order.id, product.available_amount
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::fixtures::{client, id, product_with_stock};
    use crate::model::{OrderItem, OrderStatus};
    use rust_decimal_macros::dec;

    struct StaticSource;

    impl ClientCatalog for StaticSource {
        fn clients(&self) -> anyhow::Result<Vec<ClientRef>> {
            Ok(vec![client("c1"), client("c2")])
        }
    }

    impl ProductCatalog for StaticSource {
        fn products(&self) -> anyhow::Result<Vec<CatalogProduct>> {
            Ok(vec![
                product_with_stock("p1", dec!(10), 5),
                product_with_stock("p2", dec!(20), 2),
            ])
        }
    }

    fn order(items: Vec<OrderItem>) -> CommittedOrder {
        CommittedOrder {
            id: "o1".to_owned(),
            items,
            total: dec!(0),
            client: client("c1"),
            state: OrderStatus::Pending,
            deadline: None,
        }
    }

    #[test]
    fn loads_both_lists() {
        let catalog = Catalog::load(&StaticSource).unwrap();

        assert_eq!(catalog.clients().len(), 2);
        assert_eq!(catalog.products().len(), 2);
    }

    #[test]
    fn committed_order_reduces_stock() {
        let mut catalog = Catalog::load(&StaticSource).unwrap();

        catalog.apply_committed(&order(vec![
            OrderItem {
                id: id("p1"),
                amount: 3,
            },
            OrderItem {
                id: id("p2"),
                amount: 5,
            },
            OrderItem {
                id: id("unknown"),
                amount: 1,
            },
        ]));

        let stock: Vec<_> = catalog
            .products()
            .iter()
            .map(|p| p.available_amount)
            .collect();
        assert_eq!(stock, vec![2, 0]);
    }
}
