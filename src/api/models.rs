use serde::{Deserialize, Serialize};

use crate::model::{CatalogProduct, ClientRef, CommittedOrder, OrderRequest};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a V>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetClientsData {
    pub get_clients: Vec<ClientRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsData {
    pub get_products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOrderVariables<'a> {
    pub input: &'a OrderRequest,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderData {
    pub add_order: CommittedOrder,
}
