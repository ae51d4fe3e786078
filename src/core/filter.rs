use crate::core::operators::evaluate;
use crate::domain::model::{Filter, OperatorId, Product};

/// 單一商品是否符合篩選條件。篩選未啟用時一律符合
pub fn matches(product: &Product, filter: &Filter) -> bool {
    let (Some(property), Some(operator)) = (&filter.property, &filter.operator) else {
        return true;
    };

    let property_id = property.id;

    match (operator.id, &filter.input) {
        (OperatorId::Any, _) => product.has_property(property_id),
        (OperatorId::None, _) => !product.has_property(property_id),
        (_, None) => true,
        (op, Some(input)) => product
            .property_values
            .iter()
            .any(|pv| pv.property_id == property_id && evaluate(op, &pv.value, input)),
    }
}

/// 依目前的篩選條件過濾商品，保留原本的相對順序。
/// 篩選未啟用時回傳完整清單。
pub fn filter_products<'a>(products: &'a [Product], filter: &Filter) -> Vec<&'a Product> {
    if !filter.is_active() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|product| matches(product, filter))
        .collect()
}

/// 與 [`filter_products`] 相同，但回傳擁有所有權的商品
pub fn filter_owned(products: Vec<Product>, filter: &Filter) -> Vec<Product> {
    if !filter.is_active() {
        return products;
    }

    products
        .into_iter()
        .filter(|product| matches(product, filter))
        .collect()
}
