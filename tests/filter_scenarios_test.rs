use anyhow::Result;
use product_filter::domain::model::{
    AttributeValue, Filter, InputValue, Operator, OperatorId, Product, Property, PropertyType,
    PropertyValue,
};
use product_filter::{filter_products, FilterSession, InMemoryDataSource};

fn operators() -> Vec<Operator> {
    OperatorId::ALL
        .iter()
        .map(|id| Operator {
            id: *id,
            text: id.to_string(),
        })
        .collect()
}

fn product(id: u64, values: Vec<(u64, AttributeValue)>) -> Product {
    Product {
        id,
        property_values: values
            .into_iter()
            .map(|(property_id, value)| PropertyValue { property_id, value })
            .collect(),
    }
}

fn text(s: &str) -> AttributeValue {
    AttributeValue::Text(s.to_string())
}

fn ids(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

fn catalog() -> InMemoryDataSource {
    let properties = vec![
        Property {
            id: 0,
            name: "Product Name".to_string(),
            kind: PropertyType::FreeText,
            values: vec![],
        },
        Property {
            id: 1,
            name: "Size".to_string(),
            kind: PropertyType::Numeric,
            values: vec![],
        },
        Property {
            id: 2,
            name: "Color".to_string(),
            kind: PropertyType::Enumerated,
            values: vec!["red".into(), "green".into(), "blue".into()],
        },
    ];

    let products = vec![
        product(
            1,
            vec![
                (0, text("Blue Shirt")),
                (1, AttributeValue::Number(5.0)),
                (2, text("blue")),
            ],
        ),
        product(2, vec![(0, text("Pants")), (1, AttributeValue::Number(10.0))]),
        product(3, vec![(0, text("Red shirt")), (2, text("red"))]),
        product(4, vec![(0, text("Socks")), (2, text("green"))]),
    ];

    InMemoryDataSource::new(properties, operators(), products)
}

/// 測試規格中的端對端情境：Size > 7 只回傳商品 2
#[test]
fn test_size_greater_than_scenario() -> Result<()> {
    let properties = vec![Property {
        id: 1,
        name: "Size".to_string(),
        kind: PropertyType::Numeric,
        values: vec![],
    }];
    let products = vec![
        product(1, vec![(1, AttributeValue::Number(5.0))]),
        product(2, vec![(1, AttributeValue::Number(10.0))]),
    ];
    let mut session =
        FilterSession::new(InMemoryDataSource::new(properties, operators(), products))?;

    session.select_property(Some(1))?;
    session.select_operator(Some(OperatorId::GreaterThan))?;
    session.set_input(Some(InputValue::Number(7.0)))?;

    assert_eq!(ids(session.products()), vec![2]);
    Ok(())
}

/// 測試空篩選回傳原清單
#[test]
fn test_empty_filter_is_identity() -> Result<()> {
    let session = FilterSession::new(catalog())?;
    assert_eq!(ids(session.products()), vec![1, 2, 3, 4]);

    let products = session.products().to_vec();
    let filtered = filter_products(&products, &Filter::default());
    assert_eq!(filtered.len(), products.len());
    Ok(())
}

/// 測試 any / none 互為補集
#[test]
fn test_any_and_none_are_complements() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;

    session.select_property(Some(1))?;
    session.select_operator(Some(OperatorId::Any))?;
    let with_size = ids(session.products());

    session.select_operator(Some(OperatorId::None))?;
    let without_size = ids(session.products());

    assert_eq!(with_size, vec![1, 2]);
    assert_eq!(without_size, vec![3, 4]);
    Ok(())
}

/// 測試 equals 對單一元素清單與單一值的結果相同
#[test]
fn test_equals_list_unwrap_equivalence() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(2))?;
    session.select_operator(Some(OperatorId::Equals))?;

    session.set_input(Some(InputValue::List(vec!["red".into()])))?;
    let from_list = ids(session.products());

    session.set_input(Some(InputValue::Text("red".into())))?;
    let from_value = ids(session.products());

    assert_eq!(from_list, vec![3]);
    assert_eq!(from_list, from_value);
    Ok(())
}

/// 測試 in 搭配多選清單
#[test]
fn test_in_with_multi_select() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(2))?;
    session.select_operator(Some(OperatorId::In))?;
    session.enter_input(&["green", "blue"])?;

    assert_eq!(
        session.filter().input,
        Some(InputValue::List(vec!["green".into(), "blue".into()]))
    );
    assert_eq!(ids(session.products()), vec![1, 4]);
    Ok(())
}

/// 測試 in 搭配逗號分隔的文字輸入
#[test]
fn test_in_with_comma_separated_text() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(0))?;
    session.select_operator(Some(OperatorId::In))?;
    session.enter_input(&["Pants,Socks ,  Hat"])?;

    assert_eq!(ids(session.products()), vec![2, 4]);
    Ok(())
}

/// 測試 contains 不分大小寫
#[test]
fn test_contains_is_case_insensitive() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(0))?;
    session.select_operator(Some(OperatorId::Contains))?;
    session.enter_input(&["SHIRT"])?;

    assert_eq!(ids(session.products()), vec![1, 3]);
    Ok(())
}

/// 測試變更屬性會清除運算子與輸入，即使新屬性也支援同一運算子
#[test]
fn test_property_change_resets_operator_and_input() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(0))?;
    session.select_operator(Some(OperatorId::Equals))?;
    session.enter_input(&["Pants"])?;
    assert_eq!(ids(session.products()), vec![2]);

    session.select_property(Some(1))?;
    assert!(session.filter().operator.is_none());
    assert!(session.filter().input.is_none());
    assert_eq!(ids(session.products()), vec![1, 2, 3, 4]);
    Ok(())
}

/// 測試不可用的運算子會被拒絕
#[test]
fn test_contains_not_offered_for_numbers() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(1))?;

    let offered: Vec<OperatorId> = session
        .candidate_operators()
        .iter()
        .map(|op| op.id)
        .collect();
    assert!(!offered.contains(&OperatorId::Contains));
    assert!(session.select_operator(Some(OperatorId::Contains)).is_err());
    Ok(())
}

/// 測試非數字的輸入不會改變狀態
#[test]
fn test_non_numeric_input_is_rejected() -> Result<()> {
    let mut session = FilterSession::new(catalog())?;
    session.select_property(Some(1))?;
    session.select_operator(Some(OperatorId::LessThan))?;
    session.enter_input(&["8"])?;

    assert!(session.enter_input(&["eight"]).is_err());
    assert_eq!(session.filter().input, Some(InputValue::Number(8.0)));
    assert_eq!(ids(session.products()), vec![1]);
    Ok(())
}
