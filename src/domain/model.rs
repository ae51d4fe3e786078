use serde::{Deserialize, Serialize};
use std::fmt;

pub type PropertyId = u64;
pub type ProductId = u64;

/// 屬性型別。未知的型別標籤一律視為自由文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Numeric,
    Enumerated,
    FreeText,
}

impl PropertyType {
    /// 此型別對應的輸入元件
    pub fn input_kind(self) -> InputKind {
        match self {
            PropertyType::Numeric => InputKind::Number,
            PropertyType::Enumerated => InputKind::SelectMultiple,
            PropertyType::FreeText => InputKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Numeric => "number",
            PropertyType::Enumerated => "enumerated",
            PropertyType::FreeText => "string",
        }
    }
}

impl From<String> for PropertyType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "number" | "numeric" => PropertyType::Numeric,
            "enumerated" => PropertyType::Enumerated,
            _ => PropertyType::FreeText,
        }
    }
}

impl From<PropertyType> for String {
    fn from(kind: PropertyType) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorId {
    Equals,
    GreaterThan,
    LessThan,
    Any,
    None,
    In,
    Contains,
}

impl OperatorId {
    pub const ALL: [OperatorId; 7] = [
        OperatorId::Equals,
        OperatorId::GreaterThan,
        OperatorId::LessThan,
        OperatorId::Any,
        OperatorId::None,
        OperatorId::In,
        OperatorId::Contains,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorId::Equals => "equals",
            OperatorId::GreaterThan => "greater_than",
            OperatorId::LessThan => "less_than",
            OperatorId::Any => "any",
            OperatorId::None => "none",
            OperatorId::In => "in",
            OperatorId::Contains => "contains",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == id.trim())
    }

    /// `any` / `none` 只檢查屬性是否存在，不需要輸入值
    pub fn is_structural(self) -> bool {
        matches!(self, OperatorId::Any | OperatorId::None)
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub property_id: PropertyId,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "values")]
    pub property_values: Vec<PropertyValue>,
}

impl Product {
    /// 第一個符合屬性的值，表格儲存格用
    pub fn value_of(&self, property_id: PropertyId) -> Option<&AttributeValue> {
        self.property_values
            .iter()
            .find(|pv| pv.property_id == property_id)
            .map(|pv| &pv.value)
    }

    pub fn has_property(&self, property_id: PropertyId) -> bool {
        self.property_values
            .iter()
            .any(|pv| pv.property_id == property_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Number,
    Text,
    SelectMultiple,
}

/// 依輸入元件型別轉換後的輸入值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum InputValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl InputValue {
    /// 單一元素的清單視為該元素
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InputValue::Number(n) => Some(*n),
            InputValue::Text(s) => s.trim().parse().ok(),
            InputValue::List(items) if items.len() == 1 => items[0].trim().parse().ok(),
            InputValue::List(_) => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(n) => write!(f, "{}", n),
            InputValue::Text(s) => f.write_str(s),
            InputValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// 目前的篩選選擇。任一欄位未設定即為「不篩選」，`any` / `none` 例外
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filter {
    pub property: Option<Property>,
    pub operator: Option<Operator>,
    pub input: Option<InputValue>,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        match (&self.property, &self.operator) {
            (Some(_), Some(op)) => op.id.is_structural() || self.input.is_some(),
            _ => false,
        }
    }
}

/// 輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["table", "csv", "json"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_tags() {
        let json = r#"[
            {"id": 1, "name": "Size", "type": "number"},
            {"id": 2, "name": "Color", "type": "enumerated", "values": ["red", "blue"]},
            {"id": 3, "name": "Name", "type": "string"},
            {"id": 4, "name": "Weight", "type": "numeric"},
            {"id": 5, "name": "Notes", "type": "markdown"}
        ]"#;
        let properties: Vec<Property> = serde_json::from_str(json).unwrap();

        assert_eq!(properties[0].kind, PropertyType::Numeric);
        assert_eq!(properties[1].kind, PropertyType::Enumerated);
        assert_eq!(properties[1].values, vec!["red", "blue"]);
        assert_eq!(properties[2].kind, PropertyType::FreeText);
        assert_eq!(properties[3].kind, PropertyType::Numeric);
        assert_eq!(properties[4].kind, PropertyType::FreeText);
    }

    #[test]
    fn test_product_accepts_values_alias() {
        let json = r#"{"id": 7, "values": [{"property_id": 1, "value": 5}, {"property_id": 2, "value": "red"}]}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.value_of(1), Some(&AttributeValue::Number(5.0)));
        assert_eq!(
            product.value_of(2),
            Some(&AttributeValue::Text("red".to_string()))
        );
        assert!(!product.has_property(3));
    }

    #[test]
    fn test_number_display_has_no_trailing_zero() {
        assert_eq!(AttributeValue::Number(5.0).to_string(), "5");
        assert_eq!(AttributeValue::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_operator_ids() {
        let op: Operator = serde_json::from_str(r#"{"id": "greater_than", "text": "is greater than"}"#)
            .unwrap();
        assert_eq!(op.id, OperatorId::GreaterThan);
        assert_eq!(OperatorId::parse("none"), Some(OperatorId::None));
        assert_eq!(OperatorId::parse("between"), None);
        assert!(OperatorId::Any.is_structural());
        assert!(!OperatorId::In.is_structural());
    }

    #[test]
    fn test_filter_activity() {
        let property = Property {
            id: 1,
            name: "Size".to_string(),
            kind: PropertyType::Numeric,
            values: vec![],
        };
        let op = |id: OperatorId| Operator {
            id,
            text: id.to_string(),
        };

        assert!(!Filter::default().is_active());

        let mut filter = Filter {
            property: Some(property),
            operator: Some(op(OperatorId::Equals)),
            input: None,
        };
        assert!(!filter.is_active());

        filter.operator = Some(op(OperatorId::None));
        assert!(filter.is_active());

        filter.operator = Some(op(OperatorId::Equals));
        filter.input = Some(InputValue::Number(3.0));
        assert!(filter.is_active());
    }
}
