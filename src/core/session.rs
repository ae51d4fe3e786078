use crate::core::filter::filter_owned;
use crate::core::operators::candidate_operators;
use crate::core::table::ProductTable;
use crate::domain::model::{
    Filter, InputKind, InputValue, Operator, OperatorId, Product, Property, PropertyId,
};
use crate::domain::ports::DataSource;
use crate::utils::error::{FilterError, Result};

/// 篩選狀態的唯一持有者。
///
/// 每次變更都以新的 [`Filter`] 整體取代舊狀態，並立即從資料來源重新讀取商品、
/// 重新篩選。變更失敗時狀態保持不變。
pub struct FilterSession<D: DataSource> {
    source: D,
    properties: Vec<Property>,
    operators: Vec<Operator>,
    candidates: Vec<Operator>,
    filter: Filter,
    products: Vec<Product>,
}

impl<D: DataSource> FilterSession<D> {
    pub fn new(source: D) -> Result<Self> {
        let properties = source.properties()?;
        let operators = source.operators()?;
        let products = source.products()?;

        tracing::info!(
            "📦 Loaded {} properties, {} operators, {} products",
            properties.len(),
            operators.len(),
            products.len()
        );

        Ok(Self {
            source,
            properties,
            operators,
            candidates: Vec::new(),
            filter: Filter::default(),
            products,
        })
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn operator_catalog(&self) -> &[Operator] {
        &self.operators
    }

    /// 目前屬性可用的運算子
    pub fn candidate_operators(&self) -> &[Operator] {
        &self.candidates
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn input_kind(&self) -> Option<InputKind> {
        self.filter.property.as_ref().map(|p| p.kind.input_kind())
    }

    pub fn table(&self) -> ProductTable {
        ProductTable::project(&self.properties, &self.products)
    }

    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// 選擇屬性。運算子與輸入一律清除；`None` 等同重設
    pub fn select_property(&mut self, id: Option<PropertyId>) -> Result<()> {
        let Some(id) = id else {
            return self.reset();
        };

        let property = self
            .property(id)
            .cloned()
            .ok_or_else(|| FilterError::UnknownProperty { id: id.to_string() })?;

        let candidates = candidate_operators(&self.operators, property.kind);
        tracing::debug!(
            "Selected property '{}' ({}), {} operators available",
            property.name,
            property.kind.as_str(),
            candidates.len()
        );

        let filter = Filter {
            property: Some(property),
            ..Filter::default()
        };
        self.apply(filter)?;
        self.candidates = candidates;
        Ok(())
    }

    /// 選擇運算子，輸入值保留
    pub fn select_operator(&mut self, id: Option<OperatorId>) -> Result<()> {
        let operator = match id {
            None => None,
            Some(id) => Some(self.candidate(id)?),
        };

        tracing::debug!(
            "Selected operator {}",
            operator.as_ref().map(|op| op.id.as_str()).unwrap_or("<none>")
        );

        let filter = Filter {
            operator,
            ..self.filter.clone()
        };
        self.apply(filter)
    }

    /// 設定已轉型的輸入值；`None` 清除輸入
    pub fn set_input(&mut self, input: Option<InputValue>) -> Result<()> {
        if input.is_some() && self.filter.property.is_none() {
            return Err(FilterError::InvalidInput {
                value: input.map(|i| i.to_string()).unwrap_or_default(),
                reason: "select a property first".to_string(),
            });
        }

        tracing::debug!("Input set to {:?}", input);

        let filter = Filter {
            input,
            ..self.filter.clone()
        };
        self.apply(filter)
    }

    /// 依目前屬性的輸入元件型別轉換原始輸入後設定
    pub fn enter_input<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<()> {
        let property = self
            .filter
            .property
            .as_ref()
            .ok_or_else(|| FilterError::InvalidInput {
                value: join_raw(raw),
                reason: "select a property first".to_string(),
            })?;

        let input = coerce_input(property, raw)?;
        self.set_input(input)
    }

    pub fn reset(&mut self) -> Result<()> {
        tracing::debug!("Filter reset");
        self.apply(Filter::default())?;
        self.candidates.clear();
        Ok(())
    }

    fn candidate(&self, id: OperatorId) -> Result<Operator> {
        let property = self
            .filter
            .property
            .as_ref()
            .ok_or_else(|| FilterError::OperatorNotAvailable {
                operator: id.to_string(),
                property: "<none>".to_string(),
            })?;

        self.candidates
            .iter()
            .find(|op| op.id == id)
            .cloned()
            .ok_or_else(|| FilterError::OperatorNotAvailable {
                operator: id.to_string(),
                property: property.name.clone(),
            })
    }

    // 重新讀取商品並篩選，全部成功後才替換狀態
    fn apply(&mut self, filter: Filter) -> Result<()> {
        let products = filter_owned(self.source.products()?, &filter);
        tracing::debug!("🔍 {} products match", products.len());
        self.filter = filter;
        self.products = products;
        Ok(())
    }
}

/// 依屬性型別把原始輸入轉成 [`InputValue`]。空輸入回傳 `None`
pub fn coerce_input<S: AsRef<str>>(property: &Property, raw: &[S]) -> Result<Option<InputValue>> {
    match property.kind.input_kind() {
        InputKind::Number => {
            let entries: Vec<&str> = raw
                .iter()
                .map(|s| s.as_ref().trim())
                .filter(|s| !s.is_empty())
                .collect();
            match entries.as_slice() {
                [] => Ok(None),
                [single] => single
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| Some(InputValue::Number(n)))
                    .ok_or_else(|| FilterError::InvalidInput {
                        value: single.to_string(),
                        reason: format!("'{}' expects a number", property.name),
                    }),
                _ => Err(FilterError::InvalidInput {
                    value: join_raw(raw),
                    reason: format!("'{}' expects a single number", property.name),
                }),
            }
        }
        InputKind::SelectMultiple => {
            let selected: Vec<&str> = raw
                .iter()
                .flat_map(|s| split_options(property, s.as_ref()))
                .collect();

            if let Some(unknown) = selected
                .iter()
                .find(|s| !property.values.iter().any(|v| v == *s))
            {
                return Err(FilterError::InvalidInput {
                    value: unknown.to_string(),
                    reason: format!(
                        "'{}' accepts only: {}",
                        property.name,
                        property.values.join(", ")
                    ),
                });
            }

            // 選取順序依屬性定義的選項順序
            let values: Vec<String> = property
                .values
                .iter()
                .filter(|v| selected.contains(&v.as_str()))
                .cloned()
                .collect();

            Ok((!values.is_empty()).then_some(InputValue::List(values)))
        }
        InputKind::Text => {
            let text = join_raw(raw);
            Ok((!text.is_empty()).then_some(InputValue::Text(text)))
        }
    }
}

/// 多選輸入以逗號分隔。整段剛好等於某個選項時不拆開，含逗號的選項只能單獨輸入
fn split_options<'a>(property: &Property, entry: &'a str) -> Vec<&'a str> {
    let entry = entry.trim();
    if property.values.iter().any(|v| v == entry) {
        return vec![entry];
    }

    entry
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn join_raw<S: AsRef<str>>(raw: &[S]) -> String {
    raw.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
}
