use crate::domain::model::{Operator, Product, Property};
use crate::domain::ports::DataSource;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    properties: Vec<Property>,
    operators: Vec<Operator>,
    products: Vec<Product>,
}

impl InMemoryDataSource {
    pub fn new(properties: Vec<Property>, operators: Vec<Operator>, products: Vec<Product>) -> Self {
        Self {
            properties,
            operators,
            products,
        }
    }
}

impl DataSource for InMemoryDataSource {
    fn properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.clone())
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        Ok(self.operators.clone())
    }

    fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}
