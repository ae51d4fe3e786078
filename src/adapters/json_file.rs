use crate::domain::model::{Operator, Product, Property};
use crate::domain::ports::DataSource;
use crate::utils::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 資料檔格式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Datastore {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub operators: Vec<Operator>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Datastore {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let store: Datastore = serde_json::from_str(content)?;
        store.check_unique_ids()?;
        Ok(store)
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.properties.iter().find(|p| !seen.insert(p.id)) {
            return Err(FilterError::DataSourceError {
                message: format!("duplicate property id {}", dup.id),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.operators.iter().find(|op| !seen.insert(op.id)) {
            return Err(FilterError::DataSourceError {
                message: format!("duplicate operator id {}", dup.id),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.products.iter().find(|p| !seen.insert(p.id)) {
            return Err(FilterError::DataSourceError {
                message: format!("duplicate product id {}", dup.id),
            });
        }

        Ok(())
    }
}

/// 以 JSON 檔案作為資料來源。
/// 屬性與運算子在開啟時讀取；商品每次呼叫都重新讀檔。
#[derive(Debug, Clone)]
pub struct JsonFileDataSource {
    path: PathBuf,
    properties: Vec<Property>,
    operators: Vec<Operator>,
}

impl JsonFileDataSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let store = Self::read(&path)?;

        tracing::info!("📁 Opened datastore {}", path.display());

        Ok(Self {
            path,
            properties: store.properties,
            operators: store.operators,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Datastore> {
        if !path.exists() {
            return Err(FilterError::DataSourceUnavailable {
                location: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Datastore::from_json_str(&content)
    }
}

impl DataSource for JsonFileDataSource {
    fn properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.clone())
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        Ok(self.operators.clone())
    }

    fn products(&self) -> Result<Vec<Product>> {
        Ok(Self::read(&self.path)?.products)
    }
}
