use crate::domain::model::{Operator, OutputFormat, Product, Property};
use crate::utils::error::Result;

/// 執行一次篩選所需的設定，CLI 與 TOML 設定都實作此介面
pub trait ConfigProvider {
    fn datastore_path(&self) -> &str;
    fn property(&self) -> Option<u64>;
    fn operator(&self) -> Option<&str>;
    fn input(&self) -> &[String];
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
}

/// 外部資料來源。屬性與運算子在啟動時載入一次，商品每次篩選變更時重新讀取
pub trait DataSource {
    fn properties(&self) -> Result<Vec<Property>>;
    fn operators(&self) -> Result<Vec<Operator>>;
    fn products(&self) -> Result<Vec<Product>>;
}

impl<D: DataSource + ?Sized> DataSource for &D {
    fn properties(&self) -> Result<Vec<Property>> {
        (**self).properties()
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        (**self).operators()
    }

    fn products(&self) -> Result<Vec<Product>> {
        (**self).products()
    }
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
    fn properties(&self) -> Result<Vec<Property>> {
        (**self).properties()
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        (**self).operators()
    }

    fn products(&self) -> Result<Vec<Product>> {
        (**self).products()
    }
}
