use crate::domain::model::{Product, ProductId, Property};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub product_id: ProductId,
    pub cells: Vec<String>,
}

/// 商品表格：欄位為屬性，列為商品。商品沒有該屬性時儲存格為空字串
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ProductTable {
    pub fn project<'a, I>(properties: &[Property], products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let headers = properties.iter().map(|p| p.name.clone()).collect();
        let rows = products
            .into_iter()
            .map(|product| TableRow {
                product_id: product.id,
                cells: properties
                    .iter()
                    .map(|property| {
                        product
                            .value_of(property.id)
                            .map(|value| value.to_string())
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 對齊的純文字表格
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut output = String::new();
        output.push_str(&format_line(&self.headers));
        output.push('\n');
        output.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format_line(&row.cells));
            output.push('\n');
        }
        output
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(&row.cells)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
