use crate::adapters::json_file::JsonFileDataSource;
use crate::core::session::FilterSession;
use crate::core::table::ProductTable;
use crate::domain::model::{OperatorId, OutputFormat};
use crate::domain::ports::{ConfigProvider, DataSource};
use crate::utils::error::{FilterError, Result};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub matched: usize,
    pub total: usize,
    /// 寫入的檔案；輸出到 stdout 時為 `None`
    pub output_path: Option<String>,
}

pub struct FilterEngine<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> FilterEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 載入資料、套用設定中的篩選並輸出表格。
    /// 資料來源不存在時不輸出任何內容。
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        tracing::info!("Starting product filter...");

        let Some(mut session) = open_session(self.config.datastore_path())? else {
            return Ok(RunReport::default());
        };

        let total = session.products().len();
        apply_selection(&mut session, &self.config)?;
        let matched = session.products().len();
        tracing::info!("✅ {} of {} products match", matched, total);

        let rendered = render(&session.table(), self.config.output_format())?;

        let output_path = match self.config.output_path() {
            Some(path) => {
                write_file(path, rendered.as_bytes())?;
                tracing::info!("📁 Output saved to: {}", path);
                Some(path.to_string())
            }
            None => {
                out.write_all(rendered.as_bytes())?;
                out.flush()?;
                None
            }
        };

        Ok(RunReport {
            matched,
            total,
            output_path,
        })
    }
}

/// 開啟 JSON 資料來源。檔案不存在時回傳 `None`，呼叫端應輸出空白
pub fn open_session(path: &str) -> Result<Option<FilterSession<JsonFileDataSource>>> {
    match JsonFileDataSource::open(path) {
        Ok(source) => FilterSession::new(source).map(Some),
        Err(FilterError::DataSourceUnavailable { location }) => {
            tracing::warn!("⚠️ Datastore not found at {}, nothing to render", location);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 依序套用屬性、運算子、輸入，與使用者操作順序相同
pub fn apply_selection<D: DataSource, C: ConfigProvider + ?Sized>(
    session: &mut FilterSession<D>,
    config: &C,
) -> Result<()> {
    let Some(property) = config.property() else {
        return Ok(());
    };
    session.select_property(Some(property))?;

    let Some(operator) = config.operator() else {
        return Ok(());
    };
    let operator = OperatorId::parse(operator).ok_or_else(|| FilterError::UnknownOperator {
        id: operator.to_string(),
    })?;
    session.select_operator(Some(operator))?;

    if config.input().is_empty() {
        return Ok(());
    }
    if operator.is_structural() {
        tracing::debug!("Operator '{}' ignores input {:?}", operator, config.input());
        return Ok(());
    }
    session.enter_input(config.input())?;

    Ok(())
}

pub fn render(table: &ProductTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table.to_text()),
        OutputFormat::Csv => table.to_csv(),
        OutputFormat::Json => table.to_json(),
    }
}

fn write_file(path: &str, data: &[u8]) -> Result<()> {
    let full_path = Path::new(path);

    if let Some(parent) = full_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(full_path, data)?;
    Ok(())
}
