// ==========================================
// 经销商导出数据校验系统 - 导出层
// ==========================================
// 职责: 报表工作簿 / 经销商合并压缩包 / 校验日志 CSV
// 红线: 只读引擎产出,不做任何业务判定
// ==========================================

pub mod bundle;
pub mod csv_log;
pub mod error;
pub mod exporter;
pub mod xlsx_writer;

pub use bundle::{DealerBundle, COMBINED_ARCHIVE_NAME};
pub use csv_log::{write_mismatch_log, write_period_log, MISMATCH_LOG_FILE, VALIDATION_LOG_FILE};
pub use error::{ExportError, ExportResult};
pub use exporter::{ExportSummary, ReportExporter};
pub use xlsx_writer::ReportTable;
