// ==========================================
// 经销商导出数据校验系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含校验引擎逻辑
// ==========================================

pub mod location;
pub mod report;
pub mod table;
pub mod types;
pub mod verdict;

// 重导出核心类型
pub use location::Location;
pub use report::{
    order_check_summary, LocationReports, OemReportRow, OrderCheckRow, PendingReportRow,
    StockReportRow, TabularRow,
};
pub use table::{CellValue, NormalizedTable, RowView};
pub use types::{FileCategory, PartCategory, PeriodType, Remark, ReportKind};
pub use verdict::{
    LocationVerdict, MissingPeriodRecord, QuantityMismatchRecord, ReadIssue, ReadIssueKind,
};
