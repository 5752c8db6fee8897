// ==========================================
// 经销商导出数据校验系统 - 核心库
// ==========================================
// 技术栈: Rust + calamine + rust_xlsxwriter
// 系统定位: 经销商导出文件 期间覆盖校验 / 清单明细对账 / 报表生成
// 输入: 品牌/经销商/网点 三级目录下的 .xlsx 导出文件
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 目录扫描 / 文件解析 / 规范化
pub mod importer;

// 引擎层 - 校验规则 / 闸门 / 报表聚合
pub mod engine;

// 导出层 - 工作簿 / 压缩包 / 日志
pub mod export;

// 配置层 - 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FileCategory, PartCategory, PeriodType, Remark, ReportKind};

// 领域实体
pub use domain::{Location, LocationReports, LocationVerdict, NormalizedTable, ReadIssue};

// 配置
pub use config::{CategorySelection, RunConfig};

// 引擎
pub use engine::{GateDecision, InputSignature, OverrideGrant, Pipeline, RunControl, RunOutcome};

// 导出
pub use export::{ExportSummary, ReportExporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "经销商导出数据校验系统";
