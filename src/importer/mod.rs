// ==========================================
// 经销商导出数据校验系统 - 导入层
// ==========================================
// 职责: 目录扫描 / 文件分类 / Excel 解析 / 列规范化
// 支持: Excel (.xlsx)
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_classifier;
pub mod file_parser;
pub mod importer_trait;
pub mod location_loader;
pub mod location_scanner;
pub mod schema;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_classifier::classify;
pub use file_parser::ExcelParser;
pub use location_loader::{ClassifiedFile, LocationData, LocationLoader};
pub use location_scanner::scan_locations;
pub use schema::{schema_for, ColumnSchema};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RawSheet, TableMapper};
