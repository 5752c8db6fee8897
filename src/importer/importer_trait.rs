// ==========================================
// 经销商导出数据校验系统 - 导入接口定义
// ==========================================
// 职责: 定义文件解析 / 列映射接口（不包含实现）
// ==========================================

use crate::domain::location::Location;
use crate::domain::table::{CellValue, NormalizedTable};
use crate::domain::types::FileCategory;
use crate::domain::verdict::ReadIssue;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// RawSheet - 未命名列的原始表格
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSheet {
    /// 表头行单元格（仅自描述类别使用）
    pub header: Vec<CellValue>,
    /// 数据行（已跳过全空行）
    pub rows: Vec<Vec<CellValue>>,
    /// 工作表已用宽度
    pub width: usize,
}

impl RawSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → 原始表格
// 实现者: ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析首个工作表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - header_row: 表头行下标（物理行号, 0 起）
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头之后的数据行
    /// - Err: 扩展名不支持 / 文件损坏 / 表头行不存在
    fn parse(&self, file_path: &Path, header_row: usize) -> ImportResult<RawSheet>;
}

// ==========================================
// TableMapper Trait
// ==========================================
// 用途: 原始表格 → 规范化表（列命名 + 日期转换）
// 实现者: FieldMapper
pub trait TableMapper: Send + Sync {
    /// 映射结果附带非致命问题（如列数漂移）
    fn map_table(
        &self,
        location: &Location,
        file_name: &str,
        category: FileCategory,
        sheet: RawSheet,
    ) -> (NormalizedTable, Vec<ReadIssue>);
}
