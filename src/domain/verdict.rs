// ==========================================
// 经销商导出数据校验系统 - 校验结论模型
// ==========================================
// 职责: 三级错误体系的记录结构
//   1. 单文件读取问题 (ReadIssue)          - 本地恢复,仅记录
//   2. 软校验失败 (缺文件/缺期间)           - 可人工放行
//   3. 硬校验失败 (清单明细数量不一致)       - 全局阻断,无放行
// ==========================================

use crate::domain::location::Location;
use crate::domain::types::FileCategory;
use serde::{Deserialize, Serialize};

// ==========================================
// ReadIssueKind - 读取问题类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadIssueKind {
    UnsupportedFormat,                                // 非 .xlsx
    Unreadable,                                       // 文件损坏/解析失败
    Empty,                                            // 无数据行
    SchemaDrift { expected: usize, actual: usize },   // 物理列数与模式列数不符
    MissingColumns(Vec<String>),                      // 缺少必需列
}

// ==========================================
// ReadIssue - 单文件读取问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadIssue {
    pub location: String,
    pub file_name: String,
    pub category: FileCategory,
    pub kind: ReadIssueKind,
    pub message: String,
}

// ==========================================
// MissingPeriodRecord - 期间缺失日志行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPeriodRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Dealer")]
    pub dealer: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Missing In")]
    pub missing_in: String,
}

// ==========================================
// QuantityMismatchRecord - 数量不一致日志行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityMismatchRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Dealer")]
    pub dealer: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Check")]
    pub check: String,
    #[serde(rename = "List_Sum")]
    pub list_sum: f64,
    #[serde(rename = "Detail_Sum")]
    pub detail_sum: f64,
    #[serde(rename = "Difference")]
    pub difference: f64,
}

// ==========================================
// LocationVerdict - 单网点校验结论（不可变,由网点循环产出）
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationVerdict {
    pub missing_files: Vec<String>,
    pub period_errors: Vec<String>,
    pub period_log: Vec<MissingPeriodRecord>,
    pub period_check_skipped: bool,
    pub mismatch_errors: Vec<String>,
    pub mismatch_log: Vec<QuantityMismatchRecord>,
    pub read_issues: Vec<ReadIssue>,
}

impl LocationVerdict {
    pub fn has_hard_failure(&self) -> bool {
        !self.mismatch_errors.is_empty()
    }

    pub fn has_soft_failure(&self) -> bool {
        !self.missing_files.is_empty() || !self.period_errors.is_empty()
    }
}

/// 日志行中的 品牌/经销商/网点 三列
pub(crate) fn location_columns(location: &Location) -> (String, String, String) {
    (
        location.brand.clone(),
        location.dealer.clone(),
        location.site.clone(),
    )
}
