// ==========================================
// 经销商导出数据校验系统 - 列映射器实现
// ==========================================
// 职责: 原始表格 → 规范化表
//   - 位置型: 规范列名按位置赋值,截断到 min(模式列数, 实际列数)
//   - 自描述: 使用文件表头（去空白 / 空表头补名 / 重名加后缀）
//   - 日期列: 宽松解析,无法解析为 Null
// ==========================================

use crate::domain::location::Location;
use crate::domain::table::{CellValue, NormalizedTable};
use crate::domain::types::FileCategory;
use crate::domain::verdict::{ReadIssue, ReadIssueKind};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::importer_trait::{RawSheet, TableMapper};
use crate::importer::schema::{schema_for, ColumnSchema};
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 自描述表头: 去空白,空表头 → "Unnamed: {idx}",重名 → ".1" / ".2" 后缀
    pub fn self_describing_labels(&self, header: &[CellValue], width: usize) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(width);

        for idx in 0..width {
            let raw = header
                .get(idx)
                .map(|cell| self.cleaner.clean_text(cell))
                .unwrap_or_default();
            let base = if raw.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                raw
            };

            let label = match seen.get(&base).copied() {
                None => base.clone(),
                Some(count) => {
                    let mut suffix = count;
                    let mut candidate = format!("{}.{}", base, suffix);
                    while seen.contains_key(&candidate) {
                        suffix += 1;
                        candidate = format!("{}.{}", base, suffix);
                    }
                    seen.insert(candidate.clone(), 1);
                    candidate
                }
            };
            *seen.entry(base).or_insert(0) += 1;
            labels.push(label);
        }

        labels
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl TableMapper for FieldMapper {
    fn map_table(
        &self,
        location: &Location,
        file_name: &str,
        category: FileCategory,
        sheet: RawSheet,
    ) -> (NormalizedTable, Vec<ReadIssue>) {
        let mut issues = Vec::new();

        let columns: Vec<String> = match schema_for(category) {
            ColumnSchema::Positional { version, names } => {
                let kept = names.len().min(sheet.width);
                if sheet.width != names.len() {
                    warn!(
                        location = %location,
                        file = file_name,
                        expected = names.len(),
                        actual = sheet.width,
                        version,
                        "列数与规范模式不一致,按位置截断"
                    );
                    issues.push(ReadIssue {
                        location: location.key(),
                        file_name: file_name.to_string(),
                        category,
                        kind: ReadIssueKind::SchemaDrift {
                            expected: names.len(),
                            actual: sheet.width,
                        },
                        message: format!(
                            "{}: {} has {} columns, expected {} (schema v{})",
                            location.site,
                            file_name,
                            sheet.width,
                            names.len(),
                            version
                        ),
                    });
                }
                names[..kept].iter().map(|s| s.to_string()).collect()
            }
            ColumnSchema::SelfDescribing => self.self_describing_labels(&sheet.header, sheet.width),
        };

        let mut table = NormalizedTable::new(
            location.clone(),
            file_name,
            category,
            columns,
            sheet.rows,
        );

        if let Some(date_column) = category.date_column() {
            if table.has_column(date_column) {
                table.map_column(date_column, |v| self.cleaner.parse_date(v));
            } else {
                debug!(
                    location = %location,
                    file = file_name,
                    column = date_column,
                    "日期列缺失,该表不参与期间校验"
                );
            }
        }

        (table, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn location() -> Location {
        Location::new("HY", "D1", "L1", "/tmp/HY/D1/L1")
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_positional_truncation_and_drift() {
        let mapper = FieldMapper::new();
        let sheet = RawSheet {
            header: vec![],
            rows: vec![vec![text("T1"), text("05/01/2025"), text("10:00")]],
            width: 3,
        };

        let (table, issues) =
            mapper.map_table(&location(), "transfer list.xlsx", FileCategory::TransferList, sheet);

        assert_eq!(table.columns(), &["TRANSFER NO", "REQ.DATE", "REQ.TIME"]);
        assert!(!table.has_column("QUANTITY_SEND"));
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            ReadIssueKind::SchemaDrift {
                expected: 21,
                actual: 3
            }
        );

        let row = table.rows().next().unwrap();
        assert_eq!(
            row.get("REQ.DATE"),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()))
        );
    }

    #[test]
    fn test_self_describing_labels() {
        let mapper = FieldMapper::new();
        let header = vec![text(" PART NO ? "), CellValue::Null, text("QTY"), text("QTY")];
        let labels = mapper.self_describing_labels(&header, 5);
        assert_eq!(
            labels,
            vec!["PART NO ?", "Unnamed: 1", "QTY", "QTY.1", "Unnamed: 4"]
        );
    }

    #[test]
    fn test_self_describing_no_drift_issue() {
        let mapper = FieldMapper::new();
        let sheet = RawSheet {
            header: vec![text("PART NO"), text("ON-HAND")],
            rows: vec![vec![text("P1"), CellValue::Number(3.0)]],
            width: 2,
        };
        let (table, issues) = mapper.map_table(&location(), "stock.xlsx", FileCategory::Stock, sheet);
        assert!(issues.is_empty());
        assert_eq!(table.columns(), &["PART NO", "ON-HAND"]);
    }
}
