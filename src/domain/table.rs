// ==========================================
// 经销商导出数据校验系统 - 规范化表模型
// ==========================================
// 职责: 单个导出文件解析 + 规范列名后的表格
// 红线: 列缺失(文件物理列数不足) ≠ 单元格为空
//       get() 返回 None 表示"该导出无此列", Some(Null) 表示"空值"
// ==========================================

use crate::domain::location::Location;
use crate::domain::types::FileCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => {
                // 整数值不带小数位
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Date(d) => write!(f, "{}", d),
        }
    }
}

// ==========================================
// NormalizedTable - 规范化表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub location: Location,
    pub source_file: String,
    pub category: FileCategory,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl NormalizedTable {
    /// 创建规范化表（每行自动截断/补齐到列数）
    pub fn new(
        location: Location,
        source_file: impl Into<String>,
        category: FileCategory,
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();

        Self {
            location,
            source_file: source_file.into(),
            category,
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 列值迭代（列不存在返回 None）
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a CellValue> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView {
            columns: &self.columns,
            cells,
        })
    }

    /// 对指定列逐值变换（列不存在时无操作）
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }
}

// ==========================================
// RowView - 行视图（列名 → 值）
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> RowView<'a> {
    pub fn get(&self, name: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| &self.cells[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> NormalizedTable {
        NormalizedTable::new(
            Location::new("HY", "D1", "L1", "/tmp/HY/D1/L1"),
            "BO LIST.xlsx",
            FileCategory::BoList,
            vec!["ORDER NO".to_string(), "LINE".to_string()],
            vec![
                vec![CellValue::Text("PO1".to_string()), CellValue::Number(1.0)],
                vec![CellValue::Text("PO2".to_string())],
            ],
        )
    }

    #[test]
    fn test_missing_column_vs_null_cell() {
        let table = sample_table();
        let rows: Vec<_> = table.rows().collect();

        // 短行被补齐为 Null
        assert_eq!(rows[1].get("LINE"), Some(&CellValue::Null));
        // 不存在的列返回 None
        assert_eq!(rows[0].get("PO DATE"), None);
        assert!(table.column_values("PO DATE").is_none());
    }

    #[test]
    fn test_map_column() {
        let mut table = sample_table();
        table.map_column("LINE", |v| match v {
            CellValue::Number(n) => CellValue::Number(n * 10.0),
            other => other.clone(),
        });
        let values: Vec<_> = table.column_values("LINE").unwrap().cloned().collect();
        assert_eq!(values, vec![CellValue::Number(10.0), CellValue::Null]);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
