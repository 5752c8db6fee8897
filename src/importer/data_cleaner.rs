// ==========================================
// 经销商导出数据校验系统 - 数据清洗器实现
// ==========================================
// 职责: 数值强转 / 宽松日期解析 / 配件号规范化 / 文本清洗
// 规则: 数值汇总时非数值按 0 计; 日期无法解析为 Null
// ==========================================

use crate::domain::table::CellValue;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Excel 序列日期纪元（兼容 1900 闰年缺陷）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// 9999-12-31 对应的序列值
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// 日期格式（日在前优先）
const DATE_FORMATS: [&str; 15] = [
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];

pub struct DataCleaner;

impl DataCleaner {
    // ==========================================
    // 数值
    // ==========================================

    /// 单元格 → 数值（无法转换返回 None）
    pub fn parse_number(&self, value: &CellValue) -> Option<f64> {
        match value {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Null | CellValue::Date(_) => None,
        }
    }

    /// 单元格 → 数值（无法转换按 0 计）
    pub fn to_number(&self, value: &CellValue) -> f64 {
        self.parse_number(value).unwrap_or(0.0)
    }

    // ==========================================
    // 日期
    // ==========================================

    /// 宽松日期解析: 先按数值(Excel 序列)解析,再按文本格式解析
    pub fn parse_date(&self, value: &CellValue) -> CellValue {
        let parsed = match value {
            CellValue::Date(d) => Some(*d),
            CellValue::Number(n) => self.number_to_date(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(n) => self
                        .number_to_date(n)
                        .or_else(|| self.parse_date_text(trimmed)),
                    Err(_) => self.parse_date_text(trimmed),
                }
            }
            CellValue::Null | CellValue::Bool(_) => None,
        };
        parsed.map(CellValue::Date).unwrap_or(CellValue::Null)
    }

    fn number_to_date(&self, n: f64) -> Option<NaiveDate> {
        self.excel_serial_to_date(n).or_else(|| {
            // 超出序列范围的整数按 YYYYMMDD 解释
            if n.fract() == 0.0 && (10_000_000.0..=99_991_231.0).contains(&n) {
                NaiveDate::parse_from_str(&format!("{}", n as i64), "%Y%m%d").ok()
            } else {
                None
            }
        })
    }

    /// Excel 序列值 → 日期（时间部分截断）
    pub fn excel_serial_to_date(&self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
            return None;
        }
        let (y, m, d) = EXCEL_EPOCH;
        let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
        epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
    }

    /// 文本日期解析（日在前）
    pub fn parse_date_text(&self, raw: &str) -> Option<NaiveDate> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(d) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        {
            return Some(d);
        }

        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        {
            return Some(dt.date());
        }

        // 带时间后缀的其他写法: 仅取首段
        let head = text.split(|c: char| c.is_whitespace() || c == 'T').next()?;
        if head.len() == text.len() {
            return None;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
    }

    // ==========================================
    // 文本
    // ==========================================

    /// 单元格 → 去首尾空白文本（Null 为空串）
    pub fn clean_text(&self, value: &CellValue) -> String {
        value.to_string().trim().to_string()
    }

    /// 配件号规范化: 去首尾空白,删除 '-' 与 '.'
    pub fn normalize_part_number(&self, raw: &str) -> String {
        raw.trim().chars().filter(|c| *c != '-' && *c != '.').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_to_number() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.to_number(&CellValue::Number(2.5)), 2.5);
        assert_eq!(cleaner.to_number(&CellValue::Text(" 7 ".to_string())), 7.0);
        assert_eq!(cleaner.to_number(&CellValue::Text("N/A".to_string())), 0.0);
        assert_eq!(cleaner.to_number(&CellValue::Null), 0.0);
        assert_eq!(cleaner.to_number(&CellValue::Date(date(2025, 1, 1))), 0.0);
    }

    #[test]
    fn test_excel_serial() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.excel_serial_to_date(45658.0), Some(date(2025, 1, 1)));
        assert_eq!(cleaner.excel_serial_to_date(45658.75), Some(date(2025, 1, 1)));
        assert_eq!(cleaner.excel_serial_to_date(0.0), None);
        assert_eq!(cleaner.excel_serial_to_date(-3.0), None);
    }

    #[test]
    fn test_parse_date_numeric_first() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.parse_date(&CellValue::Text("45658".to_string())),
            CellValue::Date(date(2025, 1, 1))
        );
        assert_eq!(
            cleaner.parse_date(&CellValue::Number(20250105.0)),
            CellValue::Date(date(2025, 1, 5))
        );
    }

    #[test]
    fn test_parse_date_text_day_first() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date_text("05/01/2025"), Some(date(2025, 1, 5)));
        assert_eq!(cleaner.parse_date_text("05-01-2025"), Some(date(2025, 1, 5)));
        assert_eq!(cleaner.parse_date_text("2025-01-05"), Some(date(2025, 1, 5)));
        assert_eq!(cleaner.parse_date_text("05 Jan 2025"), Some(date(2025, 1, 5)));
        assert_eq!(
            cleaner.parse_date_text("2025-01-05 13:45:00"),
            Some(date(2025, 1, 5))
        );
        assert_eq!(
            cleaner.parse_date_text("05/01/2025 1:45 PM"),
            Some(date(2025, 1, 5))
        );
    }

    #[test]
    fn test_parse_date_invalid_is_null() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.parse_date(&CellValue::Text("not a date".to_string())),
            CellValue::Null
        );
        assert_eq!(cleaner.parse_date(&CellValue::Null), CellValue::Null);
        assert_eq!(
            cleaner.parse_date(&CellValue::Text("31/02/2025".to_string())),
            CellValue::Null
        );
    }

    #[test]
    fn test_normalize_part_number() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_part_number(" AB-12.3 "), "AB123");
        assert_eq!(cleaner.normalize_part_number("A B/1"), "A B/1");
    }
}
