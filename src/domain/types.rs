// ==========================================
// 经销商导出数据校验系统 - 领域类型定义
// ==========================================
// 职责: 文件类别 / 期间类型 / 配件类别 / 备注 / 报表种类 等枚举
// 红线: 类别分派必须走封闭枚举,禁止字符串前缀隐式分派
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 文件类别 (File Category)
// ==========================================
// 每个类别对应: 文件名前缀 + 表头行偏移 + 列模式(见 importer::schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileCategory {
    BoList,
    Stock,
    ReceivingPendingList,
    ReceivingPendingDetail,
    ReceivingTodayList,
    ReceivingTodayDetail,
    TransferList,
    TransferDetail,
}

impl FileCategory {
    /// 文件齐套检查顺序
    pub const ALL: [FileCategory; 8] = [
        FileCategory::BoList,
        FileCategory::ReceivingPendingList,
        FileCategory::ReceivingPendingDetail,
        FileCategory::Stock,
        FileCategory::ReceivingTodayList,
        FileCategory::ReceivingTodayDetail,
        FileCategory::TransferList,
        FileCategory::TransferDetail,
    ];

    /// 文件名前缀（小写）
    pub fn prefix(&self) -> &'static str {
        match self {
            FileCategory::BoList => "bo list",
            FileCategory::Stock => "stock",
            FileCategory::ReceivingPendingList => "receiving pending list",
            FileCategory::ReceivingPendingDetail => "receiving pending detail",
            FileCategory::ReceivingTodayList => "receiving today list",
            FileCategory::ReceivingTodayDetail => "receiving today detail",
            FileCategory::TransferList => "transfer list",
            FileCategory::TransferDetail => "transfer detail",
        }
    }

    /// 容忍的拼写变体（仅 receiving 系列: receiving → receving）
    pub fn misspelled_prefix(&self) -> Option<&'static str> {
        match self {
            FileCategory::ReceivingPendingList => Some("receving pending list"),
            FileCategory::ReceivingPendingDetail => Some("receving pending detail"),
            FileCategory::ReceivingTodayList => Some("receving today list"),
            FileCategory::ReceivingTodayDetail => Some("receving today detail"),
            FileCategory::BoList
            | FileCategory::Stock
            | FileCategory::TransferList
            | FileCategory::TransferDetail => None,
        }
    }

    /// 表头所在行（物理行号, 0 起）
    pub fn header_row(&self) -> usize {
        match self {
            FileCategory::Stock | FileCategory::TransferDetail => 0,
            FileCategory::BoList
            | FileCategory::ReceivingPendingDetail
            | FileCategory::ReceivingTodayDetail
            | FileCategory::TransferList => 1,
            FileCategory::ReceivingPendingList | FileCategory::ReceivingTodayList => 2,
        }
    }

    /// 需要按日期解析的列
    pub fn date_column(&self) -> Option<&'static str> {
        match self {
            FileCategory::BoList => Some("PO DATE"),
            FileCategory::ReceivingPendingDetail | FileCategory::ReceivingTodayDetail => {
                Some("ORDER DATE")
            }
            FileCategory::TransferList => Some("REQ.DATE"),
            FileCategory::Stock
            | FileCategory::ReceivingPendingList
            | FileCategory::ReceivingTodayList
            | FileCategory::TransferDetail => None,
        }
    }

    /// 面向操作员的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            FileCategory::BoList => "BO LIST",
            FileCategory::Stock => "Stock",
            FileCategory::ReceivingPendingList => "Receiving Pending List",
            FileCategory::ReceivingPendingDetail => "Receiving Pending Detail",
            FileCategory::ReceivingTodayList => "Receiving Today List",
            FileCategory::ReceivingTodayDetail => "Receiving Today Detail",
            FileCategory::TransferList => "Transfer List",
            FileCategory::TransferDetail => "Transfer Detail",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ==========================================
// 期间类型 (Period Type)
// ==========================================
// 窗口长度按天计: Day=1 / Week=7 / Month=30 / Quarter=90 / Year=365
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodType {
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodType {
    pub fn days(&self) -> i64 {
        match self {
            PeriodType::Day => 1,
            PeriodType::Week => 7,
            PeriodType::Month => 30,
            PeriodType::Quarter => 90,
            PeriodType::Year => 365,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodType::Day => "Day",
            PeriodType::Week => "Week",
            PeriodType::Month => "Month",
            PeriodType::Quarter => "Quarter",
            PeriodType::Year => "Year",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(PeriodType::Day),
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            "quarter" => Ok(PeriodType::Quarter),
            "year" => Ok(PeriodType::Year),
            other => Err(format!("未知期间类型: {}", other)),
        }
    }
}

// ==========================================
// 配件类别 (Part Category)
// ==========================================
// Spares → PART TYPE ∈ {X, Y}; Accessories → PART TYPE = A
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartCategory {
    Spares,
    Accessories,
    All,
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartCategory::Spares => "Spares",
            PartCategory::Accessories => "Accessories",
            PartCategory::All => "All",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spares" => Ok(PartCategory::Spares),
            "accessories" => Ok(PartCategory::Accessories),
            "all" => Ok(PartCategory::All),
            other => Err(format!("未知配件类别: {}", other)),
        }
    }
}

// ==========================================
// 欠单备注 (Remark)
// ==========================================
// 第四种组合 (transit>0 且 T/F=true) 无业务定义,显式标记为 Unclassified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Remark {
    Ok,
    PlsCheck,
    Unclassified,
}

impl Remark {
    /// 输出到报表的文本（Unclassified 输出为空单元格）
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Remark::Ok => Some("Ok"),
            Remark::PlsCheck => Some("Pls Check"),
            Remark::Unclassified => None,
        }
    }
}

// ==========================================
// 报表种类 (Report Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Oem,
    Stock,
    Pending,
}

impl ReportKind {
    /// 输出文件名前缀
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ReportKind::Oem => "OEM",
            ReportKind::Stock => "Stock",
            ReportKind::Pending => "Pending",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_days() {
        assert_eq!(PeriodType::Day.days(), 1);
        assert_eq!(PeriodType::Week.days(), 7);
        assert_eq!(PeriodType::Month.days(), 30);
        assert_eq!(PeriodType::Quarter.days(), 90);
        assert_eq!(PeriodType::Year.days(), 365);
    }

    #[test]
    fn test_period_from_str_case_insensitive() {
        assert_eq!("week".parse::<PeriodType>().unwrap(), PeriodType::Week);
        assert_eq!(" Quarter ".parse::<PeriodType>().unwrap(), PeriodType::Quarter);
        assert!("fortnight".parse::<PeriodType>().is_err());
    }

    #[test]
    fn test_misspelling_only_for_receiving() {
        for category in FileCategory::ALL {
            let has_variant = category.misspelled_prefix().is_some();
            assert_eq!(has_variant, category.prefix().starts_with("receiving"));
        }
    }

    #[test]
    fn test_remark_labels() {
        assert_eq!(Remark::Ok.label(), Some("Ok"));
        assert_eq!(Remark::PlsCheck.label(), Some("Pls Check"));
        assert_eq!(Remark::Unclassified.label(), None);
    }
}
