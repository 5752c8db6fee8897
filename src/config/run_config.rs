// ==========================================
// 经销商导出数据校验系统 - 运行配置
// ==========================================
// 职责: 单次运行的输入参数（日期范围/期间类型/配件类别/截止基准日）
// 来源: TOML 文件 + 命令行覆写
// ==========================================

use crate::domain::types::{PartCategory, PeriodType};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// 回看天数上限（约 100 年）
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    ReadError(String),

    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// CategorySelection - 配件类别选择
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection(pub Vec<PartCategory>);

impl Default for CategorySelection {
    fn default() -> Self {
        Self(vec![PartCategory::Spares])
    }
}

impl CategorySelection {
    /// 库存过滤用的 PART TYPE 集合
    ///
    /// # 规则（按去重后的集合判断）
    /// - {Spares}              → X, Y
    /// - {Accessories}         → A
    /// - {Spares, Accessories} → X, Y, A
    /// - 其他（含 All / 空）    → None（不过滤）
    pub fn stock_part_types(&self) -> Option<&'static [&'static str]> {
        let set: BTreeSet<PartCategory> = self.0.iter().copied().collect();
        let spares = set.contains(&PartCategory::Spares);
        let accessories = set.contains(&PartCategory::Accessories);

        if set.contains(&PartCategory::All) {
            return None;
        }
        match (spares, accessories) {
            (true, false) => Some(&["X", "Y"]),
            (false, true) => Some(&["A"]),
            (true, true) => Some(&["X", "Y", "A"]),
            (false, false) => None,
        }
    }

    /// 排序后的类别名称（用于输入签名）
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        names.sort();
        names
    }
}

// ==========================================
// RunConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 期间校验起始日（含）
    pub start_date: NaiveDate,

    /// 期间校验截止日（含）
    pub end_date: NaiveDate,

    #[serde(default)]
    pub period_type: PeriodType,

    #[serde(default)]
    pub select_categories: CategorySelection,

    /// 报表截止窗口基准日（默认当天）
    #[serde(default)]
    pub today: Option<NaiveDate>,

    /// 人工放行软校验问题（对硬阻断无效）
    #[serde(default)]
    pub continue_anyway: bool,

    /// BO LIST 回看天数
    #[serde(default = "default_oem_lookback_days")]
    pub oem_lookback_days: i64,

    /// 收货明细回看天数
    #[serde(default = "default_receiving_lookback_days")]
    pub receiving_lookback_days: i64,

    /// 清单/明细对账容差
    #[serde(default = "default_qty_tolerance")]
    pub qty_tolerance: f64,
}

fn default_oem_lookback_days() -> i64 {
    90
}

fn default_receiving_lookback_days() -> i64 {
    60
}

fn default_qty_tolerance() -> f64 {
    1e-6
}

impl RunConfig {
    /// 默认配置: 最近 90 天, 按天校验, 仅 Spares
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            start_date: today - Duration::days(90),
            end_date: today,
            period_type: PeriodType::default(),
            select_categories: CategorySelection::default(),
            today: Some(today),
            continue_anyway: false,
            oem_lookback_days: default_oem_lookback_days(),
            receiving_lookback_days: default_receiving_lookback_days(),
            qty_tolerance: default_qty_tolerance(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RunConfig =
            toml::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidValue {
                key: "start_date".to_string(),
                message: format!("起始日 {} 晚于截止日 {}", self.start_date, self.end_date),
            });
        }
        for (key, days) in [
            ("oem_lookback_days", self.oem_lookback_days),
            ("receiving_lookback_days", self.receiving_lookback_days),
        ] {
            if !(0..=MAX_LOOKBACK_DAYS).contains(&days) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("回看天数需在 0..={} 之间: {}", MAX_LOOKBACK_DAYS, days),
                });
            }
        }
        if !(self.qty_tolerance >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "qty_tolerance".to_string(),
                message: format!("容差非法: {}", self.qty_tolerance),
            });
        }
        Ok(())
    }

    /// 报表基准日（未配置时取本地当天）
    pub fn effective_today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_toml_minimal() {
        let config = RunConfig::from_toml_str(
            r#"
            start_date = "2025-01-01"
            end_date = "2025-03-31"
            "#,
        )
        .unwrap();

        assert_eq!(config.period_type, PeriodType::Day);
        assert_eq!(config.select_categories, CategorySelection::default());
        assert_eq!(config.oem_lookback_days, 90);
        assert_eq!(config.receiving_lookback_days, 60);
        assert!(!config.continue_anyway);
    }

    #[test]
    fn test_from_toml_full() {
        let config = RunConfig::from_toml_str(
            r#"
            start_date = "2025-01-01"
            end_date = "2025-03-31"
            period_type = "Month"
            select_categories = ["Spares", "Accessories"]
            today = "2025-04-01"
            continue_anyway = true
            "#,
        )
        .unwrap();

        assert_eq!(config.period_type, PeriodType::Month);
        assert_eq!(config.effective_today(), date(2025, 4, 1));
        assert_eq!(
            config.select_categories.stock_part_types(),
            Some(&["X", "Y", "A"][..])
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        let result = RunConfig::from_toml_str(
            r#"
            start_date = "2025-03-01"
            end_date = "2025-01-01"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_stock_part_types() {
        let sel = |v: Vec<PartCategory>| CategorySelection(v).stock_part_types();
        assert_eq!(sel(vec![PartCategory::Spares]), Some(&["X", "Y"][..]));
        assert_eq!(sel(vec![PartCategory::Accessories]), Some(&["A"][..]));
        assert_eq!(sel(vec![PartCategory::All]), None);
        assert_eq!(sel(vec![PartCategory::Spares, PartCategory::All]), None);
        assert_eq!(sel(vec![]), None);
    }

    #[test]
    fn test_defaults_window() {
        let config = RunConfig::with_defaults(date(2025, 6, 30));
        assert_eq!(config.start_date, date(2025, 4, 1));
        assert_eq!(config.end_date, date(2025, 6, 30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookback_out_of_range_rejected() {
        let mut config = RunConfig::with_defaults(date(2025, 6, 30));
        config.receiving_lookback_days = MAX_LOOKBACK_DAYS + 1;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "receiving_lookback_days"
        ));

        config.receiving_lookback_days = MAX_LOOKBACK_DAYS;
        config.oem_lookback_days = -1;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "oem_lookback_days"
        ));
    }
}
