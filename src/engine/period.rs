// ==========================================
// 经销商导出数据校验系统 - 期间窗口切分
// ==========================================
// 职责: 将 [start, end] 切分为连续、互不重叠的闭区间窗口
// 规则: 窗口长度 = period_days, 最后一个窗口截断到 end
// ==========================================

use crate::domain::types::PeriodType;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

// ==========================================
// PeriodWindow - 期间窗口（闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// 切分期间窗口
///
/// start > end 时返回空列表
pub fn tile_periods(start: NaiveDate, end: NaiveDate, period_type: PeriodType) -> Vec<PeriodWindow> {
    tile_periods_by_days(start, end, period_type.days())
}

pub fn tile_periods_by_days(start: NaiveDate, end: NaiveDate, period_days: i64) -> Vec<PeriodWindow> {
    let step = period_days.max(1);
    let mut windows = Vec::new();
    let mut current = start;

    while current <= end {
        let window_end = (current + Duration::days(step - 1)).min(end);
        windows.push(PeriodWindow {
            start: current,
            end: window_end,
        });
        current = window_end + Duration::days(1);
    }

    windows
}
