// ==========================================
// 经销商导出数据校验系统 - 期间覆盖校验
// ==========================================
// 职责: 每个期间窗口内,各核心类别至少有一条日期落在窗口内的记录
// 级别: 软校验,可人工放行
// 规则:
//   - BO LIST / 收货待处理明细 / 当日收货明细 / 调拨清单 任一类别无文件 → 跳过该网点
//   - MRN 恒视为已覆盖
//   - 日期列缺失或读取失败的表不贡献覆盖
// ==========================================

use crate::domain::types::FileCategory;
use crate::domain::verdict::{location_columns, MissingPeriodRecord};
use crate::engine::period::PeriodWindow;
use crate::importer::location_loader::LocationData;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// 覆盖标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoverageSource {
    Category(FileCategory),
    /// 物料收货单（本品牌无此导出,恒视为覆盖）
    Mrn,
}

/// 输出顺序即缺失标签顺序
const COVERAGE_SOURCES: [(CoverageSource, &str); 5] = [
    (CoverageSource::Category(FileCategory::BoList), "OEM"),
    (CoverageSource::Mrn, "MRN"),
    (
        CoverageSource::Category(FileCategory::ReceivingPendingDetail),
        "Receiving Pending Detail",
    ),
    (
        CoverageSource::Category(FileCategory::ReceivingTodayDetail),
        "Receiving Today Detail",
    ),
    (CoverageSource::Category(FileCategory::TransferList), "Transfer list"),
];

/// 存在性前置类别（按文件名判定）
const REQUIRED_FOR_COVERAGE: [FileCategory; 4] = [
    FileCategory::BoList,
    FileCategory::ReceivingPendingDetail,
    FileCategory::ReceivingTodayDetail,
    FileCategory::TransferList,
];

// ==========================================
// CoverageOutcome - 单网点覆盖校验结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageOutcome {
    pub skipped: bool,
    pub errors: Vec<String>,
    pub log: Vec<MissingPeriodRecord>,
}

pub struct CoverageValidator;

impl CoverageValidator {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, data, windows), fields(location = %data.location, windows = windows.len()))]
    pub fn validate(&self, data: &LocationData, windows: &[PeriodWindow]) -> CoverageOutcome {
        if REQUIRED_FOR_COVERAGE
            .iter()
            .any(|category| !data.has_files(*category))
        {
            debug!("核心类别文件不全,跳过期间校验");
            return CoverageOutcome {
                skipped: true,
                ..CoverageOutcome::default()
            };
        }

        // 各类别出现过的日期
        let dates_by_source: Vec<(CoverageSource, &str, BTreeSet<NaiveDate>)> = COVERAGE_SOURCES
            .iter()
            .map(|(source, label)| {
                let dates = match source {
                    CoverageSource::Category(category) => collect_dates(data, *category),
                    CoverageSource::Mrn => BTreeSet::new(),
                };
                (*source, *label, dates)
            })
            .collect();

        let (brand, dealer, site) = location_columns(&data.location);
        let mut outcome = CoverageOutcome::default();

        for window in windows {
            let missing_in: Vec<&str> = dates_by_source
                .iter()
                .filter(|(source, _, dates)| match source {
                    CoverageSource::Mrn => false,
                    CoverageSource::Category(_) => {
                        dates.range(window.start..=window.end).next().is_none()
                    }
                })
                .map(|(_, label, _)| *label)
                .collect();

            if missing_in.is_empty() {
                continue;
            }

            outcome.log.push(MissingPeriodRecord {
                brand: brand.clone(),
                dealer: dealer.clone(),
                location: site.clone(),
                period: window.to_string(),
                missing_in: missing_in.join(", "),
            });
            outcome.errors.push(format!(
                "{}: {} missing for period {}",
                site,
                missing_in.join(" and "),
                window
            ));
        }

        outcome
    }
}

impl Default for CoverageValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 类别下所有可读表的非空日期
fn collect_dates(data: &LocationData, category: FileCategory) -> BTreeSet<NaiveDate> {
    let Some(date_column) = category.date_column() else {
        return BTreeSet::new();
    };
    data.tables_of(category)
        .filter_map(|table| table.column_values(date_column))
        .flatten()
        .filter_map(|value| value.as_date())
        .collect()
}
