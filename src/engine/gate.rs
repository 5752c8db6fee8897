// ==========================================
// 经销商导出数据校验系统 - 运行闸门
// ==========================================
// 职责: 汇总各网点校验结论 → 运行级结论 → 是否允许生成报表
// 规则: can_process = !硬阻断 && (人工放行 || (无缺失文件 && 无缺失期间))
// 红线: 硬阻断（数量不一致）不接受人工放行; 读取问题不参与闸门判定
// ==========================================

use crate::config::RunConfig;
use crate::domain::location::Location;
use crate::domain::verdict::{
    LocationVerdict, MissingPeriodRecord, QuantityMismatchRecord, ReadIssue,
};
use serde::Serialize;
use std::fmt;

/// 软校验问题在摘要中预览的条数
pub const SOFT_PREVIEW_LIMIT: usize = 2;

// ==========================================
// LocationOutcome - 单网点校验产出（不可变）
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct LocationOutcome {
    pub location: Location,
    pub verdict: LocationVerdict,
}

// ==========================================
// RunVerdict - 运行级结论（由网点产出显式折叠）
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunVerdict {
    pub location_count: usize,
    pub missing_files: Vec<String>,
    pub period_errors: Vec<String>,
    pub period_log: Vec<MissingPeriodRecord>,
    pub period_checks_skipped: Vec<String>,
    pub mismatch_errors: Vec<String>,
    pub mismatch_log: Vec<QuantityMismatchRecord>,
    pub read_issues: Vec<ReadIssue>,
}

impl RunVerdict {
    /// 按网点顺序折叠
    pub fn fold<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a LocationOutcome>,
    {
        outcomes
            .into_iter()
            .fold(RunVerdict::default(), |mut acc, outcome| {
                let v = &outcome.verdict;
                acc.location_count += 1;
                acc.missing_files.extend(v.missing_files.iter().cloned());
                acc.period_errors.extend(v.period_errors.iter().cloned());
                acc.period_log.extend(v.period_log.iter().cloned());
                if v.period_check_skipped {
                    acc.period_checks_skipped.push(outcome.location.key());
                }
                acc.mismatch_errors.extend(v.mismatch_errors.iter().cloned());
                acc.mismatch_log.extend(v.mismatch_log.iter().cloned());
                acc.read_issues.extend(v.read_issues.iter().cloned());
                acc
            })
    }

    /// 任一网点数量不一致 → 全局阻断
    pub fn hard_block(&self) -> bool {
        !self.mismatch_errors.is_empty()
    }

    pub fn has_soft_failures(&self) -> bool {
        !self.missing_files.is_empty() || !self.period_errors.is_empty()
    }

    /// 软校验问题预览（各取前 N 条）
    pub fn soft_preview(&self, limit: usize) -> Vec<&str> {
        self.missing_files
            .iter()
            .take(limit)
            .chain(self.period_errors.iter().take(limit))
            .map(String::as_str)
            .collect()
    }
}

// ==========================================
// InputSignature - 输入签名
// ==========================================
// 格式: "{input}|{start}|{end}|{period}|{sorted categories}"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InputSignature(String);

impl InputSignature {
    pub fn new(input_name: &str, config: &RunConfig) -> Self {
        Self(format!(
            "{}|{}|{}|{}|{}",
            input_name,
            config.start_date,
            config.end_date,
            config.period_type,
            config.select_categories.sorted_names().join(",")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// OverrideGrant - 人工放行（绑定到签名）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideGrant {
    signature: InputSignature,
}

impl OverrideGrant {
    pub fn for_signature(signature: InputSignature) -> Self {
        Self { signature }
    }

    pub fn applies_to(&self, signature: &InputSignature) -> bool {
        &self.signature == signature
    }
}

// ==========================================
// GateDecision - 闸门结论
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateDecision {
    /// 允许生成报表
    Proceed,
    /// 存在软校验问题,需人工放行
    NeedsOverride,
    /// 数量不一致,全局阻断
    Blocked,
    /// 运行被取消
    Cancelled,
}

impl GateDecision {
    pub fn can_process(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}

/// 闸门判定
///
/// 与签名不匹配的放行视为未放行
pub fn decide(
    verdict: &RunVerdict,
    signature: &InputSignature,
    grant: Option<&OverrideGrant>,
) -> GateDecision {
    if verdict.hard_block() {
        return GateDecision::Blocked;
    }
    let overridden = grant.is_some_and(|g| g.applies_to(signature));
    if overridden || !verdict.has_soft_failures() {
        GateDecision::Proceed
    } else {
        GateDecision::NeedsOverride
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn outcome(site: &str, verdict: LocationVerdict) -> LocationOutcome {
        LocationOutcome {
            location: Location::new("HY", "D1", site, "/tmp"),
            verdict,
        }
    }

    fn config() -> RunConfig {
        RunConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    #[test]
    fn test_fold_preserves_order() {
        let a = LocationVerdict {
            missing_files: vec!["a".to_string()],
            ..Default::default()
        };
        let b = LocationVerdict {
            missing_files: vec!["b".to_string()],
            period_check_skipped: true,
            ..Default::default()
        };
        let outcomes = vec![outcome("L1", a), outcome("L2", b)];
        let verdict = RunVerdict::fold(&outcomes);

        assert_eq!(verdict.location_count, 2);
        assert_eq!(verdict.missing_files, vec!["a", "b"]);
        assert_eq!(verdict.period_checks_skipped, vec!["HY/D1/L2"]);
    }

    #[test]
    fn test_hard_block_ignores_override() {
        let v = LocationVerdict {
            mismatch_errors: vec!["L1: mismatch".to_string()],
            ..Default::default()
        };
        let verdict = RunVerdict::fold(&[outcome("L1", v)]);
        let sig = InputSignature::new("input.zip", &config());
        let grant = OverrideGrant::for_signature(sig.clone());

        assert_eq!(decide(&verdict, &sig, Some(&grant)), GateDecision::Blocked);
    }

    #[test]
    fn test_soft_failure_needs_matching_override() {
        let v = LocationVerdict {
            period_errors: vec!["L1: OEM missing".to_string()],
            ..Default::default()
        };
        let verdict = RunVerdict::fold(&[outcome("L1", v)]);
        let sig = InputSignature::new("input.zip", &config());
        let other = InputSignature::new("other.zip", &config());

        assert_eq!(decide(&verdict, &sig, None), GateDecision::NeedsOverride);
        assert_eq!(
            decide(&verdict, &sig, Some(&OverrideGrant::for_signature(other))),
            GateDecision::NeedsOverride
        );
        assert_eq!(
            decide(&verdict, &sig, Some(&OverrideGrant::for_signature(sig.clone()))),
            GateDecision::Proceed
        );
    }

    #[test]
    fn test_read_issues_do_not_gate() {
        let v = LocationVerdict {
            read_issues: vec![ReadIssue {
                location: "HY/D1/L1".to_string(),
                file_name: "stock.csv".to_string(),
                category: crate::domain::types::FileCategory::Stock,
                kind: crate::domain::verdict::ReadIssueKind::UnsupportedFormat,
                message: "File not Excel Workbook and .xlsx extention For : stock.csv".to_string(),
            }],
            ..Default::default()
        };
        let verdict = RunVerdict::fold(&[outcome("L1", v)]);
        let sig = InputSignature::new("input.zip", &config());
        assert_eq!(decide(&verdict, &sig, None), GateDecision::Proceed);
    }

    #[test]
    fn test_signature_format() {
        let mut cfg = config();
        cfg.select_categories = crate::config::CategorySelection(vec![
            crate::domain::types::PartCategory::Spares,
            crate::domain::types::PartCategory::Accessories,
        ]);
        let sig = InputSignature::new("upload.zip", &cfg);
        assert_eq!(sig.as_str(), "upload.zip|2025-04-01|2025-06-30|Day|Accessories,Spares");
    }
}
