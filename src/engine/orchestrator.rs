// ==========================================
// 经销商导出数据校验系统 - 流水线编排器
// ==========================================
// 用途: 扫描 → 加载 → 校验 → 闸门 → 报表聚合
// 红线: 全部网点校验完成后才允许生成报表; 闸门不通过则不生成任何报表
// 并发: 单线程,按网点顺序执行; 网点间无共享可变状态
// ==========================================

use crate::config::RunConfig;
use crate::domain::location::Location;
use crate::domain::report::LocationReports;
use crate::domain::verdict::{LocationVerdict, ReadIssue};
use crate::engine::coverage_validator::CoverageValidator;
use crate::engine::cross_sum_validator::CrossSumValidator;
use crate::engine::gate::{
    decide, GateDecision, InputSignature, LocationOutcome, OverrideGrant, RunVerdict,
};
use crate::engine::period::{tile_periods, PeriodWindow};
use crate::engine::presence_validator::PresenceValidator;
use crate::engine::report_aggregator::ReportAggregator;
use crate::importer::error::ImportResult;
use crate::importer::location_loader::{LocationData, LocationLoader};
use crate::importer::location_scanner::scan_locations;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RunControl - 运行控制（粗粒度取消）
// ==========================================
// 在每个网点的校验与报表生成之前检查; 报表阶段取消时丢弃已生成的报表
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    stop: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

// ==========================================
// ProgressSink - 进度回调
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Generating,
}

pub trait ProgressSink: Send + Sync {
    /// 开始处理第 index 个网点（1 起）
    fn on_location(&self, stage: PipelineStage, index: usize, total: usize, location: &Location);
}

/// 默认进度输出: 写入日志
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_location(&self, stage: PipelineStage, index: usize, total: usize, location: &Location) {
        debug!(stage = ?stage, index, total, location = %location, "处理进度");
    }
}

// ==========================================
// RunOutcome - 单次运行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: String,
    pub signature: InputSignature,
    pub verdict: RunVerdict,
    pub decision: GateDecision,
    /// 闸门通过时才非空
    pub reports: Vec<LocationReports>,
    /// 报表阶段发现的读取问题（缺列等）
    pub report_issues: Vec<ReadIssue>,
}

// ==========================================
// Pipeline - 流水线
// ==========================================
pub struct Pipeline {
    config: RunConfig,
    loader: LocationLoader<crate::importer::ExcelParser, crate::importer::FieldMapper>,
    presence: PresenceValidator,
    coverage: CoverageValidator,
    cross_sum: CrossSumValidator,
    control: RunControl,
    progress: Box<dyn ProgressSink>,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        let cross_sum = CrossSumValidator::new(config.qty_tolerance);
        Self {
            config,
            loader: LocationLoader::new(),
            presence: PresenceValidator::new(),
            coverage: CoverageValidator::new(),
            cross_sum,
            control: RunControl::new(),
            progress: Box::new(TracingProgress),
        }
    }

    pub fn with_control(mut self, control: RunControl) -> Self {
        self.control = control;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn signature(&self, input_name: &str) -> InputSignature {
        InputSignature::new(input_name, &self.config)
    }

    /// 单网点校验（齐套 / 期间覆盖 / 数量对账 + 读取问题）
    pub fn validate_location(&self, data: &LocationData, windows: &[PeriodWindow]) -> LocationVerdict {
        let missing_files = self.presence.validate(data);
        let coverage = self.coverage.validate(data, windows);
        let cross_sum = self.cross_sum.validate(data);

        LocationVerdict {
            missing_files,
            period_errors: coverage.errors,
            period_log: coverage.log,
            period_check_skipped: coverage.skipped,
            mismatch_errors: cross_sum.errors,
            mismatch_log: cross_sum.log,
            read_issues: data.issues.clone(),
        }
    }

    /// 执行一次完整运行
    ///
    /// # 参数
    /// - input_root: 已解压的输入根目录
    /// - input_name: 输入标识（用于签名,如上传的压缩包名）
    /// - grant: 人工放行（仅对相同签名有效）; 配置 continue_anyway 视为对本次签名的放行
    ///
    /// # 返回
    /// - Err: 输入根目录不存在或不可读
    #[instrument(skip(self, input_root, grant), fields(input = input_name))]
    pub fn run(
        &self,
        input_root: &Path,
        input_name: &str,
        grant: Option<&OverrideGrant>,
    ) -> ImportResult<RunOutcome> {
        let run_id = Uuid::new_v4().to_string();
        let signature = self.signature(input_name);
        info!(run_id = %run_id, signature = %signature, "开始运行");

        // ===== 阶段 1: 扫描 =====
        let locations = scan_locations(input_root)?;
        let windows = tile_periods(
            self.config.start_date,
            self.config.end_date,
            self.config.period_type,
        );
        debug!(windows = windows.len(), "期间窗口切分完成");

        // ===== 阶段 2: 逐网点加载 + 校验 =====
        let total = locations.len();
        let mut loaded: Vec<LocationData> = Vec::with_capacity(total);
        let mut outcomes: Vec<LocationOutcome> = Vec::with_capacity(total);

        for (idx, location) in locations.iter().enumerate() {
            if self.control.is_stopped() {
                warn!(processed = idx, total, "运行已取消");
                break;
            }
            self.progress
                .on_location(PipelineStage::Validating, idx + 1, total, location);

            let data = self.loader.load(location);
            let verdict = self.validate_location(&data, &windows);
            if verdict.has_hard_failure() {
                warn!(location = %location, mismatches = verdict.mismatch_errors.len(), "网点数量对账失败");
            } else if verdict.has_soft_failure() {
                info!(
                    location = %location,
                    missing_files = verdict.missing_files.len(),
                    period_errors = verdict.period_errors.len(),
                    "网点存在软校验问题"
                );
            }
            outcomes.push(LocationOutcome {
                location: location.clone(),
                verdict,
            });
            loaded.push(data);
        }

        // ===== 阶段 3: 闸门 =====
        let verdict = RunVerdict::fold(&outcomes);
        let config_grant = self
            .config
            .continue_anyway
            .then(|| OverrideGrant::for_signature(signature.clone()));
        // 签名不符的放行不遮蔽配置放行
        let grant = grant
            .filter(|g| g.applies_to(&signature))
            .or(config_grant.as_ref());

        let mut decision = if self.control.is_stopped() {
            GateDecision::Cancelled
        } else {
            decide(&verdict, &signature, grant)
        };

        info!(
            locations = verdict.location_count,
            missing_files = verdict.missing_files.len(),
            period_errors = verdict.period_errors.len(),
            mismatches = verdict.mismatch_errors.len(),
            read_issues = verdict.read_issues.len(),
            decision = ?decision,
            "校验完成"
        );

        // ===== 阶段 4: 报表聚合 =====
        let mut reports = Vec::new();
        let mut report_issues = Vec::new();
        if decision.can_process() {
            let aggregator = ReportAggregator::new(&self.config);
            for (idx, data) in loaded.iter().enumerate() {
                self.progress
                    .on_location(PipelineStage::Generating, idx + 1, total, &data.location);
                if self.control.is_stopped() {
                    warn!(generated = idx, total, "报表生成已取消");
                    decision = GateDecision::Cancelled;
                    reports.clear();
                    report_issues.clear();
                    break;
                }
                let result = aggregator.aggregate(data);
                reports.push(result.reports);
                report_issues.extend(result.issues);
            }
            if decision.can_process() {
                info!(reports = reports.len(), "报表生成完成");
            }
        }

        Ok(RunOutcome {
            run_id,
            signature,
            verdict,
            decision,
            reports,
            report_issues,
        })
    }
}
