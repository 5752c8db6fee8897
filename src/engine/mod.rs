// ==========================================
// 经销商导出数据校验系统 - 引擎层
// ==========================================
// 职责: 校验规则 / 运行闸门 / 报表聚合 / 流水线编排
// 红线: 所有校验失败必须输出可读消息与日志行
// ==========================================

pub mod coverage_validator;
pub mod cross_sum_validator;
pub mod gate;
pub mod orchestrator;
pub mod period;
pub mod presence_validator;
pub mod report_aggregator;

// 重导出核心引擎
pub use coverage_validator::{CoverageOutcome, CoverageValidator};
pub use cross_sum_validator::{CrossSumOutcome, CrossSumValidator};
pub use gate::{
    decide, GateDecision, InputSignature, LocationOutcome, OverrideGrant, RunVerdict,
    SOFT_PREVIEW_LIMIT,
};
pub use orchestrator::{
    Pipeline, PipelineStage, ProgressSink, RunControl, RunOutcome, TracingProgress,
};
pub use period::{tile_periods, PeriodWindow};
pub use presence_validator::PresenceValidator;
pub use report_aggregator::{AggregationResult, ReportAggregator};
