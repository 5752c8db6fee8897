// ==========================================
// 经销商导出数据校验系统 - 运行产出写出
// ==========================================
// 职责: 将一次运行的结果写入输出目录
//   1. 校验日志 CSV（始终写出）
//   2. 网点报表工作簿（闸门通过时）
//   3. 经销商合并报表压缩包（闸门通过时）
// ==========================================

use crate::domain::report::LocationReports;
use crate::engine::orchestrator::RunOutcome;
use crate::export::bundle::{DealerBundle, COMBINED_ARCHIVE_NAME};
use crate::export::csv_log::{
    write_mismatch_log, write_period_log, MISMATCH_LOG_FILE, VALIDATION_LOG_FILE,
};
use crate::export::error::{ExportError, ExportResult};
use crate::export::xlsx_writer::ReportTable;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 写出结果清单
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub validation_log: Option<PathBuf>,
    pub mismatch_log: Option<PathBuf>,
    pub location_reports: Vec<PathBuf>,
    pub combined_archive: Option<PathBuf>,
    pub combined_workbooks: usize,
}

pub struct ReportExporter {
    out_dir: PathBuf,
}

impl ReportExporter {
    /// 创建导出器（输出目录不存在时自动创建）
    pub fn new(out_dir: impl Into<PathBuf>) -> ExportResult<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)
            .map_err(|e| ExportError::InvalidOutputDir(format!("{}: {}", out_dir.display(), e)))?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// 单网点报表写出,空报表也写出（仅表头）
    pub fn write_location_reports(&self, reports: &LocationReports) -> ExportResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let tables = reports
            .kinds()
            .into_iter()
            .filter_map(|kind| ReportTable::from_reports(reports, kind));
        for table in tables {
            let path = self.out_dir.join(reports.file_name(table.kind()));
            table.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// 写出一次运行的全部产出
    #[instrument(skip(self, outcome), fields(run_id = %outcome.run_id))]
    pub fn export_run(&self, outcome: &RunOutcome) -> ExportResult<ExportSummary> {
        let mut summary = ExportSummary::default();

        let period_path = self.out_dir.join(VALIDATION_LOG_FILE);
        write_period_log(&period_path, &outcome.verdict.period_log)?;
        summary.validation_log = Some(period_path);

        let mismatch_path = self.out_dir.join(MISMATCH_LOG_FILE);
        write_mismatch_log(&mismatch_path, &outcome.verdict.mismatch_log)?;
        summary.mismatch_log = Some(mismatch_path);

        if !outcome.decision.can_process() {
            info!(decision = ?outcome.decision, "闸门未通过,仅写出校验日志");
            return Ok(summary);
        }

        for reports in &outcome.reports {
            summary
                .location_reports
                .extend(self.write_location_reports(reports)?);
        }

        let bundle = DealerBundle::collect(&outcome.reports);
        let archive_path = self.out_dir.join(COMBINED_ARCHIVE_NAME);
        summary.combined_workbooks = bundle.save_zip(&archive_path)?;
        summary.combined_archive = Some(archive_path);

        info!(
            location_reports = summary.location_reports.len(),
            combined = summary.combined_workbooks,
            "运行产出写出完成"
        );
        Ok(summary)
    }
}
