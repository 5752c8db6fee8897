// ==========================================
// 经销商导出数据校验系统 - 经销商合并报表打包
// ==========================================
// 职责: 按 (报表种类, 品牌, 经销商) 合并全部网点的报表行 → 压缩包
// 规则:
//   - 分组键为结构化键,不解析文件名
//   - 空报表不参与合并; 合并后为空的分组不写出
//   - 文件名: {Kind}_{brand}_{dealer}.xlsx
// ==========================================

use crate::domain::report::{LocationReports, OemReportRow, PendingReportRow, StockReportRow};
use crate::domain::types::ReportKind;
use crate::export::error::ExportResult;
use crate::export::xlsx_writer::ReportTable;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const COMBINED_ARCHIVE_NAME: &str = "Combined_Dealerwise_Reports.zip";

type DealerKey = (String, String);

// ==========================================
// DealerBundle - 经销商维度合并结果
// ==========================================
#[derive(Debug, Default)]
pub struct DealerBundle {
    oem: BTreeMap<DealerKey, Vec<OemReportRow>>,
    stock: BTreeMap<DealerKey, Vec<StockReportRow>>,
    pending: BTreeMap<DealerKey, Vec<PendingReportRow>>,
}

impl DealerBundle {
    /// 按网点顺序合并
    pub fn collect(reports: &[LocationReports]) -> Self {
        let mut bundle = DealerBundle::default();
        for report in reports {
            let key = (report.location.brand.clone(), report.location.dealer.clone());
            if let Some(rows) = report.oem.as_ref().filter(|r| !r.is_empty()) {
                bundle.oem.entry(key.clone()).or_default().extend(rows.iter().cloned());
            }
            if let Some(rows) = report.stock.as_ref().filter(|r| !r.is_empty()) {
                bundle.stock.entry(key.clone()).or_default().extend(rows.iter().cloned());
            }
            if let Some(rows) = report.pending.as_ref().filter(|r| !r.is_empty()) {
                bundle.pending.entry(key).or_default().extend(rows.iter().cloned());
            }
        }
        bundle
    }

    /// 合并报表列表: (文件名, 报表)
    pub fn entries(&self) -> Vec<(String, ReportTable<'_>)> {
        let name = |kind: ReportKind, (brand, dealer): &DealerKey| {
            format!("{}_{}_{}.xlsx", kind.file_prefix(), brand, dealer)
        };

        let oem = self
            .oem
            .iter()
            .map(|(k, rows)| (name(ReportKind::Oem, k), ReportTable::Oem(rows)));
        let stock = self
            .stock
            .iter()
            .map(|(k, rows)| (name(ReportKind::Stock, k), ReportTable::Stock(rows)));
        let pending = self
            .pending
            .iter()
            .map(|(k, rows)| (name(ReportKind::Pending, k), ReportTable::Pending(rows)));

        oem.chain(stock).chain(pending).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.oem.is_empty() && self.stock.is_empty() && self.pending.is_empty()
    }

    /// 写出压缩包,返回写入的工作簿数量
    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> ExportResult<usize> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default();
        let entries = self.entries();

        for (file_name, table) in &entries {
            let bytes = table.to_buffer()?;
            debug!(file = %file_name, rows = table.row_count(), "写入合并报表");
            zip.start_file(file_name.as_str(), options)?;
            zip.write_all(&bytes)?;
        }
        zip.finish()?;
        Ok(entries.len())
    }

    pub fn save_zip(&self, path: &Path) -> ExportResult<usize> {
        let file = File::create(path)?;
        let count = self.write_zip(file)?;
        info!(path = %path.display(), workbooks = count, "合并报表压缩包已写出");
        Ok(count)
    }
}
