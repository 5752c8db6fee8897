// ==========================================
// 经销商导出数据校验系统 - 校验日志 CSV
// ==========================================
// 职责: 期间缺失日志 / 数量不一致日志 写出
// 说明: 无记录时仍写出表头行
// ==========================================

use crate::domain::verdict::{MissingPeriodRecord, QuantityMismatchRecord};
use crate::export::error::ExportResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const VALIDATION_LOG_FILE: &str = "validation_issues_log.csv";
pub const MISMATCH_LOG_FILE: &str = "quantity_mismatch_log.csv";

const PERIOD_LOG_HEADERS: [&str; 5] = ["Brand", "Dealer", "Location", "Period", "Missing In"];
const MISMATCH_LOG_HEADERS: [&str; 7] = [
    "Brand",
    "Dealer",
    "Location",
    "Check",
    "List_Sum",
    "Detail_Sum",
    "Difference",
];

/// 写出 CSV: 显式表头 + 逐条序列化
pub fn write_records<W: Write, T: Serialize>(
    writer: W,
    headers: &[&str],
    records: &[T],
) -> ExportResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(headers)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_period_log(path: &Path, records: &[MissingPeriodRecord]) -> ExportResult<()> {
    let file = File::create(path)?;
    write_records(file, &PERIOD_LOG_HEADERS, records)
}

pub fn write_mismatch_log(path: &Path, records: &[QuantityMismatchRecord]) -> ExportResult<()> {
    let file = File::create(path)?;
    write_records(file, &MISMATCH_LOG_HEADERS, records)
}
