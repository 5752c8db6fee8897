// ==========================================
// 经销商导出数据校验系统 - 报表工作簿写出
// ==========================================
// 职责: 报表行 → .xlsx 工作簿
// 布局:
//   - OEM: "Check Order status"（活动页）+ "sheet1"（全量数据）
//   - Stock / Pending: "Sheet1"
// ==========================================

use crate::domain::report::{
    order_check_summary, LocationReports, OemReportRow, PendingReportRow, StockReportRow,
    TabularRow,
};
use crate::domain::table::CellValue;
use crate::domain::types::ReportKind;
use crate::export::error::ExportResult;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

pub const ORDER_CHECK_SHEET: &str = "Check Order status";
pub const OEM_DATA_SHEET: &str = "sheet1";
pub const DEFAULT_SHEET: &str = "Sheet1";

// ==========================================
// ReportTable - 单个报表（借用报表行）
// ==========================================
#[derive(Debug, Clone, Copy)]
pub enum ReportTable<'a> {
    Oem(&'a [OemReportRow]),
    Stock(&'a [StockReportRow]),
    Pending(&'a [PendingReportRow]),
}

impl<'a> ReportTable<'a> {
    /// 取网点的某类报表; 未生成时返回 None
    pub fn from_reports(reports: &'a LocationReports, kind: ReportKind) -> Option<Self> {
        match kind {
            ReportKind::Oem => reports.oem.as_deref().map(ReportTable::Oem),
            ReportKind::Stock => reports.stock.as_deref().map(ReportTable::Stock),
            ReportKind::Pending => reports.pending.as_deref().map(ReportTable::Pending),
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportTable::Oem(_) => ReportKind::Oem,
            ReportTable::Stock(_) => ReportKind::Stock,
            ReportTable::Pending(_) => ReportKind::Pending,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ReportTable::Oem(rows) => rows.len(),
            ReportTable::Stock(rows) => rows.len(),
            ReportTable::Pending(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// 构建工作簿
    pub fn to_workbook(&self) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();
        match self {
            ReportTable::Oem(rows) => {
                let summary = order_check_summary(rows);
                let check_sheet = write_sheet(&mut workbook, ORDER_CHECK_SHEET, &summary)?;
                check_sheet.set_active(true);
                write_sheet(&mut workbook, OEM_DATA_SHEET, rows)?;
            }
            ReportTable::Stock(rows) => {
                write_sheet(&mut workbook, DEFAULT_SHEET, rows)?;
            }
            ReportTable::Pending(rows) => {
                write_sheet(&mut workbook, DEFAULT_SHEET, rows)?;
            }
        }
        Ok(workbook)
    }

    /// 写出到文件
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let mut workbook = self.to_workbook()?;
        workbook.save(path)?;
        Ok(())
    }

    /// 写出到内存（压缩包打包用）
    pub fn to_buffer(&self) -> ExportResult<Vec<u8>> {
        let mut workbook = self.to_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }
}

/// 写入一个工作表: 首行表头,其后逐行数据
fn write_sheet<'w, T: TabularRow>(
    workbook: &'w mut Workbook,
    name: &str,
    rows: &[T],
) -> ExportResult<&'w mut Worksheet> {
    let worksheet = workbook.add_worksheet().set_name(name)?;

    for (col, header) in T::headers().iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell)?;
        }
    }
    Ok(worksheet)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> ExportResult<()> {
    match cell {
        CellValue::Null => {}
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Text(_) | CellValue::Date(_) => {
            worksheet.write_string(row, col, cell.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::Location;
    use crate::domain::types::Remark;
    use calamine::{open_workbook, Reader, Xlsx};
    use tempfile::TempDir;

    fn oem_row(order: &str, remark: Option<Remark>) -> OemReportRow {
        OemReportRow {
            brand: "HY".to_string(),
            dealer: "D1".to_string(),
            location: "L1".to_string(),
            order_number: order.to_string(),
            part_number: "AB123".to_string(),
            order_date: None,
            po_qty: CellValue::Number(5.0),
            remark,
            source_file: None,
        }
    }

    #[test]
    fn test_oem_workbook_sheets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("OEM_HY_D1_L1.xlsx");
        let rows = vec![
            oem_row("PO1", Some(Remark::PlsCheck)),
            oem_row("PO1", Some(Remark::PlsCheck)),
            oem_row("PO2", Some(Remark::Ok)),
        ];
        ReportTable::Oem(&rows).save(&path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![ORDER_CHECK_SHEET, OEM_DATA_SHEET]);

        let summary = workbook.worksheet_range(ORDER_CHECK_SHEET).unwrap();
        assert_eq!(summary.height(), 2);

        let data = workbook.worksheet_range(OEM_DATA_SHEET).unwrap();
        assert_eq!(data.height(), 4);
        assert_eq!(data.width(), OemReportRow::headers().len());
    }

    #[test]
    fn test_empty_stock_writes_header_only() {
        let reports = LocationReports {
            location: Location::new("HY", "D1", "L1", "/tmp"),
            oem: None,
            stock: Some(Vec::new()),
            pending: None,
        };
        assert!(ReportTable::from_reports(&reports, ReportKind::Oem).is_none());

        let table = ReportTable::from_reports(&reports, ReportKind::Stock).unwrap();
        assert!(table.is_empty());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Stock.xlsx");
        table.save(&path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![DEFAULT_SHEET]);
        let range = workbook.worksheet_range(DEFAULT_SHEET).unwrap();
        assert_eq!(range.height(), 1);
    }
}
