// ==========================================
// 经销商导出数据校验系统 - 报表领域模型
// ==========================================
// 职责: OEM(欠单) / Stock(库存) / Pending(调拨在途) 报表行
// 用途: 聚合引擎写入,导出层只读
// ==========================================

use crate::domain::location::Location;
use crate::domain::table::CellValue;
use crate::domain::types::{Remark, ReportKind};
use serde::Serialize;

/// 可导出为表格的报表行
pub trait TabularRow {
    /// 表头（顺序即输出列顺序）
    fn headers() -> &'static [&'static str];

    /// 行单元格（与 headers 一一对应）
    fn cells(&self) -> Vec<CellValue>;
}

// ==========================================
// OemReportRow - 欠单报表行
// ==========================================
// BO LIST 行: POQty 为在途计算值, Remark 为 Ok/Pls Check/Unclassified
// 收货明细行: POQty 为原始 ACCEPT QTY, Remark 为空, SourceFile 记录来源文件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OemReportRow {
    pub brand: String,
    pub dealer: String,
    pub location: String,
    pub order_number: String,
    pub part_number: String,
    pub order_date: Option<chrono::NaiveDate>,
    pub po_qty: CellValue,
    pub remark: Option<Remark>,
    pub source_file: Option<String>,
}

impl OemReportRow {
    pub fn is_pls_check(&self) -> bool {
        self.remark == Some(Remark::PlsCheck)
    }
}

impl TabularRow for OemReportRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Brand",
            "Dealer",
            "Location",
            "OrderNumber",
            "PartNumber",
            "OrderDate",
            "POQty",
            "Remark",
            "SourceFile",
            "OEMInvoiceNo",
            "OEMInvoiceDate",
            "OEMInvoiceQty",
        ]
    }

    fn cells(&self) -> Vec<CellValue> {
        let text = |s: &str| CellValue::Text(s.to_string());
        vec![
            text(&self.brand),
            text(&self.dealer),
            text(&self.location),
            text(&self.order_number),
            text(&self.part_number),
            self.order_date
                .map(|d| CellValue::Text(d.format("%d %b %Y").to_string()))
                .unwrap_or(CellValue::Null),
            self.po_qty.clone(),
            self.remark
                .and_then(|r| r.label())
                .map(text)
                .unwrap_or(CellValue::Null),
            self.source_file
                .as_deref()
                .map(text)
                .unwrap_or(CellValue::Null),
            // OEM 发票三列保留为空,由下游回填
            CellValue::Null,
            CellValue::Null,
            CellValue::Null,
        ]
    }
}

// ==========================================
// OrderCheckRow - "Check Order status" 汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCheckRow {
    pub location: String,
    pub order_number: String,
}

impl OrderCheckRow {
    /// 无 Pls Check 行时的占位行
    pub fn placeholder() -> Self {
        Self {
            location: "—".to_string(),
            order_number: "No \"Pls Check\" rows".to_string(),
        }
    }
}

impl TabularRow for OrderCheckRow {
    fn headers() -> &'static [&'static str] {
        &["Location", "OrderNumber"]
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.location.clone()),
            CellValue::Text(self.order_number.clone()),
        ]
    }
}

/// Pls Check 行按 (Location, OrderNumber) 去重,保持首次出现顺序
pub fn order_check_summary(rows: &[OemReportRow]) -> Vec<OrderCheckRow> {
    let mut summary: Vec<OrderCheckRow> = Vec::new();
    for row in rows.iter().filter(|r| r.is_pls_check()) {
        let candidate = OrderCheckRow {
            location: row.location.clone(),
            order_number: row.order_number.clone(),
        };
        if !summary.contains(&candidate) {
            summary.push(candidate);
        }
    }
    if summary.is_empty() {
        summary.push(OrderCheckRow::placeholder());
    }
    summary
}

// ==========================================
// StockReportRow - 库存报表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReportRow {
    pub brand: String,
    pub dealer: String,
    pub location: String,
    pub part_number: String,
    pub qty: CellValue,
}

impl TabularRow for StockReportRow {
    fn headers() -> &'static [&'static str] {
        &["Brand", "Dealer", "Location", "Partnumber", "Qty"]
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.brand.clone()),
            CellValue::Text(self.dealer.clone()),
            CellValue::Text(self.location.clone()),
            CellValue::Text(self.part_number.clone()),
            self.qty.clone(),
        ]
    }
}

// ==========================================
// PendingReportRow - 调拨在途报表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingReportRow {
    pub brand: String,
    pub dealer: String,
    pub location: String,
    pub part_number: String,
    pub qty: CellValue,
}

impl TabularRow for PendingReportRow {
    fn headers() -> &'static [&'static str] {
        &["Brand", "Dealer", "Location", "PartNumber", "Qty"]
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.brand.clone()),
            CellValue::Text(self.dealer.clone()),
            CellValue::Text(self.location.clone()),
            CellValue::Text(self.part_number.clone()),
            self.qty.clone(),
        ]
    }
}

// ==========================================
// LocationReports - 单网点报表集合
// ==========================================
// None 表示该网点没有对应来源文件,不输出该报表
#[derive(Debug, Clone, Serialize)]
pub struct LocationReports {
    pub location: Location,
    pub oem: Option<Vec<OemReportRow>>,
    pub stock: Option<Vec<StockReportRow>>,
    pub pending: Option<Vec<PendingReportRow>>,
}

impl LocationReports {
    /// 输出文件名: {Kind}_{brand}_{dealer}_{site}.xlsx
    pub fn file_name(&self, kind: ReportKind) -> String {
        format!(
            "{}_{}_{}_{}.xlsx",
            kind.file_prefix(),
            self.location.brand,
            self.location.dealer,
            self.location.site
        )
    }

    /// 已生成的报表种类
    pub fn kinds(&self) -> Vec<ReportKind> {
        let mut kinds = Vec::new();
        if self.oem.is_some() {
            kinds.push(ReportKind::Oem);
        }
        if self.stock.is_some() {
            kinds.push(ReportKind::Stock);
        }
        if self.pending.is_some() {
            kinds.push(ReportKind::Pending);
        }
        kinds
    }
}
