// ==========================================
// 经销商导出数据校验系统 - 报表聚合引擎
// ==========================================
// 职责: 单网点规范化表 → OEM / Stock / Pending 报表行
// 输入: LocationData (已加载) + 运行配置
// 输出: LocationReports + 报表阶段读取问题（缺列等）
// ==========================================
// OEM:
//   - BO LIST: PO DATE >= 基准日 - 90 天,计算在途/T/F/备注
//   - 收货明细(待处理+当日): ORDER DATE >= 基准日 - 60 天,原样带出
// Stock: 别名解析列 + PART TYPE 过滤
// Pending: 调拨明细中含 PART NO ? 与 QUANTITY 的表
// ==========================================

use crate::config::{RunConfig, MAX_LOOKBACK_DAYS};
use crate::domain::location::Location;
use crate::domain::report::{LocationReports, OemReportRow, PendingReportRow, StockReportRow};
use crate::domain::table::{CellValue, NormalizedTable, RowView};
use crate::domain::types::{FileCategory, Remark};
use crate::domain::verdict::{ReadIssue, ReadIssueKind};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::location_loader::LocationData;
use crate::importer::schema::{
    ACCEPT_QTY, BACK_ORDER, ORDER_DATE, ORDER_NO, PART_NO_CURRENT, PART_NO_SUPPLY, PO_DATE,
    PROCESSING_SHIPPED, PROCESSING_STAGES, QUANTITY_CURRENT, STOCK_PART_ALIASES,
    STOCK_QTY_ALIASES, STOCK_TYPE_COLUMN, TRANSFER_DETAIL_PART, TRANSFER_DETAIL_QTY,
};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument, warn};

/// BO LIST 报表必需列
const BO_LIST_REQUIRED: [&str; 5] = [
    ORDER_NO,
    PART_NO_CURRENT,
    PO_DATE,
    QUANTITY_CURRENT,
    "PROCESSING_ALLOCATION",
];

/// 收货明细报表必需列
const RECEIVING_DETAIL_REQUIRED: [&str; 4] = [ORDER_NO, PART_NO_SUPPLY, ORDER_DATE, ACCEPT_QTY];

// ==========================================
// AggregationResult
// ==========================================
#[derive(Debug, Clone)]
pub struct AggregationResult {
    pub reports: LocationReports,
    pub issues: Vec<ReadIssue>,
}

// ==========================================
// ReportAggregator - 报表聚合引擎
// ==========================================
pub struct ReportAggregator {
    today: NaiveDate,
    oem_lookback_days: i64,
    receiving_lookback_days: i64,
    stock_part_types: Option<&'static [&'static str]>,
    cleaner: DataCleaner,
}

impl ReportAggregator {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            today: config.effective_today(),
            oem_lookback_days: config.oem_lookback_days,
            receiving_lookback_days: config.receiving_lookback_days,
            stock_part_types: config.select_categories.stock_part_types(),
            cleaner: DataCleaner,
        }
    }

    #[instrument(skip(self, data), fields(location = %data.location))]
    pub fn aggregate(&self, data: &LocationData) -> AggregationResult {
        let mut issues = Vec::new();

        let oem = self.build_oem(data, &mut issues);
        let stock = self.build_stock(data, &mut issues);
        let pending = self.build_pending(data);

        info!(
            oem_rows = oem.as_ref().map_or(0, Vec::len),
            stock_rows = stock.as_ref().map_or(0, Vec::len),
            pending_rows = pending.as_ref().map_or(0, Vec::len),
            "网点报表聚合完成"
        );

        AggregationResult {
            reports: LocationReports {
                location: data.location.clone(),
                oem,
                stock,
                pending,
            },
            issues,
        }
    }

    // ==========================================
    // OEM 报表
    // ==========================================

    /// 无可用 BO LIST / 收货明细表时返回 None
    fn build_oem(&self, data: &LocationData, issues: &mut Vec<ReadIssue>) -> Option<Vec<OemReportRow>> {
        let mut contributed = false;
        let mut rows = Vec::new();

        let bo_cutoff = self.cutoff(self.oem_lookback_days);
        for table in data.tables_of(FileCategory::BoList) {
            if !check_required(table, &BO_LIST_REQUIRED, issues) {
                continue;
            }
            contributed = true;
            rows.extend(
                table
                    .rows()
                    .filter_map(|row| self.bo_list_row(&data.location, row, bo_cutoff)),
            );
        }

        let receiving_cutoff = self.cutoff(self.receiving_lookback_days);
        for category in [
            FileCategory::ReceivingPendingDetail,
            FileCategory::ReceivingTodayDetail,
        ] {
            for table in data.tables_of(category) {
                if !check_required(table, &RECEIVING_DETAIL_REQUIRED, issues) {
                    continue;
                }
                contributed = true;
                rows.extend(table.rows().filter_map(|row| {
                    self.receiving_row(&data.location, &table.source_file, row, receiving_cutoff)
                }));
            }
        }

        contributed.then_some(rows)
    }

    /// BO LIST 行 → OEM 行（PO DATE 为空或早于截止日返回 None）
    fn bo_list_row(&self, location: &Location, row: RowView<'_>, cutoff: NaiveDate) -> Option<OemReportRow> {
        let po_date = row.get(PO_DATE)?.as_date()?;
        if po_date < cutoff {
            return None;
        }

        let (remark, po_qty) = self.bo_list_remark(row);

        Some(OemReportRow {
            brand: location.brand.clone(),
            dealer: location.dealer.clone(),
            location: location.site.clone(),
            order_number: row.get(ORDER_NO).map(|v| v.to_string()).unwrap_or_default(),
            part_number: self.part_number(row.get(PART_NO_CURRENT)),
            order_date: Some(po_date),
            po_qty: CellValue::Number(po_qty),
            remark: Some(remark),
            source_file: None,
        })
    }

    /// 在途 = B/O + 五个处理阶段; T/F = (当前数量 == 已发运)
    ///
    /// | 在途 | T/F   | 备注       | POQty        |
    /// |------|-------|-----------|--------------|
    /// | 0    | true  | Ok        | 在途         |
    /// | > 0  | false | Ok        | 在途         |
    /// | 0    | false | Pls Check | 当前数量      |
    /// | 其他 |       | 未分类     | 在途         |
    pub fn bo_list_remark(&self, row: RowView<'_>) -> (Remark, f64) {
        let num = |column: &str| row.get(column).map_or(0.0, |v| self.cleaner.to_number(v));

        let transit = num(BACK_ORDER) + PROCESSING_STAGES.iter().map(|s| num(*s)).sum::<f64>();
        let quantity_current = num(QUANTITY_CURRENT);
        let fully_shipped = quantity_current == num(PROCESSING_SHIPPED);

        let remark = if transit == 0.0 && fully_shipped {
            Remark::Ok
        } else if transit > 0.0 && !fully_shipped {
            Remark::Ok
        } else if transit == 0.0 && !fully_shipped {
            Remark::PlsCheck
        } else {
            Remark::Unclassified
        };

        let po_qty = if remark == Remark::PlsCheck {
            quantity_current
        } else {
            transit
        };
        (remark, po_qty)
    }

    fn receiving_row(
        &self,
        location: &Location,
        source_file: &str,
        row: RowView<'_>,
        cutoff: NaiveDate,
    ) -> Option<OemReportRow> {
        let order_date = row.get(ORDER_DATE)?.as_date()?;
        if order_date < cutoff {
            return None;
        }

        Some(OemReportRow {
            brand: location.brand.clone(),
            dealer: location.dealer.clone(),
            location: location.site.clone(),
            order_number: row.get(ORDER_NO).map(|v| v.to_string()).unwrap_or_default(),
            part_number: self.part_number(row.get(PART_NO_SUPPLY)),
            order_date: Some(order_date),
            po_qty: row.get(ACCEPT_QTY).cloned().unwrap_or(CellValue::Null),
            remark: None,
            source_file: Some(source_file.to_string()),
        })
    }

    // ==========================================
    // Stock 报表
    // ==========================================

    fn build_stock(&self, data: &LocationData, issues: &mut Vec<ReadIssue>) -> Option<Vec<StockReportRow>> {
        let mut contributed = false;
        let mut rows = Vec::new();

        for table in data.tables_of(FileCategory::Stock) {
            let part_column = first_present(table, &STOCK_PART_ALIASES);
            let qty_column = first_present(table, &STOCK_QTY_ALIASES);
            let type_needed = self.stock_part_types.is_some();
            let type_present = table.has_column(STOCK_TYPE_COLUMN);

            let (Some(part_column), Some(qty_column)) = (part_column, qty_column) else {
                let mut missing = Vec::new();
                if part_column.is_none() {
                    missing.push("PART NO".to_string());
                }
                if qty_column.is_none() {
                    missing.push("ON-HAND".to_string());
                }
                issues.push(missing_columns_issue(table, missing));
                continue;
            };
            if type_needed && !type_present {
                issues.push(missing_columns_issue(table, vec![STOCK_TYPE_COLUMN.to_string()]));
                continue;
            }

            contributed = true;
            debug!(
                file = %table.source_file,
                part_column,
                qty_column,
                "库存列解析完成"
            );

            for row in table.rows() {
                if let Some(allowed) = self.stock_part_types {
                    let part_type = row
                        .get(STOCK_TYPE_COLUMN)
                        .map(|v| self.cleaner.clean_text(v))
                        .unwrap_or_default();
                    if !allowed.contains(&part_type.as_str()) {
                        continue;
                    }
                }
                rows.push(StockReportRow {
                    brand: data.location.brand.clone(),
                    dealer: data.location.dealer.clone(),
                    location: data.location.site.clone(),
                    part_number: self.part_number(row.get(part_column)),
                    qty: row.get(qty_column).cloned().unwrap_or(CellValue::Null),
                });
            }
        }

        contributed.then_some(rows)
    }

    // ==========================================
    // Pending 报表
    // ==========================================

    fn build_pending(&self, data: &LocationData) -> Option<Vec<PendingReportRow>> {
        let mut contributed = false;
        let mut rows = Vec::new();

        for table in data.tables_of(FileCategory::TransferDetail) {
            if !table.has_column(TRANSFER_DETAIL_PART) || !table.has_column(TRANSFER_DETAIL_QTY) {
                debug!(file = %table.source_file, "调拨明细缺少 PART NO ? / QUANTITY,不生成 Pending 行");
                continue;
            }
            contributed = true;
            for row in table.rows() {
                rows.push(PendingReportRow {
                    brand: data.location.brand.clone(),
                    dealer: data.location.dealer.clone(),
                    location: data.location.site.clone(),
                    part_number: self.part_number(row.get(TRANSFER_DETAIL_PART)),
                    qty: row.get(TRANSFER_DETAIL_QTY).cloned().unwrap_or(CellValue::Null),
                });
            }
        }

        contributed.then_some(rows)
    }

    /// 截止日 = 基准日 - 回看天数; 越界时取最早可表示日期
    fn cutoff(&self, lookback_days: i64) -> NaiveDate {
        let days = lookback_days.clamp(0, MAX_LOOKBACK_DAYS);
        self.today
            .checked_sub_signed(Duration::days(days))
            .unwrap_or(NaiveDate::MIN)
    }

    fn part_number(&self, value: Option<&CellValue>) -> String {
        value
            .map(|v| self.cleaner.normalize_part_number(&v.to_string()))
            .unwrap_or_default()
    }
}

/// 别名列表中第一个存在的列
fn first_present(table: &NormalizedTable, aliases: &[&'static str]) -> Option<&'static str> {
    aliases.iter().copied().find(|alias| table.has_column(alias))
}

/// 必需列检查,缺列时记录问题并返回 false
fn check_required(table: &NormalizedTable, required: &[&str], issues: &mut Vec<ReadIssue>) -> bool {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        return true;
    }
    warn!(file = %table.source_file, missing = ?missing, "报表必需列缺失,跳过该表");
    issues.push(missing_columns_issue(table, missing));
    false
}

fn missing_columns_issue(table: &NormalizedTable, missing: Vec<String>) -> ReadIssue {
    ReadIssue {
        location: table.location.key(),
        file_name: table.source_file.clone(),
        category: table.category,
        message: format!(
            "{}: {} missing columns - {}",
            table.location.site,
            table.category,
            missing.join(", ")
        ),
        kind: ReadIssueKind::MissingColumns(missing),
    }
}
