// ==========================================
// 经销商导出数据校验系统 - 清单/明细数量对账
// ==========================================
// 职责: 同一网点清单文件合计 vs 明细文件合计
// 级别: 硬校验,任一网点不一致 → 全局阻断,不可放行
// 规则:
//   - 非数值单元格按 0 计; 缺少数量列的表贡献 0
//   - 任一侧存在文件 且 |清单 - 明细| > 容差 → 不一致
//   - 合计与文件/行顺序无关（排序后补偿求和）
// ==========================================

use crate::domain::table::NormalizedTable;
use crate::domain::types::FileCategory;
use crate::domain::verdict::{location_columns, QuantityMismatchRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::location_loader::LocationData;
use crate::importer::schema::{
    ACCEPT_QTY, QUANTITY_SEND, SHIPPED_ACCEPT_QTY, TRANSFER_DETAIL_QTY_CANDIDATES,
};
use tracing::{info, instrument, warn};

/// 数量列选择方式
#[derive(Debug, Clone, Copy)]
enum QtyColumn {
    Fixed(&'static str),
    /// 按文件表头取第一个存在的候选列
    FirstOf(&'static [&'static str]),
}

impl QtyColumn {
    fn resolve(&self, table: &NormalizedTable) -> Option<&'static str> {
        match self {
            QtyColumn::Fixed(name) => table.has_column(name).then_some(*name),
            QtyColumn::FirstOf(candidates) => {
                candidates.iter().copied().find(|c| table.has_column(c))
            }
        }
    }
}

/// 对账规则
struct CrossSumCheck {
    name: &'static str,
    list: (FileCategory, QtyColumn),
    detail: (FileCategory, QtyColumn),
    list_label: &'static str,
    detail_label: &'static str,
}

const CHECKS: [CrossSumCheck; 3] = [
    CrossSumCheck {
        name: "Receiving Pending (List vs Detail)",
        list: (
            FileCategory::ReceivingPendingList,
            QtyColumn::Fixed(SHIPPED_ACCEPT_QTY),
        ),
        detail: (FileCategory::ReceivingPendingDetail, QtyColumn::Fixed(ACCEPT_QTY)),
        list_label: "Receiving Pending List ACCEPT",
        detail_label: "Pending Detail ACCEPT QTY",
    },
    CrossSumCheck {
        name: "Receiving Today (List vs Detail)",
        list: (
            FileCategory::ReceivingTodayList,
            QtyColumn::Fixed(SHIPPED_ACCEPT_QTY),
        ),
        detail: (FileCategory::ReceivingTodayDetail, QtyColumn::Fixed(ACCEPT_QTY)),
        list_label: "Receiving Today List ACCEPT",
        detail_label: "Today Detail ACCEPT QTY",
    },
    CrossSumCheck {
        name: "Transfer (List vs Detail)",
        list: (FileCategory::TransferList, QtyColumn::Fixed(QUANTITY_SEND)),
        detail: (
            FileCategory::TransferDetail,
            QtyColumn::FirstOf(&TRANSFER_DETAIL_QTY_CANDIDATES),
        ),
        list_label: "Transfer List SEND",
        detail_label: "Transfer Detail QUANTITY",
    },
];

// ==========================================
// CrossSumOutcome - 单网点对账结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSumOutcome {
    pub errors: Vec<String>,
    pub log: Vec<QuantityMismatchRecord>,
}

pub struct CrossSumValidator {
    tolerance: f64,
    cleaner: DataCleaner,
}

impl CrossSumValidator {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cleaner: DataCleaner,
        }
    }

    #[instrument(skip(self, data), fields(location = %data.location))]
    pub fn validate(&self, data: &LocationData) -> CrossSumOutcome {
        let (brand, dealer, site) = location_columns(&data.location);
        let mut outcome = CrossSumOutcome::default();

        for check in &CHECKS {
            let (list_category, list_column) = check.list;
            let (detail_category, detail_column) = check.detail;

            if !data.has_files(list_category) && !data.has_files(detail_category) {
                continue;
            }

            let list_sum = self.category_sum(data, list_category, list_column);
            let detail_sum = self.category_sum(data, detail_category, detail_column);
            let difference = list_sum - detail_sum;

            if difference.abs() <= self.tolerance {
                continue;
            }

            warn!(
                check = check.name,
                list_sum,
                detail_sum,
                difference,
                "清单/明细数量不一致"
            );
            outcome.errors.push(format!(
                "{}: {}({:.2}) != {}({:.2})",
                site, check.list_label, list_sum, check.detail_label, detail_sum
            ));
            outcome.log.push(QuantityMismatchRecord {
                brand: brand.clone(),
                dealer: dealer.clone(),
                location: site.clone(),
                check: check.name.to_string(),
                list_sum,
                detail_sum,
                difference,
            });
        }

        if outcome.errors.is_empty() {
            info!("清单/明细对账通过");
        }
        outcome
    }

    /// 某类别全部可读表的数量合计
    fn category_sum(&self, data: &LocationData, category: FileCategory, column: QtyColumn) -> f64 {
        let values: Vec<f64> = data
            .tables_of(category)
            .filter_map(|table| {
                let name = column.resolve(table)?;
                table.column_values(name)
            })
            .flatten()
            .map(|v| self.cleaner.to_number(v))
            .collect();
        stable_sum(values)
    }
}

/// 与输入顺序无关的补偿求和（Neumaier）
pub fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}
