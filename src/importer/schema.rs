// ==========================================
// 经销商导出数据校验系统 - 列模式定义
// ==========================================
// 职责: 各文件类别的规范列名序列 / 别名表
// 说明: 位置型模式带版本号,导出格式变化时升版本并在此处新增序列
// ==========================================

use crate::domain::types::FileCategory;

// ==========================================
// 关键列名
// ==========================================
pub const PO_DATE: &str = "PO DATE";
pub const ORDER_DATE: &str = "ORDER DATE";
pub const REQ_DATE: &str = "REQ.DATE";
pub const ORDER_NO: &str = "ORDER NO";
pub const PART_NO_CURRENT: &str = "PART NO_CURRENT";
pub const PART_NO_SUPPLY: &str = "PART NO _SUPPLY";
pub const QUANTITY_CURRENT: &str = "QUANTITY_CURRENT";
pub const BACK_ORDER: &str = "B/O";
pub const PROCESSING_SHIPPED: &str = "PROCESSING_SHIPPED";
pub const ACCEPT_QTY: &str = "ACCEPT QTY";
pub const SHIPPED_ACCEPT_QTY: &str = "SHIPPED INFORMATION_ACCEPT QTY";
pub const QUANTITY_SEND: &str = "QUANTITY_SEND";

/// 在途的五个处理阶段
pub const PROCESSING_STAGES: [&str; 5] = [
    "PROCESSING_ALLOCATION",
    "PROCESSING_ON-PICK",
    "PROCESSING_ON-PACK",
    "PROCESSING_PACKED",
    "PROCESSING_INVOICE",
];

/// 调拨明细数量列候选（按文件自身表头取第一个存在的）
pub const TRANSFER_DETAIL_QTY_CANDIDATES: [&str; 5] =
    ["QUANTITY", "QTY", "QUANTITY_SEND", "QUANTITY_REQ", "ITEM_SEND"];

/// 调拨明细 Pending 报表所需列
pub const TRANSFER_DETAIL_PART: &str = "PART NO ?";
pub const TRANSFER_DETAIL_QTY: &str = "QUANTITY";

// ==========================================
// 库存表别名
// ==========================================
pub const STOCK_PART_ALIASES: [&str; 6] = [
    "PART NO ?",
    "PART NO",
    "PART NO.",
    "PART_NO",
    "PART NUMBER",
    "PART_NUMBER",
];
pub const STOCK_QTY_ALIASES: [&str; 6] =
    ["ON-HAND", "ON HAND", "ONHAND", "ON_HAND", "QTY", "CLOSE_QTY"];
pub const STOCK_TYPE_COLUMN: &str = "PART TYPE";

// ==========================================
// 规范列序列
// ==========================================
const BO_LIST_V1: [&str; 21] = [
    "ORDER NO",
    "LINE",
    "PART NO_ORDER",
    "PART NO_CURRENT",
    "PART NAME",
    "PARTSOURCE",
    "QUANTITY_ORDER",
    "QUANTITY_CURRENT",
    "B/O",
    "PO DATE",
    "PDC",
    "ETA",
    "MSG",
    "PROCESSING_ALLOCATION",
    "PROCESSING_ON-PICK",
    "PROCESSING_ON-PACK",
    "PROCESSING_PACKED",
    "PROCESSING_INVOICE",
    "PROCESSING_SHIPPED",
    "LOST QTY",
    "ELAP",
];

const RECEIVING_LIST_V1: [&str; 19] = [
    "SEQ",
    "H/K",
    "GR_NO",
    "GR_TYPE",
    "GR_STATUS",
    "INVOICE_NO",
    "INVOICE_DATE",
    "SHIPPED INFORMATION_SUPPLIER",
    "SHIPPED INFORMATION_TRUCK NO",
    "SHIPPED INFORMATION_CARRIER NAME",
    "SHIPPED INFORMATION_FINISH DATE",
    "SHIPPED INFORMATION_ACCEPT QTY",
    "SHIPPED INFORMATION_CLAIM QTY",
    "SHIPPED INFORMATION_MAT VALUE",
    "SHIPPED INFORMATION_FREIGHT AMT",
    "SHIPPED INFORMATION_SGST AMT",
    "SHIPPED INFORMATION_IGST AMT",
    "SHIPPED INFORMATION_TCS AMT",
    "SHIPPED INFORMATION_TAX AMOUNT",
];

const RECEIVING_DETAIL_V1: [&str; 37] = [
    "SEQ",
    "CASE NO",
    "ORDER NO",
    "LINE NO",
    "PART NO _SUPPLY",
    "PART NO _ORDER",
    "H/K",
    "PART NAME",
    "SUPPLY QTY",
    "ORDER QTY",
    "ACCEPT QTY",
    "CLAIM QTY",
    "CLAIM TYPE",
    "CLAIM CODE",
    "LOC",
    "LIST PRICE",
    "NDP (UNIT)",
    "ED (UNIT)",
    "MAT VALUE",
    "DEPOT S/C",
    "VOR S/C",
    "OTHER CHARGES",
    "STAX(%)",
    "CTAX(%)",
    "ITAX(%)",
    "TAX(%)",
    "HSN CODE",
    "TAX AMT",
    "FRT/INS",
    "SGST AMT",
    "CGST AMT",
    "IGST AMT",
    "COMP CESS AMT",
    "LANDED COST",
    "ORDER DATE",
    "RECEIVING DATE",
    "STATUS",
];

const TRANSFER_LIST_V1: [&str; 21] = [
    "TRANSFER NO",
    "REQ.DATE",
    "REQ.TIME",
    "SEND DATE",
    "SEND.TIME",
    "RECE.DATE",
    "RECE.TIME",
    "REQU.DEALER",
    "SEND DEALER",
    "ITEM_REQ",
    "ITEM_SEND",
    "QUANTITY_REQ",
    "QUANTITY_SEND",
    "AMOUNT",
    "AMOUNT2",
    "TAXABLE AMT",
    "SGST AMT",
    "CGST AMT",
    "IGST AMT",
    "COMP CESS AMT",
    "STATUS",
];

// ==========================================
// ColumnSchema - 列模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSchema {
    /// 按位置命名: canonical[0 .. min(N, width)]
    Positional {
        version: u32,
        names: &'static [&'static str],
    },
    /// 使用文件自身表头
    SelfDescribing,
}

impl ColumnSchema {
    pub fn expected_width(&self) -> Option<usize> {
        match self {
            ColumnSchema::Positional { names, .. } => Some(names.len()),
            ColumnSchema::SelfDescribing => None,
        }
    }
}

/// 类别 → 列模式
pub fn schema_for(category: FileCategory) -> ColumnSchema {
    match category {
        FileCategory::BoList => ColumnSchema::Positional {
            version: 1,
            names: &BO_LIST_V1,
        },
        FileCategory::ReceivingPendingList | FileCategory::ReceivingTodayList => {
            ColumnSchema::Positional {
                version: 1,
                names: &RECEIVING_LIST_V1,
            }
        }
        FileCategory::ReceivingPendingDetail | FileCategory::ReceivingTodayDetail => {
            ColumnSchema::Positional {
                version: 1,
                names: &RECEIVING_DETAIL_V1,
            }
        }
        FileCategory::TransferList => ColumnSchema::Positional {
            version: 1,
            names: &TRANSFER_LIST_V1,
        },
        FileCategory::Stock | FileCategory::TransferDetail => ColumnSchema::SelfDescribing,
    }
}
