// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中构建 品牌/经销商/网点 目录树与 .xlsx 导出文件
// 说明: 表头前按类别写入标题行,位置型类别按完整列序列写出
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use dealer_recon::importer::schema::{schema_for, ColumnSchema};
use dealer_recon::{FileCategory, PeriodType, RunConfig};
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 测试单元格
#[derive(Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Num(f64),
    /// 以 Excel 序列值写出
    Date(NaiveDate),
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn num(n: f64) -> Cell {
    Cell::Num(n)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn excel_serial(d: NaiveDate) -> f64 {
    (d - date(1899, 12, 30)).num_days() as f64
}

/// 创建临时输入根目录
pub fn create_input_root() -> TempDir {
    TempDir::new().unwrap()
}

/// 创建网点目录
pub fn location_dir(root: &Path, brand: &str, dealer: &str, site: &str) -> PathBuf {
    let dir = root.join(brand).join(dealer).join(site);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// 导出文件版式
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportLayout {
    /// 表头前的标题行留空（不写任何单元格）
    pub blank_banner: bool,
    /// 位置型类别只写前 n 列
    pub width: Option<usize>,
}

/// 写出一个导出文件
///
/// # 参数
/// - columns: 需要赋值的列名（位置型类别按列序列定位,其余列留空）
/// - rows: 与 columns 一一对应的行数据
pub fn write_export(
    path: &Path,
    category: FileCategory,
    columns: &[&str],
    rows: &[Vec<Cell>],
) -> Result<(), Box<dyn Error>> {
    write_export_with(path, category, columns, rows, ExportLayout::default())
}

/// 按指定版式写出一个导出文件
pub fn write_export_with(
    path: &Path,
    category: FileCategory,
    columns: &[&str],
    rows: &[Vec<Cell>],
    layout: ExportLayout,
) -> Result<(), Box<dyn Error>> {
    let header: Vec<String> = match schema_for(category) {
        ColumnSchema::Positional { names, .. } => {
            let width = layout.width.unwrap_or(names.len()).min(names.len());
            names[..width].iter().map(|s| s.to_string()).collect()
        }
        ColumnSchema::SelfDescribing => columns.iter().map(|s| s.to_string()).collect(),
    };

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    // 标题行
    if !layout.blank_banner {
        for idx in 0..category.header_row() {
            sheet.write_string(idx as u32, 0, format!("{} report line {}", category, idx + 1))?;
        }
    }

    let header_row = category.header_row() as u32;
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(header_row, col as u16, name.as_str())?;
    }

    for (r, row) in rows.iter().enumerate() {
        let row_num = header_row + 1 + r as u32;
        for (column, cell) in columns.iter().zip(row.iter()) {
            let Some(col) = header.iter().position(|h| h == column) else {
                return Err(format!("unknown column {} for {}", column, category).into());
            };
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(row_num, col, s.as_str())?;
                }
                Cell::Num(n) => {
                    sheet.write_number(row_num, col, *n)?;
                }
                Cell::Date(d) => {
                    sheet.write_number(row_num, col, excel_serial(*d))?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// 测试配置: 2025-06-01 .. 2025-06-03 按天, 基准日 2025-06-30
pub fn test_config() -> RunConfig {
    let mut config = RunConfig::with_defaults(date(2025, 6, 30));
    config.start_date = date(2025, 6, 1);
    config.end_date = date(2025, 6, 3);
    config.period_type = PeriodType::Day;
    config
}

/// 写出一个完整网点: 八类文件齐全,期间全覆盖,清单/明细数量一致
///
/// 每个日期一行,数量均为 10
pub fn write_complete_location(dir: &Path, dates: &[NaiveDate]) -> Result<(), Box<dyn Error>> {
    let qty = 10.0;

    write_export(
        &dir.join("BO LIST 01.xlsx"),
        FileCategory::BoList,
        &["ORDER NO", "PART NO_CURRENT", "QUANTITY_CURRENT", "B/O", "PO DATE", "PROCESSING_SHIPPED"],
        &dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                vec![
                    text(&format!("PO{}", i + 1)),
                    text(" AB-12.3 "),
                    num(5.0),
                    num(0.0),
                    Cell::Date(*d),
                    num(5.0),
                ]
            })
            .collect::<Vec<_>>(),
    )?;

    for (list, detail, list_name, detail_name) in [
        (
            FileCategory::ReceivingPendingList,
            FileCategory::ReceivingPendingDetail,
            "Receiving Pending List.xlsx",
            "Receiving Pending Detail.xlsx",
        ),
        (
            FileCategory::ReceivingTodayList,
            FileCategory::ReceivingTodayDetail,
            "Receiving Today List.xlsx",
            "Receiving Today Detail.xlsx",
        ),
    ] {
        write_export(
            &dir.join(list_name),
            list,
            &["GR_NO", "SHIPPED INFORMATION_ACCEPT QTY"],
            &dates
                .iter()
                .enumerate()
                .map(|(i, _)| vec![text(&format!("GR{}", i)), num(qty)])
                .collect::<Vec<_>>(),
        )?;
        write_export(
            &dir.join(detail_name),
            detail,
            &["ORDER NO", "PART NO _SUPPLY", "ACCEPT QTY", "ORDER DATE"],
            &dates
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    vec![
                        text(&format!("RO{}", i + 1)),
                        text("CD-45"),
                        num(qty),
                        Cell::Date(*d),
                    ]
                })
                .collect::<Vec<_>>(),
        )?;
    }

    write_export(
        &dir.join("Stock Report.xlsx"),
        FileCategory::Stock,
        &["PART NO", "ON-HAND", "PART TYPE"],
        &[
            vec![text("EF-1.0"), num(7.0), text("X")],
            vec![text("GH-2"), num(3.0), text("A")],
        ],
    )?;

    write_export(
        &dir.join("Transfer List.xlsx"),
        FileCategory::TransferList,
        &["TRANSFER NO", "REQ.DATE", "QUANTITY_SEND"],
        &dates
            .iter()
            .enumerate()
            .map(|(i, d)| vec![text(&format!("T{}", i)), Cell::Date(*d), num(qty)])
            .collect::<Vec<_>>(),
    )?;

    write_export(
        &dir.join("Transfer Detail.xlsx"),
        FileCategory::TransferDetail,
        &["PART NO ?", "QUANTITY"],
        &dates
            .iter()
            .map(|_| vec![text(" IJ-9 "), num(qty)])
            .collect::<Vec<_>>(),
    )?;

    Ok(())
}

/// 2025-06-01 .. 2025-06-03
pub fn june_dates() -> Vec<NaiveDate> {
    vec![date(2025, 6, 1), date(2025, 6, 2), date(2025, 6, 3)]
}
