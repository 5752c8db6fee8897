// ==========================================
// 经销商导出数据校验系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx, 大小写不敏感)
// 规则: 读取首个工作表; 表头行按物理行号定位,其及之前的行全部消费; 全空行跳过
// ==========================================

use crate::domain::table::CellValue;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawSheet};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// calamine 单元格 → CellValue
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Null,
            Data::String(s) => {
                if s.trim().is_empty() {
                    CellValue::Null
                } else {
                    CellValue::Text(s.clone())
                }
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                DataCleaner
                    .excel_serial_to_date(serial)
                    .map(CellValue::Date)
                    .unwrap_or(CellValue::Number(serial))
            }
            Data::DateTimeIso(s) => DataCleaner
                .parse_date_text(s)
                .map(CellValue::Date)
                .unwrap_or_else(|| CellValue::Text(s.clone())),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }

    /// 是否为 .xlsx 扩展名
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
    }
}

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path, header_row: usize) -> ImportResult<RawSheet> {
        let path = file_path;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if !Self::is_supported(path) {
            return Err(ImportError::UnsupportedFormat(file_name));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // calamine 的区域从首个已用单元格开始; 按物理行列定位
        let (start_row, start_col) = range
            .start()
            .map_or((0, 0), |(r, c)| (r as usize, c as usize));
        let width = start_col + range.width();
        let to_record = |row: &[Data]| -> Vec<CellValue> {
            std::iter::repeat(CellValue::Null)
                .take(start_col)
                .chain(row.iter().map(Self::convert_cell))
                .collect()
        };

        // 表头行之前（含）的行全部消费; 区域之前的空白行视为已跳过
        let mut rows = range.rows();
        let mut header = vec![CellValue::Null; width];
        if header_row >= start_row {
            let offset = header_row - start_row;
            for idx in 0..=offset {
                let row = rows.next().ok_or(ImportError::HeaderRowMissing {
                    header_row,
                    available: start_row + idx,
                })?;
                if idx == offset {
                    header = to_record(row);
                }
            }
        }

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let record = to_record(data_row);

            // 跳过完全空白的行
            if record.iter().all(CellValue::is_null) {
                continue;
            }

            records.push(record);
        }

        Ok(RawSheet {
            header,
            rows: records,
            width,
        })
    }
}
