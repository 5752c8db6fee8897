// ==========================================
// 经销商导出数据校验系统 - 网点数据加载器
// ==========================================
// 职责: 单个网点目录 → 分类文件清单 + 规范化表 + 读取问题
// 红线: 单文件失败只记录 ReadIssue,不中断其他文件/网点
// 生命周期: 每个网点加载一次,校验与报表共用,运行期内只读
// ==========================================

use crate::domain::location::Location;
use crate::domain::table::NormalizedTable;
use crate::domain::types::FileCategory;
use crate::domain::verdict::{ReadIssue, ReadIssueKind};
use crate::importer::error::ImportError;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_classifier::classify;
use crate::importer::file_parser::ExcelParser;
use crate::importer::importer_trait::{FileParser, TableMapper};
use crate::importer::location_scanner::list_files;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ClassifiedFile - 已分类文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub name: String,
    pub category: FileCategory,
    pub path: PathBuf,
}

// ==========================================
// LocationData - 单网点加载结果
// ==========================================
#[derive(Debug, Clone)]
pub struct LocationData {
    pub location: Location,
    /// 按名称匹配到的文件（无论能否读取）
    pub files: Vec<ClassifiedFile>,
    /// 成功读取且非空的表
    pub tables: Vec<NormalizedTable>,
    pub issues: Vec<ReadIssue>,
}

impl LocationData {
    pub fn empty(location: Location) -> Self {
        Self {
            location,
            files: Vec::new(),
            tables: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// 是否存在该类别的文件（按文件名判定）
    pub fn has_files(&self, category: FileCategory) -> bool {
        self.files.iter().any(|f| f.category == category)
    }

    /// 该类别的可读表
    pub fn tables_of(&self, category: FileCategory) -> impl Iterator<Item = &NormalizedTable> {
        self.tables.iter().filter(move |t| t.category == category)
    }
}

// ==========================================
// LocationLoader - 网点加载器
// ==========================================
pub struct LocationLoader<P: FileParser, M: TableMapper> {
    parser: P,
    mapper: M,
}

impl LocationLoader<ExcelParser, FieldMapper> {
    pub fn new() -> Self {
        Self {
            parser: ExcelParser,
            mapper: FieldMapper::new(),
        }
    }
}

impl Default for LocationLoader<ExcelParser, FieldMapper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser, M: TableMapper> LocationLoader<P, M> {
    pub fn with_components(parser: P, mapper: M) -> Self {
        Self { parser, mapper }
    }

    /// 加载单个网点
    ///
    /// 目录不可读时返回空数据（齐套检查会将全部类别报为缺失）
    #[instrument(skip(self, location), fields(location = %location))]
    pub fn load(&self, location: &Location) -> LocationData {
        let mut data = LocationData::empty(location.clone());

        let names = match list_files(&location.path) {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "网点目录读取失败");
                return data;
            }
        };

        for name in names {
            let Some(category) = classify(&name) else {
                debug!(file = %name, "未识别的文件,忽略");
                continue;
            };
            let path = location.path.join(&name);
            data.files.push(ClassifiedFile {
                name: name.clone(),
                category,
                path: path.clone(),
            });

            match self.parser.parse(&path, category.header_row()) {
                Ok(sheet) if sheet.is_empty() => {
                    data.issues.push(read_issue(
                        location,
                        &name,
                        category,
                        ReadIssueKind::Empty,
                        format!("{}: {} -> {} has no data rows", location.site, category, name),
                    ));
                }
                Ok(sheet) => {
                    let (table, issues) = self.mapper.map_table(location, &name, category, sheet);
                    debug!(
                        file = %name,
                        category = %category,
                        rows = table.row_count(),
                        columns = table.columns().len(),
                        "文件读取完成"
                    );
                    data.tables.push(table);
                    data.issues.extend(issues);
                }
                Err(e) => {
                    warn!(file = %name, category = %category, error = %e, "文件读取失败");
                    data.issues.push(issue_from_error(location, &name, category, &e));
                }
            }
        }

        info!(
            files = data.files.len(),
            tables = data.tables.len(),
            issues = data.issues.len(),
            "网点加载完成"
        );
        data
    }
}

fn read_issue(
    location: &Location,
    file_name: &str,
    category: FileCategory,
    kind: ReadIssueKind,
    message: String,
) -> ReadIssue {
    ReadIssue {
        location: location.key(),
        file_name: file_name.to_string(),
        category,
        kind,
        message,
    }
}

/// 解析错误 → 读取问题
fn issue_from_error(
    location: &Location,
    file_name: &str,
    category: FileCategory,
    err: &ImportError,
) -> ReadIssue {
    match err {
        ImportError::UnsupportedFormat(_) => read_issue(
            location,
            file_name,
            category,
            ReadIssueKind::UnsupportedFormat,
            err.to_string(),
        ),
        ImportError::HeaderRowMissing { .. } => read_issue(
            location,
            file_name,
            category,
            ReadIssueKind::Empty,
            format!("{}: {} -> {} has no data rows", location.site, category, file_name),
        ),
        _ => read_issue(
            location,
            file_name,
            category,
            ReadIssueKind::Unreadable,
            format!("{}: Unable to read {} -> {}", location.site, category, file_name),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;
    use crate::importer::error::ImportResult;
    use crate::importer::importer_trait::RawSheet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_records_unsupported_and_unreadable() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("HY/D1/L1");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("stock.csv"), "PART NO,ON-HAND\nP1,2\n").unwrap();
        fs::write(site.join("bo list.xlsx"), b"garbage").unwrap();
        fs::write(site.join("notes.txt"), "ignored").unwrap();

        let location = Location::new("HY", "D1", "L1", &site);
        let data = LocationLoader::new().load(&location);

        assert_eq!(data.files.len(), 2);
        assert!(data.has_files(FileCategory::Stock));
        assert!(data.has_files(FileCategory::BoList));
        assert!(data.tables.is_empty());
        assert_eq!(data.issues.len(), 2);

        let kinds: Vec<&ReadIssueKind> = data.issues.iter().map(|i| &i.kind).collect();
        assert!(kinds.contains(&&ReadIssueKind::UnsupportedFormat));
        assert!(kinds.contains(&&ReadIssueKind::Unreadable));

        let unsupported = data
            .issues
            .iter()
            .find(|i| i.kind == ReadIssueKind::UnsupportedFormat)
            .unwrap();
        assert_eq!(
            unsupported.message,
            "File not Excel Workbook and .xlsx extention For : stock.csv"
        );
    }

    /// 按文件名返回固定结果的解析器
    struct FixedParser;

    impl FileParser for FixedParser {
        fn parse(&self, file_path: &std::path::Path, header_row: usize) -> ImportResult<RawSheet> {
            let name = file_path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if name.starts_with("stock") {
                Ok(RawSheet {
                    header: vec![
                        CellValue::Text("PART NO".to_string()),
                        CellValue::Text("ON-HAND".to_string()),
                    ],
                    rows: vec![vec![CellValue::Text("P1".to_string()), CellValue::Number(2.0)]],
                    width: 2,
                })
            } else {
                Err(ImportError::HeaderRowMissing {
                    header_row,
                    available: 0,
                })
            }
        }
    }

    #[test]
    fn test_custom_parser_results_flow_into_location_data() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("HY/D1/L1");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("stock report.xlsx"), b"").unwrap();
        fs::write(site.join("transfer list.xlsx"), b"").unwrap();

        let location = Location::new("HY", "D1", "L1", &site);
        let loader = LocationLoader::with_components(FixedParser, FieldMapper::new());
        let data = loader.load(&location);

        assert_eq!(data.files.len(), 2);
        assert_eq!(data.tables.len(), 1);
        let stock = data.tables_of(FileCategory::Stock).next().unwrap();
        assert!(stock.has_column("ON-HAND"));
        assert_eq!(stock.row_count(), 1);

        assert_eq!(data.issues.len(), 1);
        assert_eq!(data.issues[0].category, FileCategory::TransferList);
        assert_eq!(data.issues[0].kind, ReadIssueKind::Empty);
        assert_eq!(
            data.issues[0].message,
            "L1: Transfer List -> transfer list.xlsx has no data rows"
        );
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let location = Location::new("HY", "D1", "GONE", dir.path().join("gone"));
        let data = LocationLoader::new().load(&location);
        assert!(data.files.is_empty());
        assert!(data.issues.is_empty());
    }
}
