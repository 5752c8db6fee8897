// ==========================================
// 经销商导出数据校验系统 - 网点目录扫描
// ==========================================
// 职责: 输入根目录 → 品牌/经销商/网点 三级目录 → Location 列表
// 顺序: 按 (品牌, 经销商, 网点) 名称排序,保证日志确定性
// ==========================================

use crate::domain::location::Location;
use crate::importer::error::{ImportError, ImportResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 压缩包工具产生的元数据目录
fn is_ignored_dir(name: &str) -> bool {
    name.starts_with('.') || name == "__MACOSX"
}

/// 列出子目录 (名称, 路径),按名称排序
fn sorted_subdirs(dir: &Path) -> ImportResult<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_ignored_dir(&name) {
            debug!(dir = %path.display(), "跳过元数据目录");
            continue;
        }
        dirs.push((name, path));
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// 扫描三级目录结构
///
/// # 返回
/// - Ok(Vec<Location>): 排序后的网点列表（可能为空）
/// - Err: 根目录不存在 / 不可读
pub fn scan_locations<P: AsRef<Path>>(root: P) -> ImportResult<Vec<Location>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ImportError::InvalidInputRoot(root.display().to_string()));
    }

    let mut locations = Vec::new();
    for (brand, brand_path) in sorted_subdirs(root)? {
        for (dealer, dealer_path) in sorted_subdirs(&brand_path)? {
            for (site, site_path) in sorted_subdirs(&dealer_path)? {
                locations.push(Location::new(brand.clone(), dealer.clone(), site, site_path));
            }
        }
    }

    info!(root = %root.display(), count = locations.len(), "网点扫描完成");
    Ok(locations)
}

/// 网点目录下的文件名（不含子目录）,按名称排序
pub fn list_files(location_dir: &Path) -> ImportResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(location_dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_three_levels_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("KIA/D2/L1")).unwrap();
        fs::create_dir_all(root.join("HY/D1/L2")).unwrap();
        fs::create_dir_all(root.join("HY/D1/L1")).unwrap();
        fs::create_dir_all(root.join("__MACOSX/HY/D1")).unwrap();
        fs::write(root.join("HY/readme.txt"), "x").unwrap();

        let locations = scan_locations(root).unwrap();
        let keys: Vec<String> = locations.iter().map(|l| l.key()).collect();
        assert_eq!(keys, vec!["HY/D1/L1", "HY/D1/L2", "KIA/D2/L1"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = scan_locations(dir.path().join("absent"));
        assert!(matches!(result, Err(ImportError::InvalidInputRoot(_))));
    }

    #[test]
    fn test_list_files_ignores_subdirs() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("bo list archive")).unwrap();
        fs::write(dir.path().join("stock.xlsx"), "x").unwrap();
        fs::write(dir.path().join("bo list.xlsx"), "x").unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["bo list.xlsx", "stock.xlsx"]);
    }
}
