// ==========================================
// 经销商导出数据校验系统 - 文件齐套校验
// ==========================================
// 职责: 每个网点的八类文件至少各有一个（按文件名判定）
// 级别: 软校验,可人工放行
// ==========================================

use crate::domain::types::FileCategory;
use crate::importer::location_loader::LocationData;

pub struct PresenceValidator;

impl PresenceValidator {
    pub fn new() -> Self {
        Self
    }

    /// 缺失类别消息,按固定类别顺序输出
    ///
    /// 格式: "{brand}/{dealer}/{location} - Missing: {prefix}"
    pub fn validate(&self, data: &LocationData) -> Vec<String> {
        FileCategory::ALL
            .into_iter()
            .filter(|category| !data.has_files(*category))
            .map(|category| format!("{} - Missing: {}", data.location.key(), category.prefix()))
            .collect()
    }
}

impl Default for PresenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::Location;
    use crate::importer::location_loader::ClassifiedFile;
    use std::path::PathBuf;

    #[test]
    fn test_missing_categories_in_order() {
        let mut data = LocationData::empty(Location::new("HY", "D1", "L1", "/tmp"));
        data.files.push(ClassifiedFile {
            name: "bo list.xlsx".to_string(),
            category: FileCategory::BoList,
            path: PathBuf::from("/tmp/bo list.xlsx"),
        });

        let missing = PresenceValidator::new().validate(&data);
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0], "HY/D1/L1 - Missing: receiving pending list");
        assert_eq!(missing[2], "HY/D1/L1 - Missing: stock");
        assert_eq!(missing[6], "HY/D1/L1 - Missing: transfer detail");
    }
}
