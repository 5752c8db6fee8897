// ==========================================
// 经销商导出数据校验系统 - 文件分类器
// ==========================================
// 职责: 文件名 → FileCategory
// 规则: 小写 + 去首尾空白后前缀匹配; receiving 系列容忍 "receving" 拼写
// ==========================================

use crate::domain::types::FileCategory;

/// 按文件名判定类别,无法识别返回 None（调用方忽略该文件）
///
/// 前缀互不为对方前缀,匹配结果与 ALL 的遍历顺序无关。
pub fn classify(file_name: &str) -> Option<FileCategory> {
    let name = file_name.trim().to_lowercase();
    FileCategory::ALL.into_iter().find(|category| {
        name.starts_with(category.prefix())
            || category
                .misspelled_prefix()
                .is_some_and(|variant| name.starts_with(variant))
    })
}

/// 文件名是否属于指定类别
pub fn matches(file_name: &str, category: FileCategory) -> bool {
    classify(file_name) == Some(category)
}
