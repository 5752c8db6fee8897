// ==========================================
// 经销商导出数据校验系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单文件错误在网点加载器内转为 ReadIssue,不向上中断运行
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("File not Excel Workbook and .xlsx extention For : {0}")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    // ===== 目录结构错误 =====
    #[error("输入目录不存在或不是目录: {0}")]
    InvalidInputRoot(String),

    // ===== 数据映射错误 =====
    #[error("表头行缺失 (期望第 {header_row} 行, 实际有效行数 {available})")]
    HeaderRowMissing { header_row: usize, available: usize },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
