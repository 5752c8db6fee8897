// ==========================================
// 经销商导出数据校验系统 - 配置层
// ==========================================
// 职责: 运行参数加载与校验
// 存储: 无持久化,单次运行有效
// ==========================================

pub mod run_config;

// 重导出核心配置类型
pub use run_config::{CategorySelection, ConfigError, RunConfig, MAX_LOOKBACK_DAYS};
