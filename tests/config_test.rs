// ==========================================
// 运行配置集成测试
// ==========================================
// 测试目标: TOML 配置文件加载 / 默认值 / 校验
// ==========================================

use dealer_recon::config::ConfigError;
use dealer_recon::{PartCategory, PeriodType, RunConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file_with_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
start_date = "2025-04-01"
end_date = "2025-06-30"
period_type = "Week"
select_categories = ["Spares", "Accessories"]
"#
    )
    .unwrap();

    let config = RunConfig::load(file.path()).unwrap();
    assert_eq!(config.period_type, PeriodType::Week);
    assert_eq!(
        config.select_categories.0,
        vec![PartCategory::Spares, PartCategory::Accessories]
    );
    assert_eq!(config.oem_lookback_days, 90);
    assert_eq!(config.receiving_lookback_days, 60);
    assert!(!config.continue_anyway);
    assert!(config.today.is_none());
}

#[test]
fn test_reversed_range_rejected() {
    let raw = r#"
start_date = "2025-07-01"
end_date = "2025-06-30"
"#;
    let err = RunConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let err = RunConfig::load("/nonexistent/run.toml").unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_huge_lookback_rejected() {
    let raw = r#"
start_date = "2025-06-01"
end_date = "2025-06-30"
oem_lookback_days = 9223372036854775807
"#;
    let err = RunConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "oem_lookback_days"));
}
