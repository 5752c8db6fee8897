// ==========================================
// 经销商导出数据校验系统 - 命令行入口
// ==========================================
// 用法: dealer-recon <INPUT_DIR> [--config run.toml] [--start ..] [--end ..] ...
// 退出码: 0 = 已生成报表, 1 = 需人工放行, 2 = 数量不一致阻断, 3 = 已取消, 4 = 运行错误
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use dealer_recon::engine::SOFT_PREVIEW_LIMIT;
use dealer_recon::logging::{self, LogFormat};
use dealer_recon::{
    CategorySelection, GateDecision, PartCategory, PeriodType, Pipeline, ReportExporter,
    RunConfig, RunOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_SUCCESS: u8 = 0;
const EXIT_NEEDS_OVERRIDE: u8 = 1;
const EXIT_BLOCKED: u8 = 2;
const EXIT_CANCELLED: u8 = 3;
const EXIT_ERROR: u8 = 4;

#[derive(Parser, Debug)]
#[command(name = "dealer-recon")]
#[command(about = "经销商导出文件校验与报表生成")]
#[command(version)]
struct Cli {
    /// 已解压的输入根目录（品牌/经销商/网点 三级目录）
    input: PathBuf,

    /// TOML 运行配置文件,命令行参数覆盖其中同名项
    #[arg(long, short = 'c', env = "DEALER_RECON_CONFIG")]
    config: Option<PathBuf>,

    /// 校验起始日 (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// 校验截止日 (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// 期间类型: Day / Week / Month / Quarter / Year
    #[arg(long)]
    period: Option<PeriodType>,

    /// 零件类别,逗号分隔: Spares,Accessories,All
    #[arg(long, value_delimiter = ',')]
    categories: Vec<PartCategory>,

    /// 报表基准日（默认本地当天）
    #[arg(long)]
    today: Option<NaiveDate>,

    /// 输出目录
    #[arg(long, short = 'o', default_value = "output")]
    out: PathBuf,

    /// 存在缺失文件/缺失期间时仍生成报表（数量不一致时无效）
    #[arg(long)]
    continue_anyway: bool,

    /// 以 JSON 输出运行摘要
    #[arg(long)]
    json: bool,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    json_logs: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_format(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    match run(&cli) {
        Ok(decision) => ExitCode::from(exit_code(decision)),
        Err(err) => {
            tracing::error!("运行失败: {:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn exit_code(decision: GateDecision) -> u8 {
    match decision {
        GateDecision::Proceed => EXIT_SUCCESS,
        GateDecision::NeedsOverride => EXIT_NEEDS_OVERRIDE,
        GateDecision::Blocked => EXIT_BLOCKED,
        GateDecision::Cancelled => EXIT_CANCELLED,
    }
}

/// 配置文件 + 命令行覆盖
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => {
            let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
            RunConfig::with_defaults(today)
        }
    };

    if let Some(start) = cli.start {
        config.start_date = start;
    }
    if let Some(end) = cli.end {
        config.end_date = end;
    }
    if let Some(period) = cli.period {
        config.period_type = period;
    }
    if !cli.categories.is_empty() {
        config.select_categories = CategorySelection(cli.categories.clone());
    }
    if cli.today.is_some() {
        config.today = cli.today;
    }
    config.continue_anyway |= cli.continue_anyway;

    config.validate().context("配置校验失败")?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<GateDecision> {
    let config = build_config(cli)?;
    tracing::info!("{} v{}", dealer_recon::APP_NAME, dealer_recon::VERSION);

    let input_name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let pipeline = Pipeline::new(config);
    let outcome = pipeline
        .run(&cli.input, &input_name, None)
        .with_context(|| format!("处理输入目录失败: {}", cli.input.display()))?;

    let exporter = ReportExporter::new(&cli.out)
        .with_context(|| format!("创建输出目录失败: {}", cli.out.display()))?;
    let summary = exporter.export_run(&outcome).context("写出运行产出失败")?;

    if cli.json {
        let payload = serde_json::json!({
            "outcome": &outcome,
            "outputs": &summary,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_summary(&outcome);
        for path in summary
            .location_reports
            .iter()
            .chain(summary.combined_archive.iter())
        {
            println!("  写出: {}", path.display());
        }
    }

    Ok(outcome.decision)
}

fn print_summary(outcome: &RunOutcome) {
    let verdict = &outcome.verdict;
    println!("运行批次: {}", outcome.run_id);
    println!("网点数量: {}", verdict.location_count);

    for issue in &verdict.read_issues {
        println!("  [读取] {}", issue.message);
    }
    for issue in &outcome.report_issues {
        println!("  [报表] {}", issue.message);
    }
    for key in &verdict.period_checks_skipped {
        println!("  [跳过期间校验] {}", key);
    }

    match outcome.decision {
        GateDecision::Blocked => {
            println!("清单/明细数量不一致,已阻断报表生成:");
            for err in &verdict.mismatch_errors {
                println!("  {}", err);
            }
        }
        GateDecision::NeedsOverride => {
            println!(
                "缺失文件 {} 项, 缺失期间 {} 项; 使用 --continue-anyway 继续生成报表",
                verdict.missing_files.len(),
                verdict.period_errors.len()
            );
            for line in verdict.soft_preview(SOFT_PREVIEW_LIMIT) {
                println!("  {}", line);
            }
        }
        GateDecision::Cancelled => println!("运行已取消"),
        GateDecision::Proceed => {
            if verdict.has_soft_failures() {
                println!("已人工放行软校验问题");
            }
            println!("已生成 {} 个网点的报表", outcome.reports.len());
        }
    }
}
