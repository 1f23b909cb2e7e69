use ahkdump_core::{detect_build, extract, load_config, ExtractOptions};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod render;

use render::{render_decompile, render_gui_only, render_json, render_raw, render_script_like, RenderOptions};

/// 输出风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// 仅字符串列表
    Raw,
    /// 伪反编译风格（块 + 行号）
    Decompile,
    /// 近似 AHK 脚本片段
    ScriptLike,
    /// 仅 GUI 相关字符串（项目符号）
    GuiOnly,
}

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "ahkdump", version, about = "Extract & display strings from compiled AutoHotkey .exe files")]
struct Cli {
    /// 目标可执行文件
    file: PathBuf,

    /// 最小字符串长度（默认 5）
    #[arg(short = 'n', long = "min")]
    min: Option<usize>,

    /// 最大字符串长度（默认 600）
    #[arg(long = "max")]
    max: Option<usize>,

    /// 输出风格
    #[arg(long, value_enum, default_value_t = Mode::Decompile)]
    mode: Mode,

    /// 去除完全重复的字符串
    #[arg(long)]
    dedup: bool,

    /// 按偏移间隔分组显示
    #[arg(long)]
    group: bool,

    /// 仅保留 GUI / 对话框相关字符串
    #[arg(long)]
    only_gui: bool,

    /// 显示十六进制偏移（raw 与 decompile 风格）
    #[arg(long)]
    with_offsets: bool,

    /// 显示前后 N 字节的上下文
    #[arg(long, value_name = "N")]
    with_context: Option<usize>,

    /// 显示 PE 节名
    #[arg(long)]
    sections: bool,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 输出到文件而非标准输出
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 线程数（"auto"=CPU 核心数；1 为串行）
    #[arg(long, default_value = "auto")]
    threads: String,

    /// 输出额外的诊断日志
    #[arg(short, long)]
    verbose: bool,

    /// 旧版参数，仅为兼容而接受；两种编码总是都会扫描
    #[arg(short = 'e', long = "encoding", default_value = "auto", hide = true)]
    encoding: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // 初始化日志（支持通过 RUST_LOG 控制等级）
    init_tracing(cli.verbose);
    debug!(encoding = %cli.encoding, "--encoding is ignored, both encodings are scanned");

    if !cli.file.is_file() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }
    let data = std::fs::read(&cli.file).with_context(|| format!("read {}", cli.file.display()))?;

    let opts = build_options(&cli)?;
    info!(file = %cli.file.display(), size_mib = %format!("{:.1}", data.len() as f64 / 1024.0 / 1024.0), "loaded");
    info!(hint = %detect_build(&data), "version hint");

    let extraction = extract(&data, &opts).context("extract strings")?;
    for d in &extraction.diagnostics {
        warn!("{d}");
    }

    let strings = &extraction.candidates;
    if strings.is_empty() {
        eprintln!("No meaningful strings extracted.");
        return Ok(());
    }

    let render_opts = RenderOptions {
        with_offsets: cli.with_offsets,
        group: cli.group,
        sections: cli.sections,
        gaps: opts.gaps,
    };
    let file_label = cli.file.display().to_string();
    let output = if cli.json {
        render_json(&file_label, strings).context("serialize json")?
    } else {
        match cli.mode {
            Mode::Raw => render_raw(strings, &render_opts),
            Mode::Decompile => render_decompile(strings, &render_opts),
            Mode::ScriptLike => render_script_like(strings),
            Mode::GuiOnly => render_gui_only(strings),
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{output}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            println!("Saved {} strings → {}", strings.len(), path.display());
        }
        None => println!("{output}"),
    }

    info!(
        wide_runs = extraction.stats.wide_runs,
        narrow_runs = extraction.stats.narrow_runs,
        kept = extraction.stats.candidates_kept,
        "done"
    );
    Ok(())
}

/// 组装提取参数：内置默认值 ← 配置文件 ← 命令行
fn build_options(cli: &Cli) -> Result<ExtractOptions> {
    let mut opts = ExtractOptions::default();
    if let Some(path) = &cli.config {
        load_config(path)?.apply(&mut opts);
    }
    if let Some(v) = cli.min { opts.min_len = v; }
    if let Some(v) = cli.max { opts.max_len = v; }
    if let Some(v) = cli.with_context { opts.context_half_width = v; }
    opts.dedup = cli.dedup;
    opts.gui_only = cli.only_gui || cli.mode == Mode::GuiOnly;
    opts.sections = cli.sections;
    opts.threads = parse_threads(&cli.threads);
    Ok(opts)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留渲染结果
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
