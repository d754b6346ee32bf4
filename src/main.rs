use clap::{Parser, Subcommand};
use std::path::PathBuf;

use duct_flow_toolbox::units::ResultUnit;
use duct_flow_toolbox::{app, config, i18n, logging, ui_cli};

/// Log-Chebyshev 덕트 유량 측정 도우미 (콘솔)
#[derive(Debug, Parser)]
#[command(name = "duct_flow_toolbox_cli", version, about)]
struct Cli {
    /// 언어 코드 (auto/ko/en)
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 로그 레벨 (off/error/warn/info/debug/trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 덕트 직경과 반경당 측정 횟수로 측정 깊이를 출력한다.
    Points {
        /// 덕트 직경 [mm]
        #[arg(long)]
        diameter: f64,
        /// 반경당 측정 횟수 (3-5)
        #[arg(long, default_value_t = 3)]
        accuracy: u32,
    },
    /// 저장된 측정 세션(TOML)을 다시 계산한다.
    Calc {
        session: PathBuf,
        /// 결과 단위 (m3/s, m3/min, m3/h, kg/s, kg/min, kg/h). 생략 시 전부 출력
        #[arg(long)]
        unit: Option<ResultUnit>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();
    let (cfg, tr) = match setup(&cli) {
        Ok(ready) => ready,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = dispatch(cli.command, &cfg, &tr) {
        log::error!("{err}");
        eprintln!(
            "{}: {}",
            tr.t(i18n::keys::ERROR_PREFIX),
            ui_cli::error_message(&tr, &err)
        );
        std::process::exit(1);
    }
}

/// 설정, 로거, 번역기를 준비한다. 이 단계의 오류는 번역 없이 출력한다.
fn setup(cli: &Cli) -> Result<(config::Config, i18n::Translator), app::AppError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let cfg = config::load_or_default_at(&config_path)?;
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    logging::init(logging::parse_level(level))?;
    log::debug!("configuration loaded from {}", config_path.display());

    let lang_arg = cli.lang.as_deref().unwrap_or("auto");
    let lang = i18n::resolve_language(lang_arg, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    Ok((cfg, tr))
}

fn dispatch(
    command: Option<Command>,
    cfg: &config::Config,
    tr: &i18n::Translator,
) -> Result<(), app::AppError> {
    match command {
        None => app::run(cfg, tr),
        Some(Command::Points { diameter, accuracy }) => app::print_points(tr, diameter, accuracy),
        Some(Command::Calc { session, unit }) => {
            app::calculate_session(tr, &session, unit).map(|_| ())
        }
    }
}
