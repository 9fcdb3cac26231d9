//! # moni
//!
//! moni-desk 명령줄 진입점.
//! 설정 로드, 로깅 초기화, 포트 구현 조립 후 하위 명령을 실행한다.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use moni_app::host::{ConsoleAuthOpener, HeadlessAuthOpener, StaticTicketHost};
use moni_app::lifecycle::{LifecycleManager, WaitOutcome};
use moni_app::shell::{AppServices, AppShell};
use moni_core::config::AppConfig;
use moni_core::models::app::AppState;
use moni_core::models::shipment::Shipment;
use moni_core::models::suggestion::{SuggestionId, TicketId};
use moni_core::ports::auth_window::AuthWindowOpener;
use moni_core::ports::request_proxy::RequestProxy;
use moni_core::ports::host::TicketHost;
use moni_network::proxy::HttpRequestProxy;
use moni_network::shipment_client::ShipmentApiClient;
use moni_network::suggestion_client::SuggestionApiClient;
use moni_shipment::format::{format_scan_date_time, format_state_info, format_state_location};
use moni_suggestion::events::EventRegistry;
use moni_suggestion::presenter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// moni-desk 상담원 보조 도구
///
/// AI 답변 제안 조회/평가와 요청자 배송 이력 확인
#[derive(Parser, Debug)]
#[command(name = "moni")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (TOML/YAML/JSON)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// API 토큰 (설정 파일/환경변수보다 우선)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// OAuth 연결 상태 확인
    Status,

    /// 외부 계정 연결 (인증 URL 출력 후 완료 대기)
    Connect {
        /// 테넌트 서브도메인
        #[arg(long)]
        subdomain: String,
    },

    /// 티켓의 AI 답변 제안 조회
    Suggestions {
        #[arg(long)]
        ticket: TicketId,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// 제안 평가
    Rate {
        #[arg(long)]
        suggestion: SuggestionId,
        /// 별점 (1~5)
        #[arg(long)]
        stars: u8,
        #[arg(long)]
        feedback: Option<String>,
    },

    /// 새 AI 제안이 생길 때까지 대기 (최대 폴링 타임아웃)
    Watch {
        #[arg(long)]
        ticket: TicketId,
    },

    /// 요청자 이메일로 배송 이력 조회
    Shipments {
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// 배송 증빙 문서 다운로드 (서명 ID가 없으면 배송 완료 증빙)
    Download {
        #[arg(long)]
        shipment: String,
        #[arg(long)]
        signature: Option<u64>,
        /// 저장 디렉터리
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

/// 포트 구현 조립
fn build_services(config: &AppConfig, auth_opener: Arc<dyn AuthWindowOpener>) -> Result<AppServices> {
    let proxy: Arc<dyn RequestProxy> = Arc::new(HttpRequestProxy::new(
        config.api.token.clone(),
        config.api.request_timeout(),
    )?);

    Ok(AppServices {
        suggestion_api: Arc::new(SuggestionApiClient::new(Arc::clone(&proxy), &config.api)),
        shipment_api: Arc::new(ShipmentApiClient::new(proxy, config.shipment.clone())),
        auth_opener,
    })
}

fn build_shell(
    config: &AppConfig,
    host: StaticTicketHost,
    auth_opener: Arc<dyn AuthWindowOpener>,
) -> Result<AppShell> {
    let host: Arc<dyn TicketHost> = Arc::new(host);
    let services = build_services(config, auth_opener)?;
    Ok(AppShell::new(
        host,
        Arc::new(EventRegistry::new()),
        services,
        config,
    ))
}

fn print_suggestions(shell: &AppShell) {
    let store = shell.suggestions().store();
    let views = presenter::present_all(&store.suggestions());
    if views.is_empty() {
        println!("제안 없음");
        return;
    }

    println!(
        "제안 {}개 (전체 {}, 페이지 {})",
        views.len(),
        store.total_count(),
        store.current_page()
    );
    for view in views {
        let rating = view
            .rating_stars
            .map(|s| format!(" ★{s}"))
            .unwrap_or_default();
        println!(
            "#{} [{} {:?}] {}{}",
            view.id,
            view.confidence_text,
            view.confidence_level,
            view.time_ago.label(),
            rating
        );
        match view.failure {
            Some(reason) => println!("    (생성 실패: {reason})"),
            None => println!("    {}", view.preview),
        }
    }
    if store.has_more() {
        println!("(다음 페이지 있음)");
    }
}

fn print_shipment(shipment: &Shipment) {
    println!(
        "{} {} [{}] {}",
        shipment.carrier_name, shipment.tracking_code, shipment.state, shipment.paqato_link
    );
    if let Some(last) = shipment.states.last() {
        let scanned = format_scan_date_time(&last.scan_time);
        println!(
            "    {} {} · {} · {}",
            scanned.date,
            scanned.time,
            format_state_info(last),
            format_state_location(last)
        );
    }
}

/// 부트스트랩 결과가 Ready가 아니면 안내 후 false
fn report_state(state: &AppState) -> bool {
    match state {
        AppState::Ready => true,
        AppState::FeatureNotLicensed => {
            println!("이 계정은 AI 답변 제안 기능을 계약하지 않았습니다.");
            false
        }
        AppState::ApiKeyInvalid => {
            println!("API 키가 유효하지 않습니다. --token 또는 MONI_API__TOKEN을 확인하세요.");
            false
        }
        AppState::FeatureDisabled => {
            println!("활성화된 기능이 없습니다.");
            false
        }
        AppState::Error(message) => {
            println!("초기화 실패: {message}");
            false
        }
        AppState::Loading => false,
    }
}

async fn run(command: Command, config: AppConfig) -> Result<()> {
    match command {
        Command::Status => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", None).with_features(true, false),
                Arc::new(HeadlessAuthOpener),
            )?;
            let state = shell.suggestions().check_oauth_status().await;
            println!("OAuth 상태: {state}");
        }

        Command::Connect { subdomain } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new(subdomain, None).with_features(true, false),
                Arc::new(ConsoleAuthOpener),
            )?;
            if !report_state(&shell.bootstrap().await) {
                return Ok(());
            }
            if shell.suggestions().gate().is_connected() {
                println!("이미 연결되어 있습니다.");
                return Ok(());
            }
            let state = shell.connect_account().await;
            println!("OAuth 상태: {state}");
        }

        Command::Suggestions { ticket, page } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", Some(ticket)).with_features(true, false),
                Arc::new(HeadlessAuthOpener),
            )?;
            if !report_state(&shell.bootstrap().await) {
                return Ok(());
            }
            if !shell.suggestions().store().is_ready() {
                println!("계정이 연결되지 않았습니다. `moni connect`를 먼저 실행하세요.");
                return Ok(());
            }
            if page > 1 {
                shell.suggestions().store().load(page, false).await;
            }
            print_suggestions(&shell);
        }

        Command::Rate {
            suggestion,
            stars,
            feedback,
        } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", None).with_features(true, false),
                Arc::new(HeadlessAuthOpener),
            )?;
            let store = shell.suggestions().store();
            if !store.submit_rating(suggestion, stars, feedback.as_deref()).await {
                bail!("평가 전송 실패: 제안 {suggestion}");
            }
            println!("제안 {suggestion} 평가 완료 ({stars}점)");
        }

        Command::Watch { ticket } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", Some(ticket)).with_features(true, false),
                Arc::new(HeadlessAuthOpener),
            )?;
            if !report_state(&shell.bootstrap().await) {
                return Ok(());
            }

            let lifecycle = Arc::new(LifecycleManager::new());
            let signal = Arc::clone(&lifecycle);
            tokio::spawn(async move { signal.wait_for_signal().await });

            shell.suggestions().store().start_ai_polling();
            println!("새 AI 제안 대기 중... (Ctrl+C로 중단)");

            let before = shell.suggestions().store().total_count();
            match lifecycle.wait_for_polling(shell.suggestions().scheduler()).await {
                WaitOutcome::Shutdown => warn!("사용자 중단"),
                WaitOutcome::PollingFinished => {
                    if shell.suggestions().store().total_count() > before {
                        info!("새 제안 수신");
                    } else {
                        println!("타임아웃: 새 제안 없음");
                    }
                }
            }
            print_suggestions(&shell);
            shell.shutdown();
        }

        Command::Shipments { email, page } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", None)
                    .with_features(false, true)
                    .with_email(Some(email)),
                Arc::new(HeadlessAuthOpener),
            )?;
            if !report_state(&shell.bootstrap().await) {
                return Ok(());
            }

            let browser = shell.shipments();
            if page > 1 {
                browser.load(page).await;
            }
            if browser.is_api_key_invalid() {
                bail!("배송 API 키가 유효하지 않습니다");
            }
            if browser.is_not_licensed() {
                bail!("배송 이력 기능을 계약하지 않았습니다");
            }

            let shipments = browser.shipments();
            if shipments.is_empty() {
                println!("배송 없음");
            }
            for shipment in &shipments {
                print_shipment(shipment);
            }
            if let Some(p) = browser.pagination().filter(|_| browser.has_pagination()) {
                println!("페이지 {}/{}", browser.current_page(), p.max_page);
            }
        }

        Command::Download {
            shipment,
            signature,
            out,
        } => {
            let shell = build_shell(
                &config,
                StaticTicketHost::new("", None).with_features(false, true),
                Arc::new(HeadlessAuthOpener),
            )?;
            let downloader = shell.downloader();
            let document = match signature {
                Some(id) => downloader.download_signature(&shipment, id).await?,
                None => downloader.download_proof_of_delivery(&shipment).await?,
            };
            let path = document.save_to(&out)?;
            println!(
                "{} 저장 ({}, {} bytes)",
                path.display(),
                document.content_type,
                document.bytes.len()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(token) = args.token {
        config.api.token = Some(token);
    }
    if config.api.token.is_none() {
        warn!("API 토큰 미설정, 인증이 필요한 요청은 실패합니다");
    }

    info!("moni v{} 시작", env!("CARGO_PKG_VERSION"));
    run(args.command, config).await
}
