use clap::Parser;
use homeytips::core::advice::{AdviceClient, Credential};
use homeytips::core::checkout::DEFAULT_WHATSAPP_PHONE;
use homeytips::core::config::Config;
use homeytips::ui::shell::{run_shell, Shell};
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "homeytips")]
#[command(about = "A terminal storefront with AI-assisted planning tools")]
#[command(
    long_about = "HomeyTips is a full-screen terminal storefront combining a \
product/testimonial catalog with three AI-assisted planning tools: a financial \
health check, a savings timeline / trip planner, and recipe suggestions.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    API key for the generative-text endpoint (optional; the\n\
                    AI buttons degrade to a fixed advisory without it)\n\n\
Controls:\n\
  F1-F4             Switch views\n\
  Tab               Cycle widgets / form fields\n\
  Up/Down           Select fields and products\n\
  Enter             Calculate / confirm\n\
  Ctrl+G            Ask the AI about the calculated result\n\
  Ctrl+C            Quit"
)]
struct Args {
    /// Directory containing products.json, testimonials.json, and images/
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Append tracing output to this file (honors RUST_LOG)
    #[arg(long, value_name = "FILE")]
    debug_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = &args.debug_log {
        init_logging(path)?;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            // A broken config file must not take the storefront down.
            eprintln!("Konfigurasi tidak terbaca ({err}); menggunakan bawaan.");
            Config::default()
        }
    };

    let api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.api_key.clone());
    let advice = AdviceClient::new(Credential::from_option(api_key), config.endpoint.clone());

    let phone = config
        .whatsapp_phone
        .clone()
        .unwrap_or_else(|| DEFAULT_WHATSAPP_PHONE.to_string());
    let data_dir = args.data_dir.unwrap_or_else(|| config.resolved_data_dir());

    let mut shell = Shell::new(advice, phone, data_dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_shell(&mut terminal, &mut shell).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("homeytips=debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
