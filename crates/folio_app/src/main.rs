mod platform;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use folio_core::{AppState, FormField, Msg};
use folio_engine::{ensure_output_dir, EngineHandle, Launcher, LogOnlyLauncher, SystemLauncher};
use folio_logging::folio_info;

use platform::app::PageShell;
use platform::config::SiteConfig;
use platform::logging::{self, LogDestination};
use platform::publish::build_site;
use platform::ui::render::PageChrome;

/// Upper bound for one page visit to settle, fallback clear included.
const SETTLE_LIMIT: Duration = Duration::from_secs(60);

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Single-page portfolio site")]
struct Cli {
    /// RON configuration file; defaults to ./folio.ron when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal, global = true)]
    log: LogDestination,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the root page, every project page and the not-found page.
    Build {
        /// Output directory; overrides `output_dir` from the configuration.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Open an address such as `/#contact` and report where it lands.
    Open { location: String },
    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let config = SiteConfig::load(cli.config.as_deref())?;
    let mut shell = start_shell(&config)?;
    let outcome = run(&cli.command, &config, &mut shell);
    shell.shutdown();
    outcome
}

fn start_shell(config: &SiteConfig) -> Result<PageShell> {
    let launcher: Arc<dyn Launcher> = if config.launch_mail_client {
        Arc::new(SystemLauncher)
    } else {
        Arc::new(LogOnlyLauncher::new())
    };
    let engine = EngineHandle::new(config.engine_config()?, launcher)
        .context("failed to start the engine runtime")?;
    let chrome = PageChrome {
        site_title: config.site_title.clone(),
        owner_name: config.owner_name.clone(),
        year: chrono::Local::now().year(),
    };
    Ok(PageShell::new(
        AppState::with_settings(config.site_settings()),
        engine,
        chrome,
        config.viewport_height,
        config.smooth_scroll,
    ))
}

fn run(command: &Command, config: &SiteConfig, shell: &mut PageShell) -> Result<()> {
    match command {
        Command::Build { out } => {
            let out = out.clone().unwrap_or_else(|| config.output_dir.clone());
            ensure_output_dir(&out)?;
            let written = build_site(shell, &out, SETTLE_LIMIT)?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Command::Open { location } => {
            shell.visit(location);
            settle(shell)?;
            let section = shell
                .active_section()
                .map_or_else(|| "none".to_string(), |section| section.anchor().to_string());
            println!("route: {}", shell.state().route().path());
            println!("offset: {:.0}", shell.scroll_offset());
            println!("section: {section}");
            if let Some(address) = shell.history().last() {
                println!("address: {address}");
            }
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            shell.visit("/");
            settle(shell)?;
            for (field, value) in [
                (FormField::Name, name),
                (FormField::Email, email),
                (FormField::Subject, subject),
                (FormField::Message, message),
            ] {
                shell.post(Msg::FieldEdited {
                    field,
                    value: value.clone(),
                });
            }
            shell.post(Msg::SubmitClicked);
            settle(shell)?;
            match shell.state().contact().notification() {
                Some(notification) => println!("{:?}: {}", notification.kind, notification.text),
                None => println!("no response"),
            }
        }
    }
    Ok(())
}

fn settle(shell: &mut PageShell) -> Result<()> {
    if !shell.run_until_idle(SETTLE_LIMIT) {
        bail!("page did not settle within {:?}", SETTLE_LIMIT);
    }
    folio_info!("settled at offset {}", shell.scroll_offset());
    Ok(())
}
