use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use studionav::forms::{ContactForm, FormFlow, FormState, SimulatedSubmitter};
use studionav::nav::{ClickTarget, Key, NavEvent, NavigationShell};
use studionav::platform::{Chrome, HeadlessChrome, HeadlessRouter};
use studionav::{config, render};

#[derive(Parser, Debug)]
#[command(name = "studionav", version, about = "Studio website navigation, headless")]
struct Cli {
    /// Log state transitions (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the viewport class for a window width.
    Classify {
        #[arg(allow_negative_numbers = true)]
        width: i32,
    },
    /// Prints the resolved menu tree.
    Menu,
    /// Renders the navigation at a width.
    Render {
        #[arg(long, default_value_t = 1280, allow_negative_numbers = true)]
        width: i32,
        /// Open the slide-in panel first.
        #[arg(long)]
        open: bool,
    },
    /// Replays a session of events and prints the resulting state.
    ///
    /// Events: hamburger, tab, shift-tab, escape, backdrop, close, outside,
    /// toggle:<label>, click:<href>, hover:<label>, leave:<label>,
    /// inside:<label>, resize:<width>.
    Simulate {
        #[arg(long, default_value_t = 390, allow_negative_numbers = true)]
        width: i32,
        events: Vec<String>,
    },
    /// Runs the simulated contact form submission.
    SubmitContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
        /// Simulated network delay in milliseconds.
        #[arg(long, default_value_t = 1500)]
        delay_ms: u64,
        /// Make the simulated backend reject the submission.
        #[arg(long)]
        fail: bool,
    },
    /// Validates the config.
    Check,
    /// Prints the config path that would be used (if any).
    ConfigPath,
    /// Writes a config template with the built-in menu if none exists.
    Init,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "studionav=debug" } else { "studionav=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Classify { width } => {
            let resolved = config::resolve(config::load_optional()?.as_ref())?;
            println!("{}", resolved.breakpoints.classify(width));
        }
        Command::Menu => {
            let resolved = config::resolve(config::load_optional()?.as_ref())?;
            print!("{}", render::menu_tree(&resolved.menu));
        }
        Command::Render { width, open } => {
            let resolved = config::resolve(config::load_optional()?.as_ref())?;
            let mut shell = NavigationShell::new(
                resolved.menu,
                resolved.breakpoints,
                width,
                HeadlessChrome::new(),
            );
            if open {
                shell.toggle();
            }
            print!("{}", render::shell(&shell.render()));
        }
        Command::Simulate { width, events } => {
            let resolved = config::resolve(config::load_optional()?.as_ref())?;
            let mut shell = NavigationShell::new(
                resolved.menu,
                resolved.breakpoints,
                width,
                HeadlessChrome::new(),
            );
            let mut router = HeadlessRouter::new();
            for raw in &events {
                let event = parse_event(raw, &shell).with_context(|| format!("event '{raw}'"))?;
                info!(?event, "dispatch");
                let order = shell.focus_order().to_vec();
                let update = shell.handle(event.clone(), &mut router);
                if let NavEvent::Key(key @ (Key::Tab | Key::ShiftTab)) = event {
                    if !update.prevent_default && !order.is_empty() {
                        shell
                            .chrome_mut()
                            .advance_focus(&order, key == Key::ShiftTab);
                    }
                }
            }
            print!("{}", render::shell(&shell.render()));
            let chrome = shell.chrome();
            println!(
                "focused: {}",
                chrome
                    .focused()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "<none>".to_string())
            );
            println!("scroll locked: {}", chrome.scroll_locked());
            for call in router.calls() {
                println!("router: {call:?}");
            }
        }
        Command::SubmitContact {
            name,
            email,
            phone,
            message,
            delay_ms,
            fail,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                message,
            };
            let mut submitter = SimulatedSubmitter::new(Duration::from_millis(delay_ms));
            if fail {
                submitter = submitter.failing();
            }
            let mut flow = FormFlow::new();
            match flow.submit(&form, &mut submitter) {
                FormState::Submitted(receipt) => {
                    println!("Thanks! Your message was sent (ref #{}).", receipt.reference)
                }
                FormState::Invalid(errors) => {
                    let errors = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                    bail!("form is invalid: {}", errors.join("; "));
                }
                FormState::Failed(message) => bail!(*message),
                other => bail!("unexpected form state {other:?}"),
            }
        }
        Command::Check => {
            let cfg = config::load_optional()?;
            let resolved = config::resolve(cfg.as_ref())?;
            let source = match (cfg.is_some(), config::resolve_config_path()) {
                (true, Some(path)) => path.display().to_string(),
                _ => "built-in defaults".to_string(),
            };
            println!(
                "ok: {} menu items, breakpoints md={} lg={} ({source})",
                resolved.menu.items.len(),
                resolved.breakpoints.md,
                resolved.breakpoints.lg
            );
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path() {
                println!("{}", path.display());
            }
        }
        Command::Init => {
            let path = config::ensure_config_file_exists().context("write config template")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn parse_event(raw: &str, shell: &NavigationShell<HeadlessChrome>) -> Result<NavEvent> {
    let (name, arg) = match raw.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (raw, None),
    };
    let event = match (name, arg) {
        ("hamburger", None) => NavEvent::HamburgerClick,
        ("tab", None) => NavEvent::Key(Key::Tab),
        ("shift-tab", None) => NavEvent::Key(Key::ShiftTab),
        ("escape", None) => NavEvent::Key(Key::Escape),
        ("backdrop", None) => NavEvent::BackdropClick,
        ("close", None) => NavEvent::CloseButtonClick,
        ("outside", None) => NavEvent::DocumentClick(ClickTarget::outside()),
        ("toggle", Some(label)) => NavEvent::ToggleGroup(label.to_string()),
        ("hover", Some(label)) => NavEvent::HoverEnter(label.to_string()),
        ("leave", Some(label)) => NavEvent::LeavePanel(label.to_string()),
        ("inside", Some(label)) => {
            let Some(container) = shell.desktop().container_of(label) else {
                bail!("'{label}' has no dropdown container");
            };
            NavEvent::DocumentClick(ClickTarget::inside(container))
        }
        ("click", Some(href)) if shell.is_open() => NavEvent::PanelLinkClick(href.to_string()),
        ("click", Some(href)) => NavEvent::DesktopLinkClick(href.to_string()),
        ("resize", Some(width)) => {
            let width = width
                .parse::<i32>()
                .with_context(|| format!("invalid width '{width}'"))?;
            NavEvent::Resize(width)
        }
        _ => bail!("unknown event"),
    };
    Ok(event)
}
