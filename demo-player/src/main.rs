use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use demo_player::{
    app::App,
    catalog::WorkflowSource,
    config::ConfigOverrides,
    headless::run_headless,
    logging::{init_logging, LogTarget},
    ui::ui,
    Catalog, DemoPlayer, PlayerConfig,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Interactive demo of the Emergence Orchestrator's workflow execution
#[derive(Parser, Debug)]
#[command(name = "demo-player", version)]
struct Cli {
    /// YAML config file (default: <config dir>/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// YAML file of extra workflows to add to the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Milliseconds each step stays active
    #[arg(long, global = true)]
    active_ms: Option<u64>,

    /// Milliseconds to pause after each step completes
    #[arg(long, global = true)]
    gap_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal view (default)
    Tui {
        /// Workflow selected on startup
        #[arg(short, long)]
        workflow: Option<String>,
    },
    /// Play one workflow to stdout
    Run {
        /// Workflow id (default: configured workflow or ecom-order)
        #[arg(short, long)]
        workflow: Option<String>,

        /// Also emit structured events to stderr
        #[arg(long)]
        json: bool,
    },
    /// List the workflow catalog
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Tui { workflow: None });
    let log_target = match &command {
        Command::Tui { .. } => LogTarget::data_file(),
        _ => LogTarget::Stderr,
    };
    init_logging(&log_target)?;

    let workflow = match &command {
        Command::Tui { workflow } | Command::Run { workflow, .. } => workflow.clone(),
        Command::List { .. } => None,
    };
    let config = PlayerConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(ConfigOverrides {
            active_ms: cli.active_ms,
            gap_ms: cli.gap_ms,
            workflow,
            catalog_path: cli.catalog,
        });

    let catalog = Arc::new(
        Catalog::load_with_builtin(config.catalog_path.as_deref())
            .context("failed to load workflow catalog")?,
    );

    match command {
        Command::List { json } => list_catalog(&catalog, json),
        Command::Run { json, .. } => {
            let player = build_player(catalog, &config)?;
            let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            runtime.block_on(async {
                let watcher = player.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        watcher.shutdown();
                    }
                });
                run_headless(player, json).await
            })
        }
        Command::Tui { .. } => {
            let player = build_player(catalog, &config)?;
            run_tui(player)
        }
    }
}

fn build_player(catalog: Arc<Catalog>, config: &PlayerConfig) -> Result<DemoPlayer> {
    let timing = config.timing().context("invalid timing configuration")?;
    let player = match &config.default_workflow {
        Some(id) => {
            if catalog.get(id).is_none() {
                bail!(
                    "unknown workflow '{}'; available: {}",
                    id,
                    catalog.ids().join(", ")
                );
            }
            DemoPlayer::with_selection(catalog, timing, id)?
        }
        None => DemoPlayer::new(catalog, timing),
    };
    Ok(player)
}

fn list_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let defs: Vec<_> = catalog.iter().map(|e| &e.definition).collect();
        println!("{}", serde_json::to_string_pretty(&defs)?);
        return Ok(());
    }

    for entry in catalog.iter() {
        let def = &entry.definition;
        let source = match entry.source {
            WorkflowSource::BuiltIn => "built-in",
            WorkflowSource::UserDefined => "user",
        };
        println!("{:<22} {} ({} steps, {})", def.id, def.name, def.steps.len(), source);
        println!("{:<22} {}", "", def.description);
    }
    Ok(())
}

fn run_tui(player: DemoPlayer) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new(player).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {:?}", err);
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_events();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
