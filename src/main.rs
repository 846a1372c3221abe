//! FlexDash - CLI entry point
//!
//! Edits a dashboard document file from the command line. Each invocation
//! loads the file (a missing file is an empty dashboard), applies one
//! command, and rewrites the file only if the dashboard reported a change.

use clap::{Parser, Subcommand};
use flex_dash::actions::info_text;
use flex_dash::config::{default, xdg, Config, ConfigError, ConfigLoader};
use flex_dash::{
    logging, ColumnCount, Dashboard, DashboardError, DropOutcome, DropTarget, SlotTarget, Widget,
    WidgetActions, WidgetId, WidgetRef,
};
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Band/widget dashboard layout editor
#[derive(Parser)]
#[command(name = "flexdash")]
#[command(version, about = "Band/widget dashboard layout editor")]
struct Cli {
    /// Dashboard document to edit
    #[arg(long, short, global = true, default_value = "dashboard.json")]
    file: PathBuf,

    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the flexdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard layout
    Show {
        /// Print the document JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Add a widget to the first band with room
    Add {
        /// Widget id, unique across the dashboard
        id: String,
        /// Caption shown on the widget
        title: String,
        /// Content path, appended to the configured base URL
        render_url: String,
        /// Append to this band instead, without a capacity check
        #[arg(long)]
        band: Option<usize>,
    },

    /// Change a widget's title
    Rename {
        id: String,
        title: String,
    },

    /// Remove a widget
    Remove {
        id: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Move a widget to the trailing end of another band
    Move {
        id: String,
        /// Destination band index
        #[arg(long, conflicts_with = "new_band", required_unless_present = "new_band")]
        to: Option<usize>,
        /// Move into a new band at the end of the dashboard
        #[arg(long)]
        new_band: bool,
    },

    /// Set a band's column count, splitting off widgets that no longer fit
    Columns {
        band: usize,
        /// 1, 2 or 3
        count: u64,
    },

    /// Set a band's height in pixels
    Resize {
        band: usize,
        height: u32,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Widget \"{id}\" was not moved: the destination has no room")]
    NotMoved { id: WidgetId },
}

/// Confirms every deletion; used for `remove --yes`.
struct AssumeYes;

impl WidgetActions for AssumeYes {
    fn confirm_delete(&self, _widget: &WidgetRef) -> LocalBoxFuture<'static, bool> {
        future::ready(true).boxed_local()
    }

    fn display_info(&self, widget: &WidgetRef) {
        println!("{}", info_text(widget));
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { action } => run_config_command(action, cli.config.as_deref()),
        command => run_dashboard_command(command, &cli.file, cli.config.as_deref()),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_config_command(action: ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    match action {
        ConfigAction::Init { force } => {
            let path = default::create_default_config(force)?;
            println!("Created configuration at {}", path.display());
        }
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(path)?;
            println!("Configuration is valid");
            println!("{config:#?}");
        }
    }
    Ok(())
}

fn run_dashboard_command(
    command: Commands,
    file: &Path,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config: Config = ConfigLoader::load(config_path)?;
    logging::init(config.logging.log_level);

    let mut dashboard = Dashboard::headless(config.dashboard_options()?);
    if file.exists() {
        let json = std::fs::read_to_string(file).map_err(|source| CliError::Io {
            action: "read",
            path: file.to_path_buf(),
            source,
        })?;
        dashboard.load_json(&json)?;
    }
    let mut changes = dashboard.subscribe();

    apply(&mut dashboard, command)?;

    if changes.try_recv().is_ok() {
        let json = dashboard.as_document().to_json_pretty()?;
        std::fs::write(file, json + "\n").map_err(|source| CliError::Io {
            action: "write",
            path: file.to_path_buf(),
            source,
        })?;
        tracing::debug!("Saved dashboard to {}", file.display());
    }
    Ok(())
}

fn apply(dashboard: &mut Dashboard, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Show { json } => {
            if json {
                println!("{}", dashboard.as_document().to_json_pretty()?);
            } else {
                print!("{}", listing(dashboard));
            }
        }
        Commands::Add {
            id,
            title,
            render_url,
            band,
        } => {
            let widget = Widget::new(id.as_str(), title, render_url);
            let band = match band {
                Some(index) => {
                    dashboard.add_widget_in_band(widget, index)?;
                    index
                }
                None => dashboard.add_widget(widget)?,
            };
            println!("Added widget \"{id}\" to band {band}");
        }
        Commands::Rename { id, title } => {
            if dashboard.update_widget_title(&WidgetId::from(id.as_str()), title)? {
                println!("Renamed widget \"{id}\"");
            } else {
                println!("Widget \"{id}\" already has that title");
            }
        }
        Commands::Remove { id, yes } => {
            let id = WidgetId::from(id);
            if yes {
                dashboard.set_actions(AssumeYes);
            }
            if block_on_delete(dashboard, &id)? {
                println!("Removed widget \"{id}\"");
            } else {
                println!("Kept widget \"{id}\"");
            }
        }
        Commands::Move { id, to, new_band } => {
            let id = WidgetId::from(id);
            let slots = dashboard.begin_drag(&id)?;
            let target = if new_band {
                slots
                    .iter()
                    .find(|slot| slot.target == SlotTarget::NewBand)
                    .map(|slot| DropTarget::Slot(slot.index))
            } else {
                to.and_then(|index| dashboard.band(index))
                    .map(|band| DropTarget::Band(band.id()))
            };
            if let (Some(index), None) = (to, target) {
                dashboard.end_drag(None)?;
                return Err(DashboardError::InvalidBandIndex {
                    index,
                    band_count: dashboard.band_count(),
                }
                .into());
            }
            match dashboard.end_drag(target)? {
                DropOutcome::Moved { band } => println!("Moved widget \"{id}\" to band {band}"),
                DropOutcome::Unchanged => println!("Widget \"{id}\" is already there"),
                DropOutcome::Abandoned => return Err(CliError::NotMoved { id }),
            }
        }
        Commands::Columns { band, count } => {
            let count = ColumnCount::new(count)?;
            let inserted = edit_band(dashboard, band, |d| d.set_column_count(count))?;
            match inserted {
                Some(new_band) => println!(
                    "Band {band} now has {count} columns; overflow moved to band {new_band}"
                ),
                None => println!("Band {band} now has {count} columns"),
            }
        }
        Commands::Resize { band, height } => {
            edit_band(dashboard, band, |d| d.resize_selected_band(height))?;
            println!("Band {band} is now {height}px high");
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

/// Runs a band-level command inside band edit mode with `band` selected.
fn edit_band<T>(
    dashboard: &mut Dashboard,
    band: usize,
    command: impl FnOnce(&mut Dashboard) -> Result<T, DashboardError>,
) -> Result<T, DashboardError> {
    dashboard.enter_band_edit_mode()?;
    let result = dashboard.select_band(band).and_then(|_| command(dashboard));
    dashboard.leave_band_edit_mode();
    result
}

fn block_on_delete(dashboard: &mut Dashboard, id: &WidgetId) -> Result<bool, CliError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|source| CliError::Io {
            action: "start runtime for",
            path: PathBuf::from("confirmation"),
            source,
        })?;
    Ok(rt.block_on(dashboard.request_delete(id))?)
}

/// Human-readable layout, one line per band.
fn listing(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    for (index, band) in dashboard.bands().iter().enumerate() {
        let widgets: Vec<String> = band
            .widgets()
            .iter()
            .map(|w| format!("\"{}\" ({})", w.title, w.id))
            .collect();
        out.push_str(&format!(
            "Band {index} [{}/{} columns, {}px]: {}\n",
            band.len(),
            band.column_count(),
            band.height(),
            if widgets.is_empty() {
                "(empty)".to_string()
            } else {
                widgets.join(", ")
            }
        ));
    }
    out
}
