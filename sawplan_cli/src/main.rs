use clap::{Parser, Subcommand, ValueEnum};
use sawplan_core::*;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Characters across the widest side of the layout diagram
const LAYOUT_COLUMNS: usize = 48;

#[derive(Parser)]
#[command(name = "sawplan")]
#[command(about = "Cut planner for sawing logs into boards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log planning steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the cuts for one log (default)
    Plan {
        /// Log diameter in inches
        #[arg(short, long)]
        diameter: Option<f64>,

        /// Log length in inches
        #[arg(short, long)]
        length: Option<f64>,

        /// Blade kerf in inches
        #[arg(short, long)]
        kerf: Option<f64>,

        /// Board profile to mill; repeat to select several, order matters
        #[arg(short, long = "board")]
        boards: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Draw the cant layout (table format only)
        #[arg(long)]
        layout: bool,
    },

    /// List the available board profiles
    Catalog,

    /// Show the active configuration, or write a default one
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

struct PlanArgs {
    diameter: Option<f64>,
    length: Option<f64>,
    kerf: Option<f64>,
    boards: Vec<String>,
    format: OutputFormat,
    layout: bool,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            diameter: None,
            length: None,
            kerf: None,
            boards: Vec::new(),
            format: OutputFormat::Table,
            layout: false,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        sawplan_core::logging::init();
    } else {
        sawplan_core::logging::init_with_level("warn");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Plan {
            diameter,
            length,
            kerf,
            boards,
            format,
            layout,
        }) => {
            let (config, catalog) = load_catalog(cli.config.as_deref())?;
            cmd_plan(
                &config,
                &catalog,
                PlanArgs {
                    diameter,
                    length,
                    kerf,
                    boards,
                    format,
                    layout,
                },
            )
        }
        Some(Commands::Catalog) => {
            let (_, catalog) = load_catalog(cli.config.as_deref())?;
            cmd_catalog(&catalog)
        }
        Some(Commands::Config { init, force }) => cmd_config(cli.config, init, force),
        None => {
            // Default to "plan" with configured defaults
            let (config, catalog) = load_catalog(cli.config.as_deref())?;
            cmd_plan(&config, &catalog, PlanArgs::default())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<(MillConfig, BoardCatalog)> {
    let config = match path {
        Some(path) => MillConfig::load_from(path)?,
        None => MillConfig::load()?,
    };

    let catalog = BoardCatalog::from_config(&config);
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    Ok((config, catalog))
}

fn cmd_plan(config: &MillConfig, catalog: &BoardCatalog, args: PlanArgs) -> Result<()> {
    let labels = if args.boards.is_empty() {
        config.defaults.boards.clone()
    } else {
        args.boards
    };
    tracing::debug!("Selected profiles: {:?}", labels);

    let request = CutRequest {
        log_diameter: args.diameter.unwrap_or(config.defaults.log_diameter),
        log_length: args.length.unwrap_or(config.defaults.log_length),
        kerf: args.kerf.unwrap_or(config.cutting.kerf),
        profiles: catalog.resolve(labels.as_slice())?,
    };
    request.check_limits(&config.limits)?;

    let plan = plan_cut(&request, config)?;
    print_advisories(&plan);

    match args.format {
        OutputFormat::Json => {
            println!("{}", export::to_json(&plan)?);
        }
        OutputFormat::Csv => {
            export::write_csv(&plan.cut_plan, io::stdout().lock())?;
        }
        OutputFormat::Table => {
            display_plan(&plan);
            if args.layout {
                println!();
                print!("{}", render_layout(&plan, LAYOUT_COLUMNS));
            }
            display_summary(&plan.summary);
        }
    }

    Ok(())
}

fn cmd_catalog(catalog: &BoardCatalog) -> Result<()> {
    println!("{:<20} {:>8} {:>8}", "Label", "Width", "Height");
    for profile in catalog.profiles() {
        println!(
            "{:<20} {:>8.2} {:>8.2}",
            profile.label, profile.width, profile.height
        );
    }
    Ok(())
}

fn cmd_config(path: Option<PathBuf>, init: bool, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => MillConfig::default_config_path()?,
    };

    if init {
        if path.exists() && !force {
            return Err(Error::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        MillConfig::default().save_to(&path)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = if path.exists() {
        MillConfig::load_from(&path)?
    } else {
        MillConfig::default()
    };
    println!("# {}", path.display());
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn print_advisories(plan: &MillPlan) {
    for advisory in &plan.advisories {
        eprintln!("⚠ {}", advisory);
    }
}

fn display_plan(plan: &MillPlan) {
    println!(
        "Cant: {:.2} x {:.2} in",
        plan.cant.width, plan.cant.height
    );
    println!();

    if plan.cut_plan.is_empty() {
        println!("  No boards fit in this cant.");
        return;
    }

    println!(
        "{:>4}  {:<18} {:>8} {:>8} {:>8} {:>8}",
        "#", "Label", "X", "Y", "Width", "Height"
    );
    for (i, p) in plan.cut_plan.iter().enumerate() {
        println!(
            "{:>4}  {:<18} {:>8.3} {:>8.3} {:>8.2} {:>8.2}",
            i + 1,
            p.label,
            p.x,
            p.y,
            p.width,
            p.height
        );
    }
}

fn display_summary(summary: &YieldSummary) {
    println!();
    println!("Yield Summary");
    println!("  Total Boards: {}", summary.total_boards);
    println!("  Total Board Feet: {:.2} BF", summary.total_board_feet);
}

/// Draw the cant as a character grid, bottom row last, one letter per label
fn render_layout(plan: &MillPlan, columns: usize) -> String {
    let scale = columns as f64 / plan.cant.width;
    // Terminal cells are roughly twice as tall as they are wide
    let rows = ((plan.cant.height * scale / 2.0).ceil() as usize).max(1);

    let mut grid = vec![vec!['.'; columns]; rows];
    let mut symbols: HashMap<&str, char> = HashMap::new();
    let mut legend: Vec<(char, &str)> = Vec::new();

    for p in &plan.cut_plan {
        let next = symbol_for(legend.len());
        let symbol = *symbols.entry(p.label.as_str()).or_insert_with(|| {
            legend.push((next, p.label.as_str()));
            next
        });

        let c0 = (p.x * scale).floor() as usize;
        let c1 = (((p.x + p.width) * scale).ceil() as usize).min(columns);
        let r0 = (p.y * scale / 2.0).floor() as usize;
        let r1 = (((p.y + p.height) * scale / 2.0).ceil() as usize).min(rows);

        for row in grid.iter_mut().take(r1).skip(r0) {
            for cell in row.iter_mut().take(c1).skip(c0) {
                *cell = symbol;
            }
        }
    }

    let mut out = String::new();
    for row in grid.iter().rev() {
        out.push_str("  |");
        out.extend(row.iter());
        out.push_str("|\n");
    }
    for (symbol, label) in legend {
        out.push_str(&format!("  {} = {}\n", symbol, label));
    }
    out
}

fn symbol_for(index: usize) -> char {
    const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    SYMBOLS
        .get(index)
        .map(|&b| b as char)
        .unwrap_or('#')
}
