//! Rigforge - PC build configurator CLI
//!
//! The `rigforge` command checks component picks against the compatibility
//! rules and manages saved builds on disk.
//!
//! ## Commands
//!
//! - `catalog`: List catalog components, optionally for one slot
//! - `check`: Evaluate a set of picks and run the finalize gate
//! - `save`: Persist a set of picks as a named build
//! - `list` / `show` / `delete`: Manage saved builds in the active scope
//! - `steps`: Print the wizard slot order

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rigforge_core::{
    BuildId, BuildRepository, BuildSession, BuildSummary, Catalog, FinalizeVerdict,
    IssueSeverity, RepositoryConfig, SavedBuild, ScopeSpan, Slot, StepOrchestrator, DEFAULT_SCOPE,
    METRICS,
};
use rigforge_state::{FsBuildStore, StoreScope};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "rigforge")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "PC build configurator: compatibility checks and saved builds", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding saved builds
    #[arg(long, global = true, env = "RIGFORGE_STORE_DIR", default_value = ".rigforge")]
    store_dir: PathBuf,

    /// Storage scope (one build list per scope)
    #[arg(long, global = true, env = "RIGFORGE_SCOPE", default_value = DEFAULT_SCOPE)]
    scope: String,

    /// Maximum number of saved builds per scope
    #[arg(long, global = true, env = "RIGFORGE_MAX_BUILDS")]
    max_builds: Option<usize>,

    /// Catalog JSON file (array of components)
    #[arg(long, global = true, env = "RIGFORGE_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog components
    Catalog {
        /// Only components for this slot (cpu, motherboard, ram, gpu, storage, case, psu)
        #[arg(long)]
        slot: Option<Slot>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a build: compatibility issues, metrics and finalize verdict
    ///
    /// Exits non-zero when the build cannot go to checkout.
    Check {
        /// Component pick as slot=id (repeatable)
        #[arg(short, long = "pick", value_parser = parse_pick)]
        picks: Vec<Pick>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Save a build under a name
    Save {
        /// Build name (blank names are saved as "Untitled build")
        #[arg(short, long, default_value = "")]
        name: String,

        /// Component pick as slot=id (repeatable)
        #[arg(short, long = "pick", value_parser = parse_pick)]
        picks: Vec<Pick>,
    },

    /// List saved builds in the active scope
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show one saved build with its current evaluation
    Show {
        /// Saved build ID
        id: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete a saved build
    Delete {
        /// Saved build ID
        id: String,
    },

    /// Print the wizard step order
    Steps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// One `slot=component-id` selection from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pick {
    slot: Slot,
    id: String,
}

fn parse_pick(raw: &str) -> std::result::Result<Pick, String> {
    let (slot, id) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected slot=id, got '{raw}'"))?;
    let slot = slot.trim().parse::<Slot>().map_err(|e| e.to_string())?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing component id for slot '{slot}'"));
    }
    Ok(Pick {
        slot,
        id: id.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    rigforge_core::init_tracing(cli.json, level);

    let result = run(&cli).await;
    if cli.verbose {
        METRICS.flush();
    }
    result
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Catalog { slot, format } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            cmd_catalog(&catalog, *slot, *format)
        }
        Commands::Check { picks, format } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            cmd_check(&catalog, picks, *format)
        }
        Commands::Save { name, picks } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let repo = open_repository(cli).await?;
            let _span = ScopeSpan::enter(repo.scope().as_str());
            cmd_save(&repo, &catalog, name, picks).await
        }
        Commands::List { format } => {
            let repo = open_repository(cli).await?;
            let _span = ScopeSpan::enter(repo.scope().as_str());
            cmd_list(&repo, *format).await
        }
        Commands::Show { id, format } => {
            let repo = open_repository(cli).await?;
            let _span = ScopeSpan::enter(repo.scope().as_str());
            cmd_show(&repo, id, *format).await
        }
        Commands::Delete { id } => {
            let repo = open_repository(cli).await?;
            let _span = ScopeSpan::enter(repo.scope().as_str());
            cmd_delete(&repo, id).await
        }
        Commands::Steps => {
            println!("{}", render_steps(&StepOrchestrator::new()));
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let path = path.context("No catalog given: pass --catalog or set RIGFORGE_CATALOG")?;
    debug!("Loading catalog from {:?}", path);
    Catalog::from_path(path).with_context(|| format!("Failed to load catalog {:?}", path))
}

async fn open_repository(cli: &Cli) -> Result<BuildRepository<FsBuildStore>> {
    let scope = StoreScope::new(cli.scope.as_str()).context("Invalid scope")?;
    let mut config = RepositoryConfig::new(scope);
    if let Some(max) = cli.max_builds {
        config = config.with_max_builds(max);
    }
    let store = FsBuildStore::new(&cli.store_dir)
        .with_context(|| format!("Failed to open build store at {:?}", cli.store_dir))?;
    BuildRepository::open(store, config)
        .await
        .context("Failed to open saved builds")
}

/// Apply `picks` in order to a fresh session.
fn session_from_picks(catalog: &Catalog, picks: &[Pick]) -> Result<BuildSession> {
    let mut session = BuildSession::new();
    for pick in picks {
        let component = catalog.require(&pick.id)?.clone();
        session
            .select(pick.slot, Some(component))
            .with_context(|| format!("Cannot place '{}' in slot {}", pick.id, pick.slot))?;
    }
    Ok(session)
}

fn cmd_catalog(catalog: &Catalog, slot: Option<Slot>, format: OutputFormat) -> Result<()> {
    let components: Vec<_> = match slot {
        Some(slot) => catalog.for_slot(slot).collect(),
        None => catalog.iter().collect(),
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&components)?),
        OutputFormat::Text => {
            if components.is_empty() {
                println!("No components");
            }
            for c in components {
                println!(
                    "{:<20} {:<12} {:>14}  {}",
                    c.id,
                    c.sub_category,
                    format_price(c.price),
                    c.title
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport<'a> {
    summary: &'a BuildSummary,
    finalize: &'a FinalizeVerdict,
}

fn cmd_check(catalog: &Catalog, picks: &[Pick], format: OutputFormat) -> Result<()> {
    let session = session_from_picks(catalog, picks)?;
    let summary = session.summary();
    let verdict = session.can_finalize();

    match format {
        OutputFormat::Json => {
            let report = CheckReport {
                summary: &summary,
                finalize: &verdict,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => println!("{}", render_check_text(&summary, &verdict)),
    }

    match verdict.block() {
        None => Ok(()),
        Some(block) => anyhow::bail!("Build cannot be finalized: {block}"),
    }
}

async fn cmd_save(
    repo: &BuildRepository<FsBuildStore>,
    catalog: &Catalog,
    name: &str,
    picks: &[Pick],
) -> Result<()> {
    let session = session_from_picks(catalog, picks)?;
    let saved = repo
        .save(name, session.config())
        .await
        .context("Failed to save build")?;
    info!("Saved build {} in scope {}", saved.id, repo.scope());
    println!(
        "Saved \"{}\" as {} (total {})",
        saved.name,
        saved.id,
        format_price(saved.total_price)
    );
    Ok(())
}

async fn cmd_list(repo: &BuildRepository<FsBuildStore>, format: OutputFormat) -> Result<()> {
    let builds = repo.list().await;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&builds)?),
        OutputFormat::Text => {
            if builds.is_empty() {
                println!("No saved builds in scope {}", repo.scope());
            }
            for build in &builds {
                println!(
                    "{}  {}  {:>14}  {}",
                    build.id,
                    build.created_at.format("%Y-%m-%d %H:%M"),
                    format_price(build.total_price),
                    build.name
                );
            }
        }
    }
    Ok(())
}

async fn cmd_show(
    repo: &BuildRepository<FsBuildStore>,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let saved = repo.load(&BuildId::from(id)).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&saved)?),
        OutputFormat::Text => println!("{}", render_saved_build_text(&saved)),
    }
    Ok(())
}

async fn cmd_delete(repo: &BuildRepository<FsBuildStore>, id: &str) -> Result<()> {
    let before = repo.len().await;
    repo.delete(&BuildId::from(id))
        .await
        .context("Failed to delete build")?;
    if repo.len().await < before {
        println!("Deleted {}", id);
    } else {
        println!("No saved build {} in scope {}", id, repo.scope());
    }
    Ok(())
}

fn render_steps(steps: &StepOrchestrator) -> String {
    steps
        .steps()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let optional = if slot.is_required() { "" } else { " (optional)" };
            format!("{}. {}{}", i + 1, slot.label(), optional)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_summary_lines(summary: &BuildSummary, out: &mut Vec<String>) {
    out.push(format!("Total: {}", format_price(summary.metrics.total_price)));
    out.push(format!(
        "Performance score: {}/100",
        summary.metrics.performance_score
    ));
    if summary.issues.is_empty() {
        out.push("No compatibility issues".to_string());
    }
    for issue in &summary.issues {
        let marker = match issue.severity {
            IssueSeverity::Error => "✗ error  ",
            IssueSeverity::Warning => "! warning",
        };
        out.push(format!("  {} {}", marker, issue.message));
    }
}

fn render_check_text(summary: &BuildSummary, verdict: &FinalizeVerdict) -> String {
    let mut out = Vec::new();
    render_summary_lines(summary, &mut out);
    out.push(match verdict.block() {
        None => "Finalize: ✓ ready for checkout".to_string(),
        Some(block) => format!("Finalize: ✗ {block}"),
    });
    out.join("\n")
}

fn render_saved_build_text(saved: &SavedBuild) -> String {
    let mut out = vec![
        format!("{} ({})", saved.name, saved.id),
        format!("Saved: {}", saved.created_at.to_rfc3339()),
    ];
    for slot in Slot::ALL {
        let line = match saved.config.get(slot) {
            Some(c) => format!(
                "  {:<12} {:<40} {:>14}",
                slot.label(),
                c.title,
                format_price(c.price)
            ),
            None => format!("  {:<12} -", slot.label()),
        };
        out.push(line);
    }
    render_summary_lines(&BuildSummary::of(&saved.config), &mut out);
    out.join("\n")
}

/// Whole-unit price with thousands separators.
fn format_price(price: f64) -> String {
    let digits = format!("{:.0}", price.max(0.0));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const CATALOG: &str = r#"[
        { "id": "cpu-7600", "title": "Ryzen 5 7600", "subCategory": "cpu", "price": 3200000,
          "meta": { "socket": "AM5", "tdp": 65 } },
        { "id": "cpu-14600k", "title": "Core i5-14600K", "subCategory": "cpu", "price": 4800000,
          "meta": { "socket": "LGA1700", "tdp": 125 } },
        { "id": "mb-b650", "title": "B650 Tomahawk", "subCategory": "motherboard", "price": 3100000,
          "meta": { "socket": "AM5", "ramType": "DDR5", "formFactor": "ATX" } },
        { "id": "ram-ddr5", "title": "32GB DDR5", "subCategory": "ram", "price": 1600000,
          "meta": { "type": "DDR5" } },
        { "id": "gpu-4070", "title": "RTX 4070", "subCategory": "gpu", "price": 9500000,
          "meta": { "tdp": 220, "length": 300 } },
        { "id": "ssd-1tb", "title": "1TB NVMe", "subCategory": "storage", "price": 1100000 },
        { "id": "psu-750", "title": "750W Gold", "subCategory": "psu", "price": 1500000,
          "meta": { "wattage": 750 } }
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    fn picks(raw: &[&str]) -> Vec<Pick> {
        raw.iter().map(|p| parse_pick(p).unwrap()).collect()
    }

    fn full_picks() -> Vec<Pick> {
        picks(&[
            "cpu=cpu-7600",
            "motherboard=mb-b650",
            "ram=ram-ddr5",
            "gpu=gpu-4070",
            "storage=ssd-1tb",
            "psu=psu-750",
        ])
    }

    async fn temp_repo(dir: &Path) -> BuildRepository<FsBuildStore> {
        let store = FsBuildStore::new(dir).unwrap();
        let config = RepositoryConfig::new(StoreScope::new("cli-test").unwrap());
        BuildRepository::open(store, config).await.unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_repeated_picks() {
        let cli = Cli::try_parse_from([
            "rigforge",
            "check",
            "--pick",
            "cpu=cpu-7600",
            "-p",
            "gpu=gpu-4070",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { picks, format } => {
                assert_eq!(picks.len(), 2);
                assert_eq!(picks[1].slot, Slot::Gpu);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_pick() {
        assert_eq!(
            parse_pick(" psu = psu-750 ").unwrap(),
            Pick {
                slot: Slot::Psu,
                id: "psu-750".to_string()
            }
        );
        assert!(parse_pick("cpu").unwrap_err().contains("slot=id"));
        assert!(parse_pick("cooler=x").is_err());
        assert!(parse_pick("cpu=").unwrap_err().contains("missing component id"));
    }

    #[test]
    fn test_check_passes_for_complete_build() {
        assert!(cmd_check(&catalog(), &full_picks(), OutputFormat::Text).is_ok());
    }

    #[test]
    fn test_check_fails_when_blocked() {
        let err = cmd_check(&catalog(), &picks(&["cpu=cpu-7600"]), OutputFormat::Json).unwrap_err();
        assert!(format!("{err:#}").contains("missing required components"));

        let mut bad = full_picks();
        bad[0] = parse_pick("cpu=cpu-14600k").unwrap();
        let err = cmd_check(&catalog(), &bad, OutputFormat::Text).unwrap_err();
        assert!(format!("{err:#}").contains("compatibility error"));
    }

    #[test]
    fn test_unknown_or_misplaced_pick_rejected() {
        assert!(session_from_picks(&catalog(), &picks(&["cpu=nope"])).is_err());
        let err = session_from_picks(&catalog(), &picks(&["gpu=cpu-7600"])).unwrap_err();
        assert!(format!("{err:#}").contains("Cannot place 'cpu-7600' in slot gpu"));
    }

    #[test]
    fn test_render_check_text() {
        let session =
            session_from_picks(&catalog(), &picks(&["cpu=cpu-14600k", "motherboard=mb-b650"]))
                .unwrap();
        let text = render_check_text(&session.summary(), &session.can_finalize());
        assert!(text.contains("Total: 7,900,000"));
        assert!(text.contains("✗ error"));
        assert!(text.contains("Finalize: ✗ missing required components: ram, gpu, storage, psu"));
    }

    #[test]
    fn test_render_steps_marks_case_optional() {
        let text = render_steps(&StepOrchestrator::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("1. "));
        assert!(lines[5].ends_with("(optional)"));
        assert_eq!(lines.iter().filter(|l| l.ends_with("(optional)")).count(), 1);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(1000.0), "1,000");
        assert_eq!(format_price(21_000_000.0), "21,000,000");
    }

    #[tokio::test]
    async fn test_save_list_show_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repo(dir.path()).await;

        cmd_save(&repo, &catalog(), "Desk build", &full_picks())
            .await
            .unwrap();
        let builds = repo.list().await;
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].name, "Desk build");
        assert_eq!(builds[0].total_price, 20_000_000.0);

        let id = builds[0].id.to_string();
        cmd_list(&repo, OutputFormat::Text).await.unwrap();
        cmd_show(&repo, &id, OutputFormat::Json).await.unwrap();

        // reopening sees what the first handle wrote
        let reopened = temp_repo(dir.path()).await;
        assert_eq!(reopened.load(&builds[0].id).await.unwrap(), builds[0]);

        cmd_delete(&repo, &id).await.unwrap();
        assert!(repo.is_empty().await);
        cmd_delete(&repo, &id).await.unwrap();
        assert!(cmd_show(&repo, &id, OutputFormat::Text).await.is_err());
    }

    #[tokio::test]
    async fn test_render_saved_build_text() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repo(dir.path()).await;
        let session = session_from_picks(&catalog(), &picks(&["cpu=cpu-7600"])).unwrap();
        let saved = repo.save("  ", session.config()).await.unwrap();

        let text = render_saved_build_text(&saved);
        assert!(text.starts_with("Untitled build ("));
        assert!(text.contains("Ryzen 5 7600"));
        assert!(text.contains("Total: 3,200,000"));
    }
}
