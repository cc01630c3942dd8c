use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use css_promptify::config::{discover_config, load_from_path};
use css_promptify::engine::{
    apply_fixes, strip_comments, AnalysisResult, Analyzer, StatsComparison,
};
use css_promptify::{Issue, SessionConfig, Severity};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "css-promptify")]
#[command(about = "Rule-driven CSS review with safe, conflict-checked fixes", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report issues in one or more stylesheets
    Analyze {
        /// Files or directories (directories are searched for *.css)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Session config file (defaults to the nearest .css-promptify.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Apply safe fixes to a stylesheet
    Fix {
        file: PathBuf,

        /// Only apply fixes produced by these rules
        #[arg(short, long = "rule")]
        rules: Vec<String>,

        /// Only apply these fix ids (as shown by `analyze`)
        #[arg(long = "fix")]
        fixes: Vec<String>,

        /// Annotate every changed line with a review comment
        #[arg(long)]
        comments: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,

        /// Write the result back to the file (otherwise nothing is modified)
        #[arg(short, long)]
        write: bool,

        /// Session config file (defaults to the nearest .css-promptify.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List every registered rule
    Rules {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Remove previously injected review comments
    Strip {
        file: PathBuf,

        /// Write the result back to the file instead of printing it
        #[arg(short, long)]
        write: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            paths,
            config,
            format,
        } => cmd_analyze(&paths, config, format),

        Commands::Fix {
            file,
            rules,
            fixes,
            comments,
            diff,
            write,
            config,
        } => cmd_fix(&file, &rules, &fixes, comments, diff, write, config),

        Commands::Rules { format } => cmd_rules(format),

        Commands::Strip { file, write } => cmd_strip(&file, write),
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the default `warn` level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Helper: Expand files and directories into a sorted list of stylesheets.
fn discover_css_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            anyhow::bail!("No such file or directory: {}", path.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|s| s.to_str()) == Some("css")
            {
                found.push(entry.path().to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }

    if files.is_empty() {
        anyhow::bail!("No .css files found");
    }

    Ok(files)
}

/// Helper: The explicit config, or the one nearest to `near`.
fn config_path(explicit: Option<&Path>, near: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }
    let start = match near.parent() {
        _ if near.is_dir() => near.to_path_buf(),
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => env::current_dir()?,
    };
    Ok(discover_config(&start))
}

fn load_config(analyzer: &Analyzer, path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    log::debug!("using config {}", path.display());
    Ok(load_from_path(path, analyzer.registry())?)
}

/// Helper: Load the explicit config or the nearest discovered one.
fn resolve_config(
    analyzer: &Analyzer,
    explicit: Option<PathBuf>,
    near: &Path,
) -> Result<SessionConfig> {
    let path = config_path(explicit.as_deref(), near)?;
    load_config(analyzer, path.as_deref())
}

/// Helper: Write file contents atomically (tempfile + fsync + rename).
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => env::current_dir()?,
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

fn display_diff(file: &Path, original: &str, modified: &str) {
    println!("\n{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (fixed)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
    if !modified.ends_with('\n') {
        println!();
    }
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".cyan(),
    }
}

fn print_issue(file: &Path, issue: &Issue) {
    println!(
        "{}:{}: {} {} {}",
        file.display(),
        issue.location.start,
        severity_label(issue.severity),
        issue.message,
        format!("[{}]", issue.rule_id).dimmed()
    );
    if let Some(fix) = issue.fix() {
        println!("  {} {}", "fix:".green(), fix.id);
    } else if let Some(prompt) = issue.llm_prompt() {
        println!("  {} {}", "prompt:".cyan(), prompt.title);
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

fn cmd_analyze(paths: &[PathBuf], config: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let files = discover_css_files(paths)?;
    let analyzer = Analyzer::new();

    // each file gets the config nearest to it unless one was given
    let mut loaded: HashMap<Option<PathBuf>, SessionConfig> = HashMap::new();
    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        let session = match loaded.entry(config_path(config.as_deref(), file)?) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let session = load_config(&analyzer, entry.key().as_deref())?;
                entry.insert(session)
            }
        };
        let source = fs::read_to_string(file)?;
        analyzer.reset_ids();
        results.push((file, analyzer.analyze(&source, session)));
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;
    let mut total_info = 0;
    let mut total_fixable = 0;
    for (_, result) in &results {
        for issue in &result.issues {
            match issue.severity {
                Severity::Error => total_errors += 1,
                Severity::Warning => total_warnings += 1,
                Severity::Info => total_info += 1,
            }
            if issue.fix().is_some() {
                total_fixable += 1;
            }
        }
    }

    match format {
        OutputFormat::Json => {
            let reports: Vec<FileReport<'_>> = results
                .iter()
                .map(|(file, result)| FileReport {
                    file: file.as_path(),
                    result,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for (file, result) in &results {
                if result.issues.is_empty() {
                    println!("{} {}: no issues", "✓".green(), file.display());
                    continue;
                }
                if !result.parse_ok {
                    println!("{} {}: parse errors", "✗".red(), file.display());
                }
                for issue in &result.issues {
                    print_issue(file, issue);
                }
                println!();
            }

            println!("{}", "Summary:".bold());
            println!("  {} files", files.len());
            println!("  {} errors", format!("{}", total_errors).red());
            println!("  {} warnings", format!("{}", total_warnings).yellow());
            println!("  {} info", format!("{}", total_info).cyan());
            println!("  {} safely fixable", format!("{}", total_fixable).green());
        }
    }

    if total_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Fix ids to try, in issue order.
fn select_fixes(result: &AnalysisResult, rules: &[String], fixes: &[String]) -> Vec<String> {
    result
        .issues
        .iter()
        .filter(|issue| rules.is_empty() || rules.iter().any(|r| r == &issue.rule_id))
        .filter_map(|issue| issue.fix())
        .filter(|fix| fixes.is_empty() || fixes.contains(&fix.id))
        .map(|fix| fix.id.clone())
        .collect()
}

fn cmd_fix(
    file: &Path,
    rules: &[String],
    fixes: &[String],
    comments: bool,
    show_diff: bool,
    write: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let analyzer = Analyzer::new();
    let config = resolve_config(&analyzer, config, file)?;

    for rule in rules {
        if analyzer.registry().get(rule).is_none() {
            anyhow::bail!("Unknown rule: {}", rule);
        }
    }

    let original = fs::read_to_string(file)?;
    let analysis = analyzer.analyze(&original, &config);

    let mut selected = select_fixes(&analysis, rules, fixes);
    for wanted in fixes {
        if !selected.contains(wanted) {
            eprintln!("{} {}: no such fix in {}", "⊘".cyan(), wanted, file.display());
        }
    }

    // An explicit selection is all-or-nothing. Otherwise the later fix of
    // each conflicting pair is deferred to a follow-up run.
    let mut deferred = Vec::new();
    let result = loop {
        let result = apply_fixes(&original, &analysis.issues, &selected, comments);
        if result.conflicts.is_empty() || !fixes.is_empty() {
            break result;
        }
        let losers: BTreeSet<&str> = result.conflicts.iter().map(|c| c.fix_b.as_str()).collect();
        deferred.extend(losers.iter().map(|id| id.to_string()));
        selected.retain(|id| !losers.contains(id.as_str()));
    };

    println!("File: {}", file.display());
    println!();

    for applied in &result.applied_fixes {
        println!(
            "{} {}: {} patch(es) {}",
            "✓".green(),
            applied.fix_id,
            applied.patches.len(),
            format!("[{}]", applied.rule_id).dimmed()
        );
    }
    for id in &deferred {
        println!("{} {}: Deferred (overlaps another fix, run again)", "⊙".yellow(), id);
    }
    for conflict in &result.conflicts {
        eprintln!("{} {}", "✗".red(), conflict.message);
        eprintln!("  Overlap: {}", conflict.overlapping_range);
    }

    if show_diff && result.css != original {
        display_diff(file, &original, &result.css);
    }

    let stats = StatsComparison::new(&original, &result.css);
    println!();
    println!("{}", "Summary:".bold());
    println!("  {} applied", format!("{}", result.applied_fixes.len()).green());
    println!("  {} deferred", format!("{}", deferred.len()).yellow());
    println!("  {} conflicts", format!("{}", result.conflicts.len()).red());
    println!(
        "  characters: {} -> {} ({:+})",
        stats.before.characters,
        stats.after.characters,
        stats.character_delta()
    );
    println!(
        "  tokens: {} -> {} ({:+})",
        stats.before.tokens,
        stats.after.tokens,
        stats.token_delta()
    );

    if !result.conflicts.is_empty() {
        std::process::exit(1);
    }

    if result.css == original {
        return Ok(());
    }

    if write {
        atomic_write(file, &result.css)?;
        println!("{} Wrote {}", "✓".green(), file.display());
    } else {
        println!("{}", "  [DRY RUN - pass --write to save changes]".cyan());
    }

    Ok(())
}

fn cmd_rules(format: OutputFormat) -> Result<()> {
    let analyzer = Analyzer::new();
    let registry = analyzer.registry();

    if format == OutputFormat::Json {
        let metas: Vec<_> = registry.iter().map(|rule| rule.meta()).collect();
        println!("{}", serde_json::to_string_pretty(&metas)?);
        return Ok(());
    }

    println!("{}", "Available rules:".bold());
    println!();

    for rule in registry.iter() {
        let meta = rule.meta();
        let marker = if meta.enabled_by_default {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("{} {}", marker, meta.rule_id.bold());
        println!(
            "  {} / {} / {}",
            meta.group,
            severity_label(meta.severity),
            meta.fixability
        );
        println!("  Applies to: {}", meta.applies_to);
    }

    println!();
    let off = registry
        .iter()
        .filter(|rule| !rule.meta().enabled_by_default)
        .count();
    println!("{} rules ({} off by default)", registry.len(), off);

    Ok(())
}

fn cmd_strip(file: &Path, write: bool) -> Result<()> {
    let original = fs::read_to_string(file)?;
    let stripped = strip_comments(&original);

    if !write {
        print!("{}", stripped);
        return Ok(());
    }

    if stripped == original {
        println!("{} {}: No review comments", "⊙".yellow(), file.display());
        return Ok(());
    }

    atomic_write(file, &stripped)?;
    println!("{} {}: Removed review comments", "✓".green(), file.display());

    Ok(())
}
