use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use filtercheck_config::{RuleStore, parse_config_file, parse_tests_file};
use filtercheck_eval::Engine;

mod report;

#[derive(Parser)]
#[command(name = "filtercheck")]
#[command(about = "Validate Sysmon filter configurations against synthetic test events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a test document against one or more configurations
    ///
    /// Several configuration files merge into a single rule store
    /// before classification. The report lists, per match type and
    /// event type, every test value the configuration would include,
    /// exclude, or leave unmatched.
    Run {
        /// Path to a configuration XML file (repeatable)
        #[arg(short, long, required = true)]
        config: Vec<PathBuf>,

        /// Path to the test document
        #[arg(short, long)]
        tests: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the report as JSON instead of XML
        #[arg(long)]
        json: bool,
    },

    /// Parse configuration files and print summary counts
    Validate {
        /// Configuration XML file(s)
        #[arg(required = true)]
        config: Vec<PathBuf>,
    },

    /// Parse a configuration file and print the rule store as JSON
    Parse {
        /// Path to a configuration XML file
        path: PathBuf,

        /// Pretty-print JSON output
        #[arg(short, long, default_value_t = true)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            tests,
            output,
            json,
        } => cmd_run(config, tests, output, json),
        Commands::Validate { config } => cmd_validate(config),
        Commands::Parse { path, pretty } => cmd_parse(path, pretty),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_run(config_paths: Vec<PathBuf>, tests_path: PathBuf, output: Option<PathBuf>, json: bool) {
    let store = load_configs(&config_paths);

    let tests = match parse_tests_file(&tests_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error parsing tests {}: {e}", tests_path.display());
            process::exit(1);
        }
    };

    let engine = match Engine::from_store(&store) {
        Ok(en) => en,
        Err(e) => {
            eprintln!("Error compiling rules: {e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Classifying {} test cases against {} rules ({} event types)",
        tests.case_count(),
        engine.rule_count(),
        engine.event_type_count()
    );

    let result = engine.run(&tests);

    let rendered = if json {
        match serde_json::to_string_pretty(&result) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("JSON serialization error: {e}");
                process::exit(1);
            }
        }
    } else {
        report::render_xml(&result)
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, rendered) {
                eprintln!("Error writing {}: {e}", path.display());
                process::exit(1);
            }
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
}

fn cmd_validate(config_paths: Vec<PathBuf>) {
    let store = load_configs(&config_paths);

    println!("Parsed {} configuration file(s)", config_paths.len());
    println!("  Event types:  {}", store.event_type_count());
    println!("  Rule groups:  {}", store.group_count());
    println!("  Rules:        {}", store.rule_count());
    println!("  Conditions:   {}", store.condition_count());
}

fn cmd_parse(path: PathBuf, pretty: bool) {
    match parse_config_file(&path) {
        Ok(store) => print_json(&store, pretty),
        Err(e) => {
            eprintln!("Error parsing {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_configs(paths: &[PathBuf]) -> RuleStore {
    let mut store = RuleStore::new();
    for path in paths {
        match parse_config_file(path) {
            Ok(parsed) => store.merge(parsed),
            Err(e) => {
                eprintln!("Error parsing {}: {e}", path.display());
                process::exit(1);
            }
        }
    }
    store
}

fn print_json(value: &impl serde::Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(j) => println!("{j}"),
        Err(e) => {
            eprintln!("JSON serialization error: {e}");
            process::exit(1);
        }
    }
}
