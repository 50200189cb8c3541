//! `sqlbalance`: inspect and dry-run a database cluster configuration.
//!
//! ```text
//! sqlbalance check    --config cluster.toml
//! sqlbalance classify "select * from t"
//! sqlbalance route    --config cluster.toml --sql "update t set x = 1"
//! sqlbalance route    --config cluster.toml --mode read --count 1000
//! ```
//!
//! Routing goes through [`DsnConnector`], so no connection is ever made.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use sqlbalance::classify::{PrefixClassifier, SqlClassifier};
use sqlbalance::config::load_config;
use sqlbalance::observability::logging::init_logging;
use sqlbalance::{Cluster, Context, Dsn, DsnConnector, Mode};

#[derive(Parser)]
#[command(name = "sqlbalance")]
#[command(about = "Inspect and dry-run database load balancing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration and list its nodes
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the mode derived from a query
    Classify { sql: String },
    /// Run acquisitions against a configuration and count node selections
    Route {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(short, long)]
        sql: Option<String>,
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Read,
    Write,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Read => Mode::Read,
            ModeArg::Write => Mode::Write,
        }
    }
}

#[derive(Serialize)]
struct Selection {
    node: Dsn,
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load_config(&config)?;
            init_logging(&config.observability.log_level);

            let cluster = Cluster::from_config(&config, DsnConnector::new())?;
            let nodes: Vec<_> = cluster
                .nodes()
                .iter()
                .map(|node| {
                    json!({
                        "url": node.url(),
                        "driver": node.driver(),
                        "mode": node.mode(),
                        "pattern": node.pattern().map(|re| re.as_str()),
                        "values": node.values(),
                    })
                })
                .collect();
            let report = json!({
                "strategy": cluster.strategy_name(),
                "max_idle_connections": cluster.settings().max_idle_connections(),
                "nodes": nodes,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Classify { sql } => {
            init_logging("info");
            println!("{}", PrefixClassifier::new().classify(&sql));
        }
        Commands::Route { config, mode, sql, count } => {
            let config = load_config(&config)?;
            init_logging(&config.observability.log_level);

            let cluster = Cluster::from_config(&config, DsnConnector::new())?;
            let mut ctx = Context::with_mode(mode.map(Mode::from).unwrap_or_default());
            ctx.sql = sql;

            let mut counts: HashMap<Dsn, usize> = HashMap::new();
            for _ in 0..count {
                let handle = cluster.acquire(&mut ctx)?;
                *counts.entry((*handle).clone()).or_insert(0) += 1;
            }

            let mut selections: Vec<_> = counts.into_iter().map(|(node, count)| Selection { node, count }).collect();
            selections.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.node.host.cmp(&b.node.host)));
            let report = json!({
                "strategy": cluster.strategy_name(),
                "mode": ctx.mode,
                "selections": selections,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
