use clap::Parser;
use std::path::{Path, PathBuf};
use vellum_core::NamespaceConfig;

const OPERATIONS_HELP: &str = "\
Operations:
  --put <KEY> <VALUE>  Store a key-value pair
  --get <KEY>          Print the value stored under a key
  --del <KEY>          Delete a key
  --info               Print transaction and database size limits";

#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "vellum [OPTIONS] <DB_PATH> <OPERATION> [ARGS]...")]
#[command(after_help = OPERATIONS_HELP)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum size of the memory map in bytes
    #[arg(long, value_name = "BYTES")]
    pub map_size: Option<usize>,

    /// Path to the database file
    pub db_path: Option<PathBuf>,

    /// Operation followed by its arguments
    #[arg(
        value_name = "OPERATION",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub operation: Vec<String>,
}

impl Cli {
    /// Namespace configuration for the given database path
    pub fn namespace_config(&self, db_path: &Path) -> NamespaceConfig {
        let config = NamespaceConfig::new(db_path);
        match self.map_size {
            Some(map_size) => config.with_map_size(map_size),
            None => config,
        }
    }
}
