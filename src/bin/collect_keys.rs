use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_robots::CLIArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CLIArgs::parse();
    let mut vault_map = match &args.input_path {
        Some(path) => vault_robots::read_vault_map(path)?,
        None => vault_robots::read_vault_map_from_stdin()?,
    };
    if args.split_entrance {
        vault_map
            .split_entrance()
            .context("Failed to split the entrance of given map.")?;
    }

    let min_steps_n = vault_robots::min_collect_steps_in_map(&vault_map, args.robots)
        .with_context(|| format!("Failed to search given map with {} robot(s).", args.robots))?;
    match min_steps_n {
        Some(steps_n) => println!("{}", steps_n),
        None => println!("No solution found"),
    }

    Ok(())
}
