use anyhow::Result;
use env_logger::{Builder, Env};

use todofile::{FileStore, StoreConfig};

mod cli;
mod util;
mod cmd_list;
mod cmd_add;
mod cmd_check;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе warn: обычный вывод CLI не засоряется.
    // Пример: RUST_LOG=debug todo list
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let store = FileStore::new(StoreConfig::default());
    match cli.cmd {
        cli::Cmd::List => cmd_list::exec(&store),

        cli::Cmd::Add { description } => cmd_add::exec(&store, description),

        cli::Cmd::Check { id } => cmd_check::exec(&store, id),
    }
}
