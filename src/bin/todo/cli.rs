use clap::{Parser, Subcommand};

/// Todo list kept in ./todo_data.csv
#[derive(Parser, Debug)]
#[command(
    name = "todo",
    version,
    about = "Todo list kept in ./todo_data.csv",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print all todos as a table
    List,
    /// Add a todo
    ///
    /// Пример:
    ///   todo add "buy milk"
    Add {
        /// Text of the todo (quote it if it has spaces)
        description: String,
    },
    /// Mark a todo as completed (no-op if it already is)
    Check {
        /// Id printed by `todo add` / `todo list`
        id: u64,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}
