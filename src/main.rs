use clap::Parser;

use election_explorer::command::{self, CommandArgs};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CommandArgs::parse();
    command::run(&args)
}
