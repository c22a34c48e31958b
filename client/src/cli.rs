use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Othello Self Learning Client")]
#[clap(about = "Trains an Othello model through self play", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Learn(LearnCommand),
}

#[derive(Args)]
pub struct LearnCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}
