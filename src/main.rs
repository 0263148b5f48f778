use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a bigram language model from a text corpus
    Train(cmd::train::TrainArgs),
    /// Normalize a text and apply a random substitution cipher
    Encrypt(cmd::encrypt::EncryptArgs),
    /// Recover the plaintext of a substitution ciphertext
    Decipher(cmd::decipher::DecipherArgs),
    /// Answer a JSON decrypt request using the models in a directory
    Request(cmd::request::RequestArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing CipherForge...");

    let result = match cli.command {
        Commands::Train(args) => cmd::train::run(args),
        Commands::Encrypt(args) => cmd::encrypt::run(args),
        Commands::Decipher(args) => cmd::decipher::run(args),
        Commands::Request(args) => cmd::request::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
