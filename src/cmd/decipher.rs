use crate::reports;
use clap::Args;
use cipherforge::config::Config;
use cipherforge::engine::runner::run_restarts;
use cipherforge::error::DfResult;
use cipherforge::model::LanguageModel;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DecipherArgs {
    #[command(flatten)]
    pub config: Config,

    /// Language model file produced by `train`
    #[arg(short, long, default_value = "models/en.json")]
    pub model: String,

    /// Ciphertext given inline
    #[arg(short, long)]
    pub text: Option<String>,

    /// Ciphertext file (stdin when neither --text nor --input is given)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Write the winning chain's step history as CSV
    #[arg(long)]
    pub history_csv: Option<String>,

    /// Print the recovered substitution key
    #[arg(long, default_value_t = false)]
    pub show_key: bool,
}

pub fn run(args: DecipherArgs) -> DfResult<()> {
    let model = Arc::new(LanguageModel::load_from_file(&args.model)?);
    let raw = super::read_input(&args.text, &args.input)?;
    let ciphertext = raw.trim_end_matches(['\n', '\r']);

    let outcome = run_restarts(model, ciphertext, &args.config)?;

    if let Some(path) = &args.history_csv {
        outcome.decryptor.history()?.save_csv(path)?;
        info!("📈 History written to {}", path);
    }

    reports::print_run_report(&outcome)?;
    if args.show_key {
        reports::print_key_table(&outcome.decryptor.best_key()?);
    }

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Score: {:.3}", outcome.summary.best_score);
    println!("{}", outcome.decryptor.final_text()?);
    Ok(())
}
