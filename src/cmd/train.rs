use clap::Args;
use cipherforge::error::DfResult;
use cipherforge::model::trainer;
use cipherforge::text::Language;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Plain text corpus, one or more lines
    #[arg(short, long)]
    pub corpus: String,

    #[arg(short, long, default_value_t = Language::English)]
    pub language: Language,

    /// Output model file (JSON)
    #[arg(short, long)]
    pub out: String,
}

pub fn run(args: TrainArgs) -> DfResult<()> {
    let model = trainer::train_from_file(&args.corpus, args.language)?;
    info!(
        "🔤 Alphabet ({} symbols): {:?}",
        model.len(),
        model.alphabet().iter().collect::<String>()
    );
    model.save_to_file(&args.out)
}
