use clap::Args;
use cipherforge::engine::rng;
use cipherforge::error::DfResult;
use cipherforge::text::{self, Language};

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[arg(short, long, default_value_t = Language::English)]
    pub language: Language,

    /// Plaintext given inline
    #[arg(short, long)]
    pub text: Option<String>,

    /// Plaintext file (stdin when neither --text nor --input is given)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Ciphertext symbols to draw from
    #[arg(long, default_value = text::DEFAULT_SYMBOL_POOL)]
    pub pool: String,

    /// Keep the text as-is instead of normalizing it to the language's letters
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: EncryptArgs) -> DfResult<()> {
    let input = super::read_input(&args.text, &args.input)?;
    let plain = if args.raw {
        input
    } else {
        text::clean(&input, args.language).trim().to_string()
    };

    let pool: Vec<char> = args.pool.chars().collect();
    let mut rng = rng::seeded(args.seed);
    println!("{}", text::encrypt(&plain, &pool, &mut rng)?);
    Ok(())
}
