use clap::Args;
use cipherforge::api::{handle_request, DecryptRequest, ModelRegistry};
use cipherforge::config::Config;
use cipherforge::error::DfResult;

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    #[command(flatten)]
    pub config: Config,

    /// Directory holding one `<language>.json` model per supported language
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Request JSON file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,
}

pub fn run(args: RequestArgs) -> DfResult<()> {
    let registry = ModelRegistry::load_dir(&args.models_dir)?;
    let body = super::read_input(&None, &args.input)?;
    let request: DecryptRequest = serde_json::from_str(&body)?;

    let response = handle_request(&registry, &request, &args.config)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
