use std::io::Read;

use clap::Args;
use tracing::debug;

use super::models::ModelArgs;

#[derive(Args)]
pub struct CompareCommand {
    /// Text to tokenize; read from stdin when omitted
    pub text: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub models: ModelArgs,
}

impl CompareCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let text = match &self.text {
            Some(text) => text.clone(),
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                input
            }
        };

        let service = self.models.build_comparison()?;

        let rt = tokio::runtime::Runtime::new()?;
        let results = rt.block_on(service.compare(&text))?;
        debug!("Compared {} methods", results.len());

        let output = if self.pretty {
            serde_json::to_string_pretty(&results)?
        } else {
            serde_json::to_string(&results)?
        };
        println!("{}", output);

        Ok(())
    }
}
