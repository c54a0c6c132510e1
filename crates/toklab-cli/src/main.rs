//! Toklab CLI - Single entrypoint for the tokenizer comparison service
//!
//! `serve` runs the HTTP API and UI, `compare` tokenizes one text from the
//! command line and prints the results as JSON.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CompareCommand, ServeCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "TOKLAB_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "TOKLAB_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeCommand),
    /// Tokenize a text with every method and print the results
    Compare(CompareCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.clone();

    // If RUST_LOG is set, use it directly; otherwise use our default filter
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG environment variable: {}", e))?
    } else {
        // All toklab crates at the specified level, noisy dependencies at warn
        tracing_subscriber::EnvFilter::new(format!(
            "toklab={level},\
             toklab_api={level},\
             toklab_core={level},\
             toklab_ratelimit={level},\
             toklab_tokenizers={level},\
             tower_http={level},\
             hf_hub=warn,\
             tokenizers=warn,\
             h2=warn,\
             tower=warn,\
             hyper=warn,\
             ureq=warn,\
             rustls=warn",
            level = log_level
        ))
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {}", e))?;

    match cli.command {
        Commands::Serve(serve_cmd) => serve_cmd.execute(),
        Commands::Compare(compare_cmd) => compare_cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use toklab_ratelimit::ClientIdentity;
    use toklab_tokenizers::ModelSource;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["toklab", "serve"]).unwrap();
        assert_eq!(cli.log_level, "info");

        let Commands::Serve(serve) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(serve.address, "0.0.0.0:8000");
        assert_eq!(serve.rate_limit, 5);
        assert_eq!(serve.rate_window_secs, 60);
        assert_eq!(serve.client_identity, ClientIdentity::Peer);
        assert_eq!(serve.static_dir, PathBuf::from("static"));
        assert_eq!(
            serve.models.bert_source(),
            ModelSource::Hub("dccuchile/bert-base-spanish-wwm-uncased".to_string())
        );
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "toklab",
            "serve",
            "--rate-limit",
            "10",
            "--client-identity",
            "forwarded",
            "--bert-vocab",
            "/tmp/vocab.txt",
        ])
        .unwrap();

        let Commands::Serve(serve) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(serve.rate_limit, 10);
        assert_eq!(serve.client_identity, ClientIdentity::Forwarded);
        assert_eq!(
            serve.models.bert_source(),
            ModelSource::VocabFile(PathBuf::from("/tmp/vocab.txt"))
        );
    }

    #[test]
    fn test_invalid_client_identity_is_rejected() {
        assert!(Cli::try_parse_from(["toklab", "serve", "--client-identity", "proxy"]).is_err());
    }

    #[test]
    fn test_compare_takes_text() {
        let cli = Cli::try_parse_from(["toklab", "compare", "Hola, mundo!", "--pretty"]).unwrap();
        let Commands::Compare(compare) = cli.command else {
            panic!("expected compare command");
        };
        assert_eq!(compare.text.as_deref(), Some("Hola, mundo!"));
        assert!(compare.pretty);
    }
}
