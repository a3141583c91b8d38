//! CLI runner - executes commands

use crate::auth::Authenticator;
use crate::cli::commands::{Cli, Commands};
use crate::config::{search_query, Credentials};
use crate::error::{Error, Result};
use crate::http::{PageSource, SearchClient, SearchClientConfig};
use crate::output::{JsonLinesSink, PersistSummary};
use crate::pagination::PaginationEngine;
use std::path::Path;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Download {
                account,
                output_dir,
                api_url,
                page_size,
                print,
            } => {
                let credentials = Credentials::from_env()?;
                Self::download(
                    credentials,
                    account,
                    output_dir,
                    api_url,
                    *page_size,
                    *print,
                )
                .await
                .map(|_| ())
            }
        }
    }

    /// Download every mention of `account` and persist it
    pub async fn download(
        credentials: Credentials,
        account: &str,
        output_dir: &Path,
        api_url: &str,
        page_size: u32,
        print: bool,
    ) -> Result<PersistSummary> {
        let account = account.trim().trim_start_matches('@');
        if account.is_empty() {
            return Err(Error::config("Account name must not be empty"));
        }

        let config = SearchClientConfig::builder()
            .base_url(api_url)
            .page_size(Some(page_size))
            .build();
        let client = SearchClient::with_auth(config, Authenticator::new(credentials))?;

        let mut engine = PaginationEngine::new(client);
        let sink = JsonLinesSink::new(output_dir).with_echo(print);

        export(&mut engine, &sink, account).await.inspect_err(|e| {
            error!("Could not download all records of account {account}: {e}");
        })
    }
}

/// Download everything mentioning `account` and hand it to `sink`
///
/// Nothing is written unless the download completes.
pub async fn export<S: PageSource>(
    engine: &mut PaginationEngine<S>,
    sink: &JsonLinesSink,
    account: &str,
) -> Result<PersistSummary> {
    let query = search_query(account);
    info!("Downloading records for {query}");

    let records = engine.download_all(&query).await?;
    info!("Found {} records", records.len());

    sink.persist(account, &records)
}
