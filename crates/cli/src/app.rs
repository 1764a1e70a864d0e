//! Orchestration of a single kagi invocation.
//!
//! Resolve the query, ask FastGPT, print the formatted answer, then write a
//! cache entry when a cache directory is configured. A failed cache write is
//! logged and otherwise ignored: the answer has already been printed.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use kagi_client::{Answerer, FastGptClient, FastGptConfig, FastGptRequest};
use kagi_core::{AppConfig, CacheWriter, Error, Query, format_answer, resolve_query};

use crate::args::Cli;

/// Run the CLI against the real API, reading the query from args or stdin.
pub async fn invoke(cli: &Cli) -> Result<(), Error> {
    let config = AppConfig::load(&cli.overrides())?;
    let api_key = config.require_api_key()?.to_string();

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let query = resolve_query(&cli.query, stdin.lock(), interactive, &mut std::io::stderr())?;

    let client = FastGptClient::new(FastGptConfig {
        api_key,
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
    })
    .map_err(|e| Error::Remote(e.to_string()))?;

    run(&config, &query, &client, &mut std::io::stdout()).await?;

    Ok(())
}

/// Answer `query` through `answerer` and print the result to `out`.
///
/// Returns the path of the cache entry, if one was written.
pub async fn run<A, W>(config: &AppConfig, query: &Query, answerer: &A, out: &mut W) -> Result<Option<PathBuf>, Error>
where
    A: Answerer + ?Sized,
    W: Write,
{
    let req = FastGptRequest::from_query(query);
    tracing::info!("Request: {:?}", req);

    let answer = answerer.answer(&req).await.map_err(|e| Error::Remote(e.to_string()))?;
    let response = format_answer(&answer, query.as_str());

    out.write_all(response.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| Error::Output(e.to_string()))?;

    let Some(dir) = config.cache_dir() else {
        return Ok(None);
    };

    match CacheWriter::new(dir).write(query.as_str(), &response) {
        Ok(path) => Ok(Some(path)),
        Err(e) => {
            tracing::warn!("failed to cache answer: {}", e);
            Ok(None)
        }
    }
}
