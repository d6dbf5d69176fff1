//! `pertes` command-line shell

mod cli;
mod commands;
mod logging;
mod render;

use anyhow::{Context, Result};
use cli::{Args, Invocation};
use pertes_catalog::{Catalog, CatalogConfig, CatalogError, Notice, Session};
use pertes_offline::{AssetManifest, CacheStorage, CachedSeed, DirFetcher, OfflineCache};
use pertes_store::{CatalogStore, FileSlot};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = cli::parse(&cli::command().get_matches());

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // catalog errors were already shown as a notice
            if e.downcast_ref::<CatalogError>().is_none() {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = CatalogConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }

    let mut store = CatalogStore::new(FileSlot::new(&config.data_dir, config.slot_name.as_str()));

    let action = match args.invocation {
        Invocation::Reset => {
            store.clear()?;
            tracing::info!(dir = %config.data_dir.display(), "stored catalog removed");
            return Ok(());
        }
        Invocation::Session(action) => action,
    };

    let manifest = AssetManifest::new(config.cache_generation.as_str())
        .with_assets([config.seed_path.as_str()]);
    let cache = Arc::new(OfflineCache::new(
        DirFetcher::new(&config.asset_root),
        manifest,
        CacheStorage::new(),
    ));
    let seed = CachedSeed::new(cache, config.seed_path.as_str());

    let catalog = match Catalog::open(store, &seed).await {
        Ok(catalog) => catalog.with_policy(config.persist_policy),
        Err(e) => {
            let err = CatalogError::from(e);
            tracing::error!(error = %err, "catalog unavailable");
            eprintln!("{}", Notice::from(&err).message());
            return Err(err.into());
        }
    };
    let mut session = Session::with_config(catalog, &config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(&mut session, action, &mut out, &mut confirm);
    out.flush()?;

    if let Some(notice) = session.take_notice() {
        eprintln!("{}", notice.message());
    }
    if session.catalog().is_dirty() {
        tracing::warn!("changes kept in memory only; storage rejected the write");
    }
    result
}

/// Ask on stderr before deleting `name`
fn confirm(name: &str) -> bool {
    eprint!("Supprimer « {name} » ? [o/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}
