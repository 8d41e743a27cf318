use crate::errors::AppError;
use crate::ledger::Ledger;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Reads the ledger from the data file. A missing file is a fresh start; an
/// unreadable or malformed one is logged and also treated as empty.
pub async fn load_ledger(path: &Path) -> Ledger {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Ledger>(&bytes) {
            Ok(mut ledger) => {
                let dropped = ledger.dedup_ids();
                if dropped > 0 {
                    warn!("dropped {dropped} records with repeated ids from data file");
                }
                info!("loaded {} transactions from {}", ledger.len(), path.display());
                ledger
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                Ledger::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ledger::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Ledger::default()
        }
    }
}

pub async fn persist_ledger(path: &Path, ledger: &Ledger) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(ledger)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Writes the ledger, logging instead of failing. The in-memory ledger stays
/// authoritative; the next successful write catches the file up.
pub async fn persist_or_log(path: &Path, ledger: &Ledger) {
    if let Err(err) = persist_ledger(path, ledger).await {
        error!("failed to persist ledger to {}: {err}", path.display());
    }
}
