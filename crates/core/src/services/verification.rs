use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Result of one account verification request.
#[derive(Debug)]
pub struct VerificationOutcome {
    pub generation: u64,
    pub account_number: String,
    pub bank_code: String,
    pub result: Result<String, ApiError>,
}

struct PendingVerification {
    generation: u64,
    account_number: String,
    bank_code: String,
    task: JoinHandle<()>,
}

/// Runs account-name lookups in the background, last request wins.
///
/// Every request gets a fresh generation. Issuing a new request aborts the
/// one in flight, and outcomes from older generations are dropped when they
/// are received.
pub struct AccountVerifier {
    session: AdminSession,
    generation: u64,
    pending: Option<PendingVerification>,
    outcomes_tx: mpsc::UnboundedSender<VerificationOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<VerificationOutcome>,
}

impl AccountVerifier {
    pub fn new(session: AdminSession) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            session,
            generation: 0,
            pending: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Starts verifying `account_number` at `bank_code`. Returns the new
    /// generation, or `None` if the same pair is already being verified.
    pub fn request(&mut self, account_number: &str, bank_code: &str) -> Option<u64> {
        if let Some(pending) = &self.pending {
            if pending.account_number == account_number && pending.bank_code == bank_code {
                debug!(generation = pending.generation, "Verification already in flight");
                return None;
            }
        }

        self.cancel();
        let generation = self.generation;

        let session = self.session.clone();
        let outcomes = self.outcomes_tx.clone();
        let number = account_number.to_owned();
        let bank = bank_code.to_owned();

        info!(generation, bank_code = %bank, "Verifying destination account");

        let task = tokio::spawn(async move {
            let result = session.verify_account(&number, &bank).await;
            if let Err(e) = &result {
                warn!(generation, error = %e, "Account verification failed");
            }
            // The receiver lives as long as the verifier; a send error only
            // means it has been dropped.
            let _ = outcomes.send(VerificationOutcome {
                generation,
                account_number: number,
                bank_code: bank,
                result,
            });
        });

        self.pending = Some(PendingVerification {
            generation,
            account_number: account_number.to_owned(),
            bank_code: bank_code.to_owned(),
            task,
        });

        Some(generation)
    }

    /// Abandons the request in flight, if any. Anything it already reported
    /// becomes stale.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(generation = pending.generation, "Cancelling account verification");
            pending.task.abort();
        }
        self.generation += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, outcome: &VerificationOutcome) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.generation == outcome.generation)
    }

    /// Waits for the outcome of the latest request, skipping stale ones.
    /// Returns `None` straight away when nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<VerificationOutcome> {
        while self.pending.is_some() {
            let outcome = self.outcomes_rx.recv().await?;

            if self.is_current(&outcome) {
                self.pending = None;
                return Some(outcome);
            }

            debug!(
                generation = outcome.generation,
                latest = self.generation,
                "Discarding stale account verification"
            );
        }
        None
    }
}

impl Drop for AccountVerifier {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}
