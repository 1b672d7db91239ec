use crate::services::refund_error::RefundError;
use crate::services::refund_list::RefundList;
use crate::services::verification::{AccountVerifier, VerificationOutcome};
use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::dtos::{RefundDraft, RefundHandle, TransferDraft};
use hostadmin_primitives::models::entities::RefundPage;
use hostadmin_primitives::models::RefundListInfo;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use validator::Validate;

/// Where the workflow currently is.
#[derive(Debug, Default)]
pub enum RefundStep {
    #[default]
    Idle,
    Initiating(RefundDraft),
    Transferring {
        handle: RefundHandle,
        draft: TransferDraft,
    },
}

/// Drives a refund from draft to completed transfer.
///
/// Phase one collects a [`RefundDraft`], verifies the destination account in
/// the background and submits it for a refund reference. Phase two takes the
/// resulting [`RefundHandle`] and an admin password and executes the
/// transfer. State only lives as long as this value.
pub struct RefundWorkflow {
    session: AdminSession,
    verifier: AccountVerifier,
    refunds: RefundList,
    step: RefundStep,
}

impl RefundWorkflow {
    pub fn new(session: AdminSession, refund_list: RefundListInfo) -> Self {
        Self {
            verifier: AccountVerifier::new(session.clone()),
            refunds: RefundList::new(refund_list),
            session,
            step: RefundStep::Idle,
        }
    }

    pub fn step(&self) -> &RefundStep {
        &self.step
    }

    pub fn draft(&self) -> Option<&RefundDraft> {
        match &self.step {
            RefundStep::Initiating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn handle(&self) -> Option<&RefundHandle> {
        match &self.step {
            RefundStep::Transferring { handle, .. } => Some(handle),
            _ => None,
        }
    }

    pub fn refunds(&self) -> &RefundPage {
        self.refunds.page()
    }

    pub fn is_verifying(&self) -> bool {
        self.verifier.is_pending()
    }

    pub async fn load_refunds(
        &mut self,
        page: u32,
        search: Option<&str>,
    ) -> Result<&RefundPage, ApiError> {
        self.refunds.load(&self.session, page, search).await
    }

    pub async fn refresh_refunds(&mut self) -> Result<&RefundPage, ApiError> {
        self.refunds.refresh(&self.session).await
    }

    /// Opens a fresh draft, dropping whatever step was in progress.
    pub fn open_initiate(&mut self, transaction_reference: &str) {
        self.verifier.cancel();
        self.step = RefundStep::Initiating(RefundDraft::for_transaction(
            transaction_reference.trim(),
        ));
        info!(transaction_reference, "Refund draft opened");
    }

    /// Closes whichever step is open. In-flight verification is abandoned.
    pub fn close(&mut self) {
        self.verifier.cancel();
        if !matches!(self.step, RefundStep::Idle) {
            info!("Refund workflow closed");
        }
        self.step = RefundStep::Idle;
    }

    fn draft_mut(&mut self) -> Result<&mut RefundDraft, RefundError> {
        match &mut self.step {
            RefundStep::Initiating(draft) => Ok(draft),
            _ => Err(RefundError::NoActiveDraft),
        }
    }

    pub fn select_transaction(&mut self, reference: &str) -> Result<(), RefundError> {
        self.draft_mut()?.source_transaction_reference = reference.trim().to_owned();
        Ok(())
    }

    pub fn set_amount(&mut self, amount: i64) -> Result<(), RefundError> {
        self.draft_mut()?.amount = amount;
        Ok(())
    }

    pub fn set_bank_code(&mut self, bank_code: &str) -> Result<(), RefundError> {
        if self.draft_mut()?.set_bank_code(bank_code) {
            self.retrigger_verification();
        }
        Ok(())
    }

    pub fn set_account_number(&mut self, account_number: &str) -> Result<(), RefundError> {
        if self.draft_mut()?.set_account_number(account_number) {
            self.retrigger_verification();
        }
        Ok(())
    }

    fn retrigger_verification(&mut self) {
        let target = match &self.step {
            RefundStep::Initiating(draft) => draft
                .verification_target()
                .map(|(number, bank)| (number.to_owned(), bank.to_owned())),
            _ => None,
        };

        match target {
            Some((number, bank)) => {
                self.verifier.request(&number, &bank);
            }
            None => self.verifier.cancel(),
        }
    }

    /// Waits for the latest verification and applies it to the draft.
    ///
    /// `None` means nothing was in flight. `Some(Ok(name))` carries the
    /// verified holder name, `Some(Err(_))` the failure shown to the admin.
    pub async fn settle_verification(&mut self) -> Option<Result<String, RefundError>> {
        let outcome = self.verifier.next_outcome().await?;
        self.apply_verification(outcome)
    }

    fn apply_verification(
        &mut self,
        outcome: VerificationOutcome,
    ) -> Option<Result<String, RefundError>> {
        let RefundStep::Initiating(draft) = &mut self.step else {
            return None;
        };

        if draft.verification_target()
            != Some((outcome.account_number.as_str(), outcome.bank_code.as_str()))
        {
            return None;
        }

        match outcome.result {
            Ok(account_name) => {
                info!(generation = outcome.generation, "Destination account verified");
                draft.record_verified_name(account_name.clone());
                Some(Ok(account_name))
            }
            Err(e) => {
                draft.clear_verified_name();
                Some(Err(RefundError::verification_failure(&e)))
            }
        }
    }

    /// Submits the draft. On success the draft is replaced by a
    /// [`RefundHandle`] and the transfer step opens.
    pub async fn submit_refund(&mut self) -> Result<RefundHandle, RefundError> {
        let RefundStep::Initiating(draft) = &self.step else {
            return Err(RefundError::NoActiveDraft);
        };

        draft
            .validate()
            .map_err(|e| RefundError::from_validation(&e))?;

        if self.refunds.has_refund_for(&draft.source_transaction_reference) {
            warn!(
                transaction_reference = %draft.source_transaction_reference,
                "Refund already listed for transaction"
            );
            return Err(RefundError::DuplicateRefund {
                reference: draft.source_transaction_reference.clone(),
            });
        }

        let reference = match self.session.initiate_refund(&draft.to_request()).await {
            Ok(Some(reference)) => reference,
            Ok(None) => {
                warn!(
                    transaction_reference = %draft.source_transaction_reference,
                    "Refund initiated but no reference returned"
                );
                return Err(RefundError::MissingReference);
            }
            Err(e) => return Err(RefundError::initiation_failure(e)),
        };

        let RefundStep::Initiating(draft) = std::mem::take(&mut self.step) else {
            return Err(RefundError::NoActiveDraft);
        };
        self.verifier.cancel();

        let handle = RefundHandle::from_draft(reference, draft);
        info!(refund_reference = %handle.reference, amount = handle.amount, "Refund initiated");

        self.step = RefundStep::Transferring {
            draft: TransferDraft::new(handle.reference.as_str()),
            handle: handle.clone(),
        };
        Ok(handle)
    }

    pub fn set_transfer_password(&mut self, password: SecretString) -> Result<(), RefundError> {
        match &mut self.step {
            RefundStep::Transferring { draft, .. } => {
                draft.set_password(password);
                Ok(())
            }
            _ => Err(RefundError::NoActiveHandle),
        }
    }

    /// Executes the transfer for the current handle.
    ///
    /// The password is consumed by every attempt. A failed attempt keeps the
    /// handle so the admin can resubmit; a successful one clears the workflow
    /// and reloads the refund list.
    pub async fn confirm_transfer(&mut self) -> Result<RefundHandle, RefundError> {
        let RefundStep::Transferring { handle, draft } = &mut self.step else {
            return Err(RefundError::NoActiveHandle);
        };

        let password = draft
            .take_password()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(RefundError::EmptyPassword)?;
        let reference = handle.reference.clone();

        self.session
            .make_transfer(&reference, &password)
            .await
            .map_err(RefundError::transfer_failure)?;
        drop(password);

        let RefundStep::Transferring { handle, .. } = std::mem::take(&mut self.step) else {
            return Err(RefundError::NoActiveHandle);
        };
        info!(refund_reference = %handle.reference, "Refund transfer completed");

        if let Err(e) = self.refunds.refresh(&self.session).await {
            warn!(error = %e, "Refund list refresh after transfer failed");
        }

        Ok(handle)
    }
}
