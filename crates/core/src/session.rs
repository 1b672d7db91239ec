use crate::clients::AdminClient;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::dtos::{
    ApiEnvelope, InitiateRefundData, InitiateRefundRequest, PaginatedEnvelope, RefundQuery,
    TransactionQuery, TransferRequest, VerifiedAccountData, VerifyAccountRequest,
};
use hostadmin_primitives::models::entities::{Bank, Refund, RefundPage, Transaction};
use hostadmin_primitives::models::AdminProfile;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::de::IgnoredAny;
use std::sync::Arc;
use tracing::{info, warn};

struct SessionInner {
    client: AdminClient,
    token: SecretString,
    admin: AdminProfile,
}

/// An authenticated admin session.
///
/// Created by [`AdminClient::login`] and torn down by [`AdminSession::logout`].
/// Cloning is cheap; clones share the same token.
#[derive(Clone)]
pub struct AdminSession {
    inner: Arc<SessionInner>,
}

impl AdminSession {
    pub(crate) fn new(client: AdminClient, token: SecretString, admin: AdminProfile) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                client,
                token,
                admin,
            }),
        }
    }

    pub fn admin(&self) -> &AdminProfile {
        &self.inner.admin
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let client = &self.inner.client;
        client
            .http()
            .get(client.endpoint(path))
            .bearer_auth(self.inner.token.expose_secret())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let client = &self.inner.client;
        client
            .http()
            .post(client.endpoint(path))
            .bearer_auth(self.inner.token.expose_secret())
    }

    pub async fn refund_list(&self, query: &RefundQuery) -> Result<RefundPage, ApiError> {
        let request = self.get("admin/transactions/refunds").query(query);
        let envelope: PaginatedEnvelope<Refund> =
            self.inner.client.send(request, "refund_list").await?;

        if !envelope.is_success() {
            return Err(AdminClient::reported_failure(
                "refund_list",
                &envelope.status,
                envelope.message,
            ));
        }

        Ok(RefundPage {
            items: envelope.data,
            page_number: envelope.page_number,
            total_pages: envelope.total_pages,
            total_items: envelope.total_items,
        })
    }

    pub async fn transaction_list(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ApiError> {
        let request = self.get("admin/transactions").query(query);
        let envelope: ApiEnvelope<Vec<Transaction>> =
            self.inner.client.send(request, "transaction_list").await?;

        Ok(AdminClient::successful(envelope, "transaction_list")?.unwrap_or_default())
    }

    pub async fn bank_list(&self) -> Result<Vec<Bank>, ApiError> {
        let request = self.get("admin/wallet/banks");
        let envelope: ApiEnvelope<Vec<Bank>> =
            self.inner.client.send(request, "bank_list").await?;

        Ok(AdminClient::successful(envelope, "bank_list")?.unwrap_or_default())
    }

    /// Resolves the holder name of a bank account. An absent name comes back
    /// as an empty string.
    pub async fn verify_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<String, ApiError> {
        let request = self
            .post("admin/wallet/verify-account")
            .json(&VerifyAccountRequest {
                account_number,
                bank_code,
            });
        let envelope: ApiEnvelope<VerifiedAccountData> =
            self.inner.client.send(request, "verify_account").await?;

        Ok(AdminClient::successful(envelope, "verify_account")?
            .and_then(|d| d.account_name)
            .unwrap_or_default())
    }

    /// Returns the refund reference, if the API handed one back.
    pub async fn initiate_refund(
        &self,
        payload: &InitiateRefundRequest<'_>,
    ) -> Result<Option<String>, ApiError> {
        info!(
            transaction_reference = %payload.reference,
            amount = payload.amount,
            bank_code = %payload.bank_code,
            "Initiating refund"
        );

        let request = self.post("admin/transactions/refund").json(payload);
        let envelope: ApiEnvelope<InitiateRefundData> =
            self.inner.client.send(request, "initiate_refund").await?;

        Ok(AdminClient::successful(envelope, "initiate_refund")?
            .and_then(|d| d.reference)
            .filter(|r| !r.is_empty()))
    }

    pub async fn make_transfer(
        &self,
        reference: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        info!(refund_reference = %reference, "Submitting refund transfer");

        let request = self.post("admin/transactions/transfer").json(&TransferRequest {
            reference,
            password: password.expose_secret(),
        });
        let envelope: ApiEnvelope<IgnoredAny> =
            self.inner.client.send(request, "make_transfer").await?;

        AdminClient::successful(envelope, "make_transfer")?;
        Ok(())
    }

    /// Ends the session. The token is revoked server-side; a failed revoke
    /// is logged and the local session is dropped regardless.
    pub async fn logout(self) -> Result<(), ApiError> {
        let request = self.post("admin/auth/logout");
        let result = self
            .inner
            .client
            .send::<ApiEnvelope<IgnoredAny>>(request, "logout")
            .await
            .and_then(|envelope| AdminClient::successful(envelope, "logout").map(|_| ()));

        match &result {
            Ok(()) => info!(admin_id = %self.inner.admin.id, "Admin session ended"),
            Err(e) => warn!(admin_id = %self.inner.admin.id, error = %e, "Logout was not acknowledged"),
        }
        result
    }
}
