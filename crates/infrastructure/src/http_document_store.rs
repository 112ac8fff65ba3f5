use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stitchtrack_application::{
    AuditSubmission, CancellationCheck, DocumentGateway, InsertedDocument, SubmitReceipt,
    SubmitStatus, UserDirectory, WorkOrderGateway,
};
use stitchtrack_core::{AppError, AppResult, NonEmptyString};
use stitchtrack_domain::{AuditRow, EnabledUser};
use tracing::warn;
use url::Url;

/// HTTP implementation of the store gateways against the backing
/// document store's REST surface.
pub struct HttpDocumentStore {
    http_client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpDocumentStore {
    /// Creates a store client; the caller owns client construction so
    /// timeouts and pooling stay a composition-root concern.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url, auth_token: Option<String>) -> Self {
        Self {
            http_client,
            base_url,
            auth_token,
        }
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("invalid store endpoint '{path}': {error}"))
        })
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.get(url))
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.post(url))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> AppResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|error| AppError::Remote(format!("document store unreachable: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            warn!(%status, "document store rejected a request");
            return Err(AppError::Remote(format!(
                "document store returned status {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|error| AppError::Remote(format!("invalid document store response: {error}")))
    }
}

#[derive(Debug, Deserialize)]
struct WorkOrderRowDto {
    work_order: String,
    #[serde(default)]
    style: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    order_qty: f64,
    #[serde(default)]
    received_qty: f64,
    #[serde(default)]
    vendor: String,
    #[serde(default)]
    audit_date: Option<NaiveDate>,
    #[serde(default)]
    audit_result: String,
    #[serde(default)]
    inspected_by: String,
}

impl TryFrom<WorkOrderRowDto> for AuditRow {
    type Error = AppError;

    fn try_from(dto: WorkOrderRowDto) -> AppResult<Self> {
        AuditRow::new(
            dto.work_order,
            dto.style,
            dto.color,
            dto.order_qty,
            dto.received_qty,
            dto.vendor,
            dto.audit_date,
            dto.audit_result,
            dto.inspected_by,
        )
    }
}

#[derive(Debug, Serialize)]
struct AuditSubmissionDto<'a> {
    work_order: &'a str,
    audit_result: &'a str,
    inspected_by: &'a str,
    style: &'a str,
    color: &'a str,
    order_qty: f64,
    audit_date: NaiveDate,
}

impl<'a> From<&'a AuditSubmission> for AuditSubmissionDto<'a> {
    fn from(submission: &'a AuditSubmission) -> Self {
        Self {
            work_order: submission.work_order.as_str(),
            audit_result: submission.audit_result.as_str(),
            inspected_by: submission.inspected_by.as_str(),
            style: submission.style.as_str(),
            color: submission.color.as_str(),
            order_qty: submission.order_qty,
            audit_date: submission.audit_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitReceiptDto {
    status: String,
    #[serde(default)]
    message: String,
}

impl From<SubmitReceiptDto> for SubmitReceipt {
    fn from(dto: SubmitReceiptDto) -> Self {
        let status = if dto.status == "success" {
            SubmitStatus::Success
        } else {
            SubmitStatus::Error
        };
        Self {
            status,
            message: dto.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnabledUserDto {
    name: String,
    #[serde(default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct CancellationCheckDto {
    needs_confirmation: bool,
    #[serde(default)]
    confirmation_message: String,
}

#[derive(Debug, Serialize)]
struct CancelDocumentRequest<'a> {
    doctype: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct InsertDocumentRequest<'a> {
    doctype: &'a str,
    fields: &'a Value,
}

#[derive(Debug, Deserialize)]
struct InsertedDocumentDto {
    name: String,
}

#[async_trait]
impl WorkOrderGateway for HttpDocumentStore {
    async fn get_work_orders(&self, search: &str) -> AppResult<Vec<AuditRow>> {
        let url = self.endpoint("audit/work-orders")?;
        let rows: Vec<WorkOrderRowDto> = self
            .execute(self.get(url).query(&[("search", search)]))
            .await?;

        rows.into_iter().map(AuditRow::try_from).collect()
    }

    async fn create_aql_audit(&self, submission: AuditSubmission) -> AppResult<SubmitReceipt> {
        let url = self.endpoint("audit/submissions")?;
        let receipt: SubmitReceiptDto = self
            .execute(self.post(url).json(&AuditSubmissionDto::from(&submission)))
            .await?;

        Ok(receipt.into())
    }
}

#[async_trait]
impl UserDirectory for HttpDocumentStore {
    async fn get_enabled_users(&self) -> AppResult<Vec<EnabledUser>> {
        let url = self.endpoint("users/enabled")?;
        let users: Vec<EnabledUserDto> = self.execute(self.get(url)).await?;

        users
            .into_iter()
            .map(|user| EnabledUser::new(user.name, user.full_name))
            .collect()
    }
}

#[async_trait]
impl DocumentGateway for HttpDocumentStore {
    async fn check_tracking_order_status(&self, bundle_id: &str) -> AppResult<CancellationCheck> {
        let url = self.endpoint("tracking-orders/cancellation-check")?;
        let check: CancellationCheckDto = self
            .execute(self.get(url).query(&[("bundle", bundle_id)]))
            .await?;

        Ok(CancellationCheck {
            needs_confirmation: check.needs_confirmation,
            confirmation_message: check.confirmation_message,
        })
    }

    async fn cancel_document(&self, doctype: &str, name: &str) -> AppResult<()> {
        let url = self.endpoint("documents/cancel")?;
        let _: Value = self
            .execute(
                self.post(url)
                    .json(&CancelDocumentRequest { doctype, name }),
            )
            .await?;
        Ok(())
    }

    async fn insert_document(&self, doctype: &str, fields: Value) -> AppResult<InsertedDocument> {
        let url = self.endpoint("documents/insert")?;
        let inserted: InsertedDocumentDto = self
            .execute(self.post(url).json(&InsertDocumentRequest {
                doctype,
                fields: &fields,
            }))
            .await?;

        Ok(InsertedDocument {
            name: NonEmptyString::new(inserted.name)?,
        })
    }
}
