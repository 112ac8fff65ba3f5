use std::sync::Arc;

use stitchtrack_core::AppResult;

use crate::store_ports::{ConfirmationPrompt, DocumentGateway};

/// How a confirmation-gated cancellation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationOutcome {
    /// The document was cancelled in the backing store.
    Cancelled,
    /// The operator declined; nothing was mutated.
    Declined,
}

/// Cancels documents behind a server-computed confirmation check.
#[derive(Clone)]
pub struct CancellationService {
    documents: Arc<dyn DocumentGateway>,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl CancellationService {
    /// Creates a cancellation service over the store and prompt ports.
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentGateway>, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        Self { documents, prompt }
    }

    /// Cancels a document, asking the operator first when the store says
    /// the linked tracking order makes the cancellation destructive.
    ///
    /// The cancel is only issued after the status check; declining the
    /// prompt performs no mutation at all.
    pub async fn cancel_with_confirmation(
        &self,
        doctype: &str,
        name: &str,
        bundle_id: &str,
    ) -> AppResult<CancellationOutcome> {
        let check = self.documents.check_tracking_order_status(bundle_id).await?;

        if check.needs_confirmation
            && !self.prompt.confirm(&check.confirmation_message).await?
        {
            return Ok(CancellationOutcome::Declined);
        }

        self.documents.cancel_document(doctype, name).await?;
        Ok(CancellationOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    use async_trait::async_trait;
    use serde_json::Value;
    use stitchtrack_core::{AppError, AppResult, NonEmptyString};

    use super::{CancellationOutcome, CancellationService};
    use crate::store_ports::{
        CancellationCheck, ConfirmationPrompt, DocumentGateway, InsertedDocument,
    };

    struct FakeDocumentGateway {
        needs_confirmation: bool,
        cancelled: Mutex<Vec<(String, String)>>,
    }

    impl FakeDocumentGateway {
        fn new(needs_confirmation: bool) -> Self {
            Self {
                needs_confirmation,
                cancelled: Mutex::new(Vec::new()),
            }
        }

        fn cancelled(&self) -> Vec<(String, String)> {
            self.cancelled
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl DocumentGateway for FakeDocumentGateway {
        async fn check_tracking_order_status(
            &self,
            _bundle_id: &str,
        ) -> AppResult<CancellationCheck> {
            Ok(CancellationCheck {
                needs_confirmation: self.needs_confirmation,
                confirmation_message: "12 of 120 units have been produced".to_owned(),
            })
        }

        async fn cancel_document(&self, doctype: &str, name: &str) -> AppResult<()> {
            self.cancelled
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((doctype.to_owned(), name.to_owned()));
            Ok(())
        }

        async fn insert_document(
            &self,
            _doctype: &str,
            _fields: Value,
        ) -> AppResult<InsertedDocument> {
            Ok(InsertedDocument {
                name: NonEmptyString::new("unused")?,
            })
        }
    }

    struct FakePrompt {
        answer: AppResult<bool>,
        shown: AtomicUsize,
        last_message: Mutex<String>,
    }

    impl FakePrompt {
        fn answering(answer: bool) -> Self {
            Self {
                answer: Ok(answer),
                shown: AtomicUsize::new(0),
                last_message: Mutex::new(String::new()),
            }
        }
    }

    #[async_trait]
    impl ConfirmationPrompt for FakePrompt {
        async fn confirm(&self, message: &str) -> AppResult<bool> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            *self
                .last_message
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = message.to_owned();
            match &self.answer {
                Ok(answer) => Ok(*answer),
                Err(_) => Err(AppError::Internal("prompt unavailable".to_owned())),
            }
        }
    }

    fn service(
        needs_confirmation: bool,
        answer: bool,
    ) -> (CancellationService, Arc<FakeDocumentGateway>, Arc<FakePrompt>) {
        let documents = Arc::new(FakeDocumentGateway::new(needs_confirmation));
        let prompt = Arc::new(FakePrompt::answering(answer));
        (
            CancellationService::new(documents.clone(), prompt.clone()),
            documents,
            prompt,
        )
    }

    #[tokio::test]
    async fn declining_the_prompt_performs_no_mutation() {
        let (service, documents, prompt) = service(true, false);

        let outcome = service
            .cancel_with_confirmation("Bundle Creation", "BC-0007", "BC-0007")
            .await;

        assert!(matches!(outcome, Ok(CancellationOutcome::Declined)));
        assert!(documents.cancelled().is_empty());
        assert_eq!(prompt.shown.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn confirming_cancels_the_document_with_the_server_message() {
        let (service, documents, prompt) = service(true, true);

        let outcome = service
            .cancel_with_confirmation("Bundle Creation", "BC-0007", "BC-0007")
            .await;

        assert!(matches!(outcome, Ok(CancellationOutcome::Cancelled)));
        assert_eq!(
            documents.cancelled(),
            vec![("Bundle Creation".to_owned(), "BC-0007".to_owned())]
        );
        assert_eq!(
            prompt
                .last_message
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .as_str(),
            "12 of 120 units have been produced"
        );
    }

    #[tokio::test]
    async fn no_confirmation_needed_cancels_without_prompting() {
        let (service, documents, prompt) = service(false, false);

        let outcome = service
            .cancel_with_confirmation("Bundle Creation", "BC-0008", "BC-0008")
            .await;

        assert!(matches!(outcome, Ok(CancellationOutcome::Cancelled)));
        assert_eq!(documents.cancelled().len(), 1);
        assert_eq!(prompt.shown.load(Ordering::SeqCst), 0);
    }
}
