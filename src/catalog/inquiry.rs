use crate::client::{ClientError, ClientResult, DataClient};
use crate::models::{validate_inquiry, FieldErrors, InquiryCreateResponse, InquiryField, InquiryForm, InquiryRequest, InquiryResponse};
use crate::notifications::{NotificationCenter, NotificationSpec};

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid,
    /// A submission is already in flight
    InFlight,
    Sent(InquiryResponse),
    Failed(ClientError),
}

/// Inquiry form state for one car
#[derive(Debug)]
pub struct InquiryFormController {
    form: InquiryForm,
    errors: FieldErrors,
    submitting: bool,
}

impl InquiryFormController {
    pub fn new(car: impl Into<String>) -> Self {
        Self {
            form: InquiryForm::new(car),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn form(&self) -> &InquiryForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Set a field; only that field's error is cleared
    pub fn edit(&mut self, field: InquiryField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Validate and mark the form as submitting. `Err` carries the outcome
    /// when nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<InquiryRequest, SubmitOutcome> {
        if self.submitting {
            return Err(SubmitOutcome::InFlight);
        }

        self.errors = validate_inquiry(&self.form);
        if !self.errors.is_valid() {
            tracing::debug!(errors = self.errors.len(), "inquiry form invalid");
            return Err(SubmitOutcome::Invalid);
        }

        self.submitting = true;
        Ok(self.form.to_request())
    }

    /// Report the result through the notification center. A success resets
    /// the form; a failure keeps it for another manual attempt.
    pub async fn finish_submit(
        &mut self,
        result: ClientResult<InquiryCreateResponse>,
        notifications: &NotificationCenter,
    ) -> SubmitOutcome {
        self.submitting = false;

        match result {
            Ok(response) => {
                tracing::info!(inquiry = %response.data.id, car = %response.data.car, "inquiry sent");
                notifications
                    .enqueue(
                        NotificationSpec::success("Inquiry Sent!")
                            .with_description("We will get back to you as soon as possible."),
                    )
                    .await;
                self.form = InquiryForm::new(self.form.car.clone());
                self.errors = FieldErrors::new();
                SubmitOutcome::Sent(response.data)
            }
            Err(e) => {
                tracing::warn!(error = %e, car = %self.form.car, "inquiry failed");
                notifications
                    .enqueue(NotificationSpec::error("Failed to send inquiry").with_description(e.user_message()))
                    .await;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validate, send once and report
    pub async fn submit(&mut self, client: &dyn DataClient, notifications: &NotificationCenter) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        let result = client.submit_inquiry(&request).await;
        self.finish_submit(result, notifications).await
    }
}
