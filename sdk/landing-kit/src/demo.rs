use crate::pages::Page;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// How long the confirmation stays up before the form resets.
pub const CONFIRMATION_PERIOD: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,

    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A submission is still being confirmed
    #[error("Demo request already submitted")]
    AlreadySubmitted,
}

/// Fields of a demo request. Only name and email are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemoRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

impl DemoRequest {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map_or(false, |(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}

/// "Schedule a Demo" form on a product page.
#[derive(Debug, Clone)]
pub struct DemoRequestForm {
    product: Page,
    pub fields: DemoRequest,
    submitted_at: Option<Instant>,
}

impl DemoRequestForm {
    pub fn new(product: Page) -> Self {
        Self {
            product,
            fields: DemoRequest::default(),
            submitted_at: None,
        }
    }

    pub fn product(&self) -> Page {
        self.product
    }

    /// Validate and accept the current fields. On success the confirmation
    /// is shown until [`tick`](Self::tick) observes that
    /// [`CONFIRMATION_PERIOD`] has passed.
    pub fn submit(&mut self, now: Instant) -> Result<DemoRequest, FormError> {
        if self.submitted_at.is_some() {
            return Err(FormError::AlreadySubmitted);
        }
        self.fields.validate()?;

        info!(product = ?self.product, "demo request submitted");
        self.submitted_at = Some(now);
        Ok(self.fields.clone())
    }

    pub fn is_confirming(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Reset the form once the confirmation has been visible long enough.
    /// Returns `true` when the reset happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.submitted_at {
            Some(at) if now.saturating_duration_since(at) >= CONFIRMATION_PERIOD => {
                debug!("demo form reset");
                self.submitted_at = None;
                self.fields = DemoRequest::default();
                true
            },
            _ => false,
        }
    }

    pub fn confirmation(&self) -> Option<(&'static str, &'static str)> {
        self.submitted_at
            .map(|_| ("Demo Request Submitted!", "We'll contact you shortly."))
    }
}
