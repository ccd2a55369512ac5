//! # API Call Tracking
//!
//! Data/error/loading bookkeeping for one mutation, wired to the global
//! loading overlay and toast.
//!
//! ```rust
//! use storefront::app::{LoadingOverlay, Notification, Severity};
//! use storefront::utils::api_call::{ApiCall, ApiCallOptions};
//!
//! let mut overlay = LoadingOverlay::default();
//! let mut toast = Notification::default();
//! let mut call: ApiCall<u32> = ApiCall::new(ApiCallOptions::default().success_message("Saved"));
//!
//! call.start(&mut overlay);
//! assert!(overlay.visible);
//! call.finish(Ok(7), &mut overlay, &mut toast);
//! assert_eq!(call.data(), Some(&7));
//! assert_eq!(toast.severity, Severity::Success);
//! ```

use crate::app::state::{LoadingOverlay, Notification, Severity};
use crate::services::api::ApiError;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed successfully";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCallOptions {
    pub show_loading: bool,
    pub show_notification: bool,
    /// Overlay text; `None` uses the overlay default
    pub loading_message: Option<String>,
    pub success_message: String,
    /// Toast text on failure; `None` shows the server's message
    pub error_message: Option<String>,
}

impl Default for ApiCallOptions {
    fn default() -> Self {
        Self {
            show_loading: true,
            show_notification: true,
            loading_message: None,
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            error_message: Some(DEFAULT_ERROR_MESSAGE.to_string()),
        }
    }
}

impl ApiCallOptions {
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = Some(message.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Show the server's error text instead of a fixed message
    pub fn server_errors(mut self) -> Self {
        self.error_message = None;
        self
    }

    pub fn without_loading(mut self) -> Self {
        self.show_loading = false;
        self
    }

    pub fn without_notification(mut self) -> Self {
        self.show_notification = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiCall<T> {
    data: Option<T>,
    error: Option<ApiError>,
    loading: bool,
    options: ApiCallOptions,
}

impl<T> Default for ApiCall<T> {
    fn default() -> Self {
        Self::new(ApiCallOptions::default())
    }
}

impl<T> ApiCall<T> {
    pub fn new(options: ApiCallOptions) -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            options,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn options(&self) -> &ApiCallOptions {
        &self.options
    }

    pub fn start(&mut self, overlay: &mut LoadingOverlay) {
        self.loading = true;
        if self.options.show_loading {
            overlay.show(self.options.loading_message.as_deref());
        }
    }

    /// Forget an outcome nobody is waiting for any more: clears the loading
    /// flag and overlay without storing the result or raising a toast.
    pub fn abandon(&mut self, overlay: &mut LoadingOverlay) {
        self.loading = false;
        if self.options.show_loading {
            overlay.hide();
        }
    }

    /// Record the outcome. Returns true on success.
    pub fn finish(
        &mut self,
        result: Result<T, ApiError>,
        overlay: &mut LoadingOverlay,
        notification: &mut Notification,
    ) -> bool {
        self.loading = false;
        if self.options.show_loading {
            overlay.hide();
        }

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                if self.options.show_notification {
                    notification.show(self.options.success_message.clone(), Severity::Success);
                }
                true
            }
            Err(e) => {
                if self.options.show_notification {
                    let message = self
                        .options
                        .error_message
                        .clone()
                        .unwrap_or_else(|| e.to_string());
                    notification.show(message, Severity::Error);
                }
                self.data = None;
                self.error = Some(e);
                false
            }
        }
    }
}
