//! # Checkout Sequencer
//!
//! Purchases cart lines one at a time, in cart order, stopping at the
//! first failure. Lines bought before a failure stay bought; nothing is
//! rolled back or retried.
//!
//! The run is a plain value with a cursor so it can be stepped by hand
//! (tests, debugging) or driven to completion by [`run_checkout`].

use async_channel::Sender;
use shared::{PaymentMethod, Transaction};
use std::sync::Arc;

use crate::app::cart::Cart;
use crate::app::events::AppEvent;
use crate::core::service::StorefrontApi;
use crate::services::api::ApiError;

/// One purchase to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Purchased {
        index: usize,
        product_id: i64,
        transaction: Transaction,
    },
    Failed {
        index: usize,
        product_id: i64,
        error: ApiError,
    },
}

impl LineOutcome {
    pub fn index(&self) -> usize {
        match self {
            LineOutcome::Purchased { index, .. } | LineOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LineOutcome::Purchased { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutRun {
    lines: Vec<CheckoutLine>,
    payment_method: PaymentMethod,
    cursor: usize,
    outcomes: Vec<LineOutcome>,
    stopped: bool,
}

impl CheckoutRun {
    pub fn new(lines: Vec<CheckoutLine>, payment_method: PaymentMethod) -> Self {
        Self {
            lines,
            payment_method,
            cursor: 0,
            outcomes: Vec::new(),
            stopped: false,
        }
    }

    /// Snapshot the cart's lines in order
    pub fn from_cart(cart: &Cart, payment_method: PaymentMethod) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product.id,
                product_name: item.product.name.clone(),
                quantity: item.quantity,
            })
            .collect();
        Self::new(lines, payment_method)
    }

    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Index of the next line to purchase
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn outcomes(&self) -> &[LineOutcome] {
        &self.outcomes
    }

    /// A line failed; no further lines will be attempted.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_finished(&self) -> bool {
        self.stopped || self.cursor >= self.lines.len()
    }

    /// Purchase the line under the cursor. Returns `None` once finished.
    pub async fn step(&mut self, api: &dyn StorefrontApi) -> Option<&LineOutcome> {
        if self.is_finished() {
            return None;
        }

        let index = self.cursor;
        let line = &self.lines[index];
        let product_id = line.product_id;
        tracing::info!(
            index,
            product_id,
            quantity = line.quantity,
            payment_method = self.payment_method.as_str(),
            "Purchasing checkout line"
        );

        let outcome = match api
            .purchase_product(product_id, line.quantity, self.payment_method)
            .await
        {
            Ok(transaction) => LineOutcome::Purchased {
                index,
                product_id,
                transaction,
            },
            Err(error) => {
                tracing::warn!(index, product_id, error = %error, "Checkout line failed, stopping");
                self.stopped = true;
                LineOutcome::Failed {
                    index,
                    product_id,
                    error,
                }
            }
        };

        self.cursor += 1;
        self.outcomes.push(outcome);
        self.outcomes.last()
    }

    pub fn into_report(self) -> CheckoutReport {
        let mut purchased = Vec::new();
        let mut failure = None;
        for outcome in self.outcomes {
            match outcome {
                LineOutcome::Purchased { transaction, .. } => purchased.push(transaction),
                LineOutcome::Failed { index, error, .. } => failure = Some((index, error)),
            }
        }
        CheckoutReport {
            total_lines: self.lines.len(),
            purchased,
            failure,
        }
    }
}

/// How a checkout run ended
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReport {
    pub total_lines: usize,
    pub purchased: Vec<Transaction>,
    /// Failed line index and its error
    pub failure: Option<(usize, ApiError)>,
}

impl CheckoutReport {
    /// Every line was purchased
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.purchased.len() == self.total_lines
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.failure.as_ref().map(|(_, e)| e)
    }
}

/// Drive `run` to the end, reporting each line on `progress`.
pub async fn run_checkout(
    api: Arc<dyn StorefrontApi>,
    mut run: CheckoutRun,
    progress: Sender<AppEvent>,
) -> AppEvent {
    let start = std::time::Instant::now();
    while let Some(outcome) = run.step(api.as_ref()).await {
        let _ = progress.send(AppEvent::CheckoutProgress(outcome.clone())).await;
    }

    let report = run.into_report();
    tracing::info!(
        lines = report.total_lines,
        purchased = report.purchased.len(),
        complete = report.is_complete(),
        duration_ms = start.elapsed().as_millis(),
        "Checkout finished"
    );
    AppEvent::CheckoutFinished(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::cart::tests::product;
    use crate::app::handlers::tests::MockApi;

    fn run_for(count: i64) -> CheckoutRun {
        let mut cart = Cart::new();
        for id in 1..=count {
            cart.add(product(id, 1000, 10), 2).unwrap();
        }
        CheckoutRun::from_cart(&cart, PaymentMethod::Cash)
    }

    #[tokio::test]
    async fn test_steps_through_lines_in_order() {
        let api = MockApi::new();
        let mut run = run_for(3);

        assert_eq!(run.cursor(), 0);
        let first = run.step(&api).await.cloned().unwrap();
        assert!(first.is_success());
        assert_eq!(first.index(), 0);
        assert_eq!(run.cursor(), 1);
        assert!(!run.is_finished());

        run.step(&api).await;
        run.step(&api).await;
        assert!(run.is_finished());
        assert!(!run.is_stopped());
        assert!(run.step(&api).await.is_none());

        assert_eq!(api.purchase_calls(), vec![1, 2, 3]);
        let report = run.into_report();
        assert!(report.is_complete());
        assert_eq!(report.purchased.len(), 3);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let api = MockApi::new().fail_purchase_at(2, "Not enough stock available");
        let mut run = run_for(4);

        while run.step(&api).await.is_some() {}

        assert!(run.is_stopped());
        assert_eq!(run.cursor(), 2);
        assert_eq!(api.purchase_calls(), vec![1, 2]);

        let report = run.into_report();
        assert!(!report.is_complete());
        assert_eq!(report.purchased.len(), 1);
        let (index, error) = report.failure.unwrap();
        assert_eq!(index, 1);
        assert_eq!(error.to_string(), "Not enough stock available");
    }

    #[tokio::test]
    async fn test_run_checkout_streams_progress() {
        let api: Arc<dyn StorefrontApi> = Arc::new(MockApi::new());
        let (tx, rx) = async_channel::unbounded();

        let event = run_checkout(api, run_for(2), tx).await;

        let mut progress = Vec::new();
        while let Ok(AppEvent::CheckoutProgress(outcome)) = rx.try_recv() {
            progress.push(outcome.index());
        }
        assert_eq!(progress, vec![0, 1]);
        assert!(matches!(event, AppEvent::CheckoutFinished(report) if report.is_complete()));
    }
}
