//! Output port through which the use case reports outcomes.

use crate::dto::{OrderConfirmation, OrderFailure};

/// Receives the outcome of a processed order.
///
/// Presenters implement this to turn outcomes into something displayable.
/// Exactly one of the two methods is called per request.
pub trait OrderOutputPort {
    fn success(&mut self, confirmation: OrderConfirmation);

    fn failure(&mut self, failure: OrderFailure);
}

/// One reported outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    Succeeded(OrderConfirmation),
    Failed(OrderFailure),
}

impl OrderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OrderOutcome::Succeeded(_))
    }
}

/// Output port that keeps every outcome it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectingOutput {
    outcomes: Vec<OrderOutcome>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[OrderOutcome] {
        &self.outcomes
    }

    pub fn last(&self) -> Option<&OrderOutcome> {
        self.outcomes.last()
    }

    pub fn into_outcomes(self) -> Vec<OrderOutcome> {
        self.outcomes
    }
}

impl OrderOutputPort for CollectingOutput {
    fn success(&mut self, confirmation: OrderConfirmation) {
        self.outcomes.push(OrderOutcome::Succeeded(confirmation));
    }

    fn failure(&mut self, failure: OrderFailure) {
        self.outcomes.push(OrderOutcome::Failed(failure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::FailureKind;

    #[test]
    fn test_collecting_output_records_in_order() {
        let mut output = CollectingOutput::new();
        output.failure(OrderFailure {
            kind: FailureKind::NotFound,
            error_message: "Store 'Nagoya' not found".to_string(),
        });

        assert_eq!(output.outcomes().len(), 1);
        assert!(!output.last().unwrap().is_success());
    }
}
