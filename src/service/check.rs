//! Uniqueness checks run on behalf of the registration wizard

use super::traits::BackstageClientTrait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One server-side uniqueness question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniquenessQuery {
    Email(String),
    Username(String),
}

impl UniquenessQuery {
    /// Query-string parameter name
    pub fn param(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Username(_) => "username",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Email(v) | Self::Username(v) => v,
        }
    }
}

/// How a uniqueness check ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Available,
    Taken,
    /// Transport or protocol failure, with detail for the log
    Failed(String),
    TimedOut,
    Cancelled,
}

/// Run one check, bounded by `timeout` and abandoned when `cancel` fires
pub async fn run_check(
    client: &dyn BackstageClientTrait,
    query: &UniquenessQuery,
    timeout: Duration,
    cancel: &CancellationToken,
) -> CheckOutcome {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => CheckOutcome::Cancelled,
        result = tokio::time::timeout(timeout, client.is_unique(query)) => match result {
            Ok(Ok(true)) => CheckOutcome::Available,
            Ok(Ok(false)) => CheckOutcome::Taken,
            Ok(Err(err)) => {
                tracing::warn!(param = query.param(), "uniqueness check failed: {err:#}");
                CheckOutcome::Failed(err.to_string())
            }
            Err(_) => {
                tracing::warn!(param = query.param(), ?timeout, "uniqueness check timed out");
                CheckOutcome::TimedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockBackstageClientTrait;
    use crate::state::FormSnapshot;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Never answers within any reasonable timeout
    struct SlowClient;

    #[async_trait]
    impl BackstageClientTrait for SlowClient {
        async fn is_unique(&self, _query: &UniquenessQuery) -> Result<bool> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(true)
        }

        async fn submit_form(&self, _path: &str, _form: &FormSnapshot) -> Result<()> {
            Ok(())
        }

        async fn increment_read_count(&self, _post_uid: &str) -> Result<()> {
            Ok(())
        }
    }

    fn email() -> UniquenessQuery {
        UniquenessQuery::Email("a@b.com".to_string())
    }

    #[test]
    fn test_query_params() {
        assert_eq!(email().param(), "email");
        assert_eq!(email().value(), "a@b.com");
        assert_eq!(UniquenessQuery::Username("me".to_string()).param(), "username");
    }

    #[tokio::test]
    async fn test_available_and_taken() {
        let mut mock = MockBackstageClientTrait::new();
        mock.expect_is_unique()
            .withf(|q| q.value() == "a@b.com")
            .times(1)
            .returning(|_| Ok(true));
        let outcome = run_check(&mock, &email(), Duration::from_secs(1), &CancellationToken::new()).await;
        assert_eq!(outcome, CheckOutcome::Available);

        let mut mock = MockBackstageClientTrait::new();
        mock.expect_is_unique().times(1).returning(|_| Ok(false));
        let outcome = run_check(&mock, &email(), Duration::from_secs(1), &CancellationToken::new()).await;
        assert_eq!(outcome, CheckOutcome::Taken);
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let mut mock = MockBackstageClientTrait::new();
        mock.expect_is_unique()
            .times(1)
            .returning(|_| Err(anyhow!("connection refused")));
        let outcome = run_check(&mock, &email(), Duration::from_secs(1), &CancellationToken::new()).await;
        assert_eq!(outcome, CheckOutcome::Failed("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_timeout() {
        let outcome = run_check(
            &SlowClient,
            &email(),
            Duration::from_millis(20),
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(outcome, CheckOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_cancelled_before_answer() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = run_check(&SlowClient, &email(), Duration::from_secs(5), &cancel).await;
        assert_eq!(outcome, CheckOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_cancelled_mid_flight() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        let outcome = run_check(&SlowClient, &email(), Duration::from_secs(5), &cancel).await;
        assert_eq!(outcome, CheckOutcome::Cancelled);
    }
}
