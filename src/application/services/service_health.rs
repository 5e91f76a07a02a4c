use crate::application::ports::{ServiceController, ServiceQueryError, ServiceState};
use crate::common::error::VerbError;
use crate::common::reporter::ErrorReporter;
use crate::common::result::VerbResult;
use std::sync::Arc;

/// 仮想化サービスの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Running,
    NotFound,
    NotRunning,
    /// The service manager itself could not answer.
    QueryFailed(String),
}

/// Verifies the virtualization driver service before a verb touches the enlistment.
pub struct ServiceHealthChecker {
    controller: Arc<dyn ServiceController>,
}

impl ServiceHealthChecker {
    pub fn new(controller: Arc<dyn ServiceController>) -> Self {
        Self { controller }
    }

    pub async fn check_running(&self, name: &str) -> ServiceHealth {
        match self.controller.query_status(name).await {
            Ok(ServiceState::Running) => ServiceHealth::Running,
            Ok(ServiceState::Stopped(state)) => {
                tracing::debug!(service = name, state = %state, "service is not running");
                ServiceHealth::NotRunning
            }
            Err(ServiceQueryError::NotFound) => ServiceHealth::NotFound,
            Err(ServiceQueryError::Unavailable(detail)) => ServiceHealth::QueryFailed(detail),
        }
    }

    /// Abort with `FilterError` unless the service is running.
    pub async fn require_running(&self, name: &str, reporter: &ErrorReporter) -> VerbResult<()> {
        let name_owned = name.to_string();
        let error = match self.check_running(name).await {
            ServiceHealth::Running => return Ok(()),
            ServiceHealth::NotFound => VerbError::ServiceNotFound { name: name_owned },
            ServiceHealth::NotRunning => VerbError::ServiceNotRunning { name: name_owned },
            ServiceHealth::QueryFailed(detail) => VerbError::ServiceQueryFailed {
                name: name_owned,
                detail,
            },
        };
        Err(reporter.fail(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockServiceController;
    use crate::common::error::ExitCode;
    use crate::common::reporter::test_support::RecordingSink;
    use pretty_assertions::assert_eq;

    fn checker(result: Result<ServiceState, ServiceQueryError>) -> ServiceHealthChecker {
        let mut controller = MockServiceController::new();
        controller
            .expect_query_status()
            .times(1)
            .returning(move |_| result.clone());
        ServiceHealthChecker::new(Arc::new(controller))
    }

    #[tokio::test]
    async fn test_check_running_maps_states() {
        assert_eq!(
            checker(Ok(ServiceState::Running)).check_running("PrjFlt").await,
            ServiceHealth::Running
        );
        assert_eq!(
            checker(Ok(ServiceState::Stopped("STOPPED".into())))
                .check_running("PrjFlt")
                .await,
            ServiceHealth::NotRunning
        );
        assert_eq!(
            checker(Err(ServiceQueryError::NotFound))
                .check_running("PrjFlt")
                .await,
            ServiceHealth::NotFound
        );
    }

    #[tokio::test]
    async fn test_require_running_aborts_with_filter_error() {
        let cases = vec![
            (Err(ServiceQueryError::NotFound), "was not found. Reinstall GVFS"),
            (Ok(ServiceState::Stopped("inactive".into())), "is not running. Start the service"),
            (Err(ServiceQueryError::Unavailable("sc.exe missing".into())), "Unable to query the 'PrjFlt' service: sc.exe missing"),
        ];

        for (result, expected) in cases {
            let sink = Arc::new(RecordingSink::default());
            let reporter = ErrorReporter::new("check", sink.clone());

            let abort = checker(result)
                .require_running("PrjFlt", &reporter)
                .await
                .unwrap_err();

            assert_eq!(abort.exit_code(), ExitCode::FilterError);
            assert!(sink.lines()[0].contains(expected));
        }
    }

    #[tokio::test]
    async fn test_require_running_passes_silently() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = ErrorReporter::new("check", sink.clone());

        checker(Ok(ServiceState::Running))
            .require_running("PrjFlt", &reporter)
            .await
            .unwrap();
        assert!(sink.lines().is_empty());
    }
}
