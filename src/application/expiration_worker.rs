//! Background job that keeps document estados in line with their dates.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info, warn};

use crate::application::services::vencimiento_service::{RecalculoResumen, VencimientoService};
use crate::domain::vencimiento::today;
use crate::error::AppError;

const MAX_RETRIES: usize = 4;

/// Delays of 10ms, 100ms, 1s, 10s (jittered).
fn backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(60))
        .map(jitter)
        .take(MAX_RETRIES)
}

/// Database and storage failures surface as internal errors and are worth
/// retrying; anything else will fail the same way again.
fn is_transient(e: &AppError) -> bool {
    matches!(e, AppError::Internal { .. })
}

/// Runs one recomputation, retrying transient failures with exponential
/// backoff.
pub async fn run_once(service: &VencimientoService) -> Result<RecalculoResumen, AppError> {
    RetryIf::start(
        backoff(),
        move || async move {
            service.recalcular(today()).await.inspect_err(|e| {
                warn!(error = %e, "Expiration recomputation attempt failed");
            })
        },
        is_transient,
    )
    .await
}

/// Recomputes expiration estados at startup and then every `period`.
///
/// Never returns; spawn it and abort the handle on shutdown.
pub async fn run_expiration_worker(service: Arc<VencimientoService>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_secs = period.as_secs(), "Expiration worker started");

    loop {
        // The first tick completes immediately.
        ticker.tick().await;

        match run_once(&service).await {
            Ok(resumen) => info!(
                evaluados = resumen.evaluados,
                actualizados = resumen.actualizados,
                "Scheduled expiration recomputation finished"
            ),
            Err(e) => error!(error = %e, "Scheduled expiration recomputation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstadoNames;
    use crate::domain::repositories::{MockEstadoRepository, MockVencimientoRepository};
    use crate::test_support::estados_seeded;
    use serde_json::json;

    #[tokio::test]
    async fn test_run_once_retries_transient_failures() {
        let mut vencimientos = MockVencimientoRepository::new();
        let mut seq = mockall::Sequence::new();
        vencimientos
            .expect_list_vencibles()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(AppError::internal("Database error", json!({}))));
        vencimientos
            .expect_list_vencibles()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![]));

        let service = VencimientoService::new(
            Arc::new(vencimientos),
            Arc::new(estados_seeded()),
            EstadoNames::default(),
        );

        let resumen = run_once(&service).await.unwrap();
        assert_eq!(resumen.evaluados, 0);
    }

    #[tokio::test]
    async fn test_run_once_gives_up_on_permanent_errors() {
        let mut estados = MockEstadoRepository::new();
        estados
            .expect_find_by_nombre()
            .times(1)
            .returning(|_| Err(AppError::bad_request("bad", json!({}))));

        let service = VencimientoService::new(
            Arc::new(MockVencimientoRepository::new()),
            Arc::new(estados),
            EstadoNames::default(),
        );

        assert!(run_once(&service).await.is_err());
    }

    #[test]
    fn test_backoff_is_bounded() {
        let delays: Vec<_> = backoff().collect();
        assert_eq!(delays.len(), MAX_RETRIES);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(60)));
    }
}
