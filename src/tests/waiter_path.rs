#[cfg(test)]
mod test {

    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::Instant;

    use crate::coordinator::AcquisitionError;
    use crate::tests::common::{build_coordinator, make_entry};

    // The paused clock advances virtually, so the 30 one-second polls run
    // instantly while still counting as 30 wall-clock seconds.

    #[tokio::test(start_paused = true)]
    async fn waiter_gives_up_after_exactly_thirty_polls() {
        let coordinator = build_coordinator(None);
        // simulate a fetcher that never finishes
        coordinator.cache().set_refreshing(true);

        let started = Instant::now();
        let err = coordinator.get(None, false).await.unwrap_err();
        let waited = started.elapsed();

        assert_eq!(err, AcquisitionError::Timeout);
        assert!(waited >= Duration::from_secs(30));
        assert!(waited < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_breaks_out_early_when_fetcher_finishes_empty_handed() {
        let coordinator = Arc::new(build_coordinator(None));
        coordinator.cache().set_refreshing(true);

        let cache = coordinator.cache().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            // fetch failed: flag clears, nothing was cached
            cache.set_refreshing(false);
        });

        let started = Instant::now();
        let err = coordinator.get(None, false).await.unwrap_err();
        let waited = started.elapsed();

        assert_eq!(err, AcquisitionError::Timeout);
        assert!(waited < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_picks_up_entry_cached_by_the_fetcher() {
        let coordinator = Arc::new(build_coordinator(None));
        coordinator.cache().set_refreshing(true);

        let cache = coordinator.cache().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            cache.set(make_entry("chrome136", None, "fresh-token", 3600));
            cache.set_refreshing(false);
        });

        let entry = coordinator.get(None, false).await.unwrap();
        assert_eq!(entry.value, "fresh-token");
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_ignores_entry_for_a_different_context() {
        let coordinator = Arc::new(build_coordinator(None));
        coordinator.cache().set_refreshing(true);

        let cache = coordinator.cache().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            cache.set(make_entry("firefox135", None, "wrong-context", 3600));
            cache.set_refreshing(false);
        });

        // default context is chrome136, the firefox entry never matches
        let err = coordinator.get(None, false).await.unwrap_err();
        assert_eq!(err, AcquisitionError::Timeout);
    }
}
