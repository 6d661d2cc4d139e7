#[cfg(test)]
mod test {

    use crate::cache::{ClearanceCache, ClearanceContext};
    use crate::tests::common::make_entry;

    fn default_ctx() -> ClearanceContext {
        ClearanceContext::new("chrome136", None)
    }

    #[test]
    fn set_then_get_valid_round_trips() {
        let cache = ClearanceCache::new();
        assert!(cache.get_valid(&default_ctx()).is_none());

        cache.set(make_entry("chrome136", None, "abcd1234", 3600));

        let got = cache.get_valid(&default_ctx()).expect("entry should be valid");
        assert_eq!(got.value, "abcd1234");
        // wrong context misses even though an entry exists
        assert!(cache
            .get_valid(&ClearanceContext::new("firefox135", None))
            .is_none());
    }

    #[test]
    fn set_replaces_wholesale() {
        let cache = ClearanceCache::new();
        cache.set(make_entry("chrome136", None, "first", 3600));
        cache.set(make_entry("chrome136", None, "second", 3600));

        assert_eq!(cache.get_valid(&default_ctx()).unwrap().value, "second");
    }

    #[test]
    fn invalidate_is_idempotent() {
        let cache = ClearanceCache::new();
        cache.set(make_entry("chrome136", None, "abcd1234", 3600));

        cache.invalidate();
        assert!(cache.get_valid(&default_ctx()).is_none());
        assert!(cache.snapshot().is_none());

        // second invalidate is a no-op
        cache.invalidate();
        assert!(cache.snapshot().is_none());
    }

    #[test]
    fn snapshot_ignores_validity() {
        let cache = ClearanceCache::new();
        // already expired, get_valid refuses it but snapshot still sees it
        cache.set(make_entry("chrome136", None, "stale", -10));

        assert!(cache.get_valid(&default_ctx()).is_none());
        assert_eq!(cache.snapshot().unwrap().value, "stale");
    }

    #[test]
    fn only_first_caller_claims_refresh() {
        let cache = ClearanceCache::new();
        assert!(!cache.is_refreshing());

        let guard = cache.try_begin_refresh().expect("first claim succeeds");
        assert!(cache.is_refreshing());
        assert!(cache.try_begin_refresh().is_none());

        drop(guard);
        assert!(!cache.is_refreshing());
        assert!(cache.try_begin_refresh().is_some());
    }

    #[tokio::test]
    async fn guard_clears_flag_even_when_holder_panics() {
        let cache = ClearanceCache::new();
        let worker_cache = cache.clone();

        let result = tokio::spawn(async move {
            let _guard = worker_cache.try_begin_refresh().unwrap();
            panic!("fetch blew up mid-flight");
        })
        .await;

        assert!(result.is_err());
        assert!(!cache.is_refreshing());
    }
}
