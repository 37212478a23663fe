//! Tests for AssetListViewModel refresh, filtering and favorite toggling.
//!
//! # Contract Points
//!
//! 1. Refresh: replaces rows on success, keeps rows and state on failure
//! 2. Filter: never fetches, survives refreshes, stable order
//! 3. Toggle: favorite flags match the favorite set right after the call
//! 4. Interleaving: filter and toggle issued during a refresh still apply

#[cfg(test)]
mod tests {
    use crate::asset_list::{AssetListViewModel, ListStatus, LoadState};
    use crate::constants::FAVORITES_STORAGE_KEY;
    use crate::errors::Error;
    use crate::favorites::{
        FavoriteLookup, FavoritesService, FavoritesServiceTrait, FavoritesStoreTrait,
        KeyValueFavoritesStore,
    };
    use crate::storage::{InMemoryKeyValueStore, KeyValueStore};
    use async_trait::async_trait;
    use coinboard_market_data::{ChangeWindow, MarketDataError, MarketDataSource, RawAssetRecord};
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    type FetchResult = std::result::Result<Vec<RawAssetRecord>, MarketDataError>;

    // =========================================================================
    // Mock MarketDataSource
    // =========================================================================

    /// Hands out scripted responses in call order. The first call can be held
    /// back until a gate is released.
    #[derive(Default)]
    struct MockSource {
        responses: Mutex<VecDeque<FetchResult>>,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        calls: Mutex<usize>,
    }

    impl MockSource {
        fn new() -> Self {
            Self::default()
        }

        fn push_ok(&self, records: Vec<RawAssetRecord>) {
            self.responses.lock().unwrap().push_back(Ok(records));
        }

        fn push_err(&self, error: MarketDataError) {
            self.responses.lock().unwrap().push_back(Err(error));
        }

        fn gate_next_call(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.gate.lock().unwrap() = Some(rx);
            tx
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MarketDataSource for MockSource {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_assets(&self) -> FetchResult {
            *self.calls.lock().unwrap() += 1;
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()));
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn three_assets() -> Vec<RawAssetRecord> {
        vec![
            RawAssetRecord::new("btc", "Bitcoin", dec!(64000.5))
                .with_change(ChangeWindow::OneHour, dec!(0.12))
                .with_change(ChangeWindow::TwentyFourHours, dec!(-2.5))
                .with_change(ChangeWindow::SevenDays, dec!(7.777)),
            RawAssetRecord::new("eth", "Ethereum", dec!(1800.005)),
            RawAssetRecord::new("bch", "Bitcoin Cash", dec!(350))
                .with_change(ChangeWindow::TwentyFourHours, dec!(0)),
        ]
    }

    struct Harness {
        source: Arc<MockSource>,
        kv: Arc<InMemoryKeyValueStore>,
        favorites: Arc<FavoritesService>,
        view_model: AssetListViewModel,
    }

    fn harness() -> Harness {
        harness_with_kv(Arc::new(InMemoryKeyValueStore::new()))
    }

    fn harness_with_kv(kv: Arc<InMemoryKeyValueStore>) -> Harness {
        let source = Arc::new(MockSource::new());
        let favorites = Arc::new(FavoritesService::new(Arc::new(
            KeyValueFavoritesStore::new(kv.clone()),
        )));
        let view_model = AssetListViewModel::new(source.clone(), favorites.clone());
        Harness {
            source,
            kv,
            favorites,
            view_model,
        }
    }

    fn names(view_model: &AssetListViewModel) -> Vec<String> {
        view_model
            .visible_assets()
            .into_iter()
            .map(|a| a.name)
            .collect()
    }

    fn assert_flags_match_favorites(h: &Harness) {
        for asset in h.view_model.assets() {
            assert_eq!(
                asset.is_favorite,
                h.favorites.is_favorite(&asset.id),
                "flag out of sync for {}",
                asset.id
            );
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    #[tokio::test]
    async fn test_starts_loading_and_empty() {
        let h = harness();
        assert_eq!(h.view_model.load_state(), LoadState::Loading);
        assert_eq!(h.view_model.status(), ListStatus::Loading);
        assert!(h.view_model.visible_assets().is_empty());
        assert!(h.view_model.last_refreshed_at().is_none());
        assert_eq!(h.source.calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_success_moves_to_ready() {
        let h = harness();
        h.source.push_ok(three_assets());

        let count = h.view_model.refresh().await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(h.view_model.load_state(), LoadState::Ready);
        assert_eq!(h.view_model.status(), ListStatus::Ready);
        assert!(h.view_model.last_refreshed_at().is_some());
        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Ethereum", "Bitcoin Cash"]);
    }

    #[tokio::test]
    async fn test_refresh_tags_stored_favorites() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entry(
            FAVORITES_STORAGE_KEY,
            r#"[{"id":"eth"}]"#,
        ));
        let h = harness_with_kv(kv);
        h.source.push_ok(three_assets());

        h.view_model.refresh().await.unwrap();

        let flags: Vec<_> = h
            .view_model
            .visible_assets()
            .iter()
            .map(|a| a.is_favorite)
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_failed_first_refresh_stays_loading_with_retryable_error() {
        let h = harness();
        h.source.push_err(MarketDataError::Timeout {
            provider: "MOCK".to_string(),
        });

        let err = h.view_model.refresh().await.unwrap_err();

        assert!(matches!(err, Error::DataFetch(_)));
        assert!(err.is_retryable());
        assert_eq!(h.view_model.load_state(), LoadState::Loading);
        assert_eq!(
            h.view_model.status(),
            ListStatus::Error {
                message: "Timeout: MOCK".to_string(),
                retryable: true,
                has_data: false,
            }
        );
        assert!(h.view_model.visible_assets().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_visible_assets() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.source.push_err(MarketDataError::ProviderError {
            provider: "MOCK".to_string(),
            message: "HTTP 502".to_string(),
        });

        h.view_model.refresh().await.unwrap();
        h.view_model.set_filter("bit");
        let before = h.view_model.visible_assets();
        let refreshed_at = h.view_model.last_refreshed_at();

        assert!(h.view_model.refresh().await.is_err());

        assert_eq!(h.view_model.visible_assets(), before);
        assert_eq!(h.view_model.load_state(), LoadState::Ready);
        assert_eq!(h.view_model.last_refreshed_at(), refreshed_at);
        match h.view_model.status() {
            ListStatus::Error {
                retryable,
                has_data,
                ..
            } => {
                assert!(retryable);
                assert!(has_data);
            }
            other => panic!("expected error status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_successful_retry_clears_error() {
        let h = harness();
        h.source.push_err(MarketDataError::RateLimited {
            provider: "MOCK".to_string(),
        });
        h.source.push_ok(three_assets());

        assert!(h.view_model.refresh().await.is_err());
        assert!(h.view_model.last_error().is_some());

        h.view_model.refresh().await.unwrap();
        assert!(h.view_model.last_error().is_none());
        assert_eq!(h.view_model.status(), ListStatus::Ready);
    }

    #[tokio::test]
    async fn test_malformed_response_is_not_retryable() {
        let h = harness();
        h.source.push_err(MarketDataError::MalformedResponse {
            provider: "MOCK".to_string(),
            message: "expected array".to_string(),
        });

        let err = h.view_model.refresh().await.unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(h.view_model.last_error().map(|f| f.retryable), Some(false));
    }

    // =========================================================================
    // Filter
    // =========================================================================

    #[tokio::test]
    async fn test_empty_filter_shows_everything_in_order() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        h.view_model.set_filter("bit");
        h.view_model.set_filter("");

        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Ethereum", "Bitcoin Cash"]);
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_substring_and_stable() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        h.view_model.set_filter("bit");
        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Bitcoin Cash"]);

        h.view_model.set_filter("BiT");
        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Bitcoin Cash"]);

        h.view_model.set_filter("ereum");
        assert_eq!(names(&h.view_model), vec!["Ethereum"]);
    }

    #[tokio::test]
    async fn test_set_filter_does_not_fetch() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        h.view_model.set_filter("eth");
        h.view_model.set_filter("");
        h.view_model.set_filter("cash");

        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.view_model.filter(), "cash");
        assert_eq!(h.view_model.assets().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_survives_refresh() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.source.push_ok(vec![
            RawAssetRecord::new("btc", "Bitcoin", dec!(65000)),
            RawAssetRecord::new("doge", "Dogecoin", dec!(0.1)),
        ]);

        h.view_model.refresh().await.unwrap();
        h.view_model.set_filter("coin");
        h.view_model.refresh().await.unwrap();

        assert_eq!(h.view_model.filter(), "coin");
        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Dogecoin"]);
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    #[tokio::test]
    async fn test_toggle_marks_asset_and_persists() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        assert!(h.view_model.toggle_favorite("btc").unwrap());

        let btc = h
            .view_model
            .visible_assets()
            .into_iter()
            .find(|a| a.id == "btc")
            .unwrap();
        assert!(btc.is_favorite);
        assert_flags_match_favorites(&h);

        // A fresh store over the same slot sees the entry.
        let reloaded = KeyValueFavoritesStore::new(h.kv.clone()).load();
        assert!(reloaded.iter().any(|e| e.id == "btc"));
        assert!(h.kv.get(FAVORITES_STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_toggle_does_not_fetch_or_change_prices() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();
        let before = h.view_model.assets();

        h.view_model.toggle_favorite("eth").unwrap();

        assert_eq!(h.source.calls(), 1);
        for (after, before) in h.view_model.assets().iter().zip(before.iter()) {
            assert_eq!(after.price, before.price);
            assert_eq!(after.change_1h, before.change_1h);
            assert_eq!(after.change_24h, before.change_24h);
            assert_eq!(after.change_7d, before.change_7d);
        }
    }

    #[tokio::test]
    async fn test_double_toggle_restores_flags_and_store() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();
        let before = h.view_model.visible_assets();

        assert!(h.view_model.toggle_favorite("bch").unwrap());
        assert!(!h.view_model.toggle_favorite("bch").unwrap());

        assert_eq!(h.view_model.visible_assets(), before);
        assert!(h.favorites.favorites().is_empty());
        assert!(KeyValueFavoritesStore::new(h.kv.clone()).load().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_hidden_asset_still_works() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();
        h.view_model.set_filter("ether");

        assert!(h.view_model.toggle_favorite("btc").unwrap());
        assert!(h.favorites.is_favorite("btc"));

        h.view_model.set_filter("");
        assert!(h.view_model.visible_assets()[0].is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_unknown_asset_is_not_found() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        let err = h.view_model.toggle_favorite("sol").unwrap_err();
        assert!(matches!(err, Error::AssetNotFound(ref id) if id == "sol"));
        assert!(h.favorites.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_flag_carries_across_refresh() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        h.view_model.toggle_favorite("eth").unwrap();
        h.view_model.refresh().await.unwrap();

        assert_flags_match_favorites(&h);
        assert!(h.view_model.assets()[1].is_favorite);
    }

    // =========================================================================
    // Interleaving with an outstanding refresh
    // =========================================================================

    #[tokio::test]
    async fn test_filter_set_during_refresh_is_kept() {
        let h = harness();
        h.source.push_ok(three_assets());
        let release = h.source.gate_next_call();

        let (result, ()) = tokio::join!(h.view_model.refresh(), async {
            h.view_model.set_filter("bit");
            let _ = release.send(());
        });

        result.unwrap();
        assert_eq!(h.view_model.filter(), "bit");
        assert_eq!(names(&h.view_model), vec!["Bitcoin", "Bitcoin Cash"]);
    }

    #[tokio::test]
    async fn test_toggle_during_refresh_is_reflected_in_new_rows() {
        let h = harness();
        h.source.push_ok(three_assets());
        h.source.push_ok(three_assets());
        h.view_model.refresh().await.unwrap();

        let release = h.source.gate_next_call();
        let (result, toggled) = tokio::join!(h.view_model.refresh(), async {
            let toggled = h.view_model.toggle_favorite("btc");
            let _ = release.send(());
            toggled
        });

        result.unwrap();
        assert!(toggled.unwrap());
        assert!(h.view_model.assets()[0].is_favorite);
        assert_flags_match_favorites(&h);
    }

    #[tokio::test]
    async fn test_superseded_refresh_result_still_applies() {
        let h = harness();
        // First call gets the old list but is held back; second call
        // completes first with the newer list.
        h.source.push_ok(vec![RawAssetRecord::new("old", "Old Coin", dec!(1))]);
        h.source.push_ok(vec![RawAssetRecord::new("new", "New Coin", dec!(2))]);
        let release = h.source.gate_next_call();

        let (first, second) = tokio::join!(h.view_model.refresh(), async {
            let second = h.view_model.refresh().await;
            let _ = release.send(());
            second
        });

        first.unwrap();
        second.unwrap();
        assert_eq!(names(&h.view_model), vec!["Old Coin"]);
    }
}
