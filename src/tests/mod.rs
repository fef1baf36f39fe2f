#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    use reqwest::StatusCode;

    use crate::formatters::{
        change_is_positive, fmt_brl, fmt_change, fmt_usd, group_thousands, spark_rising,
        sparkline, SPARK_FLAT, SPARK_GLYPHS,
    };
    use crate::models::{
        Coin, CoinDetail, CoinDetailResponse, CoinPrice, MarketChartResponse, PriceSnapshot,
    };
    use crate::state::{DashboardState, RefreshTimer};
    use crate::utils::coingecko::FetchError;

    fn fetch_failure() -> FetchError {
        FetchError::Status(StatusCode::BAD_GATEWAY)
    }

    fn snapshot_with_usd(usd: f64) -> PriceSnapshot {
        let mut snapshot = HashMap::new();
        snapshot.insert(
            "bitcoin".to_string(),
            CoinPrice {
                usd,
                brl: usd * 5.0,
                usd_24h_change: 1.0,
                usd_24h_vol: 1_000_000.0,
                usd_market_cap: 2_000_000_000.0,
            },
        );
        snapshot
    }

    #[test]
    fn test_fmt_usd_billions() {
        assert_eq!(fmt_usd(1_500_000_000.0), "$1.50B");
    }

    #[test]
    fn test_fmt_usd_millions() {
        assert_eq!(fmt_usd(62_450_000.0), "$62.45M");
    }

    #[test]
    fn test_fmt_usd_thousands() {
        assert_eq!(fmt_usd(62_450.00), "$62,450.00");
    }

    #[test]
    fn test_fmt_usd_small() {
        assert_eq!(fmt_usd(0.5), "$0.5000");
    }

    #[test]
    fn test_fmt_brl() {
        assert_eq!(fmt_brl(312_250.00), "R$ 312,250.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(999.0, 2), "999.00");
        assert_eq!(group_thousands(21_000_000.0, 0), "21,000,000");
    }

    #[test]
    fn test_fmt_change_positive() {
        let result = fmt_change(2.3);
        assert!(result.contains('▲'));
        assert!(result.contains("2.30"));
        assert!(change_is_positive(2.3));
    }

    #[test]
    fn test_fmt_change_negative() {
        let result = fmt_change(-0.8);
        assert!(result.contains('▼'));
        assert!(result.contains("0.80"));
        assert!(!change_is_positive(-0.8));
    }

    #[test]
    fn test_fmt_change_zero_counts_as_up() {
        assert!(fmt_change(0.0).contains('▲'));
        assert!(change_is_positive(0.0));
    }

    #[test]
    fn test_sparkline_exact_width() {
        let series = vec![1.0, 5.0, 3.0, 8.0, 2.0, 9.0, 4.0];
        for width in [1, 5, 7, 20, 30] {
            let chart = sparkline(&series, width);
            assert_eq!(chart.chars().count(), width);
            assert!(chart.chars().all(|glyph| SPARK_GLYPHS.contains(&glyph)));
        }
    }

    #[test]
    fn test_sparkline_degenerate_series() {
        let flat: String = SPARK_FLAT.to_string().repeat(10);
        assert_eq!(sparkline(&[], 10), flat);
        assert_eq!(sparkline(&[42.0], 10), flat);
    }

    #[test]
    fn test_sparkline_constant_series() {
        // max == min must not divide by zero; all buckets land on the floor.
        let chart = sparkline(&[7.0, 7.0, 7.0, 7.0], 8);
        assert_eq!(chart, SPARK_GLYPHS[0].to_string().repeat(8));
    }

    #[test]
    fn test_sparkline_hits_extremes() {
        let chart = sparkline(&[0.0, 10.0], 2);
        let glyphs: Vec<char> = chart.chars().collect();
        assert_eq!(glyphs[0], SPARK_GLYPHS[0]);
        assert_eq!(glyphs[1], SPARK_GLYPHS[7]);
    }

    #[test]
    fn test_spark_rising() {
        assert!(spark_rising(&[1.0, 2.0, 3.0]));
        assert!(spark_rising(&[2.0, 9.0, 2.0]));
        assert!(!spark_rising(&[3.0, 2.0, 1.0]));
    }

    #[test]
    fn test_failed_price_fetch_keeps_snapshot() {
        let mut state = DashboardState::new();
        state.apply_prices(Ok(snapshot_with_usd(60_000.0)));
        assert!(state.healthy);
        let stamp = state.last_update.clone();

        state.apply_prices(Err(fetch_failure()));
        assert!(!state.healthy);
        let held = state.prices.as_ref().unwrap();
        assert_eq!(held["bitcoin"].usd, 60_000.0);
        assert_eq!(state.last_update, stamp);
    }

    #[test]
    fn test_successful_fetch_replaces_snapshot_wholesale() {
        let mut state = DashboardState::new();
        state.apply_prices(Ok(snapshot_with_usd(60_000.0)));
        state.apply_prices(Err(fetch_failure()));

        let mut replacement = HashMap::new();
        replacement.insert("ethereum".to_string(), CoinPrice::default());
        state.apply_prices(Ok(replacement));

        assert!(state.healthy);
        let held = state.prices.as_ref().unwrap();
        // Wholesale replacement: the old bitcoin entry must be gone.
        assert!(!held.contains_key("bitcoin"));
        assert!(held.contains_key("ethereum"));
    }

    #[test]
    fn test_startup_failure_leaves_entries_absent() {
        let mut state = DashboardState::new();
        state.apply_history(Coin::Bitcoin, Err(fetch_failure()));
        state.apply_detail(Coin::Bitcoin, Err(fetch_failure()));
        state.apply_prices(Err(fetch_failure()));

        assert!(state.histories.is_empty());
        assert!(state.details.is_empty());
        assert!(state.prices.is_none());
        assert!(!state.healthy);
    }

    #[test]
    fn test_one_coin_failure_does_not_touch_the_other() {
        let mut state = DashboardState::new();
        state.apply_history(Coin::Bitcoin, Ok(vec![1.0, 2.0]));
        state.apply_history(Coin::Ethereum, Ok(vec![3.0, 4.0]));

        state.apply_history(Coin::Bitcoin, Err(fetch_failure()));
        assert_eq!(state.histories[&Coin::Bitcoin], vec![1.0, 2.0]);
        assert_eq!(state.histories[&Coin::Ethereum], vec![3.0, 4.0]);

        state.apply_history(Coin::Ethereum, Ok(vec![5.0, 6.0]));
        assert_eq!(state.histories[&Coin::Bitcoin], vec![1.0, 2.0]);
        assert_eq!(state.histories[&Coin::Ethereum], vec![5.0, 6.0]);
    }

    #[test]
    fn test_one_coin_detail_failure_does_not_touch_the_other() {
        fn detail_with_ath(ath: f64) -> CoinDetail {
            CoinDetail {
                ath,
                atl: 1.0,
                circulating_supply: 1_000.0,
                max_supply: None,
            }
        }

        let mut state = DashboardState::new();
        state.apply_detail(Coin::Bitcoin, Ok(detail_with_ath(73_750.0)));
        state.apply_detail(Coin::Ethereum, Ok(detail_with_ath(4_878.0)));

        state.apply_detail(Coin::Ethereum, Err(fetch_failure()));
        assert_eq!(state.details[&Coin::Bitcoin].ath, 73_750.0);
        assert_eq!(state.details[&Coin::Ethereum].ath, 4_878.0);

        state.apply_detail(Coin::Bitcoin, Ok(detail_with_ath(80_000.0)));
        assert_eq!(state.details[&Coin::Bitcoin].ath, 80_000.0);
        assert_eq!(state.details[&Coin::Ethereum].ath, 4_878.0);
    }

    #[test]
    fn test_refresh_timer_fires_on_elapsed_wall_time() {
        let start = Instant::now();
        let mut timer = RefreshTimer {
            interval: Duration::from_secs(30),
            last_fired: start,
        };

        assert!(!timer.due(start));
        assert!(!timer.due(start + Duration::from_secs(29)));
        assert!(timer.due(start + Duration::from_secs(30)));
        // A missed tick keeps the timer due until it is fired.
        assert!(timer.due(start + Duration::from_secs(95)));

        timer.fire(start + Duration::from_secs(95));
        assert!(!timer.due(start + Duration::from_secs(100)));
        assert!(timer.due(start + Duration::from_secs(125)));
    }

    #[test]
    fn test_price_snapshot_deserialization() {
        let body = r#"{
            "bitcoin": {
                "usd": 62450.0,
                "brl": 312250.0,
                "usd_24h_change": 2.3,
                "usd_24h_vol": 31000000000.0,
                "usd_market_cap": 1230000000000.0
            },
            "ethereum": {"usd": 3100.5, "brl": 15502.5}
        }"#;
        let snapshot: PriceSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot["bitcoin"].usd, 62450.0);
        assert_eq!(snapshot["bitcoin"].usd_24h_change, 2.3);
        // Missing metrics default to zero instead of failing the parse.
        assert_eq!(snapshot["ethereum"].usd_24h_vol, 0.0);
    }

    #[test]
    fn test_market_chart_closing_prices() {
        let body = r#"{"prices": [[1700000000000, 61000.0], [1700086400000, 62500.0]]}"#;
        let chart: MarketChartResponse = serde_json::from_str(body).unwrap();
        assert_eq!(chart.closing_prices(), vec![61000.0, 62500.0]);
    }

    #[test]
    fn test_coin_detail_deserialization() {
        let body = r#"{
            "market_data": {
                "ath": {"usd": 73750.0},
                "atl": {"usd": 67.81},
                "circulating_supply": 19700000.0,
                "max_supply": 21000000.0
            }
        }"#;
        let detail: CoinDetail = serde_json::from_str::<CoinDetailResponse>(body)
            .unwrap()
            .into();
        assert_eq!(detail.ath, 73750.0);
        assert_eq!(detail.atl, 67.81);
        assert_eq!(detail.max_supply, Some(21000000.0));
    }

    #[test]
    fn test_coin_detail_null_max_supply() {
        let body = r#"{
            "market_data": {
                "ath": {"usd": 4878.26},
                "atl": {"usd": 0.43},
                "circulating_supply": 120000000.0,
                "max_supply": null
            }
        }"#;
        let detail: CoinDetail = serde_json::from_str::<CoinDetailResponse>(body)
            .unwrap()
            .into();
        assert_eq!(detail.max_supply, None);
    }

    #[test]
    fn test_coin_ids_are_fixed() {
        assert_eq!(Coin::ALL.len(), 2);
        assert_eq!(Coin::Bitcoin.id(), "bitcoin");
        assert_eq!(Coin::Ethereum.symbol(), "ETH");
    }

    mod proxy {
        use actix_web::{test, web::Data, App};
        use serde_json::Value;

        use crate::routes::{self, prices::StaticAssets};
        use crate::utils::coingecko::CoinGecko;

        // Nothing listens on the discard port, so every fetch fails fast.
        fn unreachable_client() -> CoinGecko {
            CoinGecko::with_base_url("http://127.0.0.1:9").unwrap()
        }

        #[actix_web::test]
        async fn test_prices_route_reports_upstream_failure_in_body() {
            let app = test::init_service(
                App::new()
                    .app_data(Data::new(unreachable_client()))
                    .configure(routes::prices::init),
            )
            .await;

            let req = test::TestRequest::get().uri("/api/prices").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["ok"], Value::Bool(false));
            assert!(!body["error"].as_str().unwrap().is_empty());
        }

        #[actix_web::test]
        async fn test_history_route_reports_upstream_failure_in_body() {
            let app = test::init_service(
                App::new()
                    .app_data(Data::new(unreachable_client()))
                    .configure(routes::prices::init),
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/api/history/bitcoin")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["ok"], Value::Bool(false));
            assert!(!body["error"].as_str().unwrap().is_empty());
        }

        #[actix_web::test]
        async fn test_index_serves_static_asset() {
            let app = test::init_service(
                App::new()
                    .app_data(Data::new(unreachable_client()))
                    .app_data(Data::new(StaticAssets::default()))
                    .configure(routes::prices::init),
            )
            .await;

            let req = test::TestRequest::get().uri("/").to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        #[actix_web::test]
        async fn test_index_missing_asset_fails_request_only() {
            let app = test::init_service(
                App::new()
                    .app_data(Data::new(unreachable_client()))
                    .app_data(Data::new(StaticAssets {
                        index_path: "static/does-not-exist.html".to_string(),
                    }))
                    .configure(routes::prices::init),
            )
            .await;

            let req = test::TestRequest::get().uri("/").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 500);
        }
    }
}
