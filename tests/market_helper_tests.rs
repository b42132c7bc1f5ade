//! Full runs: watch, snapshot, extract, export
use market_helper_lib::application::MarketHelper;
use market_helper_lib::application::export::{read_result, write_result};
use market_helper_lib::infrastructure::config::AppConfig;
use market_helper_lib::infrastructure::live_page::StaticPage;
use market_helper_lib::test_utils::{ScriptedPage, ancestor_item, listing_page, trigger_item};
use tempfile::TempDir;

fn listing() -> String {
    listing_page(&[
        ancestor_item("Fire Core", "Ancestor Core", "Red", &["(+)Power [10-20]", "(-)Speed [1-2]"], &["120", "Gold"]),
        trigger_item("Overload", "Trigger Module", &[("Damage (10-20)", "+15")]),
    ])
}

#[tokio::test(start_paused = true)]
async fn run_extracts_after_listing_settles() {
    let helper = MarketHelper::new(&AppConfig::default()).unwrap();
    let page = ScriptedPage::new(vec![1, 2, 2, 2, 2]).with_html(listing());

    let report = helper.run(&page).await;

    assert!(report.stability.is_stable());
    assert_eq!(report.stability.ticks(), 5);
    assert_eq!(report.result.schema_counts(), (1, 1));
    let modules = report.result.modules().unwrap();
    assert_eq!(modules[0].price, "120 Gold");
    assert_eq!(modules[1].attributes, vec!["Damage"]);
}

#[tokio::test(start_paused = true)]
async fn run_still_extracts_when_watch_gives_up() {
    let mut config = AppConfig::default();
    config.watcher.max_ticks = Some(3);
    let helper = MarketHelper::new(&config).unwrap();
    let page = ScriptedPage::new(vec![2]).with_loader(vec![true]).with_html(listing());

    let report = helper.run(&page).await;

    assert!(!report.stability.is_stable());
    assert_eq!(report.result.modules().map(<[_]>::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn missing_container_yields_single_error() {
    let helper = MarketHelper::new(&AppConfig::default()).unwrap();
    let page = StaticPage::new("<html><body><p>maintenance</p></body></html>");

    let report = helper.run(&page).await;

    assert!(report.stability.is_stable());
    assert!(report.result.is_error());
    assert!(report.result.modules().is_none());
    assert!(report.result.error().unwrap().contains(".items"));
}

#[tokio::test]
async fn exported_records_use_flat_camel_case_list() {
    let helper = MarketHelper::new(&AppConfig::default()).unwrap();
    let result = helper.extract_snapshot(&listing());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("market_data.json");
    write_result(&result, &path, false).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["socketType"], "Red");
    assert_eq!(first["stats"][0]["positive"], true);
    assert_eq!(first["sellerName"], "");

    assert_eq!(read_result(&path).await.unwrap(), result);
}
