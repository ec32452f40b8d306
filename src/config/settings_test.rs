// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use std::time::Duration;

// Defaults and env overrides share one test so the SPIDERD__ variables
// cannot leak into a concurrently running default-value assertion.
#[test]
fn test_settings_defaults_and_env_override() {
    let settings = Settings::new().expect("defaults must load without any config file");
    assert_eq!(settings.crawler.crawl_limit, 1);
    assert_eq!(settings.crawler.num_workers, 100);
    assert_eq!(settings.crawler.crawl_delay_secs, 0);
    assert_eq!(settings.crawler.crawl_delay(), Duration::from_secs(0));
    assert!(settings.crawler.seed_params.is_none());
    assert_eq!(settings.queues.request_depth, 10);
    assert_eq!(settings.queues.response_depth, 15);
    assert_eq!(settings.http.timeout_secs, 10);
    assert_eq!(settings.http.timeout(), Duration::from_secs(10));

    std::env::set_var("SPIDERD__CRAWLER__CRAWL_LIMIT", "5");
    std::env::set_var("SPIDERD__CRAWLER__NUM_WORKERS", "8");
    std::env::set_var("SPIDERD__QUEUES__REQUEST_DEPTH", "2");

    let settings = Settings::new().expect("env overlay must load");
    assert_eq!(settings.crawler.crawl_limit, 5);
    assert_eq!(settings.crawler.num_workers, 8);
    assert_eq!(settings.queues.request_depth, 2);
    // Untouched keys keep their defaults
    assert_eq!(settings.queues.response_depth, 15);

    std::env::remove_var("SPIDERD__CRAWLER__CRAWL_LIMIT");
    std::env::remove_var("SPIDERD__CRAWLER__NUM_WORKERS");
    std::env::remove_var("SPIDERD__QUEUES__REQUEST_DEPTH");
}
