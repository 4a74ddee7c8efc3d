use crawl_ledger::config::load_config;
use crawl_ledger::crawler::{process_page, LinkExtractor, PageResponse, StatsAggregator};
use crawl_ledger::output::{format_markdown_report, format_report, load_report};
use crawl_ledger::scope::{ScopePolicy, ScopeVerdict};
use crawl_ledger::storage::{SqliteStorage, Storage};
use std::path::Path;
use std::thread;
use tempfile::TempDir;

const FACULTY: &str = "https://www.ics.uci.edu/faculty/index.php";

/// Builds a page body comfortably above the short-body threshold
fn page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}"> link </a>"#, href))
        .collect();
    format!(
        "<html><head><title>UCI </title><script>var ignored = 1;</script></head>\
         <body><p> {} </p><nav>{}</nav>\
         <footer> Donald Bren School of Information and Computer Sciences </footer></body></html>",
        text, anchors
    )
}

fn open(path: &Path) -> SqliteStorage {
    SqliteStorage::new(path).unwrap()
}

#[test]
fn test_extraction_is_idempotent_across_restarts() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ledger.db");
    let extractor = LinkExtractor::default();
    let body = page(
        "Faculty directory",
        &["/people/alice", "https://www.cs.uci.edu/research?tab=2", "https://example.com/"],
    );
    let response = PageResponse::ok(FACULTY, FACULTY, body);

    let first = {
        let mut storage = open(&db);
        extractor.extract_links(&mut storage, FACULTY, &response).unwrap()
    };
    assert_eq!(
        first,
        vec![
            "https://www.ics.uci.edu/people/alice",
            "https://www.cs.uci.edu/research",
        ]
    );

    // A fresh handle sees the visited key written by the first one
    let mut storage = open(&db);
    let second = extractor.extract_links(&mut storage, FACULTY, &response).unwrap();
    assert!(second.is_empty());
    assert!(storage.load_visited().unwrap().contains(FACULTY));
}

#[test]
fn test_query_and_fragment_handling() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let url = "https://www.ics.uci.edu/page?x=1#frag";
    let body = page("Query handling", &["/other?y=2"]);

    let links = LinkExtractor::default()
        .extract_links(&mut storage, url, &PageResponse::ok(url, url, body))
        .unwrap();

    assert_eq!(links, vec!["https://www.ics.uci.edu/other"]);
    let visited = storage.load_visited().unwrap();
    assert!(visited.contains("https://www.ics.uci.edu/page?x=1"));
    assert_eq!(visited.len(), 1);
}

#[test]
fn test_error_status_leaves_ledger_untouched() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ledger.db");
    let mut storage = open(&db);
    let body = page("gone", &["/x"]).into_bytes();
    let response = PageResponse::new(FACULTY, FACULTY, 404, Some(body));

    let outcome = process_page(
        &mut storage,
        &LinkExtractor::default(),
        &StatsAggregator::new(),
        FACULTY,
        &response,
    )
    .unwrap();

    assert!(outcome.links.is_empty());
    assert!(outcome.summary.is_none());
    let report = load_report(&storage, 50).unwrap();
    assert_eq!(report.unique_pages, 0);
    assert!(report.last_updated.is_none());
}

#[test]
fn test_statistics_survive_restart_and_report() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ledger.db");
    let extractor = LinkExtractor::default();
    let aggregator = StatsAggregator::new();

    {
        let mut storage = open(&db);
        let body = page("Machine learning machine learning seminar", &["/seminars"]);
        let response = PageResponse::ok(FACULTY, FACULTY, body);
        process_page(&mut storage, &extractor, &aggregator, FACULTY, &response).unwrap();
    }

    let stats_url = "https://www.stat.uci.edu/courses";
    {
        let mut storage = open(&db);
        let body = page("Bayesian statistics seminar", &[]);
        let response = PageResponse::ok(stats_url, stats_url, body);
        process_page(&mut storage, &extractor, &aggregator, stats_url, &response).unwrap();
    }

    let storage = open(&db);
    let report = load_report(&storage, 3).unwrap();

    assert_eq!(report.unique_pages, 2);
    assert_eq!(
        report.subdomains,
        vec![
            ("https://www.ics.uci.edu".to_string(), 1),
            ("https://www.stat.uci.edu".to_string(), 1),
        ]
    );
    let longest = report.longest_page.as_ref().unwrap();
    assert_eq!(longest.url, FACULTY);
    assert_eq!(longest.word_count, 13);
    assert_eq!(
        report.top_words,
        vec![
            ("uci".to_string(), 2),
            ("machine".to_string(), 2),
            ("learning".to_string(), 2),
        ]
    );

    let text = format_report(&report);
    assert!(text.contains("Unique pages: 2"));
    assert!(text.contains("https://www.stat.uci.edu, 1"));

    let markdown = format_markdown_report(&report);
    assert!(markdown.contains("| 1 | uci | 2 |"));
}

#[test]
fn test_configured_limits_drive_extraction() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ledger.toml");
    std::fs::write(
        &config_path,
        r#"
[extraction]
max-path-segments = 2

[scope]
allowed-domains = ["ics.uci.edu"]
extra-excluded-extensions = ["bib"]
"#,
    )
    .unwrap();
    let config = load_config(&config_path).unwrap();

    let policy = ScopePolicy::from_config(&config.scope);
    assert_eq!(
        policy.check("https://www.cs.uci.edu/").unwrap(),
        ScopeVerdict::OutsideAllowedDomains("www.cs.uci.edu".to_string())
    );

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let body = page(
        "Configured crawl",
        &["/a", "/a/b/c", "/papers.bib", "https://www.cs.uci.edu/x"],
    );
    let links = LinkExtractor::from_config(&config)
        .extract_links(&mut storage, FACULTY, &PageResponse::ok(FACULTY, FACULTY, body))
        .unwrap();

    assert_eq!(links, vec!["https://www.ics.uci.edu/a"]);
}

#[test]
fn test_concurrent_workers_do_not_lose_updates() {
    const WORKERS: usize = 4;
    const PAGES_PER_WORKER: usize = 10;

    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ledger.db");
    // Create the schema before the workers race to open it
    open(&db);

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let db = db.clone();
            thread::spawn(move || {
                let mut storage = open(&db);
                let extractor = LinkExtractor::default();
                let aggregator = StatsAggregator::new();

                for n in 0..PAGES_PER_WORKER {
                    let url = format!("https://www.ics.uci.edu/w{}/p{}", worker, n);
                    let response = PageResponse::ok(url.as_str(), url.as_str(), page("shared", &[]));
                    process_page(&mut storage, &extractor, &aggregator, &url, &response).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let storage = open(&db);
    let stats = storage.load_stats().unwrap();
    let total = (WORKERS * PAGES_PER_WORKER) as u64;

    assert_eq!(storage.load_visited().unwrap().len(), WORKERS * PAGES_PER_WORKER);
    assert_eq!(stats.subdomain_counts["https://www.ics.uci.edu"], total);
    assert_eq!(stats.word_frequency.get("shared"), total);
}
