//! Integration tests for crawl-ledger
//!
//! These drive the public API against on-disk ledgers in temporary
//! directories, the way a host crawler would across restarts.

mod ledger_tests;
