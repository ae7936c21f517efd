//! Integration tests for Page-Keeper
//!
//! These tests use wiremock to create mock HTTP servers and run the whole
//! pipeline end to end, writing pages into temporary directories.

mod support;
