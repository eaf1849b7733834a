pub mod cli;
pub mod run;
pub mod run_import_catalog;
pub mod run_scrape;
pub mod show_catalog_stats;
