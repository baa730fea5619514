//! CLI subcommands

pub mod clean;
pub mod list;
pub mod new;
pub mod sitemap;
