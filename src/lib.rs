//! Build Advisor - PC component recommendation service
//!
//! This library turns a free-text description of a desired PC build into
//! typed per-component requirements, narrows five static hardware catalogs
//! with those requirements, and asks a language model to pick one compatible
//! part per category from the resulting shortlists.

pub mod agent;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod enumeration;
pub mod extraction;
pub mod filter;
pub mod logging;
pub mod recommend;
pub mod requirements;
