//! Core library components.
//!
//! This module contains the reusable logic for fetching credentials from
//! Vault, running commands inside a credential scope, and sequencing
//! Terraform steps.

pub mod config;
pub mod constants;
pub mod domain;
pub mod pipeline;
pub mod provisioner;
pub mod scope;
pub mod vault;
