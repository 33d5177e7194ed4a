//! Lendcast: loan default classifier library
//!
//! Trains, persists, reloads, and evaluates three binary classifiers
//! (logistic regression, KNN, decision tree) that predict loan default from
//! tabular loan-application features, all behind one pipeline contract.

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
