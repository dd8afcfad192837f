//! Article catalog: metadata for the stock items the ledger references.
//!
//! The catalog owns names, references, pricing and alert thresholds. It
//! never computes stock; balances are derived from the movement ledger.

pub mod article;

pub use article::{Article, ArticleDraft, ArticleUpdate, PricingInfo, DEFAULT_ALERT_THRESHOLD};
