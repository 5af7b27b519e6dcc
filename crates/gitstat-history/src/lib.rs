//! Git history aggregation: contributors, branches, file types, churn
//! hotspots, and author activity.
//!
//! Reads the text streams produced by a [`source::HistorySource`], folds
//! them into capped, insertion-ordered collections, scores and ranks them,
//! and hands back a [`collect::RepoStats`] ready for rendering.

pub mod activity;
pub mod aggregate;
pub mod collect;
pub mod collection;
pub mod hotspots;
pub mod parse;
pub mod rank;
pub mod source;
