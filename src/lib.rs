//! Background-refreshed Pokémon lookup cache with fuzzy name resolution.
//!
//! `poke-index` keeps a complete snapshot of records in memory, replaces it
//! wholesale on a fixed interval from a [`provider::DataProvider`], and
//! resolves misspelled names to the closest record by case-insensitive
//! Levenshtein distance, memoizing each resolution until the next refresh.

pub mod cache;
pub mod command;
pub mod config;
pub mod lookup;
pub mod provider;
pub mod refresh;
pub mod resolve;
pub mod types;

pub use lookup::LookupCache;
