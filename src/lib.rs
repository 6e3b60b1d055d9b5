//! A Discord bot that posts TMDB movie listings.
//!
//! Each slash command fetches one listing page from TMDB ([`tmdb`]), turns the results into
//! cards ([`presenter`]) and sends them back through a [`presenter::CardSink`]. The glue for a
//! single invocation lives in [`listing`]; the Discord side lives in [`commands`].

pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod formatting;
pub mod genres;
pub mod listing;
pub mod models;
pub mod presenter;
pub mod tmdb;
