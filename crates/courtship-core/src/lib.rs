//! Environment, pairing protocol, and round cycle for the Courtship
//! mate-choice simulation.
//!
//! This crate orchestrates the Kalick–Hamilton experiment: it owns the
//! population and its round pools, runs one date per agent per round,
//! turns couples over into fresh replacements, and records every
//! coupling for the attractiveness-correlation analysis.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic round counter.
//! - [`config`] -- Configuration loading from `courtship-config.yaml`
//!   into strongly-typed structs.
//! - [`environment`] -- Population, round pools, grid, and schedule.
//! - [`pairing`] -- Partner search, mutual evaluation, and turnover.
//! - [`portrayal`] -- [`Portrayal`] trait and [`NoOpPortrayal`].
//! - [`recorder`] -- [`CoupleRecorder`] trait, [`MemoryRecorder`], and
//!   the partner-correlation observable.
//! - [`runner`] -- Bounded runs with collapse detection.
//! - [`schedule`] -- Repeating invocation schedule with cancellation.
//! - [`tick`] -- One full schedule pass over the population.
//!
//! [`Portrayal`]: portrayal::Portrayal
//! [`NoOpPortrayal`]: portrayal::NoOpPortrayal
//! [`CoupleRecorder`]: recorder::CoupleRecorder
//! [`MemoryRecorder`]: recorder::MemoryRecorder

pub mod clock;
pub mod config;
pub mod environment;
pub mod pairing;
pub mod portrayal;
pub mod recorder;
pub mod runner;
pub mod schedule;
pub mod tick;
