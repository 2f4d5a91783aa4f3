//! Usher - a terminal box office console for event ticketing.
//!
//! This library drives a terminal interface for the administrative side
//! of an event ticketing platform: events, artists, venues, promo codes,
//! and mock order generation, all against a hosted data API, with a
//! small local store for recent picker selections and generation
//! checkpoints.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`api`] - HTTP client for the table-query and RPC surface
//! * [`config`] - Application configuration management
//! * [`mock`] - Mock order planning and generation
//! * [`promo`] - Promo code validation and normalization
//! * [`search`] - Entity search sources used by the picker fields
//! * [`store`] - Local SQLite store for recents and progress snapshots
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Date/time parsing and formatting helpers

/// HTTP client, query filters, and object storage uploads
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for the local store's tables
pub mod entities;

/// Icon definitions for visual representation in the TUI
pub mod icons;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Image sniffing and resizing for uploads
pub mod media;

/// Mock order planning and generation
pub mod mock;

/// Row types shared between the API client and the UI
pub mod models;

/// Promo code validation rules
pub mod promo;

/// Repository layer for local store queries
pub mod repositories;

/// Search sources behind the picker fields
pub mod search;

/// Local store for recent selections and generation checkpoints
pub mod store;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and other helpers
pub mod utils;
