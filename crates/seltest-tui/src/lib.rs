// ABOUTME: Seltest - terminal front end for the AI-powered Selenium test generator
// ABOUTME: Channel-based async architecture with Ratatui

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod run;
pub mod steps;
pub mod tui;
pub mod types;
pub mod ui;
