//! Color helpers for CLI output, using owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

pub struct Style;

impl Style {
    /// Section headers such as "Current defaults".
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Keys such as "provider" or "trigger".
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values: provider names, models, words.
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Paths, endpoints and other supplementary info.
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Language codes.
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }
}
