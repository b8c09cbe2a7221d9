//! Error types

use std::io;

use thiserror::Error;

use crate::delivery::DeliveryError;

/// Errors from expanding the informative text format string
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("format string expects at least {expected} arguments, {given} given")]
    TooFewArguments { expected: usize, given: usize },
    #[error("format string consumes {expected} arguments, {given} given")]
    TooManyArguments { expected: usize, given: usize },
    #[error("conversion %{specifier} does not accept a {found} argument at position {position}")]
    TypeMismatch {
        specifier: char,
        position: usize,
        found: &'static str,
    },
    #[error("unknown conversion specifier %{0}")]
    UnknownSpecifier(char),
    #[error("conversion %{0} does not take a precision")]
    InvalidPrecision(char),
    #[error("format string ends with a bare %")]
    TrailingPercent,
}

/// Errors from presenting the reporter
#[derive(Debug, Error)]
pub enum ReporterError {
    /// The controller was asked to present or mutate while a
    /// presentation is active
    #[error("a report presentation is already in progress")]
    InvalidState,
    #[error("report delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
