pub type ChimeraError = anyhow::Error;

pub use anyhow::anyhow as err;
pub use anyhow::{Context, bail};
use std::fmt::{Debug, Display, Formatter};

pub type ChimeraResult<T> = Result<T, ChimeraError>;

pub struct MietteReportError {
    report: miette::Report,
}

impl MietteReportError {
    pub fn report(&self) -> &miette::Report {
        &self.report
    }
}

impl From<miette::Report> for MietteReportError {
    fn from(report: miette::Report) -> Self {
        Self { report }
    }
}

impl Debug for MietteReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.report, f)
    }
}

impl Display for MietteReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.report, f)
    }
}

impl std::error::Error for MietteReportError {}

/// Error carrying a hint that is printed after the chain of causes.
#[derive(Debug)]
pub struct HelpError {
    pub message: String,
    pub help_message: String,
}

impl HelpError {
    pub fn new(message: impl Into<String>, help_message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help_message: help_message.into(),
        }
    }
}

impl Display for HelpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HelpError {}
