use crate::error::SnippetError;
use std::fmt;

/// The pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ids,
    Properties,
    References,
    Zones,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ids => "ids",
            Stage::Properties => "properties",
            Stage::References => "references",
            Stage::Zones => "zones",
        };
        f.write_str(name)
    }
}

/// Collapses a stage result into its output string.
///
/// `Ok(None)` means the stage found nothing to rewrite; errors are logged and
/// the input is passed through untouched.
pub(crate) fn fail_soft(
    stage: Stage,
    content: &str,
    result: Result<Option<String>, SnippetError>,
) -> String {
    match result {
        Ok(Some(rewritten)) => {
            log::debug!("[{}] document rewritten", stage);
            rewritten
        }
        Ok(None) => {
            log::debug!("[{}] nothing to rewrite", stage);
            content.to_string()
        }
        Err(e) => {
            log::warn!("[{}] passing input through unchanged: {}", stage, e);
            content.to_string()
        }
    }
}
