//! Batch result types

use serde::Serialize;

use crate::features::lowering::ConversionResult;
use crate::shared::models::ReasonCode;

/// Outcome of converting many files, in input order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<ConversionResult>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.results.iter().filter(|r| r.is_converted()).count()
    }

    pub fn bailed(&self) -> usize {
        self.results.iter().filter(|r| r.is_bailed()).count()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Bail counts per reason code, most frequent first
    pub fn bail_reasons(&self) -> Vec<(ReasonCode, usize)> {
        let mut counts: Vec<(ReasonCode, usize)> = Vec::new();
        for report in self.results.iter().filter_map(ConversionResult::bail) {
            let reason = report.diagnostic.reason_code;
            match counts.iter_mut().find(|(code, _)| *code == reason) {
                Some((_, n)) => *n += 1,
                None => counts.push((reason, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
