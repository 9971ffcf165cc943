use crate::{db::sort::SortColumn, value::SortValueKind};
use serde::{Deserialize, Serialize};

///
/// SpanSortColumn
///
/// Native sort keys of span listings.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanSortColumn {
    StartTime,
    EndTime,
    LatencyMs,
    TokenCountTotal,
    TokenCountPrompt,
    TokenCountCompletion,
    CumulativeTokenCountTotal,
    CumulativeTokenCountPrompt,
    CumulativeTokenCountCompletion,
}

impl SpanSortColumn {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
            Self::LatencyMs => "latency_ms",
            Self::TokenCountTotal => "llm_token_count_total",
            Self::TokenCountPrompt => "llm_token_count_prompt",
            Self::TokenCountCompletion => "llm_token_count_completion",
            Self::CumulativeTokenCountTotal => "cumulative_llm_token_count_total",
            Self::CumulativeTokenCountPrompt => "cumulative_llm_token_count_prompt",
            Self::CumulativeTokenCountCompletion => "cumulative_llm_token_count_completion",
        }
    }

    #[must_use]
    pub const fn kind(self) -> SortValueKind {
        match self {
            Self::StartTime | Self::EndTime => SortValueKind::DateTime,
            Self::LatencyMs => SortValueKind::Float,
            Self::TokenCountTotal
            | Self::TokenCountPrompt
            | Self::TokenCountCompletion
            | Self::CumulativeTokenCountTotal
            | Self::CumulativeTokenCountPrompt
            | Self::CumulativeTokenCountCompletion => SortValueKind::Int,
        }
    }
}

impl From<SpanSortColumn> for SortColumn {
    fn from(column: SpanSortColumn) -> Self {
        Self::native(column.name(), column.kind())
    }
}

///
/// SessionSortColumn
///
/// Native sort keys of session listings.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionSortColumn {
    StartTime,
    EndTime,
    TokenCountTotal,
    NumTraces,
}

impl SessionSortColumn {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
            Self::TokenCountTotal => "token_count_total",
            Self::NumTraces => "num_traces",
        }
    }

    #[must_use]
    pub const fn kind(self) -> SortValueKind {
        match self {
            Self::StartTime | Self::EndTime => SortValueKind::DateTime,
            Self::TokenCountTotal | Self::NumTraces => SortValueKind::Int,
        }
    }
}

impl From<SessionSortColumn> for SortColumn {
    fn from(column: SessionSortColumn) -> Self {
        Self::native(column.name(), column.kind())
    }
}

///
/// TESTS
///
