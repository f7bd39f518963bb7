//! Wire types for the template service endpoints.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the user wants the current template modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinementKind {
    #[serde(rename = "Add Section")]
    AddSection,
    #[serde(rename = "Refine Pitch")]
    RefinePitch,
    #[serde(rename = "Expand Company Details")]
    ExpandCompanyDetails,
    #[serde(rename = "Graph Visualization")]
    GraphVisualization,
    #[serde(rename = "Other")]
    Other,
}

impl RefinementKind {
    pub const ALL: [RefinementKind; 5] = [
        RefinementKind::AddSection,
        RefinementKind::RefinePitch,
        RefinementKind::ExpandCompanyDetails,
        RefinementKind::GraphVisualization,
        RefinementKind::Other,
    ];

    /// Label as sent on the wire and shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            RefinementKind::AddSection => "Add Section",
            RefinementKind::RefinePitch => "Refine Pitch",
            RefinementKind::ExpandCompanyDetails => "Expand Company Details",
            RefinementKind::GraphVisualization => "Graph Visualization",
            RefinementKind::Other => "Other",
        }
    }

    /// Graph Visualization takes a chart topic instead of free text.
    pub fn takes_topic(&self) -> bool {
        matches!(self, RefinementKind::GraphVisualization)
    }
}

/// Chart topics offered for the Graph Visualization refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartTopic {
    #[serde(rename = "Revenue Over Time")]
    Revenue,
    #[serde(rename = "Net Income Over Time")]
    NetIncome,
    #[serde(rename = "Market Size & Forecasts")]
    MarketSize,
    #[serde(rename = "Employee Growth Over Time")]
    EmployeeGrowth,
    #[serde(rename = "Online Review Sentiment Over Time")]
    ReviewSentiment,
}

impl ChartTopic {
    pub const ALL: [ChartTopic; 5] = [
        ChartTopic::Revenue,
        ChartTopic::NetIncome,
        ChartTopic::MarketSize,
        ChartTopic::EmployeeGrowth,
        ChartTopic::ReviewSentiment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartTopic::Revenue => "Revenue Over Time",
            ChartTopic::NetIncome => "Net Income Over Time",
            ChartTopic::MarketSize => "Market Size & Forecasts",
            ChartTopic::EmployeeGrowth => "Employee Growth Over Time",
            ChartTopic::ReviewSentiment => "Online Review Sentiment Over Time",
        }
    }
}

/// Output formats accepted by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Txt];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "Word (DOCX)",
            ExportFormat::Txt => "Text (TXT)",
        }
    }

    /// Fixed name for the downloaded file.
    pub fn filename(&self) -> String {
        format!("consulting_template.{}", self.extension())
    }
}

/// Body for `POST /generate-template`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub company_name: String,
    pub task_or_domain: String,
}

/// Body for `POST /refine-template`.
///
/// `visualize_data` rides along only for the Graph Visualization kind;
/// `refinement_prompt` is always present (empty for that kind).
#[derive(Debug, Clone, Serialize)]
pub struct RefineRequest {
    pub template: String,
    pub refinement_option: RefinementKind,
    pub refinement_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualize_data: Option<ChartTopic>,
}

/// Body for `POST /export-template`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub template: String,
    pub format: ExportFormat,
    pub company_name: String,
    pub task_or_domain: String,
}

/// Events emitted by a streaming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A decoded piece of the response body, in order.
    Chunk(String),
    /// The stream ended cleanly.
    Done,
    /// The request or the read loop failed; the stream is over.
    Error(String),
}
