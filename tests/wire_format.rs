use consultgen::api::{
    ChartTopic, ExportFormat, ExportRequest, GenerateRequest, RefineRequest, RefinementKind,
};

#[test]
fn generate_request_body() {
    let request = GenerateRequest {
        company_name: "Acme Corp".to_string(),
        task_or_domain: "Supply chain audit".to_string(),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "company_name": "Acme Corp",
            "task_or_domain": "Supply chain audit",
        })
    );
}

#[test]
fn refine_request_body_free_text() {
    let request = RefineRequest {
        template: "# Current".to_string(),
        refinement_option: RefinementKind::ExpandCompanyDetails,
        refinement_prompt: "Add headcount and office locations".to_string(),
        visualize_data: None,
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "template": "# Current",
            "refinement_option": "Expand Company Details",
            "refinement_prompt": "Add headcount and office locations",
        })
    );
}

#[test]
fn refine_request_body_visualization() {
    let request = RefineRequest {
        template: "# Current".to_string(),
        refinement_option: RefinementKind::GraphVisualization,
        refinement_prompt: String::new(),
        visualize_data: Some(ChartTopic::EmployeeGrowth),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["refinement_option"], "Graph Visualization");
    assert_eq!(value["refinement_prompt"], "");
    assert_eq!(value["visualize_data"], "Employee Growth Over Time");
}

#[test]
fn export_request_body() {
    let request = ExportRequest {
        template: "# Done".to_string(),
        format: ExportFormat::Pdf,
        company_name: "Acme Corp".to_string(),
        task_or_domain: "Supply chain audit".to_string(),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "template": "# Done",
            "format": "pdf",
            "company_name": "Acme Corp",
            "task_or_domain": "Supply chain audit",
        })
    );
}

#[test]
fn every_refinement_kind_has_a_distinct_wire_label() {
    let mut labels: Vec<&str> = RefinementKind::ALL.iter().map(|k| k.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 5);
}

#[test]
fn chart_topics_cover_the_fixed_menu() {
    let labels: Vec<&str> = ChartTopic::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Revenue Over Time",
            "Net Income Over Time",
            "Market Size & Forecasts",
            "Employee Growth Over Time",
            "Online Review Sentiment Over Time",
        ]
    );
}

#[test]
fn export_filenames_follow_the_fixed_pattern() {
    for format in ExportFormat::ALL {
        assert_eq!(
            format.filename(),
            format!("consulting_template.{}", format.extension())
        );
    }
}
