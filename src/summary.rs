use serde::{Deserialize, Serialize};

/// Structured summary returned by the backend. Field names match the wire
/// format so the value round-trips through serde unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, specta::Type)]
pub struct Summary {
    #[serde(default)]
    pub initial_bullet_summary: Vec<String>,
    #[serde(default)]
    pub user_customized_summary: String,
    #[serde(default)]
    pub clarifications_or_notes: Vec<String>,
}

const EXPORT_DISCLAIMER: &str =
    "This summary was generated automatically and may have been edited for clarity.";

/// Render a summary as the plain-text block shared by the clipboard, file
/// download, and email exports. Pure and deterministic.
pub fn format_summary_for_email(summary: &Summary) -> String {
    let mut body = String::from("MEETING SUMMARY\n\n");

    body.push_str("KEY POINTS:\n");
    for (index, point) in summary.initial_bullet_summary.iter().enumerate() {
        body.push_str(&format!("{}. {}\n", index + 1, point));
    }

    body.push_str("\nDETAILED SUMMARY:\n");
    body.push_str(&summary.user_customized_summary);
    body.push_str("\n\n");

    if !summary.clarifications_or_notes.is_empty() {
        body.push_str("ADDITIONAL NOTES:\n");
        for note in &summary.clarifications_or_notes {
            body.push_str(&format!("• {}\n", note));
        }
        body.push('\n');
    }

    body.push_str(EXPORT_DISCLAIMER);

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> Summary {
        Summary {
            initial_bullet_summary: vec![
                "Budget approved for Q3".to_string(),
                "Launch moved to September".to_string(),
            ],
            user_customized_summary: "The team agreed on the Q3 budget and a new launch date."
                .to_string(),
            clarifications_or_notes: vec!["Pending sign-off from finance".to_string()],
        }
    }

    #[test]
    fn test_format_numbers_bullets_in_order() {
        let text = format_summary_for_email(&sample_summary());
        assert!(text.starts_with("MEETING SUMMARY\n\nKEY POINTS:\n"));
        assert!(text.contains("1. Budget approved for Q3\n"));
        assert!(text.contains("2. Launch moved to September\n"));
    }

    #[test]
    fn test_format_includes_detailed_section_and_disclaimer() {
        let text = format_summary_for_email(&sample_summary());
        assert!(text
            .contains("\nDETAILED SUMMARY:\nThe team agreed on the Q3 budget and a new launch date.\n\n"));
        assert!(text.ends_with(EXPORT_DISCLAIMER));
    }

    #[test]
    fn test_format_notes_section_only_when_notes_exist() {
        let with_notes = format_summary_for_email(&sample_summary());
        assert!(with_notes.contains("ADDITIONAL NOTES:\n• Pending sign-off from finance\n"));

        let mut without_notes = sample_summary();
        without_notes.clarifications_or_notes.clear();
        let text = format_summary_for_email(&without_notes);
        assert!(!text.contains("ADDITIONAL NOTES:"));
    }

    #[test]
    fn test_format_is_deterministic() {
        let summary = sample_summary();
        assert_eq!(
            format_summary_for_email(&summary),
            format_summary_for_email(&summary)
        );
    }

    #[test]
    fn test_summary_deserializes_with_missing_notes() {
        let parsed: Summary = serde_json::from_value(serde_json::json!({
            "initial_bullet_summary": ["a", "b"],
            "user_customized_summary": "details"
        }))
        .unwrap();
        assert_eq!(parsed.initial_bullet_summary.len(), 2);
        assert!(parsed.clarifications_or_notes.is_empty());
    }
}
