//! `kube-score score --output-format json`: an array of
//! `{object_name, kind, file_name, checks:[{check:{name}, grade,
//! comments:[{summary}]}]}`. Only checks with `grade < 10` (kube-score's
//! "not OK" threshold) become events.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct KubeScoreJson;

impl Parser for KubeScoreJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "kube_score_json",
            display_name: "kube-score JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["kube_score", "kube-score"],
            command_patterns: &["kube-score score --output-format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("checks").is_some() && f.get("object_name").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for obj in &root {
            let object_name = obj.get("object_name").and_then(Value::as_str).unwrap_or_default();
            let kind = obj.get("kind").and_then(Value::as_str).unwrap_or_default();
            let file_name = obj.get("file_name").and_then(Value::as_str).unwrap_or_default();
            let checks = obj.get("checks").and_then(Value::as_array).cloned().unwrap_or_default();
            for check in &checks {
                let grade = check.get("grade").and_then(Value::as_i64).unwrap_or(10);
                if grade >= 10 {
                    continue;
                }
                let name = check.get("check").and_then(|c| c.get("name")).and_then(Value::as_str).unwrap_or_default();
                let summary = check
                    .get("comments")
                    .and_then(Value::as_array)
                    .and_then(|c| c.first())
                    .and_then(|c| c.get("summary"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();

                let mut event = ValidationEvent::new("kube_score", ValidationEventType::SecurityFinding);
                event.ref_file = file_name.to_string();
                event.function_name = format!("{kind}/{object_name}");
                event.error_code = name.to_string();
                event.message = summary.to_string();
                event.status = Some(if grade == 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = if grade == 0 { "error" } else { "warning" }.to_string();
                event.category = "kubernetes_config".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("kube_score", ValidationEventType::Summary).with_message("kube-score reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_fully_passing_checks() {
        let json = r#"[{"object_name":"web","kind":"Deployment","file_name":"deploy.yaml","checks":[
            {"check":{"name":"Container Resources"},"grade":0,"comments":[{"summary":"CPU limit is not set"}]},
            {"check":{"name":"Pod NetworkPolicy"},"grade":10,"comments":[]}
        ]}]"#;
        let decoder = KubeScoreJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].error_code, "Container Resources");
    }
}
