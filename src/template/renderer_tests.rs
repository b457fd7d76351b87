//! Tests for `HandlebarsRenderer`.

use serde_json::{Value, json};

use super::*;

fn summary_variables() -> Value {
    json!({
        "id": "abc123",
        "namespace": "company.team",
        "flow_id": "deploy",
        "link": "https://kestra.example.com/ui/executions/company.team/deploy/abc123",
        "status": "SUCCESS",
        "start_date": "2024-05-01T10:00:00Z",
        "duration": "PT1M30S",
    })
}

mod bundled_template {
    use super::*;

    #[test]
    fn is_registered_on_construction() {
        let renderer = HandlebarsRenderer::new().unwrap();

        assert!(renderer.has_template(SUMMARY_TEMPLATE));
    }

    #[test]
    fn renders_every_execution_field() {
        let renderer = HandlebarsRenderer::new().unwrap();

        let text = renderer.render(SUMMARY_TEMPLATE, &summary_variables()).unwrap();

        assert!(text.starts_with("Execution abc123 SUCCESS"));
        assert!(text.contains("Namespace: company.team"));
        assert!(text.contains("Flow: deploy"));
        assert!(text.contains("Started: 2024-05-01T10:00:00Z"));
        assert!(text.contains("Duration: PT1M30S"));
        assert!(text.contains("https://kestra.example.com/ui/executions/company.team/deploy/abc123"));
    }

    #[test]
    fn omits_flow_line_when_flow_id_is_null() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut variables = summary_variables();
        variables["flow_id"] = Value::Null;

        let text = renderer.render(SUMMARY_TEMPLATE, &variables).unwrap();

        assert!(!text.contains("Flow:"));
    }

    #[test]
    fn does_not_html_escape() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut variables = summary_variables();
        variables["link"] = json!("https://example.com/?a=1&b=<2>");

        let text = renderer.render(SUMMARY_TEMPLATE, &variables).unwrap();

        assert!(text.contains("https://example.com/?a=1&b=<2>"));
    }

    #[test]
    fn missing_variable_is_an_error() {
        let renderer = HandlebarsRenderer::new().unwrap();

        let err = renderer
            .render(SUMMARY_TEMPLATE, &json!({"id": "abc123"}))
            .unwrap_err();

        assert!(matches!(err, TemplateError::Render { ref template, .. } if template == SUMMARY_TEMPLATE));
    }
}

mod named_templates {
    use super::*;

    #[test]
    fn unknown_name_is_not_found() {
        let renderer = HandlebarsRenderer::new().unwrap();

        let err = renderer.render("slack", &json!({})).unwrap_err();

        assert_eq!(
            err,
            TemplateError::NotFound {
                template: "slack".to_string()
            }
        );
    }

    #[test]
    fn registered_template_renders() {
        let mut renderer = HandlebarsRenderer::new().unwrap();
        renderer.register("short", "{{id}} is {{status}}").unwrap();

        let text = renderer.render("short", &summary_variables()).unwrap();

        assert_eq!(text, "abc123 is SUCCESS");
    }

    #[test]
    fn register_replaces_existing_template() {
        let mut renderer = HandlebarsRenderer::new().unwrap();
        renderer.register(SUMMARY_TEMPLATE, "{{id}}").unwrap();

        let text = renderer.render(SUMMARY_TEMPLATE, &summary_variables()).unwrap();

        assert_eq!(text, "abc123");
    }

    #[test]
    fn syntax_error_is_invalid() {
        let mut renderer = HandlebarsRenderer::new().unwrap();

        let err = renderer.register("broken", "{{#if id}}unclosed").unwrap_err();

        assert!(matches!(err, TemplateError::Invalid { ref template, .. } if template == "broken"));
    }
}

mod inline {
    use super::*;

    #[test]
    fn renders_inline_template() {
        let renderer = HandlebarsRenderer::new().unwrap();

        let text = renderer
            .render_str("{{namespace}}/{{id}}", &summary_variables())
            .unwrap();

        assert_eq!(text, "company.team/abc123");
    }

    #[test]
    fn strict_mode_rejects_undefined_variable() {
        let renderer = HandlebarsRenderer::new().unwrap();

        let err = renderer.render_str("{{nope}}", &json!({})).unwrap_err();

        assert!(matches!(err, TemplateError::Render { ref template, .. } if template == "inline"));
    }

    #[test]
    fn renderer_is_usable_as_trait_object() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let dynamic: &dyn TemplateRenderer = &renderer;

        assert_eq!(dynamic.render_str("plain", &json!({})).unwrap(), "plain");
    }
}
