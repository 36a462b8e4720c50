//! Metric projection: parsed document → status gauges.

use crate::status::{StatusCode, StatusDocument};

/// Destination of projected status values.
pub trait StatusSink {
    fn overall(&mut self, service: &str, status_page_url: &str, status: StatusCode);

    fn component(
        &mut self,
        service: &str,
        status_page_url: &str,
        component: &str,
        status: StatusCode,
    );
}

/// Write the overall status and one entry per component, in document order.
///
/// Returns the overall status code. Duplicate component names simply write
/// the same series again, so the last entry wins.
pub fn project<S>(
    doc: &StatusDocument,
    service: &str,
    status_page_url: &str,
    sink: &mut S,
) -> StatusCode
where
    S: StatusSink + ?Sized,
{
    let overall = StatusCode::from(doc.overall.as_deref());
    sink.overall(service, status_page_url, overall);

    for entry in &doc.components {
        let status = StatusCode::from(entry.status.as_deref());
        sink.component(service, status_page_url, &entry.name, status);
    }

    overall
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ComponentEntry;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct RecordingSink {
        overall: Vec<(String, String, u8)>,
        components: Vec<(String, u8)>,
        latest: BTreeMap<String, u8>,
    }

    impl StatusSink for RecordingSink {
        fn overall(&mut self, service: &str, url: &str, status: StatusCode) {
            self.overall.push((service.into(), url.into(), status.code()));
        }

        fn component(&mut self, _service: &str, _url: &str, component: &str, status: StatusCode) {
            self.components.push((component.into(), status.code()));
            self.latest.insert(component.into(), status.code());
        }
    }

    #[test]
    fn test_projects_overall_and_components() {
        let doc = StatusDocument {
            service: None,
            overall: Some("degraded_performance".into()),
            components: vec![
                ComponentEntry::new("API", "operational"),
                ComponentEntry::new("CDN", "major_outage"),
            ],
        };

        let mut sink = RecordingSink::default();
        let overall = project(&doc, "Example", "https://status.example.com/", &mut sink);

        assert_eq!(overall, StatusCode::DegradedPerformance);
        assert_eq!(
            sink.overall,
            vec![("Example".into(), "https://status.example.com/".into(), 3)]
        );
        assert_eq!(sink.components, vec![("API".into(), 1), ("CDN".into(), 5)]);
    }

    #[test]
    fn test_missing_tokens_project_unknown() {
        let doc = StatusDocument {
            service: None,
            overall: None,
            components: vec![ComponentEntry { name: "Search".into(), status: None }],
        };

        let mut sink = RecordingSink::default();
        assert_eq!(project(&doc, "s", "u", &mut sink), StatusCode::Unknown);
        assert_eq!(sink.components, vec![("Search".into(), 0)]);
    }

    #[test]
    fn test_duplicate_components_last_write_wins() {
        let doc = StatusDocument {
            service: None,
            overall: Some("none".into()),
            components: vec![
                ComponentEntry::new("API", "major_outage"),
                ComponentEntry::new("API", "operational"),
            ],
        };

        let mut sink = RecordingSink::default();
        project(&doc, "s", "u", &mut sink);
        assert_eq!(sink.components.len(), 2);
        assert_eq!(sink.latest.get("API"), Some(&1));
    }
}
