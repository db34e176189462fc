//! Plain-text and JSON rendering of decoded requests and provider tables.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use tapwire_engine::Provider;
use tapwire_types::{ColumnMapping, FieldGroup, FieldRecord, KeyTable, ParsedRequest, ProviderDescriptor};
use tapwire_util::{display_width, pad_to_width, truncate_to_width};

const OTHER_GROUP: &str = "Other";
const HIDDEN_GROUP: &str = "Hidden";
const MAX_LABEL_WIDTH: usize = 32;
const MAX_VALUE_WIDTH: usize = 96;

/// Render a parsed request as grouped text.
///
/// Groups follow the provider's declared order; records keep their decode
/// order inside a group. Records with no or an undeclared group land in a
/// trailing "Other" section, hidden records in "Hidden" when requested.
pub fn request_table(parsed: &ParsedRequest, groups: &[FieldGroup], show_hidden: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", parsed.provider.name, parsed.provider.kind);

    let visible: Vec<&FieldRecord> = parsed.visible().collect();
    let label_width = visible
        .iter()
        .map(|record| display_width(&record.field))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);

    for group in groups {
        let members: Vec<&FieldRecord> = visible
            .iter()
            .copied()
            .filter(|record| record.group.as_deref() == Some(group.key.as_str()))
            .collect();
        write_section(&mut out, &group.name, &members, label_width);
    }

    let ungrouped: Vec<&FieldRecord> = visible
        .iter()
        .copied()
        .filter(|record| match record.group.as_deref() {
            Some(key) => !groups.iter().any(|group| group.key == key),
            None => true,
        })
        .collect();
    write_section(&mut out, OTHER_GROUP, &ungrouped, label_width);

    if show_hidden {
        let hidden: Vec<&FieldRecord> = parsed.data.iter().filter(|record| record.hidden).collect();
        write_section(&mut out, HIDDEN_GROUP, &hidden, label_width);
    }
    out
}

fn write_section(out: &mut String, title: &str, records: &[&FieldRecord], label_width: usize) {
    if records.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n[{title}]");
    for record in records {
        let label = pad_to_width(&truncate_to_width(&record.field, MAX_LABEL_WIDTH), label_width);
        let _ = writeln!(out, "  {label}  {}", truncate_to_width(&record.value, MAX_VALUE_WIDTH));
    }
}

/// JSON for a parsed request; hidden records are dropped unless requested.
pub fn request_json(parsed: &ParsedRequest, show_hidden: bool) -> Result<String> {
    let mut parsed = parsed.clone();
    if !show_hidden {
        parsed.data.retain(|record| !record.hidden);
    }
    Ok(serde_json::to_string_pretty(&parsed)?)
}

/// Static tables a host queries once to build its UI chrome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary<'a> {
    pub provider: &'a ProviderDescriptor,
    pub column_mapping: ColumnMapping,
    pub groups: &'a [FieldGroup],
    pub keys: &'a KeyTable,
}

impl<'a> ProviderSummary<'a> {
    pub fn of(provider: &'a dyn Provider) -> Self {
        Self {
            provider: provider.descriptor(),
            column_mapping: provider.column_mapping(),
            groups: provider.groups(),
            keys: provider.keys(),
        }
    }
}

pub fn providers_json(summaries: &[ProviderSummary<'_>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

pub fn providers_table(summaries: &[ProviderSummary<'_>]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let descriptor = summary.provider;
        let _ = writeln!(out, "{}  {} ({})", descriptor.key, descriptor.name, descriptor.kind);
        let _ = writeln!(out, "  keywords: {}", descriptor.keywords.join(", "));
        let groups: Vec<String> = summary
            .groups
            .iter()
            .map(|group| format!("{} ({})", group.name, group.key))
            .collect();
        let _ = writeln!(out, "  groups:   {}", groups.join(", "));
        let _ = writeln!(
            out,
            "  columns:  account={} requestType={}",
            summary.column_mapping.account, summary.column_mapping.request_type
        );
        let _ = writeln!(out, "  keys:");
        for (key, descriptor) in summary.keys {
            if descriptor.hidden {
                let _ = writeln!(out, "    {key} (hidden)");
            } else {
                let _ = writeln!(
                    out,
                    "    {key} -> {} [{}]",
                    descriptor.name.as_deref().unwrap_or(key),
                    descriptor.group.as_deref().unwrap_or("other")
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapwire_engine::{DataroidProvider, ProviderRegistry};
    use tapwire_types::PostBody;

    const COLLECTOR_URL: &str = "https://api.dataroid.com/collector/collect/event";

    fn parsed(body: &str) -> ParsedRequest {
        ProviderRegistry::with_builtin_providers()
            .parse(COLLECTOR_URL, Some(&PostBody::from(body)))
            .expect("url parses")
            .expect("provider matches")
    }

    #[test]
    fn table_follows_declared_group_order() {
        let provider = DataroidProvider::new();
        let body = r#"{"events":[{"eventName":"page_view","clientSession":{"sessionId":"s1"},"attributes":{"pageTitle":"Home"}}]}"#;
        let table = request_table(&parsed(body), provider.groups(), false);
        let general = table.find("[General]").expect("general section");
        let event = table.find("[Event Data]").expect("event section");
        let session = table.find("[Session Data]").expect("session section");
        let attributes = table.find("[Attributes]").expect("attributes section");
        assert!(general < event && event < session && session < attributes, "{table}");
        assert!(!table.contains("Event Collection"));
        assert!(table.starts_with("Dataroid (Analytics)"));
    }

    #[test]
    fn hidden_records_shown_on_request() {
        let provider = DataroidProvider::new();
        let table = request_table(&parsed(""), provider.groups(), true);
        assert!(table.contains("[Hidden]"));
        assert!(table.contains("Event Collection"));
    }

    #[test]
    fn json_drops_hidden_records_by_default() {
        let json = request_json(&parsed(""), false).expect("json");
        assert!(!json.contains("requestType"));
        let json = request_json(&parsed(""), true).expect("json");
        assert!(json.contains("requestType"));
    }

    #[test]
    fn provider_summary_lists_tables() {
        let registry = ProviderRegistry::with_builtin_providers();
        let summaries: Vec<ProviderSummary<'_>> = registry.providers().map(ProviderSummary::of).collect();
        let table = providers_table(&summaries);
        assert!(table.contains("DATAROID  Dataroid (Analytics)"));
        assert!(table.contains("requestType (hidden)"));
        assert!(table.contains("startDateTime -> Session Start Date/Time [session]"));

        let value: serde_json::Value = serde_json::from_str(&providers_json(&summaries).expect("json")).expect("parse");
        assert_eq!(value[0]["columnMapping"]["account"], "eventName");
        assert_eq!(value[0]["groups"].as_array().map(Vec::len), Some(4));
    }
}
