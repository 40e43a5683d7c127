//! Response normalization and rendering
//!
//! The heart of the tool: inspect one arbitrary JSON payload and populate
//! the report regions with cards. Facet checks run in a fixed order and are
//! independent of each other, so one payload can produce several cards. The
//! pass never fails; malformed structures degrade to pretty-printed JSON
//! dump cards.

use serde_json::Value;

use crate::core::facets::{self, ErrorFacet};
use crate::core::html;
use crate::core::report::{Card, RegionKind, Report};
use crate::core::table::{self, Table};

/// Render one service payload into the report regions.
///
/// An execution-error payload renders only the "Execution Error" card and
/// returns early; the remaining facet checks are skipped for it. For
/// everything else the checks run in order and append independently, with a
/// raw dump as the final fallback when the results region stayed empty.
pub fn render(payload: &Value, report: &mut Report) {
    if let Some(facet) = ErrorFacet::detect(payload) {
        report.push(
            RegionKind::Results,
            Card::new("Execution Error", pre_block(&facet.message())),
        );
        return;
    }

    if let Some(text) = facets::narrative(payload) {
        let body = format!("<div>{}</div>", html::linkify(&html::escape(&text)));
        report.push(RegionKind::Results, Card::new("Findings", body));
    }

    if let Some(items) = facets::answer_list(payload) {
        let list: String = items
            .iter()
            .map(|a| format!("<li>{}</li>", html::escape(&table::cell_text(Some(a)))))
            .collect();
        report.push(
            RegionKind::Results,
            Card::new("Findings", format!("<ul>{}</ul>", list)),
        );
    }

    if let Some(datasets) = facets::tables(payload) {
        for (i, data) in datasets.into_iter().enumerate() {
            let title = format!("Table {}", i + 1);
            let body = match table::decode(data) {
                Some(t) => table_html(&t),
                None => pre_block(&pretty_json(data)),
            };
            report.push(RegionKind::Results, Card::new(title, body));
        }
    }

    if let Some(entries) = facets::images(payload) {
        let imgs: String = entries
            .into_iter()
            .filter_map(facets::image_source)
            .map(|src| format!("<img alt=\"figure\" src=\"{}\" />", html::escape(&src)))
            .collect();
        if !imgs.trim().is_empty() {
            report.push(RegionKind::Results, Card::new("Visuals", imgs));
        }
    }

    if let Some(code) = facets::code(payload) {
        let text = match code {
            Value::String(s) => s.clone(),
            other => pretty_json(other),
        };
        report.push(RegionKind::Results, Card::new("Code", pre_block(&text)));
    }

    if let Some(prov) = facets::provenance(payload) {
        report.push(
            RegionKind::Provenance,
            Card::new("Materials", pre_block(&pretty_json(prov))),
        );
    }

    // Fallback inspects the rendered output, not the input: provenance alone
    // leaves the results region empty and still triggers the raw dump.
    if report.results.is_empty() {
        report.push(
            RegionKind::Results,
            Card::new("Raw Response", pre_block(&pretty_json(payload))),
        );
    }
}

/// Render a transport-level failure as a single error card.
pub fn render_transport_error(message: &str, report: &mut Report) {
    report.push(RegionKind::Results, Card::new("Error", pre_block(message)));
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn pre_block(text: &str) -> String {
    format!("<pre>{}</pre>", html::escape(text))
}

fn table_html(t: &Table) -> String {
    let thead: String = t
        .headers
        .iter()
        .map(|h| format!("<th>{}</th>", html::escape(h)))
        .collect();
    let tbody: String = t
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|c| format!("<td>{}</td>", html::escape(c)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<div class=\"table-wrap\"><table><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>",
        thead, tbody
    )
}
