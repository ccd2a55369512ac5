//! # Text Rendering
//!
//! Draws a [`Node`] tree as indented plain text for the terminal front end.
//! Disabled buttons are shown in parentheses instead of brackets.

use std::fmt::Write;

use super::node::{Node, Tone};

fn tone_tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Default => "",
        Tone::Primary => "*",
        Tone::Success => "ok",
        Tone::Warning => "warn",
        Tone::Error => "error",
        Tone::Info => "info",
    }
}

fn inline(node: &Node) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Heading { text, .. } => text.clone(),
        Node::Chip { label, tone } => match tone_tag(*tone) {
            "" => format!("<{}>", label),
            tag => format!("<{}:{}>", label, tag),
        },
        Node::Badge { label, count } => format!("{} ({})", label, count),
        Node::Button { label, enabled, .. } => {
            if *enabled {
                format!("[{}]", label)
            } else {
                format!("({})", label)
            }
        }
        Node::Row(nodes) => nodes.iter().map(inline).collect::<Vec<_>>().join("  "),
        Node::Spinner(message) => format!("~ {}", message),
        Node::Empty => String::new(),
        other => to_text(other).trim_end().replace('\n', " "),
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Empty => {}
        Node::Column(nodes) => {
            for child in nodes {
                write_node(out, child, depth);
            }
        }
        Node::Heading { level, text } => {
            let underline = if *level <= 1 { '=' } else { '-' };
            let _ = writeln!(out, "{}{}", pad, text);
            let _ = writeln!(
                out,
                "{}{}",
                pad,
                underline.to_string().repeat(text.chars().count())
            );
        }
        Node::Alert { tone, text } => {
            let _ = writeln!(out, "{}! {} {}", pad, tone_tag(*tone), text);
        }
        Node::Input {
            label,
            value,
            error,
            secret,
            ..
        } => {
            let shown = if *secret {
                "*".repeat(value.chars().count())
            } else {
                value.clone()
            };
            let _ = writeln!(out, "{}{}: {}", pad, label, shown);
            if let Some(error) = error {
                let _ = writeln!(out, "{}  ^ {}", pad, error);
            }
        }
        Node::Choice {
            label,
            options,
            selected,
        } => {
            let choices: Vec<String> = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let mark = if i == *selected { "(x)" } else { "( )" };
                    format!("{} {}", mark, inline(option).trim_matches(['[', ']']))
                })
                .collect();
            let _ = writeln!(out, "{}{}: {}", pad, label, choices.join("  "));
        }
        Node::Table { headers, rows } => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|row| row.iter().map(inline).collect())
                .collect();
            let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
            for row in &cells {
                for (i, cell) in row.iter().enumerate() {
                    if i < widths.len() {
                        widths[i] = widths[i].max(cell.chars().count());
                    }
                }
            }
            let line = |values: &[String]| {
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| format!("{:<width$}", v, width = widths.get(i).copied().unwrap_or(0)))
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            let _ = writeln!(out, "{}{}", pad, line(headers.as_slice()).trim_end());
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            let _ = writeln!(out, "{}{}", pad, rule.join("-+-"));
            for row in &cells {
                let _ = writeln!(out, "{}{}", pad, line(row.as_slice()).trim_end());
            }
        }
        Node::Dialog { title, body } => {
            let _ = writeln!(out, "{}+-- {} --", pad, title);
            for child in body {
                write_node(out, child, depth + 1);
            }
            let _ = writeln!(out, "{}+--", pad);
        }
        other => {
            let text = inline(other);
            if !text.is_empty() {
                let _ = writeln!(out, "{}{}", pad, text);
            }
        }
    }
}

/// Render a tree as text, one block per line
pub fn to_text(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}
