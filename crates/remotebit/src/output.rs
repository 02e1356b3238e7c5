use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use remotebit_frame::{DecodedFrame, NumericFormat};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    component: u8,
    component_name: &'a str,
    id: u8,
    format: NumericFormat,
    values: &'a [i32],
    size: usize,
    hex: String,
}

/// Print one frame: its decoded header and values next to the wire bytes.
pub fn print_frame(
    frame: &DecodedFrame,
    component_name: &str,
    value_format: NumericFormat,
    wire: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                component: frame.component,
                component_name,
                id: frame.id,
                format: value_format,
                values: &frame.values,
                size: wire.len(),
                hex: hex::encode(wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COMPONENT", "ID", "FORMAT", "VALUES", "HEX"])
                .add_row(vec![
                    format!("{} ({component_name})", frame.component),
                    frame.id.to_string(),
                    value_format.to_string(),
                    values_list(&frame.values),
                    hex::encode(wire),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "component={} ({}) id={} format={} values={} hex={}",
                frame.component,
                component_name,
                frame.id,
                value_format,
                values_list(&frame.values),
                hex::encode(wire)
            );
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

#[derive(Serialize)]
struct FormatOutput {
    tag: u8,
    name: &'static str,
    width: usize,
    signed: bool,
    min: i32,
    max: i32,
}

/// Print the numeric format table.
pub fn print_formats(format: OutputFormat) {
    let rows: Vec<FormatOutput> = NumericFormat::ALL
        .iter()
        .map(|f| FormatOutput {
            tag: f.tag(),
            name: f.name(),
            width: f.width(),
            signed: f.is_signed(),
            min: f.min(),
            max: f.max(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TAG", "NAME", "WIDTH", "SIGNED", "MIN", "MAX"]);
            for row in &rows {
                table.add_row(vec![
                    row.tag.to_string(),
                    row.name.to_string(),
                    row.width.to_string(),
                    row.signed.to_string(),
                    row.min.to_string(),
                    row.max.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!(
                    "{} {} width={} range={}..={}",
                    row.tag, row.name, row.width, row.min, row.max
                );
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn values_list(values: &[i32]) -> String {
    let items: Vec<String> = values.iter().map(i32::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_list_formats_brackets() {
        assert_eq!(values_list(&[]), "[]");
        assert_eq!(values_list(&[-1, 300]), "[-1, 300]");
    }

    #[test]
    fn frame_output_serializes_format_name() {
        let out = FrameOutput {
            component: 101,
            component_name: "distance",
            id: 0,
            format: NumericFormat::Int16LE,
            values: &[-1, 300],
            size: 6,
            hex: "6500ffff2c01".to_string(),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"format\":\"int16le\""));
        assert!(json.contains("\"values\":[-1,300]"));
    }
}
