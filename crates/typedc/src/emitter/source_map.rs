use serde::Serialize;
use serde_json::json;

use crate::span::SpanLocation;

/// One original→generated position pair recorded during emission.
#[derive(Debug, Clone, Serialize)]
pub struct Mapping {
    pub original: SpanLocation,
    pub generated: SpanLocation,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginalPosition {
    pub line: usize,
    pub column: usize,
    pub source: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GeneratedPosition {
    pub line: usize,
    pub column: usize,
}

/// The general-purpose source map for one generated file. Lookups run over
/// the in-memory mapping list; `encode` produces the standard v3 JSON
/// document written next to the file as `<file>.map`.
#[derive(Debug, Clone, Serialize)]
pub struct SourceMap {
    pub file: String,
    pub source: String,
    pub source_content: String,
    pub mappings: Vec<Mapping>,
}

impl SourceMap {
    /// Reverse lookup: the original position for a generated line/column,
    /// taken from the closest mapping at or before the query on that line.
    pub fn original_position(&self, line: usize, column: usize) -> Option<OriginalPosition> {
        self.mappings
            .iter()
            .filter(|m| m.generated.line == line && m.generated.column <= column)
            .max_by_key(|m| m.generated.column)
            .map(|m| OriginalPosition {
                line: m.original.line,
                column: m.original.column,
                source: self.source.clone(),
                name: m.name.clone(),
            })
    }

    /// Forward lookup: every generated occurrence of the closest original
    /// position at or before the query on that line.
    pub fn generated_positions(&self, line: usize, column: usize) -> Vec<GeneratedPosition> {
        let best = self
            .mappings
            .iter()
            .filter(|m| m.original.line == line && m.original.column <= column)
            .map(|m| m.original.column)
            .max();
        let Some(best) = best else {
            return Vec::new();
        };
        let mut positions: Vec<GeneratedPosition> = self
            .mappings
            .iter()
            .filter(|m| m.original.line == line && m.original.column == best)
            .map(|m| GeneratedPosition {
                line: m.generated.line,
                column: m.generated.column,
            })
            .collect();
        positions.sort();
        positions.dedup();
        positions
    }

    pub fn encode(&self) -> String {
        self.encode_value().to_string()
    }

    fn encode_value(&self) -> serde_json::Value {
        let mut names = Vec::new();
        for mapping in &self.mappings {
            if let Some(name) = &mapping.name {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        json!({
            "version": 3,
            "file": self.file,
            "sources": [self.source],
            "sourcesContent": [self.source_content],
            "names": names,
            "mappings": encode_mappings(&self.mappings, &names),
        })
    }
}

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn encode_vlq(value: i64, out: &mut String) {
    let mut vlq: u64 = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = (vlq & 0b1_1111) as u8;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Standard v3 `mappings` text: generated lines separated by `;`, segments
/// by `,`, fields VLQ-encoded as deltas against the previous segment.
fn encode_mappings(mappings: &[Mapping], names: &[String]) -> String {
    let mut sorted: Vec<&Mapping> = mappings.iter().collect();
    sorted.sort_by_key(|m| (m.generated.line, m.generated.column));

    let mut out = String::new();
    let mut current_line = 1usize;
    let mut prev_generated_column = 0i64;
    let mut prev_original_line = 0i64;
    let mut prev_original_column = 0i64;
    let mut prev_name_index = 0i64;
    let mut first_in_line = true;

    for mapping in sorted {
        while current_line < mapping.generated.line {
            out.push(';');
            current_line += 1;
            prev_generated_column = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }
        first_in_line = false;

        encode_vlq(mapping.generated.column as i64 - prev_generated_column, &mut out);
        prev_generated_column = mapping.generated.column as i64;

        // Single source, so the source index delta is always zero.
        encode_vlq(0, &mut out);

        let original_line = (mapping.original.line - 1) as i64;
        encode_vlq(original_line - prev_original_line, &mut out);
        prev_original_line = original_line;

        encode_vlq(mapping.original.column as i64 - prev_original_column, &mut out);
        prev_original_column = mapping.original.column as i64;

        if let Some(name) = &mapping.name {
            if let Some(index) = names.iter().position(|n| n == name) {
                encode_vlq(index as i64 - prev_name_index, &mut out);
                prev_name_index = index as i64;
            }
        }
    }
    out
}

/// Decoded segment: generated line/column, original line/column, optional
/// name index. Used by tests to prove the encoder round-trips.
#[cfg(test)]
pub(crate) fn decode_mappings(encoded: &str) -> Vec<(usize, usize, usize, usize, Option<usize>)> {
    let mut out = Vec::new();
    let mut prev_generated_column = 0i64;
    let mut prev_original_line = 0i64;
    let mut prev_original_column = 0i64;
    let mut prev_name_index = 0i64;

    for (line_index, line) in encoded.split(';').enumerate() {
        prev_generated_column = 0;
        for segment in line.split(',') {
            if segment.is_empty() {
                continue;
            }
            let fields = decode_vlq_fields(segment);
            prev_generated_column += fields[0];
            let name_index = if fields.len() >= 5 {
                prev_name_index += fields[4];
                Some(prev_name_index as usize)
            } else {
                None
            };
            prev_original_line += fields[2];
            prev_original_column += fields[3];
            out.push((
                line_index + 1,
                prev_generated_column as usize,
                (prev_original_line + 1) as usize,
                prev_original_column as usize,
                name_index,
            ));
        }
    }
    out
}

#[cfg(test)]
fn decode_vlq_fields(segment: &str) -> Vec<i64> {
    let mut fields = Vec::new();
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for ch in segment.chars() {
        let digit = BASE64_CHARS
            .iter()
            .position(|c| *c as char == ch)
            .expect("valid base64 digit") as u64;
        value |= (digit & 0b1_1111) << shift;
        if digit & 0b10_0000 != 0 {
            shift += 5;
            continue;
        }
        let signed = if value & 1 == 1 {
            -((value >> 1) as i64)
        } else {
            (value >> 1) as i64
        };
        fields.push(signed);
        value = 0;
        shift = 0;
    }
    fields
}
