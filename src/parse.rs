/// Marker identifying the compression-ratio line.
pub const RATIO_MARKER: &str = "ratio:";
/// Marker identifying the throughput line.
pub const THROUGHPUT_MARKER: &str = "encoding throughput:";
/// Zero-based whitespace token index holding the value on a marker line.
pub const VALUE_TOKEN: usize = 2;

/// Numeric samples scraped from one execution's stdout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOutput {
    pub throughputs: Vec<f64>,
    pub ratios: Vec<f64>,
    /// Marker lines whose value could not be read.
    pub malformed_lines: usize,
}

impl ParsedOutput {
    pub fn is_empty(&self) -> bool {
        self.throughputs.is_empty() && self.ratios.is_empty()
    }
}

/// Extracts throughput and ratio samples from a compressor's textual output.
///
/// The orchestration only depends on this trait, so executables with a
/// different output layout need a new implementation and nothing else.
pub trait MetricParser {
    fn parse(&self, output: &str) -> ParsedOutput;
}

/// Substring-then-position scraper for the `ratio:` / `encoding throughput:`
/// output format.
///
/// A line is first matched by substring containment; the ratio marker wins
/// when both appear. The value is the third whitespace token. If that token
/// is absent or not numeric, the token directly after the marker is tried
/// instead, which covers lines such as `ratio: 2.5x`. Ratio values may carry
/// one trailing `x`.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    ratio_marker: String,
    throughput_marker: String,
    value_token: usize,
}

impl Default for MarkerParser {
    fn default() -> Self {
        MarkerParser::new(RATIO_MARKER, THROUGHPUT_MARKER, VALUE_TOKEN)
    }
}

impl MarkerParser {
    pub fn new(ratio_marker: &str, throughput_marker: &str, value_token: usize) -> Self {
        MarkerParser {
            ratio_marker: ratio_marker.to_string(),
            throughput_marker: throughput_marker.to_string(),
            value_token,
        }
    }

    fn value_after(&self, line: &str, marker: &str, strip_x: bool) -> Option<f64> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if let Some(v) = tokens.get(self.value_token).and_then(|t| parse_value(t, strip_x)) {
            return Some(v);
        }

        // Fall back to the token that follows the marker text.
        let rest = &line[line.find(marker)? + marker.len()..];
        rest.split_whitespace()
            .next()
            .and_then(|t| parse_value(t, strip_x))
    }
}

impl MetricParser for MarkerParser {
    fn parse(&self, output: &str) -> ParsedOutput {
        let mut parsed = ParsedOutput::default();

        for line in output.lines() {
            if line.contains(&self.ratio_marker) {
                match self.value_after(line, &self.ratio_marker, true) {
                    Some(v) => parsed.ratios.push(v),
                    None => parsed.malformed_lines += 1,
                }
            } else if line.contains(&self.throughput_marker) {
                match self.value_after(line, &self.throughput_marker, false) {
                    Some(v) => parsed.throughputs.push(v),
                    None => parsed.malformed_lines += 1,
                }
            }
        }

        parsed
    }
}

fn parse_value(token: &str, strip_x: bool) -> Option<f64> {
    let token = if strip_x {
        token.strip_suffix('x').unwrap_or(token)
    } else {
        token
    };
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
