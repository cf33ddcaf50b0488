// Program loader: parses comma-separated integer text into initial memory cells

use super::Cell;
use super::error::ParseError;

/// Parses a program such as `"1,0,0,0,99"` into cells at ascending addresses.
///
/// Whitespace around literals is ignored, as is one trailing comma, so files
/// ending in `",\n"` or `"\n"` load cleanly. Empty input yields an empty program.
pub fn parse_program(source: &str) -> Result<Vec<Cell>, ParseError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);

    body.split(',')
        .enumerate()
        .map(|(index, literal)| parse_cell(literal.trim(), index))
        .collect()
}

/// Parses a comma-separated list of input values; same rules as programs
pub fn parse_values(source: &str) -> Result<Vec<Cell>, ParseError> {
    parse_program(source)
}

fn parse_cell(literal: &str, index: usize) -> Result<Cell, ParseError> {
    if literal.is_empty() {
        return Err(ParseError {
            index,
            message: "Empty cell".to_string(),
        });
    }
    // BigInt accepts a leading '+', Intcode sources never carry one
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError {
            index,
            message: format!("Invalid integer literal '{}'", literal),
        });
    }
    literal.parse::<Cell>().map_err(|e| ParseError {
        index,
        message: format!("Invalid integer literal '{}': {}", literal, e),
    })
}
