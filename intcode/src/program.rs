use crate::error::ParseError;

/// Parses comma-separated program text. Surrounding whitespace, including a
/// trailing newline, is ignored.
pub fn parse_program(src: &str) -> Result<Vec<i64>, ParseError> {
    src.trim()
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<i64>()
                .map_err(|source| ParseError { index, token: token.to_owned(), source })
        })
        .collect()
}

/// One program per non-blank line.
pub fn parse_programs<'a>(src: &'a str) -> impl Iterator<Item = Result<Vec<i64>, ParseError>> + 'a {
    src.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_program)
}
