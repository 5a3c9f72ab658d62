//! Reader for the whitespace-separated instance format.

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use super::Instance;
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::models::Tour;

/// Errors raised while reading an instance.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing header: expected node count and tour count")]
    MissingHeader,

    #[error("instance declares zero nodes")]
    NoNodes,

    #[error("invalid number {token:?} on line {line}")]
    InvalidNumber { token: String, line: usize },

    #[error("distance matrix truncated: expected {expected} values, found {actual}")]
    TruncatedMatrix { expected: usize, actual: usize },

    #[error("tour list truncated: expected {expected} tours, found {actual} complete")]
    TruncatedTours { expected: usize, actual: usize },

    #[error("tour {index} is invalid: {source}")]
    InvalidTour {
        index: usize,
        #[source]
        source: RoutingError,
    },

    #[error(transparent)]
    Instance(#[from] RoutingError),
}

/// Content tokens with their 1-based line numbers; `#` comments run to end of line.
fn tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().flat_map(|(i, line)| {
        let content = line.split_once('#').map_or(line, |(before, _)| before);
        content.split_whitespace().map(move |token| (i + 1, token))
    })
}

fn next_number<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<Option<T>, ParseError> {
    let Some((line, token)) = tokens.next() else {
        return Ok(None);
    };
    token
        .parse()
        .map(Some)
        .map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            line,
        })
}

pub(super) fn parse(text: &str) -> Result<Instance, ParseError> {
    let mut tokens = tokens(text);
    let n: usize = next_number(&mut tokens)?.ok_or(ParseError::MissingHeader)?;
    let count: usize = next_number(&mut tokens)?.ok_or(ParseError::MissingHeader)?;
    if n == 0 {
        return Err(ParseError::NoNodes);
    }

    let expected = n * n;
    let mut data = Vec::with_capacity(expected);
    while data.len() < expected {
        let Some((line, token)) = tokens.next() else {
            return Err(ParseError::TruncatedMatrix {
                expected,
                actual: data.len(),
            });
        };
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => data.push(value),
            _ => {
                return Err(ParseError::InvalidNumber {
                    token: token.to_string(),
                    line,
                })
            }
        }
    }
    let distances = DistanceMatrix::from_data(n, data)?;

    let mut tours = Vec::with_capacity(count);
    for index in 0..count {
        let mut nodes = Vec::with_capacity(n + 1);
        while nodes.len() <= n {
            match next_number(&mut tokens)? {
                Some(node) => nodes.push(node),
                None => {
                    return Err(ParseError::TruncatedTours {
                        expected: count,
                        actual: index,
                    })
                }
            }
        }
        let tour = Tour::new(nodes).map_err(|source| ParseError::InvalidTour { index, source })?;
        tours.push(tour);
    }

    if let Some((line, token)) = tokens.next() {
        warn!(line, token, "ignoring trailing data after last tour");
    }
    Ok(Instance::new(distances, tours)?)
}
