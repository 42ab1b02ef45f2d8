use serde::Deserialize;
use serde_json::Value;
use tomato_core::model::Solution;
use url::Url;

use crate::error::PuzzleFetchError;
use crate::media::{DEFAULT_IMAGE_MIME, decode_base64, decode_data_uri, sniff_image_mime};

#[derive(Debug, Deserialize)]
struct PuzzleResponse {
    question: Option<String>,
    solution: Option<Value>,
}

/// Where the puzzle image lives, as described by the API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QuestionRef {
    Remote(Url),
    Inline { mime: String, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPuzzle {
    pub question: QuestionRef,
    pub solution: Solution,
}

pub(crate) fn parse_puzzle_body(body: &[u8]) -> Result<ParsedPuzzle, PuzzleFetchError> {
    let response: PuzzleResponse = serde_json::from_slice(body)?;
    let question = response
        .question
        .ok_or(PuzzleFetchError::MissingField("question"))?;
    let solution = response
        .solution
        .ok_or(PuzzleFetchError::MissingField("solution"))?;

    Ok(ParsedPuzzle {
        question: parse_question(&question)?,
        solution: parse_solution(solution)?,
    })
}

fn parse_question(raw: &str) -> Result<QuestionRef, PuzzleFetchError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PuzzleFetchError::MissingField("question"));
    }

    if raw.starts_with("data:") {
        let (mime, data) = decode_data_uri(raw).ok_or(PuzzleFetchError::InvalidImage)?;
        return Ok(QuestionRef::Inline { mime, data });
    }

    if let Ok(url) = Url::parse(raw) {
        if matches!(url.scheme(), "http" | "https") {
            return Ok(QuestionRef::Remote(url));
        }
        return Err(PuzzleFetchError::InvalidImage);
    }

    // The API's base64 mode sends the PNG payload without a data: prefix.
    let data = decode_base64(raw).ok_or(PuzzleFetchError::InvalidImage)?;
    let mime = sniff_image_mime(&data).unwrap_or(DEFAULT_IMAGE_MIME);
    Ok(QuestionRef::Inline {
        mime: mime.to_string(),
        data,
    })
}

fn parse_solution(value: Value) -> Result<Solution, PuzzleFetchError> {
    let text = match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => return Err(PuzzleFetchError::InvalidSolution),
    };
    Solution::new(text).map_err(|_| PuzzleFetchError::InvalidSolution)
}
