use crate::models::{LooseInt, QuestionDraft};
use std::fs;
use std::path::Path;

const HEADER: [&str; 4] = ["question", "answer", "category", "difficulty"];

/// Reads `question,answer,category,difficulty` records. Blank lines and an
/// optional header row are skipped; rows are not validated here.
pub fn load_question_csv(path: &Path) -> std::io::Result<Vec<QuestionDraft>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_question_csv(&content))
}

pub fn parse_question_csv(content: &str) -> Vec<QuestionDraft> {
    parse_csv_records(content)
        .into_iter()
        .filter(|fields| !fields.iter().all(|f| f.trim().is_empty()))
        .enumerate()
        .filter(|(index, fields)| !(*index == 0 && is_header(fields)))
        .map(|(_, fields)| draft_from_fields(fields))
        .collect()
}

fn is_header(fields: &[String]) -> bool {
    fields.len() == HEADER.len()
        && fields
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
}

fn draft_from_fields(fields: Vec<String>) -> QuestionDraft {
    let mut fields = fields.into_iter().map(|f| Some(f).filter(|f| !f.trim().is_empty()));
    QuestionDraft {
        question: fields.next().flatten(),
        answer: fields.next().flatten(),
        category: fields.next().flatten().map(LooseInt::Text),
        difficulty: fields.next().flatten().map(LooseInt::Text),
    }
}

/// Splits CSV text into records. Fields may be wrapped in double quotes,
/// inside which commas and line breaks are literal and `""` stands for a
/// single quote. Records end at `\n` or `\r\n` outside quotes.
pub fn parse_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut chars = content.chars().peekable();
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            _ => {
                current.push(c);
            }
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }

    records
}
