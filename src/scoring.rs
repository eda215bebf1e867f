// src/scoring.rs

//! Scoring engine.
//!
//! Everything here is pure: callers load the referenced questions, these
//! functions turn an answer sheet plus those questions into per-question
//! details, an aggregate score and a letter grade.
//!
//! An answer whose key does not resolve to a stored question is skipped. It
//! still counts toward `total`, so it lowers the percentage without ever
//! producing a detail row.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{question::Question, submission::AnswerSheet};

/// Per-question breakdown, derived on every read from current question data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question_id: i64,
    pub user_answer: i64,
    pub correct_answer: i64,
    pub is_correct: bool,
    pub question: String,
    pub selected_option: String,
    pub correct_option: String,
}

impl AnswerDetail {
    pub fn new(question: &Question, selected: i64) -> Self {
        Self {
            question_id: question.id,
            user_answer: selected,
            correct_answer: question.correct_answer,
            is_correct: selected == question.correct_answer,
            question: question.question.clone(),
            selected_option: question.option_text(selected),
            correct_option: question.option_text(question.correct_answer),
        }
    }
}

/// Outcome of scoring one answer sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub details: Vec<AnswerDetail>,
}

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Grade::A,
            p if p >= 80.0 => Grade::B,
            p if p >= 70.0 => Grade::C,
            p if p >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Correct/wrong counts and grade for a result report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultStats {
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub grade: Grade,
}

/// Parses an answer key as a question id. Only plain decimal 32-bit ids resolve;
/// a sign prefix such as `+1` does not.
pub fn parse_question_id(key: &str) -> Option<i64> {
    if !key.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().map(i64::from)
}

/// Distinct question ids referenced by an answer sheet, ascending.
pub fn referenced_question_ids(answers: &AnswerSheet) -> Vec<i64> {
    answers
        .keys()
        .filter_map(|key| parse_question_id(key))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `100 * score / total`, or `0` for an empty sheet.
pub fn percentage(score: i64, total: i64) -> f64 {
    if total > 0 {
        score as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Builds one detail row per answer whose key resolves to a known question,
/// ordered by question id.
pub fn answer_details(answers: &AnswerSheet, questions: &HashMap<i64, Question>) -> Vec<AnswerDetail> {
    let mut details: Vec<AnswerDetail> = answers
        .iter()
        .filter_map(|(key, &selected)| {
            let question = questions.get(&parse_question_id(key)?)?;
            Some(AnswerDetail::new(question, selected))
        })
        .collect();

    details.sort_by_key(|d| d.question_id);
    details
}

/// Scores an answer sheet against the questions it references.
pub fn score_answers(answers: &AnswerSheet, questions: &HashMap<i64, Question>) -> Scorecard {
    // Counted before lookup: unresolvable keys stay in the denominator.
    let total = answers.len() as i64;
    let details = answer_details(answers, questions);
    let score = details.iter().filter(|d| d.is_correct).count() as i64;

    Scorecard {
        score,
        total,
        percentage: percentage(score, total),
        details,
    }
}

/// Counts correct and wrong rows; the grade comes from the stored percentage.
pub fn summarize(details: &[AnswerDetail], percentage: f64) -> ResultStats {
    let correct_answers = details.iter().filter(|d| d.is_correct).count() as i64;

    ResultStats {
        correct_answers,
        wrong_answers: details.len() as i64 - correct_answers,
        grade: Grade::from_percentage(percentage),
    }
}
