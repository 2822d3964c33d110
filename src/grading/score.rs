use std::collections::HashMap;

use serde::Serialize;

use crate::models::{AssessmentResult, NewResult, Question, SubmittedAnswer};

use super::{QuestionBank, ResultStore};

/// Running totals for one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub earned_points: i64,
    pub total_points: i64,
    pub correct_answers: i32,
    pub total_questions: i32,
}

impl Tally {
    pub fn percentage(&self) -> i32 {
        percentage(self.earned_points, self.total_points)
    }
}

/// Response shape of a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub id: i64,
    pub score: i64,
    pub total_score: i64,
    pub percentage: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
}

impl From<&AssessmentResult> for ScoreSummary {
    fn from(r: &AssessmentResult) -> Self {
        Self {
            id: r.id,
            score: r.earned_points,
            total_score: r.total_points,
            percentage: r.percentage,
            correct_answers: r.correct_answers,
            total_questions: r.total_questions,
        }
    }
}

/// `round(100 * earned / total)` with halves rounded up, or 0 for an empty bank.
pub fn percentage(earned: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((200 * earned + total) / (2 * total)) as i32
}

/// Grade `answers` against an assessment's full question bank.
///
/// An answer whose question is not in `questions` earns nothing, but still
/// counts towards `total_questions`. Total points cover the whole bank,
/// answered or not.
pub fn tally(questions: &[Question], answers: &[SubmittedAnswer]) -> Tally {
    let by_id: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    let mut tally = Tally {
        total_points: questions.iter().map(|q| i64::from(q.points)).sum(),
        total_questions: answers.len() as i32,
        ..Tally::default()
    };

    for submitted in answers {
        let Some(question) = by_id.get(&submitted.question_id) else {
            continue;
        };
        if submitted.answer == question.correct_answer {
            tally.earned_points += i64::from(question.points);
            tally.correct_answers += 1;
        }
    }

    tally
}

/// Score a submission and persist it as a new result.
///
/// The bank is read once, so every lookup and the points total see the same
/// snapshot. The result is written with a single insert after grading.
pub async fn score<S>(
    store: &S,
    user_id: i64,
    assessment_id: i64,
    answers: &[SubmittedAnswer],
) -> Result<AssessmentResult, sqlx::Error>
where
    S: QuestionBank + ResultStore + ?Sized,
{
    let questions = store.fetch_questions(assessment_id).await?;
    let tally = tally(&questions, answers);

    tracing::debug!(
        user_id,
        assessment_id,
        earned = tally.earned_points,
        total = tally.total_points,
        "graded submission"
    );

    let new_result = NewResult {
        user_id,
        assessment_id,
        earned_points: tally.earned_points,
        total_points: tally.total_points,
        percentage: tally.percentage(),
        correct_answers: tally.correct_answers,
        total_questions: tally.total_questions,
        answers: answers.to_vec(),
    };

    store.insert_result(&new_result).await
}
