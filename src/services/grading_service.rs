use crate::dto::attempt_dto::SubmittedAnswer;
use crate::models::question::{OptionTag, Question};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub question_id: Uuid,
    pub selected_option: Option<OptionTag>,
    pub is_correct: bool,
}

pub struct GradingService;

impl GradingService {
    /// Grades submitted answers against the exam's authoritative questions.
    ///
    /// A blank selection is incorrect, and so is an answer referencing an
    /// unknown question id. Only the first answer for a given question counts;
    /// repeats are dropped, so a duplicated correct answer can never raise the
    /// score. The score denominator is the exam's full question count, so
    /// unanswered questions count against the student. Callers must reject
    /// exams with no questions before grading.
    pub fn grade(questions: &[Question], submitted: &[SubmittedAnswer]) -> (Vec<GradedAnswer>, i32) {
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(submitted.len());
        let mut correct_count: usize = 0;
        let mut graded: Vec<GradedAnswer> = Vec::with_capacity(submitted.len());

        for answer in submitted {
            if !seen.insert(answer.question_id) {
                continue;
            }

            let question = questions.iter().find(|q| q.id == answer.question_id);
            let is_correct = matches!(
                (question, answer.selected_option),
                (Some(q), Some(selected)) if q.correct_option == selected
            );
            if is_correct {
                correct_count += 1;
            }

            graded.push(GradedAnswer {
                question_id: answer.question_id,
                selected_option: answer.selected_option,
                is_correct,
            });
        }

        let score = if questions.is_empty() {
            0
        } else {
            ((correct_count as f64 / questions.len() as f64) * 100.0).round() as i32
        };

        (graded, score)
    }
}
