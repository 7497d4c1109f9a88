use crate::models::question::Question;
use rand::seq::SliceRandom;
use rand::Rng;

pub struct SelectionService;

impl SelectionService {
    /// Picks the questions to present for one attempt.
    ///
    /// A `questions_to_show` of zero (or one covering the whole set) means
    /// every question in its original order. Without randomization the first
    /// `questions_to_show` questions are taken as stored. With randomization a
    /// uniform subset without replacement is drawn and its presentation order
    /// renumbered 1..k; the stored `order_index` of the exam is never touched.
    ///
    /// The drawn subset is not recorded anywhere. Grading matches submitted
    /// answers by question id, so a re-served exam showing a different subset
    /// cannot corrupt a score.
    pub fn select<R: Rng>(
        questions: Vec<Question>,
        questions_to_show: i32,
        randomize: bool,
        rng: &mut R,
    ) -> Vec<Question> {
        let total = questions.len();
        if questions_to_show <= 0 || questions_to_show as usize >= total {
            return questions;
        }
        let k = questions_to_show as usize;

        if !randomize {
            return questions.into_iter().take(k).collect();
        }

        let mut picked: Vec<Question> = questions.choose_multiple(rng, k).cloned().collect();
        for (idx, q) in picked.iter_mut().enumerate() {
            q.order_index = (idx as i32) + 1;
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::OptionTag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn make_questions(n: usize) -> Vec<Question> {
        let exam_id = Uuid::new_v4();
        (0..n)
            .map(|i| Question {
                id: Uuid::new_v4(),
                exam_id,
                question: format!("Question {}", i + 1),
                option_a: "a".into(),
                option_b: "b".into(),
                option_c: "c".into(),
                option_d: "d".into(),
                correct_option: OptionTag::A,
                order_index: (i as i32) + 1,
            })
            .collect()
    }

    #[test]
    fn zero_to_show_returns_all_in_order() {
        let questions = make_questions(5);
        let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let selected = SelectionService::select(questions, 0, true, &mut rng);
        assert_eq!(selected.iter().map(|q| q.id).collect::<Vec<_>>(), ids);
        assert_eq!(
            selected.iter().map(|q| q.order_index).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn oversized_to_show_returns_all_in_order() {
        let questions = make_questions(3);
        let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let selected = SelectionService::select(questions, 10, true, &mut rng);
        assert_eq!(selected.iter().map(|q| q.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn non_random_takes_first_k_in_order() {
        let questions = make_questions(6);
        let expected: Vec<Uuid> = questions.iter().take(4).map(|q| q.id).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let selected = SelectionService::select(questions, 4, false, &mut rng);
        assert_eq!(selected.iter().map(|q| q.id).collect::<Vec<_>>(), expected);
        assert_eq!(
            selected.iter().map(|q| q.order_index).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn randomized_draws_distinct_subset_and_renumbers() {
        let questions = make_questions(30);
        let pool: HashSet<Uuid> = questions.iter().map(|q| q.id).collect();
        let mut rng = StdRng::seed_from_u64(42);

        let selected = SelectionService::select(questions, 10, true, &mut rng);
        assert_eq!(selected.len(), 10);

        let chosen: HashSet<Uuid> = selected.iter().map(|q| q.id).collect();
        assert_eq!(chosen.len(), 10);
        assert!(chosen.is_subset(&pool));

        assert_eq!(
            selected.iter().map(|q| q.order_index).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
    }

    #[test]
    fn randomized_subsets_vary_between_draws() {
        let questions = make_questions(30);
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(8);

        let first: Vec<Uuid> = SelectionService::select(questions.clone(), 10, true, &mut rng_a)
            .iter()
            .map(|q| q.id)
            .collect();
        let second: Vec<Uuid> = SelectionService::select(questions, 10, true, &mut rng_b)
            .iter()
            .map(|q| q.id)
            .collect();
        assert_ne!(first, second);
    }
}
