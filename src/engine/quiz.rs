//! Multiple-choice quiz: one locked answer per question, one point per
//! correct answer, a result screen after the last question.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

impl QuizQuestion {
    pub fn new(prompt: &str, options: &[&str], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizRejection {
    AlreadyAnswered,
    NoSuchOption,
    NotAnswered,
    Finished,
}

impl fmt::Display for QuizRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            QuizRejection::AlreadyAnswered => "Already answered, press n to continue",
            QuizRejection::NoSuchOption => "No such option",
            QuizRejection::NotAnswered => "Pick an answer first",
            QuizRejection::Finished => "Quiz finished, press r to try again",
        };
        f.write_str(msg)
    }
}

/// How an option should be shown once the question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Open,
    Correct,
    Wrong,
    Dimmed,
}

#[derive(Debug, Clone)]
pub struct MultipleChoiceQuiz {
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<usize>,
    score: usize,
    finished: bool,
}

impl Default for MultipleChoiceQuiz {
    fn default() -> Self {
        Self::new(vec![
            QuizQuestion::new(
                "Which order does a stack remove its elements in?",
                &["First in, first out", "Last in, first out", "Sorted order", "Random order"],
                1,
            ),
            QuizQuestion::new(
                "How many comparisons does one bubble sort pass over 5 unsorted values make?",
                &["3", "5", "4", "10"],
                2,
            ),
            QuizQuestion::new(
                "Which of these is a non-linear data structure?",
                &["Array", "Queue", "Stack", "Tree"],
                3,
            ),
            QuizQuestion::new(
                "What is the worst-case time complexity of binary search?",
                &["O(n)", "O(log n)", "O(n^2)", "O(1)"],
                1,
            ),
        ])
    }
}

impl MultipleChoiceQuiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let finished = questions.is_empty();
        Self {
            questions,
            index: 0,
            selected: None,
            score: 0,
            finished,
        }
    }

    /// Question on screen, `None` once the result is showing.
    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.index)
    }

    /// One-based position of the current question and the total.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Lock in an answer for the current question. Returns whether it was correct.
    pub fn answer(&mut self, option: usize) -> Result<bool, QuizRejection> {
        let Some(question) = self.current() else {
            return Err(QuizRejection::Finished);
        };
        if self.selected.is_some() {
            return Err(QuizRejection::AlreadyAnswered);
        }
        if option >= question.options.len() {
            return Err(QuizRejection::NoSuchOption);
        }
        let correct = option == question.correct;
        self.selected = Some(option);
        if correct {
            self.score += 1;
        }
        Ok(correct)
    }

    /// Move to the next question, or to the result after the last one.
    pub fn advance(&mut self) -> Result<(), QuizRejection> {
        if self.finished {
            return Err(QuizRejection::Finished);
        }
        if self.selected.is_none() {
            return Err(QuizRejection::NotAnswered);
        }
        if self.is_last() {
            self.finished = true;
        } else {
            self.index += 1;
            self.selected = None;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.selected = None;
        self.score = 0;
        self.finished = self.questions.is_empty();
    }

    pub fn mark(&self, option: usize) -> OptionMark {
        let (Some(selected), Some(question)) = (self.selected, self.current()) else {
            return OptionMark::Open;
        };
        if option == question.correct {
            OptionMark::Correct
        } else if option == selected {
            OptionMark::Wrong
        } else {
            OptionMark::Dimmed
        }
    }

    pub fn result_message(&self) -> String {
        format!("You scored {} out of {}!", self.score, self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> MultipleChoiceQuiz {
        MultipleChoiceQuiz::new(vec![
            QuizQuestion::new("a?", &["x", "y"], 1),
            QuizQuestion::new("b?", &["x", "y", "z"], 0),
        ])
    }

    #[test]
    fn first_answer_locks_the_question() {
        let mut q = quiz();
        assert_eq!(q.answer(1), Ok(true));
        assert_eq!(q.answer(0), Err(QuizRejection::AlreadyAnswered));
        assert_eq!(q.score(), 1);
        assert_eq!(q.selected(), Some(1));
    }

    #[test]
    fn wrong_answer_scores_nothing_and_marks_both_options() {
        let mut q = quiz();
        assert_eq!(q.mark(0), OptionMark::Open);
        assert_eq!(q.answer(0), Ok(false));
        assert_eq!(q.score(), 0);
        assert_eq!(q.mark(0), OptionMark::Wrong);
        assert_eq!(q.mark(1), OptionMark::Correct);
    }

    #[test]
    fn advancing_needs_an_answer_and_finishes_after_the_last() {
        let mut q = quiz();
        assert_eq!(q.advance(), Err(QuizRejection::NotAnswered));
        q.answer(1).unwrap();
        q.advance().unwrap();
        assert_eq!(q.position(), (2, 2));
        assert!(q.is_last());
        assert_eq!(q.selected(), None);

        assert_eq!(q.answer(5), Err(QuizRejection::NoSuchOption));
        q.answer(0).unwrap();
        q.advance().unwrap();
        assert!(q.is_finished());
        assert!(q.current().is_none());
        assert_eq!(q.answer(0), Err(QuizRejection::Finished));
        assert_eq!(q.result_message(), "You scored 2 out of 2!");
    }

    #[test]
    fn reset_starts_over() {
        let mut q = quiz();
        q.answer(1).unwrap();
        q.advance().unwrap();
        q.answer(2).unwrap();
        q.advance().unwrap();
        assert_eq!(q.result_message(), "You scored 1 out of 2!");

        q.reset();
        assert!(!q.is_finished());
        assert_eq!(q.position(), (1, 2));
        assert_eq!(q.score(), 0);
        assert_eq!(q.selected(), None);
    }

    #[test]
    fn default_bank_has_valid_answers() {
        let q = MultipleChoiceQuiz::default();
        assert_eq!(q.position(), (1, 4));
        assert!(q
            .questions
            .iter()
            .all(|question| question.correct < question.options.len()));
    }
}
