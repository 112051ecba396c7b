pub mod ai_helper;
pub mod distractors;
pub mod templates;

use std::fmt;

use rand::Rng;

use crate::error::QuizError;
use crate::periodic::element::normalize_label;
use crate::periodic::{ElementRecord, FieldKey, PeriodicTable};
use distractors::{generate_options, DistractorSettings};
use templates::{select_templates, Difficulty, MissingAnswerPolicy, QuestionBank};

/// Knobs for building a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub questions_per_quiz: usize,
    pub distractors: DistractorSettings,
    pub missing_answers: MissingAnswerPolicy,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_quiz: templates::DEFAULT_QUESTIONS_PER_QUIZ,
            distractors: DistractorSettings::default(),
            missing_answers: MissingAnswerPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub element_symbol: String,
    pub element_name: String,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    pub current_question: usize,
    pub score: u32,
}

impl Quiz {
    pub fn new(element: &ElementRecord, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        Self {
            element_symbol: element.symbol.clone(),
            element_name: element.name.clone(),
            difficulty,
            questions,
            current_question: 0,
            score: 0,
        }
    }

    /// Draws the templates for `element` and fills in answers from `pool`.
    pub fn generate<R: Rng + ?Sized>(
        element: &ElementRecord,
        pool: &[ElementRecord],
        bank: &QuestionBank,
        difficulty: Difficulty,
        settings: &QuizSettings,
        rng: &mut R,
    ) -> Self {
        let questions = select_templates(
            bank,
            difficulty,
            settings.questions_per_quiz,
            element,
            settings.missing_answers,
            rng,
        )
        .into_iter()
        .map(|template| {
            let correct = element.field_or_placeholder(template.field);
            let options = generate_options(&correct, template.field, pool, &settings.distractors, rng);
            let answers = options
                .into_iter()
                .map(|option| {
                    let is_correct = option.same_as(&correct);
                    Answer::new(option.label(), is_correct)
                })
                .collect();
            Question::new(template.prompt_for(element), template.field, answers)
        })
        .collect();

        Self::new(element, difficulty, questions)
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current_question >= self.questions.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// What the chat should show next.
    pub fn step(&self) -> QuizStep {
        match self.current() {
            Some(question) => QuizStep::Question(QuestionView {
                number: self.current_question + 1,
                total: self.total(),
                prompt: question.text.clone(),
                options: question.answers.iter().map(|a| a.text.clone()).collect(),
            }),
            None => QuizStep::Finished(self.summary()),
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            element_name: self.element_name.clone(),
            score: self.score,
            total: self.total(),
        }
    }

    /// Checks `selected` against the current question and moves on, right or wrong.
    pub fn answer(&mut self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let question = self.current().ok_or(QuizError::QuizFinished)?.clone();
        let correct = question.is_correct(selected);
        if correct {
            self.score += 1;
        }
        self.current_question += 1;

        Ok(AnswerOutcome {
            correct,
            selected: selected.to_string(),
            question,
            next: self.step(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub field: FieldKey,
    pub answers: Vec<Answer>,
}
impl Question {
    pub fn new(text: String, field: FieldKey, answers: Vec<Answer>) -> Self {
        Self {
            text,
            field,
            answers,
        }
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    /// Loose comparison of the label the user picked against the correct one.
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_answer()
            .map(|a| normalize_label(&a.text) == normalize_label(selected))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}
impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress,
    Complete,
}

/// The single quiz a chat can have going at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    quiz: Option<Quiz>,
}

impl QuizSession {
    pub fn state(&self) -> QuizState {
        match &self.quiz {
            None => QuizState::NotStarted,
            Some(quiz) if quiz.is_complete() => QuizState::Complete,
            Some(_) => QuizState::InProgress,
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    /// Starts a quiz on the element with `symbol`, replacing any previous one.
    ///
    /// An unknown symbol leaves the session exactly as it was.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        table: &PeriodicTable,
        symbol: &str,
        difficulty: Difficulty,
        bank: &QuestionBank,
        settings: &QuizSettings,
        rng: &mut R,
    ) -> Result<QuizStep, QuizError> {
        let element = table
            .find_by_symbol(symbol)
            .ok_or_else(|| QuizError::ElementNotFound(symbol.to_string()))?;

        let quiz = Quiz::generate(element, table.elements(), bank, difficulty, settings, rng);
        log::info!(
            "Started a {} quiz on {} with {} question(s)",
            difficulty.as_str(),
            element.name,
            quiz.total()
        );
        let step = quiz.step();
        self.quiz = Some(quiz);
        Ok(step)
    }

    pub fn answer(&mut self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let quiz = self.quiz.as_mut().ok_or(QuizError::QuizNotStarted)?;
        let outcome = quiz.answer(selected)?;
        if let QuizStep::Finished(summary) = &outcome.next {
            log::info!(
                "{} quiz on {} finished: {}",
                quiz.difficulty.as_str(),
                quiz.element_symbol,
                summary
            );
        }
        Ok(outcome)
    }

    pub fn dismiss(&mut self) {
        self.quiz = None;
    }
}

/// A question ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub element_name: String,
    pub score: u32,
    pub total: usize,
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You scored {} out of {} for {}.",
            self.score, self.total, self.element_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Question(QuestionView),
    Finished(QuizSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub selected: String,
    /// The question that was just answered.
    pub question: Question,
    pub next: QuizStep,
}
