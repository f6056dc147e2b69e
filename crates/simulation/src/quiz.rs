//! Quiz: random questions about the pipeline from a fixed bank.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::sim_rng::SimRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub answer: &'static str,
    pub options: [&'static str; 4],
}

pub const QUIZ_BANK: [QuizQuestion; 5] = [
    QuizQuestion {
        prompt: "Which stage adds chemicals to form larger particle clumps called floc?",
        answer: "Coagulation & Flocculation",
        options: [
            "Intake (Screening)",
            "Coagulation & Flocculation",
            "Sedimentation (Clarification)",
            "Filtration",
        ],
    },
    QuizQuestion {
        prompt: "During which stage do particles settle by gravity forming sludge?",
        answer: "Sedimentation (Clarification)",
        options: [
            "Disinfection",
            "Sedimentation (Clarification)",
            "Filtration",
            "Distribution",
        ],
    },
    QuizQuestion {
        prompt: "Which step kills or inactivates harmful microbes?",
        answer: "Disinfection",
        options: [
            "Intake (Screening)",
            "Coagulation & Flocculation",
            "Disinfection",
            "Distribution",
        ],
    },
    QuizQuestion {
        prompt: "In which stage is water passed through sand or membranes to remove fine particles?",
        answer: "Filtration",
        options: [
            "Filtration",
            "Intake (Screening)",
            "Coagulation & Flocculation",
            "Distribution",
        ],
    },
    QuizQuestion {
        prompt: "What is the final stage that delivers treated water to the community?",
        answer: "Distribution",
        options: [
            "Sedimentation (Clarification)",
            "Distribution",
            "Coagulation & Flocculation",
            "Intake (Screening)",
        ],
    },
];

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect { correct_answer: &'static str },
}

impl AnswerFeedback {
    pub fn message(&self) -> String {
        match self {
            Self::Correct => "Correct!".to_string(),
            Self::Incorrect { correct_answer } => {
                format!("Not quite. Correct answer: {correct_answer}")
            }
        }
    }
}

/// The question on screen, its shuffled options and the learner's choice.
#[derive(Resource, Debug, Clone, Default)]
pub struct QuizState {
    question: Option<&'static QuizQuestion>,
    options: Vec<&'static str>,
    chosen: Option<usize>,
}

impl QuizState {
    pub fn question(&self) -> Option<&'static QuizQuestion> {
        self.question
    }

    /// Options in display order.
    pub fn options(&self) -> &[&'static str] {
        &self.options
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }

    /// Pick a question uniformly from the bank and shuffle its options.
    pub fn new_question(&mut self, rng: &mut impl Rng) {
        let question = &QUIZ_BANK[rng.gen_range(0..QUIZ_BANK.len())];
        let mut options = question.options.to_vec();
        options.shuffle(rng);
        self.question = Some(question);
        self.options = options;
        self.chosen = None;
    }

    /// Answer with the option at `index`. Only the first answer counts; later
    /// calls and out-of-range indices return `None`.
    pub fn answer(&mut self, index: usize) -> Option<AnswerFeedback> {
        if self.chosen.is_some() {
            return None;
        }
        let question = self.question?;
        let option = *self.options.get(index)?;
        self.chosen = Some(index);
        Some(if option == question.answer {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect {
                correct_answer: question.answer,
            }
        })
    }

    /// Feedback for the answer already given.
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        let question = self.question?;
        let option = *self.options.get(self.chosen?)?;
        Some(if option == question.answer {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect {
                correct_answer: question.answer,
            }
        })
    }
}

/// Sent by the quiz panel to draw a fresh question.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NewQuizQuestion;

pub fn draw_quiz_question(
    mut requests: EventReader<NewQuizQuestion>,
    mut rng: ResMut<SimRng>,
    mut quiz: ResMut<QuizState>,
) {
    if requests.read().count() == 0 && quiz.question().is_some() {
        return;
    }
    quiz.new_question(&mut rng.0);
}
