use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::quiz::{AnswerFeedback, NewQuizQuestion, QuizState};

const CORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(39, 120, 63);
const INCORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(197, 48, 48);

pub fn feedback_color(feedback: &AnswerFeedback) -> egui::Color32 {
    match feedback {
        AnswerFeedback::Correct => CORRECT_COLOR,
        AnswerFeedback::Incorrect { .. } => INCORRECT_COLOR,
    }
}

pub fn quiz_ui(
    mut contexts: EguiContexts,
    mut quiz: ResMut<QuizState>,
    mut new_question: EventWriter<NewQuizQuestion>,
) {
    egui::Window::new("Quick Quiz")
        .default_open(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            let Some(question) = quiz.question() else {
                ui.label("Loading question...");
                return;
            };
            ui.label(egui::RichText::new(question.prompt).strong());
            ui.add_space(4.0);

            let answered = quiz.is_answered();
            let mut picked = None;
            for (i, option) in quiz.options().iter().enumerate() {
                let button = egui::Button::new(*option).selected(quiz.chosen() == Some(i));
                if ui.add_enabled(!answered, button).clicked() {
                    picked = Some(i);
                }
            }
            if let Some(i) = picked {
                quiz.answer(i);
            }

            if let Some(feedback) = quiz.feedback() {
                ui.colored_label(feedback_color(&feedback), feedback.message());
            }

            ui.separator();
            if ui.button("New question").clicked() {
                new_question.send(NewQuizQuestion);
            }
        });
}
