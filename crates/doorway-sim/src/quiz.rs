//! Quiz manager: writes the question onto its surfaces and evaluates answers.

use doorway_core::config::{QuizAction, QuizConfig, QuizQuestion};
use doorway_core::error::SceneError;
use doorway_core::events::SceneEvent;

use crate::ui_registry::UiRegistry;

/// Outcome of a valid answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub index: usize,
    pub correct: bool,
    /// Actions wired to this outcome, in order.
    pub actions: Vec<QuizAction>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizManager {
    question: Option<QuizQuestion>,
    question_surface: Option<String>,
    answer_surfaces: Vec<String>,
}

impl QuizManager {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            question: config.question.clone(),
            question_surface: config.question_surface.clone(),
            answer_surfaces: config.answer_surfaces.clone(),
        }
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    /// Write the question and its answers onto the quiz surfaces.
    pub fn show_question(
        &self,
        ui: &mut UiRegistry,
        events: &mut Vec<SceneEvent>,
    ) -> Result<(), SceneError> {
        let question = self
            .question
            .as_ref()
            .ok_or_else(|| SceneError::missing("no quiz question assigned"))?;

        match self.question_surface.as_deref().and_then(|name| ui.find(name)) {
            Some(id) => ui.set_text(id, question.text.clone()),
            None => log::warn!("configuration missing: question surface"),
        }

        if self.answer_surfaces.is_empty() {
            for (i, answer) in question.answers.iter().enumerate() {
                log::info!("answer {i}: {answer}");
            }
        }
        for (i, slot) in self.answer_surfaces.iter().enumerate() {
            let Some(id) = ui.find(slot) else {
                log::warn!("configuration missing: answer surface '{slot}'");
                continue;
            };
            match question.answers.get(i) {
                Some(answer) => {
                    ui.set_text(id, answer.clone());
                    ui.show(id);
                }
                None => {
                    ui.set_text(id, "");
                    ui.hide(id);
                }
            }
        }

        log::info!("question shown: {}", question.text);
        events.push(SceneEvent::QuestionShown {
            text: question.text.clone(),
        });
        Ok(())
    }

    /// Check an answer slot against the current question.
    pub fn submit_answer(&self, index: i64) -> Result<Evaluation, SceneError> {
        let question = self
            .question
            .as_ref()
            .ok_or_else(|| SceneError::missing("no quiz question assigned"))?;

        let count = question.answers.len() as i64;
        if index < 0 || index >= count {
            return Err(SceneError::OutOfRangeInput {
                what: "answer index",
                value: index,
                min: 0,
                max: count - 1,
            });
        }

        let index = index as usize;
        let correct = index == question.correct_index;
        let actions = if correct {
            question.on_correct.clone()
        } else {
            question.on_wrong.clone()
        };
        Ok(Evaluation {
            index,
            correct,
            actions,
        })
    }

    /// Unassign the question and blank every answer slot.
    pub fn clear(&mut self, ui: &mut UiRegistry) {
        self.question = None;
        if let Some(id) = self.question_surface.as_deref().and_then(|name| ui.find(name)) {
            ui.set_text(id, "");
        }
        for slot in &self.answer_surfaces {
            if let Some(id) = ui.find(slot) {
                ui.set_text(id, "");
                ui.hide(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> QuizConfig {
        QuizConfig {
            question: Some(QuizQuestion {
                text: "Which door is unlocked?".into(),
                answers: vec!["Red".into(), "Blue".into()],
                correct_index: 1,
                on_correct: vec![QuizAction::MarkGateAnswered {
                    gate: "quiz_zone".into(),
                }],
                on_wrong: vec![QuizAction::PlayClip {
                    clip: "buzzer".into(),
                }],
            }),
            question_surface: Some("QuestionText".into()),
            answer_surfaces: vec!["Answer0".into(), "Answer1".into(), "Answer2".into()],
        }
    }

    fn registry() -> UiRegistry {
        let mut ui = UiRegistry::new();
        for name in ["QuestionText", "Answer0", "Answer1", "Answer2"] {
            ui.register(name, None, None, None, true);
        }
        ui
    }

    #[test]
    fn show_fills_slots_and_hides_extras() {
        let quiz = QuizManager::new(&config());
        let mut ui = registry();
        let mut events = Vec::new();
        quiz.show_question(&mut ui, &mut events).unwrap();

        let text = |name: &str| ui.get(ui.find(name).unwrap()).unwrap().text.clone();
        assert_eq!(text("QuestionText"), "Which door is unlocked?");
        assert_eq!(text("Answer0"), "Red");
        assert_eq!(text("Answer1"), "Blue");
        assert!(!ui.get(ui.find("Answer2").unwrap()).unwrap().active);
        assert!(matches!(events[0], SceneEvent::QuestionShown { .. }));
    }

    #[test]
    fn show_without_question_is_configuration_missing() {
        let quiz = QuizManager::new(&QuizConfig::default());
        let mut ui = registry();
        let mut events = Vec::new();
        assert!(matches!(
            quiz.show_question(&mut ui, &mut events),
            Err(SceneError::ConfigurationMissing(_))
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn answers_pick_their_action_list() {
        let quiz = QuizManager::new(&config());
        let right = quiz.submit_answer(1).unwrap();
        assert!(right.correct);
        assert_eq!(right.actions.len(), 1);

        let wrong = quiz.submit_answer(0).unwrap();
        assert!(!wrong.correct);
        assert_eq!(
            wrong.actions,
            vec![QuizAction::PlayClip {
                clip: "buzzer".into()
            }]
        );
    }

    #[test]
    fn out_of_range_answers_rejected() {
        let quiz = QuizManager::new(&config());
        for index in [-1, 2, 99] {
            assert!(matches!(
                quiz.submit_answer(index),
                Err(SceneError::OutOfRangeInput { value, min: 0, max: 1, .. }) if value == index
            ));
        }
    }

    #[test]
    fn clear_blanks_slots() {
        let mut quiz = QuizManager::new(&config());
        let mut ui = registry();
        let mut events = Vec::new();
        quiz.show_question(&mut ui, &mut events).unwrap();
        quiz.clear(&mut ui);

        assert!(quiz.question().is_none());
        let answer0 = ui.get(ui.find("Answer0").unwrap()).unwrap();
        assert!(answer0.text.is_empty() && !answer0.active);
    }
}
