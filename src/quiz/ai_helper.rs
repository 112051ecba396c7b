use crate::quiz::Question;
use chatgpt::prelude::*;
use chatgpt::types::CompletionResponse;

pub struct QuizHelper {
    personality: Personality,
    chat_gpt: ChatGPT,
}

impl QuizHelper {
    pub fn new(chat_gpt: ChatGPT, personality: Personality) -> Self {
        Self {
            personality,
            chat_gpt,
        }
    }

    pub async fn generate_reply_to_wrong_answer(
        &self,
        element_name: &str,
        question: &Question,
        selected: &str,
    ) -> Result<String> {
        log::debug!(
            "Generating reply to wrong answer for question: {:?}",
            question.text
        );
        let correct_answer = question.correct_answer().ok_or(chatgpt::err::Error::BackendError {
            message: "No correct answer found".to_string(),
            error_type: "QuizError".to_string(),
        })?;

        let prompt = format!(
            "You are a chat bot that helps students learn the periodic table.
        A student answered a question about the {} of {}: \"{}\".
        The student answered {}, but the correct answer is {}.
        Explain briefly why the correct answer is right, with one memorable fact about the element.
        Write it as if you were {}. Limit: 2-3 sentences.",
            question.field.as_str(),
            element_name,
            question.text,
            selected,
            correct_answer.text,
            self.personality.get_personality()
        );

        let response: CompletionResponse = self.chat_gpt.send_message(&prompt).await?;
        let content = response.message().clone().content;

        log::debug!("Completion: {:?}", content);

        Ok(content)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Personality {
    #[default]
    Mendeleev,
    Curie,
    Lavoisier,
}
impl Personality {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "mendeleev" => Some(Personality::Mendeleev),
            "curie" => Some(Personality::Curie),
            "lavoisier" => Some(Personality::Lavoisier),
            _ => None,
        }
    }

    pub fn get_personality(&self) -> String {
        match self {
            Personality::Mendeleev => "Dmitri Mendeleev",
            Personality::Curie => "Marie Curie",
            Personality::Lavoisier => "Antoine Lavoisier",
        }
        .to_string()
    }
}
