use std::path::PathBuf;

use crate::error::ConfigError;
use crate::quiz::ai_helper::Personality;
use crate::quiz::distractors::DistractorSettings;
use crate::quiz::templates::MissingAnswerPolicy;
use crate::quiz::QuizSettings;

const DEFAULT_TABLE_PATH: &str = "PeriodicTableJSON.json";

/// Everything the bot reads from the environment (or `.env`).
/// The Telegram token is read separately by `Bot::from_env`.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub table_path: PathBuf,
    pub quiz: QuizSettings,
    pub chatgpt_api_key: Option<String>,
    pub personality: Personality,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            quiz: QuizSettings::default(),
            chatgpt_api_key: None,
            personality: Personality::default(),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let distractor_defaults = DistractorSettings::default();

        let table_path = lookup("PERIODIC_TABLE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.table_path);

        let quiz = QuizSettings {
            questions_per_quiz: positive(&lookup, "QUIZ_QUESTIONS", defaults.quiz.questions_per_quiz)?,
            distractors: DistractorSettings {
                max_distractors: positive(&lookup, "QUIZ_MAX_DISTRACTORS", distractor_defaults.max_distractors)?,
                candidate_quota: positive(&lookup, "QUIZ_CANDIDATE_QUOTA", distractor_defaults.candidate_quota)?,
                attempts_per_element: positive(
                    &lookup,
                    "QUIZ_ATTEMPTS_PER_ELEMENT",
                    distractor_defaults.attempts_per_element,
                )?,
            },
            missing_answers: match lookup("QUIZ_MISSING_ANSWERS") {
                None => defaults.quiz.missing_answers,
                Some(value) => match value.trim().to_lowercase().as_str() {
                    "placeholder" => MissingAnswerPolicy::Placeholder,
                    "skip" => MissingAnswerPolicy::Skip,
                    _ => {
                        return Err(ConfigError::InvalidChoice {
                            var: "QUIZ_MISSING_ANSWERS",
                            expected: "placeholder, skip",
                            value,
                        })
                    }
                },
            },
        };

        let personality = match lookup("QUIZ_HELPER_PERSONALITY") {
            None => defaults.personality,
            Some(value) => Personality::from_label(&value).ok_or(ConfigError::InvalidChoice {
                var: "QUIZ_HELPER_PERSONALITY",
                expected: "mendeleev, curie, lavoisier",
                value,
            })?,
        };

        let chatgpt_api_key = lookup("CHATGPT_API_KEY").filter(|key| !key.trim().is_empty());

        Ok(Self {
            table_path,
            quiz,
            chatgpt_api_key,
            personality,
        })
    }
}

fn positive<F>(lookup: &F, var: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(number) if number > 0 => Ok(number),
            _ => Err(ConfigError::InvalidNumber { var, value }),
        },
    }
}
