mod config;
mod error;
mod periodic;
mod quiz;

use std::sync::Arc;

use chatgpt::{client::ChatGPT, config::ChatGPTEngine};
use dotenv::dotenv;
use periodic::PeriodicTable;
use quiz::{
    ai_helper::QuizHelper,
    templates::{Difficulty, QuestionBank},
    AnswerOutcome, QuestionView, QuizSession, QuizSettings, QuizState, QuizStep,
};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, KeyboardRemove},
};

use crate::config::BotConfig;
use crate::error::QuizError;

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    ReceiveElement,
    ReceiveDifficulty {
        symbol: String,
    },
    ElementQuiz {
        session: QuizSession,
    },
}

type UserInfoStorage = std::sync::Arc<ErasedStorage<State>>;

/// Everything the quiz handlers share across chats.
struct QuizContext {
    table: PeriodicTable,
    bank: QuestionBank,
    settings: QuizSettings,
    helper: Option<QuizHelper>,
}

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv().is_ok();

    pretty_env_logger::init();
    if !dotenv_loaded {
        log::debug!("No .env file found, using the process environment");
    }
    log::info!("Starting periodic table quiz bot...");

    let config = BotConfig::from_env().expect("Invalid bot configuration");

    let bot = Bot::from_env();

    let storage: UserInfoStorage = InMemStorage::<State>::new().erase();

    log::info!("Loading the element table from {}", config.table_path.display());
    let table = PeriodicTable::open(&config.table_path).expect("Failed to load the element table");
    log::info!("Loaded {} elements", table.len());

    let helper = match &config.chatgpt_api_key {
        Some(key) => {
            let mut gpt = ChatGPT::new(key).expect("Unable to connect with ChatGPT");

            gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
            gpt.config.timeout = std::time::Duration::from_secs(15);

            Some(QuizHelper::new(gpt, config.personality))
        }
        None => {
            log::warn!("CHATGPT_API_KEY is not set, wrong answers get a plain reply");
            None
        }
    };

    let context = Arc::new(QuizContext {
        table,
        bank: QuestionBank::standard(),
        settings: config.quiz,
        helper,
    });
    let context_for_element = context.clone();
    let context_for_difficulty = context.clone();
    let context_for_quiz = context;

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveElement].endpoint(
                move |bot: Bot, dialogue: QuizDialogue, msg: Message| {
                    receive_element(context_for_element.clone(), bot, dialogue, msg)
                },
            ))
            .branch(dptree::case![State::ReceiveDifficulty { symbol }].endpoint(
                move |bot: Bot, dialogue: QuizDialogue, symbol: String, msg: Message| {
                    receive_difficulty(context_for_difficulty.clone(), bot, dialogue, symbol, msg)
                },
            ))
            .branch(dptree::case![State::ElementQuiz { session }].endpoint(
                move |bot: Bot, dialogue: QuizDialogue, session: QuizSession, msg: Message| {
                    element_quiz(context_for_quiz.clone(), bot, dialogue, session, msg)
                },
            )),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Hi! I'm a periodic table bot. Pick an element and I'll quiz you on it. \
Send me a symbol, a name or an atomic number (e.g. Fe, Iron or 26).";
const ASK_ELEMENT_TEXT: &str = "Which element next? Send a symbol, a name or an atomic number.";
const STOP_COMMAND: &str = "/stop";
const MORE_COMMAND: &str = "/more";

fn difficulty_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        Difficulty::ALL
            .iter()
            .map(|d| KeyboardButton::new(d.as_str()))
            .collect::<Vec<_>>(),
        vec![KeyboardButton::new(MORE_COMMAND)],
    ])
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    dialogue.update(State::ReceiveElement).await?;
    Ok(())
}

async fn receive_element(
    context: Arc<QuizContext>,
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please send the element as text")
            .await?;
        return Ok(());
    };

    let Some(element) = context.table.resolve(text) else {
        bot.send_message(
            msg.chat.id,
            format!("I don't know an element called \"{}\". Try again?", text.trim()),
        )
        .await?;
        return Ok(());
    };

    bot.send_message(msg.chat.id, element.card()).await?;

    bot.send_message(msg.chat.id, "Choose the quiz difficulty, or /more to read more")
        .reply_markup(difficulty_keyboard())
        .await?;

    dialogue
        .update(State::ReceiveDifficulty {
            symbol: element.symbol.clone(),
        })
        .await?;
    Ok(())
}

async fn receive_difficulty(
    context: Arc<QuizContext>,
    bot: Bot,
    dialogue: QuizDialogue,
    symbol: String,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please choose one of the options")
            .await?;
        return Ok(());
    };

    if text.trim() == MORE_COMMAND {
        match context.table.find_by_symbol(&symbol) {
            Some(element) => {
                bot.send_message(msg.chat.id, element.details())
                    .reply_markup(difficulty_keyboard())
                    .await?;
            }
            None => log::warn!("Element {} vanished from the table", symbol),
        }
        return Ok(());
    }
    let difficulty = Difficulty::from_label(text);

    let mut session = QuizSession::default();
    let started = session.start(
        &context.table,
        &symbol,
        difficulty,
        &context.bank,
        &context.settings,
        &mut rand::thread_rng(),
    );

    match started {
        Ok(QuizStep::Question(view)) => {
            send_question(&bot, &msg, &view).await?;
            dialogue.update(State::ElementQuiz { session }).await?;
        }
        Ok(QuizStep::Finished(summary)) => {
            bot.send_message(msg.chat.id, format!("{}\n\n{}", summary, ASK_ELEMENT_TEXT))
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue.update(State::ReceiveElement).await?;
        }
        Err(QuizError::ElementNotFound(symbol)) => {
            log::warn!("Element {} vanished from the table", symbol);
            bot.send_message(msg.chat.id, ASK_ELEMENT_TEXT)
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue.update(State::ReceiveElement).await?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn element_quiz(
    context: Arc<QuizContext>,
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let Some(answer) = msg.text() else {
        bot.send_message(msg.chat.id, "Please pick one of the answers")
            .await?;
        return Ok(());
    };

    if answer.trim() == STOP_COMMAND {
        session.dismiss();
        bot.send_message(msg.chat.id, format!("Quiz stopped.\n\n{}", ASK_ELEMENT_TEXT))
            .reply_markup(KeyboardRemove::new())
            .await?;
        dialogue.update(State::ReceiveElement).await?;
        return Ok(());
    }

    if session.state() != QuizState::InProgress {
        log::warn!("Answer without a running quiz: {:?}", session.state());
        bot.send_message(msg.chat.id, ASK_ELEMENT_TEXT)
            .reply_markup(KeyboardRemove::new())
            .await?;
        dialogue.update(State::ReceiveElement).await?;
        return Ok(());
    }

    let outcome = session.answer(answer)?;

    if outcome.correct {
        bot.send_message(msg.chat.id, "Correct!").await?;
    } else {
        let reply = wrong_answer_reply(&context, &bot, &msg, &session, &outcome).await;
        bot.send_message(msg.chat.id, format!("Wrong!\n\n{}", reply))
            .await?;
    }

    match outcome.next {
        QuizStep::Question(view) => {
            send_question(&bot, &msg, &view).await?;
            dialogue.update(State::ElementQuiz { session }).await?;
        }
        QuizStep::Finished(summary) => {
            bot.send_message(msg.chat.id, format!("Quiz complete! {}\n\n{}", summary, ASK_ELEMENT_TEXT))
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue.update(State::ReceiveElement).await?;
        }
    }
    Ok(())
}

async fn send_question(bot: &Bot, msg: &Message, view: &QuestionView) -> HandlerResult {
    let question_text = format!("Question {} of {}:\n{}", view.number, view.total, view.prompt);

    bot.send_message(msg.chat.id, question_text)
        .reply_markup(KeyboardMarkup::new(
            view.options
                .iter()
                .map(|option| vec![KeyboardButton::new(option.clone())])
                .collect::<Vec<_>>(),
        ))
        .await?;
    Ok(())
}

async fn wrong_answer_reply(
    context: &QuizContext,
    bot: &Bot,
    msg: &Message,
    session: &QuizSession,
    outcome: &AnswerOutcome,
) -> String {
    let fallback = match outcome.question.correct_answer() {
        Some(correct) => format!("The correct answer was {}.", correct.text),
        None => "That wasn't it.".to_string(),
    };

    let (Some(helper), Some(quiz)) = (&context.helper, session.quiz()) else {
        return fallback;
    };

    // The reply still goes out if the typing indicator fails
    let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;

    match helper
        .generate_reply_to_wrong_answer(&quiz.element_name, &outcome.question, &outcome.selected)
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            log::warn!("AI helper failed, falling back to the plain reply: {}", err);
            fallback
        }
    }
}
