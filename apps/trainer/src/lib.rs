//! Terminal front end for the quiz session engine.
//!
//! Wires the engine to an in-memory card repository seeded with demo sets.
//! Typed modes read answers line by line; flashcard mode flips between
//! question and answer with know/don't-know grading. Speed mode races the
//! engine's countdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quiz_core::{
    Card, InMemoryRepository, QuizEngine, SessionConfig, SessionRecord, SubmitOutcome,
    TrainingMode, ALL_SETS,
};

const SKIP_COMMAND: &str = "!skip";
const STOP_COMMAND: &str = "!stop";

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mode = match std::env::args().nth(1) {
        Some(arg) => TrainingMode::from_str(&arg)
            .with_context(|| format!("unknown mode '{arg}' (education|accuracy|speed|flashcards)"))?,
        None => TrainingMode::Education,
    };

    let cards = demo_cards();
    tracing::debug!(cards = cards.len(), "seeding demo repository");
    let repo = Arc::new(InMemoryRepository::with_cards(cards));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    if let Some(secs) = speed_duration_override() {
        engine = engine.with_speed_duration(Duration::from_secs(secs));
    }

    engine
        .start(SessionConfig::new(mode, vec![ALL_SETS.to_string()]))
        .await?;

    println!("Mode: {}. {} cards in the queue.", mode.as_str(), engine.state().queue.len());
    if mode == TrainingMode::Flashcards {
        println!("Press Enter to reveal, then answer y/n (knew it / didn't).");
    } else {
        println!("Type the translation. '{SKIP_COMMAND}' skips, '{STOP_COMMAND}' ends the session.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let record = play(&mut engine, &mut lines, mode).await?;
    if let Some(record) = record {
        print_summary(&record);
    }
    Ok(())
}

/// Optional SPEED_SECONDS override, handy for trying speed mode without the
/// full four minutes.
fn speed_duration_override() -> Option<u64> {
    std::env::var("SPEED_SECONDS").ok()?.parse().ok()
}

async fn play(
    engine: &mut QuizEngine<InMemoryRepository>,
    lines: &mut Lines<BufReader<Stdin>>,
    mode: TrainingMode,
) -> anyhow::Result<Option<SessionRecord>> {
    loop {
        let Some(card) = engine.current_card() else {
            // finite queue exhausted; the record was produced on the last answer
            return Ok(None);
        };
        let question = card.question.clone();

        match engine.time_remaining() {
            Some(left) => println!("\n[{}:{:02}] {}", left / 60, left % 60, question),
            None => println!("\n{question}"),
        }

        let Some(input) = read_answer(engine, lines).await? else {
            // countdown hit zero between prompts
            return Ok(engine.stop(true).await?);
        };

        let outcome = match input.trim() {
            STOP_COMMAND => return Ok(engine.stop(false).await?),
            SKIP_COMMAND => engine.skip().await?,
            _ if mode == TrainingMode::Flashcards => grade_flashcard(engine, lines).await?,
            answer => {
                if engine.is_live_match(answer) {
                    println!("(live match)");
                }
                engine.submit_answer(answer).await?
            }
        };

        match outcome {
            SubmitOutcome::Graded {
                is_correct,
                record: Some(record),
            } => {
                print_feedback(is_correct);
                return Ok(Some(record));
            }
            SubmitOutcome::Graded { is_correct, .. } => print_feedback(is_correct),
            SubmitOutcome::Ignored => return Ok(engine.stop(true).await?),
        }
    }
}

/// Read one line, racing the countdown when a timer is running.
/// `None` means the timer expired first.
async fn read_answer(
    engine: &QuizEngine<InMemoryRepository>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<Option<String>> {
    let mut expiry = engine.timer().map(|timer| timer.subscribe());

    let expired = async {
        match expiry.as_mut() {
            Some(rx) => {
                while *rx.borrow() > 0 {
                    if rx.changed().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
            }
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = expired => {
            println!("\nTime's up!");
            Ok(None)
        }
        line = lines.next_line() => {
            Ok(Some(line?.unwrap_or_else(|| STOP_COMMAND.to_string())))
        }
    }
}

/// Flashcard flow: the first Enter revealed the answer, then y/n grades it.
async fn grade_flashcard(
    engine: &mut QuizEngine<InMemoryRepository>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<SubmitOutcome> {
    let answer = engine
        .current_card()
        .map(|card| card.answer.clone())
        .unwrap_or_default();
    println!("→ {answer}");
    println!("Did you know it? (y/n)");

    let verdict = lines.next_line().await?.unwrap_or_default();
    if verdict.trim().eq_ignore_ascii_case("y") {
        Ok(engine.mark_known().await?)
    } else {
        Ok(engine.mark_unknown().await?)
    }
}

fn print_feedback(is_correct: bool) {
    if is_correct {
        println!("✓ correct");
    } else {
        println!("✕ wrong");
    }
}

fn print_summary(record: &SessionRecord) {
    println!("\n--- Session summary ---");
    println!("Mode:     {}", record.mode.as_str());
    println!("Sets:     {}", record.set_ids.join(", "));
    println!("Answered: {}", record.total_questions);
    println!(
        "Correct:  {} ({:.1}%)",
        record.correct_answers, record.accuracy
    );
}

/// Demo word sets standing in for user-created data.
fn demo_cards() -> Vec<Card> {
    let words = [
        ("greetings", "Hello", "Привіт"),
        ("greetings", "Good morning", "Добрий ранок"),
        ("greetings", "Goodbye", "До побачення, Бувай"),
        ("basics", "World", "Світ"),
        ("basics", "Water", "Вода"),
        ("basics", "Book", "Книга, Книжка"),
        ("animals", "Cat", "Кіт, Кішка"),
        ("animals", "Dog", "Пес, Собака"),
    ];
    words
        .iter()
        .enumerate()
        .map(|(i, (set_id, question, answer))| Card {
            id: format!("w{}", i + 1),
            set_id: (*set_id).to_string(),
            question: (*question).to_string(),
            answer: (*answer).to_string(),
            proficiency: 0,
        })
        .collect()
}
