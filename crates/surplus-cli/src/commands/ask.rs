//! Question answering commands

use anyhow::Result;
use surplus_core::store::save_last_answer;
use surplus_core::{classify, ChartPreferences, SurplusAnalysis};
use surplus_server::MAX_QUESTION_LEN;

use super::{resolve_granularity, Workspace};
use crate::voice::SpeechCapability;

/// Words that end the chat loop
const EXIT_WORDS: &[&str] = &["quit", "exit", "bye"];

/// Reply when listening fails
pub const MISHEARD_REPLY: &str = "Sorry, I didn't catch that. Please try again.";

/// Consecutive listen failures before the chat gives up
const MAX_LISTEN_FAILURES: usize = 3;

fn validate_question(question: &str) -> Result<&str> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Question cannot be empty");
    }
    if question.chars().count() > MAX_QUESTION_LEN {
        anyhow::bail!(
            "Question exceeds maximum length of {} characters",
            MAX_QUESTION_LEN
        );
    }
    Ok(question)
}

/// Answer one question and remember the answer; returns the answer text
pub fn cmd_ask(
    ws: &Workspace,
    question: &str,
    granularity: Option<&str>,
    forecast_override: Option<bool>,
) -> Result<String> {
    let question = validate_question(question)?;
    let prefs = ChartPreferences::load(&ws.store)?;
    let granularity = resolve_granularity(granularity, &prefs)?;
    let forecast_enabled = forecast_override.unwrap_or(prefs.show_forecast);

    let series = ws.source.series(granularity)?;
    let analysis = SurplusAnalysis::run(series, granularity, &ws.config);
    let reply = analysis.answer(question, forecast_enabled, &ws.config);

    tracing::debug!(intent = classify(question).as_str(), granularity = %granularity, "Answered question");
    save_last_answer(&ws.store, &reply)?;

    println!("💬 {}", reply);
    Ok(reply)
}

/// Interactive loop: listen, answer, speak; returns the number of questions answered
pub fn cmd_chat<S: SpeechCapability>(
    ws: &Workspace,
    granularity: Option<&str>,
    speech: &mut S,
) -> Result<usize> {
    let prefs = ChartPreferences::load(&ws.store)?;
    let granularity = resolve_granularity(granularity, &prefs)?;
    let series = ws.source.series(granularity)?;
    let analysis = SurplusAnalysis::run(series, granularity, &ws.config);

    println!();
    println!("🗨️  Ask about the {} chart (\"quit\" to stop)", granularity);

    let mut answered = 0;
    let mut failures = 0;
    loop {
        // Only one utterance at a time
        speech.cancel();

        let heard = match speech.listen() {
            Ok(Some(heard)) => heard,
            Ok(None) => break,
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, failures, "Failed to listen");
                if failures >= MAX_LISTEN_FAILURES {
                    return Err(e.context("Giving up after repeated listen failures"));
                }
                speech.speak(MISHEARD_REPLY);
                continue;
            }
        };
        failures = 0;
        let heard = heard.trim();
        if heard.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&heard.to_lowercase().as_str()) {
            break;
        }

        let question = match validate_question(heard) {
            Ok(q) => q,
            Err(e) => {
                speech.speak(&e.to_string());
                continue;
            }
        };

        let reply = analysis.answer(question, prefs.show_forecast, &ws.config);
        save_last_answer(&ws.store, &reply)?;
        speech.speak(&reply);
        answered += 1;
    }

    tracing::debug!(answered, "Chat ended");
    Ok(answered)
}
