//! Speech input and output for the chat loop
//!
//! The assistant never talks to a device directly. It listens and speaks
//! through [`SpeechCapability`], so a platform recognizer/synthesizer can
//! be plugged in later and tests can script a conversation. The console
//! implementation reads typed lines and prints spoken replies.

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub trait SpeechCapability {
    /// Wait for one utterance; `Ok(None)` once input has ended
    fn listen(&mut self) -> Result<Option<String>>;

    /// Say `text`, replacing anything still being spoken
    fn speak(&mut self, text: &str);

    /// Stop any utterance in progress
    fn cancel(&mut self) {}
}

/// Typed questions in, printed answers out
pub struct ConsoleSpeech<R, W> {
    input: R,
    output: W,
}

impl ConsoleSpeech<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleSpeech<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> SpeechCapability for ConsoleSpeech<R, W> {
    fn listen(&mut self) -> Result<Option<String>> {
        write!(self.output, "🎤 > ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn speak(&mut self, text: &str) {
        // Output failures never interrupt the conversation
        if let Err(e) = writeln!(self.output, "🔊 {}", text) {
            tracing::warn!(error = %e, "Failed to speak answer");
        }
    }
}
