//! Push-to-talk conversation controller.
//!
//! Speech-to-text → language model → text-to-speech. The agents are
//! external; this only sequences them and tracks listening/busy state.
//! Agent replies arrive later through `on_transcript` / `on_llm_response`.

use tracing::{debug, error, info};

use crate::error::AgentError;

pub trait SpeechToText {
    fn start_listening(&mut self);
    fn stop_listening(&mut self);
}

pub trait LanguageModel {
    /// Queue a prompt; the response is delivered via
    /// [`Conversation::on_llm_response`].
    fn send_prompt(&mut self, prompt: &str) -> Result<(), AgentError>;
}

pub trait TextToSpeech {
    fn speak(&mut self, text: &str);
}

/// Conversation state over three agents.
pub struct Conversation<S, L, T> {
    stt: S,
    llm: L,
    tts: T,
    listening: bool,
    busy: bool,
}

impl<S, L, T> Conversation<S, L, T>
where
    S: SpeechToText,
    L: LanguageModel,
    T: TextToSpeech,
{
    pub fn new(stt: S, llm: L, tts: T) -> Self {
        Self {
            stt,
            llm,
            tts,
            listening: false,
            busy: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// A request is in flight; button presses are ignored.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Toggle listening. Ignored while busy.
    pub fn press_button(&mut self) {
        if self.busy {
            debug!("Voice: busy, ignoring button");
            return;
        }
        if self.listening {
            self.listening = false;
            self.stt.stop_listening();
            info!("Voice: stopped listening");
        } else {
            self.listening = true;
            self.stt.start_listening();
            info!("Voice: listening");
        }
    }

    pub fn on_transcript(&mut self, transcript: &str) {
        if transcript.trim().is_empty() {
            return;
        }
        self.busy = true;
        self.listening = false;

        if let Err(e) = self.llm.send_prompt(transcript) {
            error!("Voice: prompt failed: {}", e);
            self.busy = false;
        }
    }

    pub fn on_llm_response(&mut self, text: &str) {
        self.tts.speak(text);
        self.busy = false;
    }

    pub fn on_llm_error(&mut self, err: &AgentError) {
        error!("Voice: language model error: {}", err);
        self.busy = false;
    }

    pub fn agents(&self) -> (&S, &L, &T) {
        (&self.stt, &self.llm, &self.tts)
    }
}
