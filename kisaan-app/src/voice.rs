use anyhow::Result;
use async_trait::async_trait;

/// Speech-capture engine contract. Implementations wrap whatever platform
/// recognizer is available; the session below owns one instance per active
/// view instead of reconfiguring a process-wide handle.
#[async_trait]
pub trait VoiceCapture: Send {
    async fn start(&mut self, lang: &str) -> Result<()>;

    async fn stop(&mut self) -> Result<()>;

    /// Resolves once the engine signals end of speech. None means the
    /// capture ended without a final transcript (e.g. silence).
    async fn transcript(&mut self) -> Result<Option<String>>;
}

/// Maps the app's language codes to recognizer locale tags.
pub fn locale_for(lang: &str) -> &'static str {
    match lang {
        "hi" => "hi-IN",
        "mr" => "mr-IN",
        _ => "en-IN",
    }
}

/// One capture lifecycle bound to one view: start listening, wait for the
/// final transcript, stop. Dropped together with the view, so no recognizer
/// state leaks across pages.
pub struct VoiceSession<C: VoiceCapture> {
    engine: C,
    listening: bool,
}

impl<C: VoiceCapture> VoiceSession<C> {
    pub fn new(engine: C) -> Self {
        Self {
            engine,
            listening: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub async fn start(&mut self, lang: &str) -> Result<()> {
        self.engine.start(locale_for(lang)).await?;
        self.listening = true;
        Ok(())
    }

    /// Waits for the final transcript and tears the capture down. The
    /// caller feeds a non-empty transcript into the page's submission path.
    pub async fn finish(&mut self) -> Result<Option<String>> {
        if !self.listening {
            return Ok(None);
        }
        let transcript = self.engine.transcript().await?;
        self.engine.stop().await?;
        self.listening = false;
        Ok(transcript.filter(|t| !t.trim().is_empty()))
    }

    pub async fn cancel(&mut self) -> Result<()> {
        if self.listening {
            self.engine.stop().await?;
            self.listening = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test engine that replays a fixed transcript and records its
    /// lifecycle calls.
    struct ScriptedCapture {
        transcript: Option<String>,
        started_with: Option<String>,
        stopped: bool,
    }

    impl ScriptedCapture {
        fn new(transcript: Option<&str>) -> Self {
            Self {
                transcript: transcript.map(str::to_string),
                started_with: None,
                stopped: false,
            }
        }
    }

    #[async_trait]
    impl VoiceCapture for ScriptedCapture {
        async fn start(&mut self, lang: &str) -> Result<()> {
            self.started_with = Some(lang.to_string());
            Ok(())
        }

        async fn stop(&mut self) -> Result<()> {
            self.stopped = true;
            Ok(())
        }

        async fn transcript(&mut self) -> Result<Option<String>> {
            Ok(self.transcript.take())
        }
    }

    #[tokio::test]
    async fn capture_runs_start_transcript_stop() {
        let mut session = VoiceSession::new(ScriptedCapture::new(Some("mandi price of wheat")));

        session.start("hi").await.unwrap();
        assert!(session.is_listening());
        assert_eq!(
            session.engine.started_with.as_deref(),
            Some("hi-IN") // app code mapped to a recognizer locale
        );

        let transcript = session.finish().await.unwrap();
        assert_eq!(transcript.as_deref(), Some("mandi price of wheat"));
        assert!(!session.is_listening());
        assert!(session.engine.stopped);
    }

    #[tokio::test]
    async fn silence_yields_no_transcript() {
        let mut session = VoiceSession::new(ScriptedCapture::new(None));
        session.start("en").await.unwrap();
        assert_eq!(session.finish().await.unwrap(), None);
    }

    #[tokio::test]
    async fn whitespace_transcript_is_treated_as_silence() {
        let mut session = VoiceSession::new(ScriptedCapture::new(Some("   ")));
        session.start("en").await.unwrap();
        assert_eq!(session.finish().await.unwrap(), None);
        assert!(session.engine.stopped);
    }

    #[tokio::test]
    async fn finish_without_start_is_a_no_op() {
        let mut session = VoiceSession::new(ScriptedCapture::new(Some("ignored")));
        assert_eq!(session.finish().await.unwrap(), None);
        assert!(!session.engine.stopped);
    }

    #[test]
    fn unknown_language_falls_back_to_english_locale() {
        assert_eq!(locale_for("xx"), "en-IN");
        assert_eq!(locale_for("mr"), "mr-IN");
    }
}
