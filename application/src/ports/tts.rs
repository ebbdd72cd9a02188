//! Text-to-speech port

/// Forwards accepted text to a speech synthesizer.
pub trait TtsBroadcaster: Send + Sync {
    fn broadcast_text(&self, game_id: &str, text: &str, voice_id: &str);
}

/// No-op TTS
pub struct NoTts;

impl TtsBroadcaster for NoTts {
    fn broadcast_text(&self, _game_id: &str, _text: &str, _voice_id: &str) {}
}
