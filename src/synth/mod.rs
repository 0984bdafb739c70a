// Purpose: string voices and the six-string bank
// This layer sits between the raw DSP loop and the engine's render step

pub mod bank;
pub mod message;
pub mod voice;

pub use bank::StringBank;
pub use message::{MessageReceiver, StrumDirection, SynthMessage};
pub use voice::{PluckResponse, StringVoice, VoiceState};
