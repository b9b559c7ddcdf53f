mod controller;
mod engine;
mod event;

pub use {
    controller::{LoopController, RestartDelays},
    engine::{NoPlayback, PlaybackMonitor, RecognitionEngine},
    event::{RecognitionEvent, SessionEvent, SessionSink},
};
