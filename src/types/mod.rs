//! Core types for the SAI engine

mod distress;
mod guidance;
mod message;
mod path;
mod reason;
mod stress;
mod voice;

pub use distress::{CheckInKind, DistressLevel, TrackerOutput};
pub use guidance::{CommunicationProfile, ResponseGuidance, Tone};
pub use message::{BehavioralPattern, BehaviorWindow, Message};
pub use path::{PathConfig, PathSignals, ResponsePath};
pub use reason::{RouteReason, TrackerReason};
pub use stress::{
    RecommendedAction, StressAnalysis, StressLevel, StressSignals, TriggerCategory,
};
pub use voice::{VoiceMetrics, BASELINE_PACE_WPM, BASELINE_PITCH_HZ, BASELINE_VOLUME};
