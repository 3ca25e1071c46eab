//! Touch gesture recognition.

pub mod recognizer;

pub use recognizer::{classify_edge, Classification, EdgeAction, EdgeZones, GestureRecognizer, GestureSample};
