//! Front-end side of the mission control dashboard: the HTTP client for the
//! second brain service, the capture & search surface built on top of it and
//! the daily habits checklist.

pub mod client;
pub mod habits;
pub mod surface;

pub use client::{ClientError, SecondBrainClient};
pub use habits::{Habit, HabitBoard, HabitGroup};
pub use surface::{Draft, LoadStatus, MemoryApi, SecondBrainSurface, SubmitOutcome};
