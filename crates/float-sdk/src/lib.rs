/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Float SDK crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod config;
pub mod events;
pub mod float;
pub mod http;
pub mod resources;
pub mod types;

// Re-export the facade
pub use float::{BindingTable, BoundOperation, Float, FloatBuilder, MethodBinding};

// Re-export commonly used types from config
pub use config::{FloatConfig, ModuleConfig, ModuleOverlay};

// Re-export commonly used types from events
pub use events::{Event, EventEmitter, EventPayload};

// Re-export commonly used types from http
pub use http::{
    ApiErrorBody,
    ApiRequest,
    ClientConfig,
    FloatError,
    HttpTransport,
    MockReply,
    MockTransport,
    Result,
    Transport,
};

// Re-export resource clients
pub use resources::{Accounts, Args, Cards, Passwords, Resource, Scoring, Users};

// Re-export all types
pub use types::*;
